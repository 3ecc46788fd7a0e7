// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! UIC 918.3 ticket layouts.
//!
//! A layout is a four character standard and a list of positioned text
//! fields. All numbers are zero-padded ASCII decimals:
//!
//! ```text
//! header: standard[4] field_count[4]
//! field:  line[2] column[2] height[2] width[2] formatting[1] text_length[4] text[text_length]
//! ```
//!
//! Layouts of the `RCT2` standard are additionally rendered into a grid from
//! which the [`Rct2Layout`] is extracted.

use std::fmt;

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::fields::{Column, FieldCount, Formatting, Height, Line, TextLength, Width};
use crate::record::Fields;
use crate::Error;

mod rct2;

pub use rct2::{Rct2Layout, COLUMNS, ROWS};
use rct2::Grid;

/// The length of the layout header.
pub const HEADER_LENGTH: usize = 8;

/// The length of a field without its text.
const FIELD_HEADER_LENGTH: usize = 13;

pub const RCT2: &str = "RCT2";

/// The formatting of a field's text.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutV1FieldFormatting(pub u8);

impl LayoutV1FieldFormatting {
    pub fn bold(&self) -> bool {
        self.0 & 0b001 != 0
    }

    pub fn italic(&self) -> bool {
        self.0 & 0b010 != 0
    }

    pub fn small_font(&self) -> bool {
        self.0 & 0b100 != 0
    }
}

impl fmt::Display for LayoutV1FieldFormatting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bold={}, italic={}, small_font={}",
            self.bold(),
            self.italic(),
            self.small_font()
        )
    }
}

/// A text field of the layout.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutV1Field {
    pub line: u8,
    pub column: u8,
    pub height: u8,
    pub width: u8,
    pub formatting: LayoutV1FieldFormatting,
    /// The text with lines separated by `\n`.
    pub text: String,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutV1 {
    pub standard: String,
    pub fields: Vec<LayoutV1Field>,
    /// The [`ROWS`] lines of [`COLUMNS`] characters of an RCT2 ticket with NUL
    /// for blank cells, or empty for any other standard.
    pub text_body: Vec<String>,
    pub rct2_layout: Option<Rct2Layout>,
}

impl LayoutV1 {
    /// Decodes a layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooShort`] if the header is incomplete, an error
    /// naming the invalid part of the header or a field, and for RCT2 layouts
    /// [`Error::OutOfBounds`] if a field doesn't fit into the grid or
    /// [`Error::InvalidTravelClass`].
    ///
    /// # Examples
    ///
    /// ```
    /// use railticket::uic::LayoutV1;
    ///
    /// # fn main() -> Result<(), railticket::Error> {
    /// let layout = LayoutV1::parse(b"ABCD00010101000000002Hi")?;
    ///
    /// assert_eq!(layout.standard, "ABCD");
    /// assert_eq!(layout.fields[0].text, "Hi");
    /// assert!(layout.rct2_layout.is_none());
    /// #     Ok(())
    /// # }
    /// ```
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        debug!("UIC layout decode: {} byte", bytes.len());

        if bytes.len() < HEADER_LENGTH {
            return Err(Error::TooShort {
                expected: HEADER_LENGTH,
                actual: bytes.len(),
            });
        }

        let mut header = Fields::new(bytes);

        let standard = header.take(4)?;
        if !standard.is_ascii() {
            return Err(Error::InvalidStandard {
                bytes: standard.to_vec(),
            });
        }
        let standard: String = standard.iter().copied().map(char::from).collect();

        let field_count: FieldCount = header.next()?;
        let field_count = field_count
            .as_u16()
            .map_err(|_| Error::InvalidFieldCount {
                bytes: field_count.as_bytes().to_vec(),
            })?;

        let mut fields = Fields::new(header.rest());

        // each field needs at least a field header
        let capacity = usize::from(field_count).min(fields.rest().len() / FIELD_HEADER_LENGTH);
        let mut layout_fields = Vec::with_capacity(capacity);

        for index in 0..usize::from(field_count) {
            let field = parse_field(&mut fields, index)?;
            trace!(
                "layout field {index} at {}/{}: {:?}",
                field.line,
                field.column,
                field.text
            );
            layout_fields.push(field);
        }

        let (text_body, rct2_layout) = if standard == RCT2 {
            let mut grid = Grid::new();
            for field in &layout_fields {
                grid.write(field.line.into(), field.column.into(), &field.text)?;
            }

            let layout = Rct2Layout::new(&grid)?;
            (grid.to_lines(), Some(layout))
        } else {
            (Vec::new(), None)
        };

        debug!(
            "UIC layout {standard} with {} fields decoded",
            layout_fields.len()
        );

        Ok(Self {
            standard,
            fields: layout_fields,
            text_body,
            rct2_layout,
        })
    }
}

fn parse_field(fields: &mut Fields<'_>, index: usize) -> Result<LayoutV1Field, Error> {
    let too_short = |expected: usize, actual: usize| Error::FieldTooShort {
        index,
        expected,
        actual,
    };

    let remaining = fields.rest().len();
    let header = fields
        .take(FIELD_HEADER_LENGTH)
        .map_err(|_| too_short(FIELD_HEADER_LENGTH, remaining))?;
    let mut header = Fields::new(header);

    let position = header.rest().get(..8).unwrap_or_default();
    let invalid_position = |_: Error| Error::InvalidFieldPosition {
        index,
        bytes: position.to_vec(),
    };
    let line = header.next::<Line>()?.as_u8().map_err(invalid_position)?;
    let column = header.next::<Column>()?.as_u8().map_err(invalid_position)?;
    let height = header.next::<Height>()?.as_u8().map_err(invalid_position)?;
    let width = header.next::<Width>()?.as_u8().map_err(invalid_position)?;

    let formatting: Formatting = header.next()?;
    let formatting = formatting
        .as_u8()
        .map(LayoutV1FieldFormatting)
        .map_err(|_| Error::InvalidFieldFormatting {
            index,
            bytes: formatting.as_bytes().to_vec(),
        })?;

    let text_length: TextLength = header.next()?;
    let text_length = text_length
        .as_u16()
        .map_err(|_| Error::InvalidFieldTextLength {
            index,
            bytes: text_length.as_bytes().to_vec(),
        })?;
    let text_length = usize::from(text_length);

    let remaining = fields.rest().len();
    let text = fields
        .take(text_length)
        .map_err(|_| too_short(text_length, remaining))?;
    let text = std::str::from_utf8(text).map_err(|_| Error::InvalidFieldText { index })?;

    Ok(LayoutV1Field {
        line,
        column,
        height,
        width,
        formatting,
        text: text.replace("\\n", "\n"),
    })
}

impl TryFrom<&[u8]> for LayoutV1 {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::parse(bytes)
    }
}
