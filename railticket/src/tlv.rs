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

//! BER-TLV (tag, length, value) decoding.
//!
//! Only the subset used by VDV tickets is supported: tags of up to four bytes
//! and definite lengths of up to four length bytes.

use std::error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const MAX_TAG_BYTES: usize = 4;
const MAX_LENGTH_BYTES: usize = 4;

/// A decoded TLV that references its value.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Tlv<'a> {
    pub tag: u32,
    pub value: &'a [u8],
}

/// An owned TLV element.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TlvElement {
    pub tag: u32,
    pub value: Vec<u8>,
}

impl From<Tlv<'_>> for TlvElement {
    fn from(tlv: Tlv<'_>) -> Self {
        Self {
            tag: tlv.tag,
            value: tlv.value.to_vec(),
        }
    }
}

impl fmt::Display for TlvElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}: ", self.tag)?;
        self.value.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}

/// Errors produced while decoding TLVs.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum TlvError {
    TruncatedTag,
    TruncatedLength,
    TruncatedValue,
    /// The tag is longer than four bytes.
    MalformedTag,
    /// Indefinite length or more than four length bytes.
    MalformedLength,
}

impl fmt::Display for TlvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedTag => write!(f, "tag is truncated"),
            Self::TruncatedLength => write!(f, "length is truncated"),
            Self::TruncatedValue => write!(f, "value is truncated"),
            Self::MalformedTag => write!(f, "tag is longer than {MAX_TAG_BYTES} byte"),
            Self::MalformedLength => write!(f, "length is indefinite or too long"),
        }
    }
}

impl error::Error for TlvError {}

/// Reads TLVs one after another from a byte slice.
pub struct Parser<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser starting at offset zero.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// The number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the next TLV, or `None` if all bytes are consumed.
    ///
    /// A failed read doesn't advance the parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLV is truncated or malformed.
    pub fn next(&mut self) -> Result<Option<Tlv<'a>>, TlvError> {
        if self.offset >= self.bytes.len() {
            return Ok(None);
        }

        let mut pos = self.offset;
        let tag = self.read_tag(&mut pos)?;
        let len = self.read_length(&mut pos)?;

        let value = pos
            .checked_add(len)
            .and_then(|end| self.bytes.get(pos..end))
            .ok_or(TlvError::TruncatedValue)?;

        self.offset = pos + len;
        Ok(Some(Tlv { tag, value }))
    }

    fn byte(&self, pos: usize, err: TlvError) -> Result<u8, TlvError> {
        self.bytes.get(pos).copied().ok_or(err)
    }

    fn read_tag(&self, pos: &mut usize) -> Result<u32, TlvError> {
        let first = self.byte(*pos, TlvError::TruncatedTag)?;
        *pos += 1;
        let mut tag = u32::from(first);

        // low five bits set announce subsequent tag bytes
        if first & 0x1F == 0x1F {
            let mut n = 1;
            loop {
                let b = self.byte(*pos, TlvError::TruncatedTag)?;
                *pos += 1;
                n += 1;
                if n > MAX_TAG_BYTES {
                    return Err(TlvError::MalformedTag);
                }
                tag = (tag << 8) | u32::from(b);
                if b & 0x80 == 0 {
                    break;
                }
            }
        }

        Ok(tag)
    }

    fn read_length(&self, pos: &mut usize) -> Result<usize, TlvError> {
        let first = self.byte(*pos, TlvError::TruncatedLength)?;
        *pos += 1;

        if first < 0x80 {
            return Ok(first.into());
        }

        let n = usize::from(first & 0x7F);
        if n == 0 || n > MAX_LENGTH_BYTES {
            return Err(TlvError::MalformedLength);
        }

        let mut len = 0usize;
        for _ in 0..n {
            let b = self.byte(*pos, TlvError::TruncatedLength)?;
            *pos += 1;
            len = (len << 8) | usize::from(b);
        }

        Ok(len)
    }
}

/// Decodes all TLVs of a byte slice.
///
/// # Errors
///
/// Returns an error if any TLV is truncated or malformed.
pub fn parse_all(bytes: &[u8]) -> Result<Vec<Tlv<'_>>, TlvError> {
    let mut parser = Parser::new(bytes);
    let mut tlvs = Vec::new();

    while let Some(tlv) = parser.next()? {
        tlvs.push(tlv);
    }

    Ok(tlvs)
}
