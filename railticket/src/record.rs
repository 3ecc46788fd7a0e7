// SPDX-License-Identifier: Apache-2.0
// Copyright 2024, 2026 Joe Pearson
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

use crate::{Error, FixedField};

/// A cursor that reads consecutive fixed fields from a byte slice.
pub struct Fields<'a> {
    bytes: &'a [u8],
    index: usize,
}

impl<'a> Fields<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, index: 0 }
    }

    /// Reads the next field, and advances the position by the field's length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooShort`] if less than the field's length is left
    /// or any error of parsing the field.
    #[inline]
    pub fn next<F>(&mut self) -> Result<F, Error>
    where
        F: FixedField<'a>,
    {
        let bytes = self.take(F::LENGTH)?;
        F::from_bytes(bytes)
    }

    /// Takes the next `n` bytes and advances the position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooShort`] if less than `n` bytes are left.
    #[inline]
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let end = self.index.checked_add(n).filter(|&end| end <= self.bytes.len());

        match end {
            Some(end) => {
                let bytes = &self.bytes[self.index..end];
                self.index = end;
                Ok(bytes)
            }
            None => Err(Error::TooShort {
                expected: self.index.saturating_add(n),
                actual: self.bytes.len(),
            }),
        }
    }

    /// Skips `n` bytes, advancing the position without parsing.
    #[inline]
    pub fn skip(&mut self, n: usize) -> &mut Self {
        self.index = self.index.saturating_add(n).min(self.bytes.len());
        self
    }

    /// The bytes that weren't read yet.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.index..]
    }

    /// The position of the next field.
    #[inline]
    pub fn position(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Numeric;

    #[test]
    fn reads_consecutive_fields() {
        let mut fields = Fields::new(b"\x00\x2A12rest");
        assert_eq!(fields.next::<u16>(), Ok(42));

        let n: Numeric<2> = fields.next().expect("numeric should be read");
        assert_eq!(n.as_u8(), Ok(12));
        assert_eq!(fields.position(), 4);
        assert_eq!(fields.rest(), b"rest");
    }

    #[test]
    fn fails_past_the_end() {
        let mut fields = Fields::new(&[0x01, 0x02, 0x03]);
        fields.skip(2);
        assert_eq!(
            fields.next::<u16>(),
            Err(Error::TooShort {
                expected: 4,
                actual: 3
            })
        );
        // a failed read doesn't advance
        assert_eq!(fields.position(), 2);
    }
}
