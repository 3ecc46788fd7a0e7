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

use std::fmt;

use crate::Error;

/// A fixed-length field type.
///
/// Both ticket formats are built from fields of a fixed width. Each field is
/// created [`from_bytes`](FixedField::from_bytes) which are at least
/// [`LENGTH`](FixedField::LENGTH) long.
pub trait FixedField<'a>: Sized {
    /// The fixed length of this field in bytes.
    const LENGTH: usize;

    /// Parse this field from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the byte slice is too short or contains invalid data.
    fn from_bytes(bytes: &'a [u8]) -> Result<Self, Error>;
}

/// Returns the first `N` bytes as array.
pub(crate) fn fixed<const N: usize>(bytes: &[u8]) -> Result<&[u8; N], Error> {
    bytes
        .get(..N)
        .and_then(|b| b.try_into().ok())
        .ok_or(Error::InvalidFieldLength {
            expected: N,
            actual: bytes.len(),
        })
}

/////////////////////////////////////////////////////////////////////////////
// Numeric Field
/////////////////////////////////////////////////////////////////////////////

/// A numeric field of `N` zero-padded ASCII decimal digits.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Numeric<'a, const N: usize>(&'a [u8; N]);

macro_rules! numeric_impl {
    ($n:tt => $($method:ident : $t:ty),+) => {
        impl<'a> Numeric<'a, $n> {
            $(
                #[inline]
                pub fn $method(&self) -> Result<$t, Error> {
                    parse_numeric!($t, self.0)
                }
            )+
        }
    };
}

// Implement different parser depending on the field's length. For example, a
// two byte long field can't be parsed to a unsigned 32 bit integer.
numeric_impl!(1 => as_u8: u8);
numeric_impl!(2 => as_u8: u8, as_u16: u16);
numeric_impl!(4 => as_u16: u16, as_u32: u32);

impl<'a, const N: usize> Numeric<'a, N> {
    /// Returns the raw digits of the field.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }
}

impl<'a, const N: usize> FixedField<'a> for Numeric<'a, N> {
    const LENGTH: usize = N;

    fn from_bytes(bytes: &'a [u8]) -> Result<Self, Error> {
        fixed(bytes).map(Self)
    }
}

impl<const N: usize> fmt::Debug for Numeric<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = String::from_utf8_lossy(self.0);
        write!(f, "{s}")
    }
}

/////////////////////////////////////////////////////////////////////////////
// Big-Endian Binary Fields
/////////////////////////////////////////////////////////////////////////////

macro_rules! big_endian_impl {
    ($($t:ty),+) => {
        $(
            impl FixedField<'_> for $t {
                const LENGTH: usize = std::mem::size_of::<$t>();

                fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
                    fixed(bytes).map(|b| <$t>::from_be_bytes(*b))
                }
            }
        )+
    };
}

big_endian_impl!(u8, u16, u32);

/// An unsigned 24 bit big-endian integer.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct U24(u32);

impl U24 {
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl FixedField<'_> for U24 {
    const LENGTH: usize = 3;

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let [a, b, c] = *fixed(bytes)?;
        Ok(Self(u32::from_be_bytes([0, a, b, c])))
    }
}

impl From<U24> for u32 {
    fn from(value: U24) -> Self {
        value.0
    }
}
