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

use chrono::{NaiveDate, NaiveDateTime};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::field::fixed;
use crate::{Error, FixedField};

/// The year a VDV [`DateTime`] counts from.
const EPOCH_YEAR: u16 = 1990;

/// A VDV date and time packed into 32 bits.
///
/// From the most significant bit: the year since 1990 (7 bits), month (4),
/// day (5), hour (5), minute (6) and the seconds divided by two (5).
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    /// Returns the date and time or `None` if the values don't exist.
    pub fn as_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year.into(), self.month.into(), self.day.into())?
            .and_hms_opt(self.hour.into(), self.minute.into(), self.second.into())
    }
}

impl FixedField<'_> for DateTime {
    const LENGTH: usize = 4;

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let packed = u32::from_be_bytes(*fixed::<4>(bytes)?);
        let bits = |shift: u32, width: u32| ((packed >> shift) & ((1 << width) - 1)) as u8;

        Ok(Self {
            year: EPOCH_YEAR + u16::from(bits(25, 7)),
            month: bits(21, 4),
            day: bits(16, 5),
            hour: bits(11, 5),
            minute: bits(5, 6),
            second: bits(0, 5) * 2,
        })
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// A VDV date of four BCD bytes formatted as `YYYYMMDD`.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    /// Returns the date or `None` if it doesn't exist, e.g. when an issuer
    /// writes zeros for an unknown date of birth.
    pub fn as_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year.into(), self.month.into(), self.day.into())
    }
}

/// Decodes packed BCD digits.
fn bcd(bytes: &[u8]) -> Result<u16, Error> {
    bytes.iter().try_fold(0u16, |acc, &byte| {
        let (hi, lo) = (byte >> 4, byte & 0x0F);
        if hi > 9 || lo > 9 {
            Err(Error::NotANumber {
                bytes: bytes.to_vec(),
            })
        } else {
            Ok(acc * 100 + u16::from(hi) * 10 + u16::from(lo))
        }
    })
}

impl FixedField<'_> for Date {
    const LENGTH: usize = 4;

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let b = fixed::<4>(bytes)?;

        Ok(Self {
            year: bcd(&b[0..2])?,
            month: bcd(&b[2..3])? as u8,
            day: bcd(&b[3..4])? as u8,
        })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_packed_datetime() {
        // 2024-05-01 08:30:12
        let packed: u32 = (34 << 25) | (5 << 21) | (1 << 16) | (8 << 11) | (30 << 5) | 6;
        let dt = DateTime::from_bytes(&packed.to_be_bytes()).expect("datetime should parse");

        assert_eq!(
            dt,
            DateTime {
                year: 2024,
                month: 5,
                day: 1,
                hour: 8,
                minute: 30,
                second: 12
            }
        );
        assert_eq!(dt.to_string(), "2024-05-01 08:30:12");
        assert!(dt.as_naive().is_some());
    }

    #[test]
    fn keeps_impossible_datetime() {
        let dt = DateTime::from_bytes(&[0xFF; 4]).expect("all bits are valid");
        assert_eq!(dt.month, 15);
        assert_eq!(dt.as_naive(), None);
    }

    #[test]
    fn parses_bcd_date() {
        let date = Date::from_bytes(&[0x19, 0x87, 0x12, 0x24]).expect("date should parse");
        assert_eq!(
            date,
            Date {
                year: 1987,
                month: 12,
                day: 24
            }
        );
        assert_eq!(date.to_string(), "1987-12-24");
        assert_eq!(date.as_naive(), NaiveDate::from_ymd_opt(1987, 12, 24));
    }

    #[test]
    fn zero_date_is_unknown() {
        let date = Date::from_bytes(&[0; 4]).expect("zeros are digits");
        assert_eq!(date.as_naive(), None);
    }

    #[test]
    fn rejects_non_bcd_date() {
        assert_eq!(
            Date::from_bytes(&[0x20, 0x24, 0x1A, 0x01]),
            Err(Error::NotANumber { bytes: vec![0x1A] })
        );
    }
}
