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

use chrono::{NaiveDate, TimeZone, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::field::fixed;
use crate::{Error, FixedField};

/// A UIC timestamp of twelve ASCII digits formatted as `DDMMYYYYHHMM`.
///
/// Decoding is purely syntactic, so calendar values like the 31st of February
/// are accepted. Use [`as_datetime`](Timestamp::as_datetime) to check them.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl Timestamp {
    /// Returns the timestamp as UTC date and time or `None` if the calendar
    /// values don't exist.
    pub fn as_datetime(&self) -> Option<chrono::DateTime<Utc>> {
        let date = NaiveDate::from_ymd_opt(
            self.year.into(),
            self.month.into(),
            self.day.into(),
        )?;
        let datetime = date.and_hms_opt(self.hour.into(), self.minute.into(), 0)?;
        Some(Utc.from_utc_datetime(&datetime))
    }
}

impl FixedField<'_> for Timestamp {
    const LENGTH: usize = 12;

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let b = fixed::<12>(bytes)?;
        if !b.is_ascii() {
            return Err(Error::InvalidEncoding { bytes: b.to_vec() });
        }

        Ok(Self {
            day: parse_numeric!(u8, &b[0..2])?,
            month: parse_numeric!(u8, &b[2..4])?,
            year: parse_numeric!(u16, &b[4..8])?,
            hour: parse_numeric!(u8, &b[8..10])?,
            minute: parse_numeric!(u8, &b[10..12])?,
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}
