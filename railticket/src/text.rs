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

//! String helpers for the padded texts found on tickets.
//!
//! Lengths and indices are counted in characters, not bytes, since layout
//! columns address printed characters.

use crate::Error;

/// Strips spaces and NUL characters from both ends of a string.
pub fn nul_and_space_bidi_strip(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\0')
}

/// Checks that `len` characters written at `at` stay strictly within a
/// string of `base_len` characters, i.e. at least one character follows.
pub(crate) fn check_bounds(base_len: usize, at: usize, len: usize) -> Result<(), Error> {
    let last = base_len.checked_sub(1);

    match last {
        Some(last) if at <= last && at + len <= last => Ok(()),
        _ => Err(Error::OutOfBounds { at, len, base_len }),
    }
}

/// Overwrites the characters of `base` starting at `at` with `insert`.
///
/// The result has exactly as many characters as `base`.
///
/// # Errors
///
/// Returns [`Error::OutOfBounds`] if `at` is not an index of `base` or if
/// `insert` would reach the last character of `base` or beyond.
///
/// # Examples
///
/// ```
/// use railticket::text::replace_substring;
///
/// assert_eq!(replace_substring("00000", 1, "AB").as_deref(), Ok("0AB00"));
/// assert!(replace_substring("abc", 2, "xy").is_err());
/// ```
pub fn replace_substring(base: &str, at: usize, insert: &str) -> Result<String, Error> {
    let mut chars: Vec<char> = base.chars().collect();
    overwrite(&mut chars, at, insert)?;
    Ok(chars.into_iter().collect())
}

/// Overwrites `row` in place with the characters of `insert` starting at `at`.
///
/// Uses the same bounds as [`replace_substring`].
pub(crate) fn overwrite(row: &mut [char], at: usize, insert: &str) -> Result<(), Error> {
    let len = insert.chars().count();
    check_bounds(row.len(), at, len)?;

    for (cell, c) in row[at..at + len].iter_mut().zip(insert.chars()) {
        *cell = c;
    }

    Ok(())
}

/// Decodes ISO 8859-1 text.
///
/// Every byte is the code point of the same value, so this never fails.
pub fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
