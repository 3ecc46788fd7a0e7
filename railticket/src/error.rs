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

use std::error;
use std::fmt;

use crate::tlv::TlvError;

/// Errors returned when a ticket can't be decoded.
///
/// Every error is fatal for the decode that produced it, i.e. no partially
/// decoded ticket is ever returned.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Error {
    /// The buffer is shorter than the format requires.
    TooShort {
        expected: usize,
        actual: usize,
    },
    /// A fixed-width field got fewer bytes than its width.
    InvalidFieldLength {
        expected: usize,
        actual: usize,
    },
    /// Bytes that should be ASCII aren't.
    InvalidEncoding {
        bytes: Vec<u8>,
    },
    /// Bytes that should be decimal digits aren't.
    NotANumber {
        bytes: Vec<u8>,
    },
    NotAVdvTicket {
        reason: &'static str,
    },
    Tlv(TlvError),
    InvalidElement {
        element: &'static str,
        reason: &'static str,
    },
    InvalidStandard {
        bytes: Vec<u8>,
    },
    InvalidFieldCount {
        bytes: Vec<u8>,
    },
    FieldTooShort {
        index: usize,
        expected: usize,
        actual: usize,
    },
    InvalidFieldPosition {
        index: usize,
        bytes: Vec<u8>,
    },
    InvalidFieldFormatting {
        index: usize,
        bytes: Vec<u8>,
    },
    InvalidFieldTextLength {
        index: usize,
        bytes: Vec<u8>,
    },
    InvalidFieldText {
        index: usize,
    },
    /// A text doesn't fit into the string it should be written to.
    OutOfBounds {
        at: usize,
        len: usize,
        base_len: usize,
    },
    InvalidTravelClass {
        text: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { expected, actual } => {
                write!(f, "ticket should be at least {expected} byte long but is {actual}")
            }
            Self::InvalidFieldLength { expected, actual } => {
                write!(f, "field should be {expected} byte long but is {actual}")
            }
            Self::InvalidEncoding { bytes } => {
                write!(f, "field should be ASCII but is {bytes:02X?}")
            }
            Self::NotANumber { bytes } => {
                let s = String::from_utf8_lossy(bytes);
                write!(f, "field should be a number but is \"{s}\"")
            }
            Self::NotAVdvTicket { reason } => write!(f, "not a VDV ticket: {reason}"),
            Self::Tlv(err) => write!(f, "invalid TLV data: {err}"),
            Self::InvalidElement { element, reason } => {
                write!(f, "invalid {element} element: {reason}")
            }
            Self::InvalidStandard { bytes } => {
                write!(f, "invalid layout standard {bytes:02X?}")
            }
            Self::InvalidFieldCount { bytes } => {
                let s = String::from_utf8_lossy(bytes);
                write!(f, "invalid layout field count \"{s}\"")
            }
            Self::FieldTooShort {
                index,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "layout field {index} should have {expected} byte left but has {actual}"
                )
            }
            Self::InvalidFieldPosition { index, bytes } => {
                let s = String::from_utf8_lossy(bytes);
                write!(f, "invalid position \"{s}\" of layout field {index}")
            }
            Self::InvalidFieldFormatting { index, bytes } => {
                let s = String::from_utf8_lossy(bytes);
                write!(f, "invalid formatting \"{s}\" of layout field {index}")
            }
            Self::InvalidFieldTextLength { index, bytes } => {
                let s = String::from_utf8_lossy(bytes);
                write!(f, "invalid text length \"{s}\" of layout field {index}")
            }
            Self::InvalidFieldText { index } => {
                write!(f, "text of layout field {index} is not UTF-8")
            }
            Self::OutOfBounds { at, len, base_len } => {
                write!(
                    f,
                    "{len} characters at {at} are out of bounds of {base_len} characters"
                )
            }
            Self::InvalidTravelClass { text } => {
                write!(f, "travel class should be a number but is \"{text}\"")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Tlv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TlvError> for Error {
    fn from(err: TlvError) -> Self {
        Self::Tlv(err)
    }
}
