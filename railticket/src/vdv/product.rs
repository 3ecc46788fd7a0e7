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
use std::sync::LazyLock;

use log::trace;
use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::fields::Date;
use crate::record::Fields;
use crate::text::latin1_decode;
use crate::tlv::Tlv;
use crate::Error;

pub const PASSENGER_DATA_TAG: u32 = 0xDB;
pub const SPACIAL_VALIDITY_TAG: u32 = 0xDC;

/// Spacial validity defined by a list of area IDs of one organization.
const AREA_ID_LIST: u8 = 0x0F;

/// A name part where a digit stands for that many hidden characters, e.g.
/// `JO3HN` for `JO___HN`. The leading `\w*` is greedy, so only the last digit
/// of a digit run counts.
static MASKED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w*)(\d+)(\w*)$").expect("valid regex"));

/// An element of the product data of a VDV ticket.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum ProductData {
    #[cfg_attr(feature = "serde", serde(rename = "passenger-data"))]
    Passenger(PassengerData),
    #[cfg_attr(feature = "serde", serde(rename = "spacial-validity"))]
    SpacialValidity(SpacialValidity),
    #[cfg_attr(feature = "serde", serde(rename = "unknown-spacial-validity"))]
    UnknownSpacialValidity(UnknownSpacialValidity),
    #[cfg_attr(feature = "serde", serde(rename = "unknown"))]
    Unknown(UnknownElement),
}

impl ProductData {
    /// Decodes the element by the TLV's tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidElement`] if a known element is malformed.
    pub fn from_tlv(tlv: Tlv<'_>) -> Result<Self, Error> {
        trace!("product data element 0x{:02X} of {} byte", tlv.tag, tlv.value.len());

        match tlv.tag {
            PASSENGER_DATA_TAG => PassengerData::parse(tlv.value).map(Self::Passenger),
            SPACIAL_VALIDITY_TAG => parse_spacial_validity(tlv.value),
            tag => Ok(Self::Unknown(UnknownElement {
                tag,
                value: tlv.value.to_vec(),
            })),
        }
    }
}

impl fmt::Display for ProductData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passenger(p) => write!(f, "{p}"),
            Self::SpacialValidity(s) => write!(f, "{s}"),
            Self::UnknownSpacialValidity(s) => write!(f, "{s}"),
            Self::Unknown(e) => write!(f, "{e}"),
        }
    }
}

#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Gender {
    Unspecified = 0,
    Male = 1,
    Female = 2,
    Diverse = 3,
}

impl TryFrom<u8> for Gender {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unspecified),
            1 => Ok(Self::Male),
            2 => Ok(Self::Female),
            3 => Ok(Self::Diverse),
            _ => Err(Error::InvalidElement {
                element: "passenger data",
                reason: "gender should be 0 to 3",
            }),
        }
    }
}

/// The passenger a ticket is issued to.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PassengerData {
    pub gender: Gender,
    pub date_of_birth: Date,
    pub forename: String,
    pub surname: String,
}

impl PassengerData {
    /// Parses the gender, date of birth and an ISO 8859-1 name.
    ///
    /// Names are either `FORENAME#SURNAME`, `FORENAME@SURNAME` with masked
    /// parts or only a surname.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidElement`] if there are less than 5 bytes or the
    /// gender is unknown, or an error if the date of birth isn't BCD.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < 5 {
            return Err(Error::InvalidElement {
                element: "passenger data",
                reason: "should be at least 5 byte long",
            });
        }

        let mut fields = Fields::new(bytes);
        let gender = Gender::try_from(fields.next::<u8>()?)?;
        let date_of_birth = fields.next()?;
        let name = latin1_decode(fields.rest());

        let (forename, surname) = if let Some((forename, surname)) = name.split_once('#') {
            (forename.to_owned(), surname.to_owned())
        } else if let Some((forename, surname)) = name.split_once('@') {
            (unmask(forename), unmask(surname))
        } else {
            (String::new(), name)
        };

        Ok(Self {
            gender,
            date_of_birth,
            forename,
            surname,
        })
    }
}

/// Replaces the count of a masked name part by as many underscores.
fn unmask(part: &str) -> String {
    let Some(caps) = MASKED_NAME.captures(part) else {
        return part.to_owned();
    };

    // `\d` also matches non-ASCII digits which aren't a count
    match caps[2].parse::<usize>() {
        Ok(n) => format!("{}{}{}", &caps[1], "_".repeat(n), &caps[3]),
        Err(_) => part.to_owned(),
    }
}

impl fmt::Display for PassengerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Passenger: forename={}, surname={}, date_of_birth={}, gender={:?}",
            self.forename, self.surname, self.date_of_birth, self.gender
        )
    }
}

/// The areas of an organization in which the ticket is valid.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpacialValidity {
    pub definition_type: u8,
    pub organization_id: u16,
    pub area_ids: Vec<u16>,
}

impl fmt::Display for SpacialValidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let area_ids: Vec<String> = self.area_ids.iter().map(u16::to_string).collect();
        write!(
            f,
            "Spacial validity: org_id={}, area_ids={}",
            self.organization_id,
            area_ids.join(",")
        )
    }
}

/// A spacial validity with a definition type that isn't decoded.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnknownSpacialValidity {
    pub definition_type: u8,
    pub value: Vec<u8>,
}

impl UnknownSpacialValidity {
    pub fn type_hex(&self) -> String {
        format!("0x{:02X}", self.definition_type)
    }

    pub fn data_hex(&self) -> String {
        colon_hex(&self.value)
    }
}

impl fmt::Display for UnknownSpacialValidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown spacial validity: type=0x{:02X}, value={}",
            self.definition_type,
            plain_hex(&self.value)
        )
    }
}

fn parse_spacial_validity(bytes: &[u8]) -> Result<ProductData, Error> {
    let Some((&definition_type, rest)) = bytes.split_first() else {
        return Err(Error::InvalidElement {
            element: "spacial validity",
            reason: "definition type is missing",
        });
    };

    if definition_type != AREA_ID_LIST {
        return Ok(ProductData::UnknownSpacialValidity(UnknownSpacialValidity {
            definition_type,
            value: rest.to_vec(),
        }));
    }

    let mut fields = Fields::new(rest);
    let organization_id = fields.next().map_err(|_| Error::InvalidElement {
        element: "spacial validity",
        reason: "organization ID is missing",
    })?;

    // an odd trailing byte is dropped
    let area_ids = fields
        .rest()
        .chunks_exact(2)
        .map(|id| u16::from_be_bytes([id[0], id[1]]))
        .collect();

    Ok(ProductData::SpacialValidity(SpacialValidity {
        definition_type,
        organization_id,
        area_ids,
    }))
}

/// A product data element with a tag that isn't decoded.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnknownElement {
    pub tag: u32,
    pub value: Vec<u8>,
}

impl UnknownElement {
    pub fn tag_hex(&self) -> String {
        format!("0x{:02X}", self.tag)
    }

    pub fn data_hex(&self) -> String {
        colon_hex(&self.value)
    }
}

impl fmt::Display for UnknownElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown element 0x{:02X}: {}",
            self.tag,
            plain_hex(&self.value)
        )
    }
}

fn plain_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn colon_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(name: &[u8]) -> Result<PassengerData, Error> {
        let mut bytes = vec![1, 0x19, 0x87, 0x12, 0x24];
        bytes.extend_from_slice(name);
        PassengerData::parse(&bytes)
    }

    #[test]
    fn splits_name_at_hash() {
        let p = passenger(b"JOHN#SMITH").expect("passenger should parse");
        assert_eq!(p.gender, Gender::Male);
        assert_eq!(
            p.date_of_birth,
            Date {
                year: 1987,
                month: 12,
                day: 24
            }
        );
        assert_eq!(p.forename, "JOHN");
        assert_eq!(p.surname, "SMITH");
    }

    #[test]
    fn hash_split_is_verbatim() {
        let p = passenger(b"JO3HN#SM4ITH").expect("passenger should parse");
        assert_eq!(p.forename, "JO3HN");
        assert_eq!(p.surname, "SM4ITH");
    }

    #[test]
    fn unmasks_names_at_at_sign() {
        let p = passenger(b"JO3HN@SM4ITH").expect("passenger should parse");
        assert_eq!(p.forename, "JO___HN");
        assert_eq!(p.surname, "SM____ITH");

        let p = passenger(b"J5@Smith").expect("passenger should parse");
        assert_eq!(p.forename, "J_____");
        assert_eq!(p.surname, "Smith");
    }

    #[test]
    fn only_last_digit_is_the_count() {
        let p = passenger(b"JO12HN@S2").expect("passenger should parse");
        assert_eq!(p.forename, "JO1__HN");
        assert_eq!(p.surname, "S__");

        let p = passenger(b"JOHN@SMITH").expect("passenger should parse");
        assert_eq!(p.forename, "JOHN");
        assert_eq!(p.surname, "SMITH");
    }

    #[test]
    fn name_without_separator_is_surname() {
        let p = passenger(b"M\xfcller").expect("passenger should parse");
        assert_eq!(p.forename, "");
        assert_eq!(p.surname, "Müller");

        let p = passenger(b"").expect("name may be empty");
        assert_eq!(p.surname, "");
    }

    #[test]
    fn rejects_short_passenger_data() {
        assert_eq!(
            PassengerData::parse(&[1, 0x19, 0x87, 0x12]),
            Err(Error::InvalidElement {
                element: "passenger data",
                reason: "should be at least 5 byte long"
            })
        );
    }

    #[test]
    fn rejects_unknown_gender() {
        assert!(matches!(
            PassengerData::parse(&[4, 0x19, 0x87, 0x12, 0x24]),
            Err(Error::InvalidElement { .. })
        ));
    }

    #[test]
    fn parses_area_ids() {
        let tlv = Tlv {
            tag: SPACIAL_VALIDITY_TAG,
            value: &[0x0F, 0x18, 0x76, 0x00, 0x01, 0x01, 0x02],
        };
        assert_eq!(
            ProductData::from_tlv(tlv),
            Ok(ProductData::SpacialValidity(SpacialValidity {
                definition_type: 0x0F,
                organization_id: 6262,
                area_ids: vec![1, 258],
            }))
        );
    }

    #[test]
    fn drops_odd_area_byte() {
        let tlv = Tlv {
            tag: SPACIAL_VALIDITY_TAG,
            value: &[0x0F, 0x00, 0x24, 0x00, 0x07, 0x09],
        };
        let ProductData::SpacialValidity(validity) =
            ProductData::from_tlv(tlv).expect("spacial validity should parse")
        else {
            panic!("expected an area ID list");
        };
        assert_eq!(validity.organization_id, 36);
        assert_eq!(validity.area_ids, vec![7]);
    }

    #[test]
    fn keeps_unknown_spacial_validity() {
        let tlv = Tlv {
            tag: SPACIAL_VALIDITY_TAG,
            value: &[0x10, 0xAB, 0xCD],
        };
        let data = ProductData::from_tlv(tlv).expect("unknown type is no error");
        assert_eq!(
            data,
            ProductData::UnknownSpacialValidity(UnknownSpacialValidity {
                definition_type: 0x10,
                value: vec![0xAB, 0xCD],
            })
        );
        assert_eq!(
            data.to_string(),
            "Unknown spacial validity: type=0x10, value=abcd"
        );
    }

    #[test]
    fn rejects_empty_spacial_validity() {
        let tlv = Tlv {
            tag: SPACIAL_VALIDITY_TAG,
            value: &[],
        };
        assert!(ProductData::from_tlv(tlv).is_err());
    }

    #[test]
    fn keeps_unknown_element() {
        let tlv = Tlv {
            tag: 0xD5,
            value: &[0x01, 0xFF],
        };
        let ProductData::Unknown(element) = ProductData::from_tlv(tlv).expect("unknown tag")
        else {
            panic!("expected an unknown element");
        };
        assert_eq!(element.tag_hex(), "0xD5");
        assert_eq!(element.data_hex(), "01:ff");
        assert_eq!(element.to_string(), "Unknown element 0xD5: 01ff");
    }
}
