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

//! VDV-KA electronic tickets.
//!
//! A ticket is a fixed header followed by the TLV encoded product data, the
//! common transaction data, the TLV encoded product transaction data and the
//! ticket issue data. The ticket is padded and ends with a trailer of the
//! magic `VDV` and the version of the data model:
//!
//! ```text
//! +--------+------+--------+------+-------+---------+---------+
//! | header | 0x85 | common | 0x8A | issue | padding | trailer |
//! |   18   | TLV  |   17   | TLV  |  12   |   ...   |    5    |
//! +--------+------+--------+------+-------+---------+---------+
//! ```

use std::fmt;

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::fields::DateTime;
use crate::org::{organization_display_name, organization_name, product_name};
use crate::record::Fields;
use crate::tlv::{self, TlvElement, TlvError};
use crate::{Error, U24};

mod product;

pub use product::*;

/// The minimum length of a VDV ticket in bytes.
pub const MIN_LENGTH: usize = 111;

pub const PRODUCT_DATA_TAG: u32 = 0x85;
pub const PRODUCT_TRANSACTION_DATA_TAG: u32 = 0x8A;

const TRAILER_LENGTH: usize = 5;
const TRAILER_MAGIC: &[u8; 3] = b"VDV";

/// A decoded VDV ticket.
///
/// Validity and transaction times are decoded as they are, i.e. the start of
/// the validity might be after its end.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VdvTicket {
    pub version: String,
    pub ticket_id: u32,
    pub ticket_org_id: u16,
    pub product_number: u16,
    pub product_org_id: u16,
    pub validity_start: DateTime,
    pub validity_end: DateTime,
    pub kvp_org_id: u16,
    pub terminal_type: u8,
    pub terminal_number: u16,
    pub terminal_owner_id: u16,
    pub transaction_time: DateTime,
    pub location_type: u8,
    pub location_number: u32,
    pub location_org_id: u16,
    pub sam_sequence_number_1: u32,
    pub sam_sequence_number_2: u32,
    pub sam_version: u8,
    pub sam_id: u32,
    pub product_data: Vec<ProductData>,
    pub product_transaction_data: Vec<TlvElement>,
}

impl VdvTicket {
    /// Decodes a VDV ticket.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooShort`] if less than [`MIN_LENGTH`] bytes are given
    /// or a block exceeds the data, [`Error::NotAVdvTicket`] if a TLV tag or
    /// the trailer doesn't match and [`Error::Tlv`] on malformed TLV data.
    ///
    /// # Examples
    ///
    /// ```
    /// use railticket::vdv::VdvTicket;
    /// use railticket::Error;
    ///
    /// assert!(matches!(
    ///     VdvTicket::parse(&[0; 42]),
    ///     Err(Error::TooShort { expected: 111, actual: 42 })
    /// ));
    /// ```
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        debug!("VDV ticket decode: {} byte", bytes.len());

        if bytes.len() < MIN_LENGTH {
            return Err(Error::TooShort {
                expected: MIN_LENGTH,
                actual: bytes.len(),
            });
        }

        let mut fields = Fields::new(bytes);

        // header
        let ticket_id = fields.next()?;
        let ticket_org_id = fields.next()?;
        let product_number = fields.next()?;
        let product_org_id = fields.next()?;
        let validity_start = fields.next()?;
        let validity_end = fields.next()?;

        let product_data = next_tlv(&mut fields, PRODUCT_DATA_TAG, "product data is missing")?;
        let product_data = tlv::parse_all(product_data)?
            .into_iter()
            .map(ProductData::from_tlv)
            .collect::<Result<Vec<_>, _>>()?;

        // common transaction data
        let kvp_org_id = fields.next()?;
        let terminal_type = fields.next()?;
        let terminal_number = fields.next()?;
        let terminal_owner_id = fields.next()?;
        let transaction_time = fields.next()?;
        let location_type = fields.next()?;
        let location_number = fields.next::<U24>()?.get();
        let location_org_id = fields.next()?;

        let product_transaction_data = next_tlv(
            &mut fields,
            PRODUCT_TRANSACTION_DATA_TAG,
            "product transaction data is missing",
        )?;
        let product_transaction_data = tlv::parse_all(product_transaction_data)?
            .into_iter()
            .map(TlvElement::from)
            .collect();

        // ticket issue data
        let sam_sequence_number_1 = fields.next()?;
        let sam_version = fields.next()?;
        let sam_sequence_number_2 = fields.next()?;
        let sam_id = fields.next::<U24>()?.get();

        let version = parse_trailer(&fields)?;

        let ticket = Self {
            version,
            ticket_id,
            ticket_org_id,
            product_number,
            product_org_id,
            validity_start,
            validity_end,
            kvp_org_id,
            terminal_type,
            terminal_number,
            terminal_owner_id,
            transaction_time,
            location_type,
            location_number,
            location_org_id,
            sam_sequence_number_1,
            sam_sequence_number_2,
            sam_version,
            sam_id,
            product_data,
            product_transaction_data,
        };

        debug!(
            "VDV ticket {} of org {} decoded (version {})",
            ticket.ticket_id, ticket.ticket_org_id, ticket.version
        );

        Ok(ticket)
    }

    /// The first passenger of the product data.
    pub fn passenger(&self) -> Option<&PassengerData> {
        self.product_data.iter().find_map(|data| match data {
            ProductData::Passenger(passenger) => Some(passenger),
            _ => None,
        })
    }

    /// Returns the product's name or `"{org}:{number}"` for unknown products.
    pub fn product_name(&self) -> String {
        match self.product_name_opt() {
            Some(name) => name.to_owned(),
            None => format!("{}:{}", self.product_org_name(), self.product_number),
        }
    }

    /// Returns the product's name if it's one of the nationwide products.
    pub fn product_name_opt(&self) -> Option<&'static str> {
        product_name(self.product_number)
    }

    pub fn product_org_name(&self) -> String {
        organization_display_name(self.product_org_id)
    }

    pub fn product_org_name_opt(&self) -> Option<&'static str> {
        organization_name(self.product_org_id)
    }

    pub fn ticket_org_name(&self) -> String {
        organization_display_name(self.ticket_org_id)
    }

    pub fn ticket_org_name_opt(&self) -> Option<&'static str> {
        organization_name(self.ticket_org_id)
    }

    pub fn kvp_org_name(&self) -> String {
        organization_display_name(self.kvp_org_id)
    }

    pub fn terminal_owner_name(&self) -> String {
        organization_display_name(self.terminal_owner_id)
    }

    pub fn location_org_name(&self) -> String {
        organization_display_name(self.location_org_id)
    }
}

impl TryFrom<&[u8]> for VdvTicket {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::parse(bytes)
    }
}

/// Reads the TLV at the cursor which must have the `tag`, and advances the
/// cursor past it.
fn next_tlv<'a>(
    fields: &mut Fields<'a>,
    tag: u32,
    missing: &'static str,
) -> Result<&'a [u8], Error> {
    let mut parser = tlv::Parser::new(fields.rest());
    let tlv = parser.next()?.ok_or(TlvError::TruncatedTag)?;

    trace!("TLV 0x{:02X} of {} byte at {}", tlv.tag, tlv.value.len(), fields.position());

    if tlv.tag != tag {
        return Err(Error::NotAVdvTicket { reason: missing });
    }

    fields.skip(parser.offset());
    Ok(tlv.value)
}

/// Checks the trailer at the end of the data and returns the version.
fn parse_trailer(fields: &Fields<'_>) -> Result<String, Error> {
    let rest = fields.rest();

    let Some(trailer) = rest.len().checked_sub(TRAILER_LENGTH).map(|at| &rest[at..]) else {
        return Err(Error::TooShort {
            expected: fields.position() + TRAILER_LENGTH,
            actual: fields.position() + rest.len(),
        });
    };

    if &trailer[0..3] != TRAILER_MAGIC {
        return Err(Error::NotAVdvTicket {
            reason: "trailer should start with VDV",
        });
    }

    let (major, minor, patch) = (trailer[3] >> 4, trailer[3] & 0x0F, trailer[4]);
    Ok(format!("{major}.{minor}.{patch:02}"))
}

impl fmt::Display for VdvTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VDVTicket:")?;
        writeln!(f, "  Version: {}", self.version)?;
        writeln!(f, "  Ticket:")?;
        writeln!(f, "    ID: {}", self.ticket_id)?;
        writeln!(f, "    Organization ID: {}", self.ticket_org_id)?;
        writeln!(f, "  Product:")?;
        writeln!(f, "    Number: {}", self.product_number)?;
        writeln!(f, "    Organization ID: {}", self.product_org_id)?;
        writeln!(f, "  Validity:")?;
        writeln!(f, "   Start: {}", self.validity_start)?;
        writeln!(f, "   End: {}", self.validity_end)?;
        writeln!(f, "  Transaction:")?;
        writeln!(f, "    Time: {}", self.transaction_time)?;
        writeln!(f, "    KVP Organization ID: {}", self.kvp_org_id)?;
        writeln!(f, "    Terminal:")?;
        writeln!(f, "      Type: {}", self.terminal_type)?;
        writeln!(f, "      Number: {}", self.terminal_number)?;
        writeln!(f, "      Owner ID: {}", self.terminal_owner_id)?;
        writeln!(f, "    Location:")?;
        writeln!(f, "      Type: {}", self.location_type)?;
        writeln!(f, "      Number: {}", self.location_number)?;
        writeln!(f, "      Organization ID: {}", self.location_org_id)?;
        writeln!(f, "  SAM:")?;
        writeln!(f, "    Sequence Number 1: {}", self.sam_sequence_number_1)?;
        writeln!(f, "    Sequence Number 2: {}", self.sam_sequence_number_2)?;
        writeln!(f, "    Version: {}", self.sam_version)?;
        writeln!(f, "    ID: {}", self.sam_id)?;

        write!(f, "  Product Data:")?;
        if self.product_data.is_empty() {
            write!(f, " N/A")?;
        }
        for data in &self.product_data {
            write!(f, "\n    {data}")?;
        }

        write!(f, "\n  Product Transaction Data:")?;
        if self.product_transaction_data.is_empty() {
            write!(f, " N/A")?;
        }
        for data in &self.product_transaction_data {
            write!(f, "\n    {data}")?;
        }

        Ok(())
    }
}
