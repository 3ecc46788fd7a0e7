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

//! Rail ticket barcode decoder.
//!
//! This crate decodes the payload of two rail ticket barcode formats:
//!
//! - [VDV-KA] tickets of German public transport like the Deutschlandticket,
//!   a fixed header with TLV encoded product data.
//! - [UIC 918.3] ticket layouts, positioned text fields which are rendered
//!   into the [RCT2] zone layout for tickets of that standard.
//!
//! Decoding is purely syntactic and never validates calendar values or
//! signatures. The decoded tickets own their data.
//!
//! # Examples
//!
//! Lets decode the layout of a ticket and print where it goes:
//!
//! ```
//! use railticket::{decode, Ticket, TicketKind};
//!
//! # fn main() -> Result<(), railticket::Error> {
//! let data = b"RCT200020613010100004Koln06670101000011";
//!
//! if let Ticket::Layout(layout) = decode(TicketKind::UicLayout, data)? {
//!     let rct2 = layout.rct2_layout.expect("RCT2 tickets have a layout");
//!     println!("from {:?} in class {}", rct2.travel_from, rct2.travel_class);
//! }
//! #     Ok(())
//! # }
//! ```
//!
//! [VDV-KA]: crate::vdv
//! [UIC 918.3]: crate::uic
//! [RCT2]: crate::uic::Rct2Layout

#[macro_use]
mod macros;

mod error;
mod field;
mod record;

pub use error::Error;
pub use field::{FixedField, Numeric, U24};

pub mod fields;
pub mod org;
pub mod text;
pub mod tlv;
pub mod uic;
pub mod vdv;

use uic::LayoutV1;
use vdv::VdvTicket;

/// The barcode format of a ticket.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum TicketKind {
    Vdv,
    UicLayout,
}

/// A decoded ticket.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ticket {
    Vdv(VdvTicket),
    Layout(LayoutV1),
}

/// Decodes the ticket of the given kind.
///
/// # Errors
///
/// Returns an error if the ticket can't be decoded as the kind.
pub fn decode(kind: TicketKind, bytes: &[u8]) -> Result<Ticket, Error> {
    match kind {
        TicketKind::Vdv => VdvTicket::parse(bytes).map(Ticket::Vdv),
        TicketKind::UicLayout => LayoutV1::parse(bytes).map(Ticket::Layout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_by_kind() {
        let ticket = decode(TicketKind::UicLayout, b"ABCD0000").expect("layout should decode");
        assert!(matches!(ticket, Ticket::Layout(_)));

        assert!(matches!(
            decode(TicketKind::Vdv, b"ABCD0000"),
            Err(Error::TooShort {
                expected: 111,
                actual: 8
            })
        ));
    }

    #[test]
    fn tickets_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Ticket>();
        assert_send_sync::<Error>();
    }
}
