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

use proptest::prelude::*;
use railticket::vdv::{Gender, ProductData, VdvTicket, MIN_LENGTH};
use railticket::{decode, Error, Ticket, TicketKind};

/// A Deutschlandticket of Erika Must valid in May 2024.
struct TicketBuilder {
    header: [u8; 18],
    product_data: Vec<u8>,
    common: [u8; 17],
    transaction_data: Vec<u8>,
    issue: [u8; 12],
    padding: Vec<u8>,
    version: [u8; 2],
}

impl Default for TicketBuilder {
    fn default() -> Self {
        let mut product_data = vec![0xDB, 0x0F, 0x02, 0x19, 0x64, 0x08, 0x12];
        product_data.extend_from_slice(b"ERIKA#MUST");
        product_data.extend_from_slice(&[0xDC, 0x07, 0x0F, 0x18, 0x76, 0x00, 0x01, 0x00, 0x02]);

        Self {
            header: [
                0x00, 0x00, 0x30, 0x39, // 12345
                0x18, 0x6E, // 6254
                0x27, 0x0F, // 9999
                0x18, 0x6E, // 6254
                0x44, 0xA1, 0x00, 0x00, // 2024-05-01
                0x44, 0xBF, 0x00, 0x00, // 2024-05-31
            ],
            product_data,
            common: [
                0x18, 0x6E, 0x01, 0x00, 0x02, 0x18, 0x6E, 0x44, 0xA1, 0x00, 0x00, 0x01, 0x00,
                0x00, 0x2A, 0x18, 0x6E,
            ],
            transaction_data: vec![0xD5, 0x03, 0x01, 0x02, 0x03],
            issue: [0, 0, 0, 1, 2, 0, 0, 0, 3, 0, 0, 4],
            padding: Vec::new(),
            version: [0x13, 0x00],
        }
    }
}

impl TicketBuilder {
    fn build(&self) -> Vec<u8> {
        let mut bytes = self.header.to_vec();
        bytes.push(0x85);
        bytes.push(self.product_data.len() as u8);
        bytes.extend_from_slice(&self.product_data);
        bytes.extend_from_slice(&self.common);
        bytes.push(0x8A);
        bytes.push(self.transaction_data.len() as u8);
        bytes.extend_from_slice(&self.transaction_data);
        bytes.extend_from_slice(&self.issue);
        bytes.extend_from_slice(&self.padding);

        // fill up to the minimum length
        bytes.resize(bytes.len().max(MIN_LENGTH - 5), 0);
        bytes.extend_from_slice(b"VDV");
        bytes.extend_from_slice(&self.version);
        bytes
    }
}

#[test]
fn decodes_deutschlandticket() {
    let data = TicketBuilder::default().build();
    let ticket = VdvTicket::parse(&data).expect("ticket should decode");

    assert_eq!(ticket.ticket_id, 12345);
    assert_eq!(ticket.product_name(), "Deutschlandticket");
    assert_eq!(ticket.ticket_org_name(), "6254");
    assert_eq!(ticket.validity_start.to_string(), "2024-05-01 00:00:00");
    assert_eq!(ticket.validity_end.to_string(), "2024-05-31 00:00:00");
    assert_eq!(ticket.location_number, 42);
    assert_eq!(ticket.sam_sequence_number_1, 1);
    assert_eq!(ticket.sam_version, 2);
    assert_eq!(ticket.sam_sequence_number_2, 3);
    assert_eq!(ticket.sam_id, 4);
    assert_eq!(ticket.version, "1.3.00");

    let passenger = ticket.passenger().expect("ticket should have a passenger");
    assert_eq!(passenger.gender, Gender::Female);
    assert_eq!(passenger.date_of_birth.to_string(), "1964-08-12");
    assert_eq!(passenger.forename, "ERIKA");
    assert_eq!(passenger.surname, "MUST");

    let ProductData::SpacialValidity(validity) = &ticket.product_data[1] else {
        panic!("expected a spacial validity");
    };
    assert_eq!(validity.organization_id, 6262);
    assert_eq!(validity.area_ids, vec![1, 2]);

    assert_eq!(ticket.product_transaction_data.len(), 1);
    assert_eq!(ticket.product_transaction_data[0].tag, 0xD5);
    assert_eq!(ticket.product_transaction_data[0].value, vec![1, 2, 3]);
}

#[test]
fn decodes_through_entry_point() {
    let data = TicketBuilder::default().build();
    let ticket = decode(TicketKind::Vdv, &data).expect("ticket should decode");
    assert!(matches!(ticket, Ticket::Vdv(t) if t.ticket_id == 12345));
}

#[test]
fn formats_trailer_version() {
    let data = TicketBuilder {
        version: [0x12, 5],
        ..Default::default()
    }
    .build();

    let ticket = VdvTicket::try_from(data.as_slice()).expect("ticket should decode");
    assert_eq!(ticket.version, "1.2.05");
}

#[test]
fn trailer_is_at_the_end() {
    let data = TicketBuilder {
        padding: vec![0xFF; 200],
        ..Default::default()
    }
    .build();

    assert_eq!(data.len(), 51 + 26 + 5 + 200 + 5);
    assert!(VdvTicket::parse(&data).is_ok());
}

#[test]
fn keeps_unknown_product_data() {
    let data = TicketBuilder {
        product_data: vec![0xDC, 0x03, 0x10, 0xAB, 0xCD, 0xE0, 0x01, 0x2A],
        ..Default::default()
    }
    .build();
    let ticket = VdvTicket::parse(&data).expect("ticket should decode");

    assert_eq!(ticket.passenger(), None);
    let ProductData::UnknownSpacialValidity(validity) = &ticket.product_data[0] else {
        panic!("expected an unknown spacial validity");
    };
    assert_eq!(validity.type_hex(), "0x10");
    assert_eq!(validity.data_hex(), "ab:cd");

    let ProductData::Unknown(element) = &ticket.product_data[1] else {
        panic!("expected an unknown element");
    };
    assert_eq!(element.tag_hex(), "0xE0");
    assert_eq!(element.value, vec![0x2A]);
}

#[test]
fn fails_on_invalid_product_data() {
    let data = TicketBuilder {
        product_data: vec![0xDB, 0x03, 0x01, 0x19, 0x64],
        ..Default::default()
    }
    .build();

    assert!(matches!(
        VdvTicket::parse(&data),
        Err(Error::InvalidElement {
            element: "passenger data",
            ..
        })
    ));
}

#[test]
fn fails_on_missing_trailer() {
    let mut data = TicketBuilder::default().build();
    let len = data.len();
    data[len - 5..len - 2].copy_from_slice(b"KA!");

    assert!(matches!(
        VdvTicket::parse(&data),
        Err(Error::NotAVdvTicket { .. })
    ));
}

#[test]
fn displays_summary() {
    let data = TicketBuilder::default().build();
    let ticket = VdvTicket::parse(&data).expect("ticket should decode");
    let summary = ticket.to_string();

    assert!(summary.contains("  Version: 1.3.00"));
    assert!(summary.contains("    Passenger: forename=ERIKA, surname=MUST"));
    assert!(summary.contains("    Spacial validity: org_id=6262, area_ids=1,2"));
    assert!(summary.contains("    0xD5: 010203"));
}

proptest! {
    #[test]
    fn short_buffers_are_too_short(data in proptest::collection::vec(any::<u8>(), 0..MIN_LENGTH)) {
        let len = data.len();
        prop_assert_eq!(
            VdvTicket::parse(&data),
            Err(Error::TooShort { expected: MIN_LENGTH, actual: len })
        );
    }

    #[test]
    fn valid_buffers_decode(
        header in any::<[u8; 18]>(),
        common in any::<[u8; 17]>(),
        issue in any::<[u8; 12]>(),
        padding in proptest::collection::vec(any::<u8>(), 0..64),
        version in any::<[u8; 2]>(),
    ) {
        let data = TicketBuilder {
            header,
            common,
            issue,
            padding,
            version,
            ..Default::default()
        }
        .build();

        let ticket = VdvTicket::parse(&data);
        prop_assert!(ticket.is_ok());

        let expected = format!("{}.{}.{:02}", version[0] >> 4, version[0] & 0x0F, version[1]);
        prop_assert_eq!(ticket.map(|t| t.version).ok(), Some(expected));
    }
}
