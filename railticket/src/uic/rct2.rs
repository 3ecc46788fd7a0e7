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

//! The RCT2 zone layout.
//!
//! RCT2 tickets print their fields into a grid of 15 rows with 72 columns.
//! The zones (or boxes) of the grid are defined by ERA TSI TD B.12 section
//! 10.4.1.1. Everything else on a ticket depends on the issuer and is only
//! extracted on a best-effort basis.

use std::ops::Range;
use std::sync::LazyLock;

use log::trace;
use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::text::{nul_and_space_bidi_strip as strip, overwrite};
use crate::Error;

pub const ROWS: usize = 15;
pub const COLUMNS: usize = 72;

/// Text printed on every RCT2 ticket regardless of its data.
const TEMPLATE: [(usize, usize, &str); 8] = [
    (2, 1, "CIV"),
    (4, 1, "DATUM"),
    (4, 7, "ZEIT"),
    (4, 13, "VON"),
    (4, 34, "NACH"),
    (4, 52, "DATUM"),
    (4, 58, "ZEIT"),
    (4, 67, "KL."),
];

/// Rows of the itinerary. Issuers fill at most one of them and mark the
/// other with asterisks.
const ITINERARY_ROWS: [usize; 2] = [5, 6];
const TRAVEL_CLASS_ROW: usize = 6;

// ÖBB
static TRAIN_AND_CARRIAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ZUG (\d+).*WAGEN\s+(\d+)$").expect("valid regex"));

// ÖBB
static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^PREIS\s+(EUR) (\d+),(\d+)$").expect("valid regex"));

// NS prints the currency and the amount as separate fields with a NUL between
static PRICE_NUL_SEPARATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(EUR)\x00(\d+).(\d+)").expect("valid regex"));

/// A grid of characters where unwritten cells are NUL.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    rows: [[char; COLUMNS]; ROWS],
}

impl Grid {
    /// Creates an empty grid with the template text.
    pub fn new() -> Self {
        let mut rows = [['\0'; COLUMNS]; ROWS];

        for (row, column, label) in TEMPLATE {
            for (cell, c) in rows[row][column..].iter_mut().zip(label.chars()) {
                *cell = c;
            }
        }

        Self { rows }
    }

    /// Writes the lines of `text` below each other starting at the `line` and
    /// `column`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if a line is below the grid or doesn't
    /// fit into its row.
    pub fn write(&mut self, line: usize, column: usize, text: &str) -> Result<(), Error> {
        for (i, text_line) in text.split('\n').enumerate() {
            let row = line + i;
            let cells = self.rows.get_mut(row).ok_or(Error::OutOfBounds {
                at: row,
                len: 1,
                base_len: ROWS,
            })?;

            overwrite(cells, column, text_line)?;
        }

        Ok(())
    }

    /// Returns the characters of a row within the columns.
    fn slice(&self, row: usize, columns: Range<usize>) -> String {
        self.rows[row][columns].iter().collect()
    }

    /// Returns the rows as strings of [`COLUMNS`] characters.
    pub fn to_lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().collect()).collect()
    }
}

/// The characters of `s` within the columns, or less if `s` is shorter.
fn window(s: &str, columns: Range<usize>) -> String {
    s.chars().skip(columns.start).take(columns.len()).collect()
}

/// Returns the stripped text if it holds a value.
fn value(text: &str) -> Option<String> {
    match strip(text) {
        "" | "*" => None,
        value => Some(value.to_owned()),
    }
}

/// The structured view of an RCT2 ticket.
///
/// The boxes are always present. All other fields are `None` unless the issuer
/// printed them the way they are looked for, except the travel class which
/// every RCT2 ticket has.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rct2Layout {
    pub type_of_document: Vec<String>,
    pub names_of_travelers: Vec<String>,
    pub train_wagon_seat: Vec<String>,
    pub rates_and_conditions: Vec<String>,
    pub ticket_value_box: Vec<String>,

    pub travel_from: Option<String>,
    pub travel_to: Option<String>,
    pub departure_date: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_date: Option<String>,
    pub arrival_time: Option<String>,
    pub travel_class: u8,

    /// The title of the ticket.
    pub ticket_type: Option<String>,
    /// The train category, e.g. `ICE` or `Railjet Xpress`.
    pub train_type: Option<String>,
    pub train_number: Option<u32>,
    pub carriage_number: Option<u32>,
    pub seat_number: Option<u16>,
    /// Where the seat is, e.g. at the window or in a couchette.
    pub seat_type: Option<String>,

    /// The fare in the smallest unit of the currency.
    pub ticket_value: Option<u64>,
    /// The ISO 4217 currency code of the fare.
    pub ticket_currency: Option<String>,
    /// The traveller's full name.
    pub name_of_traveller: Option<String>,
}

impl Rct2Layout {
    /// Extracts the boxes and fields of the grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTravelClass`] if the travel class isn't a number.
    pub(crate) fn new(grid: &Grid) -> Result<Self, Error> {
        let rows = |rows: Range<usize>, columns: Range<usize>| -> Vec<String> {
            rows.map(|row| grid.slice(row, columns.clone())).collect()
        };

        let type_of_document = rows(0..4, 18..51);
        let names_of_travelers = rows(0..2, 52..71);
        let train_wagon_seat = rows(8..12, 1..71);
        let rates_and_conditions = rows(12..15, 1..50);
        let ticket_value_box = rows(13..15, 52..71);

        let class = grid.slice(TRAVEL_CLASS_ROW, 67..72);
        let travel_class = strip(&class)
            .parse::<u8>()
            .map_err(|_| Error::InvalidTravelClass {
                text: strip(&class).to_owned(),
            })?;

        let mut layout = Self {
            travel_from: None,
            travel_to: None,
            departure_date: None,
            departure_time: None,
            arrival_date: None,
            arrival_time: None,
            travel_class,
            ticket_type: value(&type_of_document[0]),
            train_type: value(&type_of_document[1]),
            train_number: None,
            carriage_number: None,
            seat_number: None,
            seat_type: value(&window(&train_wagon_seat[1], 60..usize::MAX)),
            ticket_value: None,
            ticket_currency: None,
            name_of_traveller: value(&names_of_travelers[0]),
            type_of_document,
            names_of_travelers,
            train_wagon_seat,
            rates_and_conditions,
            ticket_value_box,
        };

        layout.extract_itinerary(grid);
        layout.extract_seat_number();
        layout.extract_train_and_carriage();
        layout.extract_ticket_value();

        Ok(layout)
    }

    fn extract_itinerary(&mut self, grid: &Grid) {
        for row in ITINERARY_ROWS {
            let fields = [
                (&mut self.travel_from, 13..31),
                (&mut self.travel_to, 34..52),
                (&mut self.departure_date, 1..6),
                (&mut self.departure_time, 7..12),
                (&mut self.arrival_date, 52..57),
                (&mut self.arrival_time, 58..63),
            ];

            for (field, columns) in fields {
                if let Some(value) = value(&grid.slice(row, columns)) {
                    *field = Some(value);
                }
            }
        }
    }

    fn extract_seat_number(&mut self) {
        let seat = window(&self.train_wagon_seat[2], 60..64);
        let seat = strip(&seat);

        if seat.is_empty() {
            return;
        }

        match seat.parse() {
            Ok(number) => self.seat_number = Some(number),
            Err(_) => trace!("seat number {seat:?} is not a number"),
        }
    }

    fn extract_train_and_carriage(&mut self) {
        let row = strip(&self.train_wagon_seat[0]);

        let Some(caps) = TRAIN_AND_CARRIAGE.captures(row) else {
            trace!("no train and carriage in {row:?}");
            return;
        };

        if let (Ok(train), Ok(carriage)) = (caps[1].parse(), caps[2].parse()) {
            self.train_number = Some(train);
            self.carriage_number = Some(carriage);
        }
    }

    fn extract_ticket_value(&mut self) {
        let raw = &self.ticket_value_box[0];
        let candidates = [
            PRICE.captures(strip(raw)),
            PRICE_NUL_SEPARATED.captures(raw),
        ];

        for caps in candidates.into_iter().flatten() {
            match format!("{}{}", &caps[2], &caps[3]).parse() {
                Ok(value) => {
                    self.ticket_currency = Some(caps[1].to_owned());
                    self.ticket_value = Some(value);
                }
                Err(_) => trace!("ticket value {:?} is not a number", &caps[0]),
            }
        }

        if self.ticket_value.is_none() {
            trace!("no ticket value in {raw:?}");
        }
    }
}
