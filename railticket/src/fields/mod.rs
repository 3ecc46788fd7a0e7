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

//! Scalar fields shared by the ticket formats.

use crate::Numeric;

mod datetime;
mod timestamp;

pub use datetime::{Date, DateTime};
pub use timestamp::Timestamp;

pub type Line<'a> = Numeric<'a, 2>;
pub type Column<'a> = Numeric<'a, 2>;
pub type Height<'a> = Numeric<'a, 2>;
pub type Width<'a> = Numeric<'a, 2>;
pub type Formatting<'a> = Numeric<'a, 1>;
pub type TextLength<'a> = Numeric<'a, 4>;
pub type FieldCount<'a> = Numeric<'a, 4>;
