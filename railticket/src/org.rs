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

//! Names of well-known VDV organizations and products.

/// Returns the name of the organization with the VDV organization ID.
pub fn organization_name(org_id: u16) -> Option<&'static str> {
    let name = match org_id {
        36 => "Rhein-Main-Verkehrsverbund GmbH",
        38 => "Bahnen der Stadt Monheim GmbH",
        39 => "Ruhrbahn Mülheim GmbH",
        57 => "Dortmunder Stadtwerke AG",
        70 => "Verkehrsverbund Rhein-Ruhr AöR",
        102 => "Verkehrsverbund Rhein-Sieg GmbH",
        103 => "Stadtwerke Bonn Verkehrs-GmbH",
        111 => "Regionalverkehr Köln GmbH",
        3000 => "Verband Deutscher Verkehrsunternehmen eV",
        5000 => "VDV eTicket Service GmbH & Co. KG",
        6041 => "Abellio Rail NRW GmbH",
        6060 => "Verkehrsverbund Oberelbe",
        6061 => "DB Mobility Logistics AG",
        6079 => "moBiel GmbH",
        6187 => "Offenbacher Verkehrs-Betriebe GmbH",
        6212 => "Verkehrsverbund Rhein-Sieg GmbH",
        6222 | 6260 | 6261 | 6312 | 6377 | 6379 | 6410 => "DB Vertrieb GmbH",
        6234 => "Verkehrs- und Tarifverbund Stuttgart GmbH",
        6262 => "DB Fernverkehr AG",
        6310 => "Saarländische Nahverkehrs-Service GmbH",
        6335 => "Rhein-Main-Verkehrsverbund Servicegesellschaft mbH",
        _ => return None,
    };

    Some(name)
}

/// Returns the organization's name or the ID if the organization is unknown.
pub fn organization_display_name(org_id: u16) -> String {
    organization_name(org_id)
        .map(str::to_owned)
        .unwrap_or_else(|| org_id.to_string())
}

/// Returns the name of the nationwide products with a reserved product number.
pub fn product_name(product_number: u16) -> Option<&'static str> {
    match product_number {
        9999 => Some("Deutschlandticket"),
        9998 => Some("Deutschlandjobticket"),
        9997 => Some("Startkarte Deutschlandticket"),
        9996 => Some("Semesterticket Deutschlandticket Upgrade"),
        9995 => Some("Deutschlandsemesterticket"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_organizations() {
        assert_eq!(organization_name(6262), Some("DB Fernverkehr AG"));
        assert_eq!(organization_name(6377), Some("DB Vertrieb GmbH"));
        assert_eq!(organization_name(6410), Some("DB Vertrieb GmbH"));
        assert_eq!(organization_name(1), None);
    }

    #[test]
    fn falls_back_to_id() {
        assert_eq!(organization_display_name(36), "Rhein-Main-Verkehrsverbund GmbH");
        assert_eq!(organization_display_name(4711), "4711");
    }

    #[test]
    fn reserved_products() {
        assert_eq!(product_name(9999), Some("Deutschlandticket"));
        assert_eq!(product_name(9995), Some("Deutschlandsemesterticket"));
        assert_eq!(product_name(9994), None);
    }
}
