// SPDX-License-Identifier: Apache-2.0
// Copyright 2025, 2026 Joe Pearson
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

use railticket::uic::LayoutV1;
use railticket::vdv::VdvTicket;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}

/// Decodes a VDV ticket into a plain object.
#[wasm_bindgen(js_name = decodeVdvTicket)]
pub fn decode_vdv_ticket(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let ticket = VdvTicket::parse(bytes).map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&ticket)
}

/// Decodes a UIC layout into a plain object.
#[wasm_bindgen(js_name = decodeLayout)]
pub fn decode_layout(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let layout = LayoutV1::parse(bytes).map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&layout)
}

#[wasm_bindgen(js_name = VdvTicket)]
pub struct JsVdvTicket {
    inner: VdvTicket,
}

#[wasm_bindgen(js_class = VdvTicket)]
impl JsVdvTicket {
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: &[u8]) -> Result<Self, JsError> {
        Ok(Self {
            inner: VdvTicket::parse(bytes)?,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> String {
        self.inner.version.clone()
    }

    #[wasm_bindgen(getter, js_name = productName)]
    pub fn product_name(&self) -> String {
        self.inner.product_name()
    }

    #[wasm_bindgen(getter, js_name = ticketOrgName)]
    pub fn ticket_org_name(&self) -> String {
        self.inner.ticket_org_name()
    }

    #[wasm_bindgen(getter)]
    pub fn passenger(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.passenger())
    }

    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner)
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_string_js(&self) -> String {
        self.inner.to_string()
    }
}
