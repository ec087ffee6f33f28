use crate::address::cashaddr::content::SIZE_TABLE;
use crate::address::cashaddr::{self, AddrContent, AddrType};
use crate::error::WasmCashAddrError;
use crate::networks::Network;
use crate::wasm::try_into_js_value::{js_obj, TryIntoJsValue};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

#[wasm_bindgen]
pub struct CashAddrNamespace;

#[wasm_bindgen]
impl CashAddrNamespace {
    /// Encode a byte payload under `prefix`.
    #[wasm_bindgen]
    pub fn encode(prefix: &str, payload: &[u8]) -> Result<String, WasmCashAddrError> {
        Ok(cashaddr::encode(prefix, payload)?)
    }

    /// Decode to `{ prefix, payload }`. `default_prefix` is used when the address has none.
    #[wasm_bindgen]
    pub fn decode(address: &str, default_prefix: Option<String>) -> Result<JsValue, JsError> {
        let (prefix, payload) = cashaddr::decode(address, default_prefix.as_deref().unwrap_or(""))?;
        js_obj!(
            "prefix" => prefix,
            "payload" => payload
        )
    }

    #[wasm_bindgen]
    pub fn encode_hash(
        prefix: &str,
        hash: &[u8],
        addr_type: u8,
    ) -> Result<String, WasmCashAddrError> {
        let addr_type = AddrType::new(addr_type)
            .ok_or_else(|| format!("Invalid address type: {}", addr_type))?;
        if !SIZE_TABLE.contains(&hash.len()) {
            return Err(format!("Invalid hash length: {}", hash.len()).into());
        }

        let content = AddrContent {
            addr_type,
            hash: hash.to_vec(),
        };
        Ok(cashaddr::encode_content(&content, prefix)?)
    }

    /// Decode to `{ type, hash }` for a network given by name or coin name.
    #[wasm_bindgen]
    pub fn decode_content(address: &str, network: &str) -> Result<JsValue, JsError> {
        let network: Network = network.parse().map_err(WasmCashAddrError::from)?;
        cashaddr::decode_content(address, network)?.try_to_js_value()
    }
}
