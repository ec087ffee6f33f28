use crate::address::networks::{
    from_output_script_with_coin, from_output_script_with_network, to_output_script_with_coin,
    to_output_script_with_network, AddressFormat,
};
use crate::address::{decode_address, Address};
use crate::error::WasmCashAddrError;
use crate::networks::Network;
use crate::wasm::try_into_js_value::TryIntoJsValue;
use miniscript::bitcoin::Script;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

fn parse_network(network: &str) -> Result<Network, WasmCashAddrError> {
    Ok(network.parse::<Network>()?)
}

fn parse_format(format: Option<String>) -> Result<AddressFormat, WasmCashAddrError> {
    Ok(AddressFormat::from_optional_str(format.as_deref())?)
}

#[wasm_bindgen]
pub struct AddressNamespace;

#[wasm_bindgen]
impl AddressNamespace {
    #[wasm_bindgen]
    pub fn to_output_script_with_coin(
        address: &str,
        coin: &str,
    ) -> std::result::Result<Vec<u8>, JsValue> {
        to_output_script_with_coin(address, coin)
            .map(|script| script.to_bytes())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn from_output_script_with_coin(
        script: &[u8],
        coin: &str,
        format: Option<String>,
    ) -> std::result::Result<String, JsValue> {
        let script_obj = Script::from_bytes(script);
        let address_format = parse_format(format)?;

        from_output_script_with_coin(script_obj, coin, address_format)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn to_output_script_with_network(
        address: &str,
        network: &str,
    ) -> std::result::Result<Vec<u8>, WasmCashAddrError> {
        let script = to_output_script_with_network(address, parse_network(network)?)?;
        Ok(script.to_bytes())
    }

    #[wasm_bindgen]
    pub fn from_output_script_with_network(
        script: &[u8],
        network: &str,
        format: Option<String>,
    ) -> std::result::Result<String, WasmCashAddrError> {
        Ok(from_output_script_with_network(
            Script::from_bytes(script),
            parse_network(network)?,
            parse_format(format)?,
        )?)
    }

    /// Decode a cashaddr, hex public key or legacy address to
    /// `{ type, network, cashaddr, legacy, scriptAddress, outputScript }`.
    #[wasm_bindgen]
    pub fn decode_address(address: &str, network: &str) -> Result<JsValue, JsError> {
        let address = decode_address(address, parse_network(network)?)?;
        address.try_to_js_value()
    }

    /// Public key address for a serialized public key.
    #[wasm_bindgen]
    pub fn from_public_key(
        pubkey: &[u8],
        network: &str,
        format: Option<String>,
    ) -> std::result::Result<String, WasmCashAddrError> {
        let address = Address::from_pubkey_bytes(pubkey, parse_network(network)?)?;
        Ok(address.encode_address(parse_format(format)?)?)
    }
}
