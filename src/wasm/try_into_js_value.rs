use crate::address::cashaddr::{AddrContent, AddrType};
use crate::address::{Address, AddressFormat};
use crate::networks::Network;
use js_sys::Uint8Array;
use wasm_bindgen::{JsError, JsValue};

pub(crate) trait TryIntoJsValue {
    fn try_to_js_value(&self) -> Result<JsValue, JsError>;
}

macro_rules! js_obj {
    ( $( $key:expr => $value:expr ),* ) => {{
        let obj = js_sys::Object::new();
        $(
            js_sys::Reflect::set(&obj, &$key.into(), &$value.try_to_js_value()?.into())
                .map_err(|_| JsError::new("Failed to set object property"))?;
        )*
        Ok(Into::<JsValue>::into(obj)) as Result<JsValue, JsError>
    }};
}

pub(crate) use js_obj;

impl TryIntoJsValue for JsValue {
    fn try_to_js_value(&self) -> Result<JsValue, JsError> {
        Ok(self.clone())
    }
}

impl TryIntoJsValue for String {
    fn try_to_js_value(&self) -> Result<JsValue, JsError> {
        Ok(JsValue::from_str(self))
    }
}

impl TryIntoJsValue for &str {
    fn try_to_js_value(&self) -> Result<JsValue, JsError> {
        Ok(JsValue::from_str(self))
    }
}

// byte strings are passed to JS as Uint8Array, not as arrays of numbers
impl TryIntoJsValue for Vec<u8> {
    fn try_to_js_value(&self) -> Result<JsValue, JsError> {
        Ok(Uint8Array::from(self.as_slice()).into())
    }
}

impl TryIntoJsValue for u8 {
    fn try_to_js_value(&self) -> Result<JsValue, JsError> {
        Ok(JsValue::from_f64(*self as f64))
    }
}

impl<T: TryIntoJsValue> TryIntoJsValue for Option<T> {
    fn try_to_js_value(&self) -> Result<JsValue, JsError> {
        match self {
            Some(v) => v.try_to_js_value(),
            None => Ok(JsValue::NULL),
        }
    }
}

impl TryIntoJsValue for Network {
    fn try_to_js_value(&self) -> Result<JsValue, JsError> {
        Ok(JsValue::from_str(self.as_str()))
    }
}

impl TryIntoJsValue for AddrType {
    fn try_to_js_value(&self) -> Result<JsValue, JsError> {
        self.to_u8().try_to_js_value()
    }
}

impl TryIntoJsValue for AddrContent {
    fn try_to_js_value(&self) -> Result<JsValue, JsError> {
        js_obj!(
            "type" => self.addr_type,
            "hash" => self.hash
        )
    }
}

impl TryIntoJsValue for Address {
    fn try_to_js_value(&self) -> Result<JsValue, JsError> {
        let kind = match self {
            Address::PubKeyHash { .. } => "p2pkh",
            Address::ScriptHash { .. } => "p2sh",
            Address::PubKey { .. } => "p2pk",
        };
        js_obj!(
            "type" => kind,
            "network" => self.network(),
            "cashaddr" => self.encode_address(AddressFormat::Cashaddr)?,
            "legacy" => self.encode_address(AddressFormat::Legacy)?,
            "scriptAddress" => self.script_address(),
            "outputScript" => self.to_output_script().to_bytes()
        )
    }
}
