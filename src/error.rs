use crate::address::{cashaddr, AddressError};
use crate::amount::AmountError;
use core::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone)]
pub enum WasmCashAddrError {
    StringError(String),
}

impl std::error::Error for WasmCashAddrError {}
impl fmt::Display for WasmCashAddrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasmCashAddrError::StringError(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for WasmCashAddrError {
    fn from(s: &str) -> Self {
        WasmCashAddrError::StringError(s.to_string())
    }
}

impl From<String> for WasmCashAddrError {
    fn from(s: String) -> Self {
        WasmCashAddrError::StringError(s)
    }
}

impl From<cashaddr::Error> for WasmCashAddrError {
    fn from(err: cashaddr::Error) -> Self {
        WasmCashAddrError::StringError(err.to_string())
    }
}

impl From<AddressError> for WasmCashAddrError {
    fn from(err: AddressError) -> Self {
        WasmCashAddrError::StringError(err.to_string())
    }
}

impl From<AmountError> for WasmCashAddrError {
    fn from(err: AmountError) -> Self {
        WasmCashAddrError::StringError(err.to_string())
    }
}

impl From<WasmCashAddrError> for JsValue {
    fn from(err: WasmCashAddrError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl WasmCashAddrError {
    pub fn new(s: &str) -> WasmCashAddrError {
        WasmCashAddrError::StringError(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_preserved() {
        let err = WasmCashAddrError::from(cashaddr::Error::MixedCase);
        assert_eq!(err.to_string(), cashaddr::Error::MixedCase.to_string());

        let err = WasmCashAddrError::from(AddressError::AddressCollision);
        assert!(err.to_string().starts_with("Address collision"));

        let err = WasmCashAddrError::from(AmountError::InvalidAmount);
        assert_eq!(err.to_string(), "invalid bitcoin amount");

        assert_eq!(WasmCashAddrError::new("boom").to_string(), "boom");
    }
}
