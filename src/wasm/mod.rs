mod address;
mod cashaddr;
mod try_into_js_value;

pub use address::AddressNamespace;
pub use cashaddr::CashAddrNamespace;
