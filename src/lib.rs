pub mod address;
pub mod amount;
mod error;
mod networks;
pub mod wasm;

// re-export bitcoin from the miniscript crate
pub use ::miniscript::bitcoin;

pub use address::cashaddr::{self, decode_content, encode_content, pack_addr_data};
pub use address::{
    decode_address, from_output_script_with_coin, from_output_script_with_network,
    to_output_script_with_coin, to_output_script_with_network, Address, AddressError,
    AddressFormat,
};
pub use amount::{Amount, AmountUnit};
pub use error::WasmCashAddrError;
pub use networks::{Network, NetworkParams};
pub use wasm::{AddressNamespace, CashAddrNamespace};
