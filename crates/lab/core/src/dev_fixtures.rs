//! Publicly known development fixtures.
//!
//! Everything here is printed by `anvil` on startup and funded only on local
//! development chains. These values are not secrets and must never be used
//! for anything holding real value.

/// Private key of Anvil's default account #0
/// (`0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266`).
pub const ANVIL_DEV_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// JSON-RPC endpoint `anvil` listens on by default.
pub const ANVIL_DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
