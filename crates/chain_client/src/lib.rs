//! Thin client library for a pre-deployed swap-selling contract: wallet
//! session bootstrap, mintable test-token handles, and the outbound calls
//! behind each UI action. All token accounting, swap math, and allowance
//! enforcement lives in the external contracts; nothing is validated or
//! sequenced locally.

pub mod abi;
pub mod amount;
pub mod config;
pub mod gateway;
pub mod session;

#[cfg(test)]
mod tests;

pub use amount::{format_token_amount, parse_token_amount, AmountParseError};
pub use config::{load_settings, Settings, TokenSettings};
pub use gateway::{RpcSwapGateway, SwapGateway, TokenSlot};
pub use session::{SessionClient, SessionInfo, TokenBalances, MINT_WHOLE_TOKENS};
