//! Outbound call seam to the on-chain collaborators. The GUI backend worker
//! and the tests both talk to the deployment through [`SwapGateway`]; the RPC
//! implementation submits each call through `sol!`-generated handles.

use alloy::{
    primitives::{Address, TxHash, U256},
    providers::DynProvider,
};
use anyhow::Result;
use async_trait::async_trait;

use crate::abi::{SwapSell, TestToken};

/// Which leg of the pair an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenSlot {
    Token0,
    Token1,
}

impl TokenSlot {
    pub fn label(self) -> &'static str {
        match self {
            TokenSlot::Token0 => "token0",
            TokenSlot::Token1 => "token1",
        }
    }
}

/// One method per outbound contract call. Implementations submit the
/// transaction and report its hash without inspecting the receipt; queries
/// return the raw value.
#[async_trait]
pub trait SwapGateway: Send + Sync {
    async fn mint(&self, slot: TokenSlot, to: Address, amount: U256) -> Result<TxHash>;
    async fn approve(&self, slot: TokenSlot, spender: Address, amount: U256) -> Result<TxHash>;
    async fn balance_of(&self, slot: TokenSlot, owner: Address) -> Result<U256>;
    async fn sell(&self, slot: TokenSlot, amount_in: U256) -> Result<TxHash>;
    async fn execute(&self) -> Result<TxHash>;
}

/// JSON-RPC gateway bound to the three deployed contract addresses.
pub struct RpcSwapGateway {
    token0: TestToken::TestTokenInstance<DynProvider>,
    token1: TestToken::TestTokenInstance<DynProvider>,
    sell: SwapSell::SwapSellInstance<DynProvider>,
}

impl RpcSwapGateway {
    pub fn new(provider: DynProvider, token0: Address, token1: Address, sell: Address) -> Self {
        Self {
            token0: TestToken::new(token0, provider.clone()),
            token1: TestToken::new(token1, provider.clone()),
            sell: SwapSell::new(sell, provider),
        }
    }

    fn token(&self, slot: TokenSlot) -> &TestToken::TestTokenInstance<DynProvider> {
        match slot {
            TokenSlot::Token0 => &self.token0,
            TokenSlot::Token1 => &self.token1,
        }
    }
}

#[async_trait]
impl SwapGateway for RpcSwapGateway {
    async fn mint(&self, slot: TokenSlot, to: Address, amount: U256) -> Result<TxHash> {
        let pending = self.token(slot).mint(to, amount).send().await?;
        Ok(pending.watch().await?)
    }

    async fn approve(&self, slot: TokenSlot, spender: Address, amount: U256) -> Result<TxHash> {
        let pending = self.token(slot).approve(spender, amount).send().await?;
        Ok(pending.watch().await?)
    }

    async fn balance_of(&self, slot: TokenSlot, owner: Address) -> Result<U256> {
        Ok(self.token(slot).balanceOf(owner).call().await?)
    }

    async fn sell(&self, slot: TokenSlot, amount_in: U256) -> Result<TxHash> {
        // The sell entry point is selected by pair leg on the sell contract
        // itself, never on the token handle.
        let pending = match slot {
            TokenSlot::Token0 => self.sell.sell_token0(amount_in).send().await?,
            TokenSlot::Token1 => self.sell.sell_token1(amount_in).send().await?,
        };
        Ok(pending.watch().await?)
    }

    async fn execute(&self) -> Result<TxHash> {
        let pending = self.sell.execute().send().await?;
        Ok(pending.watch().await?)
    }
}
