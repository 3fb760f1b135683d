//! Wallet/session bootstrap and the per-action operations behind the UI
//! buttons. A session is established once; every action afterwards is an
//! independent fire-and-forget call through the gateway.

use std::sync::Arc;

use alloy::{
    network::EthereumWallet,
    primitives::{Address, TxHash, U256},
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use anyhow::{Context, Result};
use tracing::info;
use url::Url;

use crate::{
    amount::{format_token_amount, parse_token_amount},
    config::Settings,
    gateway::{RpcSwapGateway, SwapGateway, TokenSlot},
};

/// Whole-token quantity minted per mint action.
pub const MINT_WHOLE_TOKENS: &str = "100";

/// Session facts derived once at bootstrap; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInfo {
    pub account: Address,
    pub chain_id: u64,
}

/// Display-formatted balances of both pair legs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalances {
    pub token0: String,
    pub token1: String,
}

pub struct SessionClient {
    info: SessionInfo,
    sell_spender: Address,
    decimals: [u8; 2],
    gateway: Arc<dyn SwapGateway>,
}

impl std::fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("info", &self.info)
            .field("sell_spender", &self.sell_spender)
            .field("decimals", &self.decimals)
            .finish_non_exhaustive()
    }
}

impl SessionClient {
    pub fn new(
        gateway: Arc<dyn SwapGateway>,
        info: SessionInfo,
        sell_spender: Address,
        decimals: [u8; 2],
    ) -> Self {
        Self {
            info,
            sell_spender,
            decimals,
            gateway,
        }
    }

    /// Bootstrap a wallet session: parse the signer key, connect the HTTP
    /// provider, query the chain id, and bind the contract handles to the
    /// configured addresses. Callers treat any failure as terminal for the
    /// session; there is no retry.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let signer: PrivateKeySigner = settings
            .signer_key
            .parse()
            .context("signer key is not a valid private key")?;
        let account = signer.address();

        let rpc_url: Url = settings
            .rpc_url
            .parse()
            .with_context(|| format!("invalid RPC endpoint '{}'", settings.rpc_url))?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(rpc_url)
            .erased();
        let chain_id = provider
            .get_chain_id()
            .await
            .context("wallet provider refused the session request")?;

        let token0 = parse_address(&settings.token0.address, "token0")?;
        let token1 = parse_address(&settings.token1.address, "token1")?;
        let sell = parse_address(&settings.sell_address, "sell contract")?;

        info!(account = %account, chain_id, "wallet session established");

        Ok(Self::new(
            Arc::new(RpcSwapGateway::new(provider, token0, token1, sell)),
            SessionInfo { account, chain_id },
            sell,
            [settings.token0.decimals, settings.token1.decimals],
        ))
    }

    pub fn info(&self) -> SessionInfo {
        self.info
    }

    fn decimals(&self, slot: TokenSlot) -> u8 {
        match slot {
            TokenSlot::Token0 => self.decimals[0],
            TokenSlot::Token1 => self.decimals[1],
        }
    }

    /// Mint the fixed test quantity, decimal-adjusted, to the connected
    /// account.
    pub async fn mint_test_tokens(&self, slot: TokenSlot) -> Result<TxHash> {
        let amount = parse_token_amount(MINT_WHOLE_TOKENS, self.decimals(slot))?;
        self.gateway.mint(slot, self.info.account, amount).await
    }

    /// Grant the sell contract an unbounded allowance on one token.
    pub async fn approve_max(&self, slot: TokenSlot) -> Result<TxHash> {
        self.gateway.approve(slot, self.sell_spender, U256::MAX).await
    }

    /// Parse the user-entered amount with the token's decimals and forward it
    /// to the sell contract's per-token entry point. Malformed input fails at
    /// the parser and issues no call.
    pub async fn sell_tokens(&self, slot: TokenSlot, amount_text: &str) -> Result<TxHash> {
        let amount_in = parse_token_amount(amount_text, self.decimals(slot))?;
        self.gateway.sell(slot, amount_in).await
    }

    /// Trigger the sell contract's finalization entry point.
    pub async fn execute_swap(&self) -> Result<TxHash> {
        self.gateway.execute().await
    }

    /// Query both token balances for the connected account.
    pub async fn balances(&self) -> Result<TokenBalances> {
        let (raw0, raw1) = futures::future::try_join(
            self.gateway.balance_of(TokenSlot::Token0, self.info.account),
            self.gateway.balance_of(TokenSlot::Token1, self.info.account),
        )
        .await?;
        Ok(TokenBalances {
            token0: format_token_amount(raw0, self.decimals[0]),
            token1: format_token_amount(raw1, self.decimals[1]),
        })
    }
}

fn parse_address(raw: &str, what: &str) -> Result<Address> {
    raw.parse()
        .with_context(|| format!("{what} address '{raw}' is not a valid address"))
}
