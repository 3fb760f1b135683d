use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::gateway::{SwapGateway, TokenSlot};
use crate::session::{SessionClient, SessionInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
enum GatewayCall {
    Mint {
        slot: TokenSlot,
        to: Address,
        amount: U256,
    },
    Approve {
        slot: TokenSlot,
        spender: Address,
        amount: U256,
    },
    BalanceOf {
        slot: TokenSlot,
        owner: Address,
    },
    Sell {
        slot: TokenSlot,
        amount_in: U256,
    },
    Execute,
}

struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    balance: U256,
    fail_with: Option<String>,
}

impl RecordingGateway {
    fn ok() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            balance: U256::ZERO,
            fail_with: None,
        }
    }

    fn with_balance(balance: U256) -> Self {
        let mut gateway = Self::ok();
        gateway.balance = balance;
        gateway
    }

    fn failing(err: impl Into<String>) -> Self {
        let mut gateway = Self::ok();
        gateway.fail_with = Some(err.into());
        gateway
    }

    async fn recorded(&self) -> Vec<GatewayCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: GatewayCall) -> Result<()> {
        if let Some(err) = &self.fail_with {
            return Err(anyhow!(err.clone()));
        }
        self.calls.lock().await.push(call);
        Ok(())
    }
}

#[async_trait]
impl SwapGateway for RecordingGateway {
    async fn mint(&self, slot: TokenSlot, to: Address, amount: U256) -> Result<TxHash> {
        self.record(GatewayCall::Mint { slot, to, amount }).await?;
        Ok(TxHash::ZERO)
    }

    async fn approve(&self, slot: TokenSlot, spender: Address, amount: U256) -> Result<TxHash> {
        self.record(GatewayCall::Approve {
            slot,
            spender,
            amount,
        })
        .await?;
        Ok(TxHash::ZERO)
    }

    async fn balance_of(&self, slot: TokenSlot, owner: Address) -> Result<U256> {
        self.record(GatewayCall::BalanceOf { slot, owner }).await?;
        Ok(self.balance)
    }

    async fn sell(&self, slot: TokenSlot, amount_in: U256) -> Result<TxHash> {
        self.record(GatewayCall::Sell { slot, amount_in }).await?;
        Ok(TxHash::ZERO)
    }

    async fn execute(&self) -> Result<TxHash> {
        self.record(GatewayCall::Execute).await?;
        Ok(TxHash::ZERO)
    }
}

const ACCOUNT: Address = Address::repeat_byte(0xAA);
const SELL_SPENDER: Address = Address::repeat_byte(0x5E);

fn session_over(gateway: Arc<RecordingGateway>) -> SessionClient {
    SessionClient::new(
        gateway,
        SessionInfo {
            account: ACCOUNT,
            chain_id: 31337,
        },
        SELL_SPENDER,
        [18, 6],
    )
}

#[tokio::test]
async fn mint_issues_one_call_scaled_by_token_decimals() {
    let gateway = Arc::new(RecordingGateway::ok());
    let client = session_over(Arc::clone(&gateway));

    client.mint_test_tokens(TokenSlot::Token0).await.expect("mint");
    client.mint_test_tokens(TokenSlot::Token1).await.expect("mint");

    let hundred_token0 = U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64));
    let hundred_token1 = U256::from(100_000_000u64);
    assert_eq!(
        gateway.recorded().await,
        vec![
            GatewayCall::Mint {
                slot: TokenSlot::Token0,
                to: ACCOUNT,
                amount: hundred_token0,
            },
            GatewayCall::Mint {
                slot: TokenSlot::Token1,
                to: ACCOUNT,
                amount: hundred_token1,
            },
        ]
    );
}

#[tokio::test]
async fn approve_requests_maximum_allowance_for_sell_contract() {
    let gateway = Arc::new(RecordingGateway::ok());
    let client = session_over(Arc::clone(&gateway));

    client.approve_max(TokenSlot::Token1).await.expect("approve");

    assert_eq!(
        gateway.recorded().await,
        vec![GatewayCall::Approve {
            slot: TokenSlot::Token1,
            spender: SELL_SPENDER,
            amount: U256::MAX,
        }]
    );
}

#[tokio::test]
async fn sell_parses_amount_with_the_target_token_decimals() {
    let gateway = Arc::new(RecordingGateway::ok());
    let client = session_over(Arc::clone(&gateway));

    client
        .sell_tokens(TokenSlot::Token0, "1.5")
        .await
        .expect("sell token0");
    client
        .sell_tokens(TokenSlot::Token1, "1.5")
        .await
        .expect("sell token1");

    assert_eq!(
        gateway.recorded().await,
        vec![
            GatewayCall::Sell {
                slot: TokenSlot::Token0,
                amount_in: U256::from(1_500_000_000_000_000_000u128),
            },
            GatewayCall::Sell {
                slot: TokenSlot::Token1,
                amount_in: U256::from(1_500_000u64),
            },
        ]
    );
}

#[tokio::test]
async fn malformed_sell_amount_issues_no_call() {
    let gateway = Arc::new(RecordingGateway::ok());
    let client = session_over(Arc::clone(&gateway));

    let result = client.sell_tokens(TokenSlot::Token0, "not-a-number").await;

    assert!(result.is_err());
    assert!(gateway.recorded().await.is_empty());
}

#[tokio::test]
async fn rapid_duplicate_actions_are_not_deduplicated() {
    let gateway = Arc::new(RecordingGateway::ok());
    let client = session_over(Arc::clone(&gateway));

    let (first, second) = tokio::join!(
        client.sell_tokens(TokenSlot::Token0, "2"),
        client.sell_tokens(TokenSlot::Token0, "2"),
    );
    first.expect("first sell");
    second.expect("second sell");

    let expected = GatewayCall::Sell {
        slot: TokenSlot::Token0,
        amount_in: U256::from(2u64) * U256::from(10u64).pow(U256::from(18u64)),
    };
    assert_eq!(gateway.recorded().await, vec![expected.clone(), expected]);
}

#[tokio::test]
async fn execute_triggers_the_finalization_entry_point() {
    let gateway = Arc::new(RecordingGateway::ok());
    let client = session_over(Arc::clone(&gateway));

    client.execute_swap().await.expect("execute");

    assert_eq!(gateway.recorded().await, vec![GatewayCall::Execute]);
}

#[tokio::test]
async fn balances_query_both_legs_and_format_with_their_decimals() {
    let gateway = Arc::new(RecordingGateway::with_balance(U256::from(1_234_567u64)));
    let client = session_over(Arc::clone(&gateway));

    let balances = client.balances().await.expect("balances");

    assert_eq!(balances.token1, "1.234567");
    assert_eq!(
        gateway.recorded().await.len(),
        2,
        "one balanceOf per pair leg"
    );
}

#[tokio::test]
async fn bootstrap_rejects_malformed_signer_key() {
    let mut settings = crate::config::Settings::default();
    settings.signer_key = "not-a-private-key".to_string();

    let err = SessionClient::connect(&settings)
        .await
        .expect_err("connect should fail");

    assert!(err.to_string().contains("signer key"));
}

#[tokio::test]
async fn bootstrap_rejects_malformed_rpc_endpoint() {
    let mut settings = crate::config::Settings::default();
    settings.rpc_url = "not a url".to_string();

    let err = SessionClient::connect(&settings)
        .await
        .expect_err("connect should fail");

    assert!(err.to_string().contains("invalid RPC endpoint"));
}

#[tokio::test]
async fn gateway_failure_surfaces_as_error() {
    let gateway = Arc::new(RecordingGateway::failing("execution reverted"));
    let client = session_over(Arc::clone(&gateway));

    let err = client
        .mint_test_tokens(TokenSlot::Token0)
        .await
        .expect_err("mint should fail");

    assert!(err.to_string().contains("execution reverted"));
    assert!(gateway.recorded().await.is_empty());
}
