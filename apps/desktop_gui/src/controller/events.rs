//! UI/backend events and error modeling for the desktop GUI controller.

pub enum UiEvent {
    /// Wallet session established; emitted once at startup on success.
    SessionReady {
        account: String,
        chain_id: u64,
        pair_address: String,
    },
    Info(String),
    /// An action's transaction was accepted; surfaced as a blocking alert.
    ActionCompleted {
        title: &'static str,
        detail: String,
    },
    BalancesUpdated {
        token0: String,
        token1: String,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Provider,
    Revert,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Bootstrap,
    Mint,
    Approve,
    Sell,
    Execute,
    Balances,
}

pub fn classify_bootstrap_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("failed to build backend runtime")
        || lower.contains("backend worker startup failure")
    {
        "Backend worker startup failure; verify the local environment and relaunch.".to_string()
    } else if lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
        || lower.contains("refused the session request")
    {
        "Wallet provider unreachable; the session stays disconnected until relaunch.".to_string()
    } else {
        format!("Session bootstrap error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("revert")
            || message_lower.contains("rejected")
            || message_lower.contains("nonce")
            || message_lower.contains("insufficient funds")
        {
            UiErrorCategory::Revert
        } else if message_lower.contains("not a valid")
            || message_lower.contains("invalid")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("connection")
            || message_lower.contains("connect")
            || message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unreachable")
            || message_lower.contains("dns")
        {
            UiErrorCategory::Provider
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
