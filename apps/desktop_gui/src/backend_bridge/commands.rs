//! Backend commands queued from UI to backend worker. One command per button
//! click; commands are never deduplicated or reordered.

use chain_client::TokenSlot;

pub enum BackendCommand {
    Mint {
        slot: TokenSlot,
    },
    ApproveMax {
        slot: TokenSlot,
    },
    Sell {
        slot: TokenSlot,
        amount_text: String,
    },
    ExecuteSwap,
    RefreshBalances,
}
