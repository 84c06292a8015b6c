/// Capital account action type strings accepted at the boundary.
pub const ACTION_TYPE_DEPOSIT: &str = "deposit";
pub const ACTION_TYPE_WITHDRAWAL: &str = "withdrawal";

/// Portfolio action type strings accepted at the boundary.
pub const ACTION_TYPE_BUY: &str = "buy";
pub const ACTION_TYPE_SELL: &str = "sell";
