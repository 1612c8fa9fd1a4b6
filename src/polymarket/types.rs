use serde::{Deserialize, Serialize};

use crate::models::{ClosedPosition, OpenPosition, TradeRecord};

/// Raw inputs for one wallet analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletData {
    #[serde(default)]
    pub activity: Vec<TradeRecord>,
    #[serde(default)]
    pub positions: Vec<OpenPosition>,
    #[serde(default)]
    pub closed_positions: Vec<ClosedPosition>,
}

/// True for a 0x-prefixed, 40-hex-digit wallet address.
pub fn is_valid_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}
