use crate::domain::entities::player::PlayerId;
use serde::{Deserialize, Serialize};

/// One priced transfer exactly as it is submitted to the remote mutation endpoint.
/// Prices are in tenths of a currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferRequest {
    pub element_out: PlayerId,
    pub element_in: PlayerId,
    pub selling_price: u32,
    pub purchase_price: u32,
}

impl TransferRequest {
    /// Budget change caused by this transfer: positive frees money, negative spends it.
    pub fn bank_delta(&self) -> i64 {
        self.selling_price as i64 - self.purchase_price as i64
    }
}
