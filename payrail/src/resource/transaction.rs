//! Transactions, as they appear nested under a subscription.

use rust_decimal::Decimal;

use crate::error::GatewayError;
use crate::resource::{Resource, take_decimal, take_string};
use crate::value::Map;

/// A payment transaction charged against a subscription.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    /// Gateway-assigned identifier.
    pub id: Option<String>,
    /// Charged amount.
    pub amount: Option<Decimal>,
    /// Gateway status, e.g. `settled`.
    pub status: Option<String>,
    /// Transaction type, e.g. `sale`.
    pub kind: Option<String>,
    /// Response fields the typed view does not model.
    pub extra: Map,
}

impl Resource for Transaction {
    const KIND: &'static str = "transaction";

    fn from_map(mut map: Map) -> Result<Self, GatewayError> {
        Ok(Self {
            id: take_string(&mut map, "id")?,
            amount: take_decimal(&mut map, "amount")?,
            status: take_string(&mut map, "status")?,
            kind: take_string(&mut map, "type")?,
            extra: map,
        })
    }
}
