use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Service,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Expired,
}

impl PaymentStatus {
    /// Settlement states are owned by the out-of-band reconciler; only
    /// `pending` is ever written by the purchase path.
    pub fn is_settled(self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    pub creator_id: String,
    pub service_id: String,
    pub amount_minor: u64,
    pub currency: String,
    pub order_type: OrderType,
    pub gateway_name: String,
    pub payment_status: PaymentStatus,
    pub gateway_reference: Option<String>,
    pub idempotency_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::PaymentStatus;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Expired).unwrap(),
            "\"expired\""
        );
    }

    #[test]
    fn only_pending_is_unsettled() {
        assert!(!PaymentStatus::Pending.is_settled());
        assert!(PaymentStatus::Paid.is_settled());
        assert!(PaymentStatus::Failed.is_settled());
        assert!(PaymentStatus::Expired.is_settled());
    }
}
