use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::order::{Order, OrderType, PaymentStatus};

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub buyer_id: String,
    pub creator_id: String,
    pub service_id: String,
    pub amount_minor: u64,
    pub currency: String,
    pub gateway_name: String,
    pub idempotency_key: Option<String>,
}

/// Persistence seam for order rows. The in-memory implementation below backs
/// tests and local runs; a hosted-store implementation slots in behind the
/// same trait.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a new order in `pending` status with no gateway reference.
    /// When the request carries an idempotency key already seen, the
    /// existing row is returned instead of a duplicate.
    async fn create_pending_order(&self, new_order: NewOrder) -> Result<Order, StoreError>;

    /// Records the provider's opaque id after a successful charge. Leaves
    /// `payment_status` untouched: settlement happens out-of-band.
    async fn attach_gateway_reference(
        &self,
        order_id: &str,
        reference: &str,
    ) -> Result<(), StoreError>;

    /// Entry point for the out-of-band reconciler. Idempotent: applying the
    /// status an order already has is a no-op. Only `pending` orders may
    /// move, and only to a settled status.
    async fn apply_settlement(
        &self,
        order_id: &str,
        status: PaymentStatus,
    ) -> Result<(), StoreError>;

    async fn get(&self, order_id: &str) -> Result<Option<Order>, StoreError>;
}

pub struct InMemoryOrderStore {
    orders: DashMap<String, Order>,
    by_idempotency_key: DashMap<String, String>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
            by_idempotency_key: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn all(&self) -> Vec<Order> {
        self.orders.iter().map(|entry| entry.value().clone()).collect()
    }

    fn build_order(&self, id: String, new_order: NewOrder) -> Order {
        let now = Utc::now();
        Order {
            id,
            buyer_id: new_order.buyer_id,
            creator_id: new_order.creator_id,
            service_id: new_order.service_id,
            amount_minor: new_order.amount_minor,
            currency: new_order.currency,
            order_type: OrderType::Service,
            gateway_name: new_order.gateway_name,
            payment_status: PaymentStatus::Pending,
            gateway_reference: None,
            idempotency_key: new_order.idempotency_key,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create_pending_order(&self, new_order: NewOrder) -> Result<Order, StoreError> {
        if let Some(key) = new_order.idempotency_key.clone() {
            // the entry claim is atomic: concurrent submits with the same
            // key collapse onto one order id
            let order_id = self
                .by_idempotency_key
                .entry(key)
                .or_insert_with(|| Uuid::new_v4().to_string())
                .value()
                .clone();

            if let Some(existing) = self.orders.get(&order_id) {
                return Ok(existing.clone());
            }

            let order = self.build_order(order_id.clone(), new_order);
            self.orders.insert(order_id, order.clone());
            return Ok(order);
        }

        let order = self.build_order(Uuid::new_v4().to_string(), new_order);
        self.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn attach_gateway_reference(
        &self,
        order_id: &str,
        reference: &str,
    ) -> Result<(), StoreError> {
        match self.orders.get_mut(order_id) {
            Some(mut order) => {
                order.gateway_reference = Some(reference.to_string());
                order.updated_at = Utc::now();
                Ok(())
            }
            None => Err(StoreError::NotFound(order_id.to_string())),
        }
    }

    async fn apply_settlement(
        &self,
        order_id: &str,
        status: PaymentStatus,
    ) -> Result<(), StoreError> {
        let mut order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| StoreError::NotFound(order_id.to_string()))?;

        if order.payment_status == status {
            return Ok(());
        }
        if order.payment_status != PaymentStatus::Pending || !status.is_settled() {
            return Err(StoreError::InvalidTransition {
                from: order.payment_status,
                to: status,
            });
        }

        order.payment_status = status;
        order.updated_at = Utc::now();
        Ok(())
    }

    async fn get(&self, order_id: &str) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get(order_id).map(|entry| entry.clone()))
    }
}
