use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::app::config::Config;
use crate::errors::PaymentError;
use crate::models::conversation::Conversation;
use crate::models::order::Order;
use crate::services::catalog::ServiceCatalog;
use crate::services::conversation_store::ConversationStore;
use crate::services::gateway::{GatewayRequest, PaymentGateway};
use crate::services::identity::UserId;
use crate::services::metrics::PaymentMetrics;
use crate::services::order_store::{NewOrder, OrderStore};
use crate::utils::money::{format_major_units, to_minor_units};

/// A checkout as the purchase path sees it: the buyer is already resolved,
/// the amount is still in major units.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub buyer_id: UserId,
    pub service_id: String,
    pub creator_id: String,
    pub amount: f64,
    pub currency: Option<String>,
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutOutcome {
    pub order_id: String,
    pub payment_url: String,
    pub amount_minor: u64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicePayment {
    pub order_id: String,
    pub payment_url: String,
    pub conversation_id: Option<String>,
}

/// Entry point for the purchase flow. Owns the only cross-cutting view of
/// the lifecycle: order creation, the gateway call, reference attachment,
/// and the conversation side effect, strictly in that order. Nothing here
/// retries: a failed attempt is the caller's decision to repeat.
pub struct ServicePaymentService {
    orders: Arc<dyn OrderStore>,
    conversations: Arc<dyn ConversationStore>,
    catalog: Arc<dyn ServiceCatalog>,
    gateway: Arc<dyn PaymentGateway>,
    metrics: Arc<PaymentMetrics>,
    default_currency: String,
}

impl ServicePaymentService {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        conversations: Arc<dyn ConversationStore>,
        catalog: Arc<dyn ServiceCatalog>,
        gateway: Arc<dyn PaymentGateway>,
        config: &Config,
    ) -> Self {
        Self {
            orders,
            conversations,
            catalog,
            gateway,
            metrics: Arc::new(PaymentMetrics::new()),
            default_currency: config.default_currency.clone(),
        }
    }

    /// The high-level purchase operation: validate, resolve the listing,
    /// run the checkout, then make sure the buyer has a conversation with
    /// the creator.
    pub async fn create_service_payment(
        &self,
        caller: Option<UserId>,
        service_id: &str,
    ) -> Result<ServicePayment, PaymentError> {
        if service_id.trim().is_empty() {
            return Err(PaymentError::InvalidInput(
                "service_id must be a non-empty string".to_string(),
            ));
        }
        let buyer_id = caller.ok_or(PaymentError::NotAuthenticated)?;

        let listing = self
            .catalog
            .find_purchasable(service_id)
            .await?
            .ok_or_else(|| PaymentError::ServiceNotFound(service_id.to_string()))?;

        let outcome = self
            .create_checkout(CheckoutRequest {
                buyer_id: buyer_id.clone(),
                service_id: listing.id.clone(),
                creator_id: listing.creator_id.clone(),
                amount: listing.price,
                currency: listing.currency.clone(),
                idempotency_key: None,
            })
            .await?;

        // the purchase already happened; losing the conversation is a
        // warning, not a failure
        let conversation_id = match self
            .conversations
            .find_or_create(&buyer_id, &listing.creator_id)
            .await
        {
            Ok((conversation, created)) => {
                if created {
                    self.metrics.increment_conversations_started();
                }
                Some(conversation.id)
            }
            Err(e) => {
                warn!(
                    "Conversation bootstrap failed for buyer {} and creator {}: {}",
                    buyer_id, listing.creator_id, e
                );
                None
            }
        };

        Ok(ServicePayment {
            order_id: outcome.order_id,
            payment_url: outcome.payment_url,
            conversation_id,
        })
    }

    /// The lower-level checkout: one pending order, one gateway call, one
    /// reference attach. Order creation strictly precedes the gateway call
    /// (the charge needs the order id); the attach never rolls anything
    /// back.
    pub async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutOutcome, PaymentError> {
        if request.service_id.trim().is_empty() || request.creator_id.trim().is_empty() {
            return Err(PaymentError::InvalidInput(
                "service_id and creator_id are required".to_string(),
            ));
        }

        let amount_minor = to_minor_units(request.amount)?;
        let currency = request
            .currency
            .unwrap_or_else(|| self.default_currency.clone());

        let order = self
            .orders
            .create_pending_order(NewOrder {
                buyer_id: request.buyer_id.clone(),
                creator_id: request.creator_id.clone(),
                service_id: request.service_id.clone(),
                amount_minor,
                currency: currency.clone(),
                gateway_name: self.gateway.name().to_string(),
                idempotency_key: request.idempotency_key,
            })
            .await?;
        self.metrics.increment_orders_created();
        info!(
            "Order {} created for service {} ({} {})",
            order.id,
            order.service_id,
            format_major_units(amount_minor),
            currency
        );

        let charge = match self
            .gateway
            .create_charge(&GatewayRequest {
                order_id: order.id.clone(),
                amount_minor,
                currency: currency.clone(),
                buyer_id: request.buyer_id,
                creator_id: request.creator_id,
            })
            .await
        {
            Ok(charge) => charge,
            Err(failure) => {
                self.metrics.increment_charges_failed();
                error!("Charge for order {} failed: {}", order.id, failure);
                // the pending order stays behind for reconciliation
                return Err(PaymentError::from_gateway(failure));
            }
        };

        let payment_url = match charge.payment_url {
            Some(url) => url,
            None => {
                self.metrics.increment_charges_failed();
                error!(
                    "Gateway returned reference {} for order {} without a payment url",
                    charge.reference_id, order.id
                );
                return Err(PaymentError::MalformedGatewayResponse {
                    reference: charge.reference_id,
                });
            }
        };

        if let Err(e) = self
            .orders
            .attach_gateway_reference(&order.id, &charge.reference_id)
            .await
        {
            // the charge exists either way; reconciliation can recover the
            // reference from the provider by order id
            warn!(
                "Could not attach gateway reference {} to order {}: {}",
                charge.reference_id, order.id, e
            );
        }
        self.metrics.increment_charges_succeeded();

        Ok(CheckoutOutcome {
            order_id: order.id,
            payment_url,
            amount_minor,
            currency,
        })
    }

    /// Public conversation bootstrap, same semantics as the purchase-time
    /// side effect.
    pub async fn find_or_create_conversation(
        &self,
        caller: Option<UserId>,
        creator_id: &str,
    ) -> Result<Conversation, PaymentError> {
        let client_id = caller.ok_or(PaymentError::NotAuthenticated)?;
        if creator_id.trim().is_empty() {
            return Err(PaymentError::InvalidInput(
                "creator_id must be a non-empty string".to_string(),
            ));
        }

        let (conversation, created) = self
            .conversations
            .find_or_create(&client_id, creator_id)
            .await?;
        if created {
            self.metrics.increment_conversations_started();
            info!(
                "Conversation {} started between {} and {}",
                conversation.id, client_id, creator_id
            );
        }
        Ok(conversation)
    }

    pub async fn get_order(&self, order_id: &str) -> Result<Option<Order>, PaymentError> {
        Ok(self.orders.get(order_id).await?)
    }

    pub fn metrics_snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "orders_created": self.metrics.get_orders_created(),
            "charges_succeeded": self.metrics.get_charges_succeeded(),
            "charges_failed": self.metrics.get_charges_failed(),
            "conversations_started": self.metrics.get_conversations_started(),
        })
    }
}
