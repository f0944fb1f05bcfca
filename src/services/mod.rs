pub mod catalog;
pub mod conversation_store;
pub mod gateway;
pub mod identity;
pub mod metrics;
pub mod order_store;
pub mod service_payment;

pub use service_payment::ServicePaymentService;
