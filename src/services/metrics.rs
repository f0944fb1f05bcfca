use std::sync::atomic::{AtomicU64, Ordering};

pub struct PaymentMetrics {
    orders_created: AtomicU64,
    charges_succeeded: AtomicU64,
    charges_failed: AtomicU64,
    conversations_started: AtomicU64,
}

impl PaymentMetrics {
    pub fn new() -> Self {
        Self {
            orders_created: AtomicU64::new(0),
            charges_succeeded: AtomicU64::new(0),
            charges_failed: AtomicU64::new(0),
            conversations_started: AtomicU64::new(0),
        }
    }

    pub fn increment_orders_created(&self) {
        self.orders_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_charges_succeeded(&self) {
        self.charges_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_charges_failed(&self) {
        self.charges_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_conversations_started(&self) {
        self.conversations_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_orders_created(&self) -> u64 {
        self.orders_created.load(Ordering::Relaxed)
    }

    pub fn get_charges_succeeded(&self) -> u64 {
        self.charges_succeeded.load(Ordering::Relaxed)
    }

    pub fn get_charges_failed(&self) -> u64 {
        self.charges_failed.load(Ordering::Relaxed)
    }

    pub fn get_conversations_started(&self) -> u64 {
        self.conversations_started.load(Ordering::Relaxed)
    }
}

impl Default for PaymentMetrics {
    fn default() -> Self {
        Self::new()
    }
}
