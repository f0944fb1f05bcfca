use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// A purchasable micro-service as advertised by its creator. Prices are
/// stored in major units exactly as listed; conversion to minor units
/// happens once, at order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceListing {
    pub id: String,
    pub creator_id: String,
    pub title: String,
    pub price: f64,
    pub currency: Option<String>,
    pub active: bool,
}

/// Read-only view of the service catalog. The catalog itself is owned by
/// the content domain; the payment path only resolves listings.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    async fn find_purchasable(&self, service_id: &str)
        -> Result<Option<ServiceListing>, StoreError>;
}

pub struct InMemoryCatalog {
    listings: DashMap<String, ServiceListing>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            listings: DashMap::new(),
        }
    }

    pub fn insert(&self, listing: ServiceListing) {
        self.listings.insert(listing.id.clone(), listing);
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceCatalog for InMemoryCatalog {
    async fn find_purchasable(
        &self,
        service_id: &str,
    ) -> Result<Option<ServiceListing>, StoreError> {
        Ok(self
            .listings
            .get(service_id)
            .map(|entry| entry.clone())
            .filter(|listing| listing.active))
    }
}
