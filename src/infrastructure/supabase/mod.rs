//! Supabase order store (PostgREST insert)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::errors::StorageError;
use crate::domain::entities::Order;
use crate::domain::traits::OrderStore;
use crate::infrastructure::config::SupabaseConfig;

/// Writes orders to a Supabase table over the REST API
pub struct SupabaseStore {
    client: Client,
    endpoint: String,
    key: String,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig, timeout: Duration) -> Result<Self, StorageError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: table_endpoint(&config.url, &config.orders_table),
            key: config.key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// REST endpoint for a table under a project URL
pub fn table_endpoint(base_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table)
}

#[async_trait]
impl OrderStore for SupabaseStore {
    async fn insert_order(&self, order: &Order) -> Result<(), StorageError> {
        let body = serde_json::to_vec(order).map_err(|e| StorageError::Serialization(e.to_string()))?;

        let response = self.client
            .post(&self.endpoint)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected { status: status.as_u16(), body });
        }

        tracing::debug!("Supabase accepted order for user {} ({})", order.user_id, status);
        Ok(())
    }
}
