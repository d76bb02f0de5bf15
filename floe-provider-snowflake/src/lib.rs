//! Floe Snowflake Provider
//!
//! Manages compute pools and image repositories by issuing SQL over a
//! caller-supplied connection.
//!
//! ## Module Structure
//!
//! - `sdk` - Typed statements, SQL rendering and the execution client
//! - `resources` - Resource type definitions
//! - `schemas` - Attribute schemas for each resource type
//! - `provider` - SnowflakeProvider implementation
//! - `config` - Provider block settings
//! - `utils` - Attribute helpers

pub mod config;
pub mod provider;
pub mod resources;
pub mod schemas;
pub mod sdk;
pub mod utils;

// Re-export main types
pub use config::{ConfigError, ProviderConfig};
pub use provider::SnowflakeProvider;

use floe_core::provider::{BoxFuture, Provider, ProviderResult, ResourceType};
use floe_core::resource::{Resource, ResourceId, State};

use resources::resource_types;

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for SnowflakeProvider {
    fn name(&self) -> &'static str {
        "snowflake"
    }

    fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
        resource_types()
    }

    fn read(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.map(|s| s.to_string());
        Box::pin(async move { self.read_resource(&id, identifier.as_deref()).await })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.create_resource(resource).await })
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let from = from.clone();
        let to = to.clone();
        Box::pin(async move { self.update_resource(id, &identifier, &from, to).await })
    }

    fn delete(&self, id: &ResourceId, identifier: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        Box::pin(async move { self.delete_resource(&id, &identifier).await })
    }

    fn read_data_source(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.read_data_source(resource).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::sdk::testing::{RecordingConnection, compute_pool_row};

    fn boxed(conn: Arc<RecordingConnection>) -> Box<dyn Provider> {
        Box::new(SnowflakeProvider::new(conn, ProviderConfig::default()))
    }

    #[test]
    fn provider_metadata() {
        let provider = boxed(Arc::new(RecordingConnection::new()));
        assert_eq!(provider.name(), "snowflake");
        let names: Vec<&str> = provider.resource_types().iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "compute_pool",
                "image_repository",
                "compute_pools",
                "image_repositories"
            ]
        );
    }

    #[tokio::test]
    async fn dispatch_through_trait_object() {
        let conn = Arc::new(RecordingConnection::new());
        conn.respond("SHOW COMPUTE POOLS", vec![compute_pool_row("POOL")]);
        let provider = boxed(conn.clone());

        let state = provider
            .read(&ResourceId::new("compute_pool", "pool"), Some("POOL"))
            .await
            .unwrap();
        assert!(state.exists);

        let listing = provider
            .read_data_source(&Resource::new("compute_pools", "all").with_read_only(true))
            .await
            .unwrap();
        assert!(listing.attributes.contains_key("compute_pools"));

        assert_eq!(conn.statements().len(), 2);
    }
}
