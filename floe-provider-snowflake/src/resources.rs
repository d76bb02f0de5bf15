//! Resource type definitions
//!
//! Managed resources and data sources exposed by this provider, each
//! tied to its attribute schema.

use floe_core::provider::ResourceType;
use floe_core::schema::ResourceSchema;

use crate::schemas::{compute_pool, image_repository};

pub const COMPUTE_POOL: &str = "compute_pool";
pub const IMAGE_REPOSITORY: &str = "image_repository";
pub const COMPUTE_POOLS: &str = "compute_pools";
pub const IMAGE_REPOSITORIES: &str = "image_repositories";

macro_rules! define_resource_type {
    ($name:ident, $type_name:expr, $schema:path) => {
        define_resource_type!($name, $type_name, $schema, false);
    };
    ($name:ident, $type_name:expr, $schema:path, $data_source:expr) => {
        pub struct $name;
        impl ResourceType for $name {
            fn name(&self) -> &'static str {
                $type_name
            }
            fn schema(&self) -> ResourceSchema {
                $schema()
            }
            fn is_data_source(&self) -> bool {
                $data_source
            }
        }
    };
}

define_resource_type!(
    ComputePoolType,
    COMPUTE_POOL,
    compute_pool::compute_pool_schema
);
define_resource_type!(
    ImageRepositoryType,
    IMAGE_REPOSITORY,
    image_repository::image_repository_schema
);
define_resource_type!(
    ComputePoolsType,
    COMPUTE_POOLS,
    compute_pool::compute_pools_schema,
    true
);
define_resource_type!(
    ImageRepositoriesType,
    IMAGE_REPOSITORIES,
    image_repository::image_repositories_schema,
    true
);

/// Returns all resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![
        Box::new(ComputePoolType),
        Box::new(ImageRepositoryType),
        Box::new(ComputePoolsType),
        Box::new(ImageRepositoriesType),
    ]
}

/// Look up a resource type by name
pub fn resource_type(name: &str) -> Option<Box<dyn ResourceType>> {
    resource_types().into_iter().find(|t| t.name() == name)
}
