//! Compute pool schemas

use floe_core::resource::Value;
use floe_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Attributes that return to their platform default through `UNSET`
pub const UNSETTABLE: &[&str] = &["auto_suspend_secs", "auto_resume", "comment"];

/// Compute pool: a set of nodes running containerized services and jobs
pub fn compute_pool_schema() -> ResourceSchema {
    ResourceSchema::new("compute_pool")
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .force_new(),
        )
        .attribute(AttributeSchema::new("min_nodes", types::positive_int()).required())
        .attribute(AttributeSchema::new("max_nodes", types::positive_int()).required())
        .attribute(
            AttributeSchema::new("instance_family", AttributeType::String)
                .required()
                .force_new(),
        )
        .attribute(
            AttributeSchema::new("auto_resume", AttributeType::Bool)
                .with_default(Value::Bool(true)),
        )
        .attribute(
            AttributeSchema::new("initially_suspended", AttributeType::Bool)
                .with_default(Value::Bool(false))
                .force_new(),
        )
        .attribute(
            AttributeSchema::new("auto_suspend_secs", types::non_negative_int())
                .with_default(Value::Int(600)),
        )
        .attribute(AttributeSchema::new("comment", AttributeType::String))
        // Reported by SHOW COMPUTE POOLS
        .attribute(AttributeSchema::new("state", AttributeType::String).computed())
        .attribute(AttributeSchema::new("owner", AttributeType::String).computed())
        .attribute(AttributeSchema::new("created_on", AttributeType::String).computed())
}

/// Data source listing compute pools
pub fn compute_pools_schema() -> ResourceSchema {
    ResourceSchema::new("compute_pools")
        .attribute(AttributeSchema::new("like", AttributeType::String))
        .attribute(AttributeSchema::new("starts_with", AttributeType::String))
        .attribute(AttributeSchema::new("limit", types::positive_int()))
        .attribute(
            AttributeSchema::new(
                "compute_pools",
                AttributeType::List(Box::new(AttributeType::Map(Box::new(
                    AttributeType::String,
                )))),
            )
            .computed(),
        )
}
