//! Image repository schemas

use floe_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Image repository; `database` and `schema` fall back to provider defaults
pub fn image_repository_schema() -> ResourceSchema {
    ResourceSchema::new("image_repository")
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .force_new(),
        )
        .attribute(AttributeSchema::new("database", AttributeType::String).force_new())
        .attribute(AttributeSchema::new("schema", AttributeType::String).force_new())
        .attribute(AttributeSchema::new("repository_url", AttributeType::String).computed())
        .attribute(AttributeSchema::new("owner", AttributeType::String).computed())
        .attribute(AttributeSchema::new("comment", AttributeType::String).computed())
        .attribute(AttributeSchema::new("created_on", AttributeType::String).computed())
}

/// Data source listing image repositories
pub fn image_repositories_schema() -> ResourceSchema {
    ResourceSchema::new("image_repositories")
        .attribute(AttributeSchema::new("like", AttributeType::String))
        .attribute(AttributeSchema::new("database", AttributeType::String))
        .attribute(AttributeSchema::new("schema", AttributeType::String))
        .attribute(
            AttributeSchema::new(
                "image_repositories",
                AttributeType::List(Box::new(AttributeType::Map(Box::new(
                    AttributeType::String,
                )))),
            )
            .computed(),
        )
}
