//! Attribute schemas of the Snowflake resources and data sources

pub mod compute_pool;
pub mod image_repository;
