//! Floe Core
//!
//! Provider-agnostic resource model for managing data platform objects
//! declaratively: resources and their observed state, the async provider
//! contract, and attribute schemas used to validate desired state.

pub mod provider;
pub mod resource;
pub mod schema;
