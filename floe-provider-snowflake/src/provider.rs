//! Snowflake Provider implementation
//!
//! Maps desired resources onto SDK requests and reflects SHOW results back
//! into `State`. Reads never trust previously stored values: every read
//! issues a fresh lookup.

use std::collections::HashMap;
use std::sync::Arc;

use floe_core::provider::{ProviderError, ProviderResult};
use floe_core::resource::{Resource, ResourceId, State, Value};
use floe_core::schema::ResourceSchema;
use log::{debug, warn};

use crate::config::ProviderConfig;
use crate::resources::{
    COMPUTE_POOL, COMPUTE_POOLS, IMAGE_REPOSITORIES, IMAGE_REPOSITORY, resource_type,
};
use crate::schemas::compute_pool::UNSETTABLE;
use crate::sdk::common::{In, Like, LimitFrom};
use crate::sdk::compute_pools::{
    AlterComputePoolRequest, ComputePool, ComputePoolSet, ComputePoolUnset,
    CreateComputePoolRequest, DropComputePoolRequest, ShowComputePoolRequest,
};
use crate::sdk::image_repositories::{
    CreateImageRepositoryRequest, DropImageRepositoryRequest, ImageRepository,
    ShowImageRepositoryRequest,
};
use crate::sdk::{
    AccountObjectIdentifier, Client, Connection, DatabaseObjectIdentifier, DecodedIdentifier,
    SchemaObjectIdentifier, SdkError, decode_id, encode_id,
};
use crate::utils::{
    format_timestamp, get_bool, get_int, get_string, require_int, require_string,
};

/// Snowflake Provider
pub struct SnowflakeProvider {
    client: Client,
    config: ProviderConfig,
}

impl SnowflakeProvider {
    /// Create a provider issuing statements over `connection`
    pub fn new(connection: Arc<dyn Connection>, config: ProviderConfig) -> Self {
        let mut client = Client::new(connection);
        if let Some(timeout) = config.statement_timeout() {
            client = client.with_statement_timeout(timeout);
        }
        Self { client, config }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Read a resource by its persisted identifier
    pub async fn read_resource(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
    ) -> ProviderResult<State> {
        let identifier = match identifier {
            Some(identifier) => identifier,
            None => return Ok(State::not_found(id.clone())),
        };

        let found = match id.resource_type.as_str() {
            COMPUTE_POOL => {
                let object_id = account_id(identifier).map_err(|e| e.for_resource(id.clone()))?;
                self.client
                    .compute_pools()
                    .show_by_id(&object_id)
                    .await
                    .map(|pool| compute_pool_attributes(&pool))
            }
            IMAGE_REPOSITORY => {
                let object_id = schema_id(identifier).map_err(|e| e.for_resource(id.clone()))?;
                self.client
                    .image_repositories()
                    .show_by_id(&object_id)
                    .await
                    .map(|repo| image_repository_attributes(&repo))
            }
            other => return Err(unsupported(other, id)),
        };

        match found {
            Ok(attributes) => {
                Ok(State::existing(id.clone(), attributes).with_identifier(identifier))
            }
            Err(e) if e.is_not_found() => {
                warn!("{} {} no longer exists", id.resource_type, identifier);
                Ok(State::not_found(id.clone()))
            }
            Err(e) => Err(sdk_error("read", id, e)),
        }
    }

    /// Create a resource and read it back
    pub async fn create_resource(&self, resource: Resource) -> ProviderResult<State> {
        let id = resource.id.clone();
        let schema = schema_for(&id)?;
        let mut attributes = resource.attributes;
        schema.apply_defaults(&mut attributes);
        validate_attributes(&schema, &attributes, &id)?;

        let identifier = match id.resource_type.as_str() {
            COMPUTE_POOL => {
                let request = compute_pool_create_request(&attributes)
                    .map_err(|e| e.for_resource(id.clone()))?;
                let object_id = request.name().clone();
                self.client
                    .compute_pools()
                    .create(request)
                    .await
                    .map_err(|e| sdk_error("create", &id, e))?;
                encode_id(&object_id)
            }
            IMAGE_REPOSITORY => {
                let object_id = self
                    .image_repository_id(&attributes)
                    .map_err(|e| e.for_resource(id.clone()))?;
                self.client
                    .image_repositories()
                    .create(CreateImageRepositoryRequest::new(object_id.clone()))
                    .await
                    .map_err(|e| sdk_error("create", &id, e))?;
                encode_id(&object_id)
            }
            other => return Err(unsupported(other, &id)),
        };

        self.read_resource(&id, Some(&identifier)).await
    }

    /// Update a resource in place and read it back
    pub async fn update_resource(
        &self,
        id: ResourceId,
        identifier: &str,
        from: &State,
        to: Resource,
    ) -> ProviderResult<State> {
        let schema = schema_for(&id)?;
        validate_attributes(&schema, &to.attributes, &id)?;
        check_force_new(&schema, from, &to)?;

        match id.resource_type.as_str() {
            COMPUTE_POOL => {
                let object_id = account_id(identifier).map_err(|e| e.for_resource(id.clone()))?;
                let (set, unset) = compute_pool_changes(&schema, from, &to)
                    .map_err(|e| e.for_resource(id.clone()))?;

                // UNSET first so a SET in the same update wins
                if let Some(unset) = unset {
                    self.client
                        .compute_pools()
                        .alter(AlterComputePoolRequest::new(object_id.clone()).with_unset(unset))
                        .await
                        .map_err(|e| sdk_error("update", &id, e))?;
                }
                if let Some(set) = set {
                    self.client
                        .compute_pools()
                        .alter(AlterComputePoolRequest::new(object_id).with_set(set))
                        .await
                        .map_err(|e| sdk_error("update", &id, e))?;
                }
            }
            IMAGE_REPOSITORY => {
                schema_id(identifier).map_err(|e| e.for_resource(id.clone()))?;
            }
            other => return Err(unsupported(other, &id)),
        }

        self.read_resource(&id, Some(identifier)).await
    }

    /// Drop a resource
    pub async fn delete_resource(&self, id: &ResourceId, identifier: &str) -> ProviderResult<()> {
        let if_exists = self.config.drop_if_exists;
        debug!("Deleting {} {}", id, identifier);

        let result = match id.resource_type.as_str() {
            COMPUTE_POOL => {
                let object_id = account_id(identifier).map_err(|e| e.for_resource(id.clone()))?;
                let mut request = DropComputePoolRequest::new(object_id);
                if if_exists {
                    request = request.with_if_exists(true);
                }
                self.client.compute_pools().drop(request).await
            }
            IMAGE_REPOSITORY => {
                let object_id = schema_id(identifier).map_err(|e| e.for_resource(id.clone()))?;
                let mut request = DropImageRepositoryRequest::new(object_id);
                if if_exists {
                    request = request.with_if_exists(true);
                }
                self.client.image_repositories().drop(request).await
            }
            other => return Err(unsupported(other, id)),
        };

        result.map_err(|e| sdk_error("delete", id, e))
    }

    /// List objects for a data source
    pub async fn read_data_source(&self, resource: Resource) -> ProviderResult<State> {
        let id = resource.id.clone();
        let schema = schema_for(&id)?;
        validate_attributes(&schema, &resource.attributes, &id)?;
        let mut attributes = resource.attributes;

        match id.resource_type.as_str() {
            COMPUTE_POOLS => {
                let request = compute_pools_request(&attributes)
                    .map_err(|e| e.for_resource(id.clone()))?;
                let pools = self
                    .client
                    .compute_pools()
                    .show(request)
                    .await
                    .map_err(|e| sdk_error("list", &id, e))?;
                let items = pools.iter().map(compute_pool_summary).collect();
                attributes.insert(COMPUTE_POOLS.to_string(), Value::List(items));
            }
            IMAGE_REPOSITORIES => {
                let request = self
                    .image_repositories_request(&attributes)
                    .map_err(|e| e.for_resource(id.clone()))?;
                let repositories = self
                    .client
                    .image_repositories()
                    .show(request)
                    .await
                    .map_err(|e| sdk_error("list", &id, e))?;
                let items = repositories.iter().map(image_repository_summary).collect();
                attributes.insert(IMAGE_REPOSITORIES.to_string(), Value::List(items));
            }
            other => return Err(unsupported(other, &id)),
        }

        Ok(State::existing(id, attributes))
    }

    // =========================================================================
    // Request Builders
    // =========================================================================

    fn image_repository_id(
        &self,
        attributes: &HashMap<String, Value>,
    ) -> ProviderResult<SchemaObjectIdentifier> {
        let name = require_string(attributes, "name")?;
        let database = self.scope(attributes, "database", &self.config.default_database)?;
        let schema = self.scope(attributes, "schema", &self.config.default_schema)?;
        match (database, schema) {
            (Some(database), Some(schema)) => {
                Ok(SchemaObjectIdentifier::new(database, schema, name))
            }
            _ => Err(ProviderError::new(
                "Image repository needs a database and a schema (attribute or provider default)",
            )),
        }
    }

    fn image_repositories_request(
        &self,
        attributes: &HashMap<String, Value>,
    ) -> ProviderResult<ShowImageRepositoryRequest> {
        let mut request = ShowImageRepositoryRequest::new();
        if let Some(like) = get_string(attributes, "like")? {
            request = request.with_like(Like::new(like));
        }

        let database = self.scope(attributes, "database", &self.config.default_database)?;
        let schema = get_string(attributes, "schema")?;
        request = match (database, schema) {
            (Some(database), Some(schema)) => {
                request.with_in(In::schema(DatabaseObjectIdentifier::new(database, schema)))
            }
            (None, Some(_)) => {
                return Err(ProviderError::new(
                    "Filtering by schema requires a database",
                ));
            }
            (Some(database), None) if attributes.contains_key("database") => {
                request.with_in(In::database(AccountObjectIdentifier::new(database)))
            }
            _ => request,
        };
        Ok(request)
    }

    /// Attribute value, falling back to a provider default
    fn scope<'a>(
        &self,
        attributes: &'a HashMap<String, Value>,
        key: &str,
        default: &'a Option<String>,
    ) -> ProviderResult<Option<&'a str>> {
        Ok(get_string(attributes, key)?.or(default.as_deref()))
    }
}

// =============================================================================
// Identifier Helpers
// =============================================================================

fn account_id(identifier: &str) -> ProviderResult<AccountObjectIdentifier> {
    match decode_id(identifier) {
        Ok(DecodedIdentifier::Account(id)) => Ok(id),
        Ok(_) => Err(ProviderError::new(format!(
            "Identifier '{identifier}' is not an account-level object"
        ))),
        Err(e) => Err(ProviderError::new("Invalid identifier").with_cause(e)),
    }
}

fn schema_id(identifier: &str) -> ProviderResult<SchemaObjectIdentifier> {
    match decode_id(identifier) {
        Ok(DecodedIdentifier::Schema(id)) => Ok(id),
        Ok(_) => Err(ProviderError::new(format!(
            "Identifier '{identifier}' is not a schema-level object"
        ))),
        Err(e) => Err(ProviderError::new("Invalid identifier").with_cause(e)),
    }
}

// =============================================================================
// Attribute Mapping
// =============================================================================

fn compute_pool_attributes(pool: &ComputePool) -> HashMap<String, Value> {
    let mut attributes = HashMap::from([
        ("name".to_string(), Value::from(pool.name.as_str())),
        ("min_nodes".to_string(), Value::Int(pool.min_nodes)),
        ("max_nodes".to_string(), Value::Int(pool.max_nodes)),
        (
            "instance_family".to_string(),
            Value::from(pool.instance_family.as_str()),
        ),
        ("auto_resume".to_string(), Value::Bool(pool.auto_resume)),
        (
            "auto_suspend_secs".to_string(),
            Value::Int(pool.auto_suspend_secs),
        ),
        ("state".to_string(), Value::from(pool.state.as_str())),
        ("owner".to_string(), Value::from(pool.owner.as_str())),
        (
            "created_on".to_string(),
            Value::String(format_timestamp(&pool.created_on)),
        ),
    ]);
    if !pool.comment.is_empty() {
        attributes.insert("comment".to_string(), Value::from(pool.comment.as_str()));
    }
    attributes
}

fn image_repository_attributes(repo: &ImageRepository) -> HashMap<String, Value> {
    HashMap::from([
        ("name".to_string(), Value::from(repo.name.as_str())),
        ("database".to_string(), Value::from(repo.database_name.as_str())),
        ("schema".to_string(), Value::from(repo.schema_name.as_str())),
        (
            "repository_url".to_string(),
            Value::from(repo.repository_url.as_str()),
        ),
        ("owner".to_string(), Value::from(repo.owner.as_str())),
        ("comment".to_string(), Value::from(repo.comment.as_str())),
        (
            "created_on".to_string(),
            Value::String(format_timestamp(&repo.created_on)),
        ),
    ])
}

fn compute_pool_summary(pool: &ComputePool) -> Value {
    Value::Map(HashMap::from([
        ("name".to_string(), Value::from(pool.name.as_str())),
        ("state".to_string(), Value::from(pool.state.as_str())),
        (
            "instance_family".to_string(),
            Value::from(pool.instance_family.as_str()),
        ),
        ("comment".to_string(), Value::from(pool.comment.as_str())),
    ]))
}

fn image_repository_summary(repo: &ImageRepository) -> Value {
    Value::Map(HashMap::from([
        ("name".to_string(), Value::from(repo.name.as_str())),
        (
            "database_name".to_string(),
            Value::from(repo.database_name.as_str()),
        ),
        (
            "schema_name".to_string(),
            Value::from(repo.schema_name.as_str()),
        ),
        (
            "repository_url".to_string(),
            Value::from(repo.repository_url.as_str()),
        ),
        ("owner".to_string(), Value::from(repo.owner.as_str())),
        ("comment".to_string(), Value::from(repo.comment.as_str())),
    ]))
}

fn compute_pool_create_request(
    attributes: &HashMap<String, Value>,
) -> ProviderResult<CreateComputePoolRequest> {
    let mut request = CreateComputePoolRequest::new(
        AccountObjectIdentifier::new(require_string(attributes, "name")?),
        require_int(attributes, "min_nodes")?,
        require_int(attributes, "max_nodes")?,
        require_string(attributes, "instance_family")?,
    );
    if let Some(auto_resume) = get_bool(attributes, "auto_resume")? {
        request = request.with_auto_resume(auto_resume);
    }
    if let Some(initially_suspended) = get_bool(attributes, "initially_suspended")? {
        request = request.with_initially_suspended(initially_suspended);
    }
    if let Some(secs) = get_int(attributes, "auto_suspend_secs")? {
        request = request.with_auto_suspend_secs(secs);
    }
    if let Some(comment) = get_string(attributes, "comment")? {
        request = request.with_comment(comment);
    }
    Ok(request)
}

fn compute_pools_request(
    attributes: &HashMap<String, Value>,
) -> ProviderResult<ShowComputePoolRequest> {
    let mut request = ShowComputePoolRequest::new();
    if let Some(like) = get_string(attributes, "like")? {
        request = request.with_like(Like::new(like));
    }
    if let Some(prefix) = get_string(attributes, "starts_with")? {
        request = request.with_starts_with(prefix);
    }
    if let Some(limit) = get_int(attributes, "limit")? {
        request = request.with_limit(LimitFrom::new(limit));
    }
    Ok(request)
}

/// SET and UNSET blocks turning `from` into `to`
///
/// An attribute dropped from the desired state is unset only when the
/// current value differs from its default (or, lacking one, is non-empty).
fn compute_pool_changes(
    schema: &ResourceSchema,
    from: &State,
    to: &Resource,
) -> ProviderResult<(Option<ComputePoolSet>, Option<ComputePoolUnset>)> {
    let changed = |key: &str| {
        to.attributes
            .get(key)
            .filter(|v| from.attributes.get(key) != Some(*v))
            .is_some()
    };

    let mut set = ComputePoolSet::new();
    if changed("min_nodes") {
        set = set.with_min_nodes(require_int(&to.attributes, "min_nodes")?);
    }
    if changed("max_nodes") {
        set = set.with_max_nodes(require_int(&to.attributes, "max_nodes")?);
    }
    if changed("auto_resume") {
        set = set.with_auto_resume(get_bool(&to.attributes, "auto_resume")?.unwrap_or(true));
    }
    if changed("auto_suspend_secs") {
        set = set.with_auto_suspend_secs(require_int(&to.attributes, "auto_suspend_secs")?);
    }
    if changed("comment") {
        set = set.with_comment(require_string(&to.attributes, "comment")?);
    }

    let mut unset = ComputePoolUnset::new();
    for key in UNSETTABLE {
        if to.attributes.contains_key(*key) {
            continue;
        }
        let current = from.attributes.get(*key);
        let default = schema.attributes.get(*key).and_then(|a| a.default.as_ref());
        let customized = match (current, default) {
            (None, _) => false,
            (Some(v), Some(d)) => v != d,
            (Some(Value::String(s)), None) => !s.is_empty(),
            (Some(_), None) => true,
        };
        if customized {
            unset = match *key {
                "auto_suspend_secs" => unset.with_auto_suspend_secs(true),
                "auto_resume" => unset.with_auto_resume(true),
                _ => unset.with_comment(true),
            };
        }
    }

    let set = (set != ComputePoolSet::default()).then_some(set);
    let unset = (unset != ComputePoolUnset::default()).then_some(unset);
    Ok((set, unset))
}

// =============================================================================
// Validation and Errors
// =============================================================================

fn schema_for(id: &ResourceId) -> ProviderResult<ResourceSchema> {
    resource_type(&id.resource_type)
        .map(|t| t.schema())
        .ok_or_else(|| unsupported(&id.resource_type, id))
}

fn validate_attributes(
    schema: &ResourceSchema,
    attributes: &HashMap<String, Value>,
    id: &ResourceId,
) -> ProviderResult<()> {
    schema.validate(attributes).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        ProviderError::new(format!("Invalid attributes: {}", messages.join("; ")))
            .for_resource(id.clone())
    })
}

fn check_force_new(schema: &ResourceSchema, from: &State, to: &Resource) -> ProviderResult<()> {
    for name in schema.force_new_attributes() {
        if let (Some(old), Some(new)) = (from.attributes.get(name), to.attributes.get(name))
            && old != new
        {
            return Err(ProviderError::new(format!(
                "Attribute '{name}' cannot be changed in place, the resource must be replaced"
            ))
            .for_resource(to.id.clone()));
        }
    }
    Ok(())
}

fn unsupported(resource_type: &str, id: &ResourceId) -> ProviderError {
    ProviderError::new(format!("Unsupported resource type: {resource_type}"))
        .for_resource(id.clone())
}

fn sdk_error(action: &str, id: &ResourceId, e: SdkError) -> ProviderError {
    ProviderError::new(format!("Failed to {action} {}: {e}", id.resource_type))
        .with_cause(e)
        .for_resource(id.clone())
}
