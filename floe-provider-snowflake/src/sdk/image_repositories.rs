//! Image repositories
//!
//! Schema-level objects holding container images. They cannot be altered;
//! only create, drop and show are available.

use chrono::{DateTime, Utc};
use log::info;

use super::client::Client;
use super::common::{In, Like};
use super::error::SdkResult;
use super::identifier::{ObjectIdentifier, SchemaObjectIdentifier};
use super::options::{Arg, Field, QueryStruct};
use super::rows::{FromRow, Row, convert_rows, find_one};

const KIND: &str = "image repository";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateImageRepositoryOptions {
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
}

static CREATE_FIELDS: &[Field<CreateImageRepositoryOptions>] = &[
    Field::statik("CREATE"),
    Field::keyword("OrReplace", "OR REPLACE", |o| Arg::flag(o.or_replace)),
    Field::statik("IMAGE REPOSITORY"),
    Field::keyword("IfNotExists", "IF NOT EXISTS", |o| Arg::flag(o.if_not_exists)),
    Field::identifier("name", |o| Arg::ident(&o.name)),
];

impl QueryStruct for CreateImageRepositoryOptions {
    const NAME: &'static str = "CreateImageRepositoryOptions";

    fn fields() -> &'static [Field<Self>] {
        CREATE_FIELDS
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropImageRepositoryOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
}

static DROP_FIELDS: &[Field<DropImageRepositoryOptions>] = &[
    Field::statik("DROP"),
    Field::statik("IMAGE REPOSITORY"),
    Field::keyword("IfExists", "IF EXISTS", |o| Arg::flag(o.if_exists)),
    Field::identifier("name", |o| Arg::ident(&o.name)),
];

impl QueryStruct for DropImageRepositoryOptions {
    const NAME: &'static str = "DropImageRepositoryOptions";

    fn fields() -> &'static [Field<Self>] {
        DROP_FIELDS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowImageRepositoryOptions {
    pub like: Option<Like>,
    pub in_: Option<In>,
}

static SHOW_FIELDS: &[Field<ShowImageRepositoryOptions>] = &[
    Field::statik("SHOW"),
    Field::statik("IMAGE REPOSITORIES"),
    Field::block("Like", "LIKE", |o| Arg::block(o.like.as_ref())),
    Field::block("In", "IN", |o| Arg::block(o.in_.as_ref())),
];

impl QueryStruct for ShowImageRepositoryOptions {
    const NAME: &'static str = "ShowImageRepositoryOptions";

    fn fields() -> &'static [Field<Self>] {
        SHOW_FIELDS
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateImageRepositoryRequest {
    name: SchemaObjectIdentifier,
    or_replace: Option<bool>,
    if_not_exists: Option<bool>,
}

impl CreateImageRepositoryRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            or_replace: None,
            if_not_exists: None,
        }
    }

    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = Some(or_replace);
        self
    }

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = Some(if_not_exists);
        self
    }
}

impl From<CreateImageRepositoryRequest> for CreateImageRepositoryOptions {
    fn from(r: CreateImageRepositoryRequest) -> Self {
        Self {
            or_replace: r.or_replace,
            if_not_exists: r.if_not_exists,
            name: r.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropImageRepositoryRequest {
    name: SchemaObjectIdentifier,
    if_exists: Option<bool>,
}

impl DropImageRepositoryRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: None,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }
}

impl From<DropImageRepositoryRequest> for DropImageRepositoryOptions {
    fn from(r: DropImageRepositoryRequest) -> Self {
        Self {
            if_exists: r.if_exists,
            name: r.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowImageRepositoryRequest {
    like: Option<Like>,
    in_: Option<In>,
}

impl ShowImageRepositoryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_like(mut self, like: Like) -> Self {
        self.like = Some(like);
        self
    }

    pub fn with_in(mut self, in_: In) -> Self {
        self.in_ = Some(in_);
        self
    }
}

impl From<ShowImageRepositoryRequest> for ShowImageRepositoryOptions {
    fn from(r: ShowImageRepositoryRequest) -> Self {
        Self {
            like: r.like,
            in_: r.in_,
        }
    }
}

/// Row of `SHOW IMAGE REPOSITORIES`
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRepositoryRow {
    pub created_on: DateTime<Utc>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub repository_url: String,
    pub owner: String,
    pub owner_role_type: Option<String>,
    pub comment: Option<String>,
}

impl FromRow for ImageRepositoryRow {
    fn from_row(row: &Row) -> SdkResult<Self> {
        Ok(Self {
            created_on: row.timestamp("created_on")?,
            name: row.string("name")?,
            database_name: row.string("database_name")?,
            schema_name: row.string("schema_name")?,
            repository_url: row.string("repository_url")?,
            owner: row.string("owner")?,
            owner_role_type: row.opt_string("owner_role_type")?,
            comment: row.opt_string("comment")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRepository {
    pub created_on: DateTime<Utc>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub repository_url: String,
    pub owner: String,
    pub owner_role_type: String,
    pub comment: String,
}

impl From<ImageRepositoryRow> for ImageRepository {
    fn from(r: ImageRepositoryRow) -> Self {
        Self {
            created_on: r.created_on,
            name: r.name,
            database_name: r.database_name,
            schema_name: r.schema_name,
            repository_url: r.repository_url,
            owner: r.owner,
            owner_role_type: r.owner_role_type.unwrap_or_default(),
            comment: r.comment.unwrap_or_default(),
        }
    }
}

impl ImageRepository {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

pub struct ImageRepositories<'c> {
    client: &'c Client,
}

impl<'c> ImageRepositories<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: CreateImageRepositoryRequest) -> SdkResult<()> {
        let opts = CreateImageRepositoryOptions::from(request);
        info!("Creating image repository {}", opts.name);
        self.client.validate_and_exec(&opts).await
    }

    pub async fn drop(&self, request: DropImageRepositoryRequest) -> SdkResult<()> {
        let opts = DropImageRepositoryOptions::from(request);
        info!("Dropping image repository {}", opts.name);
        self.client.validate_and_exec(&opts).await
    }

    pub async fn show(
        &self,
        request: ShowImageRepositoryRequest,
    ) -> SdkResult<Vec<ImageRepository>> {
        let opts = ShowImageRepositoryOptions::from(request);
        let rows: Vec<ImageRepositoryRow> = self.client.validate_and_query(&opts).await?;
        Ok(convert_rows(rows))
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> SdkResult<ImageRepository> {
        let request = ShowImageRepositoryRequest::new()
            .with_like(Like::new(id.name()))
            .with_in(In::schema(id.schema_id()));
        let repositories = self.show(request).await?;
        find_one(repositories, KIND, id, |r| {
            r.name == id.name()
                && r.database_name == id.database_name()
                && r.schema_name == id.schema_name()
        })
    }
}
