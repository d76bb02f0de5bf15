//! Compute pools
//!
//! Account-level objects:
//!
//! ```text
//! CREATE COMPUTE POOL [IF NOT EXISTS] <name> MIN_NODES = <n> MAX_NODES = <n>
//!     INSTANCE_FAMILY = <family> [AUTO_RESUME = <bool>] [INITIALLY_SUSPENDED = <bool>]
//!     [AUTO_SUSPEND_SECS = <n>] [COMMENT = '<text>']
//! ALTER COMPUTE POOL [IF EXISTS] <name> { SUSPEND | RESUME | STOP ALL | SET ... | UNSET ... }
//! DROP COMPUTE POOL [IF EXISTS] <name>
//! SHOW COMPUTE POOLS [LIKE '<pattern>'] [STARTS WITH '<prefix>'] [LIMIT <n> [FROM '<name>']]
//! DESCRIBE COMPUTE POOL <name>
//! ```

use chrono::{DateTime, Utc};
use log::info;

use super::client::Client;
use super::common::{Like, LimitFrom};
use super::error::SdkResult;
use super::identifier::{AccountObjectIdentifier, ObjectIdentifier};
use super::options::{Arg, Constraint, Field, QueryStruct, Quoting};
use super::rows::{FromRow, Row, convert_rows, find_one};

const KIND: &str = "compute pool";

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateComputePoolOptions {
    pub if_not_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub min_nodes: i64,
    pub max_nodes: i64,
    pub instance_family: String,
    pub auto_resume: Option<bool>,
    pub initially_suspended: Option<bool>,
    pub auto_suspend_secs: Option<i64>,
    pub comment: Option<String>,
}

static CREATE_FIELDS: &[Field<CreateComputePoolOptions>] = &[
    Field::statik("CREATE"),
    Field::statik("COMPUTE POOL"),
    Field::keyword("IfNotExists", "IF NOT EXISTS", |o| Arg::flag(o.if_not_exists)),
    Field::identifier("name", |o| Arg::ident(&o.name)),
    Field::parameter(
        "MinNodes",
        "MIN_NODES",
        Quoting::NoQuotes,
        |o: &CreateComputePoolOptions| Arg::int(o.min_nodes),
    )
    .required(),
    Field::parameter(
        "MaxNodes",
        "MAX_NODES",
        Quoting::NoQuotes,
        |o: &CreateComputePoolOptions| Arg::int(o.max_nodes),
    )
    .required(),
    Field::parameter(
        "InstanceFamily",
        "INSTANCE_FAMILY",
        Quoting::NoQuotes,
        |o: &CreateComputePoolOptions| Arg::text(&o.instance_family),
    )
    .required(),
    Field::parameter("AutoResume", "AUTO_RESUME", Quoting::NoQuotes, |o| {
        Arg::opt_bool(o.auto_resume)
    }),
    Field::parameter(
        "InitiallySuspended",
        "INITIALLY_SUSPENDED",
        Quoting::NoQuotes,
        |o| Arg::opt_bool(o.initially_suspended),
    ),
    Field::parameter("AutoSuspendSecs", "AUTO_SUSPEND_SECS", Quoting::NoQuotes, |o| {
        Arg::opt_int(o.auto_suspend_secs)
    }),
    Field::parameter("Comment", "COMMENT", Quoting::SingleQuotes, |o| {
        Arg::opt_text(o.comment.as_ref())
    }),
];

impl QueryStruct for CreateComputePoolOptions {
    const NAME: &'static str = "CreateComputePoolOptions";

    fn fields() -> &'static [Field<Self>] {
        CREATE_FIELDS
    }
}

/// Properties changed by `ALTER COMPUTE POOL ... SET`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputePoolSet {
    pub min_nodes: Option<i64>,
    pub max_nodes: Option<i64>,
    pub auto_resume: Option<bool>,
    pub auto_suspend_secs: Option<i64>,
    pub comment: Option<String>,
}

impl ComputePoolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_nodes(mut self, min_nodes: i64) -> Self {
        self.min_nodes = Some(min_nodes);
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: i64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_auto_resume(mut self, auto_resume: bool) -> Self {
        self.auto_resume = Some(auto_resume);
        self
    }

    pub fn with_auto_suspend_secs(mut self, secs: i64) -> Self {
        self.auto_suspend_secs = Some(secs);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

static SET_FIELDS: &[Field<ComputePoolSet>] = &[
    Field::parameter("MinNodes", "MIN_NODES", Quoting::NoQuotes, |o| {
        Arg::opt_int(o.min_nodes)
    }),
    Field::parameter("MaxNodes", "MAX_NODES", Quoting::NoQuotes, |o| {
        Arg::opt_int(o.max_nodes)
    }),
    Field::parameter("AutoResume", "AUTO_RESUME", Quoting::NoQuotes, |o| {
        Arg::opt_bool(o.auto_resume)
    }),
    Field::parameter("AutoSuspendSecs", "AUTO_SUSPEND_SECS", Quoting::NoQuotes, |o| {
        Arg::opt_int(o.auto_suspend_secs)
    }),
    Field::parameter("Comment", "COMMENT", Quoting::SingleQuotes, |o| {
        Arg::opt_text(o.comment.as_ref())
    }),
];

impl QueryStruct for ComputePoolSet {
    const NAME: &'static str = "ComputePoolSet";

    fn fields() -> &'static [Field<Self>] {
        SET_FIELDS
    }

    fn constraints() -> &'static [Constraint] {
        &[Constraint::AtLeastOneOf(&[
            "MinNodes",
            "MaxNodes",
            "AutoResume",
            "AutoSuspendSecs",
            "Comment",
        ])]
    }
}

/// Properties reset by `ALTER COMPUTE POOL ... UNSET`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputePoolUnset {
    pub auto_suspend_secs: Option<bool>,
    pub auto_resume: Option<bool>,
    pub comment: Option<bool>,
}

impl ComputePoolUnset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_suspend_secs(mut self, unset: bool) -> Self {
        self.auto_suspend_secs = Some(unset);
        self
    }

    pub fn with_auto_resume(mut self, unset: bool) -> Self {
        self.auto_resume = Some(unset);
        self
    }

    pub fn with_comment(mut self, unset: bool) -> Self {
        self.comment = Some(unset);
        self
    }
}

static UNSET_FIELDS: &[Field<ComputePoolUnset>] = &[
    Field::keyword("AutoSuspendSecs", "AUTO_SUSPEND_SECS", |o| {
        Arg::flag(o.auto_suspend_secs)
    }),
    Field::keyword("AutoResume", "AUTO_RESUME", |o| Arg::flag(o.auto_resume)),
    Field::keyword("Comment", "COMMENT", |o| Arg::flag(o.comment)),
];

impl QueryStruct for ComputePoolUnset {
    const NAME: &'static str = "ComputePoolUnset";

    fn fields() -> &'static [Field<Self>] {
        UNSET_FIELDS
    }

    fn constraints() -> &'static [Constraint] {
        &[Constraint::AtLeastOneOf(&[
            "AutoSuspendSecs",
            "AutoResume",
            "Comment",
        ])]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterComputePoolOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub suspend: Option<bool>,
    pub resume: Option<bool>,
    pub stop_all: Option<bool>,
    pub set: Option<ComputePoolSet>,
    pub unset: Option<ComputePoolUnset>,
}

static ALTER_FIELDS: &[Field<AlterComputePoolOptions>] = &[
    Field::statik("ALTER"),
    Field::statik("COMPUTE POOL"),
    Field::keyword("IfExists", "IF EXISTS", |o| Arg::flag(o.if_exists)),
    Field::identifier("name", |o| Arg::ident(&o.name)),
    Field::keyword("Suspend", "SUSPEND", |o| Arg::flag(o.suspend)),
    Field::keyword("Resume", "RESUME", |o| Arg::flag(o.resume)),
    Field::keyword("StopAll", "STOP ALL", |o| Arg::flag(o.stop_all)),
    Field::block("Set", "SET", |o| Arg::block(o.set.as_ref())),
    Field::block("Unset", "UNSET", |o| Arg::block(o.unset.as_ref())),
];

impl QueryStruct for AlterComputePoolOptions {
    const NAME: &'static str = "AlterComputePoolOptions";

    fn fields() -> &'static [Field<Self>] {
        ALTER_FIELDS
    }

    fn constraints() -> &'static [Constraint] {
        &[Constraint::ExactlyOneOf(&[
            "Suspend", "Resume", "StopAll", "Set", "Unset",
        ])]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropComputePoolOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
}

static DROP_FIELDS: &[Field<DropComputePoolOptions>] = &[
    Field::statik("DROP"),
    Field::statik("COMPUTE POOL"),
    Field::keyword("IfExists", "IF EXISTS", |o| Arg::flag(o.if_exists)),
    Field::identifier("name", |o| Arg::ident(&o.name)),
];

impl QueryStruct for DropComputePoolOptions {
    const NAME: &'static str = "DropComputePoolOptions";

    fn fields() -> &'static [Field<Self>] {
        DROP_FIELDS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowComputePoolOptions {
    pub like: Option<Like>,
    pub starts_with: Option<String>,
    pub limit: Option<LimitFrom>,
}

static SHOW_FIELDS: &[Field<ShowComputePoolOptions>] = &[
    Field::statik("SHOW"),
    Field::statik("COMPUTE POOLS"),
    Field::block("Like", "LIKE", |o| Arg::block(o.like.as_ref())),
    Field::clause("StartsWith", "STARTS WITH", Quoting::SingleQuotes, |o| {
        Arg::opt_text(o.starts_with.as_ref())
    }),
    Field::block("Limit", "LIMIT", |o| Arg::block(o.limit.as_ref())),
];

impl QueryStruct for ShowComputePoolOptions {
    const NAME: &'static str = "ShowComputePoolOptions";

    fn fields() -> &'static [Field<Self>] {
        SHOW_FIELDS
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeComputePoolOptions {
    pub name: AccountObjectIdentifier,
}

static DESCRIBE_FIELDS: &[Field<DescribeComputePoolOptions>] = &[
    Field::statik("DESCRIBE"),
    Field::statik("COMPUTE POOL"),
    Field::identifier("name", |o| Arg::ident(&o.name)),
];

impl QueryStruct for DescribeComputePoolOptions {
    const NAME: &'static str = "DescribeComputePoolOptions";

    fn fields() -> &'static [Field<Self>] {
        DESCRIBE_FIELDS
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateComputePoolRequest {
    name: AccountObjectIdentifier,
    min_nodes: i64,
    max_nodes: i64,
    instance_family: String,
    if_not_exists: Option<bool>,
    auto_resume: Option<bool>,
    initially_suspended: Option<bool>,
    auto_suspend_secs: Option<i64>,
    comment: Option<String>,
}

impl CreateComputePoolRequest {
    pub fn new(
        name: AccountObjectIdentifier,
        min_nodes: i64,
        max_nodes: i64,
        instance_family: impl Into<String>,
    ) -> Self {
        Self {
            name,
            min_nodes,
            max_nodes,
            instance_family: instance_family.into(),
            if_not_exists: None,
            auto_resume: None,
            initially_suspended: None,
            auto_suspend_secs: None,
            comment: None,
        }
    }

    pub fn name(&self) -> &AccountObjectIdentifier {
        &self.name
    }

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = Some(if_not_exists);
        self
    }

    pub fn with_auto_resume(mut self, auto_resume: bool) -> Self {
        self.auto_resume = Some(auto_resume);
        self
    }

    pub fn with_initially_suspended(mut self, initially_suspended: bool) -> Self {
        self.initially_suspended = Some(initially_suspended);
        self
    }

    pub fn with_auto_suspend_secs(mut self, secs: i64) -> Self {
        self.auto_suspend_secs = Some(secs);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl From<CreateComputePoolRequest> for CreateComputePoolOptions {
    fn from(r: CreateComputePoolRequest) -> Self {
        Self {
            if_not_exists: r.if_not_exists,
            name: r.name,
            min_nodes: r.min_nodes,
            max_nodes: r.max_nodes,
            instance_family: r.instance_family,
            auto_resume: r.auto_resume,
            initially_suspended: r.initially_suspended,
            auto_suspend_secs: r.auto_suspend_secs,
            comment: r.comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterComputePoolRequest {
    name: AccountObjectIdentifier,
    if_exists: Option<bool>,
    suspend: Option<bool>,
    resume: Option<bool>,
    stop_all: Option<bool>,
    set: Option<ComputePoolSet>,
    unset: Option<ComputePoolUnset>,
}

impl AlterComputePoolRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: None,
            suspend: None,
            resume: None,
            stop_all: None,
            set: None,
            unset: None,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub fn with_suspend(mut self, suspend: bool) -> Self {
        self.suspend = Some(suspend);
        self
    }

    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = Some(resume);
        self
    }

    pub fn with_stop_all(mut self, stop_all: bool) -> Self {
        self.stop_all = Some(stop_all);
        self
    }

    pub fn with_set(mut self, set: ComputePoolSet) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_unset(mut self, unset: ComputePoolUnset) -> Self {
        self.unset = Some(unset);
        self
    }
}

impl From<AlterComputePoolRequest> for AlterComputePoolOptions {
    fn from(r: AlterComputePoolRequest) -> Self {
        Self {
            if_exists: r.if_exists,
            name: r.name,
            suspend: r.suspend,
            resume: r.resume,
            stop_all: r.stop_all,
            set: r.set,
            unset: r.unset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropComputePoolRequest {
    name: AccountObjectIdentifier,
    if_exists: Option<bool>,
}

impl DropComputePoolRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
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

impl From<DropComputePoolRequest> for DropComputePoolOptions {
    fn from(r: DropComputePoolRequest) -> Self {
        Self {
            if_exists: r.if_exists,
            name: r.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowComputePoolRequest {
    like: Option<Like>,
    starts_with: Option<String>,
    limit: Option<LimitFrom>,
}

impl ShowComputePoolRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_like(mut self, like: Like) -> Self {
        self.like = Some(like);
        self
    }

    pub fn with_starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.starts_with = Some(prefix.into());
        self
    }

    pub fn with_limit(mut self, limit: LimitFrom) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl From<ShowComputePoolRequest> for ShowComputePoolOptions {
    fn from(r: ShowComputePoolRequest) -> Self {
        Self {
            like: r.like,
            starts_with: r.starts_with,
            limit: r.limit,
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Row of `SHOW COMPUTE POOLS` / `DESCRIBE COMPUTE POOL`
#[derive(Debug, Clone, PartialEq)]
pub struct ComputePoolRow {
    pub name: String,
    pub state: String,
    pub min_nodes: i64,
    pub max_nodes: i64,
    pub instance_family: String,
    pub num_services: i64,
    pub num_jobs: i64,
    pub auto_suspend_secs: i64,
    pub auto_resume: bool,
    pub active_nodes: i64,
    pub idle_nodes: i64,
    pub created_on: DateTime<Utc>,
    pub resumed_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
    pub owner: String,
    pub comment: Option<String>,
}

impl FromRow for ComputePoolRow {
    fn from_row(row: &Row) -> SdkResult<Self> {
        Ok(Self {
            name: row.string("name")?,
            state: row.string("state")?,
            min_nodes: row.int("min_nodes")?,
            max_nodes: row.int("max_nodes")?,
            instance_family: row.string("instance_family")?,
            num_services: row.int("num_services")?,
            num_jobs: row.int("num_jobs")?,
            auto_suspend_secs: row.int("auto_suspend_secs")?,
            auto_resume: row.bool("auto_resume")?,
            active_nodes: row.int("active_nodes")?,
            idle_nodes: row.int("idle_nodes")?,
            created_on: row.timestamp("created_on")?,
            resumed_on: row.opt_timestamp("resumed_on")?,
            updated_on: row.opt_timestamp("updated_on")?,
            owner: row.string("owner")?,
            comment: row.opt_string("comment")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComputePool {
    pub name: String,
    pub state: String,
    pub min_nodes: i64,
    pub max_nodes: i64,
    pub instance_family: String,
    pub num_services: i64,
    pub num_jobs: i64,
    pub auto_suspend_secs: i64,
    pub auto_resume: bool,
    pub active_nodes: i64,
    pub idle_nodes: i64,
    pub created_on: DateTime<Utc>,
    pub resumed_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    pub owner: String,
    pub comment: String,
}

impl From<ComputePoolRow> for ComputePool {
    fn from(r: ComputePoolRow) -> Self {
        Self {
            name: r.name,
            state: r.state,
            min_nodes: r.min_nodes,
            max_nodes: r.max_nodes,
            instance_family: r.instance_family,
            num_services: r.num_services,
            num_jobs: r.num_jobs,
            auto_suspend_secs: r.auto_suspend_secs,
            auto_resume: r.auto_resume,
            active_nodes: r.active_nodes,
            idle_nodes: r.idle_nodes,
            created_on: r.created_on,
            resumed_on: r.resumed_on.unwrap_or_default(),
            updated_on: r.updated_on.unwrap_or_default(),
            owner: r.owner,
            comment: r.comment.unwrap_or_default(),
        }
    }
}

impl ComputePool {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

// =============================================================================
// Operations
// =============================================================================

pub struct ComputePools<'c> {
    client: &'c Client,
}

impl<'c> ComputePools<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: CreateComputePoolRequest) -> SdkResult<()> {
        let opts = CreateComputePoolOptions::from(request);
        info!("Creating compute pool {}", opts.name);
        self.client.validate_and_exec(&opts).await
    }

    pub async fn alter(&self, request: AlterComputePoolRequest) -> SdkResult<()> {
        let opts = AlterComputePoolOptions::from(request);
        info!("Altering compute pool {}", opts.name);
        self.client.validate_and_exec(&opts).await
    }

    pub async fn drop(&self, request: DropComputePoolRequest) -> SdkResult<()> {
        let opts = DropComputePoolOptions::from(request);
        info!("Dropping compute pool {}", opts.name);
        self.client.validate_and_exec(&opts).await
    }

    pub async fn show(&self, request: ShowComputePoolRequest) -> SdkResult<Vec<ComputePool>> {
        let opts = ShowComputePoolOptions::from(request);
        let rows: Vec<ComputePoolRow> = self.client.validate_and_query(&opts).await?;
        Ok(convert_rows(rows))
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> SdkResult<ComputePool> {
        let request = ShowComputePoolRequest::new().with_like(Like::new(id.name()));
        let pools = self.show(request).await?;
        find_one(pools, KIND, id, |pool| pool.name == id.name())
    }

    pub async fn describe(&self, id: &AccountObjectIdentifier) -> SdkResult<ComputePool> {
        let opts = DescribeComputePoolOptions { name: id.clone() };
        let row: ComputePoolRow = self.client.validate_and_query_one(&opts, KIND).await?;
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::sdk::render::render;
    use crate::sdk::testing::{RecordingConnection, compute_pool_row as pool_row};
    use crate::sdk::validation::{OptionsError, validate};

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("POOL")
    }

    fn create_opts() -> CreateComputePoolOptions {
        CreateComputePoolRequest::new(id(), 1, 1, "standard_1").into()
    }

    fn alter_opts() -> AlterComputePoolOptions {
        AlterComputePoolRequest::new(id()).into()
    }

    #[test]
    fn create_minimal() {
        let opts = create_opts();
        assert!(validate(Some(&opts)).is_ok());
        assert_eq!(
            render(&opts),
            r#"CREATE COMPUTE POOL "POOL" MIN_NODES = 1 MAX_NODES = 1 INSTANCE_FAMILY = standard_1"#
        );
    }

    #[test]
    fn create_all_options() {
        let opts: CreateComputePoolOptions =
            CreateComputePoolRequest::new(id(), 1, 3, "standard_1")
                .with_if_not_exists(true)
                .with_auto_resume(true)
                .with_initially_suspended(false)
                .with_auto_suspend_secs(600)
                .with_comment("it's a pool")
                .into();
        assert_eq!(
            render(&opts),
            r#"CREATE COMPUTE POOL IF NOT EXISTS "POOL" MIN_NODES = 1 MAX_NODES = 3 INSTANCE_FAMILY = standard_1 AUTO_RESUME = true INITIALLY_SUSPENDED = false AUTO_SUSPEND_SECS = 600 COMMENT = 'it''s a pool'"#
        );
    }

    #[test]
    fn create_rejects_invalid_identifier_and_missing_family() {
        let mut opts = create_opts();
        opts.name = AccountObjectIdentifier::new("");
        opts.instance_family = String::new();
        let err = validate(Some(&opts)).unwrap_err();
        assert_eq!(
            err.errors(),
            &[
                OptionsError::InvalidIdentifier { field: "name" },
                OptionsError::MissingRequired {
                    owner: "CreateComputePoolOptions".to_string(),
                    field: "InstanceFamily"
                },
            ]
        );
    }

    #[test]
    fn nil_options() {
        let err = validate::<CreateComputePoolOptions>(None).unwrap_err();
        assert_eq!(err.errors(), &[OptionsError::NilOptions]);
    }

    #[test]
    fn alter_requires_exactly_one_action() {
        let expected = OptionsError::exactly_one_of(
            "AlterComputePoolOptions",
            &["Suspend", "Resume", "StopAll", "Set", "Unset"],
        );

        let err = validate(Some(&alter_opts())).unwrap_err();
        assert_eq!(err.errors(), &[expected.clone()]);

        let mut opts = alter_opts();
        opts.suspend = Some(true);
        opts.resume = Some(true);
        let err = validate(Some(&opts)).unwrap_err();
        assert_eq!(err.errors(), &[expected]);

        let mut opts = alter_opts();
        opts.suspend = Some(true);
        assert!(validate(Some(&opts)).is_ok());
    }

    #[test]
    fn alter_set_requires_a_property() {
        let mut opts = alter_opts();
        opts.set = Some(ComputePoolSet::new());
        let err = validate(Some(&opts)).unwrap_err();
        assert_eq!(
            err.errors(),
            &[OptionsError::at_least_one_of(
                "AlterComputePoolOptions.Set",
                &[
                    "MinNodes",
                    "MaxNodes",
                    "AutoResume",
                    "AutoSuspendSecs",
                    "Comment"
                ]
            )]
        );

        opts.set = Some(ComputePoolSet::new().with_max_nodes(4));
        assert!(validate(Some(&opts)).is_ok());
    }

    #[test]
    fn alter_unset_requires_a_property() {
        let mut opts = alter_opts();
        opts.unset = Some(ComputePoolUnset::new());
        let err = validate(Some(&opts)).unwrap_err();
        assert_eq!(
            err.errors(),
            &[OptionsError::at_least_one_of(
                "AlterComputePoolOptions.Unset",
                &["AutoSuspendSecs", "AutoResume", "Comment"]
            )]
        );
    }

    #[test]
    fn alter_renders_each_action() {
        let render_with = |request: AlterComputePoolRequest| {
            render(&AlterComputePoolOptions::from(request))
        };

        assert_eq!(
            render_with(AlterComputePoolRequest::new(id()).with_if_exists(true).with_suspend(true)),
            r#"ALTER COMPUTE POOL IF EXISTS "POOL" SUSPEND"#
        );
        assert_eq!(
            render_with(AlterComputePoolRequest::new(id()).with_resume(true)),
            r#"ALTER COMPUTE POOL "POOL" RESUME"#
        );
        assert_eq!(
            render_with(AlterComputePoolRequest::new(id()).with_stop_all(true)),
            r#"ALTER COMPUTE POOL "POOL" STOP ALL"#
        );
        assert_eq!(
            render_with(
                AlterComputePoolRequest::new(id()).with_set(
                    ComputePoolSet::new()
                        .with_min_nodes(2)
                        .with_auto_resume(false)
                        .with_comment("c")
                )
            ),
            r#"ALTER COMPUTE POOL "POOL" SET MIN_NODES = 2 AUTO_RESUME = false COMMENT = 'c'"#
        );
        assert_eq!(
            render_with(
                AlterComputePoolRequest::new(id()).with_unset(
                    ComputePoolUnset::new()
                        .with_auto_suspend_secs(true)
                        .with_comment(true)
                )
            ),
            r#"ALTER COMPUTE POOL "POOL" UNSET AUTO_SUSPEND_SECS COMMENT"#
        );
    }

    #[test]
    fn drop_and_describe() {
        let drop: DropComputePoolOptions =
            DropComputePoolRequest::new(id()).with_if_exists(true).into();
        assert_eq!(render(&drop), r#"DROP COMPUTE POOL IF EXISTS "POOL""#);

        let describe = DescribeComputePoolOptions { name: id() };
        assert_eq!(render(&describe), r#"DESCRIBE COMPUTE POOL "POOL""#);
    }

    #[test]
    fn show_renders_filters_in_order() {
        assert_eq!(
            render(&ShowComputePoolOptions::default()),
            "SHOW COMPUTE POOLS"
        );
        let opts: ShowComputePoolOptions = ShowComputePoolRequest::new()
            .with_like(Like::new("POOL%"))
            .with_starts_with("PO")
            .with_limit(LimitFrom::new(5).with_from("POOL_A"))
            .into();
        assert_eq!(
            render(&opts),
            "SHOW COMPUTE POOLS LIKE 'POOL%' STARTS WITH 'PO' LIMIT 5 FROM 'POOL_A'"
        );
    }

    #[test]
    fn row_conversion_collapses_nulls() {
        let pool: ComputePool = ComputePoolRow::from_row(&pool_row("POOL"))
            .unwrap()
            .into();
        assert_eq!(pool.comment, "");
        assert_eq!(pool.resumed_on, DateTime::<Utc>::default());
        assert_eq!(pool.max_nodes, 2);

        let row = pool_row("POOL").with("comment", "hello");
        let pool: ComputePool = ComputePoolRow::from_row(&row).unwrap().into();
        assert_eq!(pool.comment, "hello");
    }

    #[tokio::test]
    async fn show_by_id_filters_by_name() {
        let conn = Arc::new(RecordingConnection::new());
        conn.respond(
            "SHOW COMPUTE POOLS",
            vec![pool_row("POOL_2"), pool_row("POOL"), pool_row("POOL")],
        );
        let client = Client::new(conn.clone());

        let pool = client.compute_pools().show_by_id(&id()).await.unwrap();

        assert_eq!(pool.name, "POOL");
        assert_eq!(conn.statements(), vec!["SHOW COMPUTE POOLS LIKE 'POOL'"]);
    }

    #[tokio::test]
    async fn show_by_id_reports_not_found() {
        let conn = Arc::new(RecordingConnection::new());
        let client = Client::new(conn);

        let err = client.compute_pools().show_by_id(&id()).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn describe_returns_single_row() {
        let conn = Arc::new(RecordingConnection::new());
        conn.respond("DESCRIBE COMPUTE POOL", vec![pool_row("POOL")]);
        let client = Client::new(conn);

        let pool = client.compute_pools().describe(&id()).await.unwrap();

        assert_eq!(pool.instance_family, "STANDARD_1");
        assert!(pool.auto_resume);
    }
}
