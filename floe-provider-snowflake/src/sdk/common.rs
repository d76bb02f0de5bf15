//! Clauses shared by several SHOW statements

use super::identifier::{AccountObjectIdentifier, DatabaseObjectIdentifier};
use super::options::{Arg, Constraint, Field, QueryStruct, Quoting};

/// `LIKE '<pattern>'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub pattern: String,
}

impl Like {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

static LIKE_FIELDS: &[Field<Like>] = &[Field::value("Pattern", Quoting::SingleQuotes, |o| {
    Arg::text(&o.pattern)
})];

impl QueryStruct for Like {
    const NAME: &'static str = "Like";

    fn fields() -> &'static [Field<Self>] {
        LIKE_FIELDS
    }
}

/// `LIMIT <rows> [FROM '<name>']`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitFrom {
    pub rows: i64,
    pub from: Option<String>,
}

impl LimitFrom {
    pub fn new(rows: i64) -> Self {
        Self { rows, from: None }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

static LIMIT_FROM_FIELDS: &[Field<LimitFrom>] = &[
    Field::value("Rows", Quoting::NoQuotes, |o: &LimitFrom| Arg::int(o.rows)).required(),
    Field::clause("From", "FROM", Quoting::SingleQuotes, |o| {
        Arg::opt_text(o.from.as_ref())
    }),
];

impl QueryStruct for LimitFrom {
    const NAME: &'static str = "LimitFrom";

    fn fields() -> &'static [Field<Self>] {
        LIMIT_FROM_FIELDS
    }
}

/// `IN ACCOUNT | IN DATABASE <db> | IN SCHEMA <db>.<schema>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct In {
    pub account: Option<bool>,
    pub database: Option<AccountObjectIdentifier>,
    pub schema: Option<DatabaseObjectIdentifier>,
}

impl In {
    pub fn account() -> Self {
        Self {
            account: Some(true),
            ..Self::default()
        }
    }

    pub fn database(database: AccountObjectIdentifier) -> Self {
        Self {
            database: Some(database),
            ..Self::default()
        }
    }

    pub fn schema(schema: DatabaseObjectIdentifier) -> Self {
        Self {
            schema: Some(schema),
            ..Self::default()
        }
    }
}

static IN_FIELDS: &[Field<In>] = &[
    Field::keyword("Account", "ACCOUNT", |o| Arg::flag(o.account)),
    Field::keyword("Database", "DATABASE", |o| {
        Arg::opt_ident(o.database.as_ref())
    }),
    Field::keyword("Schema", "SCHEMA", |o| Arg::opt_ident(o.schema.as_ref())),
];

impl QueryStruct for In {
    const NAME: &'static str = "In";

    fn fields() -> &'static [Field<Self>] {
        IN_FIELDS
    }

    fn constraints() -> &'static [Constraint] {
        &[Constraint::ExactlyOneOf(&["Account", "Database", "Schema"])]
    }
}
