//! Object identifiers
//!
//! Qualified object names with a canonical double-quoted rendering and a
//! persisted `|`-delimited form used as the state identifier.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Separator between segments in the persisted identifier form
pub const ID_DELIMITER: &str = "|";

/// A segment is at most 255 characters and carries neither control
/// characters nor the persisted-form delimiter
static OBJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\x00-\x1F\x7F|]{1,255}$").expect("object name pattern"));

/// Check a single name segment against the object-name rules
pub fn is_valid_object_name(segment: &str) -> bool {
    OBJECT_NAME.is_match(segment)
}

/// Wrap a segment in double quotes, doubling embedded quotes
pub fn quote_segment(segment: &str) -> String {
    format!("\"{}\"", segment.replace('"', "\"\""))
}

/// Common contract of every qualified name
pub trait ObjectIdentifier: fmt::Debug + Send + Sync {
    /// Segments from outermost to innermost (the object name comes last)
    fn segments(&self) -> Vec<&str>;

    /// The object name (final segment)
    fn name(&self) -> &str;

    /// True iff the final segment is non-empty and every non-empty
    /// segment is a valid object name
    fn is_valid(&self) -> bool {
        !self.name().is_empty()
            && self
                .segments()
                .into_iter()
                .filter(|s| !s.is_empty())
                .all(is_valid_object_name)
    }

    /// Quoted, dot-joined rendering used in SQL
    fn fully_qualified_name(&self) -> String {
        self.segments()
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(quote_segment)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Structural, case-sensitive equality across identifier kinds
    fn same_as(&self, other: &dyn ObjectIdentifier) -> bool {
        self.segments() == other.segments()
    }

    /// Persisted form, e.g. `DB|SCHEMA|REPO`
    fn encode(&self) -> String {
        self.segments().join(ID_DELIMITER)
    }
}

/// Account-level object (compute pools, databases, warehouses)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountObjectIdentifier {
    name: String,
}

impl AccountObjectIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ObjectIdentifier for AccountObjectIdentifier {
    fn segments(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Object scoped to a database (schemas)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseObjectIdentifier {
    database: String,
    name: String,
}

impl DatabaseObjectIdentifier {
    pub fn new(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            name: name.into(),
        }
    }
}

impl ObjectIdentifier for DatabaseObjectIdentifier {
    fn segments(&self) -> Vec<&str> {
        vec![self.database.as_str(), self.name.as_str()]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Object scoped to a schema (image repositories)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaObjectIdentifier {
    database: String,
    schema: String,
    name: String,
}

impl SchemaObjectIdentifier {
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            name: name.into(),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    /// The schema containing this object
    pub fn schema_id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(&self.database, &self.schema)
    }
}

impl ObjectIdentifier for SchemaObjectIdentifier {
    fn segments(&self) -> Vec<&str> {
        vec![self.database.as_str(), self.schema.as_str(), self.name.as_str()]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.fully_qualified_name())
            }
        })*
    };
}

impl_display!(
    AccountObjectIdentifier,
    DatabaseObjectIdentifier,
    SchemaObjectIdentifier
);

/// Identifier decoded from its persisted form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecodedIdentifier {
    Account(AccountObjectIdentifier),
    Database(DatabaseObjectIdentifier),
    Schema(SchemaObjectIdentifier),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot decode identifier '{input}': expected 1 to 3 '|'-separated parts, got {parts}")]
pub struct ParseIdentifierError {
    pub input: String,
    pub parts: usize,
}

impl FromStr for DecodedIdentifier {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(ID_DELIMITER).collect();
        match parts.as_slice() {
            [name] => Ok(Self::Account(AccountObjectIdentifier::new(*name))),
            [database, name] => Ok(Self::Database(DatabaseObjectIdentifier::new(
                *database, *name,
            ))),
            [database, schema, name] => Ok(Self::Schema(SchemaObjectIdentifier::new(
                *database, *schema, *name,
            ))),
            _ => Err(ParseIdentifierError {
                input: s.to_string(),
                parts: parts.len(),
            }),
        }
    }
}

/// Encode any identifier into its persisted form
pub fn encode_id(id: &dyn ObjectIdentifier) -> String {
    id.encode()
}

/// Decode a persisted identifier
pub fn decode_id(s: &str) -> Result<DecodedIdentifier, ParseIdentifierError> {
    s.parse()
}
