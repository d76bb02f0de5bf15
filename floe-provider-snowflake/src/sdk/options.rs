//! Options descriptor tables
//!
//! Every statement is described by an options struct plus a static table
//! of [`Field`] descriptors. The table fixes clause order, the SQL text of
//! each clause and how its value is quoted; one generic renderer and one
//! generic validator walk it. Nested blocks (`SET`, `UNSET`, `LIKE`, ...)
//! are options structs themselves and are reached through [`Clauses`].

use super::identifier::ObjectIdentifier;
use super::validation::OptionsError;

/// How a value is written into SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// Emitted verbatim
    NoQuotes,
    /// Wrapped in `'...'` with embedded quotes doubled
    SingleQuotes,
    /// Comma-joined and wrapped in parentheses
    List,
}

/// Rendering role of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Fixed text, always emitted
    Static(&'static str),
    /// The statement's target identifier
    Identifier,
    /// Phrase emitted when the flag is set to true, or followed by an
    /// identifier when the value is one (`IN DATABASE "DB"`)
    Keyword(&'static str),
    /// `KEYWORD = value`, or `KEYWORD value` when `equals` is false
    Parameter {
        keyword: &'static str,
        quoting: Quoting,
        equals: bool,
    },
    /// The bare value
    Value(Quoting),
    /// Nested options struct, prefixed by its keyword
    Block(&'static str),
}

/// Current value of a field, borrowed from the options struct
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    Unset,
    Flag(bool),
    Ident(&'a dyn ObjectIdentifier),
    Int(i64),
    Bool(bool),
    Text(&'a str),
    List(&'a [String]),
    Block(&'a dyn Clauses),
}

impl<'a> Arg<'a> {
    pub fn flag(value: Option<bool>) -> Self {
        value.map_or(Arg::Unset, Arg::Flag)
    }

    pub fn int(value: i64) -> Self {
        Arg::Int(value)
    }

    pub fn opt_int(value: Option<i64>) -> Self {
        value.map_or(Arg::Unset, Arg::Int)
    }

    pub fn opt_bool(value: Option<bool>) -> Self {
        value.map_or(Arg::Unset, Arg::Bool)
    }

    pub fn text(value: &'a str) -> Self {
        Arg::Text(value)
    }

    pub fn opt_text(value: Option<&'a String>) -> Self {
        value.map_or(Arg::Unset, |s| Arg::Text(s))
    }

    pub fn list(values: &'a [String]) -> Self {
        Arg::List(values)
    }

    pub fn ident<I: ObjectIdentifier>(id: &'a I) -> Self {
        Arg::Ident(id)
    }

    pub fn opt_ident<I: ObjectIdentifier>(id: Option<&'a I>) -> Self {
        id.map_or(Arg::Unset, |id| Arg::Ident(id))
    }

    pub fn block<B: QueryStruct>(block: Option<&'a B>) -> Self {
        block.map_or(Arg::Unset, |b| Arg::Block(b))
    }

    /// Whether the underlying optional value was provided at all
    pub fn is_present(&self) -> bool {
        !matches!(self, Arg::Unset)
    }

    /// Zero value of its type (used for required fields)
    pub fn is_zero(&self) -> bool {
        match self {
            Arg::Unset => true,
            Arg::Int(i) => *i == 0,
            Arg::Text(s) => s.is_empty(),
            Arg::List(items) => items.is_empty(),
            Arg::Ident(id) => id.name().is_empty(),
            Arg::Flag(_) | Arg::Bool(_) | Arg::Block(_) => false,
        }
    }
}

impl std::fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Unset => write!(f, "Unset"),
            Arg::Flag(b) => write!(f, "Flag({b})"),
            Arg::Ident(id) => write!(f, "Ident({})", id.fully_qualified_name()),
            Arg::Int(i) => write!(f, "Int({i})"),
            Arg::Bool(b) => write!(f, "Bool({b})"),
            Arg::Text(s) => write!(f, "Text({s:?})"),
            Arg::List(items) => write!(f, "List({items:?})"),
            Arg::Block(b) => write!(f, "Block({})", b.block_name()),
        }
    }
}

/// Descriptor of one field of an options struct
pub struct Field<T> {
    /// Field name as reported in validation errors (e.g., "MinNodes")
    pub name: &'static str,
    pub kind: FieldKind,
    /// Must hold a non-zero value
    pub required: bool,
    get: Option<fn(&T) -> Arg<'_>>,
}

impl<T> Field<T> {
    pub const fn statik(sql: &'static str) -> Self {
        Self {
            name: sql,
            kind: FieldKind::Static(sql),
            required: false,
            get: None,
        }
    }

    pub const fn identifier(name: &'static str, get: fn(&T) -> Arg<'_>) -> Self {
        Self {
            name,
            kind: FieldKind::Identifier,
            required: false,
            get: Some(get),
        }
    }

    pub const fn keyword(name: &'static str, sql: &'static str, get: fn(&T) -> Arg<'_>) -> Self {
        Self {
            name,
            kind: FieldKind::Keyword(sql),
            required: false,
            get: Some(get),
        }
    }

    pub const fn parameter(
        name: &'static str,
        keyword: &'static str,
        quoting: Quoting,
        get: fn(&T) -> Arg<'_>,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Parameter {
                keyword,
                quoting,
                equals: true,
            },
            required: false,
            get: Some(get),
        }
    }

    /// Parameter written as `KEYWORD value`
    pub const fn clause(
        name: &'static str,
        keyword: &'static str,
        quoting: Quoting,
        get: fn(&T) -> Arg<'_>,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Parameter {
                keyword,
                quoting,
                equals: false,
            },
            required: false,
            get: Some(get),
        }
    }

    pub const fn value(name: &'static str, quoting: Quoting, get: fn(&T) -> Arg<'_>) -> Self {
        Self {
            name,
            kind: FieldKind::Value(quoting),
            required: false,
            get: Some(get),
        }
    }

    pub const fn block(name: &'static str, keyword: &'static str, get: fn(&T) -> Arg<'_>) -> Self {
        Self {
            name,
            kind: FieldKind::Block(keyword),
            required: false,
            get: Some(get),
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value of this field in `opts`
    pub fn arg<'a>(&self, opts: &'a T) -> Arg<'a> {
        match self.get {
            Some(get) => get(opts),
            None => Arg::Unset,
        }
    }
}

/// Presence constraint across named fields of one struct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    ExactlyOneOf(&'static [&'static str]),
    AtLeastOneOf(&'static [&'static str]),
}

/// An options struct with a static descriptor table
pub trait QueryStruct: Send + Sync + Sized + 'static {
    /// Owner name used in validation errors
    const NAME: &'static str;

    /// Fields in clause order
    fn fields() -> &'static [Field<Self>];

    /// Presence constraints, checked in declaration order
    fn constraints() -> &'static [Constraint] {
        &[]
    }

    /// Look up a field by name
    fn field(name: &str) -> Option<&'static Field<Self>> {
        Self::fields().iter().find(|f| f.name == name)
    }

    /// Rendered target identifier, if the statement has one
    fn target(&self) -> Option<String> {
        Self::fields()
            .iter()
            .filter(|f| f.kind == FieldKind::Identifier)
            .find_map(|f| match f.arg(self) {
                Arg::Ident(id) => Some(id.fully_qualified_name()),
                _ => None,
            })
    }
}

/// Object-safe view of an options struct, used for nested blocks
pub trait Clauses: Send + Sync {
    fn block_name(&self) -> &'static str;

    /// Append this struct's clauses to `out`
    fn write_clauses(&self, out: &mut Vec<String>);

    /// Append this struct's violations to `errors`, reported under `owner`
    fn collect_errors(&self, owner: &str, errors: &mut Vec<OptionsError>);
}

impl<T: QueryStruct> Clauses for T {
    fn block_name(&self) -> &'static str {
        T::NAME
    }

    fn write_clauses(&self, out: &mut Vec<String>) {
        super::render::write_clauses(self, out);
    }

    fn collect_errors(&self, owner: &str, errors: &mut Vec<OptionsError>) {
        super::validation::collect_errors(self, owner, errors);
    }
}
