//! Options validation
//!
//! Walks an options struct through its descriptor table and collects every
//! violation instead of stopping at the first one.

use std::fmt;

use super::options::{Arg, Constraint, QueryStruct};

/// A single violation found in an options struct
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("options cannot be nil")]
    NilOptions,

    #[error("invalid object identifier for field {field}")]
    InvalidIdentifier { field: &'static str },

    #[error("{owner}.{field} is required")]
    MissingRequired { owner: String, field: &'static str },

    #[error("exactly one of {owner} fields [{}] must be set", fields.join(" "))]
    ExactlyOneOf {
        owner: String,
        fields: Vec<&'static str>,
    },

    #[error("at least one of {owner} fields [{}] must be set", fields.join(" "))]
    AtLeastOneOf {
        owner: String,
        fields: Vec<&'static str>,
    },
}

impl OptionsError {
    pub fn exactly_one_of(owner: impl Into<String>, fields: &[&'static str]) -> Self {
        Self::ExactlyOneOf {
            owner: owner.into(),
            fields: fields.to_vec(),
        }
    }

    pub fn at_least_one_of(owner: impl Into<String>, fields: &[&'static str]) -> Self {
        Self::AtLeastOneOf {
            owner: owner.into(),
            fields: fields.to_vec(),
        }
    }
}

/// Every violation of one options value, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<OptionsError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[OptionsError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate an options value; `None` stands for options never constructed
pub fn validate<T: QueryStruct>(opts: Option<&T>) -> Result<(), ValidationErrors> {
    let Some(opts) = opts else {
        return Err(ValidationErrors(vec![OptionsError::NilOptions]));
    };

    let mut errors = Vec::new();
    collect_errors(opts, T::NAME, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

pub(crate) fn collect_errors<T: QueryStruct>(
    opts: &T,
    owner: &str,
    errors: &mut Vec<OptionsError>,
) {
    for field in T::fields() {
        let arg = field.arg(opts);
        if let Arg::Ident(id) = arg
            && !id.is_valid()
        {
            errors.push(OptionsError::InvalidIdentifier { field: field.name });
        } else if field.required && arg.is_zero() {
            errors.push(OptionsError::MissingRequired {
                owner: owner.to_string(),
                field: field.name,
            });
        }
    }

    for constraint in T::constraints() {
        match constraint {
            Constraint::ExactlyOneOf(names) => {
                if count_present(opts, names) != 1 {
                    errors.push(OptionsError::exactly_one_of(owner, names));
                }
            }
            Constraint::AtLeastOneOf(names) => {
                if count_present(opts, names) == 0 {
                    errors.push(OptionsError::at_least_one_of(owner, names));
                }
            }
        }
    }

    for field in T::fields() {
        if let Arg::Block(block) = field.arg(opts) {
            block.collect_errors(&format!("{owner}.{}", field.name), errors);
        }
    }
}

fn count_present<T: QueryStruct>(opts: &T, names: &[&str]) -> usize {
    names
        .iter()
        .filter(|name| {
            let field = T::field(name);
            debug_assert!(field.is_some(), "{} has no field {name}", T::NAME);
            field.is_some_and(|f| f.arg(opts).is_present())
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::identifier::AccountObjectIdentifier;
    use crate::sdk::options::{Field, Quoting};

    #[derive(Default)]
    struct Inner {
        a: Option<i64>,
        b: Option<String>,
    }

    static INNER_FIELDS: &[Field<Inner>] = &[
        Field::parameter("A", "A", Quoting::NoQuotes, |o| Arg::opt_int(o.a)),
        Field::parameter("B", "B", Quoting::SingleQuotes, |o| Arg::opt_text(o.b.as_ref())),
    ];

    impl QueryStruct for Inner {
        const NAME: &'static str = "Inner";

        fn fields() -> &'static [Field<Self>] {
            INNER_FIELDS
        }

        fn constraints() -> &'static [Constraint] {
            &[Constraint::AtLeastOneOf(&["A", "B"])]
        }
    }

    struct Outer {
        name: AccountObjectIdentifier,
        label: String,
        on: Option<bool>,
        off: Option<bool>,
        inner: Option<Inner>,
    }

    impl Outer {
        fn valid() -> Self {
            Self {
                name: AccountObjectIdentifier::new("OBJ"),
                label: "x".to_string(),
                on: Some(true),
                off: None,
                inner: None,
            }
        }
    }

    static OUTER_FIELDS: &[Field<Outer>] = &[
        Field::statik("OUTER"),
        Field::identifier("name", |o| Arg::ident(&o.name)),
        Field::parameter("Label", "LABEL", Quoting::NoQuotes, |o: &Outer| Arg::text(&o.label))
            .required(),
        Field::keyword("On", "ON", |o| Arg::flag(o.on)),
        Field::keyword("Off", "OFF", |o| Arg::flag(o.off)),
        Field::block("Inner", "SET", |o| Arg::block(o.inner.as_ref())),
    ];

    impl QueryStruct for Outer {
        const NAME: &'static str = "Outer";

        fn fields() -> &'static [Field<Self>] {
            OUTER_FIELDS
        }

        fn constraints() -> &'static [Constraint] {
            &[Constraint::ExactlyOneOf(&["On", "Off", "Inner"])]
        }
    }

    #[test]
    fn nil_options_is_terminal() {
        let err = validate::<Outer>(None).unwrap_err();
        assert_eq!(err.errors(), &[OptionsError::NilOptions]);
    }

    #[test]
    fn valid_options_pass() {
        assert!(validate(Some(&Outer::valid())).is_ok());
    }

    #[test]
    fn all_violations_are_collected_in_order() {
        let opts = Outer {
            name: AccountObjectIdentifier::new(""),
            label: String::new(),
            on: Some(true),
            off: Some(false),
            inner: None,
        };
        let err = validate(Some(&opts)).unwrap_err();
        assert_eq!(
            err.errors(),
            &[
                OptionsError::InvalidIdentifier { field: "name" },
                OptionsError::MissingRequired {
                    owner: "Outer".to_string(),
                    field: "Label"
                },
                OptionsError::exactly_one_of("Outer", &["On", "Off", "Inner"]),
            ]
        );
    }

    #[test]
    fn nested_block_is_validated_only_when_present() {
        let mut opts = Outer::valid();
        opts.on = None;
        opts.inner = Some(Inner::default());
        let err = validate(Some(&opts)).unwrap_err();
        assert_eq!(
            err.errors(),
            &[OptionsError::at_least_one_of("Outer.Inner", &["A", "B"])]
        );

        opts.inner = Some(Inner {
            a: Some(1),
            b: None,
        });
        assert!(validate(Some(&opts)).is_ok());
    }

    #[test]
    fn display_joins_messages() {
        let err = ValidationErrors(vec![
            OptionsError::InvalidIdentifier { field: "name" },
            OptionsError::exactly_one_of("Outer", &["On", "Off"]),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid object identifier for field name; exactly one of Outer fields [On Off] must be set"
        );
    }
}
