//! SQL rendering
//!
//! Turns an options struct into a single statement by walking its
//! descriptor table in declaration order. Rendering never re-validates.

use super::options::{Arg, FieldKind, QueryStruct, Quoting};

/// Render `opts` into one SQL statement
pub fn render<T: QueryStruct>(opts: &T) -> String {
    let mut out = Vec::new();
    write_clauses(opts, &mut out);
    out.join(" ")
}

pub(crate) fn write_clauses<T: QueryStruct>(opts: &T, out: &mut Vec<String>) {
    for field in T::fields() {
        let arg = field.arg(opts);
        match field.kind {
            FieldKind::Static(sql) => out.push(sql.to_string()),
            FieldKind::Identifier => {
                if let Arg::Ident(id) = arg {
                    let name = id.fully_qualified_name();
                    if !name.is_empty() {
                        out.push(name);
                    }
                }
            }
            FieldKind::Keyword(sql) => match arg {
                Arg::Flag(true) => out.push(sql.to_string()),
                Arg::Ident(id) => out.push(format!("{sql} {}", id.fully_qualified_name())),
                _ => {}
            },
            FieldKind::Parameter {
                keyword,
                quoting,
                equals,
            } => {
                if let Some(value) = format_value(&arg, quoting) {
                    if equals {
                        out.push(format!("{keyword} = {value}"));
                    } else {
                        out.push(format!("{keyword} {value}"));
                    }
                }
            }
            FieldKind::Value(quoting) => {
                if let Some(value) = format_value(&arg, quoting) {
                    out.push(value);
                }
            }
            FieldKind::Block(keyword) => {
                if let Arg::Block(block) = arg {
                    if !keyword.is_empty() {
                        out.push(keyword.to_string());
                    }
                    block.write_clauses(out);
                }
            }
        }
    }
}

/// Wrap text in single quotes, doubling embedded quotes
pub fn single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn format_value(arg: &Arg<'_>, quoting: Quoting) -> Option<String> {
    let scalar = |raw: String, quotable: bool| match quoting {
        Quoting::SingleQuotes if quotable => single_quote(&raw),
        Quoting::List => format!("({raw})"),
        _ => raw,
    };

    match arg {
        Arg::Unset | Arg::Block(_) | Arg::Flag(_) => None,
        Arg::Int(i) => Some(scalar(i.to_string(), false)),
        Arg::Bool(b) => Some(scalar(b.to_string(), false)),
        Arg::Text(s) => Some(scalar(s.to_string(), true)),
        Arg::Ident(id) => Some(scalar(id.fully_qualified_name(), false)),
        Arg::List(items) => Some(format!("({})", items.join(", "))),
    }
}
