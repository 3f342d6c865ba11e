//! Identifier quoting and literal escaping.
//!
//! - Identifiers are wrapped in back-ticks, an embedded back-tick is doubled.
//! - Aliases are emitted verbatim in front of the quoted name (`u.`id``).
//! - String literals use single quotes with `'` and `\` backslash-escaped.

use crate::error::{SqlError, SqlResult};
use crate::value::Value;

/// Quote a column or table identifier.
///
/// `*` is passed through untouched so `alias.*` projections keep working.
pub fn quote_ident(name: &str) -> String {
    if name == "*" {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 2);
    push_ident(&mut out, name);
    out
}

/// Quote an identifier, prefixed by an optional unquoted table alias.
pub fn quote_ident_with_alias(alias: Option<&str>, name: &str) -> String {
    match alias {
        Some(alias) if !alias.is_empty() => format!("{alias}.{}", quote_ident(name)),
        _ => quote_ident(name),
    }
}

pub(crate) fn push_ident(out: &mut String, name: &str) {
    if name == "*" {
        out.push('*');
        return;
    }
    out.push('`');
    for c in name.chars() {
        if c == '`' {
            out.push('`');
        }
        out.push(c);
    }
    out.push('`');
}

/// Quote a string literal.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Byte offsets of every `?` placeholder outside quoted sections.
fn placeholder_positions(sql: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut quote: Option<u8> = None;
    let bytes = sql.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' && q != b'`' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'?' => positions.push(i),
                _ => {}
            },
        }
        i += 1;
    }
    positions
}

/// Count `?` placeholders, ignoring any that appear inside quotes.
pub fn placeholder_count(sql: &str) -> usize {
    placeholder_positions(sql).len()
}

/// Inline `args` into `sql`, replacing each `?` with the argument's literal.
///
/// Meant for logging and debugging; execute the placeholder form instead.
pub fn interpolate(sql: &str, args: &[Value]) -> SqlResult<String> {
    let positions = placeholder_positions(sql);
    if positions.len() != args.len() {
        return Err(SqlError::ArgsMismatch {
            sql: sql.to_string(),
            placeholders: positions.len(),
            args: args.len(),
        });
    }

    if let Some(i) = args
        .iter()
        .position(|arg| matches!(arg, Value::F64(v) if !v.is_finite()))
    {
        return Err(SqlError::non_finite_number(format!("argument {}", i + 1)));
    }

    let mut out = String::with_capacity(sql.len() + args.len() * 8);
    let mut last = 0;
    for (pos, arg) in positions.into_iter().zip(args) {
        out.push_str(&sql[last..pos]);
        out.push_str(&arg.to_sql_literal());
        last = pos + 1;
    }
    out.push_str(&sql[last..]);
    Ok(out)
}
