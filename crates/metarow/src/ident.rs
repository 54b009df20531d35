//! SQL identifier validation.
//!
//! Identifiers (schema names, field names, enum type names) are interpolated into SQL
//! text without escaping, so they are restricted to plain unquoted identifiers:
//! `[A-Za-z_][A-Za-z0-9_]*`.

use crate::error::{RowError, RowResult};

/// Check that `s` is a plain SQL identifier.
pub fn check_ident(s: &str) -> RowResult<&str> {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return Err(RowError::InvalidIdentifier(s.to_string()));
    };
    if !(first == '_' || first.is_ascii_alphabetic()) {
        return Err(RowError::InvalidIdentifier(s.to_string()));
    }
    if chars.all(|c| c == '_' || c.is_ascii_alphanumeric()) {
        Ok(s)
    } else {
        Err(RowError::InvalidIdentifier(s.to_string()))
    }
}

/// Check that an enum label can be written as a single-quoted SQL literal.
pub(crate) fn check_literal(s: &str) -> RowResult<&str> {
    if s.is_empty() || s.contains('\'') || s.contains('\0') {
        return Err(RowError::InvalidIdentifier(s.to_string()));
    }
    Ok(s)
}
