//! Bind placeholder configuration.

use crate::error::{RowError, RowResult};
use std::fmt;
use std::str::FromStr;

/// Bind parameter marker style.
///
/// Every bound parameter gets one marker, left to right in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placeholder {
    /// `%s` (`format` style)
    #[default]
    Format,
    /// `?` (sqlite / ODBC style)
    Qmark,
    /// `$1`, `$2`, ... (PostgreSQL native)
    Dollar,
}

impl Placeholder {
    /// Append the marker for the `index`-th parameter (1-based) to `out`.
    pub(crate) fn write(self, out: &mut String, index: usize) {
        match self {
            Self::Format => out.push_str("%s"),
            Self::Qmark => out.push('?'),
            Self::Dollar => {
                out.push('$');
                out.push_str(&index.to_string());
            }
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Format => "%s",
            Self::Qmark => "?",
            Self::Dollar => "$n",
        })
    }
}

impl FromStr for Placeholder {
    type Err = RowError;

    /// Accepts `%s` / `format`, `?` / `qmark`, `$n` / `$1` / `dollar`.
    fn from_str(s: &str) -> RowResult<Self> {
        match s.trim() {
            "%s" | "format" => Ok(Self::Format),
            "?" | "qmark" => Ok(Self::Qmark),
            "$n" | "$1" | "dollar" => Ok(Self::Dollar),
            other => Err(RowError::usage(format!(
                "unknown placeholder style '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_styles() {
        assert_eq!("%s".parse::<Placeholder>().unwrap(), Placeholder::Format);
        assert_eq!("qmark".parse::<Placeholder>().unwrap(), Placeholder::Qmark);
        assert_eq!(" $n ".parse::<Placeholder>().unwrap(), Placeholder::Dollar);
        assert!("@p".parse::<Placeholder>().unwrap_err().is_usage());
    }

    #[test]
    fn writes_numbered_markers() {
        let mut out = String::new();
        Placeholder::Dollar.write(&mut out, 3);
        Placeholder::Format.write(&mut out, 4);
        Placeholder::Qmark.write(&mut out, 5);
        assert_eq!(out, "$3%s?");
    }
}
