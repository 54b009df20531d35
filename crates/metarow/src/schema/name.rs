use std::sync::OnceLock;

fn camel_token() -> &'static regex::Regex {
    static CAMEL_TOKEN: OnceLock<regex::Regex> = OnceLock::new();
    CAMEL_TOKEN.get_or_init(|| {
        regex::Regex::new(r"[A-Z][a-z0-9]*|[a-z0-9]+").expect("invalid built-in camel-case regex")
    })
}

/// Derive a table name from a schema name.
///
/// Splits the name into camel-case tokens (an upper-case letter followed by lower-case
/// letters and digits, or a leading run of lower-case letters and digits), lower-cases
/// them and joins them with `_`. Underscores act as token separators.
///
/// ```
/// use metarow::table_name;
///
/// assert_eq!(table_name("ABRow"), "a_b_row");
/// assert_eq!(table_name("UserAccount2"), "user_account2");
/// ```
pub fn table_name(schema_name: &str) -> String {
    camel_token()
        .find_iter(schema_name)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_every_capital() {
        assert_eq!(table_name("ABRow"), "a_b_row");
        assert_eq!(table_name("ACRow"), "a_c_row");
        assert_eq!(table_name("Row2"), "row2");
    }

    #[test]
    fn keeps_lowercase_prefix() {
        assert_eq!(table_name("userEvent"), "user_event");
    }

    #[test]
    fn underscores_separate_tokens() {
        assert_eq!(table_name("Audit_Log"), "audit_log");
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(table_name("OrderLine"), table_name("OrderLine"));
    }
}
