//! Injection guards for SOQL text, URL paths and Apex snippets.
//!
//! Every caller-supplied value that ends up inside a SOQL string literal,
//! a REST path segment or generated Apex source goes through one of these
//! helpers first.
//!
//! ```rust
//! use sfauto_client::security::soql;
//!
//! let name = soql::escape_string("O'Brien");
//! let query = format!("SELECT Id FROM Account WHERE Name = '{}'", name);
//! assert_eq!(query, "SELECT Id FROM Account WHERE Name = 'O\\'Brien'");
//! ```

/// SOQL escaping and identifier validation.
pub mod soql {
    /// Escape a string value for use inside a single-quoted SOQL literal.
    ///
    /// Quotes, backslashes, newlines, carriage returns and tabs are
    /// backslash-escaped.
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Render values as a parenthesised, comma-separated list of escaped
    /// literals: `('a', 'b')`.
    ///
    /// ```rust
    /// use sfauto_client::security::soql;
    ///
    /// assert_eq!(soql::quoted_list(["001A", "001B"]), "('001A', '001B')");
    /// ```
    #[must_use]
    pub fn quoted_list<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
        let items: Vec<String> = values
            .into_iter()
            .map(|v| format!("'{}'", escape_string(v)))
            .collect();
        format!("({})", items.join(", "))
    }

    /// Validate that a field name contains only safe characters.
    ///
    /// Field names start with a letter and contain only ASCII letters,
    /// digits and underscores (which covers the `__c` / `__r` suffixes).
    /// Relationship paths such as `Account.Name` are accepted when every
    /// segment is itself safe.
    #[must_use]
    pub fn is_safe_field_name(name: &str) -> bool {
        !name.is_empty() && name.split('.').all(is_identifier)
    }

    /// Validate that an SObject name is safe to place in a path or FROM clause.
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        is_identifier(name)
    }

    /// Join field names for a SELECT list, or `None` if any of them is unsafe.
    #[must_use]
    pub fn select_list(fields: &[&str]) -> Option<String> {
        if fields.is_empty() || !fields.iter().all(|f| is_safe_field_name(f)) {
            return None;
        }
        Some(fields.join(", "))
    }

    pub(crate) fn is_identifier(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            }
            _ => false,
        }
    }
}

/// URL path safety.
pub mod url {
    /// URL-encode a path segment.
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Validate that a Salesforce ID has the correct format.
    ///
    /// Salesforce IDs are either 15 or 18 alphanumeric characters.
    #[must_use]
    pub fn is_valid_salesforce_id(id: &str) -> bool {
        let len = id.len();
        (len == 15 || len == 18) && id.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

/// Apex source generation guards.
pub mod apex {
    /// Validate an Apex class name (optionally namespaced, `ns.ClassName`).
    ///
    /// Used before a class name is spliced into generated anonymous Apex.
    #[must_use]
    pub fn is_safe_class_name(name: &str) -> bool {
        let segments: Vec<&str> = name.split('.').collect();
        segments.len() <= 2
            && segments
                .iter()
                .all(|s| super::soql::is_identifier(s) && !s.contains("__"))
    }
}
