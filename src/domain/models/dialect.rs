//! MySQL Dialect Options
//!
//! Compatibility flags forwarded to the driver, and the DDL they imply.
//!
//! Callers that manage schema read the flags from an opened
//! `Database::dialect()` and build column types and rename statements
//! with the helpers here.

/// Width used for string columns declared without a size
pub const DEFAULT_STRING_SIZE: u32 = 256;

/// Dialect compatibility flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectOptions {
    pub default_string_size: u32,
    pub disable_datetime_precision: bool,
    pub dont_support_rename_index: bool,
    pub dont_support_rename_column: bool,
    pub skip_initialize_with_version: bool,
}

impl Default for DialectOptions {
    /// The fixed flags every connection is opened with
    fn default() -> Self {
        Self {
            default_string_size: DEFAULT_STRING_SIZE,
            disable_datetime_precision: true,
            dont_support_rename_index: true,
            dont_support_rename_column: true,
            skip_initialize_with_version: false,
        }
    }
}

impl DialectOptions {
    /// Column type for a string column
    #[must_use]
    pub fn string_column_type(&self, size: Option<u32>) -> String {
        format!("varchar({})", size.unwrap_or(self.default_string_size))
    }

    /// Column type for a datetime column with optional fractional precision
    #[must_use]
    pub fn datetime_column_type(&self, precision: Option<u8>) -> String {
        match precision {
            Some(p) if !self.disable_datetime_precision && p > 0 => format!("DATETIME({p})"),
            _ => "DATETIME".to_string(),
        }
    }

    /// Statement renaming a column.
    ///
    /// Without `RENAME COLUMN` support the column is redefined with
    /// `CHANGE`, which needs its full type.
    #[must_use]
    pub fn rename_column_sql(&self, table: &str, from: &str, to: &str, column_type: &str) -> String {
        if self.dont_support_rename_column {
            format!("ALTER TABLE `{table}` CHANGE `{from}` `{to}` {column_type}")
        } else {
            format!("ALTER TABLE `{table}` RENAME COLUMN `{from}` TO `{to}`")
        }
    }

    /// Statements renaming an index.
    ///
    /// Without `RENAME INDEX` support the index is dropped and recreated
    /// over `columns`.
    #[must_use]
    pub fn rename_index_sql(&self, table: &str, from: &str, to: &str, columns: &[&str]) -> Vec<String> {
        if self.dont_support_rename_index {
            let columns = columns
                .iter()
                .map(|c| format!("`{c}`"))
                .collect::<Vec<_>>()
                .join(",");
            vec![
                format!("ALTER TABLE `{table}` DROP INDEX `{from}`"),
                format!("CREATE INDEX `{to}` ON `{table}`({columns})"),
            ]
        } else {
            vec![format!("ALTER TABLE `{table}` RENAME INDEX `{from}` TO `{to}`")]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permissive() -> DialectOptions {
        DialectOptions {
            disable_datetime_precision: false,
            dont_support_rename_index: false,
            dont_support_rename_column: false,
            ..DialectOptions::default()
        }
    }

    #[test]
    fn should_use_fixed_defaults() {
        let options = DialectOptions::default();

        assert_eq!(options.default_string_size, 256);
        assert!(options.disable_datetime_precision);
        assert!(options.dont_support_rename_index);
        assert!(options.dont_support_rename_column);
        assert!(!options.skip_initialize_with_version);
    }

    #[test]
    fn should_size_string_columns() {
        let options = DialectOptions::default();

        assert_eq!(options.string_column_type(None), "varchar(256)");
        assert_eq!(options.string_column_type(Some(64)), "varchar(64)");
    }

    #[test]
    fn should_drop_datetime_precision_when_disabled() {
        assert_eq!(DialectOptions::default().datetime_column_type(Some(3)), "DATETIME");
        assert_eq!(permissive().datetime_column_type(Some(3)), "DATETIME(3)");
        assert_eq!(permissive().datetime_column_type(None), "DATETIME");
    }

    #[test]
    fn should_rename_column_with_change_when_unsupported() {
        let sql = DialectOptions::default().rename_column_sql("users", "name", "full_name", "varchar(256)");
        assert_eq!(sql, "ALTER TABLE `users` CHANGE `name` `full_name` varchar(256)");

        let sql = permissive().rename_column_sql("users", "name", "full_name", "varchar(256)");
        assert_eq!(sql, "ALTER TABLE `users` RENAME COLUMN `name` TO `full_name`");
    }

    #[test]
    fn should_recreate_index_when_rename_unsupported() {
        let sql = DialectOptions::default().rename_index_sql("users", "idx_a", "idx_b", &["a", "b"]);
        assert_eq!(
            sql,
            vec![
                "ALTER TABLE `users` DROP INDEX `idx_a`".to_string(),
                "CREATE INDEX `idx_b` ON `users`(`a`,`b`)".to_string(),
            ]
        );

        let sql = permissive().rename_index_sql("users", "idx_a", "idx_b", &["a"]);
        assert_eq!(sql, vec!["ALTER TABLE `users` RENAME INDEX `idx_a` TO `idx_b`".to_string()]);
    }
}
