//! Connection Descriptor
//!
//! Renders the MySQL data source name (DSN) handed to the driver.

use std::fmt;

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Built-in descriptor using the `utf8` character set
pub const DSN_DEFAULT: &str =
    "{user}:{password}@tcp({host})/{database}?charset=utf8&parseTime=True&loc=Local";

/// Built-in descriptor using the `utf8mb4` character set
pub const DSN_UTF8MB4: &str =
    "{user}:{password}@tcp({host})/{database}?charset=utf8mb4&parseTime=True&loc=Local";

/// Template used to render the descriptor.
///
/// Templates use the named placeholders `{user}`, `{password}`, `{host}`
/// and `{database}`. Anything else between braces is copied verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DsnFormat {
    #[default]
    Default,
    Utf8mb4,
    Custom(String),
}

impl DsnFormat {
    /// Get the template text for this format
    #[must_use]
    pub fn template(&self) -> &str {
        match self {
            Self::Default => DSN_DEFAULT,
            Self::Utf8mb4 => DSN_UTF8MB4,
            Self::Custom(template) => template,
        }
    }
}

/// Identity fields substituted into a descriptor template
#[derive(Clone, Copy)]
pub struct DsnParts<'a> {
    pub user: &'a str,
    pub password: &'a str,
    pub host: &'a str,
    pub database: &'a str,
}

/// A rendered descriptor.
///
/// The rendered text embeds the password, so `Debug` and `Display` are
/// redacted and the text is wiped on drop. Use [`Dsn::expose`] to read the
/// full value.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Dsn(String);

impl Dsn {
    /// Render `format` with the given identity fields.
    ///
    /// Values are substituted as-is: nothing is escaped, so a password
    /// containing `@` or `/` yields a descriptor the driver may reject.
    #[must_use]
    pub fn render(format: &DsnFormat, parts: DsnParts<'_>) -> Self {
        Self(render_template(format.template(), parts))
    }

    /// Get the full descriptor, including the password
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dsn").field(&"[REDACTED]").finish()
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

// Single pass, so placeholder text inside a substituted value is never
// expanded a second time.
fn render_template(template: &str, parts: DsnParts<'_>) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };

        let value = match &tail[1..close] {
            "user" => Some(parts.user),
            "password" => Some(parts.password),
            "host" => Some(parts.host),
            "database" => Some(parts.database),
            _ => None,
        };

        match value {
            Some(value) => out.push_str(value),
            None => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> DsnParts<'static> {
        DsnParts {
            user: "root",
            password: "secret",
            host: "db:3306",
            database: "app",
        }
    }

    #[test]
    fn should_render_default_format() {
        let dsn = Dsn::render(&DsnFormat::Default, parts());

        assert_eq!(
            dsn.expose(),
            "root:secret@tcp(db:3306)/app?charset=utf8&parseTime=True&loc=Local"
        );
    }

    #[test]
    fn should_render_utf8mb4_format() {
        let dsn = Dsn::render(&DsnFormat::Utf8mb4, parts());

        assert_eq!(
            dsn.expose(),
            "root:secret@tcp(db:3306)/app?charset=utf8mb4&parseTime=True&loc=Local"
        );
    }

    #[test]
    fn should_render_custom_format() {
        let format = DsnFormat::Custom("{user}@{host}/{database}?timeout=5s".to_string());
        let dsn = Dsn::render(&format, parts());

        assert_eq!(dsn.expose(), "root@db:3306/app?timeout=5s");
    }

    #[test]
    fn should_keep_unknown_placeholders_verbatim() {
        let format = DsnFormat::Custom("{user}:{token}@tcp({host})/{database".to_string());
        let dsn = Dsn::render(&format, parts());

        assert_eq!(dsn.expose(), "root:{token}@tcp(db:3306)/{database");
    }

    #[test]
    fn should_not_escape_or_reexpand_field_values() {
        let dsn = Dsn::render(
            &DsnFormat::Default,
            DsnParts {
                password: "p@ss{host}",
                ..parts()
            },
        );

        assert_eq!(
            dsn.expose(),
            "root:p@ss{host}@tcp(db:3306)/app?charset=utf8&parseTime=True&loc=Local"
        );
    }

    #[test]
    fn should_wipe_rendered_text() {
        let mut dsn = Dsn::render(&DsnFormat::Default, parts());

        dsn.zeroize();

        assert_eq!(dsn.expose(), "");
    }

    #[test]
    fn should_redact_debug_and_display() {
        let dsn = Dsn::render(&DsnFormat::Default, parts());

        assert!(!format!("{dsn:?}").contains("secret"));
        assert_eq!(dsn.to_string(), "[REDACTED]");
    }
}
