//! Commit and tag message templates

use std::fmt;

/// Placeholder replaced with the new version
pub const VERSION_PLACEHOLDER: &str = "%s";

/// Default commit message template
pub const DEFAULT_TEMPLATE: &str = "v%s";

/// A message template such as `"Release %s"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate(String);

impl MessageTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute the version into every placeholder
    pub fn render(&self, version: &str) -> String {
        self.0.replace(VERSION_PLACEHOLDER, version)
    }

    /// Render and quote for use as a single shell argument
    pub fn format(&self, version: &str) -> String {
        shell_quote(&self.render(version))
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Quote as a single argument for the platform shell commands run under
/// (`sh -c` on Unix, `cmd /C` on Windows)
pub fn shell_quote(value: &str) -> String {
    if cfg!(windows) {
        quote_windows(value)
    } else {
        quote_posix(value)
    }
}

/// Wrap in double quotes, escaping the characters a POSIX shell still
/// interprets inside them
pub fn quote_posix(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Wrap in double quotes following the Windows command-line parsing rules.
///
/// Backslashes are literal unless they precede a quote, so only runs of
/// backslashes before `"` (or before the closing quote) are doubled.
/// `cmd` still expands `%VAR%` inside quotes.
pub fn quote_windows(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    let mut backslashes = 0;
    for ch in value.chars() {
        match ch {
            '\\' => backslashes += 1,
            '"' => {
                quoted.push_str(&"\\".repeat(backslashes * 2 + 1));
                backslashes = 0;
            }
            _ => {
                quoted.push_str(&"\\".repeat(backslashes));
                backslashes = 0;
            }
        }
        if ch != '\\' {
            quoted.push(ch);
        }
    }
    quoted.push_str(&"\\".repeat(backslashes * 2));
    quoted.push('"');
    quoted
}
