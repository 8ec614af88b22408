//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# quire configuration

# Base URL of the articles API
api_url = "{api_url}"

# File holding the session token (removed on logout)
storage_path = "{storage_path}"

# Per-request timeout in seconds
request_timeout_secs = {timeout}

# Theme: dark, light
theme = "{theme}"

# Drop article lists that arrive after a newer list or an edit
discard_stale_lists = {discard}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to the TUI log panel or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            api_url = self.api_url,
            storage_path = toml_path(&self.storage_path),
            timeout = self.request_timeout_secs,
            theme = self.theme,
            discard = self.discard_stale_lists,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_path(&self.logging.file_dir),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}

/// Paths inside basic TOML strings: backslashes must be escaped
fn toml_path(path: &std::path::Path) -> String {
    path.display().to_string().replace('\\', "\\\\")
}
