use serde::{Deserialize, Serialize};

/// Tunables of the command-line grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Marker that turns a token into an argument-file reference (default: "@").
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// Reserved value that clears an optional argument (default: ":none:").
    #[serde(default = "default_clear_token")]
    pub clear_token: String,
    /// Maximum nesting of argument files (default: 16).
    #[serde(default = "default_max_file_depth")]
    pub max_file_depth: usize,
    /// Register the special `--help`/`-h` flag (default: true).
    #[serde(default = "default_help_flag")]
    pub help_flag: bool,
    /// Version string; when set, the special `--version` flag is registered.
    #[serde(default)]
    pub version: Option<String>,
    /// Maximum number of "did you mean" suggestions for unknown options (default: 3).
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

fn default_file_prefix() -> String {
    "@".to_string()
}

fn default_clear_token() -> String {
    ":none:".to_string()
}

fn default_max_file_depth() -> usize {
    16
}

fn default_help_flag() -> bool {
    true
}

fn default_max_suggestions() -> usize {
    3
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            file_prefix: default_file_prefix(),
            clear_token: default_clear_token(),
            max_file_depth: default_max_file_depth(),
            help_flag: default_help_flag(),
            version: None,
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl ParserConfig {
    /// Same configuration with a version string, enabling `--version`.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The file-prefix marker as a character.
    ///
    /// Falls back to `@` for configurations that skipped validation.
    pub fn file_marker(&self) -> char {
        self.file_prefix.chars().next().unwrap_or('@')
    }

    /// Whether `value` is the clearing sentinel.
    pub fn is_clear_token(&self, value: &str) -> bool {
        value.eq_ignore_ascii_case(&self.clear_token)
    }
}
