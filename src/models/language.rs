use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Language tag carried by every file record.
///
/// Serialized as its plain tag (`"typescript"`, `"css"`, ...). Tags outside the
/// known set round-trip through [`Language::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Css,
    Scss,
    Html,
    Json,
    Markdown,
    Sql,
    Shell,
    Yaml,
    #[default]
    PlainText,
    Other(String),
}

impl Language {
    /// Detects the language from the extension of the last path segment.
    ///
    /// Extensions are matched case-sensitively; dotfiles and files without an
    /// extension are plain text.
    pub fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|s| s.to_str()) {
            Some("ts" | "tsx") => Self::TypeScript,
            Some("js" | "jsx") => Self::JavaScript,
            Some("py") => Self::Python,
            Some("css") => Self::Css,
            Some("scss") => Self::Scss,
            Some("html") => Self::Html,
            Some("json") => Self::Json,
            Some("md") => Self::Markdown,
            Some("sql") => Self::Sql,
            Some("sh") => Self::Shell,
            Some("yml" | "yaml") => Self::Yaml,
            _ => Self::PlainText,
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "typescript" => Self::TypeScript,
            "javascript" => Self::JavaScript,
            "python" => Self::Python,
            "css" => Self::Css,
            "scss" => Self::Scss,
            "html" => Self::Html,
            "json" => Self::Json,
            "markdown" => Self::Markdown,
            "sql" => Self::Sql,
            "shell" => Self::Shell,
            "yaml" => Self::Yaml,
            "plaintext" => Self::PlainText,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Html => "html",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Sql => "sql",
            Self::Shell => "shell",
            Self::Yaml => "yaml",
            Self::PlainText => "plaintext",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Language {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        match language {
            Language::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/language.rs"]
mod tests;
