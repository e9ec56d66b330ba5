use std::fmt;

/// Filesystem- and URL-safe identifier.
///
/// Built by trimming, replacing spaces with `-`, dropping every character
/// outside `[A-Za-z0-9._-]`, and lowercasing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(String);

impl Slug {
    pub fn new(raw: &str) -> Self {
        let slug = raw
            .trim()
            .chars()
            .map(|c| if c == ' ' { '-' } else { c })
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        Self(slug)
    }

    /// Wrap an already-normalized value without re-slugging it.
    pub(crate) fn from_normalized(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_letter(&self) -> bool {
        self.0.chars().any(|c| c.is_ascii_alphabetic())
    }

    pub fn has_alphanumeric(&self) -> bool {
        self.0.chars().any(|c| c.is_ascii_alphanumeric())
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
