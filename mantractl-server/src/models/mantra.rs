//! Mantra field validation

use super::ValidationError;

/// Maximum length for mantra titles
const MAX_TITLE_LEN: usize = 256;

/// Maximum length for mantra text bodies (64KB)
const MAX_TEXT_LEN: usize = 65536;

/// Validated mantra title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MantraTitle(String);

impl MantraTitle {
    /// Create a new mantra title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 256 characters
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if trimmed.len() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MantraTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated mantra text body. Stored verbatim (no trimming), but must
/// contain something other than whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MantraText(String);

impl MantraText {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "text" });
        }

        if s.len() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field: "text",
                max: MAX_TEXT_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MantraText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated repetition goal (target count, at least 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal(i64);

impl Goal {
    pub fn new(n: i64) -> Result<Self, ValidationError> {
        if n < 1 {
            return Err(ValidationError::TooSmall { field: "goal", min: 1 });
        }
        Ok(Self(n))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}
