//! Domain name handling

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;
const WWW_PREFIX: &str = "www.";

/// A canonical custom domain name (lower-case, no trailing dot).
///
/// Every provisioned domain also answers on its `www.` alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Canonicalize and validate a caller supplied domain name.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let name = input.trim().trim_end_matches('.').to_ascii_lowercase();

        if name.is_empty() {
            return Err(CoreError::ValidationError(
                "Domain name cannot be empty".to_string(),
            ));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(CoreError::ValidationError(format!(
                "Domain name exceeds {MAX_NAME_LEN} characters"
            )));
        }
        if name.contains("://") || name.contains(['/', '?', '#', ':', '@', ' ']) {
            return Err(CoreError::ValidationError(format!(
                "'{input}' is not a bare domain name"
            )));
        }

        for label in name.split('.') {
            validate_label(label, input)?;
        }

        Ok(Self(name))
    }

    /// `www.`-prefixed alias of this domain.
    #[must_use]
    pub fn www_alias(&self) -> String {
        format!("{WWW_PREFIX}{}", self.0)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_label(label: &str, input: &str) -> CoreResult<()> {
    if label.is_empty() {
        return Err(CoreError::ValidationError(format!(
            "'{input}' contains an empty label"
        )));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(CoreError::ValidationError(format!(
            "Label '{label}' exceeds {MAX_LABEL_LEN} characters"
        )));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(CoreError::ValidationError(format!(
            "Label '{label}' cannot start or end with '-'"
        )));
    }
    if !label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::ValidationError(format!(
            "Label '{label}' contains invalid characters"
        )));
    }
    Ok(())
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DomainName {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::parse(&value)
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.0
    }
}
