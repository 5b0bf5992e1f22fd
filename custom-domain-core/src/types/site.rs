//! Site records as served by the hosting platform API

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier of a platform resource (site, page, user).
///
/// The platform API is not consistent about ids: some are JSON strings, some numbers. Both
/// are normalized to their string form so they compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

struct ResourceIdVisitor;

impl Visitor<'_> for ResourceIdVisitor {
    type Value = ResourceId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ResourceId, E> {
        Ok(ResourceId(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ResourceId, E> {
        Ok(ResourceId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ResourceId, E> {
        Ok(ResourceId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ResourceId, E> {
        Ok(ResourceId(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ResourceIdVisitor)
    }
}

/// Owner reference embedded in a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: ResourceId,
}

/// The caller as returned by `GET /v1/me`.
pub type CurrentUser = UserRef;

/// A custom domain previously provisioned for a site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDomain {
    #[serde(default)]
    pub zone_id: Option<String>,
    #[serde(default)]
    pub domain_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMetadata {
    #[serde(default)]
    pub custom_domain: Option<CustomDomain>,
}

/// Per-page metadata. Both fields are loosely typed on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(default)]
    pub navigation_item: Option<Value>,
    #[serde(default)]
    pub index: Option<Value>,
}

impl PageMetadata {
    /// Whether the page is shown in site navigation.
    #[must_use]
    pub fn is_navigation_item(&self) -> bool {
        match &self.navigation_item {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_) | Value::Object(_)) => true,
        }
    }

    /// Navigation position, if it is a number (or a numeric string).
    #[must_use]
    pub fn index(&self) -> Option<f64> {
        match self.index.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: ResourceId,
    #[serde(default)]
    pub metadata: PageMetadata,
}

/// A hosted site (composition).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    #[serde(default)]
    pub id: Option<ResourceId>,
    /// Owner; absent when the platform could not resolve one.
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub metadata: SiteMetadata,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Site {
    /// Previously provisioned custom domain, if any.
    #[must_use]
    pub fn custom_domain(&self) -> Option<&CustomDomain> {
        self.metadata.custom_domain.as_ref()
    }

    /// Page visitors land on: the navigation page with the lowest index.
    ///
    /// Pages without a numeric index never qualify. On equal indexes the later page wins.
    #[must_use]
    pub fn landing_page_id(&self) -> Option<&ResourceId> {
        let mut best: Option<(f64, &ResourceId)> = None;
        for page in &self.pages {
            if !page.metadata.is_navigation_item() {
                continue;
            }
            let Some(index) = page.metadata.index() else {
                continue;
            };
            if best.is_none_or(|(lowest, _)| index <= lowest) {
                best = Some((index, &page.id));
            }
        }
        best.map(|(_, id)| id)
    }
}
