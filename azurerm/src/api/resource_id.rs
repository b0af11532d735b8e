//! Azure-style resource identifier parsing
//!
//! Identifiers encode a hierarchical path:
//! /subscriptions/{id}/resourceGroups/{group}/providers/{namespace}
//!     /{type}/{name}[/{childType}/{childName}...]
//! Existence checks parse the opaque id out of state into the components
//! the SDK calls need. A malformed id is fatal to the check.

use super::error::ApiError;

/// Parsed resource identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub subscription_id: String,
    pub resource_group: String,
    /// Provider namespace, e.g. "Microsoft.Network"
    pub provider: String,
    /// Remaining (type, name) pairs in path order
    path: Vec<(String, String)>,
}

impl ResourceId {
    pub fn parse(id: &str) -> Result<Self, ApiError> {
        let invalid = |reason: &str| ApiError::InvalidResourceId {
            id: id.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = id.trim_start_matches('/').trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(invalid("id is empty"));
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        if segments.len() % 2 != 0 {
            return Err(invalid("path has an odd number of segments"));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid("path contains an empty segment"));
        }

        let mut pairs = segments.chunks_exact(2);

        let mut subscription_id = None;
        let mut resource_group = None;
        let mut provider = None;
        let mut path = Vec::new();

        for pair in &mut pairs {
            let (key, value) = (pair[0], pair[1]);
            match key {
                "subscriptions" if subscription_id.is_none() => {
                    subscription_id = Some(value.to_string());
                }
                "resourceGroups" if resource_group.is_none() => {
                    resource_group = Some(value.to_string());
                }
                "providers" if provider.is_none() => {
                    provider = Some(value.to_string());
                }
                _ => path.push((key.to_string(), value.to_string())),
            }
        }

        Ok(Self {
            subscription_id: subscription_id.ok_or_else(|| invalid("missing subscriptions"))?,
            resource_group: resource_group.ok_or_else(|| invalid("missing resourceGroups"))?,
            provider: provider.ok_or_else(|| invalid("missing providers"))?,
            path,
        })
    }

    /// Name of the path component with the given type, e.g.
    /// path("routeTables") on a route table id
    pub fn path(&self, key: &str) -> Option<&str> {
        self.path
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path lookup where absence makes the id unusable for the caller
    pub fn require(&self, key: &str) -> Result<&str, ApiError> {
        self.path(key).ok_or_else(|| ApiError::InvalidResourceId {
            id: self.to_string(),
            reason: format!("missing path component {:?}", key),
        })
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{}",
            self.subscription_id, self.resource_group, self.provider
        )?;
        for (key, value) in &self.path {
            write!(f, "/{}/{}", key, value)?;
        }
        Ok(())
    }
}
