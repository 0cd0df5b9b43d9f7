//! Relation links (`__deferred` navigation properties) between records.

use serde::Deserialize;

/// A navigation property as serialized by the service.
///
/// Unexpanded navigations carry a `__deferred.uri` pointing at the child
/// collection. Expanded ones carry the records inline instead; those decode with
/// no link, which ends the chain at that point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Navigation {
    #[serde(rename = "__deferred", default)]
    pub deferred: Option<DeferredUri>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeferredUri {
    pub uri: String,
}

impl Navigation {
    pub fn deferred(uri: impl Into<String>) -> Self {
        Self {
            deferred: Some(DeferredUri { uri: uri.into() }),
        }
    }
}

/// The relation link of `navigation`, if it carries a usable one.
pub fn relation_link(navigation: &Option<Navigation>) -> Option<&str> {
    navigation
        .as_ref()
        .and_then(|n| n.deferred.as_ref())
        .map(|d| d.uri.trim())
        .filter(|uri| !uri.is_empty())
}
