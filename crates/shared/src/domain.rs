use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! string_id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id_newtype!(VersionId);
string_id_newtype!(DictionaryId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerKind {
    User,
    Organization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PublicAccess {
    #[default]
    View,
    Edit,
    None,
}

/// A released (or releasable) snapshot of a dictionary.
///
/// Only `id` and `released` carry meaning for the release workflow; the
/// other fields are rendered as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub id: VersionId,
    pub released: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "active_concepts")]
    pub concept_count: Option<u64>,
    #[serde(default)]
    pub version_url: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

impl VersionRecord {
    pub fn new(id: impl Into<String>, released: bool) -> Self {
        Self {
            id: VersionId::new(id),
            released,
            description: None,
            concept_count: None,
            version_url: String::new(),
            url: String::new(),
            external_id: None,
            created_on: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryRecord {
    pub id: DictionaryId,
    pub name: String,
    #[serde(default)]
    pub short_code: String,
    pub url: String,
    pub owner: String,
    pub owner_type: OwnerKind,
    pub owner_url: String,
    #[serde(default)]
    pub preferred_source: Option<String>,
    #[serde(default)]
    pub public_access: PublicAccess,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgMembership {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Resource URLs name the same entity regardless of surrounding whitespace
/// or a trailing slash.
pub fn same_resource_url(a: &str, b: &str) -> bool {
    a.trim().trim_end_matches('/') == b.trim().trim_end_matches('/')
}
