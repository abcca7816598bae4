use serde::{Deserialize, Serialize};

use crate::domain::{PublicAccess, VersionId};

/// Payload handed to the version edit action. Serializes as
/// `{"id": "...", "released": bool}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditVersionRequest {
    pub id: VersionId,
    pub released: bool,
}

impl EditVersionRequest {
    pub fn new(id: VersionId, released: bool) -> Self {
        Self { id, released }
    }
}

/// Body of the release-status update sent to a version URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseStatusPatch {
    pub released: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVersionRequest {
    pub id: VersionId,
    pub released: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Values collected by the create-dictionary form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewDictionary {
    pub name: String,
    pub short_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub preferred_source: String,
    #[serde(default)]
    pub public_access: PublicAccess,
    pub owner_url: String,
    #[serde(default)]
    pub default_locale: String,
    #[serde(default)]
    pub supported_locales: Vec<String>,
}

/// Wire body for `POST {owner_url}collections/`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCollectionBody<'a> {
    pub id: &'a str,
    pub short_code: &'a str,
    pub name: &'a str,
    pub full_name: &'a str,
    pub description: &'a str,
    pub collection_type: &'static str,
    pub public_access: PublicAccess,
    pub preferred_source: &'a str,
    pub default_locale: &'a str,
    pub supported_locales: String,
}

impl<'a> From<&'a NewDictionary> for CreateCollectionBody<'a> {
    fn from(value: &'a NewDictionary) -> Self {
        Self {
            id: &value.short_code,
            short_code: &value.short_code,
            name: &value.name,
            full_name: &value.name,
            description: &value.description,
            collection_type: "Dictionary",
            public_access: value.public_access,
            preferred_source: &value.preferred_source,
            default_locale: &value.default_locale,
            supported_locales: value.supported_locales.join(","),
        }
    }
}
