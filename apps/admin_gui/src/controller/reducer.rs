//! Application state container fed by backend events.
//!
//! This is the external data source the controllers observe: it holds the
//! server-confirmed version list and both creation progresses.

use admin_core::{ActionFailure, CreationKind, CreationProgress, PermissionGate};
use shared::domain::{same_resource_url, DictionaryRecord, OrgMembership, Profile, VersionRecord};

use crate::controller::events::{UiError, UiEvent};

#[derive(Debug, Default)]
pub struct AdminStore {
    pub profile: Option<Profile>,
    pub orgs: Vec<OrgMembership>,
    pub dictionary: Option<DictionaryRecord>,
    pub versions: Vec<VersionRecord>,
    pub version_creation: CreationProgress<VersionRecord>,
    pub dictionary_creation: CreationProgress<DictionaryRecord>,
    pub status: String,
    pub banner: Option<UiError>,
    failures: Vec<ActionFailure>,
}

impl AdminStore {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Error(err) => {
                self.status = err.message().to_string();
                self.banner = Some(err);
            }
            UiEvent::SessionLoaded { profile, orgs } => {
                self.profile = profile;
                self.orgs = orgs;
            }
            UiEvent::DictionaryLoaded(dictionary) => {
                let reopened = self
                    .dictionary
                    .as_ref()
                    .is_some_and(|d| same_resource_url(&d.url, &dictionary.url));
                if !reopened {
                    self.versions.clear();
                }
                self.status = format!("Opened {}", dictionary.name);
                self.dictionary = Some(dictionary);
            }
            UiEvent::VersionsLoaded {
                dictionary_url,
                versions,
            } => {
                let current = self.dictionary.as_ref().map(|d| d.url.as_str());
                if current.is_some_and(|url| !same_resource_url(url, &dictionary_url)) {
                    tracing::debug!(%dictionary_url, "ignoring versions for a dictionary no longer open");
                    return;
                }
                self.versions = versions;
            }
            UiEvent::VersionUpdated(updated) => {
                match self.versions.iter_mut().find(|v| v.id == updated.id) {
                    Some(slot) => *slot = updated,
                    None => tracing::debug!(id = %updated.id, "updated version not in current list"),
                }
            }
            UiEvent::VersionEditFailed { id, error } => {
                self.failures.push(ActionFailure::EditVersion { id, error });
            }
            UiEvent::CreationStarted(kind) => match kind {
                CreationKind::Version => {
                    self.version_creation.begin();
                }
                CreationKind::Dictionary => {
                    self.dictionary_creation.begin();
                }
            },
            UiEvent::VersionCreated(created) => {
                if let Some(attempt) = self.version_creation.attempt() {
                    self.version_creation.succeed(attempt, created);
                }
            }
            UiEvent::DictionaryCreated(created) => {
                if let Some(attempt) = self.dictionary_creation.attempt() {
                    self.dictionary_creation.succeed(attempt, created);
                }
            }
            UiEvent::CreationFailed { kind, error } => match kind {
                CreationKind::Version => {
                    if let Some(attempt) = self.version_creation.attempt() {
                        self.version_creation.fail(attempt, error);
                    }
                }
                CreationKind::Dictionary => {
                    if let Some(attempt) = self.dictionary_creation.attempt() {
                        self.dictionary_creation.fail(attempt, error);
                    }
                }
            },
            UiEvent::CreationReset(kind) => match kind {
                CreationKind::Version => self.version_creation.reset(),
                CreationKind::Dictionary => self.dictionary_creation.reset(),
            },
        }
    }

    /// Capability for the open dictionary, derived from ownership.
    pub fn permission(&self) -> PermissionGate {
        match &self.dictionary {
            Some(dictionary) => PermissionGate::for_owner(
                self.profile.as_ref(),
                &self.orgs,
                &dictionary.owner_url,
            ),
            None => PermissionGate::denied(),
        }
    }

    /// Forgets the open dictionary before another one is requested.
    pub fn close_dictionary(&mut self) {
        self.dictionary = None;
        self.versions.clear();
    }

    pub fn take_failures(&mut self) -> Vec<ActionFailure> {
        std::mem::take(&mut self.failures)
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
