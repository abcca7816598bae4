//! Release toggle confirmation workflow for a dictionary's version list.
//!
//! The displayed release state of every row is always read from the last
//! observed [`VersionRecord`]. A click only opens a confirmation; the
//! record changes when the external data source delivers a refreshed list.

use shared::{
    domain::{VersionId, VersionRecord},
    error::ApiError,
    protocol::EditVersionRequest,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    bridge::{ActionBridge, BridgeError},
    creation::CreationProgress,
    dialog::{ConfirmationDialog, PendingToggle},
    permission::PermissionGate,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Permission missing; nothing changed.
    Denied,
    Pending(PendingToggle),
    /// Another confirmation is already open.
    Busy,
    UnknownVersion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Dispatched,
    Denied,
    AlreadyLoading,
}

#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("failed to dispatch {action}: {source}")]
    Dispatch {
        action: &'static str,
        #[source]
        source: BridgeError,
    },
}

/// An action the bridge reported as failed, kept for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionFailure {
    EditVersion { id: VersionId, error: ApiError },
    Dispatch(String),
}

impl ActionFailure {
    pub fn message(&self) -> String {
        match self {
            ActionFailure::EditVersion { error, .. } => error.verbatim(),
            ActionFailure::Dispatch(message) => message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: VersionId,
    pub displayed_released: bool,
    pub interactive: bool,
    pub denial_hint: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateAffordance {
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct ToggleConfirmController {
    gate: PermissionGate,
    versions: Vec<VersionRecord>,
    creation: CreationProgress<VersionRecord>,
    pending: Option<PendingToggle>,
    last_failure: Option<ActionFailure>,
}

impl ToggleConfirmController {
    pub fn new(gate: PermissionGate) -> Self {
        Self {
            gate,
            ..Self::default()
        }
    }

    pub fn set_permission(&mut self, gate: PermissionGate) {
        self.gate = gate;
    }

    pub fn permission(&self) -> PermissionGate {
        self.gate
    }

    /// Replaces the controller's view with the latest snapshot from the data
    /// source. A pending toggle whose row vanished is discarded.
    pub fn observe(
        &mut self,
        versions: Vec<VersionRecord>,
        creation: CreationProgress<VersionRecord>,
    ) {
        self.versions = versions;
        self.creation = creation;

        if let Some(pending) = &self.pending {
            if self.find(&pending.target_id).is_none() {
                warn!(id = %pending.target_id, "pending toggle target left the list; closing confirmation");
                self.pending = None;
            }
        }
    }

    pub fn versions(&self) -> &[VersionRecord] {
        &self.versions
    }

    fn find(&self, id: &VersionId) -> Option<&VersionRecord> {
        self.versions.iter().find(|v| &v.id == id)
    }

    pub fn request_toggle(&mut self, id: &VersionId) -> ToggleOutcome {
        if !self.permission().can_toggle() {
            debug!(%id, "toggle ignored: permission denied");
            return ToggleOutcome::Denied;
        }
        if let Some(open) = &self.pending {
            debug!(%id, open = %open.target_id, "toggle ignored: confirmation already open");
            return ToggleOutcome::Busy;
        }
        let Some(record) = self.find(id) else {
            warn!(%id, "toggle requested for unknown version");
            return ToggleOutcome::UnknownVersion;
        };

        let pending = PendingToggle {
            target_id: record.id.clone(),
            requested_released: !record.released,
        };
        self.pending = Some(pending.clone());
        ToggleOutcome::Pending(pending)
    }

    /// Discards the pending toggle and dispatches the edit. The pending
    /// toggle is gone before dispatch, so a bridge failure never reopens it.
    pub fn confirm(
        &mut self,
        bridge: &impl ActionBridge,
    ) -> Result<Option<EditVersionRequest>, ToggleError> {
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };
        if !self.permission().can_toggle() {
            warn!(id = %pending.target_id, "permission revoked before confirmation; not dispatching");
            return Ok(None);
        }

        let request = EditVersionRequest::new(pending.target_id, pending.requested_released);
        match bridge.edit_version(request.id.clone(), request.released) {
            Ok(()) => {
                info!(id = %request.id, released = request.released, "release status change dispatched");
                Ok(Some(request))
            }
            Err(source) => {
                self.last_failure = Some(ActionFailure::Dispatch(source.to_string()));
                Err(ToggleError::Dispatch {
                    action: "edit_version",
                    source,
                })
            }
        }
    }

    pub fn cancel(&mut self) -> Option<PendingToggle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&PendingToggle> {
        self.pending.as_ref()
    }

    pub fn dialog(&self) -> Option<ConfirmationDialog> {
        self.pending.as_ref().map(ConfirmationDialog::from)
    }

    pub fn rows(&self) -> Vec<RowView> {
        let gate = self.permission();
        let idle = self.pending.is_none();
        self.versions
            .iter()
            .map(|v| RowView {
                id: v.id.clone(),
                displayed_released: v.released,
                interactive: gate.can_toggle() && idle,
                denial_hint: gate.denial_hint(),
            })
            .collect()
    }

    pub fn request_create_version(
        &mut self,
        bridge: &impl ActionBridge,
        dictionary_url: &str,
    ) -> Result<CreateOutcome, ToggleError> {
        if !self.permission().can_toggle() {
            return Ok(CreateOutcome::Denied);
        }
        if self.creation.loading() {
            return Ok(CreateOutcome::AlreadyLoading);
        }
        bridge
            .create_version(dictionary_url)
            .map_err(|source| {
                self.last_failure = Some(ActionFailure::Dispatch(source.to_string()));
                ToggleError::Dispatch {
                    action: "create_version",
                    source,
                }
            })?;
        Ok(CreateOutcome::Dispatched)
    }

    /// `None` when the user may not create versions; the affordance is
    /// hidden rather than disabled.
    pub fn create_affordance(&self) -> Option<CreateAffordance> {
        self.permission().can_toggle().then(|| CreateAffordance {
            loading: self.creation.loading(),
            error: self.creation.error().map(ApiError::verbatim),
        })
    }

    pub fn report_failure(&mut self, failure: ActionFailure) {
        self.last_failure = Some(failure);
    }

    pub fn last_failure(&self) -> Option<&ActionFailure> {
        self.last_failure.as_ref()
    }

    pub fn clear_failure(&mut self) {
        self.last_failure = None;
    }
}

#[cfg(test)]
#[path = "tests/toggle_tests.rs"]
mod tests;
