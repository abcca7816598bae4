//! Client-side state transitions for dictionary release administration.
//!
//! Two controllers live here: [`ToggleConfirmController`] gates per-row
//! release toggles behind a confirmation and a [`PermissionGate`], and
//! [`CreateAndRedirectController`] turns a creation request into exactly one
//! navigation. Both talk to the outside world only through an
//! [`ActionBridge`] and through snapshots handed to their `observe` methods.

pub mod bridge;
pub mod creation;
pub mod dialog;
pub mod permission;
pub mod redirect;
pub mod service;
pub mod toggle;

pub use bridge::{ActionBridge, ActionCommand, BridgeError, CreationKind};
pub use creation::{Addressable, AttemptId, CreationProgress};
pub use dialog::{ConfirmationDialog, PendingToggle, CANCEL_LABEL, CONFIRM_LABEL};
pub use permission::{PermissionGate, PERMISSION_DENIED_HINT};
pub use redirect::{CreateAndRedirectController, Navigation, SubmitOutcome, TransitionMemory};
pub use service::{DictionaryService, HttpDictionaryService};
pub use toggle::{
    ActionFailure, CreateAffordance, CreateOutcome, RowView, ToggleConfirmController, ToggleError,
    ToggleOutcome,
};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
