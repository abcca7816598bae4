//! Backend -> UI events and error modeling for the admin controller layer.

use admin_core::CreationKind;
use shared::{
    domain::{DictionaryRecord, OrgMembership, Profile, VersionId, VersionRecord},
    error::ApiError,
};

#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    SessionLoaded {
        profile: Option<Profile>,
        orgs: Vec<OrgMembership>,
    },
    DictionaryLoaded(DictionaryRecord),
    VersionsLoaded {
        dictionary_url: String,
        versions: Vec<VersionRecord>,
    },
    VersionUpdated(VersionRecord),
    VersionEditFailed {
        id: VersionId,
        error: ApiError,
    },
    CreationStarted(CreationKind),
    VersionCreated(VersionRecord),
    DictionaryCreated(DictionaryRecord),
    CreationFailed {
        kind: CreationKind,
        error: ApiError,
    },
    CreationReset(CreationKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Session,
    LoadDictionary,
    Dispatch,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("401")
            || message_lower.contains("403")
            || message_lower.contains("unauthorized")
            || message_lower.contains("forbidden")
            || message_lower.contains("invalid token")
        {
            UiErrorCategory::Auth
        } else if message_lower.contains("invalid")
            || message_lower.contains("required")
            || message_lower.contains("malformed")
            || message_lower.contains("validation")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Auth => "Authentication",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
