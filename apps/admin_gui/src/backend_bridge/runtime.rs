//! Runtime bridge between UI command queue and backend event intake.
//!
//! Commands are handled one at a time in arrival order. Every outcome goes
//! back to the UI as a [`UiEvent`]; nothing is returned to the dispatcher.

use std::{sync::Arc, thread};

use admin_core::{ActionCommand, CreationKind, DictionaryService};
use crossbeam_channel::{Receiver, Sender};
use shared::error::ApiError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Default)]
pub struct WorkerState {
    dictionary_url: Option<String>,
}

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    service: Arc<dyn DictionaryService>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            let mut state = WorkerState::default();
            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(service.as_ref(), &mut state, cmd, &ui_tx).await;
            }
            tracing::debug!("command queue closed; backend worker exiting");
        });
    });
}

fn emit(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if ui_tx.try_send(event).is_err() {
        tracing::warn!("ui event queue unavailable; dropping backend event");
    }
}

pub async fn handle_command(
    service: &dyn DictionaryService,
    state: &mut WorkerState,
    cmd: BackendCommand,
    ui_tx: &Sender<UiEvent>,
) {
    tracing::debug!(command = cmd.name(), "backend handling command");
    match cmd {
        BackendCommand::LoadSession => {
            let profile = match service.retrieve_profile().await {
                Ok(profile) => Some(profile),
                Err(err) => {
                    emit(
                        ui_tx,
                        UiEvent::Error(UiError::from_message(UiErrorContext::Session, err.message)),
                    );
                    None
                }
            };
            let orgs = match service.list_user_orgs().await {
                Ok(orgs) => orgs,
                Err(err) => {
                    tracing::warn!("failed to list user organisations: {err}");
                    Vec::new()
                }
            };
            emit(ui_tx, UiEvent::SessionLoaded { profile, orgs });
        }
        BackendCommand::OpenDictionary { dictionary_url } => {
            state.dictionary_url = Some(dictionary_url.clone());
            match service.retrieve_dictionary(&dictionary_url).await {
                Ok(dictionary) => emit(ui_tx, UiEvent::DictionaryLoaded(dictionary)),
                Err(err) => {
                    emit(
                        ui_tx,
                        UiEvent::Error(UiError::from_message(
                            UiErrorContext::LoadDictionary,
                            err.message,
                        )),
                    );
                    return;
                }
            }
            refresh_versions(service, &dictionary_url, ui_tx).await;
        }
        BackendCommand::RefreshVersions => {
            if let Some(dictionary_url) = state.dictionary_url.clone() {
                refresh_versions(service, &dictionary_url, ui_tx).await;
            }
        }
        BackendCommand::Action(action) => handle_action(service, state, action, ui_tx).await,
    }
}

async fn refresh_versions(service: &dyn DictionaryService, dictionary_url: &str, ui_tx: &Sender<UiEvent>) {
    match service.list_versions(dictionary_url).await {
        Ok(versions) => emit(
            ui_tx,
            UiEvent::VersionsLoaded {
                dictionary_url: dictionary_url.to_string(),
                versions,
            },
        ),
        Err(err) => emit(
            ui_tx,
            UiEvent::Error(UiError::from_message(
                UiErrorContext::LoadDictionary,
                err.message,
            )),
        ),
    }
}

async fn handle_action(
    service: &dyn DictionaryService,
    state: &mut WorkerState,
    action: ActionCommand,
    ui_tx: &Sender<UiEvent>,
) {
    match action {
        ActionCommand::EditVersion(request) => {
            let Some(dictionary_url) = state.dictionary_url.clone() else {
                tracing::warn!(id = %request.id, "edit requested with no dictionary open");
                return;
            };
            match service.edit_version(&dictionary_url, &request).await {
                Ok(updated) => emit(ui_tx, UiEvent::VersionUpdated(updated)),
                Err(err) => emit(
                    ui_tx,
                    UiEvent::VersionEditFailed {
                        id: request.id,
                        error: ApiError::from(err),
                    },
                ),
            }
        }
        ActionCommand::CreateVersion { dictionary_url } => {
            emit(ui_tx, UiEvent::CreationStarted(CreationKind::Version));
            match service.create_version(&dictionary_url).await {
                Ok(created) => {
                    emit(ui_tx, UiEvent::VersionCreated(created));
                    refresh_versions(service, &dictionary_url, ui_tx).await;
                }
                Err(err) => emit(
                    ui_tx,
                    UiEvent::CreationFailed {
                        kind: CreationKind::Version,
                        error: ApiError::from(err),
                    },
                ),
            }
        }
        ActionCommand::CreateDictionary(form) => {
            emit(ui_tx, UiEvent::CreationStarted(CreationKind::Dictionary));
            match service.create_dictionary(&form).await {
                Ok(created) => emit(ui_tx, UiEvent::DictionaryCreated(created)),
                Err(err) => emit(
                    ui_tx,
                    UiEvent::CreationFailed {
                        kind: CreationKind::Dictionary,
                        error: ApiError::from(err),
                    },
                ),
            }
        }
        ActionCommand::ResetCreation(kind) => emit(ui_tx, UiEvent::CreationReset(kind)),
    }
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
