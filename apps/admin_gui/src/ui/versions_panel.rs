//! Released versions table, release toggles, and the confirmation window.

use admin_core::{
    ActionFailure, ToggleConfirmController, ToggleOutcome, CANCEL_LABEL, CONFIRM_LABEL,
};
use eframe::egui;
use shared::domain::VersionId;

use crate::controller::orchestration::QueueBridge;

pub const TABLE_HEADERS: [&str; 5] = [
    "ID",
    "Description",
    "Concepts",
    "Subscription URL",
    "Release Status",
];

pub fn show_versions_panel(
    ui: &mut egui::Ui,
    toggles: &mut ToggleConfirmController,
    bridge: &QueueBridge,
    dictionary_url: &str,
) {
    ui.horizontal(|ui| {
        ui.heading("Releases");
        if let Some(create) = toggles.create_affordance() {
            let clicked = ui
                .add_enabled(!create.loading, egui::Button::new("Create new version"))
                .clicked();
            if create.loading {
                ui.spinner();
            }
            if clicked {
                if let Err(err) = toggles.request_create_version(bridge, dictionary_url) {
                    tracing::warn!("{err}");
                }
            }
        }
    });

    if let Some(error) = toggles.create_affordance().and_then(|c| c.error) {
        ui.colored_label(ui.visuals().error_fg_color, error);
    }

    if let Some(message) = toggles.last_failure().map(ActionFailure::message) {
        ui.horizontal(|ui| {
            ui.colored_label(ui.visuals().error_fg_color, message);
            if ui.small_button("Dismiss").clicked() {
                toggles.clear_failure();
            }
        });
    }

    ui.add_space(6.0);

    if toggles.versions().is_empty() {
        ui.label("No versions released yet.");
        return;
    }

    let rows = toggles.rows();
    let mut clicked: Option<VersionId> = None;
    egui::Grid::new("released_versions")
        .striped(true)
        .num_columns(TABLE_HEADERS.len())
        .show(ui, |ui| {
            for header in TABLE_HEADERS {
                ui.strong(header);
            }
            ui.end_row();

            for (row, version) in rows.iter().zip(toggles.versions()) {
                ui.label(row.id.as_str());
                ui.label(version.description.as_deref().unwrap_or(""));
                ui.label(
                    version
                        .concept_count
                        .map(|count| count.to_string())
                        .unwrap_or_default(),
                );
                ui.label(version.version_url.as_str());

                ui.push_id(row.id.as_str(), |ui| {
                    ui.horizontal(|ui| {
                        // Bound to a throwaway copy so a click never flips the box.
                        let mut shown = row.displayed_released;
                        let mut response = ui
                            .add_enabled(row.interactive, egui::Checkbox::without_text(&mut shown));
                        if let Some(hint) = row.denial_hint {
                            response = response.on_disabled_hover_text(hint);
                            // A disabled checkbox takes no focus; keep the reason visible.
                            ui.weak(hint);
                        }
                        if response.clicked() {
                            clicked = Some(row.id.clone());
                        }
                    });
                });
                ui.end_row();
            }
        });

    if let Some(id) = clicked {
        match toggles.request_toggle(&id) {
            ToggleOutcome::Pending(_) => {}
            outcome => tracing::debug!(%id, ?outcome, "toggle did not open a confirmation"),
        }
    }
}

pub fn show_confirmation(
    ctx: &egui::Context,
    toggles: &mut ToggleConfirmController,
    bridge: &QueueBridge,
) {
    let Some(dialog) = toggles.dialog() else {
        return;
    };

    let mut decision: Option<bool> = None;
    egui::Window::new("Confirm release status")
        .id(egui::Id::new("confirm-dialog"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(dialog.message());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button(CONFIRM_LABEL).clicked() {
                    decision = Some(true);
                }
                if ui.button(CANCEL_LABEL).clicked() {
                    decision = Some(false);
                }
            });
        });

    match decision {
        Some(true) => {
            if let Err(err) = toggles.confirm(bridge) {
                tracing::warn!("{err}");
            }
        }
        Some(false) => {
            toggles.cancel();
        }
        None => {}
    }
}
