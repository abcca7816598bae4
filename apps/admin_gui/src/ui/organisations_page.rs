//! Organisations the signed-in user belongs to.

use eframe::egui;
use shared::domain::OrgMembership;

use crate::controller::reducer::AdminStore;

/// Memberships ordered by display name, ignoring case.
pub fn sorted_memberships(orgs: &[OrgMembership]) -> Vec<&OrgMembership> {
    let mut sorted: Vec<&OrgMembership> = orgs.iter().collect();
    sorted.sort_by_key(|org| org.name.to_lowercase());
    sorted
}

/// Returns the owner URL to create a dictionary under, when asked.
pub fn show_organisations_page(ui: &mut egui::Ui, store: &AdminStore) -> Option<String> {
    ui.heading("My organisations");
    ui.add_space(8.0);

    if store.profile.is_none() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading your profile");
        });
        return None;
    }
    if store.orgs.is_empty() {
        ui.label("You are not a member of any organisation.");
        return None;
    }

    let mut create_under = None;
    egui::Grid::new("personal_organisations")
        .striped(true)
        .num_columns(4)
        .show(ui, |ui| {
            for header in ["ID", "Name", "URL", ""] {
                ui.strong(header);
            }
            ui.end_row();

            for org in sorted_memberships(&store.orgs) {
                ui.label(org.id.as_str());
                ui.label(org.name.as_str());
                ui.label(org.url.as_str());
                if ui.small_button("New dictionary").clicked() {
                    create_under = Some(org.url.clone());
                }
                ui.end_row();
            }
        });
    create_under
}
