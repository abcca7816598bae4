//! Create-dictionary page: form, progress, and verbatim error display.

use admin_core::{ActionCommand, CreateAndRedirectController, SubmitOutcome};
use eframe::egui;
use shared::{domain::PublicAccess, protocol::NewDictionary};

use crate::controller::{orchestration::QueueBridge, reducer::AdminStore};

#[derive(Debug, Clone, Default)]
pub struct DictionaryFormState {
    pub name: String,
    pub short_code: String,
    pub description: String,
    pub preferred_source: String,
    pub public_access: PublicAccess,
    pub owner_url: String,
    pub default_locale: String,
    pub supported_locales: String,
}

impl DictionaryFormState {
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.short_code.trim().is_empty()
            && !self.owner_url.trim().is_empty()
    }

    pub fn to_new_dictionary(&self) -> NewDictionary {
        NewDictionary {
            name: self.name.trim().to_string(),
            short_code: self.short_code.trim().to_string(),
            description: self.description.trim().to_string(),
            preferred_source: self.preferred_source.trim().to_string(),
            public_access: self.public_access,
            owner_url: self.owner_url.trim().to_string(),
            default_locale: self.default_locale.trim().to_string(),
            supported_locales: self
                .supported_locales
                .split(',')
                .map(str::trim)
                .filter(|locale| !locale.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

fn access_label(access: PublicAccess) -> &'static str {
    match access {
        PublicAccess::View => "View",
        PublicAccess::Edit => "Edit",
        PublicAccess::None => "None",
    }
}

/// Owner choices: the signed-in user first, then their organisations.
fn owner_options(store: &AdminStore) -> Vec<(String, String)> {
    let mut options = Vec::new();
    if let Some(profile) = &store.profile {
        options.push((format!("{} (you)", profile.username), profile.url.clone()));
    }
    options.extend(
        store
            .orgs
            .iter()
            .map(|org| (org.name.clone(), org.url.clone())),
    );
    options
}

pub fn show_create_page(
    ui: &mut egui::Ui,
    form: &mut DictionaryFormState,
    store: &AdminStore,
    redirect: Option<&mut CreateAndRedirectController>,
    bridge: &QueueBridge,
) {
    let progress = &store.dictionary_creation;
    let options = owner_options(store);
    if form.owner_url.is_empty() {
        if let Some((_, url)) = options.first() {
            form.owner_url = url.clone();
        }
    }

    ui.heading("Create dictionary");
    ui.add_space(8.0);

    ui.add_enabled_ui(!progress.loading(), |ui| {
        egui::Grid::new("create_dictionary_form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Dictionary name");
                ui.text_edit_singleline(&mut form.name);
                ui.end_row();

                ui.label("Short code");
                ui.text_edit_singleline(&mut form.short_code);
                ui.end_row();

                ui.label("Description");
                ui.text_edit_multiline(&mut form.description);
                ui.end_row();

                ui.label("Preferred source");
                ui.text_edit_singleline(&mut form.preferred_source);
                ui.end_row();

                ui.label("Owner");
                let selected = options
                    .iter()
                    .find(|(_, url)| url == &form.owner_url)
                    .map(|(label, _)| label.clone())
                    .unwrap_or_default();
                egui::ComboBox::from_id_salt("dictionary_owner")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for (label, url) in &options {
                            ui.selectable_value(&mut form.owner_url, url.clone(), label.as_str());
                        }
                    });
                ui.end_row();

                ui.label("Visibility");
                egui::ComboBox::from_id_salt("dictionary_visibility")
                    .selected_text(access_label(form.public_access))
                    .show_ui(ui, |ui| {
                        for access in [PublicAccess::View, PublicAccess::Edit, PublicAccess::None] {
                            ui.selectable_value(&mut form.public_access, access, access_label(access));
                        }
                    });
                ui.end_row();

                ui.label("Preferred language");
                ui.text_edit_singleline(&mut form.default_locale);
                ui.end_row();

                ui.label("Other languages");
                ui.text_edit_singleline(&mut form.supported_locales)
                    .on_hover_text("Comma separated, e.g. fr, es");
                ui.end_row();
            });
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        let submit = ui.add_enabled(
            form.is_submittable() && !progress.loading(),
            egui::Button::new("Submit"),
        );
        if progress.loading() {
            ui.spinner();
        }
        if submit.clicked() {
            let Some(redirect) = redirect else {
                tracing::warn!("create submitted without a mounted controller");
                return;
            };
            let cmd = ActionCommand::CreateDictionary(form.to_new_dictionary());
            match redirect.submit(bridge, cmd) {
                Ok(SubmitOutcome::Dispatched) => {}
                Ok(outcome) => tracing::debug!(?outcome, "dictionary submission ignored"),
                Err(err) => tracing::warn!("failed to dispatch dictionary creation: {err}"),
            }
        }
    });

    if let Some(error) = progress.error() {
        ui.colored_label(ui.visuals().error_fg_color, error.verbatim());
    }
}
