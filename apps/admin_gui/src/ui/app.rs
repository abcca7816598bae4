use admin_core::{
    ActionBridge, ActionCommand, BridgeError, CreateAndRedirectController, CreationKind,
    PermissionGate, ToggleConfirmController,
};
use crossbeam_channel::Receiver;
use eframe::egui;
use shared::domain::same_resource_url;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::PersistedAdminSettings;
use crate::controller::{
    events::{err_label, UiError, UiErrorContext, UiEvent},
    orchestration::QueueBridge,
    reducer::AdminStore,
};
use crate::ui::{
    create_page::{show_create_page, DictionaryFormState},
    organisations_page::show_organisations_page,
    versions_panel::{show_confirmation, show_versions_panel},
};

fn dispatch_failed(err: BridgeError) -> UiEvent {
    UiEvent::Error(UiError::from_message(UiErrorContext::Dispatch, err.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Dictionary { url: String },
    CreateDictionary,
    Organisations,
}

pub struct AdminApp {
    bridge: QueueBridge,
    ui_rx: Receiver<UiEvent>,
    store: AdminStore,
    route: Route,
    toggles: ToggleConfirmController,
    redirect: Option<CreateAndRedirectController>,
    form: DictionaryFormState,
    open_url_input: String,
    last_dictionary_url: Option<String>,
}

impl AdminApp {
    pub fn new(
        bridge: QueueBridge,
        ui_rx: Receiver<UiEvent>,
        startup_dictionary: Option<String>,
        persisted: Option<PersistedAdminSettings>,
    ) -> Self {
        let persisted = persisted.unwrap_or_default();
        let mut app = Self {
            bridge,
            ui_rx,
            store: AdminStore::default(),
            route: Route::Home,
            toggles: ToggleConfirmController::new(PermissionGate::denied()),
            redirect: None,
            form: DictionaryFormState::default(),
            open_url_input: String::new(),
            last_dictionary_url: persisted.last_dictionary_url.clone(),
        };

        app.send(BackendCommand::LoadSession);
        if let Some(url) = startup_dictionary.or(persisted.last_dictionary_url) {
            app.open_url_input = url.clone();
            app.navigate(Route::Dictionary { url });
        }
        app
    }

    fn send(&mut self, cmd: BackendCommand) {
        if let Err(err) = self.bridge.send(cmd) {
            self.store.apply(dispatch_failed(err));
        }
    }

    fn navigate(&mut self, route: Route) {
        if self.route == route {
            return;
        }
        tracing::info!(?route, "navigating");

        if let Some(redirect) = self.redirect.take() {
            redirect.dispose();
        }

        match &route {
            Route::Home | Route::Organisations => {}
            Route::Dictionary { url } => {
                self.toggles = ToggleConfirmController::new(PermissionGate::denied());
                self.store.close_dictionary();
                self.store.apply(UiEvent::CreationReset(CreationKind::Version));
                if let Err(err) = self
                    .bridge
                    .dispatch(ActionCommand::ResetCreation(CreationKind::Version))
                {
                    self.store.apply(dispatch_failed(err));
                }
                self.send(BackendCommand::OpenDictionary {
                    dictionary_url: url.clone(),
                });
                self.last_dictionary_url = Some(url.clone());
            }
            Route::CreateDictionary => {
                self.form = DictionaryFormState::default();
                // Leftover progress must be gone before the first observation.
                self.store.apply(UiEvent::CreationReset(CreationKind::Dictionary));
                match CreateAndRedirectController::mount(&self.bridge, CreationKind::Dictionary) {
                    Ok(redirect) => self.redirect = Some(redirect),
                    Err(err) => self.store.apply(dispatch_failed(err)),
                }
            }
        }
        self.route = route;
    }

    /// Applies backend events one at a time. The redirect controller sees
    /// every intermediate creation snapshot, so no loading edge is skipped
    /// when several events arrive in one frame.
    fn process_ui_events(&mut self) {
        let mut navigation = None;
        while let Ok(event) = self.ui_rx.try_recv() {
            self.store.apply(event);
            if let Some(redirect) = self.redirect.as_mut() {
                if let Some(nav) = redirect.observe(&self.store.dictionary_creation) {
                    navigation = Some(nav);
                }
            }
        }

        for failure in self.store.take_failures() {
            self.toggles.report_failure(failure);
        }
        self.toggles.set_permission(self.store.permission());
        self.toggles.observe(
            self.store.versions.clone(),
            self.store.version_creation.clone(),
        );

        if let Some(nav) = navigation {
            self.open_url_input = nav.to.clone();
            self.navigate(Route::Dictionary { url: nav.to });
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        let mut next_route = None;
        egui::TopBottomPanel::top("admin_nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Dictionary URL");
                ui.text_edit_singleline(&mut self.open_url_input);
                let url = self.open_url_input.trim();
                if ui
                    .add_enabled(!url.is_empty(), egui::Button::new("Open"))
                    .clicked()
                {
                    next_route = Some(Route::Dictionary {
                        url: url.to_string(),
                    });
                }
                ui.separator();
                if ui.button("New dictionary").clicked() {
                    next_route = Some(Route::CreateDictionary);
                }
                if ui.button("My organisations").clicked() {
                    next_route = Some(Route::Organisations);
                }
                if matches!(self.route, Route::Dictionary { .. })
                    && ui.button("Refresh").clicked()
                {
                    if let Err(err) = self.bridge.send(BackendCommand::RefreshVersions) {
                        self.store.apply(dispatch_failed(err));
                    }
                }
            });
        });
        if let Some(route) = next_route {
            self.navigate(route);
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("admin_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(banner) = &self.store.banner {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!(
                            "{} error ({:?}): {}",
                            err_label(banner.category()),
                            banner.context(),
                            banner.message()
                        ),
                    );
                    if ui.small_button("✕").clicked() {
                        self.store.banner = None;
                    }
                } else {
                    ui.label(self.store.status.as_str());
                }
            });
        });
    }

    fn show_dictionary(&mut self, ui: &mut egui::Ui, url: &str) {
        match &self.store.dictionary {
            Some(dictionary) if same_resource_url(&dictionary.url, url) => {
                ui.heading(dictionary.name.as_str());
                if let Some(description) = &dictionary.description {
                    ui.label(description.as_str());
                }
                ui.small(format!("Owner: {}", dictionary.owner));
            }
            _ => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("Loading {url}"));
                });
            }
        }
        ui.separator();
        show_versions_panel(ui, &mut self.toggles, &self.bridge, url);
    }
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_top_bar(ctx);
        self.show_status_bar(ctx);

        let route = self.route.clone();
        let mut create_under = None;
        egui::CentralPanel::default().show(ctx, |ui| match &route {
            Route::Home => {
                ui.heading("Dictionary administration");
                ui.label("Open a dictionary by URL or create a new one.");
            }
            Route::Dictionary { url } => self.show_dictionary(ui, url),
            Route::CreateDictionary => show_create_page(
                ui,
                &mut self.form,
                &self.store,
                self.redirect.as_mut(),
                &self.bridge,
            ),
            Route::Organisations => {
                if let Some(owner_url) = show_organisations_page(ui, &self.store) {
                    create_under = Some(owner_url);
                }
            }
        });

        if let Some(owner_url) = create_under {
            self.navigate(Route::CreateDictionary);
            self.form.owner_url = owner_url;
        }

        if matches!(route, Route::Dictionary { .. }) {
            show_confirmation(ctx, &mut self.toggles, &self.bridge);
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        PersistedAdminSettings {
            last_dictionary_url: self.last_dictionary_url.clone(),
        }
        .write(storage);
    }
}

#[cfg(test)]
#[path = "../tests/app_tests.rs"]
mod tests;
