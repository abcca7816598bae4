use super::*;
use eframe::Storage as _;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("dictionary_admin_config_test_{suffix}"));
    fs::create_dir_all(&root).expect("temp root");
    let path = root.join("admin.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn missing_file_keeps_defaults() {
    let mut settings = Settings::default();
    apply_file(&mut settings, Path::new("definitely/not/here/admin.toml")).expect("missing is ok");
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config(
        r#"
api_url = "https://api.example.org"
dictionary_url = "/orgs/CIEL/collections/MAL/"
log_level = "debug"
"#,
    );
    let mut settings = Settings::default();
    apply_file(&mut settings, &path).expect("load");

    assert_eq!(settings.api_base_url, "https://api.example.org");
    assert_eq!(
        settings.dictionary_url.as_deref(),
        Some("/orgs/CIEL/collections/MAL/")
    );
    assert_eq!(settings.log_level, "debug");
    assert_eq!(settings.api_token, None);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn malformed_file_is_an_error() {
    let path = temp_config("api_url = [");
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, &path).is_err());
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_then_args_take_precedence() {
    let mut settings = Settings::default();
    apply_env(&mut settings, |key| match key {
        "APP__API_URL" => Some("https://env.example.org".to_string()),
        "APP__API_TOKEN" => Some("env-token".to_string()),
        _ => None,
    });
    assert_eq!(settings.api_base_url, "https://env.example.org");

    let args = Args {
        api_url: Some("https://cli.example.org".to_string()),
        ..Args::default()
    };
    apply_args(&mut settings, &args);
    assert_eq!(settings.api_base_url, "https://cli.example.org");
    assert_eq!(settings.api_token.as_deref(), Some("env-token"));
}

#[derive(Default)]
struct MemoryStorage {
    values: HashMap<String, String>,
}

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) {}
}

#[test]
fn persisted_settings_live_in_app_storage() {
    let mut storage = MemoryStorage::default();
    assert_eq!(PersistedAdminSettings::read(&storage), None);

    let persisted = PersistedAdminSettings {
        last_dictionary_url: Some("/users/alice/collections/MAL/".to_string()),
    };
    persisted.write(&mut storage);

    assert!(storage.values.contains_key(SETTINGS_STORAGE_KEY));
    assert_eq!(PersistedAdminSettings::read(&storage), Some(persisted));
}

#[test]
fn unreadable_stored_settings_are_ignored() {
    let mut storage = MemoryStorage::default();
    storage.set_string(SETTINGS_STORAGE_KEY, "{not json".to_string());
    assert_eq!(PersistedAdminSettings::read(&storage), None);
}
