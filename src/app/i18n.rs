// Built-in English/French string tables with optional overrides from
// `i18n.json` next to the executable.

use log::debug;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

type Table = HashMap<String, String>;
type Tables = HashMap<String, Table>;

const BUILTIN: &str = r#"{
  "en": {
    "title": "Service Toggle Control",
    "header": "Version: {version} · Author: {author}",
    "status_service_running": "Service: running",
    "status_service_stopped": "Service: stopped",
    "status_program_running": "Program: running",
    "status_program_stopped": "Program: stopped",
    "status_switching": "Switching, please wait...",
    "button_start": "Start service + program",
    "button_stop": "Stop service + program",
    "description_default": "No description provided."
  },
  "fr": {
    "title": "Contrôle du service",
    "header": "Version : {version} · Auteur : {author}",
    "status_service_running": "Service : en cours",
    "status_service_stopped": "Service : arrêté",
    "status_program_running": "Programme : en cours",
    "status_program_stopped": "Programme : arrêté",
    "status_switching": "Bascule en cours...",
    "button_start": "Démarrer le service + programme",
    "button_stop": "Arrêter le service + programme",
    "description_default": "Aucune description renseignée."
  }
}"#;

pub struct Translations {
    tables: Tables,
    lang: String,
}

impl Translations {
    /// Built-in tables plus any `i18n.json` overrides, language picked from
    /// the process locale.
    pub fn load(dir: &Path) -> Self {
        let mut tables = builtin_tables();

        if let Ok(raw) = fs::read_to_string(dir.join("i18n.json")) {
            match serde_json::from_str::<Tables>(&raw) {
                // Overrides replace whole languages, same layout as BUILTIN.
                Ok(overrides) => tables.extend(overrides),
                Err(err) => debug!("ignoring malformed i18n.json: {}", err),
            }
        }

        Self::with_tables(tables, &locale_from_env())
    }

    fn with_tables(tables: Tables, locale: &str) -> Self {
        let mut lang = language_for_locale(locale).to_string();
        if !tables.contains_key(&lang) {
            lang = "en".to_string();
        }
        Self { tables, lang }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Selected language first, then English, then the key itself.
    pub fn tr<'a>(&'a self, key: &'a str) -> &'a str {
        self.tables
            .get(&self.lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.tables.get("en").and_then(|table| table.get(key)))
            .map(String::as_str)
            .unwrap_or(key)
    }
}

fn builtin_tables() -> Tables {
    serde_json::from_str(BUILTIN).expect("built-in string tables are valid JSON")
}

/// French for any `fr*` locale, English otherwise.
fn language_for_locale(locale: &str) -> &'static str {
    if locale.to_lowercase().starts_with("fr") {
        "fr"
    } else {
        "en"
    }
}

fn locale_from_env() -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .find_map(|var| env::var(var).ok().filter(|value| !value.is_empty()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_parse_and_cover_both_languages() {
        let tables = builtin_tables();
        let en = tables.get("en").unwrap();
        let fr = tables.get("fr").unwrap();
        for key in en.keys() {
            assert!(fr.contains_key(key), "fr table is missing {key}");
        }
    }

    #[test]
    fn locale_picks_language() {
        assert_eq!(language_for_locale("fr_FR.UTF-8"), "fr");
        assert_eq!(language_for_locale("FR"), "fr");
        assert_eq!(language_for_locale("en_US.UTF-8"), "en");
        assert_eq!(language_for_locale("de_DE"), "en");
        assert_eq!(language_for_locale(""), "en");
    }

    #[test]
    fn french_lookup_uses_french_table() {
        let i18n = Translations::with_tables(builtin_tables(), "fr_FR.UTF-8");
        assert_eq!(i18n.lang(), "fr");
        assert_eq!(i18n.tr("status_service_running"), "Service : en cours");
    }

    #[test]
    fn missing_key_falls_back_to_english_then_key() {
        let mut tables = builtin_tables();
        tables.get_mut("fr").unwrap().remove("title");

        let i18n = Translations::with_tables(tables, "fr_FR.UTF-8");
        assert_eq!(i18n.tr("title"), "Service Toggle Control");
        assert_eq!(i18n.tr("no_such_key"), "no_such_key");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let mut tables = builtin_tables();
        tables.remove("fr");

        let i18n = Translations::with_tables(tables, "fr_FR.UTF-8");
        assert_eq!(i18n.lang(), "en");
    }
}
