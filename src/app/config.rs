// Target definition and manifest metadata, loaded best effort from JSON files
// next to the executable.

use log::debug;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Which service/program pair to control and how often to re-probe it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service_name: String,
    pub program_name: String,
    /// Absolute install-path candidates tried before falling back to PATH.
    pub program_candidates: Vec<PathBuf>,
    pub poll_interval_ms: u64,
}

#[cfg(target_os = "windows")]
impl Default for Config {
    fn default() -> Self {
        let mut candidates = Vec::new();
        for var in ["ProgramFiles", "ProgramFiles(x86)"] {
            if let Ok(dir) = env::var(var) {
                candidates.push(PathBuf::from(dir).join("Windows Defender").join("WpcMon.exe"));
            }
        }

        Self {
            service_name: "WpcMonSvc".to_string(),
            program_name: "WpcMon.exe".to_string(),
            program_candidates: candidates,
            poll_interval_ms: 2000,
        }
    }
}

#[cfg(not(target_os = "windows"))]
impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "wpcmon.service".to_string(),
            program_name: "wpcmon".to_string(),
            program_candidates: vec![
                PathBuf::from("/usr/bin/wpcmon"),
                PathBuf::from("/usr/local/bin/wpcmon"),
            ],
            poll_interval_ms: 2000,
        }
    }
}

impl Config {
    /// Loads `config.json` from `dir`. Missing fields keep their defaults;
    /// a missing or malformed file falls back to the full defaults.
    pub fn load(dir: &Path) -> Self {
        load_json(&dir.join("config.json"))
    }
}

/// Display metadata shown in the header and the description popup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub author: String,
    pub description: Description,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            name: "Service Toggle".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            author: "Unknown".to_string(),
            description: Description::default(),
        }
    }
}

impl Manifest {
    pub fn load(dir: &Path) -> Self {
        load_json(&dir.join("manifest.json"))
    }
}

/// Per-language description text. Accepts either a plain string (treated as
/// English) or an `{ "en": ..., "fr": ... }` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawDescription")]
pub struct Description {
    pub en: String,
    pub fr: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDescription {
    Text(String),
    Table {
        #[serde(default)]
        en: String,
        #[serde(default)]
        fr: String,
    },
}

impl From<RawDescription> for Description {
    fn from(raw: RawDescription) -> Self {
        match raw {
            RawDescription::Text(en) => Self {
                en,
                fr: String::new(),
            },
            RawDescription::Table { en, fr } => Self { en, fr },
        }
    }
}

impl Description {
    /// Text for `lang`, falling back to English.
    pub fn get(&self, lang: &str) -> &str {
        let text = match lang {
            "fr" => self.fr.as_str(),
            _ => self.en.as_str(),
        };
        if text.is_empty() { self.en.as_str() } else { text }
    }
}

/// Directory holding the running executable, or the working directory when
/// that cannot be determined.
pub fn exe_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn load_json<T>(path: &Path) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                debug!("ignoring malformed {}: {}", path.display(), err);
                T::default()
            }
        },
        Err(_) => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_accepts_plain_string_description() {
        let manifest: Manifest =
            serde_json::from_str(r#"{ "name": "X", "description": "just text" }"#).unwrap();
        assert_eq!(manifest.name, "X");
        assert_eq!(manifest.description.en, "just text");
        // French falls back to the English text.
        assert_eq!(manifest.description.get("fr"), "just text");
    }

    #[test]
    fn manifest_missing_fields_use_defaults() {
        let manifest: Manifest = serde_json::from_str("{}").unwrap();
        assert_eq!(manifest.name, "Service Toggle");
        assert_eq!(manifest.author, "Unknown");
        assert_eq!(manifest.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn description_table_keeps_both_languages() {
        let desc: Description = serde_json::from_str(r#"{ "en": "a", "fr": "b" }"#).unwrap();
        assert_eq!(desc.get("en"), "a");
        assert_eq!(desc.get("fr"), "b");
        assert_eq!(desc.get("de"), "a");
    }

    #[test]
    fn partial_config_keeps_per_field_defaults() {
        let config: Config = serde_json::from_str(r#"{ "service_name": "foo.service" }"#).unwrap();
        assert_eq!(config.service_name, "foo.service");
        assert_eq!(config.poll_interval_ms, 2000);
        assert!(!config.program_name.is_empty());
    }

    #[test]
    fn malformed_manifest_falls_back_to_defaults() {
        let dir = env::temp_dir().join(format!("svc-toggle-manifest-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("manifest.json"), "not json").unwrap();

        let manifest = Manifest::load(&dir);
        assert_eq!(manifest.name, "Service Toggle");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_config_file_loads_defaults() {
        let dir = env::temp_dir().join(format!("svc-toggle-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let config = Config::load(&dir);
        assert_eq!(config.poll_interval_ms, 2000);
        assert!(!config.service_name.is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }
}
