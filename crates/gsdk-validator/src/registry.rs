use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::config::{AppEngineSdkConfig, GoSdkConfig, SdkConfig, SdkVariant};

const STATE_FILE_ENV: &str = "GSDK_STATE_FILE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SdkEntry {
    pub(crate) name: String,
    pub(crate) home_path: PathBuf,
    pub(crate) variant: SdkVariant,
    pub(crate) config: Option<SdkConfig>,
}

#[derive(Debug, Error)]
pub(crate) enum RegistryError {
    #[error("unknown sdk entry '{0}'")]
    UnknownEntry(String),
    #[error("failed to persist sdk registry: {0}")]
    Persist(#[from] io::Error),
}

pub(crate) trait SdkRegistry {
    fn entries(&self, variant: SdkVariant) -> Vec<SdkEntry>;
    fn commit(&mut self, name: &str, config: Option<SdkConfig>) -> Result<(), RegistryError>;
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct PersistedState {
    sdks: Vec<PersistedSdk>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct PersistedSdk {
    name: String,
    home_path: String,
    variant: String,
    config: Option<PersistedConfig>,
}

// One flat shape covers both variants; unused fields stay empty.
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct PersistedConfig {
    version: String,
    target_os: String,
    target_arch: String,
    go_binary: String,
    api_versions: Vec<String>,
}

impl PersistedSdk {
    fn from_entry(entry: &SdkEntry) -> Self {
        PersistedSdk {
            name: entry.name.clone(),
            home_path: entry.home_path.to_string_lossy().into_owned(),
            variant: entry.variant.as_str().to_string(),
            config: entry.config.as_ref().map(|config| match config {
                SdkConfig::Go(data) => PersistedConfig {
                    version: data.version.clone(),
                    target_os: data.target_os.clone(),
                    target_arch: data.target_arch.clone(),
                    go_binary: data.go_binary.clone(),
                    api_versions: Vec::new(),
                },
                SdkConfig::AppEngine(data) => PersistedConfig {
                    version: String::new(),
                    target_os: data.target_os.clone().unwrap_or_default(),
                    target_arch: data.target_arch.clone().unwrap_or_default(),
                    go_binary: String::new(),
                    api_versions: data.api_versions.clone(),
                },
            }),
        }
    }

    fn into_entry(self) -> Option<SdkEntry> {
        if self.name.trim().is_empty() {
            warn!("Skipping sdk entry with empty name in persisted state");
            return None;
        }
        let variant = match SdkVariant::parse(&self.variant) {
            Some(variant) => variant,
            None => {
                warn!(
                    "Skipping sdk entry '{}' with unknown variant '{}'",
                    self.name, self.variant
                );
                return None;
            }
        };
        let config = self.config.map(|config| match variant {
            SdkVariant::Go => SdkConfig::Go(GoSdkConfig {
                version: config.version,
                target_os: config.target_os,
                target_arch: config.target_arch,
                go_binary: config.go_binary,
            }),
            SdkVariant::GoAppEngine => SdkConfig::AppEngine(AppEngineSdkConfig {
                target_os: Some(config.target_os).filter(|value| !value.is_empty()),
                target_arch: Some(config.target_arch).filter(|value| !value.is_empty()),
                api_versions: config.api_versions,
            }),
        });
        Some(SdkEntry {
            name: self.name,
            home_path: gsdk_util::expand_user(&self.home_path),
            variant,
            config,
        })
    }
}

pub(crate) struct FileRegistry {
    path: PathBuf,
    sdks: Vec<SdkEntry>,
}

impl FileRegistry {
    pub(crate) fn open_default() -> Self {
        let path = match std::env::var(STATE_FILE_ENV) {
            Ok(value) if !value.trim().is_empty() => gsdk_util::expand_user(&value),
            _ => gsdk_util::state_file_path("sdks.json"),
        };
        Self::load(path)
    }

    pub(crate) fn load(path: PathBuf) -> Self {
        let data = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Self {
                    path,
                    sdks: Vec::new(),
                }
            }
            Err(e) => {
                warn!("Failed to read sdk registry {}: {}", path.display(), e);
                return Self {
                    path,
                    sdks: Vec::new(),
                };
            }
        };

        let parsed: PersistedState = match serde_json::from_slice(&data) {
            Ok(state) => state,
            Err(e) => {
                warn!("Failed to parse sdk registry {}: {}", path.display(), e);
                PersistedState::default()
            }
        };

        let sdks = parsed
            .sdks
            .into_iter()
            .filter_map(PersistedSdk::into_entry)
            .collect();
        Self { path, sdks }
    }

    pub(crate) fn add(&mut self, entry: SdkEntry) {
        self.sdks.push(entry);
    }

    pub(crate) fn len(&self) -> usize {
        self.sdks.len()
    }

    pub(crate) fn save(&self) -> io::Result<()> {
        let persist = PersistedState {
            sdks: self.sdks.iter().map(PersistedSdk::from_entry).collect(),
        };
        let payload = serde_json::to_vec_pretty(&persist).map_err(io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension(format!("tmp-{}", Uuid::new_v4()));
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SdkRegistry for FileRegistry {
    fn entries(&self, variant: SdkVariant) -> Vec<SdkEntry> {
        self.sdks
            .iter()
            .filter(|entry| entry.variant == variant)
            .cloned()
            .collect()
    }

    fn commit(&mut self, name: &str, config: Option<SdkConfig>) -> Result<(), RegistryError> {
        let entry = self
            .sdks
            .iter_mut()
            .find(|entry| entry.name == name)
            .ok_or_else(|| RegistryError::UnknownEntry(name.to_string()))?;
        entry.config = config;
        self.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go_entry(name: &str, config: Option<SdkConfig>) -> SdkEntry {
        SdkEntry {
            name: name.into(),
            home_path: PathBuf::from("/opt/go"),
            variant: SdkVariant::Go,
            config,
        }
    }

    fn valid_go_config() -> GoSdkConfig {
        GoSdkConfig {
            version: "1.2.1".into(),
            target_os: "linux".into(),
            target_arch: "amd64".into(),
            go_binary: "/opt/go/bin/go".into(),
        }
    }

    #[test]
    fn missing_state_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FileRegistry::load(dir.path().join("sdks.json"));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn corrupt_state_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sdks.json");
        fs::write(&path, b"{not json").unwrap();
        let registry = FileRegistry::load(path);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn entries_round_trip_through_the_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sdks.json");

        let mut registry = FileRegistry::load(path.clone());
        registry.add(go_entry("Go 1.2", Some(SdkConfig::Go(valid_go_config()))));
        registry.add(SdkEntry {
            name: "GAE".into(),
            home_path: PathBuf::from("/opt/gae"),
            variant: SdkVariant::GoAppEngine,
            config: Some(SdkConfig::AppEngine(AppEngineSdkConfig {
                target_os: Some("linux".into()),
                target_arch: None,
                api_versions: vec!["go1".into()],
            })),
        });
        registry.save().unwrap();

        let reloaded = FileRegistry::load(path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(
            reloaded.entries(SdkVariant::Go),
            vec![go_entry("Go 1.2", Some(SdkConfig::Go(valid_go_config())))]
        );
        let gae = reloaded.entries(SdkVariant::GoAppEngine);
        assert_eq!(
            gae[0].config,
            Some(SdkConfig::AppEngine(AppEngineSdkConfig {
                target_os: Some("linux".into()),
                target_arch: None,
                api_versions: vec!["go1".into()],
            }))
        );
    }

    #[test]
    fn unnamed_and_unknown_variant_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sdks.json");
        fs::write(
            &path,
            br#"{"sdks":[
                {"name":"","home_path":"/opt/go","variant":"go"},
                {"name":"Weird","home_path":"/opt/x","variant":"ruby"},
                {"name":"Go","home_path":"/opt/go","variant":"go"}
            ]}"#,
        )
        .unwrap();

        let registry = FileRegistry::load(path);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.entries(SdkVariant::Go)[0].name, "Go");
    }

    #[test]
    fn commit_updates_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sdks.json");

        let mut registry = FileRegistry::load(path.clone());
        registry.add(go_entry("Go 1.2", None));
        registry.save().unwrap();

        registry
            .commit("Go 1.2", Some(SdkConfig::Go(valid_go_config())))
            .unwrap();

        let reloaded = FileRegistry::load(path);
        assert_eq!(
            reloaded.entries(SdkVariant::Go)[0].config,
            Some(SdkConfig::Go(valid_go_config()))
        );
    }

    #[test]
    fn commit_of_unknown_entry_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = FileRegistry::load(dir.path().join("sdks.json"));
        let err = registry.commit("nope", None).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownEntry(name) if name == "nope"));
    }
}
