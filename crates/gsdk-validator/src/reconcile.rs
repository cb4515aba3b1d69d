use std::path::Path;

use tracing::{debug, info};

use crate::cache::ProbeCache;
use crate::config::{GoSdkConfig, SdkConfig, SdkVariant};
use crate::notify::NotificationSink;
use crate::probe::SdkProbe;
use crate::registry::{RegistryError, SdkRegistry};

pub(crate) const CORRUPT_TITLE: &str = "Corrupt Go SDK";
pub(crate) const NOTIFY_CATEGORY: &str = "Go SDK validator";

pub(crate) fn corrupt_body(variant: SdkVariant, name: &str) -> String {
    format!(
        "The attached {} SDK named: {} seems to be corrupt. \
         Please update it by going to the project sdk editor remove it and add it again.",
        variant.display_name(),
        name
    )
}

pub(crate) struct SdkReconciler<'a> {
    probe: &'a dyn SdkProbe,
    sink: &'a dyn NotificationSink,
    cache: &'a ProbeCache,
}

impl<'a> SdkReconciler<'a> {
    pub(crate) fn new(
        probe: &'a dyn SdkProbe,
        sink: &'a dyn NotificationSink,
        cache: &'a ProbeCache,
    ) -> Self {
        Self { probe, sink, cache }
    }

    // Validates every registered Go SDK entry, re-probing the install path
    // when the stored configuration is absent or invalid. The fresh probe
    // result is always committed once re-probing was triggered, even when
    // it is still unusable; the corrupt warning fires in that case.
    pub(crate) fn reconcile(&self, registry: &mut dyn SdkRegistry) -> Result<(), RegistryError> {
        for entry in registry.entries(SdkVariant::Go) {
            let mut needs_upgrade = entry.config.is_none();
            if let Some(config) = &entry.config {
                if let Err(err) = config.check_valid_for(SdkVariant::Go) {
                    debug!("Stored configuration for '{}' is invalid: {}", entry.name, err);
                    needs_upgrade = true;
                }
            }

            if !needs_upgrade {
                continue;
            }

            let detected = self.probe_cached(&entry.home_path);

            let mut still_corrupt = detected.is_none();
            if let Some(data) = &detected {
                if let Err(err) = data.check_valid() {
                    debug!("Probe result for '{}' is invalid: {}", entry.name, err);
                    still_corrupt = true;
                }
            }

            if still_corrupt {
                self.sink.warn(
                    CORRUPT_TITLE,
                    &corrupt_body(SdkVariant::Go, &entry.name),
                    NOTIFY_CATEGORY,
                );
            } else {
                info!("Repaired Go SDK entry '{}'", entry.name);
            }

            registry.commit(&entry.name, detected.map(SdkConfig::Go))?;
        }
        Ok(())
    }

    fn probe_cached(&self, home: &Path) -> Option<GoSdkConfig> {
        if let Some(cached) = self.cache.get(home) {
            return Some(cached);
        }
        let detected = self.probe.detect(home)?;
        self.cache.insert(home.to_path_buf(), detected.clone());
        Some(detected)
    }
}

pub(crate) struct AppEngineChecker<'a> {
    sink: &'a dyn NotificationSink,
}

impl<'a> AppEngineChecker<'a> {
    pub(crate) fn new(sink: &'a dyn NotificationSink) -> Self {
        Self { sink }
    }

    // App Engine configurations cannot be re-derived from the install path
    // alone, so this pass only reports; it never writes.
    pub(crate) fn check(&self, registry: &dyn SdkRegistry) {
        for entry in registry.entries(SdkVariant::GoAppEngine) {
            let corrupt = match &entry.config {
                Some(config) => config.check_valid_for(SdkVariant::GoAppEngine).is_err(),
                None => true,
            };
            if corrupt {
                self.sink.warn(
                    CORRUPT_TITLE,
                    &corrupt_body(SdkVariant::GoAppEngine, &entry.name),
                    NOTIFY_CATEGORY,
                );
            }
        }
    }
}
