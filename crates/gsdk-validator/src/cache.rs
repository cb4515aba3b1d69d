use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::GoSdkConfig;

// Probe results for one validation pass, cleared at session teardown.
#[derive(Default)]
pub(crate) struct ProbeCache {
    inner: Mutex<HashMap<PathBuf, GoSdkConfig>>,
}

impl ProbeCache {
    pub(crate) fn get(&self, home: &Path) -> Option<GoSdkConfig> {
        self.inner
            .lock()
            .ok()
            .and_then(|map| map.get(home).cloned())
    }

    pub(crate) fn insert(&self, home: PathBuf, config: GoSdkConfig) {
        if let Ok(mut map) = self.inner.lock() {
            map.insert(home, config);
        }
    }

    pub(crate) fn clear(&self) {
        if let Ok(mut map) = self.inner.lock() {
            map.clear();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.lock().map(|map| map.len()).unwrap_or(0)
    }
}
