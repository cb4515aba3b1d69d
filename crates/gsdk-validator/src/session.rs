use crate::cache::ProbeCache;
use crate::env::{EnvironmentAuditor, EnvironmentSource, DIALOG_TITLE};
use crate::notify::{NotificationSink, StartupNotice, StartupQueue};
use crate::probe::SdkProbe;
use crate::reconcile::{AppEngineChecker, SdkReconciler};
use crate::registry::{RegistryError, SdkRegistry};

// One validation pass over the host's registered SDKs. `initialize` runs
// the pass; `startup_complete` drains the deferred notices once the host
// has finished starting up; `shutdown` drops derived probe state.
pub(crate) struct ValidatorSession<'a> {
    probe: &'a dyn SdkProbe,
    sink: &'a dyn NotificationSink,
    environment: &'a dyn EnvironmentSource,
    cache: ProbeCache,
    startup: StartupQueue,
    interactive: bool,
}

impl<'a> ValidatorSession<'a> {
    pub(crate) fn new(
        probe: &'a dyn SdkProbe,
        sink: &'a dyn NotificationSink,
        environment: &'a dyn EnvironmentSource,
        interactive: bool,
    ) -> Self {
        Self {
            probe,
            sink,
            environment,
            cache: ProbeCache::default(),
            startup: StartupQueue::default(),
            interactive,
        }
    }

    pub(crate) fn initialize(&self, registry: &mut dyn SdkRegistry) -> Result<(), RegistryError> {
        SdkReconciler::new(self.probe, self.sink, &self.cache).reconcile(registry)?;
        AppEngineChecker::new(self.sink).check(registry);

        let diagnostic = EnvironmentAuditor::audit(self.environment);
        if !diagnostic.is_empty() && self.interactive {
            self.startup.schedule(StartupNotice {
                message: diagnostic,
                title: DIALOG_TITLE.into(),
            });
        }
        Ok(())
    }

    pub(crate) fn startup_complete(&self) {
        self.startup.run_once(self.sink);
    }

    pub(crate) fn shutdown(&self) {
        self.cache.clear();
    }

    #[cfg(test)]
    pub(crate) fn cached_probe_results(&self) -> usize {
        self.cache.len()
    }

    #[cfg(test)]
    pub(crate) fn pending_startup_notices(&self) -> usize {
        self.startup.pending_len()
    }
}
