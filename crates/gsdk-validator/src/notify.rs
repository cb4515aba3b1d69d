use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{debug, error, warn};

pub(crate) trait NotificationSink {
    fn warn(&self, title: &str, body: &str, category: &str);
    fn blocking_error(&self, message: &str, title: &str);
}

// Default sink: the host dialog layer is out of scope, so notifications
// land on the tracing output.
pub(crate) struct TracingSink;

impl NotificationSink for TracingSink {
    fn warn(&self, title: &str, body: &str, category: &str) {
        warn!("[{category}] {title}: {body}");
    }

    fn blocking_error(&self, message: &str, title: &str) {
        error!("{title}\n{message}");
    }
}

pub(crate) struct StartupNotice {
    pub(crate) message: String,
    pub(crate) title: String,
}

// Notices deferred until host startup has finished. Drained exactly once;
// anything scheduled after the drain is dropped.
#[derive(Default)]
pub(crate) struct StartupQueue {
    pending: Mutex<Vec<StartupNotice>>,
    drained: AtomicBool,
}

impl StartupQueue {
    pub(crate) fn schedule(&self, notice: StartupNotice) {
        if self.drained.load(Ordering::SeqCst) {
            debug!("Dropping startup notice '{}' scheduled after drain", notice.title);
            return;
        }
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(notice);
        }
    }

    pub(crate) fn run_once(&self, sink: &dyn NotificationSink) {
        if self.drained.swap(true, Ordering::SeqCst) {
            return;
        }
        let notices = match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => return,
        };
        for notice in notices {
            sink.blocking_error(&notice.message, &notice.title);
        }
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.lock().map(|pending| pending.len()).unwrap_or(0)
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) warnings: std::cell::RefCell<Vec<(String, String, String)>>,
    pub(crate) errors: std::cell::RefCell<Vec<(String, String)>>,
}

#[cfg(test)]
impl NotificationSink for RecordingSink {
    fn warn(&self, title: &str, body: &str, category: &str) {
        self.warnings
            .borrow_mut()
            .push((title.into(), body.into(), category.into()));
    }

    fn blocking_error(&self, message: &str, title: &str) {
        self.errors.borrow_mut().push((message.into(), title.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(title: &str) -> StartupNotice {
        StartupNotice {
            message: "something is off".into(),
            title: title.into(),
        }
    }

    #[test]
    fn queue_drains_exactly_once() {
        let queue = StartupQueue::default();
        let sink = RecordingSink::default();

        queue.schedule(notice("first"));
        queue.schedule(notice("second"));
        assert_eq!(queue.pending_len(), 2);

        queue.run_once(&sink);
        assert_eq!(sink.errors.borrow().len(), 2);

        queue.run_once(&sink);
        assert_eq!(sink.errors.borrow().len(), 2);
    }

    #[test]
    fn scheduling_after_drain_is_dropped() {
        let queue = StartupQueue::default();
        let sink = RecordingSink::default();

        queue.run_once(&sink);
        queue.schedule(notice("late"));
        assert_eq!(queue.pending_len(), 0);

        queue.run_once(&sink);
        assert!(sink.errors.borrow().is_empty());
    }
}
