//! Startup orchestration.
//!
//! # Responsibilities
//! - Hold the registered lifecycle listeners
//! - Fire the startup sequence in order
//! - Fire the stop sequence on shutdown
//!
//! # Design Decisions
//! - Listeners see events in registration order
//! - Configuration listeners register first so they run before anything reads config

use std::sync::Arc;

use crate::lifecycle::{LifecycleEvent, LifecycleListener};

/// Dispatches lifecycle events to registered listeners.
#[derive(Default)]
pub struct Startup {
    listeners: Vec<Arc<dyn LifecycleListener>>,
}

impl Startup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It receives every event fired afterwards.
    pub fn add_listener(&mut self, listener: Arc<dyn LifecycleListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver one event to every listener.
    pub fn fire(&self, event: LifecycleEvent) {
        tracing::debug!(event = %event, listeners = self.listeners.len(), "Firing lifecycle event");
        for listener in &self.listeners {
            listener.lifecycle_event(event);
        }
    }

    /// Fire the startup sequence.
    pub fn start(&self) {
        for event in LifecycleEvent::STARTUP {
            self.fire(event);
        }
    }

    /// Fire the stop sequence.
    pub fn stop(&self) {
        for event in LifecycleEvent::SHUTDOWN {
            self.fire(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl LifecycleListener for Recorder {
        fn lifecycle_event(&self, event: LifecycleEvent) {
            self.log.lock().unwrap().push(format!("{}:{}", self.name, event));
        }
    }

    #[test]
    fn test_start_fires_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut startup = Startup::new();
        startup.add_listener(Arc::new(Recorder { name: "a", log: log.clone() }));

        startup.start();
        let seen = log.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec!["a:before_init", "a:after_init", "a:before_start", "a:start", "a:after_start"]
        );
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut startup = Startup::new();
        startup.add_listener(Arc::new(Recorder { name: "first", log: log.clone() }));
        startup.add_listener(Arc::new(Recorder { name: "second", log: log.clone() }));
        assert_eq!(startup.listener_count(), 2);

        startup.fire(LifecycleEvent::BeforeInit);
        startup.stop();
        let seen = log.lock().unwrap().clone();
        assert_eq!(seen[0], "first:before_init");
        assert_eq!(seen[1], "second:before_init");
        assert_eq!(seen.last().map(String::as_str), Some("second:after_stop"));
        assert_eq!(seen.len(), 8);
    }
}
