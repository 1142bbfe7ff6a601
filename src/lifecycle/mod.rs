//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     BeforeInit → AfterInit → BeforeStart → Start → AfterStart
//!     each event delivered to every listener, in registration order
//!
//! Shutdown (shutdown.rs):
//!     SIGTERM/SIGINT → broadcast → background tasks exit → stop events
//!
//! Signals (signals.rs):
//!     SIGHUP → forced properties reload
//! ```
//!
//! # Design Decisions
//! - Dispatch is synchronous: an event returns after every listener ran
//! - Listeners filter events themselves

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::Startup;

/// Events fired by the host over its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    BeforeInit,
    AfterInit,
    BeforeStart,
    Start,
    AfterStart,
    BeforeStop,
    Stop,
    AfterStop,
}

impl LifecycleEvent {
    /// Events fired by [`Startup::start`], in order.
    pub const STARTUP: [LifecycleEvent; 5] = [
        LifecycleEvent::BeforeInit,
        LifecycleEvent::AfterInit,
        LifecycleEvent::BeforeStart,
        LifecycleEvent::Start,
        LifecycleEvent::AfterStart,
    ];

    /// Events fired by [`Startup::stop`], in order.
    pub const SHUTDOWN: [LifecycleEvent; 3] = [
        LifecycleEvent::BeforeStop,
        LifecycleEvent::Stop,
        LifecycleEvent::AfterStop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::BeforeInit => "before_init",
            LifecycleEvent::AfterInit => "after_init",
            LifecycleEvent::BeforeStart => "before_start",
            LifecycleEvent::Start => "start",
            LifecycleEvent::AfterStart => "after_start",
            LifecycleEvent::BeforeStop => "before_stop",
            LifecycleEvent::Stop => "stop",
            LifecycleEvent::AfterStop => "after_stop",
        }
    }
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives lifecycle events from the host.
pub trait LifecycleListener: Send + Sync {
    fn lifecycle_event(&self, event: LifecycleEvent);
}
