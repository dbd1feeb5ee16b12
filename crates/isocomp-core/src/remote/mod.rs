//! Boundary of the out-of-process compilation service.
//!
//! A task handle implements both [`CompilationTaskCallback`] and [`LivenessWatcher`];
//! the two are registered independently, one with the start call and one on the returned task.

use std::sync::{Arc, Weak};

use crate::error::RemoteError;

/// Receives the single explicit result of a remote compilation task.
pub trait CompilationTaskCallback: Send + Sync {
    fn on_success(&self);
    fn on_failure(&self);
}

/// Notified when the process hosting a task terminates without reporting.
pub trait LivenessWatcher: Send + Sync {
    fn on_remote_died(&self);
}

/// Reference to a running remote compilation task.
pub trait CompilationTask: Send + Sync {
    /// Ask the remote side to stop. Does not wait for acknowledgement.
    fn cancel(&self) -> Result<(), RemoteError>;

    /// Register `watcher` to fire if the hosting process dies.
    fn watch_liveness(&self, watcher: Weak<dyn LivenessWatcher>) -> Result<(), RemoteError>;
}

/// The remote compilation service.
pub trait RemoteCompilationService: Send + Sync {
    /// Start the periodic compilation task.
    fn start_test_compile(
        &self,
        callback: Arc<dyn CompilationTaskCallback>,
    ) -> Result<Arc<dyn CompilationTask>, RemoteError>;

    /// Start compilation against staged APEXes.
    fn start_staged_apex_compile(
        &self,
        callback: Arc<dyn CompilationTaskCallback>,
    ) -> Result<Arc<dyn CompilationTask>, RemoteError>;
}

/// Resolves the remote service by name.
pub trait ServiceLocator: Send + Sync {
    /// Block until the service is available.
    ///
    /// Returns `None` when the service cannot be located at all.
    fn wait_for_service(&self, name: &str) -> Option<Arc<dyn RemoteCompilationService>>;
}
