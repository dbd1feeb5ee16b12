use std::sync::{
    Arc, Weak,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use isocomp_core::{
    CompilationTask, CompilationTaskCallback, LivenessWatcher, RemoteCompilationService,
    RemoteError, ServiceLocator,
};
use tracing::{info, warn};

/// In-process stand-in for the compilation service.
///
/// Every task runs on its own thread and succeeds after `work` unless cancelled.
pub struct SimulatedComposd {
    name: String,
    work: Duration,
}

impl SimulatedComposd {
    pub fn new(name: impl Into<String>, work: Duration) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            work,
        })
    }

    fn spawn(
        &self,
        kind: &'static str,
        callback: Arc<dyn CompilationTaskCallback>,
    ) -> Result<Arc<dyn CompilationTask>, RemoteError> {
        let task = Arc::new(SimulatedTask {
            canceled: AtomicBool::new(false),
        });
        let worker = Arc::clone(&task);
        let work = self.work;
        thread::Builder::new()
            .name(format!("composd-{kind}"))
            .spawn(move || {
                info!(kind, "compilation running");
                thread::sleep(work);
                if worker.canceled.load(Ordering::SeqCst) {
                    info!(kind, "compilation abandoned after cancel");
                    return;
                }
                info!(kind, "compilation finished");
                callback.on_success();
            })
            .map_err(|e| RemoteError::Service(e.to_string()))?;
        Ok(task)
    }
}

impl RemoteCompilationService for SimulatedComposd {
    fn start_test_compile(
        &self,
        callback: Arc<dyn CompilationTaskCallback>,
    ) -> Result<Arc<dyn CompilationTask>, RemoteError> {
        self.spawn("test", callback)
    }

    fn start_staged_apex_compile(
        &self,
        callback: Arc<dyn CompilationTaskCallback>,
    ) -> Result<Arc<dyn CompilationTask>, RemoteError> {
        self.spawn("staged-apex", callback)
    }
}

impl ServiceLocator for SimulatedComposd {
    fn wait_for_service(&self, name: &str) -> Option<Arc<dyn RemoteCompilationService>> {
        if name != self.name {
            warn!(service = name, "unknown service requested");
            return None;
        }
        Some(Arc::new(Self {
            name: self.name.clone(),
            work: self.work,
        }))
    }
}

struct SimulatedTask {
    canceled: AtomicBool,
}

impl CompilationTask for SimulatedTask {
    fn cancel(&self) -> Result<(), RemoteError> {
        self.canceled.store(true, Ordering::SeqCst);
        Ok(())
    }

    // The simulated process never dies.
    fn watch_liveness(&self, _watcher: Weak<dyn LivenessWatcher>) -> Result<(), RemoteError> {
        Ok(())
    }
}
