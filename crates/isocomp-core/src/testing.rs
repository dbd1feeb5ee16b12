//! In-process stand-ins for the remote service and the host, used by unit tests.

use std::sync::{
    Arc, Mutex, Weak,
    atomic::{AtomicUsize, Ordering},
    mpsc,
};
use std::time::Duration;

use isocomp_model::{JobParams, Outcome, TriggerKind};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::{
    CompletionSink,
    error::RemoteError,
    remote::{
        CompilationTask, CompilationTaskCallback, LivenessWatcher, RemoteCompilationService,
        ServiceLocator,
    },
};

/// What the fake remote side observed, in order.
pub(crate) enum RemoteEvent {
    Started {
        trigger: TriggerKind,
        callback: Arc<dyn CompilationTaskCallback>,
        task: Arc<FakeTask>,
    },
    Watched,
    Canceled,
}

/// Failure injection for the fake service.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Behavior {
    pub fail_start: bool,
    pub panic_on_start: bool,
    pub fail_watch: bool,
    pub fail_cancel: bool,
    /// Report this outcome from inside the start call, before it returns.
    pub complete_during_start: Option<bool>,
}

pub(crate) struct FakeService {
    behavior: Behavior,
    events: UnboundedSender<RemoteEvent>,
    start_calls: AtomicUsize,
}

pub(crate) fn fake_service(
    behavior: Behavior,
) -> (Arc<FakeService>, UnboundedReceiver<RemoteEvent>) {
    let (tx, rx) = unbounded_channel();
    let service = Arc::new(FakeService {
        behavior,
        events: tx,
        start_calls: AtomicUsize::new(0),
    });
    (service, rx)
}

impl FakeService {
    pub(crate) fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    fn start(
        &self,
        trigger: TriggerKind,
        callback: Arc<dyn CompilationTaskCallback>,
    ) -> Result<Arc<dyn CompilationTask>, RemoteError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.behavior.panic_on_start {
            panic!("remote start exploded");
        }
        if self.behavior.fail_start {
            return Err(RemoteError::Transaction("start rejected".into()));
        }

        let task = Arc::new(FakeTask {
            behavior: self.behavior,
            events: self.events.clone(),
            cancel_calls: AtomicUsize::new(0),
            watcher: Mutex::new(None),
        });
        let _ = self.events.send(RemoteEvent::Started {
            trigger,
            callback: Arc::clone(&callback),
            task: Arc::clone(&task),
        });

        match self.behavior.complete_during_start {
            Some(true) => callback.on_success(),
            Some(false) => callback.on_failure(),
            None => {}
        }
        Ok(task as Arc<dyn CompilationTask>)
    }
}

impl RemoteCompilationService for FakeService {
    fn start_test_compile(
        &self,
        callback: Arc<dyn CompilationTaskCallback>,
    ) -> Result<Arc<dyn CompilationTask>, RemoteError> {
        self.start(TriggerKind::Periodic, callback)
    }

    fn start_staged_apex_compile(
        &self,
        callback: Arc<dyn CompilationTaskCallback>,
    ) -> Result<Arc<dyn CompilationTask>, RemoteError> {
        self.start(TriggerKind::OneShot, callback)
    }
}

pub(crate) struct FakeTask {
    behavior: Behavior,
    events: UnboundedSender<RemoteEvent>,
    cancel_calls: AtomicUsize,
    watcher: Mutex<Option<Weak<dyn LivenessWatcher>>>,
}

impl FakeTask {
    pub(crate) fn cancel_calls(&self) -> usize {
        self.cancel_calls.load(Ordering::SeqCst)
    }

    /// Simulate the hosting process terminating.
    pub(crate) fn die(&self) {
        let watcher = self.watcher.lock().unwrap().clone();
        if let Some(watcher) = watcher.and_then(|w| w.upgrade()) {
            watcher.on_remote_died();
        }
    }
}

impl CompilationTask for FakeTask {
    fn cancel(&self) -> Result<(), RemoteError> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.events.send(RemoteEvent::Canceled);
        if self.behavior.fail_cancel {
            return Err(RemoteError::DeadObject);
        }
        Ok(())
    }

    fn watch_liveness(&self, watcher: Weak<dyn LivenessWatcher>) -> Result<(), RemoteError> {
        if self.behavior.fail_watch {
            return Err(RemoteError::DeadObject);
        }
        *self.watcher.lock().unwrap() = Some(watcher);
        let _ = self.events.send(RemoteEvent::Watched);
        Ok(())
    }
}

/// Locator that can hold the starter until the test opens the gate.
pub(crate) struct FakeLocator {
    service: Option<Arc<FakeService>>,
    gate: Option<Mutex<mpsc::Receiver<()>>>,
}

impl FakeLocator {
    pub(crate) fn new(service: Option<Arc<FakeService>>) -> Self {
        Self {
            service,
            gate: None,
        }
    }

    /// Locator whose lookup blocks until a value is sent on the returned channel.
    pub(crate) fn gated(service: Option<Arc<FakeService>>) -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let locator = Self {
            service,
            gate: Some(Mutex::new(rx)),
        };
        (locator, tx)
    }
}

impl ServiceLocator for FakeLocator {
    fn wait_for_service(&self, _name: &str) -> Option<Arc<dyn RemoteCompilationService>> {
        if let Some(gate) = &self.gate {
            let _ = gate.lock().unwrap().recv_timeout(Duration::from_secs(10));
        }
        self.service
            .clone()
            .map(|s| s as Arc<dyn RemoteCompilationService>)
    }
}

/// One `job_finished` call: params, outcome, reschedule flag.
pub(crate) type Report = (JobParams, Outcome, bool);

pub(crate) struct RecordingSink {
    reports: Mutex<Vec<Report>>,
    tx: UnboundedSender<Report>,
}

impl RecordingSink {
    pub(crate) fn new() -> (Arc<Self>, UnboundedReceiver<Report>) {
        let (tx, rx) = unbounded_channel();
        let sink = Arc::new(Self {
            reports: Mutex::new(Vec::new()),
            tx,
        });
        (sink, rx)
    }

    pub(crate) fn reports(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }
}

impl CompletionSink for RecordingSink {
    fn job_finished(&self, params: &JobParams, outcome: Outcome, want_reschedule: bool) {
        let report = (*params, outcome, want_reschedule);
        self.reports.lock().unwrap().push(report);
        let _ = self.tx.send(report);
    }
}
