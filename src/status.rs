use std::sync::{Arc, Condvar, Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Working(String),
    Done(String),
    Failed(String),
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Working(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Status::Working(m) | Status::Done(m) | Status::Failed(m) => m,
        }
    }
}

/// Single-slot, latest-value-only status cell. Posting replaces whatever the
/// reader has not picked up yet.
#[derive(Clone, Default)]
pub struct StatusMailbox {
    inner: Arc<(Mutex<Option<Status>>, Condvar)>,
}

impl StatusMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, status: Status) {
        let (slot, ready) = &*self.inner;
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(status);
        ready.notify_all();
    }

    pub fn working(&self, message: impl Into<String>) {
        self.post(Status::Working(message.into()));
    }

    /// Take the current value without waiting.
    #[allow(dead_code)]
    pub fn try_take(&self) -> Option<Status> {
        let (slot, _) = &*self.inner;
        slot.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    /// Block until a value is present, then take it.
    pub fn wait(&self) -> Status {
        let (slot, ready) = &*self.inner;
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(status) = guard.take() {
                return status;
            }
            guard = ready.wait(guard).unwrap_or_else(PoisonError::into_inner);
        }
    }
}
