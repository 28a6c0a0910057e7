use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::domain::AppError;

const RUNNING: u8 = 0;
const CANCELLED: u8 = 1;
const COMMITTED: u8 = 2;

/// Shared flag used to abort a chart generation between recursive steps.
///
/// A generation that reaches its first write commits; from then on `cancel`
/// has no effect and the generation runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    state: Arc<AtomicU8>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Returns `false` if the generation had already committed.
    pub fn cancel(&self) -> bool {
        match self.state.compare_exchange(RUNNING, CANCELLED, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => true,
            Err(current) => current == CANCELLED,
        }
    }

    /// Claim the commit point before writing. Fails if cancellation won first.
    pub fn commit(&self) -> Result<(), AppError> {
        match self.state.compare_exchange(RUNNING, COMMITTED, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => Ok(()),
            Err(COMMITTED) => Ok(()),
            Err(_) => Err(AppError::Cancelled),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::SeqCst) == CANCELLED
    }

    /// Return `AppError::Cancelled` once the flag has been raised.
    pub fn check(&self) -> Result<(), AppError> {
        if self.is_cancelled() { Err(AppError::Cancelled) } else { Ok(()) }
    }
}
