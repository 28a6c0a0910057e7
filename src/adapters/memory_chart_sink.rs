use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;

use crate::domain::{AppError, Destination};
use crate::ports::ChartSink;

/// In-memory chart sink, used for dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryChartSink {
    // Shared so clones observe the same writes
    files: Arc<Mutex<IndexMap<Destination, String>>>,
}

impl MemoryChartSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self, destination: Destination) -> Option<String> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.get(&destination).cloned()
    }

    /// All written files, in first-write order.
    pub fn files(&self) -> Vec<(Destination, String)> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.iter().map(|(destination, contents)| (*destination, contents.clone())).collect()
    }
}

impl ChartSink for MemoryChartSink {
    fn write(&self, destination: Destination, contents: &str) -> Result<(), AppError> {
        let mut files = self
            .files
            .lock()
            .map_err(|_| AppError::Internal("memory chart sink lock poisoned".to_string()))?;
        files.insert(destination, contents.to_string());
        Ok(())
    }

    fn location(&self, destination: Destination) -> String {
        destination.relative_path().display().to_string()
    }
}
