use super::{Error, OperationInfo, OperationQueue, QueuedOperation};

use crate::common::Logger;

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct State {
    entries: VecDeque<QueuedOperation>,
    last_sequence: u64,
}

/// In-memory queue. Clones share the same entries.
#[derive(Debug, Clone)]
pub struct MemoryQueue {
    state: Arc<RwLock<State>>,
    logger: Logger
}

impl Default for MemoryQueue {
    fn default() -> Self {Self::new()}
}

impl MemoryQueue {
    pub fn new() -> Self {
        MemoryQueue::with_logger(Logger::new("sidetree-core-queue"))
    }

    pub fn with_logger(logger: Logger) -> Self {
        MemoryQueue{state: Arc::new(RwLock::new(State::default())), logger}
    }
}

impl OperationQueue for MemoryQueue {
    fn add(&self, info: OperationInfo) -> Result<u64, Error> {
        let error = Error::err("MemoryQueue.add", "RwLock poisoned");
        let mut state = self.state.write().or(Err(error))?;
        state.last_sequence += 1;
        let sequence = state.last_sequence;
        self.logger.debug(&format!("queued operation {} for {}", sequence, info.unique_suffix));
        state.entries.push_back(QueuedOperation{sequence, info});
        Ok(sequence)
    }

    fn remove(&self, upto: u64) -> Result<Option<(u64, u64)>, Error> {
        let error = Error::err("MemoryQueue.remove", "RwLock poisoned");
        let mut state = self.state.write().or(Err(error))?;
        let count = state.entries.iter().take_while(|e| e.sequence <= upto).count();
        if count == 0 {return Ok(None);}
        let removed: Vec<QueuedOperation> = state.entries.drain(..count).collect();
        let range = (removed[0].sequence, removed[count - 1].sequence);
        self.logger.debug(&format!("removed operations {} through {}", range.0, range.1));
        Ok(Some(range))
    }

    fn peek(&self, count: usize) -> Result<Vec<QueuedOperation>, Error> {
        let error = Error::err("MemoryQueue.peek", "RwLock poisoned");
        let state = self.state.read().or(Err(error))?;
        Ok(state.entries.iter().take(count).cloned().collect())
    }

    fn len(&self) -> Result<usize, Error> {
        let error = Error::err("MemoryQueue.len", "RwLock poisoned");
        Ok(self.state.read().or(Err(error))?.entries.len())
    }
}
