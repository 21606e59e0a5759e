use super::{Error, OperationInfo, OperationQueue, QueuedOperation};

use crate::common::Logger;

use std::sync::Arc;

/// Drains a queue in batches: `cut` looks at the head, `commit` removes what was cut.
#[derive(Debug, Clone)]
pub struct BatchCutter {
    queue: Arc<dyn OperationQueue>,
    max_operations_per_batch: usize,
    logger: Logger
}

impl BatchCutter {
    pub fn new(queue: Arc<dyn OperationQueue>, max_operations_per_batch: usize) -> Self {
        BatchCutter::with_logger(queue, max_operations_per_batch, Logger::new("sidetree-core-cutter"))
    }

    pub fn with_logger(queue: Arc<dyn OperationQueue>, max_operations_per_batch: usize, logger: Logger) -> Self {
        BatchCutter{queue, max_operations_per_batch, logger}
    }

    pub fn add_operation(&self, info: OperationInfo) -> Result<u64, Error> {
        self.queue.add(info)
    }

    /// Returns the next batch when a full one is pending, or whatever is queued when `force` is set.
    pub fn cut(&self, force: bool) -> Result<Vec<QueuedOperation>, Error> {
        let pending = self.queue.len()?;
        if pending == 0 || (!force && pending < self.max_operations_per_batch) {
            return Ok(Vec::new());
        }
        let batch = self.queue.peek(self.max_operations_per_batch)?;
        self.logger.info(&format!("cut batch of {} operations, {} pending", batch.len(), pending));
        Ok(batch)
    }

    pub fn commit(&self, batch: &[QueuedOperation]) -> Result<Option<(u64, u64)>, Error> {
        let Some(last) = batch.last() else {return Ok(None)};
        let removed = self.queue.remove(last.sequence)?;
        if let Some((first, last)) = removed {
            self.logger.debug(&format!("committed operations {} through {}", first, last));
        }
        Ok(removed)
    }

    pub fn pending(&self) -> Result<usize, Error> {self.queue.len()}
}
