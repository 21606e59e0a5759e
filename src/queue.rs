use super::error::Error;

pub mod cutter;
pub mod memory;

pub use cutter::BatchCutter;
pub use memory::MemoryQueue;

use crate::common::multihash::MultihashCode;
use crate::operation::Operation;

use serde::{Serialize, Deserialize};

#[cfg(test)]
mod tests;

/// What the batch writer needs from an operation: its raw request and the DID it touches.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OperationInfo {
    pub data: Vec<u8>,
    pub unique_suffix: String,
}

impl OperationInfo {
    pub fn new(data: Vec<u8>, unique_suffix: &str) -> Self {
        OperationInfo{data, unique_suffix: unique_suffix.to_string()}
    }

    pub fn from_operation(operation: &Operation, multihash_code: MultihashCode) -> Result<Self, Error> {
        Ok(OperationInfo{
            data: operation.operation_buffer().to_vec(),
            unique_suffix: operation.unique_suffix(multihash_code)?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct QueuedOperation {
    pub sequence: u64,
    pub info: OperationInfo,
}

/// Holding area for validated operations waiting to be batched.
///
/// Sequence numbers start at 1 and only ever grow. `remove` drains the prefix up to and
/// including `upto` and reports the range actually removed, `None` when nothing matched.
pub trait OperationQueue: std::fmt::Debug + Send + Sync {
    fn add(&self, info: OperationInfo) -> Result<u64, Error>;
    fn remove(&self, upto: u64) -> Result<Option<(u64, u64)>, Error>;
    fn peek(&self, count: usize) -> Result<Vec<QueuedOperation>, Error>;
    fn len(&self) -> Result<usize, Error>;

    fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }
}
