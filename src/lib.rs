mod error;
pub use error::Error;

pub mod common;
pub mod protocol;
pub use protocol::{Protocol, ProtocolVersions};

pub mod commitment;
pub use commitment::CommitmentScheme;

pub mod document;
pub use document::{DidDocument, Jwk, KeyUsage, Patch, PublicKey, Service};

pub mod operation;
pub use operation::{parse_operation, Operation, OperationParser, OperationType};

pub mod queue;
pub use queue::{BatchCutter, MemoryQueue, OperationInfo, OperationQueue, QueuedOperation};
