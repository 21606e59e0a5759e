use super::error::Error;

pub mod jws;
pub mod model;
pub mod parser;

pub use jws::{CompactJws, JwsHeader};
pub use model::{
    CreateRequest,
    DeactivateRequest,
    DeactivateSignedData,
    OperationData,
    RecoverRequest,
    RecoverSignedData,
    RecoveryKey,
    SuffixData,
    UpdateRequest,
    UpdateSignedData
};
pub use parser::{
    parse_create_operation,
    parse_deactivate_operation,
    parse_operation,
    parse_recover_operation,
    parse_update_operation,
    validate_operation_data,
    validate_suffix_data,
    OperationParser
};

use crate::common::multihash::MultihashCode;

use serde::{Serialize, Deserialize};


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Create,
    Update,
    Recover,
    Deactivate
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Recover => write!(f, "recover"),
            Self::Deactivate => write!(f, "deactivate")
        }
    }
}

impl std::str::FromStr for OperationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "create" => OperationType::Create,
            "update" => OperationType::Update,
            "recover" => OperationType::Recover,
            "deactivate" => OperationType::Deactivate,
            _ => return Err(Error::parse("OperationType", s))
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CreateOperation {
    pub operation_buffer: Vec<u8>,
    pub suffix_data: SuffixData,
    pub operation_data: OperationData,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateOperation {
    pub operation_buffer: Vec<u8>,
    pub did_suffix: String,
    pub reveal_value: String,
    pub operation_data: OperationData,
    pub signed_data: CompactJws,
    pub claims: UpdateSignedData,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecoverOperation {
    pub operation_buffer: Vec<u8>,
    pub did_suffix: String,
    pub reveal_value: String,
    pub operation_data: OperationData,
    pub signed_data: CompactJws,
    pub claims: RecoverSignedData,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeactivateOperation {
    pub operation_buffer: Vec<u8>,
    pub did_suffix: String,
    pub reveal_value: String,
    pub signed_data: CompactJws,
    pub claims: DeactivateSignedData,
}

/// A decoded and validated operation request.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    Create(CreateOperation),
    Update(UpdateOperation),
    Recover(RecoverOperation),
    Deactivate(DeactivateOperation),
}

impl Operation {
    pub fn operation_type(&self) -> OperationType {
        match self {
            Operation::Create(_) => OperationType::Create,
            Operation::Update(_) => OperationType::Update,
            Operation::Recover(_) => OperationType::Recover,
            Operation::Deactivate(_) => OperationType::Deactivate,
        }
    }

    /// The request bytes exactly as received.
    pub fn operation_buffer(&self) -> &[u8] {
        match self {
            Operation::Create(op) => &op.operation_buffer,
            Operation::Update(op) => &op.operation_buffer,
            Operation::Recover(op) => &op.operation_buffer,
            Operation::Deactivate(op) => &op.operation_buffer,
        }
    }

    pub fn operation_data(&self) -> Option<&OperationData> {
        match self {
            Operation::Create(op) => Some(&op.operation_data),
            Operation::Update(op) => Some(&op.operation_data),
            Operation::Recover(op) => Some(&op.operation_data),
            Operation::Deactivate(_) => None,
        }
    }

    /// The DID suffix the operation applies to. Create operations derive it from
    /// their suffix data.
    pub fn unique_suffix(&self, multihash_code: MultihashCode) -> Result<String, Error> {
        match self {
            Operation::Create(op) => op.suffix_data.unique_suffix(multihash_code),
            Operation::Update(op) => Ok(op.did_suffix.clone()),
            Operation::Recover(op) => Ok(op.did_suffix.clone()),
            Operation::Deactivate(op) => Ok(op.did_suffix.clone()),
        }
    }
}
