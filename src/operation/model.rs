use super::{Error, OperationType};

use crate::common::canonicalize;
use crate::common::multihash::{compute_encoded_multihash, MultihashCode};
use crate::document::{Jwk, Patch};

use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[serde(rename = "type")]
    pub operation: OperationType,
    pub suffix_data: String,
    #[serde(alias = "operationData")]
    pub delta: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(rename = "type")]
    pub operation: OperationType,
    #[serde(alias = "didUniqueSuffix")]
    pub did_suffix: String,
    #[serde(default)]
    pub reveal_value: String,
    #[serde(alias = "operationData")]
    pub delta: String,
    pub signed_data: String,
}

pub type RecoverRequest = UpdateRequest;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateRequest {
    #[serde(rename = "type")]
    pub operation: OperationType,
    #[serde(alias = "didUniqueSuffix")]
    pub did_suffix: String,
    #[serde(default)]
    pub reveal_value: String,
    pub signed_data: String,
}

/// Key material committed for recovery in a create operation. Hex and JWK forms
/// are typed; other encodings such as `publicKeyBase58` are kept in `properties`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryKey {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub public_key_hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<Jwk>,
    #[serde(flatten)]
    pub properties: Map<String, Value>
}

impl RecoveryKey {
    pub fn from_hex(public_key_hex: &str) -> Self {
        RecoveryKey{public_key_hex: public_key_hex.to_string(), ..Default::default()}
    }

    pub fn from_jwk(jwk: Jwk) -> Self {
        RecoveryKey{public_key_jwk: Some(jwk), ..Default::default()}
    }

    pub fn is_empty(&self) -> bool {
        self.public_key_hex.is_empty() && self.public_key_jwk.is_none() && self.properties.is_empty()
    }
}

/// The part of a create operation hashed into the DID's unique suffix.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SuffixData {
    #[serde(default)]
    pub operation_data_hash: String,
    #[serde(default)]
    pub recovery_key: RecoveryKey,
    #[serde(default, alias = "nextRecoveryOtpHash")]
    pub next_recovery_commitment_hash: String,
}

impl SuffixData {
    pub fn unique_suffix(&self, multihash_code: MultihashCode) -> Result<String, Error> {
        compute_encoded_multihash(multihash_code, &canonicalize(self)?)
    }
}

/// Operation data (delta): the patches to apply and the next update commitment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OperationData {
    #[serde(default)]
    pub patches: Vec<Patch>,
    #[serde(default, alias = "nextUpdateOtpHash")]
    pub next_update_commitment_hash: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSignedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_key: Option<Jwk>,
    #[serde(default, alias = "deltaHash")]
    pub operation_data_hash: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecoverSignedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_key: Option<Jwk>,
    #[serde(default, alias = "recoveryCommitment")]
    pub next_recovery_commitment_hash: String,
    #[serde(default, alias = "deltaHash")]
    pub operation_data_hash: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateSignedData {
    #[serde(default)]
    pub did_suffix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_key: Option<Jwk>,
}
