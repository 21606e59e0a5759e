use super::Error;

use crate::common::multihash::{HashAlgorithm, MultihashCode, SHA2_256};

use serde::{Serialize, Deserialize};

const DEFAULT_MAX_OPERATION_SIZE: usize = 2000;
const DEFAULT_MAX_OPERATIONS_PER_BATCH: usize = 10000;

/// Protocol parameters in force from `genesis_time` onwards.
///
/// The hash algorithm is configuration rather than code so every participant can be
/// moved to a new algorithm without a wire-format change.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Protocol {
    #[serde(default)]
    pub genesis_time: u64,
    pub hash_algorithm_in_multihash_code: MultihashCode,
    #[serde(default = "default_max_operation_size")]
    pub max_operation_size: usize,
    #[serde(default = "default_max_operations_per_batch")]
    pub max_operations_per_batch: usize,
}

fn default_max_operation_size() -> usize {DEFAULT_MAX_OPERATION_SIZE}
fn default_max_operations_per_batch() -> usize {DEFAULT_MAX_OPERATIONS_PER_BATCH}

impl Default for Protocol {
    fn default() -> Self {
        Protocol{
            genesis_time: 0,
            hash_algorithm_in_multihash_code: SHA2_256,
            max_operation_size: DEFAULT_MAX_OPERATION_SIZE,
            max_operations_per_batch: DEFAULT_MAX_OPERATIONS_PER_BATCH,
        }
    }
}

impl Protocol {
    pub fn new(hash_algorithm_in_multihash_code: MultihashCode) -> Result<Self, Error> {
        let protocol = Protocol{hash_algorithm_in_multihash_code, ..Default::default()};
        protocol.validate()?;
        Ok(protocol)
    }

    pub fn from_json(data: &[u8]) -> Result<Self, Error> {
        let protocol: Protocol = serde_json::from_slice(data)?;
        protocol.validate()?;
        Ok(protocol)
    }

    pub fn validate(&self) -> Result<(), Error> {
        HashAlgorithm::from_code(self.hash_algorithm_in_multihash_code)?;
        if self.max_operation_size == 0 {
            return Err(Error::invalid("protocol", "max operation size must be greater than zero"));
        }
        if self.max_operations_per_batch == 0 {
            return Err(Error::invalid("protocol", "max operations per batch must be greater than zero"));
        }
        Ok(())
    }

    pub fn hash_algorithm(&self) -> Result<HashAlgorithm, Error> {
        HashAlgorithm::from_code(self.hash_algorithm_in_multihash_code)
    }
}

/// Protocol versions ordered by genesis time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolVersions {
    versions: Vec<Protocol>
}

impl ProtocolVersions {
    pub fn new(mut versions: Vec<Protocol>) -> Result<Self, Error> {
        if versions.is_empty() {
            return Err(Error::invalid("protocol", "at least one protocol version is required"));
        }
        for version in &versions {
            version.validate()?;
        }
        versions.sort_by_key(|v| v.genesis_time);
        Ok(ProtocolVersions{versions})
    }

    pub fn from_json(data: &[u8]) -> Result<Self, Error> {
        ProtocolVersions::new(serde_json::from_slice(data)?)
    }

    /// The latest version.
    pub fn current(&self) -> &Protocol {
        &self.versions[self.versions.len() - 1]
    }

    /// The version in force at `time`, if any had started by then.
    pub fn get(&self, time: u64) -> Option<&Protocol> {
        self.versions.iter().rev().find(|v| v.genesis_time <= time)
    }
}
