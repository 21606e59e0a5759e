use super::error::Error;

use crate::common::{canonicalize, Convert, Logger};
use crate::common::multihash::{compute_multihash, Multihash, MultihashCode};
use crate::document::Jwk;


/// Reveal-commit scheme over public keys: the commitment published with one
/// operation is the encoded multihash of the canonical JWK revealed by the next.
#[derive(Debug, Clone)]
pub struct CommitmentScheme {
    logger: Logger
}

impl Default for CommitmentScheme {
    fn default() -> Self {CommitmentScheme::new()}
}

impl CommitmentScheme {
    pub fn new() -> Self {
        CommitmentScheme{logger: Logger::new("sidetree-core-commitment")}
    }

    pub fn with_logger(logger: Logger) -> Self {
        CommitmentScheme{logger}
    }

    pub fn calculate(&self, jwk: &Jwk, multihash_code: MultihashCode) -> Result<String, Error> {
        let data = canonicalize(jwk)?;
        self.logger.debug(&format!("calculating commitment from JWK: {}", String::from_utf8_lossy(&data)));
        Ok(Convert::Base64Url.encode(&compute_multihash(multihash_code, &data)?))
    }

    /// Checks a revealed key against a previously published commitment, using the
    /// algorithm the commitment was made with.
    pub fn verify(&self, jwk: &Jwk, commitment: &str) -> Result<bool, Error> {
        let code = Multihash::from_encoded(commitment)?.code();
        Ok(self.calculate(jwk, code)? == commitment)
    }
}

pub fn calculate(jwk: &Jwk, multihash_code: MultihashCode) -> Result<String, Error> {
    CommitmentScheme::new().calculate(jwk, multihash_code)
}
