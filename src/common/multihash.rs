use super::{Convert, Error};

use varint_rs::{VarintReader, VarintWriter};
use sha2::{Digest, Sha256, Sha512};

use std::io::{Cursor, Read, Write};

pub type MultihashCode = u64;

pub const SHA2_256: MultihashCode = 0x12;
pub const SHA2_512: MultihashCode = 0x13;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashAlgorithm {
    Sha2_256,
    Sha2_512
}

impl HashAlgorithm {
    pub fn from_code(code: MultihashCode) -> Result<Self, Error> {
        Ok(match code {
            SHA2_256 => HashAlgorithm::Sha2_256,
            SHA2_512 => HashAlgorithm::Sha2_512,
            _ => return Err(Error::UnsupportedHashAlgorithm(code))
        })
    }

    pub fn code(&self) -> MultihashCode {
        match self {
            HashAlgorithm::Sha2_256 => SHA2_256,
            HashAlgorithm::Sha2_512 => SHA2_512
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha2_256 => "sha2-256",
            HashAlgorithm::Sha2_512 => "sha2-512"
        }
    }

    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha2_256 => 32,
            HashAlgorithm::Sha2_512 => 64
        }
    }

    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha2_256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha2_512 => Sha512::digest(data).to_vec()
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub fn is_supported_multihash_code(code: MultihashCode) -> bool {
    HashAlgorithm::from_code(code).is_ok()
}

/// A self-describing digest: varint algorithm code, varint digest length, digest.
#[derive(Clone, PartialEq, Eq)]
pub struct Multihash {
    code: MultihashCode,
    digest: Vec<u8>
}

impl Multihash {
    pub fn hash(algorithm: HashAlgorithm, data: &[u8]) -> Self {
        Multihash{code: algorithm.code(), digest: algorithm.digest(data)}
    }

    pub fn code(&self) -> MultihashCode {self.code}
    pub fn digest(&self) -> &[u8] {&self.digest}

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buffer: Cursor<Vec<u8>> = Cursor::new(Vec::with_capacity(self.digest.len() + 4));
        buffer.write_u64_varint(self.code)?;
        buffer.write_u64_varint(self.digest.len() as u64)?;
        buffer.write_all(&self.digest)?;
        Ok(buffer.into_inner())
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        let error = |r: &str| Error::invalid("multihash", r);
        let mut cursor = Cursor::new(data);
        let code = cursor.read_u64_varint()?;
        let length = cursor.read_u64_varint()? as usize;
        let mut digest = Vec::new();
        cursor.read_to_end(&mut digest)?;
        if digest.len() != length {
            return Err(error("digest length does not match the declared length"));
        }
        Ok(Multihash{code, digest})
    }

    pub fn from_encoded(encoded: &str) -> Result<Self, Error> {
        Multihash::from_bytes(&Convert::Base64Url.decode_field("multihash", encoded)?)
    }
}

impl std::fmt::Debug for Multihash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Multihash(0x{:x}, {})", self.code, hex::encode(&self.digest))
    }
}

/// Hashes `data` with the algorithm named by `code` and returns the multihash bytes.
pub fn compute_multihash(code: MultihashCode, data: &[u8]) -> Result<Vec<u8>, Error> {
    Multihash::hash(HashAlgorithm::from_code(code)?, data).to_bytes()
}

pub fn compute_encoded_multihash(code: MultihashCode, data: &[u8]) -> Result<String, Error> {
    Ok(Convert::Base64Url.encode(&compute_multihash(code, data)?))
}

pub fn get_multihash_code(multihash: &[u8]) -> Result<MultihashCode, Error> {
    Ok(Multihash::from_bytes(multihash)?.code())
}

/// True when `encoded` is a well-formed multihash produced by the algorithm `code`.
pub fn is_computed_using_hash_algorithm(encoded: &str, code: MultihashCode) -> bool {
    let Ok(algorithm) = HashAlgorithm::from_code(code) else {return false};
    match Multihash::from_encoded(encoded) {
        Ok(multihash) => multihash.code() == code && multihash.digest().len() == algorithm.digest_len(),
        Err(_) => false
    }
}
