use super::Error;

use serde::Serialize;

/// Serializes `value` with the JSON Canonicalization Scheme (RFC 8785) so that
/// hashes over it are reproducible across implementations.
pub fn canonicalize<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, Error> {
    Ok(serde_jcs::to_vec(value)?)
}
