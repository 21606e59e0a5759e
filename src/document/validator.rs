use super::Error;
use super::jwk::Jwk;
use super::public_key::{
    KeyUsage,
    PublicKey,
    ECDSA_SECP256K1_VERIFICATION_KEY_2019,
    ED25519_VERIFICATION_KEY_2018,
    JWS_VERIFICATION_KEY_2020,
    X25519_KEY_AGREEMENT_KEY_2019
};

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::str::FromStr;

use once_cell::sync::Lazy;

const MAX_JWK_PROPERTIES: usize = 4;
const MAX_PUBLIC_KEY_PROPERTIES: usize = 4;

const OPS_KEY_TYPES: &[&str] = &[
    JWS_VERIFICATION_KEY_2020,
    ECDSA_SECP256K1_VERIFICATION_KEY_2019
];

const GENERAL_KEY_TYPES: &[&str] = &[
    JWS_VERIFICATION_KEY_2020,
    ECDSA_SECP256K1_VERIFICATION_KEY_2019,
    ED25519_VERIFICATION_KEY_2018,
    X25519_KEY_AGREEMENT_KEY_2019
];

const VERIFICATION_KEY_TYPES: &[&str] = &[
    JWS_VERIFICATION_KEY_2020,
    ECDSA_SECP256K1_VERIFICATION_KEY_2019,
    ED25519_VERIFICATION_KEY_2018
];

// Provisional: JWS and secp256k1 agreement types have not been confirmed.
const AGREEMENT_KEY_TYPES: &[&str] = &[
    JWS_VERIFICATION_KEY_2020,
    ECDSA_SECP256K1_VERIFICATION_KEY_2019,
    X25519_KEY_AGREEMENT_KEY_2019
];

static STANDARD_POLICY: Lazy<KeyPolicy> = Lazy::new(KeyPolicy::default);

/// Which key types each usage permits. A key must satisfy the entry of every
/// usage it declares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPolicy {
    allowed: BTreeMap<KeyUsage, BTreeSet<String>>
}

impl Default for KeyPolicy {
    fn default() -> Self {
        let set = |types: &[&str]| types.iter().map(|t| t.to_string()).collect::<BTreeSet<String>>();
        let mut allowed = BTreeMap::new();
        allowed.insert(KeyUsage::Ops, set(OPS_KEY_TYPES));
        allowed.insert(KeyUsage::General, set(GENERAL_KEY_TYPES));
        allowed.insert(KeyUsage::Auth, set(VERIFICATION_KEY_TYPES));
        allowed.insert(KeyUsage::Assertion, set(VERIFICATION_KEY_TYPES));
        allowed.insert(KeyUsage::Agreement, set(AGREEMENT_KEY_TYPES));
        KeyPolicy{allowed}
    }
}

impl KeyPolicy {
    pub fn standard() -> &'static KeyPolicy {&STANDARD_POLICY}

    pub fn new(allowed: BTreeMap<KeyUsage, BTreeSet<String>>) -> Self {
        KeyPolicy{allowed}
    }

    pub fn allowed_types(&self, usage: KeyUsage) -> Option<&BTreeSet<String>> {
        self.allowed.get(&usage)
    }

    pub fn allows(&self, usage: KeyUsage, key_type: &str) -> bool {
        self.allowed.get(&usage).is_some_and(|types| types.contains(key_type))
    }

    fn validate_key_type_usage(&self, key: &PublicKey) -> bool {
        key.usage().iter().all(|usage| match KeyUsage::from_str(usage) {
            Ok(usage) => self.allows(usage, key.key_type()),
            Err(_) => false
        })
    }
}

/// Validates a set of public keys with the standard usage/type table.
pub fn validate_public_keys(keys: &[PublicKey]) -> Result<(), Error> {
    validate_public_keys_with_policy(keys, KeyPolicy::standard())
}

pub fn validate_public_keys_with_policy(keys: &[PublicKey], policy: &KeyPolicy) -> Result<(), Error> {
    let mut ids = HashSet::new();
    for key in keys {
        let id = key.id();
        if id.is_empty() {
            return Err(Error::invalid("public key", "public key id is missing"));
        }
        if !ids.insert(id) {
            return Err(Error::DuplicateKeyId(id.to_string()));
        }
    }

    for key in keys {
        if key.len() != MAX_PUBLIC_KEY_PROPERTIES {
            return Err(Error::invalid("public key", "invalid number of public key properties"));
        }

        validate_key_usage(key)?;

        if is_operations_key(key.usage()) {
            validate_operations_key(key)?;
        }

        if !policy.validate_key_type_usage(key) {
            return Err(Error::InvalidKeyType(key.key_type().to_string()));
        }

        validate_jwk(key.jwk())?;
    }
    Ok(())
}

pub fn validate_operations_key(key: &PublicKey) -> Result<(), Error> {
    if !is_operations_key(key.usage()) {
        return Err(Error::usage(&format!("key '{}' is not an operations key", key.id())));
    }
    validate_jwk(key.jwk())
}

pub fn validate_jwk(jwk: Option<&Jwk>) -> Result<(), Error> {
    let error = |r: &str| Error::invalid("JWK", r);
    let jwk = jwk.filter(|j| !j.is_empty()).ok_or(error("key has to be in JWK format"))?;
    if jwk.len() != MAX_JWK_PROPERTIES {
        return Err(error("invalid number of JWK properties"));
    }
    if jwk.crv().is_empty() {
        return Err(error("JWK crv is missing"));
    }
    if jwk.kty().is_empty() {
        return Err(error("JWK kty is missing"));
    }
    if jwk.x().is_empty() {
        return Err(error("JWK x is missing"));
    }
    Ok(())
}

// Usage must be a non-empty list drawn from the fixed vocabulary:
// ops may sign DID operations, general keys are published in the document,
// auth/assertion/agreement keys land in the matching verification relationships.
fn validate_key_usage(key: &PublicKey) -> Result<(), Error> {
    let usage = key.usage();
    if usage.is_empty() {
        return Err(Error::usage(&format!("key '{}' is missing usage", key.id())));
    }
    if usage.len() > KeyUsage::ALL.len() {
        return Err(Error::usage(&format!("public key usage exceeds maximum length: {}", KeyUsage::ALL.len())));
    }
    for u in usage {
        if KeyUsage::from_str(u).is_err() {
            return Err(Error::usage(&format!("invalid usage: {}", u)));
        }
    }
    Ok(())
}

fn has_usage(usages: &[String], usage: KeyUsage) -> bool {
    usages.iter().any(|u| u == usage.as_str())
}

pub fn is_operations_key(usages: &[String]) -> bool {has_usage(usages, KeyUsage::Ops)}
pub fn is_general_key(usages: &[String]) -> bool {has_usage(usages, KeyUsage::General)}
pub fn is_authentication_key(usages: &[String]) -> bool {has_usage(usages, KeyUsage::Auth)}
pub fn is_assertion_key(usages: &[String]) -> bool {has_usage(usages, KeyUsage::Assertion)}
pub fn is_agreement_key(usages: &[String]) -> bool {has_usage(usages, KeyUsage::Agreement)}
