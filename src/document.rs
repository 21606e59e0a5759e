use super::error::Error;

pub mod did_document;
pub mod jwk;
pub mod patch;
pub mod public_key;
pub mod service;
pub mod validator;

pub use did_document::DidDocument;
pub use jwk::Jwk;
pub use patch::{apply_patches, Patch};
pub use public_key::{KeyUsage, PublicKey};
pub use service::Service;
pub use validator::{
    validate_jwk,
    validate_operations_key,
    validate_public_keys,
    validate_public_keys_with_policy,
    KeyPolicy
};
