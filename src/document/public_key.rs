use super::Error;
use super::jwk::Jwk;

use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

pub const JWS_VERIFICATION_KEY_2020: &str = "JwsVerificationKey2020";
pub const ECDSA_SECP256K1_VERIFICATION_KEY_2019: &str = "EcdsaSecp256k1VerificationKey2019";
pub const X25519_KEY_AGREEMENT_KEY_2019: &str = "X25519KeyAgreementKey2019";
pub const ED25519_VERIFICATION_KEY_2018: &str = "Ed25519VerificationKey2018";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyUsage {
    Ops,
    Auth,
    Assertion,
    Agreement,
    General
}

impl KeyUsage {
    pub const ALL: [KeyUsage; 5] = [
        KeyUsage::Ops,
        KeyUsage::Auth,
        KeyUsage::Assertion,
        KeyUsage::Agreement,
        KeyUsage::General
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyUsage::Ops => "ops",
            KeyUsage::Auth => "auth",
            KeyUsage::Assertion => "assertion",
            KeyUsage::Agreement => "agreement",
            KeyUsage::General => "general"
        }
    }
}

impl std::fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for KeyUsage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyUsage::ALL.into_iter().find(|u| u.as_str() == s).ok_or(Error::parse("KeyUsage", s))
    }
}

/// A public key entry as it appears in documents and patches.
///
/// `usage` is kept as raw strings: unknown tags must survive parsing so the
/// validator can report them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct PublicKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Vec<String>>,
    #[serde(alias = "publicKeyJwk", default, skip_serializing_if = "Option::is_none")]
    pub jwk: Option<Jwk>,
    #[serde(flatten)]
    pub properties: Map<String, Value>
}

impl PublicKey {
    pub fn new(id: &str, key_type: &str, usage: &[KeyUsage], jwk: Jwk) -> Self {
        PublicKey{
            id: Some(id.to_string()),
            key_type: Some(key_type.to_string()),
            usage: Some(usage.iter().map(|u| u.to_string()).collect()),
            jwk: Some(jwk),
            properties: Map::new()
        }
    }

    pub fn id(&self) -> &str {self.id.as_deref().unwrap_or_default()}
    pub fn key_type(&self) -> &str {self.key_type.as_deref().unwrap_or_default()}
    pub fn usage(&self) -> &[String] {self.usage.as_deref().unwrap_or_default()}
    pub fn jwk(&self) -> Option<&Jwk> {self.jwk.as_ref()}

    /// Number of top-level properties present on the key.
    pub fn len(&self) -> usize {
        [self.id.is_some(), self.key_type.is_some(), self.usage.is_some(), self.jwk.is_some()]
            .into_iter().filter(|p| *p).count() + self.properties.len()
    }

    pub fn is_empty(&self) -> bool {self.len() == 0}
}
