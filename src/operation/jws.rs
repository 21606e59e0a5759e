use super::Error;

use crate::common::Convert;

use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct JwsHeader {
    #[serde(default)]
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>
}

impl JwsHeader {
    pub fn new(alg: &str) -> Self {
        JwsHeader{alg: alg.to_string(), ..Default::default()}
    }
}

/// A compact-serialized JWS (`header.payload.signature`). Only the structure is
/// checked here; signatures are verified by whoever knows the committed keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactJws {
    header: JwsHeader,
    payload: Vec<u8>,
    signature: Vec<u8>
}

impl CompactJws {
    pub fn new(header: JwsHeader, payload: Vec<u8>, signature: Vec<u8>) -> Self {
        CompactJws{header, payload, signature}
    }

    pub fn parse(compact: &str) -> Result<Self, Error> {
        let error = |r: &str| Error::invalid("signed data", r);
        let parts: Vec<&str> = compact.split('.').collect();
        if parts.len() != 3 {
            return Err(error("invalid JWS compact format"));
        }
        let header: JwsHeader = serde_json::from_slice(&Convert::Base64Url.decode_field("signedData.protected", parts[0])?)?;
        if header.alg.is_empty() {
            return Err(error("missing alg in protected header"));
        }
        let payload = Convert::Base64Url.decode_field("signedData.payload", parts[1])?;
        if payload.is_empty() {
            return Err(error("missing payload"));
        }
        let signature = Convert::Base64Url.decode_field("signedData.signature", parts[2])?;
        if signature.is_empty() {
            return Err(error("missing signature"));
        }
        Ok(CompactJws{header, payload, signature})
    }

    pub fn header(&self) -> &JwsHeader {&self.header}
    pub fn payload(&self) -> &[u8] {&self.payload}
    pub fn signature(&self) -> &[u8] {&self.signature}

    pub fn claims<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_slice(&self.payload)?)
    }

    pub fn to_compact(&self) -> Result<String, Error> {
        Ok(format!("{}.{}.{}",
            Convert::Base64Url.encode(&serde_json::to_vec(&self.header)?),
            Convert::Base64Url.encode(&self.payload),
            Convert::Base64Url.encode(&self.signature)
        ))
    }
}
