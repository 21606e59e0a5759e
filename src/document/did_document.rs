use super::Error;
use super::public_key::PublicKey;
use super::service::Service;

use std::io::Read;

use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub const ID_PROPERTY: &str = "id";
pub const CONTEXT_PROPERTY: &str = "@context";
pub const PUBLIC_KEY_PROPERTY: &str = "publicKey";
pub const SERVICE_PROPERTY: &str = "service";
pub const AUTHENTICATION_PROPERTY: &str = "authentication";

/// JSON-LD `@context`: a single IRI or a list of them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum Context {
    Single(String),
    List(Vec<String>)
}

impl Context {
    pub fn values(&self) -> Vec<&str> {
        match self {
            Context::Single(context) => vec![context.as_str()],
            Context::List(contexts) => contexts.iter().map(|c| c.as_str()).collect()
        }
    }
}

/// A DID document. The protocol-level properties are typed when they have the
/// expected shape; anything else, including a mistyped protocol property, is
/// carried through untouched in `properties`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(from = "Map<String, Value>")]
pub struct DidDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(rename = "publicKey", default, skip_serializing_if = "Vec::is_empty")]
    pub public_keys: Vec<PublicKey>,
    #[serde(rename = "service", default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authentication: Vec<Value>,
    #[serde(flatten)]
    pub properties: Map<String, Value>
}

// Moves `name` out of `object` only when it has the shape `T` expects.
fn take<T: DeserializeOwned>(object: &mut Map<String, Value>, name: &str) -> Option<T> {
    let typed = serde_json::from_value(object.get(name)?.clone()).ok()?;
    object.remove(name);
    Some(typed)
}

impl From<Map<String, Value>> for DidDocument {
    fn from(mut object: Map<String, Value>) -> Self {
        DidDocument{
            id: take(&mut object, ID_PROPERTY),
            context: take(&mut object, CONTEXT_PROPERTY),
            public_keys: take(&mut object, PUBLIC_KEY_PROPERTY).unwrap_or_default(),
            services: take(&mut object, SERVICE_PROPERTY).unwrap_or_default(),
            authentication: take(&mut object, AUTHENTICATION_PROPERTY).unwrap_or_default(),
            properties: object
        }
    }
}

impl DidDocument {
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_ld_object(object: Map<String, Value>) -> Result<Self, Error> {
        Ok(DidDocument::from(object))
    }

    pub fn to_json_ld_object(&self) -> Result<Map<String, Value>, Error> {
        match serde_json::to_value(self)? {
            Value::Object(object) => Ok(object),
            _ => Err(Error::err("DidDocument.to_json_ld_object", "document did not serialize to an object"))
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn id(&self) -> &str {self.id.as_deref().unwrap_or_default()}

    pub fn context(&self) -> Vec<&str> {
        self.context.as_ref().map(|c| c.values()).unwrap_or_default()
    }

    pub fn public_key(&self, id: &str) -> Option<&PublicKey> {
        self.public_keys.iter().find(|k| k.id() == id)
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Authentication entries that are references (strings) rather than embedded keys.
    pub fn authentication_references(&self) -> Vec<&str> {
        self.authentication.iter().filter_map(|a| a.as_str()).collect()
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}
