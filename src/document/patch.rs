use super::Error;
use super::did_document::{DidDocument, PUBLIC_KEY_PROPERTY, SERVICE_PROPERTY};
use super::public_key::PublicKey;
use super::service::Service;
use super::validator::validate_public_keys;

use std::collections::HashSet;

use serde::{Serialize, Deserialize};

/// A single DID state transition. Patches are applied in the order given.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Patch {
    Replace {
        document: DidDocument
    },
    AddPublicKeys {
        #[serde(rename = "publicKeys")]
        public_keys: Vec<PublicKey>
    },
    RemovePublicKeys {
        #[serde(alias = "publicKeys")]
        ids: Vec<String>
    },
    AddServiceEndpoints {
        #[serde(rename = "serviceEndpoints")]
        service_endpoints: Vec<Service>
    },
    RemoveServiceEndpoints {
        #[serde(alias = "serviceEndpointIds")]
        ids: Vec<String>
    },
}

impl Patch {
    pub fn new_replace(document: DidDocument) -> Self {Patch::Replace{document}}

    pub fn new_replace_from_bytes(data: &[u8]) -> Result<Self, Error> {
        Ok(Patch::Replace{document: DidDocument::from_bytes(data)?})
    }

    pub fn action(&self) -> &'static str {
        match self {
            Patch::Replace{..} => "replace",
            Patch::AddPublicKeys{..} => "add-public-keys",
            Patch::RemovePublicKeys{..} => "remove-public-keys",
            Patch::AddServiceEndpoints{..} => "add-service-endpoints",
            Patch::RemoveServiceEndpoints{..} => "remove-service-endpoints",
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let error = |r: &str| Error::invalid(self.action(), r);
        match self {
            Patch::Replace{..} => Ok(()),
            Patch::AddPublicKeys{public_keys} => {
                if public_keys.is_empty() {return Err(error("missing public keys"));}
                validate_public_keys(public_keys)
            },
            Patch::RemovePublicKeys{ids} | Patch::RemoveServiceEndpoints{ids} => {
                if ids.is_empty() {return Err(error("missing ids"));}
                if ids.iter().any(|id| id.is_empty()) {return Err(error("empty id"));}
                Ok(())
            },
            Patch::AddServiceEndpoints{service_endpoints} => {
                if service_endpoints.is_empty() {return Err(error("missing service endpoints"));}
                let mut ids = HashSet::new();
                for service in service_endpoints {
                    if service.id.is_empty() {return Err(error("service id is missing"));}
                    if !ids.insert(service.id.as_str()) {
                        return Err(error(&format!("duplicate service id: {}", service.id)));
                    }
                }
                Ok(())
            }
        }
    }

    /// Produces the successor of `doc`. Added entries replace existing entries with
    /// the same id; removing an unknown id is not an error. Adding to a list that
    /// arrived mistyped discards the untyped value.
    pub fn apply(&self, mut doc: DidDocument) -> Result<DidDocument, Error> {
        self.validate()?;
        match self {
            Patch::Replace{document} => return Ok(document.clone()),
            Patch::AddPublicKeys{public_keys} => {
                doc.properties.remove(PUBLIC_KEY_PROPERTY);
                for key in public_keys {
                    match doc.public_keys.iter_mut().find(|k| k.id() == key.id()) {
                        Some(existing) => *existing = key.clone(),
                        None => doc.public_keys.push(key.clone())
                    }
                }
            },
            Patch::RemovePublicKeys{ids} => {
                doc.public_keys.retain(|k| !ids.iter().any(|id| id == k.id()));
            },
            Patch::AddServiceEndpoints{service_endpoints} => {
                doc.properties.remove(SERVICE_PROPERTY);
                for service in service_endpoints {
                    match doc.services.iter_mut().find(|s| s.id == service.id) {
                        Some(existing) => *existing = service.clone(),
                        None => doc.services.push(service.clone())
                    }
                }
            },
            Patch::RemoveServiceEndpoints{ids} => {
                doc.services.retain(|s| !ids.contains(&s.id));
            }
        }
        Ok(doc)
    }
}

pub fn apply_patches(doc: DidDocument, patches: &[Patch]) -> Result<DidDocument, Error> {
    patches.iter().try_fold(doc, |doc, patch| patch.apply(doc))
}
