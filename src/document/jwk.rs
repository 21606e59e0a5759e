use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

/// Public key in JWK form. Presence of each member is tracked so the exact
/// property count can be checked; unknown members are kept in `properties`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Jwk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>
}

impl Jwk {
    pub fn new(kty: &str, crv: &str, x: &str, y: &str) -> Self {
        Jwk{
            kty: Some(kty.to_string()),
            crv: Some(crv.to_string()),
            x: Some(x.to_string()),
            y: Some(y.to_string()),
            properties: Map::new()
        }
    }

    pub fn kty(&self) -> &str {self.kty.as_deref().unwrap_or_default()}
    pub fn crv(&self) -> &str {self.crv.as_deref().unwrap_or_default()}
    pub fn x(&self) -> &str {self.x.as_deref().unwrap_or_default()}
    pub fn y(&self) -> &str {self.y.as_deref().unwrap_or_default()}

    pub fn len(&self) -> usize {
        [&self.kty, &self.crv, &self.x, &self.y].iter().filter(|p| p.is_some()).count() + self.properties.len()
    }

    pub fn is_empty(&self) -> bool {self.len() == 0}
}
