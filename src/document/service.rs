use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub service_type: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub service_endpoint: Value,
    #[serde(flatten)]
    pub properties: Map<String, Value>
}

impl Service {
    pub fn new(id: &str, service_type: &str, service_endpoint: &str) -> Self {
        Service{
            id: id.to_string(),
            service_type: service_type.to_string(),
            service_endpoint: Value::String(service_endpoint.to_string()),
            properties: Map::new()
        }
    }
}
