use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog product
///
/// `id` is assigned by the store; any value supplied by a client is discarded
/// on creation. Fields other than `id`, `name` and `price` are carried through
/// unmodified in `attributes`. An explicit `null` name or price is kept there
/// as well, so it serializes back as `null` rather than disappearing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            price: Some(price),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

impl TryFrom<Map<String, Value>> for Product {
    type Error = serde_json::Error;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = match fields.remove("id") {
            Some(value) => serde_json::from_value(value)?,
            None => None,
        };
        let name = take_non_null(&mut fields, "name")?;
        let price = take_non_null(&mut fields, "price")?;

        Ok(Self {
            id,
            name,
            price,
            attributes: fields,
        })
    }
}

// A null stays behind in `fields`
fn take_non_null<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    key: &str,
) -> serde_json::Result<Option<T>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => fields.remove(key).map(serde_json::from_value).transpose(),
    }
}
