//! typed records
//!
//! [`Record`] is implemented by every request and response shape. response
//! records ignore unknown fields; input records are declared with
//! `#[serde(deny_unknown_fields)]` and reject them.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// a named set of typed fields that converts to and from a json map
pub trait Record: Serialize + DeserializeOwned {
    /// record name used in validation errors
    const NAME: &'static str;

    /// field checks that serde cannot express
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// construct from a field map, then validate
    fn from_map(map: Map<String, Value>) -> Result<Self> {
        let record: Self = serde_json::from_value(Value::Object(map))
            .map_err(|err| validation_from_serde(Self::NAME, &err))?;
        record.validate()?;
        Ok(record)
    }

    /// every field, including nulls and defaults
    fn to_map(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::Validation {
                record: Self::NAME.to_string(),
                field: None,
                message: "record did not serialize to an object".to_string(),
            }),
        }
    }

    /// the map sent on the wire; read-path records send every field
    fn to_wire(&self) -> Result<Map<String, Value>> {
        self.to_map()
    }
}

/// records sent as sparse mutation payloads
pub trait SparseRecord: Record + Default {
    /// drop null fields and fields equal to the default
    fn to_sparse_map(&self) -> Result<Map<String, Value>> {
        let defaults = Self::default().to_map()?;
        Ok(self
            .to_map()?
            .into_iter()
            .filter(|(key, value)| !value.is_null() && defaults.get(key) != Some(value))
            .collect())
    }
}

/// mutation variables of the form `{ "input": { ... } }`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InputVariables<I> {
    /// mutation input record
    pub input: I,
}

impl<I> InputVariables<I> {
    pub fn new(input: I) -> Self {
        Self { input }
    }
}

impl<I: SparseRecord> Record for InputVariables<I> {
    const NAME: &'static str = I::NAME;

    fn validate(&self) -> Result<()> {
        self.input.validate()
    }

    fn to_wire(&self) -> Result<Map<String, Value>> {
        let mut map = Map::new();
        map.insert(
            "input".to_string(),
            Value::Object(self.input.to_sparse_map()?),
        );
        Ok(map)
    }
}

/// reject empty or whitespace-only strings
pub(crate) fn require_non_empty(record: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::missing_field(record, field));
    }
    Ok(())
}

fn validation_from_serde(record: &str, err: &serde_json::Error) -> Error {
    let message = err.to_string();
    let field = ["missing field `", "unknown field `"]
        .iter()
        .find_map(|prefix| message.strip_prefix(prefix))
        .and_then(|rest| rest.split('`').next())
        .map(str::to_string);
    Error::Validation {
        record: record.to_string(),
        field,
        message,
    }
}
