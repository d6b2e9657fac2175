use crate::enums::ModelType;
use crate::error::{Error, Result};
use crate::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// a model registered in a space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub model_type: Option<ModelType>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_demo_model: bool,
}

impl Record for Model {
    const NAME: &'static str = "Model";
}

/// a model addressed by id or by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelRef {
    Id(String),
    Name(String),
}

impl ModelRef {
    /// build from optional id and name arguments; exactly one must be set
    pub fn from_parts(id: Option<String>, name: Option<String>) -> Result<Self> {
        match (id, name) {
            (Some(id), None) if !id.trim().is_empty() => Ok(ModelRef::Id(id)),
            (None, Some(name)) if !name.trim().is_empty() => Ok(ModelRef::Name(name)),
            (Some(_), Some(_)) => Err(Error::Validation {
                record: "ModelRef".to_string(),
                field: None,
                message: "pass either a model id or a model name, not both".to_string(),
            }),
            _ => Err(Error::Validation {
                record: "ModelRef".to_string(),
                field: None,
                message: "a model id or a model name is required".to_string(),
            }),
        }
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelRef::Id(id) => write!(f, "model id '{id}'"),
            ModelRef::Name(name) => write!(f, "model '{name}'"),
        }
    }
}
