use crate::record::Record;
use serde::{Deserialize, Serialize};

/// resolved organization and space ids for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceIds {
    pub organization_id: String,
    pub space_id: String,
}

impl Record for SpaceIds {
    const NAME: &'static str = "SpaceIds";
}
