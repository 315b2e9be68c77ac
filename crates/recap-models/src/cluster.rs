//! Topic cluster map.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One topic cluster: the set of all chunks sharing a topic identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClusterEntry {
    /// Topic shared by every member chunk
    pub topic_name: String,
    /// Member chunk ids in sequence order
    pub chunk_ids: Vec<u32>,
}

/// Reverse index from cluster id to topic and members.
///
/// A BTreeMap keeps serialization order deterministic across runs.
pub type ClusterMap = BTreeMap<u32, ClusterEntry>;
