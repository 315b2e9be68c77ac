//! Topic cluster assignment.
//!
//! Clusters are identity-based, not contiguity-based: every chunk sharing a
//! topic name receives the same id regardless of where it sits in the
//! sequence. Ids ascend from 1 in order of first appearance, so re-running
//! the pass on the same sequence is stable.

use std::collections::HashMap;

use tracing::debug;

use recap_models::{Chunk, ClusterEntry, ClusterMap};

/// Assign a stable cluster id to every non-NA topic and build the reverse
/// index from cluster id to topic and member chunk ids.
///
/// Chunks with an NA topic get `cluster_id = None` and are excluded from
/// the map.
pub fn assign_cluster_ids(chunks: &mut [Chunk]) -> ClusterMap {
    let mut topic_to_id: HashMap<String, u32> = HashMap::new();
    let mut map = ClusterMap::new();
    let mut next_id = 1u32;

    for chunk in chunks.iter_mut() {
        let topic = match &chunk.topic_name {
            Some(topic) => topic.clone(),
            None => {
                chunk.cluster_id = None;
                continue;
            }
        };

        let id = match topic_to_id.get(&topic) {
            Some(&id) => id,
            None => {
                let id = next_id;
                next_id += 1;
                topic_to_id.insert(topic.clone(), id);
                map.insert(
                    id,
                    ClusterEntry {
                        topic_name: topic,
                        chunk_ids: Vec::new(),
                    },
                );
                id
            }
        };

        chunk.cluster_id = Some(id);
        if let Some(entry) = map.get_mut(&id) {
            entry.chunk_ids.push(chunk.chunk_id);
        }
    }

    debug!(clusters = map.len(), "Assigned cluster ids");
    map
}
