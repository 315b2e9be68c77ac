//! Deterministic sequence-curation passes.
//!
//! This crate provides the order-sensitive, in-memory passes that turn a
//! classified transcript into topic-coherent highlight blocks:
//! - Topic transition smoothing (debounce short spurious flips)
//! - Keep-flag refinement (local 3-chunk window rules)
//! - Topic cluster assignment (stable first-seen ids)
//! - Highlight block grouping (gap-tolerant contiguity)
//!
//! Every pass is pure and single-threaded: identical input produces identical
//! output. Each pass takes the chunk sequence by exclusive borrow, so only one
//! stage can mutate it at a time.

pub mod cluster;
pub mod grouper;
pub mod refiner;
pub mod smoother;

pub use cluster::assign_cluster_ids;
pub use grouper::{flatten_segments_by_start, group_highlight_blocks};
pub use refiner::{refine_keep, REASON_GAP_FILL, REASON_ISOLATED, REASON_ORIGINAL};
pub use smoother::smooth_topic_transitions;
