//! Client for the upstream chunk classification service.
//!
//! This crate owns the classification boundary of the curation pipeline:
//! - A fixed-window rate limiter gating every upstream call
//! - An OpenAI-compatible chat-completions client
//! - Prompt construction for transcript topic tagging
//! - A defensive parser for the free-text classification responses
//!
//! Everything downstream of [`parser::ClassificationParser`] operates on
//! well-formed [`recap_models::Chunk`] records only.

pub mod client;
pub mod error;
pub mod parser;
pub mod prompt;
pub mod rate_limit;
pub mod types;

pub use client::{ChatClient, ChatConfig};
pub use error::{LlmError, LlmResult};
pub use parser::{ChunkContext, ClassificationParser};
pub use rate_limit::{estimate_tokens, RateLimiter};
