//! FFmpeg CLI wrapper for highlight video assembly.
//!
//! This crate implements the video-assembly side of the curation pipeline:
//! it takes the time-sorted `(start, end)` segment list produced by the
//! block grouper, cuts each segment out of the source recording with stream
//! copy, and concatenates the cuts into a single highlight file.

pub mod assemble;
pub mod command;
pub mod error;

pub use assemble::assemble_highlight_video;
pub use command::{FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
