//! Highlight video assembly.
//!
//! Cuts every time-sorted segment out of the source recording with stream
//! copy, then joins the cuts with FFmpeg's concat demuxer. The input list
//! must already be sorted by start time — the curation side owns that
//! ordering, assembly only materializes it.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::info;

use recap_models::{parse_timestamp, TimeSegment};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Cut and concatenate `segments` of `video_path` into
/// `output_dir/output_name`, returning the final file path.
///
/// Segment timestamps are validated up front; a malformed timestamp aborts
/// the run before any cutting starts.
pub async fn assemble_highlight_video(
    video_path: &Path,
    segments: &[TimeSegment],
    output_dir: &Path,
    output_name: &str,
) -> MediaResult<PathBuf> {
    if segments.is_empty() {
        return Err(MediaError::EmptySegmentList);
    }
    if !video_path.exists() {
        return Err(MediaError::FileNotFound(video_path.to_path_buf()));
    }

    tokio::fs::create_dir_all(output_dir).await?;
    let scratch = tempfile::tempdir_in(output_dir)?;

    info!(
        segments = segments.len(),
        video = %video_path.display(),
        "Assembling highlight video"
    );

    let runner = FfmpegRunner::new();
    let mut cut_paths = Vec::with_capacity(segments.len());

    for (idx, segment) in segments.iter().enumerate() {
        let start = parse_timestamp(&segment.start)
            .map_err(|_| MediaError::InvalidTimestamp(segment.start.clone()))?;
        let end = parse_timestamp(&segment.end)
            .map_err(|_| MediaError::InvalidTimestamp(segment.end.clone()))?;
        let duration = (end - start).max(0.0);

        let cut_path = scratch.path().join(format!("segment_{idx:04}.mp4"));
        let cmd = FfmpegCommand::new(video_path, &cut_path)
            .seek(start)
            .duration(duration)
            .codec_copy();
        runner.run(&cmd).await?;
        cut_paths.push(cut_path);
    }

    let list_path = scratch.path().join("concat_list.txt");
    write_concat_list(&list_path, &cut_paths).await?;

    let output_path = output_dir.join(output_name);
    let cmd = FfmpegCommand::new(&list_path, &output_path)
        .concat_list()
        .codec_copy();
    runner.run(&cmd).await?;

    info!(output = %output_path.display(), "Highlight video assembled");
    Ok(output_path)
}

/// Write an FFmpeg concat-demuxer list file.
///
/// Paths are written with forward slashes; single quotes in paths are
/// escaped per the demuxer's quoting rules.
async fn write_concat_list(list_path: &Path, cut_paths: &[PathBuf]) -> MediaResult<()> {
    let mut body = String::new();
    for path in cut_paths {
        let normalized = path.to_string_lossy().replace('\\', "/");
        let escaped = normalized.replace('\'', "'\\''");
        body.push_str(&format!("file '{}'\n", escaped));
    }

    let mut file = tokio::fs::File::create(list_path).await?;
    file.write_all(body.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_segment_list_is_an_error() {
        let err = assemble_highlight_video(
            Path::new("missing.mp4"),
            &[],
            Path::new("/tmp"),
            "out.mp4",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, MediaError::EmptySegmentList));
    }

    #[tokio::test]
    async fn missing_video_is_an_error() {
        let segments = vec![TimeSegment::new("00:00:00.00", "00:00:10.00")];
        let err = assemble_highlight_video(
            Path::new("definitely/not/here.mp4"),
            &segments,
            Path::new("/tmp"),
            "out.mp4",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, MediaError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn concat_list_escapes_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("list.txt");
        let cuts = vec![
            dir.path().join("a.mp4"),
            dir.path().join("it's.mp4"),
        ];

        write_concat_list(&list_path, &cuts).await.unwrap();
        let body = tokio::fs::read_to_string(&list_path).await.unwrap();

        assert_eq!(body.lines().count(), 2);
        assert!(body.contains("a.mp4'"));
        assert!(body.contains("it'\\''s.mp4"));
    }
}
