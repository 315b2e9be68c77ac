//! `HH:MM:SS.ff` timestamp parsing and formatting.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid timestamp: {0}, expected 'HH:MM:SS.ff'")]
pub struct TimestampError(pub String);

/// Parse a timestamp string (HH:MM:SS or HH:MM:SS.ff) to total seconds.
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let parts: Vec<&str> = ts.split(':').collect();
    if parts.len() != 3 {
        return Err(TimestampError(ts.to_string()));
    }

    let hours: f64 = parts[0]
        .parse()
        .map_err(|_| TimestampError(ts.to_string()))?;
    let minutes: f64 = parts[1]
        .parse()
        .map_err(|_| TimestampError(ts.to_string()))?;
    let seconds: f64 = parts[2]
        .parse()
        .map_err(|_| TimestampError(ts.to_string()))?;

    if hours < 0.0 || minutes < 0.0 || seconds < 0.0 {
        return Err(TimestampError(ts.to_string()));
    }

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Format seconds as `HH:MM:SS.ff` with two fractional digits.
pub fn format_timestamp(total_seconds: f64) -> String {
    let total_seconds = total_seconds.max(0.0);
    let hours = (total_seconds / 3600.0) as u64;
    let minutes = ((total_seconds % 3600.0) / 60.0) as u64;
    let seconds = total_seconds % 60.0;
    format!("{:02}:{:02}:{:05.2}", hours, minutes, seconds)
}
