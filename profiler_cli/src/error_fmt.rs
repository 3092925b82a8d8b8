//! Human-readable error descriptions and structured JSON error formatting.

use profiler_core::error::{BuildError, ProfilerError};

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::EmptyProfile => {
                "What happened: The profile has no phases.\nLikely causes: The [[phases]] array is missing or empty.\nHow to fix: Add at least one [[phases]] entry to the profile TOML.".to_string()
            }
        };
    }

    if let Some(pe) = err.downcast_ref::<ProfilerError>() {
        return match pe {
            ProfilerError::Timeout => "What happened: Sensor tick read timed out.\nLikely causes: Acquisition layer stalled or disconnected.\nHow to fix: Check the sensor source and retry.".to_string(),
            ProfilerError::State(msg) => format!(
                "What happened: The shot log is not replayable ({msg}).\nLikely causes: Rows out of order or clock reset mid-shot.\nHow to fix: Sort the log by time_ms or split it into separate shots."
            ),
            other => format!(
                "What happened: {other}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    // String-based heuristics for errors coming from config or file loading
    let msg = format!("{err:#}");
    let lower = msg.to_ascii_lowercase();

    if lower.contains("shot log csv must have headers") {
        return format!(
            "Invalid headers in shot log CSV. Expected '{}'.",
            profiler_config::SHOT_LOG_HEADERS.join(",")
        );
    }

    if lower.contains("invalid shot log row") {
        return format!(
            "What happened: A shot log row could not be parsed.\nLikely causes: Missing column or non-numeric value.\nHow to fix: Fix the row named below. Original: {msg}"
        );
    }

    if lower.contains("invalid configuration") || lower.contains("parse config") {
        return format!(
            "What happened: Configuration is invalid or incomplete.\nLikely causes: Missing [[phases]], unknown phase type or curve, or non-finite numbers.\nHow to fix: Edit the TOML profile and try again. Original: {msg}"
        );
    }

    if lower.contains("read config") || lower.contains("open shot log") {
        return format!(
            "What happened: An input file could not be opened.\nLikely causes: Wrong path or missing permissions.\nHow to fix: Check --config / --log. Original: {msg}"
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes; anything not classified returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if err.downcast_ref::<BuildError>().is_some() {
        return 3;
    }
    match err.downcast_ref::<ProfilerError>() {
        Some(ProfilerError::State(_)) => 4,
        Some(ProfilerError::Source(_) | ProfilerError::Timeout) => 5,
        Some(ProfilerError::Sink(_)) => 6,
        _ => 1,
    }
}

fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::EmptyProfile => "EmptyProfile",
        };
    }
    match err.downcast_ref::<ProfilerError>() {
        Some(ProfilerError::State(_)) => "State",
        Some(ProfilerError::Source(_)) => "Source",
        Some(ProfilerError::Timeout) => "Timeout",
        Some(ProfilerError::Sink(_)) => "Sink",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    json!({
        "reason": reason_name(err),
        "exit_code": exit_code_for_error(err),
        "message": humanize(err),
    })
    .to_string()
}
