//! Maps `Box<dyn Error>` from trait boundaries to typed `ProfilerError`.
//!
//! `profiler_traits` uses `Box<dyn Error + Send + Sync>` so acquisition and
//! actuator layers can surface their own error types; the runner converts them
//! here before wrapping them into reports.

use crate::error::ProfilerError;

/// Which side of the profiler an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Source,
    Sink,
}

/// Map a trait-boundary error to a typed `ProfilerError`.
///
/// `std::io` timeouts and messages mentioning a timeout map to
/// `ProfilerError::Timeout`; everything else keeps its message.
pub fn map_io_error(e: &(dyn std::error::Error + 'static), boundary: Boundary) -> ProfilerError {
    if let Some(io) = e.downcast_ref::<std::io::Error>()
        && matches!(
            io.kind(),
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
        )
    {
        return ProfilerError::Timeout;
    }

    let s = e.to_string();
    if s.to_lowercase().contains("timeout") {
        return ProfilerError::Timeout;
    }
    match boundary {
        Boundary::Source => ProfilerError::Source(s),
        Boundary::Sink => ProfilerError::Sink(s),
    }
}
