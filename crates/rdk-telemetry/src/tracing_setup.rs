use uuid::Uuid;

/// Generate an OpenTelemetry-compatible trace ID (32 hex characters).
pub fn generate_trace_id() -> String {
    // A UUID without hyphens is exactly 32 hex chars.
    Uuid::new_v4().as_simple().to_string()
}

/// Create the root span for one CLI command, returning the span and its
/// trace ID so the caller can log it.
pub fn command_span(command: &str) -> (tracing::Span, String) {
    let trace_id = generate_trace_id();
    let span = tracing::info_span!(
        "command",
        trace_id = %trace_id,
        command = %command,
    );
    (span, trace_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
