//! Tracing subscriber setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "cutroom=info,cutroom_editing=info,cutroom_cli=info";

/// Whether `LOG_FORMAT` asks for JSON output.
pub fn json_requested(value: Option<&str>) -> bool {
    value.map(|v| v.eq_ignore_ascii_case("json")).unwrap_or(false)
}

/// Install the global subscriber: colored for dev, JSON for production.
///
/// Logs go to stderr so stdout stays clean for command output.
pub fn init_tracing() {
    let use_json = json_requested(std::env::var("LOG_FORMAT").ok().as_deref());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_requested() {
        assert!(json_requested(Some("json")));
        assert!(json_requested(Some("JSON")));
        assert!(!json_requested(Some("pretty")));
        assert!(!json_requested(None));
    }
}
