//! Global tracing subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;
use crate::error::StartupError;

/// Applied when `RUST_LOG` is unset or unparsable. Matches every
/// `quill_*` crate by target prefix.
const DEFAULT_DIRECTIVE: &str = "quill=info";

/// Install the process-wide subscriber. Call once, from `main`.
pub fn init(format: LogFormat) -> Result<(), StartupError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    result.map_err(|e| StartupError::Logging(e.to_string()))
}
