//! Logging and tracing initialisation
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! human-readable or a JSON formatter. Output goes to stderr so command
//! output on stdout stays machine-readable.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
