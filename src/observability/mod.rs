//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config loading produces:
//!     → tracing events (scan results, secret precedence, load summary)
//!
//! Consumers:
//!     → logging.rs subscriber installed by the binary (stderr)
//! ```

pub mod logging;
