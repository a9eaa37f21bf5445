//! Diagnostic logging setup.
//!
//! The library only emits `tracing` events; binaries decide where they go.
//! `HISTMERGE_LOG` accepts the usual `EnvFilter` directives and wins over the
//! default passed by the caller.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable consulted for log directives.
pub const LOG_ENV: &str = "HISTMERGE_LOG";

static INIT: Once = Once::new();

/// Map a repeat count of `-v` flags onto a filter directive.
#[must_use]
pub fn directive_for_verbosity(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "histmerge=warn,histmerge_provider_api=warn",
		1 => "histmerge=info,histmerge_provider_api=info",
		2 => "histmerge=debug,histmerge_provider_api=debug",
		_ => "histmerge=trace,histmerge_provider_api=trace",
	}
}

/// Install a stderr subscriber. Later calls are no-ops.
pub fn initialize(default_directive: &str) {
	INIT.call_once(|| {
		let filter = EnvFilter::try_from_env(LOG_ENV)
			.unwrap_or_else(|_| EnvFilter::new(default_directive));

		// Another subscriber may already be installed by an embedding binary.
		let _ = tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_writer(std::io::stderr)
			.with_target(true)
			.try_init();
	});
}
