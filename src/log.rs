// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// `RUST_LOG` wins when set; otherwise debug for this crate with `--verbose`.
fn filter_directive(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(env) => env.to_string(),
        None if verbose => "moneyboard=debug".to_string(),
        None => "off".to_string(),
    }
}

/// Logs go to stderr so table and JSON output on stdout stay clean.
pub fn init_logging(verbose: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(verbose, env.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_verbosity() {
        assert_eq!(filter_directive(false, Some("moneyboard=debug")), "moneyboard=debug");
        assert_eq!(filter_directive(true, Some("warn")), "warn");
    }

    #[test]
    fn verbose_flag_without_env() {
        assert_eq!(filter_directive(true, None), "moneyboard=debug");
        assert_eq!(filter_directive(false, None), "off");
        assert_eq!(filter_directive(false, Some("  ")), "off");
    }
}
