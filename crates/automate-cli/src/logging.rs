use anyhow::Result;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

pub const TRACKER_DIAGNOSTICS: &str = "automate_tracker=debug";

/// `RUST_LOG`-style filter, widened to the matcher diagnostics when `debug` is set.
pub fn diagnostics_filter(directives: &str, debug: bool) -> Result<EnvFilter> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .parse_lossy(directives);
    if !debug {
        return Ok(filter);
    }
    let directive: Directive = TRACKER_DIAGNOSTICS.parse()?;
    Ok(filter.add_directive(directive))
}

pub fn init(debug: bool) -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(diagnostics_filter(&directives, debug)?)
        .init();
    Ok(())
}
