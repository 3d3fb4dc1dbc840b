use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static LOGGER_INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset: our crates at `info` (or
/// `debug`), everything else at `warn`.
pub fn filter_directive(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("warn,mousetrap={0},mousetrap_web={0}", level)
}

/// Install the global subscriber and route `log` records into it.
/// Later calls are ignored, so every entry point may call this.
///
/// On wasm32 events go to the browser console and panics are reported there
/// too.
pub fn init(debug: bool) {
    LOGGER_INIT.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        let _ = tracing_log::LogTracer::init();

        let layer = fmt::layer()
            .without_time()
            .with_target(true)
            .with_level(true)
            .compact();
        #[cfg(target_arch = "wasm32")]
        let layer = layer
            .with_ansi(false)
            .with_writer(crate::ConsoleMakeWriter::browser());

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directive(debug)));

        let _ = tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(layer).with(filter),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_scopes_our_crates() {
        assert_eq!(
            filter_directive(false),
            "warn,mousetrap=info,mousetrap_web=info"
        );
        assert!(filter_directive(true).contains("mousetrap=debug"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init(true);
        init(false);
        log::debug!("still routed after a second init");
        assert!(LOGGER_INIT.is_completed());
    }
}
