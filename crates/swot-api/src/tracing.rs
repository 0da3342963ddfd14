//! Log output for the server. `RUST_LOG` overrides the default directives.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

const DEV_DIRECTIVES: &str = "debug,tower_http=debug,sqlx=warn";
const PROD_DIRECTIVES: &str = "info,tower_http=info,sqlx=warn";

fn filter_for(env: &Environment) -> EnvFilter {
    let defaults = if env.is_development() {
        DEV_DIRECTIVES
    } else {
        PROD_DIRECTIVES
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(defaults))
}

/// Install the global subscriber: pretty lines with source locations while
/// developing, flattened JSON events with span context in production.
pub fn init_tracing(env: &Environment) {
    let filter = filter_for(env);

    let fmt_layer = if env.is_development() {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_filter(filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_filter(filter)
            .boxed()
    };

    tracing_subscriber::registry().with(fmt_layer).init();
    tracing::info!(environment = ?env, "Logging ready");
}
