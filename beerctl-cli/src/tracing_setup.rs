//! Log output for beerctl
//!
//! Console logging is always installed. With `--otel` and a build that has
//! the `telemetry` feature, spans are also shipped to an OTLP collector
//! (`OTEL_EXPORTER_OTLP_ENDPOINT`, service name from `OTEL_SERVICE_NAME`).

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "info";

/// `--debug` only raises our own crates and the request tracer; sqlx and
/// hyper stay at info.
const DEBUG_DIRECTIVE: &str = "info,beerctl=debug,beerctl_server=debug,tower_http=debug";

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    pub debug: bool,
    pub otel: bool,
}

/// Handle returned by [`init`]. Call [`Telemetry::shutdown`] before exit so
/// buffered spans are flushed.
#[must_use]
pub struct Telemetry {
    #[cfg(feature = "telemetry")]
    provider: Option<opentelemetry_sdk::trace::TracerProvider>,
}

impl Telemetry {
    pub fn shutdown(self) {
        #[cfg(feature = "telemetry")]
        if let Some(provider) = self.provider {
            if let Err(err) = provider.shutdown() {
                eprintln!("beerctl: failed to flush spans: {err}");
            }
        }
    }
}

/// A non-blank `RUST_LOG` is used as given; otherwise `--debug` picks the
/// debug directive.
pub fn filter_directive(rust_log: Option<&str>, debug: bool) -> String {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => explicit.to_string(),
        None if debug => DEBUG_DIRECTIVE.to_string(),
        None => DEFAULT_DIRECTIVE.to_string(),
    }
}

fn build_filter(rust_log: Option<&str>, debug: bool) -> Result<EnvFilter> {
    let directive = filter_directive(rust_log, debug);
    EnvFilter::try_new(&directive).with_context(|| format!("invalid log filter `{directive}`"))
}

/// Install the global subscriber. Fails if one is already set or if
/// `RUST_LOG` does not parse.
pub fn init(options: &LogOptions) -> Result<Telemetry> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), options.debug)?;

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(options.debug));

    #[cfg(feature = "telemetry")]
    let provider = if options.otel {
        Some(otlp_provider()?)
    } else {
        None
    };

    #[cfg(feature = "telemetry")]
    let registry = registry.with(provider.as_ref().map(|provider| {
        use opentelemetry::trace::TracerProvider as _;
        tracing_opentelemetry::layer().with_tracer(provider.tracer("beerctl"))
    }));

    registry
        .try_init()
        .context("a tracing subscriber is already installed")?;

    #[cfg(feature = "telemetry")]
    if provider.is_some() {
        tracing::info!("exporting spans over OTLP");
    }

    #[cfg(not(feature = "telemetry"))]
    if options.otel {
        tracing::warn!("--otel ignored: beerctl was built without the `telemetry` feature");
    }

    Ok(Telemetry {
        #[cfg(feature = "telemetry")]
        provider,
    })
}

#[cfg(feature = "telemetry")]
fn otlp_provider() -> Result<opentelemetry_sdk::trace::TracerProvider> {
    use opentelemetry::KeyValue;
    use opentelemetry_sdk::trace::TracerProvider;
    use opentelemetry_sdk::{runtime, Resource};

    // Endpoint comes from OTEL_EXPORTER_OTLP_ENDPOINT, default localhost:4317
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .context("failed to build OTLP span exporter")?;

    let service_name = std::env::var("OTEL_SERVICE_NAME")
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "beerctl".to_string());

    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(Resource::new([KeyValue::new("service.name", service_name)]))
        .build())
}
