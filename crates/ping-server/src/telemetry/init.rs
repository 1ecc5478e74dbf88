//! Tracing subscriber initialisation, with an optional OTLP exporter.

use anyhow::{Context, Result};
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace::Tracer, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// Configures:
/// - An [`EnvFilter`] from `RUST_LOG`, falling back to `log_level`.
/// - A JSON-formatted [`tracing_subscriber`] layer for structured log output.
/// - When `otlp_endpoint` is set, a [`tracing_opentelemetry`] layer exporting
///   spans to that endpoint.
///
/// # Errors
///
/// Returns an error if the OTLP pipeline cannot be built or a global
/// subscriber is already installed.
pub fn init_telemetry(log_level: &str, otlp_endpoint: Option<&str>) -> Result<()> {
    let otel_layer = otlp_endpoint
        .map(|endpoint| otlp_tracer(endpoint).map(|t| tracing_opentelemetry::layer().with_tracer(t)))
        .transpose()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .with(otel_layer)
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}

/// Flush pending spans. A no-op when no exporter was installed.
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

fn otlp_tracer(endpoint: &str) -> Result<Tracer> {
    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(
            opentelemetry_sdk::trace::Config::default().with_resource(service_resource()),
        )
        .install_batch(runtime::Tokio)
        .context("failed to install OTLP tracing pipeline")
}

fn service_resource() -> Resource {
    Resource::new(vec![
        KeyValue::new(
            opentelemetry_semantic_conventions::resource::SERVICE_NAME,
            "ping-server",
        ),
        KeyValue::new(
            opentelemetry_semantic_conventions::resource::SERVICE_VERSION,
            env!("CARGO_PKG_VERSION"),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_names_the_service() {
        let resource = service_resource();
        let name = resource
            .get(opentelemetry::Key::from_static_str(
                opentelemetry_semantic_conventions::resource::SERVICE_NAME,
            ))
            .unwrap();
        assert_eq!(name.as_str(), "ping-server");
    }

    #[test]
    fn second_init_is_rejected() {
        assert!(init_telemetry("debug", None).is_ok());
        assert!(init_telemetry("debug", None).is_err());
    }
}
