use anyhow::Context as _;
use opentelemetry::trace::TraceId;
use tracing_subscriber::{prelude::*, EnvFilter, Registry};

const SERVICE_NAME: &str = "s3-bucket-operator";

/// The trace ID of the current span, when an OpenTelemetry exporter is installed
pub fn get_trace_id() -> Option<TraceId> {
    use opentelemetry::trace::TraceContextExt as _;
    use tracing_opentelemetry::OpenTelemetrySpanExt as _;

    let context = tracing::Span::current().context();
    Some(context.span().span_context().trace_id()).filter(|id| *id != TraceId::INVALID)
}

#[cfg(feature = "telemetry")]
fn otlp_layer<S>() -> anyhow::Result<impl tracing_subscriber::Layer<S>>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_otlp::{SpanExporter, WithExportConfig};
    use opentelemetry_sdk::{trace::SdkTracerProvider, Resource};

    let endpoint = std::env::var("OPENTELEMETRY_ENDPOINT_URL")
        .context("OPENTELEMETRY_ENDPOINT_URL must point at an OTLP collector")?;
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("creating the OTLP span exporter")?;
    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(Resource::builder().with_service_name(SERVICE_NAME).build())
        .build();
    let tracer = provider.tracer(SERVICE_NAME);
    opentelemetry::global::set_tracer_provider(provider);
    Ok(tracing_opentelemetry::layer().with_tracer(tracer))
}

/// Installs the global subscriber. `RUST_LOG` filters, `LOG_FORMAT=json` switches to JSON lines.
pub fn init() -> anyhow::Result<()> {
    let logger = match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => tracing_subscriber::fmt::layer().json().boxed(),
        _ => tracing_subscriber::fmt::layer().compact().boxed(),
    };
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    #[cfg(feature = "telemetry")]
    let collector = Registry::default()
        .with(otlp_layer()?)
        .with(logger)
        .with(env_filter);
    #[cfg(not(feature = "telemetry"))]
    let collector = Registry::default().with(logger).with(env_filter);

    tracing::subscriber::set_global_default(collector)
        .context("a global tracing subscriber is already installed")
}
