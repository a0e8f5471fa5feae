use std::fmt;
use std::sync::OnceLock;

use common::configuration::Tracing;
use common::consts::SERVICE_NAME;
use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};
use opentelemetry_sdk::Resource;
use time::macros::format_description;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::Layer as FmtLayer;
use tracing_subscriber::fmt::{
    format, time::FormatTime, FmtContext, FormatEvent, FormatFields, FormattedFields,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const REQUEST_ID_FIELD: &str = "request_id=";

struct BracketedTime;

impl FormatTime for BracketedTime {
    fn format_time(&self, w: &mut format::Writer<'_>) -> fmt::Result {
        let now = time::OffsetDateTime::now_utc();
        let formatted = now
            .format(&format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
            ))
            .map_err(|_| fmt::Error)?;
        write!(w, "[{}]", formatted)
    }
}

/// `[2025-01-01 12:00:00.000][info] request_id=<id> message fields...`
struct BracketedFormatter;

impl<S, N> FormatEvent<S, N> for BracketedFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        BracketedTime.format_time(&mut writer)?;

        write!(
            writer,
            "[{}]",
            event.metadata().level().to_string().to_lowercase()
        )?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                let extensions = span.extensions();
                if let Some(request_id) = extensions
                    .get::<FormattedFields<N>>()
                    .and_then(|fields| find_request_id(fields.fields.as_str()))
                {
                    write!(writer, " request_id={}", request_id)?;
                    break;
                }
            }
        }

        write!(writer, " ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

fn find_request_id(fields: &str) -> Option<&str> {
    let start = fields.find(REQUEST_ID_FIELD)?;
    let rest = &fields[start + REQUEST_ID_FIELD.len()..];
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(&rest[..end])
}

fn sampler_for(random_sampling: u32) -> Sampler {
    let ratio = f64::from(random_sampling.min(100)) / 100.0;
    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(ratio)))
}

fn otlp_provider(endpoint: &str, random_sampling: u32) -> Option<SdkTracerProvider> {
    let exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
    {
        Ok(exporter) => exporter,
        Err(err) => {
            eprintln!(
                "failed to create OTLP span exporter, tracing disabled: {}",
                err
            );
            return None;
        }
    };

    Some(
        SdkTracerProvider::builder()
            .with_sampler(sampler_for(random_sampling))
            .with_resource(Resource::builder().with_service_name(SERVICE_NAME).build())
            .with_batch_exporter(exporter)
            .build(),
    )
}

// no ANSI so span fields stay parseable
fn bracketed_fmt_layer<S>() -> FmtLayer<S, format::DefaultFields, BracketedFormatter>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .event_format(BracketedFormatter)
        .fmt_fields(format::DefaultFields::new())
        .with_ansi(false)
}

static INIT_LOGGER: OnceLock<SdkTracerProvider> = OnceLock::new();

pub fn init_tracer(tracing_config: Option<&Tracing>) -> &'static SdkTracerProvider {
    INIT_LOGGER.get_or_init(|| {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let otel_endpoint = tracing_config.and_then(|t| t.opentracing_grpc_endpoint.clone());
        let random_sampling = tracing_config.and_then(|t| t.random_sampling).unwrap_or(0);

        let tracing_enabled = random_sampling > 0 && otel_endpoint.is_some();
        eprintln!(
            "initializing tracing: tracing_enabled={}, otel_endpoint={:?}, random_sampling={}",
            tracing_enabled, otel_endpoint, random_sampling
        );

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let exporting = otel_endpoint
            .as_deref()
            .filter(|_| tracing_enabled)
            .and_then(|endpoint| otlp_provider(endpoint, random_sampling));

        match exporting {
            Some(provider) => {
                global::set_tracer_provider(provider.clone());
                let telemetry_layer =
                    tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME));

                let initialized = tracing_subscriber::registry()
                    .with(telemetry_layer)
                    .with(env_filter)
                    .with(bracketed_fmt_layer())
                    .try_init();
                if let Err(err) = initialized {
                    eprintln!("tracing subscriber already set: {}", err);
                }
                provider
            }
            None => {
                // no-op provider
                let provider = SdkTracerProvider::builder().build();
                global::set_tracer_provider(provider.clone());

                let initialized = tracing_subscriber::registry()
                    .with(env_filter)
                    .with(bracketed_fmt_layer())
                    .try_init();
                if let Err(err) = initialized {
                    eprintln!("tracing subscriber already set: {}", err);
                }
                provider
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_request_id() {
        assert_eq!(
            find_request_id("request_id=abc-123 provider=gemini"),
            Some("abc-123")
        );
        assert_eq!(
            find_request_id("provider=gemini request_id=xyz"),
            Some("xyz")
        );
        assert_eq!(find_request_id("provider=gemini"), None);
    }

    #[test]
    fn test_sampler_ratio_is_clamped() {
        assert_eq!(
            format!("{:?}", sampler_for(250)),
            format!(
                "{:?}",
                Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(1.0)))
            )
        );
        assert_eq!(
            format!("{:?}", sampler_for(25)),
            format!(
                "{:?}",
                Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(0.25)))
            )
        );
    }
}
