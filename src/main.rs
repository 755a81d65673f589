use std::sync::Arc;
use std::time::Duration;

use actix_web::{
    get, middleware, web::Data, App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use anyhow::Context as _;
use clap::Parser;
use prometheus::{Encoder, TextEncoder};

use s3_bucket_operator::aws::{SdkS3, SdkS3Control};
use s3_bucket_operator::controllers::bucket::{self, ResourceManager, Settings};
use s3_bucket_operator::resources::buckets::DeletionPolicy;
use s3_bucket_operator::{telemetry, Metrics, State, DEFAULT_TERMINAL_ERROR_CODES};

#[derive(Debug, clap::Parser)]
struct Arguments {
    /// Region the buckets live in; falls back to the AWS SDK default chain
    #[arg(long = "aws-region", env = "AWS_REGION", value_name = "REGION")]
    aws_region: Option<String>,

    /// Account that owns the buckets; required to address directory buckets
    #[arg(long = "aws-account-id", env = "ACK_AWS_ACCOUNT_ID", value_name = "ACCOUNT")]
    aws_account_id: Option<String>,

    /// Alternative S3 endpoint, addressed with path-style requests
    #[arg(long = "aws-endpoint-url", env = "AWS_ENDPOINT_URL", value_name = "URL")]
    aws_endpoint_url: Option<String>,

    /// Only reconcile buckets in this namespace
    #[arg(long = "watch-namespace", env = "ACK_WATCH_NAMESPACE", value_name = "NAMESPACE")]
    watch_namespace: Option<String>,

    #[arg(
        long = "deletion-policy",
        env = "ACK_DELETION_POLICY",
        value_name = "POLICY",
        default_value = "delete",
        value_parser = parse_deletion_policy
    )]
    deletion_policy: DeletionPolicy,

    #[arg(
        long = "resync-period-seconds",
        env = "ACK_RESYNC_PERIOD_SECONDS",
        value_name = "SECONDS",
        default_value_t = 36000
    )]
    resync_period_seconds: u64,

    /// Comma separated AWS error codes that are not retried
    #[arg(
        long = "terminal-error-codes",
        env = "ACK_TERMINAL_ERROR_CODES",
        value_name = "CODES",
        value_delimiter = ','
    )]
    terminal_error_codes: Vec<String>,

    #[arg(
        long = "metrics-bind-address",
        env = "ACK_METRICS_BIND_ADDRESS",
        value_name = "ADDRESS",
        default_value = "0.0.0.0:8080"
    )]
    metrics_bind_address: String,
}

fn parse_deletion_policy(value: &str) -> Result<DeletionPolicy, String> {
    DeletionPolicy::parse(value).ok_or_else(|| format!("expected delete or retain, got {value}"))
}

#[get("/metrics")]
async fn metrics(c: Data<State>, _req: HttpRequest) -> impl Responder {
    let metrics = c.metrics();
    let encoder = TextEncoder::new();
    let mut buffer = vec![];
    encoder.encode(&metrics, &mut buffer).unwrap();
    HttpResponse::Ok().body(buffer)
}

#[get("/health")]
async fn health(_: HttpRequest) -> impl Responder {
    HttpResponse::Ok().json("healthy")
}

#[get("/")]
async fn index(c: Data<State>, _req: HttpRequest) -> impl Responder {
    let d = c.diagnostics().await;
    HttpResponse::Ok().json(&d)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init()?;

    let args: Arguments = Arguments::parse();

    let state = State::new();
    let operator_metrics = Metrics::default().register(&state.registry)?;

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = args.aws_region {
        loader = loader.region(aws_config::Region::new(region));
    }
    if let Some(endpoint) = &args.aws_endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    let aws = loader.load().await;
    let region = aws
        .region()
        .map(|r| r.to_string())
        .context("no AWS region configured; set --aws-region")?;

    let manager = ResourceManager::new(
        Arc::new(SdkS3::new(&aws, args.aws_endpoint_url.is_some())),
        Arc::new(SdkS3Control::new(&aws)),
        operator_metrics.clone(),
        args.aws_account_id,
        region,
    );

    let terminal_error_codes = if args.terminal_error_codes.is_empty() {
        DEFAULT_TERMINAL_ERROR_CODES
            .iter()
            .map(|c| c.to_string())
            .collect()
    } else {
        args.terminal_error_codes
    };
    let settings = Settings {
        deletion_policy: args.deletion_policy,
        resync_period: Duration::from_secs(args.resync_period_seconds),
        terminal_error_codes,
        watch_namespace: args.watch_namespace,
    };

    // Initiatilize Kubernetes controller state
    let client = kube::Client::try_default().await?;
    let controller = bucket::run(client, operator_metrics, state.clone(), settings, manager);
    tokio::pin!(controller);

    // Start web server
    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(state.clone()))
            .wrap(middleware::Logger::default().exclude("/health"))
            .service(index)
            .service(health)
            .service(metrics)
    })
    .bind(&args.metrics_bind_address)?
    .shutdown_timeout(5)
    .run();

    tokio::pin!(server);

    // Both runtimes implements graceful shutdown, so poll until both are done
    tokio::join!(controller, server).1?;
    Ok(())
}
