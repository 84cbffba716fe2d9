use atelier_portal::config::AppConfig;
use atelier_portal::error::AppError;
use atelier_portal::fitting::profiles::MemoryProfileRepository;
use atelier_portal::fitting::router::fitting_router;
use atelier_portal::fitting::service::FittingService;
use atelier_portal::orders::memory::{MemoryNotifications, MemoryOrderRepository};
use atelier_portal::orders::router::order_router;
use atelier_portal::orders::service::OrderService;
use atelier_portal::production::timeline::ProductionTimeline;
use atelier_portal::telemetry;
use atelier_portal::worksheet::WorksheetImporter;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Atelier Client Portal",
    about = "Run the couture atelier portal service or demo its production reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect production timelines from the command line
    Production {
        #[command(subcommand)]
        command: ProductionCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum ProductionCommand {
    /// Render a timeline report, optionally hydrated from a worksheet export
    Report(ProductionReportArgs),
}

#[derive(Args, Debug)]
struct ProductionReportArgs {
    /// Optional worksheet CSV export to hydrate step completion
    #[arg(long)]
    worksheet_csv: Option<PathBuf>,
    /// Include the full step listing in the output
    #[arg(long)]
    list_steps: bool,
}

#[derive(Debug, Deserialize)]
struct ProductionPreviewRequest {
    #[serde(default)]
    worksheet_csv: Option<String>,
}

#[derive(Debug, Serialize)]
struct ProductionPreviewResponse {
    data_source: ProductionDataSource,
    progress_percentage: u8,
    stage: String,
    timeline: ProductionTimeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum ProductionDataSource {
    Worksheet,
    Standard,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Production {
            command: ProductionCommand::Report(args),
        } => run_production_report(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let orders = Arc::new(OrderService::new(
        Arc::new(MemoryOrderRepository::default()),
        Arc::new(MemoryNotifications::default()),
    ));
    let fitting = Arc::new(FittingService::new(Arc::new(
        MemoryProfileRepository::default(),
    )));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/production/preview",
            post(production_preview_endpoint),
        )
        .with_state(state)
        .merge(order_router(orders))
        .merge(fitting_router(fitting))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "atelier portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_production_report(args: ProductionReportArgs) -> Result<(), AppError> {
    let ProductionReportArgs {
        worksheet_csv,
        list_steps,
    } = args;

    let imported = worksheet_csv.is_some();
    let timeline = match worksheet_csv {
        Some(path) => WorksheetImporter::from_path(path)?,
        None => ProductionTimeline::standard(),
    };

    render_production_report(&timeline, imported, list_steps);
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn production_preview_endpoint(
    Json(payload): Json<ProductionPreviewRequest>,
) -> Result<Json<ProductionPreviewResponse>, AppError> {
    let (timeline, data_source) = match payload.worksheet_csv {
        Some(csv) => {
            let reader = Cursor::new(csv.into_bytes());
            let timeline = WorksheetImporter::from_reader(reader)?;
            (timeline, ProductionDataSource::Worksheet)
        }
        None => (
            ProductionTimeline::standard(),
            ProductionDataSource::Standard,
        ),
    };

    Ok(Json(ProductionPreviewResponse {
        progress_percentage: timeline.progress_percentage(),
        stage: timeline.current_stage().to_string(),
        data_source,
        timeline,
    }))
}

fn render_production_report(timeline: &ProductionTimeline, imported: bool, list_steps: bool) {
    println!("Production timeline report");

    if imported {
        println!("Data source: worksheet CSV import");
    } else {
        println!("Data source: standard catalog (no worksheet provided)");
    }

    println!(
        "Progress: {}/{} steps complete ({}%)",
        timeline.completed_count(),
        timeline.steps().len(),
        timeline.progress_percentage()
    );
    println!("Current stage: {}", timeline.current_stage());

    if list_steps {
        println!("\nStep breakdown");
        for step in timeline.steps() {
            let marker = if step.completed { "x" } else { " " };
            let completion_note = match step.completed_at {
                Some(at) => format!(" (completed {})", at.format("%Y-%m-%d %H:%M UTC")),
                None => String::new(),
            };
            println!("- [{marker}] {}{completion_note}", step.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn production_preview_defaults_to_the_standard_catalog() {
        let request = ProductionPreviewRequest {
            worksheet_csv: None,
        };

        let Json(body) = production_preview_endpoint(Json(request))
            .await
            .expect("preview builds");

        assert_eq!(body.data_source, ProductionDataSource::Standard);
        assert_eq!(body.progress_percentage, 0);
        assert_eq!(body.stage, "Pattern Drafting");
        assert_eq!(body.timeline.steps().len(), 7);
    }

    #[tokio::test]
    async fn production_preview_hydrates_from_worksheet_csv() {
        let request = ProductionPreviewRequest {
            worksheet_csv: Some(
                "Step,Completed At\nPattern Drafting,2026-03-01T09:30:00Z\nToile Fitting,2026-03-08\n"
                    .to_string(),
            ),
        };

        let Json(body) = production_preview_endpoint(Json(request))
            .await
            .expect("preview builds");

        assert_eq!(body.data_source, ProductionDataSource::Worksheet);
        assert_eq!(body.progress_percentage, 29);
        assert_eq!(body.stage, "Fabric Cutting");
    }
}
