use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

use janseva_portal::config::AppConfig;
use janseva_portal::error::AppError;
use janseva_portal::portal::dashboard::{
    self, dashboard_router, Dashboard, DashboardError, DashboardSnapshot, DashboardView,
};
use janseva_portal::portal::scheme::views::{
    SchemeApplicationView, SchemeSummaryView, EMPTY_SUMMARY_MESSAGE,
};
use janseva_portal::portal::scheme::{
    scheme_router, Scheme, SchemeApplicationService, SchemeServiceError,
};
use janseva_portal::portal::scholarship::attachments;
use janseva_portal::portal::scholarship::views::{
    submission_notice, ApplicationCardView, ApplicationDetailView, MarkSheetGalleryView,
    EMPTY_LIST_MESSAGE, MARK_SHEETS_MISSING_MESSAGE,
};
use janseva_portal::portal::scholarship::{
    scholarship_router, ApplicationId, EligibilityEngine, ScholarshipForm, ScholarshipService,
    ScholarshipServiceError,
};
use janseva_portal::portal::{CitizenSession, TracingActivityLog};
use janseva_portal::store::{FileStore, KeyValueStore};
use janseva_portal::telemetry;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "JanSeva Portal",
    about = "Citizen services portal for scholarship and scheme applications",
    version
)]
struct Cli {
    /// Directory holding the collection blobs (overrides APP_STORE_DIR)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate scholarship eligibility without storing anything
    Eligibility {
        #[command(subcommand)]
        command: EligibilityCommand,
    },
    /// Work with scholarship applications
    Scholarship {
        #[command(subcommand)]
        command: ScholarshipCommand,
    },
    /// Work with scheme applications and the schemes catalog
    Scheme {
        #[command(subcommand)]
        command: SchemeCommand,
    },
    /// Render the active dashboard screen for a citizen
    Dashboard(DashboardArgs),
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
enum EligibilityCommand {
    /// Run the tier rules for one grade/income pair
    Check {
        /// Grade percentage (0-100)
        #[arg(long)]
        grade: f64,
        /// Annual family income in rupees
        #[arg(long)]
        income: f64,
    },
}

#[derive(Subcommand, Debug)]
enum ScholarshipCommand {
    /// Submit a scholarship application
    Submit(SubmitScholarshipArgs),
    /// List the citizen's scholarship applications
    List {
        #[arg(long)]
        phone: String,
    },
    /// Show one application in full
    Show {
        #[arg(long)]
        application_id: String,
    },
    /// Show the mark-sheet gallery for one application
    MarkSheets {
        #[arg(long)]
        application_id: String,
    },
}

#[derive(Args, Debug)]
struct SubmitScholarshipArgs {
    #[arg(long)]
    phone: String,
    #[arg(long)]
    student_name: String,
    #[arg(long)]
    course: String,
    /// Grade percentage (0-100)
    #[arg(long)]
    grade: f64,
    /// Annual family income in rupees
    #[arg(long)]
    income: f64,
    #[arg(long, default_value = "")]
    purpose: String,
    /// Mark sheet files to encode inline; repeat for multiple files
    #[arg(long = "mark-sheet")]
    mark_sheets: Vec<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum SchemeCommand {
    /// Apply for a scheme
    Apply {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        scheme_id: String,
    },
    /// List the citizen's scheme applications with the status summary
    List {
        #[arg(long)]
        phone: String,
    },
    /// List the schemes catalog
    Catalog,
    /// Add a catalog entry (demo tooling)
    Seed {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Args, Debug)]
struct DashboardArgs {
    #[arg(long)]
    phone: String,
    /// Screen to activate: "scholarships" or "schemes"
    #[arg(long, default_value = "scholarships", value_parser = parse_view)]
    view: DashboardView,
}

fn parse_view(raw: &str) -> Result<DashboardView, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "scholarships" | "scholarship" => Ok(DashboardView::ScholarshipApplications),
        "schemes" | "scheme" => Ok(DashboardView::SchemeSummary),
        other => Err(format!("unknown view '{other}' (expected scholarships|schemes)")),
    }
}

struct Portal {
    store: Arc<FileStore>,
    scholarships: Arc<ScholarshipService<FileStore, TracingActivityLog>>,
    schemes: Arc<SchemeApplicationService<FileStore, TracingActivityLog>>,
}

fn open_portal(config: &AppConfig, store_dir: Option<PathBuf>) -> Result<Portal, AppError> {
    let dir = store_dir.unwrap_or_else(|| config.store.data_dir.clone());
    let store = Arc::new(FileStore::open(dir)?);
    let activity = Arc::new(TracingActivityLog);
    let scholarships = Arc::new(ScholarshipService::new(store.clone(), activity.clone(), None));
    let schemes = Arc::new(SchemeApplicationService::new(store.clone(), activity, None));
    Ok(Portal {
        store,
        scholarships,
        schemes,
    })
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
    let config = AppConfig::load()?;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(config, cli.store_dir, args).await,
        Command::Eligibility {
            command: EligibilityCommand::Check { grade, income },
        } => run_eligibility_check(grade, income),
        Command::Scholarship { command } => {
            let portal = open_portal(&config, cli.store_dir)?;
            run_scholarship_command(&portal, command).await
        }
        Command::Scheme { command } => {
            let portal = open_portal(&config, cli.store_dir)?;
            run_scheme_command(&portal, command)
        }
        Command::Dashboard(args) => {
            let portal = open_portal(&config, cli.store_dir)?;
            run_dashboard(&portal, args)
        }
    }
}

async fn run_server(
    mut config: AppConfig,
    store_dir: Option<PathBuf>,
    mut args: ServeArgs,
) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let portal = open_portal(&config, store_dir)?;
    let dashboard = Arc::new(Dashboard::new(
        portal.scholarships.clone(),
        portal.schemes.clone(),
    ));
    tokio::spawn(dashboard::watch(
        dashboard.clone(),
        portal.store.subscribe(),
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(scholarship_router(portal.scholarships.clone()))
        .merge(scheme_router(portal.schemes.clone()))
        .merge(dashboard_router(dashboard))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "citizen services portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_eligibility_check(grade: f64, income: f64) -> Result<(), AppError> {
    if !grade.is_finite() || !income.is_finite() {
        return Err(AppError::Scholarship(
            ScholarshipServiceError::InvalidSubmission(
                "grade percentage and family income must be numeric".to_string(),
            ),
        ));
    }

    let verdict = EligibilityEngine::default().evaluate(grade, income);
    println!("Eligibility check for grade {grade}%, family income ₹{income}/year");
    if verdict.eligible {
        println!("✓ Eligible");
        println!("\nSuggested scholarships");
        for suggestion in &verdict.suggestions {
            println!("- {suggestion}");
        }
    } else {
        println!("✗ Not Eligible");
        println!("Reason: {}", verdict.reason);
    }
    Ok(())
}

async fn run_scholarship_command(
    portal: &Portal,
    command: ScholarshipCommand,
) -> Result<(), AppError> {
    match command {
        ScholarshipCommand::Submit(args) => {
            let uploads = attachments::read_from_paths(&args.mark_sheets)
                .await
                .map_err(|err| AppError::Scholarship(err.into()))?;
            if !uploads.is_empty() {
                println!("Selected files:");
                for upload in &uploads {
                    println!("- {}", upload.size_note());
                }
                println!();
            }

            let session = CitizenSession::new(args.phone);
            let form = ScholarshipForm {
                student_name: args.student_name,
                course: args.course,
                grade_percentage: args.grade,
                family_income: args.income,
                purpose: args.purpose,
            };

            let application = portal.scholarships.submit(&session, form, uploads).await?;
            println!("{}", submission_notice(&application));
            println!("\nApplication ID: {}", application.id.0);
            Ok(())
        }
        ScholarshipCommand::List { phone } => {
            let session = CitizenSession::new(phone);
            let applications = portal.scholarships.list_for_user(&session)?;
            if applications.is_empty() {
                println!("{EMPTY_LIST_MESSAGE}");
                return Ok(());
            }

            for application in &applications {
                let card = ApplicationCardView::from_application(application);
                println!("{} [{}]", card.student_name, card.status_label);
                println!("  Course: {}", card.course);
                println!("  Grade/Percentage: {}", card.grade_display);
                println!("  Family Income: {}", card.family_income_display);
                println!("  Eligibility: {}", card.eligibility_tag);
                if application.eligibility.eligible {
                    println!("  Suggested Scholarships: {}", card.eligibility_note);
                } else {
                    println!("  Reason: {}", card.eligibility_note);
                }
                println!("  Applied: {}", card.applied_on);
                if card.mark_sheet_count > 0 {
                    println!("  Mark Sheets: {} uploaded", card.mark_sheet_count);
                }
                println!("  Application ID: {}", card.id);
                println!();
            }
            Ok(())
        }
        ScholarshipCommand::Show { application_id } => {
            let application = match portal.scholarships.detail(&ApplicationId(application_id)) {
                Ok(application) => application,
                Err(ScholarshipServiceError::NotFound) => {
                    println!("Application not found");
                    return Ok(());
                }
                Err(other) => return Err(other.into()),
            };
            let view = ApplicationDetailView::from_application(&application);
            println!("Application Details");
            println!("- Application ID: {}", view.id);
            println!("- Student Name: {}", view.student_name);
            println!("- Course: {}", view.course);
            println!("- Grade/Percentage: {}", view.grade_display);
            println!("- Family Income: {}", view.family_income_display);
            println!("- Purpose: {}", view.purpose);
            println!("- Status: {}", view.status_label);
            println!("- Eligibility: {}", view.eligibility_tag);
            if view.suggestions.is_empty() {
                println!("- Reason: {}", view.reason);
            } else {
                println!("- Suggested Scholarships:");
                for suggestion in &view.suggestions {
                    println!("    {suggestion}");
                }
            }
            println!("- Applied: {}", view.applied_at_display);
            println!("- Mark Sheets: {} uploaded", view.mark_sheet_count);
            Ok(())
        }
        ScholarshipCommand::MarkSheets { application_id } => {
            let application = match portal
                .scholarships
                .mark_sheets(&ApplicationId(application_id))
            {
                Ok(application) => application,
                Err(ScholarshipServiceError::NotFound) => {
                    println!("{MARK_SHEETS_MISSING_MESSAGE}");
                    return Ok(());
                }
                Err(other) => return Err(other.into()),
            };
            let gallery = MarkSheetGalleryView::from_application(&application);
            if gallery.sheets.is_empty() {
                println!("{MARK_SHEETS_MISSING_MESSAGE}");
                return Ok(());
            }
            println!("Mark Sheets - {}", gallery.student_name);
            for sheet in &gallery.sheets {
                println!("- {} (uploaded {})", sheet.name, sheet.uploaded_at_display);
            }
            Ok(())
        }
    }
}

fn run_scheme_command(portal: &Portal, command: SchemeCommand) -> Result<(), AppError> {
    match command {
        SchemeCommand::Apply { phone, scheme_id } => {
            let session = CitizenSession::new(phone);
            match portal.schemes.apply(&session, &scheme_id) {
                Ok(application) => {
                    println!("Application submitted successfully!");
                    println!("Scheme: {} ({})", application.scheme_name, application.scheme_id);
                    println!("Status: {}", application.status.label());
                    Ok(())
                }
                Err(SchemeServiceError::AlreadyApplied) => {
                    println!("You have already applied for this scheme");
                    Ok(())
                }
                Err(other) => Err(other.into()),
            }
        }
        SchemeCommand::List { phone } => {
            let session = CitizenSession::new(phone);
            let applications = portal.schemes.list_for_user(&session)?;
            if applications.is_empty() {
                println!("{EMPTY_SUMMARY_MESSAGE}");
                return Ok(());
            }

            println!("Scheme applications");
            for application in &applications {
                let view = SchemeApplicationView::from_application(application);
                println!(
                    "- {} | {} | applied {}",
                    view.scheme_name, view.status_label, view.applied_on
                );
            }

            let summary = SchemeSummaryView::from_applications(&applications);
            println!("\nStatus summary");
            for entry in &summary.entries {
                println!("- {}: {}", entry.status, entry.count);
            }
            println!("- Total Applications: {}", summary.total);
            Ok(())
        }
        SchemeCommand::Catalog => {
            let schemes = portal.schemes.schemes()?;
            if schemes.is_empty() {
                println!("The schemes catalog is empty");
                return Ok(());
            }
            println!("Schemes catalog");
            for scheme in &schemes {
                if scheme.description.is_empty() {
                    println!("- {} ({})", scheme.name, scheme.id);
                } else {
                    println!("- {} ({}): {}", scheme.name, scheme.id, scheme.description);
                }
            }
            Ok(())
        }
        SchemeCommand::Seed {
            id,
            name,
            description,
        } => {
            portal.schemes.add_scheme(Scheme {
                id: id.clone(),
                name,
                description,
            })?;
            println!("Added scheme {id} to the catalog");
            Ok(())
        }
    }
}

fn run_dashboard(portal: &Portal, args: DashboardArgs) -> Result<(), AppError> {
    let dashboard = Dashboard::new(portal.scholarships.clone(), portal.schemes.clone());
    dashboard.activate(CitizenSession::new(args.phone), args.view);
    let snapshot = dashboard.render().map_err(|err| match err {
        DashboardError::Scholarship(err) => AppError::from(err),
        DashboardError::Scheme(err) => AppError::from(err),
    })?;
    render_dashboard(&snapshot);
    Ok(())
}

fn render_dashboard(snapshot: &DashboardSnapshot) {
    match snapshot {
        DashboardSnapshot::Idle => println!("No active citizen session"),
        DashboardSnapshot::ScholarshipApplications { applications } => {
            println!("Dashboard: scholarship applications");
            if applications.is_empty() {
                println!("{EMPTY_LIST_MESSAGE}");
                return;
            }
            for card in &applications.cards {
                println!(
                    "- {} | {} | {} | applied {}",
                    card.student_name, card.course, card.status_label, card.applied_on
                );
            }
        }
        DashboardSnapshot::SchemeSummary { summary } => {
            println!("Dashboard: scheme applications");
            if summary.is_empty() {
                println!("{EMPTY_SUMMARY_MESSAGE}");
                return;
            }
            for entry in &summary.entries {
                println!("- {}: {}", entry.status, entry.count);
            }
            println!("- Total Applications: {}", summary.total);
        }
    }
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
