//! Maintenance planner CLI - plan visits from a spreadsheet or serve the API.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use maintenance_planner::api::{AppState, create_router};
use maintenance_planner::config::ConfigLoader;
use maintenance_planner::export::{write_schedule_csv, write_sites_csv};
use maintenance_planner::input::{extract_rows, read_table, resolve_columns};
use maintenance_planner::planner::{build_site_jobs, plan_maintenance};

#[derive(Parser)]
#[command(name = "maintenance-planner")]
#[command(about = "Plan equipment maintenance visits day by day")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a schedule from a CSV or spreadsheet file
    Plan {
        /// Input table (.csv, .xlsx, .xls, .ods)
        #[arg(short, long)]
        input: PathBuf,

        /// Planner configuration (YAML); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// First day of the horizon (YYYY-MM-DD)
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,

        /// Last day of the horizon (YYYY-MM-DD)
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,

        /// Site column header (detected when omitted)
        #[arg(long)]
        site_column: Option<String>,

        /// Equipment count column header (detected when omitted)
        #[arg(long)]
        equipment_column: Option<String>,

        /// Month column header (detected when omitted)
        #[arg(long)]
        period_column: Option<String>,

        /// Plan the whole horizon, ignoring any detected month column
        #[arg(long, conflicts_with = "period_column")]
        no_period: bool,

        /// Schedule CSV destination (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Aggregated site list CSV destination
        #[arg(long)]
        sites_output: Option<PathBuf>,
    },

    /// Run the HTTP API
    Serve {
        /// Planner configuration (YAML); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ConfigLoader> {
    match path {
        Some(path) => Ok(ConfigLoader::load(path)?),
        None => Ok(ConfigLoader::default()),
    }
}

#[allow(clippy::too_many_arguments)]
fn plan(
    input: &Path,
    config: Option<&Path>,
    horizon: Option<(NaiveDate, NaiveDate)>,
    site_column: Option<&str>,
    equipment_column: Option<&str>,
    period_column: Option<&str>,
    no_period: bool,
    output: Option<&Path>,
    sites_output: Option<&Path>,
) -> anyhow::Result<()> {
    let loader = load_config(config)?;
    let config = loader.config();

    let table = read_table(input)?;
    let mut columns = resolve_columns(&table, site_column, equipment_column, period_column)?;
    if no_period {
        columns.period = None;
    }
    let rows = extract_rows(&table, &columns);
    let result = plan_maintenance(&rows, horizon, config)?;
    let include_month = columns.period.is_some();

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            write_schedule_csv(BufWriter::new(file), &result.allocations, include_month)?;
        }
        None => write_schedule_csv(io::stdout().lock(), &result.allocations, include_month)?,
    }

    if let Some(path) = sites_output {
        let file =
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        write_sites_csv(BufWriter::new(file), &build_site_jobs(&rows, config))?;
    }

    let mut stderr = io::stderr().lock();
    writeln!(
        stderr,
        "{} site(s), {}h required, {}h scheduled, {}h left over ({} to {})",
        result.totals.sites,
        result.totals.required_hours,
        result.totals.scheduled_hours,
        result.totals.leftover_hours,
        result.horizon_start,
        result.horizon_end,
    )?;
    for warning in &result.audit_trace.warnings {
        writeln!(stderr, "warning [{}]: {}", warning.code, warning.message)?;
    }
    Ok(())
}

async fn serve(config: Option<&Path>, bind: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(load_config(config)?);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("cannot bind {}", bind))?;
    info!(address = %bind, "Maintenance planner API listening");
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan {
            input,
            config,
            start,
            end,
            site_column,
            equipment_column,
            period_column,
            no_period,
            output,
            sites_output,
        } => plan(
            &input,
            config.as_deref(),
            start.zip(end),
            site_column.as_deref(),
            equipment_column.as_deref(),
            period_column.as_deref(),
            no_period,
            output.as_deref(),
            sites_output.as_deref(),
        ),
        Commands::Serve { config, bind } => serve(config.as_deref(), bind).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
