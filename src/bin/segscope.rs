//! segscope: customer segmentation dashboard in the terminal
//!
//! Uploads a transactions CSV to the classification service and renders
//! the returned segments.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use segscope::config::{BASE_URL_ENV, ENDPOINT_ENV};
use segscope::presenter::render;
use segscope::upload::MAX_UPLOAD_BYTES;
use segscope::{
    CandidateFile, ClassifierClient, Config, Dashboard, ExportScope, Notification,
    NotificationLevel, SortKey, SortOrder, ViewState,
};

/// Segscope terminal client
#[derive(Parser)]
#[command(name = "segscope")]
#[command(version = segscope::PKG_VERSION)]
#[command(about = "Customer segmentation analysis client")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Classification service base URL
    #[arg(long, global = true, env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Classification endpoint path
    #[arg(long, global = true, env = ENDPOINT_ENV)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a transactions CSV and show the segmentation
    Analyze {
        /// CSV file to upload
        file: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show a previously saved service response (JSON array of records)
    Show {
        /// JSON file, or "-" for stdin
        results: String,
        #[command(flatten)]
        view: ViewArgs,
    },

    /// List the known segment profiles
    Profiles,

    /// Print what the uploaded file must look like
    Requirements,
}

#[derive(ClapArgs)]
struct ViewArgs {
    /// Only customers whose ID contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    search: String,

    /// Focus on one segment id
    #[arg(short = 'k', long)]
    cluster: Option<u32>,

    /// Sort column: customer-id, cluster, monetary, frequency, recency
    #[arg(long, default_value = "customer-id")]
    sort: SortKey,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Write the rows shown to this file (or directory)
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write every record to this directory (or file)
    #[arg(long)]
    export_all: Option<PathBuf>,
}

impl ViewArgs {
    fn state(&self) -> ViewState {
        ViewState {
            search: self.search.clone(),
            focus: self.cluster,
            sort_key: self.sort,
            sort_order: if self.desc {
                SortOrder::Desc
            } else {
                SortOrder::Asc
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let Args {
        config,
        base_url,
        endpoint,
        command,
    } = Args::parse();

    let load_config = || -> segscope::Result<Config> {
        let mut config = Config::load(config.as_deref())?;
        config.apply_overrides(base_url.clone(), endpoint.clone());
        Ok(config)
    };

    let mut dashboard = Dashboard::new();

    let view = match command {
        // Commands that don't need the service
        Command::Profiles => {
            println!("{}", render::render_profiles());
            return Ok(());
        }
        Command::Requirements => {
            print_requirements();
            return Ok(());
        }
        Command::Analyze { file, view } => {
            let client = ClassifierClient::new(&load_config()?)?;
            let candidate = CandidateFile::from_path(&file)?;
            if dashboard.select_file(candidate) {
                eprintln!("processing {} ...", file.display());
                // Failures are queued as notifications.
                let _ = dashboard.submit(&client).await;
            }
            view
        }
        Command::Show { results, view } => {
            let body = read_source(&results)?;
            dashboard.show_results(segscope::types::parse_records(&body)?);
            view
        }
    };

    if flush(&mut dashboard) {
        std::process::exit(1);
    }

    dashboard.set_view(view.state());
    if let Some(results) = dashboard.results() {
        println!("{}", render::render_dashboard(results));
    }

    export(&mut dashboard, ExportScope::Filtered, view.export.as_deref());
    export(&mut dashboard, ExportScope::All, view.export_all.as_deref());

    if flush(&mut dashboard) {
        std::process::exit(1);
    }
    Ok(())
}

fn export(dashboard: &mut Dashboard, scope: ExportScope, target: Option<&Path>) {
    if let Some(target) = target {
        // Failures are already queued as notifications.
        let _ = dashboard.export(scope, target);
    }
}

/// Print queued notifications to stderr. Returns whether any was an error.
fn flush(dashboard: &mut Dashboard) -> bool {
    let notifications = dashboard.take_notifications();
    for Notification { level, message } in &notifications {
        match level {
            NotificationLevel::Success => eprintln!("✓ {message}"),
            NotificationLevel::Error => eprintln!("✗ {message}"),
        }
    }
    notifications.iter().any(Notification::is_error)
}

fn read_source(source: &str) -> io::Result<String> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source)
    }
}

fn print_requirements() {
    println!("File requirements:");
    println!("  • CSV format only");
    println!("  • Must contain customer transaction data");
    println!(
        "  • Maximum file size: {}MB",
        MAX_UPLOAD_BYTES / (1024 * 1024)
    );
    println!(
        "  • Required columns: {}",
        segscope::EXPECTED_COLUMNS.join(", ")
    );
}
