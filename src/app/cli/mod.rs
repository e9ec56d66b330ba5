//! CLI Adapter.

mod wizard;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::api;
use crate::app::cancellation::CancellationToken;
use crate::domain::{AppError, ClusterPlan, FileCopyTask};

/// Exit status used when a second interrupt aborts without cleanup.
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Parser)]
#[command(name = "clusterforge")]
#[command(version)]
#[command(
    about = "Generate MATLAB Parallel Server integration scripts for customer clusters",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, commit and publish scripts for an engagement file
    #[clap(visible_alias = "s")]
    Scaffold {
        /// Engagement definition (TOML)
        engagement: PathBuf,
        /// Settings file (defaults to ./clusterforge.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Commit locally even when remote submission is configured
        #[arg(long)]
        local_only: bool,
    },
    /// Show copy, prune and template tasks without writing anything
    #[clap(visible_alias = "p")]
    Plan {
        /// Engagement definition (TOML)
        engagement: PathBuf,
        /// Settings file (defaults to ./clusterforge.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Create an engagement file interactively
    #[clap(visible_alias = "n")]
    New {
        /// Where to write the engagement file
        output: PathBuf,
        /// Settings file (defaults to ./clusterforge.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write a commented sample settings file
    InitConfig {
        /// Target path (defaults to ./clusterforge.toml)
        path: Option<PathBuf>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result: Result<(), AppError> = match cli.command {
        Commands::Scaffold { engagement, config, local_only } => {
            run_scaffold(&engagement, config.as_deref(), local_only)
        }
        Commands::Plan { engagement, config } => run_plan(&engagement, config.as_deref()),
        Commands::New { output, config } => run_new(&output, config.as_deref()),
        Commands::InitConfig { path } => run_init_config(path.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = if verbose > 0 || quiet {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// First Ctrl+C trips the token so the run can clean up; a second exits at once.
fn install_interrupt_handler(cancel: CancellationToken) {
    let result = ctrlc::set_handler(move || {
        if cancel.is_cancelled() {
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        eprintln!("Interrupt received, cleaning up. Press Ctrl+C again to exit immediately.");
        cancel.cancel();
    });
    if let Err(err) = result {
        tracing::warn!(error = %err, "Failed to install interrupt handler");
    }
}

fn run_scaffold(engagement: &Path, config: Option<&Path>, local_only: bool) -> Result<(), AppError> {
    let cancel = CancellationToken::new();
    install_interrupt_handler(cancel.clone());

    let outcome = api::scaffold(engagement, config, local_only, cancel)?;
    println!(
        "✅ Generated integration scripts for {} cluster(s) at {}",
        outcome.clusters.len(),
        outcome.contact_dir.display()
    );
    for cluster in &outcome.clusters {
        println!("  • {}", cluster);
    }
    println!("✅ Repository: {}", outcome.report);
    Ok(())
}

fn run_plan(engagement: &Path, config: Option<&Path>) -> Result<(), AppError> {
    let outcome = api::plan(engagement, config)?;

    println!("✅ Plan for {}", outcome.contact_dir.display());
    for task in &outcome.plan.shared {
        print_copy(task);
    }
    for cluster in &outcome.plan.clusters {
        print_cluster(cluster);
    }

    if !outcome.missing_sources.is_empty() {
        println!("⚠️  Missing template sources:");
        for path in &outcome.missing_sources {
            println!("  • {}", path.display());
        }
    }
    Ok(())
}

fn print_cluster(plan: &ClusterPlan) {
    let cluster = &plan.cluster;
    println!(
        "Cluster {} ({} scheduler, {} submission, {} workers)",
        cluster.name, cluster.scheduler, cluster.submission, cluster.workers
    );
    for task in &plan.copies {
        print_copy(task);
    }
    for task in &plan.prunes {
        println!("  prune     {} ({})", task.path.display(), task.reason);
    }
    for task in &plan.templates {
        println!("  template  {} -> {}", task.path.display(), task.renamed_to.display());
    }
}

fn print_copy(task: &FileCopyTask) {
    println!(
        "  copy      [{}] {} -> {}",
        task.slot,
        task.source.display(),
        task.destination.display()
    );
}

fn run_new(output: &Path, config: Option<&Path>) -> Result<(), AppError> {
    if output.exists() {
        return Err(AppError::AlreadyExists(output.to_path_buf()));
    }
    let settings = api::settings(config)?;
    let Some(file) = wizard::collect(settings.scaffold.team)? else {
        println!("Cancelled; nothing written.");
        return Ok(());
    };
    let engagement = api::new_engagement(output, &file, settings.scaffold.team)?;
    println!(
        "✅ Wrote engagement for {} with {} cluster(s) to {}",
        engagement.organization,
        engagement.clusters.len(),
        output.display()
    );
    Ok(())
}

fn run_init_config(path: Option<&Path>) -> Result<(), AppError> {
    let written = api::init_config(path)?;
    println!("✅ Wrote sample settings to {}", written.display());
    Ok(())
}
