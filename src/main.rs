//! O-RAN Simulation Inspector CLI
//!
//! Command-line interface for inspecting the outputs of an O-RAN handover
//! simulation run.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use oran_sim_inspect::{
    config::InspectorConfig,
    inspector::{report_file, Inspector, Section},
    narrative::{NarrativeConfig, Narrator},
    reporter::format::{banner, generated_footer},
};

#[derive(Parser)]
#[command(name = "oran-sim")]
#[command(author = "O-RAN Sim Team")]
#[command(version = "0.1.0")]
#[command(about = "Inspect O-RAN handover simulation outputs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Results directory (overrides the config file)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the database, JSON and CSV outputs
    Check,

    /// Show JSON and CSV results plus generated plots and reports
    Show,

    /// Run every report section
    All,

    /// Report on one specific file
    Report {
        /// Artifact to report on (.db, .json, .csv, .png, ...)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print a scripted demo walkthrough (no simulation is run)
    Mock {
        /// Skip the pauses between steps
        #[arg(long)]
        fast: bool,

        /// Seed for reproducible figures
        #[arg(long)]
        seed: Option<u64>,

        /// Number of eNBs in the narrated topology
        #[arg(long, default_value = "7")]
        enbs: u32,

        /// Number of UEs in the narrated topology
        #[arg(long, default_value = "50")]
        ues: u32,

        /// Training episodes to narrate
        #[arg(long, default_value = "10")]
        episodes: u32,
    },

    /// Print configuration info
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    let mut config = match &cli.config {
        Some(path) => InspectorConfig::load(path)?,
        None => InspectorConfig::default(),
    };
    if let Some(dir) = cli.dir {
        config.results_dir = dir;
    }

    match cli.command {
        Commands::Check => run_sections("O-RAN Simulation Results Check", &Section::CHECK, config),
        Commands::Show => run_sections("O-RAN Simulation Results", &Section::SHOW, config),
        Commands::All => run_sections("O-RAN Simulation Full Report", &Section::ALL, config),
        Commands::Report { input } => report_single(&input, &config),
        Commands::Mock {
            fast,
            seed,
            enbs,
            ues,
            episodes,
        } => {
            let narrative = NarrativeConfig {
                num_enbs: enbs,
                num_ues: ues,
                episodes,
                pace: if fast { Duration::ZERO } else { NarrativeConfig::default().pace },
                seed,
            };
            run_mock(narrative)?;
        }
        Commands::Info => print_info(&config),
    }

    Ok(())
}

fn run_sections(title: &str, sections: &[Section], config: InspectorConfig) {
    println!();
    println!("{}", banner(title));
    println!();
    println!("📁 Results directory: {}", config.results_dir.display());

    let inspector = Inspector::new(config);
    inspector.run(sections);

    println!("{}", generated_footer());
    println!();
}

fn report_single(input: &std::path::Path, config: &InspectorConfig) {
    info!("Loading artifact from: {:?}", input);

    println!();
    match report_file(input, config) {
        Ok(text) => {
            print!("{}", text);
            println!("{}", generated_footer());
        }
        Err(e) => {
            println!("❌ Could not report on {}: {}", input.display(), e);
            error!("Report failed: {}", e);
        }
    }
    println!();
}

fn run_mock(narrative: NarrativeConfig) -> Result<()> {
    println!();
    println!("{}", banner("O-RAN Handover Study (demo walkthrough)"));

    let stdout = std::io::stdout();
    let mut narrator = Narrator::new(narrative, stdout.lock());
    narrator.run()?;

    println!();
    Ok(())
}

fn print_info(config: &InspectorConfig) {
    println!();
    println!("{}", banner("O-RAN Simulation Inspector - Info"));
    println!();
    println!("Reads the outputs of an O-RAN handover simulation and prints");
    println!("summary statistics. Artifacts are never modified.");
    println!();
    println!("SECTIONS:");
    for section in Section::ALL {
        println!(
            "  • {:<28} {}",
            section.title(),
            config
                .results_dir
                .join(section.patterns(config).join(" | "))
                .display()
        );
    }
    println!();
    println!("SETTINGS:");
    println!("  Handover table:  {}", config.handover_table);
    println!("  Sample rows:     {}", config.sample_rows);
    println!("  Preview rows:    {}", config.preview_rows);
    println!();
    println!("USAGE:");
    println!("  oran-sim check                     # Database, JSON and CSV");
    println!("  oran-sim show                      # JSON, CSV, plots, reports");
    println!("  oran-sim report -i results.json    # One specific file");
    println!("  oran-sim mock --fast               # Demo walkthrough");
    println!();
}
