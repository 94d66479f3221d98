use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use automate_tracker::{test_case_hash, JsonFileSource, TestCaseTracker};

mod config;
mod logging;
mod track;

use config::Config;
use track::Reporter;

#[derive(Parser)]
#[command(name = "automate-ci", version)]
struct Cli {
    /// Config file (default: .automate/automate.toml under the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file
    Init,

    /// Print the identity hash of a test case name
    Hash { name: String },

    /// Correlate one local test case with a remote session
    Match {
        /// Directory holding <build>.json record files
        #[arg(long)]
        records: PathBuf,
        #[arg(long)]
        build: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        index: i64,
        /// Precomputed hash; derived from --name when omitted
        #[arg(long)]
        hash: Option<String>,
    },

    /// Send a usage event
    Track {
        /// Record events locally and print them instead of sending
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        #[command(subcommand)]
        event: TrackEvent,
    },
}

#[derive(Subcommand)]
enum TrackEvent {
    /// Only the install/update check that runs at startup
    Install,
    BuildRun {
        #[arg(long)]
        local: bool,
        #[arg(long)]
        local_path: bool,
        #[arg(long)]
        local_options: bool,
    },
    ReportView,
    ReportEmbedded {
        #[arg(long)]
        embedded: bool,
    },
    IframeRequest,
    IframeLoad { ms: u64 },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let repo_root = std::env::current_dir()?;
    let config_path = cli.config.unwrap_or_else(|| Config::config_path(&repo_root));
    let cfg = Config::load_or_default(&config_path)?;
    logging::init(cfg.tracker_config().debug)?;

    match cli.cmd {
        Command::Init => {
            Config::default_for_repo().save_to(&config_path)?;
            println!("Wrote {}", config_path.display());
        }
        Command::Hash { name } => {
            println!("{}", test_case_hash(&name));
        }
        Command::Match {
            records,
            build,
            name,
            index,
            hash,
        } => {
            let source = JsonFileSource::new(records);
            let mut tracker = TestCaseTracker::load(&source, &build, cfg.tracker_config())
                .with_context(|| format!("load records for build {build}"))?;
            let found = match hash {
                Some(h) => tracker.find_session_with_hash(&name, &h, index),
                None => tracker.find_session(&name, index),
            };
            match found {
                Some(m) => println!("{} {}", m.session_id, m.matched_key()),
                None => println!("not found"),
            }
        }
        Command::Track { dry_run, event } => {
            let rt = tokio::runtime::Runtime::new().context("start analytics runtime")?;
            let reporter = Reporter::open(&cfg, &repo_root, dry_run, rt.handle().clone())?;
            let analytics = &reporter.analytics;

            match event {
                TrackEvent::Install => {}
                TrackEvent::BuildRun {
                    local,
                    local_path,
                    local_options,
                } => analytics.track_build_run(local, local_path, local_options),
                TrackEvent::ReportView => analytics.track_report_view(),
                TrackEvent::ReportEmbedded { embedded } => analytics.track_reporting_event(embedded),
                TrackEvent::IframeRequest => analytics.track_iframe_request(),
                TrackEvent::IframeLoad { ms } => analytics.track_iframe_load(ms),
            }

            for env in reporter.recorded() {
                println!("{:?} client={}", env.hit, env.globals.client_id);
            }
            // bounded wait for in-flight hits
            rt.shutdown_timeout(Duration::from_secs(2));
        }
    }

    Ok(())
}
