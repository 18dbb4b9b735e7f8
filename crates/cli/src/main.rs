//! Kudos CLI - replay agent events and inspect the achievement catalog.

mod replay;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kudos_achievements::{
    achievement_description, achievement_name, all_achievement_ids, AchievementEngine,
    EngineConfig, LocalClock,
};
use kudos_core::AgentProfile;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::replay::Replay;

#[derive(Parser)]
#[command(name = "kudos")]
#[command(about = "Achievement engine for agent activity", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an event log and print newly earned achievements
    Check {
        /// Newline-delimited JSON events, oldest first
        #[arg(long)]
        events: PathBuf,
        /// JSON array of existing agent profiles
        #[arg(long)]
        profiles: Option<PathBuf>,
        /// Clock for time-of-day rules: "event", "utc" or an IANA zone
        #[arg(long)]
        clock: LocalClock,
        /// Write updated profiles here
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also print progress toward unearned achievements
        #[arg(long)]
        progress: bool,
    },
    /// List all achievements
    List,
    /// Show one achievement
    Show {
        /// Achievement id
        id: String,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            events,
            profiles,
            clock,
            out,
            progress,
        } => {
            let profiles: Vec<AgentProfile> = match profiles {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("Failed to open {}", path.display()))?;
                    serde_json::from_reader(BufReader::new(file))
                        .with_context(|| format!("Invalid profiles in {}", path.display()))?
                }
                None => Vec::new(),
            };

            info!("Evaluating with clock: {}", clock);
            let engine = AchievementEngine::new(EngineConfig::new(clock));
            let mut replay = Replay::new(engine, profiles);

            let file = File::open(&events)
                .with_context(|| format!("Failed to open {}", events.display()))?;
            for award in replay.ingest_lines(BufReader::new(file))? {
                println!("{}", serde_json::to_string(&award)?);
            }

            if progress {
                println!("{}", serde_json::to_string_pretty(&replay.progress())?);
            }

            if let Some(out) = out {
                let profiles = replay.into_profiles();
                let file = File::create(&out)
                    .with_context(|| format!("Failed to create {}", out.display()))?;
                serde_json::to_writer_pretty(file, &profiles)?;
                info!("Wrote {} profiles to {}", profiles.len(), out.display());
            }
        }
        Commands::List => {
            for id in all_achievement_ids() {
                println!(
                    "{:<14} {:<14} {}",
                    id,
                    achievement_name(id)?,
                    achievement_description(id)?
                );
            }
        }
        Commands::Show { id } => {
            println!("{}", achievement_name(&id)?);
            println!("  {}", achievement_description(&id)?);
        }
    }

    Ok(())
}
