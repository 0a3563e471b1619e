//! Scorecard CLI
//!
//! Ball-by-ball cricket scoring against a local saved-match store.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use scorecard_core::save::saved_match_schema;
use scorecard_core::{ScoringConfig, SCHEMA_VERSION, VERSION};
use scorecard_cli::{render_scorecard, BallInput, Scorebook};

#[derive(Parser)]
#[command(name = "scorecard")]
#[command(about = "Live cricket scoring from the command line", long_about = None)]
struct Cli {
    /// Directory holding saved matches
    #[arg(long, global = true, default_value = "scorecard-data")]
    store: PathBuf,

    /// Scoring rules JSON (overrides SCORECARD_CONFIG_PATH)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a match from a setup JSON file
    New {
        #[arg(long)]
        setup: PathBuf,
    },

    /// Record one delivery
    Ball {
        match_id: String,

        /// Runs off the bat
        #[arg(long, default_value_t = 0)]
        runs: u32,

        #[arg(long, default_value_t = 0)]
        extras: u32,

        #[arg(long)]
        wicket: bool,

        #[arg(long)]
        wide: bool,

        #[arg(long)]
        no_ball: bool,

        /// Defaults to the striker
        #[arg(long)]
        batsman: Option<String>,

        /// Defaults to the bowler in play
        #[arg(long)]
        bowler: Option<String>,
    },

    /// Replace a batsman at the crease
    SwitchBatsman {
        match_id: String,
        old_id: String,
        new_id: String,
    },

    /// Hand the ball to another bowler
    SwitchBowler { match_id: String, new_id: String },

    /// Print the scorecard
    Show { match_id: String },

    /// List saved matches
    List,

    /// Mark a match completed
    Complete { match_id: String },

    /// Delete a saved match
    Delete { match_id: String },

    /// Print the JSON schema of a saved match
    Schema,
}

fn load_config(path: Option<&PathBuf>) -> Result<ScoringConfig> {
    match path {
        Some(path) => {
            let path = path.to_str().context("config path is not valid UTF-8")?;
            Ok(ScoringConfig::from_path(path)?)
        }
        None => Ok(ScoringConfig::from_env()?),
    }
}

/// Saved-match schema, tagged with the document version it describes.
fn schema_json() -> Result<String> {
    let mut schema = saved_match_schema();
    schema.schema.metadata().description = Some(format!(
        "Saved match snapshot, document version {SCHEMA_VERSION}"
    ));
    Ok(serde_json::to_string_pretty(&schema)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    tracing::debug!(
        version = VERSION,
        store = %cli.store.display(),
        ?config,
        "opening scorebook"
    );
    let mut book = Scorebook::open(&cli.store, config);

    match cli.command {
        Commands::New { setup } => {
            let m = book.create(&setup)?;
            println!("Match {} started", m.id);
            println!("   {}", m.summary());
        }

        Commands::Ball {
            match_id,
            runs,
            extras,
            wicket,
            wide,
            no_ball,
            batsman,
            bowler,
        } => {
            let input = BallInput {
                runs,
                extras,
                wicket,
                wide,
                no_ball,
                batsman,
                bowler,
            };
            let (m, effects) = book.ball(&match_id, input)?;

            println!("{}  {}", m.batting_team.name, m.batting_team.score_line());
            if !effects.batsman_found {
                println!("   (batsman not in squad, batting figures unchanged)");
            }
            if !effects.bowler_found {
                println!("   (bowler not in squad, bowling figures unchanged)");
            }
            if effects.maiden {
                println!("   Maiden over");
            }
            if let Some(stand) = effects.closed_partnership {
                println!("   Partnership ended: {} runs off {} balls", stand.runs, stand.balls);
            }
            if effects.opened_partnership {
                println!("   Wicket! Bring in the next batsman with `switch-batsman`");
            }
        }

        Commands::SwitchBatsman {
            match_id,
            old_id,
            new_id,
        } => {
            let m = book.switch_batsman(&match_id, &old_id, &new_id)?;
            println!("At the crease: {} & {}", m.current_batsmen[0], m.current_batsmen[1]);
        }

        Commands::SwitchBowler { match_id, new_id } => {
            let m = book.switch_bowler(&match_id, &new_id)?;
            println!("Bowling: {}", m.current_bowler);
        }

        Commands::Show { match_id } => {
            let m = book.show(&match_id)?;
            print!("{}", render_scorecard(&m));
        }

        Commands::List => {
            let saved = book.list()?;
            if saved.is_empty() {
                println!("No saved matches in {}", cli.store.display());
            }
            for s in saved {
                println!("{}  {}  {}", s.record.id, s.saved_at, s.record.summary());
            }
        }

        Commands::Complete { match_id } => {
            let m = book.complete(&match_id)?;
            println!("Match {} completed", m.id);
            println!("   {}", m.summary());
        }

        Commands::Delete { match_id } => {
            let removed = book.delete(&match_id)?;
            println!("Deleted {} snapshot(s) of {}", removed, match_id);
        }

        Commands::Schema => {
            println!("{}", schema_json()?);
        }
    }

    Ok(())
}
