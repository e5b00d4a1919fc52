use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use simp_thing::config::SimpConfig;
use simp_thing::{db, render, CreateEntryInput, Dashboard, MissionRotator};

#[derive(Parser)]
#[command(name = "simp")]
#[command(about = "Track the objects of your affection and keep your devotion calibrated")]
struct Cli {
    /// Roster database path (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// How many entries to rank on the dashboard
    #[arg(long, global = true)]
    top: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard
    Show {
        /// Print the dashboard snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every entry in roster order
    List,
    /// Add a simp target
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        vibe: Option<String>,
        #[arg(short, long)]
        reason: Option<String>,
        #[arg(long)]
        ritual: Option<String>,
        /// Devotion score, 0-100
        #[arg(short, long, allow_hyphen_values = true)]
        devotion: Option<String>,
    },
    /// Send another compliment (+5 devotion, capped at 100)
    Boost {
        /// Entry id
        id: String,
    },
    /// Roll a new mission
    Mission,
}

/// Logs go to stderr so stdout carries only dashboard output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "simp_thing=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = SimpConfig::load();
    let db_path = cli.db.or(config.database_path);
    let top_n = cli.top.unwrap_or(config.top_n);
    let mission = match config.mission_seed {
        Some(seed) => MissionRotator::with_seed(seed),
        None => MissionRotator::new(),
    };

    let database = db::open_and_migrate(db_path.as_deref())?;
    let mut dashboard = Dashboard::open(database, mission).with_top_n(top_n);
    dashboard.hydrate();

    match cli.command.unwrap_or(Commands::Show { json: false }) {
        Commands::Show { json: true } => {
            println!("{}", serde_json::to_string_pretty(&dashboard.view())?);
        }
        Commands::Show { json: false } => {
            print!("{}", render::render_dashboard(&dashboard.view()));
        }
        Commands::List => {
            print!("{}", render::render_list(dashboard.roster().entries()));
        }
        Commands::Add {
            name,
            vibe,
            reason,
            ritual,
            devotion,
        } => {
            let input = CreateEntryInput {
                name,
                vibe,
                reason,
                devotion,
                ritual,
            };
            match dashboard.create(input) {
                Some(entry) => {
                    println!("Added {} [{}]", entry.name, entry.id);
                    println!("New mission: {}", dashboard.mission());
                }
                None => println!("A name is required; nothing was added."),
            }
        }
        Commands::Boost { id } => match dashboard.boost(&id) {
            Some(entry) => println!(
                "{} is now at {} ({})",
                entry.name,
                entry.devotion,
                entry.status().label
            ),
            None => println!("No entry with id {}", id),
        },
        Commands::Mission => {
            println!("{}", dashboard.reroll());
        }
    }

    Ok(())
}
