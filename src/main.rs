use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use dots_and_boxes::ai::PolicyKind;
use dots_and_boxes::config::AppConfig;
use dots_and_boxes::game::Player;
use dots_and_boxes::session::{run_matches, MatchStats};

/// Dots and boxes against a tiered heuristic opponent.
#[derive(Parser)]
#[command(name = "dots_and_boxes", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play many games headless and report the results
    Simulate {
        /// Path to TOML configuration file
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,

        /// Override number of games
        #[arg(long)]
        games: Option<usize>,

        /// Override the base seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the grid size
        #[arg(long)]
        grid_size: Option<usize>,

        /// Policy playing the human seat
        #[arg(long, value_enum, default_value_t = HumanPolicy::Random)]
        human_policy: HumanPolicy,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a config file with every default filled in
    DefaultConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum HumanPolicy {
    Heuristic,
    Random,
}

impl From<HumanPolicy> for PolicyKind {
    fn from(policy: HumanPolicy) -> Self {
        match policy {
            HumanPolicy::Heuristic => PolicyKind::Heuristic,
            HumanPolicy::Random => PolicyKind::Random,
        }
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    grid_size: usize,
    human_policy: PolicyKind,
    stats: &'a MatchStats,
    human_win_rate: f32,
    computer_win_rate: f32,
    average_game_length: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::DefaultConfig => {
            let toml = AppConfig::default_toml().context("serializing default config")?;
            print!("{toml}");
            Ok(())
        }
        Command::Simulate {
            config,
            games,
            seed,
            grid_size,
            human_policy,
            json,
        } => {
            let mut app_config = AppConfig::load_or_default(&config)
                .with_context(|| format!("loading config from {}", config.display()))?;

            // Apply CLI overrides
            if let Some(games) = games {
                app_config.simulation.games = games;
            }
            if let Some(seed) = seed {
                app_config.simulation.seed = Some(seed);
            }
            if let Some(grid_size) = grid_size {
                app_config.game.grid_size = grid_size;
            }
            app_config
                .validate()
                .context("validating config after overrides")?;

            let policy = PolicyKind::from(human_policy);
            let stats = run_matches(&app_config, policy).context("running simulation")?;
            report(&app_config, policy, &stats, json)
        }
    }
}

fn report(config: &AppConfig, policy: PolicyKind, stats: &MatchStats, json: bool) -> Result<()> {
    let summary = Summary {
        grid_size: config.game.grid_size,
        human_policy: policy,
        stats,
        human_win_rate: stats.win_rate(Player::Human),
        computer_win_rate: stats.win_rate(Player::Computer),
        average_game_length: stats.average_game_length(),
    };

    if json {
        let out = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        println!("{out}");
        return Ok(());
    }

    let size = summary.grid_size;
    println!("{} games on a {size}x{size} grid", stats.total());
    println!(
        "  {:<10} {:>5} wins ({:.1}%), {:.2} cells/game",
        Player::Human.name(),
        stats.wins(Player::Human),
        summary.human_win_rate * 100.0,
        stats.average_cells(Player::Human),
    );
    println!(
        "  {:<10} {:>5} wins ({:.1}%), {:.2} cells/game",
        Player::Computer.name(),
        stats.wins(Player::Computer),
        summary.computer_win_rate * 100.0,
        stats.average_cells(Player::Computer),
    );
    println!("  {:<10} {:>5}", "Ties", stats.ties());
    println!("  Average game length: {:.1} claims", summary.average_game_length);
    Ok(())
}
