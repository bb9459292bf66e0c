use clap::{Parser, Subcommand};
use eduquest_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "eduquest-cli", version, about = "EduQuest gamification CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show XP, level and rank
    Status {
        /// Print the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Experience points
    Xp {
        #[command(subcommand)]
        action: commands::xp::XpAction,
    },
    /// Badge awards
    Badge {
        #[command(subcommand)]
        action: commands::badge::BadgeAction,
    },
    /// Per-category streaks
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Achievement progress
    Achievement {
        #[command(subcommand)]
        action: commands::achievement::AchievementAction,
    },
    /// Discard all progress and return to the initial state
    Reset,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("EDUQUEST_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let result = match cli.command {
        Commands::Status { json } => commands::status::run(&config, json),
        Commands::Xp { action } => commands::xp::run(&config, action),
        Commands::Badge { action } => commands::badge::run(&config, action),
        Commands::Streak { action } => commands::streak::run(&config, action),
        Commands::Achievement { action } => commands::achievement::run(&config, action),
        Commands::Reset => commands::reset::run(&config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
