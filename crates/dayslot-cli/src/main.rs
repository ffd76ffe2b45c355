use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dayslot", version, about = "Plan a day around fixed obligations")]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show free intervals for a day
    Slots(commands::slots::SlotsArgs),
    /// Place subtasks into the day's free intervals
    Plan(commands::plan::PlanArgs),
    /// Browse the task template catalog
    Template {
        #[command(subcommand)]
        action: commands::template::TemplateAction,
    },
    /// Break a task title down into subtasks
    Breakdown(commands::breakdown::BreakdownArgs),
    /// Show the next subtasks to work on
    Focus(commands::focus::FocusArgs),
    /// Mark a subtask done (or reopen it) in a plan file
    Done(commands::focus::DoneArgs),
    /// Weekly review statistics
    Review(commands::review::ReviewArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DAYSLOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;
    let result = match cli.command {
        Commands::Slots(args) => commands::slots::run(args, json),
        Commands::Plan(args) => commands::plan::run(args, json),
        Commands::Template { action } => commands::template::run(action, json),
        Commands::Breakdown(args) => commands::breakdown::run(args, json),
        Commands::Focus(args) => commands::focus::run(args, json),
        Commands::Done(args) => commands::focus::done(args, json),
        Commands::Review(args) => commands::review::run(args, json),
        Commands::Config { action } => commands::config::run(action, json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
