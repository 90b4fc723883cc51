use crate::console::{run_items, run_score, run_take, ItemsArgs, ScoreArgs, TakeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use empathy_profile::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Empathy Profile",
    about = "Take, score, and serve the empathy profile questionnaire",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Answer the questionnaire interactively in the terminal
    Take(TakeArgs),
    /// Score a prepared answer sheet and print the profile report
    Score(ScoreArgs),
    /// List the questionnaire items
    Items(ItemsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Take(args) => run_take(args).await,
        Command::Score(args) => run_score(args).await,
        Command::Items(args) => run_items(args),
    }
}
