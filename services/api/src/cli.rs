use clap::{Args, Parser, Subcommand};
use placement::error::AppError;

use crate::report::{run_report, ReportArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Campus Placement Portal",
    about = "Run the campus placement portal service and offline analytics from the command line",
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
    /// Offline analytics over the demo data set
    Analytics {
        #[command(subcommand)]
        command: AnalyticsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AnalyticsCommand {
    /// Print the placement funnel, skill demand, and pipeline velocity
    Report(ReportArgs),
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
        Command::Analytics {
            command: AnalyticsCommand::Report(args),
        } => run_report(args),
    }
}
