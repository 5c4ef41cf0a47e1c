use clap::Parser;

use qronos_panel::cli::{login, logout, status, Cli, Commands};
use qronos_panel::error::Result;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login(args) => login::execute(&args).await,
        Commands::Status(args) => status::execute(&args).await,
        Commands::Logout(args) => logout::execute(&args).await,
    }
}
