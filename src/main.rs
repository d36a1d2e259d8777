use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use postbox::commands::{ConfigCommand, MessageCommand};
use postbox::config::Config;
use postbox::db::{init_db, ContactRepository};
use postbox::store::ContactStore;

#[derive(Parser)]
#[command(name = "postbox")]
#[command(version)]
#[command(about = "Contact message store and admin CLI", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage contact messages
    Message(MessageCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Message(cmd)) => {
            let pool = init_db(Some(config.database_path.clone())).await?;
            let store = ContactStore::new(Arc::new(ContactRepository::new(pool)));
            cmd.run(&store).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
