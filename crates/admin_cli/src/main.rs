use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Engine, EngineError, format_currency};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "holiday_admin")]
#[command(about = "Admin utilities for the holiday tracker (bootstrap children)")]
struct Cli {
    /// Sqlite connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:holiday_tracker.db?mode=rwc",
        value_parser = parse_database_url
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Child(Child),
}

#[derive(Args, Debug)]
struct Child {
    #[command(subcommand)]
    command: ChildCommand,
}

#[derive(Subcommand, Debug)]
enum ChildCommand {
    /// Add a new child.
    Create(ChildCreateArgs),
    /// List every child with the grand total spent, in GBP.
    List,
    /// Create the given children unless they already exist.
    Seed(ChildSeedArgs),
}

#[derive(Args, Debug)]
struct ChildCreateArgs {
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct ChildSeedArgs {
    #[arg(required = true)]
    names: Vec<String>,
}

fn parse_database_url(raw: &str) -> Result<String, String> {
    migration::sqlite_only(raw.to_string()).map_err(|err| err.to_string())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    let Command::Child(Child { command }) = cli.command;
    match command {
        ChildCommand::Create(args) => match engine.create_child(&args.name).await {
            Ok(child) => println!("created child: {} ({})", child.name, child.id),
            Err(EngineError::ExistingKey(name)) => {
                eprintln!("child already exists: {name}");
                std::process::exit(1);
            }
            Err(EngineError::InvalidName(reason)) => {
                eprintln!("invalid child name: {reason}");
                std::process::exit(2);
            }
            Err(err) => return Err(err.into()),
        },
        ChildCommand::List => {
            for child in engine.list_children().await? {
                let totals = engine.child_totals(child.id).await?;
                println!(
                    "{:>4}  {:<16} {}",
                    child.id,
                    child.name,
                    format_currency(totals.grand_total_gbp(), engine::Currency::Gbp)
                );
            }
        }
        ChildCommand::Seed(args) => {
            let created = engine.seed_children(&args.names).await?;
            for child in &created {
                println!("created child: {} ({})", child.name, child.id);
            }
            println!(
                "{} created, {} already present",
                created.len(),
                args.names.len() - created.len()
            );
        }
    }

    Ok(())
}
