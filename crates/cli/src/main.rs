use std::{fs::File, path::PathBuf, process::ExitCode};

use api_types::{Category, Currency};
use chrono::Utc;
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};

use holiday_cli::{
    cache::CachedClient,
    client::{Client, ClientError},
    config::{self, AppConfig, GlobalArgs},
    dashboard::ChildDashboard,
    error::{AppError, Result},
    export,
    forms::{self, ExpenseEditForm, ExpenseForm},
    prompt,
    session::AdminSession,
    view,
};

#[derive(Debug, Parser)]
#[command(name = "holiday_cli", disable_version_flag = true)]
#[command(about = "Track the children's holiday spending")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the children.
    Children,
    /// Show a child's dashboard: totals and expense history.
    Expenses(ExpensesArgs),
    /// Show a child's totals snapshot.
    Total(ChildArg),
    /// Check the admin PIN.
    Login,
    /// Add an expense, dated now.
    Add(AddArgs),
    /// Change some fields of an expense.
    Edit(EditArgs),
    /// Delete an expense.
    Delete(DeleteArgs),
    /// Write a child's expenses to a CSV file.
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct ChildArg {
    #[arg(long)]
    child: i32,
}

#[derive(Debug, Args)]
struct ExpensesArgs {
    #[arg(long)]
    child: i32,
    /// Only cash expenses (combine with --card for both).
    #[arg(long)]
    cash: bool,
    /// Only card expenses.
    #[arg(long)]
    card: bool,
    /// Only expenses in this currency. Repeatable.
    #[arg(long = "currency", value_parser = parse_currency)]
    currencies: Vec<Currency>,
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    child: Option<i32>,
    #[arg(long)]
    amount: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, value_parser = parse_category, default_value = "cash")]
    category: Category,
    #[arg(long, value_parser = parse_currency, default_value = "EUR")]
    currency: Currency,
}

#[derive(Debug, Args)]
struct EditArgs {
    id: i32,
    #[arg(long)]
    amount: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, value_parser = parse_category)]
    category: Option<Category>,
    #[arg(long, value_parser = parse_currency)]
    currency: Option<Currency>,
    /// New date, RFC3339 or `YYYY-MM-DDTHH:MM:SS` (UTC).
    #[arg(long)]
    date: Option<String>,
    /// Move the expense to another child.
    #[arg(long)]
    child: Option<i32>,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    id: i32,
    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
}

#[derive(Debug, Args)]
struct ExportArgs {
    #[arg(long)]
    child: i32,
    #[arg(long)]
    out: PathBuf,
}

fn parse_currency(raw: &str) -> std::result::Result<Currency, String> {
    forms::parse_currency(raw).map_err(|err| err.to_string())
}

fn parse_category(raw: &str) -> std::result::Result<Category, String> {
    forms::parse_category(raw).map_err(|err| err.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = config::load(&cli.global)?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!("holiday_cli={}", settings.level))
        .init();

    let timezone: Tz = settings
        .timezone
        .parse()
        .map_err(|_| AppError::Failed(format!("unknown timezone: {}", settings.timezone)))?;
    let api = CachedClient::new(Client::new(&settings.base_url)?);
    tracing::debug!("using {}", api.client().base_url());

    match cli.command {
        Command::Children => {
            for child in api.children().await.map_err(read_failed)? {
                println!("{:>4}  {}", child.id, child.name);
            }
        }
        Command::Expenses(args) => {
            let mut dashboard = load_dashboard(&api, args.child).await?;
            if args.cash {
                dashboard.filters.category.activate(Category::Cash);
            }
            if args.card {
                dashboard.filters.category.activate(Category::Card);
            }
            for currency in args.currencies {
                dashboard.filters.currency.activate(currency);
            }
            println!("{}", view::dashboard(&dashboard, timezone));
        }
        Command::Total(args) => {
            let totals = api.total(args.child).await.map_err(read_failed)?;
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
        Command::Login => {
            admin_session(&api, &settings).await?;
            println!("PIN accepted");
        }
        Command::Add(args) => {
            let form = ExpenseForm {
                child_id: args.child,
                amount: args.amount.unwrap_or_default(),
                description: args.description.unwrap_or_default(),
                category: args.category,
                currency: args.currency,
            };
            let payload = form.into_request(Utc::now())?;
            let session = admin_session(&api, &settings).await?;

            let expense = api
                .create_expense(&session, &payload)
                .await
                .map_err(|err| {
                    tracing::debug!("add failed: {err}");
                    AppError::Failed("Failed to add expense. Check PIN or connection.".to_string())
                })?;
            println!("Expense added successfully!");
            println!("{}", view::expense_line(&expense, timezone));
            print_grand_total(&api, expense.child_id).await?;
        }
        Command::Edit(args) => {
            let form = ExpenseEditForm {
                amount: args.amount,
                description: args.description,
                category: args.category,
                currency: args.currency,
                date: args.date,
                child_id: args.child,
            };
            let payload = form.into_request()?;
            let session = admin_session(&api, &settings).await?;

            let expense = api
                .update_expense(&session, args.id, &payload)
                .await
                .map_err(|err| mutation_failed("update", err))?;
            println!("Expense updated");
            println!("{}", view::expense_line(&expense, timezone));
            print_grand_total(&api, expense.child_id).await?;
        }
        Command::Delete(args) => {
            if !args.yes && !prompt::confirm(&format!("Delete expense #{}?", args.id))? {
                println!("Cancelled");
                return Ok(());
            }
            let session = admin_session(&api, &settings).await?;

            let deleted = api
                .delete_expense(&session, args.id)
                .await
                .map_err(|err| mutation_failed("delete", err))?;
            println!("Expense #{} deleted", deleted.id);
        }
        Command::Export(args) => {
            let expenses = api.expenses(args.child).await.map_err(read_failed)?;
            let file = File::create(&args.out)?;
            export::write_expenses(file, &expenses, timezone)?;
            println!(
                "Exported {} expenses to {}",
                expenses.len(),
                args.out.display()
            );
        }
    }

    Ok(())
}

async fn load_dashboard(api: &CachedClient, child_id: i32) -> Result<ChildDashboard> {
    let (children, expenses, totals) = tokio::try_join!(
        api.children(),
        api.expenses(child_id),
        api.total(child_id)
    )
    .map_err(read_failed)?;
    Ok(ChildDashboard::new(child_id, &children, expenses, totals))
}

async fn print_grand_total(api: &CachedClient, child_id: i32) -> Result<()> {
    let dashboard = load_dashboard(api, child_id).await?;
    println!(
        "{} now at {}",
        dashboard.child_name(),
        dashboard.headline().grand_total_gbp
    );
    Ok(())
}

/// Verify the configured or prompted PIN with the server.
async fn admin_session(api: &CachedClient, settings: &AppConfig) -> Result<AdminSession> {
    let pin = match &settings.pin {
        Some(pin) => pin.clone(),
        None => prompt::pin("Admin PIN: ")?,
    };
    api.client().verify_pin(&pin).await.map_err(|err| match err {
        ClientError::Unauthorized => AppError::Failed("Invalid PIN".to_string()),
        ClientError::Transport(_) => {
            AppError::Failed("Could not reach the server. Check the connection.".to_string())
        }
        other => AppError::Client(other),
    })
}

fn read_failed(err: ClientError) -> AppError {
    match err {
        ClientError::NotFound(message) => AppError::Failed(message),
        ClientError::Transport(_) => {
            AppError::Failed("Could not reach the server. Check the connection.".to_string())
        }
        other => AppError::Client(other),
    }
}

fn mutation_failed(action: &str, err: ClientError) -> AppError {
    tracing::debug!("{action} failed: {err}");
    match err {
        ClientError::NotFound(message) | ClientError::Validation(message) => {
            AppError::Failed(format!("Failed to {action} expense: {message}"))
        }
        _ => AppError::Failed(format!("Failed to {action} expense. Check PIN or connection.")),
    }
}
