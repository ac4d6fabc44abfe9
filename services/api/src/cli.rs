use crate::server;
use clap::{Args, Parser, Subcommand};
use offer_engine::error::AppError;
use offer_engine::offers::{calculate, parse_summary};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(
    name = "Offer Discount Engine",
    about = "Ingest promotional offers and resolve the highest payment discount",
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
    /// Parse a promotional summary and show the discount it yields
    Parse(ParseArgs),
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

#[derive(Args, Debug)]
pub(crate) struct ParseArgs {
    /// Promotional summary text to parse
    summary: String,
    /// Payable amount to run the calculator against
    #[arg(long, default_value_t = 1000.0)]
    amount: f64,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Parse(args) => run_parse(args),
    }
}

fn run_parse(args: ParseArgs) -> Result<(), AppError> {
    let terms = parse_summary(&args.summary);
    let discount = calculate(&terms, args.amount);

    let report = json!({
        "summary": args.summary,
        "amountToPay": args.amount,
        "terms": terms,
        "discount": discount,
        "flooredDiscount": discount.floor() as i64,
    });
    println!("{report:#}");

    Ok(())
}
