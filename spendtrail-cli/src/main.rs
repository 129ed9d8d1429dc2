use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use spendtrail_core::{aggregate, cycle_start, SearchFilter, SpendReport, TemplateSet, Transaction};
use spendtrail_gmail::{GmailClient, GoogleOAuthClient};

mod config;
mod snippets;
mod state;

#[derive(Parser, Debug)]
#[command(name = "spendtrail", version, about = "Billing-cycle spend report from bank alert mails")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One-time Google OAuth setup; caches tokens under ~/.spendtrail
    Connect,

    /// Fetch this cycle's alert mails and print the spend report
    Report {
        /// Where to write the raw snippets artifact (default: ~/.spendtrail/snippets.txt)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also export parsed transactions as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Only consider unread alerts
        #[arg(long)]
        unread_only: bool,
    },

    /// Re-run the parser over a previously saved snippets file (no network)
    Parse {
        /// Path to a snippets artifact written by `report`
        #[arg(long)]
        file: PathBuf,

        /// Also export parsed transactions as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Connect => run_connect().await?,

        Command::Report { out, csv, unread_only } => run_report(out, csv, unread_only).await?,

        Command::Parse { file, csv } => {
            let lines = snippets::read_snippets(&file)?;
            println!("Read {} snippets from {}\n", lines.len(), file.display());
            print_report(&lines, csv)?;
        }
    }

    Ok(())
}

/// Interactive connect:
/// - user pastes client_id/client_secret from Google Cloud Console (Desktop app)
/// - we run the OAuth installed-app flow once
/// - tokens cached under ~/.spendtrail/google_token_cache.json
async fn run_connect() -> Result<()> {
    println!("Gmail connect\n");
    println!("You need to create OAuth credentials once:\n");
    println!("1) Go to: https://console.cloud.google.com/apis/credentials");
    println!("2) Create credentials -> OAuth client ID");
    println!("3) Application type: Desktop app");
    println!("4) Copy client_id + client_secret\n");

    let client_id = prompt("Paste client_id")?;
    let client_secret = prompt("Paste client_secret")?;

    if !client_id.contains('.') || client_secret.len() < 10 {
        bail!("client_id/client_secret didn't look valid");
    }

    let client = GoogleOAuthClient {
        client_id,
        client_secret,
        auth_uri: Some("https://accounts.google.com/o/oauth2/auth".to_string()),
        token_uri: Some("https://oauth2.googleapis.com/token".to_string()),
        redirect_uris: Some(vec!["http://localhost".to_string()]),
    };

    spendtrail_gmail::save_oauth_client(&state::oauth_client_path()?, &client)?;
    spendtrail_gmail::run_installed_flow(&client, &state::token_cache_path()?).await?;

    println!("\nConnected. Tokens cached at: {}", state::token_cache_path()?.display());
    Ok(())
}

async fn run_report(out: Option<PathBuf>, csv: Option<PathBuf>, unread_only: bool) -> Result<()> {
    let cfg = config::RunConfig::from_env()?;

    // Compute the window once; every pagination call reuses the same query.
    let today = Local::now().date_naive();
    let mut filter = SearchFilter::new(&cfg.alert_sender, cycle_start(today, cfg.billing_day));
    filter.unread_only = unread_only;
    let query = filter.to_query();
    println!("Query: {query}");

    let oauth = spendtrail_gmail::load_oauth_client(&state::oauth_client_path()?)?;
    let gmail = GmailClient::connect(&oauth, &state::token_cache_path()?).await?;

    let ids = gmail.list_message_ids(&query).await?;
    println!("Found {} matching messages", ids.len());

    let fetched = gmail.fetch_snippets(&ids).await?;

    let artifact = match out {
        Some(p) => p,
        None => state::snippets_path()?,
    };
    snippets::write_snippets(&artifact, &fetched)?;
    println!("Wrote {} snippets to {}\n", fetched.len(), artifact.display());

    // Re-read the artifact so the totals reflect what's on disk.
    let lines = snippets::read_snippets(&artifact)?;
    print_report(&lines, csv)
}

fn print_report(lines: &[String], csv: Option<PathBuf>) -> Result<()> {
    let report: SpendReport = aggregate(lines.iter().map(String::as_str), &TemplateSet::hdfc());

    for err in &report.errors {
        eprintln!("warning: skipping snippet: {err}");
    }

    println!(
        "Parsed {} transactions ({} unknown template, {} unparseable)",
        report.parsed_count(),
        report.unmatched,
        report.unparseable
    );
    println!("Credit card: Rs {:.2}", report.credit_card_total);
    println!("UPI:         Rs {:.2}", report.upi_total);
    println!("Total spend: Rs {:.2}", report.total);

    if let Some(path) = csv {
        write_csv(&path, &report.transactions)?;
        println!("\nWrote {} transactions to {}", report.transactions.len(), path.display());
    }

    Ok(())
}

fn write_csv(path: &Path, transactions: &[Transaction]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("write {}", path.display()))?;
    for txn in transactions {
        writer.serialize(txn)?;
    }
    writer.flush().with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    use std::io::{self, Write};
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}
