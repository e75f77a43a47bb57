use clap::{Args, Parser, Subcommand};
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "smash")]
#[command(about = "A CLI tool for sending and browsing keyboard smashings", long_about = None)]
struct Cli {
    #[arg(long, env = "SMASH_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Send a new smashing, then show everything stored")]
    Send {
        #[arg(short, long, help = "The smashed text")]
        text: String,
    },

    #[command(about = "List smashings, optionally filtered")]
    List(ListFilters),
}

#[derive(Args, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct ListFilters {
    #[arg(long, help = "Only smashings longer than this")]
    #[serde(skip_serializing_if = "Option::is_none")]
    length_gt: Option<i64>,

    #[arg(long, help = "Only smashings shorter than this")]
    #[serde(skip_serializing_if = "Option::is_none")]
    length_lt: Option<i64>,

    #[arg(long, help = "Only smashings with sentiment above this")]
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment_gt: Option<f64>,

    #[arg(long, help = "Only smashings with sentiment below this")]
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment_lt: Option<f64>,

    #[arg(long, help = "Only smashings after this date (YYYY-MM-DD)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    date_gt: Option<String>,

    #[arg(long, help = "Only smashings before this date (YYYY-MM-DD)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    date_lt: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateSmashingRequest<'a> {
    #[serde(rename = "smashingText")]
    smashing_text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateSmashingResponse {
    #[serde(rename = "_code")]
    code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Smashing {
    smashing_text: String,
    length: i64,
    sentiment: f64,
    date: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let result = match cli.command {
        Commands::Send { text } => send_smashing(&client, &cli.api_url, &text).await,
        Commands::List(filters) => list_smashings(&client, &cli.api_url, &filters).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn send_smashing(
    client: &reqwest::Client,
    api_url: &str,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = client
        .post(format!("{}/api/smashing", api_url))
        .form(&CreateSmashingRequest { smashing_text: text })
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(format!("Failed to send smashing: {}", error_text).into());
    }

    let result: CreateSmashingResponse = response.json().await?;
    if result.code != "OK" {
        return Err("Server could not store the smashing".into());
    }

    println!("✅ Smashing stored!");

    // only list once the store has acknowledged the write
    list_smashings(client, api_url, &ListFilters::default()).await
}

async fn list_smashings(
    client: &reqwest::Client,
    api_url: &str,
    filters: &ListFilters,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = client
        .get(format!("{}/api/smashings", api_url))
        .query(filters)
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(format!("Failed to fetch smashings: {}", error_text).into());
    }

    let smashings: Vec<Smashing> = response.json().await?;

    if smashings.is_empty() {
        println!("📭 No smashings found.");
        return Ok(());
    }

    println!("\n📋 Smashings ({})\n", smashings.len());

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Text"),
        Cell::new("Length"),
        Cell::new("Sentiment"),
        Cell::new("Date"),
    ]));

    for smashing in smashings {
        table.add_row(Row::new(vec![
            Cell::new(&smashing.smashing_text),
            Cell::new(&smashing.length.to_string()),
            Cell::new(&format!("{:.4}", smashing.sentiment)),
            Cell::new(&smashing.date),
        ]));
    }

    table.printstd();
    println!();

    Ok(())
}
