use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "company-cli")]
#[command(about = "Command-line client for the Company Financial Data API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatementArg {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
}

impl StatementArg {
    fn path(self) -> &'static str {
        match self {
            StatementArg::BalanceSheet => "balance-sheet",
            StatementArg::IncomeStatement => "income-statement",
            StatementArg::CashFlow => "cash-flow",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show load counts per data category
    Health,
    /// List companies
    List {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Search companies by address text, type or industry code
    Search {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        company_type: Option<String>,
        #[arg(long)]
        industry_code: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show one company's info
    Show { duns: String },
    /// Industry classifications of a company
    Industries { duns: String },
    /// Personnel of a company
    People { duns: String },
    /// Operations descriptions of a company
    Operations { duns: String },
    /// One financial statement of a company
    Statement {
        duns: String,
        #[arg(value_enum)]
        kind: StatementArg,
        #[arg(long)]
        year: Option<i64>,
    },
    /// All financial statements of a company
    Summary {
        duns: String,
        #[arg(long)]
        year: Option<i64>,
    },
    /// Industries across all companies, by company count
    AllIndustries {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
}

fn push<T: ToString>(params: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<T>) {
    if let Some(value) = value {
        params.push((name, value.to_string()));
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let mut params: Vec<(&'static str, String)> = Vec::new();
    let path = match cli.command {
        Commands::Health => "/health".to_string(),
        Commands::List { limit, offset } => {
            push(&mut params, "limit", limit);
            push(&mut params, "offset", offset);
            "/companies".to_string()
        }
        Commands::Search {
            query,
            company_type,
            industry_code,
            limit,
            offset,
        } => {
            push(&mut params, "query", query);
            push(&mut params, "company_type", company_type);
            push(&mut params, "industry_code", industry_code);
            push(&mut params, "limit", limit);
            push(&mut params, "offset", offset);
            "/companies/search".to_string()
        }
        Commands::Show { duns } => format!("/companies/{duns}"),
        Commands::Industries { duns } => format!("/companies/{duns}/industries"),
        Commands::People { duns } => format!("/companies/{duns}/people"),
        Commands::Operations { duns } => format!("/companies/{duns}/operations"),
        Commands::Statement { duns, kind, year } => {
            push(&mut params, "year", year);
            format!("/companies/{duns}/{}", kind.path())
        }
        Commands::Summary { duns, year } => {
            push(&mut params, "year", year);
            format!("/companies/{duns}/financials/summary")
        }
        Commands::AllIndustries { limit, offset } => {
            push(&mut params, "limit", limit);
            push(&mut params, "offset", offset);
            "/industries".to_string()
        }
    };

    let res = client
        .get(format!("{base}{path}"))
        .query(&params)
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
