#![deny(missing_docs)]
//! Apiscope command-line interface.
//!
//! Queries a running Apiscope server and prints dashboard statistics as
//! pretty-printed JSON.

#[cfg(not(test))]
use apiscope_core::{AggregateSummary, ApiRow, ScatterPoint, TrendPoint};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use urlencoding::encode;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "apiscope", version, about = "Apiscope CLI")]
struct Cli {
    /// Base URL of the Apiscope server.
    #[arg(
        long,
        env = "APISCOPE_SERVER",
        default_value = "http://127.0.0.1:8080"
    )]
    server: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct RangeArgs {
    /// Range start date (YYYY-MM-DD).
    #[arg(long)]
    start: String,
    /// Range end date (YYYY-MM-DD).
    #[arg(long)]
    end: String,
}

#[derive(Args, Clone)]
struct DayArgs {
    /// Day to query (YYYY-MM-DD).
    #[arg(long)]
    date: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print summary statistics over a date range.
    Summary {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Print the per-day coverage trend series over a date range.
    Trends {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Print coverage/usage scatter pairs for one day.
    Scatter {
        #[command(flatten)]
        day: DayArgs,
    },
    /// Print the per-API detail table for one day.
    Table {
        #[command(flatten)]
        day: DayArgs,
    },
}

fn range_url(base: &str, endpoint: &str, range: &RangeArgs) -> String {
    format!(
        "{}/api/stats/{endpoint}?start={}&end={}",
        base.trim_end_matches('/'),
        encode(&range.start),
        encode(&range.end)
    )
}

fn day_url(base: &str, endpoint: &str, day: &DayArgs) -> String {
    format!(
        "{}/api/stats/{endpoint}?date={}",
        base.trim_end_matches('/'),
        encode(&day.date)
    )
}

async fn fetch<T: DeserializeOwned>(url: &str) -> CliResult<T> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = body
            .get("message")
            .and_then(|value| value.as_str())
            .unwrap_or("request failed");
        return Err(format!("{status}: {message}").into());
    }
    Ok(response.json().await?)
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Summary { range } => {
            let summary: AggregateSummary = fetch(&range_url(&cli.server, "summary", range)).await?;
            print_json(&summary)?;
        }
        Commands::Trends { range } => {
            let trends: Vec<TrendPoint> =
                fetch(&range_url(&cli.server, "coverage-trends", range)).await?;
            print_json(&trends)?;
        }
        Commands::Scatter { day } => {
            let points: Vec<ScatterPoint> =
                fetch(&day_url(&cli.server, "coverage-usage", day)).await?;
            print_json(&points)?;
        }
        Commands::Table { day } => {
            let rows: Vec<ApiRow> = fetch(&day_url(&cli.server, "api-table", day)).await?;
            print_json(&rows)?;
        }
    }
    Ok(())
}

#[cfg(test)]
fn main() {}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, DayArgs, RangeArgs, day_url, range_url};
    use clap::Parser;

    #[test]
    fn range_url_encodes_parameters() {
        let range = RangeArgs {
            start: "2024-01-01".to_string(),
            end: "2024 01 31".to_string(),
        };
        let url = range_url("http://localhost:8080/", "summary", &range);
        assert_eq!(
            url,
            "http://localhost:8080/api/stats/summary?start=2024-01-01&end=2024%2001%2031"
        );
    }

    #[test]
    fn day_url_targets_single_day_endpoint() {
        let day = DayArgs {
            date: "2024-01-01".to_string(),
        };
        let url = day_url("http://localhost:8080", "api-table", &day);
        assert_eq!(
            url,
            "http://localhost:8080/api/stats/api-table?date=2024-01-01"
        );
    }

    #[test]
    fn cli_parses_summary_command() {
        let cli = Cli::try_parse_from([
            "apiscope",
            "summary",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-31",
        ])
        .expect("parse");
        match cli.command {
            Commands::Summary { range } => {
                assert_eq!(range.start, "2024-01-01");
                assert_eq!(range.end, "2024-01-31");
            }
            _ => panic!("expected summary command"),
        }
        assert_eq!(cli.server, "http://127.0.0.1:8080");
    }

    #[test]
    fn cli_requires_date_for_table() {
        let result = Cli::try_parse_from(["apiscope", "table"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_accepts_server_override() {
        let cli = Cli::try_parse_from([
            "apiscope",
            "--server",
            "https://apiscope.internal",
            "scatter",
            "--date",
            "2024-06-01",
        ])
        .expect("parse");
        assert_eq!(cli.server, "https://apiscope.internal");
        match cli.command {
            Commands::Scatter { day } => assert_eq!(day.date, "2024-06-01"),
            _ => panic!("expected scatter command"),
        }
    }
}
