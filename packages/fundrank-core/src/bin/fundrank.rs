//! Fundrank CLI - Mutual fund metrics and risk-matched recommendations.
//!
//! Reads a `Scheme Name, Date, NAV` CSV and prints either JSON (for scripting)
//! or plain-text tables.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fundrank_core::{
    analyze, load_csv_path, recommend, risk_distribution, Analysis, FundMetrics, MetricsConfig,
    RiskProfile,
};
use serde_json::{json, Value};
use std::env;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "fundrank")]
#[command(about = "Mutual fund risk/return metrics and risk-matched recommendations")]
#[command(version)]
struct Cli {
    /// Metrics configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "json", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute metrics for every fund in a NAV file
    Metrics {
        /// CSV with Scheme Name, Date and NAV columns
        csv: PathBuf,
    },
    /// Recommend the best funds for a risk profile
    Recommend {
        /// CSV with Scheme Name, Date and NAV columns
        csv: PathBuf,
        /// Risk profile to match
        #[arg(short, long, value_enum)]
        profile: RiskProfile,
        /// Number of funds to recommend
        #[arg(short = 'k', long, default_value = "3")]
        top_k: usize,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn main() {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            match format {
                OutputFormat::Json => println!(
                    "{}",
                    json!({ "ok": false, "error": format!("{:#}", e) })
                ),
                OutputFormat::Table => eprintln!("error: {:#}", e),
            }
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = resolve_config(cli.config)?;

    match cli.command {
        Commands::Metrics { csv } => {
            let analysis = load(&csv, &config)?;
            Ok(match cli.format {
                OutputFormat::Json => envelope(json!({
                    "metrics": analysis.metrics,
                    "cleaning": analysis.report(),
                }))?,
                OutputFormat::Table => render_table(analysis.metrics.iter()),
            })
        }
        Commands::Recommend {
            csv,
            profile,
            top_k,
        } => {
            let analysis = load(&csv, &config)?;
            let picks = recommend(&analysis.metrics, profile, top_k)?;
            Ok(match cli.format {
                OutputFormat::Json => envelope(recommendation_json(&analysis, profile, &picks))?,
                OutputFormat::Table => render_recommendation(&analysis, profile, &picks),
            })
        }
    }
}

/// Pick the configuration: `--config`, then `FUNDRANK_CONFIG`, then the
/// per-user config file if present, then the built-in defaults.
fn resolve_config(flag: Option<PathBuf>) -> Result<MetricsConfig> {
    let explicit = flag.or_else(|| env::var_os("FUNDRANK_CONFIG").map(PathBuf::from));
    if let Some(path) = explicit {
        return MetricsConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    let user_config = directories::ProjectDirs::from("", "", "fundrank")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .filter(|path| path.exists());

    match user_config {
        Some(path) => MetricsConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(MetricsConfig::default()),
    }
}

fn load(csv: &Path, config: &MetricsConfig) -> Result<Analysis> {
    let table =
        load_csv_path(csv).with_context(|| format!("failed to read {}", csv.display()))?;
    Ok(analyze(table, config)?)
}

fn envelope(data: Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(
        &json!({ "ok": true, "data": data }),
    )?)
}

fn recommendation_json(analysis: &Analysis, profile: RiskProfile, picks: &[&FundMetrics]) -> Value {
    let schemes: Vec<&str> = picks.iter().map(|m| m.scheme.as_str()).collect();
    let distribution: serde_json::Map<String, Value> = risk_distribution(&analysis.metrics)
        .into_iter()
        .map(|(class, count)| (class.to_string(), json!(count)))
        .collect();

    json!({
        "profile": profile,
        "recommendations": picks,
        "risk_distribution": distribution,
        "nav_history": analysis.dataset.history(&schemes[..]),
    })
}

fn pct(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}%", v * 100.0)).unwrap_or_default()
}

fn ratio(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

fn render_table<'a>(rows: impl IntoIterator<Item = &'a FundMetrics>) -> String {
    let mut out = format!(
        "{:<40} {:>12} {:>12} {:>8} {:>12} {:<13} {:>10}\n",
        "Scheme", "CAGR", "Volatility", "Sharpe", "MaxDrawdown", "RiskClass", "MFScore"
    );
    for m in rows {
        out.push_str(&format!(
            "{:<40} {:>12} {:>12} {:>8} {:>12} {:<13} {:>10.4}\n",
            m.scheme,
            pct(m.cagr),
            pct(m.volatility),
            ratio(m.sharpe),
            pct(m.max_drawdown),
            m.risk_class.as_str(),
            m.score
        ));
    }
    out
}

fn render_recommendation(
    analysis: &Analysis,
    profile: RiskProfile,
    picks: &[&FundMetrics],
) -> String {
    let mut out = format!("Recommended funds for {}\n", profile);
    if picks.is_empty() {
        out.push_str("(no funds in this risk class)\n");
    } else {
        out.push_str(&render_table(picks.iter().copied()));
    }

    out.push_str("\nRisk class distribution\n");
    for (class, count) in risk_distribution(&analysis.metrics) {
        out.push_str(&format!("{:<13} {:>5}\n", class.as_str(), count));
    }

    let schemes: Vec<&str> = picks.iter().map(|m| m.scheme.as_str()).collect();
    let history = analysis.dataset.history(&schemes[..]);
    if !history.is_empty() {
        out.push_str("\nNAV history\n");
        for fund in history {
            let navs = fund.navs();
            if let (Some((start, end)), Some(first), Some(last)) =
                (fund.date_range(), navs.first(), navs.last())
            {
                out.push_str(&format!(
                    "{:<40} {:>5} obs  {} {:>10.4}  ->  {} {:>10.4}\n",
                    fund.scheme,
                    fund.len(),
                    start,
                    first,
                    end,
                    last
                ));
            }
        }
    }

    out
}
