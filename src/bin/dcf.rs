use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rust_valuation::analysis::dcf::{project_constant_growth, valuate};
use rust_valuation::analysis::growth::estimate_growth;
use rust_valuation::models::{CashFlowSeries, ValuationAssumptions};

/// Discounted free-cash-flow valuation from the command line.
///
/// Either pass an explicit forecast with --series, or a historical series
/// with --history (growth is estimated from it), or a single --base-fcf
/// plus --growth to compound from.
#[derive(Parser, Debug)]
#[command(name = "dcf", version, about = "DCF valuation calculator")]
struct Args {
    /// Explicit forecast FCF series, comma separated (millions), periods 1..n
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["history", "base_fcf"])]
    series: Option<Vec<f64>>,

    /// Historical FCF series, comma separated (millions); forecast growth is
    /// the trimmed average of its period-over-period changes
    #[arg(long, value_delimiter = ',', conflicts_with = "base_fcf")]
    history: Option<Vec<f64>>,

    /// Last-year FCF level to compound from (millions)
    #[arg(long)]
    base_fcf: Option<f64>,

    /// Annual FCF growth rate for the forecast (e.g. 0.05 for 5%)
    #[arg(long, default_value_t = 0.05)]
    growth: f64,

    /// Forecast horizon in years
    #[arg(long, default_value_t = 5)]
    horizon: usize,

    /// Discount rate / WACC (e.g. 0.10 for 10%)
    #[arg(long)]
    discount_rate: f64,

    /// Terminal FCF growth rate (e.g. 0.03 for 3%)
    #[arg(long, default_value_t = 0.03)]
    terminal_growth: f64,

    /// Net debt = debt - cash (millions, negative for net cash)
    #[arg(long, default_value_t = 0.0)]
    net_debt: f64,

    /// Total shares outstanding (units)
    #[arg(long)]
    shares: f64,

    /// Multiplier from series units to share-price units
    /// (1,000,000 when the series is in millions)
    #[arg(long, default_value_t = 1_000_000.0)]
    unit_multiplier: f64,

    /// Emit the full ValuationResult as JSON instead of the report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let forecast = if let Some(amounts) = args.series {
        CashFlowSeries::from_amounts(amounts)?
    } else if let Some(amounts) = args.history {
        let history = CashFlowSeries::from_amounts(amounts)?;
        let estimate = estimate_growth(&history)?;
        println!(
            "📈 Historical growth: avg {:.4} ({:.2}%), trimmed {:.4} ({:.2}%)",
            estimate.average,
            estimate.average * 100.0,
            estimate.trimmed_mean,
            estimate.trimmed_mean * 100.0
        );
        project_constant_growth(history.last(), estimate.trimmed_mean, args.horizon)?
    } else if let Some(base) = args.base_fcf {
        project_constant_growth(base, args.growth, args.horizon)?
    } else {
        bail!("one of --series, --history or --base-fcf is required");
    };

    let assumptions = ValuationAssumptions {
        discount_rate: args.discount_rate,
        terminal_growth_rate: args.terminal_growth,
        growth_rate: args.growth,
        net_debt: args.net_debt,
        share_count: args.shares,
        unit_multiplier: args.unit_multiplier,
    };

    let result = valuate(&forecast, &assumptions)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("🧮 DCF VALUATION");
    println!("{}", "=".repeat(50));

    println!("\nForecast FCF (millions):");
    for (period, amount) in result.projected.iter() {
        println!("  Year {:>2}: {:>12.1}", period, amount);
    }

    println!("\n=== Valuation Results ===");
    println!("PV of forecast FCF:    ${:>12.2} million", result.pv_of_cash_flows);
    println!("Terminal value:        ${:>12.2} million", result.terminal_value);
    println!("PV of terminal value:  ${:>12.2} million", result.pv_of_terminal_value);
    println!("Enterprise value:      ${:>12.2} million", result.enterprise_value);
    println!("Equity value:          ${:>12.2} million", result.equity_value);
    println!("Fair value per share:  ${:>12.2}", result.fair_value_per_share);

    Ok(())
}
