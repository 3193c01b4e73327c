use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rust_valuation::analysis::comparables::{
    combine_valuations, equity_value_from_ev_ebitda, equity_value_from_pe,
};
use rust_valuation::analysis::dcf::valuate;
use rust_valuation::models::{CashFlowSeries, ValuationAssumptions};

/// IPO pricing: blend a DCF equity value with comparable-multiple equity
/// values (forward P/E and EV/EBITDA) and derive an implied offer price.
#[derive(Parser, Debug)]
#[command(name = "ipo-valuation", version, about = "IPO valuation via DCF and comparables")]
struct Args {
    /// Projected FCF series, comma separated (millions), years 1..n
    #[arg(long, value_delimiter = ',')]
    series: Vec<f64>,

    /// Discount rate (required return), e.g. 0.12
    #[arg(long)]
    discount_rate: f64,

    /// Terminal growth rate, e.g. 0.03
    #[arg(long, default_value_t = 0.03)]
    terminal_growth: f64,

    /// Net debt (millions)
    #[arg(long, default_value_t = 0.0)]
    net_debt: f64,

    /// Total shares outstanding after the IPO (units)
    #[arg(long)]
    shares_post_ipo: f64,

    /// Peer forward P/E multiples, comma separated
    #[arg(long, value_delimiter = ',')]
    peer_pe: Vec<f64>,

    /// Peer EV/EBITDA multiples, comma separated
    #[arg(long, value_delimiter = ',')]
    peer_ev_ebitda: Vec<f64>,

    /// Next-12-month net income (millions)
    #[arg(long)]
    forward_net_income: f64,

    /// Next-12-month EBITDA (millions)
    #[arg(long)]
    forward_ebitda: f64,

    /// Weights for DCF, P/E and EV/EBITDA values; must sum to 1
    #[arg(long, value_delimiter = ',', default_values_t = [0.5, 0.25, 0.25])]
    weights: Vec<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let forecast = CashFlowSeries::from_amounts(args.series)?;
    let assumptions = ValuationAssumptions {
        discount_rate: args.discount_rate,
        terminal_growth_rate: args.terminal_growth,
        growth_rate: 0.0,
        net_debt: args.net_debt,
        share_count: args.shares_post_ipo,
        unit_multiplier: 1_000_000.0,
    };

    let dcf = valuate(&forecast, &assumptions)?;

    let pe_equity = equity_value_from_pe(&args.peer_pe, args.forward_net_income)?;
    let ev_ebitda_equity =
        equity_value_from_ev_ebitda(&args.peer_ev_ebitda, args.forward_ebitda, args.net_debt)?;

    let weighted_equity = combine_valuations(
        &[dcf.equity_value, pe_equity, ev_ebitda_equity],
        &args.weights,
    )?;
    let implied_price = weighted_equity * 1_000_000.0 / args.shares_post_ipo;

    println!("🧮 IPO VALUATION");
    println!("{}", "=".repeat(50));
    println!("DCF equity value:       ${:>12.1} million", dcf.equity_value);
    println!("P/E equity value:       ${:>12.1} million", pe_equity);
    println!("EV/EBITDA equity value: ${:>12.1} million", ev_ebitda_equity);
    println!("Weighted equity value:  ${:>12.1} million", weighted_equity);
    println!("Implied IPO price:      ${:>12.2} per share", implied_price);

    Ok(())
}
