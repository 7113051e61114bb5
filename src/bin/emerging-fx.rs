//! emerging-fx CLI - Serve or render the emerging-market currency dashboard
//!
//! ## Example Usage
//!
//! ```bash
//! # Serve the dashboard on the configured address
//! emerging-fx serve --addr 0.0.0.0:8501
//!
//! # Render a static page from local CSV files
//! emerging-fx render --period "3 years" --csv-dir ./quotes --output fx.html
//!
//! # Render two currencies and export the tables
//! emerging-fx render --currency "Real (BRL)" --currency mxn --export out/
//!
//! # List the ticker registry
//! emerging-fx tickers
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use emerging_fx::config::Config;
use emerging_fx::currency::{self, TICKERS};
use emerging_fx::dashboard::{Dashboard, DashboardRequest, DashboardView};
use emerging_fx::data::sources::{ConfiguredSource, MarketDataSource};
use emerging_fx::page::render_page;
use emerging_fx::period::Period;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process;

/// emerging-fx: Emerging-market currency dashboard
#[derive(Parser)]
#[command(name = "emerging-fx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Monthly averages and YTD variation of emerging-market currencies", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard over HTTP
    Serve {
        /// Listen address (default from config: 127.0.0.1:8501)
        #[arg(short, long)]
        addr: Option<String>,

        /// Read quotes from `<symbol>.csv` files in this directory
        #[arg(long)]
        csv_dir: Option<PathBuf>,
    },

    /// Render the dashboard once to a static HTML file
    Render {
        /// Analysis period ("1 year", "3 years", "5 years", "since 2019")
        #[arg(short, long, default_value = "1 year")]
        period: String,

        /// Currency label or ISO code to include (repeatable; default: all)
        #[arg(long = "currency", value_name = "LABEL")]
        currencies: Vec<String>,

        /// Read quotes from `<symbol>.csv` files in this directory
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        /// Output HTML file
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,

        /// Also write daily.csv, monthly.csv and ytd.csv into this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },

    /// List the available currencies and periods
    Tickers,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    if cli.verbose {
        println!(
            "{} v{}",
            "emerging-fx".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
    }

    match cli.command {
        Commands::Serve { addr, csv_dir } => serve(config, addr, csv_dir),
        Commands::Render {
            period,
            currencies,
            csv_dir,
            output,
            export,
        } => render(RenderArgs {
            config,
            period,
            currencies,
            csv_dir,
            output,
            export,
        }),
        Commands::Tickers => {
            list_tickers();
            Ok(())
        }
    }
}

fn build_source(config: &Config, csv_dir: Option<PathBuf>) -> anyhow::Result<ConfiguredSource> {
    let mut source_config = config.source.clone();
    if csv_dir.is_some() {
        source_config.csv_dir = csv_dir;
    }
    let source = ConfiguredSource::from_config(&source_config).context("building market data source")?;
    log::debug!("Using market data source: {}", source.name());
    Ok(source)
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")
}

fn serve(config: Config, addr: Option<String>, csv_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let source = build_source(&config, csv_dir)?;
    let addr = addr.unwrap_or_else(|| config.server.addr.clone());
    let dashboard = Dashboard::new(source, config.chart);

    println!(
        "{} http://{}",
        "Serving dashboard on".green().bold(),
        addr
    );
    runtime()?.block_on(emerging_fx::server::serve(&addr, dashboard))?;
    Ok(())
}

struct RenderArgs {
    config: Config,
    period: String,
    currencies: Vec<String>,
    csv_dir: Option<PathBuf>,
    output: PathBuf,
    export: Option<PathBuf>,
}

fn render(args: RenderArgs) -> anyhow::Result<()> {
    let source = build_source(&args.config, args.csv_dir)?;
    let dashboard = Dashboard::new(source, args.config.chart);

    let mut request = DashboardRequest::new(args.period);
    if !args.currencies.is_empty() {
        let labels = args
            .currencies
            .iter()
            .map(|c| currency::resolve_label(c))
            .collect::<Result<Vec<_>, _>>()?;
        request = request.with_currencies(labels);
    }

    let view = runtime()?.block_on(dashboard.run_today(&request))?;

    fs::write(&args.output, render_page(&view, &request))
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("{}", "Dashboard rendered".green().bold());
    println!("  {} {}", "Period:".bold(), view.period);
    println!(
        "  {} {} .. {}",
        "Range:".bold(),
        view.range.start,
        view.range.end
    );
    println!("  {} {}", "Currencies:".bold(), view.currencies.join(", "));
    println!("  {} {}", "Monthly rows:".bold(), view.monthly.len());
    for row in &view.ytd.rows {
        println!("    {:<24} {:>8.2}%", row.currency, row.variation_pct);
    }
    println!("  {} {}", "Output:".bold(), args.output.display());

    if let Some(dir) = args.export {
        export_tables(&view, &dir)?;
        println!("  {} {}", "Exported:".bold(), dir.display());
    }

    Ok(())
}

fn export_tables(view: &DashboardView, dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let create = |name: &str| {
        let path = dir.join(name);
        File::create(&path).with_context(|| format!("creating {}", path.display()))
    };

    view.daily.write_csv(create("daily.csv")?)?;
    view.monthly.write_csv(create("monthly.csv")?)?;
    view.ytd.write_csv(create("ytd.csv")?)?;
    Ok(())
}

fn list_tickers() {
    println!("{}", "Currencies".cyan().bold());
    for ticker in TICKERS.iter() {
        println!(
            "  {:<24} {:<10} {}",
            ticker.label.bright_green(),
            ticker.symbol,
            ticker.pair.to_string().dimmed()
        );
    }

    println!("{}", "Periods".cyan().bold());
    for period in Period::ALL {
        let marker = if period == Period::default() { " (default)" } else { "" };
        println!("  {:<12} from {}{}", period.label(), period.start_date(), marker);
    }
}
