use clap::Parser;
use fx_trend::cache::{NoCache, RateSource, SeriesCache};
use fx_trend::logger::initialize_logger;
use fx_trend::report::{render_json, TextRenderer};
use fx_trend::{
    CurrencyPair, FileCache, FileSource, ForecastMethod, HistoryRequest, OutputFormat,
    ReadThrough, ReportConfig, Result, TrendEngine, TrendReport,
};
use log::{info, LevelFilter};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Currency trend report with short-horizon predictions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV (`date,rate`) or provider JSON file with historical rates
    #[arg(short, long)]
    input: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base currency (default: EUR)
    #[arg(short, long)]
    from: Option<String>,

    /// Target currency (default: GBP)
    #[arg(short, long)]
    to: Option<String>,

    /// Days of historical data (default: 30)
    #[arg(short, long)]
    days: Option<u32>,

    /// Days to predict ahead, 0 to skip (default: 7)
    #[arg(short, long)]
    predict: Option<usize>,

    /// Forecast method: combined, linear or exponential
    #[arg(short, long)]
    method: Option<ForecastMethod>,

    /// Output format: text or json
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Bypass the on-disk cache
    #[arg(long)]
    no_cache: bool,

    /// Plain text without colors
    #[arg(long)]
    no_color: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn resolve(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)?,
            None => ReportConfig::default(),
        };

        if let Some(from) = &self.from {
            config.base = from.clone();
        }
        if let Some(to) = &self.to {
            config.target = to.clone();
        }
        if let Some(days) = self.days {
            config.days = days;
        }
        if let Some(predict) = self.predict {
            config.predict = predict;
        }
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.no_cache {
            config.cache.enabled = false;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Fetch the configured window and run metrics plus, unless `predict` is 0, a forecast
fn build_report<S: RateSource, C: SeriesCache>(
    config: &ReportConfig,
    fetcher: &mut ReadThrough<S, C>,
) -> Result<TrendReport> {
    let engine = TrendEngine::new();
    let request = HistoryRequest::new(CurrencyPair::new(&config.base, &config.target), config.days);

    let historical = fetcher.fetch_history(&request)?;

    info!("Analyzing trends...");
    let metrics = engine.compute_metrics(&historical)?;

    let predictions = if config.predict > 0 {
        info!("Generating predictions...");
        engine.forecast(&historical, config.predict, config.method, config.alpha)?
    } else {
        Vec::new()
    };

    TrendReport::new(&historical, metrics, predictions)
}

fn generate<S: RateSource, C: SeriesCache>(
    config: &ReportConfig,
    fetcher: &mut ReadThrough<S, C>,
    color: bool,
) -> Result<()> {
    let report = build_report(config, fetcher)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.format {
        OutputFormat::Json => writeln!(out, "{}", render_json(&report)?)?,
        OutputFormat::Text => TextRenderer::new(color).render(&report, &mut out)?,
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = args.resolve()?;

    // JSON goes to pipes; keep progress output out of the way
    let level = match (config.format, args.verbose) {
        (OutputFormat::Json, false) => LevelFilter::Warn,
        (_, true) => LevelFilter::Debug,
        (OutputFormat::Text, false) => LevelFilter::Info,
    };
    initialize_logger(level);

    let source = FileSource::new(&args.input);
    let color = !args.no_color;

    if config.cache.enabled {
        let cache = FileCache::new(&config.cache.dir)?;
        let mut fetcher = ReadThrough::with_ttl(source, cache, config.cache.ttl()?);
        generate(&config, &mut fetcher, color)
    } else {
        let mut fetcher = ReadThrough::new(source, NoCache);
        generate(&config, &mut fetcher, color)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
