use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};
use tradebook_connector::exchange::binance::{spot::BinanceSpot, thailand::BinanceThailand};
use tradebook_core::{
    normalizer::{FillAdapter, OrderAdapter},
    pipeline::Pipeline,
    report::Report,
};
use tradebook_model::{enums::PipelineKind, error::ReportError, instruments::Instrument};

use crate::config::{Config, ConfigError};

mod config;
mod render;

// Initialise an INFO `Subscriber` for `Tracing` Json logs and install it as the global default.
fn init_logging() {
    tracing_subscriber::fmt()
        // Filter messages based on the INFO
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        // Disable colours on release builds
        .with_ansi(cfg!(debug_assertions))
        // Enable Json formatting
        .json()
        // Install this Tracing subscriber as global default
        .init()
}

/// Why a single pipeline produced no report.
#[derive(Error, Debug)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// BTC/USDT fills from Binance spot, with a live quote for unrealized P/L.
async fn fills_report(config: &Config) -> Result<Report, RunError> {
    let credentials = config.fills_credentials.as_ref().map_err(Clone::clone)?;
    let spot = Arc::new(BinanceSpot::new(config.binance_base_url.clone(), credentials).map_err(ReportError::from)?);

    let report = Pipeline::builder()
        .instrument(Instrument::new("btc", "usdt"))
        .source(Arc::clone(&spot))
        .adapter(FillAdapter::new(config.utc_offset))
        .quote_source(Box::new(spot))
        .build()?
        .run()
        .await?;

    Ok(report)
}

/// USDT/THB order history from Binance TH. Fees are estimated.
async fn orders_report(config: &Config) -> Result<Report, RunError> {
    let credentials = config.orders_credentials.as_ref().map_err(Clone::clone)?;
    let instrument = Instrument::new("usdt", "thb");
    let source = BinanceThailand::new(config.binance_th_base_url.clone(), credentials).map_err(ReportError::from)?;

    let report = Pipeline::builder()
        .adapter(OrderAdapter::new(config.utc_offset, instrument.base_currency.clone()))
        .instrument(instrument)
        .source(source)
        .build()?
        .run()
        .await?;

    Ok(report)
}

fn present(config: &Config, kind: PipelineKind, outcome: Result<Report, RunError>) {
    match outcome {
        Ok(report) => {
            println!("{}", render::report(&report, config.display_range(report.span)));
        }
        Err(RunError::Report(error)) if error.is_informational() => {
            info!(%kind, "empty report");
            println!("{}", render::empty_state(kind));
        }
        Err(error) => {
            error!(%kind, %error, "report failed");
            println!("{}", render::failure(kind, &error));
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            error!(%error, "failed to load configuration");
            std::process::exit(1);
        }
    };
    info!(
        binance = %config.binance_base_url,
        binance_th = %config.binance_th_base_url,
        utc_offset = %config.utc_offset,
        "loaded configuration"
    );

    // One fetch per pipeline, a failure in one never stops the other, missing credentials included
    present(&config, PipelineKind::Fills, fills_report(&config).await);
    present(&config, PipelineKind::Orders, orders_report(&config).await);
}
