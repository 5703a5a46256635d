use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use lobx_agg::cli::{parse_quantity, Cli};
use lobx_agg::config::Settings;
use lobx_agg::error::{AggError, AggResult};
use lobx_agg::market_data::router::Orchestrator;
use lobx_agg::{report, telemetry, ASSET};

async fn run(cli: Cli) -> AggResult<String> {
    // Fail fast on bad input, before settings or sockets
    let qty = parse_quantity(&cli.qty)?;

    let settings = Settings::load(cli.config.as_deref())?;
    telemetry::init_tracing(&settings.log_filter);
    if let Err(e) = telemetry::init_metrics() {
        warn!(error = %e, "Metrics exporter disabled");
    }

    let orchestrator = Orchestrator::from_settings(&settings)?;
    info!(%qty, sources = ?orchestrator.source_names(), "Starting aggregation run");

    let quote = orchestrator.run(qty).await?;
    for result in [&quote.buy, &quote.sell] {
        if result.is_partial() {
            warn!(
                side = %result.side,
                requested = %result.target_quantity,
                filled = %result.filled_quantity,
                "Aggregated book too thin for requested quantity"
            );
        }
    }
    Ok(report::render_quote(ASSET, &quote))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // load .env

    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if let AggError::SourceUnavailable(_) = e {
                error!(error = %e, "Run aborted");
                eprintln!("One of the exchanges could not supply a book: {}", e);
            } else {
                eprintln!("{}", e);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
