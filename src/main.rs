//! hackastats - Calendar heatmaps and hourly breakdowns from coding-activity spans

use chrono::Utc;
use clap::Parser;
use hackastats::{
    aggregation::Aggregator,
    cli::{Cli, Command, parse_reference_time},
    output::get_formatter,
    span_loader::SpanLoader,
};
use hackastats_core::{Result, Span, Totals, timezone::TimezoneConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // --verbose wins over RUST_LOG; logs go to stderr so JSON stays clean
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("hackastats=info,hackastats_core=info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new("hackastats=warn,hackastats_core=warn")
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let tz_config = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc)?;
    info!("Using timezone: {}", tz_config.display_name());

    let now = match cli.now.as_deref() {
        Some(value) => parse_reference_time(value, &tz_config)?,
        None => Utc::now(),
    };
    info!("Reference time: {}", now.to_rfc3339());

    let colored_output = !cli.no_color
        && std::env::var("NO_COLOR").is_err()
        && is_terminal::is_terminal(std::io::stdout());
    colored::control::set_override(colored_output);

    let aggregator = Aggregator::new(tz_config);
    let formatter = get_formatter(cli.json, colored_output);

    let spans = if cli.command.reads_spans() {
        let spans = SpanLoader::from_arg(cli.input.as_deref()).load().await?;
        info!("Loaded {} spans", spans.len());
        spans
    } else {
        Vec::new()
    };

    match cli.command {
        Command::Daily => {
            info!("Running daily report");
            let daily = Aggregator::aggregate_daily(&spans);
            let totals = Totals::from_daily(&daily);
            println!("{}", formatter.format_daily(&daily, &totals));
        }
        Command::Heatmap => {
            info!("Running heatmap report");
            let daily = Aggregator::aggregate_daily(&spans);
            let series = aggregator.build_month_series(&daily, now);
            println!("{}", formatter.format_heatmap(&series));
        }
        Command::Hours => {
            info!("Running hourly report");
            let profile = aggregator.aggregate_hourly(&spans);
            println!("{}", formatter.format_hourly(&profile));
        }
        Command::Split {
            start,
            end,
            duration,
        } => {
            let span = Span {
                start_time: start,
                end_time: end,
                duration,
            };
            let segments = aggregator.split_span(&span);
            println!("{}", formatter.format_segments(&segments));
        }
    }

    Ok(())
}
