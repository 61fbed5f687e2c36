use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use urania::input::parse_chart;
use urania::report::{render_json, render_text};
use urania::rules::load_rules_file;

#[derive(Clone, Debug, ValueEnum)]
enum Format {
    /// One line per body, then cuspids, aspects and notices.
    Text,
    /// The scored chart as pretty-printed JSON.
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Rule tables (TOML).
    #[arg(long, default_value = "configs/rules.toml")]
    rules: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Exit with an error when any chart line or record was discarded.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Chart file: positions, previous-day positions, cuspids and natal lines.
    chart: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rules = load_rules_file(&args.rules)
        .with_context(|| format!("Failed to load rules {}", args.rules.display()))?;
    let text = std::fs::read_to_string(&args.chart)
        .with_context(|| format!("Failed to read chart {}", args.chart.display()))?;

    let mut chart = parse_chart(&text, &rules.names).into_chart();
    for diagnostic in chart.diagnostics() {
        log::warn!("{diagnostic:?}");
    }
    if args.strict && !chart.diagnostics().is_empty() {
        anyhow::bail!(
            "{} discarded record(s) in {}",
            chart.diagnostics().len(),
            args.chart.display()
        );
    }

    urania::analyze(&mut chart, &rules.tables);

    match args.format {
        Format::Text => print!("{}", render_text(&chart, &rules)),
        Format::Json => println!(
            "{}",
            render_json(&chart, &rules).context("Failed to serialize chart")?
        ),
    }
    Ok(())
}
