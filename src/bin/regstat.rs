use anyhow::Result;
use clap::{Parser, ValueEnum};
use regstat::datasets::{self, Registry};
use regstat::{AreaCollection, Filters, StringFilter, YearFilter, export, stats};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "regstat",
    version,
    about = "Import, filter & report regional statistics (StatsWales CSV/JSON datasets)"
)]
struct Cli {
    /// Directory containing the input data files
    #[arg(long, default_value = "datasets")]
    dir: PathBuf,
    /// Dataset codes separated by comma (omit or 'all' for every dataset)
    #[arg(short, long, value_delimiter = ',')]
    datasets: Vec<String>,
    /// Area filter terms separated by comma, matched against codes and names
    #[arg(short, long, value_delimiter = ',')]
    areas: Vec<String>,
    /// Measure codes separated by comma (omit or 'all' for every measure)
    #[arg(short, long, value_delimiter = ',')]
    measures: Vec<String>,
    /// Year (YYYY) or inclusive range (YYYY-ZZZZ); 0 for all years
    #[arg(short, long, default_value = "0")]
    years: String,
    /// Print the output as JSON instead of tables
    #[arg(short, long, default_value_t = false)]
    json: bool,
    /// Print summary statistics per area and measure after the report
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// TOML dataset registry to use instead of the built-in one
    #[arg(long)]
    registry: Option<PathBuf>,
    /// Also save results to a file (format inferred by --format or extension)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output file format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let registry = match &cli.registry {
        Some(path) => Registry::load_from_file(path)?,
        None => Registry::default(),
    };
    let sources = registry.select(&cli.datasets)?;
    let filters = Filters {
        areas: StringFilter::from_args(&cli.areas),
        measures: StringFilter::from_args(&cli.measures),
        years: YearFilter::parse(&cli.years)?,
    };

    let mut areas = AreaCollection::new();
    let mut outcomes = datasets::load_all(
        &mut areas,
        &cli.dir,
        &[&registry.areas],
        &filters.areas_only(),
    );
    outcomes.extend(datasets::load_all(&mut areas, &cli.dir, &sources, &filters));

    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => {
                for w in &report.warnings {
                    eprintln!("Warning in {}: {}", outcome.file, w);
                }
            }
            Err(e) => eprintln!("Error importing dataset {}:\n{}", outcome.file, e),
        }
    }

    if cli.json {
        println!("{}", areas.to_json()?);
    } else {
        print!("{}", areas.render());
    }

    if let Some(path) = cli.out.as_ref() {
        let fmt = match cli.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("json"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => export::save_csv(&areas, path)?,
            "json" => export::save_json(&areas, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} areas to {}", areas.len(), path.display());
    }

    if cli.stats {
        for s in stats::grouped_summary(&areas) {
            println!(
                "{} • {}  count={}  min={} max={} mean={} median={} diff={} diff%={}",
                s.key.authority_code,
                s.key.codename,
                s.count,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median),
                fmt_opt(Some(s.difference)),
                fmt_opt(Some(s.difference_pct)),
            );
        }
    }

    Ok(())
}
