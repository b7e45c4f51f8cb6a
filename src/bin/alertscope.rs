use alertscope::filter::AlertFilter;
use alertscope::input::{self, ParsedInput, SourceKind};
use alertscope::report::{self, Report, ReportOpts};
use clap::Parser;
use itertools::Itertools;
use std::fs;
use std::io::{self, Read};
use std::sync::Once;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_parallelism() {
    static START: Once = Once::new();
    START.call_once(|| {
        let n = num_cpus::get();
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    });
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(name = "alertscope", version, about = "Group similar monitoring alerts")]
struct Cli {
    /// Input files (`-` for stdin). May be repeated.
    #[arg(required = false)]
    input: Vec<String>,

    /// Input document shape: record | trigger | mock
    #[arg(long = "source", env = "ALERTSCOPE_SOURCE", default_value = "record")]
    source: SourceKind,

    /// Keep alerts whose text, host or tags contain this term (case-insensitive)
    #[arg(long = "search")]
    search: Option<String>,

    /// Keep alerts with this severity label. May be repeated.
    #[arg(long = "severity")]
    severity: Vec<String>,

    /// Show only the first N clusters
    #[arg(long = "top", env = "ALERTSCOPE_TOP")]
    top: Option<usize>,

    /// Preview alerts per cluster
    #[arg(long = "examples", default_value_t = 3)]
    examples: usize,

    /// Output format: json | table
    #[arg(long = "format", env = "ALERTSCOPE_FORMAT", default_value = "json")]
    format: String,
}

fn read_inputs(paths: &[String], source: SourceKind) -> anyhow::Result<ParsedInput> {
    let mut out = ParsedInput::default();
    for p in paths {
        let text = if p == "-" {
            let mut s = String::new();
            io::stdin().lock().read_to_string(&mut s)?;
            s
        } else {
            fs::read_to_string(p)?
        };
        let parsed = input::parse_alerts(&text, source).map_err(|e| anyhow::anyhow!("{p}: {e}"))?;
        out.extend(parsed);
    }
    Ok(out)
}

fn main() -> anyhow::Result<()> {
    init_logging();
    init_parallelism();
    let cli = Cli::parse();

    let input_files = if cli.input.is_empty() {
        vec!["-".to_string()]
    } else {
        cli.input.clone()
    };

    let parsed = read_inputs(&input_files, cli.source)?;
    if !parsed.errors.is_empty() {
        warn!(skipped = parsed.errors.len(), "some alert lines could not be read");
    }

    let filter = AlertFilter {
        search: cli.search.clone(),
        severities: cli.severity.clone(),
    };
    let alerts = filter.apply(&parsed.alerts);
    info!(read = parsed.alerts.len(), kept = alerts.len(), "alerts loaded");

    let clusters = alertscope::cluster_alerts(&alerts);
    let opts = ReportOpts { top: cli.top, examples: cli.examples };
    let out = report::build_report(alerts.len(), &clusters, &opts);

    if cli.format == "table" {
        print_report_table(&out);
    } else {
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}

fn print_report_table(report: &Report) {
    println!("{} alerts in {} groups", report.total_alerts, report.total_clusters);
    for c in &report.clusters {
        let labels = [c.impact.as_deref(), c.category.as_deref(), c.service.as_deref()]
            .into_iter()
            .flatten()
            .join(" / ");
        println!("\n# Group {} ({} alerts)  score {:.2}  {}", c.rank, c.size, c.similarity, labels);
        println!("{:<12} {:<20} {:<10} {}", "Trigger", "Host", "Severity", "Problem");
        for a in &c.examples {
            println!(
                "{:<12} {:<20} {:<10} {}",
                a.trigger_id,
                a.host.as_deref().unwrap_or("-"),
                a.severity.as_deref().unwrap_or("-"),
                a.text
            );
        }
        if c.remaining > 0 {
            println!("  + {} more similar alerts", c.remaining);
        }
    }
    if report.hidden_clusters > 0 {
        println!("\n{} more groups not shown", report.hidden_clusters);
    }
}
