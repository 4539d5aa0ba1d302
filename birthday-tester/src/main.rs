mod audit;
mod logic;
mod util;

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use audit::{AuditReport, audit_assets};
use logic::{LogicTester, ScenarioResult, find_scenario, list_scenarios};
use util::{parse_seeds, report_timestamp, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestMode {
    /// Seeded scenarios against the game logic
    Logic,
    /// Resolve every referenced asset under --asset-root
    Assets,
    /// Logic scenarios followed by the asset audit
    Both,
}

impl TestMode {
    const fn runs_logic(self) -> bool {
        matches!(self, Self::Logic | Self::Both)
    }

    const fn runs_assets(self) -> bool {
        matches!(self, Self::Assets | Self::Both)
    }
}

#[derive(Debug, Parser)]
#[command(name = "birthday-tester", version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Automated QA for Yuval's Birthday Adventure")]
struct Args {
    /// What to run
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Comma separated scenario keys, or `all`
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// Print the available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Comma separated base seeds
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Iterations per seed; iteration i runs with seed + i
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Directory holding the game media
    #[arg(long, default_value = "birthday-web/static/games/yuval-birthday")]
    asset_root: PathBuf,

    /// Fail when any audited asset is missing
    #[arg(long)]
    strict_assets: bool,

    /// Report format
    #[arg(long, default_value = "console", value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Per-iteration output
    #[arg(short, long)]
    verbose: bool,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    scenarios: &'a [ScenarioResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    assets: Option<&'a AuditReport>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }
    announce_banner();

    let start_time = Instant::now();
    let logic_results = if args.mode.runs_logic() {
        run_logic_scenarios(&args)?
    } else {
        Vec::new()
    };
    let audit = if args.mode.runs_assets() {
        Some(run_asset_audit(&args)?)
    } else {
        None
    };

    write_reports(&args, &logic_results, audit.as_ref(), start_time.elapsed())?;

    let logic_failed = logic_results.iter().any(|r| !r.passed);
    let assets_failed = audit
        .as_ref()
        .is_some_and(|report| !report.passed(args.strict_assets));
    if logic_failed || assets_failed {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!(
        "{}",
        "🎮 Birthday Adventure Automated Tester".bright_cyan().bold()
    );
    println!("{}", "======================================".cyan());
}

/// Expand the `all` keyword into every registered scenario key.
fn expand_scenarios(raw: &str) -> Vec<String> {
    let requested = split_csv(raw);
    if requested.iter().any(|s| s.eq_ignore_ascii_case("all")) {
        list_scenarios()
            .into_iter()
            .map(|(key, _)| key.to_string())
            .collect()
    } else {
        requested
    }
}

fn run_logic_scenarios(args: &Args) -> Result<Vec<ScenarioResult>> {
    let seeds = parse_seeds(&args.seeds)?;
    ensure!(!seeds.is_empty(), "no seeds given");

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(args.verbose);
    let mut results = Vec::new();
    for key in expand_scenarios(&args.scenarios) {
        match find_scenario(&key) {
            Some(scenario) => {
                results.extend(tester.run_scenario(scenario, &seeds, args.iterations));
            }
            None => println!("⚠️  Unknown scenario: {key}"),
        }
    }
    Ok(results)
}

fn run_asset_audit(args: &Args) -> Result<AuditReport> {
    println!("{}", "🗂️  Auditing Assets".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());
    audit_assets(&args.asset_root)
        .with_context(|| format!("asset audit of {} failed", args.asset_root.display()))
}

fn write_reports(
    args: &Args,
    results: &[ScenarioResult],
    audit: Option<&AuditReport>,
    duration: Duration,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            let report = JsonReport {
                generated_at: report_timestamp(),
                scenarios: results,
                assets: audit,
            };
            writeln!(
                &mut output_target,
                "{}",
                serde_json::to_string_pretty(&report)?
            )?;
            output_target.flush_inner()?;
            return Ok(());
        }
        "markdown" => {
            writeln!(&mut output_target, "# Birthday Adventure Test Results\n")?;
            writeln!(&mut output_target, "_Generated {}_\n", report_timestamp())?;
            if results.is_empty() && audit.is_none() {
                writeln!(&mut output_target, "_No scenarios executed._")?;
            }
            if !results.is_empty() {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
            if let Some(audit) = audit {
                audit.write_markdown(&mut output_target)?;
            }
        }
        _ => {
            if results.is_empty() && audit.is_none() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            }
            if !results.is_empty() {
                logic::reports::generate_console_report(&mut output_target, results, duration)?;
            }
            if let Some(audit) = audit {
                audit.write_console(&mut output_target, args.verbose)?;
            }
        }
    }

    writeln!(&mut output_target)?;
    writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
