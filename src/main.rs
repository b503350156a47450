use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use std::io;
use std::path::Path;

mod config;
mod error;
mod logs;
mod model;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "psrs-speedup")]
#[command(about = "Speedup report for PSRS benchmark logs", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Commands>,

    #[command(flatten)]
    report: ReportArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the speedup chart and summary table (the default).
    Report(ReportArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// Directory holding `sequential ...` and `parallel <size> <threads>.txt` logs.
    #[arg(long, default_value = "logs")]
    logs: String,

    /// JSON file overriding the built-in input sizes and thread counts.
    #[arg(long)]
    config: Option<String>,

    #[arg(short = 'o', long, default_value = "speedup.html")]
    out: String,

    /// Print to the terminal only.
    #[arg(long)]
    no_html: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let args = match cli.cmd {
        Some(Commands::Report(args)) => args,
        None => cli.report,
    };
    run(&args)
}

fn run(args: &ReportArgs) -> Result<()> {
    // 1) Configuration.
    let config = match &args.config {
        Some(path) => config::BenchConfig::from_json_file(path)?,
        None => config::BenchConfig::reference(),
    };
    config.validate()?;
    info!(
        "input sizes {:?}, thread counts {:?}",
        config.input_sizes, config.thread_counts
    );

    // 2) Collect logs.
    let aggregate = logs::collect_dir(Path::new(&args.logs), &config)
        .with_context(|| format!("collect logs from {}", args.logs))?;

    // 3) Speedups.
    let report = model::build_report(aggregate, &config).context("compute speedups")?;
    info!("baselines matched {}", report.baseline_match);

    // 4) Render.
    println!("{}", report.summary_literal());
    let mut text = render::TextPresenter::new(io::stdout().lock());
    render::present(&report, &mut text)?;

    if !args.no_html {
        let mut html = render::HtmlPresenter::new();
        render::present(&report, &mut html)?;
        html.write_to(&args.out)?;
        println!("Wrote {}", args.out);
    }

    Ok(())
}
