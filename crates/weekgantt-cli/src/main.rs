//! weekgantt CLI - Week-based Gantt chart renderer
//!
//! Renders the built-in task table as an SVG chart or dumps its layout.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use weekgantt_core::{sample, GanttConfig, Renderer, RowOrder, TaskTable, WeekConvention};
use weekgantt_render::SvgGanttRenderer;

#[derive(Parser)]
#[command(name = "weekgantt")]
#[command(author, version, about = "Week-based Gantt chart renderer", long_about = None)]
struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Chart configuration (TOML)
    #[arg(short, long, value_name = "FILE", global = true, env = "WEEKGANTT_CONFIG")]
    config: Option<PathBuf>,

    /// Week numbering for year-week labels (monday, sunday, iso)
    #[arg(long, value_name = "CONVENTION", global = true)]
    week_convention: Option<WeekConvention>,

    #[command(flatten)]
    render: RenderArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved task table
    Tasks,
}

#[derive(Args)]
struct RenderArgs {
    /// Output file path, `-` for stdout
    #[arg(short, long, value_name = "FILE", default_value = "gantt.svg")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    /// Row stacking direction (bottom-up, top-down)
    #[arg(long, value_name = "ORDER")]
    row_order: Option<RowOrder>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// SVG image
    Svg,
    /// Chart layout as JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => GanttConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GanttConfig::default(),
    };
    if let Some(convention) = cli.week_convention {
        config.week_convention = convention;
    }

    let convention = config.week_convention;
    let tasks = sample::table(convention)
        .with_context(|| format!("failed to resolve task weeks ({} convention)", convention))?;
    tracing::debug!(tasks = tasks.len(), %convention, "resolved task table");

    match cli.command {
        Some(Commands::Tasks) => print_tasks(&tasks),
        None => render(cli.render, config, &tasks),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout may carry the chart itself
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn render(args: RenderArgs, mut config: GanttConfig, tasks: &TaskTable) -> Result<()> {
    if let Some(title) = args.title {
        config.title = title;
    }
    if let Some(order) = args.row_order {
        config.row_order = order;
    }

    let renderer = SvgGanttRenderer::with_config(config);
    let content = match args.format {
        OutputFormat::Svg => renderer.render(tasks).context("failed to render chart")?,
        OutputFormat::Json => {
            let layout = renderer.layout(tasks).context("failed to lay out chart")?;
            serde_json::to_string_pretty(&layout).context("failed to serialize layout")?
        }
    };

    write_output(&args.output, &content)?;
    tracing::info!(output = %args.output.display(), format = ?args.format, "chart written");
    Ok(())
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
        return Ok(());
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

fn print_tasks(tasks: &TaskTable) -> Result<()> {
    let label_width = tasks.iter().map(|t| t.label.len()).max().unwrap_or(0).max(4);
    let category_width = tasks.iter().map(|t| t.category.len()).max().unwrap_or(0).max(8);

    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "{:<label_width$}  {:<category_width$}  {:<10}  {:<10}  {:>5}",
        "Task", "Category", "Start", "End", "Weeks"
    )?;
    for task in tasks {
        writeln!(
            stdout,
            "{:<label_width$}  {:<category_width$}  {:<10}  {:<10}  {:>5}",
            task.label,
            task.category,
            task.start.format("%Y-%m-%d").to_string(),
            task.end.format("%Y-%m-%d").to_string(),
            task.duration_weeks()
        )?;
    }
    Ok(())
}
