use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tipcharts::config::{ChartConfig, ChartKind, ConfigFile};
use tipcharts::parser::parse_size;
use tipcharts::{runtime, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "tipcharts")]
#[command(about = "Render scatter and bar charts from CSV data as SVG or PNG", long_about = None)]
struct Cli {
    #[command(subcommand)]
    chart: ChartCommand,
}

#[derive(Subcommand, Debug)]
enum ChartCommand {
    /// Scatter plot of two numeric columns
    Scatter {
        /// Column for the horizontal axis [default: total_bill]
        #[arg(long)]
        x: Option<String>,
        /// Column for the vertical axis [default: tip]
        #[arg(long)]
        y: Option<String>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Bar chart of the mean of a numeric column per category
    Bar {
        /// Grouping column [default: day]
        #[arg(long)]
        group: Option<String>,
        /// Column averaged within each group [default: tip]
        #[arg(long)]
        value: Option<String>,
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// CSV file (or `.json` array of objects) to read, `-` for stdin [default: tips.csv]
    #[arg(long)]
    source: Option<String>,
    /// Surface width in pixels [default: 600]
    #[arg(long)]
    width: Option<u32>,
    /// Surface height in pixels [default: 400]
    #[arg(long)]
    height: Option<u32>,
    /// Surface size as WIDTHxHEIGHT, e.g. 800x600
    #[arg(long, conflicts_with_all = ["width", "height"])]
    size: Option<String>,
    /// Output encoding [default: svg]
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// JSON file with chart settings; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    x_label: Option<String>,
    #[arg(long)]
    y_label: Option<String>,
    /// Mark fill color, `#rrggbb` or a color name
    #[arg(long)]
    fill: Option<String>,
}

impl CommonArgs {
    fn overrides(&self, x: Option<String>, y: Option<String>) -> Result<ConfigFile> {
        let (width, height) = match &self.size {
            Some(size) => {
                let (w, h) = parse_size(size)?;
                (Some(w), Some(h))
            }
            None => (self.width, self.height),
        };

        Ok(ConfigFile {
            source: self.source.clone(),
            width,
            height,
            x,
            y,
            title: self.title.clone(),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            fill: self.fill.clone(),
            format: self.format,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let (kind, common, x, y) = match cli.chart {
        ChartCommand::Scatter { x, y, common } => (ChartKind::Scatter, common, x, y),
        ChartCommand::Bar { group, value, common } => (ChartKind::Bar, common, group, value),
    };

    // Defaults, then the config file, then flags
    let file = match &common.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let settings = file.merge(common.overrides(x, y)?);
    let format = settings.format.unwrap_or_default();
    let config = ChartConfig::defaults(kind).with_overrides(settings);

    let bytes = runtime::render_chart(config, format).context("Failed to render chart")?;

    match &common.output {
        Some(path) => fs::write(path, &bytes)
            .with_context(|| format!("Failed to write output to '{}'", path.display()))?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&bytes)
                .context("Failed to write chart to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}
