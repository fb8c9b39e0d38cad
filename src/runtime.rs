// End-to-end chart rendering

use crate::component::Chart;
use crate::config::ChartConfig;
use crate::data::PlotData;
use crate::graph::Surface;
use crate::OutputFormat;
use anyhow::{Context, Result};
use log::info;

/// Load the configured source and render the chart to encoded bytes
pub fn render_chart(config: ChartConfig, format: OutputFormat) -> Result<Vec<u8>> {
    let mut chart = Chart::new(config);
    chart.mount()?;
    render_mounted(&chart, format)
}

/// Render a chart from rows already in memory
pub fn render_data(config: ChartConfig, data: &PlotData, format: OutputFormat) -> Result<Vec<u8>> {
    let mut chart = Chart::new(config);
    chart.set_data(data);
    render_mounted(&chart, format)
}

fn render_mounted(chart: &Chart, format: OutputFormat) -> Result<Vec<u8>> {
    let config = chart.config();
    let mut surface = Surface::new(config.width, config.height);
    chart.render(&mut surface).context("Failed to render chart")?;

    let bytes = surface
        .encode(format)
        .with_context(|| format!("Failed to encode chart as {:?}", format))?;
    info!(
        "rendered {:?} chart {}x{} with {} marks ({} bytes)",
        config.kind,
        surface.width(),
        surface.height(),
        surface.mark_count(),
        bytes.len()
    );
    Ok(bytes)
}
