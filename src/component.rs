// Chart components: load once, aggregate, redraw on data or size change

use anyhow::{Context, Result};
use log::{debug, info};

use crate::compiler::{compile_bar, compile_scatter};
use crate::config::{ChartConfig, ChartKind};
use crate::csv_reader::{self, DataSource};
use crate::data::PlotData;
use crate::graph::Surface;
use crate::ir::{Dataset, SceneGraph};
use crate::transform::{group_mean, scatter_points};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    /// Nothing to draw yet; rendering leaves the surface untouched
    AwaitingData,
    /// Non-empty data has arrived; rendering redraws everything.
    /// There is no way back to `AwaitingData`.
    Ready,
}

/// One chart instance and the dataset it owns
#[derive(Debug, Clone)]
pub struct Chart {
    config: ChartConfig,
    dataset: Option<Dataset>,
    loaded: bool,
    ready: bool,
}

impl Chart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            dataset: None,
            loaded: false,
            ready: false,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn state(&self) -> ChartState {
        if self.ready {
            ChartState::Ready
        } else {
            ChartState::AwaitingData
        }
    }

    /// Load rows from the configured source. Runs once per instance;
    /// later calls are no-ops.
    pub fn mount(&mut self) -> Result<()> {
        let source = self.config.source.clone();
        self.mount_from(&source)
    }

    pub fn mount_from(&mut self, source: &DataSource) -> Result<()> {
        if self.loaded {
            debug!("{:?} chart already loaded, skipping {}", self.config.kind, source);
            return Ok(());
        }

        let data = csv_reader::read_source(source)
            .with_context(|| format!("Failed to load {:?} chart data", self.config.kind))?;
        self.set_data(&data);
        Ok(())
    }

    /// Replace the dataset wholesale with an aggregation of `data`.
    /// A ready chart stays ready; empty data then renders a blank surface.
    pub fn set_data(&mut self, data: &PlotData) {
        let dataset = match self.config.kind {
            ChartKind::Scatter => Dataset::Points(scatter_points(data, &self.config.x_col, &self.config.y_col)),
            ChartKind::Bar => Dataset::Aggregates(group_mean(data, &self.config.x_col, &self.config.y_col)),
        };
        info!(
            "{:?} chart aggregated {} rows into {} items",
            self.config.kind,
            data.len(),
            dataset.len()
        );
        self.ready |= !dataset.is_empty();
        self.dataset = Some(dataset);
        self.loaded = true;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
    }

    /// Compile the current dataset, or `None` while awaiting data
    pub fn scene(&self) -> Result<Option<SceneGraph>> {
        let dataset = match (&self.dataset, self.state()) {
            (Some(dataset), ChartState::Ready) => dataset,
            _ => return Ok(None),
        };

        let layout = self.config.layout()?;
        let scene = match dataset {
            Dataset::Points(points) => compile_scatter(points, &layout),
            Dataset::Aggregates(aggregates) => compile_bar(aggregates, &layout),
        };
        Ok(Some(scene))
    }

    /// Redraw onto `surface`. While awaiting data the surface is left as is.
    pub fn render(&self, surface: &mut Surface) -> Result<()> {
        match self.scene()? {
            Some(scene) => {
                debug!("drawing {} commands ({} marks)", scene.commands.len(), scene.mark_count());
                surface.draw(&scene);
            }
            None => debug!("{:?} chart has no data yet, nothing to draw", self.config.kind),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "total_bill,tip,day\n10,2,Sun\n20,4,Sat\n30,3,Sun\n";

    fn chart(kind: ChartKind) -> Chart {
        let mut config = ChartConfig::defaults(kind);
        config.source = DataSource::Inline(CSV.to_string());
        Chart::new(config)
    }

    #[test]
    fn test_state_transitions_on_load() {
        let mut chart = chart(ChartKind::Bar);
        assert_eq!(chart.state(), ChartState::AwaitingData);
        chart.mount().unwrap();
        assert_eq!(chart.state(), ChartState::Ready);

        match chart.dataset().unwrap() {
            Dataset::Aggregates(aggs) => {
                assert_eq!(aggs.len(), 2);
                assert_eq!(aggs[0].key, "Sun");
                assert_eq!(aggs[0].value, 2.5);
            }
            other => panic!("unexpected dataset {:?}", other),
        }
    }

    #[test]
    fn test_mount_runs_once() {
        let mut chart = chart(ChartKind::Scatter);
        chart.mount().unwrap();
        // A second source would fail to load if it were read
        chart
            .mount_from(&DataSource::Path("missing/never-read.csv".into()))
            .unwrap();
        assert_eq!(chart.dataset().map(Dataset::len), Some(3));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut chart = chart(ChartKind::Scatter);
        chart.mount().unwrap();

        let mut surface = Surface::new(600, 400);
        chart.render(&mut surface).unwrap();
        let marks = surface.mark_count();
        let total = surface.commands().len();
        chart.render(&mut surface).unwrap();

        assert_eq!(marks, 3);
        assert_eq!(surface.mark_count(), marks);
        assert_eq!(surface.commands().len(), total);
    }

    #[test]
    fn test_empty_data_is_noop() {
        let mut config = ChartConfig::defaults(ChartKind::Scatter);
        config.source = DataSource::Inline("total_bill,tip\n".to_string());
        let mut chart = Chart::new(config);
        chart.mount().unwrap();
        assert_eq!(chart.state(), ChartState::AwaitingData);

        let mut surface = Surface::new(600, 400);
        chart.render(&mut surface).unwrap();
        assert!(surface.is_blank());
    }

    #[test]
    fn test_render_before_mount_is_noop() {
        let chart = chart(ChartKind::Bar);
        let mut surface = Surface::new(600, 400);
        chart.render(&mut surface).unwrap();
        assert!(surface.is_blank());
    }

    #[test]
    fn test_empty_replacement_blanks_ready_chart() {
        let mut chart = chart(ChartKind::Bar);
        chart.mount().unwrap();
        let mut surface = Surface::new(600, 400);
        chart.render(&mut surface).unwrap();
        assert_eq!(surface.mark_count(), 2);

        chart.set_data(&PlotData::new(vec!["day".into(), "tip".into()], Vec::new()));
        assert_eq!(chart.state(), ChartState::Ready);
        chart.render(&mut surface).unwrap();
        assert!(surface.is_blank());
    }

    #[test]
    fn test_resize_redraws_at_new_size() {
        let mut chart = chart(ChartKind::Bar);
        chart.mount().unwrap();
        chart.resize(800, 500);

        let mut surface = Surface::new(600, 400);
        chart.render(&mut surface).unwrap();
        assert_eq!((surface.width(), surface.height()), (800, 500));
        assert_eq!(surface.mark_count(), 2);
    }

    #[test]
    fn test_load_failure_is_reported() {
        let mut config = ChartConfig::defaults(ChartKind::Scatter);
        config.source = DataSource::Path("missing/tips.csv".into());
        let mut chart = Chart::new(config);
        assert!(chart.mount().is_err());
        assert_eq!(chart.state(), ChartState::AwaitingData);
    }
}
