//! Chart configuration.
//!
//! Every chart kind has a complete set of defaults reproducing the classic
//! tips charts. A JSON config file can override any of them, and command-line
//! flags override the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::csv_reader::{DataSource, DEFAULT_SOURCE};
use crate::ir::{ChartLayout, Labels, Margin};
use crate::parser::parse_color;
use crate::OutputFormat;

pub const DEFAULT_WIDTH: u32 = 600;
pub const DEFAULT_HEIGHT: u32 = 400;
pub const DEFAULT_FILL: &str = "#69b3a2";
pub const POINT_RADIUS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Scatter,
    Bar,
}

impl ChartKind {
    pub fn margin(&self) -> Margin {
        match self {
            ChartKind::Scatter => Margin::new(40.0, 30.0, 40.0, 50.0),
            ChartKind::Bar => Margin::new(40.0, 30.0, 50.0, 50.0),
        }
    }
}

/// Optional overrides as they appear in a config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub source: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Scatter x column or bar grouping column
    pub x: Option<String>,
    /// Scatter y column or bar value column
    pub y: Option<String>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub fill: Option<String>,
    /// Output encoding, `svg` or `png`
    #[serde(rename = "type")]
    pub format: Option<OutputFormat>,
}

impl ConfigFile {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse chart config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    /// Fields set in `other` win
    pub fn merge(self, other: ConfigFile) -> ConfigFile {
        ConfigFile {
            source: other.source.or(self.source),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            x: other.x.or(self.x),
            y: other.y.or(self.y),
            title: other.title.or(self.title),
            x_label: other.x_label.or(self.x_label),
            y_label: other.y_label.or(self.y_label),
            fill: other.fill.or(self.fill),
            format: other.format.or(self.format),
        }
    }
}

/// Fully resolved configuration for one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub source: DataSource,
    pub width: u32,
    pub height: u32,
    pub x_col: String,
    pub y_col: String,
    pub labels: Labels,
    pub fill: String,
}

impl ChartConfig {
    pub fn defaults(kind: ChartKind) -> Self {
        let (x_col, y_col, labels) = match kind {
            ChartKind::Scatter => (
                "total_bill",
                "tip",
                Labels {
                    title: "Scatter Plot: Total Bill vs Tip".to_string(),
                    x: "Total Bill".to_string(),
                    y: "Tip".to_string(),
                },
            ),
            ChartKind::Bar => (
                "day",
                "tip",
                Labels {
                    title: "Bar Chart: Average Tip per Day".to_string(),
                    x: "Day".to_string(),
                    y: "Average Tip".to_string(),
                },
            ),
        };

        Self {
            kind,
            source: DataSource::from_arg(DEFAULT_SOURCE),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x_col: x_col.to_string(),
            y_col: y_col.to_string(),
            labels,
            fill: DEFAULT_FILL.to_string(),
        }
    }

    pub fn with_overrides(mut self, file: ConfigFile) -> Self {
        if let Some(source) = file.source {
            self.source = DataSource::from_arg(&source);
        }
        if let Some(width) = file.width {
            self.width = width;
        }
        if let Some(height) = file.height {
            self.height = height;
        }
        if let Some(x) = file.x {
            self.x_col = x;
        }
        if let Some(y) = file.y {
            self.y_col = y;
        }
        if let Some(title) = file.title {
            self.labels.title = title;
        }
        if let Some(x_label) = file.x_label {
            self.labels.x = x_label;
        }
        if let Some(y_label) = file.y_label {
            self.labels.y = y_label;
        }
        if let Some(fill) = file.fill {
            self.fill = fill;
        }
        self
    }

    /// Resolve styling into the compiler's layout description
    pub fn layout(&self) -> Result<ChartLayout> {
        let fill = parse_color(&self.fill).context("Invalid fill color in chart config")?;
        Ok(ChartLayout {
            width: self.width,
            height: self.height,
            margin: self.kind.margin(),
            labels: self.labels.clone(),
            fill,
            point_radius: POINT_RADIUS,
        })
    }
}
