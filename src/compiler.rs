use crate::ir::{
    Aggregate, ChartLayout, DrawCommand, Point, SceneGraph, TextAnchor, TextBaseline, TextStyle,
};
use crate::scale::{build_bar_scales, build_scatter_scales, BandScale, LinearScale, DEFAULT_TICK_COUNT};
use plotters::style::RGBColor;

const AXIS_COLOR: RGBColor = RGBColor(0, 0, 0);
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const TICK_FONT_SIZE: f64 = 10.0;
const LABEL_FONT_SIZE: f64 = 16.0;

// =============================================================================
// Chart compilation
// =============================================================================

/// Compile a scatter plot. No data compiles to an empty scene.
pub fn compile_scatter(points: &[Point], layout: &ChartLayout) -> SceneGraph {
    if points.is_empty() {
        return SceneGraph::empty(layout.width, layout.height);
    }

    let (x_scale, y_scale) = build_scatter_scales(points, layout);
    let mut builder = SceneBuilder::new(layout);

    builder.bottom_axis(x_scale.range, linear_ticks(&x_scale));
    builder.left_axis(y_scale.range, linear_ticks(&y_scale));

    for p in points {
        let center = builder.at(x_scale.map(p.x), y_scale.map(p.y));
        builder.push(DrawCommand::Circle {
            center,
            radius: layout.point_radius,
            fill: layout.fill,
        });
    }

    builder.labels();
    builder.finish()
}

/// Compile a bar chart. No data compiles to an empty scene.
pub fn compile_bar(aggregates: &[Aggregate], layout: &ChartLayout) -> SceneGraph {
    if aggregates.is_empty() {
        return SceneGraph::empty(layout.width, layout.height);
    }

    let (x_scale, y_scale) = build_bar_scales(aggregates, layout);
    let mut builder = SceneBuilder::new(layout);

    builder.bottom_axis(x_scale.range, band_ticks(&x_scale));
    builder.left_axis(y_scale.range, linear_ticks(&y_scale));

    let chart_height = layout.chart_height();
    let bandwidth = x_scale.bandwidth();
    for agg in aggregates {
        let x = x_scale.map(&agg.key).unwrap_or(f64::NAN);
        let y = y_scale.map(agg.value);
        let height = chart_height - y;
        let (tl, br) = (builder.at(x, y), builder.at(x + bandwidth, y + height));
        builder.push(DrawCommand::Rect { tl, br, fill: layout.fill });
    }

    builder.labels();
    builder.finish()
}

fn linear_ticks(scale: &LinearScale) -> Vec<(f64, String)> {
    scale
        .tick_labels(DEFAULT_TICK_COUNT)
        .into_iter()
        .map(|(v, label)| (scale.map(v), label))
        .collect()
}

/// Band axes tick each category at its band centre
fn band_ticks(scale: &BandScale) -> Vec<(f64, String)> {
    let offset = scale.bandwidth() / 2.0;
    scale
        .domain
        .iter()
        .filter_map(|key| scale.map(key).map(|start| (start + offset, key.clone())))
        .collect()
}

// =============================================================================
// Scene assembly
// =============================================================================

/// Accumulates commands, translating plot-area coordinates by the margin
struct SceneBuilder<'a> {
    layout: &'a ChartLayout,
    commands: Vec<DrawCommand>,
}

impl<'a> SceneBuilder<'a> {
    fn new(layout: &'a ChartLayout) -> Self {
        Self { layout, commands: Vec::new() }
    }

    /// Plot-area position to surface position
    fn at(&self, x: f64, y: f64) -> (f64, f64) {
        (x + self.layout.margin.left, y + self.layout.margin.top)
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64)) {
        let command = DrawCommand::Line {
            from: self.at(from.0, from.1),
            to: self.at(to.0, to.1),
            color: AXIS_COLOR,
        };
        self.push(command);
    }

    fn tick_label(&mut self, text: String, pos: (f64, f64), anchor: TextAnchor, baseline: TextBaseline) {
        let command = DrawCommand::Text {
            text,
            pos: self.at(pos.0, pos.1),
            style: TextStyle {
                size: TICK_FONT_SIZE,
                bold: false,
                anchor,
                baseline,
                vertical: false,
            },
        };
        self.push(command);
    }

    /// Horizontal axis along the bottom of the plot area, ticks pointing down
    fn bottom_axis(&mut self, range: (f64, f64), ticks: Vec<(f64, String)>) {
        let y = self.layout.chart_height();
        let (r0, r1) = range;

        // Domain path with outer ticks at both ends
        self.line((r0, y + TICK_SIZE), (r0, y));
        self.line((r0, y), (r1, y));
        self.line((r1, y), (r1, y + TICK_SIZE));

        for (x, label) in ticks {
            self.line((x, y), (x, y + TICK_SIZE));
            self.tick_label(label, (x, y + TICK_SIZE + TICK_PADDING), TextAnchor::Middle, TextBaseline::Hanging);
        }
    }

    /// Vertical axis along the left of the plot area, ticks pointing left
    fn left_axis(&mut self, range: (f64, f64), ticks: Vec<(f64, String)>) {
        let (r0, r1) = range;

        self.line((-TICK_SIZE, r0), (0.0, r0));
        self.line((0.0, r0), (0.0, r1));
        self.line((0.0, r1), (-TICK_SIZE, r1));

        for (y, label) in ticks {
            self.line((0.0, y), (-TICK_SIZE, y));
            self.tick_label(label, (-TICK_SIZE - TICK_PADDING, y), TextAnchor::End, TextBaseline::Middle);
        }
    }

    /// x-axis title, y-axis title and chart title, in surface coordinates
    fn labels(&mut self) {
        let width = self.layout.width as f64;
        let height = self.layout.height as f64;
        let labels = self.layout.labels.clone();

        let plain = TextStyle {
            size: LABEL_FONT_SIZE,
            bold: false,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Alphabetic,
            vertical: false,
        };

        self.push(DrawCommand::Text {
            text: labels.x,
            pos: (width / 2.0, height - 5.0),
            style: plain.clone(),
        });
        self.push(DrawCommand::Text {
            text: labels.y,
            pos: (15.0, height / 2.0),
            style: TextStyle { vertical: true, ..plain.clone() },
        });
        self.push(DrawCommand::Text {
            text: labels.title,
            pos: (
                self.layout.chart_width() / 2.0 + self.layout.margin.left,
                self.layout.margin.top / 2.0,
            ),
            style: TextStyle { bold: true, ..plain },
        });
    }

    fn finish(self) -> SceneGraph {
        SceneGraph {
            width: self.layout.width,
            height: self.layout.height,
            commands: self.commands,
        }
    }
}
