use plotters::style::RGBColor;

// =============================================================================
// Aggregated data
// =============================================================================

/// Scatter-plot input: one numeric pair per source row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Bar-chart input: one category with the mean of its values
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub key: String,
    pub value: f64,
}

/// The aggregated sequence a chart draws from
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Points(Vec<Point>),
    Aggregates(Vec<Aggregate>),
}

impl Dataset {
    pub fn len(&self) -> usize {
        match self {
            Dataset::Points(p) => p.len(),
            Dataset::Aggregates(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Layout
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }
}

/// Fixed-position text labels around the plot area
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    pub title: String,
    pub x: String,
    pub y: String,
}

/// Everything the compiler needs besides the data
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub labels: Labels,
    pub fill: RGBColor,
    pub point_radius: f64,
}

impl ChartLayout {
    pub fn chart_width(&self) -> f64 {
        self.width as f64 - self.margin.left - self.margin.right
    }

    pub fn chart_height(&self) -> f64 {
        self.height as f64 - self.margin.top - self.margin.bottom
    }
}

// =============================================================================
// Scene graph
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    /// Text hangs below the anchor point
    Hanging,
    Middle,
    Alphabetic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
    /// Rotated -90 degrees around the anchor point
    pub vertical: bool,
}

/// A primitive drawing command in surface pixel coordinates.
/// The backend executes these blindly.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: RGBColor,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        fill: RGBColor,
    },
    Rect {
        // Top-Left, Bottom-Right
        tl: (f64, f64),
        br: (f64, f64),
        fill: RGBColor,
    },
    Text {
        text: String,
        pos: (f64, f64),
        style: TextStyle,
    },
}

impl DrawCommand {
    /// Circles and rectangles represent data items
    pub fn is_mark(&self) -> bool {
        matches!(self, DrawCommand::Circle { .. } | DrawCommand::Rect { .. })
    }
}

/// The output of one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl SceneGraph {
    pub fn empty(width: u32, height: u32) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn mark_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_mark()).count()
    }
}
