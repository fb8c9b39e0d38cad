use crate::ir::{Aggregate, ChartLayout, Point};

/// Default tick count for continuous axes
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Padding fraction between (and around) bands
pub const BAND_PADDING: f64 = 0.2;

/// Continuous mapping from a numeric domain onto a pixel range. Unclamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value to the range.
    /// A zero-width domain maps to the middle of the range; a NaN domain maps to NaN.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;

        let t = if span.is_nan() {
            f64::NAN
        } else if span == 0.0 {
            0.5
        } else {
            (value - d0) / span
        };

        r0 + (r1 - r0) * t
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Tick labels with precision derived from the tick step
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let step = tick_step(self.domain.0, self.domain.1, count);
        self.ticks(count)
            .into_iter()
            .map(|t| (t, format_tick(t, step)))
            .collect()
    }
}

/// Discrete mapping from ordered categories onto evenly spaced bands
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    pub domain: Vec<String>,
    pub range: (f64, f64),
    pub padding_inner: f64,
    pub padding_outer: f64,
    pub align: f64,
}

impl BandScale {
    /// Duplicate keys are dropped, keeping first-seen order
    pub fn new<I, S>(keys: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut domain: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into();
            if !domain.contains(&key) {
                domain.push(key);
            }
        }

        Self {
            domain,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    /// Set inner and outer padding together
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding;
        self
    }

    pub fn align(mut self, align: f64) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self
    }

    /// Returns (band start of the first key, step between keys)
    fn layout(&self) -> (f64, f64) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };

        let step = (stop - start) / f64::max(1.0, n - self.padding_inner + self.padding_outer * 2.0);
        let start = start + (stop - start - step * (n - self.padding_inner)) * self.align;
        (start, step)
    }

    pub fn step(&self) -> f64 {
        self.layout().1
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Band start for `key`, `None` for keys outside the domain
    pub fn map(&self, key: &str) -> Option<f64> {
        let idx = self.domain.iter().position(|k| k == key)?;
        let (start, step) = self.layout();
        let n = self.domain.len();
        let slot = if self.range.1 < self.range.0 { n - 1 - idx } else { idx };
        Some(start + step * slot as f64)
    }
}

/// Maximum ignoring NaN; `None` if nothing is comparable
pub fn nan_max<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
}

/// Scale pair for a scatter plot: both axes start at zero and end at the data maximum.
pub fn build_scatter_scales(points: &[Point], layout: &ChartLayout) -> (LinearScale, LinearScale) {
    let x_max = nan_max(points.iter().map(|p| p.x)).unwrap_or(f64::NAN);
    let y_max = nan_max(points.iter().map(|p| p.y)).unwrap_or(f64::NAN);

    (
        LinearScale::new((0.0, x_max), (0.0, layout.chart_width())),
        LinearScale::new((0.0, y_max), (layout.chart_height(), 0.0)),
    )
}

/// Scale pair for a bar chart: padded bands across, zero-based values up.
pub fn build_bar_scales(aggregates: &[Aggregate], layout: &ChartLayout) -> (BandScale, LinearScale) {
    let x = BandScale::new(aggregates.iter().map(|a| a.key.as_str()), (0.0, layout.chart_width()))
        .padding(BAND_PADDING);
    let y_max = nan_max(aggregates.iter().map(|a| a.value)).unwrap_or(f64::NAN);

    (x, LinearScale::new((0.0, y_max), (layout.chart_height(), 0.0)))
}

// =============================================================================
// Ticks
// =============================================================================

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Half-up rounding, matching the tick generator the axes were designed against
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// (first index, last index, increment). A negative increment means "divide by -inc".
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * inv);
        i2 = round_half_up(stop * inv);
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = round_half_up(start / inc);
        i2 = round_half_up(stop / inc);
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Nice, evenly spaced values covering [start, stop] (in either order).
/// Empty for non-finite bounds or a zero count.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let value = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    (0..n)
        .map(|k| {
            let k = k as f64;
            if reverse { value(i2 - k) } else { value(i1 + k) }
        })
        .collect()
}

/// Distance between adjacent ticks for the given bounds
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return f64::NAN;
    }
    let reverse = stop < start;
    let (_, _, inc) = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// Fixed-point label with digit grouping and a typographic minus
pub fn format_tick(value: f64, step: f64) -> String {
    let precision = if step.is_finite() && step != 0.0 {
        (-step.abs().log10().floor()).max(0.0) as usize
    } else {
        0
    };

    let text = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = text.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("\u{2212}{}", grouped)
    } else {
        grouped
    }
}
