use crate::data::PlotData;
use crate::ir::{Aggregate, Point};
use log::warn;
use std::collections::HashMap;

/// Scatter aggregation: cast two columns of every row to numbers
pub fn scatter_points(data: &PlotData, x_col: &str, y_col: &str) -> Vec<Point> {
    warn_missing(data, &[x_col, y_col]);

    data.iter_rows()
        .map(|row| Point {
            x: coerce_number(row.get(x_col)),
            y: coerce_number(row.get(y_col)),
        })
        .collect()
}

/// Bar aggregation: mean of `value_col` per distinct `key_col`, in first-seen key order
pub fn group_mean(data: &PlotData, key_col: &str, value_col: &str) -> Vec<Aggregate> {
    warn_missing(data, &[key_col, value_col]);

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();

    for row in data.iter_rows() {
        let key = row.get(key_col).unwrap_or("");
        let value = coerce_number(row.get(value_col));
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(value);
    }

    order
        .into_iter()
        .map(|key| Aggregate {
            key: key.to_string(),
            value: mean(groups.get(key).map(Vec::as_slice).unwrap_or(&[])),
        })
        .collect()
}

/// Arithmetic mean ignoring NaN. NaN when nothing is left to average.
pub fn mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Lenient string-to-number cast.
///
/// Blank strings are zero, absent columns and unparseable text are NaN.
/// Only decimal literals, `0x`/`0o`/`0b` integers and signed `Infinity` are accepted.
pub fn coerce_number(field: Option<&str>) -> f64 {
    let Some(raw) = field else {
        return f64::NAN;
    };

    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix_literal(text) {
        return value;
    }

    let is_decimal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    if !is_decimal {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let prefix = text.get(..2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let mut value = 0.0f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * radix as f64 + d as f64,
            None => return Some(f64::NAN),
        }
    }
    Some(value)
}

fn warn_missing(data: &PlotData, columns: &[&str]) {
    if data.is_empty() {
        return;
    }
    for column in columns {
        if !data.has_column(column) {
            warn!("column '{}' not found in data; its values are treated as NaN", column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> PlotData {
        PlotData::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|f| f.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_scatter_points_cast() {
        let data = table(&["total_bill", "tip"], &[&["10", "2"], &["20", "4"]]);
        let points = scatter_points(&data, "total_bill", "tip");
        assert_eq!(points, vec![Point { x: 10.0, y: 2.0 }, Point { x: 20.0, y: 4.0 }]);
    }

    #[test]
    fn test_scatter_points_keep_invalid_rows() {
        let data = table(&["total_bill", "tip"], &[&["abc", "2"], &["", " 3 "]]);
        let points = scatter_points(&data, "total_bill", "tip");
        assert_eq!(points.len(), 2);
        assert!(points[0].x.is_nan());
        assert_eq!(points[1], Point { x: 0.0, y: 3.0 });
    }

    #[test]
    fn test_scatter_missing_column_is_nan() {
        let data = table(&["a"], &[&["1"]]);
        let points = scatter_points(&data, "a", "tip");
        assert_eq!(points[0].x, 1.0);
        assert!(points[0].y.is_nan());
    }

    #[test]
    fn test_group_mean_first_seen_order() {
        let data = table(
            &["day", "tip"],
            &[&["Sun", "1"], &["Sat", "4"], &["Sun", "2"], &["Thur", "5"], &["Sun", "3"]],
        );
        let groups = group_mean(&data, "day", "tip");
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Sun", "Sat", "Thur"]);
        assert_eq!(groups[0].value, 2.0);
        assert_eq!(groups[1].value, 4.0);
    }

    #[test]
    fn test_group_keys_are_exhaustive_and_unique() {
        let data = table(
            &["day", "tip"],
            &[&["Fri", "1"], &["Fri", "1"], &["Sat", "1"], &["Fri", "1"], &["Sun", "1"]],
        );
        let groups = group_mean(&data, "day", "tip");
        let mut keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        keys.sort();
        assert_eq!(keys, vec!["Fri", "Sat", "Sun"]);
    }

    #[test]
    fn test_group_mean_skips_nan() {
        let data = table(&["day", "tip"], &[&["Sun", "2"], &["Sun", "oops"], &["Sat", "x"]]);
        let groups = group_mean(&data, "day", "tip");
        assert_eq!(groups[0].value, 2.0);
        assert!(groups[1].value.is_nan());
    }

    #[test]
    fn test_short_row_counts_as_zero() {
        let data = crate::csv_reader::read_csv_from("day,tip\nSun,2\nSun\n".as_bytes()).unwrap();
        let groups = group_mean(&data, "day", "tip");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].value, 1.0);

        let data = crate::csv_reader::read_csv_from("total_bill,tip\n10,2\n20\n".as_bytes()).unwrap();
        let points = scatter_points(&data, "total_bill", "tip");
        assert_eq!(points[1], Point { x: 20.0, y: 0.0 });
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(Some("16.99")), 16.99);
        assert_eq!(coerce_number(Some("  -2e1 ")), -20.0);
        assert_eq!(coerce_number(Some(".5")), 0.5);
        assert_eq!(coerce_number(Some("")), 0.0);
        assert_eq!(coerce_number(Some("0x1F")), 31.0);
        assert_eq!(coerce_number(Some("0b101")), 5.0);
        assert_eq!(coerce_number(Some("-Infinity")), f64::NEG_INFINITY);
        assert!(coerce_number(Some("inf")).is_nan());
        assert!(coerce_number(Some("NaN")).is_nan());
        assert!(coerce_number(Some("1,5")).is_nan());
        assert!(coerce_number(Some("0x")).is_nan());
        assert!(coerce_number(None).is_nan());
    }
}
