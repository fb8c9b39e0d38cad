// Row loading for chart data sources: CSV, or JSON arrays of objects

use crate::data::PlotData;
use anyhow::{Context, Result};
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Resource the original charts fetched implicitly
pub const DEFAULT_SOURCE: &str = "tips.csv";

/// Where a chart's rows come from
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Path(PathBuf),
    Stdin,
    Inline(String),
}

impl DataSource {
    /// `-` selects stdin, anything else is a file path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            DataSource::Stdin
        } else {
            DataSource::Path(PathBuf::from(arg))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Path(PathBuf::from(DEFAULT_SOURCE))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Stdin => write!(f, "<stdin>"),
            DataSource::Inline(_) => write!(f, "<inline>"),
        }
    }
}

/// Load rows from `source`. Files ending in `.json` hold an array of objects,
/// everything else is CSV.
pub fn read_source(source: &DataSource) -> Result<PlotData> {
    match source {
        DataSource::Path(path) if is_json(path) => read_json(path),
        _ => read_csv(source),
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

fn read_json(path: &Path) -> Result<PlotData> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open data source '{}'", path.display()))?;
    let data = read_json_from(file)
        .with_context(|| format!("Failed to read JSON rows from {}", path.display()))?;

    debug!("loaded {} rows with columns {:?} from {}", data.rows.len(), data.headers, path.display());
    Ok(data)
}

/// Parse a JSON array of objects from any reader
pub fn read_json_from<R: Read>(reader: R) -> Result<PlotData> {
    let value: serde_json::Value = serde_json::from_reader(reader).context("Failed to parse JSON")?;
    PlotData::from_json(&value)
}

/// Read every CSV record from `source`
pub fn read_csv(source: &DataSource) -> Result<PlotData> {
    let data = match source {
        DataSource::Path(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open data source '{}'", path.display()))?;
            read_csv_from(file)
        }
        DataSource::Stdin => read_csv_from(io::stdin().lock()),
        DataSource::Inline(text) => read_csv_from(text.as_bytes()),
    }
    .with_context(|| format!("Failed to read CSV from {}", source))?;

    debug!(
        "loaded {} rows with columns {:?} from {}",
        data.rows.len(),
        data.headers,
        source
    );
    Ok(data)
}

/// Parse CSV text from any reader. The first record is the header.
pub fn read_csv_from<R: Read>(reader: R) -> Result<PlotData> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV record {}", idx + 1))?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(PlotData::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_inline() {
        let source = DataSource::Inline("total_bill,tip,day\n16.99,1.01,Sun\n10.34,1.66,Sun\n".to_string());
        let data = read_csv(&source).unwrap();
        assert_eq!(data.headers, vec!["total_bill", "tip", "day"]);
        assert_eq!(data.len(), 2);
        assert_eq!(data.rows[1][1], "1.66");
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let data = read_csv_from("a,b\n1\n2,3,4\n".as_bytes()).unwrap();
        assert_eq!(data.rows, vec![vec!["1".to_string()], vec!["2".to_string(), "3".to_string(), "4".to_string()]]);
    }

    #[test]
    fn test_header_only() {
        let data = read_csv_from("x,y\n".as_bytes()).unwrap();
        assert!(data.is_empty());
        assert_eq!(data.headers.len(), 2);
    }

    #[test]
    fn test_missing_file_names_source() {
        let source = DataSource::Path(PathBuf::from("definitely/not/here.csv"));
        let err = read_csv(&source).unwrap_err();
        assert!(format!("{:#}", err).contains("definitely/not/here.csv"));
    }

    #[test]
    fn test_json_source() {
        let path = std::env::temp_dir().join(format!("tipcharts-rows-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"day": "Sun", "tip": 2}, {"day": "Sat", "tip": "3.5"}]"#).unwrap();
        let data = read_source(&DataSource::Path(path.clone())).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(data.len(), 2);
        let tips: Vec<_> = data.iter_rows().map(|r| r.get("tip").unwrap().to_string()).collect();
        assert_eq!(tips, vec!["2", "3.5"]);
    }

    #[test]
    fn test_csv_source_ignores_json_reader() {
        let data = read_source(&DataSource::Inline("day,tip\nSun,1\n".to_string())).unwrap();
        assert_eq!(data.headers, vec!["day", "tip"]);
    }

    #[test]
    fn test_bad_json_rows() {
        assert!(read_json_from(r#"{"day": "Sun"}"#.as_bytes()).is_err());
        assert!(read_json_from("day,tip".as_bytes()).is_err());
    }

    #[test]
    fn test_source_from_arg() {
        assert_eq!(DataSource::from_arg("-"), DataSource::Stdin);
        assert_eq!(DataSource::from_arg("tips.csv"), DataSource::default());
    }
}
