// Library exports for tipcharts

pub mod component;
pub mod compiler;
pub mod config;
pub mod csv_reader;
pub mod data;
pub mod graph;
pub mod ir;
pub mod parser;
pub mod runtime;
pub mod scale;
pub mod transform;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[serde(rename = "png")]
    Png,
    #[serde(rename = "svg")]
    #[default]
    Svg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_names() {
        let format: OutputFormat = serde_json::from_str(r#""png""#).unwrap();
        assert_eq!(format, OutputFormat::Png);
        assert_eq!(OutputFormat::default(), OutputFormat::Svg);
        assert!(serde_json::from_str::<OutputFormat>(r#""gif""#).is_err());
    }
}
