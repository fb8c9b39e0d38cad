use anyhow::{anyhow, Result};
use serde_json::Value;

/// Raw tabular data: a header row plus string-valued records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Borrowed view of one record, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    fields: &'a [String],
}

impl<'a> Row<'a> {
    /// Field value for `column`, or `None` when the header has no such column.
    ///
    /// Short records read as empty strings for their missing trailing fields.
    /// A repeated header name resolves to its last occurrence.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.headers.iter().rposition(|h| h == column)?;
        Some(self.fields.get(idx).map_or("", String::as_str))
    }
}

impl PlotData {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Iterate records as name-addressable rows
    pub fn iter_rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |fields| Row {
            headers: &self.headers,
            fields,
        })
    }

    /// Create PlotData from a JSON Array of Objects
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value.as_array().ok_or_else(||
            anyhow!("Input data must be a JSON array of objects")
        )?;

        if array.is_empty() {
            return Ok(Self::default());
        }

        // Headers come from the first object
        let first_obj = array[0].as_object().ok_or_else(||
            anyhow!("Items in array must be objects")
        )?;

        let headers: Vec<String> = first_obj.keys().cloned().collect();

        let mut rows = Vec::with_capacity(array.len());
        for item in array {
            let obj = item.as_object().ok_or_else(||
                anyhow!("Items in array must be objects")
            )?;

            let mut row = Vec::with_capacity(headers.len());
            for header in &headers {
                let val_str = match obj.get(header) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::Bool(b)) => b.to_string(),
                    Some(Value::Null) | None => String::new(),
                    _ => return Err(anyhow!("Unsupported value type for field '{}'", header)),
                };
                row.push(val_str);
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_lookup_by_name() {
        let data = PlotData::new(
            vec!["total_bill".to_string(), "tip".to_string()],
            vec![vec!["10".to_string(), "2".to_string()], vec!["20".to_string()]],
        );
        let rows: Vec<Row> = data.iter_rows().collect();
        assert_eq!(rows[0].get("tip"), Some("2"));
        assert_eq!(rows[1].get("total_bill"), Some("20"));
        assert_eq!(rows[1].get("tip"), Some(""));
        assert_eq!(rows[0].get("day"), None);
    }

    #[test]
    fn test_repeated_header_last_wins() {
        let data = PlotData::new(
            vec!["tip".to_string(), "day".to_string(), "tip".to_string()],
            vec![vec!["1".to_string(), "Sun".to_string(), "5".to_string()]],
        );
        let row = data.iter_rows().next().unwrap();
        assert_eq!(row.get("tip"), Some("5"));
    }

    #[test]
    fn test_from_json() {
        let value = json!([
            {"day": "Sun", "tip": 1.5},
            {"day": "Sat", "tip": null},
        ]);
        let data = PlotData::from_json(&value).unwrap();
        assert_eq!(data.len(), 2);
        assert!(data.has_column("day"));
        let tips: Vec<_> = data.iter_rows().map(|r| r.get("tip").unwrap().to_string()).collect();
        assert_eq!(tips, vec!["1.5", ""]);
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        assert!(PlotData::from_json(&json!({"day": "Sun"})).is_err());
    }

    #[test]
    fn test_from_json_empty_array() {
        let data = PlotData::from_json(&json!([])).unwrap();
        assert!(data.is_empty());
    }
}
