use serde::Deserialize;

/// Values offered by the mark and fuel filter dropdowns (`/distinct/`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DistinctValues {
    #[serde(default)]
    pub marks: Vec<String>,
    #[serde(default)]
    pub fuels: Vec<String>,
}

impl DistinctValues {
    /// Sorted, de-duplicated, without blank entries.
    pub fn normalized(self) -> Self {
        Self {
            marks: normalize(self.marks),
            fuels: normalize(self.fuels),
        }
    }
}

fn normalize(values: Vec<String>) -> Vec<String> {
    let mut values: Vec<String> = values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_lists() {
        let raw: DistinctValues = serde_json::from_str(
            r#"{"marks": ["volvo", "audi", " ", "volvo", "bmw "], "fuels": []}"#,
        )
        .unwrap();
        let values = raw.normalized();
        assert_eq!(values.marks, vec!["audi", "bmw", "volvo"]);
        assert!(values.fuels.is_empty());
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let raw: DistinctValues = serde_json::from_str("{}").unwrap();
        assert_eq!(raw.normalized(), DistinctValues::default());
    }
}
