use serde::Deserialize;

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD: &str = "file";

/// Columns the import endpoint expects, in file order.
pub const EXPECTED_COLUMNS: [&str; 10] = [
    "mark",
    "model",
    "generation_name",
    "year",
    "mileage",
    "vol_engine",
    "fuel",
    "city",
    "province",
    "price",
];

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Plik został pomyślnie przesłany i przetworzony!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvFileError {
    Missing,
    NotCsv,
}

impl CsvFileError {
    pub fn message(&self) -> &'static str {
        match self {
            CsvFileError::Missing => "Proszę najpierw wybrać plik.",
            CsvFileError::NotCsv => "Proszę wybrać plik CSV.",
        }
    }
}

/// Only the name is checked; the server parses the content.
pub fn validate_csv_file_name(name: Option<&str>) -> Result<(), CsvFileError> {
    match name {
        None => Err(CsvFileError::Missing),
        Some(name) if name.ends_with(".csv") => Ok(()),
        Some(_) => Err(CsvFileError::NotCsv),
    }
}

/// `round(loaded * 100 / total)` clamped to 0..=100. Unknown total reports 0.
pub fn upload_percent(loaded: f64, total: f64) -> u8 {
    if !(total > 0.0) || !loaded.is_finite() {
        return 0;
    }
    (loaded * 100.0 / total).round().clamp(0.0, 100.0) as u8
}

/// Successful import response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl ImportResponse {
    pub fn display_message(&self) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_SUCCESS_MESSAGE)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_checks() {
        assert_eq!(validate_csv_file_name(None), Err(CsvFileError::Missing));
        assert_eq!(validate_csv_file_name(Some("cars.xlsx")), Err(CsvFileError::NotCsv));
        assert_eq!(validate_csv_file_name(Some("cars.csv")), Ok(()));
    }

    #[test]
    fn percent_is_rounded_and_clamped() {
        assert_eq!(upload_percent(0.0, 0.0), 0);
        assert_eq!(upload_percent(50.0, 0.0), 0);
        assert_eq!(upload_percent(1.0, 3.0), 33);
        assert_eq!(upload_percent(2.0, 3.0), 67);
        assert_eq!(upload_percent(150.0, 100.0), 100);
        assert_eq!(upload_percent(-5.0, 100.0), 0);
        assert_eq!(upload_percent(f64::NAN, 100.0), 0);
    }

    #[test]
    fn server_message_wins_over_default() {
        let resp: ImportResponse = serde_json::from_str(r#"{"message": "Dodano 10 rekordów"}"#).unwrap();
        assert_eq!(resp.display_message(), "Dodano 10 rekordów");
        assert_eq!(ImportResponse::default().display_message(), DEFAULT_SUCCESS_MESSAGE);
    }
}
