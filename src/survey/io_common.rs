// Shared helpers for the sheet providers.

use std::path::Path;

use calamine::DataType;

/// The lowercased file extension used to select the provider.
pub fn file_extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
}

/// Renders a spreadsheet cell to the string fed to the normalizer.
/// Integral floats lose the trailing ".0" so that xlsx and csv inputs
/// produce the same table.
pub fn render_cell(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::Empty => String::new(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_extension() {
        assert_eq!(file_extension("dir/pod5.XLSX"), Some("xlsx".to_string()));
        assert_eq!(file_extension("responses.csv"), Some("csv".to_string()));
        assert_eq!(file_extension("noext"), None);
    }

    #[test]
    fn integral_floats_render_like_csv_cells() {
        assert_eq!(render_cell(&DataType::Float(4.0)), "4");
        assert_eq!(render_cell(&DataType::Float(3.5)), "3.5");
        assert_eq!(render_cell(&DataType::Int(5)), "5");
        assert_eq!(render_cell(&DataType::String("T1".to_string())), "T1");
        assert_eq!(render_cell(&DataType::Empty), "");
    }
}
