use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Title used in the filename when the table has none
pub const DEFAULT_EXPORT_TITLE: &str = "dados";

/// A finished CSV document, ready to be saved or handed to a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    /// Data lines, not counting the header
    pub row_count: usize,
}

impl CsvExport {
    /// Write the document into `dir` under its own filename
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create export directory {:?}", dir))?;
        }

        let path = dir.join(&self.filename);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write export file {:?}", path))?;

        info!(target: "export", "Exported {} rows to {:?}", self.row_count, path);
        Ok(path)
    }
}

/// `<title>_<YYYY-MM-DD>.csv`, falling back to "dados" for a missing or blank title
pub fn export_filename(title: Option<&str>, date: NaiveDate) -> String {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_EXPORT_TITLE);
    format!("{}_{}.csv", title, date.format("%Y-%m-%d"))
}

/// Serialize a header line plus data lines as RFC 4180 CSV.
/// Fields containing commas, quotes or newlines are quoted.
pub fn build_csv<I>(headers: &[String], rows: I) -> Result<(String, usize)>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(headers)?;

    let mut row_count = 0;
    for row in rows {
        writer.write_record(&row)?;
        row_count += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to finish CSV export: {}", e))?;
    let content = String::from_utf8(bytes).context("CSV export produced invalid UTF-8")?;

    Ok((content, row_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename(Some("Funcionários"), date()),
            "Funcionários_2024-05-17.csv"
        );
        assert_eq!(export_filename(None, date()), "dados_2024-05-17.csv");
        assert_eq!(export_filename(Some("  "), date()), "dados_2024-05-17.csv");
    }

    #[test]
    fn test_build_csv_quotes_special_fields() {
        let headers = vec!["Nome".to_string(), "Obs".to_string()];
        let rows = vec![
            vec!["Ana, Maria".to_string(), "disse \"oi\"".to_string()],
            vec!["Bob".to_string(), "linha1\nlinha2".to_string()],
        ];
        let (content, count) = build_csv(&headers, rows).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            content,
            "Nome,Obs\n\"Ana, Maria\",\"disse \"\"oi\"\"\"\nBob,\"linha1\nlinha2\"\n"
        );
    }

    #[test]
    fn test_header_only_when_no_rows() {
        let headers = vec!["Nome".to_string()];
        let (content, count) = build_csv(&headers, Vec::new()).unwrap();
        assert_eq!(count, 0);
        assert_eq!(content, "Nome\n");
    }

    #[test]
    fn test_write_to_dir() {
        let dir = TempDir::new().unwrap();
        let export = CsvExport {
            filename: export_filename(Some("beneficios"), date()),
            content: "Nome\nAna\n".to_string(),
            row_count: 1,
        };

        let path = export.write_to_dir(dir.path().join("out")).unwrap();

        assert!(path.ends_with("beneficios_2024-05-17.csv"));
        assert_eq!(fs::read_to_string(path).unwrap(), "Nome\nAna\n");
    }
}
