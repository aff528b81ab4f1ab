use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Settings read from `config.toml` in the platform config directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    pub log_filter: Option<String>,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub fiscal_year: i32,
    pub title_prefix: String,
    pub pdf: PdfLayoutConfig,
    pub signature: SignatureConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fiscal_year: 2025,
            title_prefix: "RINCIAN KERTAS KERJA SATKER".to_string(),
            pdf: PdfLayoutConfig::default(),
            signature: SignatureConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Title line shared by the detail and summary PDFs.
    pub fn document_title(&self, sheet_name: &str) -> String {
        format!(
            "{} T.A. {} ({sheet_name})",
            self.title_prefix, self.fiscal_year
        )
    }

    pub fn dashboard_title(&self) -> String {
        format!("Dashboard Data Anggaran TA {}", self.fiscal_year)
    }
}

/// Page margins in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfLayoutConfig {
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    pub margin_top_mm: f32,
    /// Larger than the others so the footer and signature have room.
    pub margin_bottom_mm: f32,
}

impl Default for PdfLayoutConfig {
    fn default() -> Self {
        Self {
            margin_left_mm: 12.0,
            margin_right_mm: 12.0,
            margin_top_mm: 12.0,
            margin_bottom_mm: 18.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Initial state of the signature toggle in the sidebar.
    pub enabled: bool,
    pub place: String,
    /// ISO `YYYY-MM-DD`; today's date when absent.
    pub date: Option<String>,
    pub titles: [String; 2],
    pub name: String,
    pub caret_indent_mm: f32,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            place: "Lhokseumawe".to_string(),
            date: Some("2025-10-03".to_string()),
            titles: [
                "Wakil Rektor II".to_string(),
                "Bidang Administrasi Umum, Perencanaan, dan Keuangan".to_string(),
            ],
            name: "SAID ALWI".to_string(),
            caret_indent_mm: 6.0,
        }
    }
}

impl SignatureConfig {
    pub fn signing_date(&self, today: NaiveDate) -> NaiveDate {
        self.date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
            .unwrap_or(today)
    }

    /// The nine-line block: place and date, two titles, blank space for the
    /// signature around a caret marker, then the signer's name.
    pub fn lines(&self, today: NaiveDate) -> Vec<String> {
        let date = self.signing_date(today);
        vec![
            format!("{}, {}", self.place, format_date_id(date)),
            self.titles[0].clone(),
            self.titles[1].clone(),
            String::new(),
            String::new(),
            "^".to_string(),
            String::new(),
            String::new(),
            self.name.clone(),
        ]
    }

    pub fn lines_for_today(&self) -> Vec<String> {
        self.lines(Local::now().date_naive())
    }
}

pub fn format_date_id(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS_ID[date.month0() as usize],
        date.year()
    )
}

pub fn default_config_path() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("id", "anggaran", "anggaran")
        .ok_or_else(|| anyhow!("unable to resolve config directory"))?;
    Ok(project_dirs.config_dir().join("config.toml"))
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_test_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("anggaran-{prefix}-{nanos}"))
    }

    #[test]
    fn signature_block_has_nine_lines() {
        let config = SignatureConfig::default();
        let today = NaiveDate::from_ymd_opt(2030, 1, 1).expect("valid date");

        let lines = config.lines(today);

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "Lhokseumawe, 03 Oktober 2025");
        assert_eq!(lines[5], "^");
        assert_eq!(lines[8], "SAID ALWI");
    }

    #[test]
    fn missing_date_uses_today() {
        let config = SignatureConfig {
            date: None,
            place: "Banda Aceh".to_string(),
            ..SignatureConfig::default()
        };
        let today = NaiveDate::from_ymd_opt(2026, 5, 7).expect("valid date");

        assert_eq!(config.lines(today)[0], "Banda Aceh, 07 Mei 2026");
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let temp_dir = unique_test_dir("config");
        fs::create_dir_all(&temp_dir).expect("should create temp dir");
        let path = temp_dir.join("config.toml");
        fs::write(
            &path,
            "[report]\nfiscal_year = 2026\n\n[report.signature]\nname = \"BUDI\"\n",
        )
        .expect("should write config fixture");

        let config = load_config_from(&path).expect("config should parse");

        assert_eq!(config.report.fiscal_year, 2026);
        assert_eq!(config.report.signature.name, "BUDI");
        assert_eq!(config.report.signature.place, "Lhokseumawe");
        assert_eq!(config.report.pdf.margin_bottom_mm, 18.0);
        assert_eq!(
            config.report.document_title("Sheet1"),
            "RINCIAN KERTAS KERJA SATKER T.A. 2026 (Sheet1)"
        );

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn absent_config_file_is_default() {
        let path = unique_test_dir("config-missing").join("config.toml");
        let config = load_config_from(&path).expect("missing file is not an error");
        assert_eq!(config, AppConfig::default());
    }
}
