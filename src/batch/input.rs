//! # 批量输入读取
//!
//! 读取源列表 CSV，每行转换为一次模拟请求。
//! 无法转换的行保留为 `SourceEntry::Invalid`，不影响其他行。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `models/options.rs`
//! - 使用 `csv` + `serde` 反序列化

use crate::error::{PimmsError, Result};
use crate::models::options::DEFAULT_MODEL;
use crate::models::{EnergyRange, PimmsOptions};

use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// CSV 中的一行
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRow {
    pub name: Option<String>,
    pub flux: f64,
    pub model: Option<String>,
    pub mission: Option<String>,
    pub detector: Option<String>,
    pub filter: Option<String>,
    pub unabsorbed: Option<bool>,
    pub nh: Option<f64>,
    pub phoindex: Option<f64>,
    pub cutoff: Option<f64>,
    pub efold: Option<f64>,
    #[serde(rename = "kT", alias = "kt")]
    pub kt: Option<f64>,
    pub abund: Option<f64>,
    pub z: Option<f64>,
    pub galnh: Option<f64>,
    pub input_elo: Option<f64>,
    pub input_ehi: Option<f64>,
    pub output_elo: Option<f64>,
    pub output_ehi: Option<f64>,
}

/// 一次模拟请求
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRequest {
    pub name: String,
    pub flux: f64,
    pub options: PimmsOptions,
}

/// 源列表中的一项
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEntry {
    /// 可以模拟的请求
    Valid(SourceRequest),
    /// 无法解析的行
    Invalid { name: String, error: String },
}

impl SourceEntry {
    pub fn name(&self) -> &str {
        match self {
            SourceEntry::Valid(request) => &request.name,
            SourceEntry::Invalid { name, .. } => name,
        }
    }

    pub fn request(&self) -> Option<&SourceRequest> {
        match self {
            SourceEntry::Valid(request) => Some(request),
            SourceEntry::Invalid { .. } => None,
        }
    }
}

impl SourceRow {
    /// 转换为模拟请求；`index` 从 1 开始，用于缺省名称
    pub fn into_request(self, index: usize) -> Result<SourceRequest> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("source_{}", index));

        let input_energy_range = energy_range(&name, "input", self.input_elo, self.input_ehi)?;
        let output_energy_range = energy_range(&name, "output", self.output_elo, self.output_ehi)?;

        let options = PimmsOptions {
            model: self
                .model
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            input_energy_range,
            output_energy_range,
            mission: self.mission,
            unabsorbed: self.unabsorbed.unwrap_or(false),
            detector: self.detector,
            filter: self.filter,
            nh: self.nh,
            phoindex: self.phoindex,
            cutoff: self.cutoff,
            efold: self.efold,
            kt: self.kt,
            abund: self.abund,
            z: self.z,
            galnh: self.galnh,
        };

        Ok(SourceRequest {
            name,
            flux: self.flux,
            options,
        })
    }
}

/// 两端都给出或都不给出
fn energy_range(
    name: &str,
    side: &str,
    low: Option<f64>,
    high: Option<f64>,
) -> Result<Option<EnergyRange>> {
    match (low, high) {
        (Some(lo), Some(hi)) => Ok(Some(EnergyRange::new(lo, hi))),
        (None, None) => Ok(None),
        _ => Err(PimmsError::InvalidRange(format!(
            "{}: both {side}_elo and {side}_ehi are required",
            name
        ))),
    }
}

/// 读取源列表文件
pub fn read_sources(path: &Path) -> Result<Vec<SourceEntry>> {
    if !path.exists() {
        return Err(PimmsError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| PimmsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_sources(file)
}

/// 从任意读取器解析源列表
///
/// 单行的格式或取值错误记为 `Invalid`，I/O 错误终止读取。
pub fn parse_sources<R: Read>(reader: R) -> Result<Vec<SourceEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let name_column = headers.iter().position(|h| h == "name");

    let mut entries = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let index = i + 1;
        let record = match record {
            Ok(record) => record,
            Err(e) if is_row_error(&e) => {
                entries.push(invalid_entry(format!("source_{}", index), e.into()));
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let entry = record
            .deserialize::<SourceRow>(Some(&headers))
            .map_err(PimmsError::from)
            .and_then(|row| row.into_request(index));

        entries.push(match entry {
            Ok(request) => SourceEntry::Valid(request),
            Err(e) => {
                let name = name_column
                    .and_then(|col| record.get(col))
                    .filter(|n| !n.is_empty())
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| format!("source_{}", index));
                invalid_entry(name, e)
            }
        });
    }

    Ok(entries)
}

/// 只影响当前行的读取错误
fn is_row_error(error: &csv::Error) -> bool {
    matches!(
        error.kind(),
        csv::ErrorKind::UnequalLengths { .. } | csv::ErrorKind::Utf8 { .. }
    )
}

fn invalid_entry(name: String, error: PimmsError) -> SourceEntry {
    warn!(source = %name, error = %error, "skipping invalid source row");
    SourceEntry::Invalid {
        name,
        error: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(entry: &SourceEntry) -> &SourceRequest {
        entry
            .request()
            .unwrap_or_else(|| panic!("invalid entry: {:?}", entry))
    }

    #[test]
    fn test_parse_sources() {
        let content = "\
name,flux,model,mission,detector,filter,phoindex,kT,abund,z,output_elo,output_ehi
agn1,1e-13,powerlaw,XMM,PN,THIN,1.7,,,0.5,0.2,12
# comment line
,2e-12,plasma,,,,,0.8,0.3,,,
";
        let sources = parse_sources(content.as_bytes()).unwrap();
        assert_eq!(sources.len(), 2);

        let agn = valid(&sources[0]);
        assert_eq!(agn.name, "agn1");
        assert_eq!(agn.flux, 1e-13);
        assert_eq!(agn.options.mission.as_deref(), Some("XMM"));
        assert_eq!(agn.options.z, Some(0.5));
        assert_eq!(
            agn.options.output_energy_range,
            Some(EnergyRange::new(0.2, 12.0))
        );
        assert_eq!(agn.options.input_energy_range, None);

        let cluster = valid(&sources[1]);
        assert_eq!(cluster.name, "source_2");
        assert_eq!(cluster.options.model, "plasma");
        assert_eq!(cluster.options.kt, Some(0.8));
        assert_eq!(cluster.options.mission, None);
    }

    #[test]
    fn test_minimal_columns_default_model() {
        let sources = parse_sources("flux,phoindex\n1e-12,2\n".as_bytes()).unwrap();
        let request = valid(&sources[0]);
        assert_eq!(request.options.model, "powerlaw");
        assert_eq!(request.options.phoindex, Some(2.0));
        assert!(!request.options.unabsorbed);
    }

    #[test]
    fn test_half_range_marks_only_that_row() {
        let content = "\
name,flux,phoindex,input_elo,input_ehi
src,1e-13,1.7,2,
good,1e-12,2,0.3,10
";
        let sources = parse_sources(content.as_bytes()).unwrap();
        assert_eq!(sources.len(), 2);

        match &sources[0] {
            SourceEntry::Invalid { name, error } => {
                assert_eq!(name, "src");
                assert!(error.contains("input_elo and input_ehi"));
            }
            other => panic!("unexpected entry: {:?}", other),
        }
        assert_eq!(
            valid(&sources[1]).options.input_energy_range,
            Some(EnergyRange::new(0.3, 10.0))
        );
    }

    #[test]
    fn test_bad_flux_marks_only_that_row() {
        let content = "\
flux,phoindex
bright,1.7
2e-12,1.7
,2
";
        let sources = parse_sources(content.as_bytes()).unwrap();
        assert_eq!(sources.len(), 3);

        assert!(matches!(&sources[0], SourceEntry::Invalid { name, .. } if name == "source_1"));
        assert_eq!(valid(&sources[1]).flux, 2e-12);
        assert_eq!(sources[1].name(), "source_2");
        assert!(matches!(&sources[2], SourceEntry::Invalid { name, .. } if name == "source_3"));
    }

    #[test]
    fn test_short_row_marks_only_that_row() {
        let content = "name,flux,phoindex\nshort,1e-13\nfull,1e-13,1.7\n";
        let sources = parse_sources(content.as_bytes()).unwrap();
        assert!(matches!(&sources[0], SourceEntry::Invalid { name, .. } if name == "source_1"));
        assert_eq!(valid(&sources[1]).name, "full");
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_sources(Path::new("/nonexistent/sources.csv")),
            Err(PimmsError::FileNotFound { .. })
        ));
    }
}
