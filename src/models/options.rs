//! # 模拟选项数据模型
//!
//! 一次 PIMMS 模拟所需的全部输入：光谱模型名、模型参数、吸收/红移、
//! 任务（望远镜）选择以及输入/输出能量区间。
//!
//! ## 依赖关系
//! - 被 `models/spectrum.rs`, `script/` 使用
//! - 使用 `utils/format.rs` 格式化数值

use crate::utils::format::fmt_num;

use serde::{Deserialize, Serialize};

/// 默认模型
pub const DEFAULT_MODEL: &str = "powerlaw";

/// PIMMS 文档中列出的任务
pub const KNOWN_MISSIONS: &[&str] = &[
    "ASCA", "Athena", "BBXRT", "CGRO", "Chandra", "EINSTEIN", "EUVE", "EXOSAT", "Ginga", "HEAO1",
    "Hitomi", "Integral", "MAXI", "NICER", "NuSTAR", "ROSAT", "SAX", "Suzaku", "Swift", "XMM",
    "XTE",
];

/// 能量区间 (keV)
///
/// 不检查 `low < high`，原样写入脚本。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyRange {
    pub low: f64,
    pub high: f64,
}

impl EnergyRange {
    pub fn new(low: f64, high: f64) -> Self {
        EnergyRange { low, high }
    }
}

impl Default for EnergyRange {
    fn default() -> Self {
        EnergyRange {
            low: 0.5,
            high: 2.0,
        }
    }
}

impl std::fmt::Display for EnergyRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", fmt_num(self.low), fmt_num(self.high))
    }
}

/// PIMMS 模拟选项
///
/// 除 `model` 外所有字段都是可选的；模型所需参数是否齐全在构建脚本时检查。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PimmsOptions {
    /// 光谱模型名 (powerlaw, cutoff_powerlaw, blackbody, bremss, plasma)
    pub model: String,

    /// 输入流量的能量区间，默认 0.5-2 keV
    pub input_energy_range: Option<EnergyRange>,

    /// 输出计数率/流量的能量区间，默认 0.5-2 keV
    pub output_energy_range: Option<EnergyRange>,

    /// 任务名；为 None 时输出模型流量 (ergs/s/cm2)
    pub mission: Option<String>,

    /// 输出未吸收流量，仅在未指定任务时生效
    pub unabsorbed: bool,

    /// 探测器，指定任务时必需
    pub detector: Option<String>,

    /// 滤光片，指定任务时必需
    pub filter: Option<String>,

    /// 氢柱密度 (cm-2)，默认 1e19
    pub nh: Option<f64>,

    /// 幂律光子指数
    pub phoindex: Option<f64>,

    /// 截断能量 (keV)
    pub cutoff: Option<f64>,

    /// e-folding 能量 (keV)
    pub efold: Option<f64>,

    /// 热模型温度 (keV)
    #[serde(rename = "kT")]
    pub kt: Option<f64>,

    /// 等离子体金属丰度
    pub abund: Option<f64>,

    /// 红移；None 或 0 表示静止系
    pub z: Option<f64>,

    /// 银河系氢柱密度 (cm-2)，默认 1e19，仅在有红移时使用
    pub galnh: Option<f64>,
}

impl Default for PimmsOptions {
    fn default() -> Self {
        PimmsOptions::new(DEFAULT_MODEL)
    }
}

impl PimmsOptions {
    pub fn new(model: impl Into<String>) -> Self {
        PimmsOptions {
            model: model.into(),
            input_energy_range: None,
            output_energy_range: None,
            mission: None,
            unabsorbed: false,
            detector: None,
            filter: None,
            nh: None,
            phoindex: None,
            cutoff: None,
            efold: None,
            kt: None,
            abund: None,
            z: None,
            galnh: None,
        }
    }

    /// 按名称查找模型参数
    pub fn param(&self, name: &str) -> Option<f64> {
        match name {
            "phoindex" => self.phoindex,
            "cutoff" => self.cutoff,
            "efold" => self.efold,
            "kT" => self.kt,
            "abund" => self.abund,
            _ => None,
        }
    }

    /// 实际使用的任务名（空字符串视为未指定）
    pub fn mission(&self) -> Option<&str> {
        self.mission.as_deref().filter(|m| !m.is_empty())
    }

    /// 是否为已知任务（大小写不敏感）
    pub fn is_known_mission(mission: &str) -> bool {
        KNOWN_MISSIONS
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_energy_range_display() {
        assert_eq!(EnergyRange::default().to_string(), "0.5-2");
    }

    #[test]
    fn test_inverted_range_passes_through() {
        assert_eq!(EnergyRange::new(10.0, 2.0).to_string(), "10-2");
        assert_eq!(EnergyRange::new(2.0, 2.0).to_string(), "2-2");
    }

    #[test]
    fn test_param_lookup() {
        let opts = PimmsOptions {
            kt: Some(3.0),
            abund: Some(0.4),
            ..PimmsOptions::new("plasma")
        };
        assert_eq!(opts.param("kT"), Some(3.0));
        assert_eq!(opts.param("abund"), Some(0.4));
        assert_eq!(opts.param("phoindex"), None);
        assert_eq!(opts.param("unknown"), None);
    }

    #[test]
    fn test_empty_mission_is_none() {
        let opts = PimmsOptions {
            mission: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(opts.mission(), None);
        assert_eq!(opts.model, "powerlaw");
    }

    #[test]
    fn test_known_mission_case_insensitive() {
        assert!(PimmsOptions::is_known_mission("xmm"));
        assert!(PimmsOptions::is_known_mission("NuSTAR"));
        assert!(!PimmsOptions::is_known_mission("JWST"));
    }
}
