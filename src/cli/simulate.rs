//! # predict / script 子命令 CLI 定义
//!
//! 单个源的模拟参数：流量、光谱模型、吸收/红移、任务和能量区间。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/predict.rs`, `commands/script.rs`

use crate::error::{PimmsError, Result};
use crate::models::options::DEFAULT_MODEL;
use crate::models::{EnergyRange, PimmsOptions};

use clap::Args;
use regex::Regex;
use std::sync::OnceLock;

/// predict / script 子命令参数
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Observed source flux in ergs/s/cm2
    #[arg(allow_negative_numbers = true)]
    pub flux: f64,

    #[command(flatten)]
    pub options: ModelArgs,
}

/// 光谱模型与仪器参数
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    // ─────────────────────────────────────────────────────────────
    // Spectral model
    // ─────────────────────────────────────────────────────────────
    /// Spectral model (powerlaw, cutoff_powerlaw, blackbody, bremss, plasma)
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Hydrogen column density in cm-2 [default: 1e19]
    #[arg(long)]
    pub nh: Option<f64>,

    /// Photon index (powerlaw, cutoff_powerlaw)
    #[arg(long, allow_negative_numbers = true)]
    pub phoindex: Option<f64>,

    /// High energy cut-off in keV (cutoff_powerlaw)
    #[arg(long)]
    pub cutoff: Option<f64>,

    /// E-folding energy in keV (cutoff_powerlaw)
    #[arg(long)]
    pub efold: Option<f64>,

    /// Temperature in keV (blackbody, bremss, plasma)
    #[arg(long = "kt", visible_alias = "kT")]
    pub kt: Option<f64>,

    /// Metal abundance (plasma)
    #[arg(long)]
    pub abund: Option<f64>,

    /// Source redshift; 0 means rest frame
    #[arg(long)]
    pub z: Option<f64>,

    /// Galactic hydrogen column density in cm-2, used with --z [default: 1e19]
    #[arg(long)]
    pub galnh: Option<f64>,

    // ─────────────────────────────────────────────────────────────
    // Energy ranges
    // ─────────────────────────────────────────────────────────────
    /// Energy range of the input flux in keV (e.g., '0.5-2') [default: 0.5-2]
    #[arg(long, value_parser = parse_energy_range)]
    pub input_energy_range: Option<EnergyRange>,

    /// Energy range of the output count rate/flux in keV [default: 0.5-2]
    #[arg(long, value_parser = parse_energy_range)]
    pub output_energy_range: Option<EnergyRange>,

    // ─────────────────────────────────────────────────────────────
    // Instrument
    // ─────────────────────────────────────────────────────────────
    /// Mission (e.g., XMM, Chandra, Swift); without it the output is the model flux
    #[arg(long)]
    pub mission: Option<String>,

    /// Detector, required with --mission
    #[arg(long)]
    pub detector: Option<String>,

    /// Filter, required with --mission
    #[arg(long)]
    pub filter: Option<String>,

    /// Report the absorption-corrected flux (ignored with --mission)
    #[arg(long, default_value_t = false)]
    pub unabsorbed: bool,
}

impl From<&ModelArgs> for PimmsOptions {
    fn from(args: &ModelArgs) -> Self {
        PimmsOptions {
            model: args.model.clone(),
            input_energy_range: args.input_energy_range,
            output_energy_range: args.output_energy_range,
            mission: args.mission.clone(),
            unabsorbed: args.unabsorbed,
            detector: args.detector.clone(),
            filter: args.filter.clone(),
            nh: args.nh,
            phoindex: args.phoindex,
            cutoff: args.cutoff,
            efold: args.efold,
            kt: args.kt,
            abund: args.abund,
            z: args.z,
            galnh: args.galnh,
        }
    }
}

/// 解析能量区间 (例如 "0.5-2", "2:10", "1e-1,2.0")
pub fn parse_energy_range(s: &str) -> Result<EnergyRange> {
    static RANGE_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let re = RANGE_RE
        .get_or_init(|| {
            let num = r"[+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";
            Regex::new(&format!(r"^\s*({num})\s*[-:,]\s*({num})\s*$")).ok()
        })
        .as_ref()
        .ok_or_else(|| PimmsError::InvalidRange(s.to_string()))?;

    let caps = re
        .captures(s)
        .ok_or_else(|| PimmsError::InvalidRange(s.to_string()))?;

    let bound = |i: usize| -> Result<f64> {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .ok_or_else(|| PimmsError::InvalidRange(s.to_string()))
    };

    Ok(EnergyRange::new(bound(1)?, bound(2)?))
}
