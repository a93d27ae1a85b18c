//! # models 命令实现
//!
//! 列出支持的光谱模型（及必需参数）和 PIMMS 文档中的任务。
//!
//! ## 依赖关系
//! - 使用 `models/`
//! - 使用 `utils/output.rs`

use crate::error::Result;
use crate::models::{ModelKind, KNOWN_MISSIONS};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 模型表格行
#[derive(Debug, Clone, Tabled)]
struct ModelRow {
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "PIMMS keyword")]
    keyword: String,
    #[tabled(rename = "Required parameters")]
    params: String,
}

fn model_rows() -> Vec<ModelRow> {
    ModelKind::ALL
        .iter()
        .map(|kind| ModelRow {
            model: kind.name().to_string(),
            keyword: kind.keyword().to_string(),
            params: kind
                .required_params()
                .map(|p| p.join(", "))
                .unwrap_or_else(|| "(unsupported)".to_string()),
        })
        .collect()
}

/// 执行 models 命令
pub fn execute() -> Result<()> {
    output::print_header("Spectral Models");
    println!("{}", Table::new(model_rows()));
    println!();
    output::print_info("All models are absorbed by --nh (default 1e19 cm-2)");
    output::print_info("--z adds a redshift plus Galactic absorption --galnh (default 1e19 cm-2)");

    output::print_header("Missions");
    println!("{}", KNOWN_MISSIONS.join(", "));
    println!();
    output::print_info("--mission requires --detector and --filter (see the PIMMS documentation)");

    Ok(())
}
