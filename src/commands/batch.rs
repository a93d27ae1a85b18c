//! # batch 命令实现
//!
//! 对 CSV 中的每个源运行 PIMMS。
//!
//! ## 功能
//! - 读取源列表 CSV
//! - 并行运行模拟（`--jobs`）
//! - 生成终端表格和可选 CSV 输出
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的参数
//! - 使用 `batch/`, `runner.rs`
//! - 使用 `utils/output.rs`

use crate::batch::{read_sources, BatchResult, BatchRunner, ProcessResult, SourceEntry};
use crate::cli::batch::BatchArgs;
use crate::error::{PimmsError, Result};
use crate::runner::PimmsRunner;
use crate::utils::format::fmt_num;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};
use tracing::warn;

/// 结果表格行
#[derive(Debug, Clone, Tabled)]
struct ResultRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Source")]
    name: String,
    #[tabled(rename = "Flux (ergs/s/cm2)")]
    flux: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Output")]
    target: String,
    #[tabled(rename = "Result")]
    result: String,
}

/// 执行 batch 命令
pub fn execute(args: BatchArgs, runner: &PimmsRunner) -> Result<()> {
    output::print_header("Batch PIMMS Simulation");

    let sources = read_sources(&args.input)?;
    if sources.is_empty() {
        output::print_warning(&format!("No sources found in '{}'", args.input.display()));
        return Ok(());
    }
    output::print_info(&format!(
        "Loaded {} sources from '{}'",
        sources.len(),
        args.input.display()
    ));

    let invalid = sources.iter().filter(|s| s.request().is_none()).count();
    if invalid > 0 {
        output::print_warning(&format!(
            "{} rows could not be parsed and will be reported as failed",
            invalid
        ));
    }

    let batch = BatchRunner::new(args.jobs);
    if batch.jobs() > 1 {
        output::print_info(&format!(
            "Running {} PIMMS processes in parallel",
            batch.jobs()
        ));
    }

    let result = batch.run(sources, |request| {
        let outcome = runner.simulate(request.flux, &request.options);
        if let Err(ref e) = outcome {
            warn!(source = %request.name, error = %e, "simulation failed");
        }
        ProcessResult::from(outcome)
    })?;

    println!("{}", Table::new(result_rows(&result)));
    println!();

    if let Some(ref path) = args.output {
        save_results_csv(&result, path)?;
        output::print_success(&format!("Results saved to '{}'", path.display()));
    }

    output::print_separator();
    output::print_done(&format!(
        "Processed {} sources: {} predicted, {} without prediction, {} failed",
        result.total(),
        result.predicted,
        result.no_prediction,
        result.failed
    ));

    if result.failed > 0 {
        output::print_warning("Run with --verbose for PIMMS output of failed sources");
    }

    Ok(())
}

fn result_rows(result: &BatchResult) -> Vec<ResultRow> {
    result
        .outcomes
        .iter()
        .enumerate()
        .map(|(i, (entry, outcome))| {
            let (flux, model, target) = match entry {
                SourceEntry::Valid(request) => (
                    fmt_num(request.flux),
                    request.options.model.clone(),
                    request
                        .options
                        .mission()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "flux".to_string()),
                ),
                SourceEntry::Invalid { .. } => ("-".to_string(), "-".to_string(), "-".to_string()),
            };
            let result = match (outcome, entry.request()) {
                (ProcessResult::Predicted(v), Some(request)) => {
                    format!("{:.4e} {}", v, super::result_unit(&request.options))
                }
                (ProcessResult::Predicted(v), None) => format!("{:.4e}", v),
                (ProcessResult::NoPrediction, _) => "-".to_string(),
                (ProcessResult::Failed(e), _) => {
                    format!("ERROR: {}", e.lines().next().unwrap_or(""))
                }
            };
            ResultRow {
                index: i + 1,
                name: entry.name().to_string(),
                flux,
                model,
                target,
                result,
            }
        })
        .collect()
}

/// 保存结果到 CSV
fn save_results_csv(result: &BatchResult, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["name", "flux", "model", "result", "error"])?;

    for (entry, outcome) in &result.outcomes {
        let (value, error) = match outcome {
            ProcessResult::Predicted(v) => (v.to_string(), String::new()),
            ProcessResult::NoPrediction => (String::new(), String::new()),
            ProcessResult::Failed(e) => (String::new(), e.clone()),
        };
        let (flux, model) = match entry.request() {
            Some(request) => (fmt_num(request.flux), request.options.model.clone()),
            None => (String::new(), String::new()),
        };
        wtr.write_record([
            entry.name(),
            flux.as_str(),
            model.as_str(),
            value.as_str(),
            error.as_str(),
        ])?;
    }

    wtr.flush().map_err(|e| PimmsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::SourceRequest;
    use crate::models::PimmsOptions;

    fn sample_result() -> BatchResult {
        let mut result = BatchResult::default();
        result.merge(
            SourceEntry::Valid(SourceRequest {
                name: "agn".to_string(),
                flux: 1e-13,
                options: PimmsOptions {
                    mission: Some("XMM".to_string()),
                    ..Default::default()
                },
            }),
            ProcessResult::Predicted(0.0125),
        );
        result.merge(
            SourceEntry::Valid(SourceRequest {
                name: "star".to_string(),
                flux: 2e-12,
                options: PimmsOptions::new("blackbody"),
            }),
            ProcessResult::Failed("Parameter 'kT' missing for model blackbody".to_string()),
        );
        result.merge(
            SourceEntry::Invalid {
                name: "source_3".to_string(),
                error: "CSV error: bad flux".to_string(),
            },
            ProcessResult::Failed("CSV error: bad flux".to_string()),
        );
        result
    }

    #[test]
    fn test_result_rows() {
        let rows = result_rows(&sample_result());
        assert_eq!(rows[0].target, "XMM");
        assert_eq!(rows[0].result, "1.2500e-2 cps");
        assert_eq!(rows[1].flux, "2e-12");
        assert!(rows[1].result.starts_with("ERROR: Parameter 'kT'"));
        assert_eq!(rows[2].name, "source_3");
        assert_eq!(rows[2].flux, "-");
        assert_eq!(rows[2].result, "ERROR: CSV error: bad flux");
    }

    #[test]
    fn test_save_results_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        save_results_csv(&sample_result(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "name,flux,model,result,error");
        assert_eq!(lines[1], "agn,1e-13,powerlaw,0.0125,");
        assert!(lines[2].starts_with("star,2e-12,blackbody,,"));
        assert_eq!(lines[3], "source_3,,,,CSV error: bad flux");
    }
}
