//! # 批量执行器
//!
//! 并行执行批量 PIMMS 模拟。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代（每个模拟使用独立的临时脚本）
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::batch::input::{SourceEntry, SourceRequest};
use crate::error::{PimmsError, Result};
use crate::utils::progress;

use rayon::prelude::*;

/// 单个源的模拟结果
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResult {
    /// 得到预测值
    Predicted(f64),
    /// PIMMS 没有给出预测
    NoPrediction,
    /// 模拟失败
    Failed(String),
}

impl From<Result<Option<f64>>> for ProcessResult {
    fn from(result: Result<Option<f64>>) -> Self {
        match result {
            Ok(Some(value)) => ProcessResult::Predicted(value),
            Ok(None) => ProcessResult::NoPrediction,
            Err(e) => ProcessResult::Failed(e.to_string()),
        }
    }
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 得到预测值的数量
    pub predicted: usize,
    /// 无预测的数量
    pub no_prediction: usize,
    /// 失败数量
    pub failed: usize,
    /// 按输入顺序排列的结果
    pub outcomes: Vec<(SourceEntry, ProcessResult)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, entry: SourceEntry, result: ProcessResult) {
        match result {
            ProcessResult::Predicted(_) => self.predicted += 1,
            ProcessResult::NoPrediction => self.no_prediction += 1,
            ProcessResult::Failed(_) => self.failed += 1,
        }
        self.outcomes.push((entry, result));
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.predicted + self.no_prediction + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs` 为 0 时使用 CPU 核数
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理源列表，结果保持输入顺序
    ///
    /// 无效行直接记为失败，不调用 `processor`。
    pub fn run<F>(&self, entries: Vec<SourceEntry>, processor: F) -> Result<BatchResult>
    where
        F: Fn(&SourceRequest) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(entries.len() as u64, "Simulating");

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| PimmsError::InvalidArgument(format!("thread pool: {}", e)))?;

        let results: Vec<ProcessResult> = pool.install(|| {
            entries
                .par_iter()
                .map(|entry| {
                    let result = match entry {
                        SourceEntry::Valid(request) => processor(request),
                        SourceEntry::Invalid { error, .. } => ProcessResult::Failed(error.clone()),
                    };
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for (entry, result) in entries.into_iter().zip(results) {
            batch_result.merge(entry, result);
        }

        Ok(batch_result)
    }
}
