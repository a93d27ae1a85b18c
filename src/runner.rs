//! # PIMMS 执行器
//!
//! 将脚本写入临时 `.xco` 文件，调用外部程序 `pimms @<file>`，
//! 返回其文本输出。临时文件在调用结束时删除（包括出错路径）。
//!
//! ## 依赖关系
//! - 被 `lib.rs`, `commands/` 使用
//! - 使用 `script/`, `parsers/`
//! - 使用 `tempfile` 管理临时脚本文件

use crate::error::{PimmsError, Result};
use crate::models::PimmsOptions;
use crate::parsers;
use crate::script::{self, Script};

use std::io::{ErrorKind, Write};
use std::process::Command;
use tracing::{debug, info_span};

/// 默认 PIMMS 可执行文件
pub const DEFAULT_PROGRAM: &str = "pimms";

/// PIMMS 识别的脚本后缀
pub const SCRIPT_SUFFIX: &str = ".xco";

/// PIMMS 执行器配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PimmsRunner {
    /// 可执行文件名或路径
    program: String,
    /// 放在 `@<file>` 之前的额外参数
    args: Vec<String>,
}

impl Default for PimmsRunner {
    fn default() -> Self {
        PimmsRunner::new(DEFAULT_PROGRAM)
    }
}

impl PimmsRunner {
    pub fn new(program: impl Into<String>) -> Self {
        PimmsRunner {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// 设置额外参数（例如通过包装脚本调用 PIMMS 时）
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// 运行一次完整模拟：构建脚本、调用 PIMMS、解析输出
    pub fn simulate(&self, flux: f64, options: &PimmsOptions) -> Result<Option<f64>> {
        let script = script::build_script(flux, options)?;
        let output = self.run(&script)?;
        parsers::parse_output(&output)
    }

    /// 执行脚本并返回 PIMMS 的标准输出
    pub fn run(&self, script: &Script) -> Result<String> {
        let _span = info_span!("pimms", program = %self.program).entered();

        let mut file = tempfile::Builder::new()
            .prefix("pimms-")
            .suffix(SCRIPT_SUFFIX)
            .tempfile()
            .map_err(|e| PimmsError::FileWriteError {
                path: std::env::temp_dir().display().to_string(),
                source: e,
            })?;

        let script_path = file.path().display().to_string();
        write!(file, "{}", script)
            .and_then(|_| file.flush())
            .map_err(|e| PimmsError::FileWriteError {
                path: script_path.clone(),
                source: e,
            })?;
        debug!(path = %script_path, "script written:\n{}", script);

        let script_arg = format!("@{}", script_path);
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&script_arg)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => PimmsError::CommandNotFound {
                    command: self.program.clone(),
                },
                _ => PimmsError::SimulationExecution {
                    command: self.command_line(&script_arg),
                    status: "not started".to_string(),
                    stderr: e.to_string(),
                },
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("PIMMS output:\n{}", stdout);

        if !output.status.success() {
            return Err(PimmsError::SimulationExecution {
                command: self.command_line(&script_arg),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        // `file` 在此处 drop，临时脚本被删除
        Ok(stdout)
    }

    fn command_line(&self, script_arg: &str) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(self.args.iter().map(String::as_str));
        parts.push(script_arg);
        parts.join(" ")
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::Path;

    /// 用 `sh -c` 模拟 PIMMS：`$1` 为 `@<file>`
    fn fake_pimms(body: &str) -> PimmsRunner {
        PimmsRunner::new("sh").with_args(["-c", body, "pimms"])
    }

    fn powerlaw() -> PimmsOptions {
        PimmsOptions {
            phoindex: Some(1.7),
            ..Default::default()
        }
    }

    #[test]
    fn test_run_passes_script_file() {
        let runner = fake_pimms(r#"f="${1#@}"; case "$f" in *.xco) cat "$f";; *) exit 3;; esac"#);
        let script = script::build_script(1e-13, &powerlaw()).unwrap();
        let output = runner.run(&script).unwrap();
        assert_eq!(output, script.to_string());
    }

    #[test]
    fn test_script_file_removed_after_run() {
        let runner = fake_pimms(r#"echo "${1#@}""#);
        let script = script::build_script(1e-13, &powerlaw()).unwrap();
        let output = runner.run(&script).unwrap();
        let path = output.trim();
        assert!(path.ends_with(SCRIPT_SUFFIX));
        assert!(!Path::new(path).exists());
    }

    #[test]
    fn test_script_file_removed_after_failure() {
        let runner = fake_pimms(r#"echo "${1#@}" >&2; exit 2"#);
        let script = script::build_script(1e-13, &powerlaw()).unwrap();
        match runner.run(&script) {
            Err(PimmsError::SimulationExecution { stderr, status, .. }) => {
                assert!(status.contains('2'));
                assert!(stderr.ends_with(SCRIPT_SUFFIX));
                assert!(!Path::new(&stderr).exists());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_program() {
        let runner = PimmsRunner::new("definitely-not-pimms-binary");
        let script = script::build_script(1e-13, &powerlaw()).unwrap();
        assert!(matches!(
            runner.run(&script),
            Err(PimmsError::CommandNotFound { ref command }) if command == "definitely-not-pimms-binary"
        ));
    }

    #[test]
    fn test_simulate_end_to_end() {
        let runner = fake_pimms(
            r#"grep -q '^go 1e-13$' "${1#@}" || exit 1
echo " PIMMS  Version 4.12b"
echo "* PIMMS predicts 4.321E-02 cps with XMM PN THIN"
echo "* PIMMS predicts 1.234E-02 cps with XMM MOS1 THIN""#,
        );
        let opts = PimmsOptions {
            mission: Some("XMM".to_string()),
            detector: Some("PN".to_string()),
            filter: Some("THIN".to_string()),
            ..powerlaw()
        };
        assert_eq!(runner.simulate(1e-13, &opts).unwrap(), Some(1.234e-2));
    }

    #[test]
    fn test_simulate_without_prediction() {
        let runner = fake_pimms("echo 'no prediction'");
        assert_eq!(runner.simulate(1e-13, &powerlaw()).unwrap(), None);
    }

    #[test]
    fn test_validation_happens_before_spawn() {
        let runner = PimmsRunner::new("definitely-not-pimms-binary");
        let opts = PimmsOptions::new("gaussian");
        assert!(matches!(
            runner.simulate(1e-13, &opts),
            Err(PimmsError::UnknownModel(_))
        ));
    }
}
