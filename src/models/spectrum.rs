//! # 光谱模型
//!
//! 支持的 PIMMS 光谱模型及其必需参数。
//!
//! ## 依赖关系
//! - 被 `script/directives.rs` 使用
//! - 使用 `models/options.rs`

use crate::error::{PimmsError, Result};
use crate::models::PimmsOptions;

use std::str::FromStr;

/// 光谱模型类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    PowerLaw,
    CutoffPowerLaw,
    Blackbody,
    Bremss,
    Plasma,
}

/// 注册表条目：(类型, 名称, 必需参数)
///
/// 参数列表为 None 的模型已注册但尚不支持。
type ModelEntry = (ModelKind, &'static str, Option<&'static [&'static str]>);

const POWERLAW: ModelEntry = (ModelKind::PowerLaw, "powerlaw", Some(&["phoindex"]));
const CUTOFF_POWERLAW: ModelEntry = (
    ModelKind::CutoffPowerLaw,
    "cutoff_powerlaw",
    Some(&["phoindex", "cutoff", "efold"]),
);
const BLACKBODY: ModelEntry = (ModelKind::Blackbody, "blackbody", Some(&["kT"]));
const BREMSS: ModelEntry = (ModelKind::Bremss, "bremss", Some(&["kT"]));
const PLASMA: ModelEntry = (ModelKind::Plasma, "plasma", Some(&["kT", "abund"]));

/// 模型注册表
static MODEL_REGISTRY: &[ModelEntry] = &[POWERLAW, CUTOFF_POWERLAW, BLACKBODY, BREMSS, PLASMA];

/// 按名称查找模型及其必需参数
///
/// 未注册的名称返回 `UnknownModel`，已注册但无参数列表的返回 `UnsupportedModel`。
fn lookup(registry: &[ModelEntry], name: &str) -> Result<(ModelKind, &'static [&'static str])> {
    let (kind, _, params) = registry
        .iter()
        .find(|(_, n, _)| *n == name)
        .ok_or_else(|| PimmsError::UnknownModel(name.to_string()))?;

    let params = params.ok_or_else(|| PimmsError::UnsupportedModel(name.to_string()))?;
    Ok((*kind, params))
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::PowerLaw,
        ModelKind::CutoffPowerLaw,
        ModelKind::Blackbody,
        ModelKind::Bremss,
        ModelKind::Plasma,
    ];

    fn entry(&self) -> &'static ModelEntry {
        match self {
            ModelKind::PowerLaw => &POWERLAW,
            ModelKind::CutoffPowerLaw => &CUTOFF_POWERLAW,
            ModelKind::Blackbody => &BLACKBODY,
            ModelKind::Bremss => &BREMSS,
            ModelKind::Plasma => &PLASMA,
        }
    }

    /// 模型名
    pub fn name(&self) -> &'static str {
        self.entry().1
    }

    /// 写入 `mo` 指令的关键字
    ///
    /// PIMMS 没有单独的截断幂律关键字，截断和 e-folding 能量作为
    /// `powerlaw` 的额外位置参数。
    pub fn keyword(&self) -> &'static str {
        match self {
            ModelKind::CutoffPowerLaw => "powerlaw",
            other => other.name(),
        }
    }

    /// 按固定顺序排列的必需参数
    pub fn required_params(&self) -> Option<&'static [&'static str]> {
        self.entry().2
    }
}

impl FromStr for ModelKind {
    type Err = PimmsError;

    fn from_str(s: &str) -> Result<Self> {
        MODEL_REGISTRY
            .iter()
            .find(|(_, name, _)| *name == s)
            .map(|(kind, _, _)| *kind)
            .ok_or_else(|| PimmsError::UnknownModel(s.to_string()))
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 带参数的光谱模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpectralModel {
    PowerLaw {
        phoindex: f64,
    },
    CutoffPowerLaw {
        phoindex: f64,
        cutoff: f64,
        efold: f64,
    },
    Blackbody {
        kt: f64,
    },
    Bremss {
        kt: f64,
    },
    Plasma {
        kt: f64,
        abund: f64,
    },
}

impl SpectralModel {
    /// 从模拟选项解析光谱模型
    ///
    /// 按注册表顺序检查必需参数，报告第一个缺失的参数。
    pub fn resolve(options: &PimmsOptions) -> Result<Self> {
        Self::resolve_in(MODEL_REGISTRY, options)
    }

    fn resolve_in(registry: &[ModelEntry], options: &PimmsOptions) -> Result<Self> {
        let (kind, required) = lookup(registry, &options.model)?;

        let mut values = Vec::with_capacity(required.len());
        for param in required {
            let value = options
                .param(param)
                .ok_or_else(|| PimmsError::MissingParameter {
                    parameter: param.to_string(),
                    model: format!("model {}", kind.name()),
                })?;
            values.push(value);
        }

        match (kind, values.as_slice()) {
            (ModelKind::PowerLaw, &[phoindex]) => Ok(SpectralModel::PowerLaw { phoindex }),
            (ModelKind::CutoffPowerLaw, &[phoindex, cutoff, efold]) => {
                Ok(SpectralModel::CutoffPowerLaw {
                    phoindex,
                    cutoff,
                    efold,
                })
            }
            (ModelKind::Blackbody, &[kt]) => Ok(SpectralModel::Blackbody { kt }),
            (ModelKind::Bremss, &[kt]) => Ok(SpectralModel::Bremss { kt }),
            (ModelKind::Plasma, &[kt, abund]) => Ok(SpectralModel::Plasma { kt, abund }),
            _ => Err(PimmsError::UnsupportedModel(kind.name().to_string())),
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            SpectralModel::PowerLaw { .. } => ModelKind::PowerLaw,
            SpectralModel::CutoffPowerLaw { .. } => ModelKind::CutoffPowerLaw,
            SpectralModel::Blackbody { .. } => ModelKind::Blackbody,
            SpectralModel::Bremss { .. } => ModelKind::Bremss,
            SpectralModel::Plasma { .. } => ModelKind::Plasma,
        }
    }

    /// 参数值，顺序与 `ModelKind::required_params` 一致
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            SpectralModel::PowerLaw { phoindex } => vec![phoindex],
            SpectralModel::CutoffPowerLaw {
                phoindex,
                cutoff,
                efold,
            } => vec![phoindex, cutoff, efold],
            SpectralModel::Blackbody { kt } | SpectralModel::Bremss { kt } => vec![kt],
            SpectralModel::Plasma { kt, abund } => vec![kt, abund],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_names() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.name().parse::<ModelKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_model() {
        let err = "gaussian".parse::<ModelKind>().unwrap_err();
        assert!(matches!(err, PimmsError::UnknownModel(ref m) if m == "gaussian"));
    }

    #[test]
    fn test_model_names_are_case_sensitive() {
        assert!("PowerLaw".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_cutoff_powerlaw_keyword() {
        assert_eq!(ModelKind::CutoffPowerLaw.keyword(), "powerlaw");
        assert_eq!(ModelKind::Plasma.keyword(), "plasma");
    }

    #[test]
    fn test_registry_entries_match_kinds() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.entry().0, kind);
            assert!(MODEL_REGISTRY.contains(kind.entry()));
        }
        assert_eq!(MODEL_REGISTRY.len(), ModelKind::ALL.len());
    }

    #[test]
    fn test_unsupported_model_rejected_before_parameters() {
        let registry = [POWERLAW, (ModelKind::Plasma, "plasma", None)];

        // 没有提供任何参数，应报告不支持而不是缺少参数
        let opts = PimmsOptions::new("plasma");
        match SpectralModel::resolve_in(&registry, &opts) {
            Err(PimmsError::UnsupportedModel(model)) => assert_eq!(model, "plasma"),
            other => panic!("unexpected result: {:?}", other),
        }

        let opts = PimmsOptions {
            phoindex: Some(1.9),
            ..PimmsOptions::new("powerlaw")
        };
        assert_eq!(
            SpectralModel::resolve_in(&registry, &opts).unwrap(),
            SpectralModel::PowerLaw { phoindex: 1.9 }
        );
    }

    #[test]
    fn test_lookup_unknown_name() {
        assert!(matches!(
            lookup(MODEL_REGISTRY, "gaussian"),
            Err(PimmsError::UnknownModel(ref m)) if m == "gaussian"
        ));
        assert_eq!(
            lookup(MODEL_REGISTRY, "bremss").unwrap(),
            (ModelKind::Bremss, &["kT"][..])
        );
    }

    #[test]
    fn test_resolve_plasma() {
        let opts = PimmsOptions {
            kt: Some(2.0),
            abund: Some(0.3),
            ..PimmsOptions::new("plasma")
        };
        let model = SpectralModel::resolve(&opts).unwrap();
        assert_eq!(model, SpectralModel::Plasma { kt: 2.0, abund: 0.3 });
        assert_eq!(model.parameters(), vec![2.0, 0.3]);
        assert_eq!(model.kind(), ModelKind::Plasma);
    }

    #[test]
    fn test_resolve_reports_first_missing_parameter() {
        let opts = PimmsOptions {
            phoindex: Some(1.7),
            efold: Some(30.0),
            ..PimmsOptions::new("cutoff_powerlaw")
        };
        match SpectralModel::resolve(&opts) {
            Err(PimmsError::MissingParameter { parameter, model }) => {
                assert_eq!(parameter, "cutoff");
                assert!(model.contains("cutoff_powerlaw"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_every_required_parameter_is_checked() {
        for kind in ModelKind::ALL {
            let required = kind.required_params().unwrap();
            for missing in required {
                let mut opts = PimmsOptions::new(kind.name());
                for param in required.iter().filter(|p| *p != missing) {
                    match *param {
                        "phoindex" => opts.phoindex = Some(1.0),
                        "cutoff" => opts.cutoff = Some(1.0),
                        "efold" => opts.efold = Some(1.0),
                        "kT" => opts.kt = Some(1.0),
                        "abund" => opts.abund = Some(1.0),
                        _ => unreachable!(),
                    }
                }
                match SpectralModel::resolve(&opts) {
                    Err(PimmsError::MissingParameter { parameter, .. }) => {
                        assert_eq!(parameter, *missing)
                    }
                    other => panic!("{} without {}: {:?}", kind, missing, other),
                }
            }
        }
    }
}
