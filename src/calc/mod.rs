//! # 溶液计算核心模块
//!
//! 实现所有计算模式的纯函数。每个模式互相独立、无共享状态、
//! 无 I/O、确定性；失败条件通过 `Result` 显式返回。
//!
//! ## 模式一览
//! - `dilution`: 单次稀释、系列稀释、实验系列（板式）、DMSO 上限检查
//! - `solution`: 固体配液、单位换算、百分比溶液、摩尔浓度、X× 母液
//! - `mix`: 预混液（master mix）、OD 培养稀释、细胞接种
//! - `photometry`: Beer–Lambert 定律
//! - `acids`: 浓酸/浓碱稀释（物性表）
//! - `buffers`: 常用缓冲液配方
//! - `aliquot`: 分装计算、储存条件查询
//!
//! ## 依赖关系
//! - 被 `commands/calc/` 各模块调用
//! - 使用 `models/settings.rs` 的 GlobalSettings（显式传入，无环境状态）

pub mod acids;
pub mod aliquot;
pub mod buffers;
pub mod dilution;
pub mod mix;
pub mod photometry;
pub mod solution;

use crate::error::{LabsolError, Result};

/// 计算结果附带的建议性标志
///
/// 标志从不阻断计算：结果在物理上有效，只是操作上有风险。
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    /// 终溶液载体百分比超过配置上限
    VehicleOverCap { percent: f64, cap: f64 },
    /// 移液体积低于可靠最小值，建议先配中间母液
    BelowPipetteMin {
        volume_ul: f64,
        min_ul: f64,
        /// 建议的中间母液浓度（与目标同单位）
        intermediate_conc: f64,
    },
    /// 化合物名称提示光敏感
    LightSensitive { compound: String },
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::VehicleOverCap { percent, cap } => write!(
                f,
                "Vehicle {:.4}% > allowed {:.2}%. Make a more dilute stock or increase final volume",
                percent, cap
            ),
            Advisory::BelowPipetteMin {
                volume_ul,
                min_ul,
                intermediate_conc,
            } => write!(
                f,
                "Volume from stock is very small ({:.3} µl < {:.1} µl). Make an intermediate stock of ~{:.3} and repeat",
                volume_ul, min_ul, intermediate_conc
            ),
            Advisory::LightSensitive { compound } => write!(
                f,
                "'{}' looks light-sensitive. Protect from light (amber tube / foil), aliquot, store cold",
                compound
            ),
        }
    }
}

/// 终溶液中的载体百分比
///
/// vehicle% = V1 × 载体分数 / V_final × 100。对所有模式统一套用；
/// 水性母液载体分数为 0，结果恒为 0。
pub fn vehicle_percent(stock_volume_ul: f64, vehicle_fraction: f64, final_volume_ul: f64) -> f64 {
    if final_volume_ul <= 0.0 {
        return 0.0;
    }
    (stock_volume_ul * vehicle_fraction / final_volume_ul) * 100.0
}

/// 解析逗号分隔的浓度列表（如 "0.01,0.1,1,3,10"）
pub fn parse_concentration_list(input: &str) -> Result<Vec<f64>> {
    let values: Vec<f64> = input
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| LabsolError::InvalidConcentrationList(input.to_string()))
        })
        .collect::<Result<_>>()?;

    if values.is_empty() {
        return Err(LabsolError::InvalidConcentrationList(input.to_string()));
    }
    if values.iter().any(|v| *v <= 0.0) {
        return Err(LabsolError::InvalidInput(
            "Concentrations must be positive".to_string(),
        ));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_concentration_list() {
        let v = parse_concentration_list("0.01, 0.1,1,3,10").unwrap();
        assert_eq!(v, vec![0.01, 0.1, 1.0, 3.0, 10.0]);

        assert!(parse_concentration_list("").is_err());
        assert!(parse_concentration_list("1,abc").is_err());
        assert!(parse_concentration_list("1,-2").is_err());
    }

    #[test]
    fn test_vehicle_percent() {
        // 48 µl 纯 DMSO 母液进 300 µl 终体积 → 16 %
        let p = vehicle_percent(48.0, 1.0, 300.0);
        assert!((p - 16.0).abs() < 1e-9);

        // 水性母液恒为 0
        assert_eq!(vehicle_percent(48.0, 0.0, 300.0), 0.0);
    }
}
