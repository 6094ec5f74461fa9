//! # 分装与储存
//!
//! 分装计算（整除 + 余量）与储存条件查询表。
//!
//! ## 依赖关系
//! - 被 `commands/calc/wetlab.rs` 调用
//! - 纯静态数据，无外部依赖

use crate::error::{LabsolError, Result};

use std::sync::LazyLock;

/// 分装结果
#[derive(Debug, Clone)]
pub struct AliquotResult {
    /// 可分装份数
    pub n_aliquots: u64,
    /// 未分装余量（mL）
    pub leftover_ml: f64,
    /// 可用体积（总量 − 死体积，mL）
    pub usable_ml: f64,
}

/// 分装: n = floor((total − dead) / size)，leftover = 余量
pub fn split_aliquots(total_ml: f64, aliquot_ml: f64, dead_ml: f64) -> Result<AliquotResult> {
    if total_ml <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Total volume must be positive".to_string(),
        ));
    }
    if aliquot_ml <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Aliquot size must be positive".to_string(),
        ));
    }
    if dead_ml < 0.0 {
        return Err(LabsolError::InvalidInput(
            "Dead volume must not be negative".to_string(),
        ));
    }

    let usable_ml = total_ml - dead_ml;
    if usable_ml <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Dead volume is greater than or equal to total volume".to_string(),
        ));
    }

    let n_aliquots = (usable_ml / aliquot_ml).floor() as u64;
    let leftover_ml = usable_ml - n_aliquots as f64 * aliquot_ml;

    Ok(AliquotResult {
        n_aliquots,
        leftover_ml,
        usable_ml,
    })
}

/// 储存条件规则表（子串匹配）
pub static STORAGE_RULES: LazyLock<Vec<(&'static str, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            "retinal",
            "Protect from light, dissolve in dry EtOH or DMSO, aliquot, store at -20 C or below.",
        ),
        (
            "retinoic",
            "Light-sensitive, store at -20 C, use fresh aliquots.",
        ),
        (
            "ampicillin",
            "Store stock at -20 C, avoid repeated freeze-thaw.",
        ),
        ("pbs", "Room temp or 4 C, 1 month."),
        ("tris", "Room temp, 1 month."),
        ("pfa", "4 C, protected from light, check for precipitate."),
    ]
});

/// 通用储存建议（无匹配规则时）
pub const STORAGE_FALLBACK: &str = "No specific rule found. General rule: store at 4 C for short \
term, -20 C for long term, protect from light if colored/retinoid.";

/// 按名称（子串，大小写不敏感）查询储存条件
pub fn storage_advice(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    STORAGE_RULES
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, advice)| *advice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_aliquots() {
        // 2 mL，0.1 mL 份，无死体积 → 20 份整除
        let r = split_aliquots(2.0, 0.1, 0.0).unwrap();
        assert_eq!(r.n_aliquots, 20);
        assert!(r.leftover_ml.abs() < 1e-9);
    }

    #[test]
    fn test_split_aliquots_identity() {
        // n × size + leftover = total − dead，0 ≤ leftover < size
        for (total, size, dead) in [(2.0, 0.3, 0.1), (5.5, 0.45, 0.2), (1.0, 0.33, 0.0)] {
            let r = split_aliquots(total, size, dead).unwrap();
            assert!((r.n_aliquots as f64 * size + r.leftover_ml - (total - dead)).abs() < 1e-9);
            assert!(r.leftover_ml >= 0.0);
            assert!(r.leftover_ml < size);
        }
    }

    #[test]
    fn test_split_aliquots_dead_volume_too_large() {
        assert!(split_aliquots(2.0, 0.1, 2.0).is_err());
        assert!(split_aliquots(2.0, 0.1, 3.0).is_err());
    }

    #[test]
    fn test_storage_advice() {
        assert!(storage_advice("all-trans-Retinal").unwrap().contains("light"));
        assert!(storage_advice("10x PBS").unwrap().contains("1 month"));
        assert!(storage_advice("mystery compound").is_none());
    }
}
