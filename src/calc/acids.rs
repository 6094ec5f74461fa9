//! # 浓酸 / 浓碱稀释
//!
//! 由目标摩尔浓度与体积，计算需量取的市售浓试剂体积。
//!
//! ## 公式
//! moles = M·V；纯质量 = moles·MW；浓试剂质量 = 纯质量/纯度；
//! 体积 = 质量/密度
//!
//! ## 数据来源
//! 常见市售浓度的密度/纯度/分子量（CRC Handbook 常用值）
//!
//! ## 依赖关系
//! - 被 `commands/calc/wetlab.rs` 调用
//! - 纯静态数据，无外部依赖

use crate::error::{LabsolError, Result};

use std::collections::HashMap;
use std::sync::LazyLock;

/// 浓试剂物性参数
#[derive(Debug, Clone, Copy)]
pub struct ReagentProps {
    /// 密度 (g/mL)
    pub density: f64,
    /// 质量纯度 (0–1)
    pub purity: f64,
    /// 分子量 (g/mol)
    pub mw: f64,
}

/// 常见浓酸/浓碱物性表
pub static CONCENTRATED_REAGENTS: LazyLock<HashMap<&'static str, ReagentProps>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();

        // 盐酸 37 %
        m.insert(
            "hcl-37",
            ReagentProps {
                density: 1.19,
                purity: 0.37,
                mw: 36.46,
            },
        );

        // 硫酸 98 %
        m.insert(
            "h2so4-98",
            ReagentProps {
                density: 1.84,
                purity: 0.98,
                mw: 98.08,
            },
        );

        // 氨水 25 %
        m.insert(
            "nh3-25",
            ReagentProps {
                density: 0.91,
                purity: 0.25,
                mw: 17.03,
            },
        );

        m
    });

/// 已知试剂键名列表（按字母排序）
pub fn known_reagents() -> Vec<&'static str> {
    let mut keys: Vec<_> = CONCENTRATED_REAGENTS.keys().copied().collect();
    keys.sort_unstable();
    keys
}

/// 浓酸/浓碱稀释结果
#[derive(Debug, Clone)]
pub struct AcidDilutionResult {
    /// 所需摩尔数 (mol)
    pub moles: f64,
    /// 纯物质质量 (g)
    pub mass_pure_g: f64,
    /// 浓试剂质量 (g)
    pub mass_concentrate_g: f64,
    /// 需量取的浓试剂体积 (mL)
    pub volume_ml: f64,
}

/// 由物性表键名计算浓试剂稀释
pub fn acid_dilution(reagent: &str, target_molarity: f64, final_volume_l: f64) -> Result<AcidDilutionResult> {
    let key = reagent.to_lowercase();
    let props = CONCENTRATED_REAGENTS
        .get(key.as_str())
        .ok_or_else(|| LabsolError::UnknownReagent {
            name: reagent.to_string(),
            known: known_reagents().join(", "),
        })?;
    acid_dilution_with(*props, target_molarity, final_volume_l)
}

/// 由显式物性参数计算浓试剂稀释
pub fn acid_dilution_with(
    props: ReagentProps,
    target_molarity: f64,
    final_volume_l: f64,
) -> Result<AcidDilutionResult> {
    if target_molarity <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Target molarity must be positive".to_string(),
        ));
    }
    if final_volume_l <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Final volume must be positive".to_string(),
        ));
    }
    if props.purity <= 0.0 || props.density <= 0.0 || props.mw <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Reagent density, purity and MW must be positive".to_string(),
        ));
    }

    let moles = target_molarity * final_volume_l;
    let mass_pure_g = moles * props.mw;
    let mass_concentrate_g = mass_pure_g / props.purity;
    let volume_ml = mass_concentrate_g / props.density;

    Ok(AcidDilutionResult {
        moles,
        mass_pure_g,
        mass_concentrate_g,
        volume_ml,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acid_dilution_hcl() {
        // 1 M HCl，1 L：1 mol × 36.46 g/mol / 0.37 / 1.19 g/mL ≈ 82.8 mL
        let r = acid_dilution("HCl-37", 1.0, 1.0).unwrap();
        assert!((r.moles - 1.0).abs() < 1e-12);
        assert!((r.volume_ml - 82.815).abs() < 0.01);
    }

    #[test]
    fn test_acid_dilution_h2so4() {
        let r = acid_dilution("h2so4-98", 0.5, 2.0).unwrap();
        assert!((r.moles - 1.0).abs() < 1e-12);
        assert!((r.mass_pure_g - 98.08).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_reagent() {
        let err = acid_dilution("hno3-65", 1.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("hno3-65"));
    }

    #[test]
    fn test_rejects_nonpositive() {
        assert!(acid_dilution("hcl-37", 0.0, 1.0).is_err());
        assert!(acid_dilution("hcl-37", 1.0, 0.0).is_err());
    }
}
