//! # 预混液与培养计算
//!
//! master mix 汇总、OD 培养稀释、细胞接种。
//!
//! ## 依赖关系
//! - 被 `commands/calc/mix.rs` 调用

use crate::error::{LabsolError, Result};

/// master mix 的一种组分
#[derive(Debug, Clone)]
pub struct MixComponent {
    /// 组分名称
    pub name: String,
    /// 每反应体积（µl）
    pub per_rxn_ul: f64,
    /// 是否单独加入（不进预混液，如模板）
    pub separate: bool,
}

impl MixComponent {
    pub fn new(name: impl Into<String>, per_rxn_ul: f64) -> Self {
        MixComponent {
            name: name.into(),
            per_rxn_ul,
            separate: false,
        }
    }

    pub fn separate(name: impl Into<String>, per_rxn_ul: f64) -> Self {
        MixComponent {
            name: name.into(),
            per_rxn_ul,
            separate: true,
        }
    }
}

/// master mix 汇总的一行
#[derive(Debug, Clone)]
pub struct MixRow {
    /// 组分名称
    pub name: String,
    /// 每反应体积（µl）
    pub per_rxn_ul: f64,
    /// 需配制总体积（µl）
    pub total_ul: f64,
    /// 是否单独加入
    pub separate: bool,
}

/// master mix 计算结果
#[derive(Debug, Clone)]
pub struct MasterMixResult {
    /// 各组分汇总
    pub rows: Vec<MixRow>,
    /// 每反应补水体积（µl），组分不足反应体积时
    pub water_per_rxn_ul: f64,
}

/// master mix：按反应数 × 过量系数汇总各组分
///
/// 预混组分按 n × overfill 配制；单独加入的组分（模板）只按 n 计。
/// 组分之和超过反应体积时返回输入域错误。
pub fn master_mix(
    components: &[MixComponent],
    n_reactions: usize,
    rxn_volume_ul: f64,
    overfill: f64,
) -> Result<MasterMixResult> {
    if n_reactions == 0 {
        return Err(LabsolError::InvalidInput(
            "Number of reactions must be at least 1".to_string(),
        ));
    }
    if rxn_volume_ul <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Reaction volume must be positive".to_string(),
        ));
    }
    if overfill < 1.0 {
        return Err(LabsolError::InvalidInput(
            "Overfill factor must be at least 1.0".to_string(),
        ));
    }
    if components.iter().any(|c| c.per_rxn_ul < 0.0) {
        return Err(LabsolError::InvalidInput(
            "Component volumes must not be negative".to_string(),
        ));
    }

    let per_rxn_sum: f64 = components.iter().map(|c| c.per_rxn_ul).sum();
    if per_rxn_sum > rxn_volume_ul {
        return Err(LabsolError::InvalidInput(format!(
            "Sum of components ({:.2} µl) exceeds reaction volume ({:.2} µl)",
            per_rxn_sum, rxn_volume_ul
        )));
    }

    let total_rxn = n_reactions as f64 * overfill;
    let rows = components
        .iter()
        .map(|c| MixRow {
            name: c.name.clone(),
            per_rxn_ul: c.per_rxn_ul,
            total_ul: if c.separate {
                c.per_rxn_ul * n_reactions as f64
            } else {
                c.per_rxn_ul * total_rxn
            },
            separate: c.separate,
        })
        .collect();

    Ok(MasterMixResult {
        rows,
        water_per_rxn_ul: rxn_volume_ul - per_rxn_sum,
    })
}

/// OD 培养稀释结果（mL）
#[derive(Debug, Clone)]
pub struct OdDilutionResult {
    /// 移取培养物体积（mL）
    pub culture_ml: f64,
    /// 补加培养基体积（mL）
    pub medium_ml: f64,
}

/// OD 培养稀释：C1V1 = C2V2，体积单位 mL
pub fn od_dilution(od_start: f64, od_target: f64, final_volume_ml: f64) -> Result<OdDilutionResult> {
    if od_start <= 0.0 || od_target <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "OD values must be positive".to_string(),
        ));
    }
    if final_volume_ml <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Final volume must be positive".to_string(),
        ));
    }

    let culture_ml = (od_target * final_volume_ml) / od_start;
    Ok(OdDilutionResult {
        culture_ml,
        medium_ml: final_volume_ml - culture_ml,
    })
}

/// 细胞接种结果（mL）
#[derive(Debug, Clone)]
pub struct SeedingResult {
    /// 移取细胞悬液体积（mL）
    pub suspension_ml: f64,
    /// 补加培养基体积（mL）
    pub medium_ml: f64,
}

/// 细胞接种：V = 目标细胞数 / 悬液密度
pub fn cell_seeding(
    suspension_density: f64,
    target_cells: f64,
    final_volume_ml: f64,
) -> Result<SeedingResult> {
    if suspension_density <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Suspension density must be positive".to_string(),
        ));
    }
    if target_cells <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Target cell count must be positive".to_string(),
        ));
    }
    if final_volume_ml <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Final volume must be positive".to_string(),
        ));
    }

    let suspension_ml = target_cells / suspension_density;
    Ok(SeedingResult {
        suspension_ml,
        medium_ml: final_volume_ml - suspension_ml,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_mix_totals() {
        let components = vec![
            MixComponent::new("Buffer / Master mix", 10.0),
            MixComponent::new("Primer F", 0.5),
            MixComponent::new("Primer R", 0.5),
            MixComponent::separate("Template", 1.0),
            MixComponent::new("Polymerase", 0.2),
        ];
        let r = master_mix(&components, 10, 20.0, 1.1).unwrap();

        // 预混组分 × 11，单独组分 × 10
        assert!((r.rows[0].total_ul - 110.0).abs() < 1e-9);
        assert!((r.rows[3].total_ul - 10.0).abs() < 1e-9);

        // 补水 = 20 − 12.2
        assert!((r.water_per_rxn_ul - 7.8).abs() < 1e-9);
    }

    #[test]
    fn test_master_mix_overflow_rejected() {
        let components = vec![MixComponent::new("Buffer", 25.0)];
        assert!(master_mix(&components, 10, 20.0, 1.0).is_err());
    }

    #[test]
    fn test_od_dilution() {
        // OD 1.2 → 0.1，10 mL
        let r = od_dilution(1.2, 0.1, 10.0).unwrap();
        assert!((r.culture_ml - 10.0 / 12.0).abs() < 1e-9);
        assert!((r.culture_ml + r.medium_ml - 10.0).abs() < 1e-9);
        assert!(od_dilution(0.0, 0.1, 10.0).is_err());
    }

    #[test]
    fn test_cell_seeding() {
        // 1.5e6 cells/mL，目标 2e5，终体积 2 mL
        let r = cell_seeding(1_500_000.0, 200_000.0, 2.0).unwrap();
        assert!((r.suspension_ml - 0.1333333).abs() < 1e-6);
        assert!((r.suspension_ml + r.medium_ml - 2.0).abs() < 1e-9);
    }
}
