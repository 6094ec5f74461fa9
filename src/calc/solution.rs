//! # 配液计算
//!
//! 固体配液、单位换算、百分比溶液、摩尔浓度、X× 母液。
//!
//! ## 公式
//! - 固体配液: m = C·V·MW（统一换算到 mol/L 与 L）
//! - 单位换算: mM = mg/mL × 1000 / MW；mg/mL = mM × MW / 1000
//! - 百分比溶液: 量 = pct/100 × 终体积（w/v 为 g，v/v 为 mL）
//! - 摩尔浓度: M = (m/MW) / V
//! - X× 母液: V1 = V_final / 倍数
//!
//! ## 依赖关系
//! - 被 `commands/calc/solution.rs` 调用
//! - 使用 `calc::Advisory`（光敏感提示）

use crate::calc::Advisory;
use crate::error::{LabsolError, Result};

/// 光敏感化合物关键词
const LIGHT_SENSITIVE_WORDS: [&str; 4] = ["retinal", "retinoic", "rhodamine", "fitc"];

/// 目标浓度单位（摩尔浓度类模式）
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConcUnit {
    /// millimolar
    #[value(name = "mM", alias = "mm")]
    MilliMolar,
    /// micromolar
    #[value(name = "uM", alias = "um")]
    MicroMolar,
}

impl ConcUnit {
    /// 换算到 mol/L 的因子
    pub fn to_molar(&self) -> f64 {
        match self {
            ConcUnit::MilliMolar => 1e-3,
            ConcUnit::MicroMolar => 1e-6,
        }
    }
}

impl std::fmt::Display for ConcUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConcUnit::MilliMolar => write!(f, "mM"),
            ConcUnit::MicroMolar => write!(f, "µM"),
        }
    }
}

/// 固体配液结果
#[derive(Debug, Clone)]
pub struct SolidResult {
    /// 需称量的质量（mg）
    pub mass_needed_mg: f64,
    /// 若把现有粉末全部溶于 1 mL 得到的母液浓度（mM）
    pub stock_in_1ml_mm: f64,
    /// 若全部溶于 2 mL 得到的母液浓度（mM）
    pub stock_in_2ml_mm: f64,
    /// 建议性标志
    pub flags: Vec<Advisory>,
}

/// 固体配液：达到目标浓度所需质量，以及现有粉末全溶的母液浓度
pub fn solid_to_solution(
    compound: &str,
    mass_available_mg: f64,
    mw: f64,
    target_conc: f64,
    target_unit: ConcUnit,
    final_volume_ml: f64,
) -> Result<SolidResult> {
    if mw <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Molecular weight must be positive".to_string(),
        ));
    }
    if final_volume_ml <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Final volume must be positive".to_string(),
        ));
    }
    if target_conc <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Target concentration must be positive".to_string(),
        ));
    }
    if mass_available_mg <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Available mass must be positive".to_string(),
        ));
    }

    let conc_molar = target_conc * target_unit.to_molar();
    let mass_needed_mg = mass_for_molarity(conc_molar, mw, final_volume_ml)?;

    let moles = (mass_available_mg / 1000.0) / mw;
    let stock_in_1ml_mm = (moles / 0.001) * 1000.0;
    let stock_in_2ml_mm = (moles / 0.002) * 1000.0;

    let mut flags = Vec::new();
    let lower = compound.to_lowercase();
    if LIGHT_SENSITIVE_WORDS.iter().any(|w| lower.contains(w)) {
        flags.push(Advisory::LightSensitive {
            compound: compound.to_string(),
        });
    }

    Ok(SolidResult {
        mass_needed_mg,
        stock_in_1ml_mm,
        stock_in_2ml_mm,
        flags,
    })
}

/// mg/mL → mM
pub fn mg_per_ml_to_mm(mg_per_ml: f64, mw: f64) -> Result<f64> {
    if mw <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Molecular weight must be positive".to_string(),
        ));
    }
    Ok(mg_per_ml * 1000.0 / mw)
}

/// mM → mg/mL
pub fn mm_to_mg_per_ml(mm: f64, mw: f64) -> Result<f64> {
    if mw <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Molecular weight must be positive".to_string(),
        ));
    }
    Ok(mm * mw / 1000.0)
}

/// 百分比溶液类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PercentKind {
    /// weight per volume (g per 100 mL)
    Wv,
    /// volume per volume (mL per 100 mL)
    Vv,
}

impl std::fmt::Display for PercentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PercentKind::Wv => write!(f, "w/v"),
            PercentKind::Vv => write!(f, "v/v"),
        }
    }
}

/// 百分比溶液：所需溶质量（w/v 为 g，v/v 为 mL）
pub fn percent_solution(percent: f64, final_volume_ml: f64) -> Result<f64> {
    if percent < 0.0 {
        return Err(LabsolError::InvalidInput(
            "Percent must not be negative".to_string(),
        ));
    }
    if final_volume_ml <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Final volume must be positive".to_string(),
        ));
    }
    Ok((percent / 100.0) * final_volume_ml)
}

/// 摩尔浓度：M = (mass/MW) / V
pub fn molarity_from_mass(mass_mg: f64, mw: f64, volume_ml: f64) -> Result<f64> {
    if mw <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Molecular weight must be positive".to_string(),
        ));
    }
    if volume_ml <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Volume must be positive".to_string(),
        ));
    }
    let moles = (mass_mg / 1000.0) / mw;
    Ok(moles / (volume_ml / 1000.0))
}

/// 达到目标摩尔浓度所需质量（mg）；`molarity_from_mass` 的逆运算
pub fn mass_for_molarity(molarity: f64, mw: f64, volume_ml: f64) -> Result<f64> {
    if mw <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Molecular weight must be positive".to_string(),
        ));
    }
    if volume_ml <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Volume must be positive".to_string(),
        ));
    }
    if molarity <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Molarity must be positive".to_string(),
        ));
    }
    Ok(molarity * (volume_ml / 1000.0) * mw * 1000.0)
}

/// X× 母液结果
#[derive(Debug, Clone)]
pub struct XStockResult {
    /// 移取现有溶液体积（mL）
    pub take_ml: f64,
    /// 补加溶剂体积（mL）
    pub solvent_ml: f64,
}

/// 由现有溶液配制 X× 母液: V1 = V_final / 倍数
pub fn x_stock(multiple: f64, final_volume_ml: f64) -> Result<XStockResult> {
    if multiple < 1.0 {
        return Err(LabsolError::InvalidInput(
            "Stock multiple must be at least 1".to_string(),
        ));
    }
    if final_volume_ml <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Final volume must be positive".to_string(),
        ));
    }
    let take_ml = final_volume_ml / multiple;
    Ok(XStockResult {
        take_ml,
        solvent_ml: final_volume_ml - take_ml,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_mass_needed() {
        // 20 mL @ 100 µM，MW 284.44 → 0.56888 mg
        let r = solid_to_solution("", 50.0, 284.44, 100.0, ConcUnit::MicroMolar, 20.0).unwrap();
        assert!((r.mass_needed_mg - 0.56888).abs() < 1e-5);

        // 50 mg 全溶于 1 mL → 175.8 mM
        assert!((r.stock_in_1ml_mm - 175.784).abs() < 1e-3);
        assert!((r.stock_in_2ml_mm - r.stock_in_1ml_mm / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_solid_light_sensitive_flag() {
        let r = solid_to_solution("Retinoic acid", 10.0, 300.44, 1.0, ConcUnit::MilliMolar, 5.0)
            .unwrap();
        assert!(r
            .flags
            .iter()
            .any(|f| matches!(f, Advisory::LightSensitive { .. })));

        let r = solid_to_solution("forskolin", 10.0, 410.5, 1.0, ConcUnit::MilliMolar, 5.0).unwrap();
        assert!(r.flags.is_empty());
    }

    #[test]
    fn test_solid_rejects_nonpositive() {
        assert!(solid_to_solution("x", 50.0, 0.0, 100.0, ConcUnit::MicroMolar, 20.0).is_err());
        assert!(solid_to_solution("x", 50.0, 284.44, 100.0, ConcUnit::MicroMolar, 0.0).is_err());
    }

    #[test]
    fn test_unit_converter_round_trip() {
        // mg/mL → mM → mg/mL 回到原值
        let mw = 284.44;
        let mgml = 1.7;
        let mm = mg_per_ml_to_mm(mgml, mw).unwrap();
        let back = mm_to_mg_per_ml(mm, mw).unwrap();
        assert!((back - mgml).abs() < 1e-12);

        // 1 mg/mL，MW 1000 → 1 mM
        assert!((mg_per_ml_to_mm(1.0, 1000.0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_percent_solution() {
        // 2 % w/v，100 mL → 2 g
        assert!((percent_solution(2.0, 100.0).unwrap() - 2.0).abs() < 1e-12);
        // 70 % v/v，500 mL → 350 mL
        assert!((percent_solution(70.0, 500.0).unwrap() - 350.0).abs() < 1e-12);
        assert!(percent_solution(2.0, 0.0).is_err());
    }

    #[test]
    fn test_molarity_mass_inverse() {
        // molarity_from_mass 与 mass_for_molarity 互逆
        let mw = 284.44;
        let vol = 10.0;
        let m = molarity_from_mass(12.0, mw, vol).unwrap();
        let mass = mass_for_molarity(m, mw, vol).unwrap();
        assert!((mass - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_molarity_rejects_zero_volume() {
        assert!(molarity_from_mass(12.0, 284.44, 0.0).is_err());
    }

    #[test]
    fn test_x_stock() {
        let r = x_stock(10.0, 50.0).unwrap();
        assert!((r.take_ml - 5.0).abs() < 1e-12);
        assert!((r.solvent_ml - 45.0).abs() < 1e-12);
        assert!(x_stock(0.5, 50.0).is_err());
    }
}
