//! # 稀释计算
//!
//! C1V1 = C2V2 及其派生模式。
//!
//! ## 公式
//! - 单次稀释: V1 = C2·V2/C1，溶剂 = V2 − V1
//! - 系列稀释: 每步浓度除以稀释因子，逐管套用单次稀释公式
//! - 实验系列: 对目标浓度列表逐行套用，按复孔数 × 过量系数汇总
//!
//! ## 依赖关系
//! - 被 `commands/calc/dilution.rs` 调用
//! - 使用 `calc::Advisory`, `calc::vehicle_percent`
//! - 使用 `models/settings.rs` 的 GlobalSettings

use crate::calc::{vehicle_percent, Advisory};
use crate::error::{LabsolError, Result};
use crate::models::GlobalSettings;

/// 单次稀释结果
#[derive(Debug, Clone)]
pub struct DilutionResult {
    /// 从母液移取的体积（µl）
    pub stock_ul: f64,
    /// 补加溶剂/培养基的体积（µl）
    pub solvent_ul: f64,
    /// 终体积（µl）
    pub final_ul: f64,
    /// 终溶液载体百分比（%）
    pub vehicle_percent: f64,
    /// 建议性标志
    pub flags: Vec<Advisory>,
}

/// 系列稀释的一步
#[derive(Debug, Clone)]
pub struct SerialStep {
    /// 步骤编号（从 1 开始）
    pub step: usize,
    /// 起始浓度
    pub from_conc: f64,
    /// 目标浓度
    pub to_conc: f64,
    /// 从上一管移取的体积（µl）
    pub transfer_ul: f64,
    /// 补加溶剂体积（µl）
    pub solvent_ul: f64,
    /// 载体百分比（%）
    pub vehicle_percent: f64,
    /// 建议性标志
    pub flags: Vec<Advisory>,
}

/// 实验系列（板式）的一行
#[derive(Debug, Clone)]
pub struct SeriesRow {
    /// 目标终浓度
    pub final_conc: f64,
    /// 每孔加母液体积（µl）
    pub stock_ul: f64,
    /// 每孔加培养基体积（µl）
    pub solvent_ul: f64,
    /// 载体百分比（%）
    pub vehicle_percent: f64,
    /// 载体是否超过上限
    pub over_cap: bool,
    /// 需配制的总体积（µl），含复孔与过量
    pub total_ul: f64,
}

/// DMSO 上限检查的一行
#[derive(Debug, Clone)]
pub struct CapCheckRow {
    /// 目标终浓度
    pub final_conc: f64,
    /// 每孔母液体积（µl）
    pub stock_ul: f64,
    /// 载体百分比（%）
    pub vehicle_percent: f64,
    /// 是否在上限内
    pub within_cap: bool,
}

/// 单次稀释: V1 = C2·V2/C1
///
/// 负溶剂体积截断为 0（目标高于母液时）。母液与目标浓度必须同单位，
/// 由调用方在入口处保证。
pub fn single_dilution(
    stock_conc: f64,
    target_conc: f64,
    final_volume_ul: f64,
    settings: &GlobalSettings,
) -> Result<DilutionResult> {
    if stock_conc <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Stock concentration must be positive".to_string(),
        ));
    }
    if target_conc <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Target concentration must be positive".to_string(),
        ));
    }
    if final_volume_ul <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Final volume must be positive".to_string(),
        ));
    }

    let stock_ul = (target_conc * final_volume_ul) / stock_conc;
    let solvent_ul = (final_volume_ul - stock_ul).max(0.0);
    let vp = vehicle_percent(stock_ul, settings.vehicle_fraction(), final_volume_ul);

    let mut flags = Vec::new();
    if vp > settings.max_vehicle_percent {
        flags.push(Advisory::VehicleOverCap {
            percent: vp,
            cap: settings.max_vehicle_percent,
        });
    }
    if stock_ul < settings.min_pipette_ul {
        // 建议中间母液浓度：恰好需要移取 min_pipette_ul
        flags.push(Advisory::BelowPipetteMin {
            volume_ul: stock_ul,
            min_ul: settings.min_pipette_ul,
            intermediate_conc: (target_conc * final_volume_ul) / settings.min_pipette_ul,
        });
    }

    Ok(DilutionResult {
        stock_ul,
        solvent_ul,
        final_ul: final_volume_ul,
        vehicle_percent: vp,
        flags,
    })
}

/// 系列稀释：从起始浓度按固定因子逐步稀释
///
/// 每步浓度 = 上一步 / factor，N 步后浓度 = start / factor^N。
pub fn serial_dilution(
    start_conc: f64,
    factor: f64,
    n_steps: usize,
    volume_per_tube_ul: f64,
    settings: &GlobalSettings,
) -> Result<Vec<SerialStep>> {
    if start_conc <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Start concentration must be positive".to_string(),
        ));
    }
    if factor <= 1.0 {
        return Err(LabsolError::InvalidInput(
            "Dilution factor must be greater than 1".to_string(),
        ));
    }
    if n_steps == 0 {
        return Err(LabsolError::InvalidInput(
            "Number of dilutions must be at least 1".to_string(),
        ));
    }
    if volume_per_tube_ul <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Volume per tube must be positive".to_string(),
        ));
    }

    let vehicle_frac = settings.vehicle_fraction();
    let mut steps = Vec::with_capacity(n_steps);
    let mut current = start_conc;

    for i in 0..n_steps {
        let next = current / factor;
        let transfer_ul = (next * volume_per_tube_ul) / current;
        let solvent_ul = volume_per_tube_ul - transfer_ul;
        let vp = vehicle_percent(transfer_ul, vehicle_frac, volume_per_tube_ul);

        let mut flags = Vec::new();
        if vp > settings.max_vehicle_percent {
            flags.push(Advisory::VehicleOverCap {
                percent: vp,
                cap: settings.max_vehicle_percent,
            });
        }
        if transfer_ul < settings.min_pipette_ul {
            flags.push(Advisory::BelowPipetteMin {
                volume_ul: transfer_ul,
                min_ul: settings.min_pipette_ul,
                intermediate_conc: (next * volume_per_tube_ul) / settings.min_pipette_ul,
            });
        }

        steps.push(SerialStep {
            step: i + 1,
            from_conc: current,
            to_conc: next,
            transfer_ul,
            solvent_ul,
            vehicle_percent: vp,
            flags,
        });

        current = next;
    }

    Ok(steps)
}

/// 实验系列（板式）：固定终体积，对目标浓度列表逐行计算
pub fn experiment_series(
    final_concs: &[f64],
    stock_conc: f64,
    replicates: usize,
    overfill: f64,
    settings: &GlobalSettings,
) -> Result<Vec<SeriesRow>> {
    if stock_conc <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Stock concentration must be positive".to_string(),
        ));
    }
    if replicates == 0 {
        return Err(LabsolError::InvalidInput(
            "Replicates must be at least 1".to_string(),
        ));
    }
    if overfill < 1.0 {
        return Err(LabsolError::InvalidInput(
            "Overfill factor must be at least 1.0".to_string(),
        ));
    }

    let vehicle_frac = settings.vehicle_fraction();
    let well = settings.well_volume_ul;

    Ok(final_concs
        .iter()
        .map(|&conc| {
            let stock_ul = (conc * well) / stock_conc;
            let solvent_ul = well - stock_ul;
            let vp = vehicle_percent(stock_ul, vehicle_frac, well);
            SeriesRow {
                final_conc: conc,
                stock_ul,
                solvent_ul,
                vehicle_percent: vp,
                over_cap: vp > settings.max_vehicle_percent,
                total_ul: (stock_ul + solvent_ul) * replicates as f64 * overfill,
            }
        })
        .collect())
}

/// DMSO 上限检查：对浓度列表逐孔计算载体百分比并标记超限
pub fn cap_check(
    final_concs: &[f64],
    stock_conc: f64,
    cap_percent: f64,
    settings: &GlobalSettings,
) -> Result<Vec<CapCheckRow>> {
    if stock_conc <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Stock concentration must be positive".to_string(),
        ));
    }

    let vehicle_frac = settings.vehicle_fraction();
    let well = settings.well_volume_ul;

    Ok(final_concs
        .iter()
        .map(|&conc| {
            let stock_ul = (conc * well) / stock_conc;
            let vp = vehicle_percent(stock_ul, vehicle_frac, well);
            CapCheckRow {
                final_conc: conc,
                stock_ul,
                vehicle_percent: vp,
                within_cap: vp <= cap_percent,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Preset;

    fn aqueous() -> GlobalSettings {
        Preset::Custom.settings()
    }

    #[test]
    fn test_single_dilution_example() {
        // 25 mM 母液，4 mM 目标，300 µl 终体积 → 48.0 / 252.0 µl
        let r = single_dilution(25.0, 4.0, 300.0, &aqueous()).unwrap();
        assert!((r.stock_ul - 48.0).abs() < 1e-12);
        assert!((r.solvent_ul - 252.0).abs() < 1e-12);
        assert!(r.flags.is_empty());
    }

    #[test]
    fn test_single_dilution_volume_conservation() {
        // C1 ≥ C2 时 V1 ≤ V2 且 V1 + 溶剂 = V2
        let s = aqueous();
        for (c1, c2, v2) in [(25.0, 4.0, 300.0), (10.0, 10.0, 100.0), (5000.0, 0.3, 20.0)] {
            let r = single_dilution(c1, c2, v2, &s).unwrap();
            assert!(r.stock_ul <= v2);
            assert!((r.stock_ul + r.solvent_ul - v2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_dilution_clamps_negative_solvent() {
        // 目标高于母液 → 溶剂截断为 0
        let r = single_dilution(4.0, 25.0, 300.0, &aqueous()).unwrap();
        assert_eq!(r.solvent_ul, 0.0);
    }

    #[test]
    fn test_single_dilution_pipette_flag() {
        // 0.3 µl 移液量 → 提示中间母液
        let r = single_dilution(10000.0, 0.01, 300.0, &aqueous()).unwrap();
        assert!(r.stock_ul < 1.0);
        assert!(r.flags.iter().any(|f| matches!(
            f,
            Advisory::BelowPipetteMin { intermediate_conc, .. }
                if (*intermediate_conc - 0.01 * 300.0 / 1.0).abs() < 1e-12
        )));
    }

    #[test]
    fn test_single_dilution_vehicle_flag() {
        let s = Preset::CellCulture.settings();
        // 48 µl 纯 DMSO 进 300 µl → 16 % ≫ 0.1 %
        let r = single_dilution(25.0, 4.0, 300.0, &s).unwrap();
        assert!((r.vehicle_percent - 16.0).abs() < 1e-9);
        assert!(r
            .flags
            .iter()
            .any(|f| matches!(f, Advisory::VehicleOverCap { .. })));
    }

    #[test]
    fn test_single_dilution_rejects_nonpositive() {
        let s = aqueous();
        assert!(single_dilution(0.0, 4.0, 300.0, &s).is_err());
        assert!(single_dilution(25.0, -1.0, 300.0, &s).is_err());
        assert!(single_dilution(25.0, 4.0, 0.0, &s).is_err());
    }

    #[test]
    fn test_serial_dilution_final_concentration() {
        // N 步后浓度 = start / F^N
        let steps = serial_dilution(25.0, 2.0, 5, 100.0, &aqueous()).unwrap();
        assert_eq!(steps.len(), 5);
        let last = steps.last().unwrap();
        assert!((last.to_conc - 25.0 / 2.0_f64.powi(5)).abs() < 1e-12);

        // 每步体积守恒
        for s in &steps {
            assert!((s.transfer_ul + s.solvent_ul - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_serial_dilution_chained_concentrations() {
        let steps = serial_dilution(10.0, 10.0, 3, 100.0, &aqueous()).unwrap();
        assert_eq!(steps[0].from_conc, 10.0);
        assert_eq!(steps[1].from_conc, steps[0].to_conc);
        assert_eq!(steps[2].from_conc, steps[1].to_conc);
    }

    #[test]
    fn test_serial_dilution_rejects_bad_factor() {
        assert!(serial_dilution(25.0, 1.0, 5, 100.0, &aqueous()).is_err());
        assert!(serial_dilution(25.0, 2.0, 0, 100.0, &aqueous()).is_err());
    }

    #[test]
    fn test_experiment_series_totals() {
        let s = aqueous();
        let rows = experiment_series(&[0.01, 0.1, 1.0, 3.0, 10.0], 10000.0, 3, 1.1, &s).unwrap();
        assert_eq!(rows.len(), 5);
        for row in &rows {
            // 总量 = 孔体积 × 复孔 × 过量
            assert!((row.total_ul - s.well_volume_ul * 3.0 * 1.1).abs() < 1e-9);
            assert!((row.stock_ul + row.solvent_ul - s.well_volume_ul).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cap_check_flags() {
        let mut s = Preset::CellCulture.settings();
        s.well_volume_ul = 300.0;
        let rows = cap_check(&[0.01, 10.0], 10000.0, 0.1, &s).unwrap();
        // 0.01 µM: 0.0003 µl DMSO → 0.0001 % OK；10 µM: 0.3 µl → 0.1 % 恰在限内
        assert!(rows[0].within_cap);
        assert!(rows[1].within_cap);

        let rows = cap_check(&[100.0], 10000.0, 0.1, &s).unwrap();
        assert!(!rows[0].within_cap);
    }
}
