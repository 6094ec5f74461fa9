//! # 全局实验设置
//!
//! 一次会话内对所有计算统一生效的只读配置：
//! 终体积、载体溶剂（DMSO/EtOH）上限、载体类型、母液载体百分比。
//!
//! ## 依赖关系
//! - 被 `calc/` 各模式读取（只读，计算器自身从不修改）
//! - 被 `cli/calc.rs` 从命令行参数构造

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 母液所用载体溶剂类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
pub enum VehicleType {
    /// Aqueous stock, no organic vehicle
    #[default]
    None,
    /// Dimethyl sulfoxide
    Dmso,
    /// Ethanol
    Etoh,
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleType::None => write!(f, "aqueous / none"),
            VehicleType::Dmso => write!(f, "DMSO"),
            VehicleType::Etoh => write!(f, "EtOH"),
        }
    }
}

/// 实验预设
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Preset {
    /// Custom settings (use the individual flags)
    #[default]
    Custom,
    /// Cell culture: 300 µl wells, 0.1 % DMSO cap
    CellCulture,
    /// Chemistry: 1000 µl, no vehicle
    Chemistry,
    /// qPCR / assay: 20 µl reactions, 0.5 % cap
    Qpcr,
}

/// 全局设置（每次运行只读）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// 默认孔 / 终体积（µl）
    pub well_volume_ul: f64,
    /// 终溶液中允许的最大载体百分比（%）
    pub max_vehicle_percent: f64,
    /// 母液载体类型
    pub vehicle: VehicleType,
    /// 母液中载体的百分比（100 = 纯 DMSO）
    pub stock_vehicle_percent: f64,
    /// 可靠移液的最小体积（µl）
    pub min_pipette_ul: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Preset::Custom.settings()
    }
}

impl Preset {
    /// 预设对应的默认设置
    pub fn settings(&self) -> GlobalSettings {
        let base = GlobalSettings {
            well_volume_ul: 300.0,
            max_vehicle_percent: 0.1,
            vehicle: VehicleType::None,
            stock_vehicle_percent: 100.0,
            min_pipette_ul: 1.0,
        };
        match self {
            Preset::Custom => base,
            Preset::CellCulture => GlobalSettings {
                vehicle: VehicleType::Dmso,
                ..base
            },
            Preset::Chemistry => GlobalSettings {
                well_volume_ul: 1000.0,
                max_vehicle_percent: 0.0,
                ..base
            },
            Preset::Qpcr => GlobalSettings {
                well_volume_ul: 20.0,
                max_vehicle_percent: 0.5,
                ..base
            },
        }
    }
}

impl GlobalSettings {
    /// 母液中的载体体积分数（0.0–1.0）
    ///
    /// 水性母液恒为 0，即载体检查对所有模式统一套用也不会误报。
    pub fn vehicle_fraction(&self) -> f64 {
        if self.vehicle == VehicleType::None || self.stock_vehicle_percent <= 0.0 {
            0.0
        } else {
            self.stock_vehicle_percent / 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_defaults() {
        let cc = Preset::CellCulture.settings();
        assert_eq!(cc.well_volume_ul, 300.0);
        assert_eq!(cc.max_vehicle_percent, 0.1);
        assert_eq!(cc.vehicle, VehicleType::Dmso);

        let chem = Preset::Chemistry.settings();
        assert_eq!(chem.well_volume_ul, 1000.0);
        assert_eq!(chem.max_vehicle_percent, 0.0);
        assert_eq!(chem.vehicle, VehicleType::None);

        let qpcr = Preset::Qpcr.settings();
        assert_eq!(qpcr.well_volume_ul, 20.0);
        assert_eq!(qpcr.max_vehicle_percent, 0.5);
    }

    #[test]
    fn test_vehicle_fraction() {
        let mut s = Preset::CellCulture.settings();
        assert_eq!(s.vehicle_fraction(), 1.0);

        s.stock_vehicle_percent = 50.0;
        assert_eq!(s.vehicle_fraction(), 0.5);

        s.vehicle = VehicleType::None;
        assert_eq!(s.vehicle_fraction(), 0.0);
    }
}
