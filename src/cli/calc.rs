//! # calc 子命令 CLI 定义
//!
//! 计算器统一入口，17 种互相独立的模式作为嵌套子命令。
//! 全局设置（终体积、载体上限等）作为公共参数显式传入，
//! 所有模式统一生效。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/calc/` 相应模块

use crate::calc::solution::{ConcUnit, PercentKind};
use crate::cli::BackendArgs;
use crate::models::{GlobalSettings, Preset, VehicleType};

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// Calc 主命令
// ─────────────────────────────────────────────────────────────

/// calc 主命令参数
#[derive(Args, Debug)]
pub struct CalcArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(flatten)]
    pub export: ExportArgs,

    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(subcommand)]
    pub mode: CalcMode,
}

/// 全局实验设置参数（对所有模式统一生效）
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Lab preset supplying the defaults below
    #[arg(long, value_enum, default_value = "custom")]
    pub preset: Preset,

    /// Default well / final volume in ul (overrides preset)
    #[arg(long)]
    pub well_volume: Option<f64>,

    /// Max allowed DMSO/EtOH in final solution, percent (overrides preset)
    #[arg(long)]
    pub max_vehicle: Option<f64>,

    /// Solvent the stock is dissolved in (overrides preset)
    #[arg(long, value_enum)]
    pub vehicle: Option<VehicleType>,

    /// Vehicle percent of the stock, e.g. 100 for pure DMSO
    #[arg(long)]
    pub stock_vehicle_percent: Option<f64>,

    /// Minimum reliably pipettable volume in ul
    #[arg(long)]
    pub min_pipette: Option<f64>,
}

impl SettingsArgs {
    /// 预设 + 显式覆盖 → 全局设置
    pub fn resolve(&self) -> GlobalSettings {
        let mut s = self.preset.settings();
        if let Some(v) = self.well_volume {
            s.well_volume_ul = v;
        }
        if let Some(v) = self.max_vehicle {
            s.max_vehicle_percent = v;
        }
        if let Some(v) = self.vehicle {
            s.vehicle = v;
        }
        if let Some(v) = self.stock_vehicle_percent {
            s.stock_vehicle_percent = v;
        }
        if let Some(v) = self.min_pipette {
            s.min_pipette_ul = v;
        }
        s
    }
}

/// 导出参数（尽力而为，失败不影响结果显示）
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Write tabular results to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write a text protocol report to a file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

// ─────────────────────────────────────────────────────────────
// 模式子命令
// ─────────────────────────────────────────────────────────────

/// 计算器模式
#[derive(Subcommand, Debug)]
pub enum CalcMode {
    /// Single dilution (C1V1 = C2V2)
    Single(SingleArgs),

    /// Serial dilutions with a fixed factor
    Serial(SerialArgs),

    /// Experiment series over a list of final concentrations (plate-like)
    Series(SeriesArgs),

    /// From solid: mg of powder to a target concentration
    Solid(SolidArgs),

    /// Unit converter (mg/mL <-> mM)
    Convert(ConvertArgs),

    /// Percent solutions (w/v, v/v)
    Percent(PercentArgs),

    /// Molarity from dissolved mass and volume
    Molarity(MolarityArgs),

    /// OD / culture dilution
    Od(OdArgs),

    /// Master mix / qPCR mix totals
    Mastermix(MastermixArgs),

    /// Make an Xx stock from the current solution
    Xstock(XstockArgs),

    /// Acid / base dilution from concentrated reagents
    Acid(AcidArgs),

    /// Buffer recipes (PBS / TBS / Tris)
    Buffer(BufferArgs),

    /// Beer-Lambert / A280 concentration
    Beer(BeerArgs),

    /// Cell seeding volumes
    Seed(SeedArgs),

    /// Plate DMSO cap checker
    Dmso(DmsoArgs),

    /// Aliquot splitter
    Aliquot(AliquotArgs),

    /// Storage / stability advice
    Storage(StorageArgs),
}

/// 单次稀释参数
#[derive(Args, Debug)]
pub struct SingleArgs {
    /// Stock concentration
    #[arg(long)]
    pub stock: f64,

    /// Stock concentration unit
    #[arg(long, value_enum, default_value = "mM")]
    pub stock_unit: ConcUnit,

    /// Target concentration
    #[arg(long)]
    pub target: f64,

    /// Target concentration unit (must match the stock unit)
    #[arg(long, value_enum, default_value = "mM")]
    pub target_unit: ConcUnit,

    /// Final volume in ul (defaults to the configured well volume)
    #[arg(long)]
    pub volume: Option<f64>,

    /// Print protocol-style steps
    #[arg(long, default_value_t = false)]
    pub steps: bool,
}

/// 系列稀释参数
#[derive(Args, Debug)]
pub struct SerialArgs {
    /// Start concentration (mM)
    #[arg(long)]
    pub start: f64,

    /// Number of dilution steps
    #[arg(long, default_value_t = 5)]
    pub steps: usize,

    /// Dilution factor, e.g. 2 for 1:2
    #[arg(long, default_value_t = 2.0)]
    pub factor: f64,

    /// Final volume per tube in ul
    #[arg(long, default_value_t = 100.0)]
    pub volume: f64,
}

/// 实验系列参数
#[derive(Args, Debug)]
pub struct SeriesArgs {
    /// Final concentrations (uM), comma-separated, e.g. '0.01,0.1,1,3,10'
    #[arg(long)]
    pub concs: String,

    /// Stock concentration (uM)
    #[arg(long)]
    pub stock: f64,

    /// Replicates (wells) per concentration
    #[arg(long, default_value_t = 3)]
    pub reps: usize,

    /// Overfill factor (1.0 = exact, 1.1 = +10 %)
    #[arg(long, default_value_t = 1.1)]
    pub overfill: f64,
}

/// 固体配液参数
#[derive(Args, Debug)]
pub struct SolidArgs {
    /// Compound name (used for light-sensitivity warnings and favorites)
    #[arg(long, default_value = "")]
    pub compound: String,

    /// Mass of powder available (mg)
    #[arg(long)]
    pub mass: f64,

    /// Molecular weight (g/mol)
    #[arg(long)]
    pub mw: f64,

    /// Target concentration
    #[arg(long)]
    pub target: f64,

    /// Target concentration unit
    #[arg(long, value_enum, default_value = "uM")]
    pub unit: ConcUnit,

    /// Final volume to prepare (mL)
    #[arg(long)]
    pub volume_ml: f64,

    /// Note to attach when saving as favorite
    #[arg(long, default_value = "from labsol")]
    pub note: String,

    /// Save this reagent to favorites (requires login)
    #[arg(long, default_value_t = false)]
    pub save: bool,
}

/// 换算方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConvertDirection {
    /// mg/mL to mM
    ToMm,
    /// mM to mg/mL
    ToMgMl,
}

/// 单位换算参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Molecular weight (g/mol)
    #[arg(long)]
    pub mw: f64,

    /// Conversion direction
    #[arg(long, value_enum)]
    pub direction: ConvertDirection,

    /// Concentration value to convert
    #[arg(long)]
    pub value: f64,
}

/// 百分比溶液参数
#[derive(Args, Debug)]
pub struct PercentArgs {
    /// Percent type
    #[arg(long, value_enum, default_value = "wv")]
    pub kind: PercentKind,

    /// Percent (%)
    #[arg(long)]
    pub percent: f64,

    /// Final volume (mL)
    #[arg(long)]
    pub volume_ml: f64,
}

/// 摩尔浓度参数
#[derive(Args, Debug)]
pub struct MolarityArgs {
    /// Mass dissolved (mg)
    #[arg(long)]
    pub mass: f64,

    /// Molecular weight (g/mol)
    #[arg(long)]
    pub mw: f64,

    /// Final volume (mL)
    #[arg(long)]
    pub volume_ml: f64,
}

/// OD 培养稀释参数
#[derive(Args, Debug)]
pub struct OdArgs {
    /// Starting OD / cell density (C1)
    #[arg(long)]
    pub start: f64,

    /// Target OD (C2)
    #[arg(long)]
    pub target: f64,

    /// Final volume to prepare (mL)
    #[arg(long)]
    pub volume_ml: f64,
}

/// master mix 参数（体积单位 ul / 每反应）
#[derive(Args, Debug)]
pub struct MastermixArgs {
    /// Number of reactions
    #[arg(long)]
    pub reactions: usize,

    /// Reaction volume (ul)
    #[arg(long, default_value_t = 20.0)]
    pub rxn_volume: f64,

    /// Overfill factor (1.0 = exact, 1.1 = +10 %)
    #[arg(long, default_value_t = 1.1)]
    pub overfill: f64,

    /// Buffer / master mix per reaction (ul)
    #[arg(long, default_value_t = 10.0)]
    pub buffer: f64,

    /// dNTP / MgCl2 per reaction (ul)
    #[arg(long, default_value_t = 0.0)]
    pub dntp: f64,

    /// Primer F per reaction (ul)
    #[arg(long, default_value_t = 0.5)]
    pub primer_f: f64,

    /// Primer R per reaction (ul)
    #[arg(long, default_value_t = 0.5)]
    pub primer_r: f64,

    /// Template per reaction (ul), added separately
    #[arg(long, default_value_t = 1.0)]
    pub template: f64,

    /// Polymerase / enzyme per reaction (ul)
    #[arg(long, default_value_t = 0.2)]
    pub polymerase: f64,
}

/// X× 母液参数
#[derive(Args, Debug)]
pub struct XstockArgs {
    /// Desired stock multiple, e.g. 10 for 10x
    #[arg(long)]
    pub multiple: f64,

    /// Final stock volume to make (mL)
    #[arg(long)]
    pub volume_ml: f64,
}

/// 浓酸/浓碱稀释参数
#[derive(Args, Debug)]
pub struct AcidArgs {
    /// Reagent key (hcl-37, h2so4-98, nh3-25)
    #[arg(long)]
    pub reagent: String,

    /// Target molarity (M)
    #[arg(long)]
    pub molarity: f64,

    /// Final volume (L)
    #[arg(long, default_value_t = 1.0)]
    pub volume_l: f64,
}

/// 缓冲液配方参数
#[derive(Args, Debug)]
pub struct BufferArgs {
    /// Buffer key (pbs-1x, pbs-10x, tbs-1x, tris-1m); omit to list all
    pub name: Option<String>,
}

/// Beer–Lambert 参数
#[derive(Args, Debug)]
pub struct BeerArgs {
    /// Absorbance (A)
    #[arg(long)]
    pub absorbance: f64,

    /// Extinction coefficient (1/(M*cm))
    #[arg(long)]
    pub epsilon: f64,

    /// Pathlength (cm)
    #[arg(long, default_value_t = 1.0)]
    pub pathlength: f64,
}

/// 细胞接种参数
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Current cell suspension density (cells/mL)
    #[arg(long)]
    pub density: f64,

    /// Target cells per well / dish
    #[arg(long)]
    pub cells: f64,

    /// Final volume per well / dish (mL)
    #[arg(long)]
    pub volume_ml: f64,
}

/// DMSO 上限检查参数
#[derive(Args, Debug)]
pub struct DmsoArgs {
    /// Final concentrations (uM), comma-separated
    #[arg(long)]
    pub concs: String,

    /// Stock concentration (uM)
    #[arg(long)]
    pub stock: f64,

    /// DMSO cap in percent (defaults to the configured max vehicle)
    #[arg(long)]
    pub cap: Option<f64>,
}

/// 分装参数
#[derive(Args, Debug)]
pub struct AliquotArgs {
    /// Total volume available (mL)
    #[arg(long)]
    pub total: f64,

    /// Aliquot size (mL)
    #[arg(long)]
    pub size: f64,

    /// Dead volume to keep back (mL)
    #[arg(long, default_value_t = 0.0)]
    pub dead: f64,
}

/// 储存条件查询参数
#[derive(Args, Debug)]
pub struct StorageArgs {
    /// Compound / solution name
    pub name: String,
}
