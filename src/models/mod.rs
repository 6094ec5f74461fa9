//! # 数据模型模块
//!
//! ## 依赖关系
//! - 被 `calc/`, `commands/`, `backend/` 使用
//! - 子模块: settings, favorite

pub mod favorite;
pub mod settings;

pub use favorite::ReagentFavorite;
pub use settings::{GlobalSettings, Preset, VehicleType};
