//! # 收藏试剂数据模型
//!
//! 用户保存的 (化合物, 分子量, 备注) 记录。
//!
//! ## 依赖关系
//! - 被 `backend/reagents.rs` 序列化/反序列化
//! - 被 `commands/reagent.rs` 显示

use serde::{Deserialize, Serialize};

/// 收藏的试剂记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReagentFavorite {
    /// 化合物名称
    pub name: String,
    /// 分子量 (g/mol)
    pub mw: f64,
    /// 备注
    #[serde(default)]
    pub note: String,
    /// 创建时间（后端生成，保存时不发送）
    #[serde(default, skip_serializing)]
    pub created_at: Option<String>,
}

impl ReagentFavorite {
    pub fn new(name: impl Into<String>, mw: f64, note: impl Into<String>) -> Self {
        ReagentFavorite {
            name: name.into(),
            mw,
            note: note.into(),
            created_at: None,
        }
    }
}
