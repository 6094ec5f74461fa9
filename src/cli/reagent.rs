//! # reagent 子命令 CLI 定义
//!
//! 试剂收藏的列出与保存。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/reagent.rs`

use crate::cli::BackendArgs;

use clap::{Args, Subcommand};

/// reagent 主命令参数
#[derive(Args, Debug)]
pub struct ReagentArgs {
    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(subcommand)]
    pub command: ReagentCommands,
}

/// reagent 子命令
#[derive(Subcommand, Debug)]
pub enum ReagentCommands {
    /// List saved reagents (newest first)
    List,

    /// Save a reagent to favorites
    Save(SaveArgs),
}

/// 保存收藏参数
#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Compound name
    #[arg(long)]
    pub name: String,

    /// Molecular weight (g/mol)
    #[arg(long)]
    pub mw: f64,

    /// Free-form note
    #[arg(long, default_value = "")]
    pub note: String,
}
