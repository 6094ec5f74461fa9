//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `calc`: 计算器模式（嵌套子命令，17 种）
//! - `reagent`: 试剂收藏（list / save）
//! - `account`: 账户管理（login / signup / plan / logout）
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: calc, reagent, account

pub mod account;
pub mod calc;
pub mod reagent;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// labsol - 多功能实验室溶液计算器
#[derive(Parser)]
#[command(name = "labsol")]
#[command(version)]
#[command(about = "A versatile laboratory solution calculator toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Run a calculator mode (dilutions, molarity, buffers, ...)
    Calc(calc::CalcArgs),

    /// List or save favorite reagents
    Reagent(reagent::ReagentArgs),

    /// Login, signup and subscription management
    Account(account::AccountArgs),
}

/// 后端连接参数（URL / key 可由环境变量提供）
#[derive(Args, Debug, Clone)]
pub struct BackendArgs {
    /// Backend project URL
    #[arg(long, env = "LABSOL_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Backend anonymous API key
    #[arg(long, env = "LABSOL_ANON_KEY", hide_env_values = true)]
    pub anon_key: Option<String>,

    /// Session file path
    #[arg(long, env = "LABSOL_SESSION", default_value = ".labsol-session.json")]
    pub session_file: PathBuf,
}
