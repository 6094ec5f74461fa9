//! # labsol - 多功能实验室溶液计算器
//!
//! 稀释、系列稀释、板式系列、固体配液、百分比溶液、OD、
//! 预混液、缓冲液、DMSO 检查 —— 统一成单一可执行文件，
//! 计算功能由订阅门禁保护。
//!
//! ## 子命令
//! - `calc`    - 17 种计算器模式（嵌套子命令）
//! - `reagent` - 试剂收藏（list / save）
//! - `account` - 账户管理（login / signup / plan / logout）
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   ├── calc/       (纯函数计算核心)
//!   ├── backend/    (身份/订阅/收藏客户端)
//!   ├── report/     (CSV 与文本报告导出)
//!   ├── models/     (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod backend;
mod calc;
mod cli;
mod commands;
mod error;
mod models;
mod report;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
