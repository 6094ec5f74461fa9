//! # account 子命令 CLI 定义
//!
//! 登录、注册、订阅查询、登出。密码通过终端安全输入，
//! 从不出现在命令行参数中。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/account.rs`

use crate::cli::BackendArgs;

use clap::{Args, Subcommand};

/// account 主命令参数
#[derive(Args, Debug)]
pub struct AccountArgs {
    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(subcommand)]
    pub command: AccountCommands,
}

/// account 子命令
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Sign in with email + password (password prompted)
    Login(LoginArgs),

    /// Create a new account (password prompted)
    Signup(SignupArgs),

    /// Show (and refresh) the current subscription plan
    Plan,

    /// Discard the stored session
    Logout,
}

/// 登录参数
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    pub email: String,
}

/// 注册参数
#[derive(Args, Debug)]
pub struct SignupArgs {
    /// Account email
    pub email: String,

    /// Full name for the profile
    #[arg(long, default_value = "")]
    pub name: String,
}
