//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `calc/`, `backend/`, `report/`, `utils/`
//! - 子模块: calc, reagent, account

pub mod account;
pub mod calc;
pub mod reagent;

use crate::backend::{BackendClient, BackendConfig};
use crate::cli::{BackendArgs, Commands};
use crate::error::{LabsolError, Result};

use reqwest::blocking::Client;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Calc(args) => calc::execute(args),
        Commands::Reagent(args) => reagent::execute(args),
        Commands::Account(args) => account::execute(args),
    }
}

/// 由命令行/环境变量构造后端客户端
pub(crate) fn backend_client(args: &BackendArgs) -> Result<BackendClient<Client>> {
    let base_url = args.backend_url.clone().ok_or_else(|| {
        LabsolError::InvalidInput(
            "Backend URL missing. Pass --backend-url or set LABSOL_BACKEND_URL".to_string(),
        )
    })?;
    let anon_key = args.anon_key.clone().ok_or_else(|| {
        LabsolError::InvalidInput(
            "Backend API key missing. Pass --anon-key or set LABSOL_ANON_KEY".to_string(),
        )
    })?;
    Ok(BackendClient::new(BackendConfig { base_url, anon_key }))
}
