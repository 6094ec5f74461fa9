//! # account 命令实现
//!
//! 登录 / 注册 / 订阅查询 / 登出。登录成功后会话（含计划）
//! 写入会话文件，供 `calc` 的订阅门禁离线读取。
//!
//! ## 依赖关系
//! - 使用 `cli/account.rs` 定义的参数
//! - 使用 `backend/auth.rs`, `backend/plan.rs`, `backend/session.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::backend::session::Session;
use crate::cli::account::{AccountArgs, AccountCommands, LoginArgs, SignupArgs};
use crate::cli::BackendArgs;
use crate::commands::backend_client;
use crate::error::{LabsolError, Result};
use crate::utils::{output, progress};

use console::Term;

/// 执行 account 命令
pub fn execute(args: AccountArgs) -> Result<()> {
    match args.command {
        AccountCommands::Login(login) => run_login(&args.backend, login),
        AccountCommands::Signup(signup) => run_signup(&args.backend, signup),
        AccountCommands::Plan => run_plan(&args.backend),
        AccountCommands::Logout => run_logout(&args.backend),
    }
}

/// 终端安全读取密码
fn prompt_password(prompt: &str) -> Result<String> {
    let term = Term::stderr();
    eprint!("{}: ", prompt);
    let password = term
        .read_secure_line()
        .map_err(|e| LabsolError::Other(format!("Could not read password: {}", e)))?;
    if password.is_empty() {
        return Err(LabsolError::InvalidInput("Password must not be empty".to_string()));
    }
    Ok(password)
}

fn run_login(backend: &BackendArgs, args: LoginArgs) -> Result<()> {
    output::print_header("Login");

    let client = backend_client(backend)?;
    let password = prompt_password("Password")?;

    let pb = progress::create_spinner("Signing in...");
    let session = client.sign_in(&args.email, &password);
    pb.finish_and_clear();
    let mut session = session?;

    // 登录时查询计划；任何失败回退 free
    let pb = progress::create_spinner("Checking subscription...");
    session.plan = client.plan(&session.user_id, &session.access_token);
    pb.finish_and_clear();

    session.save(&backend.session_file)?;

    output::print_success(&format!("Logged in as {}", session.email));
    output::print_info(&format!("Plan: {}", session.plan));
    if !session.plan.is_pro() {
        output::print_warning("Calculator modes require a 'pro' subscription.");
    }
    Ok(())
}

fn run_signup(backend: &BackendArgs, args: SignupArgs) -> Result<()> {
    output::print_header("Sign up");

    let client = backend_client(backend)?;
    let password = prompt_password("Password (min 6 chars)")?;

    let pb = progress::create_spinner("Creating account...");
    let result = client.sign_up(&args.email, &password, &args.name);
    pb.finish_and_clear();
    result?;

    output::print_success("Account created. Now login with `labsol account login`.");
    Ok(())
}

fn run_plan(backend: &BackendArgs) -> Result<()> {
    let mut session = Session::load(&backend.session_file)?;
    let client = backend_client(backend)?;

    let pb = progress::create_spinner("Checking subscription...");
    session.plan = client.plan(&session.user_id, &session.access_token);
    pb.finish_and_clear();

    session.save(&backend.session_file)?;

    output::print_info(&format!("Logged in as: {}", session.email));
    output::print_info(&format!("Plan: {}", session.plan));
    Ok(())
}

fn run_logout(backend: &BackendArgs) -> Result<()> {
    Session::clear(&backend.session_file)?;
    output::print_success("Logged out.");
    Ok(())
}
