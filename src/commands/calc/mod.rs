//! # calc 命令实现
//!
//! 订阅门禁 + 模式分发。每个模式独立执行：解析输入、调用
//! `calc/` 纯函数、渲染终端输出、尽力而为地导出。
//!
//! ## 依赖关系
//! - 使用 `cli/calc.rs` 定义的参数
//! - 使用 `calc/` 纯函数核心
//! - 使用 `backend/session.rs` 的门禁、`report/` 的导出
//! - 子模块: dilution, solution, mix, wetlab

pub mod dilution;
pub mod mix;
pub mod solution;
pub mod wetlab;

use crate::backend::session::Session;
use crate::cli::calc::{CalcArgs, CalcMode, ExportArgs};
use crate::cli::BackendArgs;
use crate::error::{LabsolError, Result};
use crate::report;
use crate::utils::output;

/// 执行 calc 命令
pub fn execute(args: CalcArgs) -> Result<()> {
    ensure_pro(&args.backend)?;

    let settings = args.settings.resolve();
    let export = args.export;

    match args.mode {
        CalcMode::Single(a) => dilution::run_single(a, &settings, &export),
        CalcMode::Serial(a) => dilution::run_serial(a, &settings, &export),
        CalcMode::Series(a) => dilution::run_series(a, &settings, &export),
        CalcMode::Dmso(a) => dilution::run_dmso(a, &settings, &export),
        CalcMode::Solid(a) => solution::run_solid(a, &export, &args.backend),
        CalcMode::Convert(a) => solution::run_convert(a, &export),
        CalcMode::Percent(a) => solution::run_percent(a, &export),
        CalcMode::Molarity(a) => solution::run_molarity(a, &export),
        CalcMode::Xstock(a) => solution::run_xstock(a, &export),
        CalcMode::Od(a) => mix::run_od(a, &export),
        CalcMode::Mastermix(a) => mix::run_mastermix(a, &export),
        CalcMode::Seed(a) => mix::run_seed(a, &export),
        CalcMode::Acid(a) => wetlab::run_acid(a, &export),
        CalcMode::Buffer(a) => wetlab::run_buffer(a, &export),
        CalcMode::Beer(a) => wetlab::run_beer(a, &export),
        CalcMode::Aliquot(a) => wetlab::run_aliquot(a, &export),
        CalcMode::Storage(a) => wetlab::run_storage(a),
    }
}

/// 订阅门禁：需要已登录且计划为 pro
///
/// 计划在登录时查询并随会话保存；查询失败在登录侧已回退 free。
fn ensure_pro(backend: &BackendArgs) -> Result<()> {
    let session = Session::load(&backend.session_file)?;
    if !session.plan.is_pro() {
        return Err(LabsolError::PlanRequired {
            plan: session.plan.to_string(),
        });
    }
    Ok(())
}

/// 尽力而为的 CSV 导出：失败只警告，不中断结果显示
pub(crate) fn export_csv(export: &ExportArgs, header: &[&str], rows: &[Vec<String>]) {
    if let Some(path) = &export.csv {
        match report::write_csv(header, rows, path) {
            Ok(()) => output::print_success(&format!("CSV saved to '{}'", path.display())),
            Err(e) => output::print_warning(&format!("CSV export failed: {}", e)),
        }
    }
}

/// 尽力而为的文本报告导出
pub(crate) fn export_report(export: &ExportArgs, title: &str, lines: &[String]) {
    if let Some(path) = &export.report {
        match report::write_report(title, lines, path) {
            Ok(()) => output::print_success(&format!("Report saved to '{}'", path.display())),
            Err(e) => output::print_warning(&format!("Report export failed: {}", e)),
        }
    }
}

/// 标量模式不支持 CSV 时提示
pub(crate) fn warn_csv_unsupported(export: &ExportArgs) {
    if export.csv.is_some() {
        output::print_warning("CSV export applies to tabular modes only; use --report here.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::plan::Plan;

    fn backend_args(session_file: std::path::PathBuf) -> BackendArgs {
        BackendArgs {
            backend_url: None,
            anon_key: None,
            session_file,
        }
    }

    fn write_session(path: &std::path::Path, plan: Plan) {
        Session {
            access_token: "tok".to_string(),
            user_id: "uid".to_string(),
            email: "a@b.c".to_string(),
            plan,
        }
        .save(path)
        .unwrap();
    }

    #[test]
    fn test_gate_rejects_free_plan() {
        let dir = std::env::temp_dir().join("labsol-gate-free-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.json");
        write_session(&path, Plan::Free);

        let err = ensure_pro(&backend_args(path.clone())).unwrap_err();
        assert!(matches!(err, LabsolError::PlanRequired { .. }));
        assert!(err.to_string().contains("free"));

        Session::clear(&path).unwrap();
    }

    #[test]
    fn test_gate_allows_pro_plan() {
        let dir = std::env::temp_dir().join("labsol-gate-pro-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.json");
        write_session(&path, Plan::Pro);

        assert!(ensure_pro(&backend_args(path.clone())).is_ok());

        Session::clear(&path).unwrap();
    }

    #[test]
    fn test_gate_requires_login() {
        let path = std::env::temp_dir().join("labsol-gate-missing-session.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            ensure_pro(&backend_args(path)).unwrap_err(),
            LabsolError::SessionMissing
        ));
    }
}
