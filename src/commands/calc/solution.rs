//! # 配液类模式实现
//!
//! solid / convert / percent / molarity / xstock 的终端渲染与导出。
//! solid 模式可把试剂保存到收藏（需要登录）。
//!
//! ## 依赖关系
//! - 使用 `calc/solution.rs` 纯函数
//! - 使用 `backend/reagents.rs`（--save）
//! - 使用 `commands/calc/mod.rs` 的导出辅助

use crate::backend::session::Session;
use crate::calc::solution::{
    mg_per_ml_to_mm, mm_to_mg_per_ml, molarity_from_mass, percent_solution, solid_to_solution,
    x_stock, PercentKind,
};
use crate::cli::calc::{
    ConvertArgs, ConvertDirection, ExportArgs, MolarityArgs, PercentArgs, SolidArgs, XstockArgs,
};
use crate::cli::BackendArgs;
use crate::commands::backend_client;
use crate::commands::calc::{export_report, warn_csv_unsupported};
use crate::error::{LabsolError, Result};
use crate::models::ReagentFavorite;
use crate::utils::{output, progress};

// ─────────────────────────────────────────────────────────────
// 固体配液
// ─────────────────────────────────────────────────────────────

pub fn run_solid(args: SolidArgs, export: &ExportArgs, backend: &BackendArgs) -> Result<()> {
    let r = solid_to_solution(
        &args.compound,
        args.mass,
        args.mw,
        args.target,
        args.unit,
        args.volume_ml,
    )?;

    output::print_header("From solid (mg -> solution)");
    output::print_result(
        "Mass to weigh",
        &format!(
            "{:.3} mg for {:.1} mL at {} {}",
            r.mass_needed_mg, args.volume_ml, args.target, args.unit
        ),
    );
    output::print_info("If you dissolve ALL your powder:");
    output::print_result("  in 1.0 mL", &format!("{:.1} mM stock", r.stock_in_1ml_mm));
    output::print_result("  in 2.0 mL", &format!("{:.1} mM stock", r.stock_in_2ml_mm));

    for flag in &r.flags {
        output::print_warning(&flag.to_string());
    }

    if args.save {
        save_favorite(&args, backend)?;
    }

    warn_csv_unsupported(export);
    export_report(
        export,
        "Solid -> solution report",
        &[
            format!("Compound: {}", args.compound),
            format!("Mass available: {} mg", args.mass),
            format!("MW: {} g/mol", args.mw),
            format!("Target: {} {} in {} mL", args.target, args.unit, args.volume_ml),
            format!("Mass needed: {:.3} mg", r.mass_needed_mg),
            format!("Stock if all dissolved in 1 mL: {:.1} mM", r.stock_in_1ml_mm),
            format!("Stock if all dissolved in 2 mL: {:.1} mM", r.stock_in_2ml_mm),
        ],
    );

    Ok(())
}

/// 保存当前化合物到收藏
fn save_favorite(args: &SolidArgs, backend: &BackendArgs) -> Result<()> {
    if args.compound.is_empty() {
        return Err(LabsolError::InvalidInput(
            "Give the compound a name first (--compound)".to_string(),
        ));
    }

    let session = Session::load(&backend.session_file)?;
    let client = backend_client(backend)?;
    let favorite = ReagentFavorite::new(&args.compound, args.mw, &args.note);

    let pb = progress::create_spinner("Saving favorite...");
    let result = client.save_favorite(&session.user_id, &session.access_token, &favorite);
    pb.finish_and_clear();
    result?;

    output::print_success(&format!("Saved '{}' to favorites.", args.compound));
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 单位换算
// ─────────────────────────────────────────────────────────────

pub fn run_convert(args: ConvertArgs, export: &ExportArgs) -> Result<()> {
    output::print_header("Unit converter (mg/mL <-> mM)");

    let line = match args.direction {
        ConvertDirection::ToMm => {
            let mm = mg_per_ml_to_mm(args.value, args.mw)?;
            format!("{} mg/mL -> {:.3} mM", args.value, mm)
        }
        ConvertDirection::ToMgMl => {
            let mgml = mm_to_mg_per_ml(args.value, args.mw)?;
            format!("{} mM -> {:.3} mg/mL", args.value, mgml)
        }
    };
    output::print_success(&line);

    warn_csv_unsupported(export);
    export_report(
        export,
        "Unit conversion",
        &[format!("MW: {} g/mol", args.mw), line],
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 百分比溶液
// ─────────────────────────────────────────────────────────────

pub fn run_percent(args: PercentArgs, export: &ExportArgs) -> Result<()> {
    let amount = percent_solution(args.percent, args.volume_ml)?;

    output::print_header("% solutions (w/v, v/v)");
    let line = match args.kind {
        PercentKind::Wv => format!(
            "To make {} % w/v, weigh {:.3} g and bring volume to {:.1} mL.",
            args.percent, amount, args.volume_ml
        ),
        PercentKind::Vv => format!(
            "To make {} % v/v, measure {:.3} mL of solute and add solvent to {:.1} mL.",
            args.percent, amount, args.volume_ml
        ),
    };
    output::print_success(&line);

    warn_csv_unsupported(export);
    export_report(export, "Percent solution", &[line]);
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 摩尔浓度
// ─────────────────────────────────────────────────────────────

pub fn run_molarity(args: MolarityArgs, export: &ExportArgs) -> Result<()> {
    let molarity = molarity_from_mass(args.mass, args.mw, args.volume_ml)?;

    output::print_header("Molarity from mass & volume");
    output::print_result(
        "Molarity",
        &format!("{:.4} M ({:.2} mM)", molarity, molarity * 1000.0),
    );

    warn_csv_unsupported(export);
    export_report(
        export,
        "Molarity from mass & volume",
        &[
            format!("Mass: {} mg, MW: {} g/mol, Volume: {} mL", args.mass, args.mw, args.volume_ml),
            format!("Molarity: {:.4} M ({:.2} mM)", molarity, molarity * 1000.0),
        ],
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// X× 母液
// ─────────────────────────────────────────────────────────────

pub fn run_xstock(args: XstockArgs, export: &ExportArgs) -> Result<()> {
    let r = x_stock(args.multiple, args.volume_ml)?;

    output::print_header("Make Xx stock from current stock");
    output::print_result("Take current solution", &format!("{:.2} mL", r.take_ml));
    output::print_result(
        "Add solvent",
        &format!(
            "{:.2} mL to get {:.2} mL of {:.0}x",
            r.solvent_ml, args.volume_ml, args.multiple
        ),
    );

    warn_csv_unsupported(export);
    export_report(
        export,
        "Xx stock",
        &[
            format!("Take: {:.2} mL", r.take_ml),
            format!("Add solvent: {:.2} mL", r.solvent_ml),
            format!("Result: {:.2} mL of {:.0}x", args.volume_ml, args.multiple),
        ],
    );
    Ok(())
}
