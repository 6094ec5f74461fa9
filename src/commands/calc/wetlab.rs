//! # 湿实验辅助模式实现
//!
//! acid / buffer / beer / aliquot / storage 的终端渲染与导出。
//!
//! ## 依赖关系
//! - 使用 `calc/acids.rs`, `calc/buffers.rs`, `calc/photometry.rs`, `calc/aliquot.rs`
//! - 使用 `commands/calc/mod.rs` 的导出辅助

use crate::calc::acids::acid_dilution;
use crate::calc::aliquot::{split_aliquots, storage_advice, STORAGE_FALLBACK};
use crate::calc::buffers::{recipe, BUFFER_RECIPES};
use crate::calc::photometry::beer_lambert;
use crate::cli::calc::{AcidArgs, AliquotArgs, BeerArgs, BufferArgs, ExportArgs, StorageArgs};
use crate::commands::calc::{export_report, warn_csv_unsupported};
use crate::error::Result;
use crate::utils::output;

// ─────────────────────────────────────────────────────────────
// 浓酸 / 浓碱稀释
// ─────────────────────────────────────────────────────────────

pub fn run_acid(args: AcidArgs, export: &ExportArgs) -> Result<()> {
    let r = acid_dilution(&args.reagent, args.molarity, args.volume_l)?;

    output::print_header("Acid / base dilution (common reagents)");
    output::print_result(
        "Measure",
        &format!("{:.1} mL of concentrated {}", r.volume_ml, args.reagent),
    );
    output::print_result(
        "Then",
        &format!("add to water and bring to {} L", args.volume_l),
    );
    output::print_info("Always add acid to water, not water to acid.");

    warn_csv_unsupported(export);
    export_report(
        export,
        "Acid / base dilution",
        &[
            format!("Reagent: {}", args.reagent),
            format!("Target: {} M in {} L", args.molarity, args.volume_l),
            format!("Moles needed: {:.4} mol", r.moles),
            format!("Concentrated volume: {:.1} mL", r.volume_ml),
            "Always add acid to water, not water to acid.".to_string(),
        ],
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 缓冲液配方
// ─────────────────────────────────────────────────────────────

pub fn run_buffer(args: BufferArgs, export: &ExportArgs) -> Result<()> {
    let Some(name) = args.name else {
        output::print_header("Available buffers");
        for r in BUFFER_RECIPES.iter() {
            output::print_result(r.key, r.title);
        }
        return Ok(());
    };

    let r = recipe(&name)?;

    output::print_header(r.title);
    for item in &r.items {
        output::print_result(item.component, item.amount);
    }
    output::print_info(r.instructions);

    warn_csv_unsupported(export);
    let mut lines: Vec<String> = r
        .items
        .iter()
        .map(|i| format!("{}: {}", i.component, i.amount))
        .collect();
    lines.push(r.instructions.to_string());
    export_report(export, r.title, &lines);
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// Beer–Lambert
// ─────────────────────────────────────────────────────────────

pub fn run_beer(args: BeerArgs, export: &ExportArgs) -> Result<()> {
    let conc_m = beer_lambert(args.absorbance, args.epsilon, args.pathlength)?;

    output::print_header("Beer-Lambert / A280");
    output::print_result(
        "Concentration",
        &format!("{:.6e} M ({:.3} mM)", conc_m, conc_m * 1000.0),
    );

    warn_csv_unsupported(export);
    export_report(
        export,
        "Beer-Lambert",
        &[
            format!("Absorbance: {}", args.absorbance),
            format!("Epsilon: {} 1/(M*cm), pathlength {} cm", args.epsilon, args.pathlength),
            format!("Concentration: {:.6e} M", conc_m),
        ],
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 分装
// ─────────────────────────────────────────────────────────────

pub fn run_aliquot(args: AliquotArgs, export: &ExportArgs) -> Result<()> {
    let r = split_aliquots(args.total, args.size, args.dead)?;

    output::print_header("Aliquot splitter");
    output::print_result(
        "Aliquots",
        &format!("{} x {} mL", r.n_aliquots, args.size),
    );
    output::print_result("Leftover (not aliquoted)", &format!("{:.3} mL", r.leftover_ml));
    if args.dead > 0.0 {
        output::print_info(&format!("{} mL reserved as dead volume.", args.dead));
    }

    warn_csv_unsupported(export);
    export_report(
        export,
        "Aliquot splitter",
        &[
            format!("Total: {} mL, dead volume: {} mL", args.total, args.dead),
            format!("Aliquots: {} x {} mL", r.n_aliquots, args.size),
            format!("Leftover: {:.3} mL", r.leftover_ml),
        ],
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 储存条件
// ─────────────────────────────────────────────────────────────

pub fn run_storage(args: StorageArgs) -> Result<()> {
    output::print_header("Storage / stability helper");

    match storage_advice(&args.name) {
        Some(advice) => output::print_success(advice),
        None => output::print_info(STORAGE_FALLBACK),
    }
    Ok(())
}
