//! # 稀释类模式实现
//!
//! single / serial / series / dmso 四种模式的终端渲染与导出。
//!
//! ## 依赖关系
//! - 使用 `calc/dilution.rs` 纯函数
//! - 使用 `commands/calc/mod.rs` 的导出辅助
//! - 使用 `tabled` 渲染多行结果

use crate::calc::dilution::{cap_check, experiment_series, serial_dilution, single_dilution};
use crate::calc::parse_concentration_list;
use crate::cli::calc::{DmsoArgs, ExportArgs, SerialArgs, SeriesArgs, SingleArgs};
use crate::commands::calc::{export_csv, export_report, warn_csv_unsupported};
use crate::error::{LabsolError, Result};
use crate::models::GlobalSettings;
use crate::utils::output;

use tabled::{Table, Tabled};

// ─────────────────────────────────────────────────────────────
// 单次稀释
// ─────────────────────────────────────────────────────────────

pub fn run_single(args: SingleArgs, settings: &GlobalSettings, export: &ExportArgs) -> Result<()> {
    if args.stock_unit != args.target_unit {
        return Err(LabsolError::InvalidInput(
            "Keep units the same (mM -> mM or uM -> uM)".to_string(),
        ));
    }

    let final_ul = args.volume.unwrap_or(settings.well_volume_ul);
    let r = single_dilution(args.stock, args.target, final_ul, settings)?;

    output::print_header("Single dilution");
    output::print_result("Pipette from stock", &format!("{:.2} µl", r.stock_ul));
    output::print_result(
        "Add solvent / medium",
        &format!("{:.2} µl to reach {:.0} µl", r.solvent_ul, r.final_ul),
    );
    output::print_result(
        "Final vehicle (DMSO/EtOH)",
        &format!("{:.4} %", r.vehicle_percent),
    );

    for flag in &r.flags {
        output::print_warning(&flag.to_string());
    }

    if args.steps {
        println!();
        output::print_step(1, &format!(
            "Label a tube with target conc: {} {}.",
            args.target, args.target_unit
        ));
        output::print_step(2, &format!(
            "Pipette {:.2} µl of the stock solution into the tube.",
            r.stock_ul
        ));
        output::print_step(3, &format!("Add {:.2} µl of medium / buffer.", r.solvent_ul));
        output::print_step(4, "Mix gently. Protect from light if compound is light-sensitive.");
        output::print_step(5, "Use immediately or aliquot / store as protocol allows.");
    }

    warn_csv_unsupported(export);
    export_report(
        export,
        "Single dilution report",
        &[
            format!("Stock: {} {}", args.stock, args.stock_unit),
            format!("Target: {} {}", args.target, args.target_unit),
            format!("Final volume: {} ul", r.final_ul),
            format!("Take from stock: {:.2} ul", r.stock_ul),
            format!("Add solvent: {:.2} ul", r.solvent_ul),
            format!("Vehicle: {:.4} %", r.vehicle_percent),
        ],
    );

    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 系列稀释
// ─────────────────────────────────────────────────────────────

/// 系列稀释表格行
#[derive(Tabled)]
struct SerialRowDisplay {
    #[tabled(rename = "Step")]
    step: usize,
    #[tabled(rename = "From (mM)")]
    from: String,
    #[tabled(rename = "To (mM)")]
    to: String,
    #[tabled(rename = "Take prev (µl)")]
    transfer: String,
    #[tabled(rename = "Add solvent (µl)")]
    solvent: String,
    #[tabled(rename = "Vehicle %")]
    vehicle: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// 低于最小移液量时的表格备注
fn below_min_note(min_ul: f64) -> String {
    format!("<{} µl -> make intermediate", min_ul)
}

pub fn run_serial(args: SerialArgs, settings: &GlobalSettings, export: &ExportArgs) -> Result<()> {
    let steps = serial_dilution(args.start, args.factor, args.steps, args.volume, settings)?;

    output::print_header("Serial dilution plan");

    let rows: Vec<SerialRowDisplay> = steps
        .iter()
        .map(|s| SerialRowDisplay {
            step: s.step,
            from: format!("{:.6}", s.from_conc),
            to: format!("{:.6}", s.to_conc),
            transfer: format!("{:.3}", s.transfer_ul),
            solvent: format!("{:.3}", s.solvent_ul),
            vehicle: format!("{:.5}", s.vehicle_percent),
            note: if s.flags.is_empty() {
                String::new()
            } else {
                below_min_note(settings.min_pipette_ul)
            },
        })
        .collect();
    println!("{}", Table::new(&rows));

    let csv_rows: Vec<Vec<String>> = steps
        .iter()
        .map(|s| {
            vec![
                s.step.to_string(),
                format!("{:.6}", s.from_conc),
                format!("{:.6}", s.to_conc),
                format!("{:.3}", s.transfer_ul),
                format!("{:.3}", s.solvent_ul),
                format!("{:.5}", s.vehicle_percent),
            ]
        })
        .collect();
    export_csv(
        export,
        &["step", "from_mM", "to_mM", "transfer_ul", "solvent_ul", "vehicle_percent"],
        &csv_rows,
    );
    export_report(
        export,
        "Serial dilutions",
        &steps
            .iter()
            .map(|s| {
                format!(
                    "Step {}: {:.6} -> {:.6} mM, take {:.3} ul, add {:.3} ul solvent",
                    s.step, s.from_conc, s.to_conc, s.transfer_ul, s.solvent_ul
                )
            })
            .collect::<Vec<_>>(),
    );

    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 实验系列（板式）
// ─────────────────────────────────────────────────────────────

/// 实验系列表格行
#[derive(Tabled)]
struct SeriesRowDisplay {
    #[tabled(rename = "Final (µM)")]
    conc: String,
    #[tabled(rename = "Stock/well (µl)")]
    stock: String,
    #[tabled(rename = "Medium/well (µl)")]
    medium: String,
    #[tabled(rename = "Vehicle %")]
    vehicle: String,
    #[tabled(rename = "OK?")]
    ok: String,
    #[tabled(rename = "Total (µl)")]
    total: String,
}

pub fn run_series(args: SeriesArgs, settings: &GlobalSettings, export: &ExportArgs) -> Result<()> {
    let concs = parse_concentration_list(&args.concs)?;
    let rows = experiment_series(&concs, args.stock, args.reps, args.overfill, settings)?;

    output::print_header("Experiment series (fixed final volume)");

    let display: Vec<SeriesRowDisplay> = rows
        .iter()
        .map(|r| SeriesRowDisplay {
            conc: format!("{}", r.final_conc),
            stock: format!("{:.3}", r.stock_ul),
            medium: format!("{:.3}", r.solvent_ul),
            vehicle: format!("{:.5}", r.vehicle_percent),
            ok: if r.over_cap { "! over limit" } else { "ok" }.to_string(),
            total: format!("{:.1}", r.total_ul),
        })
        .collect();
    println!("{}", Table::new(&display));

    if rows.iter().any(|r| r.over_cap) {
        output::print_warning(&format!(
            "Some wells exceed the vehicle cap of {:.2} %.",
            settings.max_vehicle_percent
        ));
    }

    let csv_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.final_conc.to_string(),
                format!("{:.3}", r.stock_ul),
                format!("{:.3}", r.solvent_ul),
                format!("{:.5}", r.vehicle_percent),
                (!r.over_cap).to_string(),
                format!("{:.1}", r.total_ul),
            ]
        })
        .collect();
    export_csv(
        export,
        &["final_uM", "stock_ul_per_well", "medium_ul_per_well", "vehicle_percent", "within_cap", "total_ul"],
        &csv_rows,
    );
    export_report(
        export,
        "Experiment series",
        &rows
            .iter()
            .map(|r| {
                format!(
                    "{} uM: stock {:.3} ul + medium {:.3} ul per well, prepare {:.1} ul total",
                    r.final_conc, r.stock_ul, r.solvent_ul, r.total_ul
                )
            })
            .collect::<Vec<_>>(),
    );

    Ok(())
}

// ─────────────────────────────────────────────────────────────
// DMSO 上限检查
// ─────────────────────────────────────────────────────────────

/// DMSO 检查表格行
#[derive(Tabled)]
struct CapRowDisplay {
    #[tabled(rename = "Final (µM)")]
    conc: String,
    #[tabled(rename = "Stock vol (µl)")]
    stock: String,
    #[tabled(rename = "DMSO/EtOH %")]
    vehicle: String,
    #[tabled(rename = "OK?")]
    ok: String,
}

pub fn run_dmso(args: DmsoArgs, settings: &GlobalSettings, export: &ExportArgs) -> Result<()> {
    let concs = parse_concentration_list(&args.concs)?;
    let cap = args.cap.unwrap_or(settings.max_vehicle_percent);
    let rows = cap_check(&concs, args.stock, cap, settings)?;

    output::print_header(&format!("Plate DMSO cap check (cap {:.2} %)", cap));

    let display: Vec<CapRowDisplay> = rows
        .iter()
        .map(|r| CapRowDisplay {
            conc: format!("{}", r.final_conc),
            stock: format!("{:.3}", r.stock_ul),
            vehicle: format!("{:.5}", r.vehicle_percent),
            ok: if r.within_cap { "ok" } else { "! EXCEEDS" }.to_string(),
        })
        .collect();
    println!("{}", Table::new(&display));

    let n_over = rows.iter().filter(|r| !r.within_cap).count();
    if n_over > 0 {
        output::print_warning(&format!("{} well(s) exceed the cap.", n_over));
    } else {
        output::print_success("All wells are within the cap.");
    }

    let csv_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.final_conc.to_string(),
                format!("{:.3}", r.stock_ul),
                format!("{:.5}", r.vehicle_percent),
                r.within_cap.to_string(),
            ]
        })
        .collect();
    export_csv(
        export,
        &["final_uM", "stock_ul", "vehicle_percent", "within_cap"],
        &csv_rows,
    );
    export_report(
        export,
        "Plate DMSO cap check",
        &rows
            .iter()
            .map(|r| {
                format!(
                    "{} uM: {:.3} ul stock, {:.5} % vehicle, {}",
                    r.final_conc,
                    r.stock_ul,
                    r.vehicle_percent,
                    if r.within_cap { "ok" } else { "EXCEEDS" }
                )
            })
            .collect::<Vec<_>>(),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_min_note_tracks_threshold() {
        assert_eq!(below_min_note(1.0), "<1 µl -> make intermediate");
        assert_eq!(below_min_note(0.5), "<0.5 µl -> make intermediate");
        assert_eq!(below_min_note(2.0), "<2 µl -> make intermediate");
    }
}
