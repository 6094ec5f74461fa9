//! # 预混液与培养类模式实现
//!
//! mastermix / od / seed 的终端渲染与导出。
//!
//! ## 依赖关系
//! - 使用 `calc/mix.rs` 纯函数
//! - 使用 `commands/calc/mod.rs` 的导出辅助

use crate::calc::mix::{cell_seeding, master_mix, od_dilution, MixComponent};
use crate::cli::calc::{ExportArgs, MastermixArgs, OdArgs, SeedArgs};
use crate::commands::calc::{export_csv, export_report, warn_csv_unsupported};
use crate::error::Result;
use crate::utils::output;

use tabled::{Table, Tabled};

// ─────────────────────────────────────────────────────────────
// master mix
// ─────────────────────────────────────────────────────────────

/// master mix 表格行
#[derive(Tabled)]
struct MixRowDisplay {
    #[tabled(rename = "Component")]
    name: String,
    #[tabled(rename = "Per rxn (µl)")]
    per_rxn: String,
    #[tabled(rename = "Total (µl)")]
    total: String,
}

pub fn run_mastermix(args: MastermixArgs, export: &ExportArgs) -> Result<()> {
    let components = vec![
        MixComponent::new("Buffer / Master mix", args.buffer),
        MixComponent::new("dNTP / MgCl2", args.dntp),
        MixComponent::new("Primer F", args.primer_f),
        MixComponent::new("Primer R", args.primer_r),
        MixComponent::separate("Template", args.template),
        MixComponent::new("Polymerase", args.polymerase),
    ];
    let r = master_mix(&components, args.reactions, args.rxn_volume, args.overfill)?;

    output::print_header(&format!(
        "Master mix for {} reactions (overfill {:.2})",
        args.reactions, args.overfill
    ));

    let mut display: Vec<MixRowDisplay> = r
        .rows
        .iter()
        .map(|row| MixRowDisplay {
            name: if row.separate {
                format!("{} (add separately)", row.name)
            } else {
                row.name.clone()
            },
            per_rxn: format!("{:.2}", row.per_rxn_ul),
            total: format!("{:.2}", row.total_ul),
        })
        .collect();
    if r.water_per_rxn_ul > 0.0 {
        display.push(MixRowDisplay {
            name: "Nuclease-free water".to_string(),
            per_rxn: format!("{:.2}", r.water_per_rxn_ul),
            total: format!("{:.2}", r.water_per_rxn_ul * args.reactions as f64 * args.overfill),
        });
    }
    println!("{}", Table::new(&display));

    let csv_rows: Vec<Vec<String>> = display
        .iter()
        .map(|d| vec![d.name.clone(), d.per_rxn.clone(), d.total.clone()])
        .collect();
    export_csv(export, &["component", "per_rxn_ul", "total_ul"], &csv_rows);
    export_report(
        export,
        "Master mix",
        &display
            .iter()
            .map(|d| format!("{}: {} ul per rxn, {} ul total", d.name, d.per_rxn, d.total))
            .collect::<Vec<_>>(),
    );

    Ok(())
}

// ─────────────────────────────────────────────────────────────
// OD 培养稀释
// ─────────────────────────────────────────────────────────────

pub fn run_od(args: OdArgs, export: &ExportArgs) -> Result<()> {
    let r = od_dilution(args.start, args.target, args.volume_ml)?;

    output::print_header("OD / culture dilution");
    output::print_result("Take culture", &format!("{:.2} mL", r.culture_ml));
    output::print_result(
        "Add medium",
        &format!(
            "{:.2} mL to reach {:.2} mL at OD {}",
            r.medium_ml, args.volume_ml, args.target
        ),
    );

    warn_csv_unsupported(export);
    export_report(
        export,
        "OD / culture dilution",
        &[
            format!("Starting OD: {}", args.start),
            format!("Target OD: {}", args.target),
            format!("Take culture: {:.2} mL", r.culture_ml),
            format!("Add medium: {:.2} mL", r.medium_ml),
        ],
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// 细胞接种
// ─────────────────────────────────────────────────────────────

pub fn run_seed(args: SeedArgs, export: &ExportArgs) -> Result<()> {
    let r = cell_seeding(args.density, args.cells, args.volume_ml)?;

    output::print_header("Cell seeding calculator");
    output::print_result("Take cell suspension", &format!("{:.3} mL", r.suspension_ml));
    output::print_result(
        "Add medium",
        &format!(
            "{:.3} mL to reach {:.2} mL with {} cells",
            r.medium_ml, args.volume_ml, args.cells
        ),
    );

    warn_csv_unsupported(export);
    export_report(
        export,
        "Cell seeding",
        &[
            format!("Suspension: {} cells/mL", args.density),
            format!("Target: {} cells in {} mL", args.cells, args.volume_ml),
            format!("Take suspension: {:.3} mL", r.suspension_ml),
            format!("Add medium: {:.3} mL", r.medium_ml),
        ],
    );
    Ok(())
}
