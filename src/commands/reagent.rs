//! # reagent 命令实现
//!
//! 列出与保存试剂收藏。
//!
//! ## 依赖关系
//! - 使用 `cli/reagent.rs` 定义的参数
//! - 使用 `backend/reagents.rs`, `backend/session.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::backend::session::Session;
use crate::cli::reagent::{ReagentArgs, ReagentCommands, SaveArgs};
use crate::cli::BackendArgs;
use crate::commands::backend_client;
use crate::error::Result;
use crate::models::ReagentFavorite;
use crate::utils::{output, progress};

use tabled::{Table, Tabled};

/// 收藏列表的显示行
#[derive(Tabled)]
struct FavoriteRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MW (g/mol)")]
    mw: String,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Saved")]
    saved: String,
}

/// 执行 reagent 命令
pub fn execute(args: ReagentArgs) -> Result<()> {
    match args.command {
        ReagentCommands::List => run_list(&args.backend),
        ReagentCommands::Save(save) => run_save(&args.backend, save),
    }
}

fn run_list(backend: &BackendArgs) -> Result<()> {
    let session = Session::load(&backend.session_file)?;
    let client = backend_client(backend)?;

    let pb = progress::create_spinner("Loading favorites...");
    let favorites = client.list_favorites(&session.user_id, &session.access_token);
    pb.finish_and_clear();
    let favorites = favorites?;

    if favorites.is_empty() {
        output::print_info("No saved reagents yet.");
        return Ok(());
    }

    output::print_header(&format!("Saved reagents ({})", favorites.len()));

    let rows: Vec<FavoriteRow> = favorites
        .iter()
        .map(|f| FavoriteRow {
            name: f.name.clone(),
            mw: format!("{:.2}", f.mw),
            note: f.note.clone(),
            saved: f.created_at.clone().unwrap_or_default(),
        })
        .collect();

    println!("{}", Table::new(&rows));
    Ok(())
}

fn run_save(backend: &BackendArgs, args: SaveArgs) -> Result<()> {
    let session = Session::load(&backend.session_file)?;
    let client = backend_client(backend)?;

    let favorite = ReagentFavorite::new(&args.name, args.mw, &args.note);

    let pb = progress::create_spinner("Saving...");
    let result = client.save_favorite(&session.user_id, &session.access_token, &favorite);
    pb.finish_and_clear();
    result?;

    output::print_success(&format!("Saved '{}' to favorites.", args.name));
    Ok(())
}
