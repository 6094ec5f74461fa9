//! # 报告与数据导出
//!
//! 文本协议报告（标题 + 行）与表格模式的 CSV 导出。
//! 导出是尽力而为的：失败只产生警告，不影响结果的终端显示。
//!
//! ## 支持格式
//! - 文本报告: `#` 前缀头部 + 正文行
//! - CSV: 表格模式的逐行数据
//!
//! ## 依赖关系
//! - 被 `commands/calc/` 各模块调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{LabsolError, Result};

use std::fs;
use std::path::Path;

/// 渲染文本报告为字节
pub fn render(title: &str, lines: &[String]) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(&format!("# {}\n", title));
    out.push_str("# Generated by labsol\n");
    out.push_str("#\n");
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.into_bytes()
}

/// 将报告写入文件
pub fn write_report(title: &str, lines: &[String], output_path: &Path) -> Result<()> {
    fs::write(output_path, render(title, lines)).map_err(|e| LabsolError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })
}

/// 将表头 + 数据行写入 CSV 文件
pub fn write_csv(header: &[&str], rows: &[Vec<String>], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(LabsolError::CsvError)?;

    wtr.write_record(header).map_err(LabsolError::CsvError)?;
    for row in rows {
        wtr.write_record(row).map_err(LabsolError::CsvError)?;
    }

    wtr.flush().map_err(|e| LabsolError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let bytes = render(
            "Single dilution report",
            &["Stock: 25 mM".to_string(), "Take from stock: 48.00 ul".to_string()],
        );
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("# Single dilution report\n"));
        assert!(text.contains("Take from stock: 48.00 ul"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_write_csv() {
        let dir = std::env::temp_dir().join("labsol-report-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rows.csv");

        write_csv(
            &["step", "conc"],
            &[
                vec!["1".to_string(), "12.5".to_string()],
                vec!["2".to_string(), "6.25".to_string()],
            ],
            &path,
        )
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("step,conc\n"));
        assert!(text.contains("2,6.25"));
    }
}
