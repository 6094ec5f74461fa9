//! # 常用缓冲液配方
//!
//! PBS / TBS / Tris 的固定配方表（1 L）。
//!
//! ## 依赖关系
//! - 被 `commands/calc/wetlab.rs` 调用
//! - 纯静态数据，无外部依赖

use crate::error::{LabsolError, Result};

use std::sync::LazyLock;

/// 配方中的一种组分
#[derive(Debug, Clone)]
pub struct RecipeItem {
    /// 组分名称
    pub component: &'static str,
    /// 用量描述（含单位）
    pub amount: &'static str,
}

/// 缓冲液配方
#[derive(Debug, Clone)]
pub struct BufferRecipe {
    /// 键名（命令行用）
    pub key: &'static str,
    /// 显示标题
    pub title: &'static str,
    /// 组分列表
    pub items: Vec<RecipeItem>,
    /// 配制说明
    pub instructions: &'static str,
}

/// 配方表
pub static BUFFER_RECIPES: LazyLock<Vec<BufferRecipe>> = LazyLock::new(|| {
    vec![
        BufferRecipe {
            key: "pbs-1x",
            title: "PBS 1x (pH 7.4) for 1 L",
            items: vec![
                RecipeItem { component: "NaCl", amount: "8.0 g" },
                RecipeItem { component: "KCl", amount: "0.2 g" },
                RecipeItem { component: "Na2HPO4 (anhydrous)", amount: "1.44 g" },
                RecipeItem { component: "KH2PO4", amount: "0.24 g" },
            ],
            instructions: "Dissolve in ~800 mL, adjust pH, bring to 1 L.",
        },
        BufferRecipe {
            key: "pbs-10x",
            title: "PBS 10x (pH 7.4) for 1 L",
            items: vec![
                RecipeItem { component: "NaCl", amount: "80 g" },
                RecipeItem { component: "KCl", amount: "2 g" },
                RecipeItem { component: "Na2HPO4", amount: "14.4 g" },
                RecipeItem { component: "KH2PO4", amount: "2.4 g" },
            ],
            instructions: "Dissolve, adjust, bring to 1 L.",
        },
        BufferRecipe {
            key: "tbs-1x",
            title: "TBS 1x for 1 L",
            items: vec![
                RecipeItem { component: "NaCl", amount: "8.0 g" },
                RecipeItem { component: "Tris base", amount: "3.0 g" },
            ],
            instructions: "Adjust pH to 7.4-7.6 with HCl, bring to 1 L.",
        },
        BufferRecipe {
            key: "tris-1m",
            title: "Tris 1 M pH 8.0 (1 L)",
            items: vec![RecipeItem {
                component: "Tris base (MW 121.14)",
                amount: "121.14 g",
            }],
            instructions: "Dissolve in ~800 mL, adjust pH with HCl, bring to 1 L.",
        },
    ]
});

/// 已知缓冲液键名列表
pub fn known_buffers() -> Vec<&'static str> {
    BUFFER_RECIPES.iter().map(|r| r.key).collect()
}

/// 按键名查找配方
pub fn recipe(name: &str) -> Result<&'static BufferRecipe> {
    let key = name.to_lowercase();
    BUFFER_RECIPES
        .iter()
        .find(|r| r.key == key)
        .ok_or_else(|| LabsolError::UnknownBuffer {
            name: name.to_string(),
            known: known_buffers().join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_lookup() {
        let r = recipe("PBS-1x").unwrap();
        assert_eq!(r.items.len(), 4);
        assert_eq!(r.items[0].component, "NaCl");

        assert!(recipe("hepes").is_err());
    }

    #[test]
    fn test_known_buffers() {
        let known = known_buffers();
        assert!(known.contains(&"pbs-10x"));
        assert!(known.contains(&"tris-1m"));
    }
}
