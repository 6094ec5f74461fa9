//! # 会话持久化
//!
//! 登录后的访问令牌与用户身份保存为本地 JSON 文件，
//! 后续命令从文件恢复会话。
//!
//! ## 依赖关系
//! - 被 `commands/account.rs` 写入，被 `commands/calc/`, `commands/reagent.rs` 读取
//! - 使用 `serde_json`

use crate::backend::plan::Plan;
use crate::error::{LabsolError, Result};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 已登录会话
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// 访问令牌
    pub access_token: String,
    /// 用户 id
    pub user_id: String,
    /// 用户邮箱
    pub email: String,
    /// 登录时查询到的订阅计划
    #[serde(default)]
    pub plan: Plan,
}

impl Session {
    /// 从会话文件加载；文件不存在视为未登录
    pub fn load(path: &Path) -> Result<Session> {
        if !path.exists() {
            return Err(LabsolError::SessionMissing);
        }
        let text = fs::read_to_string(path).map_err(|e| LabsolError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// 保存到会话文件
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| LabsolError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// 删除会话文件（登出）；文件不存在不算错误
    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path).map_err(|e| LabsolError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_round_trip() {
        let dir = std::env::temp_dir().join("labsol-session-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.json");

        let s = Session {
            access_token: "tok".to_string(),
            user_id: "uid".to_string(),
            email: "a@b.c".to_string(),
            plan: Plan::Pro,
        };
        s.save(&path).unwrap();

        let loaded = Session::load(&path).unwrap();
        assert_eq!(loaded.user_id, "uid");
        assert_eq!(loaded.email, "a@b.c");
        assert!(loaded.plan.is_pro());

        Session::clear(&path).unwrap();
        assert!(matches!(
            Session::load(&path).unwrap_err(),
            LabsolError::SessionMissing
        ));
        // 重复清除无副作用
        Session::clear(&path).unwrap();
    }
}
