//! # 订阅计划查询
//!
//! 从 subscriptions 表读取用户计划。任何失败（网络、权限、空表、
//! 解析）一律回退到 free，从不向调用方抛错。
//!
//! ## 依赖关系
//! - 被 `commands/calc/mod.rs` 的门禁检查调用
//! - 使用 `backend/mod.rs` 的 BackendClient

use crate::backend::{BackendClient, HttpBackend};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 订阅计划
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// 免费计划
    #[default]
    Free,
    /// Pro 计划
    Pro,
}

impl Plan {
    pub fn is_pro(&self) -> bool {
        matches!(self, Plan::Pro)
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Plan::Free => write!(f, "free"),
            Plan::Pro => write!(f, "pro"),
        }
    }
}

impl<C: HttpBackend> BackendClient<C> {
    /// 查询用户计划；任何失败回退到 Free
    pub fn plan(&self, user_id: &str, access_token: &str) -> Plan {
        self.try_plan(user_id, access_token).unwrap_or(Plan::Free)
    }

    fn try_plan(&self, user_id: &str, access_token: &str) -> Option<Plan> {
        let mut url = self.endpoint("/rest/v1/subscriptions").ok()?;
        url.query_pairs_mut()
            .append_pair("select", "plan")
            .append_pair("user_id", &format!("eq.{}", user_id))
            .append_pair("limit", "1");

        let (status, text) = self
            .http
            .get(url.as_str(), &self.auth_headers(access_token))
            .ok()?;
        if !(200..300).contains(&status) {
            return None;
        }

        let rows: Value = serde_json::from_str(&text).ok()?;
        match rows.get(0)?.get("plan")?.as_str()? {
            "pro" => Some(Plan::Pro),
            _ => Some(Plan::Free),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendConfig;
    use crate::error::Result;

    struct MockHttp {
        status: u16,
        body: String,
    }

    impl HttpBackend for MockHttp {
        fn get(&self, _url: &str, _headers: &[(&str, String)]) -> Result<(u16, String)> {
            Ok((self.status, self.body.clone()))
        }
        fn post(&self, _url: &str, _headers: &[(&str, String)], _body: String) -> Result<(u16, String)> {
            Ok((self.status, self.body.clone()))
        }
    }

    fn client(status: u16, body: &str) -> BackendClient<MockHttp> {
        BackendClient::with_http(
            BackendConfig {
                base_url: "https://example.supabase.co".to_string(),
                anon_key: "anon".to_string(),
            },
            MockHttp {
                status,
                body: body.to_string(),
            },
        )
    }

    #[test]
    fn test_plan_pro() {
        let c = client(200, r#"[{"plan":"pro"}]"#);
        assert_eq!(c.plan("uid", "tok"), Plan::Pro);
    }

    #[test]
    fn test_plan_defaults_to_free() {
        // 明示 free
        assert_eq!(client(200, r#"[{"plan":"free"}]"#).plan("uid", "tok"), Plan::Free);
        // 空表
        assert_eq!(client(200, "[]").plan("uid", "tok"), Plan::Free);
        // 权限拒绝
        assert_eq!(client(403, r#"{"message":"denied"}"#).plan("uid", "tok"), Plan::Free);
        // 响应不是 JSON
        assert_eq!(client(200, "not json").plan("uid", "tok"), Plan::Free);
    }
}
