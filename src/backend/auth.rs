//! # 身份认证
//!
//! 邮箱 + 密码登录与注册（GoTrue 风格接口）。
//!
//! ## 依赖关系
//! - 被 `commands/account.rs` 调用
//! - 使用 `backend/mod.rs` 的 BackendClient 与 HttpBackend

use crate::backend::{BackendClient, HttpBackend};
use crate::backend::plan::Plan;
use crate::backend::session::Session;
use crate::error::{LabsolError, Result};

use serde_json::{json, Value};

impl<C: HttpBackend> BackendClient<C> {
    /// 登录：成功返回会话（令牌 + 用户身份）
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let url = self.endpoint("/auth/v1/token?grant_type=password")?;
        let body = json!({ "email": email, "password": password }).to_string();

        let (status, text) = self.http.post(url.as_str(), &self.anon_headers(), body)?;
        if !(200..300).contains(&status) {
            return Err(LabsolError::AuthFailed {
                reason: extract_error_message(&text, status),
            });
        }

        let v: Value = serde_json::from_str(&text)?;
        let access_token = v["access_token"]
            .as_str()
            .ok_or_else(|| LabsolError::AuthFailed {
                reason: "Response contained no access token".to_string(),
            })?;
        let user_id = v["user"]["id"].as_str().ok_or_else(|| LabsolError::AuthFailed {
            reason: "Response contained no user id".to_string(),
        })?;
        let user_email = v["user"]["email"].as_str().unwrap_or(email);

        Ok(Session {
            access_token: access_token.to_string(),
            user_id: user_id.to_string(),
            email: user_email.to_string(),
            plan: Plan::default(),
        })
    }

    /// 注册新账户（后端触发器会创建 profile 与 free 订阅）
    pub fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<()> {
        let url = self.endpoint("/auth/v1/signup")?;
        let body = json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name },
        })
        .to_string();

        let (status, text) = self.http.post(url.as_str(), &self.anon_headers(), body)?;
        if !(200..300).contains(&status) {
            return Err(LabsolError::AuthFailed {
                reason: extract_error_message(&text, status),
            });
        }
        Ok(())
    }
}

/// 从错误响应体提取可读消息
fn extract_error_message(text: &str, status: u16) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(text) {
        for key in ["error_description", "msg", "message", "error"] {
            if let Some(msg) = v[key].as_str() {
                return msg.to_string();
            }
        }
    }
    format!("HTTP status {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendConfig;

    /// 返回固定响应的 mock 后端
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
    fn test_sign_in_success() {
        let c = client(
            200,
            r#"{"access_token":"tok123","user":{"id":"uid-1","email":"a@b.c"}}"#,
        );
        let s = c.sign_in("a@b.c", "pw").unwrap();
        assert_eq!(s.access_token, "tok123");
        assert_eq!(s.user_id, "uid-1");
        assert_eq!(s.email, "a@b.c");
    }

    #[test]
    fn test_sign_in_session_starts_on_free_plan() {
        // 计划在登录后单独查询；sign_in 返回的会话应为 free
        let c = client(
            200,
            r#"{"access_token":"tok123","user":{"id":"uid-1","email":"a@b.c"}}"#,
        );
        let s = c.sign_in("a@b.c", "pw").unwrap();
        assert!(!s.plan.is_pro());
    }

    #[test]
    fn test_sign_in_bad_credentials() {
        let c = client(400, r#"{"error_description":"Invalid login credentials"}"#);
        let err = c.sign_in("a@b.c", "wrong").unwrap_err();
        assert!(err.to_string().contains("Invalid login credentials"));
    }

    #[test]
    fn test_sign_up_error_without_json_body() {
        let c = client(500, "gateway exploded");
        let err = c.sign_up("a@b.c", "pw", "Name").unwrap_err();
        assert!(err.to_string().contains("500"));
    }
}
