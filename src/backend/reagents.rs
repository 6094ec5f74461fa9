//! # 试剂收藏持久化
//!
//! 按用户读写 reagents 表：列出收藏（按创建时间倒序）、保存新收藏。
//!
//! ## 依赖关系
//! - 被 `commands/reagent.rs`, `commands/calc/solution.rs` 调用
//! - 使用 `models/favorite.rs` 的 ReagentFavorite

use crate::backend::{BackendClient, HttpBackend};
use crate::error::{LabsolError, Result};
use crate::models::ReagentFavorite;

use serde_json::json;

impl<C: HttpBackend> BackendClient<C> {
    /// 列出用户收藏的试剂（created_at 倒序）
    pub fn list_favorites(&self, user_id: &str, access_token: &str) -> Result<Vec<ReagentFavorite>> {
        let mut url = self.endpoint("/rest/v1/reagents")?;
        url.query_pairs_mut()
            .append_pair("select", "name,mw,note,created_at")
            .append_pair("user_id", &format!("eq.{}", user_id))
            .append_pair("order", "created_at.desc");

        let (status, text) = self
            .http
            .get(url.as_str(), &self.auth_headers(access_token))?;
        if !(200..300).contains(&status) {
            return Err(LabsolError::Backend {
                status,
                message: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// 保存一条收藏
    pub fn save_favorite(
        &self,
        user_id: &str,
        access_token: &str,
        favorite: &ReagentFavorite,
    ) -> Result<()> {
        let url = self.endpoint("/rest/v1/reagents")?;
        let body = json!({
            "user_id": user_id,
            "name": favorite.name,
            "mw": favorite.mw,
            "note": favorite.note,
        })
        .to_string();

        let mut headers = self.auth_headers(access_token);
        headers.push(("Prefer", "return=minimal".to_string()));

        let (status, text) = self.http.post(url.as_str(), &headers, body)?;
        if !(200..300).contains(&status) {
            return Err(LabsolError::Backend {
                status,
                message: text,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendConfig;

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
    fn test_list_favorites_decodes_rows() {
        let c = client(
            200,
            r#"[{"name":"retinal","mw":284.44,"note":"from app","created_at":"2025-01-01T00:00:00Z"},
                {"name":"gaba","mw":103.12,"note":""}]"#,
        );
        let favs = c.list_favorites("uid", "tok").unwrap();
        assert_eq!(favs.len(), 2);
        assert_eq!(favs[0].name, "retinal");
        assert!((favs[0].mw - 284.44).abs() < 1e-9);
        assert_eq!(favs[1].note, "");
    }

    #[test]
    fn test_list_favorites_propagates_backend_error() {
        let c = client(401, r#"{"message":"JWT expired"}"#);
        let err = c.list_favorites("uid", "tok").unwrap_err();
        assert!(matches!(err, LabsolError::Backend { status: 401, .. }));
    }

    #[test]
    fn test_save_favorite_created() {
        let c = client(201, "");
        let fav = ReagentFavorite::new("forskolin", 410.5, "from app");
        assert!(c.save_favorite("uid", "tok", &fav).is_ok());
    }
}
