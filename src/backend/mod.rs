//! # 后端客户端模块
//!
//! 封装托管后端（Supabase 风格 REST）的三类协作方：身份认证、
//! 订阅查询、试剂收藏。HTTP 层抽象为 `HttpBackend` trait，
//! 测试时可注入 mock 实现。
//!
//! ## 依赖关系
//! - 被 `commands/account.rs`, `commands/reagent.rs`, `commands/calc/` 使用
//! - 使用 `reqwest` blocking 客户端
//! - 子模块: auth, plan, reagents, session

pub mod auth;
pub mod plan;
pub mod reagents;
pub mod session;

use crate::error::Result;

use reqwest::blocking::Client;
use url::Url;

/// HTTP 后端抽象（依赖注入，便于测试）
pub trait HttpBackend {
    /// GET 请求，返回 (状态码, 响应体)
    fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<(u16, String)>;

    /// POST JSON 请求，返回 (状态码, 响应体)
    fn post(&self, url: &str, headers: &[(&str, String)], body: String) -> Result<(u16, String)>;
}

impl HttpBackend for Client {
    fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<(u16, String)> {
        let mut req = self.get(url);
        for (name, value) in headers {
            req = req.header(*name, value.as_str());
        }
        let resp = req.send()?;
        let status = resp.status().as_u16();
        Ok((status, resp.text()?))
    }

    fn post(&self, url: &str, headers: &[(&str, String)], body: String) -> Result<(u16, String)> {
        let mut req = self.post(url).header("Content-Type", "application/json");
        for (name, value) in headers {
            req = req.header(*name, value.as_str());
        }
        let resp = req.body(body).send()?;
        let status = resp.status().as_u16();
        Ok((status, resp.text()?))
    }
}

/// 后端连接配置
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// 项目基础 URL
    pub base_url: String,
    /// 匿名 API key
    pub anon_key: String,
}

/// 后端客户端
pub struct BackendClient<C: HttpBackend> {
    pub(crate) config: BackendConfig,
    pub(crate) http: C,
}

impl BackendClient<Client> {
    /// 创建使用真实 HTTP 客户端的后端客户端
    pub fn new(config: BackendConfig) -> Self {
        BackendClient {
            config,
            http: Client::new(),
        }
    }
}

impl<C: HttpBackend> BackendClient<C> {
    /// 创建使用自定义 HTTP 实现的客户端（测试用）
    pub fn with_http(config: BackendConfig, http: C) -> Self {
        BackendClient { config, http }
    }

    /// 拼接 API 路径
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        let base = Url::parse(&self.config.base_url)?;
        Ok(base.join(path)?)
    }

    /// 匿名请求头
    pub(crate) fn anon_headers(&self) -> Vec<(&'static str, String)> {
        vec![("apikey", self.config.anon_key.clone())]
    }

    /// 携带用户令牌的请求头
    pub(crate) fn auth_headers(&self, access_token: &str) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", self.config.anon_key.clone()),
            ("Authorization", format!("Bearer {}", access_token)),
        ]
    }
}
