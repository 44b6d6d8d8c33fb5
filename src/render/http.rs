//! HTTP 渲染客户端
//!
//! POST {base_url}/render，请求体 { component, schema, toolName }；
//! 2xx 返回 { html }，非 2xx 的 { error } 转为 AgentError::RenderFailed。

use std::time::Duration;

use async_trait::async_trait;

use crate::core::AgentError;
use crate::protocol::wire::RenderErrorBody;
use crate::protocol::{RenderRequest, RenderResponse};
use crate::render::Renderer;

pub struct HttpRenderer {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRenderer {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        // 构造期失败直接 panic，避免默认客户端丢掉超时配置
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("http client construction failed");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<String, AgentError> {
        let url = format!("{}/render", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AgentError::RenderFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<RenderErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("status {}", status));
            return Err(AgentError::RenderFailed(detail));
        }

        let body: RenderResponse = response
            .json()
            .await
            .map_err(|e| AgentError::RenderFailed(e.to_string()))?;
        Ok(body.html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builds_client_and_trims_trailing_slash() {
        let renderer = HttpRenderer::new("http://127.0.0.1:3001/", 5);
        assert_eq!(renderer.base_url, "http://127.0.0.1:3001");
    }
}
