//! Mock 渲染客户端（用于测试，无需渲染服务）

use async_trait::async_trait;

use crate::core::AgentError;
use crate::protocol::RenderRequest;
use crate::render::Renderer;

/// Mock 渲染器：返回固定结构的 HTML，或按需失败
#[derive(Debug, Default)]
pub struct MockRenderer {
    fail: bool,
}

impl MockRenderer {
    /// 每次 render 都失败（测试道歉降级路径）
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl Renderer for MockRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<String, AgentError> {
        if self.fail {
            return Err(AgentError::RenderFailed("mock render failure".to_string()));
        }
        Ok(format!(
            "<form data-component=\"{}\" data-tool=\"{}\"></form>",
            request.component, request.tool_name
        ))
    }
}
