//! 渲染服务客户端
//!
//! human_in_the_loop 节点调用外部渲染服务，把「组件 + 工具参数 Schema」换成 HTML 字符串，
//! 客户端收到后水合成表单。渲染失败是系统里唯一的本地恢复路径（降级为道歉文本）。

pub mod http;
pub mod mock;

pub use http::HttpRenderer;
pub use mock::MockRenderer;

use async_trait::async_trait;

use crate::core::AgentError;
use crate::protocol::RenderRequest;

/// 渲染服务 trait：组件 + Schema -> HTML
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, request: &RenderRequest) -> Result<String, AgentError>;
}

/// 由工具描述生成表单提示语（render_html 的 message 字段）
pub fn form_prompt(description: &str) -> String {
    format!(
        "I need a bit more information before I can {}. Please fill in the form below.",
        description.to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_prompt_contains_lowercased_description() {
        let prompt = form_prompt("Search Flights Between Two Cities");
        assert!(prompt.contains("search flights between two cities"));
    }
}
