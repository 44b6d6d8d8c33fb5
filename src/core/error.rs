//! Agent 错误类型
//!
//! 统一的错误分类：模型调用、渲染调用、工具查找与参数校验、协议解析。
//! 决策循环内的模型/渲染失败不上抛，而是转为 error 消息写回对话历史。

use thiserror::Error;

/// Agent 运行过程中可能出现的错误（模型、渲染、工具、协议等）
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    LlmError(String),

    /// 模型调用超过配置的 deadline
    #[error("LLM timeout after {0}s")]
    LlmTimeout(u64),

    #[error("Render failed: {0}")]
    RenderFailed(String),

    /// 模型请求了目录中不存在的工具
    #[error("The model requested a tool that is not registered: {0}")]
    HallucinatedTool(String),

    /// 消息无法按契约解析（未知 kind 或缺字段）
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// 参数不满足工具声明的 JSON Schema
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool execution failed: {0}")]
    ToolExecutionFailed(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hallucinated_tool_display_names_tool() {
        let e = AgentError::HallucinatedTool("bookHotel".to_string());
        assert!(e.to_string().contains("bookHotel"));
        assert!(e.to_string().contains("not registered"));
    }
}
