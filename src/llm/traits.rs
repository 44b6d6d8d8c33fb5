//! LLM 客户端抽象
//!
//! complete：历史 + 工具目录 -> 一条模型响应。工具目录以各后端的 function calling
//! 格式投影；模型只能「请求」执行，真正的执行永远在客户端。

use async_trait::async_trait;
use serde_json::Value;

use crate::core::AgentError;
use crate::protocol::{ChatMessage, ToolDescriptor};

/// 模型响应中的一次工具调用请求
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: format!("call_{}", uuid::Uuid::new_v4().simple()),
            name: name.into(),
            arguments,
        }
    }
}

/// 一条模型响应：文本内容与零或多个工具调用请求
#[derive(Debug, Clone, Default)]
pub struct ModelTurn {
    pub content: String,
    pub invocations: Vec<ToolInvocation>,
}

impl ModelTurn {
    /// 纯文本响应（最终回答）
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            invocations: Vec::new(),
        }
    }

    /// 带一次工具调用请求的响应
    pub fn with_invocation(content: impl Into<String>, invocation: ToolInvocation) -> Self {
        Self {
            content: content.into(),
            invocations: vec![invocation],
        }
    }
}

/// LLM 客户端 trait：一次携带工具目录的补全
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> Result<ModelTurn, AgentError>;
}
