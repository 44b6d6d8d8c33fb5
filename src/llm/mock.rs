//! Mock LLM 客户端（用于测试，无需 API）
//!
//! 可用 with_turns 预置脚本化响应（依次弹出）；脚本用尽或未预置时回显最后一条
//! 用户消息，便于本地跑通完整决策循环。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::AgentError;
use crate::llm::{LlmClient, ModelTurn};
use crate::protocol::{ChatMessage, Role, ToolDescriptor};

/// Mock 客户端：脚本化响应或回显
#[derive(Debug, Default)]
pub struct MockLlmClient {
    turns: Mutex<VecDeque<ModelTurn>>,
    fail: bool,
}

impl MockLlmClient {
    /// 预置响应脚本，complete 依次弹出
    pub fn with_turns(turns: Vec<ModelTurn>) -> Self {
        Self {
            turns: Mutex::new(turns.into()),
            fail: false,
        }
    }

    /// 每次 complete 都失败（测试模型调用失败路径）
    pub fn failing() -> Self {
        Self {
            turns: Mutex::new(VecDeque::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _tools: &[ToolDescriptor],
    ) -> Result<ModelTurn, AgentError> {
        if self.fail {
            return Err(AgentError::LlmError("mock failure".to_string()));
        }
        if let Some(turn) = self.turns.lock().expect("mock lock").pop_front() {
            return Ok(turn);
        }
        let last_user = messages
            .iter()
            .rev()
            .find_map(|m| match m {
                ChatMessage::Text { role: Role::User, content } => Some(content.as_str()),
                _ => None,
            })
            .unwrap_or("(no input)");
        Ok(ModelTurn::text(format!("Echo from Mock: {}", last_user)))
    }
}
