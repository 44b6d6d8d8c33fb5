//! 会话状态
//!
//! 每个请求从 POST 的历史与工具定义重建，响应完成后丢弃；并发请求之间没有共享可变状态。

use std::collections::HashMap;

use crate::protocol::{ChatMessage, ChatRequest, ToolDescriptor};

/// 单次请求的会话状态
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// 对话历史（一轮内只追加；最后一条决定下一步转移）
    pub messages: Vec<ChatMessage>,
    /// 服务端可见的工具目录（name -> 投影）
    pub tools: HashMap<String, ToolDescriptor>,
    /// 是否在等待用户输入（表单）
    pub requires_user_input: bool,
    /// 等待中的工具名
    pub pending_tool: Option<String>,
}

impl SessionState {
    pub fn from_request(request: ChatRequest) -> Self {
        let tools = request
            .tool_definitions
            .into_iter()
            .map(|d| (d.name.clone(), d))
            .collect();
        Self {
            messages: request.messages,
            tools,
            requires_user_input: false,
            pending_tool: None,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_request_indexes_tools_by_name() {
        let request = ChatRequest {
            messages: vec![ChatMessage::user("hi")],
            tool_definitions: vec![ToolDescriptor {
                name: "searchFlights".to_string(),
                description: "Search flights".to_string(),
                schema: json!({"type": "object"}),
            }],
        };
        let state = SessionState::from_request(request);
        assert!(state.tools.contains_key("searchFlights"));
        assert!(!state.requires_user_input);
        assert!(state.pending_tool.is_none());
    }
}
