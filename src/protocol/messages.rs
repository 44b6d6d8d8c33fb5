//! 消息契约定义
//!
//! 封闭的 tagged union（判别字段 kind），客户端与服务端的每个消费方都做穷尽匹配；
//! 未知 kind 或缺字段一律拒绝，不做 best-effort 取字段。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::AgentError;

/// 消息角色（与 LLM API 一致）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// 单条消息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatMessage {
    /// 普通对话内容
    Text { role: Role, content: String },

    /// 服务端指令：客户端须渲染 html 并按 schema 水合表单
    RenderHtml {
        html: String,
        component_id: String,
        /// 面向用户的提示语（由工具描述生成）
        message: String,
        schema: Value,
        tool_name: String,
    },

    /// 客户端指令：用户已完成渲染出的表单
    UserInputResult { tool_name: String, data: Value },

    /// Agent 指令：客户端须在本地执行已注册的工具
    ToolCall {
        name: String,
        params: Value,
        tool_call_id: String,
    },

    /// 客户端指令：一次工具执行的结果
    ToolResult {
        result: Value,
        tool_call_id: String,
        is_error: bool,
    },

    /// 统一的错误上报通道（幻觉工具、模型调用失败等写回历史）
    Error { message: String },
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::Text {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Text {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::Text {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// 将未定型 JSON 解析为契约消息；未知判别值与缺字段均返回 InvalidPayload
pub fn parse_message(value: Value) -> Result<ChatMessage, AgentError> {
    serde_json::from_value(value).map_err(|e| AgentError::InvalidPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_text() {
        let msg = parse_message(json!({
            "kind": "text", "role": "user", "content": "hi"
        }))
        .unwrap();
        assert!(matches!(msg, ChatMessage::Text { role: Role::User, .. }));
    }

    #[test]
    fn test_parse_tool_call() {
        let msg = parse_message(json!({
            "kind": "tool_call",
            "name": "searchFlights",
            "params": {"departureCity": "NYC"},
            "tool_call_id": "call_1"
        }))
        .unwrap();
        match msg {
            ChatMessage::ToolCall { name, tool_call_id, .. } => {
                assert_eq!(name, "searchFlights");
                assert_eq!(tool_call_id, "call_1");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_render_html() {
        let msg = parse_message(json!({
            "kind": "render_html",
            "html": "<form></form>",
            "component_id": "dynamic-form",
            "message": "please fill in",
            "schema": {"type": "object"},
            "tool_name": "searchFlights"
        }))
        .unwrap();
        assert!(matches!(msg, ChatMessage::RenderHtml { .. }));
    }

    #[test]
    fn test_reject_unknown_kind() {
        let err = parse_message(json!({"kind": "telepathy", "content": "?"}));
        assert!(matches!(err, Err(AgentError::InvalidPayload(_))));
    }

    #[test]
    fn test_reject_missing_field() {
        // tool_result 缺 tool_call_id
        let err = parse_message(json!({
            "kind": "tool_result", "result": {}, "is_error": false
        }));
        assert!(matches!(err, Err(AgentError::InvalidPayload(_))));
    }

    #[test]
    fn test_roundtrip_user_input_result() {
        let msg = ChatMessage::UserInputResult {
            tool_name: "searchFlights".to_string(),
            data: json!({"departureCity": "NYC"}),
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["kind"], "user_input_result");
        let back = parse_message(value).unwrap();
        assert!(matches!(back, ChatMessage::UserInputResult { .. }));
    }
}
