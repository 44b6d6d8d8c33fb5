//! HTTP 线上格式
//!
//! 客户端 <-> Agent 服务端：POST /api/chat，请求带全量历史与工具定义，响应带更新后的全量历史，
//! 客户端只把最后一条当作新消息。Agent 服务端 <-> 渲染服务：POST /render。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::ChatMessage;

/// 工具的服务端可见投影：只有 name/description/schema 过边界，可执行体永远留在客户端
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub schema: Value,
}

/// POST /api/chat 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub tool_definitions: Vec<ToolDescriptor>,
}

/// POST /api/chat 响应体（全量历史）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub messages: Vec<ChatMessage>,
}

/// POST /render 请求体（渲染服务契约使用 camelCase 的 toolName）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    pub component: String,
    pub schema: Value,
    #[serde(rename = "toolName")]
    pub tool_name: String,
}

/// POST /render 成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResponse {
    pub html: String,
}

/// POST /render 非 2xx 时的错误响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_request_uses_camel_case_tool_name() {
        let req = RenderRequest {
            component: "dynamic-form".to_string(),
            schema: json!({"type": "object"}),
            tool_name: "searchFlights".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["toolName"], "searchFlights");
        assert!(value.get("tool_name").is_none());
    }

    #[test]
    fn test_chat_request_tool_definitions_default_empty() {
        let req: ChatRequest = serde_json::from_value(json!({
            "messages": [{"kind": "text", "role": "user", "content": "hi"}]
        }))
        .unwrap();
        assert!(req.tool_definitions.is_empty());
        assert_eq!(req.messages.len(), 1);
    }
}
