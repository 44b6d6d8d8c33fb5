//! OpenAI 兼容 API 客户端
//!
//! 通过 async_openai 调用任意 OpenAI 兼容端点（可配置 base_url）；工具目录投影为
//! function calling 格式，模型响应中的 tool_calls 解析为 ToolInvocation。

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionMessageToolCalls, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionTool, ChatCompletionTools,
    CreateChatCompletionRequestArgs, FunctionObjectArgs,
};
use async_openai::Client;
use async_trait::async_trait;

use crate::core::AgentError;
use crate::llm::{LlmClient, ModelTurn, ToolInvocation};
use crate::protocol::{ChatMessage, Role, ToolDescriptor};

/// OpenAI 兼容客户端：持有 Client 与 model 名
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiClient {
    pub fn new(base_url: Option<&str>, model: &str, api_key: Option<&str>) -> Self {
        let api_key = api_key
            .map(String::from)
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .unwrap_or_else(|| "sk-placeholder".to_string());

        let config = if let Some(url) = base_url {
            OpenAIConfig::new().with_api_base(url).with_api_key(api_key)
        } else {
            OpenAIConfig::new().with_api_key(api_key)
        };

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }

    /// 历史消息转 API 格式：指令类消息（tool_call / tool_result 等）压平为带角色的文本，
    /// 让模型看到完整的调用-结果轨迹
    fn to_openai_messages(
        &self,
        messages: &[ChatMessage],
    ) -> Result<Vec<ChatCompletionRequestMessage>, AgentError> {
        let mut out = Vec::with_capacity(messages.len());
        for m in messages {
            let msg = match m {
                ChatMessage::Text { role, content } => match role {
                    Role::System => ChatCompletionRequestMessage::System(
                        ChatCompletionRequestSystemMessageArgs::default()
                            .content(content.clone())
                            .build()
                            .map_err(|e| AgentError::LlmError(e.to_string()))?,
                    ),
                    Role::User => ChatCompletionRequestMessage::User(
                        ChatCompletionRequestUserMessageArgs::default()
                            .content(content.clone())
                            .build()
                            .map_err(|e| AgentError::LlmError(e.to_string()))?,
                    ),
                    Role::Assistant => ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessageArgs::default()
                            .content(content.clone())
                            .build()
                            .map_err(|e| AgentError::LlmError(e.to_string()))?,
                    ),
                },
                ChatMessage::RenderHtml { message, tool_name, .. } => {
                    ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessageArgs::default()
                            .content(format!(
                                "Asked the user for input needed by {}: {}",
                                tool_name, message
                            ))
                            .build()
                            .map_err(|e| AgentError::LlmError(e.to_string()))?,
                    )
                }
                ChatMessage::UserInputResult { tool_name, data } => {
                    ChatCompletionRequestMessage::User(
                        ChatCompletionRequestUserMessageArgs::default()
                            .content(format!("Form input for {}: {}", tool_name, data))
                            .build()
                            .map_err(|e| AgentError::LlmError(e.to_string()))?,
                    )
                }
                ChatMessage::ToolCall { name, params, tool_call_id } => {
                    ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessageArgs::default()
                            .content(format!(
                                "Tool call {}: {} | Params: {}",
                                tool_call_id, name, params
                            ))
                            .build()
                            .map_err(|e| AgentError::LlmError(e.to_string()))?,
                    )
                }
                ChatMessage::ToolResult { result, tool_call_id, is_error } => {
                    let label = if *is_error { "failed" } else { "succeeded" };
                    ChatCompletionRequestMessage::User(
                        ChatCompletionRequestUserMessageArgs::default()
                            .content(format!(
                                "Observation from tool call {} ({}): {}",
                                tool_call_id, label, result
                            ))
                            .build()
                            .map_err(|e| AgentError::LlmError(e.to_string()))?,
                    )
                }
                ChatMessage::Error { message } => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessageArgs::default()
                        .content(format!("Previous error: {}", message))
                        .build()
                        .map_err(|e| AgentError::LlmError(e.to_string()))?,
                ),
            };
            out.push(msg);
        }
        Ok(out)
    }

    /// 工具目录投影为 function calling 格式（能力投影：只过 name/description/schema）
    fn to_openai_tools(
        &self,
        tools: &[ToolDescriptor],
    ) -> Result<Vec<ChatCompletionTools>, AgentError> {
        tools
            .iter()
            .map(|t| {
                let function = FunctionObjectArgs::default()
                    .name(t.name.clone())
                    .description(t.description.clone())
                    .parameters(t.schema.clone())
                    .build()
                    .map_err(|e| AgentError::LlmError(e.to_string()))?;
                Ok(ChatCompletionTools::Function(ChatCompletionTool { function }))
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> Result<ModelTurn, AgentError> {
        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(&self.model)
            .messages(self.to_openai_messages(messages)?);
        if !tools.is_empty() {
            builder.tools(self.to_openai_tools(tools)?);
        }
        let request = builder
            .build()
            .map_err(|e| AgentError::LlmError(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::LlmError(e.to_string()))?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "llm usage"
            );
        }

        let choice = response
            .choices
            .first()
            .ok_or_else(|| AgentError::LlmError("empty choices".to_string()))?;

        let content = choice.message.content.clone().unwrap_or_default();
        let mut invocations = Vec::new();
        if let Some(tool_calls) = &choice.message.tool_calls {
            for call in tool_calls {
                // 只处理 function 类调用；arguments 为 JSON 字符串，
                // 解析失败按空对象处理，交给 Schema 校验报缺字段
                if let ChatCompletionMessageToolCalls::Function(call) = call {
                    let arguments = serde_json::from_str(&call.function.arguments)
                        .unwrap_or_else(|_| serde_json::json!({}));
                    invocations.push(ToolInvocation {
                        id: call.id.clone(),
                        name: call.function.name.clone(),
                        arguments,
                    });
                }
            }
        }

        Ok(ModelTurn { content, invocations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> OpenAiClient {
        OpenAiClient::new(None, "gpt-4o-mini", Some("sk-test"))
    }

    #[test]
    fn test_to_openai_tools_builds_function_variant() {
        let descriptor = ToolDescriptor {
            name: "searchFlights".to_string(),
            description: "Search flights between two cities on a given date".to_string(),
            schema: json!({"type": "object"}),
        };
        let tools = client().to_openai_tools(&[descriptor]).unwrap();
        assert_eq!(tools.len(), 1);
        match &tools[0] {
            ChatCompletionTools::Function(tool) => {
                assert_eq!(tool.function.name, "searchFlights");
            }
            _ => panic!("expected function tool"),
        }
    }

    #[test]
    fn test_to_openai_messages_flattens_directives() {
        let messages = vec![
            ChatMessage::user("book a flight"),
            ChatMessage::ToolResult {
                result: json!({"flights": []}),
                tool_call_id: "call_1".to_string(),
                is_error: false,
            },
        ];
        let out = client().to_openai_messages(&messages).unwrap();
        assert_eq!(out.len(), 2);
        // 观察结果压平为 user 文本消息
        assert!(matches!(out[1], ChatCompletionRequestMessage::User(_)));
    }
}
