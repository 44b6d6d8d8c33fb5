//! LLM 客户端抽象与实现
//!
//! 所有后端（OpenAI 兼容 / Mock）实现 LlmClient：携带工具目录做一次 function calling 补全，
//! 返回 ModelTurn（文本 + 工具调用请求）。

pub mod mock;
pub mod openai;
pub mod traits;

pub use mock::MockLlmClient;
pub use openai::OpenAiClient;
pub use traits::{LlmClient, ModelTurn, ToolInvocation};
