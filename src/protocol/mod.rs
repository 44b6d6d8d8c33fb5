//! 消息契约与 HTTP 线上格式
//!
//! 三个独立进程（聊天前端 / Agent 服务端 / 渲染服务）之间交换的全部数据形状。
//! 对话历史按值随每个请求传递，没有共享可变存储。

pub mod messages;
pub mod wire;

pub use messages::{parse_message, ChatMessage, Role};
pub use wire::{ChatRequest, ChatResponse, RenderRequest, RenderResponse, ToolDescriptor};
