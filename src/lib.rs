//! Weaver - Rust 生成式 UI 智能体服务
//!
//! 聊天前端、Agent 服务端与渲染服务三个独立进程，靠统一的消息契约保持对话状态同步；
//! Agent 在每轮模型响应后决策：执行工具、渲染表单等待用户输入、或结束。
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型
//! - **graph**: 编排状态机（agent / tool_executor / human_in_the_loop / end）
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Mock），含 function calling
//! - **protocol**: 消息契约与 HTTP 线上格式
//! - **render**: 渲染服务客户端（组件 + Schema -> HTML）
//! - **tools**: 工具注册表（能力投影、参数校验）与演示工具

pub mod config;
pub mod core;
pub mod graph;
pub mod llm;
pub mod protocol;
pub mod render;
pub mod tools;
