//! 决策循环
//!
//! 每个请求一次遍历：入口按历史末尾分派（user_input_result 走确定性恢复，其余进 agent 节点），
//! 之后应用 route 的判定走到终态。模型/渲染调用都有显式 deadline；两类外部失败都不上抛，
//! 模型失败与幻觉工具统一写 error 消息，渲染失败降级为道歉文本。

use std::sync::Arc;
use std::time::Duration;

use crate::core::AgentError;
use crate::graph::route::{route, Route};
use crate::graph::state::SessionState;
use crate::llm::{LlmClient, ModelTurn};
use crate::protocol::{ChatMessage, RenderRequest};
use crate::render::{form_prompt, Renderer};
use crate::tools::validate_args;

/// 渲染失败时替代表单的道歉文本
const RENDER_APOLOGY: &str =
    "I'm sorry, I couldn't prepare the input form. Please describe the details in plain text.";

/// 决策循环：组件与 deadline 配置
pub struct DecisionCycle {
    llm: Arc<dyn LlmClient>,
    renderer: Arc<dyn Renderer>,
    /// 渲染组件标识（render_html 的 component_id）
    component: String,
    llm_timeout: Duration,
    render_timeout: Duration,
}

impl DecisionCycle {
    pub fn new(llm: Arc<dyn LlmClient>, renderer: Arc<dyn Renderer>, component: &str) -> Self {
        Self {
            llm,
            renderer,
            component: component.to_string(),
            llm_timeout: Duration::from_secs(60),
            render_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeouts(mut self, llm_secs: u64, render_secs: u64) -> Self {
        self.llm_timeout = Duration::from_secs(llm_secs);
        self.render_timeout = Duration::from_secs(render_secs);
        self
    }

    /// 执行一次决策循环：从 agent 节点（或表单恢复入口）走到终态，返回更新后的状态。
    /// 不会失败：外部调用的错误以 error / text 消息形式写回历史。
    pub async fn run(&self, mut state: SessionState) -> SessionState {
        if let Some(ChatMessage::UserInputResult { tool_name, data }) = state.last_message() {
            let tool_name = tool_name.clone();
            let data = data.clone();
            self.resume_user_input(&mut state, &tool_name, data).await;
            return state;
        }

        let turn = match self.agent_node(&state).await {
            Ok(turn) => turn,
            Err(e) => {
                tracing::warn!("agent node failed: {}", e);
                state.push(ChatMessage::error(e.to_string()));
                return state;
            }
        };

        let decision = route(&state.tools, Some(&turn));
        state.requires_user_input = decision.requires_user_input;
        state.pending_tool = decision.pending_tool.clone();

        match decision.target {
            Route::End => {
                if let Some(name) = decision.unknown_tool {
                    let e = AgentError::HallucinatedTool(name);
                    tracing::warn!("{}", e);
                    state.push(ChatMessage::error(e.to_string()));
                } else {
                    state.push(ChatMessage::assistant(turn.content));
                }
            }
            Route::ToolExecutor => self.tool_executor_node(&mut state, &turn),
            Route::HumanInTheLoop => {
                // pending_tool 由 route 设置；此分支下必有值
                if let Some(tool_name) = state.pending_tool.clone() {
                    self.human_in_the_loop_node(&mut state, &tool_name).await;
                }
            }
        }

        state
    }

    /// agent 节点：全量历史 + 工具目录 -> 一条模型响应，带 deadline
    async fn agent_node(&self, state: &SessionState) -> Result<ModelTurn, AgentError> {
        let mut catalog: Vec<_> = state.tools.values().cloned().collect();
        catalog.sort_by(|a, b| a.name.cmp(&b.name));
        tokio::time::timeout(
            self.llm_timeout,
            self.llm.complete(&state.messages, &catalog),
        )
        .await
        .map_err(|_| AgentError::LlmTimeout(self.llm_timeout.as_secs()))?
    }

    /// tool_executor 节点：把第一个调用请求转发为 tool_call 指令，执行交给客户端
    fn tool_executor_node(&self, state: &mut SessionState, turn: &ModelTurn) {
        if let Some(invocation) = turn.invocations.first() {
            tracing::info!(tool = %invocation.name, "emitting tool_call directive");
            state.push(ChatMessage::ToolCall {
                name: invocation.name.clone(),
                params: invocation.arguments.clone(),
                tool_call_id: invocation.id.clone(),
            });
        }
    }

    /// human_in_the_loop 节点：渲染表单；失败时降级为道歉文本（唯一的本地恢复路径）
    async fn human_in_the_loop_node(&self, state: &mut SessionState, tool_name: &str) {
        let descriptor = match state.tools.get(tool_name) {
            Some(d) => d.clone(),
            None => {
                state.requires_user_input = false;
                state.pending_tool = None;
                state.push(ChatMessage::error(
                    AgentError::HallucinatedTool(tool_name.to_string()).to_string(),
                ));
                return;
            }
        };

        let request = RenderRequest {
            component: self.component.clone(),
            schema: descriptor.schema.clone(),
            tool_name: tool_name.to_string(),
        };
        let rendered = tokio::time::timeout(self.render_timeout, self.renderer.render(&request))
            .await
            .map_err(|_| AgentError::RenderFailed("render deadline exceeded".to_string()))
            .and_then(|r| r);

        match rendered {
            Ok(html) => {
                tracing::info!(tool = %tool_name, "emitting render_html directive");
                state.push(ChatMessage::RenderHtml {
                    html,
                    component_id: self.component.clone(),
                    message: form_prompt(&descriptor.description),
                    schema: descriptor.schema,
                    tool_name: tool_name.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!("render failed: {}", e);
                // 表单没有发出去，不能让状态声称还在等表单输入
                state.requires_user_input = false;
                state.pending_tool = None;
                state.push(ChatMessage::assistant(RENDER_APOLOGY));
            }
        }
    }

    /// 表单恢复入口：user_input_result 的数据过 Schema 即直接发 tool_call（不再请求模型），
    /// 不符则重新渲染表单
    async fn resume_user_input(
        &self,
        state: &mut SessionState,
        tool_name: &str,
        data: serde_json::Value,
    ) {
        let descriptor = match state.tools.get(tool_name) {
            Some(d) => d.clone(),
            None => {
                state.push(ChatMessage::error(format!(
                    "Form input referenced an unregistered tool: {}",
                    tool_name
                )));
                return;
            }
        };

        match validate_args(&descriptor.schema, &data) {
            Ok(()) => {
                state.requires_user_input = false;
                state.pending_tool = None;
                state.push(ChatMessage::ToolCall {
                    name: tool_name.to_string(),
                    params: data,
                    tool_call_id: format!("call_{}", uuid::Uuid::new_v4().simple()),
                });
            }
            Err(e) => {
                tracing::info!(tool = %tool_name, "form input invalid, re-rendering: {}", e);
                state.requires_user_input = true;
                state.pending_tool = Some(tool_name.to_string());
                self.human_in_the_loop_node(state, tool_name).await;
            }
        }
    }
}
