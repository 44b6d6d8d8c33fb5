//! 转移函数
//!
//! 纯函数：工具目录 + 模型响应 -> 去向与新的会话标记。路由本身不改任何状态，
//! 由决策循环统一应用返回的 RouteDecision，避免路由与状态更新的隐式耦合。
//!
//! 模型一轮请求多个工具调用时只处理第一个，其余丢弃（与线上行为一致的已记录限制）。

use std::collections::HashMap;

use crate::llm::ModelTurn;
use crate::protocol::ToolDescriptor;
use crate::tools::validate_args;

/// 路由去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ToolExecutor,
    HumanInTheLoop,
    End,
}

/// 一次路由的完整输出：去向 + 会话标记
#[derive(Debug, Clone)]
pub struct RouteDecision {
    pub target: Route,
    pub requires_user_input: bool,
    pub pending_tool: Option<String>,
    /// 模型请求了目录外的工具时，其名字（决策循环据此写 error 消息）
    pub unknown_tool: Option<String>,
}

impl RouteDecision {
    fn end() -> Self {
        Self {
            target: Route::End,
            requires_user_input: false,
            pending_tool: None,
            unknown_tool: None,
        }
    }
}

/// agent 节点之后的转移判定
///
/// 1. 最后一条不是模型响应（turn 为 None）-> end（防御默认，正常运行不可达）
/// 2. 响应不带工具调用 -> end（最终回答）
/// 3. 第一个调用：
///    - 工具不在目录 -> end，并标记 unknown_tool
///    - 参数过 Schema -> tool_executor，清空等待标记
///    - 参数不符 -> human_in_the_loop，requires_user_input = true，记下工具名
pub fn route(tools: &HashMap<String, ToolDescriptor>, turn: Option<&ModelTurn>) -> RouteDecision {
    let turn = match turn {
        Some(t) => t,
        None => return RouteDecision::end(),
    };

    let invocation = match turn.invocations.first() {
        Some(inv) => inv,
        None => return RouteDecision::end(),
    };

    let descriptor = match tools.get(&invocation.name) {
        Some(d) => d,
        None => {
            return RouteDecision {
                unknown_tool: Some(invocation.name.clone()),
                ..RouteDecision::end()
            }
        }
    };

    match validate_args(&descriptor.schema, &invocation.arguments) {
        Ok(()) => RouteDecision {
            target: Route::ToolExecutor,
            requires_user_input: false,
            pending_tool: None,
            unknown_tool: None,
        },
        Err(_) => RouteDecision {
            target: Route::HumanInTheLoop,
            requires_user_input: true,
            pending_tool: Some(invocation.name.clone()),
            unknown_tool: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ModelTurn, ToolInvocation};
    use crate::tools::{SearchFlightsTool, Tool};
    use serde_json::json;

    fn catalog() -> HashMap<String, ToolDescriptor> {
        let mut tools = HashMap::new();
        tools.insert(
            "searchFlights".to_string(),
            ToolDescriptor {
                name: "searchFlights".to_string(),
                description: SearchFlightsTool.description().to_string(),
                schema: SearchFlightsTool.parameters_schema(),
            },
        );
        tools
    }

    #[test]
    fn test_no_model_turn_routes_end() {
        let decision = route(&catalog(), None);
        assert_eq!(decision.target, Route::End);
        assert!(!decision.requires_user_input);
    }

    #[test]
    fn test_no_invocations_routes_end() {
        let turn = ModelTurn::text("final answer");
        let decision = route(&catalog(), Some(&turn));
        assert_eq!(decision.target, Route::End);
        assert!(!decision.requires_user_input);
        assert!(decision.pending_tool.is_none());
        assert!(decision.unknown_tool.is_none());
    }

    #[test]
    fn test_unknown_tool_routes_end_without_user_input() {
        let turn = ModelTurn::with_invocation("", ToolInvocation::new("teleport", json!({})));
        let decision = route(&catalog(), Some(&turn));
        assert_eq!(decision.target, Route::End);
        assert!(!decision.requires_user_input);
        assert_eq!(decision.unknown_tool.as_deref(), Some("teleport"));
    }

    #[test]
    fn test_valid_args_route_tool_executor() {
        let turn = ModelTurn::with_invocation(
            "",
            ToolInvocation::new(
                "searchFlights",
                json!({
                    "departureCity": "NYC",
                    "arrivalCity": "LAX",
                    "departureDate": "2026-09-01"
                }),
            ),
        );
        let decision = route(&catalog(), Some(&turn));
        assert_eq!(decision.target, Route::ToolExecutor);
        assert!(!decision.requires_user_input);
        assert!(decision.pending_tool.is_none());
    }

    #[test]
    fn test_partial_args_route_human_in_the_loop() {
        let turn = ModelTurn::with_invocation(
            "",
            ToolInvocation::new("searchFlights", json!({"departureCity": "NYC"})),
        );
        let decision = route(&catalog(), Some(&turn));
        assert_eq!(decision.target, Route::HumanInTheLoop);
        assert!(decision.requires_user_input);
        assert_eq!(decision.pending_tool.as_deref(), Some("searchFlights"));
    }

    #[test]
    fn test_only_first_invocation_is_considered() {
        let turn = ModelTurn {
            content: String::new(),
            invocations: vec![
                ToolInvocation::new("searchFlights", json!({"departureCity": "NYC"})),
                ToolInvocation::new(
                    "searchFlights",
                    json!({
                        "departureCity": "NYC",
                        "arrivalCity": "LAX",
                        "departureDate": "2026-09-01"
                    }),
                ),
            ],
        };
        let decision = route(&catalog(), Some(&turn));
        assert_eq!(decision.target, Route::HumanInTheLoop);
    }
}
