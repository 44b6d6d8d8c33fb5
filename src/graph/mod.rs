//! 编排状态机
//!
//! 四个状态：agent（入口）、tool_executor、human_in_the_loop、end（终态）。
//! 每个 HTTP 请求恰好一次决策循环：agent 节点产出模型响应后，route 纯函数决定去向，
//! 终态节点把一条终端消息（回答 / tool_call 指令 / render_html 指令 / error）追加进历史。

pub mod cycle;
pub mod route;
pub mod state;

pub use cycle::DecisionCycle;
pub use route::{route, Route, RouteDecision};
pub use state::SessionState;
