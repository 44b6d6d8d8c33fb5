//! 工具箱：注册表、参数校验与演示工具
//!
//! 工具是纯客户端实体；跨边界只投影 {name, description, schema}（能力投影），
//! Agent 只能「请求」执行，永远不能代为执行。

pub mod echo;
pub mod flights;
pub mod registry;
pub mod schema;

pub use echo::EchoTool;
pub use flights::SearchFlightsTool;
pub use registry::{Tool, ToolRegistry};
pub use schema::{schema_value, validate_args};
