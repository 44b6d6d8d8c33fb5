//! 工具注册表
//!
//! 所有工具实现 Tool trait（name / description / parameters_schema / permissions / execute），
//! 由 ToolRegistry 按名注册与查找；project 做能力投影与权限过滤，execute 先校验参数再调用。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::AgentError;
use crate::protocol::ToolDescriptor;
use crate::tools::schema::validate_args;

/// 工具 trait：名称、描述（供 LLM 理解）、参数 Schema、权限集合、异步执行
#[async_trait]
pub trait Tool: Send + Sync {
    /// 工具名称（tool_call 消息中的 "name" 字段）
    fn name(&self) -> &str;

    /// 工具描述（供 LLM 理解功能，也用于生成表单提示语）
    fn description(&self) -> &str;

    /// 参数 JSON Schema
    /// 默认返回空对象 Schema，表示无参数
    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    /// 所需权限；空集合表示公开工具
    fn permissions(&self) -> Vec<String> {
        Vec::new()
    }

    /// 执行工具
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// 工具注册表：按名称存储 Arc<dyn Tool>，支持 register / get / execute / project
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// 执行工具：未注册返回 ToolNotFound，参数不符 Schema 返回 InvalidArguments，
    /// 工具自身失败转为 ToolExecutionFailed
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, AgentError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| AgentError::ToolNotFound(name.to_string()))?;
        validate_args(&tool.parameters_schema(), &args)?;
        tool.execute(args).await.map_err(AgentError::ToolExecutionFailed)
    }

    /// 能力投影：按持有权限过滤后，返回 {name, description, schema} 列表。
    /// 权限集合为空的工具公开；否则调用方须持有其中至少一个权限。
    /// 按名称排序，保证投影结果确定。
    pub fn project(&self, held_permissions: &[String]) -> Vec<ToolDescriptor> {
        let mut descriptors: Vec<ToolDescriptor> = self
            .tools
            .values()
            .filter(|tool| {
                let required = tool.permissions();
                required.is_empty() || required.iter().any(|p| held_permissions.contains(p))
            })
            .map(|tool| ToolDescriptor {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                schema: tool.parameters_schema(),
            })
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }
}
