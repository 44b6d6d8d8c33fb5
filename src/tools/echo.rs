//! Echo 工具
//!
//! 原样返回输入文本；带 "debug" 权限门槛，用于演示能力投影的权限过滤。

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tools::schema::schema_value;
use crate::tools::Tool;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EchoParams {
    /// 要回显的文本
    pub text: String,
}

pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echo back the provided text"
    }

    fn parameters_schema(&self) -> Value {
        schema_value::<EchoParams>()
    }

    fn permissions(&self) -> Vec<String> {
        vec!["debug".to_string()]
    }

    async fn execute(&self, args: Value) -> Result<Value, String> {
        let params: EchoParams = serde_json::from_value(args).map_err(|e| e.to_string())?;
        Ok(json!({ "echo": params.text }))
    }
}
