//! 工具参数 JSON Schema 生成与校验
//!
//! schemars 从参数结构体自动生成 Schema；jsonschema 在执行前与路由时校验参数，
//! 校验失败即是 human_in_the_loop 的判定依据。

use schemars::JsonSchema;
use serde_json::Value;

use crate::core::AgentError;

/// 由参数结构体生成 JSON Schema（投影给服务端与 LLM）
pub fn schema_value<T: JsonSchema>() -> Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({ "type": "object" }))
}

/// 按 Schema 校验参数；全部违规项拼成一条 InvalidArguments
pub fn validate_args(schema: &Value, args: &Value) -> Result<(), AgentError> {
    let validator = jsonschema::Validator::new(schema)
        .map_err(|e| AgentError::InvalidArguments(format!("invalid tool schema: {e}")))?;
    if validator.is_valid(args) {
        return Ok(());
    }
    let errors: Vec<String> = validator.iter_errors(args).map(|e| e.to_string()).collect();
    Err(AgentError::InvalidArguments(errors.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize, JsonSchema)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct DemoParams {
        departure_city: String,
        arrival_city: String,
    }

    #[test]
    fn test_schema_lists_required_fields() {
        let schema = schema_value::<DemoParams>();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "departureCity"));
        assert!(required.iter().any(|v| v == "arrivalCity"));
    }

    #[test]
    fn test_validate_accepts_complete_args() {
        let schema = schema_value::<DemoParams>();
        let args = json!({"departureCity": "NYC", "arrivalCity": "LAX"});
        assert!(validate_args(&schema, &args).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_field() {
        let schema = schema_value::<DemoParams>();
        let args = json!({"departureCity": "NYC"});
        let err = validate_args(&schema, &args);
        assert!(matches!(err, Err(AgentError::InvalidArguments(_))));
    }

    #[test]
    fn test_validate_rejects_wrong_type() {
        let schema = schema_value::<DemoParams>();
        let args = json!({"departureCity": 42, "arrivalCity": "LAX"});
        assert!(validate_args(&schema, &args).is_err());
    }
}
