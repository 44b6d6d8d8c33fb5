//! 航班查询演示工具
//!
//! searchFlights：三个必填字符串参数，返回确定性的候选航班列表（演示用，无外部调用）。

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tools::schema::schema_value;
use crate::tools::Tool;

/// searchFlights 参数（线上格式为 camelCase）
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchFlightsParams {
    /// 出发城市
    pub departure_city: String,
    /// 到达城市
    pub arrival_city: String,
    /// 出发日期（YYYY-MM-DD）
    pub departure_date: String,
}

/// 航班查询工具：公开（无权限要求）
pub struct SearchFlightsTool;

#[async_trait]
impl Tool for SearchFlightsTool {
    fn name(&self) -> &str {
        "searchFlights"
    }

    fn description(&self) -> &str {
        "Search flights between two cities on a given date"
    }

    fn parameters_schema(&self) -> Value {
        schema_value::<SearchFlightsParams>()
    }

    async fn execute(&self, args: Value) -> Result<Value, String> {
        let params: SearchFlightsParams =
            serde_json::from_value(args).map_err(|e| e.to_string())?;
        // 演示数据：航班号由城市对导出，保证结果可复现
        let route = format!(
            "{}-{}",
            params.departure_city.to_uppercase(),
            params.arrival_city.to_uppercase()
        );
        Ok(json!({
            "flights": [
                {
                    "flightNumber": format!("WV10{}", route.len() % 10),
                    "route": route,
                    "date": params.departure_date,
                    "departureTime": "08:15",
                    "price": 320
                },
                {
                    "flightNumber": format!("WV20{}", route.len() % 10),
                    "route": route,
                    "date": params.departure_date,
                    "departureTime": "17:40",
                    "price": 275
                }
            ]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_all_three_fields() {
        let schema = SearchFlightsTool.parameters_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        for field in ["departureCity", "arrivalCity", "departureDate"] {
            assert!(required.iter().any(|v| v == field), "missing {}", field);
        }
    }

    #[tokio::test]
    async fn test_execute_returns_flights_for_route() {
        let result = SearchFlightsTool
            .execute(json!({
                "departureCity": "NYC",
                "arrivalCity": "LAX",
                "departureDate": "2026-09-01"
            }))
            .await
            .unwrap();
        assert_eq!(result["flights"][0]["route"], "NYC-LAX");
        assert_eq!(result["flights"][0]["date"], "2026-09-01");
    }
}
