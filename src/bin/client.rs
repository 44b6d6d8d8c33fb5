//! Weaver 终端演示客户端
//!
//! 客户端侧契约的完整走通：注册演示工具并投影给服务端，tool_call 指令在本地执行后
//! 以 tool_result 续传，render_html 指令降级为逐字段命令行表单，提交为 user_input_result。
//!
//! 启动: cargo run --bin weaver-client（需先启动 weaver 服务端）

use std::io::{self, BufRead, Write};

use serde_json::{json, Map, Value};

use weaver::protocol::{ChatMessage, ChatRequest, ChatResponse, ToolDescriptor};
use weaver::tools::{EchoTool, SearchFlightsTool, ToolRegistry};

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// 命令行版表单水合：按 Schema 的 properties 逐字段提问，全部按字符串提交
fn collect_form_input(schema: &Value) -> io::Result<Value> {
    let mut data = Map::new();
    if let Some(properties) = schema["properties"].as_object() {
        for field in properties.keys() {
            let value = read_line(&format!("  {}: ", field))?;
            data.insert(field.clone(), Value::String(value));
        }
    }
    Ok(Value::Object(data))
}

async fn post_chat(
    client: &reqwest::Client,
    url: &str,
    messages: &[ChatMessage],
    tool_definitions: &[ToolDescriptor],
) -> Result<ChatResponse, reqwest::Error> {
    client
        .post(format!("{}/api/chat", url))
        .json(&ChatRequest {
            messages: messages.to_vec(),
            tool_definitions: tool_definitions.to_vec(),
        })
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url =
        std::env::var("WEAVER_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

    let mut registry = ToolRegistry::new();
    registry.register(SearchFlightsTool);
    registry.register(EchoTool);
    let held_permissions = vec!["debug".to_string()];
    let tool_definitions = registry.project(&held_permissions);

    println!("Weaver demo client — {} ('quit' to exit)", url);
    let client = reqwest::Client::new();
    let mut history: Vec<ChatMessage> = Vec::new();

    loop {
        let input = read_line("> ")?;
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "exit" {
            break;
        }
        history.push(ChatMessage::user(input));

        // 一次用户输入可能引发多个来回：tool_call 本地执行后续传，表单提交后续传
        loop {
            let response = post_chat(&client, &url, &history, &tool_definitions).await?;
            history = response.messages;

            let last = match history.last() {
                Some(m) => m.clone(),
                None => break,
            };
            match last {
                ChatMessage::ToolCall { name, params, tool_call_id } => {
                    println!("[tool] {} {}", name, params);
                    let (result, is_error) = match registry.execute(&name, params).await {
                        Ok(r) => (r, false),
                        Err(e) => (json!({ "error": e.to_string() }), true),
                    };
                    history.push(ChatMessage::ToolResult {
                        result,
                        tool_call_id,
                        is_error,
                    });
                }
                ChatMessage::RenderHtml { message, schema, tool_name, .. } => {
                    println!("{}", message);
                    let data = collect_form_input(&schema)?;
                    history.push(ChatMessage::UserInputResult { tool_name, data });
                }
                ChatMessage::Text { content, .. } => {
                    println!("{}", content);
                    break;
                }
                ChatMessage::Error { message } => {
                    eprintln!("[error] {}", message);
                    break;
                }
                // user_input_result / tool_result 不应出现在服务端响应末尾
                _ => break,
            }
        }
    }

    Ok(())
}
