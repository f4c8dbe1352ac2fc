//! Tool and prompt handlers
//!
//! Tools:
//! - generate_terms: explained terms as a markdown table plus structured data
//! - closed_form: the general rule
//! - worked_example: derivation ladder and a check by hand on the last term
//! - frames: growing prefixes and fixed bounds for an animated chart
//! - help / list_functions: registry documentation

use crate::protocol::{McpError, Server};
use arith_core::{ArithError, Number, Value};
use arith_sequence::{extract_count, extract_number, SequenceExplainer, SequenceParameters};
use serde_json::{json, Value as JsonValue};
use tracing::debug;

const SEQUENCE_KEYS: [&str; 3] = ["first", "diff", "count"];

pub fn tools_list() -> JsonValue {
    let sequence_schema = json!({
        "type": "object",
        "properties": {
            "first": {
                "type": ["number", "string"],
                "description": "First term a (default from ARITH_DEFAULT_FIRST, else 2)"
            },
            "diff": {
                "type": ["number", "string"],
                "description": "Common difference b (default from ARITH_DEFAULT_DIFF, else 3)"
            },
            "count": {
                "type": "integer",
                "description": "Number of terms n, at least 1 (default from ARITH_DEFAULT_COUNT, else 10)"
            }
        }
    });

    json!({
        "tools": [
            {
                "name": "generate_terms",
                "description": "Generate the terms of an arithmetic sequence with the pattern and explanation of each term.",
                "inputSchema": sequence_schema
            },
            {
                "name": "closed_form",
                "description": "The general rule U_n = a + (n - 1)b.",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "worked_example",
                "description": "Derive the closed form step by step and check it by hand on the last term.",
                "inputSchema": sequence_schema
            },
            {
                "name": "frames",
                "description": "Sequence values once, one prefix length per animation frame, and fixed axis bounds for a chart.",
                "inputSchema": sequence_schema
            },
            {
                "name": "help",
                "description": "Documentation for a function, or general help when name is omitted.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "Function name" }
                    }
                }
            },
            {
                "name": "list_functions",
                "description": "List available functions, optionally by category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "enum": ["sequence/arithmetic", "sequence/explain"]
                        }
                    }
                }
            }
        ]
    })
}

pub fn handle_tool_call(server: &Server, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));
    debug!(tool = name, "tool call");

    match name {
        "generate_terms" => tool_generate_terms(server, &args),
        "closed_form" => tool_closed_form(server),
        "worked_example" => tool_worked_example(server, &args),
        "frames" => tool_frames(server, &args),
        "help" => tool_help(server, &args),
        "list_functions" => tool_list_functions(server, &args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

/// `first`, `diff`, `count` from the call, configured defaults for the rest
fn sequence_args(server: &Server, args: &JsonValue) -> Vec<Value> {
    let config = &server.config;
    let defaults = [
        Value::Number(config.default_first.clone()),
        Value::Number(config.default_diff.clone()),
        Value::from(config.default_count),
    ];
    SEQUENCE_KEYS.iter()
        .zip(defaults)
        .map(|(key, default)| match args.get(*key) {
            Some(v) if !v.is_null() => Value::from_json(v),
            _ => default,
        })
        .collect()
}

/// Tool-level failure: reported in the result so the client can show it
fn tool_error(err: &ArithError) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": format!("Error: {}", err) }],
        "error": serde_json::to_value(err).unwrap_or(JsonValue::Null),
        "isError": true
    })
}

fn heading(args: &[Value]) -> String {
    format!("## Arithmetic sequence (a = {}, b = {}, n = {})\n\n", args[0], args[1], args[2])
}

fn tool_generate_terms(server: &Server, args: &JsonValue) -> Result<JsonValue, McpError> {
    let call_args = sequence_args(server, args);
    let ctx = server.eval_ctx();
    let result = server.registry.call_function("arithmetic_terms", &call_args, &ctx);

    let terms = match &result {
        Value::List(terms) => terms,
        Value::Error(e) => return Ok(tool_error(e)),
        other => return Ok(tool_error(&ArithError::type_error("List", other.type_name()))),
    };

    let mut markdown = heading(&call_args);
    markdown.push_str(&render_table(terms));
    markdown.push_str(&format!("\nGeneral rule: `{}`\n", SequenceExplainer::closed_form()));

    Ok(json!({
        "content": [{ "type": "text", "text": markdown }],
        "terms": result.to_json(),
        "isError": false
    }))
}

fn render_table(terms: &[Value]) -> String {
    let mut out = String::new();
    out.push_str("| n | U_n | pattern | explanation |\n");
    out.push_str("|---|-----|---------|-------------|\n");
    for term in terms {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            term.get("index"),
            term.get("value"),
            term.get("pattern"),
            term.get("explanation"),
        ));
    }
    out
}

fn tool_closed_form(server: &Server) -> Result<JsonValue, McpError> {
    let ctx = server.eval_ctx();
    let symbolic = server.registry.call_function("closed_form", &[], &ctx);
    let form = SequenceExplainer::closed_form();
    Ok(json!({
        "content": [{ "type": "text", "text": format!("`{}`\n\n{}", symbolic, form.description) }],
        "data": form,
        "isError": false
    }))
}

fn tool_worked_example(server: &Server, args: &JsonValue) -> Result<JsonValue, McpError> {
    let call_args = sequence_args(server, args);
    let ctx = server.eval_ctx();

    let example = server.registry.call_function("worked_example", &call_args, &ctx);
    if let Value::Error(e) = &example {
        return Ok(tool_error(e));
    }
    let ladder = server.registry.call_function("derivation", &[], &ctx);
    if let Value::Error(e) = &ladder {
        return Ok(tool_error(e));
    }

    let mut markdown = heading(&call_args);
    markdown.push_str("### Finding the pattern\n\n");
    for line in ladder.as_list().unwrap_or(&[]) {
        markdown.push_str(&format!("- {}\n", line));
    }
    markdown.push_str("\n### Worked example\n\n");
    for line in example.get("lines").as_list().unwrap_or(&[]) {
        markdown.push_str(&format!("- {}\n", line));
    }

    Ok(json!({
        "content": [{ "type": "text", "text": markdown }],
        "data": example.to_json(),
        "isError": false
    }))
}

fn tool_frames(server: &Server, args: &JsonValue) -> Result<JsonValue, McpError> {
    let call_args = sequence_args(server, args);
    let params = match frame_params(server, &call_args) {
        Ok(p) => p,
        Err(e) => return Ok(tool_error(&e)),
    };

    let seq = match SequenceExplainer::generate(params) {
        Ok(seq) => seq,
        Err(e) => return Ok(tool_error(&ArithError::from(e).in_function("frames"))),
    };

    // Values are sent once; frame i shows the first `length` of them
    let values: Vec<String> = seq.iter().map(|t| t.value.to_string()).collect();
    let frames: Vec<JsonValue> = seq.frames()
        .map(|frame| {
            json!({
                "title": format!("Adding term {}...", frame.len()),
                "length": frame.len()
            })
        })
        .collect();

    let (min, max) = seq.value_bounds()
        .ok_or_else(|| McpError::new(-32603, "Generated sequence is empty"))?;

    let text = format!(
        "{} frames, values from {} to {} ({}). Frame i draws values[..length] on fixed axes.",
        frames.len(), min, max, seq.trend()
    );

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "values": values,
        "frames": frames,
        "x_range": [0, seq.len() + 1],
        "value_bounds": { "min": min.to_string(), "max": max.to_string() },
        "trend": seq.trend(),
        "isError": false
    }))
}

fn frame_params(server: &Server, call_args: &[Value]) -> Result<SequenceParameters<Number>, ArithError> {
    let first = extract_number(&call_args[0], "first").map_err(|e| e.in_function("frames"))?;
    let diff = extract_number(&call_args[1], "diff").map_err(|e| e.in_function("frames"))?;
    let count = extract_count(&call_args[2], "count", "frames", server.config.max_terms)?;
    Ok(SequenceParameters::new(first, diff, count))
}

fn tool_help(server: &Server, args: &JsonValue) -> Result<JsonValue, McpError> {
    let name = args.get("name").and_then(|v| v.as_str());
    let help = server.registry.help(name);

    Ok(json!({
        "content": [{ "type": "text", "text": format_help(&help) }],
        "data": help.to_json()
    }))
}

fn format_help(help: &Value) -> String {
    match help {
        Value::Object(map) => {
            let mut out = String::new();
            let named = map.contains_key("name");
            if let Some(Value::Text(n)) = map.get("name") { out.push_str(&format!("# {}\n\n", n)); }
            if let Some(Value::Text(d)) = map.get("description") { out.push_str(&format!("{}\n\n", d)); }
            if let Some(Value::Text(u)) = map.get("usage").filter(|_| named) {
                out.push_str(&format!("**Usage:** `{}`\n\n", u));
            }
            if let Some(Value::List(examples)) = map.get("examples") {
                for e in examples {
                    out.push_str(&format!("- `{}`\n", e));
                }
            }
            if let Some(Value::Object(funcs)) = map.get("functions") {
                for (category, names) in funcs {
                    out.push_str(&format!("**{}**: {}\n", category, names));
                }
            }
            if let Some(Value::Text(u)) = map.get("usage").filter(|_| !named) {
                out.push_str(&format!("\n{}\n", u));
            }
            out
        }
        Value::Error(e) => format!("Error: {}", e.message),
        other => other.to_string(),
    }
}

fn tool_list_functions(server: &Server, args: &JsonValue) -> Result<JsonValue, McpError> {
    let category = args.get("category").and_then(|v| v.as_str());
    let functions = server.registry.list_functions(category);
    let count = functions.as_list().map_or(0, |l| l.len());
    Ok(json!({
        "content": [{ "type": "text", "text": format!("{} functions listed", count) }],
        "data": functions.to_json()
    }))
}

// ============ Prompts ============

pub fn prompts_list() -> JsonValue {
    json!({
        "prompts": [
            {
                "name": "discover_formula",
                "description": "Guide a learner to discover U_n = a + (n - 1)b from a concrete sequence",
                "arguments": [
                    {"name": "first", "description": "First term a", "required": false},
                    {"name": "diff", "description": "Common difference b", "required": false},
                    {"name": "count", "description": "Number of terms n", "required": false}
                ]
            }
        ]
    })
}

pub fn prompts_get(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing name parameter"))?;

    if name != "discover_formula" {
        let mut err = McpError::invalid_params(format!("Unknown prompt: {}", name));
        err.data = Some(json!({ "available_prompts": ["discover_formula"] }));
        return Err(err);
    }

    let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
    let mut overrides = String::new();
    for key in SEQUENCE_KEYS {
        if let Some(value) = arguments.get(key).and_then(|v| v.as_str()) {
            overrides.push_str(&format!("- `{}` = `{}`\n", key, value));
        }
    }

    let mut text = String::from(
        "Call generate_terms and show the table. Then ask the learner the reflection question below \
         before calling worked_example to reveal the general rule.\n\n",
    );
    if !overrides.is_empty() {
        text.push_str(&format!("Use these arguments:\n{}\n", overrides));
    }
    text.push_str(arith_sequence::REFLECTION_PROMPT);

    Ok(json!({
        "description": "Discover the closed form of an arithmetic sequence",
        "messages": [{
            "role": "user",
            "content": { "type": "text", "text": text }
        }]
    }))
}
