//! Measura MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdio.
//!
//! Tools:
//! - convert: Convert a value between two measures
//! - list_units: List a converter's measures, optionally for one system
//! - list_converters: List every converter with its base measure
//! - session_select: Select the session's converter
//! - session_set: Change the session's from/to measures
//! - session_key: Press a keypad key (0-9, ".", clear, swap)
//! - session_state: Show the session and its current result

mod config;
mod store;

use std::io::{self, BufRead, Write};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use measura::{ConverterSession, KeyValueStore, Preferences, SessionConfig, MAX_MIN_SCALE};
use measura_core::{Decimal, MeasuraError};
use measura_units::{ConvertError, ConverterKind, Measure, MeasurementSystem};

use config::ServerConfig;
use store::JsonFileStore;

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "measura";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self { code: INVALID_PARAMS, message: message.into(), data: None }
    }
}

impl From<ConvertError> for McpError {
    fn from(err: ConvertError) -> Self {
        let structured = MeasuraError::from(err);
        Self {
            code: INVALID_PARAMS,
            message: structured.message.clone(),
            data: serde_json::to_value(&structured).ok(),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let config = ServerConfig::from_env();
    let store = JsonFileStore::open(config.prefs_path());
    let session_config = SessionConfig::default().with_min_scale(config.min_scale);
    let mut session = ConverterSession::new(Preferences::new(store), session_config);
    if let Err(e) = session.select_last_converter() {
        warn!(error = %e, "could not restore the last converter");
    }

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Measura MCP Server started");
    info!(
        prefs = %config.prefs_path().display(),
        min_scale = config.min_scale,
        "configuration loaded"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                debug!(bytes = line.len(), "received request");

                let Some(response) = handle_line(&mut session, line) else {
                    continue;
                };
                if let Err(e) = write_response(&response) {
                    error!(error = %e, "failed to write response");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "failed to read input");
                break;
            }
        }
    }

    info!("server shutting down");
}

fn write_response(response: &McpResponse) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, response)?;
    writeln!(stdout)?;
    stdout.flush()
}

/// Handle one input line. Notifications (no id) produce no response.
fn handle_line<S: KeyValueStore>(
    session: &mut ConverterSession<S>,
    line: &str,
) -> Option<McpResponse> {
    let request: McpRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "unparsable request");
            return Some(McpResponse {
                jsonrpc: "2.0".to_string(),
                id: None,
                result: None,
                error: Some(McpError {
                    code: PARSE_ERROR,
                    message: format!("Parse error: {}", e),
                    data: None,
                }),
            });
        }
    };

    debug!(method = %request.method, "processing");
    let response = handle_request(session, &request);

    if request.id.is_none() {
        debug!(method = %request.method, "notification processed");
        return None;
    }
    Some(response)
}

fn handle_request<S: KeyValueStore>(
    session: &mut ConverterSession<S>,
    request: &McpRequest,
) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(session, &request.params),

        _ => Err(McpError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Exact unit conversion between US and metric measures"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Measura converts temperature, length, mass, volume and energy with exact decimal arithmetic. Values are decimal strings. Use 'list_converters' to see what is available."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let converter_names: Vec<&str> = ConverterKind::ALL.iter().map(|k| k.name()).collect();
    let measure_names: Vec<&str> = Measure::ALL.iter().map(|m| m.name()).collect();

    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a decimal value from one measure to another.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "converter": {
                            "type": "string",
                            "description": "Converter to use. Defaults to the one owning 'from'.",
                            "enum": converter_names
                        },
                        "from": { "type": "string", "enum": measure_names },
                        "to": { "type": "string", "enum": measure_names },
                        "value": {
                            "type": ["string", "integer"],
                            "description": "Decimal value as a string, e.g. \"12.5\". Integers may also be given as JSON numbers."
                        },
                        "scale": {
                            "type": "integer",
                            "description": "Minimum number of fractional digits for divisions",
                            "minimum": 0,
                            "maximum": MAX_MIN_SCALE
                        }
                    },
                    "required": ["from", "to", "value"]
                }
            },
            {
                "name": "list_units",
                "description": "List a converter's measures ordered by weight.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "converter": { "type": "string", "enum": converter_names },
                        "system": { "type": "string", "enum": ["US", "METRIC"] }
                    },
                    "required": ["converter"]
                }
            },
            {
                "name": "list_converters",
                "description": "List every converter with its base measure.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "session_select",
                "description": "Select the converter used by the session.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "converter": { "type": "string", "enum": converter_names }
                    },
                    "required": ["converter"]
                }
            },
            {
                "name": "session_set",
                "description": "Change the session's from and/or to measure.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "from": { "type": "string", "enum": measure_names },
                        "to": { "type": "string", "enum": measure_names }
                    }
                }
            },
            {
                "name": "session_key",
                "description": "Press a keypad key: a digit, '.', 'clear' or 'swap'.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "key": {
                            "type": "string",
                            "enum": ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "clear", "swap"]
                        }
                    },
                    "required": ["key"]
                }
            },
            {
                "name": "session_state",
                "description": "Show the session's converter, measures, input and result.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ]
    }))
}

fn handle_tool_call<S: KeyValueStore>(
    session: &mut ConverterSession<S>,
    params: &Option<JsonValue>,
) -> Result<JsonValue, McpError> {
    let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));
    debug!(tool = name, "tool call");

    match name {
        "convert" => tool_convert(session, args),
        "list_units" => tool_list_units(args),
        "list_converters" => tool_list_converters(),
        "session_select" => tool_session_select(session, args),
        "session_set" => tool_session_set(session, args),
        "session_key" => tool_session_key(session, args),
        "session_state" => Ok(session_view(session)),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

// ========== Argument Parsing ==========

fn parse_args<T: serde::de::DeserializeOwned>(args: JsonValue) -> Result<T, McpError> {
    serde_json::from_value(args).map_err(|e| McpError::invalid_params(format!("Invalid arguments: {}", e)))
}

/// Accepts a decimal string or a JSON integer. Fractional JSON numbers are
/// refused: their text form drops trailing zeros and may use an exponent.
fn parse_value(value: &JsonValue) -> Result<Decimal, McpError> {
    let text = match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        _ => {
            return Err(McpError::invalid_params(
                "value must be a decimal string such as \"12.5\" or an integer",
            ))
        }
    };
    text.parse::<Decimal>().map_err(|e| {
        let structured = MeasuraError::from(e);
        McpError {
            code: INVALID_PARAMS,
            message: structured.message.clone(),
            data: serde_json::to_value(&structured).ok(),
        }
    })
}

/// Successful tool output
fn tool_result(text: String, data: JsonValue) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": text }],
        "data": data,
        "isError": false
    })
}

/// Domain failures are reported inside the tool result
fn tool_failure(err: impl Into<MeasuraError>) -> JsonValue {
    let err = err.into();
    json!({
        "content": [{ "type": "text", "text": err.to_string() }],
        "error": err,
        "isError": true
    })
}

fn measure_json(measure: Measure, base: Measure) -> JsonValue {
    json!({
        "name": measure.name(),
        "token": measure.display_token(),
        "system": measure.system().name(),
        "weight": measure.weight(),
        "base": measure == base
    })
}

// ========== Stateless Tools ==========

#[derive(Debug, Deserialize)]
struct ConvertArgs {
    converter: Option<String>,
    from: String,
    to: String,
    value: JsonValue,
    scale: Option<u32>,
}

fn tool_convert<S: KeyValueStore>(
    session: &ConverterSession<S>,
    args: JsonValue,
) -> Result<JsonValue, McpError> {
    let args: ConvertArgs = parse_args(args)?;
    let converter = args.converter.as_deref().map(str::parse::<ConverterKind>).transpose()?;
    let from: Measure = args.from.parse()?;
    let to: Measure = args.to.parse()?;
    let value = parse_value(&args.value)?;
    let min_scale = match args.scale {
        Some(scale) if scale > MAX_MIN_SCALE => {
            return Err(McpError::invalid_params(format!(
                "scale {} exceeds the maximum of {}",
                scale, MAX_MIN_SCALE
            )))
        }
        Some(scale) => scale,
        None => session.config().min_scale,
    };

    match measura::convert(converter, from, to, &value, min_scale) {
        Ok(result) => Ok(tool_result(
            format!("{} {} = {} {}", value, from.display_token(), result, to.display_token()),
            json!({ "from": from, "to": to, "value": value, "result": result }),
        )),
        Err(e) => Ok(tool_failure(e)),
    }
}

#[derive(Debug, Deserialize)]
struct ListUnitsArgs {
    converter: String,
    system: Option<String>,
}

fn tool_list_units(args: JsonValue) -> Result<JsonValue, McpError> {
    let args: ListUnitsArgs = parse_args(args)?;
    let kind: ConverterKind = args.converter.parse()?;
    let system = args.system.as_deref().map(str::parse::<MeasurementSystem>).transpose()?;

    let converter = kind.converter();
    let units = converter.supported_units(system);
    let names: Vec<&str> = units.iter().map(|m| m.display_token()).collect();

    Ok(tool_result(
        format!("{}: {}", kind.display_token(), names.join(", ")),
        JsonValue::Array(units.iter().map(|m| measure_json(*m, converter.base())).collect()),
    ))
}

fn tool_list_converters() -> Result<JsonValue, McpError> {
    let converters: Vec<JsonValue> = ConverterKind::ALL
        .iter()
        .map(|kind| {
            let converter = kind.converter();
            json!({
                "name": kind.name(),
                "token": kind.display_token(),
                "base": converter.base(),
                "units": converter.supported_units(None)
            })
        })
        .collect();

    let names: Vec<&str> = ConverterKind::ALL.iter().map(|k| k.display_token()).collect();
    Ok(tool_result(format!("Converters: {}", names.join(", ")), JsonValue::Array(converters)))
}

// ========== Session Tools ==========

#[derive(Debug, Deserialize)]
struct SelectArgs {
    converter: String,
}

fn tool_session_select<S: KeyValueStore>(
    session: &mut ConverterSession<S>,
    args: JsonValue,
) -> Result<JsonValue, McpError> {
    let args: SelectArgs = parse_args(args)?;
    let kind: ConverterKind = args.converter.parse()?;
    match session.select_converter(kind) {
        Ok(()) => Ok(session_view(session)),
        Err(e) => Ok(tool_failure(e)),
    }
}

#[derive(Debug, Deserialize)]
struct SetArgs {
    from: Option<String>,
    to: Option<String>,
}

fn tool_session_set<S: KeyValueStore>(
    session: &mut ConverterSession<S>,
    args: JsonValue,
) -> Result<JsonValue, McpError> {
    let args: SetArgs = parse_args(args)?;
    let from = args.from.as_deref().map(str::parse::<Measure>).transpose()?;
    let to = args.to.as_deref().map(str::parse::<Measure>).transpose()?;
    if from.is_none() && to.is_none() {
        return Err(McpError::invalid_params("Provide 'from' and/or 'to'"));
    }

    let outcome = from
        .map_or(Ok(()), |m| session.change_from(m))
        .and_then(|()| to.map_or(Ok(()), |m| session.change_to(m)));
    match outcome {
        Ok(()) => Ok(session_view(session)),
        Err(e) => Ok(tool_failure(e)),
    }
}

#[derive(Debug, Deserialize)]
struct KeyArgs {
    key: String,
}

fn tool_session_key<S: KeyValueStore>(
    session: &mut ConverterSession<S>,
    args: JsonValue,
) -> Result<JsonValue, McpError> {
    let args: KeyArgs = parse_args(args)?;
    let key = args.key.trim();

    let outcome = match key {
        "." => {
            session.append_decimal_point();
            Ok(())
        }
        "clear" => {
            session.clear();
            Ok(())
        }
        "swap" => session.swap(),
        digit if digit.len() == 1 && digit.as_bytes()[0].is_ascii_digit() => {
            session.append_digit(digit.as_bytes()[0] - b'0')
        }
        other => {
            return Err(McpError::invalid_params(format!(
                "Unknown key '{}'. Expected 0-9, '.', 'clear' or 'swap'",
                other
            )))
        }
    };

    match outcome {
        Ok(()) => Ok(session_view(session)),
        Err(e) => Ok(tool_failure(e)),
    }
}

fn session_view<S: KeyValueStore>(session: &ConverterSession<S>) -> JsonValue {
    let input = session.input();
    let mut data = json!({
        "converter": session.converter(),
        "from_system": session.from_system(),
        "from": session.from(),
        "to": session.to(),
        "input": input.value(),
        "decimal_entered": input.is_decimal_entered(),
        "state": session.snapshot()
    });

    let text = match (session.options(), session.result()) {
        (Ok(options), Ok(result)) => {
            data["options"] = json!(options);
            data["result"] = json!(result);
            format!(
                "{} {} = {} {}",
                input.value(),
                options.from.display_token(),
                result,
                options.to.display_token()
            )
        }
        (Err(e), _) | (_, Err(e)) => {
            let err = MeasuraError::from(e);
            let text = err.to_string();
            data["error"] = json!(err);
            text
        }
    };

    tool_result(text, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use measura::MemoryStore;

    fn session() -> ConverterSession<MemoryStore> {
        ConverterSession::new(Preferences::new(MemoryStore::new()), SessionConfig::default())
    }

    fn call(session: &mut ConverterSession<MemoryStore>, line: &str) -> JsonValue {
        let response = handle_line(session, line).expect("request with id gets a response");
        serde_json::to_value(&response).unwrap()
    }

    fn tool(session: &mut ConverterSession<MemoryStore>, name: &str, args: JsonValue) -> JsonValue {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": name, "arguments": args }
        });
        call(session, &request.to_string())
    }

    mod protocol_tests {
        use super::*;

        #[test]
        fn test_initialize() {
            let mut s = session();
            let r = call(&mut s, r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#);
            assert_eq!(r["result"]["protocolVersion"], "2024-11-05");
            assert_eq!(r["result"]["serverInfo"]["name"], SERVER_NAME);
        }

        #[test]
        fn test_ping_echoes_id() {
            let mut s = session();
            let r = call(&mut s, r#"{"jsonrpc":"2.0","id":"abc","method":"ping"}"#);
            assert_eq!(r["id"], "abc");
            assert_eq!(r["result"], json!({}));
        }

        #[test]
        fn test_parse_error() {
            let mut s = session();
            let r = call(&mut s, "{nope");
            assert_eq!(r["error"]["code"], PARSE_ERROR);
            assert!(r.get("id").is_none());
        }

        #[test]
        fn test_unknown_method() {
            let mut s = session();
            let r = call(&mut s, r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#);
            assert_eq!(r["error"]["code"], METHOD_NOT_FOUND);
        }

        #[test]
        fn test_notification_gets_no_response() {
            let mut s = session();
            assert!(handle_line(&mut s, r#"{"jsonrpc":"2.0","method":"initialized"}"#).is_none());
        }

        #[test]
        fn test_tools_list_names() {
            let mut s = session();
            let r = call(&mut s, r#"{"jsonrpc":"2.0","id":3,"method":"tools/list"}"#);
            let names: Vec<&str> = r["result"]["tools"]
                .as_array()
                .unwrap()
                .iter()
                .map(|t| t["name"].as_str().unwrap())
                .collect();
            assert_eq!(
                names,
                vec![
                    "convert",
                    "list_units",
                    "list_converters",
                    "session_select",
                    "session_set",
                    "session_key",
                    "session_state"
                ]
            );
        }

        #[test]
        fn test_unknown_tool() {
            let mut s = session();
            let r = tool(&mut s, "teleport", json!({}));
            assert_eq!(r["error"]["code"], INVALID_PARAMS);
        }
    }

    mod convert_tool_tests {
        use super::*;

        #[test]
        fn test_convert() {
            let mut s = session();
            let r = tool(&mut s, "convert", json!({"from": "celsius", "to": "FAHRENHEIT", "value": "100"}));
            assert_eq!(r["result"]["isError"], false);
            assert_eq!(r["result"]["data"]["result"], "212");
            assert_eq!(r["result"]["content"][0]["text"], "100 celsius = 212 fahrenheit");
        }

        #[test]
        fn test_convert_with_scale() {
            let mut s = session();
            let r = tool(&mut s, "convert", json!({"from": "METRE", "to": "INCH", "value": 1, "scale": 4}));
            assert_eq!(r["result"]["data"]["result"], "39.3701");
        }

        #[test]
        fn test_scale_above_maximum_is_rejected() {
            let mut s = session();
            let args = json!({"from": "METRE", "to": "INCH", "value": "1", "scale": 4294967295u32});
            let r = tool(&mut s, "convert", args);
            assert_eq!(r["error"]["code"], INVALID_PARAMS);

            let args = json!({"from": "METRE", "to": "INCH", "value": "1", "scale": MAX_MIN_SCALE});
            let r = tool(&mut s, "convert", args);
            assert_eq!(r["result"]["isError"], false);
        }

        #[test]
        fn test_fractional_json_numbers_are_refused() {
            let mut s = session();
            for value in [json!(1e-7), json!(1e21), json!(1.5)] {
                let r = tool(&mut s, "convert", json!({"from": "METRE", "to": "INCH", "value": value}));
                assert_eq!(r["error"]["code"], INVALID_PARAMS, "value {}", value);
            }

            let r = tool(&mut s, "convert", json!({"from": "KILOMETRE", "to": "METRE", "value": 1_000_000_000_000u64}));
            assert_eq!(r["result"]["data"]["result"], "1000000000000000");

            let r = tool(&mut s, "convert", json!({"from": "METRE", "to": "INCH", "value": "0.0000001"}));
            assert_eq!(r["result"]["isError"], false);
        }

        #[test]
        fn test_unsupported_pair_is_tool_error() {
            let mut s = session();
            let r = tool(&mut s, "convert", json!({"from": "INCH", "to": "GRAM", "value": "1"}));
            assert_eq!(r["result"]["isError"], true);
            assert_eq!(r["result"]["error"]["code"], "UNSUPPORTED_UNIT");
        }

        #[test]
        fn test_bad_arguments() {
            let mut s = session();
            let r = tool(&mut s, "convert", json!({"from": "FURLONG", "to": "METRE", "value": "1"}));
            assert_eq!(r["error"]["code"], INVALID_PARAMS);
            assert_eq!(r["error"]["data"]["code"], "UNKNOWN_MEASURE");

            let r = tool(&mut s, "convert", json!({"from": "MILE", "to": "METRE", "value": "1e3"}));
            assert_eq!(r["error"]["data"]["code"], "PARSE_ERROR");

            let r = tool(&mut s, "convert", json!({"from": "MILE"}));
            assert_eq!(r["error"]["code"], INVALID_PARAMS);
        }

        #[test]
        fn test_list_units() {
            let mut s = session();
            let r = tool(&mut s, "list_units", json!({"converter": "length", "system": "us"}));
            let names: Vec<&str> = r["result"]["data"]
                .as_array()
                .unwrap()
                .iter()
                .map(|u| u["name"].as_str().unwrap())
                .collect();
            assert_eq!(names, vec!["INCH", "FEET", "YARD", "MILE"]);
        }

        #[test]
        fn test_list_converters() {
            let mut s = session();
            let r = tool(&mut s, "list_converters", json!({}));
            let data = r["result"]["data"].as_array().unwrap();
            assert_eq!(data.len(), 5);
            assert_eq!(data[0]["base"], "CELSIUS");
            assert_eq!(data[4]["base"], "KILOJOULE");
        }
    }

    mod session_tool_tests {
        use super::*;

        fn press(s: &mut ConverterSession<MemoryStore>, keys: &[&str]) -> JsonValue {
            let mut last = JsonValue::Null;
            for key in keys {
                last = tool(s, "session_key", json!({ "key": key }));
            }
            last
        }

        #[test]
        fn test_state_before_select_reports_illegal_state() {
            let mut s = session();
            let r = tool(&mut s, "session_state", json!({}));
            assert_eq!(r["result"]["data"]["error"]["code"], "ILLEGAL_STATE");
        }

        #[test]
        fn test_keypad_flow() {
            let mut s = session();
            tool(&mut s, "session_select", json!({"converter": "LENGTH"}));
            tool(&mut s, "session_set", json!({"from": "MILE", "to": "KILOMETRE"}));
            let r = press(&mut s, &["1", ".", "0", "0", "0"]);
            assert_eq!(r["result"]["data"]["input"], "1.000");
            assert_eq!(r["result"]["data"]["result"], "1.609344");

            let r = press(&mut s, &["swap"]);
            assert_eq!(r["result"]["data"]["from"], "KILOMETRE");
            assert_eq!(r["result"]["data"]["from_system"], "METRIC");

            let r = press(&mut s, &["clear"]);
            assert_eq!(r["result"]["data"]["input"], "0");
        }

        #[test]
        fn test_bad_key() {
            let mut s = session();
            let r = tool(&mut s, "session_key", json!({"key": "42"}));
            assert_eq!(r["error"]["code"], INVALID_PARAMS);
        }

        #[test]
        fn test_set_foreign_measure_is_tool_error() {
            let mut s = session();
            tool(&mut s, "session_select", json!({"converter": "MASS"}));
            let r = tool(&mut s, "session_set", json!({"to": "LITRE"}));
            assert_eq!(r["result"]["isError"], true);
            assert_eq!(r["result"]["error"]["code"], "UNSUPPORTED_UNIT");
        }
    }
}
