//! Settings generated for the assistant binary.
//!
//! `figma-designer setup` points the assistant at the Z.AI endpoint and
//! registers the Figma MCP server. These files belong to the assistant, so
//! keys we don't manage are left as they were.

use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::{write_private, ConfigError, DesignerConfig, Paths};

/// Anthropic-compatible endpoint served by Z.AI.
pub const ZAI_BASE_URL: &str = "https://api.z.ai/api/anthropic";
/// Request timeout handed to the assistant, in milliseconds.
pub const API_TIMEOUT_MS: &str = "3000000";
/// Model the assistant is told to use.
pub const DEFAULT_MODEL: &str = "opus";
/// Figma's hosted MCP endpoint.
pub const FIGMA_MCP_URL: &str = "https://mcp.figma.com/mcp";

/// Locations of the files written by [`write_assistant_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantFiles {
    /// The assistant's `settings.json`.
    pub settings: PathBuf,
    /// The MCP server registry.
    pub mcp: PathBuf,
}

/// Environment block placed in the assistant's settings.
pub fn settings_env(config: &DesignerConfig) -> Map<String, Value> {
    let mut env = Map::new();
    env.insert("ANTHROPIC_API_KEY".into(), json!(config.zai_api_key));
    env.insert("ANTHROPIC_AUTH_TOKEN".into(), json!(config.zai_api_key));
    env.insert("ANTHROPIC_BASE_URL".into(), json!(ZAI_BASE_URL));
    env.insert("API_TIMEOUT_MS".into(), json!(API_TIMEOUT_MS));
    env.insert(
        "CLAUDE_CODE_DISABLE_NONESSENTIAL_TRAFFIC".into(),
        json!("1"),
    );
    env.insert("FIGMA_API_TOKEN".into(), json!(config.figma_api_token));
    env
}

/// Merge our settings into an existing `settings.json` document.
pub fn merge_settings(existing: Option<Value>, config: &DesignerConfig) -> Value {
    let mut root = into_object(existing);

    let env = root
        .entry("env")
        .or_insert_with(|| Value::Object(Map::new()));
    if !env.is_object() {
        *env = Value::Object(Map::new());
    }
    if let Value::Object(env) = env {
        env.extend(settings_env(config));
    }

    root.insert("model".into(), json!(DEFAULT_MODEL));
    Value::Object(root)
}

/// Merge the Figma server entry into an existing `.mcp.json` document.
pub fn merge_mcp(existing: Option<Value>, config: &DesignerConfig) -> Value {
    let mut root = into_object(existing);

    let servers = root
        .entry("mcpServers")
        .or_insert_with(|| Value::Object(Map::new()));
    if !servers.is_object() {
        *servers = Value::Object(Map::new());
    }
    if let Value::Object(servers) = servers {
        servers.insert(
            "figma".into(),
            json!({
                "type": "http",
                "url": FIGMA_MCP_URL,
                "env": { "FIGMA_API_TOKEN": config.figma_api_token }
            }),
        );
    }

    Value::Object(root)
}

/// Write the assistant settings and MCP registry for `config`.
pub fn write_assistant_config(
    paths: &Paths,
    config: &DesignerConfig,
) -> Result<AssistantFiles, ConfigError> {
    fs::create_dir_all(paths.assistant_dir())?;

    let settings_path = paths.assistant_settings();
    let settings = merge_settings(read_json(&settings_path), config);
    write_private(&settings_path, &serde_json::to_string_pretty(&settings)?)?;

    let mcp_path = paths.mcp_config();
    let mcp = merge_mcp(read_json(&mcp_path), config);
    write_private(&mcp_path, &serde_json::to_string_pretty(&mcp)?)?;

    Ok(AssistantFiles {
        settings: settings_path,
        mcp: mcp_path,
    })
}

/// Read a JSON document, treating a missing or unparseable file as absent.
fn read_json(path: &Path) -> Option<Value> {
    let contents = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "replacing unparseable assistant config");
            None
        }
    }
}

fn into_object(value: Option<Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
