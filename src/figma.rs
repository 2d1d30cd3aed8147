//! Figma file URLs.
//!
//! The assistant talks to Figma through the MCP server; all this side needs
//! is the file URL and, optionally, the node to focus on.

use regex::Regex;
use std::sync::LazyLock;

/// Host every design URL must mention.
pub const FIGMA_HOST: &str = "figma.com";

static NODE_ID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]node-id=([^&#]+)").expect("NODE_ID_PARAM regex is valid"));

/// A design file and optional node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigmaTarget {
    /// File URL as given by the user.
    pub url: String,
    /// Node to focus on, in `12:34` form.
    pub node_id: Option<String>,
}

impl FigmaTarget {
    /// Build a target, taking the node from the URL when none is given.
    pub fn new(url: impl Into<String>, node_id: Option<String>) -> Self {
        let url = url.into();
        let node_id = node_id
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .or_else(|| node_id_from_url(&url));
        Self { url, node_id }
    }
}

/// Extract the `node-id` query parameter, normalised to `12:34`.
///
/// Share links encode the colon as `-` or `%3A`.
pub fn node_id_from_url(url: &str) -> Option<String> {
    let raw = NODE_ID_PARAM.captures(url)?.get(1)?.as_str();
    let node = raw.replace("%3A", ":").replace("%3a", ":").replace('-', ":");
    if node.is_empty() {
        None
    } else {
        Some(node)
    }
}
