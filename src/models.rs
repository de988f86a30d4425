use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AlfrescoError, AlfrescoResult};

/// Opaque, schema-less custom metadata (e.g. `cm:title`)
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Content model type used for plain documents
pub const NODE_TYPE_CONTENT: &str = "cm:content";
/// Content model type used for folders
pub const NODE_TYPE_FOLDER: &str = "cm:folder";

/// Convert any serializable struct into a property bag
pub fn properties_from<T: Serialize>(value: &T) -> AlfrescoResult<Properties> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(AlfrescoError::invalid_param(format!(
            "properties must serialize to a JSON object, got {}",
            other
        ))),
    }
}

/// Display name and id of a repository user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub id: String,
}

/// Content stream information of a document node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInfo {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub mime_type_name: String,
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub size_in_bytes: u64,
}

/// Node information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub is_folder: bool,
    #[serde(default)]
    pub is_file: bool,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub node_type: String,
    // Timestamps are kept as sent by the server
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub modified_at: String,
    #[serde(default)]
    pub created_by_user: UserInfo,
    #[serde(default)]
    pub modified_by_user: UserInfo,
    #[serde(default)]
    pub content: Option<ContentInfo>,
    #[serde(default)]
    pub aspect_names: Option<Vec<String>>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

/// Wrapper the API puts around single nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeEntry {
    pub entry: Node,
}

/// Window of children returned by a list call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub count: u64,
    pub has_more_items: bool,
    #[serde(default)]
    pub total_items: u64,
    pub skip_count: u64,
    pub max_items: u64,
}

/// Children listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeList {
    pub pagination: Pagination,
    #[serde(default)]
    pub entries: Vec<NodeEntry>,
}

impl NodeList {
    /// Nodes in the order the server returned them
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|e| &e.entry)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeListResponse {
    pub list: NodeList,
}

/// Node creation body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCreateRequest {
    pub name: String,
    pub node_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl NodeCreateRequest {
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            properties: None,
        }
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// Metadata update body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeUpdateRequest {
    pub name: String,
    pub properties: Properties,
}

/// Structured error body returned by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    #[serde(default)]
    pub error_key: String,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub brief_summary: String,
    #[serde(default)]
    pub stack_trace: String,
    #[serde(rename = "descriptionURL", default)]
    pub description_url: String,
    #[serde(default)]
    pub log_id: String,
}

impl ErrorPayload {
    /// Payload for error bodies that are not in the `{"error": {...}}` shape
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status_code: status,
            brief_summary: body.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.error_key.is_empty() {
            write!(f, "{}", self.brief_summary)
        } else {
            write!(f, "{}: {}", self.error_key, self.brief_summary)
        }
    }
}

/// Error response from API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketData {
    #[serde(default)]
    pub ticket: String,
}

/// Login response body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub data: Option<TicketData>,
}
