use crate::{
    client::AlfrescoClient,
    error::{AlfrescoError, AlfrescoResult},
    models::{
        Node, NodeCreateRequest, NodeEntry, NodeList, NodeListResponse, NodeUpdateRequest,
        Properties, NODE_TYPE_CONTENT, NODE_TYPE_FOLDER,
    },
    query::{Condition, OrderBy},
};
use bytes::Bytes;
use futures_util::{Stream, StreamExt, TryStream};
use log::{debug, info};
use reqwest::{Body, Method, Response, StatusCode};

/// Public REST API node collection, relative to the server root
pub const NODES_PATH: &str = "alfresco/api/-default-/public/alfresco/versions/1/nodes/";

/// Alias for the current user's home folder
pub const MY_HOME: &str = "-my-";
/// Alias for the repository root
pub const REPOSITORY_ROOT: &str = "-root-";
/// Alias for the shared files folder
pub const SHARED_FILES: &str = "-shared-";

/// Path of a node; ids that URL resolution would treat as dot-segments are refused
fn node_path(id: &str) -> AlfrescoResult<String> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(AlfrescoError::invalid_param(format!("invalid node id: {:?}", id)));
    }
    Ok(format!("{}{}", NODES_PATH, urlencoding::encode(id)))
}

/// Content stream of a node, still attached to the HTTP connection.
///
/// Dropping it without reading releases the connection.
#[derive(Debug)]
pub struct NodeContent {
    response: Response,
}

impl NodeContent {
    pub fn content_type(&self) -> Option<&str> {
        self.response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Read the whole content into memory
    pub async fn bytes(self) -> AlfrescoResult<Bytes> {
        Ok(self.response.bytes().await?)
    }

    pub async fn text(self) -> AlfrescoResult<String> {
        Ok(self.response.text().await?)
    }

    /// Stream the content chunk by chunk
    pub fn bytes_stream(self) -> impl Stream<Item = AlfrescoResult<Bytes>> {
        self.response
            .bytes_stream()
            .map(|chunk| chunk.map_err(AlfrescoError::from))
    }
}

/// Node API operations
pub struct NodeApi<'a> {
    client: &'a AlfrescoClient,
}

impl<'a> NodeApi<'a> {
    pub fn new(client: &'a AlfrescoClient) -> Self {
        Self { client }
    }

    /// Open the content stream of a node
    ///
    /// # Arguments
    /// * `id` - Node id
    pub async fn get_node_content(&self, id: &str) -> AlfrescoResult<NodeContent> {
        info!("Getting content of node {}", id);
        let path = format!("{}/content", node_path(id)?);
        let req = self.client.request(Method::GET, &path).await?;

        let response = self.client.send(req, StatusCode::OK).await?;
        Ok(NodeContent { response })
    }

    /// Get the metadata of a node
    ///
    /// # Arguments
    /// * `id` - Node id
    pub async fn get_node_metadata(&self, id: &str) -> AlfrescoResult<Node> {
        info!("Getting metadata of node {}", id);
        let req = self.client.request(Method::GET, &node_path(id)?).await?;

        let entry: NodeEntry = self.client.execute(req, StatusCode::OK).await?;
        Ok(entry.entry)
    }

    /// Delete a node
    ///
    /// # Arguments
    /// * `id` - Node id
    pub async fn delete_node(&self, id: &str) -> AlfrescoResult<()> {
        info!("Deleting node {}", id);
        let req = self.client.request(Method::DELETE, &node_path(id)?).await?;

        self.client.execute_empty(req, StatusCode::NO_CONTENT).await
    }

    /// List the children of a node
    ///
    /// # Arguments
    /// * `parent_id` - Id of the parent node
    /// * `skip` - Number of children to skip
    /// * `max` - Maximum number of children to return
    /// * `condition` - Optional `where` filter
    /// * `order_by` - Optional sort order
    pub async fn list_nodes(
        &self,
        parent_id: &str,
        skip: u32,
        max: u32,
        condition: Option<&Condition>,
        order_by: Option<&OrderBy>,
    ) -> AlfrescoResult<NodeList> {
        info!("Listing children of node {} (skip={}, max={})", parent_id, skip, max);
        let path = format!("{}/children", node_path(parent_id)?);
        let mut req = self.client.request(Method::GET, &path).await?;
        req = req.query(&[("skipCount", skip), ("maxItems", max)]);

        if let Some(condition) = condition {
            let rendered = condition.to_string();
            debug!("where={}", rendered);
            req = req.query(&[("where", rendered)]);
        }

        if let Some(order) = order_by.filter(|o| !o.is_empty()) {
            let rendered = order.to_string();
            debug!("orderBy={}", rendered);
            req = req.query(&[("orderBy", rendered)]);
        }

        let list: NodeListResponse = self.client.execute(req, StatusCode::OK).await?;
        Ok(list.list)
    }

    /// Create a document node
    ///
    /// # Arguments
    /// * `parent_id` - Id of the parent folder
    /// * `name` - Name of the new node
    /// * `properties` - Custom metadata
    pub async fn create_node(
        &self,
        parent_id: &str,
        name: &str,
        properties: Properties,
    ) -> AlfrescoResult<Node> {
        let request = NodeCreateRequest::new(name, NODE_TYPE_CONTENT).with_properties(properties);
        self.create_node_with(parent_id, request).await
    }

    /// Create a folder (convenience method)
    ///
    /// # Arguments
    /// * `parent_id` - Id of the parent folder
    /// * `name` - Name of the new folder
    /// * `properties` - Custom metadata
    pub async fn create_folder(
        &self,
        parent_id: &str,
        name: &str,
        properties: Properties,
    ) -> AlfrescoResult<Node> {
        let request = NodeCreateRequest::new(name, NODE_TYPE_FOLDER).with_properties(properties);
        self.create_node_with(parent_id, request).await
    }

    /// Create a node of any type
    ///
    /// # Arguments
    /// * `parent_id` - Id of the parent folder
    /// * `request` - Node creation parameters
    pub async fn create_node_with(
        &self,
        parent_id: &str,
        request: NodeCreateRequest,
    ) -> AlfrescoResult<Node> {
        info!("Creating node {} under {}", request.name, parent_id);
        let path = format!("{}/children", node_path(parent_id)?);
        let mut req = self.client.request(Method::POST, &path).await?;
        debug!("Request body: {:?}", request);
        req = req.json(&request);

        let entry: NodeEntry = self.client.execute(req, StatusCode::CREATED).await?;
        Ok(entry.entry)
    }

    /// Replace the content of a node
    ///
    /// # Arguments
    /// * `id` - Node id
    /// * `name` - Optional new name for the node
    /// * `body` - New content
    pub async fn save_content(
        &self,
        id: &str,
        name: Option<&str>,
        body: impl Into<Body>,
    ) -> AlfrescoResult<()> {
        info!("Saving content of node {}", id);
        let path = format!("{}/content", node_path(id)?);
        let mut req = self.client.request(Method::PUT, &path).await?;

        if let Some(name) = name {
            req = req.query(&[("name", name)]);
        }

        req = req
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(body);

        self.client.execute_empty(req, StatusCode::OK).await
    }

    /// Replace the content of a node from a stream of chunks
    ///
    /// # Arguments
    /// * `id` - Node id
    /// * `name` - Optional new name for the node
    /// * `stream` - Chunks of the new content, sent as they arrive
    pub async fn save_content_stream<S>(
        &self,
        id: &str,
        name: Option<&str>,
        stream: S,
    ) -> AlfrescoResult<()>
    where
        S: TryStream + Send + 'static,
        S::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
        Bytes: From<S::Ok>,
    {
        self.save_content(id, name, Body::wrap_stream(stream)).await
    }

    /// Update name and metadata of a node
    ///
    /// # Arguments
    /// * `id` - Node id
    /// * `name` - Node name
    /// * `properties` - Custom metadata
    pub async fn update_metadata(
        &self,
        id: &str,
        name: &str,
        properties: Properties,
    ) -> AlfrescoResult<()> {
        info!("Updating metadata of node {}", id);
        let request = NodeUpdateRequest {
            name: name.to_string(),
            properties,
        };
        let mut req = self.client.request(Method::PUT, &node_path(id)?).await?;
        debug!("Request body: {:?}", request);
        req = req.json(&request);

        self.client.execute_empty(req, StatusCode::OK).await
    }
}
