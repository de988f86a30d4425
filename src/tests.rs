use crate::apis::nodes::NODES_PATH;
use crate::models::*;
use crate::{AlfrescoClient, AlfrescoError, BasicAuth, ClientConfig};
use serde_json::json;
use serial_test::serial;
use std::env;
use std::time::Duration;

#[test]
fn node_entry_decodes_full_document() {
    let body = json!({
        "entry": {
            "id": "8f2105b4-daaf-4874-9e8a-2152569d109b",
            "isFolder": false,
            "isFile": true,
            "name": "prova",
            "parentId": "b4cff62a-664d-4d45-9302-98723eac1319",
            "nodeType": "cm:content",
            "createdAt": "2024-03-01T10:15:30.000+0000",
            "modifiedAt": "2024-03-01T10:16:00.000+0000",
            "createdByUser": { "id": "admin", "displayName": "Administrator" },
            "modifiedByUser": { "id": "admin", "displayName": "Administrator" },
            "content": {
                "mimeType": "text/plain",
                "mimeTypeName": "Plain Text",
                "sizeInBytes": 5,
                "encoding": "UTF-8"
            },
            "aspectNames": ["cm:titled"],
            "properties": { "cm:title": "b", "cm:description": "a" }
        }
    });

    let entry: NodeEntry = serde_json::from_value(body).unwrap();
    let node = entry.entry;
    assert_eq!(node.name, "prova");
    assert!(!node.is_folder);
    assert_eq!(node.parent_id.as_deref(), Some("b4cff62a-664d-4d45-9302-98723eac1319"));
    assert_eq!(node.created_at, "2024-03-01T10:15:30.000+0000");
    assert_eq!(node.created_by_user.display_name, "Administrator");
    let content = node.content.unwrap();
    assert_eq!(content.mime_type, "text/plain");
    assert_eq!(content.size_in_bytes, 5);
    assert_eq!(node.properties.unwrap()["cm:title"], "b");
}

#[test]
fn folder_without_content_decodes() {
    let node: Node = serde_json::from_value(json!({
        "id": "f1",
        "isFolder": true,
        "name": "docs",
        "nodeType": "cm:folder"
    }))
    .unwrap();
    assert!(node.is_folder);
    assert!(node.content.is_none());
    assert!(node.parent_id.is_none());
}

#[test]
fn list_response_decodes_pagination() {
    let body = json!({
        "list": {
            "pagination": {
                "count": 1,
                "hasMoreItems": true,
                "totalItems": 3,
                "skipCount": 0,
                "maxItems": 1
            },
            "entries": [
                { "entry": { "id": "n1", "name": "a.txt", "isFolder": false } }
            ]
        }
    });

    let list: NodeListResponse = serde_json::from_value(body).unwrap();
    assert_eq!(list.list.pagination.total_items, 3);
    assert!(list.list.pagination.has_more_items);
    assert_eq!(list.list.nodes().map(|n| n.id.as_str()).collect::<Vec<_>>(), ["n1"]);
}

#[test]
fn error_envelope_decodes_all_fields() {
    let envelope: ErrorEnvelope = serde_json::from_value(json!({
        "error": {
            "errorKey": "framework.exception.EntityNotFound",
            "statusCode": 404,
            "briefSummary": "06010001 The entity with id: x was not found",
            "stackTrace": "For security reasons the stack trace is no longer displayed",
            "descriptionURL": "https://api-explorer.alfresco.com",
            "logId": "abc-123"
        }
    }))
    .unwrap();

    let payload = envelope.error;
    assert_eq!(payload.status_code, 404);
    assert_eq!(payload.description_url, "https://api-explorer.alfresco.com");
    assert_eq!(payload.log_id, "abc-123");
    assert_eq!(
        payload.to_string(),
        "framework.exception.EntityNotFound: 06010001 The entity with id: x was not found"
    );
}

#[test]
fn create_request_serializes_wire_names() {
    let mut properties = Properties::new();
    properties.insert("cm:title".into(), json!("b"));
    let request = NodeCreateRequest::new("prova", NODE_TYPE_CONTENT).with_properties(properties);

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "name": "prova", "nodeType": "cm:content", "properties": { "cm:title": "b" } })
    );
}

#[test]
fn properties_from_struct_and_rejects_scalars() {
    #[derive(serde::Serialize)]
    struct Titled {
        #[serde(rename = "cm:title")]
        title: String,
    }

    let props = properties_from(&Titled { title: "t".into() }).unwrap();
    assert_eq!(props["cm:title"], "t");

    let err = properties_from(&42).unwrap_err();
    assert!(matches!(err, AlfrescoError::InvalidParameter(_)));
}

#[test]
fn config_builds_plain_http_base_url() {
    let config = ClientConfig::new("alfresco-test.example", 8080).unwrap();
    assert_eq!(config.base_url().as_str(), "http://alfresco-test.example:8080/");
    assert_eq!(
        config.base_url().join(NODES_PATH).unwrap().as_str(),
        "http://alfresco-test.example:8080/alfresco/api/-default-/public/alfresco/versions/1/nodes/"
    );
}

#[test]
fn config_keeps_explicit_scheme_and_path_prefix() {
    let config = ClientConfig::new("https://ecm.example", 8443).unwrap();
    assert_eq!(config.base_url().as_str(), "https://ecm.example:8443/");

    let config = ClientConfig::from_url("http://proxy.example/ecm").unwrap();
    assert_eq!(
        config.base_url().join("alfresco/service/api/login").unwrap().as_str(),
        "http://proxy.example/ecm/alfresco/service/api/login"
    );
}

#[test]
fn config_sets_port_after_path_prefix_and_ipv6() {
    let config = ClientConfig::new("http://ecm.example/ctx", 8080).unwrap();
    assert_eq!(config.base_url().as_str(), "http://ecm.example:8080/ctx/");

    let config = ClientConfig::new("ecm.example/ctx/", 9090).unwrap();
    assert_eq!(config.base_url().as_str(), "http://ecm.example:9090/ctx/");

    let config = ClientConfig::new("::1", 8080).unwrap();
    assert_eq!(config.base_url().as_str(), "http://[::1]:8080/");

    let config = ClientConfig::new("[::1]", 8080).unwrap();
    assert_eq!(config.base_url().as_str(), "http://[::1]:8080/");
}

#[test]
fn config_rejects_host_with_port() {
    assert!(matches!(ClientConfig::new("ecm.example:9000", 8080), Err(AlfrescoError::Config(_))));
    assert!(matches!(
        ClientConfig::new("http://ecm.example:9000/ctx", 8080),
        Err(AlfrescoError::Config(_))
    ));
    assert!(matches!(ClientConfig::new("bad host", 8080), Err(AlfrescoError::Config(_))));
}

#[test]
fn config_timeouts_default_and_override() {
    let config = ClientConfig::new("localhost", 8080).unwrap();
    assert_eq!(config.timeout(), Some(Duration::from_secs(30)));

    let config = config
        .with_timeout(Some(Duration::from_secs(5)))
        .with_connect_timeout(None);
    assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    assert_eq!(config.connect_timeout(), None);
}

#[test]
fn config_without_request_timeout_for_large_transfers() {
    let config = ClientConfig::new("localhost", 8080).unwrap().with_timeout(None);
    assert_eq!(config.timeout(), None);
    assert_eq!(config.connect_timeout(), Some(Duration::from_secs(10)));
    assert!(config.build_http_client().is_ok());
}

#[test]
fn session_exposes_ticket_only_when_ticket_based() {
    let config = ClientConfig::new("localhost", 8080).unwrap();

    let ticketed = AlfrescoClient::with_ticket(config.clone(), "TICKET_abc").unwrap();
    assert_eq!(ticketed.ticket(), Some("TICKET_abc"));
    assert_eq!(ticketed.clone().ticket(), Some("TICKET_abc"));

    let basic = AlfrescoClient::with_auth(config, BasicAuth::new("admin", "admin")).unwrap();
    assert_eq!(basic.ticket(), None);
}

#[test]
fn config_rejects_garbage_url() {
    assert!(ClientConfig::from_url("not a url").is_err());
}

#[test]
fn server_error_helpers() {
    let err = AlfrescoError::server_error(404, ErrorPayload::from_status(404, "gone"));
    assert!(err.is_not_found());
    assert_eq!(err.payload().unwrap().brief_summary, "gone");
    assert!(AlfrescoError::auth_error("nope").payload().is_none());
}

const ENV_KEYS: [&str; 4] = ["ALFRESCO_URL", "ALFRESCO_HOST", "ALFRESCO_PORT", "ALFRESCO_TIMEOUT_SECS"];

/// Set the given variables and clear the other config keys
fn set_env(vars: &[(&str, &str)]) {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }
}

#[test]
#[serial]
fn from_env_defaults_port() {
    set_env(&[("ALFRESCO_HOST", "ecm.example")]);
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url().as_str(), "http://ecm.example:8080/");
    assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    set_env(&[]);
}

#[test]
#[serial]
fn from_env_reads_port_and_timeout() {
    set_env(&[
        ("ALFRESCO_HOST", "ecm.example"),
        ("ALFRESCO_PORT", "9090"),
        ("ALFRESCO_TIMEOUT_SECS", "7"),
    ]);
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url().as_str(), "http://ecm.example:9090/");
    assert_eq!(config.timeout(), Some(Duration::from_secs(7)));
    set_env(&[]);
}

#[test]
#[serial]
fn from_env_prefers_full_url() {
    set_env(&[("ALFRESCO_URL", "https://ecm.example/ctx"), ("ALFRESCO_HOST", "ignored")]);
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url().as_str(), "https://ecm.example/ctx/");
    set_env(&[]);
}

#[test]
#[serial]
fn from_env_rejects_bad_values() {
    set_env(&[]);
    assert!(matches!(ClientConfig::from_env(), Err(AlfrescoError::Config(_))));

    set_env(&[("ALFRESCO_HOST", "ecm.example"), ("ALFRESCO_PORT", "eighty")]);
    assert!(matches!(ClientConfig::from_env(), Err(AlfrescoError::Config(_))));

    set_env(&[("ALFRESCO_HOST", "ecm.example"), ("ALFRESCO_PORT", "70000")]);
    assert!(matches!(ClientConfig::from_env(), Err(AlfrescoError::Config(_))));

    set_env(&[("ALFRESCO_HOST", "ecm.example"), ("ALFRESCO_TIMEOUT_SECS", "-1")]);
    assert!(matches!(ClientConfig::from_env(), Err(AlfrescoError::Config(_))));
    set_env(&[]);
}
