//! Create, write, read back, list and delete a document on a live server.
//!
//! ```text
//! ALFRESCO_HOST=alfresco.example ALFRESCO_PORT=8080 \
//! ALFRESCO_USERNAME=admin ALFRESCO_PASSWORD=admin \
//! RUST_LOG=info cargo run --example live_roundtrip
//! ```

use alfresco_client::prelude::*;
use alfresco_client::{properties_from, MY_HOME};
use anyhow::{bail, Context};
use serde::Serialize;

#[derive(Serialize)]
struct Example {
    #[serde(rename = "cm:description")]
    description: String,
    #[serde(rename = "cm:title")]
    title: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ClientConfig::from_env()?;
    let username = std::env::var("ALFRESCO_USERNAME").context("ALFRESCO_USERNAME not set")?;
    let password = std::env::var("ALFRESCO_PASSWORD").context("ALFRESCO_PASSWORD not set")?;

    let client = AlfrescoClient::login(config, &username, &password).await?;
    let nodes = client.nodes();

    let home = nodes.list_nodes(MY_HOME, 0, 10, None, None).await?;
    println!("Home folder holds {} node(s)", home.pagination.total_items);

    let properties = properties_from(&Example {
        description: "a".into(),
        title: "b".into(),
    })?;
    let node = nodes.create_node(MY_HOME, "roundtrip-demo", properties).await?;
    println!("Created {}", node.id);

    nodes.save_content(&node.id, None, "abcde").await?;
    let read = nodes.get_node_content(&node.id).await?.text().await?;
    if read != "abcde" {
        bail!("content not expected: {:?}", read);
    }

    nodes.save_content(&node.id, None, "abcde1").await?;
    let read = nodes.get_node_content(&node.id).await?.text().await?;
    if read != "abcde1" {
        bail!("content not expected after overwrite: {:?}", read);
    }
    println!("Content round trip ok");

    let parent = node.parent_id.as_deref().unwrap_or(MY_HOME);
    let order = OrderBy::new().desc("name");
    let condition = Condition::new("isFile", "=", true);
    let listed = nodes.list_nodes(parent, 0, 10, Some(&condition), Some(&order)).await?;
    for child in listed.nodes() {
        println!("  {} {}", child.id, child.name);
    }

    let meta = nodes.get_node_metadata(&node.id).await?;
    println!("{} modified by {}", meta.name, meta.modified_by_user.display_name);

    nodes.delete_node(&node.id).await?;
    match nodes.get_node_metadata(&node.id).await {
        Err(e) if e.is_not_found() => println!("Deleted {}", node.id),
        Err(e) => return Err(e.into()),
        Ok(_) => bail!("node {} still exists after delete", node.id),
    }

    Ok(())
}
