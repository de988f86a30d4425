/*
 * Alfresco REST client - ticket login, node CRUD, children listing and content streams
 */

// Internal modules
mod client;
pub mod models;  // Make models public
mod apis;
mod error;
mod auth;
mod config;
pub mod query;

#[cfg(test)]
mod tests;

// Re-export public types and interfaces
pub use client::AlfrescoClient;
pub use models::*;
pub use apis::*;
pub use error::{AlfrescoError, AlfrescoResult};
pub use auth::{Authentication, BasicAuth, TicketAuth, LOGIN_PATH};
pub use config::ClientConfig;
pub use query::{Combinator, Condition, OrderBy, SortDirection, Term};

// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AlfrescoClient, ClientConfig,
        BasicAuth, TicketAuth,
        AlfrescoError, AlfrescoResult,
        // Common model types
        Node, NodeList, Pagination, Properties, ErrorPayload,
        Condition, OrderBy, SortDirection,
    };
}
