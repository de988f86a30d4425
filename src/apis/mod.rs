pub mod nodes;

// Re-export all APIs
pub use nodes::{NodeApi, NodeContent, MY_HOME, NODES_PATH, REPOSITORY_ROOT, SHARED_FILES};
