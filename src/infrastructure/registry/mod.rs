//! Model registry access

pub mod artifact;
pub mod mlflow;

pub use artifact::ModelDocument;
pub use mlflow::MlflowRegistry;
