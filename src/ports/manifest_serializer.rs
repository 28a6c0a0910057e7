use crate::domain::{AppError, Mapping};

/// Port for rendering a configuration mapping to manifest text.
pub trait ManifestSerializer {
    /// Serialize `tree`; `what` names the document in error messages.
    fn serialize(&self, what: &str, tree: &Mapping) -> Result<String, AppError>;
}
