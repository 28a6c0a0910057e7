pub mod cancel;
pub mod chart;
pub mod config_tree;
pub mod error;
pub mod resource;
pub mod walker;

pub use cancel::CancelFlag;
pub use chart::{
    ChartReport, Destination, RenderedChart, RenderedFile, TEMPLATES_DIR, VALUES_FILE, decorate,
};
pub use config_tree::{ConfigTree, Mapping, Scalar, decode_payload};
pub use error::AppError;
pub use resource::{ResourceDescriptor, ResourceKind, classify};
pub use walker::{Placeholders, TemplatedResource, placeholder, template_resource};
