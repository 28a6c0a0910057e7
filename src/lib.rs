//! helmgen: turn a JSON resource configuration into a Helm chart scaffold.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use adapters::{FilesystemChartSink, MemoryChartSink, YamlManifestSerializer};
use app::{AppContext, commands::generate};

pub use app::commands::generate::GenerateOutcome;
pub use app::config::{DEFAULT_CONFIG_FILE, OutputConfig, ServerConfig, ServiceConfig};
pub use domain::{
    AppError, CancelFlag, ChartReport, ConfigTree, Destination, Mapping, ResourceKind, Scalar,
};

/// Generate a chart from a JSON payload into `output_dir`.
///
/// Writes `values.yaml` and one `templates/<resource>.yaml` per recognized resource.
pub fn generate(payload: &[u8], output_dir: &Path) -> Result<GenerateOutcome, AppError> {
    let ctx = AppContext::new(YamlManifestSerializer, FilesystemChartSink::new(output_dir));
    generate::execute(&ctx, payload, &CancelFlag::new())
}

/// A chart generated in memory only.
#[derive(Debug, Clone)]
pub struct DryRun {
    pub outcome: GenerateOutcome,
    /// Rendered files in write order.
    pub files: Vec<(Destination, String)>,
}

/// Generate a chart from a JSON payload without touching the filesystem.
pub fn generate_dry_run(payload: &[u8]) -> Result<DryRun, AppError> {
    let sink = MemoryChartSink::new();
    let ctx = AppContext::new(YamlManifestSerializer, sink.clone());
    let outcome = generate::execute(&ctx, payload, &CancelFlag::new())?;
    Ok(DryRun { outcome, files: sink.files() })
}

/// Run the HTTP service until interrupted.
pub async fn serve(config: &ServiceConfig) -> Result<(), AppError> {
    app::server::serve(config).await
}
