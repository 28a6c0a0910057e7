//! `ChartSink` that writes a chart directory on disk.

use std::fs;
use std::path::PathBuf;

use crate::domain::{AppError, Destination};
use crate::ports::ChartSink;

/// Writes `values.yaml` and `templates/*.yaml` under a chart root directory.
#[derive(Debug, Clone)]
pub struct FilesystemChartSink {
    root: PathBuf,
}

impl FilesystemChartSink {
    /// Create a sink for the given chart root; the directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute or root-relative path a destination is written to.
    pub fn path_for(&self, destination: Destination) -> PathBuf {
        self.root.join(destination.relative_path())
    }
}

impl ChartSink for FilesystemChartSink {
    fn write(&self, destination: Destination, contents: &str) -> Result<(), AppError> {
        let full_path = self.path_for(destination);
        let to_write_error =
            |source| AppError::Write { destination: destination.id().to_string(), source };

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(to_write_error)?;
        }
        fs::write(&full_path, contents).map_err(to_write_error)
    }

    fn location(&self, destination: Destination) -> String {
        self.path_for(destination).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceKind;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn writes_values_and_templates() {
        let temp = TempDir::new().unwrap();
        let sink = FilesystemChartSink::new(temp.path().join("helm"));

        sink.write(Destination::Values, "a: 1\n").unwrap();
        sink.write(Destination::Manifest(ResourceKind::Service), "kind: Service\n").unwrap();

        let root = temp.path().join("helm");
        assert_eq!(fs::read_to_string(root.join("values.yaml")).unwrap(), "a: 1\n");
        assert_eq!(
            fs::read_to_string(root.join("templates/service.yaml")).unwrap(),
            "kind: Service\n"
        );
    }

    #[test]
    fn rewrites_replace_previous_contents() {
        let temp = TempDir::new().unwrap();
        let sink = FilesystemChartSink::new(temp.path());

        sink.write(Destination::Values, "first: 1\nsecond: 2\n").unwrap();
        sink.write(Destination::Values, "third: 3\n").unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("values.yaml")).unwrap(), "third: 3\n");
    }

    #[test]
    fn write_failure_names_destination() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocked");
        fs::write(&blocker, "not a directory").unwrap();
        let sink = FilesystemChartSink::new(&blocker);

        let err = sink.write(Destination::Manifest(ResourceKind::Ingress), "x").unwrap_err();
        match err {
            AppError::Write { destination, .. } => assert_eq!(destination, "ingress"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn location_points_into_root() {
        let sink = FilesystemChartSink::new("helm");
        assert_eq!(
            PathBuf::from(sink.location(Destination::Manifest(ResourceKind::Deployment))),
            Path::new("helm").join("templates").join("deployment.yaml")
        );
    }
}
