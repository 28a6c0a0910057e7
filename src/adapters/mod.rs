pub mod filesystem_chart_sink;
pub mod memory_chart_sink;
pub mod yaml_serializer;

pub use filesystem_chart_sink::FilesystemChartSink;
pub use memory_chart_sink::MemoryChartSink;
pub use yaml_serializer::YamlManifestSerializer;
