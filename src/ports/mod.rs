mod chart_sink;
mod manifest_serializer;

pub use chart_sink::ChartSink;
pub use manifest_serializer::ManifestSerializer;
