use crate::ports::{ChartSink, ManifestSerializer};

/// The output side of a chart generation: how trees become text and where that text lands.
pub struct AppContext<S: ManifestSerializer, K: ChartSink> {
    serializer: S,
    sink: K,
}

impl<S: ManifestSerializer, K: ChartSink> AppContext<S, K> {
    pub fn new(serializer: S, sink: K) -> Self {
        Self { serializer, sink }
    }

    /// Renders `values.yaml` and the decorated manifests.
    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Receives rendered files once every one of them is ready.
    pub fn sink(&self) -> &K {
        &self.sink
    }
}
