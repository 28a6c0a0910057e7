//! The "generate configuration" operation: decode a payload and emit its chart.

use tracing::info;

use crate::app::{AppContext, emitter};
use crate::domain::{AppError, CancelFlag, ChartReport, Mapping, decode_payload};
use crate::ports::{ChartSink, ManifestSerializer};

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// The decoded payload, exactly as received.
    pub config: Mapping,
    pub report: ChartReport,
}

/// Execute the generate command against raw JSON bytes.
pub fn execute<S, K>(
    ctx: &AppContext<S, K>,
    payload: &[u8],
    cancel: &CancelFlag,
) -> Result<GenerateOutcome, AppError>
where
    S: ManifestSerializer,
    K: ChartSink,
{
    let config = decode_payload(payload)?;
    let report = emitter::emit(ctx, &config, cancel)?;
    info!(
        files = report.written.len(),
        skipped = report.skipped_keys.len(),
        "Generated chart"
    );
    Ok(GenerateOutcome { config, report })
}
