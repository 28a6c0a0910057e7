//! Chart emission: classify, template, decorate, serialize, then write.
//!
//! Rendering is pure and finishes for every resource before the first byte
//! reaches the sink, so a failing or cancelled generation leaves no partial
//! chart behind.

use indexmap::IndexMap;
use tracing::{debug, info, trace, warn};

use crate::app::AppContext;
use crate::domain::{
    AppError, CancelFlag, ChartReport, Destination, Mapping, RenderedChart, RenderedFile,
    ResourceKind, VALUES_FILE, classify, decorate, template_resource,
};
use crate::ports::{ChartSink, ManifestSerializer};

/// Render every recognized resource of `config` plus the untouched `values.yaml`.
pub fn render<S, K>(
    ctx: &AppContext<S, K>,
    config: &Mapping,
    cancel: &CancelFlag,
) -> Result<RenderedChart, AppError>
where
    S: ManifestSerializer,
    K: ChartSink,
{
    let values = ctx.serializer().serialize(VALUES_FILE, config)?;

    let mut manifests: IndexMap<ResourceKind, (String, RenderedFile)> = IndexMap::new();
    let mut chart = RenderedChart::default();

    for (key, value) in config {
        let Some(descriptor) = classify(key) else {
            warn!(key = %key, "Skipping top-level key that names no known resource");
            chart.skipped_keys.push(key.clone());
            continue;
        };
        cancel.check()?;

        let templated = template_resource(&descriptor.resource_key, value, cancel)?;
        debug!(
            resource = %descriptor.kind,
            placeholders = templated.placeholders.len(),
            "Templated resource"
        );
        for (leaf, reference) in &templated.placeholders {
            trace!(resource = %descriptor.kind, leaf = %leaf, reference = %reference);
        }

        let manifest = decorate(templated.manifest, &descriptor);
        let what = format!("{} manifest", descriptor.kind);
        let contents = ctx.serializer().serialize(&what, &manifest)?;
        let file = RenderedFile { destination: Destination::Manifest(descriptor.kind), contents };

        if let Some((previous, _)) =
            manifests.insert(descriptor.kind, (descriptor.resource_key.clone(), file))
        {
            warn!(
                resource = %descriptor.kind,
                replaced = %previous,
                key = %descriptor.resource_key,
                "Multiple keys name the same resource; the later one wins"
            );
            chart.placeholders.shift_remove(&previous);
        }
        chart.placeholders.insert(descriptor.resource_key, templated.placeholders);
    }

    chart.files.push(RenderedFile { destination: Destination::Values, contents: values });
    chart.files.extend(manifests.into_values().map(|(_, file)| file));
    Ok(chart)
}

/// Hand every rendered file to the sink, `values` first.
///
/// Commits `cancel` before the first write, so a generation is either
/// cancelled with nothing written or runs to completion.
pub fn write<S, K>(
    ctx: &AppContext<S, K>,
    chart: RenderedChart,
    cancel: &CancelFlag,
) -> Result<ChartReport, AppError>
where
    S: ManifestSerializer,
    K: ChartSink,
{
    cancel.commit()?;

    let mut written = Vec::with_capacity(chart.files.len());
    for file in &chart.files {
        ctx.sink().write(file.destination, &file.contents)?;
        info!(
            destination = %file.destination,
            location = %ctx.sink().location(file.destination),
            "Wrote chart file"
        );
        written.push(file.destination);
    }

    Ok(ChartReport { written, skipped_keys: chart.skipped_keys, placeholders: chart.placeholders })
}

/// Render and write a chart for `config`.
pub fn emit<S, K>(
    ctx: &AppContext<S, K>,
    config: &Mapping,
    cancel: &CancelFlag,
) -> Result<ChartReport, AppError>
where
    S: ManifestSerializer,
    K: ChartSink,
{
    let chart = render(ctx, config, cancel)?;
    write(ctx, chart, cancel)
}
