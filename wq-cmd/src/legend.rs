//! The `legend` command: print the legend of one color scale.

use wq_quilt::{Legend, LegendKind, QuiltScales};

pub fn run_legend(kind: LegendKind, step: Option<f64>, css: bool) -> anyhow::Result<()> {
    let text = render(kind, step, css)?;
    crate::emit(&text, None)
}

fn render(kind: LegendKind, step: Option<f64>, css: bool) -> anyhow::Result<String> {
    let scales = QuiltScales::new()?;
    let legend = Legend::build(kind, &scales, step.unwrap_or_else(|| kind.default_step()))?;
    log::info!(
        "{}: {} gradient stops, {} markers",
        legend.title,
        legend.gradient.len(),
        legend.markers.len()
    );
    if css {
        Ok(legend.css_gradient())
    } else {
        Ok(serde_json::to_string_pretty(&legend)?)
    }
}
