mod latex_generator;
mod latex_string;
mod tex_render;
mod utils;

pub mod calendar;
pub mod config;
pub mod document;
pub mod layout;
pub mod taxonomy;

pub use config::{Config, ConfigBuilder, SheetArgs, Settings};
pub use tex_render::RenderingError;

use anyhow::Context;
use log::info;

use crate::calendar::resolve_units;
use crate::document::Document;
use crate::latex_generator::LatexGenerator;

/// Resolves the date units of the config, lays out one page per unit and writes the
/// result to the output path of the config.
pub fn generate_stats_sheets(config: &Config) -> anyhow::Result<()> {
    info!(
        "generating {} sheets for {} week(s) around {}",
        config.kind(),
        config.weeks(),
        config.start()
    );

    let units = resolve_units(config.kind(), config.start(), config.weeks())?;
    let document = Document::assemble(config, units);

    info!("laid out {} page(s)", document.pages().len());

    let output = config.output();
    if let Some(parent) = output.parent() {
        utils::create_dir_all(parent)?;
    }

    LatexGenerator::new(config, &document)
        .generate(output)
        .with_context(|| format!("failed to generate `{}`", output.display()))?;

    Ok(())
}
