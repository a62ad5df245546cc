//! `locate` subcommand.

use std::path::Path;

use anyhow::{Context, bail};

use editor_bridge_config::BridgeConfig;
use editor_bridge_core::{Document, ElementHandle, MemoryDocument, SelectorSynthesizer};

/// Locator of `element` in `document`.
pub(crate) fn locate(
    config: &BridgeConfig,
    document: &MemoryDocument,
    element: ElementHandle,
) -> anyhow::Result<String> {
    if document.tag_name(element).is_none() {
        bail!("No element with handle {} in fixture", element.0);
    }
    let selector = SelectorSynthesizer::new(&config.selector).context("Invalid selector config")?;
    Ok(selector.locate(document, element))
}

/// Handle `locate`.
pub(crate) async fn handle_locate(
    config: &BridgeConfig,
    document: &Path,
    element: u64,
) -> anyhow::Result<()> {
    let fixture = tokio::fs::read_to_string(document)
        .await
        .with_context(|| format!("Failed to read document fixture {}", document.display()))?;
    let document = MemoryDocument::from_json(&fixture).context("Invalid document fixture")?;

    println!("{}", locate(config, &document, ElementHandle(element))?);
    Ok(())
}
