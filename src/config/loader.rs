use anyhow::{Context, Result, anyhow, bail};
use schemars::{Schema, schema_for};
use serde_valid::Validate;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, trace};

use super::models::ConfigDocument;
use crate::profile::{self, Profile, labels_match};

/// Load an edit document from a string slice.
pub fn load_from_str(s: &str) -> Result<ConfigDocument> {
    let doc: ConfigDocument =
        serde_json::from_str(s).context("Failed to parse JSON edit document string")?;
    validate_document(&doc)?;
    Ok(doc)
}

/// Load an edit document from any reader (e.g., a file).
pub fn load_from_reader<R: Read>(reader: R) -> Result<ConfigDocument> {
    let doc: ConfigDocument =
        serde_json::from_reader(reader).context("Failed to parse JSON edit document from reader")?;
    validate_document(&doc)?;
    Ok(doc)
}

/// Load an edit document from a file path synchronously.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ConfigDocument> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)
        .with_context(|| format!("Failed to open edit document {}", path_ref.display()))?;
    let doc = load_from_reader(file)?;
    debug!("Loaded edit document from {}", path_ref.display());
    Ok(doc)
}

/// Load an edit document from a file path asynchronously (Tokio).
pub async fn load_from_path_async<P: AsRef<Path>>(path: P) -> Result<ConfigDocument> {
    use tokio::fs;
    let path_ref = path.as_ref();
    let bytes = fs::read(path_ref)
        .await
        .with_context(|| format!("Failed to read edit document {}", path_ref.display()))?;
    let doc: ConfigDocument = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse JSON edit document {}", path_ref.display()))?;
    validate_document(&doc)?;
    debug!("Loaded edit document from {}", path_ref.display());
    Ok(doc)
}

/// Write an edit document as pretty-printed JSON to any writer.
pub fn write_to_writer<W: Write>(doc: &ConfigDocument, mut writer: W) -> Result<()> {
    let json = serde_json::to_string_pretty(doc).context("Failed to serialize edit document")?;
    writer
        .write_all(json.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .context("Failed to write edit document")?;
    Ok(())
}

/// Generate the JSON Schema for the edit document (for editors and external tooling).
pub fn generate_schema() -> Schema {
    schema_for!(ConfigDocument)
}

/// Write the JSON Schema for the edit document to any writer (pretty-printed).
pub fn write_schema_to_writer<W: Write>(mut writer: W) -> Result<()> {
    let schema = generate_schema();
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    writer
        .write_all(json.as_bytes())
        .context("Failed to write schema to writer")?;
    Ok(())
}

/// Built-in profile by name, with the known names listed on failure.
pub fn profile_by_name(name: &str) -> Result<&'static Profile> {
    profile::by_name(name).ok_or_else(|| {
        let known: Vec<_> = profile::BUILTIN.iter().map(|p| p.name).collect();
        anyhow!(
            "Unknown profile '{}' (known profiles: {})",
            name,
            known.join(", ")
        )
    })
}

/// Profile named by a document.
pub fn document_profile(doc: &ConfigDocument) -> Result<&'static Profile> {
    profile_by_name(&doc.profile)
}

/// Structural checks on an edit document.
/// - Field constraints declared on the models (non-empty labels).
/// - The profile must be a built-in one.
/// - A button may appear only once.
///
/// Unknown button or action labels are not errors here; they are reported as
/// diagnostics when the document is resolved against its profile.
pub fn validate_document(doc: &ConfigDocument) -> Result<()> {
    doc.validate()
        .map_err(|e| anyhow!("Invalid edit document: {e}"))?;
    for (i, entry) in doc.buttons.iter().enumerate() {
        entry
            .validate()
            .map_err(|e| anyhow!("Invalid edit document entry {i}: {e}"))?;
    }

    document_profile(doc)?;

    for (i, entry) in doc.buttons.iter().enumerate() {
        if let Some(dup) = doc.buttons[..i]
            .iter()
            .find(|prev| labels_match(&prev.button, &entry.button))
        {
            bail!(
                "Button '{}' is listed more than once (also as '{}')",
                entry.button,
                dup.button
            );
        }
    }

    trace!(
        buttons = doc.buttons.len(),
        profile = %doc.profile,
        "Edit document validated"
    );
    Ok(())
}
