use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::models::Document;

/// Try to load one plain-text document; return Ok(None) when it decodes to nothing.
///
/// Invalid UTF-8 is replaced rather than rejected. PDF input is refused, text
/// extraction belongs to an upstream tool.
pub fn load_document_opt(path: &Path) -> Result<Option<Document>> {
    let is_pdf_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if is_pdf_ext {
        bail!(
            "{} looks like a PDF; extract its text first and pass the .txt file",
            path.display()
        );
    }

    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if bytes.starts_with(b"%PDF-") {
        bail!("{} is a PDF file; extract its text first", path.display());
    }

    let body = String::from_utf8_lossy(&bytes).into_owned();
    if body.trim().is_empty() {
        warn!("Skipping empty document - path={}", path.display());
        return Ok(None);
    }

    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    debug!("Loaded document - label={}, bytes={}", label, bytes.len());
    Ok(Some(Document { label, body }))
}

/// Load every path in order, dropping the ones that turn out empty.
pub fn load_documents(paths: &[PathBuf]) -> Result<Vec<Document>> {
    let mut docs = Vec::with_capacity(paths.len());
    for p in paths {
        if let Some(d) = load_document_opt(p)? {
            docs.push(d);
        }
    }
    info!("Documents loaded - requested={}, loaded={}", paths.len(), docs.len());
    Ok(docs)
}

/// Four short climate-policy texts: three broadly agree, one pushes back.
pub fn example_documents() -> Vec<Document> {
    let bodies = [
        "Global warming is an undeniable scientific reality. \
         Average global temperatures have risen by more than 1°C since the pre-industrial era. \
         Renewable energies are essential to reduce CO2 emissions. \
         Climate action must be a priority for every government.",
        "Climate change is a major challenge for humanity. \
         Greenhouse gas emissions must be reduced quickly. \
         Renewable energies such as solar and wind are viable solutions. \
         The energy transition requires massive investment.",
        "Some people dispute the urgency of global warming. \
         The costs of the energy transition are too high for the economy. \
         Fossil fuels remain necessary to sustain economic growth. \
         Climate models are uncertain and sometimes contradictory.",
        "Technological innovation can solve the climate crisis. \
         Renewable energies are becoming more and more competitive. \
         International collaboration is crucial to fight climate change. \
         Companies must adopt sustainable practices.",
    ];
    bodies
        .iter()
        .enumerate()
        .map(|(i, b)| Document {
            label: format!("example-{}", i + 1),
            body: b.to_string(),
        })
        .collect()
}
