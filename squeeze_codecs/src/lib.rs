mod jpeg;
mod pdf;

pub use jpeg::JpegCodec;
pub use pdf::PdfCodec;

use std::path::Path;

use squeeze_core::QualityCodec;

/// Resolve a codec from an explicit name, e.g. a `--codec` CLI override.
pub fn codec_by_name(name: &str) -> anyhow::Result<Box<dyn QualityCodec>> {
    match name {
        "pdf" => Ok(Box::new(PdfCodec)),
        "jpeg" | "jpg" => Ok(Box::new(JpegCodec)),
        other => anyhow::bail!("unknown codec '{}'. Valid options: pdf, jpeg", other),
    }
}

/// Pick a codec from the input document's extension.
pub fn codec_for_path(path: &Path) -> anyhow::Result<Box<dyn QualityCodec>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => Ok(Box::new(PdfCodec)),
        "jpg" | "jpeg" => Ok(Box::new(JpegCodec)),
        _ => anyhow::bail!(
            "cannot pick a codec for {:?}; use --codec to choose one explicitly",
            path
        ),
    }
}
