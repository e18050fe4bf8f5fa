use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;

use squeeze_core::{Artifact, Candidate, QualityCodec};

/// Standalone raster-image recompressor.
///
/// Decodes the input (any format the `image` crate recognizes) and writes
/// it back as a JPEG at the trial quality. Lossy and irreversible, exactly
/// like the embedded-image path of [`PdfCodec`](crate::PdfCodec).
pub struct JpegCodec;

impl QualityCodec for JpegCodec {
    fn name(&self) -> &'static str {
        "jpeg"
    }

    fn recompress(&self, input: &Path, quality: u8) -> anyhow::Result<Candidate> {
        let decoded =
            image::open(input).with_context(|| format!("decoding image {:?}", input))?;
        // JPEG has no alpha; normalize to RGB before encoding.
        let rgb = image::DynamicImage::ImageRgb8(decoded.to_rgb8());

        let artifact = Artifact::create(".jpg")?;
        let file = File::create(artifact.path())?;
        let mut writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
        rgb.write_with_encoder(encoder)
            .with_context(|| format!("encoding JPEG at quality {}", quality))?;
        writer.into_inner().context("flushing encoded JPEG")?;

        Ok(Candidate::from_artifact(quality, artifact)?)
    }
}
