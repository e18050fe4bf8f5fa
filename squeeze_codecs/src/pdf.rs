use std::path::Path;

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use lopdf::{Document, Object, ObjectId, Stream};
use tracing::debug;

use squeeze_core::{Artifact, Candidate, QualityCodec};

/// PDF recompressor.
///
/// Re-encodes every embedded DCTDecode (baseline JPEG) image XObject at the
/// trial quality, keeps the smaller of the original and re-encoded bytes
/// per image, then flate-compresses the document's remaining streams and
/// writes the result to a fresh artifact.
///
/// Image streams that cannot be decoded (exotic color spaces, masked or
/// progressive JPEGs) are left untouched rather than failing the trial;
/// the document is still valid, just compressed less. A document that
/// cannot be parsed at all fails the trial, which aborts the search.
pub struct PdfCodec;

impl QualityCodec for PdfCodec {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn recompress(&self, input: &Path, quality: u8) -> anyhow::Result<Candidate> {
        let mut doc =
            Document::load(input).with_context(|| format!("loading PDF {:?}", input))?;

        let targets: Vec<ObjectId> = doc
            .objects
            .iter()
            .filter_map(|(id, obj)| match obj {
                Object::Stream(stream) if is_jpeg_image(stream) => Some(*id),
                _ => None,
            })
            .collect();

        let mut reencoded = 0usize;
        for id in &targets {
            if let Some(Object::Stream(stream)) = doc.objects.get_mut(id) {
                if let Some(smaller) = reencode_jpeg(&stream.content, quality)? {
                    if smaller.len() < stream.content.len() {
                        stream.set_content(smaller);
                        reencoded += 1;
                    }
                }
            }
        }
        debug!(
            quality,
            images = targets.len(),
            reencoded,
            "re-encoded embedded JPEG streams"
        );

        // Unfiltered streams (page content, fonts, metadata) still flate
        // down; image streams already carry a filter and are skipped.
        doc.compress();

        let artifact = Artifact::create(".pdf")?;
        doc.save(artifact.path())
            .with_context(|| format!("saving recompressed PDF at quality {}", quality))?;
        Ok(Candidate::from_artifact(quality, artifact)?)
    }
}

/// An image XObject whose payload is a baseline JPEG we can re-encode.
fn is_jpeg_image(stream: &Stream) -> bool {
    let dict = &stream.dict;
    let is_image = matches!(
        dict.get(b"Subtype"),
        Ok(Object::Name(name)) if name.as_slice() == b"Image"
    );
    let dct = match dict.get(b"Filter") {
        Ok(Object::Name(name)) => name.as_slice() == b"DCTDecode",
        Ok(Object::Array(filters)) => filters
            .iter()
            .any(|f| matches!(f, Object::Name(n) if n.as_slice() == b"DCTDecode")),
        _ => false,
    };
    is_image && dct
}

/// Decode a JPEG payload and re-encode it at `quality`.
///
/// Returns `Ok(None)` for payloads the decoder rejects; those streams are
/// carried through unchanged.
fn reencode_jpeg(data: &[u8], quality: u8) -> anyhow::Result<Option<Vec<u8>>> {
    let decoded = match image::load_from_memory_with_format(data, image::ImageFormat::Jpeg) {
        Ok(img) => img,
        Err(_) => return Ok(None),
    };
    // JPEG has no alpha; normalize to RGB before encoding.
    let rgb = image::DynamicImage::ImageRgb8(decoded.to_rgb8());
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    rgb.write_with_encoder(encoder)
        .context("re-encoding embedded JPEG")?;
    Ok(Some(out))
}
