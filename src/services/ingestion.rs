use crate::error::AnalysisError;
use crate::models::{ImageFormat, ImagePayload, StagedImage};

/// Accept an upload only when its file extension names a supported format.
pub fn stage_upload(file_name: &str, bytes: Vec<u8>) -> Result<StagedImage, AnalysisError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or(file_name);

    let format = ImageFormat::from_extension(extension)
        .ok_or_else(|| AnalysisError::UnsupportedFormat(extension.to_string()))?;

    log::debug!("📥 Staged {} upload ({} bytes)", format, bytes.len());

    Ok(StagedImage { format, bytes })
}

/// Wrap a staged upload into the payload the model API expects.
///
/// The payload carries the upload's bytes untouched; no re-encoding, no size
/// or dimension checks.
pub fn prepare_payload(staged: Option<StagedImage>) -> Result<ImagePayload, AnalysisError> {
    let staged = staged.ok_or(AnalysisError::NoImage)?;

    if staged.bytes.is_empty() {
        return Err(AnalysisError::EmptyImage);
    }

    Ok(ImagePayload {
        mime_type: staged.format.mime_type().to_string(),
        data: staged.bytes,
    })
}
