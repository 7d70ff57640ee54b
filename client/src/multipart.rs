//! Turns a [`FormPayload`] into a multipart request body.

use reqwest::multipart::{Form, Part};
use youth_council_shared::FormPayload;

use crate::error::ApiError;

/// Text fields keep their order; the file part, if any, goes last.
pub fn to_multipart(payload: FormPayload) -> Result<Form, ApiError> {
    let (fields, file) = payload.into_parts();
    let mut form = fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));

    if let Some((name, part)) = file {
        let mime = part.mime_type();
        let file_part = Part::bytes(part.bytes)
            .file_name(part.file_name)
            .mime_str(mime)?;
        form = form.part(name, file_part);
    }

    Ok(form)
}
