//! Client-side checks run before any request leaves the machine.

/// Upper bound for an uploaded report, inclusive.
pub const MAX_REPORT_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Report extensions accepted by the upload form, lowercase with dot.
pub const REPORT_EXTENSIONS: [&str; 5] = [".pdf", ".xls", ".xlsx", ".doc", ".docx"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("File size must be less than 10MB")]
    FileTooLarge { size: u64 },
    #[error("Please upload only PDF, Excel, or Word documents")]
    UnsupportedFileType { file_name: String },
    #[error("Please select a file to upload")]
    MissingFile,
    #[error("Please provide a title for the report")]
    MissingReportTitle,
}

/// Reject empty and whitespace-only values.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field,
        });
    }
    Ok(())
}

/// Lowercased extension including the leading dot, e.g. `.pdf`.
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() || (stem.is_empty() && !file_name.starts_with('.')) {
        return None;
    }
    Some(format!(".{}", ext.to_ascii_lowercase()))
}

/// Size is checked before type, matching the order users see the messages.
pub fn validate_report_file(file_name: &str, size: u64) -> Result<(), ValidationError> {
    if size > MAX_REPORT_FILE_SIZE {
        return Err(ValidationError::FileTooLarge {
            size,
        });
    }
    let allowed = file_extension(file_name)
        .map(|ext| REPORT_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);
    if !allowed {
        return Err(ValidationError::UnsupportedFileType {
            file_name: file_name.to_string(),
        });
    }
    Ok(())
}

/// File name with its final extension removed, used to prefill a blank title.
pub fn title_from_file_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}
