//! Form drafts and the field-definition payload they submit.
//!
//! Every create/update form reduces to a [`FormPayload`]: an ordered list of
//! text fields plus at most one file part. The HTTP layer turns that into a
//! multipart body, so the per-resource forms never touch the wire format.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::NaiveDate;

use crate::{
    models::{Category, Lenient, Member, Project, ProjectStatus, Report, Resource},
    validation::{self, ValidationError},
};

/// A file chosen in a form, held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// MIME type guessed from the extension; unknown types are sent as
    /// `application/octet-stream`.
    pub fn mime_type(&self) -> &'static str {
        match validation::file_extension(&self.file_name).as_deref() {
            Some(".pdf") => "application/pdf",
            Some(".doc") => "application/msword",
            Some(".docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            },
            Some(".xls") => "application/vnd.ms-excel",
            Some(".xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Some(".png") => "image/png",
            Some(".jpg") | Some(".jpeg") => "image/jpeg",
            Some(".gif") => "image/gif",
            Some(".webp") => "image/webp",
            Some(".svg") => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }

    /// Inline `data:` URL used as a local preview before upload.
    pub fn preview_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.bytes))
    }
}

/// Ordered multipart field definitions: text fields then an optional file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<(&'static str, String)>,
    file: Option<(&'static str, FilePart)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    /// Attach `part` under `name`; `None` leaves the payload without a file.
    pub fn file(mut self, name: &'static str, part: Option<FilePart>) -> Self {
        self.file = part.map(|part| (name, part));
        self
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn file_part(&self) -> Option<(&'static str, &FilePart)> {
        self.file.as_ref().map(|(name, part)| (*name, part))
    }

    pub fn into_parts(self) -> (Vec<(&'static str, String)>, Option<(&'static str, FilePart)>) {
        (self.fields, self.file)
    }
}

/// Controlled form state for one resource type.
pub trait Draft: Clone + fmt::Debug + Default + Send + Sync {
    type Entity: Resource;

    fn validate(&self) -> Result<(), ValidationError>;

    fn to_payload(&self) -> FormPayload;

    /// The newly chosen file, if any.
    fn attachment(&self) -> Option<&FilePart>;

    /// Local preview of the newly chosen file.
    fn preview(&self) -> Option<String> {
        self.attachment().map(FilePart::preview_data_url)
    }
}

/// Drafts that can be pre-populated from an existing entity for edit mode.
pub trait EditDraft: Draft {
    fn from_entity(entity: &Self::Entity) -> Self;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
    pub position: String,
    /// An unrecognised committee loaded for editing is sent back unchanged.
    pub committee: Option<Lenient<Category>>,
    pub about: String,
    pub photo: Option<FilePart>,
}

impl Draft for MemberDraft {
    type Entity = Member;

    fn validate(&self) -> Result<(), ValidationError> {
        validation::require("name", &self.name)?;
        validation::require("position", &self.position)
    }

    fn to_payload(&self) -> FormPayload {
        FormPayload::new()
            .text("name", self.name.as_str())
            .text("position", self.position.as_str())
            .text(
                "committee",
                self.committee
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            )
            .text("about", self.about.as_str())
            .file("photo", self.photo.clone())
    }

    fn attachment(&self) -> Option<&FilePart> {
        self.photo.as_ref()
    }
}

impl EditDraft for MemberDraft {
    fn from_entity(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            position: member.position.clone(),
            committee: member.committee.clone(),
            about: member.about.clone().unwrap_or_default(),
            photo: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub budget: String,
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub image: Option<FilePart>,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: ProjectStatus::Planned,
            budget: String::new(),
            date: None,
            category: None,
            image: None,
        }
    }
}

impl Draft for ProjectDraft {
    type Entity = Project;

    fn validate(&self) -> Result<(), ValidationError> {
        validation::require("title", &self.title)?;
        validation::require("description", &self.description)?;
        validation::require("budget", &self.budget)?;
        if self.date.is_none() {
            return Err(ValidationError::MissingField {
                field: "date",
            });
        }
        if self.category.is_none() {
            return Err(ValidationError::MissingField {
                field: "category",
            });
        }
        Ok(())
    }

    fn to_payload(&self) -> FormPayload {
        FormPayload::new()
            .text("title", self.title.as_str())
            .text("description", self.description.as_str())
            .text("status", self.status.as_str())
            .text("budget", self.budget.as_str())
            .text(
                "date",
                self.date
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            )
            .text("category", self.category.map(Category::as_str).unwrap_or_default())
            .file("image", self.image.clone())
    }

    fn attachment(&self) -> Option<&FilePart> {
        self.image.as_ref()
    }
}

impl EditDraft for ProjectDraft {
    fn from_entity(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            status: project.status,
            budget: project.budget.clone(),
            date: project.date.known(),
            category: project.category.known(),
            image: None,
        }
    }
}

/// Upload form for a transparency report. There is no edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDraft {
    pub title: String,
    pub file: Option<FilePart>,
}

impl ReportDraft {
    /// Accept `part` if it passes the upload policy. A blank title is filled
    /// from the file name. A rejected file leaves the draft unchanged.
    pub fn select_file(&mut self, part: FilePart) -> Result<(), ValidationError> {
        if let Err(err) = validation::validate_report_file(&part.file_name, part.size()) {
            tracing::debug!(file = %part.file_name, size = part.size(), "report file rejected: {err}");
            return Err(err);
        }
        if self.title.trim().is_empty() {
            self.title = validation::title_from_file_name(&part.file_name);
        }
        self.file = Some(part);
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Draft for ReportDraft {
    type Entity = Report;

    fn validate(&self) -> Result<(), ValidationError> {
        let file = self.file.as_ref().ok_or(ValidationError::MissingFile)?;
        validation::validate_report_file(&file.file_name, file.size())?;
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingReportTitle);
        }
        Ok(())
    }

    fn to_payload(&self) -> FormPayload {
        FormPayload::new()
            .text("title", self.title.trim())
            .file("file", self.file.clone())
    }

    fn attachment(&self) -> Option<&FilePart> {
        self.file.as_ref()
    }
}
