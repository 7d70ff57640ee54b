//! Wire models and client-side rules shared by the youth council API client
//! and its command-line front end.

pub mod form;
pub mod listing;
pub mod models;
pub mod validation;

pub use form::{FilePart, FormPayload, MemberDraft, ProjectDraft, ReportDraft};
pub use models::{Category, Lenient, Member, Project, ProjectStatus, Report, Resource, Updatable};
pub use validation::ValidationError;
