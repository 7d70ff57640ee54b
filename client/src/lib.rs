//! Authenticated REST access for the youth council site: the HTTP client
//! wrapper, session context, generic remote collections, and the headless
//! admin/public screens built on top of them.

pub mod collection;
pub mod config;
pub mod error;
pub mod http;
pub mod multipart;
pub mod public;
pub mod resources;
pub mod screens;
pub mod session;

pub use collection::{FetchOutcome, FetchTicket, RemoteCollection};
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{ApiClient, LoginResponse};
pub use public::PublicSite;
pub use screens::{
    Action, Confirm, Editor, EditorMode, MemberScreen, Mount, Notice, ProjectScreen, ReportScreen,
    ResourceScreen, ScreenCore, ScreenError,
};
pub use session::{Access, FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use youth_council_shared as shared;
