//! Headless admin screens.
//!
//! A screen owns one [`RemoteCollection`], a notice line, and a set of
//! in-flight action flags. Methods take `&self` so a UI can fire them from
//! independent event handlers; state sits behind a short-lived lock that is
//! never held across an await. Failures are logged, stored as a screen-local
//! [`Notice`], and returned, never panicked on.

mod reports;
mod resource;

use parking_lot::Mutex;
use youth_council_shared::Resource;

pub use self::{
    reports::ReportScreen,
    resource::{Editor, EditorMode, MemberScreen, ProjectScreen, ResourceScreen},
};
use crate::{
    collection::{FetchOutcome, RemoteCollection},
    error::ApiError,
    http::ApiClient,
    session::Access,
};

/// Non-fatal message shown on a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Error(message) | Notice::Success(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Actions that carry an in-flight flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Loading,
    Submitting,
    Uploading,
    Deleting,
}

/// What the surrounding router should do after mounting a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    Ready,
    RedirectToLogin,
}

#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error("{0:?} is already in progress")]
    Busy(Action),
    #[error("session is not authenticated; sign in again")]
    RedirectToLogin,
    #[error("no {label} with id {id}")]
    NotFound { label: &'static str, id: i64 },
    #[error("no form is open")]
    NoEditor,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Explicit user confirmation before a destructive call.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

struct CoreState<R> {
    collection: RemoteCollection<R>,
    notice: Option<Notice>,
    in_flight: Vec<Action>,
    redirect: bool,
}

/// State and behaviour every admin screen shares: mount guard, list fetch,
/// delete, logout, and notice/in-flight bookkeeping.
pub struct ScreenCore<R: Resource> {
    client: ApiClient,
    state: Mutex<CoreState<R>>,
}

/// Clears its action flag when dropped, including when the owning future is
/// cancelled mid-flight.
struct InFlight<'a, R> {
    state: &'a Mutex<CoreState<R>>,
    action: Action,
}

impl<R> Drop for InFlight<'_, R> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if let Some(index) = state
            .in_flight
            .iter()
            .position(|action| *action == self.action)
        {
            state.in_flight.remove(index);
        }
    }
}

impl<R: Resource> ScreenCore<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Mutex::new(CoreState {
                collection: RemoteCollection::new(),
                notice: None,
                in_flight: Vec::new(),
                redirect: false,
            }),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Session guard, then the initial fetch. A missing token skips the fetch.
    pub async fn mount(&self) -> Mount {
        if self.client.session().guard() == Access::RedirectToLogin {
            tracing::info!("no session token, redirecting {} screen to login", R::LABEL);
            self.state.lock().redirect = true;
            return Mount::RedirectToLogin;
        }
        self.state.lock().redirect = false;
        match self.refresh().await {
            Err(ScreenError::RedirectToLogin) => Mount::RedirectToLogin,
            _ => Mount::Ready,
        }
    }

    /// Re-fetch the collection. Overlapping refreshes are allowed; only the
    /// most recently started one is applied.
    pub async fn refresh(&self) -> Result<FetchOutcome, ScreenError> {
        let (ticket, _flight) = {
            let mut state = self.state.lock();
            state.in_flight.push(Action::Loading);
            (
                state.collection.begin_fetch(),
                InFlight {
                    state: &self.state,
                    action: Action::Loading,
                },
            )
        };

        match self.client.list::<R>().await {
            Ok(items) => {
                let mut state = self.state.lock();
                let outcome = state.collection.finish_fetch(ticket, items);
                if outcome != FetchOutcome::Stale
                    && state.notice.as_ref().is_some_and(Notice::is_error)
                {
                    state.notice = None;
                }
                Ok(outcome)
            },
            Err(err) => {
                let superseded = !self.state.lock().collection.is_current(ticket);
                if superseded {
                    tracing::debug!("ignoring failure of superseded {} fetch: {err}", R::LABEL);
                    return Ok(FetchOutcome::Stale);
                }
                Err(self.fail(err, &format!("Failed to fetch {}s", R::LABEL)))
            },
        }
    }

    /// Ask `confirm`, then DELETE and drop the entry locally. Returns
    /// `Ok(false)` when the user declines; no request is sent in that case.
    pub async fn delete(&self, id: i64, confirm: &mut impl Confirm) -> Result<bool, ScreenError> {
        let _flight = self.begin(Action::Deleting)?;
        if !confirm.confirm(&format!("Delete this {}?", R::LABEL)) {
            tracing::debug!("delete of {} {id} cancelled", R::LABEL);
            return Ok(false);
        }

        match self.client.remove::<R>(id).await {
            Ok(()) => {
                let mut state = self.state.lock();
                state.collection.apply_deleted(id);
                state.notice =
                    Some(Notice::Success(format!("{} deleted successfully!", title_case(R::LABEL))));
                Ok(true)
            },
            Err(err) => Err(self.fail(err, &format!("Failed to delete {}", R::LABEL))),
        }
    }

    /// Clear the token and send the user back to login.
    pub fn logout(&self) -> Result<Mount, ScreenError> {
        self.client.logout()?;
        let mut state = self.state.lock();
        state.redirect = true;
        state.notice = None;
        Ok(Mount::RedirectToLogin)
    }

    pub fn items(&self) -> Vec<R> {
        self.state.lock().collection.items().to_vec()
    }

    /// Borrow the current items without cloning them.
    pub fn with_items<T>(&self, f: impl FnOnce(&[R]) -> T) -> T {
        f(self.state.lock().collection.items())
    }

    pub fn get(&self, id: i64) -> Option<R> {
        self.state.lock().collection.get(id).cloned()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.state.lock().notice.clone()
    }

    pub fn clear_notice(&self) {
        self.state.lock().notice = None;
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.state.lock().in_flight.contains(&action)
    }

    pub fn redirect_to_login(&self) -> bool {
        self.state.lock().redirect
    }

    /// Raise the flag for `action`, or refuse if it is already raised.
    fn begin(&self, action: Action) -> Result<InFlight<'_, R>, ScreenError> {
        let mut state = self.state.lock();
        if state.in_flight.contains(&action) {
            return Err(ScreenError::Busy(action));
        }
        state.in_flight.push(action);
        Ok(InFlight {
            state: &self.state,
            action,
        })
    }

    fn update_collection<T>(&self, f: impl FnOnce(&mut RemoteCollection<R>) -> T) -> T {
        f(&mut self.state.lock().collection)
    }

    fn set_notice(&self, notice: Notice) {
        self.state.lock().notice = Some(notice);
    }

    /// Record a failed call. A 401 signs the session out and flips the screen
    /// to a login redirect instead of showing an error.
    fn fail(&self, err: ApiError, what: &str) -> ScreenError {
        if err.is_unauthorized() {
            tracing::warn!("{what}: token rejected by server, signing out");
            if let Err(clear_err) = self.client.session().logout() {
                tracing::warn!("failed to clear rejected token: {clear_err}");
            }
            let mut state = self.state.lock();
            state.redirect = true;
            state.notice = None;
            return ScreenError::RedirectToLogin;
        }

        tracing::warn!("{what}: {err}");
        let message = if err.is_validation() {
            err.to_string()
        } else {
            format!("{what}: {err}")
        };
        self.set_notice(Notice::Error(message));
        ScreenError::Api(err)
    }
}

fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
