use std::{
    ops::Deref,
    sync::atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;
use youth_council_shared::{
    form::{Draft, EditDraft},
    listing::{CategoryFilter, Roster},
    MemberDraft, Project, ProjectDraft, Resource, Updatable,
};

use super::{title_case, Action, Notice, ScreenCore, ScreenError};
use crate::http::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(i64),
}

/// The open create/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct Editor<D> {
    pub mode: EditorMode,
    pub draft: D,
    current_asset_url: Option<String>,
    serial: u64,
}

impl<D: Draft> Editor<D> {
    /// The newly chosen file if there is one, else the entity's current
    /// asset in edit mode.
    pub fn preview(&self) -> Option<String> {
        self.draft
            .preview()
            .or_else(|| self.current_asset_url.clone())
    }
}

/// List + create/edit modal + delete for an updatable resource.
pub struct ResourceScreen<D: Draft> {
    core: ScreenCore<D::Entity>,
    editor: Mutex<Option<Editor<D>>>,
    opened: AtomicU64,
}

pub type MemberScreen = ResourceScreen<MemberDraft>;
pub type ProjectScreen = ResourceScreen<ProjectDraft>;

impl<D: Draft> Deref for ResourceScreen<D> {
    type Target = ScreenCore<D::Entity>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl<D> ResourceScreen<D>
where
    D: EditDraft,
    D::Entity: Updatable,
{
    pub fn new(client: ApiClient) -> Self {
        Self {
            core: ScreenCore::new(client),
            editor: Mutex::new(None),
            opened: AtomicU64::new(0),
        }
    }

    pub fn editor(&self) -> Option<Editor<D>> {
        self.editor.lock().clone()
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor.lock().is_some()
    }

    /// Open an empty form in create mode.
    pub fn open_create(&self) {
        *self.editor.lock() = Some(Editor {
            mode: EditorMode::Create,
            draft: D::default(),
            current_asset_url: None,
            serial: self.next_serial(),
        });
    }

    /// Open the form pre-populated from the listed entity with `id`.
    pub fn open_edit(&self, id: i64) -> Result<(), ScreenError> {
        let entity = self.core.get(id).ok_or(ScreenError::NotFound {
            label: <D::Entity as Resource>::LABEL,
            id,
        })?;
        let current_asset_url = entity
            .asset_path()
            .map(|path| self.core.client().config().asset_url(path));
        *self.editor.lock() = Some(Editor {
            mode: EditorMode::Edit(id),
            draft: D::from_entity(&entity),
            current_asset_url,
            serial: self.next_serial(),
        });
        Ok(())
    }

    /// Apply a change to the open draft.
    pub fn edit_draft(&self, f: impl FnOnce(&mut D)) -> Result<(), ScreenError> {
        let mut editor = self.editor.lock();
        let editor = editor.as_mut().ok_or(ScreenError::NoEditor)?;
        f(&mut editor.draft);
        Ok(())
    }

    pub fn cancel(&self) {
        *self.editor.lock() = None;
    }

    fn next_serial(&self) -> u64 {
        self.opened.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Validate and submit the open form. On success the collection is
    /// spliced and the form closes; on failure the form stays open and the
    /// collection is untouched.
    pub async fn submit(&self) -> Result<D::Entity, ScreenError> {
        let label = <D::Entity as Resource>::LABEL;
        let what = format!("Error saving {label}");
        let _flight = self.core.begin(Action::Submitting)?;
        let (mode, draft, serial) = {
            let editor = self.editor.lock();
            let editor = editor.as_ref().ok_or(ScreenError::NoEditor)?;
            (editor.mode, editor.draft.clone(), editor.serial)
        };

        if let Err(err) = draft.validate() {
            return Err(self.core.fail(err.into(), &what));
        }

        let client = self.core.client();
        let result = match mode {
            EditorMode::Create => client.create::<D::Entity>(draft.to_payload()).await,
            EditorMode::Edit(id) => client.update::<D::Entity>(id, draft.to_payload()).await,
        };
        let saved = match result {
            Ok(saved) => saved,
            Err(err) => return Err(self.core.fail(err, &what)),
        };

        let spliced = self.core.update_collection(|collection| match mode {
            EditorMode::Create => collection.apply_created(saved.clone()),
            EditorMode::Edit(_) => collection.apply_updated(saved.clone()),
        });
        if let Err(err) = spliced {
            return Err(self.core.fail(err, &what));
        }

        {
            // a form reopened while this save was in flight stays open
            let mut editor = self.editor.lock();
            if editor.as_ref().is_some_and(|open| open.serial == serial) {
                *editor = None;
            }
        }
        self.core
            .set_notice(Notice::Success(format!("{} saved successfully!", title_case(label))));
        Ok(saved)
    }
}

impl MemberScreen {
    /// Members grouped into layout tiers.
    pub fn roster(&self) -> Roster {
        self.with_items(Roster::group)
    }
}

impl ProjectScreen {
    /// Client-side category filter over the fetched projects.
    pub fn filtered(&self, filter: CategoryFilter) -> Vec<Project> {
        self.with_items(|projects| filter.apply(projects).into_iter().cloned().collect())
    }
}
