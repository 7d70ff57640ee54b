use std::ops::Deref;

use parking_lot::Mutex;
use youth_council_shared::{form::Draft, FilePart, Report, ReportDraft};

use super::{Action, Notice, ScreenCore, ScreenError};
use crate::{error::ApiError, http::ApiClient};

/// Transparency report admin: upload form, list and delete. Reports have no
/// edit mode.
pub struct ReportScreen {
    core: ScreenCore<Report>,
    form: Mutex<ReportDraft>,
}

impl Deref for ReportScreen {
    type Target = ScreenCore<Report>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl ReportScreen {
    pub fn new(client: ApiClient) -> Self {
        Self {
            core: ScreenCore::new(client),
            form: Mutex::new(ReportDraft::default()),
        }
    }

    pub fn form(&self) -> ReportDraft {
        self.form.lock().clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.form.lock().title = title.into();
    }

    /// Check the file against the upload policy before accepting it. A
    /// rejected file is reported on the screen and not kept.
    pub fn select_file(&self, part: FilePart) -> Result<(), ScreenError> {
        self.core.clear_notice();
        let selected = self.form.lock().select_file(part);
        selected.map_err(|err| self.core.fail(ApiError::from(err), "Failed to upload report"))
    }

    /// Submit the form. On success the form is cleared and the list is
    /// re-fetched.
    pub async fn upload(&self) -> Result<Report, ScreenError> {
        let what = "Failed to upload report";
        let _flight = self.core.begin(Action::Uploading)?;
        let draft = self.form.lock().clone();
        if let Err(err) = draft.validate() {
            return Err(self.core.fail(err.into(), what));
        }

        let report = match self
            .core
            .client()
            .create::<Report>(draft.to_payload())
            .await
        {
            Ok(report) => report,
            Err(err) => return Err(self.core.fail(err, what)),
        };

        self.form.lock().clear();
        if let Err(err) = self
            .core
            .update_collection(|collection| collection.apply_created(report.clone()))
        {
            tracing::debug!("uploaded report not spliced locally: {err}");
        }
        self.core
            .set_notice(Notice::Success("Report uploaded successfully!".to_string()));

        if let Err(err) = self.core.refresh().await {
            tracing::warn!("refresh after upload failed: {err}");
        }
        Ok(report)
    }

    /// Where the stored document can be downloaded from.
    pub fn download_url(&self, report: &Report) -> String {
        self.core.client().config().asset_url(&report.file_path)
    }
}
