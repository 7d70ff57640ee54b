//! Read-only views backing the public pages. These never require a token;
//! one is still attached if the visitor happens to be signed in.

use youth_council_shared::{
    listing::{group_by_category, CategoryFilter, ReportPage, ReportQuery, Roster},
    Category, Member, Project, Report,
};

use crate::{error::ApiError, http::ApiClient};

#[derive(Debug, Clone)]
pub struct PublicSite {
    client: ApiClient,
}

impl PublicSite {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
        }
    }

    /// Landing page roster, tiered and capped to the layout's slots.
    pub async fn roster(&self) -> Result<Roster, ApiError> {
        let members: Vec<Member> = self.client.list().await?;
        Ok(Roster::group(&members).capped())
    }

    /// Project showcase narrowed by `filter`.
    pub async fn showcase(&self, filter: CategoryFilter) -> Result<Vec<Project>, ApiError> {
        let projects: Vec<Project> = self.client.list().await?;
        Ok(filter.apply(&projects).into_iter().cloned().collect())
    }

    /// Project showcase grouped by category, empty categories left out.
    pub async fn showcase_by_category(&self) -> Result<Vec<(Category, Vec<Project>)>, ApiError> {
        let projects: Vec<Project> = self.client.list().await?;
        Ok(group_by_category(&projects)
            .into_iter()
            .map(|(category, items)| (category, items.into_iter().cloned().collect()))
            .collect())
    }

    /// One page of the transparency-report listing.
    pub async fn reports(&self, query: &ReportQuery) -> Result<ReportPage, ApiError> {
        let reports: Vec<Report> = self.client.list().await?;
        Ok(query.run(&reports))
    }

    pub fn asset_url(&self, path: &str) -> String {
        self.client.config().asset_url(path)
    }
}
