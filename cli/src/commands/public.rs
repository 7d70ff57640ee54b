use anyhow::{Context, Result};
use serde::Serialize;
use youth_council_client::{ApiClient, PublicSite};
use youth_council_shared::{
    listing::{CategoryFilter, ReportQuery, ReportSort},
    Category, Project,
};

use crate::utils::print_json;

#[derive(Serialize)]
struct CategoryGroup {
    category: Category,
    name: String,
    projects: Vec<Project>,
}

pub async fn roster(client: ApiClient) -> Result<()> {
    let site = PublicSite::new(client);
    let roster = site.roster().await.context("failed to load members")?;
    print_json(&roster)
}

pub async fn showcase(client: ApiClient, category: CategoryFilter, grouped: bool) -> Result<()> {
    let site = PublicSite::new(client);
    if !grouped {
        let projects = site
            .showcase(category)
            .await
            .context("failed to load projects")?;
        return print_json(&projects);
    }

    let groups: Vec<CategoryGroup> = site
        .showcase_by_category()
        .await
        .context("failed to load projects")?
        .into_iter()
        .filter(|(group, _)| {
            category == CategoryFilter::All || category == CategoryFilter::Only(*group)
        })
        .map(|(category, projects)| CategoryGroup {
            category,
            name: category.display_name(),
            projects,
        })
        .collect();
    print_json(&groups)
}

pub async fn transparency(
    client: ApiClient,
    search: String,
    sort: ReportSort,
    page: usize,
) -> Result<()> {
    let site = PublicSite::new(client);
    let query = ReportQuery {
        search,
        sort,
        page,
    };
    let page = site
        .reports(&query)
        .await
        .context("failed to load reports")?;
    print_json(&page)
}
