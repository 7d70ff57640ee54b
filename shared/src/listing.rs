//! Read-only views over fetched collections: roster tiers, the project
//! category filter, and the paged transparency-report listing.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::Serialize;

use crate::models::{Category, Member, Project, Report, UnknownCategory};

/// Landing page shows at most this many councilors.
pub const COUNCILOR_SLOTS: usize = 7;
/// Landing page shows at most this many committee/other members.
pub const COMMITTEE_SLOTS: usize = 3;
/// Public report listing page size.
pub const REPORTS_PER_PAGE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterTier {
    Chairperson,
    SecretaryTreasurer,
    Councilor,
    CommitteeOther,
}

impl RosterTier {
    /// First matching tier by case-insensitive substring of the position.
    pub fn of(position: &str) -> Self {
        let position = position.to_lowercase();
        if position.contains("chairperson") {
            RosterTier::Chairperson
        } else if position.contains("secretary") || position.contains("treasurer") {
            RosterTier::SecretaryTreasurer
        } else if position.contains("councilor") {
            RosterTier::Councilor
        } else {
            RosterTier::CommitteeOther
        }
    }
}

/// Members partitioned for layout, each tier in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Roster {
    pub chairpersons: Vec<Member>,
    pub secretary_treasurer: Vec<Member>,
    pub councilors: Vec<Member>,
    pub committee_other: Vec<Member>,
}

impl Roster {
    pub fn group(members: &[Member]) -> Self {
        let mut roster = Roster::default();
        for member in members {
            let tier = match RosterTier::of(&member.position) {
                RosterTier::Chairperson => &mut roster.chairpersons,
                RosterTier::SecretaryTreasurer => &mut roster.secretary_treasurer,
                RosterTier::Councilor => &mut roster.councilors,
                RosterTier::CommitteeOther => &mut roster.committee_other,
            };
            tier.push(member.clone());
        }
        roster
    }

    /// Apply the landing page slot limits.
    pub fn capped(mut self) -> Self {
        self.councilors.truncate(COUNCILOR_SLOTS);
        self.committee_other.truncate(COMMITTEE_SLOTS);
        self
    }

    pub fn len(&self) -> usize {
        self.chairpersons.len()
            + self.secretary_treasurer.len()
            + self.councilors.len()
            + self.committee_other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, project: &Project) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => project.category.known() == Some(category),
        }
    }

    pub fn apply(self, projects: &[Project]) -> Vec<&Project> {
        projects
            .iter()
            .filter(|project| self.matches(project))
            .collect()
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        raw.parse().map(CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => f.write_str(&category.display_name()),
        }
    }
}

/// Projects grouped under each category in canonical order, skipping empty
/// categories. Projects with an unrecognised category are left out.
pub fn group_by_category(projects: &[Project]) -> Vec<(Category, Vec<&Project>)> {
    Category::ALL
        .into_iter()
        .map(|category| (category, CategoryFilter::Only(category).apply(projects)))
        .filter(|(_, items)| !items.is_empty())
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportSort {
    /// Newest upload first.
    #[default]
    Date,
    /// Title ascending, case-insensitive.
    Title,
}

impl FromStr for ReportSort {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(ReportSort::Date),
            "title" => Ok(ReportSort::Title),
            other => Err(format!("unknown sort `{other}` (expected date or title)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub search: String,
    pub sort: ReportSort,
    /// 1-based page number; out-of-range values are clamped.
    pub page: usize,
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: ReportSort::Date,
            page: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPage {
    pub reports: Vec<Report>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl ReportQuery {
    pub fn run(&self, reports: &[Report]) -> ReportPage {
        let needle = self.search.trim().to_lowercase();
        let mut matches: Vec<&Report> = reports
            .iter()
            .filter(|report| report.title.to_lowercase().contains(&needle))
            .collect();
        match self.sort {
            ReportSort::Date => matches.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at)),
            ReportSort::Title => matches.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        }

        let total_matches = matches.len();
        let total_pages = total_matches.div_ceil(REPORTS_PER_PAGE);
        let page = self.page.clamp(1, total_pages.max(1));
        let reports = matches
            .into_iter()
            .skip((page - 1) * REPORTS_PER_PAGE)
            .take(REPORTS_PER_PAGE)
            .cloned()
            .collect();

        ReportPage {
            reports,
            page,
            total_pages,
            total_matches,
        }
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Human-readable size with base-1024 units, e.g. `1.5 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{Lenient, ProjectStatus};

    fn member(id: i64, position: &str) -> Member {
        Member {
            id: Some(id),
            name: format!("Member {id}"),
            position: position.to_string(),
            committee: None,
            about: None,
            photo_url: None,
        }
    }

    fn project(id: i64, category: Category) -> Project {
        Project {
            id: Some(id),
            title: format!("Project {id}"),
            description: String::new(),
            status: ProjectStatus::Planned,
            budget: "0".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date").into(),
            category: category.into(),
            image_url: None,
        }
    }

    fn report(id: i64, title: &str, day: u32) -> Report {
        Report {
            id: Some(id),
            title: title.to_string(),
            uploaded_at: NaiveDate::from_ymd_opt(2024, 3, day)
                .and_then(|date| date.and_hms_opt(9, 0, 0))
                .expect("timestamp"),
            file_path: format!("uploads/{id}.pdf"),
            file_size: None,
            file_type: None,
        }
    }

    #[test]
    fn roster_tiers_follow_position_keywords() {
        let members = vec![
            member(1, "SK Councilor"),
            member(2, "SK Chairperson"),
            member(3, "Treasurer"),
            member(4, "Committee on Health"),
            member(5, "sk secretary"),
            member(6, "Volunteer"),
        ];
        fn ids(tier: &[Member]) -> Vec<i64> {
            tier.iter().filter_map(|m| m.id).collect()
        }

        let roster = Roster::group(&members);
        assert_eq!(ids(&roster.chairpersons), [2]);
        assert_eq!(ids(&roster.secretary_treasurer), [3, 5]);
        assert_eq!(ids(&roster.councilors), [1]);
        assert_eq!(ids(&roster.committee_other), [4, 6]);
        assert_eq!(roster.len(), members.len());
    }

    #[test]
    fn roster_capped_limits_councilors_and_committee() {
        let members: Vec<_> = (1..=9)
            .map(|id| member(id, "Councilor"))
            .chain((10..=14).map(|id| member(id, "Committee")))
            .collect();
        let roster = Roster::group(&members).capped();
        assert_eq!(roster.councilors.len(), COUNCILOR_SLOTS);
        assert_eq!(roster.committee_other.len(), COMMITTEE_SLOTS);
    }

    #[test]
    fn health_filter_keeps_only_health_projects() {
        let projects = vec![
            project(1, Category::Health),
            project(2, Category::Education),
            project(3, Category::Health),
            project(4, Category::Environment),
            project(5, Category::ActiveCitizenship),
        ];
        let filter: CategoryFilter = "Health".parse().expect("filter");
        let shown = filter.apply(&projects);
        assert_eq!(shown.len(), 2);
        assert!(shown
            .iter()
            .all(|project| project.category.known() == Some(Category::Health)));
        assert_eq!(CategoryFilter::All.apply(&projects).len(), projects.len());
    }

    #[test]
    fn unrecognised_category_only_shows_under_all() {
        let mut odd = project(2, Category::Health);
        odd.category = Lenient::Unknown("sports".to_string());
        let projects = vec![project(1, Category::Health), odd];

        assert_eq!(CategoryFilter::All.apply(&projects).len(), 2);
        assert_eq!(CategoryFilter::Only(Category::Health).apply(&projects).len(), 1);
        let groups = group_by_category(&projects);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].1.len(), 1);
    }

    #[test]
    fn group_by_category_skips_empty_categories() {
        let projects = vec![project(1, Category::Environment), project(2, Category::Health)];
        let groups = group_by_category(&projects);
        let order: Vec<_> = groups.iter().map(|(category, _)| *category).collect();
        assert_eq!(order, [Category::Health, Category::Environment]);
    }

    #[test]
    fn report_query_searches_sorts_and_pages() {
        let reports: Vec<_> = (1..=8)
            .map(|id| report(id, &format!("Budget {id}"), id as u32))
            .chain(std::iter::once(report(9, "Minutes", 20)))
            .collect();

        let first = ReportQuery {
            search: "budget".to_string(),
            ..ReportQuery::default()
        }
        .run(&reports);
        assert_eq!(first.total_matches, 8);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.reports.len(), REPORTS_PER_PAGE);
        assert_eq!(first.reports[0].id, Some(8));

        let clamped = ReportQuery {
            search: "budget".to_string(),
            sort: ReportSort::Title,
            page: 99,
        }
        .run(&reports);
        assert_eq!(clamped.page, 2);
        assert_eq!(clamped.reports.len(), 2);
    }

    #[test]
    fn report_query_empty_listing_is_page_one() {
        let page = ReportQuery::default().run(&[]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.reports.is_empty());
    }

    #[test]
    fn file_size_formatting_trims_trailing_zeros() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2_048_576), "1.95 MB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
    }
}
