use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};

/// An entity type managed through a REST collection endpoint.
pub trait Resource:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Collection path segment, e.g. `members` for `/members`.
    const COLLECTION: &'static str;
    /// Singular noun used in notices and confirmation prompts.
    const LABEL: &'static str;

    /// Server-assigned identifier, absent before creation.
    fn id(&self) -> Option<i64>;

    /// Server-relative path of the uploaded asset attached to this entity.
    fn asset_path(&self) -> Option<&str> {
        None
    }
}

/// Resources whose endpoint accepts `PUT /{collection}/{id}`.
pub trait Updatable: Resource {}

// 委员会/项目分类，前后端共用同一组取值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Health,
    Education,
    EconomicEmpowerment,
    SocialInclusionAndEquity,
    PeacebuildingAndSecurity,
    ActiveCitizenship,
    Environment,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Health,
        Category::Education,
        Category::EconomicEmpowerment,
        Category::SocialInclusionAndEquity,
        Category::PeacebuildingAndSecurity,
        Category::ActiveCitizenship,
        Category::Environment,
    ];

    /// Lowercase label used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Health => "health",
            Category::Education => "education",
            Category::EconomicEmpowerment => "economic empowerment",
            Category::SocialInclusionAndEquity => "social inclusion and equity",
            Category::PeacebuildingAndSecurity => "peacebuilding and security",
            Category::ActiveCitizenship => "active citizenship",
            Category::Environment => "environment",
        }
    }

    /// Label with the first letter capitalized, as shown in option lists.
    pub fn display_name(self) -> String {
        let label = self.as_str();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| UnknownCategory(raw.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A wire value the backend stores as free text. Values this client does
/// not recognise are kept verbatim so the row still lists and round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lenient<T> {
    Known(T),
    Unknown(String),
}

impl<T> Lenient<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Lenient::Known(_))
    }
}

impl<T: Copy> Lenient<T> {
    pub fn known(&self) -> Option<T> {
        match self {
            Lenient::Known(value) => Some(*value),
            Lenient::Unknown(_) => None,
        }
    }
}

impl<T> Lenient<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse() {
            Ok(value) => Lenient::Known(value),
            Err(err) => {
                tracing::warn!("keeping unrecognised value `{raw}` as-is: {err}");
                Lenient::Unknown(raw.to_string())
            },
        }
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Known(value)
    }
}

impl<T: fmt::Display> fmt::Display for Lenient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lenient::Known(value) => value.fmt(f),
            Lenient::Unknown(raw) => f.write_str(raw),
        }
    }
}

impl<T: Serialize> Serialize for Lenient<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Lenient::Known(value) => value.serialize(serializer),
            Lenient::Unknown(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de, T> Deserialize<'de> for Lenient<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Lenient::parse(&raw))
    }
}

/// Committee values arrive as `null`, `""` or a category label.
fn deserialize_committee<'de, D>(deserializer: D) -> Result<Option<Lenient<Category>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(Lenient::parse(value)),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planned,
    Ongoing,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] =
        [ProjectStatus::Planned, ProjectStatus::Ongoing, ProjectStatus::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planned => "Planned",
            ProjectStatus::Ongoing => "Ongoing",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown project status: `{0}` (expected Planned, Ongoing or Completed)")]
pub struct UnknownStatus(pub String);

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim();
        ProjectStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| UnknownStatus(raw.to_string()))
    }
}

// 理事会成员
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub position: String,
    #[serde(default, deserialize_with = "deserialize_committee")]
    pub committee: Option<Lenient<Category>>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>, // 服务端相对路径
}

impl Resource for Member {
    const COLLECTION: &'static str = "members";
    const LABEL: &'static str = "member";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn asset_path(&self) -> Option<&str> {
        self.photo_url.as_deref().filter(|path| !path.is_empty())
    }
}

impl Updatable for Member {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub budget: String, // free-form, e.g. "PHP 15,000"
    pub date: Lenient<NaiveDate>,
    pub category: Lenient<Category>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Resource for Project {
    const COLLECTION: &'static str = "projects";
    const LABEL: &'static str = "project";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn asset_path(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|path| !path.is_empty())
    }
}

impl Updatable for Project {}

/// Rough document family of an uploaded report, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFileKind {
    Pdf,
    Spreadsheet,
    Document,
    Other,
}

// 透明度报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub uploaded_at: NaiveDateTime,
    pub file_path: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub file_type: Option<String>,
}

impl Report {
    /// Last path segment of `file_path`.
    pub fn file_name(&self) -> &str {
        self.file_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_path)
    }

    pub fn kind(&self) -> ReportFileKind {
        let extension = self
            .file_type
            .clone()
            .or_else(|| {
                self.file_name()
                    .rsplit_once('.')
                    .map(|(_, ext)| ext.to_string())
            })
            .unwrap_or_default()
            .trim_start_matches('.')
            .to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => ReportFileKind::Pdf,
            "xls" | "xlsx" => ReportFileKind::Spreadsheet,
            "doc" | "docx" => ReportFileKind::Document,
            _ => ReportFileKind::Other,
        }
    }
}

impl Resource for Report {
    const COLLECTION: &'static str = "reports";
    const LABEL: &'static str = "report";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn asset_path(&self) -> Option<&str> {
        Some(self.file_path.as_str()).filter(|path| !path.is_empty())
    }
}

/// Parse a backend timestamp. Accepts RFC 3339 (normalized to UTC) and the
/// offset-less ISO-8601 form the backend emits for naive datetimes.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.naive_utc());
    }
    raw.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}
