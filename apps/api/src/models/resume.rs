use serde::{Deserialize, Deserializer, Serialize};

/// A resume as submitted by the web form.
///
/// Every field is optional. Missing keys, `null`s and blank strings all
/// collapse to "absent" so the layout engine can simply skip them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub personal: Personal,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Skills,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<CertificationEntry>,
    /// Free-form `{category, items}` rows from the form, merged into `skills`
    /// by `generation::skills::merge_skill_groups` before rendering.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub skill_groups: Vec<SkillGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personal {
    pub name: Option<String>,
    pub title: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub about: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// One bullet per element. A single string is accepted and split on newlines.
    #[serde(deserialize_with = "lines")]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub university: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    #[serde(deserialize_with = "item_list")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "item_list")]
    pub frameworks: Vec<String>,
    #[serde(deserialize_with = "item_list")]
    pub tools: Vec<String>,
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty() && self.frameworks.is_empty() && self.tools.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub project_title: Option<String>,
    pub project_link: Option<String>,
    pub project_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub name: Option<String>,
    pub link: Option<String>,
    pub date: Option<String>,
}

/// A skill row as typed into the form: a category label and a comma-separated list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    pub category: String,
    #[serde(deserialize_with = "comma_list")]
    pub items: Vec<String>,
}

/// Returns the trimmed value if it carries any visible text.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrList {
    Text(String),
    List(Vec<Option<String>>),
}

impl TextOrList {
    /// Flattens into owned strings, splitting a single text with `split`.
    /// `null` list elements are skipped.
    fn into_items(self, split: impl Fn(&str) -> Vec<String>) -> Vec<String> {
        match self {
            TextOrList::List(items) => items.into_iter().flatten().collect(),
            TextOrList::Text(text) => split(&text),
        }
    }
}

fn lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOrList>::deserialize(deserializer)?
        .map(|raw| raw.into_items(|text| text.lines().map(str::to_string).collect()))
        .unwrap_or_default())
}

fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<TextOrList>::deserialize(deserializer)?
        .map(|raw| raw.into_items(|text| text.split(',').map(str::to_string).collect()))
        .unwrap_or_default();
    Ok(trimmed(raw))
}

/// A plain list of skill names. Items are trimmed and blanks dropped.
fn item_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<String>> = null_as_default(deserializer)?;
    Ok(trimmed(raw.into_iter().flatten()))
}

fn trimmed(items: impl IntoIterator<Item = String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
