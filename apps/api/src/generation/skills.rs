//! Buckets free-form skill rows into the three fixed skill lists.

use crate::models::resume::{SkillGroup, Skills};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Languages,
    Frameworks,
    Tools,
}

/// Classifies a category label by substring, case-insensitively.
///
/// "language" wins over "framework"; everything else lands in tools.
pub fn categorize(label: &str) -> SkillCategory {
    let label = label.to_lowercase();
    if label.contains("language") {
        SkillCategory::Languages
    } else if label.contains("framework") {
        SkillCategory::Frameworks
    } else {
        SkillCategory::Tools
    }
}

/// Appends every group's items to the matching list in `skills`, keeping
/// submission order.
pub fn merge_skill_groups(skills: &mut Skills, groups: Vec<SkillGroup>) {
    for group in groups {
        let target = match categorize(&group.category) {
            SkillCategory::Languages => &mut skills.languages,
            SkillCategory::Frameworks => &mut skills.frameworks,
            SkillCategory::Tools => &mut skills.tools,
        };
        target.extend(group.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(category: &str, items: &[&str]) -> SkillGroup {
        SkillGroup {
            category: category.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_categorize_is_case_insensitive() {
        assert_eq!(categorize("Programming LANGUAGES"), SkillCategory::Languages);
        assert_eq!(categorize("Web Frameworks"), SkillCategory::Frameworks);
        assert_eq!(categorize("DevOps"), SkillCategory::Tools);
        assert_eq!(categorize(""), SkillCategory::Tools);
    }

    #[test]
    fn test_language_checked_before_framework() {
        assert_eq!(
            categorize("Language frameworks"),
            SkillCategory::Languages
        );
    }

    #[test]
    fn test_programming_languages_go_rust() {
        let mut skills = Skills::default();
        merge_skill_groups(&mut skills, vec![group("Programming Languages", &["Go", "Rust"])]);
        assert_eq!(skills.languages, vec!["Go", "Rust"]);
        assert!(skills.frameworks.is_empty());
        assert!(skills.tools.is_empty());
    }

    #[test]
    fn test_merge_appends_to_existing_lists_in_order() {
        let mut skills = Skills {
            languages: vec!["C".to_string()],
            frameworks: vec![],
            tools: vec![],
        };
        merge_skill_groups(
            &mut skills,
            vec![
                group("Frameworks", &["Axum", "Tokio"]),
                group("Languages", &["Rust"]),
                group("Cloud", &["Terraform"]),
                group("Databases", &["Postgres"]),
            ],
        );
        assert_eq!(skills.languages, vec!["C", "Rust"]);
        assert_eq!(skills.frameworks, vec!["Axum", "Tokio"]);
        assert_eq!(skills.tools, vec!["Terraform", "Postgres"]);
    }
}
