//! Portfolio records edited through the admin area
//!
//! These back the public pages (home, about, skills, projects, experience,
//! contact). They are plain data with light validation.

use crate::models::document::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub headline: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Social links keyed by network name ("github", "linkedin", ...)
    #[serde(default)]
    pub links: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub category: String,
    /// Self-assessed proficiency, 0..=100
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub start: NaiveDate,
    /// `None` while the position is current
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl Experience {
    pub fn is_current(&self) -> bool {
        self.end.is_none()
    }
}

/// Everything the public pages display
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub profile: Profile,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
}

impl PortfolioData {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.profile.name.trim().is_empty() {
            return Err(ValidationError::MissingField("profile.name".to_string()));
        }
        if let Some(skill) = self.skills.iter().find(|s| s.level > 100) {
            return Err(ValidationError::InvalidValue {
                field: format!("skills.{}.level", skill.name),
                reason: format!("{} exceeds 100", skill.level),
            });
        }
        if let Some(project) = self.projects.iter().find(|p| p.title.trim().is_empty()) {
            return Err(ValidationError::InvalidValue {
                field: "projects.title".to_string(),
                reason: format!("project '{}' has no title", project.description),
            });
        }
        if let Some(job) = self
            .experience
            .iter()
            .find(|e| e.end.is_some_and(|end| end < e.start))
        {
            return Err(ValidationError::InvalidValue {
                field: format!("experience.{}.end", job.company),
                reason: "end date precedes start date".to_string(),
            });
        }
        Ok(())
    }

    /// Skills grouped by category, strongest first within each group
    pub fn skills_by_category(&self) -> BTreeMap<&str, Vec<&Skill>> {
        let mut groups: BTreeMap<&str, Vec<&Skill>> = BTreeMap::new();
        for skill in &self.skills {
            groups.entry(skill.category.as_str()).or_default().push(skill);
        }
        for skills in groups.values_mut() {
            skills.sort_by(|a, b| b.level.cmp(&a.level).then_with(|| a.name.cmp(&b.name)));
        }
        groups
    }

    pub fn featured_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.featured)
    }

    /// Experience entries, current positions first, then most recent start
    pub fn timeline(&self) -> Vec<&Experience> {
        let mut entries: Vec<&Experience> = self.experience.iter().collect();
        entries.sort_by(|a, b| {
            b.is_current()
                .cmp(&a.is_current())
                .then_with(|| b.start.cmp(&a.start))
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, category: &str, level: u8) -> Skill {
        Skill {
            name: name.to_string(),
            category: category.to_string(),
            level,
        }
    }

    fn sample() -> PortfolioData {
        PortfolioData {
            profile: Profile {
                name: "Ada".to_string(),
                headline: "Frontend engineer".to_string(),
                ..Default::default()
            },
            skills: vec![
                skill("Angular", "Frontend", 90),
                skill("CSS", "Frontend", 95),
                skill("Firestore", "Backend", 70),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_requires_name() {
        let mut data = sample();
        data.profile.name = "  ".to_string();
        assert_eq!(
            data.validate(),
            Err(ValidationError::MissingField("profile.name".to_string()))
        );
    }

    #[test]
    fn test_validate_skill_level() {
        let mut data = sample();
        data.skills.push(skill("Rust", "Backend", 120));
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_validate_experience_dates() {
        let mut data = sample();
        data.experience.push(Experience {
            company: "Acme".to_string(),
            role: "Dev".to_string(),
            start: NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2021, 1, 1),
            highlights: vec![],
        });
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_skills_by_category_sorted() {
        let data = sample();
        let groups = data.skills_by_category();
        let frontend: Vec<&str> = groups["Frontend"].iter().map(|s| s.name.as_str()).collect();
        assert_eq!(frontend, vec!["CSS", "Angular"]);
        assert_eq!(groups["Backend"].len(), 1);
    }

    #[test]
    fn test_timeline_current_first() {
        let mut data = sample();
        data.experience = vec![
            Experience {
                company: "Old".to_string(),
                role: "Dev".to_string(),
                start: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2020, 1, 1),
                highlights: vec![],
            },
            Experience {
                company: "Now".to_string(),
                role: "Lead".to_string(),
                start: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                end: None,
                highlights: vec![],
            },
        ];
        let order: Vec<&str> = data.timeline().iter().map(|e| e.company.as_str()).collect();
        assert_eq!(order, vec!["Now", "Old"]);
    }
}
