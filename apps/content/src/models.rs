use serde::{Deserialize, Serialize};

use crate::resource::{filled, Resource, ResourceKind};

// Every field is optional on the wire. Absent fields stay absent on read and
// unknown fields are dropped on write.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Icon key understood by the front end, e.g. `server`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Comma-joined list, e.g. `Node,Express`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
}

impl Resource for Skill {
    const NAME: &'static str = "skills";
    const KIND: ResourceKind = ResourceKind::Collection;
    const SHAPE_ERROR: &'static str = "Request body must be an array of skills.";
    const REQUIRED_ERROR: &'static str = "Each skill must have a title, icon, and skills.";

    fn has_required_fields(&self) -> bool {
        filled(&self.title) && filled(&self.icon) && filled(&self.skills)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Resource for Certification {
    const NAME: &'static str = "certifications";
    const KIND: ResourceKind = ResourceKind::Collection;
    const SHAPE_ERROR: &'static str = "Request body must be an array of certifications.";
    const REQUIRED_ERROR: &'static str =
        "Each certification must have a title, issuer, and date.";

    fn has_required_fields(&self) -> bool {
        filled(&self.title) && filled(&self.issuer) && filled(&self.date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Resource for Achievement {
    const NAME: &'static str = "achievements";
    const KIND: ResourceKind = ResourceKind::Collection;
    const SHAPE_ERROR: &'static str = "Request body must be an array of achievements.";
    const REQUIRED_ERROR: &'static str = "Each achievement must have a title.";

    fn has_required_fields(&self) -> bool {
        filled(&self.title)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma-joined tech stack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_link: Option<String>,
}

impl Resource for Project {
    const NAME: &'static str = "projects";
    const KIND: ResourceKind = ResourceKind::Collection;
    const SHAPE_ERROR: &'static str = "Request body must be an array of projects.";
    const REQUIRED_ERROR: &'static str =
        "Each project must have at least a title and a description.";

    fn has_required_fields(&self) -> bool {
        filled(&self.title) && filled(&self.description)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_learnings: Option<Vec<String>>,
}

impl Resource for Experience {
    const NAME: &'static str = "experiences";
    const KIND: ResourceKind = ResourceKind::Collection;
    const SHAPE_ERROR: &'static str = "Request body must be an array of experiences.";
    const REQUIRED_ERROR: &'static str =
        "Each experience must have a title, company, and startDate.";

    fn has_required_fields(&self) -> bool {
        filled(&self.title) && filled(&self.company) && filled(&self.start_date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

impl Resource for Service {
    const NAME: &'static str = "services";
    const KIND: ResourceKind = ResourceKind::Collection;
    const SHAPE_ERROR: &'static str = "Request body must be an array of services.";
    const REQUIRED_ERROR: &'static str = "Each service must have a title and description.";

    fn has_required_fields(&self) -> bool {
        filled(&self.title) && filled(&self.description)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
}

impl Resource for ContactInfo {
    const NAME: &'static str = "contact-info";
    const KIND: ResourceKind = ResourceKind::Singleton;
    const SHAPE_ERROR: &'static str = "Contact info must have an email, github, and linkedin.";
    const REQUIRED_ERROR: &'static str =
        "Contact info must have an email, github, and linkedin.";

    fn has_required_fields(&self) -> bool {
        filled(&self.email) && filled(&self.github) && filled(&self.linkedin)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutRole {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<AboutRole>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<SkillGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Education>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_areas: Option<Vec<String>>,
}

impl Resource for About {
    const NAME: &'static str = "about";
    const KIND: ResourceKind = ResourceKind::Singleton;
    const SHAPE_ERROR: &'static str = "About info must be a JSON object.";
    const REQUIRED_ERROR: &'static str = "About info must be a JSON object.";

    // No server-side required fields: the admin form validates About itself.
    fn has_required_fields(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_camel_case_field_names() {
        let project: Project = serde_json::from_value(json!({
            "title": "Site",
            "description": "Portfolio",
            "githubLink": "https://github.com/me/site",
            "deploymentLink": "https://me.dev"
        }))
        .unwrap();
        assert_eq!(
            project.github_link.as_deref(),
            Some("https://github.com/me/site")
        );
        assert_eq!(project.deployment_link.as_deref(), Some("https://me.dev"));
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let skill = Skill {
            title: Some("Backend".into()),
            icon: Some("server".into()),
            skills: Some("Node,Express".into()),
        };
        assert_eq!(
            serde_json::to_value(&skill).unwrap(),
            json!({"title": "Backend", "icon": "server", "skills": "Node,Express"})
        );

        let achievement = Achievement {
            title: Some("Hackathon".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&achievement).unwrap(),
            json!({"title": "Hackathon"})
        );
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let service: Service = serde_json::from_value(json!({
            "_id": "64f0",
            "title": "APIs",
            "description": "REST",
            "features": ["Auth", "Docs"]
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&service).unwrap(),
            json!({"title": "APIs", "description": "REST", "features": ["Auth", "Docs"]})
        );
    }

    #[test]
    fn test_about_nested_sequences_keep_order() {
        let body = json!({
            "intro": "Hi",
            "roles": [
                {"title": "Backend", "description": "APIs", "icon": "Code"},
                {"title": "Mentor", "description": "Teaching", "icon": "Users"}
            ],
            "skills": [{"category": "Languages", "items": ["Rust", "TypeScript"]}],
            "education": [{"degree": "B.Tech", "school": "VIT", "details": "CSE"}],
            "focusAreas": ["Distributed systems", "Developer tooling"]
        });
        let about: About = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(serde_json::to_value(&about).unwrap(), body);
    }

    #[test]
    fn test_experience_required_fields() {
        let mut exp = Experience {
            title: Some("Engineer".into()),
            company: Some("Acme".into()),
            start_date: Some("2023-01".into()),
            ..Default::default()
        };
        assert!(exp.has_required_fields());
        exp.start_date = None;
        assert!(!exp.has_required_fields());
    }

    #[test]
    fn test_resource_names_are_url_segments() {
        assert_eq!(Skill::NAME, "skills");
        assert_eq!(ContactInfo::NAME, "contact-info");
        assert_eq!(ContactInfo::KIND, ResourceKind::Singleton);
        assert_eq!(Experience::KIND, ResourceKind::Collection);
    }
}
