use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use crate::error::{ConfigError, Result};

/// Portfolio content the assistant is grounded on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub summary: String,
    pub education: String,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub period: String,
    /// One-line digest for the knowledge base; falls back to the points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}

impl Profile {
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Resume summary interpolated into the system instruction
    pub fn knowledge_base(&self) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "Name: {}", self.name);
        let _ = writeln!(out, "Role: {}", self.role);
        let _ = writeln!(out, "Summary: {}", self.summary);
        let _ = writeln!(out, "Education: {}", self.education);

        if !self.experiences.is_empty() {
            out.push_str("Experience:\n");
            for exp in &self.experiences {
                let digest = exp.summary.clone().unwrap_or_else(|| exp.points.join(" "));
                let _ = writeln!(out, "- {} at {} ({}): {}", exp.role, exp.company, exp.period, digest);
            }
        }

        if !self.projects.is_empty() {
            out.push_str("Projects:\n");
            for project in &self.projects {
                let _ = write!(out, "- {}: {}", project.title, project.description);
                if !project.tech.is_empty() {
                    let _ = write!(out, " Tech: {}.", project.tech.join(", "));
                }
                if let Some(url) = &project.repo_url {
                    let _ = write!(out, " Repo: {}", url);
                }
                out.push('\n');
            }
        }

        if !self.skills.is_empty() {
            let _ = writeln!(out, "Skills: {}", self.skills.join(", "));
        }

        out
    }
}

impl Default for Profile {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            name: "Jb Anmol".into(),
            role: "Data Scientist".into(),
            summary: "A Data Scientist passionate about leveraging AI to unlock human potential, especially in medical sciences. Known for strong stakeholder communication skills and translating complex data into actionable insights. Combines hands-on experience in the full data lifecycle with a leadership background and a keen interest in clinical time series analysis.".into(),
            education: "BS in Data Science & Programming from IIT Madras (2023-2026), Current CGPA: 9.1.".into(),
            experiences: vec![
                Experience {
                    role: "Data Scientist (Part-time)".into(),
                    company: "Kidaura".into(),
                    period: "Mar 2025 - Current".into(),
                    summary: Some("Developed ETL pipelines (Python), built ML models (scikit-learn) with 95% accuracy, performed data analysis for clinical stakeholders.".into()),
                    points: strings(&[
                        "Developed ETL pipelines with Python, reducing data processing time by 30%.",
                        "Built scikit-learn models achieving 95% accuracy and 25% error reduction.",
                        "Performed anomaly detection and custom analysis for clinical stakeholders.",
                    ]),
                },
                Experience {
                    role: "Founder's Office - Analytics & Partnerships".into(),
                    company: "Tummo Labs".into(),
                    period: "Jun 2024 - Oct 2024".into(),
                    summary: Some("Worked directly with the founding team to lead launch analytics for 47k+ users, designed A/B tests improving retention by 25%, and created dashboards to drive stakeholder alignment.".into()),
                    points: strings(&[
                        "Led analytics for a product launch reaching 47,000+ users in 3 months.",
                        "Designed and interpreted A/B tests, increasing user retention by 25%.",
                        "Created dashboards for cross-functional data-driven decision making.",
                    ]),
                },
                Experience {
                    role: "Administrator".into(),
                    company: "Shloka".into(),
                    period: "May 2023 - Dec 2023".into(),
                    summary: Some("Improved data collection with 98% data integrity, analyzed engagement metrics with SQL.".into()),
                    points: strings(&[
                        "Improved data collection, achieving 98% data integrity across 50+ groups.",
                        "Analyzed engagement metrics with SQL to create stakeholder reports.",
                    ]),
                },
            ],
            projects: vec![
                Project {
                    title: "Clinical Analytics Pipeline".into(),
                    description: "Built an end-to-end data pipeline with robust validation, anomaly detection, and automated QA, reducing manual review time by 40%.".into(),
                    tech: strings(&["Python", "SQL", "Pandas & NumPy", "ETL Pipelines"]),
                    repo_url: Some("https://github.com/jbanmol/clinical-analytics-pipeline".into()),
                },
                Project {
                    title: "Neuro-Diverse Medical Classification".into(),
                    description: "Applied statistical modeling and cohort analysis to distill user behavior data into actionable product insights for a neuro-diverse context.".into(),
                    tech: strings(&["Python", "scikit-learn", "Statistical Modeling", "RAG"]),
                    repo_url: Some("https://github.com/jbanmol/neuro-diverse-classification".into()),
                },
                Project {
                    title: "AI Project Deployment Agent".into(),
                    description: "Built an AI agent that automatically builds, deploys, and updates projects on GitHub based on natural language user queries.".into(),
                    tech: strings(&["Python", "OpenAI", "LangChain", "Hugging Face", "Docker"]),
                    repo_url: Some("https://github.com/jbanmol/Build_Deploy_gpt-4o-mini-IITM".into()),
                },
                Project {
                    title: "Movie Review Sentiment Analyzer".into(),
                    description: "Built a sentiment analysis model using the Gemini API (gemini-flash) to classify movie reviews as positive or negative with high accuracy.".into(),
                    tech: strings(&["Python", "Gemini API", "Pandas & NumPy"]),
                    repo_url: Some("https://github.com/jbanmol/movie_Review_Sentiment_Analyzer".into()),
                },
            ],
            skills: strings(&[
                "Python", "SQL", "PostgreSQL", "scikit-learn", "Pandas & NumPy", "ETL Pipelines",
                "Statistical Modeling", "A/B Testing", "Flask", "FastAPI", "Hugging Face", "LangChain",
                "Docker", "S3 (AWS)", "Feature Engineering", "Git", "Bash", "RAG", "Tableau",
                "Power BI", "Google Workspace", "Vue3", "OpenAI", "Claude",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_knowledge_base() {
        let kb = Profile::default().knowledge_base();

        assert!(kb.starts_with("Name: Jb Anmol\nRole: Data Scientist\n"));
        assert!(kb.contains("- Data Scientist (Part-time) at Kidaura (Mar 2025 - Current): Developed ETL pipelines (Python)"));
        assert!(kb.contains("- Clinical Analytics Pipeline: "));
        assert!(kb.contains("Skills: Python, SQL, PostgreSQL"));
    }

    #[test]
    fn test_experience_without_summary_uses_points() {
        let profile = Profile {
            experiences: vec![Experience {
                role: "Engineer".into(),
                company: "Acme".into(),
                period: "2020".into(),
                summary: None,
                points: vec!["Shipped A.".into(), "Shipped B.".into()],
            }],
            projects: vec![],
            skills: vec![],
            ..Profile::default()
        };

        let kb = profile.knowledge_base();
        assert!(kb.contains("- Engineer at Acme (2020): Shipped A. Shipped B.\n"));
        assert!(!kb.contains("Projects:"));
        assert!(!kb.contains("Skills:"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
name = "Ada"
role = "Engineer"
summary = "Builds engines."
education = "Self-taught"
skills = ["Rust"]

[[projects]]
title = "Analytical Engine"
description = "A general-purpose computer."
tech = ["brass"]
"#
        )
        .unwrap();

        let profile = Profile::from_file(file.path()).unwrap();

        assert_eq!(profile.name, "Ada");
        assert!(profile.experiences.is_empty());
        assert_eq!(profile.projects[0].repo_url, None);
        assert!(profile.knowledge_base().contains("Tech: brass."));
    }

    #[test]
    fn test_from_file_reports_parse_error_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = ").unwrap();

        let err = Profile::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_from_missing_file() {
        let err = Profile::from_file("/nonexistent/profile.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
