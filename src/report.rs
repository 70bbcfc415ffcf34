// src/report.rs
//! Card view models and the JSON export for one research outcome

use crate::research::{ResearchKey, ResearchOutcome};
use crate::types::{Summary, PLACEHOLDER};
use anyhow::{Context, Result};
use serde::Serialize;

const NO_NEWS: &str = "No news found.";
const NO_SKILLS: &str = "No skills listed.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyCard {
    pub size: String,
    pub domain: String,
    pub news: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleCard {
    pub experience: String,
    pub salary: String,
    pub skills: Vec<String>,
}

impl CompanyCard {
    pub fn from_summary(summary: Option<&Summary>) -> Self {
        match summary {
            Some(s) => Self {
                size: s.text_or_placeholder("size"),
                domain: s.text_or_placeholder("domain"),
                news: s.list_or("news", NO_NEWS),
            },
            None => Self {
                size: PLACEHOLDER.to_string(),
                domain: PLACEHOLDER.to_string(),
                news: vec![NO_NEWS.to_string()],
            },
        }
    }
}

impl RoleCard {
    pub fn from_summary(summary: Option<&Summary>) -> Self {
        match summary {
            Some(s) => Self {
                experience: s.text_or_placeholder("experience"),
                salary: s.text_or_placeholder("salary"),
                skills: s.list_or("skills", NO_SKILLS),
            },
            None => Self {
                experience: PLACEHOLDER.to_string(),
                salary: PLACEHOLDER.to_string(),
                skills: vec![NO_SKILLS.to_string()],
            },
        }
    }
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    company: Option<&'a Summary>,
    role: Option<&'a Summary>,
}

pub struct ResearchReport<'a> {
    key: &'a ResearchKey,
    outcome: &'a ResearchOutcome,
}

impl<'a> ResearchReport<'a> {
    pub fn new(key: &'a ResearchKey, outcome: &'a ResearchOutcome) -> Self {
        Self { key, outcome }
    }

    pub fn company_name(&self) -> &str {
        self.key.company()
    }

    pub fn role_name(&self) -> &str {
        self.key.role()
    }

    pub fn has_data(&self) -> bool {
        self.outcome.has_data()
    }

    pub fn outcome(&self) -> &ResearchOutcome {
        self.outcome
    }

    pub fn company_card(&self) -> CompanyCard {
        CompanyCard::from_summary(self.outcome.company.as_ref())
    }

    pub fn role_card(&self) -> RoleCard {
        RoleCard::from_summary(self.outcome.role.as_ref())
    }

    /// Export document, indented by two spaces
    pub fn export_json(&self) -> Result<String> {
        let document = ExportDocument {
            company: self.outcome.company.as_ref(),
            role: self.outcome.role.as_ref(),
        };
        serde_json::to_string_pretty(&document).context("Failed to serialize research report")
    }

    pub fn export_file_name(&self) -> String {
        export_file_name(self.key.company())
    }
}

pub fn export_file_name(company: &str) -> String {
    format!("{}_report.json", company.replace(' ', "_"))
}
