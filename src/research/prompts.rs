// src/research/prompts.rs
//! Search queries and model prompts for the two halves of a research run

pub fn company_query(company: &str) -> String {
    format!("Overview of {}: size, domain, and latest news.", company)
}

pub fn company_prompt(company: &str, context: &str) -> String {
    format!(
        r#"Summarize '{}' into JSON: {{"size": "...", "domain": "...", "news": ["...", "..."]}}
Search Results:
{}"#,
        company, context
    )
}

pub fn role_query(company: &str, role: &str) -> String {
    format!(
        "Job requirements for '{}' at '{}': skills, experience, salary.",
        role, company
    )
}

pub fn role_prompt(company: &str, role: &str, context: &str) -> String {
    format!(
        r#"Summarize '{}' at '{}' into JSON: {{"skills": ["...", "..."], "experience": "...", "salary": "..."}}
Search Results:
{}"#,
        role, company, context
    )
}
