// src/web/pages.rs
//! HTML pages for the research form and report

use crate::report::ResearchReport;
use crate::template_processor::{escape_html, TemplateProcessor};
use crate::types::{Notice, NoticeLevel};
use std::collections::HashMap;

const PAGE_TITLE: &str = "AI Research Agent 🔎";
const START_HINT: &str = "Fill out the details in the sidebar and click <strong>Start Research</strong>.";
const RESEARCH_COMPLETE: &str = "✅ Research Complete!";
const NO_DATA: &str = "No data found.";

const STYLE: &str = r#"
body { margin: 0; display: flex; font-family: sans-serif; background-color: #1e1e1e; color: #e0e0e0; }
.sidebar { width: 300px; padding: 20px; background-color: #262626; min-height: 100vh; }
.sidebar label { display: block; margin-bottom: 12px; }
.sidebar input { width: 100%; padding: 8px; margin-top: 4px; box-sizing: border-box; }
.sidebar button, .download button { width: 100%; padding: 10px; border: none; border-radius: 6px; background-color: #ff4b4b; color: white; cursor: pointer; }
main { flex: 1; padding: 20px 40px; }
.columns { display: flex; gap: 40px; }
.columns > .card { flex: 1; }
.card {
    background-color: #2a2a2a;
    border-radius: 10px;
    padding: 20px;
    margin-bottom: 20px;
    box-shadow: 0 4px 8px rgba(0,0,0,0.2);
    transition: 0.3s;
}
.card:hover { box-shadow: 0 8px 16px rgba(0,0,0,0.2); }
.notice { padding: 12px 16px; border-radius: 8px; margin-bottom: 12px; }
.notice-error { background-color: #3e2323; color: #ff8c8c; }
.notice-warning { background-color: #3e3723; color: #ffd36b; }
.notice-info { background-color: #23303e; color: #8cc4ff; }
.notice-success { background-color: #233e2a; color: #8cff9f; }
h1, h2, h3, h4, h5, h6 { color: #e0e0e0; }
"#;

const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<style>{{style}}</style>
</head>
<body>
<aside class="sidebar">
<h2>📝 Research Inputs</h2>
<form method="post" action="/research">
<label>Company Name<input type="text" name="company" placeholder="e.g., Google" value="{{company}}"></label>
<label>Job Role<input type="text" name="role" placeholder="e.g., Data Scientist" value="{{role}}"></label>
<button type="submit">🚀 Start Research</button>
</form>
<hr>
</aside>
<main>
<h1>{{title}}</h1>
<p>Get structured company &amp; job role insights in seconds, powered by Gemini &amp; SerpApi.</p>
{{content}}
</main>
</body>
</html>
"#;

const COMPANY_CARD: &str = r#"<div class="card">
<h3>🏢 {{company}} — Overview</h3>
<p><strong>Company Size:</strong> {{size}}</p>
<p><strong>🌐 Domain:</strong> {{domain}}</p>
<p><strong>📰 Latest News:</strong></p>
<ul>{{news}}</ul>
</div>"#;

const ROLE_CARD: &str = r#"<div class="card">
<h3>👨‍💻 Role: {{role}}</h3>
<p><strong>Experience:</strong> {{experience}}</p>
<p><strong>Salary Range:</strong> {{salary}}</p>
<p><strong>🛠️ Key Skills:</strong></p>
<ul>{{skills}}</ul>
</div>"#;

const DOWNLOAD: &str = r#"<hr>
<form class="download" method="get" action="/report/download">
<input type="hidden" name="company" value="{{company}}">
<input type="hidden" name="role" value="{{role}}">
<button type="submit">📥 Download Full Report (JSON)</button>
</form>"#;

/// Landing page: empty form and a hint
pub fn home_page() -> String {
    layout("", "", &notice_html(NoticeLevel::Info, START_HINT))
}

/// Form page re-rendered with a single notice (validation failures)
pub fn notice_page(company: &str, role: &str, notice: &Notice) -> String {
    layout(
        company,
        role,
        &notice_html(notice.level, &escape_html(&notice.message)),
    )
}

/// Report page: run notices, then cards and download control when any data exists
pub fn report_page(report: &ResearchReport<'_>) -> String {
    let mut content: String = report
        .outcome()
        .notices
        .iter()
        .map(|n| notice_html(n.level, &escape_html(&n.message)))
        .collect();

    if report.has_data() {
        content.push_str(&notice_html(NoticeLevel::Success, RESEARCH_COMPLETE));
        content.push_str("<div class=\"columns\">");
        content.push_str(&company_card_html(report));
        content.push_str(&role_card_html(report));
        content.push_str("</div>");
        content.push_str(&download_html(report));
    } else {
        content.push_str(&notice_html(NoticeLevel::Info, NO_DATA));
    }

    layout(report.company_name(), report.role_name(), &content)
}

fn layout(company: &str, role: &str, content: &str) -> String {
    let vars = HashMap::from([
        ("title", PAGE_TITLE.to_string()),
        ("style", STYLE.to_string()),
        ("company", escape_html(company)),
        ("role", escape_html(role)),
        ("content", content.to_string()),
    ]);
    TemplateProcessor::process_variables(LAYOUT, &vars)
}

fn company_card_html(report: &ResearchReport<'_>) -> String {
    let card = report.company_card();
    let vars = HashMap::from([
        ("company", escape_html(report.company_name())),
        ("size", escape_html(&card.size)),
        ("domain", escape_html(&card.domain)),
        ("news", bullets(&card.news)),
    ]);
    TemplateProcessor::process_variables(COMPANY_CARD, &vars)
}

fn role_card_html(report: &ResearchReport<'_>) -> String {
    let card = report.role_card();
    let vars = HashMap::from([
        ("role", escape_html(report.role_name())),
        ("experience", escape_html(&card.experience)),
        ("salary", escape_html(&card.salary)),
        ("skills", bullets(&card.skills)),
    ]);
    TemplateProcessor::process_variables(ROLE_CARD, &vars)
}

fn download_html(report: &ResearchReport<'_>) -> String {
    let vars = HashMap::from([
        ("company", escape_html(report.company_name())),
        ("role", escape_html(report.role_name())),
    ]);
    TemplateProcessor::process_variables(DOWNLOAD, &vars)
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect()
}

// `message` must already be escaped
fn notice_html(level: NoticeLevel, message: &str) -> String {
    let class = match level {
        NoticeLevel::Error => "error",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "success",
    };
    format!("<div class=\"notice notice-{}\">{}</div>\n", class, message)
}
