// src/cli.rs
use crate::config::AgentConfig;
use crate::report::ResearchReport;
use crate::research::{ResearchAgent, ResearchKey, MISSING_INPUT_WARNING};
use crate::types::NoticeLevel;
use crate::utils::disk_safe_file_name;
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "research-agent")]
#[command(about = "Structured company and job role insights from web search and Gemini")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the research form, report pages and JSON API
    Serve {
        #[arg(long, env = "RESEARCH_AGENT_PORT")]
        port: Option<u16>,
    },
    /// Research one company and role and print the report
    Research {
        #[arg(long)]
        company: String,
        #[arg(long)]
        role: String,
        /// Directory to write the JSON report into
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = AgentConfig::load()?;

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let agent = ResearchAgent::from_config(&config)?;
            start_web_server(agent, port).await
        }
        Command::Research {
            company,
            role,
            output,
        } => {
            let agent = ResearchAgent::from_config(&config)?;
            research_once(&agent, &company, &role, output).await
        }
    }
}

async fn research_once(
    agent: &ResearchAgent,
    company: &str,
    role: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let Some(key) = ResearchKey::new(company, role) else {
        anyhow::bail!(MISSING_INPUT_WARNING);
    };

    let outcome = agent.research(&key).await;
    let report = ResearchReport::new(&key, &outcome);

    println!("{}", render_text(&report));

    if let Some(dir) = output {
        if !report.has_data() {
            anyhow::bail!("No data found, nothing to write");
        }
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        let path = dir.join(disk_safe_file_name(&report.export_file_name()));
        if path.parent() != Some(dir.as_path()) {
            anyhow::bail!("Refusing to write report outside {}", dir.display());
        }
        tokio::fs::write(&path, report.export_json()?)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        info!("Wrote report to {}", path.display());
        println!("📥 Report saved to {}", path.display());
    }

    Ok(())
}

/// Plain-text rendering of notices and both cards
pub fn render_text(report: &ResearchReport<'_>) -> String {
    let mut lines = Vec::new();

    for notice in report.outcome().notices.iter() {
        let tag = match notice.level {
            NoticeLevel::Error => "error",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
        };
        lines.push(format!("[{}] {}", tag, notice.message));
    }

    if !report.has_data() {
        lines.push("No data found.".to_string());
        return lines.join("\n");
    }

    let company = report.company_card();
    let role = report.role_card();

    lines.push("✅ Research Complete!".to_string());
    lines.push(String::new());
    lines.push(format!("🏢 {} — Overview", report.company_name()));
    lines.push(format!("Company Size: {}", company.size));
    lines.push(format!("🌐 Domain: {}", company.domain));
    lines.push("📰 Latest News:".to_string());
    lines.extend(company.news.iter().map(|n| format!("  - {}", n)));
    lines.push(String::new());
    lines.push(format!("👨‍💻 Role: {}", report.role_name()));
    lines.push(format!("Experience: {}", role.experience));
    lines.push(format!("Salary Range: {}", role.salary));
    lines.push("🛠️ Key Skills:".to_string());
    lines.extend(role.skills.iter().map(|s| format!("  - {}", s)));

    lines.join("\n")
}
