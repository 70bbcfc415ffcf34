pub mod cli;
pub mod config;
pub mod report;
pub mod research;
pub mod template_processor;
pub mod types;
pub mod utils;
pub mod web;

pub use config::AgentConfig;
pub use report::{CompanyCard, ResearchReport, RoleCard};
pub use research::{ResearchAgent, ResearchKey, ResearchOutcome, ResearchRequest};
pub use web::{build_rocket, start_web_server};
