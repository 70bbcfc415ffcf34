// src/web/handlers/research_handlers.rs

use crate::report::ResearchReport;
use crate::research::{ResearchAgent, ResearchKey, ResearchRequest, MISSING_INPUT_WARNING};
use crate::types::{Notice, NoticeLevel, Notices};
use crate::web::pages;
use crate::web::types::{
    ActionResponse, DataResponse, DisplayFormat, DisplaySection, JsonDownload, ResearchData,
    ResearchForm, StandardErrorResponse, StandardRequest, WithConversationId,
};

use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

pub async fn home_handler() -> RawHtml<String> {
    RawHtml(pages::home_page())
}

pub async fn research_form_handler(
    form: Form<ResearchForm>,
    agent: &State<ResearchAgent>,
) -> RawHtml<String> {
    let form = form.into_inner();
    let company = form.company.unwrap_or_default();
    let role = form.role.unwrap_or_default();

    let key = match ResearchKey::new(&company, &role) {
        Some(key) => key,
        None => {
            warn!("Research form submitted without company or role");
            return RawHtml(pages::notice_page(
                &company,
                &role,
                &Notice::warning(MISSING_INPUT_WARNING),
            ));
        }
    };

    info!("Researching {} / {} from the web form", key.company(), key.role());
    let outcome = agent.research(&key).await;
    RawHtml(pages::report_page(&ResearchReport::new(&key, &outcome)))
}

pub async fn download_report_handler(
    company: Option<String>,
    role: Option<String>,
    agent: &State<ResearchAgent>,
) -> Result<JsonDownload, Status> {
    let key = ResearchKey::new(
        company.as_deref().unwrap_or_default(),
        role.as_deref().unwrap_or_default(),
    )
    .ok_or(Status::BadRequest)?;

    let Some(outcome) = agent.cached(&key) else {
        warn!("No finished research to download for {} / {}", key.company(), key.role());
        return Err(Status::NotFound);
    };
    let report = ResearchReport::new(&key, &outcome);

    if !report.has_data() {
        warn!("No report data to download for {} / {}", key.company(), key.role());
        return Err(Status::NotFound);
    }

    let json = report.export_json().map_err(|e| {
        error!("Failed to export report: {:#}", e);
        Status::InternalServerError
    })?;

    info!("Serving report download {}", report.export_file_name());
    Ok(JsonDownload::new(json, report.export_file_name()))
}

pub async fn research_api_handler(
    request: Json<StandardRequest<ResearchRequest>>,
    agent: &State<ResearchAgent>,
) -> Result<Json<DataResponse<ResearchData>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    let key = match request.data.key() {
        Some(key) => key,
        None => {
            warn!("Research API called without company or role");
            return Err(Json(StandardErrorResponse::new(
                MISSING_INPUT_WARNING.to_string(),
                "VALIDATION_ERROR".to_string(),
                vec![
                    "Provide a non-empty 'company' field".to_string(),
                    "Provide a non-empty 'role' field".to_string(),
                ],
                conversation_id,
            )));
        }
    };

    info!("Researching {} / {} from the API", key.company(), key.role());
    let outcome = agent.research(&key).await;
    let report = ResearchReport::new(&key, &outcome);

    if !report.has_data() {
        let details: Vec<String> = outcome.notices.iter().map(|n| n.message.clone()).collect();
        error!(
            "Research produced no data for {} / {}: {:?}",
            key.company(),
            key.role(),
            details
        );
        let (error_code, suggestions) = categorize_failure(&outcome.notices);
        return Err(Json(StandardErrorResponse::new(
            "No data found.".to_string(),
            error_code,
            suggestions,
            conversation_id,
        )));
    }

    let display_format = create_report_display_format(&report);
    let data = ResearchData {
        company: outcome.company.clone(),
        role: outcome.role.clone(),
        notices: outcome.notices.clone(),
        file_name: report.export_file_name(),
    };

    Ok(Json(
        DataResponse::success("✅ Research Complete!".to_string(), data, conversation_id)
            .with_display_format(display_format),
    ))
}

pub async fn evict_cache_handler(
    company: Option<String>,
    role: Option<String>,
    agent: &State<ResearchAgent>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    match (company, role) {
        (None, None) => {
            let removed = agent.clear_cache();
            info!("Cleared {} cached research results", removed);
            Ok(Json(ActionResponse::success(
                format!("Cleared {} cached research results", removed),
                "cache_cleared".to_string(),
                None,
            )))
        }
        (company, role) => {
            let key = ResearchKey::new(
                company.as_deref().unwrap_or_default(),
                role.as_deref().unwrap_or_default(),
            )
            .ok_or_else(|| {
                Json(StandardErrorResponse::new(
                    "Both company and role are required to evict a single entry".to_string(),
                    "VALIDATION_ERROR".to_string(),
                    vec!["Omit both parameters to clear the whole cache".to_string()],
                    None,
                ))
            })?;

            let removed = agent.evict(&key);
            info!(
                "Evicted cached research for {} / {}: {}",
                key.company(),
                key.role(),
                removed
            );
            let message = if removed {
                format!("Evicted cached research for {} / {}", key.company(), key.role())
            } else {
                format!("No cached research for {} / {}", key.company(), key.role())
            };
            Ok(Json(ActionResponse::success(
                message,
                "cache_evicted".to_string(),
                None,
            )))
        }
    }
}

fn create_report_display_format(report: &ResearchReport<'_>) -> DisplayFormat {
    let company = report.company_card();
    let role = report.role_card();

    let sections = vec![
        DisplaySection {
            title: format!("🏢 {} — Overview", report.company_name()),
            content: format!("Company Size: {} | Domain: {}", company.size, company.domain),
            points: Some(company.news),
        },
        DisplaySection {
            title: format!("👨‍💻 Role: {}", report.role_name()),
            content: format!(
                "Experience: {} | Salary Range: {}",
                role.experience, role.salary
            ),
            points: Some(role.skills),
        },
    ];

    DisplayFormat {
        format_type: "report".to_string(),
        sections: Some(sections),
    }
}

fn categorize_failure(notices: &Notices) -> (String, Vec<String>) {
    let has = |prefix: &str| {
        notices
            .iter()
            .any(|n| n.level == NoticeLevel::Error && n.message.starts_with(prefix))
    };

    if has("Gemini Error") {
        (
            "MODEL_ERROR".to_string(),
            vec![
                "The language model service is temporarily unavailable".to_string(),
                "Check the GEMINI_API_KEY configuration".to_string(),
                "Try again in a few moments".to_string(),
            ],
        )
    } else if notices.count(NoticeLevel::Warning) > 0 {
        (
            "PARSE_ERROR".to_string(),
            vec![
                "The model answered without a usable JSON object".to_string(),
                "Clear the cached result and try again".to_string(),
            ],
        )
    } else {
        (
            "NO_DATA".to_string(),
            vec!["Try a more specific company name or job role".to_string()],
        )
    }
}
