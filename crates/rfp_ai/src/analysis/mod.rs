use std::path::PathBuf;

use rfp_core::config::Settings;
use rfp_core::error::AppError;
use rfp_core::listparse::parse_numbered_list;
use rfp_core::prompts::PromptSet;
use rfp_core::report::{client_slug, Report, ReportSection};
use serde::{Deserialize, Serialize};

use crate::backend::AiBackend;
use crate::chunking::{self, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_TOKENS};
use crate::retrieve::answer_with_retrieval;
use crate::session::SessionContext;

mod prompts;

/// The fixed step sequence of the analysis pipeline, in execution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStep {
    ClientName,
    ClientDescription,
    Summary,
    Improvements,
    Deliverables,
    PostProposalActions,
    TechnicalRequirements,
    UseCases,
    UseCaseIdeas,
}

impl AnalysisStep {
    pub const ALL: [AnalysisStep; 9] = [
        AnalysisStep::ClientName,
        AnalysisStep::ClientDescription,
        AnalysisStep::Summary,
        AnalysisStep::Improvements,
        AnalysisStep::Deliverables,
        AnalysisStep::PostProposalActions,
        AnalysisStep::TechnicalRequirements,
        AnalysisStep::UseCases,
        AnalysisStep::UseCaseIdeas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStep::ClientName => "client_name",
            AnalysisStep::ClientDescription => "client_description",
            AnalysisStep::Summary => "summary",
            AnalysisStep::Improvements => "improvements",
            AnalysisStep::Deliverables => "deliverables",
            AnalysisStep::PostProposalActions => "post_proposal_actions",
            AnalysisStep::TechnicalRequirements => "technical_requirements",
            AnalysisStep::UseCases => "use_cases",
            AnalysisStep::UseCaseIdeas => "use_case_ideas",
        }
    }
}

fn emit(
    report: &mut Report,
    on_section: &mut dyn FnMut(&ReportSection),
    heading: String,
    level: u8,
    body: String,
) {
    let section = report.add_section(heading, level, body);
    on_section(section);
}

/// Run the analysis pipeline over the ingested RFP.
///
/// Steps run in a strict order, each appending its raw output to the report
/// and handing the new section to `on_section` as it lands. Completed steps
/// are recorded on the session and skipped on re-entry, so a backend failure
/// aborts the current step only: resubmitting resumes at the step that
/// failed. Use-case idea generation additionally resumes mid-step, per use
/// case.
///
/// On full completion the report is persisted to
/// `<data_dir>/<client-slug>.md` and its rendered text is chunked back into
/// the index so follow-up questions can draw on the analysis itself. Returns
/// the persisted path.
pub fn run_analysis(
    session: &mut SessionContext,
    backend: &AiBackend,
    prompts: &PromptSet,
    settings: &Settings,
    on_section: &mut dyn FnMut(&ReportSection),
) -> Result<PathBuf, AppError> {
    let rfp_text = match session.rfp_text.clone() {
        Some(t) => t,
        None => {
            return Err(AppError::new(
                "INPUT_NO_DOCUMENT",
                "Submit RFP text before running the analysis",
            ));
        }
    };

    if !session.analysis.completed.contains(&AnalysisStep::ClientName) {
        log::info!("identifying client name");
        let answer =
            answer_with_retrieval(&session.index, backend, prompts, &prompts.client_name_query)?;
        let name = answer.trim().to_string();
        emit(
            &mut session.report,
            on_section,
            format!("RFP Analysis for {name}"),
            1,
            name.clone(),
        );
        session.analysis.client_name = Some(name);
        session.analysis.completed.insert(AnalysisStep::ClientName);
    }

    if !session
        .analysis
        .completed
        .contains(&AnalysisStep::ClientDescription)
    {
        log::info!("generating client description");
        let answer = answer_with_retrieval(
            &session.index,
            backend,
            prompts,
            &prompts.client_description_query,
        )?;
        let description = answer.trim().to_string();
        emit(
            &mut session.report,
            on_section,
            "Client Description".to_string(),
            2,
            description.clone(),
        );
        session.analysis.client_description = Some(description);
        session
            .analysis
            .completed
            .insert(AnalysisStep::ClientDescription);
    }

    if !session.analysis.completed.contains(&AnalysisStep::Summary) {
        log::info!("summarizing document");
        // Hierarchical reduce: summarize every chunk, then combine the
        // partial summaries in a second pass.
        let segments = chunking::split(&rfp_text, DEFAULT_CHUNK_TOKENS, DEFAULT_CHUNK_OVERLAP)?;
        let mut partials = Vec::new();
        for segment in &segments {
            let partial = backend.complete(&prompts::summarize_chunk_prompt(prompts, &segment.text))?;
            partials.push(partial.trim().to_string());
        }
        let combined = backend.complete(&prompts::summarize_combine_prompt(prompts, &partials))?;
        let summary = combined.trim().to_string();
        emit(
            &mut session.report,
            on_section,
            "Proposal Summary".to_string(),
            2,
            summary.clone(),
        );
        session.analysis.summary = Some(summary);
        session.analysis.completed.insert(AnalysisStep::Summary);
    }

    if !session.analysis.completed.contains(&AnalysisStep::Improvements) {
        log::info!("evaluating RFP completeness");
        // Rubric evaluation runs over the whole document, not retrieval.
        let answer = backend.complete(&prompts::improvements_prompt(prompts, &rfp_text))?;
        emit(
            &mut session.report,
            on_section,
            "Proposal Improvements".to_string(),
            2,
            answer.trim().to_string(),
        );
        session.analysis.completed.insert(AnalysisStep::Improvements);
    }

    if !session.analysis.completed.contains(&AnalysisStep::Deliverables) {
        log::info!("extracting deliverables");
        let answer =
            answer_with_retrieval(&session.index, backend, prompts, &prompts.deliverables_query)?;
        emit(
            &mut session.report,
            on_section,
            "Proposal Deliverables".to_string(),
            2,
            answer.trim().to_string(),
        );
        session.analysis.completed.insert(AnalysisStep::Deliverables);
    }

    if !session
        .analysis
        .completed
        .contains(&AnalysisStep::PostProposalActions)
    {
        log::info!("extracting post-proposal actions");
        let answer = answer_with_retrieval(
            &session.index,
            backend,
            prompts,
            &prompts.post_proposal_actions_query,
        )?;
        emit(
            &mut session.report,
            on_section,
            "Post-Proposal Actions".to_string(),
            2,
            answer.trim().to_string(),
        );
        session
            .analysis
            .completed
            .insert(AnalysisStep::PostProposalActions);
    }

    if !session
        .analysis
        .completed
        .contains(&AnalysisStep::TechnicalRequirements)
    {
        log::info!("extracting technical requirements");
        let answer = answer_with_retrieval(
            &session.index,
            backend,
            prompts,
            &prompts.technical_requirements_query,
        )?;
        let requirements = answer.trim().to_string();
        emit(
            &mut session.report,
            on_section,
            "Technical Requirements".to_string(),
            2,
            requirements.clone(),
        );
        session.analysis.technical_requirements = Some(requirements);
        session
            .analysis
            .completed
            .insert(AnalysisStep::TechnicalRequirements);
    }

    if !session.analysis.completed.contains(&AnalysisStep::UseCases) {
        log::info!("identifying use cases");
        let answer =
            answer_with_retrieval(&session.index, backend, prompts, &prompts.use_cases_query)?;
        let raw = answer.trim().to_string();
        emit(
            &mut session.report,
            on_section,
            "Use Cases".to_string(),
            2,
            raw.clone(),
        );
        session.analysis.use_cases = parse_numbered_list(&raw);
        session.analysis.completed.insert(AnalysisStep::UseCases);
    }

    if !session.analysis.completed.contains(&AnalysisStep::UseCaseIdeas) {
        let description = session.analysis.client_description.clone().unwrap_or_default();
        let summary = session.analysis.summary.clone().unwrap_or_default();
        let requirements = session
            .analysis
            .technical_requirements
            .clone()
            .unwrap_or_default();
        let total = session.analysis.use_cases.len();

        while session.analysis.ideas_done < total {
            let i = session.analysis.ideas_done;
            let use_case = session.analysis.use_cases[i].clone();
            log::info!("generating ideas for use case {}/{total}: {use_case}", i + 1);
            let ideas_text = backend.complete(&prompts::ideas_prompt(
                prompts,
                &description,
                &summary,
                &requirements,
                &use_case,
            ))?;
            let items = parse_numbered_list(&ideas_text);
            if items.len() >= 4 {
                for (j, item) in items.iter().take(4).enumerate() {
                    let heading = if j == 3 {
                        format!("{use_case}: Moonshot")
                    } else {
                        format!("{use_case}: Idea {}", j + 1)
                    };
                    emit(&mut session.report, on_section, heading, 3, item.clone());
                }
            } else {
                // The model ignored the list format; keep the raw reply
                // rather than losing it.
                emit(
                    &mut session.report,
                    on_section,
                    format!("{use_case}: Ideas"),
                    3,
                    ideas_text.trim().to_string(),
                );
            }
            session.analysis.ideas_done = i + 1;
        }
        session.analysis.completed.insert(AnalysisStep::UseCaseIdeas);
    }

    if let Some(path) = &session.analysis.report_path {
        return Ok(path.clone());
    }

    let slug = client_slug(session.analysis.client_name.as_deref().unwrap_or(""));
    let path = settings.data_dir.join(format!("{slug}.md"));
    session.report.persist(&path)?;

    // Feed the finished analysis back into the index so conversational
    // questions can retrieve from it alongside the original RFP.
    let rendered = session.report.render();
    let segments = chunking::split(&rendered, DEFAULT_CHUNK_TOKENS, DEFAULT_CHUNK_OVERLAP)?;
    session.index.insert(backend, segments)?;

    session.analysis.report_path = Some(path.clone());
    log::info!("analysis report written to {}", path.display());
    Ok(path)
}
