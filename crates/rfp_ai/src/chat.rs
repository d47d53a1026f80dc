use rfp_core::error::AppError;
use rfp_core::prompts::{fill, PromptSet};
use serde::{Deserialize, Serialize};

use crate::backend::AiBackend;
use crate::retrieve::answer_with_retrieval;
use crate::session::SessionContext;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the session transcript. Stored chronologically; rendering
/// most-recent-first is the display surface's concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

fn render_history(turns: &[ConversationTurn]) -> String {
    let mut out = String::new();
    for turn in turns {
        let speaker = match turn.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        out.push_str(speaker);
        out.push_str(": ");
        out.push_str(turn.content.trim());
        out.push('\n');
    }
    out
}

/// Answer one conversational question over the indexed material.
///
/// The user turn is appended first; when earlier turns exist the question is
/// rewritten into a standalone query against them (delegated to the LLM, so
/// follow-ups like "who builds it?" resolve their referent), then answered
/// with retrieval. The transcript grows without bound for the session. On
/// failure the pending user turn is removed so a resubmission starts clean.
pub fn ask(
    session: &mut SessionContext,
    backend: &AiBackend,
    prompts: &PromptSet,
    query: &str,
) -> Result<String, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::new("INPUT_EMPTY", "Question must not be empty"));
    }

    session.transcript.push(ConversationTurn {
        role: Role::User,
        content: query.to_string(),
    });

    let result = answer_turn(session, backend, prompts, query);
    match result {
        Ok(answer) => {
            session.transcript.push(ConversationTurn {
                role: Role::Assistant,
                content: answer.clone(),
            });
            Ok(answer)
        }
        Err(e) => {
            session.transcript.pop();
            Err(e)
        }
    }
}

fn answer_turn(
    session: &mut SessionContext,
    backend: &AiBackend,
    prompts: &PromptSet,
    query: &str,
) -> Result<String, AppError> {
    let prior = &session.transcript[..session.transcript.len() - 1];
    let effective_query = if prior.is_empty() {
        query.to_string()
    } else {
        let history = render_history(prior);
        let condense = fill(
            &prompts.condense_question_template,
            &[("history", history.as_str()), ("question", query)],
        );
        let rewritten = backend.complete(&condense)?;
        let rewritten = rewritten.trim();
        if rewritten.is_empty() {
            query.to_string()
        } else {
            log::debug!("condensed follow-up into: {rewritten}");
            rewritten.to_string()
        }
    };

    answer_with_retrieval(&session.index, backend, prompts, &effective_query)
}
