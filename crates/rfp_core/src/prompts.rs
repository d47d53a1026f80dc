use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The full set of prompt templates driving the analysis pipeline and the
/// conversational surface. Placeholders use `{name}` syntax and are
/// substituted with [`fill`].
///
/// Every field has a built-in default, so a prompts file only needs to name
/// the templates it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PromptSet {
    pub client_name_query: String,
    pub client_description_query: String,
    pub deliverables_query: String,
    pub post_proposal_actions_query: String,
    pub technical_requirements_query: String,
    pub use_cases_query: String,
    pub improvements_template: String,
    pub ideas_template: String,
    pub summarize_chunk_template: String,
    pub summarize_combine_template: String,
    pub retrieval_answer_template: String,
    pub condense_question_template: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            client_name_query: "What is the name of the client? Give your answer as just: <name>"
                .to_string(),
            client_description_query:
                "Describe the client company. What is its main purpose?".to_string(),
            deliverables_query: "Generate a numbered list of specific actions being requested \
                 (i.e., deliverables) that must be performed to create a proposal. Do not list \
                 actions that will be performed once the vendor is selected (e.g., conducting \
                 workshops)."
                .to_string(),
            post_proposal_actions_query: "Generate a numbered list of specific actions the \
                 vendor will perform if selected (i.e., post-proposal actions)."
                .to_string(),
            technical_requirements_query:
                "What are the technical (software) requirements the client is asking for?"
                    .to_string(),
            use_cases_query: "What are the client's use cases? If none are specifically \
                 mentioned, then recommend a set of potential use case areas. Generate a \
                 numbered list of use case titles only."
                .to_string(),
            improvements_template: r#"<RFP>
{rfp_text}
</RFP>
To ensure that a request for proposal (RFP) contains sufficient details for vendors to create high-quality proposals, the following success criteria can be used:
1. Clarity: Is the RFP clearly written and easy to understand? Does it provide a clear picture of what the company is looking for and what they expect from the vendor?
2. Scope: Does the RFP include a detailed description of the project scope and objectives? Does it outline the specific tasks and deliverables that the vendor will be responsible for?
3. Timeline: Does the RFP include a timeline for the project, with specific dates for milestones and deadlines? Is the timeline realistic and achievable?
4. Budget: Does the RFP include a budget for the project? Is the budget reasonable and commensurate with the scope of work?
5. Requirements: Does the RFP outline the specific requirements that vendors must meet in order to be considered? Are the requirements clear and measurable?
6. Evaluation Criteria: Does the RFP include clear criteria for evaluating vendor proposals? Are the criteria objective and relevant to the project?
7. Communication: Does the RFP provide clear instructions for how vendors can ask questions or seek clarification during the bidding process? Is there a designated point of contact for vendors to communicate with?
8. Background Information: Does the RFP provide sufficient background information about the company and its goals, so that vendors can understand the context of the project?
9. Legal and Contractual Details: Does the RFP include all necessary legal and contractual information, such as non-disclosure agreements, indemnification clauses, and payment terms?
10. Formatting: Is the RFP well-formatted and visually appealing, with clear section headers and formatting that makes it easy to scan and digest?

Given the above RFP and this evaluation criteria, list any areas the proposal could be improved.
Focus specifically on details that are missing or unclear or constraints and conditions that are not specified."#
                .to_string(),
            ideas_template: r#"{client_description}
{summary}
General technical requirements: {technical_requirements}
You are an expert AI consultant preparing a proposal for this client.
You are focused specifically on the use cases: {use_case}.
Generate a numbered list of 4 innovative ideas for the use case.
The first 3 ideas should be creative but practical today.
The last idea should be a moonshot idea.
Each suggestion should be tailored to the client's unique business needs and explicitly describe the use of requested technology that incorporates the general technical requirements.
The moonshot idea should assume no technical or financial limitations and rely on fully autonomous and sentient AI. This would be the ideal solution if the client had unlimited resources."#
                .to_string(),
            summarize_chunk_template: r#"Write a concise summary of the following text:

{chunk}

CONCISE SUMMARY:"#
                .to_string(),
            summarize_combine_template: r#"The following is a set of summaries of consecutive parts of a document:

{summaries}

Take these and distill them into a final, consolidated summary of the whole document.

FINAL SUMMARY:"#
                .to_string(),
            retrieval_answer_template: r#"Use the following pieces of context to answer the question at the end. If you don't know the answer, just say that you don't know, don't try to make up an answer.

{context}

Question: {question}
Helpful Answer:"#
                .to_string(),
            condense_question_template: r#"Given the following conversation and a follow up question, rephrase the follow up question to be a standalone question, in its original language.

Chat History:
{history}
Follow Up Input: {question}
Standalone question:"#
                .to_string(),
        }
    }
}

impl PromptSet {
    /// Load templates from a JSON file. A missing file yields the built-in
    /// defaults; an unreadable or malformed file is a configuration error.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(path).map_err(|e| {
            AppError::new("CONFIG_PROMPTS_READ_FAILED", "Failed to read prompts file")
                .with_details(format!("path={}; err={}", path.display(), e))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::new("CONFIG_PROMPTS_DECODE_FAILED", "Failed to decode prompts file")
                .with_details(format!("path={}; err={}", path.display(), e))
        })
    }
}

/// Substitute `{name}` placeholders. Unknown placeholders are left intact.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}
