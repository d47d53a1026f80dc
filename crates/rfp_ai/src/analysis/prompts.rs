use rfp_core::prompts::{fill, PromptSet};

pub fn improvements_prompt(prompts: &PromptSet, rfp_text: &str) -> String {
    fill(&prompts.improvements_template, &[("rfp_text", rfp_text)])
}

pub fn summarize_chunk_prompt(prompts: &PromptSet, chunk: &str) -> String {
    fill(&prompts.summarize_chunk_template, &[("chunk", chunk)])
}

pub fn summarize_combine_prompt(prompts: &PromptSet, summaries: &[String]) -> String {
    let joined = summaries.join("\n\n");
    fill(
        &prompts.summarize_combine_template,
        &[("summaries", joined.as_str())],
    )
}

pub fn ideas_prompt(
    prompts: &PromptSet,
    client_description: &str,
    summary: &str,
    technical_requirements: &str,
    use_case: &str,
) -> String {
    fill(
        &prompts.ideas_template,
        &[
            ("client_description", client_description),
            ("summary", summary),
            ("technical_requirements", technical_requirements),
            ("use_case", use_case),
        ],
    )
}
