use pretty_assertions::assert_eq;
use rfp_core::prompts::{fill, PromptSet};

#[test]
fn defaults_cover_every_template() {
    let prompts = PromptSet::default();
    assert!(prompts.client_name_query.contains("name of the client"));
    assert!(prompts.improvements_template.contains("{rfp_text}"));
    assert!(prompts.improvements_template.contains("10. Formatting"));
    assert!(prompts.ideas_template.contains("{use_case}"));
    assert!(prompts.ideas_template.contains("moonshot"));
    assert!(prompts.retrieval_answer_template.contains("{context}"));
    assert!(prompts.retrieval_answer_template.contains("{question}"));
    assert!(prompts.condense_question_template.contains("{history}"));
    assert!(prompts.summarize_chunk_template.contains("{chunk}"));
    assert!(prompts.summarize_combine_template.contains("{summaries}"));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let loaded = PromptSet::load(&dir.path().join("nope.json")).expect("load");
    assert_eq!(loaded, PromptSet::default());
}

#[test]
fn file_overrides_merge_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prompts.json");
    std::fs::write(
        &path,
        r#"{"client_name_query": "Who issued this RFP? Answer with the name only."}"#,
    )
    .expect("write");

    let loaded = PromptSet::load(&path).expect("load");
    assert_eq!(
        loaded.client_name_query,
        "Who issued this RFP? Answer with the name only."
    );
    // Untouched fields keep their defaults.
    assert_eq!(loaded.use_cases_query, PromptSet::default().use_cases_query);
}

#[test]
fn malformed_file_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prompts.json");
    std::fs::write(&path, "{not json").expect("write");

    let err = PromptSet::load(&path).expect_err("should fail");
    assert_eq!(err.code, "CONFIG_PROMPTS_DECODE_FAILED");
    assert!(err.is_config());
}

#[test]
fn fill_substitutes_known_placeholders_only() {
    let out = fill(
        "Q: {question} C: {context} X: {unknown}",
        &[("question", "why"), ("context", "because")],
    );
    assert_eq!(out, "Q: why C: because X: {unknown}");
}
