use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rfp_ai::backend::AiBackend;
use rfp_ai::chunking::Segment;
use rfp_ai::embeddings::Embedder;
use rfp_ai::index::VectorIndex;
use rfp_ai::llm::Llm;
use rfp_ai::retrieve::{answer_with_retrieval, RETRIEVAL_TOP_K};
use rfp_core::error::AppError;
use rfp_core::prompts::PromptSet;

struct CountABEmbedder;

impl Embedder for CountABEmbedder {
    fn embed(&self, _model: &str, input: &str) -> Result<Vec<f32>, AppError> {
        let mut a = 0u32;
        let mut b = 0u32;
        for ch in input.chars() {
            if ch == 'a' {
                a += 1;
            } else if ch == 'b' {
                b += 1;
            }
        }
        Ok(vec![a as f32, b as f32])
    }
}

struct RecordingLlm {
    prompts_seen: Rc<RefCell<Vec<String>>>,
}

impl Llm for RecordingLlm {
    fn complete(&self, _model: &str, prompt: &str) -> Result<String, AppError> {
        self.prompts_seen.borrow_mut().push(prompt.to_string());
        Ok("the answer".to_string())
    }
}

fn backend_with_llm(llm: Box<dyn Llm>) -> AiBackend {
    AiBackend::new(Box::new(CountABEmbedder), llm, "mock-embed", "mock-chat")
}

fn segment(text: &str) -> Segment {
    Segment {
        text: text.to_string(),
        source_offset: 0,
    }
}

#[test]
fn query_ranks_by_cosine_similarity() {
    let backend = backend_with_llm(Box::new(RecordingLlm {
        prompts_seen: Rc::new(RefCell::new(Vec::new())),
    }));
    let mut index = VectorIndex::new();
    index
        .insert(&backend, vec![segment("aaaa"), segment("bbbb")])
        .expect("insert");

    let hits = index.query(&backend, "aaa", 2).expect("query");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].text, "aaaa");
    assert_eq!(hits[1].text, "bbbb");
}

#[test]
fn query_never_exceeds_k_and_shrinks_with_small_indexes() {
    let backend = backend_with_llm(Box::new(RecordingLlm {
        prompts_seen: Rc::new(RefCell::new(Vec::new())),
    }));
    let mut index = VectorIndex::new();
    index
        .insert(&backend, vec![segment("ab"), segment("aab"), segment("abb")])
        .expect("insert");

    assert_eq!(index.query(&backend, "ab", 2).expect("query").len(), 2);
    // Only three entries exist, so asking for more returns all of them.
    assert_eq!(index.query(&backend, "ab", 10).expect("query").len(), 3);
}

#[test]
fn equal_scores_keep_insertion_order() {
    let backend = backend_with_llm(Box::new(RecordingLlm {
        prompts_seen: Rc::new(RefCell::new(Vec::new())),
    }));
    let mut index = VectorIndex::new();
    // Identical embeddings, so every score ties.
    index
        .insert(
            &backend,
            vec![segment("ab first"), segment("ab second"), segment("ab third")],
        )
        .expect("insert");

    let hits = index.query(&backend, "ab", 3).expect("query");
    assert_eq!(hits[0].text, "ab first");
    assert_eq!(hits[1].text, "ab second");
    assert_eq!(hits[2].text, "ab third");
}

#[test]
fn duplicate_inserts_are_kept_as_separate_entries() {
    let backend = backend_with_llm(Box::new(RecordingLlm {
        prompts_seen: Rc::new(RefCell::new(Vec::new())),
    }));
    let mut index = VectorIndex::new();
    index.insert(&backend, vec![segment("ab")]).expect("insert");
    index.insert(&backend, vec![segment("ab")]).expect("insert");
    assert_eq!(index.len(), 2);
}

#[test]
fn querying_an_empty_index_is_not_ready() {
    let backend = backend_with_llm(Box::new(RecordingLlm {
        prompts_seen: Rc::new(RefCell::new(Vec::new())),
    }));
    let index = VectorIndex::new();
    let err = index.query(&backend, "ab", 5).expect_err("should fail");
    assert_eq!(err.code, "AI_INDEX_NOT_READY");
}

#[test]
fn blank_query_is_an_input_error() {
    let backend = backend_with_llm(Box::new(RecordingLlm {
        prompts_seen: Rc::new(RefCell::new(Vec::new())),
    }));
    let mut index = VectorIndex::new();
    index.insert(&backend, vec![segment("ab")]).expect("insert");
    let err = index.query(&backend, "   ", 5).expect_err("should fail");
    assert_eq!(err.code, "INPUT_EMPTY");
}

#[test]
fn answer_embeds_retrieved_context_and_question() {
    let prompts_seen = Rc::new(RefCell::new(Vec::new()));
    let backend = backend_with_llm(Box::new(RecordingLlm {
        prompts_seen: prompts_seen.clone(),
    }));
    let mut index = VectorIndex::new();
    index
        .insert(
            &backend,
            vec![segment("about apples and bananas"), segment("bbb only")],
        )
        .expect("insert");

    let prompts = PromptSet::default();
    let answer =
        answer_with_retrieval(&index, &backend, &prompts, "aaa question").expect("answer");
    assert_eq!(answer, "the answer");

    let seen = prompts_seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("about apples and bananas"));
    assert!(seen[0].contains("aaa question"));
    // Both indexed segments fit within the fixed top-k.
    assert!(RETRIEVAL_TOP_K >= 2);
    assert!(seen[0].contains("bbb only"));
}
