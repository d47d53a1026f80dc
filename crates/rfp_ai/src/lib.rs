pub mod analysis;
pub mod backend;
pub mod chat;
pub mod chunking;
pub mod embeddings;
pub mod index;
pub mod llm;
pub mod openai;
pub mod retrieve;
pub mod session;
