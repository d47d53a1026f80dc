use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One heading-plus-body block of the analysis document. Appended only,
/// never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSection {
    pub heading: String,
    pub level: u8,
    pub body: String,
}

/// Accumulates pipeline outputs into an ordered, tree-like markdown document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_section(
        &mut self,
        heading: impl Into<String>,
        level: u8,
        body: impl Into<String>,
    ) -> &ReportSection {
        self.sections.push(ReportSection {
            heading: heading.into(),
            level,
            body: body.into(),
        });
        self.sections.last().expect("section just pushed")
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Render the accumulated sections as a single markdown document.
    /// Heading depth is clamped to markdown's six levels.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            let level = section.level.clamp(1, 6) as usize;
            out.push_str(&"#".repeat(level));
            out.push(' ');
            out.push_str(&section.heading);
            out.push_str("\n\n");
            let body = section.body.trim();
            if !body.is_empty() {
                out.push_str(body);
                out.push_str("\n\n");
            }
        }
        out
    }

    /// Write the rendered document, creating parent directories as needed.
    pub fn persist(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::new("IO_REPORT_DIR_FAILED", "Failed to create report directory")
                        .with_details(format!("path={}; err={}", parent.display(), e))
                })?;
            }
        }
        fs::write(path, self.render().as_bytes()).map_err(|e| {
            AppError::new("IO_REPORT_WRITE_FAILED", "Failed to write report file")
                .with_details(format!("path={}; err={}", path.display(), e))
        })
    }
}

/// Normalize a client name into a filesystem-safe snake_case slug.
/// `"Acme Corp, Inc."` becomes `"acme_corp_inc"`; an unusable name falls
/// back to `"client"`.
pub fn client_slug(name: &str) -> String {
    let mut slug = String::new();
    let mut pending_sep = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    if slug.is_empty() {
        "client".to_string()
    } else {
        slug
    }
}
