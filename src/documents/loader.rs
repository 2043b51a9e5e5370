//! Markdown document source.
//!
//! Reads every `*.md` file in a directory (sorted by file name). A file may
//! open with a `---` delimited frontmatter block carrying `doc_id:` and
//! `title:`; anything missing falls back to the file stem. A file that cannot
//! be read is skipped with a warning rather than aborting the load.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Result, SemError};

use super::{Document, DocumentSource};

static FRONTMATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*\r?\n(.*)\z")
        .expect("frontmatter regex is valid")
});

static DOC_ID_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^doc_id:[ \t]*(.+)$").expect("doc_id regex is valid"));

static TITLE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^title:[ \t]*(.+)$").expect("title regex is valid"));

/// A directory of markdown documents.
#[derive(Debug, Clone)]
pub struct MarkdownDirectory {
    root: PathBuf,
}

impl MarkdownDirectory {
    /// Fails if `root` does not exist or is not a directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(SemError::Configuration(format!(
                "documents directory not found: {}",
                root.display()
            )));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn markdown_files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(target: "documents", error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
            .collect()
    }
}

impl DocumentSource for MarkdownDirectory {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let files = self.markdown_files();
        if files.is_empty() {
            return Err(SemError::Configuration(format!(
                "no markdown files found in {}",
                self.root.display()
            )));
        }

        let mut seen = HashSet::new();
        let mut documents = Vec::with_capacity(files.len());
        for path in &files {
            let raw = match std::fs::read_to_string(path) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(
                        target: "documents",
                        path = %path.display(),
                        error = %err,
                        "failed to load document, skipping"
                    );
                    continue;
                }
            };
            let document = parse_markdown(&raw, path);
            if !seen.insert(document.doc_id.clone()) {
                warn!(
                    target: "documents",
                    path = %path.display(),
                    doc_id = %document.doc_id,
                    "duplicate doc_id, skipping"
                );
                continue;
            }
            debug!(target: "documents", doc_id = %document.doc_id, "parsed document");
            documents.push(document);
        }

        if documents.is_empty() {
            return Err(SemError::Configuration(format!(
                "no loadable documents in {}",
                self.root.display()
            )));
        }
        info!(
            target: "documents",
            root = %self.root.display(),
            count = documents.len(),
            "loaded documents"
        );
        Ok(documents)
    }
}

/// Split frontmatter from body and resolve `doc_id`/`title`.
#[must_use]
pub fn parse_markdown(raw: &str, path: &Path) -> Document {
    let (doc_id, title, body) = match FRONTMATTER.captures(raw) {
        Some(caps) => {
            let frontmatter = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            (
                frontmatter_field(&DOC_ID_FIELD, frontmatter),
                frontmatter_field(&TITLE_FIELD, frontmatter),
                body.trim().to_string(),
            )
        }
        None => (None, None, raw.trim().to_string()),
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Document {
        doc_id: doc_id.unwrap_or_else(|| stem.clone()),
        title: title.unwrap_or_else(|| title_from_stem(&stem)),
        content: body,
    }
}

fn frontmatter_field(pattern: &Regex, frontmatter: &str) -> Option<String> {
    pattern
        .captures(frontmatter)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `expense_report-policy` -> `Expense Report Policy`
fn title_from_stem(stem: &str) -> String {
    stem.replace(['_', '-'], " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
