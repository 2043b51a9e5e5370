use std::path::PathBuf;

use tempfile::TempDir;

/// Test fixture providing isolated filesystem environment.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {data_path:?}");

        Self {
            temp_dir,
            data_path,
        }
    }

    /// Create a test file with content.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    /// Create `documents/<file_name>` with a frontmatter block.
    pub fn create_document(&self, file_name: &str, doc_id: &str, title: &str, body: &str) -> PathBuf {
        self.create_file(
            &format!("documents/{file_name}"),
            &format!("---\ndoc_id: {doc_id}\ntitle: {title}\n---\n{body}\n"),
        )
    }

    /// Create `concepts.yaml` with the given YAML body.
    pub fn create_concepts(&self, yaml: &str) -> PathBuf {
        self.create_file("concepts.yaml", yaml)
    }

    #[must_use]
    pub fn documents_dir(&self) -> PathBuf {
        self.data_path.join("documents")
    }
}

impl Drop for UnitTestFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.data_path);
    }
}
