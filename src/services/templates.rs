use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Reads onboarding document templates from a directory, keyed by document
/// title.
#[derive(Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn read(&self, title: &str) -> Result<String> {
        let path = self.dir.join(format!("{}.md", slugify(title)));
        fs::read_to_string(&path)
            .with_context(|| format!("reading onboarding template {}", path.display()))
    }
}

fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
