//! URL and file name construction for one identifier

use crate::config::{FetchConfig, OutputConfig};
use crate::source::Identifier;

/// Placeholder filled with the identifier in URL templates
pub const URL_SLOT: &str = "{}";

const FILE_EXTENSION: &str = "pdf";

/// One unit of work: fetch `url`, store as `file_name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub identifier: Identifier,
    pub url: String,
    pub file_name: String,
}

/// Builds tasks from identifiers
#[derive(Debug, Clone)]
pub struct TaskTemplate {
    url_template: String,
    file_prefix: String,
}

impl TaskTemplate {
    pub fn new(url_template: impl Into<String>, file_prefix: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            file_prefix: file_prefix.into(),
        }
    }

    pub fn from_config(fetch: &FetchConfig, output: &OutputConfig) -> Self {
        Self::new(&fetch.url_template, &output.file_prefix)
    }

    pub fn url_for(&self, identifier: &Identifier) -> String {
        self.url_template.replace(URL_SLOT, identifier.as_str())
    }

    pub fn file_name_for(&self, identifier: &Identifier) -> String {
        sanitize_file_name(&format!(
            "{}_{}.{}",
            self.file_prefix, identifier, FILE_EXTENSION
        ))
    }

    pub fn task_for(&self, identifier: Identifier) -> FetchTask {
        FetchTask {
            url: self.url_for(&identifier),
            file_name: self.file_name_for(&identifier),
            identifier,
        }
    }

    /// Plan tasks in input order
    pub fn plan(&self, identifiers: impl IntoIterator<Item = Identifier>) -> Vec<FetchTask> {
        identifiers.into_iter().map(|id| self.task_for(id)).collect()
    }
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
