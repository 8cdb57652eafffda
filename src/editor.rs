use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use diffy::{DiffOptions, PatchFormatter};

use crate::error::BatchError;
use crate::operation::{apply, EditOperation};
use crate::slide_map::project;
use crate::state::StagedEdits;

#[derive(fieldwork::Fieldwork)]
#[fieldwork(get)]
pub struct DeckEditor {
    file_path: PathBuf,
    operations: Vec<EditOperation>,
    source: String,
}

impl DeckEditor {
    pub fn new(file_path: PathBuf, operations: Vec<EditOperation>) -> Result<Self> {
        if operations.is_empty() {
            return Err(anyhow!("`operations` cannot be empty"));
        }

        let source = std::fs::read_to_string(&file_path)
            .map_err(|e| anyhow!("could not read {}: {e}", file_path.display()))?;

        Ok(Self {
            file_path,
            operations,
            source,
        })
    }

    pub fn from_staged(staged: StagedEdits) -> Result<Self> {
        let StagedEdits {
            file_path,
            operations,
        } = staged;
        Self::new(file_path, operations)
    }

    fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.display().to_string())
    }

    fn listing(&self) -> String {
        self.operations
            .iter()
            .enumerate()
            .map(|(position, operation)| format!("  {}. {operation}\n", position + 1))
            .collect()
    }

    /// Run the batch in memory. Stages it only if every edit applies.
    pub fn preview(self) -> Result<(String, Option<StagedEdits>)> {
        match apply(&self.source, &self.operations) {
            Ok(output) => {
                let mut preview = format!(
                    "STAGED: {} edit{} to {}\n{}\n",
                    self.operations.len(),
                    plural(self.operations.len()),
                    self.file_name(),
                    self.listing()
                );
                preview.push_str(&self.diff(&output));
                preview.push_str("\n\n");
                preview.push_str(&slide_listing(&output));
                Ok((preview, Some(self.into())))
            }

            Err(error) => Ok((
                format!(
                    "{}\nNothing was staged. Each slide index refers to the deck as left by the \
                     edits before it; use slide_map to check the current numbering.",
                    failure_note(&error)
                ),
                None,
            )),
        }
    }

    /// Apply the batch. On a partial failure the output holds the edits that succeeded.
    pub fn commit(self) -> Result<(String, Option<String>, PathBuf)> {
        let file_name = self.file_name();
        let total = self.operations.len();

        let (message, output) = match apply(&self.source, &self.operations) {
            Ok(output) => {
                log::info!("applied {total} edits to {}", self.file_path.display());
                let message = format!(
                    "Applied {total} edit{} to {file_name}:\n{}\n{}\n\n{}",
                    plural(total),
                    self.listing(),
                    self.diff(&output),
                    slide_listing(&output)
                );
                (message, Some(output))
            }

            Err(error) if error.applied() == 0 => (
                format!("No edits applied to {file_name}.\n{}", failure_note(&error)),
                None,
            ),

            Err(error) => {
                let output = error.partial_html.clone();
                let message = format!(
                    "Applied {} of {total} edits to {file_name} before a failure.\n{}\n\n{}\n\n{}",
                    error.applied(),
                    failure_note(&error),
                    self.diff(&output),
                    slide_listing(&output)
                );
                (message, Some(output))
            }
        };

        Ok((message, output, self.file_path))
    }

    fn diff(&self, output: &str) -> String {
        let patch = DiffOptions::new().create_patch(&self.source, output);
        let formatter = PatchFormatter::new().missing_newline_message(false);
        let diff_output = formatter.fmt_patch(&patch).to_string();

        let mut cleaned_diff = String::from("===DIFF===\n");
        for line in diff_output.lines() {
            // hunk and file headers carry no information for the reader
            if line.starts_with("---") || line.starts_with("+++") || line.starts_with("@@") {
                continue;
            }
            cleaned_diff.push_str(line);
            cleaned_diff.push('\n');
        }

        if cleaned_diff.ends_with('\n') {
            cleaned_diff.pop();
        }
        cleaned_diff
    }
}

impl From<DeckEditor> for StagedEdits {
    fn from(value: DeckEditor) -> Self {
        let DeckEditor {
            file_path,
            operations,
            ..
        } = value;
        Self {
            file_path,
            operations,
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn failure_note(error: &BatchError) -> String {
    format!(
        "Edit {} of {} ({}) failed: {}\n{} of {} edit{} applied.",
        error.failed_at + 1,
        error.total,
        error.operation,
        error.source,
        error.applied(),
        error.total,
        plural(error.total)
    )
}

/// One line per slide of `html`, as the slide map sees it.
pub fn slide_listing(html: &str) -> String {
    let entries = project(html);
    let mut listing = format!("===SLIDES ({})===", entries.len());
    for entry in entries {
        let kind: &'static str = entry.slide_type.into();
        let _ = write!(listing, "\n{:>3}  {kind:<8} {}", entry.index, entry.heading);
    }
    listing
}
