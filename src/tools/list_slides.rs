use crate::deck::locate;
use crate::state::SlideEditTools;
use crate::traits::{Tool, WithExamples};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// List the slides of a deck with their class attribute, heading and byte offsets
#[derive(Serialize, Deserialize, Debug, schemars::JsonSchema)]
#[serde(rename = "list_slides")]
pub struct ListSlides {
    /// Path to the HTML deck.
    /// If a context has been set, this can be relative to it.
    pub file_path: String,
}

impl WithExamples for ListSlides {}

impl Tool<SlideEditTools> for ListSlides {
    fn execute(self, state: &mut SlideEditTools) -> Result<String> {
        let file_path = state.resolve_path(&self.file_path)?;
        let html = std::fs::read_to_string(&file_path)?;
        let slides = locate(&html);
        log::debug!("{} slides in {}", slides.len(), file_path.display());
        Ok(serde_json::to_string_pretty(&slides)?)
    }
}
