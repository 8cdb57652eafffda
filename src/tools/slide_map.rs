use crate::slide_map::project;
use crate::state::SlideEditTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Summarize the slides of a deck as `{index, type, heading}` entries.
/// Use the indices from this map in `stage_edits` operations.
#[derive(Serialize, Deserialize, Debug, schemars::JsonSchema)]
#[serde(rename = "slide_map")]
pub struct SlideMap {
    /// Path to the HTML deck.
    /// If a context has been set, this can be relative to it.
    pub file_path: String,
}

impl WithExamples for SlideMap {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Map the slides of a deck",
            item: Self {
                file_path: "deck.html".into(),
            },
        }])
    }
}

impl Tool<SlideEditTools> for SlideMap {
    fn execute(self, state: &mut SlideEditTools) -> Result<String> {
        let file_path = state.resolve_path(&self.file_path)?;
        let html = std::fs::read_to_string(&file_path)?;
        Ok(serde_json::to_string_pretty(&project(&html))?)
    }
}
