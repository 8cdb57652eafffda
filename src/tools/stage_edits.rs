use crate::editor::DeckEditor;
use crate::operation::EditOperation;
use crate::state::SlideEditTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stage a batch of slide edits and preview the resulting diff.
/// Edits run in order, and each slide index refers to the deck as the previous edits left it.
/// Nothing is written until `commit_staged`.
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "stage_edits")]
pub struct StageEdits {
    /// Path to the HTML deck.
    /// If a context has been set, this can be relative to it.
    pub file_path: String,

    /// Edits to apply, in order
    pub operations: Vec<EditOperation>,
}

impl WithExamples for StageEdits {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![
            Example {
                description: "Fix a typo everywhere in the deck",
                item: Self {
                    file_path: "deck.html".into(),
                    operations: vec![EditOperation::search_replace("Recieve", "Receive")],
                },
            },
            Example {
                description: "Rewrite the third slide",
                item: Self {
                    file_path: "deck.html".into(),
                    operations: vec![EditOperation::replace_slide(
                        2,
                        r#"<section class="slide"><h2>Roadmap</h2><ul><li>Q3: beta</li></ul></section>"#,
                    )],
                },
            },
            Example {
                description: "Add a cover slide, then drop what was the last of four slides",
                item: Self {
                    file_path: "deck.html".into(),
                    operations: vec![
                        EditOperation::insert_slide(
                            -1,
                            r#"<section class="slide title-slide"><h1>Welcome</h1></section>"#,
                        ),
                        EditOperation::delete_slide(4),
                    ],
                },
            },
        ])
    }
}

impl Tool<SlideEditTools> for StageEdits {
    fn execute(self, state: &mut SlideEditTools) -> Result<String> {
        let Self {
            file_path,
            operations,
        } = self;

        let file_path = state.resolve_path(&file_path)?;
        let editor = DeckEditor::new(file_path, operations)?;
        let (message, staged) = editor.preview()?;
        if staged.is_some() {
            state.stage(staged)?;
        }

        Ok(message)
    }
}
