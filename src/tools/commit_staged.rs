use crate::editor::DeckEditor;
use crate::state::SlideEditTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Apply the currently staged edits and write the deck
#[derive(Serialize, Deserialize, Debug, schemars::JsonSchema)]
#[serde(rename = "commit_staged")]
pub struct CommitStaged {
    /// Confirm that you want to apply the staged edits
    #[serde(default = "default_acknowledge")]
    pub acknowledge: bool,
}

fn default_acknowledge() -> bool {
    true
}

impl WithExamples for CommitStaged {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Commit the currently staged edits",
            item: Self { acknowledge: true },
        }])
    }
}

impl Tool<SlideEditTools> for CommitStaged {
    fn execute(self, state: &mut SlideEditTools) -> Result<String> {
        if !self.acknowledge {
            return Err(anyhow!("Edits not acknowledged"));
        }

        let staged = state
            .take_staged()?
            .ok_or_else(|| anyhow!("No edits are currently staged"))?;

        let editor = DeckEditor::from_staged(staged)?;
        let (message, output, output_path) = editor.commit()?;

        if let Some(output) = output {
            state.write_output(output_path, output)?;
        }

        Ok(message)
    }
}
