use std::path::PathBuf;

use crate::state::SlideEditTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Set the working directory that relative deck paths resolve against
#[derive(Serialize, Deserialize, Debug, schemars::JsonSchema)]
#[serde(rename = "set_context")]
pub struct SetContext {
    /// Directory path to set as context.
    /// Subsequent to calling this, any relative paths will be relative to this directory
    path: String,
}

impl WithExamples for SetContext {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "setting context to a folder of presentations",
            item: Self {
                path: "~/talks/2024-q3".into(),
            },
        }])
    }
}

impl Tool<SlideEditTools> for SetContext {
    fn execute(self, state: &mut SlideEditTools) -> Result<String> {
        let Self { path } = self;
        let path = PathBuf::from(&*shellexpand::tilde(&path));
        if !path.is_dir() {
            return Err(anyhow!("{} is not a directory", path.display()));
        }
        let response = format!("Set context to {}.\n", path.display());
        state.set_context(path)?;
        Ok(response)
    }
}
