mod commit_staged;
mod list_slides;
mod set_context;
mod slide_map;
mod stage_edits;

pub use commit_staged::CommitStaged;
pub use list_slides::ListSlides;
pub use set_context::SetContext;
pub use slide_map::SlideMap;
pub use stage_edits::StageEdits;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::state::SlideEditTools;
use crate::traits::{AsToolSchema, Tool};
use crate::types::ToolSchema;

/// A `tools/call` request, keyed by tool name
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum Tools {
    SetContext(SetContext),
    SlideMap(SlideMap),
    ListSlides(ListSlides),
    StageEdits(StageEdits),
    CommitStaged(CommitStaged),
}

impl Tools {
    pub fn schema() -> Vec<ToolSchema> {
        vec![
            SetContext::as_tool_schema(),
            SlideMap::as_tool_schema(),
            ListSlides::as_tool_schema(),
            StageEdits::as_tool_schema(),
            CommitStaged::as_tool_schema(),
        ]
    }

    pub fn execute(self, state: &mut SlideEditTools) -> Result<String> {
        log::trace!("{self:?}");
        match self {
            Tools::SetContext(tool) => tool.execute(state),
            Tools::SlideMap(tool) => tool.execute(state),
            Tools::ListSlides(tool) => tool.execute(state),
            Tools::StageEdits(tool) => tool.execute(state),
            Tools::CommitStaged(tool) => tool.execute(state),
        }
    }
}
