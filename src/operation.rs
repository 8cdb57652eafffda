use std::fmt::{self, Display, Formatter};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::deck::{locate, SlideInfo};
use crate::error::{BatchError, DeckError};

/// Separator placed between an inserted slide and its neighbour.
const SLIDE_GAP: &str = "\n\n";

/// A single targeted edit to a deck.
///
/// Slide indices refer to the deck as it stands when this operation runs, after every
/// earlier operation in the same batch has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditOperation {
    /// Replace every literal occurrence of `search` with `replace`.
    /// An empty `search` leaves the document unchanged.
    #[serde(rename_all = "camelCase")]
    SearchReplace { search: String, replace: String },

    /// Replace the whole `<section>` of one slide with `new_html`.
    #[serde(rename_all = "camelCase")]
    ReplaceSlide { slide_index: i64, new_html: String },

    /// Insert `html` after the slide at `after_index`, or before the first slide when
    /// `after_index` is -1.
    #[serde(rename_all = "camelCase")]
    InsertSlide { after_index: i64, html: String },

    /// Remove one slide and the whitespace that trails it.
    #[serde(rename_all = "camelCase")]
    DeleteSlide { slide_index: i64 },
}

impl EditOperation {
    pub fn search_replace(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self::SearchReplace {
            search: search.into(),
            replace: replace.into(),
        }
    }

    pub fn replace_slide(slide_index: i64, new_html: impl Into<String>) -> Self {
        Self::ReplaceSlide {
            slide_index,
            new_html: new_html.into(),
        }
    }

    pub fn insert_slide(after_index: i64, html: impl Into<String>) -> Self {
        Self::InsertSlide {
            after_index,
            html: html.into(),
        }
    }

    pub fn delete_slide(slide_index: i64) -> Self {
        Self::DeleteSlide { slide_index }
    }

    pub fn operation_name(&self) -> &'static str {
        match self {
            EditOperation::SearchReplace { .. } => "search and replace",
            EditOperation::ReplaceSlide { .. } => "replace slide",
            EditOperation::InsertSlide { .. } => "insert slide",
            EditOperation::DeleteSlide { .. } => "delete slide",
        }
    }

    /// Apply this operation to `html`, returning the edited document.
    pub fn apply_to(&self, html: &str) -> Result<String, DeckError> {
        match self {
            EditOperation::SearchReplace { search, replace } => {
                if search.is_empty() {
                    Ok(html.to_string())
                } else {
                    Ok(html.replace(search.as_str(), replace))
                }
            }

            EditOperation::ReplaceSlide {
                slide_index,
                new_html,
            } => {
                let slides = locate(html);
                let slide = target_slide(&slides, *slide_index)?;
                Ok(splice(html, slide.start_offset, slide.end_offset, new_html))
            }

            EditOperation::InsertSlide { after_index, html: new_slide } => {
                let slides = locate(html);
                match *after_index {
                    -1 => {
                        let first = slides.first().ok_or(DeckError::EmptyDeckInsertBefore)?;
                        let inserted = format!("{new_slide}{SLIDE_GAP}");
                        Ok(splice(html, first.start_offset, first.start_offset, &inserted))
                    }
                    index => {
                        let slide = usize::try_from(index)
                            .ok()
                            .and_then(|i| slides.get(i))
                            .ok_or_else(|| DeckError::out_of_range(index, -1, slides.len()))?;
                        let inserted = format!("{SLIDE_GAP}{new_slide}");
                        Ok(splice(html, slide.end_offset, slide.end_offset, &inserted))
                    }
                }
            }

            EditOperation::DeleteSlide { slide_index } => {
                let slides = locate(html);
                let slide = target_slide(&slides, *slide_index)?;
                let trailing = html[slide.end_offset..]
                    .bytes()
                    .take_while(|byte| matches!(byte, b'\n' | b'\r' | b' '))
                    .count();
                Ok(splice(
                    html,
                    slide.start_offset,
                    slide.end_offset + trailing,
                    "",
                ))
            }
        }
    }
}

impl Display for EditOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EditOperation::SearchReplace { search, .. } => {
                write!(f, "{} {search:?}", self.operation_name())
            }
            EditOperation::ReplaceSlide { slide_index, .. }
            | EditOperation::DeleteSlide { slide_index } => {
                write!(f, "{} {slide_index}", self.operation_name())
            }
            EditOperation::InsertSlide { after_index: -1, .. } => {
                f.write_str("insert slide before the first slide")
            }
            EditOperation::InsertSlide { after_index, .. } => {
                write!(f, "insert slide after slide {after_index}")
            }
        }
    }
}

fn target_slide(slides: &[SlideInfo], slide_index: i64) -> Result<&SlideInfo, DeckError> {
    usize::try_from(slide_index)
        .ok()
        .and_then(|index| slides.get(index))
        .ok_or_else(|| DeckError::out_of_range(slide_index, 0, slides.len()))
}

fn splice(html: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut output = String::with_capacity(html.len() - (end - start) + replacement.len());
    output.push_str(&html[..start]);
    output.push_str(replacement);
    output.push_str(&html[end..]);
    output
}

/// Apply `operations` to `html` strictly in order.
///
/// Each operation sees the document produced by the one before it. The first failure stops
/// the batch; the returned [`BatchError`] keeps the document as the successful operations
/// left it.
pub fn apply(html: &str, operations: &[EditOperation]) -> Result<String, BatchError> {
    let mut document = html.to_string();

    for (position, operation) in operations.iter().enumerate() {
        match operation.apply_to(&document) {
            Ok(edited) => {
                log::debug!(
                    "applied {operation} ({} -> {} bytes)",
                    document.len(),
                    edited.len()
                );
                document = edited;
            }
            Err(source) => {
                log::warn!(
                    "edit {} of {} ({operation}) failed: {source}",
                    position + 1,
                    operations.len()
                );
                return Err(BatchError {
                    failed_at: position,
                    total: operations.len(),
                    operation: operation.to_string(),
                    partial_html: document,
                    source,
                });
            }
        }
    }

    Ok(document)
}
