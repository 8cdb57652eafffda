use thiserror::Error;

/// Structural failure of a single edit operation against the current deck.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("{}", out_of_range_message(.index, .min, .max, .slide_count))]
    OutOfRangeIndex {
        index: i64,
        min: i64,
        max: i64,
        slide_count: usize,
    },

    #[error("cannot insert before the first slide: the deck has no slides")]
    EmptyDeckInsertBefore,
}

fn out_of_range_message(index: &i64, min: &i64, max: &i64, slide_count: &usize) -> String {
    if *slide_count == 0 {
        format!("slide index {index} is out of range: the deck has no slides")
    } else {
        format!(
            "slide index {index} is out of range (valid range: {min} to {max}, deck has {slide_count} slide{})",
            if *slide_count == 1 { "" } else { "s" }
        )
    }
}

impl DeckError {
    pub(crate) fn out_of_range(index: i64, min: i64, slide_count: usize) -> Self {
        Self::OutOfRangeIndex {
            index,
            min,
            max: slide_count as i64 - 1,
            slide_count,
        }
    }
}

/// A batch stopped at `failed_at`. Operations before it stay applied in `partial_html`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("edit {position} of {total} ({operation}) failed: {source}", position = .failed_at + 1)]
pub struct BatchError {
    pub failed_at: usize,
    pub total: usize,
    pub operation: String,
    pub partial_html: String,
    #[source]
    pub source: DeckError,
}

impl BatchError {
    /// Number of operations that were applied before the failure.
    pub fn applied(&self) -> usize {
        self.failed_at
    }
}
