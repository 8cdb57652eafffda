#![allow(clippy::collapsible_if)]
#![deny(dead_code)]

pub mod deck;
pub mod editor;
pub mod error;
pub mod operation;
pub mod session;
pub mod slide_map;
pub mod state;
pub mod tools;
pub mod traits;
pub mod types;

pub use deck::{locate, SlideInfo};
pub use error::{BatchError, DeckError};
pub use operation::{apply, EditOperation};
pub use slide_map::{project, SlideMapEntry, SlideType};
