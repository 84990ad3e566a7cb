//! Keyboard event handling and key classification

mod category;
mod event;
pub mod keymap;

pub use category::{categorize, Category, CategoryTally, PUNCTUATION};
pub use event::{KeyEvent, KeyEventType, KeyTracker, KeyboardListener};
pub use keymap::{key_id_for, KeyId, NamedKey};
