//! Semantic key classes and the per-class press tally

use super::{KeyId, NamedKey};

/// Characters counted as punctuation
pub const PUNCTUATION: &str = "!@#$%^&*()_+-=[]{}|;:'\",.<>?/";

/// Semantic class of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Delete,
    Enter,
    Letter,
    Number,
    Arrow,
    Tab,
    Spacebar,
    Function,
    Uppercase,
    Punctuation,
    Special,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 11] = [
        Self::Delete,
        Self::Enter,
        Self::Letter,
        Self::Number,
        Self::Arrow,
        Self::Tab,
        Self::Spacebar,
        Self::Function,
        Self::Uppercase,
        Self::Punctuation,
        Self::Special,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Enter => "enter",
            Self::Letter => "letter",
            Self::Number => "number",
            Self::Arrow => "arrow",
            Self::Tab => "tab",
            Self::Spacebar => "spacebar",
            Self::Function => "function",
            Self::Uppercase => "uppercase",
            Self::Punctuation => "punctuation",
            Self::Special => "special",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Delete => 0,
            Self::Enter => 1,
            Self::Letter => 2,
            Self::Number => 3,
            Self::Arrow => 4,
            Self::Tab => 5,
            Self::Spacebar => 6,
            Self::Function => 7,
            Self::Uppercase => 8,
            Self::Punctuation => 9,
            Self::Special => 10,
        }
    }
}

/// Classify a key. Total: anything unrecognized is `Special`.
pub fn categorize(key: &KeyId) -> Category {
    match key {
        KeyId::Named(named) => categorize_named(named),
        KeyId::Char(c) => categorize_char(*c),
    }
}

fn categorize_named(key: &NamedKey) -> Category {
    match key {
        NamedKey::Backspace | NamedKey::Delete => Category::Delete,
        NamedKey::Enter => Category::Enter,
        NamedKey::Tab => Category::Tab,
        NamedKey::Space => Category::Spacebar,
        k if k.is_arrow() => Category::Arrow,
        k if k.is_modifier() => Category::Function,
        _ => Category::Special,
    }
}

fn categorize_char(c: char) -> Category {
    match c {
        '\u{8}' | '\u{7f}' => Category::Delete,
        '\n' | '\r' => Category::Enter,
        '\t' => Category::Tab,
        ' ' => Category::Spacebar,
        c if c.is_alphabetic() => {
            if c.is_uppercase() {
                Category::Uppercase
            } else {
                Category::Letter
            }
        }
        c if c.is_ascii_digit() => Category::Number,
        c if PUNCTUATION.contains(c) => Category::Punctuation,
        _ => Category::Special,
    }
}

/// Running press count per category. Only ever increments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    counts: [u64; 11],
}

impl CategoryTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    pub fn get(&self, category: Category) -> u64 {
        self.counts[category.index()]
    }

    /// Sum over all categories (equals the number of presses seen)
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Counts in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}
