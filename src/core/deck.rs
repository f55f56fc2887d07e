//! Decks: the ordered list of sections a page is built from.

use thiserror::Error;

use super::section::SectionConfig;
use super::slide::SlideContent;

/// Heading shown on every slide unless overridden.
pub const DEFAULT_HEADING: &str = "🙂";

const CLASS_NAMES: &[&str] = &["one", "two", "three", "four", "five", "six", "seven"];

#[derive(Debug, Error, PartialEq)]
pub enum DeckError {
    #[error("deck has no sections")]
    Empty,
    #[error("section {}: `{value}` is not a number", .index + 1)]
    NotANumber { index: usize, value: String },
    #[error("section {}: height {value} must be a positive percentage", .index + 1)]
    NonPositive { index: usize, value: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub sections: Vec<SectionConfig>,
}

impl Default for Deck {
    /// Seven slides: one eight screens tall, one two screens tall, then five
    /// single screens.  The second slide carries the debug overlay.
    fn default() -> Self {
        let heights = [800.0, 200.0, 100.0, 100.0, 100.0, 100.0, 100.0];
        let mut deck = Self::from_ratios(&heights, DEFAULT_HEADING);
        deck.sections[1].debug = true;
        deck
    }
}

impl Deck {
    fn from_ratios(heights: &[f64], heading: &str) -> Self {
        let sections = heights
            .iter()
            .enumerate()
            .map(|(i, &ratio)| {
                SectionConfig::new(
                    class_name(i),
                    ratio,
                    SlideContent::new(heading, "content"),
                )
            })
            .collect();
        Self { sections }
    }

    /// Parse a comma separated list of height percentages, e.g. `"800,200,100"`.
    pub fn from_heights(list: &str, heading: &str) -> Result<Self, DeckError> {
        let mut heights = Vec::new();
        for part in list.split(',').map(str::trim) {
            if part.is_empty() {
                continue;
            }
            let index = heights.len();
            let value: f64 = part.parse().map_err(|_| DeckError::NotANumber {
                index,
                value: part.to_string(),
            })?;
            if !value.is_finite() || value <= 0.0 {
                return Err(DeckError::NonPositive { index, value });
            }
            heights.push(value);
        }
        if heights.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Self::from_ratios(&heights, heading))
    }

    /// Replace every slide heading.
    pub fn with_heading(mut self, heading: &str) -> Self {
        for section in &mut self.sections {
            section.content.text = heading.to_string();
        }
        self
    }

    /// Flag every section for the debug overlay.
    pub fn with_debug_all(mut self) -> Self {
        for section in &mut self.sections {
            section.debug = true;
        }
        self
    }
}

/// `one`, `two`, … `seven`, then `section-8`, `section-9`, …
fn class_name(index: usize) -> String {
    CLASS_NAMES
        .get(index)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("section-{}", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deck_matches_the_page() {
        let deck = Deck::default();
        let ratios: Vec<f64> = deck.sections.iter().map(|s| s.height_ratio).collect();
        assert_eq!(ratios, vec![800.0, 200.0, 100.0, 100.0, 100.0, 100.0, 100.0]);
        assert_eq!(deck.sections[0].class_name, "one");
        assert_eq!(deck.sections[6].class_name, "seven");
        assert!(deck.sections[1].debug);
        assert_eq!(deck.sections.iter().filter(|s| s.debug).count(), 1);
        assert!(deck.sections.iter().all(|s| s.content.text == DEFAULT_HEADING));
    }

    #[test]
    fn parses_height_list() {
        let deck = Deck::from_heights(" 300, 50 ,100,", "x").unwrap();
        assert_eq!(deck.sections.len(), 3);
        assert_eq!(deck.sections[1].height_ratio, 50.0);
        assert_eq!(deck.sections[2].content.text, "x");
    }

    #[test]
    fn long_decks_get_generated_class_names() {
        let deck = Deck::from_heights("1,1,1,1,1,1,1,1,1", "x").unwrap();
        assert_eq!(deck.sections[7].class_name, "section-8");
    }

    #[test]
    fn rejects_bad_heights() {
        assert_eq!(Deck::from_heights("", "x"), Err(DeckError::Empty));
        assert_eq!(Deck::from_heights(" , ", "x"), Err(DeckError::Empty));
        assert_eq!(
            Deck::from_heights("100,abc", "x"),
            Err(DeckError::NotANumber { index: 1, value: "abc".into() })
        );
        assert_eq!(
            Deck::from_heights("0", "x"),
            Err(DeckError::NonPositive { index: 0, value: 0.0 })
        );
        assert!(matches!(
            Deck::from_heights("100,-5", "x"),
            Err(DeckError::NonPositive { index: 1, .. })
        ));
        assert!(Deck::from_heights("inf", "x").is_err());
    }

    #[test]
    fn error_position_skips_empty_parts() {
        let err = Deck::from_heights("100,,abc", "x").unwrap_err();
        assert_eq!(err, DeckError::NotANumber { index: 1, value: "abc".into() });
        assert_eq!(err.to_string(), "section 2: `abc` is not a number");

        let err = Deck::from_heights(", 0", "x").unwrap_err();
        assert_eq!(err.to_string(), "section 1: height 0 must be a positive percentage");
    }

    #[test]
    fn heading_and_debug_overrides() {
        let deck = Deck::default().with_heading("Hello").with_debug_all();
        assert!(deck.sections.iter().all(|s| s.debug && s.content.text == "Hello"));
    }
}
