//! Featured tours carousel
//!
//! Pure position arithmetic for the home page carousel: three cards are
//! visible at a time and at most twelve tours are ever displayed.

use serde::Serialize;
use std::ops::Range;
use std::time::Duration;

/// Cards visible at once
pub const VISIBLE_SLIDES: usize = 3;

/// Tours taken from the catalog for the carousel
pub const MAX_DISPLAYED: usize = 12;

/// Delay between automatic advances
pub const AUTO_ADVANCE_INTERVAL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Carousel {
    displayed: usize,
    current: usize,
}

impl Carousel {
    /// Carousel over the first [`MAX_DISPLAYED`] of `total_tours`
    pub fn new(total_tours: usize) -> Self {
        Self {
            displayed: total_tours.min(MAX_DISPLAYED),
            current: 0,
        }
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Navigation controls and auto-advance only apply past one screenful
    pub fn has_controls(&self) -> bool {
        self.displayed > VISIBLE_SLIDES
    }

    /// Highest index the first visible card can take
    pub fn last_start(&self) -> usize {
        self.displayed.saturating_sub(VISIBLE_SLIDES)
    }

    pub fn can_go_prev(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.last_start()
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1).min(self.last_start());
    }

    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Jump to a dot, clamped to the last start position
    pub fn go_to(&mut self, index: usize) {
        self.current = index.min(self.last_start());
    }

    /// Timer tick: step forward, wrapping to the start after the last position
    pub fn auto_advance(&mut self) {
        if !self.has_controls() {
            return;
        }
        if self.current >= self.last_start() {
            self.current = 0;
        } else {
            self.current += 1;
        }
    }

    pub fn dot_count(&self) -> usize {
        self.displayed.saturating_sub(2).max(1)
    }

    /// Fraction of the track scrolled, in `(0, 1]`
    pub fn progress(&self) -> f64 {
        (self.current + 1) as f64 / self.dot_count() as f64
    }

    /// Horizontal translation of the track as a percentage
    pub fn offset_percent(&self) -> f64 {
        self.current as f64 * 100.0 / VISIBLE_SLIDES as f64
    }

    pub fn position_label(&self) -> String {
        format!("Tour {} of {}", self.current + 1, self.dot_count())
    }

    /// Indices of the cards currently on screen
    pub fn visible_range(&self) -> Range<usize> {
        self.current..(self.current + VISIBLE_SLIDES).min(self.displayed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_navigation_clamps() {
        let mut carousel = Carousel::new(6);
        assert!(carousel.has_controls());
        assert!(!carousel.can_go_prev());

        carousel.prev();
        assert_eq!(carousel.current(), 0);

        for _ in 0..10 {
            carousel.next();
        }
        assert_eq!(carousel.current(), 3);
        assert!(!carousel.can_go_next());
        assert_eq!(carousel.visible_range(), 3..6);
    }

    #[test]
    fn test_auto_advance_wraps() {
        let mut carousel = Carousel::new(5);
        carousel.auto_advance();
        carousel.auto_advance();
        assert_eq!(carousel.current(), 2);
        carousel.auto_advance();
        assert_eq!(carousel.current(), 0);
    }

    #[test]
    fn test_small_catalog_has_no_controls() {
        let mut carousel = Carousel::new(3);
        assert!(!carousel.has_controls());
        carousel.auto_advance();
        carousel.next();
        assert_eq!(carousel.current(), 0);
        assert_eq!(carousel.dot_count(), 1);
        assert_eq!(carousel.progress(), 1.0);
        assert_eq!(carousel.visible_range(), 0..3);

        let empty = Carousel::new(0);
        assert_eq!(empty.dot_count(), 1);
        assert_eq!(empty.visible_range(), 0..0);
    }

    #[test]
    fn test_caps_displayed_tours() {
        let mut carousel = Carousel::new(20);
        assert_eq!(carousel.displayed(), MAX_DISPLAYED);
        assert_eq!(carousel.dot_count(), 10);

        carousel.go_to(50);
        assert_eq!(carousel.current(), 9);
        assert_eq!(carousel.position_label(), "Tour 10 of 10");
        assert_eq!(carousel.progress(), 1.0);
        assert_eq!(carousel.offset_percent(), 300.0);
    }

    #[test]
    fn test_position_label() {
        let mut carousel = Carousel::new(5);
        carousel.next();
        assert_eq!(carousel.position_label(), "Tour 2 of 3");
        assert!((carousel.offset_percent() - 100.0 / 3.0).abs() < f64::EPSILON);
    }
}
