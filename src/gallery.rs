//! Carousel, lightbox and FAQ accordion state.
//!
//! Pages are rendered on the server, so this state arrives with the request
//! (query string) and leaves as data attributes for the frontend script.

use crate::content::{self, GalleryImage, SliderImage};
use serde::Serialize;

pub const HERO_AUTOPLAY_MS: u64 = 5000;
pub const DESTINATIONS_AUTOPLAY_MS: u64 = 5000;
pub const GALLERY_AUTOPLAY_MS: u64 = 3000;
pub const REVIEWS_AUTOPLAY_MS: u64 = 5000;

/// A looping slideshow position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Carousel {
    pub len: usize,
    pub index: usize,
    pub autoplay_ms: u64,
}

impl Carousel {
    pub fn new(len: usize, autoplay_ms: u64) -> Self {
        Self { len, index: 0, autoplay_ms }
    }

    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn previous(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    /// Out-of-range targets land on the last slide.
    pub fn go_to(&mut self, index: usize) -> usize {
        self.index = index.min(self.len.saturating_sub(1));
        self.index
    }
}

/// The modal view over a gallery image and its related slides.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lightbox {
    selected: Option<&'static GalleryImage>,
}

impl Lightbox {
    /// Opens the image with `id`. Unknown ids leave the lightbox closed.
    pub fn open(&mut self, id: &str) -> bool {
        self.selected = content::gallery_image(id);
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&'static GalleryImage> {
        self.selected
    }

    pub fn slides(&self) -> &'static [SliderImage] {
        match self.selected {
            Some(image) => &image.related,
            None => &[],
        }
    }
}

/// At most one entry is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaqAccordion {
    open: Option<usize>,
}

impl FaqAccordion {
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        self.open = if self.open == Some(index) { None } else { Some(index) };
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carousel_wraps_both_ways() {
        let mut carousel = Carousel::new(3, HERO_AUTOPLAY_MS);
        assert_eq!(carousel.previous(), 2);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.next(), 1);
        assert_eq!(carousel.next(), 2);
        assert_eq!(carousel.next(), 0);
    }

    #[test]
    fn test_carousel_go_to_clamps() {
        let mut carousel = Carousel::new(4, GALLERY_AUTOPLAY_MS);
        assert_eq!(carousel.go_to(2), 2);
        assert_eq!(carousel.go_to(40), 3);
    }

    #[test]
    fn test_empty_carousel_stays_put() {
        let mut carousel = Carousel::new(0, REVIEWS_AUTOPLAY_MS);
        assert_eq!(carousel.len, 0);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.previous(), 0);
        assert_eq!(carousel.go_to(5), 0);
    }

    #[test]
    fn test_lightbox_open() {
        let mut lightbox = Lightbox::default();
        assert!(lightbox.selected().is_none());
        assert!(lightbox.slides().is_empty());

        assert!(lightbox.open("2"));
        assert_eq!(lightbox.selected().map(|i| i.title), Some("Sossusvlei Dunes"));
        assert_eq!(lightbox.slides().len(), 3);
        assert_eq!(lightbox.slides()[0].id, "2-1");
    }

    #[test]
    fn test_lightbox_ignores_unknown_images() {
        let mut lightbox = Lightbox::default();
        lightbox.open("1");
        assert!(!lightbox.open("nope"));
        assert!(lightbox.selected().is_none());
    }

    #[test]
    fn test_faq_accordion_keeps_one_entry_open() {
        let mut faq = FaqAccordion::default();
        assert_eq!(faq.toggle(1), Some(1));
        assert_eq!(faq.toggle(3), Some(3));
        assert!(!faq.is_open(1));
        assert_eq!(faq.toggle(3), None);
        assert!(!faq.is_open(3));
    }
}
