//! What the page templates see: site content, slideshow positions and the
//! visitor's booking wizard, flattened into one serializable context.

use crate::booking::model::{Budget, Choice, Destination, FlightClass, TripDuration};
use crate::booking::{Motive, Step, StepGating};
use crate::config::Config;
use crate::content::{
    self, DestinationProfile, FaqEntry, GalleryImage, HeroSlide, NavLink, Review, Service, SiteInfo, SliderImage,
    TeamMember,
};
use crate::gallery::{self, Carousel, FaqAccordion, Lightbox};
use crate::session::{Notice, WizardSnapshot};
use crate::static_assets;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings that shape every rendered page.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub gating: StepGating,
    pub static_prefix: String,
}

impl SiteSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            gating: config.booking.step_gating,
            static_prefix: config.static_url_prefix().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Transient UI state carried in the query string. Unparseable values are
/// treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub image: Option<String>,
    pub slide: Option<String>,
    pub faq: Option<String>,
    pub destination: Option<String>,
}

fn parse_index(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|raw| raw.trim().parse().ok())
}

impl PageQuery {
    fn faq_index(&self) -> Option<usize> {
        parse_index(self.faq.as_deref())
    }

    fn slide_index(&self) -> Option<usize> {
        parse_index(self.slide.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct Slideshow<T: 'static> {
    pub carousel: Carousel,
    pub items: &'static [T],
}

impl<T> Slideshow<T> {
    fn new(items: &'static [T], autoplay_ms: u64) -> Self {
        Self {
            carousel: Carousel::new(items.len(), autoplay_ms),
            items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LightboxView {
    pub image: &'static GalleryImage,
    pub slides: &'static [SliderImage],
    pub carousel: Carousel,
    /// Links that step the slideshow when scripts are off.
    pub previous_href: String,
    pub next_href: String,
}

impl LightboxView {
    fn build(lightbox: &Lightbox, slide: Option<usize>) -> Option<Self> {
        let image = lightbox.selected()?;
        let slides = lightbox.slides();
        let mut carousel = Carousel::new(slides.len(), gallery::GALLERY_AUTOPLAY_MS);
        if let Some(slide) = slide {
            carousel.go_to(slide);
        }
        let href = |index: usize| format!("/?image={}&slide={}#gallery", image.id, index);
        let (mut back, mut forward) = (carousel, carousel);
        Some(LightboxView {
            image,
            slides,
            previous_href: href(back.previous()),
            next_href: href(forward.next()),
            carousel,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct FaqView {
    pub question: &'static str,
    pub answer: &'static str,
    pub open: bool,
    /// Where the question links to: opens this entry, or closes it when open.
    pub href: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn options<T: Choice>(is_selected: impl Fn(T) -> bool) -> Vec<OptionView> {
    T::ALL
        .iter()
        .map(|&choice| OptionView {
            value: choice.token(),
            label: choice.label(),
            selected: is_selected(choice),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct StepView {
    pub number: u8,
    pub title: &'static str,
    pub reached: bool,
}

#[derive(Debug, Serialize)]
pub struct BookingView {
    pub step: u8,
    pub title: &'static str,
    pub steps: Vec<StepView>,
    pub values: serde_json::Value,
    pub destinations: Vec<OptionView>,
    pub durations: Vec<OptionView>,
    pub flight_classes: Vec<OptionView>,
    pub budgets: Vec<OptionView>,
    pub motives: Vec<OptionView>,
    /// First message per field, keyed by form input name.
    pub errors: BTreeMap<&'static str, String>,
    pub error_list: Vec<String>,
    pub can_retreat: bool,
    pub is_final: bool,
    pub strict: bool,
    pub notice: Option<Notice>,
}

impl BookingView {
    pub fn build(snapshot: &WizardSnapshot, gating: StepGating) -> Self {
        let wizard = &snapshot.wizard;
        let request = wizard.request();
        let current = wizard.step();

        let mut errors = BTreeMap::new();
        for error in &snapshot.errors {
            errors.entry(error.field.form_name()).or_insert_with(|| error.to_string());
        }

        BookingView {
            step: current.number(),
            title: current.title(),
            steps: Step::ALL
                .iter()
                .map(|step| StepView {
                    number: step.number(),
                    title: step.title(),
                    reached: *step <= current,
                })
                .collect(),
            values: serde_json::to_value(request).unwrap_or_default(),
            destinations: options(|d: Destination| request.destination == Some(d)),
            durations: options(|d: TripDuration| request.duration == Some(d)),
            flight_classes: options(|c: FlightClass| request.flight_class == c),
            budgets: options(|b: Budget| request.budget == Some(b)),
            motives: options(|m: Motive| request.motives.contains(m)),
            errors,
            error_list: snapshot.errors.iter().map(ToString::to_string).collect(),
            can_retreat: wizard.can_retreat(),
            is_final: wizard.is_final_step(),
            strict: gating == StepGating::Strict,
            notice: snapshot.notice.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PageView {
    pub site: &'static SiteInfo,
    pub nav_links: &'static [NavLink],
    pub stylesheet: String,
    pub static_prefix: String,
    pub hero: Slideshow<HeroSlide>,
    pub destinations: Slideshow<DestinationProfile>,
    /// The destination shown in the detail dialog, from `?destination=`.
    pub destination_detail: Option<&'static DestinationProfile>,
    pub services: &'static [Service],
    pub team: &'static [TeamMember],
    pub gallery: Slideshow<GalleryImage>,
    pub lightbox: Option<LightboxView>,
    pub reviews: Slideshow<Review>,
    pub faqs: Vec<FaqView>,
    pub booking: BookingView,
    pub year: i32,
}

impl PageView {
    pub fn build(snapshot: &WizardSnapshot, query: &PageQuery, settings: &SiteSettings) -> Self {
        let mut lightbox = Lightbox::default();
        if let Some(image) = query.image.as_deref() {
            lightbox.open(image);
        }

        let mut accordion = FaqAccordion::default();
        if let Some(index) = query.faq_index().filter(|i| *i < content::FAQS.len()) {
            accordion.toggle(index);
        }

        PageView {
            site: &content::SITE,
            nav_links: content::NAV_LINKS,
            stylesheet: static_assets::stylesheet_url(),
            static_prefix: settings.static_prefix.clone(),
            hero: Slideshow::new(content::HERO_SLIDES, gallery::HERO_AUTOPLAY_MS),
            destinations: Slideshow::new(content::DESTINATIONS, gallery::DESTINATIONS_AUTOPLAY_MS),
            destination_detail: query.destination.as_deref().and_then(|id| content::destination(id.trim())),
            services: content::SERVICES,
            team: content::TEAM,
            gallery: Slideshow::new(content::GALLERY, gallery::GALLERY_AUTOPLAY_MS),
            lightbox: LightboxView::build(&lightbox, query.slide_index()),
            reviews: Slideshow::new(content::REVIEWS, gallery::REVIEWS_AUTOPLAY_MS),
            faqs: faq_views(content::FAQS, &accordion),
            booking: BookingView::build(snapshot, settings.gating),
            year: chrono::Local::now().year(),
        }
    }
}

fn faq_views(entries: &'static [FaqEntry], accordion: &FaqAccordion) -> Vec<FaqView> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let open = accordion.is_open(index);
            FaqView {
                question: entry.question,
                answer: entry.answer,
                open,
                href: if open {
                    "/#faq".to_string()
                } else {
                    format!("/?faq={}#faq", index)
                },
            }
        })
        .collect()
}
