//! Selector-to-behavior protocol
//!
//! The fixed set of selectors and state classes the markup and the engine
//! agree on. Effect modules address elements only through these constants.

pub const NAVBAR: &str = ".navbar";
pub const NAVBAR_TOGGLE: &str = ".navbar__toggle";
pub const NAVBAR_LINKS: &str = ".navbar__links";
pub const NAVBAR_LINK: &str = ".navbar__link";

pub const HERO: &str = ".hero";
pub const HERO_SLIDESHOW: &str = ".hero__slideshow";
pub const HERO_CONTENT: &str = ".hero__content";
pub const HERO_SCROLL_INDICATOR: &str = ".hero__scroll-indicator";
pub const HERO_SLIDE: &str = ".hero__slide";

pub const MISSION_CARD: &str = ".mission__card";
pub const REVEAL_ITEM: &str = "[data-reveal-item]";

pub const TESTIMONIALS_SECTION: &str = ".testimonials-section";
pub const TESTIMONIALS_PIN_WRAP: &str = ".testimonials__pin-wrap";
pub const TESTIMONIAL_CARD: &str = ".testimonial-card";
pub const TESTIMONIALS_DOT: &str = ".testimonials__progress-dot";

pub const GALLERY_SECTION: &str = ".gallery-section";
pub const GALLERY_PIN_WRAP: &str = ".gallery__pin-wrap";
pub const GALLERY_STRIP: &str = ".gallery__strip";
pub const GALLERY_ITEM: &str = ".gallery__item";

pub const CHEF_SECTION: &str = ".chef-section";
pub const CHEF_PIN_WRAP: &str = ".chef__pin-wrap";
pub const CHEF_TEXT: &str = "[data-chef-text]";
pub const CHEF_SLIDE: &str = ".chef__slide";

pub const STORY_TEXT_BLOCK: &str = ".story__text-block";
pub const STORY_IMG: &str = ".story__img";
pub const STORY_TRIGGER: &str = "[data-story-trigger]";
pub const STORY_TRIGGER_ATTR: &str = "data-story-trigger";
pub const STORY_QUOTE: &str = "[data-story-quote]";

pub const FAQ_ITEM: &str = "[data-faq]";

pub const CTA_SECTION: &str = ".cta-section";
pub const CTA_REVEAL: &str = "[data-cta-reveal]";

pub const VIDEO: &str = "[data-video]";

// State classes written by the engine
pub const SCROLLED: &str = "scrolled";
pub const MENU_ACTIVE: &str = "active";
pub const DOT_ACTIVE: &str = "active";
pub const HERO_SLIDE_ACTIVE: &str = "is-active";
pub const CHEF_SLIDE_ACTIVE: &str = "chef__slide--active";
pub const STORY_IMG_ACTIVE: &str = "story__img--active";
pub const SLIDE_STATIC: &str = "slide--static";
/// Marks an element whose one-shot entrance has fired; reinstallation
/// after a resize leaves such elements at their settled values
pub const REVEALED: &str = "is-revealed";
