//! Page choreography for the marketing site
//!
//! Binds the section effect modules, slideshows and mobile menu to the
//! core engine and drives them through the orchestrator lifecycle. Hosts
//! feed input events and frame timestamps in; the engine mutates document
//! styles and classes out.

pub mod effects;
pub mod navbar;
pub mod orchestrator;
pub mod selectors;
pub mod slideshow;

pub use orchestrator::{Orchestrator, Phase};
pub use slideshow::Slideshow;
