//! Fixed-interval slideshows
//!
//! The hero and chef tiles rotate on their own timers, outside the trigger
//! registry: resize teardown never touches them and they run for the life
//! of the page. Timers are deadlines advanced by the frame tick, so a
//! stalled frame loop catches up rather than drifting.

use std::time::{Duration, Instant};

use tracing::debug;

use scrollweave_core::dom::{Document, NodeId};

use crate::selectors::{SLIDE_STATIC, VIDEO};

pub struct Slideshow {
    slides: Vec<NodeId>,
    active: usize,
    interval: Duration,
    next_advance: Instant,
    active_class: &'static str,
}

impl Slideshow {
    /// Collect slides and mark the first active. Fewer than two slides
    /// means nothing to rotate, so no slideshow is created.
    pub fn install(
        doc: &mut Document,
        slide_selector: &str,
        active_class: &'static str,
        interval: Duration,
        now: Instant,
    ) -> Option<Self> {
        let slides = doc.query_all(slide_selector);
        if slides.len() < 2 {
            debug!(selector = slide_selector, "fewer than two slides, slideshow disabled");
            return None;
        }
        for (i, &slide) in slides.iter().enumerate() {
            doc.set_class_enabled(slide, active_class, i == 0);
        }
        Some(Self {
            slides,
            active: 0,
            interval,
            next_advance: now + interval,
            active_class,
        })
    }

    /// Advance past any elapsed intervals
    pub fn tick(&mut self, doc: &mut Document, now: Instant) {
        while now >= self.next_advance {
            self.advance(doc);
            self.next_advance += self.interval;
        }
    }

    fn advance(&mut self, doc: &mut Document) {
        doc.remove_class(self.slides[self.active], self.active_class);
        self.active = (self.active + 1) % self.slides.len();
        doc.add_class(self.slides[self.active], self.active_class);
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub(crate) fn slides(&self) -> &[NodeId] {
        &self.slides
    }
}

/// Start playback of any video inside each slide. A rejected autoplay
/// falls back to the slide's static presentation instead of surfacing.
pub fn autoplay_videos(doc: &mut Document, slides: &[NodeId]) {
    for &slide in slides {
        let Some(video) = doc.query_within(slide, VIDEO) else {
            continue;
        };
        match doc.play_media(video) {
            Ok(()) => {}
            Err(_) => {
                debug!("autoplay rejected, falling back to static slide");
                doc.add_class(slide, SLIDE_STATIC);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slideshow_doc(count: usize) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new(1440.0, 900.0);
        let hero = doc.node(None).class("hero").rect(0.0, 0.0, 1440.0, 900.0).id();
        let slides = (0..count)
            .map(|_| {
                doc.node(Some(hero))
                    .class("hero__slide")
                    .rect(0.0, 0.0, 1440.0, 900.0)
                    .id()
            })
            .collect();
        (doc, slides)
    }

    fn active_count(doc: &Document, slides: &[NodeId], class: &str) -> usize {
        slides.iter().filter(|&&s| doc.has_class(s, class)).count()
    }

    #[test]
    fn test_single_slide_disables_rotation() {
        let (mut doc, _) = slideshow_doc(1);
        let now = Instant::now();
        assert!(Slideshow::install(
            &mut doc,
            ".hero__slide",
            "is-active",
            Duration::from_millis(6500),
            now
        )
        .is_none());
    }

    #[test]
    fn test_exactly_one_active_slide_at_all_times() {
        let (mut doc, slides) = slideshow_doc(3);
        let t0 = Instant::now();
        let interval = Duration::from_millis(6500);
        let mut show =
            Slideshow::install(&mut doc, ".hero__slide", "is-active", interval, t0).unwrap();
        assert_eq!(show.active_index(), 0);
        assert!(doc.has_class(slides[0], "is-active"));

        for step in 1..=7 {
            show.tick(&mut doc, t0 + interval * step);
            assert_eq!(show.active_index(), step as usize % 3);
            assert_eq!(active_count(&doc, &slides, "is-active"), 1);
            assert!(doc.has_class(slides[step as usize % 3], "is-active"));
        }
    }

    #[test]
    fn test_tick_between_intervals_does_not_advance() {
        let (mut doc, _) = slideshow_doc(2);
        let t0 = Instant::now();
        let interval = Duration::from_millis(4200);
        let mut show =
            Slideshow::install(&mut doc, ".hero__slide", "is-active", interval, t0).unwrap();
        show.tick(&mut doc, t0 + Duration::from_millis(4000));
        assert_eq!(show.active_index(), 0);
        show.tick(&mut doc, t0 + Duration::from_millis(4300));
        assert_eq!(show.active_index(), 1);
    }

    #[test]
    fn test_stalled_loop_catches_up() {
        let (mut doc, _) = slideshow_doc(4);
        let t0 = Instant::now();
        let interval = Duration::from_millis(1000);
        let mut show =
            Slideshow::install(&mut doc, ".hero__slide", "is-active", interval, t0).unwrap();
        // One tick three and a half intervals later advances three times
        show.tick(&mut doc, t0 + Duration::from_millis(3500));
        assert_eq!(show.active_index(), 3);
    }

    #[test]
    fn test_autoplay_fallback_marks_slide_static() {
        let (mut doc, slides) = slideshow_doc(2);
        let ok_video = doc.node(Some(slides[0])).attr("data-video", "").id();
        let _blocked = doc
            .node(Some(slides[1]))
            .attr("data-video", "")
            .attr("data-autoplay-blocked", "")
            .id();
        autoplay_videos(&mut doc, &slides);
        assert!(doc.is_playing(ok_video));
        assert!(!doc.has_class(slides[0], "slide--static"));
        assert!(doc.has_class(slides[1], "slide--static"));
    }
}
