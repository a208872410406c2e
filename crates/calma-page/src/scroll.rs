//! Smooth scrolling for in-page anchor links.

use calma_core::{Easing, lerp};

use crate::dom::{Document, ElementId};

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    start_ms: u64,
    duration_ms: u64,
    easing: Easing,
}

/// Vertical scroll position of the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollView {
    position: f64,
    limit: Option<f64>,
    animation: Option<ScrollAnimation>,
}

impl ScrollView {
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Largest reachable position, if bounded.
    pub fn limit(&self) -> Option<f64> {
        self.limit
    }

    pub fn set_limit(&mut self, limit: Option<f64>) {
        self.limit = limit.map(|l| l.max(0.0));
        self.position = self.clamp(self.position);
    }

    /// Jump to `position`, cancelling any running animation.
    pub fn set_position(&mut self, position: f64) {
        self.animation = None;
        self.position = self.clamp(position);
    }

    /// Start an eased scroll from the current position towards `target`.
    /// A zero duration jumps straight there.
    pub fn smooth_scroll_to(&mut self, target: f64, now_ms: u64, duration_ms: u64) {
        self.smooth_scroll_with(target, now_ms, duration_ms, Easing::InOutCubic);
    }

    /// [`smooth_scroll_to`](Self::smooth_scroll_to) along a chosen curve.
    pub fn smooth_scroll_with(
        &mut self,
        target: f64,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) {
        let to = self.clamp(target);
        if duration_ms == 0 {
            self.set_position(to);
            return;
        }
        self.animation = Some(ScrollAnimation {
            from: self.position,
            to,
            start_ms: now_ms,
            duration_ms,
            easing,
        });
    }

    /// Advance the animation to `now_ms`. Returns whether it is still running.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(anim) = self.animation else {
            return false;
        };
        let elapsed = now_ms.saturating_sub(anim.start_ms) as f64;
        let progress = (elapsed / anim.duration_ms as f64).min(1.0);
        self.position = lerp(anim.from, anim.to, anim.easing.apply(progress));
        if progress >= 1.0 {
            self.position = anim.to;
            self.animation = None;
        }
        self.animation.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Where the running animation will end.
    pub fn target(&self) -> Option<f64> {
        self.animation.map(|a| a.to)
    }

    fn clamp(&self, position: f64) -> f64 {
        let position = position.max(0.0);
        match self.limit {
            Some(limit) => position.min(limit),
            None => position,
        }
    }
}

/// Result of dispatching a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// The click was consumed by an in-page link.
    pub default_prevented: bool,
    /// Element now being scrolled into view.
    pub scrolled_to: Option<ElementId>,
}

/// Click interception for the anchor links present when it was attached.
#[derive(Debug, Clone)]
pub struct AnchorScroller {
    links: Vec<ElementId>,
    duration_ms: u64,
    easing: Easing,
}

impl AnchorScroller {
    /// Intercept every `a` element whose href starts with `#`.
    pub fn attach(doc: &Document, duration_ms: u64) -> Self {
        let links = doc.anchor_links();
        log::debug!("smooth scroll attached to {} links", links.len());
        Self {
            links,
            duration_ms,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn links(&self) -> &[ElementId] {
        &self.links
    }

    /// Handle a click on `target` or one of its descendants.
    ///
    /// Clicks on an intercepted link never navigate. When the link's target
    /// exists the page scrolls so that its top edge lines up with the top of
    /// the view.
    pub fn handle_click(
        &self,
        doc: &mut Document,
        target: ElementId,
        now_ms: u64,
    ) -> ClickOutcome {
        let Some(link) = doc.closest(target, |el| el.tag() == "a") else {
            return ClickOutcome::default();
        };
        if !self.links.contains(&link) {
            return ClickOutcome::default();
        }
        let href = doc
            .element(link)
            .and_then(|el| el.href())
            .map(str::to_owned)
            .unwrap_or_default();

        let Some(dest) = doc.query_selector(&href) else {
            log::debug!("anchor target '{href}' not found");
            return ClickOutcome {
                default_prevented: true,
                scrolled_to: None,
            };
        };
        let offset = doc.element(dest).map_or(0.0, |el| el.offset_top());
        doc.scroll_view_mut()
            .smooth_scroll_with(offset, now_ms, self.duration_ms, self.easing);

        ClickOutcome {
            default_prevented: true,
            scrolled_to: Some(dest),
        }
    }

    /// Stop intercepting clicks.
    pub fn detach(self) {}
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_tick_reports_running() {
        let mut view = ScrollView::default();
        assert!(!view.tick(0));
        view.smooth_scroll_to(1000.0, 0, 400);
        assert!(view.tick(0));
        assert!(view.tick(399));
        assert!(!view.tick(400));
        assert_eq!(view.position(), 1000.0);
        assert!(!view.is_animating());
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(100, 62.5)]
    #[case(200, 500.0)]
    #[case(300, 937.5)]
    #[case(400, 1000.0)]
    #[case(900, 1000.0)]
    fn test_scroll_curve(#[case] now_ms: u64, #[case] expected: f64) {
        let mut view = ScrollView::default();
        view.smooth_scroll_to(1000.0, 0, 400);
        view.tick(now_ms);
        assert!((view.position() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_linear_scroll() {
        let mut view = ScrollView::default();
        view.smooth_scroll_with(1000.0, 0, 400, Easing::Linear);
        view.tick(100);
        assert_eq!(view.position(), 250.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut view = ScrollView::default();
        view.set_limit(Some(300.0));
        view.smooth_scroll_to(1000.0, 0, 0);
        assert_eq!(view.position(), 300.0);
        view.set_position(-20.0);
        assert_eq!(view.position(), 0.0);
    }

    #[test]
    fn test_jump_cancels_animation() {
        let mut view = ScrollView::default();
        view.smooth_scroll_to(800.0, 0, 400);
        assert_eq!(view.target(), Some(800.0));
        view.set_position(10.0);
        assert!(!view.tick(1000));
        assert_eq!(view.position(), 10.0);
    }

    #[test]
    fn test_click_outside_link_is_not_handled() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_to_body(div);
        let scroller = AnchorScroller::attach(&doc, 400);
        assert_eq!(scroller.handle_click(&mut doc, div, 0), ClickOutcome::default());
    }

    #[test]
    fn test_links_added_later_are_not_intercepted() {
        let mut doc = Document::new();
        let scroller = AnchorScroller::attach(&doc, 400);
        let a = doc.create_element("a");
        doc.element_mut(a).unwrap().set_href("#x");
        doc.append_to_body(a);
        assert!(!scroller.handle_click(&mut doc, a, 0).default_prevented);
    }

    #[test]
    fn test_click_inside_link_scrolls_to_target() {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        doc.element_mut(a).unwrap().set_href("#calm");
        doc.append_to_body(a);
        let label = doc.create_element("span");
        doc.append_child(a, label);
        let section = doc.create_element("section");
        doc.set_id(section, "calm");
        doc.element_mut(section).unwrap().set_offset_top(250.0);
        doc.append_to_body(section);

        let scroller = AnchorScroller::attach(&doc, 400);
        assert_eq!(scroller.links(), &[a]);
        let outcome = scroller.handle_click(&mut doc, label, 1000);
        assert_eq!(outcome.scrolled_to, Some(section));
        assert_eq!(doc.scroll_view().target(), Some(250.0));

        doc.scroll_view_mut().tick(1400);
        assert_eq!(doc.scroll_view().position(), 250.0);
        scroller.detach();
    }
}
