//! Entrance Animation
//!
//! One-shot staggered fade-in for the dashboard cards.

use std::rc::Rc;
use std::time::Duration;

use crate::dom::{ids, Page};
use crate::scheduler::Scheduler;

const EASING: &str = "cubic-bezier(0.4, 0, 0.2, 1)";

/// A set of elements that fade in one after another
#[derive(Debug, Clone, PartialEq)]
pub struct StaggerGroup {
    pub selector: &'static str,
    /// Initial downward offset
    pub offset_px: u32,
    pub base_delay: Duration,
    /// Added per element index
    pub step: Duration,
    pub duration: Duration,
}

impl StaggerGroup {
    /// Dashboard summary cards
    pub fn stat_cards() -> Self {
        Self {
            selector: ids::STAT_CARD_SELECTOR,
            offset_px: 20,
            base_delay: Duration::from_millis(100),
            step: Duration::from_millis(100),
            duration: Duration::from_millis(500),
        }
    }

    /// Content cards on every page
    pub fn content_cards() -> Self {
        Self {
            selector: ids::CONTENT_CARD_SELECTOR,
            offset_px: 15,
            base_delay: Duration::from_millis(200),
            step: Duration::from_millis(80),
            duration: Duration::from_millis(400),
        }
    }

    /// Start delay of the `index`-th element
    pub fn delay_for(&self, index: usize) -> Duration {
        self.base_delay + self.step * index as u32
    }

    pub fn transition(&self) -> String {
        format!("all {}s {}", self.duration.as_secs_f64(), EASING)
    }
}

/// Runs the entrance stagger over the default groups
pub struct EntranceAnimation {
    groups: Vec<StaggerGroup>,
}

impl Default for EntranceAnimation {
    fn default() -> Self {
        Self {
            groups: vec![StaggerGroup::stat_cards(), StaggerGroup::content_cards()],
        }
    }
}

impl EntranceAnimation {
    pub fn new(groups: Vec<StaggerGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[StaggerGroup] {
        &self.groups
    }

    /// Hide every matched element now and schedule its reveal.
    /// Returns the number of elements animated.
    pub fn run(&self, page: &dyn Page, scheduler: &Rc<dyn Scheduler>) -> usize {
        let mut animated = 0;

        for group in &self.groups {
            for (index, element) in page.query_all(group.selector).into_iter().enumerate() {
                element.set_style("opacity", "0");
                element.set_style("transform", &format!("translateY({}px)", group.offset_px));

                let transition = group.transition();
                scheduler.set_timeout(
                    group.delay_for(index),
                    Box::new(move || {
                        element.set_style("transition", &transition);
                        element.set_style("opacity", "1");
                        element.set_style("transform", "translateY(0)");
                    }),
                );
                animated += 1;
            }
        }

        tracing::debug!("Entrance animation scheduled for {} elements", animated);
        animated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryPage, UiElement};
    use crate::scheduler::ManualScheduler;

    #[test]
    fn test_group_delays() {
        let stats = StaggerGroup::stat_cards();
        assert_eq!(stats.delay_for(0), Duration::from_millis(100));
        assert_eq!(stats.delay_for(3), Duration::from_millis(400));

        let cards = StaggerGroup::content_cards();
        assert_eq!(cards.delay_for(0), Duration::from_millis(200));
        assert_eq!(cards.delay_for(2), Duration::from_millis(360));
        assert_eq!(cards.transition(), "all 0.4s cubic-bezier(0.4, 0, 0.2, 1)");
    }

    #[test]
    fn test_stagger_reveals_in_order() {
        let page = MemoryPage::planner_shell();
        let main = page.main_content().unwrap();
        let s0 = page.append(&main, "div", "s0", "stat-card");
        let s1 = page.append(&main, "div", "s1", "stat-card");
        let c0 = page.append(&main, "div", "c0", "card");
        let c1 = page.append(&main, "div", "c1", "note-card");

        let manual = Rc::new(ManualScheduler::new());
        let scheduler: Rc<dyn Scheduler> = manual.clone();

        let animated = EntranceAnimation::default().run(&page, &scheduler);
        assert_eq!(animated, 4);

        for el in [&s0, &s1, &c0, &c1] {
            assert_eq!(el.style("opacity").as_deref(), Some("0"));
        }
        assert_eq!(s0.style("transform").as_deref(), Some("translateY(20px)"));
        assert_eq!(c0.style("transform").as_deref(), Some("translateY(15px)"));

        manual.advance(Duration::from_millis(100));
        assert_eq!(s0.style("opacity").as_deref(), Some("1"));
        assert_eq!(s0.style("transform").as_deref(), Some("translateY(0)"));
        assert_eq!(
            s0.style("transition").as_deref(),
            Some("all 0.5s cubic-bezier(0.4, 0, 0.2, 1)")
        );
        assert_eq!(s1.style("opacity").as_deref(), Some("0"));

        manual.advance(Duration::from_millis(100));
        assert_eq!(s1.style("opacity").as_deref(), Some("1"));
        assert_eq!(c0.style("opacity").as_deref(), Some("1"));
        assert_eq!(c1.style("opacity").as_deref(), Some("0"));

        manual.advance(Duration::from_millis(80));
        assert_eq!(c1.style("opacity").as_deref(), Some("1"));
        assert_eq!(manual.pending_timers(), 0);
    }

    #[test]
    fn test_empty_page_animates_nothing() {
        let page = MemoryPage::new();
        let manual = Rc::new(ManualScheduler::new());
        let scheduler: Rc<dyn Scheduler> = manual.clone();

        assert_eq!(EntranceAnimation::default().run(&page, &scheduler), 0);
        assert_eq!(manual.pending_timers(), 0);
    }
}
