//! Scripted scroll through the page
//!
//! Scrolls from the top to the bottom at a fixed speed, one viewport
//! evaluation and one clock step per frame, then lets pending animations
//! settle.

use folio_core::Rect;
use folio_reveal::{RevealEngine, RevealState, RevealTransition};
use folio_site::Page;
use serde::Serialize;

/// Seconds simulated after the last scroll step
const SETTLE_SECS: f64 = 2.0;

#[derive(Clone, Copy, Debug)]
pub struct ScrollPlan {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Pixels scrolled per frame
    pub step: f32,
    pub fps: u32,
}

impl Default for ScrollPlan {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 800.0,
            step: 40.0,
            fps: 60,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub frames: u32,
    pub duration: f64,
    pub page_height: f32,
    pub registered: usize,
    pub revealed: usize,
    pub timeline: Vec<RevealTransition>,
}

pub fn run(engine: &mut RevealEngine, page: &Page, plan: ScrollPlan) -> SimulationReport {
    let dt = 1.0 / f64::from(plan.fps.max(1));
    let max_scroll = (page.height() - plan.viewport_height).max(0.0);
    let step = plan.step.max(1.0);

    let mut frames = 0;
    let mut scroll = 0.0_f32;
    loop {
        let viewport = Rect::new(0.0, scroll, plan.viewport_width, plan.viewport_height);
        engine.process_viewport(viewport);
        engine.advance(dt);
        frames += 1;

        if scroll >= max_scroll {
            break;
        }
        scroll = (scroll + step).min(max_scroll);
    }

    let settle_frames = (SETTLE_SECS / dt).ceil() as u32;
    for _ in 0..settle_frames {
        engine.advance(dt);
        frames += 1;
    }
    tracing::debug!("simulated {} frames", frames);

    let revealed = page
        .elements()
        .filter(|e| engine.state(e.id) == Some(RevealState::Revealed))
        .count();

    SimulationReport {
        frames,
        duration: engine.now(),
        page_height: page.height(),
        registered: engine.registered(),
        revealed,
        timeline: engine.drain_transitions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::VariantRegistry;
    use folio_site::SiteContent;
    use std::sync::Arc;

    #[test]
    fn test_full_scroll_reveals_everything() {
        let mut engine = RevealEngine::new(Arc::new(VariantRegistry::builtin()));
        let page = Page::mount(&mut engine, &SiteContent::default(), 1280.0).unwrap();

        let report = run(&mut engine, &page, ScrollPlan::default());
        assert_eq!(report.revealed, report.registered);
        assert!(report.timeline.len() >= 2 * report.registered);
        assert!(report.timeline.windows(2).all(|w| w[0].at <= w[1].at));
    }

    #[test]
    fn test_short_page_still_settles() {
        let mut engine = RevealEngine::new(Arc::new(VariantRegistry::builtin()));
        let page = Page::mount(&mut engine, &SiteContent::default(), 1280.0).unwrap();
        let plan = ScrollPlan {
            viewport_height: 100_000.0,
            ..ScrollPlan::default()
        };

        let report = run(&mut engine, &page, plan);
        assert_eq!(report.revealed, report.registered);
        assert!(report.duration >= SETTLE_SECS);
    }
}
