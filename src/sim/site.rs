/// SiteState: the complete state of a running portfolio session.
///
/// ## Stages
///
///   Intro ──(intro complete)──▶ Content
///
/// The page tree does not exist for the renderer until the intro reports
/// completion. At that moment the intro is torn down, the typing effect
/// starts, and the page fades in after `content_fade_ms`.
///
/// ## Layout feedback
///
/// Section heights depend on the terminal width, so the renderer measures
/// the page and writes the row spans into `layout` each frame. `advance`
/// then feeds the reveal gates from those spans, the same way the
/// renderer sizes the viewport before the next step reads it.

use crate::config::SiteConfig;
use crate::domain::contact::ContactForm;
use crate::domain::content::Catalog;
use crate::domain::gallery::Gallery;
use crate::domain::intro::IntroController;
use crate::domain::nav::{NavState, Section};
use crate::domain::reveal::{RevealGate, Viewport};
use crate::domain::timeline::{Millis, Timeline};
use crate::domain::typing::TypingAnimation;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stage {
    Intro,
    Content,
}

/// Where keyboard input goes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Browse,
    Menu,
    Lightbox,
    Form,
}

/// Site-level deferred actions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SiteTimer {
    ShowContent,
}

/// Row spans of each page section, measured by the renderer.
#[derive(Clone, Debug, Default)]
pub struct PageLayout {
    pub spans: Vec<(Section, usize, usize)>,
    pub total_rows: usize,
    pub view_rows: usize,
}

impl PageLayout {
    pub fn span(&self, section: Section) -> Option<(usize, usize)> {
        self.spans
            .iter()
            .find(|(s, _, _)| *s == section)
            .map(|&(_, top, h)| (top, h))
    }

    pub fn max_scroll(&self) -> usize {
        self.total_rows.saturating_sub(self.view_rows)
    }

    /// Section under the top edge of the viewport.
    pub fn section_at(&self, row: usize) -> Option<Section> {
        self.spans
            .iter()
            .find(|&&(_, top, h)| row >= top && row < top + h)
            .map(|&(s, _, _)| s)
    }
}

pub struct SiteState {
    pub config: SiteConfig,
    pub catalog: Catalog,

    // ── Stage ──
    pub stage: Stage,
    pub intro: IntroController,
    pub content_visible: bool,
    pub content_visible_at: Option<Millis>,
    pub timers: Timeline<SiteTimer>,

    // ── Page controllers ──
    pub typing: TypingAnimation,
    pub gates: Vec<(Section, RevealGate)>,
    pub gallery: Gallery,
    pub contact: ContactForm,
    pub nav: NavState,

    // ── Viewport ──
    pub scroll: usize,
    pub layout: PageLayout,
    pub focus: Focus,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
    pub anim_tick: u32,
    pub now: Millis,
    pub torn_down: bool,
}

// ── Construction ──

impl SiteState {
    pub fn new(config: SiteConfig, catalog: Catalog) -> Self {
        let gates = Section::ALL
            .into_iter()
            .filter(|s| s.has_reveal())
            .map(|s| (s, RevealGate::new(config.reveal.threshold)))
            .collect();

        SiteState {
            intro: IntroController::new(config.intro),
            typing: TypingAnimation::new(&catalog.phrases, config.typing),
            nav: NavState::new(config.nav),
            config,
            catalog,
            stage: Stage::Intro,
            content_visible: false,
            content_visible_at: None,
            timers: Timeline::new(),
            gates,
            gallery: Gallery::new(),
            contact: ContactForm::new(),
            scroll: 0,
            layout: PageLayout::default(),
            focus: Focus::Browse,
            message: String::new(),
            message_timer: 0,
            anim_tick: 0,
            now: 0,
            torn_down: false,
        }
    }

    /// Mount: start the intro choreography.
    pub fn start(&mut self, now: Millis) {
        self.now = now;
        self.intro.activate(now);
        tracing::debug!(now, "intro activated");
    }

    /// Unmount: revoke every pending timer so nothing fires into a
    /// disposed session.
    pub fn teardown(&mut self) {
        self.intro.teardown();
        self.typing.teardown();
        self.timers.cancel_all();
        self.torn_down = true;
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    pub fn gate(&self, section: Section) -> Option<&RevealGate> {
        self.gates.iter().find(|(s, _)| *s == section).map(|(_, g)| g)
    }

    pub fn is_revealed(&self, section: Section) -> bool {
        self.gate(section).map_or(true, |g| g.is_revealed())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport { top: self.scroll, height: self.layout.view_rows }
    }
}

// ── Scrolling ──

impl SiteState {
    pub fn scroll_by(&mut self, delta: i32) {
        let max = self.layout.max_scroll() as i64;
        self.scroll = (self.scroll as i64 + delta as i64).clamp(0, max.max(0)) as usize;
        self.nav.on_scroll(self.scroll);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
        self.nav.on_scroll(0);
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll = self.layout.max_scroll();
        self.nav.on_scroll(self.scroll);
    }

    /// Jump so the section starts at the top of the viewport.
    pub fn scroll_to(&mut self, section: Section) {
        if let Some((top, _)) = self.layout.span(section) {
            self.scroll = top.min(self.layout.max_scroll());
            self.nav.on_scroll(self.scroll);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PageLayout {
        PageLayout {
            spans: vec![
                (Section::Hero, 0, 20),
                (Section::About, 20, 15),
                (Section::Skills, 35, 15),
                (Section::Projects, 50, 30),
                (Section::Services, 80, 20),
                (Section::Contact, 100, 20),
                (Section::Footer, 120, 4),
            ],
            total_rows: 124,
            view_rows: 20,
        }
    }

    #[test]
    fn every_anchor_has_a_gate() {
        let site = SiteState::new(SiteConfig::default(), Catalog::builtin());
        for s in Section::ANCHORS {
            assert!(site.gate(s).is_some());
            assert!(!site.is_revealed(s));
        }
        assert!(site.is_revealed(Section::Hero));
    }

    #[test]
    fn scrolling_is_clamped_to_page() {
        let mut site = SiteState::new(SiteConfig::default(), Catalog::builtin());
        site.layout = layout();
        site.scroll_by(-5);
        assert_eq!(site.scroll, 0);
        site.scroll_by(500);
        assert_eq!(site.scroll, 104);
        assert!(site.nav.show_scroll_top);
        site.scroll_to_top();
        assert_eq!(site.scroll, 0);
        assert!(!site.nav.scrolled);
    }

    #[test]
    fn anchors_jump_to_section_tops() {
        let mut site = SiteState::new(SiteConfig::default(), Catalog::builtin());
        site.layout = layout();
        site.scroll_to(Section::Projects);
        assert_eq!(site.scroll, 50);
        assert_eq!(site.layout.section_at(site.scroll), Some(Section::Projects));
        site.scroll_to(Section::Footer);
        assert_eq!(site.scroll, 104);
    }

    #[test]
    fn teardown_clears_all_timers() {
        let mut site = SiteState::new(SiteConfig::default(), Catalog::builtin());
        site.start(0);
        assert_eq!(site.intro.pending_timers(), 4);
        site.teardown();
        assert_eq!(site.intro.pending_timers(), 0);
        assert!(site.timers.is_empty());
        assert!(!site.typing.is_running());
    }
}
