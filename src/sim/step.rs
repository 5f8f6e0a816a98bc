/// The step function: advances the site to `now`.
///
/// Processing order:
///   1. Intro transitions (and the hand-over to the page on completion)
///   2. Site timers (page fade-in)
///   3. Typing effect
///   4. Navigation bar state from the scroll offset
///   5. Reveal gates against the current viewport
///   6. Toast timer
///
/// `apply` handles user actions. Key mapping lives in the event loop;
/// everything here is plain state transitions, testable without a terminal.

use crate::domain::contact::Field;
use crate::domain::intro::IntroSignal;
use crate::domain::nav::Section;
use crate::domain::timeline::Millis;
use super::event::SiteEvent;
use super::site::{Focus, SiteState, SiteTimer, Stage};

/// Toast duration in ticks.
const MESSAGE_TICKS: u32 = 80;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn advance(site: &mut SiteState, now: Millis) -> Vec<SiteEvent> {
    let mut events = Vec::new();
    if site.torn_down {
        return events;
    }
    site.now = now;
    site.anim_tick = site.anim_tick.wrapping_add(1);

    resolve_intro(site, now, &mut events);
    resolve_site_timers(site, now, &mut events);

    if site.stage == Stage::Content {
        if site.typing.tick(now) {
            events.push(SiteEvent::TypingChanged);
        }
        site.nav.on_scroll(site.scroll);
        resolve_reveals(site, now, &mut events);
    }

    if site.message_timer > 0 {
        site.message_timer -= 1;
        if site.message_timer == 0 { site.message.clear(); }
    }

    events
}

fn resolve_intro(site: &mut SiteState, now: Millis, events: &mut Vec<SiteEvent>) {
    if site.stage != Stage::Intro {
        return;
    }
    for signal in site.intro.tick(now) {
        match signal {
            IntroSignal::Phase(p) => {
                tracing::debug!(phase = ?p, now, "intro phase");
                events.push(SiteEvent::IntroPhase(p));
            }
            IntroSignal::Complete => {
                finish_intro(site, now);
                events.push(SiteEvent::IntroComplete);
            }
        }
    }
}

/// Swap the intro out for the page.
fn finish_intro(site: &mut SiteState, now: Millis) {
    site.intro.teardown();
    site.stage = Stage::Content;
    site.content_visible = false;
    site.timers.schedule(now + site.config.intro.content_fade_ms, SiteTimer::ShowContent);
    site.typing.start(now);
    tracing::info!(now, "intro complete, page mounted");
}

fn resolve_site_timers(site: &mut SiteState, now: Millis, events: &mut Vec<SiteEvent>) {
    for timer in site.timers.drain_due(now) {
        match timer {
            SiteTimer::ShowContent => {
                site.content_visible = true;
                site.content_visible_at = Some(now);
                events.push(SiteEvent::ContentVisible);
            }
        }
    }
}

fn resolve_reveals(site: &mut SiteState, now: Millis, events: &mut Vec<SiteEvent>) {
    if !site.content_visible || site.layout.view_rows == 0 {
        return;
    }
    let viewport = site.viewport();
    for (section, gate) in site.gates.iter_mut() {
        if !gate.is_subscribed() {
            continue;
        }
        let Some((top, height)) = site.layout.span(*section) else { continue };
        if gate.observe(viewport.intersection_ratio(top, height), now) {
            tracing::debug!(section = ?section, "section revealed");
            events.push(SiteEvent::SectionRevealed(*section));
        }
    }
}

// ══════════════════════════════════════════════════════════════
// User actions
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Scroll(i32),
    ScrollTop,
    ScrollEnd,
    Jump(Section),
    ToggleMenu,
    MenuMove(i32),
    MenuChoose,
    CycleFilter(i32),
    SetFilter(String),
    MoveSelection(i32),
    OpenSelected,
    LightboxStep(i32),
    Close,
    EditForm,
    FormChar(char),
    FormBackspace,
    FormNextField,
    Submit,
}

pub fn apply(site: &mut SiteState, action: Action) -> Vec<SiteEvent> {
    let mut events = Vec::new();
    if site.stage != Stage::Content || site.torn_down {
        return events;
    }

    match action {
        Action::Scroll(d) => site.scroll_by(d),
        Action::ScrollTop => site.scroll_to_top(),
        Action::ScrollEnd => site.scroll_to_end(),
        Action::Jump(section) => site.scroll_to(section),

        Action::ToggleMenu => {
            site.nav.toggle_menu();
            site.focus = if site.nav.menu_open { Focus::Menu } else { Focus::Browse };
        }
        Action::MenuMove(d) => site.nav.move_menu_cursor(d),
        Action::MenuChoose => {
            let section = site.nav.choose();
            site.focus = Focus::Browse;
            site.scroll_to(section);
        }

        Action::CycleFilter(d) => {
            site.gallery.cycle_filter(d);
            events.push(SiteEvent::FilterChanged(site.gallery.active_filter().label().to_string()));
        }
        Action::SetFilter(label) => {
            site.gallery.set_filter(&label);
            events.push(SiteEvent::FilterChanged(label));
        }
        Action::MoveSelection(d) => site.gallery.move_cursor(&site.catalog, d),
        Action::OpenSelected => {
            if site.gallery.open_selected(&site.catalog) {
                site.focus = Focus::Lightbox;
                if let Some(p) = site.gallery.opened(&site.catalog) {
                    events.push(SiteEvent::ProjectOpened(p.id));
                }
            }
        }
        Action::LightboxStep(d) => {
            if site.gallery.is_open() {
                site.gallery.open_adjacent(&site.catalog, d);
                if let Some(p) = site.gallery.opened(&site.catalog) {
                    events.push(SiteEvent::ProjectOpened(p.id));
                }
            }
        }
        Action::Close => match site.focus {
            Focus::Lightbox => {
                site.gallery.close_project();
                site.focus = Focus::Browse;
                events.push(SiteEvent::ProjectClosed);
            }
            Focus::Menu => {
                site.nav.close_menu();
                site.focus = Focus::Browse;
            }
            Focus::Form => {
                site.contact.blur();
                site.focus = Focus::Browse;
            }
            Focus::Browse => {}
        },

        Action::EditForm => {
            site.scroll_to(Section::Contact);
            if site.contact.focused().is_none() {
                site.contact.focus(Field::Name);
            }
            site.focus = Focus::Form;
        }
        Action::FormChar(c) => site.contact.push_char(c),
        Action::FormBackspace => site.contact.backspace(),
        Action::FormNextField => site.contact.focus_next(),
        Action::Submit => match site.contact.check() {
            Some(rejection) => {
                let field = rejection.field();
                site.contact.focus(field);
                site.set_message(&rejection.notice(), MESSAGE_TICKS);
                events.push(SiteEvent::FormRejected(field.label()));
            }
            None => {
                let ack = site.contact.submit();
                site.set_message(ack.text, MESSAGE_TICKS);
                site.focus = Focus::Browse;
                events.push(SiteEvent::FormSubmitted);
            }
        },
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::domain::content::Catalog;
    use crate::domain::intro::IntroPhase;
    use crate::sim::site::PageLayout;

    fn site() -> SiteState {
        let mut s = SiteState::new(SiteConfig::default(), Catalog::builtin());
        s.layout = PageLayout {
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
        };
        s
    }

    fn run(s: &mut SiteState, from: Millis, to: Millis) -> Vec<SiteEvent> {
        let mut out = vec![];
        let mut t = from;
        while t <= to {
            out.extend(advance(s, t));
            t += 10;
        }
        out
    }

    fn mounted() -> SiteState {
        let mut s = site();
        s.start(0);
        run(&mut s, 0, 4_600);
        s
    }

    #[test]
    fn page_waits_for_intro_then_fades_in() {
        let mut s = site();
        s.start(0);
        let events = run(&mut s, 0, 4_490);
        assert_eq!(s.stage, Stage::Intro);
        assert_eq!(events, vec![
            SiteEvent::IntroPhase(IntroPhase::Forming),
            SiteEvent::IntroPhase(IntroPhase::Glow),
            SiteEvent::IntroPhase(IntroPhase::Fadeout),
        ]);

        assert_eq!(advance(&mut s, 4_500), vec![SiteEvent::IntroComplete]);
        assert_eq!(s.stage, Stage::Content);
        assert!(!s.content_visible);
        assert_eq!(s.intro.pending_timers(), 0);

        advance(&mut s, 4_599);
        assert!(!s.content_visible);
        assert!(advance(&mut s, 4_600).contains(&SiteEvent::ContentVisible));
        assert!(s.content_visible);
    }

    #[test]
    fn actions_are_ignored_during_intro() {
        let mut s = site();
        s.start(0);
        assert!(apply(&mut s, Action::CycleFilter(1)).is_empty());
        assert!(apply(&mut s, Action::OpenSelected).is_empty());
        assert!(!s.gallery.is_open());
    }

    #[test]
    fn typing_runs_once_mounted() {
        let mut s = mounted();
        assert_eq!(s.typing.display_text(), "A");
        run(&mut s, 4_610, 6_300);
        assert_eq!(s.typing.display_text(), "AI Agent Developer");
    }

    #[test]
    fn reveals_follow_the_viewport_once() {
        let mut s = mounted();
        assert!(!s.is_revealed(Section::About));

        s.scroll_by(12);
        let events = advance(&mut s, 4_700);
        assert!(events.contains(&SiteEvent::SectionRevealed(Section::About)));
        assert!(!s.is_revealed(Section::Skills));

        s.scroll_to_top();
        assert!(!advance(&mut s, 4_710).iter().any(|e| matches!(e, SiteEvent::SectionRevealed(_))));
        assert!(s.is_revealed(Section::About));
    }

    #[test]
    fn no_reveal_before_content_is_visible() {
        let mut s = site();
        s.start(0);
        run(&mut s, 0, 4_500);
        s.scroll = 15;
        advance(&mut s, 4_510);
        assert!(!s.is_revealed(Section::About));
    }

    #[test]
    fn lightbox_open_step_close() {
        let mut s = mounted();
        apply(&mut s, Action::SetFilter("Customer Support".into()));
        apply(&mut s, Action::MoveSelection(1));
        assert_eq!(apply(&mut s, Action::OpenSelected), vec![SiteEvent::ProjectOpened(6)]);
        assert_eq!(s.focus, Focus::Lightbox);
        assert_eq!(apply(&mut s, Action::LightboxStep(1)), vec![SiteEvent::ProjectOpened(1)]);
        assert_eq!(apply(&mut s, Action::Close), vec![SiteEvent::ProjectClosed]);
        assert!(!s.gallery.is_open());
        assert_eq!(s.focus, Focus::Browse);
    }

    #[test]
    fn empty_filter_cannot_open() {
        let mut s = mounted();
        apply(&mut s, Action::SetFilter("Marketing".into()));
        assert!(apply(&mut s, Action::OpenSelected).is_empty());
        assert_eq!(s.focus, Focus::Browse);
    }

    #[test]
    fn form_requires_fields_then_acknowledges() {
        let mut s = mounted();
        apply(&mut s, Action::EditForm);
        assert_eq!(s.focus, Focus::Form);
        assert_eq!(s.scroll, 100);

        for c in "Sam".chars() {
            apply(&mut s, Action::FormChar(c));
        }
        assert_eq!(apply(&mut s, Action::Submit), vec![SiteEvent::FormRejected("Email Address")]);
        assert_eq!(s.contact.focused(), Some(Field::Email));
        assert_eq!(s.message, "Please fill in: Email Address");

        for c in "not-an-email".chars() {
            apply(&mut s, Action::FormChar(c));
        }
        apply(&mut s, Action::FormNextField);
        for c in "Hello!".chars() {
            apply(&mut s, Action::FormChar(c));
        }
        assert_eq!(apply(&mut s, Action::Submit), vec![SiteEvent::FormRejected("Email Address")]);
        assert_eq!(s.contact.focused(), Some(Field::Email));
        assert_eq!(s.message, "Please enter a valid email address");
        assert_eq!(s.contact.value(Field::Message), "Hello!");

        for _ in "not-an-email".chars() {
            apply(&mut s, Action::FormBackspace);
        }
        for c in "sam@example.com".chars() {
            apply(&mut s, Action::FormChar(c));
        }
        assert_eq!(apply(&mut s, Action::Submit), vec![SiteEvent::FormSubmitted]);
        assert_eq!(s.contact.value(Field::Name), "");
        assert_eq!(s.message, crate::domain::contact::ACKNOWLEDGEMENT);
        assert_eq!(s.focus, Focus::Browse);
    }

    #[test]
    fn menu_jumps_and_closes() {
        let mut s = mounted();
        apply(&mut s, Action::ToggleMenu);
        assert_eq!(s.focus, Focus::Menu);
        apply(&mut s, Action::MenuMove(3));
        apply(&mut s, Action::MenuChoose);
        assert_eq!(s.scroll, 80);
        assert!(!s.nav.menu_open);
        assert_eq!(s.focus, Focus::Browse);
    }

    #[test]
    fn toast_expires() {
        let mut s = mounted();
        s.set_message("hi", 2);
        advance(&mut s, 5_000);
        assert_eq!(s.message, "hi");
        advance(&mut s, 5_010);
        assert!(s.message.is_empty());
    }

    #[test]
    fn teardown_stops_everything() {
        let mut s = site();
        s.start(0);
        run(&mut s, 0, 1_000);
        s.teardown();
        assert!(run(&mut s, 1_000, 20_000).is_empty());
        assert_eq!(s.stage, Stage::Intro);
    }
}
