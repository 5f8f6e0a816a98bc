/// Events emitted while the site advances or handles input.
/// The event loop logs them; nothing else depends on them.

use crate::domain::intro::IntroPhase;
use crate::domain::nav::Section;

#[derive(Clone, Debug, PartialEq)]
pub enum SiteEvent {
    IntroPhase(IntroPhase),
    IntroComplete,
    ContentVisible,
    TypingChanged,
    SectionRevealed(Section),
    FilterChanged(String),
    ProjectOpened(u32),
    ProjectClosed,
    FormRejected(&'static str),
    FormSubmitted,
}
