/// Page sections and the navigation bar state.
///
/// The bar condenses once the page is scrolled past a small offset, and a
/// "back to top" affordance appears past a larger one. The menu overlay
/// lists the section anchors; picking one closes it.

use crate::config::NavConfig;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Section {
    Hero,
    About,
    Skills,
    Projects,
    Services,
    Contact,
    Footer,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Hero,
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Services,
        Section::Contact,
        Section::Footer,
    ];

    /// Sections reachable from the navigation bar, in bar order.
    pub const ANCHORS: [Section; 5] = [
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Services,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Services => "Services",
            Section::Contact => "Contact",
            Section::Footer => "Footer",
        }
    }

    /// Sections that fade in on first sight. The hero is on screen from the start.
    pub fn has_reveal(self) -> bool {
        !matches!(self, Section::Hero | Section::Footer)
    }
}

#[derive(Clone, Debug)]
pub struct NavState {
    config: NavConfig,
    pub scrolled: bool,
    pub show_scroll_top: bool,
    pub menu_open: bool,
    pub menu_cursor: usize,
}

impl NavState {
    pub fn new(config: NavConfig) -> Self {
        NavState {
            config,
            scrolled: false,
            show_scroll_top: false,
            menu_open: false,
            menu_cursor: 0,
        }
    }

    pub fn on_scroll(&mut self, offset: usize) {
        self.scrolled = offset > self.config.scrolled_offset;
        self.show_scroll_top = offset > self.config.scroll_top_offset;
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        self.menu_cursor = 0;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn move_menu_cursor(&mut self, delta: i32) {
        let n = Section::ANCHORS.len() as i32;
        self.menu_cursor = (self.menu_cursor as i32 + delta).rem_euclid(n) as usize;
    }

    /// Pick the highlighted anchor; closes the menu.
    pub fn choose(&mut self) -> Section {
        self.menu_open = false;
        Section::ANCHORS[self.menu_cursor.min(Section::ANCHORS.len() - 1)]
    }
}
