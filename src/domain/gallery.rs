/// Project gallery: category filter + lightbox.
///
/// The gallery borrows nothing from the catalog across calls. The opened
/// project is held by id and resolved on demand, so the catalog stays the
/// single owner of project data.

use super::content::{Catalog, Category, Project};

/// Active filter. Parsing a label never fails: anything that is neither
/// "All" nor a known category is kept as `Unknown` and matches nothing.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Filter {
    All,
    Only(Category),
    Unknown(String),
}

impl Filter {
    pub fn parse(label: &str) -> Filter {
        if label == "All" {
            Filter::All
        } else if let Some(c) = Category::from_label(label) {
            Filter::Only(c)
        } else {
            Filter::Unknown(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Filter::All => "All",
            Filter::Only(c) => c.label(),
            Filter::Unknown(s) => s,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(c) => project.category == *c,
            Filter::Unknown(_) => false,
        }
    }

    /// The filter bar, in display order.
    pub fn bar() -> Vec<Filter> {
        std::iter::once(Filter::All)
            .chain(Category::ALL.into_iter().map(Filter::Only))
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct Gallery {
    active_filter: Filter,
    open_project: Option<u32>,
    /// Keyboard selection within the filtered list.
    cursor: usize,
}

impl Default for Gallery {
    fn default() -> Self {
        Gallery::new()
    }
}

impl Gallery {
    pub fn new() -> Self {
        Gallery {
            active_filter: Filter::All,
            open_project: None,
            cursor: 0,
        }
    }

    pub fn active_filter(&self) -> &Filter {
        &self.active_filter
    }

    pub fn set_filter(&mut self, label: &str) {
        self.apply_filter(Filter::parse(label));
    }

    pub fn apply_filter(&mut self, filter: Filter) {
        self.active_filter = filter;
        self.cursor = 0;
    }

    /// Step through the filter bar, wrapping. An unknown filter restarts at "All".
    pub fn cycle_filter(&mut self, delta: i32) {
        let bar = Filter::bar();
        let n = bar.len() as i32;
        let next = match bar.iter().position(|f| *f == self.active_filter) {
            Some(i) => (i as i32 + delta).rem_euclid(n) as usize,
            None => 0,
        };
        self.apply_filter(bar[next].clone());
    }

    /// Projects matching the active filter, in catalog order.
    pub fn filtered_projects<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Project> {
        catalog
            .projects
            .iter()
            .filter(|p| self.active_filter.matches(p))
            .collect()
    }

    pub fn open_project(&mut self, project: &Project) {
        self.open_project = Some(project.id);
    }

    pub fn close_project(&mut self) {
        self.open_project = None;
    }

    pub fn is_open(&self) -> bool {
        self.open_project.is_some()
    }

    pub fn opened<'a>(&self, catalog: &'a Catalog) -> Option<&'a Project> {
        self.open_project.and_then(|id| catalog.project(id))
    }

    // ── Keyboard selection ──

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, catalog: &Catalog, delta: i32) {
        let n = self.filtered_projects(catalog).len();
        if n == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor as i32 + delta).clamp(0, n as i32 - 1) as usize;
    }

    pub fn selected<'a>(&self, catalog: &'a Catalog) -> Option<&'a Project> {
        self.filtered_projects(catalog).get(self.cursor).copied()
    }

    /// Open the project under the cursor. Returns false if the list is empty.
    pub fn open_selected(&mut self, catalog: &Catalog) -> bool {
        match self.selected(catalog) {
            Some(p) => {
                self.open_project(p);
                true
            }
            None => false,
        }
    }

    /// Lightbox prev/next within the filtered list. Replaces the open
    /// project and moves the cursor along with it.
    pub fn open_adjacent(&mut self, catalog: &Catalog, delta: i32) {
        let list = self.filtered_projects(catalog);
        if list.is_empty() {
            return;
        }
        let current = self
            .open_project
            .and_then(|id| list.iter().position(|p| p.id == id))
            .unwrap_or(self.cursor);
        let n = list.len() as i32;
        let next = (current as i32 + delta).rem_euclid(n) as usize;
        self.cursor = next;
        self.open_project = Some(list[next].id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&Project]) -> Vec<u32> {
        list.iter().map(|p| p.id).collect()
    }

    #[test]
    fn all_returns_full_catalog_in_order() {
        let c = Catalog::builtin();
        let g = Gallery::new();
        assert_eq!(ids(&g.filtered_projects(&c)), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn filtering_is_pure_and_idempotent() {
        let c = Catalog::builtin();
        let mut g = Gallery::new();
        g.set_filter("Workflow");
        let a = g.filtered_projects(&c);
        let b = g.filtered_projects(&c);
        assert_eq!(a, b);
        assert_eq!(ids(&a), vec![3, 5]);
    }

    #[test]
    fn sales_filter_keeps_only_that_category() {
        let c = Catalog::builtin();
        let mut g = Gallery::new();
        g.set_filter("Sales Automation");
        let list = g.filtered_projects(&c);
        assert!(!list.is_empty());
        assert!(list.iter().all(|p| p.category == Category::SalesAutomation));
        assert_eq!(ids(&list), vec![2]);

        g.set_filter("Data Automation");
        assert_eq!(ids(&g.filtered_projects(&c)), vec![4, 7]);
    }

    #[test]
    fn unknown_or_empty_category_yields_nothing() {
        let mut c = Catalog::builtin();
        let mut g = Gallery::new();
        g.set_filter("Marketing");
        assert_eq!(g.active_filter(), &Filter::Unknown("Marketing".into()));
        assert!(g.filtered_projects(&c).is_empty());

        c.projects.retain(|p| p.category != Category::Workflow);
        g.set_filter("Workflow");
        assert!(g.filtered_projects(&c).is_empty());
        assert!(!g.open_selected(&c));
    }

    #[test]
    fn opening_replaces_and_close_clears() {
        let c = Catalog::builtin();
        let mut g = Gallery::new();
        g.open_project(&c.projects[0]);
        g.open_project(&c.projects[4]);
        assert_eq!(g.opened(&c).map(|p| p.id), Some(5));

        g.close_project();
        assert!(g.opened(&c).is_none());
        g.close_project();
        assert!(!g.is_open());
    }

    #[test]
    fn filter_bar_cycles_and_resets_cursor() {
        let c = Catalog::builtin();
        let mut g = Gallery::new();
        g.move_cursor(&c, 3);
        assert_eq!(g.cursor(), 3);

        g.cycle_filter(1);
        assert_eq!(g.active_filter(), &Filter::Only(Category::CustomerSupport));
        assert_eq!(g.cursor(), 0);
        g.cycle_filter(-2);
        assert_eq!(g.active_filter(), &Filter::Only(Category::Workflow));

        g.set_filter("nope");
        g.cycle_filter(1);
        assert_eq!(g.active_filter(), &Filter::All);
    }

    #[test]
    fn cursor_is_clamped_to_filtered_list() {
        let c = Catalog::builtin();
        let mut g = Gallery::new();
        g.set_filter("Customer Support");
        g.move_cursor(&c, 10);
        assert_eq!(g.cursor(), 1);
        assert_eq!(g.selected(&c).map(|p| p.id), Some(6));
        g.move_cursor(&c, -5);
        assert_eq!(g.cursor(), 0);
    }

    #[test]
    fn lightbox_steps_through_filtered_list() {
        let c = Catalog::builtin();
        let mut g = Gallery::new();
        g.set_filter("Data Automation");
        assert!(g.open_selected(&c));
        assert_eq!(g.opened(&c).map(|p| p.id), Some(4));
        g.open_adjacent(&c, 1);
        assert_eq!(g.opened(&c).map(|p| p.id), Some(7));
        g.open_adjacent(&c, 1);
        assert_eq!(g.opened(&c).map(|p| p.id), Some(4));
        g.open_adjacent(&c, -1);
        assert_eq!(g.opened(&c).map(|p| p.id), Some(7));
        assert_eq!(g.cursor(), 1);
    }
}
