/// Page layout: turns the site state into a flat list of styled lines.
///
/// Layout is pure. It knows nothing about the terminal beyond a column
/// width and the viewport height, so section spans can be measured (and
/// tested) without a screen. The renderer scrolls over `Page::lines` and
/// hands `Page::spans` back to the site for the reveal gates.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::contact::Field;
use crate::domain::content::Catalog;
use crate::domain::gallery::Filter;
use crate::domain::nav::Section;
use crate::sim::site::{Focus, SiteState};

/// Left/right margin in columns.
pub const MARGIN: usize = 2;
/// Text never runs wider than this, even on wide terminals.
const MAX_TEXT: usize = 78;
const FIELD_W: usize = 48;
const BAR_W: usize = 10;

/// Columns taken by the skill bar and its percentage.
const BAR_ROW_W: usize = 2 + BAR_W + 5;

/// Visual role of a line. The renderer picks colors per tone.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tone {
    Plain,
    Dim,
    Kicker,
    Heading,
    Name,
    Typing,
    Badge,
    Accent,
    Bar,
    Selected,
    Field,
    FieldFocus,
    Button,
    Link,
    /// Content-supplied color.
    Tint(u8, u8, u8),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Line {
    pub indent: usize,
    pub text: String,
    pub tone: Tone,
}

#[derive(Clone, Debug, Default)]
pub struct Page {
    pub lines: Vec<Line>,
    pub spans: Vec<(Section, usize, usize)>,
}

impl Page {
    pub fn section_of(&self, row: usize) -> Option<Section> {
        self.spans
            .iter()
            .find(|&&(_, top, h)| row >= top && row < top + h)
            .map(|&(s, _, _)| s)
    }
}

// ── Builder ──

struct Builder {
    lines: Vec<Line>,
    spans: Vec<(Section, usize, usize)>,
    text_w: usize,
    open: Option<(Section, usize)>,
}

impl Builder {
    fn new(width: usize) -> Self {
        Builder {
            lines: Vec::with_capacity(256),
            spans: Vec::with_capacity(Section::ALL.len()),
            text_w: width.saturating_sub(MARGIN * 2).clamp(10, MAX_TEXT),
            open: None,
        }
    }

    fn begin(&mut self, section: Section) {
        self.end();
        self.open = Some((section, self.lines.len()));
    }

    fn end(&mut self) {
        if let Some((section, top)) = self.open.take() {
            self.spans.push((section, top, self.lines.len() - top));
        }
    }

    fn line(&mut self, indent: usize, text: impl Into<String>, tone: Tone) {
        self.lines.push(Line { indent: MARGIN + indent, text: text.into(), tone });
    }

    fn blank(&mut self) {
        self.line(0, "", Tone::Plain);
    }

    fn para(&mut self, indent: usize, text: &str, tone: Tone) {
        let w = self.text_w.saturating_sub(indent).max(1);
        for row in wrap(text, w) {
            self.line(indent, row, tone);
        }
    }

    fn header(&mut self, kicker: &str, title: &str, subtitle: Option<&str>) {
        self.blank();
        self.para(0, kicker, Tone::Kicker);
        self.para(0, title, Tone::Heading);
        if let Some(s) = subtitle {
            self.para(0, s, Tone::Dim);
        }
        self.blank();
    }

    fn finish(mut self) -> Page {
        self.end();
        Page { lines: self.lines, spans: self.spans }
    }
}

/// Lay out the whole page for a terminal `width` columns wide with
/// `view_rows` rows of viewport.
pub fn build(site: &SiteState, width: usize, view_rows: usize) -> Page {
    let mut b = Builder::new(width);
    let catalog = &site.catalog;

    hero(&mut b, site, view_rows);
    about(&mut b, catalog);
    skills(&mut b, catalog);
    projects(&mut b, site);
    services(&mut b, catalog);
    contact(&mut b, site);
    footer(&mut b, catalog);

    b.finish()
}

fn hero(b: &mut Builder, site: &SiteState, view_rows: usize) {
    let profile = &site.catalog.profile;
    b.begin(Section::Hero);
    b.blank();
    b.para(0, &format!("● {}", profile.badge), Tone::Badge);
    b.blank();
    b.line(0, "Hi, I'm", Tone::Dim);
    b.para(0, &profile.name, Tone::Name);
    b.line(0, format!("> {}", site.typing.display_text()), Tone::Typing);
    b.blank();
    b.para(0, &profile.summary, Tone::Plain);
    b.blank();

    let stats: Vec<String> = site
        .catalog
        .stats
        .iter()
        .map(|s| format!("{} {}", s.value, s.label))
        .collect();
    for row in pack(&stats, "   ", b.text_w) {
        b.line(0, row, Tone::Accent);
    }
    b.blank();
    b.para(0, "[3] View My Work   [5] Get In Touch", Tone::Button);

    // The hero fills the first screen.
    let top = b.open.map_or(0, |(_, t)| t);
    while b.lines.len() - top < view_rows {
        b.blank();
    }
}

fn about(b: &mut Builder, catalog: &Catalog) {
    b.begin(Section::About);
    b.header("About Me", "Transforming Businesses with AI Automation", None);
    b.para(0, &catalog.profile.summary, Tone::Plain);
    b.blank();
    for h in &catalog.highlights {
        b.para(2, &format!("✓ {h}"), Tone::Plain);
    }
    b.blank();
}

fn skills(b: &mut Builder, catalog: &Catalog) {
    b.begin(Section::Skills);
    b.header(
        "My Expertise",
        "Skills & Tech Stack",
        Some("Leveraging cutting-edge tools and technologies to build powerful AI automation solutions"),
    );
    let name_w = catalog.skills.iter().map(|s| s.name.width()).max().unwrap_or(0);
    let inline = name_w + BAR_ROW_W <= b.text_w;
    for skill in &catalog.skills {
        if inline {
            b.line(0, skill_row(&skill.name, skill.level, name_w), Tone::Bar);
        } else {
            // Too narrow: name above, bar below.
            b.para(0, &skill.name, Tone::Bar);
            b.line(0, skill_row("", skill.level, 0), Tone::Bar);
        }
        b.para(2, &skill.description, Tone::Dim);
    }
    b.blank();
}

fn skill_row(name: &str, level: u8, name_w: usize) -> String {
    let level = level.min(100) as usize;
    let filled = (level * BAR_W + 50) / 100;
    // `{:<}` pads by char count, not columns.
    let pad = name_w.saturating_sub(name.width());
    format!(
        "{name}{}  {}{} {:>3}%",
        " ".repeat(pad),
        "█".repeat(filled),
        "░".repeat(BAR_W - filled),
        level,
    )
}

fn projects(b: &mut Builder, site: &SiteState) {
    let gallery = &site.gallery;
    b.begin(Section::Projects);
    b.header(
        "My Work",
        "Featured Projects",
        Some("Explore my portfolio of AI automation solutions that have transformed businesses"),
    );

    let active = gallery.active_filter();
    let chips: Vec<String> = Filter::bar()
        .iter()
        .map(|f| if f == active { format!("[{}]", f.label()) } else { format!(" {} ", f.label()) })
        .collect();
    for row in pack(&chips, " ", b.text_w) {
        b.line(0, row, Tone::Accent);
    }
    b.blank();

    let list = gallery.filtered_projects(&site.catalog);
    if list.is_empty() {
        b.para(0, &format!("No projects in \"{}\".", active.label()), Tone::Dim);
        b.blank();
        return;
    }
    for (i, project) in list.iter().enumerate() {
        let selected = i == gallery.cursor();
        let (marker, tone) = if selected { ("▶ ", Tone::Selected) } else { ("  ", Tone::Heading) };
        b.para(0, &format!("{marker}{}", project.title), tone);
        b.para(2, project.category.label(), Tone::Kicker);
        b.para(2, &project.description, Tone::Dim);
        b.para(2, &project.tools.join(" · "), Tone::Accent);
        b.blank();
    }
    b.para(0, "←/→ select   Enter details   f/F filter   0 all", Tone::Dim);
    b.blank();
}

fn services(b: &mut Builder, catalog: &Catalog) {
    b.begin(Section::Services);
    b.header(
        "What I Offer",
        "My Services",
        Some("Comprehensive AI automation solutions tailored to your business needs"),
    );
    for service in &catalog.services {
        let tone = service.accent_rgb().map_or(Tone::Heading, |(r, g, b)| Tone::Tint(r, g, b));
        b.para(0, &format!("◆ {}", service.title), tone);
        b.para(2, &service.description, Tone::Dim);
        b.blank();
    }
}

fn contact(b: &mut Builder, site: &SiteState) {
    let form = &site.contact;
    let editing = site.focus == Focus::Form;
    b.begin(Section::Contact);
    b.header(
        "Get In Touch",
        "Let's Work Together",
        Some("Ready to transform your business with AI automation? Let's discuss your project!"),
    );

    let box_w = FIELD_W.min(b.text_w.saturating_sub(4)).max(8);
    for field in Field::ORDER {
        let focused = editing && form.focused() == Some(field);
        b.line(0, field.label(), Tone::Dim);
        let tone = if focused { Tone::FieldFocus } else { Tone::Field };
        b.line(0, field_box(form.value(field), box_w, focused), tone);
    }
    b.blank();
    let hint = if editing { "Send Message  (Enter on message, Tab next field, Esc done)" } else { "Send Message  (press c to write)" };
    b.para(0, hint, Tone::Button);
    b.blank();

    b.para(0, "Other ways to reach me", Tone::Kicker);
    for link in &site.catalog.social_links {
        b.para(2, &link.label, Tone::Link);
        b.para(4, &link.href, Tone::Dim);
    }
    b.blank();
}

/// A one-line input box showing the tail of `value` when it overflows.
fn field_box(value: &str, width: usize, focused: bool) -> String {
    let inner = width.saturating_sub(4);
    let cursor = if focused { "_" } else { "" };
    let room = inner.saturating_sub(cursor.len());
    let mut start = value.len();
    let mut used = 0;
    for (i, c) in value.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > room {
            break;
        }
        used += w;
        start = i;
    }
    let body = format!("{}{cursor}", &value[start..]);
    let pad = inner.saturating_sub(body.width());
    format!("[ {body}{} ]", " ".repeat(pad))
}

fn footer(b: &mut Builder, catalog: &Catalog) {
    b.begin(Section::Footer);
    b.line(0, "─".repeat(b.text_w), Tone::Dim);
    b.para(0, &format!("{} | © {}. All rights reserved.", catalog.profile.initials, catalog.profile.name), Tone::Dim);
    b.blank();
}

// ── Text helpers ──

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_w = 0;

    for word in text.split_whitespace() {
        for piece in split_word(word, width) {
            let piece_w = piece.width();
            if row_w > 0 && row_w + 1 + piece_w > width {
                rows.push(std::mem::take(&mut row));
                row_w = 0;
            }
            if row_w > 0 {
                row.push(' ');
                row_w += 1;
            }
            row.push_str(&piece);
            row_w += piece_w;
        }
    }
    if row_w > 0 || rows.is_empty() {
        rows.push(row);
    }
    rows
}

/// Cut a word into pieces no wider than `width` columns. A single char
/// wider than `width` still gets a piece of its own.
fn split_word(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_w = 0;
    for c in word.chars() {
        let w = c.width().unwrap_or(0);
        if piece_w + w > width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            piece_w = 0;
        }
        piece.push(c);
        piece_w += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Pack whole chunks into rows of at most `width` columns.
fn pack(chunks: &[String], sep: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut row = String::new();
    for chunk in chunks {
        let w = row.width();
        if w > 0 && w + sep.width() + chunk.width() > width {
            rows.push(std::mem::take(&mut row));
        }
        if !row.is_empty() {
            row.push_str(sep);
        }
        row.push_str(chunk);
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}
