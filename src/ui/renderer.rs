/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Every animation (particles, logo glow, section slide-in, cursor blink)
/// is interpolated here from timestamps held in the site state. The
/// renderer also measures the page and writes the spans back into
/// `SiteState::layout`, which is what the reveal gates observe.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::intro::IntroPhase;
use crate::domain::nav::Section;
use crate::sim::site::{Focus, PageLayout, SiteState, Stage};
use super::layout::{self, Page, Tone};

type Rgb = (u8, u8, u8);

const BASE: Rgb = (10, 10, 20);
const CYAN: Rgb = (0, 245, 255);
const PURPLE: Rgb = (191, 0, 255);
const PINK: Rgb = (255, 0, 212);
const BLUE: Rgb = (0, 162, 255);
const WHITE: Rgb = (230, 230, 240);
const GREY: Rgb = (140, 140, 160);
const PANEL: Rgb = (24, 24, 44);

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
    wide: bool, // occupies 2 terminal columns
    cont: bool, // right half of a wide char (never printed)
}

impl Cell {
    /// Explicit background for every cell, matched by `Clear`, so row gaps
    /// never show the terminal's own default color.
    const BASE_BG: Color = Color::Rgb { r: BASE.0, g: BASE.1, b: BASE.2 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG, wide: false, cont: false };

    /// Sentinel used to invalidate the back buffer.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta, wide: false, cont: false };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg, wide: false, cont: false }
    }

    fn new_wide(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg, wide: true, cont: false }
    }

    fn continuation(bg: Color) -> Self {
        Cell { ch: ' ', fg: Color::White, bg, wide: false, cont: true }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = y * self.width + x;
        // Never leave half of a wide char behind.
        let old = self.cells[i];
        if old.wide && x + 1 < self.width {
            self.cells[i + 1] = Cell::new(' ', old.fg, old.bg);
        }
        if old.cont && !cell.cont && x > 0 {
            let left = self.cells[i - 1];
            self.cells[i - 1] = Cell::new(' ', left.fg, left.bg);
        }
        self.cells[i] = cell;
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y), advancing by each char's display width.
    /// Zero-width chars are dropped; a wide char that would straddle the
    /// right edge ends the string.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut col = x;
        for ch in s.chars() {
            let w = ch.width().unwrap_or(0);
            if w == 0 {
                continue;
            }
            if col + w > self.width {
                break;
            }
            if w == 2 {
                self.set(col, y, Cell::new_wide(ch, fg, bg));
                self.set(col + 1, y, Cell::continuation(bg));
            } else {
                self.set(col, y, Cell::new(ch, fg, bg));
            }
            col += w;
        }
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', Color::White, bg));
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, bg: Color) {
        for row in y..y + h {
            for col in x..x + w {
                self.set(col, row, Cell::new(' ', Color::White, bg));
            }
        }
    }

    fn frame(&mut self, x: usize, y: usize, w: usize, h: usize, fg: Color, bg: Color) {
        if w < 2 || h < 2 {
            return;
        }
        self.fill_rect(x, y, w, h, bg);
        let (r, b) = (x + w - 1, y + h - 1);
        for col in x + 1..r {
            self.set(col, y, Cell::new('─', fg, bg));
            self.set(col, b, Cell::new('─', fg, bg));
        }
        for row in y + 1..b {
            self.set(x, row, Cell::new('│', fg, bg));
            self.set(r, row, Cell::new('│', fg, bg));
        }
        self.set(x, y, Cell::new('┌', fg, bg));
        self.set(r, y, Cell::new('┐', fg, bg));
        self.set(x, b, Cell::new('└', fg, bg));
        self.set(r, b, Cell::new('┘', fg, bg));
    }
}

// ── Color helpers ──

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// Linear blend from `a` (t = 0) to `b` (t = 1).
fn mix(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Cheap integer hash for stable per-particle randomness.
fn hash(mut n: u32) -> u32 {
    n ^= n >> 16;
    n = n.wrapping_mul(0x7feb_352d);
    n ^= n >> 15;
    n = n.wrapping_mul(0x846c_a68b);
    n ^ (n >> 16)
}

fn tone_color(tone: Tone) -> (Rgb, Rgb) {
    match tone {
        Tone::Plain => (WHITE, BASE),
        Tone::Dim => (GREY, BASE),
        Tone::Kicker => (CYAN, BASE),
        Tone::Heading => ((245, 245, 255), BASE),
        Tone::Name => (CYAN, BASE),
        Tone::Typing => (PURPLE, BASE),
        Tone::Badge => ((80, 255, 120), BASE),
        Tone::Accent => (BLUE, BASE),
        Tone::Bar => (PURPLE, BASE),
        Tone::Selected => ((0, 0, 0), CYAN),
        Tone::Field => (WHITE, PANEL),
        Tone::FieldFocus => (WHITE, (40, 40, 90)),
        Tone::Button => (PINK, BASE),
        Tone::Link => (CYAN, BASE),
        Tone::Tint(r, g, b) => ((r, g, b), BASE),
    }
}

// ── Renderer ──

const NAV_ROW: usize = 0;
const PAGE_ROW: usize = 1;
/// Nav bar + status line.
const RESERVED_ROWS: usize = 2;
const PARTICLES: u32 = 60;
/// Column shift of a section at the start of its entrance.
const SLIDE_COLS: f32 = 6.0;
/// Page-wide fade after the intro hands over.
const PAGE_FADE_MS: f32 = 500.0;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_stage: Option<Stage>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_stage: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame.
        self.back.cells.fill(Cell::INVALID);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    /// Rows of page visible under the nav bar.
    pub fn view_rows(&self) -> usize {
        self.term_h.saturating_sub(RESERVED_ROWS).max(1)
    }

    pub fn render(&mut self, site: &mut SiteState) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Stage change: clean transition.
        if self.last_stage != Some(site.stage) {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_stage = Some(site.stage);
        }

        self.front.clear();

        match site.stage {
            Stage::Intro => self.compose_intro(site),
            Stage::Content => {
                let view_rows = self.view_rows();
                let page = layout::build(site, self.term_w, view_rows);
                site.layout = PageLayout {
                    spans: page.spans.clone(),
                    total_rows: page.lines.len(),
                    view_rows,
                };
                // A resize or filter change can shrink the page under us.
                site.scroll = site.scroll.min(site.layout.max_scroll());

                if site.content_visible {
                    self.compose_page(site, &page);
                    self.compose_nav(site);
                    if site.nav.show_scroll_top {
                        self.compose_scroll_top_hint();
                    }
                    match site.focus {
                        Focus::Menu => self.compose_menu(site),
                        Focus::Lightbox => self.compose_lightbox(site),
                        _ => {}
                    }
                    self.compose_status(site);
                }
            }
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Never ResetColor here: the terminal default may differ from BASE_BG.
        queue!(self.writer, SetForegroundColor(Color::White), SetBackgroundColor(Cell::BASE_BG))?;

        for y in 0..self.front.height {
            let mut x = 0;
            while x < self.front.width {
                let cell = self.front.get(x, y);
                let prev = self.back.get(x, y);

                // The wide cell to the left already drew this column.
                if cell.cont {
                    if cell != prev {
                        need_move = true;
                    }
                    x += 1;
                    continue;
                }

                let cont_changed = cell.wide
                    && x + 1 < self.front.width
                    && self.front.get(x + 1, y) != self.back.get(x + 1, y);
                if cell == prev && !cont_changed {
                    need_move = true;
                    x += 1;
                    continue;
                }
                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                if cell.wide {
                    last_x = x + 1;
                    x += 2;
                } else {
                    last_x = x;
                    x += 1;
                }
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Intro ──

    fn compose_intro(&mut self, site: &SiteState) {
        let now = site.now;
        let intro = &site.intro;
        let (w, h) = (self.front.width, self.front.height);
        if w == 0 || h == 0 {
            return;
        }
        let (cx, cy) = (w / 2, h / 2);
        let elapsed = intro.elapsed(now);
        let p = intro.progress(now);

        // Convergence toward the center while forming; gone once the logo glows.
        let pull = match intro.phase() {
            IntroPhase::Particles => 0.0,
            IntroPhase::Forming => p,
            IntroPhase::Glow | IntroPhase::Fadeout => 1.0,
        };
        if pull < 1.0 {
            for i in 0..PARTICLES {
                let seed = hash(i);
                let speed = 60 + (seed % 120) as u64;
                let bx = (seed % w as u32) as f32;
                let by = ((hash(seed) % h as u32) as u64 + h as u64 - (elapsed / speed) % h as u64) % h as u64;
                let x = bx + (cx as f32 - bx) * pull;
                let y = by as f32 + (cy as f32 - by as f32) * pull;
                let color = [CYAN, PURPLE, PINK][i as usize % 3];
                let glyph = if seed % 5 == 0 { '✦' } else { '·' };
                let fg = mix(BASE, color, 1.0 - pull * 0.5);
                self.front.set(x.round() as usize, y.round() as usize, Cell::new(glyph, rgb(fg), Cell::BASE_BG));
            }
        }

        // Logo.
        let strength = match intro.phase() {
            IntroPhase::Particles => 0.0,
            IntroPhase::Forming => p,
            IntroPhase::Glow => 1.0,
            IntroPhase::Fadeout => 1.0 - p,
        };
        if strength > 0.0 {
            let pulse = ((site.anim_tick / 4) % 8) as f32 / 8.0;
            let glow = if intro.phase() == IntroPhase::Glow { mix(CYAN, PURPLE, pulse) } else { CYAN };
            let fg = rgb(mix(BASE, glow, strength));
            let initials: String = site.catalog.profile.initials.chars().flat_map(|c| [c, ' ']).collect();
            let initials = initials.trim_end();
            let inner = initials.width() + 6;
            let bx = cx.saturating_sub(inner / 2 + 1);
            let by = cy.saturating_sub(2);
            self.front.put_str(bx, by, &format!("╔{}╗", "═".repeat(inner)), fg, Cell::BASE_BG);
            self.front.put_str(bx, by + 1, &format!("║   {initials}   ║"), fg, Cell::BASE_BG);
            self.front.put_str(bx, by + 2, &format!("╚{}╝", "═".repeat(inner)), fg, Cell::BASE_BG);

            let name = &site.catalog.profile.name;
            let name_fg = rgb(mix(BASE, WHITE, strength));
            self.front.put_str(cx.saturating_sub(name.width() / 2), by + 4, name, name_fg, Cell::BASE_BG);
        }

        // Loading bar.
        let total = site.config.intro.complete_ms.max(1);
        let frac = (elapsed.min(total) as f32) / total as f32;
        let bar_w = 30.min(w.saturating_sub(4));
        let filled = (frac * bar_w as f32).round() as usize;
        let bar = format!("{}{}", "━".repeat(filled), "─".repeat(bar_w - filled));
        self.front.put_str(cx.saturating_sub(bar_w / 2), h.saturating_sub(3), &bar, rgb(mix(BASE, BLUE, 0.8)), Cell::BASE_BG);
    }

    // ── Page ──

    fn compose_page(&mut self, site: &SiteState, page: &Page) {
        let entrance_ms = site.config.reveal.entrance_ms;
        let view_rows = site.layout.view_rows;
        let blink = (site.anim_tick / 10) % 2 == 0;
        let page_fade = site
            .content_visible_at
            .map_or(1.0, |t0| (site.now.saturating_sub(t0) as f32 / PAGE_FADE_MS).min(1.0));

        for screen_row in 0..view_rows {
            let row = site.scroll + screen_row;
            let Some(line) = page.lines.get(row) else { break };
            let section = page.section_of(row).unwrap_or(Section::Hero);

            if !site.is_revealed(section) {
                continue;
            }
            let t = site.gate(section).map_or(1.0, |g| g.entrance(site.now, entrance_ms));
            let shift = ((1.0 - t) * SLIDE_COLS).round() as usize;
            let (fg, bg) = tone_color(line.tone);
            let fg = rgb(mix(BASE, fg, t * page_fade));
            let bg = rgb(mix(BASE, bg, t * page_fade));

            let y = PAGE_ROW + screen_row;
            let x = line.indent + shift;
            if matches!(line.tone, Tone::Selected | Tone::Field | Tone::FieldFocus) {
                self.front.fill_rect(x, y, line.text.width(), 1, bg);
            }
            self.front.put_str(x, y, &line.text, fg, bg);
            if line.tone == Tone::Typing && blink && site.typing.is_running() {
                let end = x + line.text.width();
                let glyph = if site.typing.is_deleting() { '▏' } else { '▌' };
                self.front.set(end, y, Cell::new(glyph, rgb(CYAN), Cell::BASE_BG));
            }
        }
    }

    fn compose_nav(&mut self, site: &SiteState) {
        let condensed = site.nav.scrolled;
        let bg = if condensed { rgb(PANEL) } else { Cell::BASE_BG };
        self.front.fill_row(NAV_ROW, bg);

        let initials = &site.catalog.profile.initials;
        self.front.put_str(layout::MARGIN, NAV_ROW, initials, rgb(CYAN), bg);

        let active = site.layout.section_at(site.scroll);
        let mut x = layout::MARGIN + initials.width() + 3;
        for (i, section) in Section::ANCHORS.iter().enumerate() {
            let label = if condensed {
                section.label().to_string()
            } else {
                format!("{} {}", i + 1, section.label())
            };
            let fg = if active == Some(*section) { rgb(CYAN) } else { rgb(GREY) };
            self.front.put_str(x, NAV_ROW, &label, fg, bg);
            x += label.width() + 2;
        }

        let menu = "m Menu";
        let mx = self.front.width.saturating_sub(menu.width() + layout::MARGIN);
        if mx > x {
            self.front.put_str(mx, NAV_ROW, menu, rgb(PINK), bg);
        }
    }

    fn compose_scroll_top_hint(&mut self) {
        let label = " ↑ Home ";
        let x = self.front.width.saturating_sub(label.width() + layout::MARGIN);
        let y = self.term_h.saturating_sub(3);
        self.front.put_str(x, y, label, Color::Black, rgb(CYAN));
    }

    fn compose_menu(&mut self, site: &SiteState) {
        let w = 22.min(self.front.width);
        let h = Section::ANCHORS.len() + 2;
        let x = self.front.width.saturating_sub(w + 1);
        let y = PAGE_ROW;
        self.front.frame(x, y, w, h, rgb(PINK), rgb(PANEL));
        for (i, section) in Section::ANCHORS.iter().enumerate() {
            let selected = i == site.nav.menu_cursor;
            let (fg, bg) = if selected { (Color::Black, rgb(CYAN)) } else { (rgb(WHITE), rgb(PANEL)) };
            let label = format!(" {} {:<width$}", i + 1, section.label(), width = w.saturating_sub(6));
            self.front.put_str(x + 1, y + 1 + i, &label, fg, bg);
        }
    }

    fn compose_lightbox(&mut self, site: &SiteState) {
        let Some(project) = site.gallery.opened(&site.catalog) else { return };
        let list = site.gallery.filtered_projects(&site.catalog);
        let position = list.iter().position(|p| p.id == project.id).map_or(0, |i| i + 1);

        let w = 72.min(self.front.width.saturating_sub(4)).max(20);
        let text_w = w - 4;
        let mut lines: Vec<(String, Rgb)> = Vec::new();
        lines.push((project.title.clone(), (245, 245, 255)));
        lines.push((format!("{}   {}/{}", project.category.label(), position, list.len()), CYAN));
        lines.push((String::new(), WHITE));
        for row in layout::wrap(&project.description, text_w) {
            lines.push((row, GREY));
        }
        lines.push((String::new(), WHITE));
        lines.push(("Key Results".into(), PURPLE));
        for m in &project.metrics {
            for row in layout::wrap(&format!("✓ {m}"), text_w) {
                lines.push((row, WHITE));
            }
        }
        lines.push((String::new(), WHITE));
        lines.push(("Tools Used".into(), PURPLE));
        for row in layout::wrap(&project.tools.join(" · "), text_w) {
            lines.push((row, BLUE));
        }
        if !project.image_ref.is_empty() {
            lines.push((String::new(), WHITE));
            for row in layout::wrap(&format!("Image: {}", project.image_ref), text_w) {
                lines.push((row, GREY));
            }
        }
        lines.push((String::new(), WHITE));
        lines.push(("←/→ previous/next    Esc close".into(), PINK));

        let max_h = self.front.height.saturating_sub(2);
        let h = (lines.len() + 2).min(max_h);
        let x = (self.front.width.saturating_sub(w)) / 2;
        let y = (self.front.height.saturating_sub(h)) / 2;
        self.front.frame(x, y, w, h, rgb(CYAN), rgb(PANEL));
        for (i, (text, fg)) in lines.iter().take(h.saturating_sub(2)).enumerate() {
            self.front.put_str(x + 2, y + 1 + i, text, rgb(*fg), rgb(PANEL));
        }
    }

    fn compose_status(&mut self, site: &SiteState) {
        let y = self.front.height.saturating_sub(1);
        if !site.message.is_empty() {
            let bg = rgb((200, 180, 50));
            self.front.fill_row(y, bg);
            self.front.put_str(0, y, &format!(" ◈ {} ", site.message), Color::Black, bg);
            return;
        }
        let help = match site.focus {
            Focus::Browse => "↑↓ scroll  1-5 sections  f filter  0 all  ←→ select  Enter open  c contact  m menu  q quit",
            Focus::Menu => "↑↓ choose  Enter go  Esc close",
            Focus::Lightbox => "←→ previous/next  Esc close",
            Focus::Form => "type to edit  Tab next field  Enter send (on message)  Esc done",
        };
        self.front.put_str(1, y, help, rgb(GREY), Cell::BASE_BG);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_hits_both_ends() {
        assert_eq!(mix(BASE, CYAN, 0.0), BASE);
        assert_eq!(mix(BASE, CYAN, 1.0), CYAN);
        assert_eq!(mix((0, 0, 0), (200, 100, 50), 0.5), (100, 50, 25));
    }

    #[test]
    fn hash_is_stable_and_spread() {
        assert_eq!(hash(7), hash(7));
        let distinct: std::collections::HashSet<u32> = (0..PARTICLES).map(hash).collect();
        assert_eq!(distinct.len(), PARTICLES as usize);
    }

    #[test]
    fn frame_draws_corners_inside_bounds() {
        let mut buf = FrameBuffer::new(10, 5);
        buf.frame(1, 1, 4, 3, Color::White, Cell::BASE_BG);
        assert_eq!(buf.get(1, 1).ch, '┌');
        assert_eq!(buf.get(4, 3).ch, '┘');
        assert_eq!(buf.get(2, 2).ch, ' ');
        buf.put_str(8, 0, "abc", Color::White, Cell::BASE_BG);
        assert_eq!(buf.get(9, 0).ch, 'b');
    }

    #[test]
    fn wide_chars_take_two_columns() {
        let mut buf = FrameBuffer::new(6, 1);
        buf.put_str(0, 0, "日本x", Color::White, Cell::BASE_BG);
        assert!(buf.get(0, 0).wide);
        assert!(buf.get(1, 0).cont);
        assert_eq!(buf.get(2, 0).ch, '本');
        assert_eq!(buf.get(4, 0).ch, 'x');

        // A wide char never straddles the right edge.
        buf.put_str(5, 0, "語", Color::White, Cell::BASE_BG);
        assert_eq!(buf.get(5, 0), Cell::BLANK);
    }

    #[test]
    fn overwriting_half_a_wide_char_clears_the_other_half() {
        let mut buf = FrameBuffer::new(6, 1);
        buf.put_str(0, 0, "日本", Color::White, Cell::BASE_BG);
        buf.put_str(1, 0, "a", Color::White, Cell::BASE_BG);
        assert_eq!(buf.get(0, 0).ch, ' ');
        assert!(!buf.get(0, 0).wide);
        assert_eq!(buf.get(1, 0).ch, 'a');

        buf.put_str(2, 0, "b", Color::White, Cell::BASE_BG);
        assert_eq!(buf.get(2, 0).ch, 'b');
        assert!(!buf.get(3, 0).cont);
    }
}
