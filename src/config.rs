/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to the stock site timings if the file is missing,
/// incomplete, or holds values the controllers cannot run with.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub tick_rate_ms: u64,
    pub intro: IntroTiming,
    pub typing: TypingTiming,
    pub reveal: RevealConfig,
    pub nav: NavConfig,
    pub content_file: Option<PathBuf>,
    pub log_file: PathBuf,
    pub log_level: String,
}

/// Absolute offsets from intro activation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IntroTiming {
    pub forming_ms: u64,
    pub glow_ms: u64,
    pub fadeout_ms: u64,
    pub complete_ms: u64,
    /// Delay between intro completion and the page fading in.
    pub content_fade_ms: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TypingTiming {
    pub typing_speed_ms: u64,
    pub deleting_speed_ms: u64,
    pub pause_ms: u64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RevealConfig {
    pub threshold: f32,
    /// Length of the slide-in after a section is revealed.
    pub entrance_ms: u64,
}

/// Scroll offsets in rows.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NavConfig {
    pub scrolled_offset: usize,
    pub scroll_top_offset: usize,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    intro: TomlIntro,
    #[serde(default)]
    typing: TomlTyping,
    #[serde(default)]
    reveal: TomlReveal,
    #[serde(default)]
    nav: TomlNav,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default)]
    content_file: Option<String>,
    #[serde(default = "default_log_file")]
    log_file: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Deserialize, Debug)]
struct TomlIntro {
    #[serde(default = "default_forming")]
    forming_ms: u64,
    #[serde(default = "default_glow")]
    glow_ms: u64,
    #[serde(default = "default_fadeout")]
    fadeout_ms: u64,
    #[serde(default = "default_complete")]
    complete_ms: u64,
    #[serde(default = "default_content_fade")]
    content_fade_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlTyping {
    #[serde(default = "default_typing_speed")]
    typing_speed_ms: u64,
    #[serde(default = "default_deleting_speed")]
    deleting_speed_ms: u64,
    #[serde(default = "default_pause")]
    pause_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlReveal {
    #[serde(default = "default_threshold")]
    threshold: f32,
    #[serde(default = "default_entrance")]
    entrance_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlNav {
    #[serde(default = "default_scrolled_offset")]
    scrolled_offset: usize,
    #[serde(default = "default_scroll_top_offset")]
    scroll_top_offset: usize,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 50 }
fn default_log_file() -> String { "folio.log".into() }
fn default_log_level() -> String { "info".into() }
fn default_forming() -> u64 { 800 }
fn default_glow() -> u64 { 2200 }
fn default_fadeout() -> u64 { 3800 }
fn default_complete() -> u64 { 4500 }
fn default_content_fade() -> u64 { 100 }
fn default_typing_speed() -> u64 { 100 }
fn default_deleting_speed() -> u64 { 50 }
fn default_pause() -> u64 { 2000 }
fn default_threshold() -> f32 { 0.1 }
fn default_entrance() -> u64 { 800 }   // matches the 0.8s section fade
fn default_scrolled_offset() -> usize { 3 }     // ~50px
fn default_scroll_top_offset() -> usize { 30 }  // ~500px

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            tick_rate_ms: default_tick_rate(),
            content_file: None,
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

impl Default for TomlIntro {
    fn default() -> Self {
        TomlIntro {
            forming_ms: default_forming(),
            glow_ms: default_glow(),
            fadeout_ms: default_fadeout(),
            complete_ms: default_complete(),
            content_fade_ms: default_content_fade(),
        }
    }
}

impl Default for TomlTyping {
    fn default() -> Self {
        TomlTyping {
            typing_speed_ms: default_typing_speed(),
            deleting_speed_ms: default_deleting_speed(),
            pause_ms: default_pause(),
        }
    }
}

impl Default for TomlReveal {
    fn default() -> Self {
        TomlReveal {
            threshold: default_threshold(),
            entrance_ms: default_entrance(),
        }
    }
}

impl Default for TomlNav {
    fn default() -> Self {
        TomlNav {
            scrolled_offset: default_scrolled_offset(),
            scroll_top_offset: default_scroll_top_offset(),
        }
    }
}

impl Default for IntroTiming {
    fn default() -> Self {
        TomlIntro::default().into()
    }
}

impl Default for TypingTiming {
    fn default() -> Self {
        TomlTyping::default().into()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig::from_toml(TomlConfig::default(), &[])
    }
}

impl From<TomlIntro> for IntroTiming {
    fn from(t: TomlIntro) -> Self {
        IntroTiming {
            forming_ms: t.forming_ms,
            glow_ms: t.glow_ms,
            fadeout_ms: t.fadeout_ms,
            complete_ms: t.complete_ms,
            content_fade_ms: t.content_fade_ms,
        }
    }
}

impl From<TomlTyping> for TypingTiming {
    fn from(t: TomlTyping) -> Self {
        TypingTiming {
            typing_speed_ms: t.typing_speed_ms,
            deleting_speed_ms: t.deleting_speed_ms,
            pause_ms: t.pause_ms,
        }
    }
}

// ── Loading ──

impl SiteConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    /// A rejected file also yields defaults, plus the error so the caller
    /// can log it once logging is up.
    pub fn load() -> (Self, Option<ConfigError>) {
        let search_dirs = candidate_dirs();
        match find_config(&search_dirs) {
            Some(path) => match SiteConfig::load_file(&path, &search_dirs) {
                Ok(cfg) => (cfg, None),
                Err(e) => (SiteConfig::default(), Some(e)),
            },
            None => (SiteConfig::default(), None),
        }
    }

    pub fn load_file(path: &Path, search_dirs: &[PathBuf]) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        SiteConfig::from_toml_str(&text, search_dirs)
    }

    /// Parse and validate. Relative paths resolve against `search_dirs`.
    pub fn from_toml_str(text: &str, search_dirs: &[PathBuf]) -> Result<Self, ConfigError> {
        let toml_cfg: TomlConfig = toml::from_str(text)?;
        let cfg = SiteConfig::from_toml(toml_cfg, search_dirs);
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_toml(t: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        let content_file = t.general.content_file.map(|f| resolve_path(&f, search_dirs));
        SiteConfig {
            tick_rate_ms: t.general.tick_rate_ms,
            intro: t.intro.into(),
            typing: t.typing.into(),
            reveal: RevealConfig {
                threshold: t.reveal.threshold,
                entrance_ms: t.reveal.entrance_ms,
            },
            nav: NavConfig {
                scrolled_offset: t.nav.scrolled_offset,
                scroll_top_offset: t.nav.scroll_top_offset,
            },
            content_file,
            log_file: PathBuf::from(t.general.log_file),
            log_level: t.general.log_level,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("general.tick_rate_ms", self.tick_rate_ms),
            ("typing.typing_speed_ms", self.typing.typing_speed_ms),
            ("typing.deleting_speed_ms", self.typing.deleting_speed_ms),
            ("typing.pause_ms", self.typing.pause_ms),
        ];
        for (key, v) in positive {
            if v == 0 {
                return Err(ConfigError::NotPositive { key });
            }
        }
        let i = &self.intro;
        if !(i.forming_ms < i.glow_ms && i.glow_ms < i.fadeout_ms && i.fadeout_ms < i.complete_ms) {
            return Err(ConfigError::IntroOrder);
        }
        let th = self.reveal.threshold;
        if !(th > 0.0 && th <= 1.0) {
            return Err(ConfigError::Threshold(th));
        }
        Ok(())
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
pub fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. Fallback
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

fn find_config(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .map(|d| d.join("config.toml"))
        .find(|p| p.exists())
}

/// Absolute paths are kept; relative ones resolve to the first candidate
/// directory where they exist, else stay relative to CWD.
fn resolve_path(path: &str, search_dirs: &[PathBuf]) -> PathBuf {
    let p = PathBuf::from(path);
    if p.is_absolute() {
        return p;
    }
    search_dirs
        .iter()
        .map(|d| d.join(path))
        .find(|c| c.exists())
        .unwrap_or(p)
}
