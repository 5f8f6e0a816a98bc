/// Entry point and frame loop.

mod config;
mod domain;
mod error;
mod logging;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use anyhow::Context;

use config::SiteConfig;
use domain::content::Catalog;
use domain::timeline::Millis;
use sim::event::SiteEvent;
use sim::site::SiteState;
use sim::step;
use ui::input::{command_for, Command, InputState};
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() -> anyhow::Result<()> {
    let (config, config_error) = SiteConfig::load();

    if let Err(e) = logging::init(&config.log_file, &config.log_level) {
        eprintln!("Logging disabled ({}): {e}", config.log_file.display());
    }
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "config.toml rejected, using defaults");
    }
    tracing::info!(tick_rate_ms = config.tick_rate_ms, "starting");

    let catalog = Catalog::load_or_builtin(config.content_file.as_deref());
    let mut site = SiteState::new(config, catalog);

    let mut renderer = Renderer::new();
    renderer.init().context("terminal init failed")?;

    let result = site_loop(&mut site, &mut renderer);
    site.teardown();

    let cleanup = renderer.cleanup();
    result?;
    cleanup.context("terminal cleanup failed")?;

    tracing::info!("session closed");
    Ok(())
}

fn site_loop(site: &mut SiteState, renderer: &mut Renderer) -> anyhow::Result<()> {
    let mut input = InputState::new();
    let clock = Instant::now();
    let now = || clock.elapsed().as_millis() as Millis;
    let tick_rate = Duration::from_millis(site.config.tick_rate_ms);
    let mut last_tick = Instant::now();

    site.start(now());

    loop {
        input.drain_events();

        if input.ctrl_c_pressed() {
            break;
        }
        if handle_keys(site, &input, renderer.view_rows()) {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            let events = step::advance(site, now());
            log_events(&events);
            last_tick = Instant::now();
        }

        renderer.render(site).context("render failed")?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

/// Apply this frame's key presses. Returns true to quit.
fn handle_keys(site: &mut SiteState, input: &InputState, view_rows: usize) -> bool {
    let page = view_rows.saturating_sub(2).max(1) as i32;
    for key in &input.keys {
        match command_for(site, key, page) {
            Some(Command::Quit) => return true,
            Some(Command::Act(action)) => {
                let events = step::apply(site, action);
                log_events(&events);
            }
            None => {}
        }
    }
    false
}

fn log_events(events: &[SiteEvent]) {
    for event in events {
        match event {
            SiteEvent::TypingChanged => tracing::trace!(?event),
            SiteEvent::IntroComplete | SiteEvent::FormSubmitted => tracing::info!(?event),
            _ => tracing::debug!(?event),
        }
    }
}
