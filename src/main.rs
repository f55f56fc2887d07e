//! Full-viewport slides whose headings grow as you scroll through them.
//!
//! Run the binary to page through the deck in the terminal.
//! Run with `--dump` to print each section's progress at a given offset.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::core::{deck::Deck, page::Page, window::Window};
use crate::ui::{layout::AppLayout, page_widget::PageWidget, theme::Theme};

/// One frame at roughly 30 fps; also the smooth-scroll tick.
const FRAME: Duration = Duration::from_millis(33);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven slides in the terminal")]
struct Cli {
    /// Section heights as percentages of the viewport, e.g. `800,200,100`.
    #[arg(long)]
    sections: Option<String>,

    /// Heading shown on every slide.
    #[arg(long)]
    text: Option<String>,

    /// Show the debug overlay on every section, not just the flagged ones.
    #[arg(long)]
    debug: bool,

    /// Jump instead of easing between offsets.
    #[arg(long)]
    no_smooth: bool,

    /// Print each section's geometry and progress, then exit.
    #[arg(long)]
    dump: bool,

    /// Write the effective configuration file and exit.
    #[arg(long)]
    write_config: bool,

    /// Viewport height for `--dump`.
    #[arg(long, default_value_t = 100)]
    rows: u16,

    /// Scroll offset for `--dump`.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,
}

impl Cli {
    fn deck(&self) -> Result<Deck> {
        let heading = self.text.as_deref().unwrap_or(crate::core::deck::DEFAULT_HEADING);
        let mut deck = match &self.sections {
            Some(list) => Deck::from_heights(list, heading).context("invalid --sections")?,
            None => Deck::default().with_heading(heading),
        };
        if self.debug {
            deck = deck.with_debug_all();
        }
        Ok(deck)
    }
}

// ───────────────────────────────────────── dump ─────────────

/// One line per section: class, box, progress, transform, readout.
fn dump_lines(page: &Page) -> Vec<String> {
    page.sections()
        .iter()
        .map(|section| {
            let placement = section.element_box().unwrap_or_default();
            let frame = section.slide().frame();
            format!(
                "{} top={} height={} progress={:.4} transform={} readout={}",
                section.config().class_name,
                placement.top,
                placement.height,
                frame.progress,
                frame.transform,
                frame.readout,
            )
        })
        .collect()
}

fn run_dump(cli: &Cli, deck: Deck) {
    let window = Rc::new(Window::new(f64::from(cli.rows)));
    let page = Page::mounted(Rc::clone(&window), deck);
    window.scroll_to(cli.scroll);
    println!("scroll={} max={}", window.scroll_y(), window.max_scroll());
    for line in dump_lines(&page) {
        println!("{line}");
    }
}

// ───────────────────────────────────────── terminal ─────────

async fn run_tui(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut AppState,
) -> Result<()> {
    let mut events = spawn_event_reader(FRAME);

    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());
            frame.render_widget(
                PageWidget::new(&state.page).show_debug(state.show_debug),
                layout.page_area,
            );

            let window = state.window();
            let position = format!(
                " {:>4.0}/{:<4.0} ",
                window.scroll_y(),
                window.max_scroll()
            );
            let hint = state
                .status_message
                .clone()
                .unwrap_or_else(|| state.config.status_bar_hint());
            let status = Paragraph::new(Line::from(vec![
                Span::styled(position, Theme::title_style()),
                Span::raw(hint),
            ]))
            .style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        let is_tick = matches!(event, AppEvent::Tick);
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m),
            AppEvent::Resize(w, h) => handler::handle_resize(state, w, h),
            AppEvent::Tick => handler::handle_tick(state),
        }
        // Keep easing while keys are held down and ticks are starved.
        if state.smooth.is_animating() && !is_tick {
            handler::handle_tick(state);
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Silent unless RUST_LOG is set; never pollutes stdout.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let deck = cli.deck()?;

    if cli.dump {
        run_dump(&cli, deck);
        return Ok(());
    }

    let mut config = config::AppConfig::load();
    if cli.write_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }
    if cli.no_smooth {
        config.smooth_scroll = false;
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let rows = AppLayout::from_area(ratatui::layout::Rect::new(0, 0, size.width, size.height))
        .page_area
        .height;
    let mut state = AppState::new(deck, config, rows);

    let result = run_tui(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
