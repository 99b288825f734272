// SPDX-License-Identifier: MIT
//
// tessera: a scripted tour of the layered text desktop.
//
// Builds a small scene and drives it with queued input instead of a live
// terminal:
//
//   desktop   patterned backdrop, z 0
//   win       window with a drop shadow, a menu, a text field and a button
//   status    one-line typewriter message along the bottom
//
// Frames go to stdout as ANSI escape sequences. Logs go to stderr and are
// filtered by TESSERA_LOG (e.g. `TESSERA_LOG=tessera_term=debug`), default
// `warn`.

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use tessera_term::ansi;
use tessera_term::button::Button;
use tessera_term::draw;
use tessera_term::style::TextStyle;
use tessera_term::{AnsiBackend, Attribute, Key, Rect, Result, Rgb, Selection, Session, SessionConfig, TuiStyle};

/// What the scripted user picked.
#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    flavour: Option<String>,
    name: String,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TESSERA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Lay out the desktop, the window and the status line.
fn build_scene(session: &mut Session, style: &TuiStyle) {
    let base = Attribute::with_colors(Rgb::new(170, 170, 170), Rgb::new(0, 0, 128));
    session
        .add_layer("desktop", 0, 0, 80, 25, 0, None)
        .fill(&base, &style.desktop_pattern.to_string());

    let win = session.add_layer("win", 20, 4, 40, 15, 1, None);
    draw::window(win, style, &Attribute::default(), Rect::new(0, 0, 38, 14));
    let text = style.text_attr(&Attribute::default());
    win.print_at(&text, 2, 1, "Pick a flavour");
    win.print_at(&text, 2, 8, "Your name");
    draw::horizontal_line(win, style, &Attribute::default(), 0, 7, 38, true);
    session.add_button("win", Button::new("ok", "OK", style.clone(), Rect::new(26, 10, 8, 3)));

    session.add_layer("status", 0, 24, 80, 1, 2, None);
    session
        .text_styles_mut()
        .add("em", TextStyle::with_colors(Rgb::new(255, 255, 85), Rgb::BLACK));
}

/// Run the widgets against whatever input is queued.
fn run(session: &mut Session) -> Result<Outcome> {
    let style = TuiStyle::default();
    build_scene(session, &style);
    session.update_display()?;

    let flavours: Selection = [
        ("vanilla", "Vanilla"),
        ("chocolate", "Chocolate"),
        ("pistachio", "Pistachio"),
        ("mango", "Mango"),
        ("lemon", "Lemon"),
    ]
    .into_iter()
    .collect();
    let flavour = session.vertical_menu_alias("win", &style, &flavours, Rect::new(2, 2, 20, 4), 0)?;
    let name = session.text_input("win", &style, 2, 9, 20, 30, false, "")?;

    let message = format!("{{em}}{name}{{}} picked {}.", flavour.as_deref().unwrap_or("nothing"));
    session.print_dialog("status", 1, 0, 78, Duration::from_millis(5), true, &message)?;
    Ok(Outcome { flavour, name })
}

/// Leave the terminal usable below the last frame and report the outcome.
fn finish(out: &mut impl Write, height: u16, outcome: &Outcome) -> io::Result<()> {
    ansi::reset(out)?;
    ansi::cursor_show(out)?;
    ansi::cursor_to(out, 0, height)?;
    let flavour = outcome.flavour.as_deref().unwrap_or("nothing");
    writeln!(out, "{} picked {flavour}", outcome.name)?;
    out.flush()
}

fn main() {
    init_logging();

    let config = SessionConfig::new(80, 25);
    let mut session = Session::new(AnsiBackend::new(io::stdout()), config);
    session.input().push_keys([Key::Down, Key::Down, Key::Enter]);
    session.input().push_keys(Key::chars("Ada"));
    session.input().push_key(Key::Enter);

    let outcome = run(&mut session).unwrap_or_else(|e| {
        eprintln!("tessera: {e}");
        process::exit(1);
    });

    if let Err(e) = finish(&mut io::stdout().lock(), config.height, &outcome) {
        eprintln!("tessera: {e}");
        process::exit(1);
    }
    info!(flavour = ?outcome.flavour, name = %outcome.name, "tour finished");
}

// ─── Tests ──────────────────────────────────────────────────────────────────
