use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};

use crate::{app::App, persist, ui};

pub fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let mut last_draw = Instant::now();
    let heartbeat = Duration::from_millis(500);
    loop {
        if app.dirty || last_draw.elapsed() >= heartbeat {
            terminal.draw(|f| ui::draw(f, app))?;
            app.dirty = false;
            last_draw = Instant::now();
        }

        if event::poll(Duration::from_millis(120))? {
            match event::read()? {
                Event::Key(key) => {
                    app.on_key(key);
                }
                Event::Paste(s) => {
                    // single-line field; flatten pasted newlines
                    let flat = s.replace(['\r', '\n'], " ");
                    app.chat.insert_text(&flat);
                    app.dirty = true;
                }
                Event::Resize(_, _) => {
                    app.dirty = true;
                }
                _ => {}
            }
        }

        app.on_tick();

        if app.should_quit {
            // one last write so history survives even with per-submit
            // persistence turned off
            app.chat.flush_history();
            let _ = persist::save_transcript(&app.transcript);
            break;
        }
    }
    Ok(())
}
