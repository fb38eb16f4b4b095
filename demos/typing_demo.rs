//! Typing Demo: Retypes a line of text through a few revisions.
//!
//! Each revision is diffed against what is on screen, so only the changed
//! tail gets backspaced and retyped. Watch for the occasional typo.
//!
//! Logs go to stderr: `RUST_LOG=typist=debug cargo run --example typing_demo 2>log.txt`

use crossbeam_channel::unbounded;
use crossterm::{cursor, execute, terminal};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use typist::{NodeSpec, Player, PlayerActor, PlayerEvent, TerminalSurface, TypistConfig};

/// Revisions of the demo line.
fn revisions() -> Vec<Vec<NodeSpec>> {
    vec![
        vec![NodeSpec::text("Hello, world.")],
        vec![NodeSpec::text("Hello there, "), NodeSpec::element("b", "friend"), NodeSpec::text(".")],
        vec![
            NodeSpec::text("Hello there, "),
            NodeSpec::element("b", "friend"),
            NodeSpec::text(". How "),
            NodeSpec::element("i", "are"),
            NodeSpec::text(" you?"),
        ],
        vec![NodeSpec::text("Goodbye!")],
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .try_init();

    let mut stdout = io::stdout();
    execute!(stdout, terminal::Clear(terminal::ClearType::All), cursor::Hide)?;
    println!("Typist Demo");
    println!("===========");
    stdout.flush()?;

    let (width, _) = terminal::size()?;
    let surface = TerminalSurface::new(io::stdout(), (0, 3), width);
    let config = TypistConfig {
        stay: true,
        ..TypistConfig::default()
    };
    let player = Player::new(surface, config)?;

    let (event_tx, event_rx) = unbounded();
    let actor = PlayerActor::spawn(player, event_tx);

    for revision in revisions() {
        actor.edit(move |surface| surface.set_target(revision));
        actor.run();

        loop {
            match event_rx.recv() {
                Ok(PlayerEvent::Completed) => break,
                Ok(PlayerEvent::Error(e)) => {
                    eprintln!("typing failed: {e}");
                    break;
                }
                Ok(_) => {}
                Err(_) => return Ok(()),
            }
        }
        std::thread::sleep(Duration::from_millis(1200));
    }

    actor.join();
    execute!(stdout, cursor::MoveTo(0, 5), cursor::Show)?;
    Ok(())
}
