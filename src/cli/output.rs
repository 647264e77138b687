//! Plain-text output for the CLI commands.

use std::io::{self, Write};

use crate::config::{Script, TypingConfig};
use crate::pipeline::timeline::{self, Frame};
use crate::types::resolve_delay;

/// Print help.
pub fn print_help() {
    println!("spark-typewriter v{}", env!("CARGO_PKG_VERSION"));
    println!("Typewriter-style sequential text reveal");
    println!();
    println!("Usage:");
    println!("  spark-typewriter play [SCRIPT] [--char-delay MS] [--pause MS] [--blink FPS] [--linger MS]");
    println!("  spark-typewriter check SCRIPT");
    println!("  spark-typewriter dump [SCRIPT] [--char-delay MS] [--pause MS]");
    println!("  spark-typewriter help | version");
    println!();
    println!("Without SCRIPT the built-in demo is played.");
    println!("Press Ctrl+C, Esc or q to stop playback.");
    println!();
    println!("Environment:");
    println!("  SPARK_TYPEWRITER_CHAR_DELAY_MS   default delay between characters");
    println!("  SPARK_TYPEWRITER_PAUSE_AFTER_MS  default pause between fragments");
    println!("  RUST_LOG                         log filter (logs go to stderr)");
}

/// Print version.
pub fn print_version() {
    println!("spark-typewriter {}", env!("CARGO_PKG_VERSION"));
}

/// Write a script summary: one line per fragment with its resolved timing.
pub fn write_summary<W: Write>(out: &mut W, script: &Script, config: TypingConfig) -> io::Result<()> {
    writeln!(
        out,
        "{} fragment(s), char delay {}ms, pause {}ms",
        script.fragments.len(),
        config.char_delay_ms,
        config.pause_after_ms
    )?;

    let sequence = script.sequence();
    for (i, fragment) in sequence.iter().enumerate() {
        let chars = sequence.char_count(i).unwrap_or(0);
        writeln!(
            out,
            "  [{i}] {:?}{} {chars} chars @ {}ms, pause {}ms  {:?}",
            fragment.hint,
            if fragment.persist { " persist" } else { "" },
            resolve_delay(fragment.char_delay_ms, config.char_delay_ms),
            resolve_delay(fragment.pause_after_ms, config.pause_after_ms),
            preview(&fragment.text),
        )?;
    }

    let total = timeline::duration(sequence, config);
    writeln!(out, "total playback: {total}ms")
}

/// Write one line per frame: time, persisted count, current text, flags.
pub fn write_frames<W: Write>(out: &mut W, frames: &[Frame]) -> io::Result<()> {
    for frame in frames {
        let p = &frame.projection;
        let (index, caret) = match &p.current {
            Some(c) => (c.index.to_string(), if c.caret_visible { "▋" } else { "" }),
            None => ("-".to_string(), ""),
        };
        writeln!(
            out,
            "{:>7}ms  persisted={} current={} {:?}{caret}{}",
            frame.at,
            p.completed_persisted.len(),
            index,
            p.visible_text(),
            if p.is_done { "  done" } else { "" },
        )?;
    }
    Ok(())
}

fn preview(text: &str) -> String {
    const MAX: usize = 40;
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(MAX).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
