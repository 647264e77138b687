//! Mount API - Real-time playback lifecycle and render effect.
//!
//! Mounting wires a `TypingScheduler` to the terminal:
//!
//! ```text
//! event loop ──fire_next(now)──▶ scheduler ──Signal<Projection>──▶ render effect ──▶ stdout
//!      └──────tick(now)──────▶ caret blink ───────────────────────────┘
//! ```
//!
//! The scheduler only ever has one pending timer, so the loop sleeps (polls
//! input) until the earlier of that deadline and the next caret toggle.
//!
//! # Example
//!
//! ```ignore
//! use spark_typewriter::pipeline::mount::{mount, run, MountOptions};
//!
//! let handle = mount(sequence, TypingConfig::default(), MountOptions::default())?;
//!
//! // Option 1: Run blocking until done or Ctrl+C
//! run(&handle)?;
//!
//! // Option 2: Tick manually in your own loop
//! while tick(&handle)? {
//!     // Your logic here
//! }
//!
//! handle.unmount()?;
//! ```

use std::cell::{Cell, RefCell};
use std::io::{self, Stdout};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use spark_signals::{effect, Signal};

use crate::config::TypingConfig;
use crate::engine::{Projection, TypingScheduler};
use crate::error::{TypewriterError, TypewriterResult};
use crate::renderer::AppendRenderer;
use crate::sequence::Sequence;
use crate::state::{CaretBlink, DEFAULT_BLINK_FPS};

/// Longest the event loop waits for input before re-checking timers.
const FRAME_MS: u64 = 16;

// =============================================================================
// Options
// =============================================================================

/// Options for mounting playback on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountOptions {
    /// Caret blink rate, 0 disables blinking (default: 2).
    pub blink_fps: u8,
    /// Stop the event loop once playback is done (default: true).
    pub exit_when_done: bool,
    /// How long to keep the final frame before stopping, in ms (default: 0).
    pub linger_ms: u64,
    /// Put the terminal in raw mode so keys are read unbuffered (default: true).
    pub raw_mode: bool,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            blink_fps: DEFAULT_BLINK_FPS,
            exit_when_done: true,
            linger_ms: 0,
            raw_mode: true,
        }
    }
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by `mount()`.
///
/// Owns the scheduler, the render effect and the terminal state. Dropping
/// the handle disposes the scheduler and restores the terminal.
pub struct MountHandle {
    scheduler: Rc<RefCell<TypingScheduler>>,
    renderer: Rc<RefCell<AppendRenderer<Stdout>>>,
    blink: Rc<RefCell<CaretBlink>>,
    projection: Signal<Projection>,
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Arc<AtomicBool>,
    origin: Instant,
    done_at: Cell<Option<u64>>,
    options: MountOptions,
    restored: bool,
}

impl MountHandle {
    /// Milliseconds since mount, the scheduler's timeline.
    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the event loop. Use this to trigger shutdown from custom code.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Restart playback with a new sequence.
    pub fn restart(&self, sequence: Sequence, config: TypingConfig) {
        let now = self.now_ms();
        self.blink.borrow_mut().reset(now);
        self.done_at.set(None);
        self.scheduler.borrow_mut().start(sequence, config, true, now);
    }

    /// Latest projection.
    pub fn projection(&self) -> Projection {
        self.projection.get()
    }

    /// True once the whole sequence has been typed.
    pub fn is_done(&self) -> bool {
        self.scheduler.borrow().is_done()
    }

    /// Repaint the current projection.
    pub fn render_now(&self) -> io::Result<()> {
        let caret_on = self.blink.borrow().phase();
        self.renderer.borrow_mut().render(&self.projection.get(), caret_on)
    }

    /// Dispose playback, stop the render effect and restore the terminal.
    pub fn unmount(mut self) -> TypewriterResult<()> {
        self.restore().map_err(TypewriterError::Terminal)
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        self.running.store(false, Ordering::SeqCst);

        // No timer may fire after this point
        self.scheduler.borrow_mut().dispose();

        if let Some(stop) = self.stop_effect.take() {
            stop();
        }

        execute!(io::stdout(), Show)?;
        if self.options.raw_mode {
            disable_raw_mode()?;
        }
        tracing::debug!("unmounted");
        Ok(())
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        // Best effort
        let _ = self.restore();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount playback of `sequence` on the terminal.
///
/// This sets up:
/// 1. Raw mode and a hidden terminal cursor
/// 2. The scheduler, started at t=0
/// 3. The ONE render effect bound to the projection signal
///
/// Returns a `MountHandle` for driving and cleanup.
pub fn mount(sequence: Sequence, config: TypingConfig, options: MountOptions) -> TypewriterResult<MountHandle> {
    let (columns, _) = terminal::size().unwrap_or((80, 24));

    if options.raw_mode {
        enable_raw_mode().map_err(TypewriterError::Terminal)?;
    }
    execute!(io::stdout(), Hide).map_err(TypewriterError::Terminal)?;

    let origin = Instant::now();
    let scheduler = TypingScheduler::with_sequence(sequence, config, 0);
    let projection = scheduler.projection();

    let renderer = Rc::new(RefCell::new(AppendRenderer::new(io::stdout(), columns)));
    let blink = Rc::new(RefCell::new(CaretBlink::new(options.blink_fps, 0)));
    let running = Arc::new(AtomicBool::new(true));

    let running_for_effect = running.clone();
    let projection_for_effect = projection.clone();
    let renderer_for_effect = renderer.clone();
    let blink_for_effect = blink.clone();
    let stop_fn = effect(move || {
        if !running_for_effect.load(Ordering::SeqCst) {
            return;
        }

        // Read projection (creates dependency)
        let current = projection_for_effect.get();
        let caret_on = blink_for_effect.borrow().phase();

        if let Err(err) = renderer_for_effect.borrow_mut().render(&current, caret_on) {
            tracing::warn!(%err, "render failed");
        }
    });

    tracing::debug!(columns, ?options, "mounted");

    let handle = MountHandle {
        scheduler: Rc::new(RefCell::new(scheduler)),
        renderer,
        blink,
        projection,
        stop_effect: Some(Box::new(stop_fn)),
        running,
        origin,
        done_at: Cell::new(None),
        options,
        restored: false,
    };

    // Initial frame
    handle.render_now().map_err(TypewriterError::Terminal)?;
    Ok(handle)
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the event loop once.
///
/// Waits for input until the next timer or caret toggle is due, then fires
/// at most one scheduler timer.
///
/// # Returns
///
/// * `Ok(true)` - Continue running
/// * `Ok(false)` - Stop requested, or playback done with `exit_when_done`
/// * `Err(e)` - Terminal I/O error
pub fn tick(handle: &MountHandle) -> TypewriterResult<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    let now = handle.now_ms();
    let timeout = wait_budget(handle, now);

    if event::poll(Duration::from_millis(timeout)).map_err(TypewriterError::Terminal)? {
        let event = event::read().map_err(TypewriterError::Terminal)?;
        handle_event(handle, event).map_err(TypewriterError::Terminal)?;
    }

    let now = handle.now_ms();
    let due = handle
        .scheduler
        .borrow()
        .next_deadline()
        .is_some_and(|d| d <= now);

    if due {
        // Solid caret while characters are landing
        handle.blink.borrow_mut().reset(now);
        handle.scheduler.borrow_mut().fire_next(now);
    } else {
        let caret_shown = handle.projection.get().current.is_some_and(|c| c.caret_visible);
        let toggled = handle.blink.borrow_mut().tick(now);
        if toggled && caret_shown {
            handle.render_now().map_err(TypewriterError::Terminal)?;
        }
    }

    if handle.options.exit_when_done && handle.is_done() {
        let done_at = match handle.done_at.get() {
            Some(at) => at,
            None => {
                handle.done_at.set(Some(now));
                now
            }
        };
        if now.saturating_sub(done_at) >= handle.options.linger_ms {
            handle.stop();
        }
    }

    Ok(handle.is_running())
}

/// Run the event loop until stopped.
pub fn run(handle: &MountHandle) -> TypewriterResult<()> {
    while tick(handle)? {
        // Continue processing
    }
    Ok(())
}

/// Mount, run to completion and unmount.
pub fn play(sequence: Sequence, config: TypingConfig, options: MountOptions) -> TypewriterResult<()> {
    let handle = mount(sequence, config, options)?;
    let result = run(&handle);
    handle.unmount()?;
    result
}

/// Milliseconds the loop may wait before something is due.
fn wait_budget(handle: &MountHandle, now: u64) -> u64 {
    let timer = handle.scheduler.borrow().next_deadline();
    let caret = handle.blink.borrow().next_deadline();
    next_wake(now, timer, caret)
}

fn next_wake(now: u64, timer: Option<u64>, caret: Option<u64>) -> u64 {
    [timer, caret]
        .into_iter()
        .flatten()
        .map(|deadline| deadline.saturating_sub(now))
        .min()
        .unwrap_or(FRAME_MS)
        .min(FRAME_MS)
}

fn handle_event(handle: &MountHandle, event: Event) -> io::Result<()> {
    match event {
        Event::Key(key) if is_exit_key(&key) => {
            tracing::debug!(code = ?key.code, "exit key pressed");
            handle.stop();
        }
        Event::Resize(columns, _) => {
            handle.renderer.borrow_mut().set_columns(columns);
            handle.render_now()?;
        }
        _ => {}
    }
    Ok(())
}

/// Ctrl+C, Esc and `q` stop playback.
fn is_exit_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

// =============================================================================
// Tests
// =============================================================================
