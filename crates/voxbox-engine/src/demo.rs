//! Scripted input for headless runs.

use tracing::info;
use voxbox_gameplay::{InputEvent, KeyCode, MouseButton};

use crate::app::{Session, SessionSummary};

/// An input event scheduled for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedEvent {
    /// Frame the event is queued on
    pub frame: u32,
    /// The event
    pub event: InputEvent,
}

const fn at(frame: u32, event: InputEvent) -> ScriptedEvent {
    ScriptedEvent { frame, event }
}

/// Walk forward, jump, pick stone from the hotbar, look down, place a block
/// and break it again, then turn around.
#[must_use]
pub fn default_script() -> Vec<ScriptedEvent> {
    vec![
        at(0, InputEvent::LookMode(true)),
        at(0, InputEvent::KeyDown(KeyCode::W)),
        at(30, InputEvent::KeyDown(KeyCode::Space)),
        at(32, InputEvent::KeyUp(KeyCode::Space)),
        at(60, InputEvent::KeyDown(KeyCode::LShift)),
        at(90, InputEvent::KeyUp(KeyCode::W)),
        at(90, InputEvent::KeyUp(KeyCode::LShift)),
        at(120, InputEvent::KeyDown(KeyCode::Num3)),
        at(120, InputEvent::MouseMotion { dx: 0.0, dy: 300.0 }),
        at(140, InputEvent::MouseDown(MouseButton::Right)),
        at(170, InputEvent::MouseDown(MouseButton::Left)),
        at(200, InputEvent::MouseMotion {
            dx: 1400.0,
            dy: -300.0,
        }),
        at(220, InputEvent::LookMode(false)),
    ]
}

/// Drives `session` for `frames` fixed-length frames, queueing each
/// scripted event on its frame.
pub fn run_script(session: &mut Session, script: &[ScriptedEvent], frames: u32) -> SessionSummary {
    let frame_dt = session.timing().fixed_dt();
    let mut pending = script.iter().peekable();

    for frame in 0..frames {
        while let Some(scripted) = pending.next_if(|s| s.frame <= frame) {
            session.push_input(scripted.event);
        }
        session.advance(frame_dt);
    }

    let summary = session.summary();
    info!(
        "Demo finished after {} steps: {} blocks, {} live visuals, {} placed, {} broken",
        summary.steps, summary.blocks, summary.live_visuals, summary.placed, summary.broken
    );
    summary
}
