//! Input handling system for player controls.
//!
//! Raw events (keys, mouse motion, mouse buttons, look-mode changes) are
//! pushed into an [`InputQueue`] from wherever the platform layer receives
//! them. Once per simulation step the queue is drained into an
//! [`InputState`], which keeps the held-key set and accumulated look delta
//! and turns discrete events into [`Command`]s.

use crossbeam_channel::{unbounded, Receiver, Sender};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;
use voxbox_common::InputError;

/// Key codes for keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// E key
    E,
    /// Number keys 0-9
    Num0,
    /// Num1 key
    Num1,
    /// Num2 key
    Num2,
    /// Num3 key
    Num3,
    /// Num4 key
    Num4,
    /// Num5 key
    Num5,
    /// Num6 key
    Num6,
    /// Num7 key
    Num7,
    /// Num8 key
    Num8,
    /// Num9 key
    Num9,
    /// Space bar
    Space,
    /// Left Shift
    LShift,
    /// Right Shift
    RShift,
}

impl KeyCode {
    /// Digit printed on a number key.
    #[must_use]
    pub const fn digit(self) -> Option<u8> {
        Some(match self {
            KeyCode::Num0 => 0,
            KeyCode::Num1 => 1,
            KeyCode::Num2 => 2,
            KeyCode::Num3 => 3,
            KeyCode::Num4 => 4,
            KeyCode::Num5 => 5,
            KeyCode::Num6 => 6,
            KeyCode::Num7 => 7,
            KeyCode::Num8 => 8,
            KeyCode::Num9 => 9,
            _ => return None,
        })
    }
}

/// Mouse button codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button (break)
    Left,
    /// Right mouse button (place)
    Right,
    /// Middle mouse button (scroll wheel click)
    Middle,
}

/// Game actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Walk forward (W by default)
    MoveForward,
    /// Walk backward (S by default)
    MoveBack,
    /// Strafe left (A by default)
    StrafeLeft,
    /// Strafe right (D by default)
    StrafeRight,
    /// Jump (Space by default)
    Jump,
    /// Run (either Shift by default)
    Run,
}

/// Key binding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Primary key for this action
    pub primary: KeyCode,
    /// Optional secondary key
    pub secondary: Option<KeyCode>,
}

impl KeyBinding {
    /// Create a new key binding with only a primary key.
    #[must_use]
    pub const fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// Create a new key binding with primary and secondary keys.
    #[must_use]
    pub const fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    /// Check if a key matches this binding.
    #[must_use]
    pub fn matches(&self, key: KeyCode) -> bool {
        self.primary == key || self.secondary == Some(key)
    }
}

/// A raw input event from the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Key went down
    KeyDown(KeyCode),
    /// Key went up
    KeyUp(KeyCode),
    /// Relative mouse movement in pixels
    MouseMotion {
        /// Horizontal delta
        dx: f32,
        /// Vertical delta
        dy: f32,
    },
    /// Mouse button went down
    MouseDown(MouseButton),
    /// Exclusive look mode (pointer lock) was entered or left
    LookMode(bool),
}

/// Discrete request produced by an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A number key was pressed
    SelectSlot(u8),
    /// Break the targeted block
    Break,
    /// Place a block against the targeted face
    Place,
}

/// Movement intent for one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    /// +1 forward, -1 backward, 0 both or neither
    pub forward: f32,
    /// +1 right, -1 left, 0 both or neither
    pub strafe: f32,
    /// Jump key held
    pub jump: bool,
    /// Run key held
    pub run: bool,
}

/// Snapshot of held keys, look delta and look mode.
#[derive(Debug)]
pub struct InputState {
    /// Keys currently held down
    held: HashSet<KeyCode>,
    /// Action to key bindings
    bindings: HashMap<Action, KeyBinding>,
    /// Mouse-look delta accumulated since the last step
    look_delta: Vec2,
    /// Whether exclusive look mode is active
    look_active: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Create a new input state with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut state = Self {
            held: HashSet::new(),
            bindings: HashMap::new(),
            look_delta: Vec2::ZERO,
            look_active: false,
        };
        state.set_default_bindings();
        state
    }

    /// Set default key bindings.
    pub fn set_default_bindings(&mut self) {
        self.bindings.clear();
        self.bindings
            .insert(Action::MoveForward, KeyBinding::new(KeyCode::W));
        self.bindings
            .insert(Action::MoveBack, KeyBinding::new(KeyCode::S));
        self.bindings
            .insert(Action::StrafeLeft, KeyBinding::new(KeyCode::A));
        self.bindings
            .insert(Action::StrafeRight, KeyBinding::new(KeyCode::D));
        self.bindings
            .insert(Action::Jump, KeyBinding::new(KeyCode::Space));
        self.bindings.insert(
            Action::Run,
            KeyBinding::with_secondary(KeyCode::LShift, KeyCode::RShift),
        );
    }

    /// Rebind an action to a new key.
    pub fn rebind(&mut self, action: Action, binding: KeyBinding) {
        self.bindings.insert(action, binding);
    }

    /// Applies one event, returning the command it triggers, if any.
    ///
    /// Mouse motion and mouse buttons are ignored outside look mode.
    pub fn apply(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::KeyDown(key) => {
                self.held.insert(key);
                key.digit().map(Command::SelectSlot)
            },
            InputEvent::KeyUp(key) => {
                self.held.remove(&key);
                None
            },
            InputEvent::MouseMotion { dx, dy } => {
                if self.look_active {
                    self.look_delta += Vec2::new(dx, dy);
                }
                None
            },
            InputEvent::MouseDown(button) => {
                if !self.look_active {
                    return None;
                }
                match button {
                    MouseButton::Left => Some(Command::Break),
                    MouseButton::Right => Some(Command::Place),
                    MouseButton::Middle => None,
                }
            },
            InputEvent::LookMode(active) => {
                if self.look_active != active {
                    debug!("Look mode {}", if active { "entered" } else { "left" });
                }
                self.look_active = active;
                None
            },
        }
    }

    /// Returns and resets the accumulated mouse-look delta.
    pub fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }

    /// Whether exclusive look mode is active.
    #[must_use]
    pub const fn look_active(&self) -> bool {
        self.look_active
    }

    /// Check if a key is currently held.
    #[must_use]
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Check if an action's key is currently held.
    #[must_use]
    pub fn is_action_held(&self, action: Action) -> bool {
        self.bindings.get(&action).is_some_and(|binding| {
            self.is_key_held(binding.primary)
                || binding.secondary.is_some_and(|key| self.is_key_held(key))
        })
    }

    /// Process held keys into a movement intent.
    #[must_use]
    pub fn movement(&self) -> MoveIntent {
        let axis = |pos: Action, neg: Action| {
            let mut value = 0.0;
            if self.is_action_held(pos) {
                value += 1.0;
            }
            if self.is_action_held(neg) {
                value -= 1.0;
            }
            value
        };

        MoveIntent {
            forward: axis(Action::MoveForward, Action::MoveBack),
            strafe: axis(Action::StrafeRight, Action::StrafeLeft),
            jump: self.is_action_held(Action::Jump),
            run: self.is_action_held(Action::Run),
        }
    }
}

/// Cloneable handle for pushing events into an [`InputQueue`].
#[derive(Debug, Clone)]
pub struct InputSender {
    sender: Sender<InputEvent>,
}

impl InputSender {
    /// Queues an event.
    pub fn send(&self, event: InputEvent) -> Result<(), InputError> {
        self.sender
            .send(event)
            .map_err(|_| InputError::Disconnected)
    }
}

/// Unbounded queue of raw input events, drained once per step.
#[derive(Debug)]
pub struct InputQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Creates a new sender handle for publishing events.
    #[must_use]
    pub fn sender(&self) -> InputSender {
        InputSender {
            sender: self.sender.clone(),
        }
    }

    /// Queues an event from the owning thread.
    pub fn push(&self, event: InputEvent) {
        // The queue holds its own receiver, so sending cannot fail
        let _ = self.sender.send(event);
    }

    /// Drains all pending events in arrival order.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}
