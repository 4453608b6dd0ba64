//! Input handling: raw keys to the four abstract run intents.
//!
//! The simulation only ever sees [`Intent`]s. Gesture recognition lives in the
//! host; this crate offers a keyboard mapping for desktop/headless drivers and
//! a queue that buffers intents between frames.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// The only actions the core consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Tap.
    Jump,
    /// Swipe down.
    Slide,
    /// Swipe left.
    LaneLeft,
    /// Swipe right.
    LaneRight,
}

impl Intent {
    /// Lane delta for lane-change intents.
    pub fn lane_delta(&self) -> Option<i32> {
        match self {
            Intent::LaneLeft => Some(-1),
            Intent::LaneRight => Some(1),
            _ => None,
        }
    }

    /// Parse a script token ("jump", "slide", "left", "right").
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "jump" | "tap" => Some(Intent::Jump),
            "slide" | "down" => Some(Intent::Slide),
            "left" => Some(Intent::LaneLeft),
            "right" => Some(Intent::LaneRight),
            _ => None,
        }
    }
}

/// Keys the desktop driver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Pressed,
    Released,
}

/// Default key binding.
pub fn intent_for_key(key: KeyCode) -> Option<Intent> {
    match key {
        KeyCode::Space | KeyCode::KeyW | KeyCode::ArrowUp => Some(Intent::Jump),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Intent::Slide),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Intent::LaneLeft),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Intent::LaneRight),
    }
}

/// Key state for the current frame. Only fresh presses become intents;
/// holding a key does not repeat it.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Intents produced by presses since the last drain, in press order.
    pending: IntentQueue,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.keys_held.insert(key) {
                    if let Some(intent) = intent_for_key(key) {
                        self.pending.push(intent);
                    }
                }
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Take every intent produced since the last call.
    pub fn drain_intents(&mut self) -> Vec<Intent> {
        self.pending.drain()
    }
}

/// FIFO of intents delivered between frames and consumed at the next tick.
#[derive(Debug, Default, Clone)]
pub struct IntentQueue {
    items: VecDeque<Intent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        self.items.push_back(intent);
    }

    pub fn pop(&mut self) -> Option<Intent> {
        self.items.pop_front()
    }

    pub fn drain(&mut self) -> Vec<Intent> {
        self.items.drain(..).collect()
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            log::debug!("Dropping {} queued intents", self.items.len());
        }
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_does_not_repeat_intent() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert_eq!(input.drain_intents(), vec![Intent::Jump]);
        input.process_keyboard(KeyCode::Space, ElementState::Released);
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert_eq!(input.drain_intents(), vec![Intent::Jump]);
    }

    #[test]
    fn presses_keep_order() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyS, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        assert_eq!(
            input.drain_intents(),
            vec![Intent::LaneLeft, Intent::Slide, Intent::LaneRight]
        );
        assert!(input.drain_intents().is_empty());
    }

    #[test]
    fn tokens_parse() {
        assert_eq!(Intent::from_token(" Jump "), Some(Intent::Jump));
        assert_eq!(Intent::from_token("left"), Some(Intent::LaneLeft));
        assert_eq!(Intent::from_token("fly"), None);
        assert_eq!(Intent::LaneRight.lane_delta(), Some(1));
        assert_eq!(Intent::Jump.lane_delta(), None);
    }
}
