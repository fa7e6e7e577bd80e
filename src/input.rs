use winit::{
    event::{ElementState, WindowEvent},
    keyboard::Key,
};

const STOP_KEY: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Stopped,
}
impl RunState {
    pub fn new() -> Self {
        Self::Running
    }

    pub fn next(self, event: &LoopEvent) -> Self {
        match (self, event) {
            (Self::Stopped, _) => Self::Stopped,
            (Self::Running, LoopEvent::Quit) => Self::Stopped,
            (Self::Running, LoopEvent::KeyDown(key)) if is_stop_key(key) => Self::Stopped,
            (Self::Running, _) => Self::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Quit,
    KeyDown(Key),
    Ignored,
}
impl LoopEvent {
    pub fn from_window_event(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::CloseRequested => Self::Quit,
            WindowEvent::KeyboardInput { event, .. } => {
                Self::from_key(&event.logical_key, event.state)
            }
            _ => Self::Ignored,
        }
    }

    pub fn from_key(key: &Key, state: ElementState) -> Self {
        match state {
            ElementState::Pressed => Self::KeyDown(key.clone()),
            ElementState::Released => Self::Ignored,
        }
    }
}

fn is_stop_key(key: &Key) -> bool {
    matches!(key, Key::Character(c) if c.as_str() == STOP_KEY)
}

#[cfg(test)]
mod tests {
    use winit::keyboard::{NamedKey, SmolStr};

    use super::*;

    fn char_key(c: &str) -> Key {
        Key::Character(SmolStr::new(c))
    }

    #[test]
    fn test_initial_state() {
        assert_eq!(RunState::new(), RunState::Running);
        assert!(RunState::default().is_running());
    }

    #[test]
    fn test_quit_stops() {
        let state = RunState::new().next(&LoopEvent::Quit);
        assert_eq!(state, RunState::Stopped);
    }

    #[test]
    fn test_zero_key_stops() {
        let event = LoopEvent::from_key(&char_key("0"), ElementState::Pressed);
        assert_eq!(RunState::new().next(&event), RunState::Stopped);
    }

    #[test]
    fn test_other_keys_keep_running() {
        let keys = [
            char_key("1"),
            char_key("o"),
            char_key("O"),
            Key::Named(NamedKey::Escape),
            Key::Named(NamedKey::Enter),
        ];
        for key in keys {
            let event = LoopEvent::from_key(&key, ElementState::Pressed);
            assert_eq!(RunState::new().next(&event), RunState::Running, "{key:?}");
        }
    }

    #[test]
    fn test_zero_key_release_is_ignored() {
        let event = LoopEvent::from_key(&char_key("0"), ElementState::Released);
        assert_eq!(event, LoopEvent::Ignored);
        assert_eq!(RunState::new().next(&event), RunState::Running);
    }

    #[test]
    fn test_stopped_is_absorbing() {
        let events = [
            LoopEvent::Ignored,
            LoopEvent::Quit,
            LoopEvent::KeyDown(char_key("0")),
            LoopEvent::KeyDown(char_key("1")),
        ];
        for event in events {
            assert_eq!(RunState::Stopped.next(&event), RunState::Stopped);
        }
    }

    #[test]
    fn test_drain_stops_within_pass() {
        let pass = [
            LoopEvent::KeyDown(char_key("a")),
            LoopEvent::Quit,
            LoopEvent::KeyDown(char_key("b")),
        ];
        let state = pass
            .iter()
            .fold(RunState::new(), |state, event| state.next(event));
        assert_eq!(state, RunState::Stopped);
    }

    #[test]
    fn test_close_requested_is_quit() {
        let event = LoopEvent::from_window_event(&WindowEvent::CloseRequested);
        assert_eq!(event, LoopEvent::Quit);
        let event = LoopEvent::from_window_event(&WindowEvent::Focused(true));
        assert_eq!(event, LoopEvent::Ignored);
    }
}
