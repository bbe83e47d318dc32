//! DAS/ARR input handler for terminal environments.
//!
//! Horizontal keys repeat after a delay; the soft-drop key is a hold. Terminals
//! that do not emit key release events are supported by an idle timeout: while a
//! key is held the terminal's own key repeat keeps re-arming it.
//!
//! All timers advance only through [`InputHandler::update`], so a handler fed
//! the same presses and elapsed times always emits the same actions.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent};

use crate::map::handle_key_event;
use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, KEY_RELEASE_TIMEOUT_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    /// Milliseconds since the last press of a held key.
    idle_ms: u32,
    horizontal_das_timer: u32,
    horizontal_arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            idle_ms: 0,
            horizontal_das_timer: 0,
            horizontal_arr_accumulator: 0,
            das_delay,
            // A zero rate would never drain the accumulator.
            arr_rate: arr_rate.max(1),
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Handle a press (or terminal auto-repeat) of a held key.
    ///
    /// Returns the action for a fresh press; a repeat of an already held key only
    /// re-arms the release timeout. Keys that are not held keys return `None`
    /// and leave the timeout alone.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        match handle_key_event(KeyEvent::from(code))? {
            GameAction::MoveLeft => {
                self.idle_ms = 0;
                self.press_horizontal(HorizontalDirection::Left, GameAction::MoveLeft)
            }
            GameAction::MoveRight => {
                self.idle_ms = 0;
                self.press_horizontal(HorizontalDirection::Right, GameAction::MoveRight)
            }
            GameAction::SoftDropPressed => {
                self.idle_ms = 0;
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    Some(GameAction::SoftDropPressed)
                }
            }
            _ => None,
        }
    }

    /// Handle an explicit key release.
    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<GameAction> {
        match handle_key_event(KeyEvent::from(code))? {
            GameAction::MoveLeft => {
                self.release_horizontal(HorizontalDirection::Left);
                None
            }
            GameAction::MoveRight => {
                self.release_horizontal(HorizontalDirection::Right);
                None
            }
            GameAction::SoftDropPressed => self.release_down(),
            _ => None,
        }
    }

    /// Advance timers by `elapsed_ms` and collect repeat/release actions.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        // Auto-release when terminal does not emit release events.
        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > self.key_release_timeout_ms {
            if self.horizontal != HorizontalDirection::None {
                self.release_horizontal(self.horizontal);
            }
            if let Some(action) = self.release_down() {
                let _ = actions.try_push(action);
            }
        }

        match self.horizontal {
            HorizontalDirection::Left | HorizontalDirection::Right => {
                let prev_das = self.horizontal_das_timer;
                self.horizontal_das_timer = self.horizontal_das_timer.saturating_add(elapsed_ms);

                if self.horizontal_das_timer >= self.das_delay {
                    let excess = if prev_das < self.das_delay {
                        self.horizontal_das_timer - self.das_delay
                    } else {
                        elapsed_ms
                    };
                    self.horizontal_arr_accumulator += excess;

                    let action = if self.horizontal == HorizontalDirection::Left {
                        GameAction::MoveLeft
                    } else {
                        GameAction::MoveRight
                    };
                    while self.horizontal_arr_accumulator >= self.arr_rate {
                        let _ = actions.try_push(action);
                        self.horizontal_arr_accumulator -= self.arr_rate;
                    }
                }
            }
            HorizontalDirection::None => {
                self.horizontal_das_timer = 0;
                self.horizontal_arr_accumulator = 0;
            }
        }

        actions
    }

    /// The session drops soft drop whenever a piece locks. Forget the held key
    /// so the next press or terminal repeat engages it again for the new piece.
    pub fn piece_locked(&mut self) {
        self.down_held = false;
    }

    /// Forget every held key (e.g. after a session reset).
    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.idle_ms = 0;
        self.horizontal_das_timer = 0;
        self.horizontal_arr_accumulator = 0;
    }

    fn press_horizontal(&mut self, dir: HorizontalDirection, action: GameAction) -> Option<GameAction> {
        if self.horizontal == dir {
            return None;
        }
        self.horizontal = dir;
        self.horizontal_das_timer = 0;
        self.horizontal_arr_accumulator = 0;
        Some(action)
    }

    fn release_horizontal(&mut self, dir: HorizontalDirection) {
        if self.horizontal == dir {
            self.horizontal = HorizontalDirection::None;
            self.horizontal_das_timer = 0;
            self.horizontal_arr_accumulator = 0;
        }
    }

    fn release_down(&mut self) -> Option<GameAction> {
        if !self.down_held {
            return None;
        }
        self.down_held = false;
        Some(GameAction::SoftDropReleased)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));

        // Before DAS expires: no repeats.
        let actions = ih.update(99);
        assert!(actions.is_empty());

        // Exactly at DAS: still no repeats (needs excess over DAS to accumulate ARR).
        let actions = ih.update(1);
        assert!(actions.is_empty());

        // First ARR interval after DAS: one repeat.
        let actions = ih.update(25);
        assert_eq!(actions.as_slice(), &[GameAction::MoveLeft]);

        // Another ARR interval: one repeat again.
        let actions = ih.update(25);
        assert_eq!(actions.as_slice(), &[GameAction::MoveLeft]);
    }

    #[test]
    fn test_repeated_press_does_not_restart_das() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(GameAction::MoveRight));
        ih.update(90);
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);

        let actions = ih.update(35);
        assert_eq!(actions.as_slice(), &[GameAction::MoveRight]);
    }

    #[test]
    fn test_opposite_direction_takes_over() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        ih.handle_key_press(KeyCode::Left);
        assert_eq!(ih.handle_key_press(KeyCode::Char('d')), Some(GameAction::MoveRight));
        assert_eq!(ih.horizontal(), HorizontalDirection::Right);

        // Releasing the stale direction leaves the new one held.
        assert_eq!(ih.handle_key_release(KeyCode::Left), None);
        assert_eq!(ih.horizontal(), HorizontalDirection::Right);
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(ih.horizontal(), HorizontalDirection::Left);

        let actions = ih.update(51);
        assert!(actions.is_empty());
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn test_non_movement_key_does_not_extend_auto_release_timeout() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        ih.update(40);
        assert_eq!(ih.handle_key_press(KeyCode::Up), None);

        // The stale movement key should still auto-release.
        ih.update(11);
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn test_soft_drop_is_a_hold() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(GameAction::SoftDropPressed));
        assert_eq!(ih.handle_key_press(KeyCode::Down), None);
        assert!(ih.soft_drop_held());

        // No repeats while held: gravity does the work.
        assert!(ih.update(1_000).is_empty());

        assert_eq!(ih.handle_key_release(KeyCode::Down), Some(GameAction::SoftDropReleased));
        assert_eq!(ih.handle_key_release(KeyCode::Down), None);
        assert!(!ih.soft_drop_held());
    }

    #[test]
    fn test_soft_drop_times_out_without_release_events() {
        let mut ih = InputHandler::new();

        assert_eq!(ih.handle_key_press(KeyCode::Char('s')), Some(GameAction::SoftDropPressed));

        // Terminal key repeat keeps the hold alive.
        for _ in 0..5 {
            assert!(ih.update(100).is_empty());
            assert_eq!(ih.handle_key_press(KeyCode::Char('s')), None);
        }

        let actions = ih.update(KEY_RELEASE_TIMEOUT_MS + 1);
        assert_eq!(actions.as_slice(), &[GameAction::SoftDropReleased]);
        assert!(ih.update(1_000).is_empty());
    }

    #[test]
    fn test_repeat_after_lock_presses_soft_drop_again() {
        let mut ih = InputHandler::new();

        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(GameAction::SoftDropPressed));
        assert_eq!(ih.handle_key_press(KeyCode::Down), None);

        ih.piece_locked();
        assert!(!ih.soft_drop_held());
        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(GameAction::SoftDropPressed));

        // Once the key stops repeating the hold still times out.
        let actions = ih.update(KEY_RELEASE_TIMEOUT_MS + 1);
        assert_eq!(actions.as_slice(), &[GameAction::SoftDropReleased]);
    }

    #[test]
    fn test_lock_without_repeat_emits_no_release() {
        let mut ih = InputHandler::new();

        ih.handle_key_press(KeyCode::Down);
        ih.piece_locked();
        assert!(ih.update(KEY_RELEASE_TIMEOUT_MS + 1).is_empty());
        assert_eq!(ih.handle_key_release(KeyCode::Down), None);
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        let ih = InputHandler::new();
        assert!(ih.key_release_timeout_ms() > 0);
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(200).is_empty(), "reset should stop repeats");
    }
}
