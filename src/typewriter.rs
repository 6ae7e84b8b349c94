//! Typewriter text animation.
//!
//! `TypewriterState` is the pure state machine: each `tick()` either reveals
//! one more character or, after a full reveal, resets to an empty prefix.
//! `TypewriterAnimator` drives it from a tokio task that sleeps for
//! `next_delay()` between ticks and publishes the visible prefix through a
//! watch channel.
//!
//! The cycle never ends on its own. Dropping the animator, calling `stop()`,
//! or reconfiguring it aborts the timer task before its next tick.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::TypewriterConfig;

/// Phase of a typing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    /// Revealing one character per tick
    Typing,
    /// Full text shown, waiting to restart
    Pausing,
}

/// Reveal state over a fixed source text
#[derive(Debug, Clone)]
pub struct TypewriterState {
    source: String,
    /// Length of `source` in chars
    len: usize,
    /// Number of revealed chars
    cursor: usize,
    phase: TypingPhase,
}

impl TypewriterState {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let len = source.chars().count();
        Self {
            source,
            len,
            cursor: 0,
            phase: TypingPhase::Typing,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    /// Empty text never animates
    pub fn is_idle(&self) -> bool {
        self.len == 0
    }

    /// Revealed prefix of the source text
    pub fn visible_text(&self) -> &str {
        let end = self
            .source
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.source.len());
        &self.source[..end]
    }

    /// Delay before the next tick, or `None` when there is nothing to animate
    pub fn next_delay(&self, typing_speed: Duration, pause: Duration) -> Option<Duration> {
        if self.is_idle() {
            return None;
        }
        Some(match self.phase {
            TypingPhase::Typing => typing_speed,
            TypingPhase::Pausing => pause,
        })
    }

    /// Advance one step of the cycle
    pub fn tick(&mut self) {
        if self.is_idle() {
            return;
        }

        match self.phase {
            TypingPhase::Typing => {
                self.cursor += 1;
                if self.cursor >= self.len {
                    self.cursor = self.len;
                    self.phase = TypingPhase::Pausing;
                }
            }
            TypingPhase::Pausing => {
                self.cursor = 0;
                self.phase = TypingPhase::Typing;
            }
        }
    }
}

/// Runs a `TypewriterState` on the tokio runtime
pub struct TypewriterAnimator {
    config: TypewriterConfig,
    text_rx: watch::Receiver<String>,
    task: Option<JoinHandle<()>>,
}

impl TypewriterAnimator {
    /// Start animating `config.text`. Empty text spawns no task.
    pub fn start(config: TypewriterConfig) -> Self {
        let state = TypewriterState::new(config.text.clone());
        let (text_tx, text_rx) = watch::channel(String::new());

        let task = if state.is_idle() {
            None
        } else {
            tracing::debug!(
                "Starting typewriter ({} chars, {}ms/char)",
                state.len,
                config.typing_speed_ms
            );
            Some(tokio::spawn(drive(
                state,
                config.typing_speed(),
                config.pause(),
                text_tx,
            )))
        };

        Self {
            config,
            text_rx,
            task,
        }
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    /// Currently revealed text
    pub fn visible_text(&self) -> String {
        self.text_rx.borrow().clone()
    }

    /// Receiver that observes every published prefix
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.text_rx.clone()
    }

    /// Whether a timer task is scheduled
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Apply new settings. Text or timing changes restart the cycle from an
    /// empty prefix; layout-only changes keep the running cycle.
    pub fn reconfigure(&mut self, config: TypewriterConfig) {
        if self.config.timing_differs(&config) {
            self.stop();
            *self = Self::start(config);
        } else {
            self.config = config;
        }
    }

    /// Cancel the pending timer
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Typewriter stopped");
        }
    }
}

impl Drop for TypewriterAnimator {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn drive(
    mut state: TypewriterState,
    typing_speed: Duration,
    pause: Duration,
    text_tx: watch::Sender<String>,
) {
    while let Some(delay) = state.next_delay(typing_speed, pause) {
        tokio::time::sleep(delay).await;
        state.tick();
        if text_tx.send(state.visible_text().to_string()).is_err() {
            // Every receiver is gone
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(text: &str, speed_ms: u64, pause_ms: u64) -> TypewriterConfig {
        TypewriterConfig {
            typing_speed_ms: speed_ms,
            pause_ms,
            ..TypewriterConfig::with_text(text)
        }
    }

    async fn advance_to(start: tokio::time::Instant, ms: u64) {
        tokio::time::sleep_until(start + Duration::from_millis(ms)).await;
    }

    #[test]
    fn test_ticks_reveal_then_reset() {
        let mut state = TypewriterState::new("abc");
        assert_eq!(state.visible_text(), "");

        state.tick();
        assert_eq!(state.visible_text(), "a");
        state.tick();
        state.tick();
        assert_eq!(state.visible_text(), "abc");
        assert_eq!(state.phase(), TypingPhase::Pausing);

        state.tick();
        assert_eq!(state.visible_text(), "");
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.phase(), TypingPhase::Typing);
    }

    #[test]
    fn test_visible_text_is_always_prefix() {
        let source = "héllo\nwörld";
        let mut state = TypewriterState::new(source);
        for _ in 0..40 {
            assert!(source.starts_with(state.visible_text()));
            assert!(state.cursor() <= source.chars().count());
            state.tick();
        }
    }

    #[test]
    fn test_next_delay_follows_phase() {
        let speed = Duration::from_millis(10);
        let pause = Duration::from_millis(100);
        let mut state = TypewriterState::new("ab");

        assert_eq!(state.next_delay(speed, pause), Some(speed));
        state.tick();
        state.tick();
        assert_eq!(state.next_delay(speed, pause), Some(pause));
    }

    #[test]
    fn test_empty_state_is_idle() {
        let mut state = TypewriterState::new("");
        assert!(state.is_idle());
        assert_eq!(state.next_delay(Duration::ZERO, Duration::ZERO), None);
        state.tick();
        assert_eq!(state.visible_text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_animator_timeline() {
        let start = tokio::time::Instant::now();
        let animator = TypewriterAnimator::start(config("abc", 10, 100));
        assert_eq!(animator.visible_text(), "");

        advance_to(start, 15).await;
        assert_eq!(animator.visible_text(), "a");

        advance_to(start, 35).await;
        assert_eq!(animator.visible_text(), "abc");

        // Reset fires at 30 + 100
        advance_to(start, 125).await;
        assert_eq!(animator.visible_text(), "abc");
        advance_to(start, 135).await;
        assert_eq!(animator.visible_text(), "");

        // Next cycle
        advance_to(start, 145).await;
        assert_eq!(animator.visible_text(), "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_speed_still_waits_between_ticks() {
        let start = tokio::time::Instant::now();
        let animator = TypewriterAnimator::start(config("abc", 0, 0));
        let mut rx = animator.subscribe();

        // Nothing is revealed before the first clamped tick
        tokio::task::yield_now().await;
        assert_eq!(animator.visible_text(), "");

        advance_to(start, 5).await;
        assert_eq!(animator.visible_text(), "a");

        // One tick per 4ms: typing done at 12, reset at 16
        advance_to(start, 13).await;
        assert_eq!(*rx.borrow_and_update(), "abc");
        advance_to(start, 17).await;
        assert_eq!(*rx.borrow_and_update(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text_schedules_nothing() {
        let start = tokio::time::Instant::now();
        let animator = TypewriterAnimator::start(config("", 10, 100));
        assert!(!animator.is_running());

        advance_to(start, 1_000).await;
        assert_eq!(animator.visible_text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_pending_tick() {
        let start = tokio::time::Instant::now();
        let mut animator = TypewriterAnimator::start(config("abc", 10, 100));
        let mut rx = animator.subscribe();

        advance_to(start, 15).await;
        rx.mark_unchanged();
        animator.stop();
        assert!(!animator.is_running());

        advance_to(start, 500).await;
        assert!(!rx.has_changed().unwrap_or(false));
        assert_eq!(*rx.borrow(), "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconfigure_restarts_cycle() {
        let start = tokio::time::Instant::now();
        let mut animator = TypewriterAnimator::start(config("abc", 10, 100));

        advance_to(start, 25).await;
        assert_eq!(animator.visible_text(), "ab");

        animator.reconfigure(config("xyz", 10, 100));
        assert_eq!(animator.visible_text(), "");

        advance_to(start, 40).await;
        assert_eq!(animator.visible_text(), "x");
    }

    #[tokio::test(start_paused = true)]
    async fn test_layout_change_keeps_cycle() {
        let start = tokio::time::Instant::now();
        let mut animator = TypewriterAnimator::start(config("abc", 10, 100));

        advance_to(start, 25).await;
        let mut wider = animator.config().clone();
        wider.width = Some(640.0);
        animator.reconfigure(wider);

        assert_eq!(animator.visible_text(), "ab");
        assert_eq!(animator.config().width, Some(640.0));
        assert!(animator.is_running());
    }
}
