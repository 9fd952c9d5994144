//! Typed-text reveal.
//!
//! A [`Typewriter`] is a pure function of time: after its start delay it
//! shows one more character per tick until the whole text is visible.
//! Nothing needs to be stepped, the app loop only has to redraw while
//! [`Typewriter::is_running`] holds.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    started: Instant,
    delay: Duration,
    tick: Duration,
    total_chars: usize,
}

impl Typewriter {
    pub fn new(text: &str, started: Instant, delay: Duration, tick: Duration) -> Self {
        Self {
            started,
            delay,
            tick: tick.max(Duration::from_millis(1)),
            total_chars: text.chars().count(),
        }
    }

    /// Number of chars visible at `now`.
    pub fn visible_chars(&self, now: Instant) -> usize {
        let elapsed = now.saturating_duration_since(self.started);
        let Some(typing) = elapsed.checked_sub(self.delay) else {
            return 0;
        };
        let ticks = typing.as_nanos() / self.tick.as_nanos();
        usize::try_from(ticks).unwrap_or(usize::MAX).min(self.total_chars)
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.visible_chars(now) < self.total_chars
    }

    /// The visible prefix of `text`.
    pub fn visible<'a>(&self, text: &'a str, now: Instant) -> &'a str {
        let n = self.visible_chars(now);
        match text.char_indices().nth(n) {
            Some((at, _)) => &text[..at],
            None => text,
        }
    }
}
