//! Character-by-character playback of a completed reply.
//!
//! [`RevealBuffer`] holds the reply and how much of it is visible. The
//! [`TypingPlayback`] ticker sends one [`AppAction::RevealTick`] per
//! [`TYPING_TICK`] until it has sent `len + 1` ticks or its token is
//! cancelled; the reducer advances the buffer on each tick and finalizes it
//! on the last one.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::app::{AppAction, AppActionContext, AppActionDispatcher};
use crate::core::constants::TYPING_TICK;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// One more character became visible.
    Revealed,
    /// The buffer was already complete; the reply can be committed.
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealBuffer {
    text: String,
    total_chars: usize,
    revealed_chars: usize,
    revealed_bytes: usize,
}

impl RevealBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let total_chars = text.chars().count();
        Self {
            text,
            total_chars,
            revealed_chars: 0,
            revealed_bytes: 0,
        }
    }

    pub fn visible(&self) -> &str {
        &self.text[..self.revealed_bytes]
    }

    pub fn revealed_chars(&self) -> usize {
        self.revealed_chars
    }

    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.revealed_chars == self.total_chars
    }

    /// Number of ticks the playback needs, including the finalizing one.
    pub fn ticks_needed(&self) -> usize {
        self.total_chars + 1
    }

    pub fn advance(&mut self) -> RevealStep {
        if self.is_fully_revealed() {
            return RevealStep::Complete;
        }
        let next_len = self.text[self.revealed_bytes..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(0);
        self.revealed_bytes += next_len;
        self.revealed_chars += 1;
        RevealStep::Revealed
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

pub struct PlaybackParams {
    pub playback_id: u64,
    pub ticks: usize,
    pub cancel_token: CancellationToken,
}

#[derive(Clone)]
pub struct TypingPlayback {
    dispatcher: AppActionDispatcher,
}

impl TypingPlayback {
    pub fn new(dispatcher: AppActionDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn spawn(&self, params: PlaybackParams) {
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            let PlaybackParams {
                playback_id,
                ticks,
                cancel_token,
            } = params;

            for _ in 0..ticks {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        debug!(playback_id, "typing playback cancelled");
                        return;
                    }
                    _ = tokio::time::sleep(TYPING_TICK) => {}
                }
                dispatcher.dispatch_many(
                    [AppAction::RevealTick { playback_id }],
                    AppActionContext::default(),
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn reveal_passes_through_every_prefix() {
        let mut buffer = RevealBuffer::new("meh.");
        let mut states = vec![buffer.visible().to_string()];

        while buffer.advance() == RevealStep::Revealed {
            states.push(buffer.visible().to_string());
        }

        assert_eq!(states, ["", "m", "me", "meh", "meh."]);
        assert_eq!(states.len(), buffer.ticks_needed());
        assert_eq!(buffer.into_text(), "meh.");
    }

    #[test]
    fn reveal_steps_over_multibyte_characters() {
        let mut buffer = RevealBuffer::new("né 👍");
        assert_eq!(buffer.total_chars(), 4);

        buffer.advance();
        buffer.advance();
        assert_eq!(buffer.visible(), "né");
        buffer.advance();
        buffer.advance();
        assert_eq!(buffer.visible(), "né 👍");
        assert_eq!(buffer.advance(), RevealStep::Complete);
    }

    #[test]
    fn empty_reply_completes_on_first_tick() {
        let mut buffer = RevealBuffer::new("");
        assert_eq!(buffer.ticks_needed(), 1);
        assert_eq!(buffer.advance(), RevealStep::Complete);
    }

    #[tokio::test]
    async fn playback_sends_requested_number_of_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let playback = TypingPlayback::new(AppActionDispatcher::new(tx));
        playback.spawn(PlaybackParams {
            playback_id: 7,
            ticks: 3,
            cancel_token: CancellationToken::new(),
        });
        drop(playback);

        for _ in 0..3 {
            let envelope = rx.recv().await.expect("tick");
            assert!(matches!(
                envelope.action,
                AppAction::RevealTick { playback_id: 7 }
            ));
        }
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn cancelled_playback_stops_ticking() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let playback = TypingPlayback::new(AppActionDispatcher::new(tx));
        let token = CancellationToken::new();
        token.cancel();
        playback.spawn(PlaybackParams {
            playback_id: 1,
            ticks: 10,
            cancel_token: token,
        });
        drop(playback);

        assert!(rx.recv().await.is_none());
    }
}
