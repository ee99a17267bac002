use regex::Regex;

use crate::CallBoardError;

const PLAYLIST_PATTERN: &str =
    r"^(?:https?://)?(?:www\.)?(?:youtube\.com/playlist\?list=|youtu\.be/.*?[?&]list=)([A-Za-z0-9_-]+)";

/// Holds the media reference shown on the shared waiting-room display.
///
/// The stored value is always a canonical embed URL derived from a
/// validated playlist link, or empty. Updates overwrite; nothing queues.
#[derive(Debug)]
pub struct DisplayBoard {
    embed_url: Option<String>,
    playlist_pattern: Regex,
}

impl DisplayBoard {
    pub fn new() -> Self {
        Self {
            embed_url: None,
            // Pattern is a compile-time constant, so construction cannot fail.
            playlist_pattern: Regex::new(PLAYLIST_PATTERN).unwrap(),
        }
    }

    pub fn embed_url(&self) -> Option<&str> {
        self.embed_url.as_deref()
    }

    /// Clears the display. Always valid.
    pub fn clear(&mut self) {
        self.embed_url = None;
    }

    /// Validates a raw playlist link and stores its canonical embed URL.
    ///
    /// Fails with `InvalidPlaylistLink` without touching the current value
    /// when the link does not contain a playlist id.
    pub fn update(&mut self, raw_url: &str) -> Result<&str, CallBoardError> {
        let playlist_id = self
            .playlist_pattern
            .captures(raw_url)
            .and_then(|captures| captures.get(1))
            .ok_or(CallBoardError::InvalidPlaylistLink)?;

        self.embed_url = Some(format!(
            "https://www.youtube.com/embed/videoseries?list={}&autoplay=1&mute=1&loop=1",
            playlist_id.as_str()
        ));
        Ok(self.embed_url.as_deref().unwrap())
    }
}

impl Default for DisplayBoard {
    fn default() -> Self {
        Self::new()
    }
}
