pub mod youtube;

pub use youtube::{extract_video_id, YouTubeCaptions};

use crate::error::Result;
use async_trait::async_trait;

/// A caption track available for a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptTrack {
    pub language_code: String,
    pub name: String,
    /// Auto-generated (speech recognition) rather than uploaded captions.
    pub is_generated: bool,
    pub url: String,
}

/// A single timed caption line.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// List caption tracks. Fails with `TranscriptUnavailable` when captions
    /// are disabled or none exist.
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<TranscriptTrack>>;
    async fn fetch_track(&self, track: &TranscriptTrack) -> Result<Vec<CaptionSegment>>;
    fn name(&self) -> &'static str;
}

/// Pick a track: the first preferred language with a track, otherwise the
/// first track in listing order. Uploaded captions win over generated ones
/// for the same choice.
pub fn select_track<'a>(
    tracks: &'a [TranscriptTrack],
    preferred: &[String],
) -> Option<&'a TranscriptTrack> {
    let best_for = |lang: &str| {
        tracks
            .iter()
            .filter(|t| t.language_code.eq_ignore_ascii_case(lang))
            .min_by_key(|t| t.is_generated)
    };

    preferred
        .iter()
        .find_map(|lang| best_for(lang.as_str()))
        .or_else(|| tracks.iter().find(|t| !t.is_generated))
        .or_else(|| tracks.first())
}

/// Join segments into plain text, one caption per line.
pub fn format_segments(segments: &[CaptionSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// True for `en` and regional variants such as `en-GB`.
pub fn is_english(language_code: &str) -> bool {
    let primary = language_code.split(['-', '_']).next().unwrap_or_default();
    primary.eq_ignore_ascii_case("en")
}
