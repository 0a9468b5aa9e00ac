//! Parser module for transcripts and the shared pattern library

pub mod patterns;
pub mod transcript;

pub use patterns::{
    global_pattern_library, Concept, Filler, FlowGroup, Pattern, PatternLibrary, SalutationTier,
};
pub use transcript::{NormalizedText, TextNormalizer, TranscriptStats};
