//! Shared pattern library for the criterion rules.
//!
//! Every lexical pattern the rules match against lives here: concept keywords,
//! salutation tiers, closing phrases and filler words. Patterns are compiled
//! once per process (see [`global_pattern_library`]) and handed to each rule by
//! reference; nothing mutates the library after construction.
//!
//! All patterns are matched against the lowercased transcript.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Content concepts a self-introduction is expected to cover
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concept {
    Name,
    Age,
    School,
    Class,
    Family,
    Hobby,
    Interest,
    Goal,
    FunFact,
}

impl Concept {
    /// Concepts every introduction must mention
    pub const MANDATORY: [Concept; 6] = [
        Concept::Name,
        Concept::Age,
        Concept::School,
        Concept::Class,
        Concept::Family,
        Concept::Hobby,
    ];

    /// Concepts that earn extra credit
    pub const OPTIONAL: [Concept; 3] = [Concept::Goal, Concept::FunFact, Concept::Interest];

    /// Key used in reports
    pub fn key(self) -> &'static str {
        match self {
            Concept::Name => "name",
            Concept::Age => "age",
            Concept::School => "school",
            Concept::Class => "class",
            Concept::Family => "family",
            Concept::Hobby => "hobby",
            Concept::Interest => "interest",
            Concept::Goal => "goal",
            Concept::FunFact => "fun_fact",
        }
    }

    fn sources(self) -> &'static [&'static str] {
        match self {
            Concept::Name => &[
                "name is",
                "my name is",
                "i am",
                "myself",
                r"\bthis is\b",
                r"\bmy name\b",
            ],
            Concept::Age => &[
                "age",
                "years old",
                r"\b\d+\s*years\s*old\b",
                r"\bi am \d+\b",
                r"\bI'm \d+\b",
            ],
            Concept::School => &["school", "student of", "study in", "studying in", "class of"],
            Concept::Class => &[
                "class",
                "grade",
                "standard",
                r"\b8th\b",
                r"\b9th\b",
                r"\b10th\b",
            ],
            Concept::Family => &[
                "family",
                "parents",
                "mother",
                "father",
                "brother",
                "sister",
                r"\bwe (are|'re) \d+ people\b",
            ],
            Concept::Hobby => &[
                "hobby",
                "hobbies",
                "like to",
                "love to",
                "enjoy",
                "playing",
                "play",
            ],
            Concept::Interest => &["interest", "passionate", "fan of", "interested in"],
            Concept::Goal => &["goal", "ambition", "dream", "want to be", "i want to"],
            Concept::FunFact => &[
                "fun fact",
                "once",
                "secret",
                "don't know",
                "dont know",
                "surprising",
            ],
        }
    }
}

/// Salutation quality tiers, best first
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalutationTier {
    Excellent,
    Good,
    Normal,
}

impl SalutationTier {
    /// Tiers in precedence order
    pub const ALL: [SalutationTier; 3] = [
        SalutationTier::Excellent,
        SalutationTier::Good,
        SalutationTier::Normal,
    ];

    /// Points awarded for the tier (out of 5)
    pub fn points(self) -> f64 {
        match self {
            SalutationTier::Excellent => 5.0,
            SalutationTier::Good => 4.0,
            SalutationTier::Normal => 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SalutationTier::Excellent => "Excellent",
            SalutationTier::Good => "Good",
            SalutationTier::Normal => "Normal",
        }
    }

    fn sources(self) -> &'static [&'static str] {
        match self {
            SalutationTier::Excellent => &[
                "i am excited to introduce",
                "feeling great",
                "i'm excited",
                "i am excited",
            ],
            SalutationTier::Good => &[
                "good morning",
                "good afternoon",
                "good evening",
                "good day",
                "hello everyone",
            ],
            SalutationTier::Normal => &[r"\bhi\b", r"\bhello\b"],
        }
    }
}

/// Narrative sections, in the order a well-structured introduction presents them
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum FlowGroup {
    Salutation,
    BasicInfo,
    AdditionalInfo,
    Closing,
}

impl FlowGroup {
    pub const SEQUENCE: [FlowGroup; 4] = [
        FlowGroup::Salutation,
        FlowGroup::BasicInfo,
        FlowGroup::AdditionalInfo,
        FlowGroup::Closing,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FlowGroup::Salutation => "salutation",
            FlowGroup::BasicInfo => "basic",
            FlowGroup::AdditionalInfo => "additional",
            FlowGroup::Closing => "closing",
        }
    }
}

const CLOSING_SOURCES: &[&str] = &["thank you", "thanks", "thankyou", "that's all"];

const FILLER_WORDS: &[&str] = &[
    "um",
    "uh",
    "like",
    "you know",
    "so",
    "actually",
    "basically",
    "right",
    "i mean",
    "well",
    "kinda",
    "sort of",
    "okay",
    "hmm",
    "ah",
    "erm",
    "huh",
];

/// A compiled pattern together with its source text
#[derive(Debug, Clone)]
pub struct Pattern {
    source: &'static str,
    regex: Regex,
}

impl Pattern {
    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Byte offsets where non-overlapping matches start
    pub fn match_starts<'t>(&'t self, text: &'t str) -> impl Iterator<Item = usize> + 't {
        self.regex.find_iter(text).map(|m| m.start())
    }
}

/// A filler word or phrase, anchored on word boundaries at both ends
#[derive(Debug, Clone)]
pub struct Filler {
    phrase: &'static str,
    regex: Regex,
}

impl Filler {
    pub fn phrase(&self) -> &'static str {
        self.phrase
    }

    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }
}

/// Read-only registry of every pattern the rules use
#[derive(Debug)]
pub struct PatternLibrary {
    concepts: Vec<(Concept, Vec<Pattern>)>,
    salutations: Vec<(SalutationTier, Vec<Pattern>)>,
    closings: Vec<Pattern>,
    fillers: Vec<Filler>,
}

impl PatternLibrary {
    /// Compile the built-in pattern tables
    pub fn new() -> Self {
        let concepts = [Concept::MANDATORY.as_slice(), Concept::OPTIONAL.as_slice()]
            .concat()
            .into_iter()
            .map(|concept| (concept, compile_all(concept.sources())))
            .collect();

        let salutations = SalutationTier::ALL
            .into_iter()
            .map(|tier| (tier, compile_all(tier.sources())))
            .collect();

        let fillers = FILLER_WORDS
            .iter()
            .filter_map(|&phrase| {
                let anchored = format!(r"\b{}\b", regex::escape(phrase));
                compile(phrase, &anchored).map(|regex| Filler { phrase, regex })
            })
            .collect();

        Self {
            concepts,
            salutations,
            closings: compile_all(CLOSING_SOURCES),
            fillers,
        }
    }

    /// Patterns registered for a concept
    pub fn concept(&self, concept: Concept) -> &[Pattern] {
        self.concepts
            .iter()
            .find(|(c, _)| *c == concept)
            .map(|(_, patterns)| patterns.as_slice())
            .unwrap_or(&[])
    }

    /// True if any pattern of the concept matches anywhere in the text
    pub fn mentions(&self, concept: Concept, text: &str) -> bool {
        self.concept(concept).iter().any(|p| p.is_match(text))
    }

    /// Salutation tiers, best tier first
    pub fn salutation_tiers(&self) -> &[(SalutationTier, Vec<Pattern>)] {
        &self.salutations
    }

    pub fn closings(&self) -> &[Pattern] {
        &self.closings
    }

    pub fn fillers(&self) -> &[Filler] {
        &self.fillers
    }

    /// All patterns that locate a narrative section
    pub fn flow_group(&self, group: FlowGroup) -> Vec<&Pattern> {
        match group {
            FlowGroup::Salutation => [
                SalutationTier::Good,
                SalutationTier::Normal,
                SalutationTier::Excellent,
            ]
            .into_iter()
            .flat_map(|tier| self.tier(tier))
            .collect(),
            FlowGroup::BasicInfo => [Concept::Name, Concept::Age, Concept::Class, Concept::School]
                .into_iter()
                .flat_map(|c| self.concept(c))
                .collect(),
            FlowGroup::AdditionalInfo => [
                Concept::Hobby,
                Concept::Interest,
                Concept::Goal,
                Concept::FunFact,
            ]
            .into_iter()
            .flat_map(|c| self.concept(c))
            .collect(),
            FlowGroup::Closing => self.closings.iter().collect(),
        }
    }

    fn tier(&self, tier: SalutationTier) -> &[Pattern] {
        self.salutations
            .iter()
            .find(|(t, _)| *t == tier)
            .map(|(_, patterns)| patterns.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_all(sources: &'static [&'static str]) -> Vec<Pattern> {
    sources
        .iter()
        .filter_map(|&source| compile(source, source).map(|regex| Pattern { source, regex }))
        .collect()
}

fn compile(label: &str, pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::error!(pattern = label, error = %e, "skipping invalid built-in pattern");
            None
        }
    }
}

/// Global pattern library (compile once per process).
pub fn global_pattern_library() -> &'static PatternLibrary {
    use std::sync::OnceLock;
    static LIBRARY: OnceLock<PatternLibrary> = OnceLock::new();
    LIBRARY.get_or_init(PatternLibrary::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_pattern_compiles() {
        let lib = PatternLibrary::new();
        for concept in Concept::MANDATORY.iter().chain(Concept::OPTIONAL.iter()) {
            assert_eq!(
                lib.concept(*concept).len(),
                concept.sources().len(),
                "concept {:?}",
                concept
            );
        }
        for tier in SalutationTier::ALL {
            assert_eq!(lib.tier(tier).len(), tier.sources().len());
        }
        assert_eq!(lib.closings().len(), CLOSING_SOURCES.len());
        assert_eq!(lib.fillers().len(), FILLER_WORDS.len());
    }

    #[test]
    fn global_library_is_shared() {
        let a = global_pattern_library() as *const PatternLibrary;
        let b = global_pattern_library() as *const PatternLibrary;
        assert_eq!(a, b);
    }

    #[test]
    fn filler_so_does_not_match_inside_software() {
        let lib = PatternLibrary::new();
        let so = lib.fillers().iter().find(|f| f.phrase() == "so").unwrap();
        assert_eq!(so.count("the software team built the software"), 0);
        assert_eq!(so.count("so i think so"), 2);
    }

    #[test]
    fn multi_word_filler_needs_both_boundaries() {
        let lib = PatternLibrary::new();
        let you_know = lib
            .fillers()
            .iter()
            .find(|f| f.phrase() == "you know")
            .unwrap();
        assert_eq!(you_know.count("you know, it was fine, you known"), 1);
    }

    #[test]
    fn age_pattern_matches_numeric_years() {
        let lib = PatternLibrary::new();
        assert!(lib.mentions(Concept::Age, "i am 15 years old"));
        assert!(!lib.mentions(Concept::Age, "hello there"));
    }

    #[test]
    fn capitalised_pattern_never_matches_lowercased_text() {
        let lib = PatternLibrary::new();
        let pattern = lib
            .concept(Concept::Age)
            .iter()
            .find(|p| p.source() == r"\bI'm \d+\b")
            .unwrap();
        assert!(!pattern.is_match("i'm 15"));
    }

    #[test]
    fn salutation_group_contains_every_tier() {
        let lib = PatternLibrary::new();
        let total: usize = SalutationTier::ALL.iter().map(|t| t.sources().len()).sum();
        assert_eq!(lib.flow_group(FlowGroup::Salutation).len(), total);
    }
}
