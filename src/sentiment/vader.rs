//! VADER scoring rules applied over a loaded valence table
//!
//! Reproduces the vaderSentiment 3.3 polarity pass: booster and dampener
//! words, ALL-CAPS emphasis, negation up to three words back, "least",
//! idioms, the contrastive "but" shift and `!`/`?` emphasis. The sum of
//! word valences is normalised to a compound score rounded to four decimals.

use std::collections::HashMap;

const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
/// Added to the valence of an ALL-CAPS word when the text is mixed-case
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
/// "never so" / "never this" intensifies rather than negates
const NEVER_SO_SCALAR: f64 = 1.25;
/// Booster weight by distance: one, two and three words back
const BOOSTER_DECAY: [f64; 3] = [1.0, 0.95, 0.9];
const BEFORE_BUT: f64 = 0.5;
const AFTER_BUT: f64 = 1.5;
const EXCLAMATION_BOOST: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_BOOST: f64 = 0.18;
const MAX_QUESTION_BOOST: f64 = 0.96;
/// Normalisation constant for the compound score
const ALPHA: f64 = 15.0;

const NEGATE: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

const INCREMENTERS: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerable", "considerably",
    "decidedly", "deeply", "effing", "enormous", "enormously", "entirely", "especially",
    "exceptional", "exceptionally", "extreme", "extremely", "fabulously", "flipping", "flippin",
    "frackin", "fracking", "fricking", "frickin", "frigging", "friggin", "fully", "fuckin",
    "fucking", "fuggin", "fugging", "greatly", "hella", "highly", "hugely", "incredible",
    "incredibly", "intensely", "major", "majorly", "more", "most", "particularly", "purely",
    "quite", "really", "remarkably", "so", "substantially", "thoroughly", "total", "totally",
    "tremendous", "tremendously", "uber", "unbelievably", "unusually", "utter", "utterly",
    "very",
];

const DAMPENERS: &[&str] = &[
    "almost", "barely", "hardly", "just enough", "kind of", "kinda", "kindof", "kind-of", "less",
    "little", "marginal", "marginally", "occasional", "occasionally", "partly", "scarce",
    "scarcely", "slight", "slightly", "somewhat", "sort of", "sorta", "sortof", "sort-of",
];

/// Multi-word expressions whose valence replaces the word-level one
const IDIOMS: &[(&str, f64)] = &[
    ("the shit", 3.0),
    ("the bomb", 3.0),
    ("bad ass", 1.5),
    ("badass", 1.5),
    ("bus stop", 0.0),
    ("yeah right", -2.0),
    ("kiss of death", -1.5),
    ("to die for", 3.0),
    ("beating heart", 3.1),
    ("broken heart", -2.9),
];

fn booster(word: &str) -> Option<f64> {
    if INCREMENTERS.contains(&word) {
        Some(B_INCR)
    } else if DAMPENERS.contains(&word) {
        Some(B_DECR)
    } else {
        None
    }
}

fn idiom(sequence: &str) -> Option<f64> {
    IDIOMS
        .iter()
        .find(|(phrase, _)| *phrase == sequence)
        .map(|&(_, valence)| valence)
}

fn is_negated(word: &str) -> bool {
    NEGATE.contains(&word) || word.contains("n't")
}

/// Has cased letters and all of them are upper case
fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// Whitespace tokens with surrounding ASCII punctuation removed, unless
/// stripping leaves two characters or fewer (keeps `:)` and `I.`-style tokens)
fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .collect()
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64 * EXCLAMATION_BOOST;
    let questions = match text.matches('?').count() {
        0 | 1 => 0.0,
        count @ 2..=3 => count as f64 * QUESTION_BOOST,
        _ => MAX_QUESTION_BOOST,
    };
    exclamations + questions
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

/// Compound polarity of `text` in [-1, 1], rounded to four decimals
pub(super) fn compound(lexicon: &HashMap<String, f64>, text: &str) -> f64 {
    let scorer = Scorer::new(lexicon, text);
    if scorer.words.is_empty() {
        return 0.0;
    }

    let mut sentiments: Vec<f64> = (0..scorer.words.len())
        .map(|i| scorer.word_sentiment(i))
        .collect();
    scorer.but_shift(&mut sentiments);

    let mut sum: f64 = sentiments.iter().sum();
    let emphasis = punctuation_emphasis(text);
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }

    (normalize(sum) * 10_000.0).round() / 10_000.0
}

struct Scorer<'a> {
    lexicon: &'a HashMap<String, f64>,
    words: Vec<&'a str>,
    lower: Vec<String>,
    /// Some but not all words are ALL-CAPS
    cap_differential: bool,
}

impl<'a> Scorer<'a> {
    fn new(lexicon: &'a HashMap<String, f64>, text: &'a str) -> Self {
        let words = split_words(text);
        let lower = words.iter().map(|w| w.to_lowercase()).collect();
        let caps = words.iter().filter(|w| is_all_caps(w)).count();
        let cap_differential = caps > 0 && caps < words.len();
        Self {
            lexicon,
            words,
            lower,
            cap_differential,
        }
    }

    fn lower(&self, j: usize) -> &str {
        &self.lower[j]
    }

    fn in_lexicon(&self, j: usize) -> bool {
        self.lexicon.contains_key(self.lower(j))
    }

    fn word_sentiment(&self, i: usize) -> f64 {
        let word = self.lower(i);
        let kind_of = word == "kind" && self.lower.get(i + 1).is_some_and(|next| next == "of");
        if booster(word).is_some() || kind_of {
            0.0
        } else {
            self.valence(i)
        }
    }

    fn valence(&self, i: usize) -> f64 {
        let Some(&base) = self.lexicon.get(self.lower(i)) else {
            return 0.0;
        };
        let mut valence = base;

        // "no" directly before another lexicon word is a negation, not a sentiment
        if self.lower(i) == "no" && i + 1 < self.words.len() && self.in_lexicon(i + 1) {
            valence = 0.0;
        }
        if (i > 0 && self.lower(i - 1) == "no")
            || (i > 1 && self.lower(i - 2) == "no")
            || (i > 2 && self.lower(i - 3) == "no" && matches!(self.lower(i - 1), "or" | "nor"))
        {
            valence = base * N_SCALAR;
        }

        if self.cap_differential && is_all_caps(self.words[i]) {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for (start, decay) in BOOSTER_DECAY.iter().enumerate() {
            if i <= start {
                break;
            }
            let j = i - (start + 1);
            if self.in_lexicon(j) {
                continue;
            }
            valence += self.booster_scalar(j, valence) * decay;
            valence = self.negation(valence, start, i);
            if start == 2 {
                valence = self.idioms(valence, i);
            }
        }

        self.least(valence, i)
    }

    /// Booster contribution of word `j`, signed to push `valence` further from zero
    fn booster_scalar(&self, j: usize, valence: f64) -> f64 {
        let Some(mut scalar) = booster(self.lower(j)) else {
            return 0.0;
        };
        if valence < 0.0 {
            scalar = -scalar;
        }
        if self.cap_differential && is_all_caps(self.words[j]) {
            scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
        }
        scalar
    }

    fn negation(&self, valence: f64, start: usize, i: usize) -> f64 {
        let w = |back: usize| self.lower(i - back);
        let so_or_this = |word: &str| matches!(word, "so" | "this");
        match start {
            0 if is_negated(w(1)) => valence * N_SCALAR,
            1 if w(2) == "never" && so_or_this(w(1)) => valence * NEVER_SO_SCALAR,
            1 if w(2) == "without" && w(1) == "doubt" => valence,
            1 if is_negated(w(2)) => valence * N_SCALAR,
            2 if (w(3) == "never" && so_or_this(w(2))) || so_or_this(w(1)) => {
                valence * NEVER_SO_SCALAR
            }
            2 if w(3) == "without" && (w(2) == "doubt" || w(1) == "doubt") => valence,
            2 if is_negated(w(3)) => valence * N_SCALAR,
            _ => valence,
        }
    }

    /// Idioms around word `i` (needs three words of left context), then
    /// multi-word boosters like "kind of" in that context
    fn idioms(&self, valence: f64, i: usize) -> f64 {
        let w = |j: usize| self.lower(j);
        let one_zero = format!("{} {}", w(i - 1), w(i));
        let two_one_zero = format!("{} {} {}", w(i - 2), w(i - 1), w(i));
        let two_one = format!("{} {}", w(i - 2), w(i - 1));
        let three_two_one = format!("{} {} {}", w(i - 3), w(i - 2), w(i - 1));
        let three_two = format!("{} {}", w(i - 3), w(i - 2));

        let mut valence = [&one_zero, &two_one_zero, &two_one, &three_two_one, &three_two]
            .into_iter()
            .find_map(|sequence| idiom(sequence))
            .unwrap_or(valence);

        let len = self.words.len();
        if i + 1 < len {
            if let Some(replaced) = idiom(&format!("{} {}", w(i), w(i + 1))) {
                valence = replaced;
            }
        }
        if i + 2 < len {
            if let Some(replaced) = idiom(&format!("{} {} {}", w(i), w(i + 1), w(i + 2))) {
                valence = replaced;
            }
        }

        for gram in [&three_two_one, &three_two, &two_one] {
            if let Some(scalar) = booster(gram) {
                valence += scalar;
            }
        }
        valence
    }

    /// "least happy" negates; "at least" and "very least" do not
    fn least(&self, valence: f64, i: usize) -> f64 {
        let after_least = i > 0 && self.lower(i - 1) == "least" && !self.in_lexicon(i - 1);
        if after_least && (i == 1 || !matches!(self.lower(i - 2), "at" | "very")) {
            valence * N_SCALAR
        } else {
            valence
        }
    }

    /// Halve sentiment before the first "but" and weight what follows by 1.5
    fn but_shift(&self, sentiments: &mut [f64]) {
        let Some(pivot) = self.lower.iter().position(|w| w == "but") else {
            return;
        };
        for (k, sentiment) in sentiments.iter_mut().enumerate() {
            if k < pivot {
                *sentiment *= BEFORE_BUT;
            } else if k > pivot {
                *sentiment *= AFTER_BUT;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> HashMap<String, f64> {
        [
            ("happy", 2.7),
            ("love", 3.2),
            ("sad", -2.1),
            ("nervous", -1.1),
            ("heart", 2.2),
        ]
        .into_iter()
        .map(|(word, valence)| (word.to_string(), valence))
        .collect()
    }

    fn score(text: &str) -> f64 {
        compound(&lexicon(), text)
    }

    #[test]
    fn plain_sentence() {
        assert_eq!(score("I am happy"), 0.5719);
        assert_eq!(score("i am happy"), 0.5719);
    }

    #[test]
    fn boosters_and_dampeners() {
        assert_eq!(score("I am very happy"), 0.6115);
        assert_eq!(score("I am slightly happy"), 0.5279);
        assert_eq!(score("I am kind of happy"), 0.5279);
    }

    #[test]
    fn all_caps_word_is_emphasised() {
        assert_eq!(score("I am HAPPY"), 0.6633);
        assert_eq!(score("I am VERY happy"), 0.6933);
    }

    #[test]
    fn all_caps_text_is_not_emphasised() {
        assert_eq!(score("I AM HAPPY"), score("i am happy"));
    }

    #[test]
    fn but_shifts_weight_to_second_clause() {
        assert_eq!(score("I was nervous at first but now I love it"), 0.7391);
        // without the contrast the clauses count evenly
        assert_eq!(score("I was nervous at first and now I love it"), 0.4767);
    }

    #[test]
    fn negation_and_least() {
        assert_eq!(score("I am not happy"), -0.4585);
        assert_eq!(score("I am least happy"), -0.4585);
        assert_eq!(score("I am at least happy"), 0.5719);
        assert!(score("no sad") > 0.0);
    }

    #[test]
    fn punctuation_emphasis_follows_counts() {
        assert_eq!(score("Are you happy?"), 0.5719);
        assert_eq!(score("Are you happy??"), 0.6199);
        assert_eq!(score("Are you happy????"), 0.6868);
        assert_eq!(score("I am happy!!"), 0.6467);
        assert_eq!(score("so sad!!"), -0.6094);
    }

    #[test]
    fn idiom_replaces_word_valence() {
        assert_eq!(score("I have a broken heart"), -0.5994);
    }

    #[test]
    fn short_tokens_keep_punctuation() {
        assert_eq!(split_words("Hi, I'm happy!! :)"), vec!["Hi,", "I'm", "happy", ":)"]);
    }

    #[test]
    fn empty_text_is_neutral() {
        assert_eq!(score(""), 0.0);
        assert_eq!(score("the table is brown"), 0.0);
    }
}
