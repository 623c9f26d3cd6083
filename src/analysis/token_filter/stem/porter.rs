//! Porter stemming algorithm implementation.
//!
//! This module implements the Porter suffix-stripping algorithm in two modes:
//!
//! - [`PorterMode::Nltk`] (default) reproduces NLTK's `PorterStemmer`, which
//!   extends the published rules with a handful of irregular forms, leaves
//!   words of one or two characters untouched, and adjusts steps 1a, 1b, 1c
//!   and 2. Vocabularies built with NLTK only line up with this mode.
//! - [`PorterMode::Original`] follows the 1980 paper.
//!
//! Within every step the first rule whose suffix matches decides the outcome:
//! when its condition fails the word is returned unchanged and no later rule
//! of that step is tried.
//!
//! # Examples
//!
//! ```
//! use sentiscope::analysis::token_filter::stem::Stemmer;
//! use sentiscope::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("dies"), "die");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::stem::Stemmer;

/// Which flavour of the Porter rules to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PorterMode {
    /// NLTK's default rule set.
    #[default]
    Nltk,
    /// The published algorithm without extensions.
    Original,
}

type Condition<'a> = &'a dyn Fn(&[char]) -> bool;

/// Suffix, replacement, and the condition the remaining stem must meet.
type Rule<'a> = (&'a str, &'a str, Condition<'a>);

/// Porter stemming algorithm implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer {
    mode: PorterMode,
}

impl PorterStemmer {
    /// Create a new Porter stemmer with NLTK's rule set.
    pub fn new() -> Self {
        Self::with_mode(PorterMode::Nltk)
    }

    /// Create a Porter stemmer with the given rule set.
    pub fn with_mode(mode: PorterMode) -> Self {
        PorterStemmer { mode }
    }

    /// The rule set in use.
    pub fn mode(&self) -> PorterMode {
        self.mode
    }

    fn nltk(&self) -> bool {
        self.mode == PorterMode::Nltk
    }

    /// *o: the stem ends consonant-vowel-consonant, the last not w, x or y.
    fn ends_cvc(&self, word: &[char]) -> bool {
        let c = consonants(word);
        let n = c.len();
        (n >= 3 && c[n - 3] && !c[n - 2] && c[n - 1] && !matches!(word[n - 1], 'w' | 'x' | 'y'))
            || (self.nltk() && n == 2 && !c[0] && c[1])
    }

    fn step1a(&self, word: Vec<char>) -> Vec<char> {
        // "dies" -> "die" while "flies" -> "fli"
        if self.nltk() && word.len() == 4 && ends_with(&word, "ies") {
            return replace_suffix(&word, "ies", "ie");
        }

        apply_rules(
            word,
            &[
                ("sses", "ss", &always),
                ("ies", "i", &always),
                ("ss", "ss", &always),
                ("s", "", &always),
            ],
        )
    }

    fn step1b(&self, word: Vec<char>) -> Vec<char> {
        // "died" -> "die" while "spied" -> "spi"
        if self.nltk() && ends_with(&word, "ied") {
            let replacement = if word.len() == 4 { "ie" } else { "i" };
            return replace_suffix(&word, "ied", replacement);
        }

        if ends_with(&word, "eed") {
            if measure(&word[..word.len() - 3]) > 0 {
                return replace_suffix(&word, "eed", "ee");
            }
            return word;
        }

        let intermediate = ["ed", "ing"].iter().find_map(|suffix| {
            if !ends_with(&word, suffix) {
                return None;
            }
            let stem = &word[..word.len() - suffix.len()];
            contains_vowel(stem).then(|| stem.to_vec())
        });
        let Some(mut stem) = intermediate else {
            return word;
        };

        if ends_with(&stem, "at") || ends_with(&stem, "bl") || ends_with(&stem, "iz") {
            stem.push('e');
            return stem;
        }

        if ends_double_consonant(&stem) {
            if !matches!(stem[stem.len() - 1], 'l' | 's' | 'z') {
                stem.pop();
            }
            return stem;
        }

        if measure(&stem) == 1 && self.ends_cvc(&stem) {
            stem.push('e');
        }
        stem
    }

    fn step1c(&self, word: Vec<char>) -> Vec<char> {
        let preceded_by_consonant =
            |stem: &[char]| stem.len() > 1 && consonants(stem).last() == Some(&true);
        let condition: Condition<'_> = if self.nltk() {
            &preceded_by_consonant
        } else {
            &contains_vowel
        };

        apply_rules(word, &[("y", "i", condition)])
    }

    fn step2(&self, word: Vec<char>) -> Vec<char> {
        let nltk = self.nltk();

        // NLTK applies ALLI -> AL first and feeds the result back through step 2
        if nltk && ends_with(&word, "alli") && measure(&word[..word.len() - 4]) > 0 {
            return self.step2(replace_suffix(&word, "alli", "al"));
        }

        let positive = |stem: &[char]| measure(stem) > 0;
        // the "l" of "logi" stays with the stem so that "geo" or "theo" qualify
        let logi_positive = word.len() >= 3 && measure(&word[..word.len() - 3]) > 0;
        let logi = move |_: &[char]| logi_positive;

        let bli: Rule<'_> = if nltk {
            ("bli", "ble", &positive)
        } else {
            ("abli", "able", &positive)
        };

        let base: [Rule<'_>; 20] = [
            ("ational", "ate", &positive),
            ("tional", "tion", &positive),
            ("enci", "ence", &positive),
            ("anci", "ance", &positive),
            ("izer", "ize", &positive),
            bli,
            ("alli", "al", &positive),
            ("entli", "ent", &positive),
            ("eli", "e", &positive),
            ("ousli", "ous", &positive),
            ("ization", "ize", &positive),
            ("ation", "ate", &positive),
            ("ator", "ate", &positive),
            ("alism", "al", &positive),
            ("iveness", "ive", &positive),
            ("fulness", "ful", &positive),
            ("ousness", "ous", &positive),
            ("aliti", "al", &positive),
            ("iviti", "ive", &positive),
            ("biliti", "ble", &positive),
        ];
        let extensions: [Rule<'_>; 2] = [("fulli", "ful", &positive), ("logi", "log", &logi)];

        let mut rules = base.to_vec();
        if nltk {
            rules.extend_from_slice(&extensions);
        }

        apply_rules(word, &rules)
    }

    fn step3(&self, word: Vec<char>) -> Vec<char> {
        let positive = |stem: &[char]| measure(stem) > 0;

        apply_rules(
            word,
            &[
                ("icate", "ic", &positive),
                ("ative", "", &positive),
                ("alize", "al", &positive),
                ("iciti", "ic", &positive),
                ("ical", "ic", &positive),
                ("ful", "", &positive),
                ("ness", "", &positive),
            ],
        )
    }

    fn step4(&self, word: Vec<char>) -> Vec<char> {
        let gt1 = |stem: &[char]| measure(stem) > 1;
        let ion = |stem: &[char]| measure(stem) > 1 && matches!(stem.last(), Some('s' | 't'));

        apply_rules(
            word,
            &[
                ("al", "", &gt1),
                ("ance", "", &gt1),
                ("ence", "", &gt1),
                ("er", "", &gt1),
                ("ic", "", &gt1),
                ("able", "", &gt1),
                ("ible", "", &gt1),
                ("ant", "", &gt1),
                ("ement", "", &gt1),
                ("ment", "", &gt1),
                ("ent", "", &gt1),
                ("ion", "", &ion),
                ("ou", "", &gt1),
                ("ism", "", &gt1),
                ("ate", "", &gt1),
                ("iti", "", &gt1),
                ("ous", "", &gt1),
                ("ive", "", &gt1),
                ("ize", "", &gt1),
            ],
        )
    }

    fn step5a(&self, mut word: Vec<char>) -> Vec<char> {
        if ends_with(&word, "e") {
            let stem = &word[..word.len() - 1];
            let m = measure(stem);
            if m > 1 || (m == 1 && !self.ends_cvc(stem)) {
                word.pop();
            }
        }
        word
    }

    fn step5b(&self, mut word: Vec<char>) -> Vec<char> {
        if ends_with(&word, "ll") && measure(&word[..word.len() - 1]) > 1 {
            word.pop();
        }
        word
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let lowered = word.to_lowercase();

        if self.nltk() {
            if let Some(form) = irregular_form(word) {
                return form.to_string();
            }
            if word.chars().count() <= 2 {
                return lowered;
            }
        }

        let chars: Vec<char> = lowered.chars().collect();
        let chars = self.step1a(chars);
        let chars = self.step1b(chars);
        let chars = self.step1c(chars);
        let chars = self.step2(chars);
        let chars = self.step3(chars);
        let chars = self.step4(chars);
        let chars = self.step5a(chars);
        let chars = self.step5b(chars);

        chars.into_iter().collect()
    }

    fn name(&self) -> &'static str {
        match self.mode {
            PorterMode::Nltk => "porter_nltk",
            PorterMode::Original => "porter",
        }
    }
}

/// Words NLTK maps directly instead of running them through the rules.
fn irregular_form(word: &str) -> Option<&'static str> {
    let form = match word {
        "sky" | "skies" => "sky",
        "dying" => "die",
        "lying" => "lie",
        "tying" => "tie",
        "news" => "news",
        "innings" | "inning" => "inning",
        "outings" | "outing" => "outing",
        "cannings" | "canning" => "canning",
        "howe" => "howe",
        "proceed" => "proceed",
        "exceed" => "exceed",
        "succeed" => "succeed",
        _ => return None,
    };
    Some(form)
}

fn always(_: &[char]) -> bool {
    true
}

/// Consonant flag per position. `y` is a consonant at the start of a word
/// or after a vowel, and a vowel after a consonant.
fn consonants(word: &[char]) -> Vec<bool> {
    let mut flags: Vec<bool> = Vec::with_capacity(word.len());
    for &c in word {
        let consonant = match c {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => flags.last().is_none_or(|&previous| !previous),
            _ => true,
        };
        flags.push(consonant);
    }
    flags
}

/// m in [C](VC){m}[V]: the number of vowel-consonant transitions.
fn measure(stem: &[char]) -> usize {
    let mut m = 0;
    let mut previous_vowel = false;
    for consonant in consonants(stem) {
        if consonant && previous_vowel {
            m += 1;
        }
        previous_vowel = !consonant;
    }
    m
}

fn contains_vowel(stem: &[char]) -> bool {
    consonants(stem).contains(&false)
}

fn ends_double_consonant(word: &[char]) -> bool {
    let n = word.len();
    n >= 2 && word[n - 1] == word[n - 2] && consonants(word)[n - 1]
}

/// Suffixes are ASCII, so their byte length equals their char count.
fn ends_with(word: &[char], suffix: &str) -> bool {
    let n = suffix.len();
    word.len() >= n
        && word[word.len() - n..]
            .iter()
            .zip(suffix.bytes())
            .all(|(&c, b)| c == b as char)
}

fn replace_suffix(word: &[char], suffix: &str, replacement: &str) -> Vec<char> {
    let mut out = word[..word.len() - suffix.len()].to_vec();
    out.extend(replacement.chars());
    out
}

fn apply_rules(word: Vec<char>, rules: &[Rule<'_>]) -> Vec<char> {
    for (suffix, replacement, condition) in rules {
        if ends_with(&word, suffix) {
            let stem = &word[..word.len() - suffix.len()];
            if condition(stem) {
                let mut out = stem.to_vec();
                out.extend(replacement.chars());
                return out;
            }
            return word;
        }
    }
    word
}
