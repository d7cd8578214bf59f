//! Static keyword table mapping each mood to weighted terms.
//!
//! Every mood carries three tiers of terms. The table is built once on first
//! use and is read-only for the rest of the process.

use crate::mood::Mood;

/// Weight tier of a lexicon term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Primary,
    Secondary,
    Intensity,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Primary, Tier::Secondary, Tier::Intensity];
}

/// Keyword sets for one mood.
#[derive(Debug, Clone, Copy)]
pub struct LexiconEntry {
    pub mood: Mood,
    pub primary: &'static [&'static str],
    pub secondary: &'static [&'static str],
    pub intensity: &'static [&'static str],
}

impl LexiconEntry {
    #[must_use]
    pub fn terms(&self, tier: Tier) -> &'static [&'static str] {
        match tier {
            Tier::Primary => self.primary,
            Tier::Secondary => self.secondary,
            Tier::Intensity => self.intensity,
        }
    }

    /// Every term of this entry paired with its tier.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &'static str)> + '_ {
        Tier::ALL
            .into_iter()
            .flat_map(move |tier| self.terms(tier).iter().map(move |term| (tier, *term)))
    }
}

lazy_static::lazy_static! {
    static ref LEXICON: Vec<LexiconEntry> = vec![
        LexiconEntry {
            mood: Mood::Happy,
            primary: &["happy", "joy", "excited", "great", "amazing", "wonderful", "cheerful", "delighted"],
            secondary: &["good", "nice", "pleased", "satisfied", "content", "upbeat"],
            intensity: &["ecstatic", "thrilled", "overjoyed", "euphoric"],
        },
        LexiconEntry {
            mood: Mood::Sad,
            primary: &["sad", "depressed", "down", "lonely", "heartbroken", "melancholy", "miserable"],
            secondary: &["blue", "gloomy", "disappointed", "hurt", "upset"],
            intensity: &["devastated", "crushed", "despondent", "hopeless"],
        },
        LexiconEntry {
            mood: Mood::Energetic,
            primary: &["energetic", "pumped", "hyper", "motivated", "active", "powerful"],
            secondary: &["workout", "exercise", "run", "dance", "move"],
            intensity: &["explosive", "unstoppable", "charged", "electrified"],
        },
        LexiconEntry {
            mood: Mood::Calm,
            primary: &["calm", "peaceful", "relax", "chill", "tranquil", "serene"],
            secondary: &["meditate", "zen", "quiet", "still", "composed"],
            intensity: &["blissful", "centered", "harmonious"],
        },
        LexiconEntry {
            mood: Mood::Romantic,
            primary: &["love", "romantic", "crush", "date", "relationship", "tender"],
            secondary: &["affection", "caring", "devoted", "intimate"],
            intensity: &["passionate", "smitten", "infatuated", "adoring"],
        },
        LexiconEntry {
            mood: Mood::Angry,
            primary: &["angry", "mad", "furious", "rage", "frustrated", "annoyed"],
            secondary: &["irritated", "bothered", "pissed", "livid"],
            intensity: &["enraged", "incensed", "outraged", "seething"],
        },
        LexiconEntry {
            mood: Mood::Anxious,
            primary: &["anxious", "nervous", "worried", "stressed", "tense", "overwhelmed"],
            secondary: &["uneasy", "restless", "concerned", "troubled"],
            intensity: &["panicked", "terrified", "frantic", "distressed"],
        },
        LexiconEntry {
            mood: Mood::Nostalgic,
            primary: &["nostalgic", "memories", "remember", "past", "throwback", "reminisce"],
            secondary: &["missing", "longing", "sentimental", "wistful"],
            intensity: &["yearning", "pining"],
        },
        LexiconEntry {
            mood: Mood::Confident,
            primary: &["confident", "powerful", "strong", "fierce", "unstoppable", "boss"],
            secondary: &["capable", "determined", "bold", "assured"],
            intensity: &["invincible", "dominant", "fearless", "triumphant"],
        },
    ];
}

/// The whole lexicon, one entry per mood in priority order.
#[must_use]
pub fn entries() -> &'static [LexiconEntry] {
    &LEXICON
}

/// Lexicon entry for a single mood.
#[must_use]
pub fn entry(mood: Mood) -> &'static LexiconEntry {
    &LEXICON[mood as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_one_entry_per_mood_in_order() {
        let moods: Vec<Mood> = entries().iter().map(|e| e.mood).collect();
        assert_eq!(moods, Mood::ALL.to_vec());
        for mood in Mood::ALL {
            assert_eq!(entry(mood).mood, mood);
        }
    }

    #[test]
    fn test_tiers_are_disjoint_within_a_mood() {
        for e in entries() {
            let primary: HashSet<_> = e.primary.iter().collect();
            let secondary: HashSet<_> = e.secondary.iter().collect();
            let intensity: HashSet<_> = e.intensity.iter().collect();
            assert!(primary.is_disjoint(&secondary), "{} primary/secondary overlap", e.mood);
            assert!(primary.is_disjoint(&intensity), "{} primary/intensity overlap", e.mood);
            assert!(secondary.is_disjoint(&intensity), "{} secondary/intensity overlap", e.mood);
        }
    }

    #[test]
    fn test_terms_are_lowercase() {
        for e in entries() {
            for (_, term) in e.iter() {
                assert_eq!(term, term.to_lowercase());
                assert!(!term.is_empty());
            }
        }
    }

    #[test]
    fn test_iter_covers_all_tiers() {
        let calm = entry(Mood::Calm);
        let count = calm.iter().count();
        assert_eq!(count, calm.primary.len() + calm.secondary.len() + calm.intensity.len());
        assert!(calm.iter().any(|(tier, term)| tier == Tier::Intensity && term == "blissful"));
    }
}
