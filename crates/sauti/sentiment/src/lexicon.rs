//! Embedded valence lexicon.
//!
//! AFINN-style word list trimmed to the vocabulary that actually shows up
//! in transit feedback, with valences in [-5, 5]. Unknown words score 0.

/// Valence for a lowercased token.
pub fn valence(word: &str) -> i32 {
    match word {
        // strongly positive
        "amazing" | "awesome" | "excellent" | "fantastic" | "outstanding" | "superb"
        | "wonderful" => 4,
        "best" | "breathtaking" | "perfect" => 3,
        // positive
        "great" | "love" | "loved" | "impressed" => 3,
        "clean" | "comfortable" | "courteous" | "enjoyable" | "friendly" | "good" | "happy"
        | "helpful" | "kind" | "nice" | "pleasant" | "polite" | "professional" | "prompt"
        | "recommend" | "reliable" | "safe" | "smooth" | "thanks" | "thank" => 2,
        "calm" | "careful" | "decent" | "fair" | "fine" | "okay" | "punctual" | "quick"
        | "timely" => 1,
        // negative
        "crowded" | "late" | "slow" | "noisy" | "bumpy" => -1,
        "annoying" | "bad" | "careless" | "dirty" | "overpriced" | "poor" | "reckless"
        | "rough" | "rude" | "uncomfortable" | "unhelpful" | "unreliable" | "upset" => -2,
        "angry" | "awful" | "dangerous" | "harassed" | "horrible" | "scared" | "terrible"
        | "unsafe" | "worst" => -3,
        "abusive" | "disgusting" | "drunk" | "fraud" | "scam" | "stolen" | "theft" => -4,
        _ => 0,
    }
}
