use serde::Serialize;

pub const DEFAULT_THRESHOLD: f64 = 0.6;
pub const MIN_INPUT_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub target: String,
    pub score: f64,
}

/// Positional similarity: characters equal at the same index, over the longer length.
/// Ties keep the earliest candidate.
pub fn best_match<S: AsRef<str>>(input: &str, candidates: &[S]) -> Option<Match> {
    let input: Vec<char> = input.to_lowercase().chars().collect();

    let mut best: Option<(&str, f64)> = None;
    let mut best_score = 0.0;
    for candidate in candidates {
        let candidate = candidate.as_ref();
        let score = positional_score(&input, candidate);
        if score > best_score {
            best_score = score;
            best = Some((candidate, score));
        }
    }

    best.map(|(target, score)| Match {
        target: target.to_string(),
        score,
    })
}

fn positional_score(input: &[char], candidate: &str) -> f64 {
    let candidate: Vec<char> = candidate.to_lowercase().chars().collect();
    let longest = input.len().max(candidate.len());
    if longest == 0 {
        return 0.0;
    }

    let common = input
        .iter()
        .zip(candidate.iter())
        .filter(|(a, b)| a == b)
        .count();
    common as f64 / longest as f64
}

/// "Did you mean" policy on top of [`best_match`].
#[derive(Debug, Clone)]
pub struct Suggester {
    candidates: Vec<String>,
    threshold: f64,
}

impl Suggester {
    pub fn new(candidates: Vec<String>, threshold: f64) -> Self {
        Self {
            candidates,
            threshold,
        }
    }

    pub fn suggest(&self, input: &str) -> Option<Match> {
        if input.chars().count() < MIN_INPUT_CHARS {
            return None;
        }

        best_match(input, &self.candidates)
            .filter(|found| found.score > self.threshold)
            .filter(|found| found.target != input)
    }
}
