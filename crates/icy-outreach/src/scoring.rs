use rand::Rng;

/// Score used when a creation path has no scorer output of its own.
pub const DEFAULT_BRAND_FIT: i64 = 75;

/// What a scorer gets to see about a candidate.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub followers: i64,
}

/// Rates influencer/brand compatibility on a 1-100 scale. Discovery clamps
/// whatever an implementation returns into that range before storing it.
pub trait BrandFitScorer: Send + Sync {
    fn score(&self, input: &ScoringInput<'_>) -> i64;
}

/// Placeholder heuristic: uniform in 60..=100, ignoring the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFitScorer;

impl BrandFitScorer for RandomFitScorer {
    fn score(&self, _input: &ScoringInput<'_>) -> i64 {
        rand::rng().random_range(60..=100)
    }
}

/// Always returns the same score.
#[derive(Debug, Clone, Copy)]
pub struct FixedFitScorer(pub i64);

impl BrandFitScorer for FixedFitScorer {
    fn score(&self, _input: &ScoringInput<'_>) -> i64 {
        self.0.clamp(1, 100)
    }
}

/// Pull the first integer out of free-form model output and clamp it to 1..=100.
pub fn parse_score(text: &str) -> Option<u8> {
    let digits: String = text
        .trim()
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let value: u64 = digits.parse().ok()?;
    Some(value.clamp(1, 100) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_scorer_stays_in_range() {
        let input = ScoringInput {
            name: "Alex",
            category: "tech",
            followers: 10_000,
        };
        for _ in 0..500 {
            let score = RandomFitScorer.score(&input);
            assert!((60..=100).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn test_fixed_scorer_clamps() {
        let input = ScoringInput {
            name: "Alex",
            category: "tech",
            followers: 10_000,
        };
        assert_eq!(FixedFitScorer(150).score(&input), 100);
        assert_eq!(FixedFitScorer(82).score(&input), 82);
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("87"), Some(87));
        assert_eq!(parse_score(" Score: 92/100\n"), Some(92));
        assert_eq!(parse_score("250"), Some(100));
        assert_eq!(parse_score("0"), Some(1));
        assert_eq!(parse_score("a great fit"), None);
    }
}
