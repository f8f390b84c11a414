use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Rank reported for an empty query, better than any real score
pub const BEST_RANK: i64 = i64::MAX;

/// Outcome of scoring one field against the search query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub passed: bool,
    /// Higher is better; earlier and denser matches score higher
    pub rank: i64,
}

impl FuzzyMatch {
    fn rejected() -> Self {
        Self {
            passed: false,
            rank: 0,
        }
    }
}

/// Case-insensitive fuzzy scorer for the global search box
pub struct FuzzyFilter {
    matcher: SkimMatcherV2,
    min_score: i64,
}

impl Default for FuzzyFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for FuzzyFilter {
    fn clone(&self) -> Self {
        Self::new().with_min_score(self.min_score)
    }
}

impl FuzzyFilter {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
            min_score: 0,
        }
    }

    /// Reject fuzzy (non-substring) matches scoring below `min_score`
    pub fn with_min_score(mut self, min_score: i64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn min_score(&self) -> i64 {
        self.min_score
    }

    /// Score `field` against `query`.
    ///
    /// A blank query always passes with [`BEST_RANK`]. A case-insensitive
    /// substring always passes; other subsequence matches pass when their
    /// score reaches the configured minimum.
    pub fn matches(&self, field: &str, query: &str) -> FuzzyMatch {
        let query = query.trim();
        if query.is_empty() {
            return FuzzyMatch {
                passed: true,
                rank: BEST_RANK,
            };
        }

        let score = self.matcher.fuzzy_match(field, query);
        let is_substring = field.to_lowercase().contains(&query.to_lowercase());

        match score {
            Some(score) if is_substring || score >= self.min_score => FuzzyMatch {
                passed: true,
                rank: score,
            },
            None if is_substring => FuzzyMatch {
                passed: true,
                rank: 0,
            },
            _ => FuzzyMatch::rejected(),
        }
    }

    /// Best match across several fields of one row
    pub fn best_match<'a, I>(&self, fields: I, query: &str) -> FuzzyMatch
    where
        I: IntoIterator<Item = &'a str>,
    {
        fields
            .into_iter()
            .map(|field| self.matches(field, query))
            .filter(|m| m.passed)
            .max_by_key(|m| m.rank)
            .unwrap_or_else(FuzzyMatch::rejected)
    }
}

/// Score with the default matcher
pub fn fuzzy_match(field: &str, query: &str) -> FuzzyMatch {
    FuzzyFilter::new().matches(field, query)
}
