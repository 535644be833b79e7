//! Keyword scoring of résumé text against a fixed rule set.
//!
//! Matching is plain substring containment on the lowercased text: no
//! tokenization, no word boundaries, no stemming. Each rule fires at most
//! once. The auto-reject rule is evaluated first and short-circuits
//! everything else.

pub mod rules;
pub mod verdict;

use serde::Serialize;

pub use rules::RuleSet;
pub use verdict::Verdict;

/// Out-of-band score for an automatic rejection. Unreachable by summing the
/// ordinary rule weights.
pub const AUTO_REJECT_SCORE: i32 = -999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: i32,
    /// Fired rules in declaration order: checks first, then penalties.
    pub report: Vec<String>,
}

impl ScoreResult {
    pub fn is_auto_rejected(&self) -> bool {
        self.score == AUTO_REJECT_SCORE
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_score(self.score)
    }
}

/// Scoring seam carried in `AppState` as `Arc<dyn ResumeScorer>`.
pub trait ResumeScorer: Send + Sync {
    fn score(&self, text: &str) -> ScoreResult;
}

/// Default scorer over a [`RuleSet`].
pub struct KeywordScorer {
    rules: RuleSet,
}

impl KeywordScorer {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }
}

impl ResumeScorer for KeywordScorer {
    fn score(&self, text: &str) -> ScoreResult {
        score_resume(text, &self.rules)
    }
}

/// Scores `text` against `rules`. Total and pure.
pub fn score_resume(text: &str, rules: &RuleSet) -> ScoreResult {
    let normalized = text.to_lowercase();

    if rules.auto_reject.applies_to(&normalized) {
        return ScoreResult {
            score: AUTO_REJECT_SCORE,
            report: vec![rules.auto_reject.report_line.clone()],
        };
    }

    let mut score = 0;
    let mut report = Vec::new();

    for check in rules.checks.iter().filter(|r| normalized.contains(&r.keyword)) {
        score += check.weight;
        report.push(format!("+{}: {}", check.weight, check.reason));
    }

    // penalty weights carry their own sign
    for penalty in rules.penalties.iter().filter(|r| normalized.contains(&r.keyword)) {
        score += penalty.weight;
        report.push(format!("{}: {}", penalty.weight, penalty.reason));
    }

    ScoreResult { score, report }
}
