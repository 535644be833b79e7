use serde::Serialize;

use super::AUTO_REJECT_SCORE;

pub const HIGH_MATCH_THRESHOLD: i32 = 30;
pub const PARTIAL_MATCH_THRESHOLD: i32 = 15;

/// Qualitative band shown next to the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    AutoRejected,
    HighMatch,
    PartialMatch,
    NoMatch,
}

impl Verdict {
    /// The auto-reject sentinel overrides the bands.
    pub fn from_score(score: i32) -> Self {
        if score == AUTO_REJECT_SCORE {
            Verdict::AutoRejected
        } else if score >= HIGH_MATCH_THRESHOLD {
            Verdict::HighMatch
        } else if score >= PARTIAL_MATCH_THRESHOLD {
            Verdict::PartialMatch
        } else {
            Verdict::NoMatch
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::AutoRejected => "❌ Автоотказ: Кандидат работает в «Рарус» в настоящее время",
            Verdict::HighMatch => "✅ Резюме подходит для вакансии (высокое соответствие)",
            Verdict::PartialMatch => "🟡 Частичное соответствие — стоит рассмотреть внимательнее",
            Verdict::NoMatch => "❌ Резюме не соответствует требованиям",
        }
    }
}
