//! Fixed keyword tables for the telephone-operator vacancy.

/// One keyword rule. `keyword` is stored lowercased so it can be matched
/// against case-folded text directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub keyword: String,
    pub weight: i32,
    pub reason: String,
}

impl Rule {
    pub fn new(keyword: &str, weight: i32, reason: &str) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            weight,
            reason: reason.to_string(),
        }
    }
}

/// Disqualifies a candidate when both tokens occur anywhere in the text.
/// Co-occurrence is document-wide; no proximity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoRejectRule {
    pub employer: String,
    pub employment_marker: String,
    pub report_line: String,
}

impl AutoRejectRule {
    pub fn new(employer: &str, employment_marker: &str, report_line: &str) -> Self {
        Self {
            employer: employer.to_lowercase(),
            employment_marker: employment_marker.to_lowercase(),
            report_line: report_line.to_string(),
        }
    }

    /// `normalized` must already be lowercased.
    pub fn applies_to(&self, normalized: &str) -> bool {
        normalized.contains(&self.employer) && normalized.contains(&self.employment_marker)
    }
}

/// Ordered checks, ordered penalties and the auto-reject override.
/// Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub checks: Vec<Rule>,
    pub penalties: Vec<Rule>,
    pub auto_reject: AutoRejectRule,
}

impl RuleSet {
    /// Rules for the telephone-operator opening.
    pub fn telephonist() -> Self {
        Self {
            checks: vec![
                Rule::new("телефон", 10, "Упоминание телефонных звонков"),
                Rule::new("звонк", 10, "Опыт звонков клиентам"),
                Rule::new("переговор", 10, "Участие в переговорах"),
                Rule::new("продаж", 10, "Опыт продаж"),
                Rule::new("клиент", 5, "Работа с клиентами"),
                Rule::new("1с", 5, "Опыт с 1С"),
                Rule::new("crm", 3, "Работа с CRM-системами"),
                Rule::new("внимательн", 5, "Упоминание внимательности"),
                Rule::new("детал", 5, "Внимание к деталям"),
                Rule::new("удален", 2, "Опыт удаленной работы"),
            ],
            penalties: vec![
                Rule::new("гос", -5, "Опыт в государственных структурах"),
                Rule::new("меньше года", -5, "Работа на месте меньше года"),
            ],
            auto_reject: AutoRejectRule::new(
                "рарус",
                "настоящее время",
                "❌ Работает в «Рарус» в настоящее время — автоотказ",
            ),
        }
    }
}
