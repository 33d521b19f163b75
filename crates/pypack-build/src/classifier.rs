//! Stage classification for packaging tool output
//!
//! An ordered table of patterns maps one line of tool output to an optional
//! classification. Patterns are tested in declaration order and the first
//! match wins, so a line matching several patterns is attributed to the
//! earliest-declared one.

use regex::Regex;

/// Share of overall progress owned by the dynamic "<current>/<total> steps"
/// pattern (the building phase's budget).
pub const DYNAMIC_BUDGET: f64 = 20.0;

/// Display label for dynamic step updates
const DYNAMIC_LABEL: &str = "动态进度";

/// Stable identifiers for the fixed-weight stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKey {
    Analyzing,
    Collecting,
    Generating,
    Writing,
    Building,
    Completed,
}

impl StageKey {
    /// Stable string form, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analyzing => "analyzing",
            Self::Collecting => "collecting",
            Self::Generating => "generating",
            Self::Writing => "writing",
            Self::Building => "building",
            Self::Completed => "completed",
        }
    }
}

/// How one pattern contributes to overall progress
#[derive(Debug, Clone, Copy)]
enum PatternKind {
    /// Credited once, first occurrence only
    Fixed { key: StageKey, weight: f64 },
    /// Recomputed on every match from the reported step fraction
    Dynamic,
}

/// One entry of the ordered pattern table
struct StagePattern {
    matcher: Regex,
    label: &'static str,
    kind: PatternKind,
}

/// Result of classifying one line of output
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// A fixed-weight stage was observed
    Fixed {
        key: StageKey,
        label: &'static str,
        weight: f64,
    },
    /// A "<current>/<total> steps" line was observed
    Dynamic { label: &'static str, delta: f64 },
}

impl Classification {
    /// Display label of the matched stage
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fixed { label, .. } | Self::Dynamic { label, .. } => *label,
        }
    }
}

/// Ordered first-match-wins classifier over the tool's log vocabulary
pub struct StageClassifier {
    patterns: Vec<StagePattern>,
}

impl Default for StageClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StageClassifier {
    /// Build the classifier with the default pattern table
    ///
    /// Fixed weights sum to 100 across the six named stages; the dynamic
    /// pattern spends the building phase's 20-point budget.
    pub fn new() -> Self {
        let patterns = vec![
            fixed(r"(?i)analyzing\s.+", "分析依赖", StageKey::Analyzing, 15.0),
            fixed(r"(?i)collecting\s.+", "收集文件", StageKey::Collecting, 25.0),
            fixed(r"(?i)generating\s.+", "生成中间文件", StageKey::Generating, 15.0),
            fixed(r"(?i)writing\s.+", "写入数据", StageKey::Writing, 20.0),
            fixed(r"(?i)building\s.+", "构建可执行文件", StageKey::Building, 20.0),
            fixed(r"(?i)completed\s.+", "完成打包", StageKey::Completed, 5.0),
            StagePattern {
                matcher: Regex::new(r"(\d+)/(\d+)\s+steps").expect("valid stage pattern"),
                label: DYNAMIC_LABEL,
                kind: PatternKind::Dynamic,
            },
        ];

        Self { patterns }
    }

    /// Classify one line of output, or return `None` if no pattern matches
    pub fn classify(&self, line: &str) -> Option<Classification> {
        for pattern in &self.patterns {
            match pattern.kind {
                PatternKind::Fixed { key, weight } => {
                    if pattern.matcher.is_match(line) {
                        return Some(Classification::Fixed { key, label: pattern.label, weight });
                    }
                }
                PatternKind::Dynamic => {
                    if let Some(captures) = pattern.matcher.captures(line) {
                        if let Some(delta) = step_delta(&captures[1], &captures[2]) {
                            return Some(Classification::Dynamic { label: pattern.label, delta });
                        }
                    }
                }
            }
        }

        None
    }

    /// Sum of all fixed stage weights
    pub fn fixed_weight_total(&self) -> f64 {
        self.patterns
            .iter()
            .filter_map(|p| match p.kind {
                PatternKind::Fixed { weight, .. } => Some(weight),
                PatternKind::Dynamic => None,
            })
            .sum()
    }
}

fn fixed(pattern: &str, label: &'static str, key: StageKey, weight: f64) -> StagePattern {
    StagePattern {
        matcher: Regex::new(pattern).expect("valid stage pattern"),
        label,
        kind: PatternKind::Fixed { key, weight },
    }
}

/// Compute (current/total) x budget from captured step counts
fn step_delta(current: &str, total: &str) -> Option<f64> {
    let current: f64 = current.parse().ok()?;
    let total: f64 = total.parse().ok()?;
    if total > 0.0 {
        Some((current / total) * DYNAMIC_BUDGET)
    } else {
        None
    }
}
