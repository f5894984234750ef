//! Weighted aggregation of child scores into parent scores.
//!
//! One function serves every level (check-ins → measurable, measurables →
//! person, key results → objective → sector). Unmeasured children are left
//! out of both the numerator and the weight total; they never count as zero.

use std::fmt;

use kpi_core::Score;
use serde::{Deserialize, Serialize};

/// A child's score together with its declared weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedScore {
    pub score: Score,
    pub weight: f64,
}

impl WeightedScore {
    #[must_use]
    pub const fn new(score: Score, weight: f64) -> Self {
        Self { score, weight }
    }

    fn contributes(&self) -> Option<(f64, f64)> {
        let value = self.score.value()?;
        (self.weight.is_finite() && self.weight > 0.0).then_some((value, self.weight))
    }
}

/// `Σ(score·weight) / Σ(weight)` over measured children with a positive weight.
///
/// Returns [`Score::Unmeasured`] when nothing contributes: no children, only
/// unmeasured children, or only zero-weight children.
#[must_use]
pub fn weighted_score<I>(children: I) -> Score
where
    I: IntoIterator<Item = WeightedScore>,
{
    let (weighted_sum, weight_total) = children
        .into_iter()
        .filter_map(|child| child.contributes())
        .fold((0.0, 0.0), |(sum, total), (value, weight)| {
            (value.mul_add(weight, sum), total + weight)
        });

    if weight_total > 0.0 {
        Score::measured(weighted_sum / weight_total)
    } else {
        Score::Unmeasured
    }
}

/// The two per-entity metrics aggregated side by side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Realized-to-date against planned-to-date.
    pub pace: Score,
    /// Realized-to-date against the final target, uncapped above 100.
    pub progress: Score,
}

impl ScoreCard {
    pub const UNMEASURED: Self = Self {
        pace: Score::Unmeasured,
        progress: Score::Unmeasured,
    };
}

/// Level of a parent in the aggregation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Person,
    Objective,
    Sector,
    Company,
}

impl NodeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Objective => "objective",
            Self::Sector => "sector",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient aggregation tree built by the caller and discarded after use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AggregateNode {
    /// An evaluated indicator or key result.
    Leaf {
        label: String,
        weight: f64,
        card: ScoreCard,
    },
    /// A person, objective, sector, or company.
    Group {
        label: String,
        kind: NodeKind,
        weight: f64,
        children: Vec<AggregateNode>,
    },
}

impl AggregateNode {
    #[must_use]
    pub fn leaf(label: impl Into<String>, weight: f64, card: ScoreCard) -> Self {
        Self::Leaf {
            label: label.into(),
            weight,
            card,
        }
    }

    #[must_use]
    pub fn group(
        label: impl Into<String>,
        kind: NodeKind,
        weight: f64,
        children: Vec<Self>,
    ) -> Self {
        Self::Group {
            label: label.into(),
            kind,
            weight,
            children,
        }
    }

    #[must_use]
    pub const fn weight(&self) -> f64 {
        match self {
            Self::Leaf { weight, .. } | Self::Group { weight, .. } => *weight,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf { label, .. } | Self::Group { label, .. } => label,
        }
    }

    /// Resolve this node's pace and progress.
    ///
    /// The two metrics are separate weighted passes over the same children: a
    /// child may be measured for one and not the other.
    #[must_use]
    pub fn evaluate(&self) -> ScoreCard {
        match self {
            Self::Leaf { card, .. } => *card,
            Self::Group {
                label,
                kind,
                children,
                ..
            } => {
                let cards: Vec<(f64, ScoreCard)> = children
                    .iter()
                    .map(|child| (child.weight(), child.evaluate()))
                    .collect();

                let pace = weighted_score(
                    cards
                        .iter()
                        .map(|&(weight, card)| WeightedScore::new(card.pace, weight)),
                );
                let progress = weighted_score(
                    cards
                        .iter()
                        .map(|&(weight, card)| WeightedScore::new(card.progress, weight)),
                );

                if !pace.is_measured() && !progress.is_measured() {
                    tracing::debug!(
                        label = %label,
                        kind = %kind,
                        children = children.len(),
                        "aggregate has no measured children"
                    );
                }

                ScoreCard { pace, progress }
            }
        }
    }
}
