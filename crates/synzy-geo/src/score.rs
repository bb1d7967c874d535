//! Composite quality score.
//!
//! Up to six factors each produce a 0..=100 sub-score; the score is the
//! rounded mean of the factors an entity actually carries.

use serde::Serialize;
use serde_json::Value;
use synzy_core::Entity;

/// Board-name fragments and their sub-scores, checked in order.
const BOARD_SCORES: &[(&str, f64)] = &[("cbse", 85.0), ("icse", 90.0), ("ib", 95.0), ("state", 65.0)];
const UNLISTED_BOARD_SCORE: f64 = 70.0;

/// Score in `0..=100`; `0` when no factor is present.
#[must_use]
pub fn score(entity: &Entity) -> u8 {
    let factors: Vec<f64> = [
        rank_factor(entity),
        ratio_factor(entity),
        technology_factor(entity),
        facilities_factor(entity),
        international_factor(entity),
        board_factor(entity),
    ]
    .into_iter()
    .flatten()
    .collect();

    if factors.is_empty() {
        return 0;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = factors.iter().sum::<f64>() / factors.len() as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = mean.round().clamp(0.0, 100.0) as u8;
    clamped
}

fn rank_factor(entity: &Entity) -> Option<f64> {
    let rank = entity.get_f64("rank").filter(|r| *r > 0.0)?;
    Some((100.0 - (rank - 1.0) * 0.5).max(0.0))
}

fn ratio_factor(entity: &Entity) -> Option<f64> {
    let ratio = entity.get_f64("TeacherToStudentRatio").filter(|r| *r > 0.0)?;
    Some(match ratio {
        r if r <= 15.0 => 100.0,
        r if r <= 20.0 => 85.0,
        r if r <= 25.0 => 70.0,
        r if r <= 30.0 => 55.0,
        _ => 40.0,
    })
}

fn technology_factor(entity: &Entity) -> Option<f64> {
    entity
        .get_f64("smartClassroomsPercentage")
        .filter(|p| *p != 0.0 && !p.is_nan())
}

fn facilities_factor(entity: &Entity) -> Option<f64> {
    let listed = entity
        .get("facilities")
        .filter(|v| !v.is_null())
        .or_else(|| entity.get("amenities"));
    per_item(array_len(listed), 10.0)
}

fn international_factor(entity: &Entity) -> Option<f64> {
    let count = array_len(entity.get("exchangePrograms")) + array_len(entity.get("globalTieups"));
    per_item(count, 20.0)
}

fn board_factor(entity: &Entity) -> Option<f64> {
    let board = entity.get_str("board")?.to_lowercase();
    Some(
        BOARD_SCORES
            .iter()
            .find(|(fragment, _)| board.contains(*fragment))
            .map_or(UNLISTED_BOARD_SCORE, |(_, s)| *s),
    )
}

/// `count * weight` capped at 100, absent for zero items.
#[allow(clippy::cast_precision_loss)]
fn per_item(count: usize, weight: f64) -> Option<f64> {
    (count > 0).then(|| (count as f64 * weight).min(100.0))
}

fn array_len(value: Option<&Value>) -> usize {
    value.and_then(Value::as_array).map_or(0, Vec::len)
}

/// `"N/A"` for an unscored entity, the number otherwise.
#[must_use]
pub fn score_display(score: u8) -> String {
    if score > 0 {
        score.to_string()
    } else {
        "N/A".to_string()
    }
}

/// Display band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
    Unrated,
}

impl ScoreTier {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Excellent,
            80..=89 => Self::VeryGood,
            70..=79 => Self::Good,
            60..=69 => Self::Fair,
            50..=59 => Self::Poor,
            _ => Self::Unrated,
        }
    }

    /// Presentation color class.
    #[must_use]
    pub const fn color_class(self) -> &'static str {
        match self {
            Self::Excellent => "text-green-600",
            Self::VeryGood => "text-green-500",
            Self::Good => "text-yellow-500",
            Self::Fair => "text-orange-500",
            Self::Poor => "text-red-500",
            Self::Unrated => "text-gray-500",
        }
    }
}
