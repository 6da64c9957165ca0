use crate::ruleset::{RiskRules, ScoreBucket};

use super::rounding::round_half_up;
use super::totals::DeclarationTotals;

/// How a ladder picks its outcome when several rungs match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LadderResolution {
    /// The earliest matching rung wins.
    FirstMatch,
    /// Rungs are applied in order and each match replaces the previous outcome.
    LastMatch,
}

type Predicate = fn(&DeclarationTotals) -> bool;

/// Ordered (predicate, score) pairs with a fallback score when nothing matches.
pub(crate) struct ScoreLadder {
    rungs: Vec<(Predicate, i32)>,
    fallback: i32,
    resolution: LadderResolution,
}

impl ScoreLadder {
    pub(crate) fn resolve(&self, totals: &DeclarationTotals) -> i32 {
        let mut matching = self
            .rungs
            .iter()
            .filter(|(predicate, _)| predicate(totals))
            .map(|(_, score)| *score);

        let selected = match self.resolution {
            LadderResolution::FirstMatch => matching.next(),
            LadderResolution::LastMatch => matching.last(),
        };

        selected.unwrap_or(self.fallback)
    }
}

fn rung(predicate: Predicate, score: i32) -> (Predicate, i32) {
    (predicate, score)
}

pub(crate) fn packaging_ladder(rules: &RiskRules) -> ScoreLadder {
    let scores = rules.packaging;
    ScoreLadder {
        rungs: vec![
            rung(
                |t| t.sealed_count == 0 && t.opened_count > 0,
                scores.no_sealed_opened,
            ),
            rung(|t| t.sealed_count == 1, scores.one_sealed),
            rung(|t| t.sealed_count >= 2, scores.two_plus_sealed),
            rung(|t| t.opened_count == t.qty, scores.all_opened),
        ],
        fallback: scores.default,
        resolution: LadderResolution::LastMatch,
    }
}

pub(crate) fn personal_use_ladder(rules: &RiskRules) -> ScoreLadder {
    let scores = rules.personal_use;
    ScoreLadder {
        rungs: vec![
            rung(|t| t.personal_no_count >= 1, scores.any_no),
            rung(|t| t.personal_yes_count == t.qty, scores.all_yes),
            rung(
                |t| t.personal_yes_count >= 1 && t.personal_unsure_count >= 1,
                scores.some_yes_rest_unsure,
            ),
        ],
        fallback: scores.all_unsure,
        resolution: LadderResolution::FirstMatch,
    }
}

/// Score of the first bucket whose exclusive upper bound exceeds `value`; the last bucket
/// acts as the ceiling for anything beyond.
pub(crate) fn bucket_score(value: f64, buckets: &[ScoreBucket]) -> i32 {
    buckets
        .iter()
        .find(|bucket| value < bucket.upper_bound)
        .or_else(|| buckets.last())
        .map(|bucket| bucket.score)
        .unwrap_or(0)
}

pub(crate) fn quantity_score(totals: &DeclarationTotals, rules: &RiskRules) -> i32 {
    match totals.qty {
        0 | 1 => rules.quantity.one,
        2 => rules.quantity.two,
        _ => rules.quantity.three_plus,
    }
}

pub(crate) fn price_score(totals: &DeclarationTotals, rules: &RiskRules) -> i32 {
    let by_max_price = bucket_score(totals.max_price, &rules.max_price_buckets);
    let by_total_value = bucket_score(totals.total_value, &rules.total_value_buckets);
    let weighted = rules.weights.max_price * f64::from(by_max_price)
        + rules.weights.total_value * f64::from(by_total_value);
    round_half_up(weighted) as i32
}

/// Individual contributions that add up to the raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SubScores {
    pub quantity: i32,
    pub price: i32,
    pub packaging: i32,
    pub personal_use: i32,
}

impl SubScores {
    pub(crate) fn raw_total(&self) -> i32 {
        [self.price, self.packaging, self.personal_use]
            .into_iter()
            .fold(self.quantity, i32::saturating_add)
    }
}

pub(crate) fn score_totals(totals: &DeclarationTotals, rules: &RiskRules) -> SubScores {
    SubScores {
        quantity: quantity_score(totals, rules),
        price: price_score(totals, rules),
        packaging: packaging_ladder(rules).resolve(totals),
        personal_use: personal_use_ladder(rules).resolve(totals),
    }
}
