//! Risk-matched fund recommendations.

use crate::types::{FundMetrics, MetricsTable, RiskClass, RiskProfile};
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Best-scoring funds of the requested risk tier.
///
/// Funds are ordered by composite score, highest first; equal scores are
/// ordered by scheme name so the output does not depend on input order. At
/// most `top_k` funds are returned, and none when no fund is in the tier.
///
/// # Errors
///
/// `Error::InvalidParameter` when `top_k` is zero.
pub fn recommend(
    table: &MetricsTable,
    profile: RiskProfile,
    top_k: usize,
) -> Result<Vec<&FundMetrics>> {
    if top_k == 0 {
        return Err(Error::InvalidParameter(
            "top_k must be at least 1".to_string(),
        ));
    }

    let class = profile.risk_class();
    let mut picks: Vec<&FundMetrics> = table.iter().filter(|m| m.risk_class == class).collect();

    picks.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.scheme.cmp(&b.scheme))
    });
    picks.truncate(top_k);

    tracing::debug!(%profile, top_k, matched = picks.len(), "Ranked funds");
    Ok(picks)
}

/// Number of funds in each risk class, including `Unknown`.
///
/// Classes with no funds are omitted.
pub fn risk_distribution(table: &MetricsTable) -> BTreeMap<RiskClass, usize> {
    let mut counts = BTreeMap::new();
    for row in table {
        *counts.entry(row.risk_class).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fund(scheme: &str, class: RiskClass, score: f64) -> FundMetrics {
        FundMetrics {
            scheme: scheme.to_string(),
            cagr: None,
            volatility: None,
            sharpe: None,
            max_drawdown: None,
            risk_class: class,
            score,
        }
    }

    fn names<'a>(picks: &[&'a FundMetrics]) -> Vec<&'a str> {
        picks.iter().map(|m| m.scheme.as_str()).collect()
    }

    fn sample_table() -> MetricsTable {
        MetricsTable::new(vec![
            fund("Alpha", RiskClass::Balanced, 0.30),
            fund("Beta", RiskClass::Aggressive, 0.90),
            fund("Gamma", RiskClass::Balanced, 0.70),
            fund("Delta", RiskClass::Balanced, 0.50),
            fund("Epsilon", RiskClass::Conservative, 0.10),
            fund("Zeta", RiskClass::Unknown, 0.00),
        ])
    }

    #[test]
    fn test_recommend_sorted_by_score() {
        let table = sample_table();
        let picks = recommend(&table, RiskProfile::Balanced, 10).unwrap();

        assert_eq!(names(&picks), vec!["Gamma", "Delta", "Alpha"]);
    }

    #[test]
    fn test_recommend_truncates_to_top_k() {
        let table = sample_table();
        let picks = recommend(&table, RiskProfile::Balanced, 2).unwrap();

        assert_eq!(names(&picks), vec!["Gamma", "Delta"]);
    }

    #[test]
    fn test_recommend_fewer_than_k() {
        let table = sample_table();
        let picks = recommend(&table, RiskProfile::Aggressive, 3).unwrap();

        assert_eq!(names(&picks), vec!["Beta"]);
    }

    #[test]
    fn test_recommend_empty_tier() {
        let table = MetricsTable::new(vec![fund("Alpha", RiskClass::Balanced, 0.3)]);
        let picks = recommend(&table, RiskProfile::Conservative, 3).unwrap();

        assert!(picks.is_empty());
    }

    #[test]
    fn test_recommend_ties_by_scheme() {
        let table = MetricsTable::new(vec![
            fund("Omega", RiskClass::Balanced, 0.5),
            fund("Alpha", RiskClass::Balanced, 0.5),
            fund("Mu", RiskClass::Balanced, 0.5),
        ]);
        let picks = recommend(&table, RiskProfile::Balanced, 3).unwrap();

        assert_eq!(names(&picks), vec!["Alpha", "Mu", "Omega"]);
    }

    #[test]
    fn test_recommend_rejects_zero_k() {
        let table = sample_table();
        let result = recommend(&table, RiskProfile::Balanced, 0);

        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_risk_distribution() {
        let dist = risk_distribution(&sample_table());

        assert_eq!(dist.get(&RiskClass::Balanced), Some(&3));
        assert_eq!(dist.get(&RiskClass::Aggressive), Some(&1));
        assert_eq!(dist.get(&RiskClass::Conservative), Some(&1));
        assert_eq!(dist.get(&RiskClass::Unknown), Some(&1));
        assert_eq!(dist.values().sum::<usize>(), 6);
    }

    fn class_strategy() -> impl Strategy<Value = RiskClass> {
        prop_oneof![
            Just(RiskClass::Conservative),
            Just(RiskClass::Balanced),
            Just(RiskClass::Aggressive),
            Just(RiskClass::Unknown),
        ]
    }

    fn profile_strategy() -> impl Strategy<Value = RiskProfile> {
        prop_oneof![
            Just(RiskProfile::Conservative),
            Just(RiskProfile::Balanced),
            Just(RiskProfile::Aggressive),
        ]
    }

    proptest! {
        #[test]
        fn prop_recommend_respects_tier_and_k(
            entries in prop::collection::vec((class_strategy(), -5.0f64..5.0), 0..40),
            profile in profile_strategy(),
            top_k in 1usize..12,
        ) {
            let rows = entries
                .iter()
                .enumerate()
                .map(|(i, (class, score))| fund(&format!("Fund {i:02}"), *class, *score))
                .collect();
            let table = MetricsTable::new(rows);

            let picks = recommend(&table, profile, top_k).unwrap();
            let in_tier = table.iter().filter(|m| m.risk_class == profile.risk_class()).count();

            prop_assert_eq!(picks.len(), in_tier.min(top_k));
            prop_assert!(picks.iter().all(|m| m.risk_class == profile.risk_class()));
            prop_assert!(picks.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
}
