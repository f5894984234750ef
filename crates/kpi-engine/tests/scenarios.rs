//! End-to-end scenarios across period resolution, distribution, consolidation,
//! scoring, and aggregation.

use kpi_core::{
    AccumulationMethod, ActiveQuarters, Cycle, EngineSettings, Frequency, Measurable, Measurement,
    MetricType, Score,
};
use kpi_engine::{
    AggregateNode, AsOf, Evaluator, MonthSet, NodeKind, PeriodWindow, WeightedScore, Zone,
    accumulate, distribute, distribute_for, has_active_months_in_cycle, score, weighted_score,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

const YEAR: i32 = 2025;

fn full_year() -> PeriodWindow {
    PeriodWindow::new(YEAR, MonthSet::ALL)
}

fn checkins_from(targets: &kpi_core::MonthlyTargets) -> Vec<Measurement> {
    targets
        .iter()
        .map(|(&month, &value)| Measurement::new(month, YEAR, value))
        .collect()
}

fn approx(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[test]
fn halfway_to_target_scores_90() {
    assert!((score(90.0, 80.0, 100.0, 120.0, false) - 90.0).abs() < f64::EPSILON);
}

#[test]
fn average_distribution_repeats_target() {
    let targets = distribute(
        120.0,
        AccumulationMethod::Average,
        &ActiveQuarters::all(),
        1,
        MetricType::Number,
        Frequency::Monthly,
    );
    assert_eq!(targets.len(), 12);
    assert!(targets.values().all(|&v| (v - 120.0).abs() < f64::EPSILON));
}

#[test]
fn integer_distribution_splits_remainder() {
    let targets = distribute(
        100.0,
        AccumulationMethod::Sum,
        &ActiveQuarters::all(),
        1,
        MetricType::Integer,
        Frequency::Monthly,
    );
    let eights = targets.values().filter(|&&v| (v - 8.0).abs() < f64::EPSILON).count();
    let nines = targets.values().filter(|&&v| (v - 9.0).abs() < f64::EPSILON).count();
    assert_eq!((eights, nines), (8, 4));

    let total = accumulate(&checkins_from(&targets), AccumulationMethod::Sum, &full_year());
    assert!((total.value - 100.0).abs() < f64::EPSILON);
}

#[test]
fn semiannual_q2_is_active_through_june() {
    let m = Measurable {
        cycle: Cycle::Q2,
        frequency: Frequency::Semiannual,
        start_month: 1,
        active_quarters: ActiveQuarters::all(),
        ..Measurable::default()
    };
    assert!(has_active_months_in_cycle(&m, Cycle::Q2));
}

#[rstest]
#[case::empty(vec![])]
#[case::only_unmeasured(vec![WeightedScore::new(Score::Unmeasured, 5.0)])]
fn nothing_measured_is_unmeasured(#[case] children: Vec<WeightedScore>) {
    assert_eq!(weighted_score(children), Score::Unmeasured);
}

#[test]
fn heavy_unmeasured_child_does_not_dilute() {
    let children = [
        WeightedScore::new(Score::Measured(80.0), 1.0),
        WeightedScore::new(Score::Unmeasured, 99.0),
    ];
    assert_eq!(weighted_score(children), Score::Measured(80.0));
}

// ---------------------------------------------------------------------------
// Distribution round-trips
// ---------------------------------------------------------------------------

#[rstest]
#[case(Frequency::Monthly, 12)]
#[case(Frequency::Quarterly, 4)]
#[case(Frequency::Semiannual, 2)]
#[case(Frequency::Annual, 1)]
fn sum_distribution_follows_frequency(#[case] frequency: Frequency, #[case] months: usize) {
    let targets = distribute(
        1000.0,
        AccumulationMethod::Sum,
        &ActiveQuarters::all(),
        1,
        MetricType::Currency,
        frequency,
    );
    assert_eq!(targets.len(), months);
    let total = accumulate(&checkins_from(&targets), AccumulationMethod::Sum, &full_year());
    approx(total.value, 1000.0, 0.01);
}

#[test]
fn last_value_distribution_reconsolidates() {
    let m = Measurable {
        target: Some(42.5),
        accumulation_method: AccumulationMethod::LastValue,
        start_month: 4,
        ..Measurable::default()
    };
    let targets = distribute_for(&m);
    assert_eq!(targets.keys().copied().collect::<Vec<_>>(), (4..=12).collect::<Vec<_>>());
    let total = accumulate(&checkins_from(&targets), AccumulationMethod::LastValue, &full_year());
    approx(total.value, 42.5, 1e-9);
}

proptest! {
    #[test]
    fn number_sum_roundtrip(target in 0.0f64..1_000_000.0) {
        let targets = distribute(
            target,
            AccumulationMethod::Sum,
            &ActiveQuarters::all(),
            1,
            MetricType::Number,
            Frequency::Monthly,
        );
        let total = accumulate(&checkins_from(&targets), AccumulationMethod::Sum, &full_year());
        prop_assert!((total.value - target).abs() <= 0.01);
    }

    #[test]
    fn integer_sum_roundtrip(target in 0u32..100_000) {
        let target = f64::from(target);
        let targets = distribute(
            target,
            AccumulationMethod::Sum,
            &ActiveQuarters::all(),
            1,
            MetricType::Integer,
            Frequency::Monthly,
        );
        prop_assert!(targets.values().all(|v| v.fract() == 0.0));
        let total = accumulate(&checkins_from(&targets), AccumulationMethod::Sum, &full_year());
        prop_assert_eq!(total.value, target);
    }
}

// ---------------------------------------------------------------------------
// Evaluation into an aggregation tree
// ---------------------------------------------------------------------------

#[test]
fn distributed_targets_drive_pace_and_progress() {
    let mut revenue = Measurable {
        target: Some(1200.0),
        accumulation_method: AccumulationMethod::Sum,
        weight: 3.0,
        ..Measurable::default()
    };
    revenue.monthly_targets = distribute_for(&revenue);

    let checkins = [
        Measurement::new(1, YEAR, 100.0),
        Measurement::new(2, YEAR, 100.0),
        Measurement::new(3, YEAR, 100.0),
        Measurement::new(4, YEAR, 100.0),
        Measurement::new(5, YEAR, 100.0),
        Measurement::new(6, YEAR, 100.0),
    ];
    let evaluation = Evaluator::default().evaluate(&revenue, &checkins, AsOf::new(YEAR, 6));

    approx(evaluation.planned_to_date, 600.0, 1e-9);
    approx(evaluation.final_target, 1200.0, 1e-9);
    assert_eq!(evaluation.zone, Some(Zone::OnTarget));
    approx(evaluation.progress.value().unwrap_or_default(), 50.0, 1e-9);
}

#[test]
fn company_tree_skips_unmeasured_branches() {
    let evaluator = Evaluator::new(EngineSettings::default());
    let as_of = AsOf::new(YEAR, 3);

    let sales = Measurable {
        target: Some(100.0),
        weight: 1.0,
        ..Measurable::default()
    };
    let churn = Measurable {
        target: Some(5.0),
        is_inverse: true,
        weight: 1.0,
        ..Measurable::default()
    };
    let nps = Measurable {
        target: Some(70.0),
        weight: 10.0,
        ..Measurable::default()
    };

    let leaf = |label: &str, m: &Measurable, checkins: &[Measurement]| {
        evaluator.evaluate(m, checkins, as_of).into_leaf(label, m)
    };

    let company = AggregateNode::group(
        "acme",
        NodeKind::Company,
        1.0,
        vec![
            AggregateNode::group(
                "commercial",
                NodeKind::Sector,
                1.0,
                vec![
                    leaf("sales", &sales, &[Measurement::new(3, YEAR, 100.0)]),
                    leaf("churn", &churn, &[Measurement::new(2, YEAR, 4.0)]),
                ],
            ),
            AggregateNode::group(
                "support",
                NodeKind::Sector,
                5.0,
                vec![leaf("nps", &nps, &[])],
            ),
        ],
    );

    let card = company.evaluate();
    // sales is on target (100); churn 4 against 5 reaches the inverse best bound (120).
    approx(card.pace.value().unwrap_or_default(), 110.0, 1e-9);
    assert!(card.progress.is_measured());
}

#[test]
fn evaluate_many_reports_rejected_duplicates() {
    let settings = EngineSettings {
        duplicates: kpi_core::DuplicatePolicy::Reject,
        ..EngineSettings::default()
    };
    let evaluator = Evaluator::new(settings);
    let m = Measurable {
        target: Some(10.0),
        ..Measurable::default()
    };
    let items = vec![
        (m.clone(), vec![Measurement::new(1, YEAR, 10.0)]),
        (
            m,
            vec![Measurement::new(1, YEAR, 10.0), Measurement::new(1, YEAR, 11.0)],
        ),
    ];

    let results = evaluator.evaluate_many(&items, AsOf::new(YEAR, 1));
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(kpi_core::CoreError::DuplicateMeasurement { month: 1, year: YEAR })
    ));
}
