//! Serde roundtrip and JsonSchema validation tests for the record types.

use std::collections::BTreeMap;

use kpi_core::{
    AccumulationMethod, ActiveQuarters, Cycle, Frequency, Measurable, Measurement, MetricType,
};
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    measurable_full_roundtrip,
    Measurable,
    Measurable {
        target: Some(1200.0),
        threshold_min: Some(1000.0),
        threshold_max: Some(1500.0),
        is_inverse: false,
        weight: 25.0,
        accumulation_method: AccumulationMethod::Sum,
        metric_type: MetricType::Integer,
        monthly_targets: BTreeMap::from([(1, 100.0), (2, 100.0), (12, 150.0)]),
        active_quarters: ActiveQuarters {
            q1: true,
            q2: true,
            q3: false,
            q4: true,
        },
        start_month: 2,
        frequency: Frequency::Quarterly,
        cycle: Cycle::Q4,
        manual_value: None,
    }
);

roundtrip_and_validate!(
    measurable_inverse_manual_roundtrip,
    Measurable,
    Measurable {
        target: Some(5.0),
        is_inverse: true,
        accumulation_method: AccumulationMethod::Manual,
        metric_type: MetricType::Percentage,
        frequency: Frequency::Semiannual,
        manual_value: Some(4.2),
        ..Measurable::default()
    }
);

roundtrip_and_validate!(
    measurable_defaults_roundtrip,
    Measurable,
    Measurable::default()
);

roundtrip_and_validate!(
    measurement_roundtrip,
    Measurement,
    Measurement::new(6, 2025, 42.5)
);

roundtrip_and_validate!(
    measurement_without_value_roundtrip,
    Measurement,
    Measurement {
        month: 2,
        year: 2025,
        value: None,
    }
);

#[test]
fn measurable_serializes_wire_codes() {
    let m = Measurable {
        accumulation_method: AccumulationMethod::LastValue,
        frequency: Frequency::Monthly,
        cycle: Cycle::Annual,
        ..Measurable::default()
    };
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["accumulationMethod"], "last_value");
    assert_eq!(json["frequency"], "mensal");
    assert_eq!(json["cycle"], "anual");
    assert_eq!(json["metricType"], "number");
    assert_eq!(json["startMonth"], 1);
}

#[test]
fn empty_object_decodes_to_defaults() {
    let m: Measurable = serde_json::from_str("{}").unwrap();
    assert_eq!(m, Measurable::default());
}

#[test]
fn checkin_list_with_string_values_decodes() {
    let json = r#"[
        {"month": 1, "year": 2025, "value": "12.5"},
        {"month": 2, "year": 2025, "value": 7},
        {"month": 3, "year": 2025, "value": "pending"},
        {"month": 4, "year": 2025}
    ]"#;
    let checkins: Vec<Measurement> = serde_json::from_str(json).unwrap();
    assert_eq!(
        checkins,
        vec![
            Measurement::new(1, 2025, 12.5),
            Measurement::new(2, 2025, 7.0),
            Measurement {
                month: 3,
                year: 2025,
                value: None,
            },
            Measurement {
                month: 4,
                year: 2025,
                value: None,
            },
        ]
    );
    assert!(checkins[2].value_or_zero().abs() < f64::EPSILON);
}
