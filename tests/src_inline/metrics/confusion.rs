use super::*;

#[test]
fn test_record_counts_each_cell() {
    let mut c = Confusion::default();
    c.record(true, true, 1.0);
    c.record(true, false, 2.0);
    c.record(false, true, 0.5);
    c.record(false, false, 1.5);
    assert_eq!(c.true_pos, 1.0);
    assert_eq!(c.false_neg, 2.0);
    assert_eq!(c.false_pos, 0.5);
    assert_eq!(c.true_neg, 1.5);
    assert_eq!(c.rows, 4);
    assert_eq!(c.positives(), 3.0);
    assert_eq!(c.negatives(), 2.0);
    assert_eq!(c.total(), 5.0);
}

#[test]
fn test_rates_undefined_without_denominator() {
    let mut c = Confusion::default();
    c.record(false, true, 1.0);
    assert_eq!(c.true_positive_rate(), None);
    assert_eq!(c.false_positive_rate(), Some(1.0));
    assert_eq!(c.selection_rate(), Some(1.0));

    let zero_weight = Confusion {
        rows: 1,
        ..Confusion::default()
    };
    assert_eq!(zero_weight.selection_rate(), None);
}

#[test]
fn test_partition_is_sorted_by_group() {
    let y_true = [1, 0, 1, 0];
    let y_pred = [1, 1, 0, 0];
    let a = ["b", "a", "b", "a"];
    let groups = confusion_by_group(&y_true, &y_pred, &a, None).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, "a");
    assert_eq!(groups[1].0, "b");
    assert_eq!(groups[0].1.false_pos, 1.0);
    assert_eq!(groups[0].1.true_neg, 1.0);
    assert_eq!(groups[1].1.true_pos, 1.0);
    assert_eq!(groups[1].1.false_neg, 1.0);
}

#[test]
fn test_partition_applies_weights() {
    let y_true = [1, 1, 0];
    let y_pred = [1, 0, 0];
    let a = [0, 0, 1];
    let w = [2.0, 0.5, 3.0];
    let groups = confusion_by_group(&y_true, &y_pred, &a, Some(w.as_slice())).unwrap();
    assert_eq!(groups[0].1.true_pos, 2.0);
    assert_eq!(groups[0].1.false_neg, 0.5);
    assert_eq!(groups[1].1.true_neg, 3.0);
    assert_eq!(groups[0].1.rows, 2);
}

#[test]
fn test_length_mismatch_never_truncates() {
    let err = confusion_by_group(&[1, 0, 1], &[1, 0], &[0, 1, 1], None).unwrap_err();
    assert_eq!(
        err,
        FairnessError::LengthMismatch {
            y_true: 3,
            y_pred: 2,
            groups: 3
        }
    );
    let err = confusion_by_group(&[1, 0], &[1, 0], &[0, 1, 1], None).unwrap_err();
    assert!(matches!(err, FairnessError::LengthMismatch { groups: 3, .. }));
}

#[test]
fn test_empty_input_rejected() {
    let a: [u8; 0] = [];
    let err = confusion_by_group(&[], &[], &a, None).unwrap_err();
    assert_eq!(err, FairnessError::EmptyInput);
}

#[test]
fn test_non_binary_label_rejected() {
    let err = confusion_by_group(&[1, 2], &[1, 0], &[0, 1], None).unwrap_err();
    assert_eq!(
        err,
        FairnessError::NonBinaryLabel {
            array: "y_true",
            index: 1,
            value: 2
        }
    );
    let err = confusion_by_group(&[1, 0], &[7, 0], &[0, 1], None).unwrap_err();
    assert!(matches!(
        err,
        FairnessError::NonBinaryLabel { array: "y_pred", index: 0, .. }
    ));
}

#[test]
fn test_group_cardinality() {
    let err = confusion_by_group(&[1, 0, 1], &[1, 0, 1], &[0, 0, 0], None).unwrap_err();
    assert_eq!(err, FairnessError::GroupCardinality { found: 1 });
    let err = confusion_by_group(&[1, 0, 1], &[1, 0, 1], &[0, 1, 2], None).unwrap_err();
    assert_eq!(err, FairnessError::GroupCardinality { found: 3 });
}

#[test]
fn test_weight_validation() {
    let err = confusion_by_group(&[1, 0], &[1, 0], &[0, 1], Some(&[1.0][..])).unwrap_err();
    assert_eq!(
        err,
        FairnessError::WeightLengthMismatch {
            expected: 2,
            found: 1
        }
    );
    let err = confusion_by_group(&[1, 0], &[1, 0], &[0, 1], Some(&[1.0, -0.5][..])).unwrap_err();
    assert!(matches!(err, FairnessError::InvalidWeight { index: 1, .. }));
    let err =
        confusion_by_group(&[1, 0], &[1, 0], &[0, 1], Some(&[f64::NAN, 1.0][..])).unwrap_err();
    assert!(matches!(err, FairnessError::InvalidWeight { index: 0, .. }));
}

#[test]
fn test_group_weight_sum_must_stay_finite() {
    let weights = [f64::MAX, f64::MAX, 1.0, 1.0];
    let err = confusion_by_group(&[1, 0, 1, 0], &[1, 0, 1, 0], &[0, 0, 1, 1], Some(&weights[..]))
        .unwrap_err();
    assert_eq!(err, FairnessError::WeightOverflow);
    let ok = confusion_by_group(&[1, 0, 1, 0], &[1, 0, 1, 0], &[0, 1, 0, 1], Some(&weights[..]));
    assert!(ok.is_ok());
}
