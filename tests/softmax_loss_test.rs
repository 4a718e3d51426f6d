use approx::{assert_abs_diff_eq, assert_relative_eq};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use softmax_loss::gradcheck::{grad_check_full, grad_check_sparse, max_relative_error, DEFAULT_STEP};
use softmax_loss::loss::{accuracy, predict, softmax_pass};
use softmax_loss::{
    softmax_loss, softmax_loss_naive, softmax_loss_vectorized, LossConfig, LossVariant, Matrix,
    SoftmaxError,
};

fn random_problem(seed: u64, n: usize, d: usize, c: usize, scale: f64) -> (Matrix, Matrix, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let w = Matrix::random(d, c, scale, &mut rng);
    let x = Matrix::random(n, d, 1.0, &mut rng);
    let y = (0..n).map(|i| (i * 7 + seed as usize) % c).collect();
    (w, x, y)
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn zero_weights_two_classes() {
    let w = Matrix::zeros(3, 2);
    let x = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    let y = [0, 1];

    for variant in LossVariant::ALL {
        let (loss, dw) = softmax_loss(variant, &w, &x, &y, 0.0).unwrap();
        assert_abs_diff_eq!(loss, 2.0_f64.ln(), epsilon = 1e-12);
        assert_eq!(dw.shape(), (3, 2));
        for row in &dw.data {
            assert_abs_diff_eq!(row[0], 0.75, epsilon = 1e-12);
            assert_abs_diff_eq!(row[1], -0.75, epsilon = 1e-12);
        }
    }
}

#[test]
fn zero_data_keeps_log_c_plus_penalty() {
    let w = Matrix::from_rows(vec![
        vec![0.5, -1.0, 2.0, 0.0],
        vec![1.5, 0.25, -0.75, 3.0],
    ]).unwrap();
    let x = Matrix::zeros(5, 2);
    let y = [0, 1, 2, 3, 0];
    let reg = 0.1;

    let penalty = 0.5 * reg * w.sum_squares();
    for variant in LossVariant::ALL {
        let (loss, dw) = softmax_loss(variant, &w, &x, &y, reg).unwrap();
        assert_abs_diff_eq!(loss, 4.0_f64.ln() + penalty, epsilon = 1e-12);
        assert_abs_diff_eq!(dw.max_abs_diff(&w.scale(reg)).unwrap(), 0.0, epsilon = 1e-15);
    }
}

#[test]
fn separable_scores_drive_loss_to_zero() {
    // Each example's own feature points hard at its label.
    let w = Matrix::from_rows(vec![
        vec![500.0, 0.0, 0.0],
        vec![0.0, 500.0, 0.0],
        vec![0.0, 0.0, 500.0],
    ]).unwrap();
    let x = Matrix::from_rows(vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![0.0, 1.0, 0.0],
    ]).unwrap();
    let y = [0, 1, 2, 1];

    for variant in LossVariant::ALL {
        let (loss, dw) = softmax_loss(variant, &w, &x, &y, 0.0).unwrap();
        assert!(loss >= 0.0);
        assert!(loss < 1e-12, "{variant:?}: {loss}");
        assert!(dw.data.iter().flatten().all(|v| v.abs() < 1e-12));
    }
    assert_eq!(predict(&w, &x).unwrap(), y.to_vec());
    assert_abs_diff_eq!(accuracy(&w, &x, &y).unwrap(), 1.0);
}

#[test]
fn huge_scores_stay_finite_and_agree() {
    let (w, x, y) = random_problem(5, 12, 6, 4, 1e3);
    let (naive_loss, naive_grad) = softmax_loss_naive(&w, &x, &y, 0.0).unwrap();
    let (vec_loss, vec_grad) = softmax_loss_vectorized(&w, &x, &y, 0.0).unwrap();

    assert!(naive_loss.is_finite() && vec_loss.is_finite());
    assert!(naive_grad.data.iter().flatten().all(|v| v.is_finite()));
    assert_relative_eq!(naive_loss, vec_loss, max_relative = 1e-9);
    assert!(naive_grad.max_abs_diff(&vec_grad).unwrap() < 1e-7);
}

#[test]
fn non_finite_inputs_propagate_instead_of_erroring() {
    let mut w = Matrix::zeros(2, 2);
    w.data[0][0] = f64::NAN;
    let x = Matrix::from_rows(vec![vec![1.0, 1.0]]).unwrap();

    for variant in LossVariant::ALL {
        let (loss, _) = softmax_loss(variant, &w, &x, &[1], 0.0).unwrap();
        assert!(loss.is_nan());
    }

    let w = Matrix::from_rows(vec![vec![0.5, -0.5], vec![1.0, 2.0]]).unwrap();
    let x = Matrix::from_rows(vec![vec![f64::INFINITY, 1.0], vec![1.0, 1.0]]).unwrap();
    for variant in LossVariant::ALL {
        let (loss, dw) = softmax_loss(variant, &w, &x, &[0, 1], 0.0).unwrap();
        assert!(loss.is_nan());
        assert!(dw.data.iter().flatten().any(|v| v.is_nan()));
    }
}

#[test]
fn inputs_are_left_untouched() {
    let (w, x, y) = random_problem(9, 8, 5, 3, 0.5);
    let (w0, x0, y0) = (w.clone(), x.clone(), y.clone());

    let _ = softmax_loss_naive(&w, &x, &y, 0.2).unwrap();
    let pass = softmax_pass(&w, &x, &y, 0.2).unwrap();

    assert_eq!((w, x, y), (w0, x0, y0));
    // The returned probabilities are a clean softmax, not the shifted dscores.
    for row in &pass.probs.data {
        assert_abs_diff_eq!(row.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }
}

// =============================================================================
// Error paths
// =============================================================================

#[test]
fn every_variant_rejects_bad_input() {
    let w = Matrix::zeros(3, 2);
    let x = Matrix::zeros(2, 3);

    for variant in LossVariant::ALL {
        assert!(matches!(
            softmax_loss(variant, &w, &Matrix::zeros(2, 4), &[0, 1], 0.0),
            Err(SoftmaxError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            softmax_loss(variant, &w, &x, &[0], 0.0),
            Err(SoftmaxError::ShapeMismatch { .. })
        ));
        assert_eq!(
            softmax_loss(variant, &w, &x, &[0, 2], 0.0).unwrap_err(),
            SoftmaxError::LabelOutOfRange { index: 1, label: 2, classes: 2 }
        );
        assert_eq!(
            softmax_loss(variant, &w, &Matrix::zeros(0, 3), &[], 0.0).unwrap_err(),
            SoftmaxError::EmptyBatch
        );
        assert_eq!(
            softmax_loss(variant, &Matrix::zeros(3, 0), &x, &[0, 0], 0.0).unwrap_err(),
            SoftmaxError::NoClasses
        );
        assert_eq!(
            softmax_loss(variant, &w, &x, &[0, 1], -1.0).unwrap_err(),
            SoftmaxError::InvalidRegularization(-1.0)
        );
    }
}

#[test]
fn config_drives_the_selected_variant() {
    let (w, x, y) = random_problem(21, 10, 4, 3, 0.1);
    let naive = LossConfig::new(0.3, LossVariant::Naive).evaluate(&w, &x, &y).unwrap();
    let vectorized = LossConfig::new(0.3, LossVariant::Vectorized).evaluate(&w, &x, &y).unwrap();
    assert_abs_diff_eq!(naive.0, vectorized.0, epsilon = 1e-10);
}

// =============================================================================
// Gradient checks
// =============================================================================

#[test]
fn analytic_gradient_matches_central_difference() {
    let (w, x, y) = random_problem(2, 15, 6, 4, 0.5);
    let reg = 0.05;

    for variant in LossVariant::ALL {
        let (_, grad) = softmax_loss(variant, &w, &x, &y, reg).unwrap();
        let f = |w: &Matrix| softmax_loss(variant, w, &x, &y, reg).map(|(loss, _)| loss);

        let checks = grad_check_full(&f, &w, &grad, DEFAULT_STEP).unwrap();
        assert_eq!(checks.len(), 24);
        assert!(max_relative_error(&checks) < 1e-4, "{variant:?}: {checks:?}");
    }
}

#[test_log::test]
fn sparse_gradient_check_on_development_sized_batch() {
    let (w, x, y) = random_problem(4, 50, 30, 10, 1e-2);
    let (_, grad) = softmax_loss_vectorized(&w, &x, &y, 5e-3).unwrap();
    let f = |w: &Matrix| softmax_loss_vectorized(w, &x, &y, 5e-3).map(|(loss, _)| loss);

    let mut rng = StdRng::seed_from_u64(99);
    let checks = grad_check_sparse(&f, &w, &grad, 20, DEFAULT_STEP, &mut rng).unwrap();
    assert_eq!(checks.len(), 20);
    assert!(max_relative_error(&checks) < 1e-4);
}

// =============================================================================
// Property tests
// =============================================================================

fn problem_strategy() -> impl Strategy<Value = (Matrix, Matrix, Vec<usize>, f64)> {
    (1usize..12, 1usize..8, 1usize..6).prop_flat_map(|(n, d, c)| {
        (
            prop::collection::vec(prop::collection::vec(-5.0f64..5.0, c), d),
            prop::collection::vec(prop::collection::vec(-3.0f64..3.0, d), n),
            prop::collection::vec(0..c, n),
            0.0f64..2.0,
        )
            .prop_map(move |(w, x, y, reg)| {
                let w = Matrix { rows: d, cols: c, data: w };
                let x = Matrix { rows: n, cols: d, data: x };
                (w, x, y, reg)
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_variants_agree((w, x, y, reg) in problem_strategy()) {
        let (naive_loss, naive_grad) = softmax_loss_naive(&w, &x, &y, reg).unwrap();
        let (vec_loss, vec_grad) = softmax_loss_vectorized(&w, &x, &y, reg).unwrap();

        prop_assert!((naive_loss - vec_loss).abs() <= 1e-7);
        prop_assert_eq!(naive_grad.shape(), w.shape());
        prop_assert!(naive_grad.max_abs_diff(&vec_grad).unwrap() <= 1e-7);
    }

    #[test]
    fn prop_loss_is_non_negative((w, x, y, reg) in problem_strategy()) {
        let (loss, _) = softmax_loss_vectorized(&w, &x, &y, reg).unwrap();
        prop_assert!(loss >= 0.0);
        prop_assert!(loss.is_finite());
    }

    #[test]
    fn prop_out_of_range_label_rejected(
        (w, x, mut y, reg) in problem_strategy(),
        offset in 0usize..4,
    ) {
        let bad = w.cols + offset;
        let last = y.len() - 1;
        y[last] = bad;
        prop_assert_eq!(
            softmax_loss_naive(&w, &x, &y, reg).unwrap_err(),
            SoftmaxError::LabelOutOfRange { index: last, label: bad, classes: w.cols }
        );
        prop_assert!(softmax_loss_vectorized(&w, &x, &y, reg).is_err());
    }
}
