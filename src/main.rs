// Compares the naive and vectorized softmax loss on a random batch and
// gradient-checks the vectorized gradient.
//
//   softmax-loss [config.json]
//
// Without a config path the default development-sized batch is used.
// Set RUST_LOG=debug to see every sampled gradient entry.

use anyhow::Context;
use log::{info, warn};

use softmax_loss::gradcheck::{grad_check_sparse, max_relative_error, DEFAULT_STEP};
use softmax_loss::{compare_variants, softmax_loss_vectorized, CompareConfig, Matrix};

const AGREEMENT_TOLERANCE: f64 = 1e-7;
const GRAD_CHECK_TOLERANCE: f64 = 1e-4;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CompareConfig::load_json(&path)
            .with_context(|| format!("failed to load compare config from {path}"))?,
        None => {
            info!("No config path given, using defaults.");
            CompareConfig::default()
        }
    };
    config.validate().context("invalid compare config")?;
    info!("Config: {:?}", config);

    let mut rng = config.rng();
    let batch = config.generate(&mut rng);

    let comparison = compare_variants(&batch.w, &batch.x, &batch.y, config.reg)
        .context("loss comparison failed")?;
    if comparison.agrees(AGREEMENT_TOLERANCE) {
        info!("Naive and vectorized results agree within {:e}.", AGREEMENT_TOLERANCE);
    } else {
        warn!("Naive and vectorized results differ by more than {:e}.", AGREEMENT_TOLERANCE);
    }
    if comparison.vectorized_elapsed_us > 0 {
        info!(
            "Vectorized speedup: {:.1}x",
            comparison.naive_elapsed_us as f64 / comparison.vectorized_elapsed_us as f64
        );
    }

    let objective = |w: &Matrix| {
        softmax_loss_vectorized(w, &batch.x, &batch.y, config.reg).map(|(loss, _)| loss)
    };
    let checks = grad_check_sparse(
        &objective,
        &batch.w,
        &comparison.vectorized_grad,
        config.grad_checks,
        DEFAULT_STEP,
        &mut rng,
    )
    .context("gradient check failed")?;

    let worst = max_relative_error(&checks);
    if worst <= GRAD_CHECK_TOLERANCE {
        info!("Gradient check passed: max relative error {:.3e} over {} entries.", worst, checks.len());
    } else {
        warn!("Gradient check: max relative error {:.3e} exceeds {:e}.", worst, GRAD_CHECK_TOLERANCE);
    }

    println!("{}", serde_json::to_string_pretty(&comparison)?);

    Ok(())
}
