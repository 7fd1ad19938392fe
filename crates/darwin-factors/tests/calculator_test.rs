//! Integration tests for the per-security calculator against synthetic price paths.

use approx::assert_relative_eq;
use darwin_data::{Endpoint, MemorySource};
use darwin_factors::volatility::{sample_std, simple_returns};
use darwin_factors::{FactorCalculator, FailureKind};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

const CODE: &str = "000001.SZ";
const TOTAL_MV: f64 = 2_150_000.0;

fn random_walk(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = 12.0;
    (0..n)
        .map(|_| {
            price *= 1.0 + rng.gen_range(-0.03..0.03);
            price
        })
        .collect()
}

/// Daily frame with dates deliberately shuffled in reverse, as the provider returns them.
fn daily_frame(closes: &[f64]) -> DataFrame {
    let dates: Vec<String> = (0..closes.len())
        .rev()
        .map(|i| format!("{}", 20_000_000 + i))
        .collect();
    let values: Vec<f64> = closes.iter().rev().copied().collect();
    df!("trade_date" => dates, "close" => values).unwrap()
}

fn basic_frame() -> DataFrame {
    df!(
        "trade_date" => ["20240105"],
        "ts_code" => [CODE],
        "total_mv" => [TOTAL_MV],
        "pe" => [6.1],
        "pe_ttm" => [6.3],
        "pb" => [0.7],
        "turnover_rate" => [0.42],
    )
    .unwrap()
}

fn source_with_closes(closes: &[f64]) -> MemorySource {
    MemorySource::new()
        .with_frame(CODE, Endpoint::Basic, basic_frame())
        .with_frame(CODE, Endpoint::Daily, daily_frame(closes))
}

#[tokio::test]
async fn test_momentum_closed_form() {
    let closes = random_walk(300, 7);
    let calculator = FactorCalculator::new(source_with_closes(&closes));
    let record = calculator.compute(CODE).await.unwrap();

    let n = closes.len();
    let (now, p12, p1) = (closes[n - 1], closes[n - 252], closes[n - 21]);
    let expected = (now / p12 - 1.0) - (now / p1 - 1.0);
    assert_relative_eq!(record.momentum_12m_ex1m.unwrap(), expected, epsilon = 1e-12);
}

#[tokio::test]
async fn test_volatility_matches_annualized_std() {
    let closes = random_walk(120, 11);
    let calculator = FactorCalculator::new(source_with_closes(&closes));
    let record = calculator.compute(CODE).await.unwrap();

    let returns: Vec<f64> = closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let std = (returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();

    assert_relative_eq!(
        record.volatility.unwrap(),
        std * 252.0_f64.sqrt(),
        epsilon = 1e-12
    );
    assert_relative_eq!(
        sample_std(&simple_returns(&closes)).unwrap(),
        std,
        epsilon = 1e-12
    );
}

#[tokio::test]
async fn test_amihud_uses_scaled_market_value() {
    let closes = random_walk(60, 3);
    let calculator = FactorCalculator::new(source_with_closes(&closes));
    let record = calculator.compute(CODE).await.unwrap();

    let returns = simple_returns(&closes);
    let expected = returns.iter().map(|r| r.abs()).sum::<f64>()
        / returns.len() as f64
        / (TOTAL_MV * 1e6);
    assert_relative_eq!(record.amihud.unwrap(), expected, max_relative = 1e-12);
    assert_relative_eq!(
        record.ln_mv.unwrap(),
        (TOTAL_MV * 1e6).ln(),
        epsilon = 1e-12
    );
}

#[rstest]
#[case(0, false, false)]
#[case(1, false, false)]
#[case(2, false, false)]
#[case(3, false, true)]
#[case(251, false, true)]
#[case(252, true, true)]
#[tokio::test]
async fn test_history_length_thresholds(
    #[case] observations: usize,
    #[case] has_momentum: bool,
    #[case] has_volatility: bool,
) {
    let closes = random_walk(observations, 42);
    let calculator = FactorCalculator::new(source_with_closes(&closes));
    let record = calculator.compute(CODE).await.unwrap();

    assert_eq!(record.momentum_12m_ex1m.is_some(), has_momentum);
    assert_eq!(record.volatility.is_some(), has_volatility);
    assert_eq!(record.amihud.is_some(), observations >= 2);
}

#[tokio::test]
async fn test_complete_record() {
    let closes = random_walk(300, 5);
    let quality = df!(
        "ts_code" => [CODE, CODE],
        "roe" => [11.2, 10.4],
        "profit_gr" => [3.0, 2.0],
        "op_of_gr" => [1.0, 1.1],
        "grossprofit_margin" => [28.5, 27.0],
    )
    .unwrap();
    let growth = df!(
        "ts_code" => [CODE],
        "or_yoy" => [7.5],
        "np_yoy" => [-3.25],
    )
    .unwrap();
    let source = source_with_closes(&closes)
        .with_frame(CODE, Endpoint::Quality, quality)
        .with_frame(CODE, Endpoint::Growth, growth);

    let record = FactorCalculator::new(source).compute(CODE).await.unwrap();
    assert!(record.is_complete());
    assert_eq!(record.roe, Some(11.2));
    assert_eq!(record.grossprofit_margin, Some(28.5));
    assert_eq!(record.revenue_growth, Some(7.5));
    assert_eq!(record.profit_growth, Some(-3.25));
}

#[tokio::test]
async fn test_failures_by_endpoint() {
    for endpoint in [
        Endpoint::Basic,
        Endpoint::Quality,
        Endpoint::Growth,
        Endpoint::Daily,
        Endpoint::MoneyFlow,
    ] {
        let source =
            source_with_closes(&random_walk(30, 1)).with_failure(CODE, endpoint, "boom");
        let failure = FactorCalculator::new(source).compute(CODE).await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::Data, "{}", endpoint);
    }
}

#[tokio::test]
async fn test_zero_close_leaves_return_factors_missing() {
    let mut closes = random_walk(40, 9);
    closes[20] = 0.0;
    let record = FactorCalculator::new(source_with_closes(&closes))
        .compute(CODE)
        .await
        .unwrap();

    assert_eq!(record.volatility, None);
    assert_eq!(record.amihud, None);
    assert!(record.ln_mv.is_some());
}

#[tokio::test]
async fn test_null_close_is_forward_filled() {
    let dates: Vec<String> = (0..4).map(|i| format!("2024010{}", i + 1)).collect();
    let daily = df!(
        "trade_date" => dates,
        "close" => [Some(10.0), None, Some(11.0), Some(12.1)],
    )
    .unwrap();
    let source = MemorySource::new()
        .with_frame(CODE, Endpoint::Basic, basic_frame())
        .with_frame(CODE, Endpoint::Daily, daily);
    let record = FactorCalculator::new(source).compute(CODE).await.unwrap();

    let expected = sample_std(&[0.0, 0.1, 0.1]).unwrap() * 252.0_f64.sqrt();
    assert_relative_eq!(record.volatility.unwrap(), expected, epsilon = 1e-12);
    assert!(record.amihud.is_some());
}
