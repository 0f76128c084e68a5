//! Per-client rate limiting.
//!
//! Requests are keyed by peer IP and metered by a token bucket that refills
//! `rps` tokens per second and holds at most `burst`. The router must be
//! served with `into_make_service_with_connect_info::<SocketAddr>()` so the
//! peer address is available.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;

use further_core::{AppError, LimiterConfig};

/// Upper bound on `period * burst`, in nanoseconds.
///
/// The limiter keeps time as u64 nanoseconds since it was built and adds the
/// full bucket span to it; half the range leaves ~290 years of uptime.
const MAX_BUCKET_SPAN_NANOS: u128 = (u64::MAX / 2) as u128;

/// Time to refill one token at `rps` tokens per second.
///
/// Returns `None` when the period, or the span of a full bucket of `burst`
/// tokens, is too long for the limiter's clock.
pub fn replenish_period(rps: f64, burst: u32) -> Option<Duration> {
    let period = Duration::try_from_secs_f64(1.0 / rps)
        .ok()?
        .max(Duration::from_nanos(1));
    let span = period.as_nanos().checked_mul(u128::from(burst.max(1)))?;
    (span <= MAX_BUCKET_SPAN_NANOS).then_some(period)
}

/// Check that the limiter settings can be built, without building them.
///
/// A disabled limiter always passes.
pub fn validate(limiter: &LimiterConfig) -> Result<(), AppError> {
    period_for(limiter).map(|_| ())
}

fn period_for(limiter: &LimiterConfig) -> Result<Duration, AppError> {
    if !limiter.enabled {
        return Ok(Duration::ZERO);
    }
    if limiter.burst == 0 {
        return Err(invalid_settings(limiter));
    }
    replenish_period(limiter.rps, limiter.burst).ok_or_else(|| invalid_settings(limiter))
}

fn invalid_settings(limiter: &LimiterConfig) -> AppError {
    AppError::ServingLoopFailure(format!(
        "invalid rate limiter settings: rps={} burst={}",
        limiter.rps, limiter.burst
    ))
}

/// Wrap `router` with the limiter if it is enabled.
pub fn apply(router: Router, limiter: &LimiterConfig) -> Result<Router, AppError> {
    if !limiter.enabled {
        return Ok(router);
    }

    let period = period_for(limiter)?;
    let config = GovernorConfigBuilder::default()
        .period(period)
        .burst_size(limiter.burst)
        .finish()
        .ok_or_else(|| invalid_settings(limiter))?;

    Ok(router.layer(GovernorLayer::new(Arc::new(config))))
}
