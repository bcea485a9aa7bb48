//! Simulated backend latency for catalog queries.

use std::time::Duration;

use rand::Rng;

/// The catalog query being delayed. Listing-style queries are slower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogQuery {
    ListAll,
    GetById,
    ByCategory,
    Categories,
    Search,
    Featured,
}

impl CatalogQuery {
    /// Base delay used by [`Latency::Simulated`].
    #[must_use]
    pub const fn base_delay(self) -> Duration {
        match self {
            Self::ListAll | Self::Featured => Duration::from_millis(500),
            Self::GetById | Self::ByCategory | Self::Categories | Self::Search => {
                Duration::from_millis(300)
            }
        }
    }
}

/// How long each catalog call suspends before answering.
///
/// Delays are cosmetic; the answer never depends on them. Use
/// [`Latency::Instant`] for deterministic tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Latency {
    /// Answer immediately.
    #[default]
    Instant,
    /// The same delay for every query.
    Fixed(Duration),
    /// Per-query base delay plus a uniform random jitter in `[0, jitter]`.
    Simulated { jitter: Duration },
}

impl Latency {
    /// Pick the delay for one call of `query`.
    #[must_use]
    pub fn delay_for(self, query: CatalogQuery) -> Duration {
        match self {
            Self::Instant => Duration::ZERO,
            Self::Fixed(delay) => delay,
            Self::Simulated { jitter } => query.base_delay() + random_up_to(jitter),
        }
    }

    /// Suspend the caller for one call of `query`.
    pub async fn wait(self, query: CatalogQuery) {
        let delay = self.delay_for(query);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn random_up_to(max: Duration) -> Duration {
    if max.is_zero() {
        return Duration::ZERO;
    }
    let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(rand::rng().random_range(0..=max_ms))
}
