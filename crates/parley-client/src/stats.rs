//! Call outcome counters per application and provider

use dashmap::DashMap;

/// Successful and failed calls to one provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallStats {
    /// Calls that produced an answer
    pub success: u64,
    /// Calls that errored or produced no answer
    pub failure: u64,
}

impl CallStats {
    /// Total number of recorded calls
    pub const fn total(&self) -> u64 {
        self.success + self.failure
    }
}

/// Concurrent counter table keyed by `(application, provider)`
///
/// Calls made without an application are kept under `None`.
#[derive(Debug, Default)]
pub(crate) struct StatsTable {
    entries: DashMap<(Option<String>, String), CallStats>,
}

impl StatsTable {
    pub(crate) fn record(&self, app: Option<&str>, provider: &str, success: bool) {
        let key = (app.map(ToOwned::to_owned), provider.to_owned());
        let mut entry = self.entries.entry(key).or_default();
        if success {
            entry.success += 1;
        } else {
            entry.failure += 1;
        }
    }

    /// Counters for one provider as called by one application
    pub(crate) fn get(&self, app: Option<&str>, provider: &str) -> CallStats {
        let key = (app.map(ToOwned::to_owned), provider.to_owned());
        self.entries.get(&key).map(|entry| *entry).unwrap_or_default()
    }

    /// Counters for one provider summed over every caller
    pub(crate) fn provider_total(&self, provider: &str) -> CallStats {
        self.entries
            .iter()
            .filter(|entry| entry.key().1 == provider)
            .fold(CallStats::default(), |acc, entry| CallStats {
                success: acc.success + entry.success,
                failure: acc.failure + entry.failure,
            })
    }
}
