//! Retry policy for listing requests.

use std::time::Duration;

/// How [`ArticClient`](crate::ArticClient) retries one page fetch.
///
/// Rate limiting (429), server errors (5xx), network errors and timeouts are
/// retried up to `max_retries` times. Waits start at `initial_delay` and
/// double up to `max_delay`. A `Retry-After` header replaces the computed
/// wait, but one longer than `max_delay` ends the fetch with
/// [`Error::RateLimit`](crate::error::Error::RateLimit) rather than keeping
/// the page loading for that long.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use artgrid_lib::RetryConfig;
///
/// let patient = RetryConfig::default()
///     .max_retries(5)
///     .max_delay(Duration::from_secs(10));
/// assert_eq!(patient.max_retries, 5);
///
/// assert_eq!(RetryConfig::no_retry().max_retries, 0);
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    /// Upper bound for any single wait, including `Retry-After`.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Fails on the first transient error.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Starts tracking the retries of one fetch.
    pub(crate) fn backoff(&self) -> Backoff<'_> {
        Backoff {
            config: self,
            attempts: 0,
            delay: self.initial_delay.min(self.max_delay),
        }
    }
}

/// Retry bookkeeping for a single fetch.
pub(crate) struct Backoff<'a> {
    config: &'a RetryConfig,
    attempts: u32,
    delay: Duration,
}

impl Backoff<'_> {
    /// Returns how long to wait before retrying a server or network error,
    /// or `None` once the retries are spent.
    pub(crate) fn next_wait(&mut self) -> Option<Duration> {
        if self.attempts >= self.config.max_retries {
            return None;
        }
        self.attempts += 1;
        let wait = self.delay;
        self.delay = (self.delay * 2).min(self.config.max_delay);
        Some(wait)
    }

    /// Returns how long to wait before retrying a 429.
    ///
    /// `None` when the retries are spent or the server asks for longer than
    /// `max_delay`. The exponential delay does not advance.
    pub(crate) fn rate_limit_wait(&mut self, retry_after: Option<Duration>) -> Option<Duration> {
        if self.attempts >= self.config.max_retries {
            return None;
        }
        let wait = retry_after.unwrap_or(self.delay);
        if wait > self.config.max_delay {
            return None;
        }
        self.attempts += 1;
        Some(wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_up_to_cap() {
        let config = RetryConfig::default().max_delay(Duration::from_secs(3));
        let mut backoff = config.backoff();

        assert_eq!(backoff.next_wait(), Some(Duration::from_secs(1)));
        assert_eq!(backoff.next_wait(), Some(Duration::from_secs(2)));
        assert_eq!(backoff.next_wait(), Some(Duration::from_secs(3)));
        assert_eq!(backoff.next_wait(), None);
    }

    #[test]
    fn test_no_retry_gives_up_immediately() {
        let config = RetryConfig::no_retry();
        let mut backoff = config.backoff();
        assert_eq!(backoff.next_wait(), None);
        assert_eq!(backoff.rate_limit_wait(Some(Duration::ZERO)), None);
    }

    #[test]
    fn test_retry_after_within_cap_is_honoured() {
        let config = RetryConfig::default();
        let mut backoff = config.backoff();
        assert_eq!(
            backoff.rate_limit_wait(Some(Duration::from_secs(5))),
            Some(Duration::from_secs(5))
        );
        // without a header the current backoff delay is used
        assert_eq!(backoff.rate_limit_wait(None), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_retry_after_over_cap_gives_up() {
        let config = RetryConfig::default().max_delay(Duration::from_secs(30));
        let mut backoff = config.backoff();
        assert_eq!(backoff.rate_limit_wait(Some(Duration::from_secs(86_400))), None);
        // the refused wait did not use up an attempt
        assert_eq!(backoff.next_wait(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_rate_limits_share_the_retry_budget() {
        let config = RetryConfig::default().max_retries(2);
        let mut backoff = config.backoff();
        assert!(backoff.rate_limit_wait(None).is_some());
        assert!(backoff.next_wait().is_some());
        assert_eq!(backoff.rate_limit_wait(None), None);
    }
}
