//! Retry decorator for record stores.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use rand::Rng;

use crate::errors::{StoreError, StoreRetryClass};
use crate::settings::RetryPolicy;

use super::store_model::{Record, RowIndex, StoreResult};
use super::store_traits::RecordStoreTrait;

const MAX_BACKOFF_EXPONENT: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallKind {
    Read,
    Write,
}

/// Whether a failed call may be attempted again.
///
/// Reads retry on any transient failure. Writes retry only when the store
/// rejected the request outright; an outage mid-write may already have
/// applied the change and a blind retry could duplicate a row.
fn should_retry(kind: CallKind, err: &StoreError) -> bool {
    match kind {
        CallKind::Read => err.retry_class() == StoreRetryClass::Retryable,
        CallKind::Write => err.is_rejected_before_apply(),
    }
}

/// Exponential backoff with cap and up to 20% jitter.
pub fn backoff_with_jitter(policy: &RetryPolicy, attempt: u32) -> Duration {
    let exp = attempt.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);
    let backoff = policy
        .base_delay_ms
        .saturating_mul(1_u64 << exp)
        .min(policy.max_delay_ms);
    if backoff == 0 {
        return Duration::ZERO;
    }
    let jitter = rand::thread_rng().gen_range(0..=(backoff / 5).max(1));
    Duration::from_millis(backoff.saturating_add(jitter))
}

/// Wraps a store and retries transient failures according to a `RetryPolicy`.
#[derive(Clone)]
pub struct RetryingRecordStore {
    inner: Arc<dyn RecordStoreTrait>,
    policy: RetryPolicy,
}

impl RetryingRecordStore {
    pub fn new(inner: Arc<dyn RecordStoreTrait>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    async fn run<T, F, Fut>(&self, op: &'static str, kind: CallKind, mut call: F) -> StoreResult<T>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = StoreResult<T>> + Send,
        T: Send,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < max_attempts && should_retry(kind, &err) => {
                    let delay = backoff_with_jitter(&self.policy, attempt);
                    warn!(
                        "Store {} failed (attempt {}/{}): {}. Retrying in {:?}",
                        op, attempt, max_attempts, err, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    debug!("Store {} gave up after {} attempt(s): {}", op, attempt, err);
                    return Err(err);
                }
            }
        }
    }
}

#[async_trait]
impl RecordStoreTrait for RetryingRecordStore {
    async fn headers(&self, table: &str) -> StoreResult<Vec<String>> {
        self.run("headers", CallKind::Read, move || self.inner.headers(table))
            .await
    }

    async fn get_all_records(&self, table: &str) -> StoreResult<Vec<Record>> {
        self.run("get_all_records", CallKind::Read, move || {
            self.inner.get_all_records(table)
        })
        .await
    }

    async fn append_row(&self, table: &str, values: Vec<String>) -> StoreResult<()> {
        self.run("append_row", CallKind::Write, move || {
            self.inner.append_row(table, values.clone())
        })
        .await
    }

    async fn find_row(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> StoreResult<Option<RowIndex>> {
        self.run("find_row", CallKind::Read, move || {
            self.inner.find_row(table, column, value)
        })
        .await
    }

    async fn delete_row(&self, table: &str, index: RowIndex) -> StoreResult<()> {
        self.run("delete_row", CallKind::Write, move || {
            self.inner.delete_row(table, index)
        })
        .await
    }

    async fn update_cell(
        &self,
        table: &str,
        index: RowIndex,
        column: &str,
        value: &str,
    ) -> StoreResult<()> {
        self.run("update_cell", CallKind::Write, move || {
            self.inner.update_cell(table, index, column, value)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_is_exponential_and_capped() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay_ms: 100,
            max_delay_ms: 1_000,
        };
        let first = backoff_with_jitter(&policy, 1).as_millis();
        let second = backoff_with_jitter(&policy, 2).as_millis();
        let late = backoff_with_jitter(&policy, 12).as_millis();
        assert!((100..=120).contains(&first));
        assert!((200..=240).contains(&second));
        assert!((1_000..=1_200).contains(&late));
    }

    #[test]
    fn zero_base_delay_never_sleeps() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay_ms: 0,
            max_delay_ms: 0,
        };
        assert_eq!(backoff_with_jitter(&policy, 3), Duration::ZERO);
    }

    #[test]
    fn writes_only_retry_rejected_requests() {
        let outage = StoreError::unavailable("reset");
        let quota = StoreError::rate_limited("429");
        assert!(should_retry(CallKind::Read, &outage));
        assert!(!should_retry(CallKind::Write, &outage));
        assert!(should_retry(CallKind::Write, &quota));
        assert!(!should_retry(
            CallKind::Read,
            &StoreError::TableNotFound("Devices".to_string())
        ));
    }
}
