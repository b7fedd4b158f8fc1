//! Cooperative yielding during long traversals.
//!
//! Building a graph for a large lockfile can visit thousands of packages
//! without an `.await`. On a single-threaded runtime that starves every other
//! task, so the traversal consults a [`YieldHook`] at each queue iteration
//! and hands control back to the scheduler when the hook asks for it.
//!
//! Yielding only pauses the traversal. Visit order and the resulting graph
//! are the same whatever hook is used.

use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Decides when the traversal should yield, and performs the yield.
#[async_trait]
pub trait YieldHook: Send {
    /// Called before each queue iteration. Returning `true` triggers
    /// [`yield_now`](Self::yield_now).
    fn should_yield(&mut self) -> bool;

    /// Hand control back to the scheduler.
    async fn yield_now(&mut self);
}

/// A hook that never yields.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverYield;

#[async_trait]
impl YieldHook for NeverYield {
    fn should_yield(&mut self) -> bool {
        false
    }

    async fn yield_now(&mut self) {}
}

/// Yields to the tokio scheduler once a time budget has been used up.
#[derive(Debug, Clone)]
pub struct IntervalYield {
    budget: Duration,
    last_yield: Instant,
    yields: u64,
}

impl IntervalYield {
    /// Yield whenever `budget` has elapsed since the last yield.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            last_yield: Instant::now(),
            yields: 0,
        }
    }

    /// Number of times this hook has yielded.
    #[must_use]
    pub fn yields(&self) -> u64 {
        self.yields
    }
}

#[async_trait]
impl YieldHook for IntervalYield {
    fn should_yield(&mut self) -> bool {
        self.last_yield.elapsed() >= self.budget
    }

    async fn yield_now(&mut self) {
        tokio::task::yield_now().await;
        self.yields += 1;
        self.last_yield = Instant::now();
        tracing::trace!(yields = self.yields, "Yielded to scheduler");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_yield_never_asks() {
        let mut hook = NeverYield;
        assert!(!hook.should_yield());
    }

    #[tokio::test]
    async fn zero_budget_yields_every_time() {
        let mut hook = IntervalYield::new(Duration::ZERO);
        assert!(hook.should_yield());

        hook.yield_now().await;
        hook.yield_now().await;
        assert_eq!(hook.yields(), 2);
    }

    #[test]
    fn long_budget_does_not_ask_immediately() {
        let mut hook = IntervalYield::new(Duration::from_secs(3600));
        assert!(!hook.should_yield());
    }
}
