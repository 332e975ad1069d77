//! Testing utilities.
//!
//! These providers stand in for the network in tests of the store and the UI:
//! - `ScriptedProvider` returns queued responses in order
//! - `GatedProvider` holds every fetch open until the test answers it, so
//!   completions can be delivered out of order

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::{oneshot, Notify};

use crate::error::FactError;
use crate::provider::FactProvider;

type Response = Result<String, FactError>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A fact provider that returns scripted responses.
///
/// Once the script runs out every fetch fails.
#[derive(Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Response>>,
}

impl ScriptedProvider {
    pub fn new<S: Into<String>>(responses: Vec<Result<S, FactError>>) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|r| r.map(Into::into))
                    .collect(),
            ),
        }
    }

    /// Queue one more successful response.
    pub fn push_fact(&self, fact: impl Into<String>) {
        lock(&self.responses).push_back(Ok(fact.into()));
    }

    pub fn push_error(&self, error: FactError) {
        lock(&self.responses).push_back(Err(error));
    }

    pub fn remaining(&self) -> usize {
        lock(&self.responses).len()
    }
}

#[async_trait]
impl FactProvider for ScriptedProvider {
    async fn fetch_fact(&self) -> Result<String, FactError> {
        let next = lock(&self.responses).pop_front();
        next.unwrap_or_else(|| Err(FactError::fetch_failed("no scripted response left")))
    }
}

/// A fact provider whose fetches stay pending until answered by index.
///
/// Fetches are numbered in the order they reach the provider, starting at 0.
#[derive(Default)]
pub struct GatedProvider {
    pending: Mutex<Vec<Option<oneshot::Sender<Response>>>>,
    arrived: Notify,
}

impl GatedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fetches that have reached the provider so far.
    pub fn arrived(&self) -> usize {
        lock(&self.pending).len()
    }

    pub async fn wait_for_fetches(&self, count: usize) {
        loop {
            let notified = self.arrived.notified();
            if self.arrived() >= count {
                return;
            }
            notified.await;
        }
    }

    /// Answer fetch `index`. Returns false if it never arrived or was already answered.
    pub fn answer(&self, index: usize, response: Response) -> bool {
        let sender = lock(&self.pending).get_mut(index).and_then(Option::take);
        match sender {
            Some(sender) => sender.send(response).is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl FactProvider for GatedProvider {
    async fn fetch_fact(&self) -> Result<String, FactError> {
        let (tx, rx) = oneshot::channel();
        lock(&self.pending).push(Some(tx));
        self.arrived.notify_waiters();

        rx.await
            .unwrap_or_else(|_| Err(FactError::fetch_failed("gated fetch was dropped")))
    }
}
