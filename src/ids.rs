//! Identifier generation for flags, recommendations and red flags.
//!
//! Engines never mint identifiers themselves; callers pass an [`IdSource`].
//! Identifiers only need to be unique within one planning run.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

pub trait IdSource {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs. Used by the pipeline and CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-1`, `prefix-2`, ... identifiers.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
