//! Integration tests for the login/logout flow.
//!
//! These drive `AuthenticationService` through its public API only, with
//! in-memory stores (sometimes wrapped to inject outages) standing in for
//! a real session backend and a shared cache.
//!
//! Naming: `test_{function}_{scenario}_{expected}`.

mod common;

use std::time::Duration;

use authgate_directory::MemoryUserDirectory;
use authgate_record::UserId;
use authgate_session::{AuthConfig, AuthError, AuthenticationService, LoginOutcome};
use authgate_store::{CacheStore, MemoryCacheStore, MemorySessionStore, SessionStore};
use common::{FlakyCache, FlakySession, UnreachableDirectory, fast_hasher, seeded_directory};

const DAY: Duration = Duration::from_secs(86_400);

async fn service_with<S, C>(
    session: S,
    cache: C,
) -> AuthenticationService<MemoryUserDirectory, S, C>
where
    S: SessionStore,
    C: CacheStore,
{
    let hasher = fast_hasher();
    let directory = seeded_directory(&hasher).await;
    AuthenticationService::new(directory, session, cache, hasher, AuthConfig::default())
        .expect("default config is valid")
}

// =========================================================================
// The basic round trip
// =========================================================================

#[tokio::test]
async fn test_login_then_logout_alice_round_trip() {
    let session = MemorySessionStore::fresh();
    let cache = MemoryCacheStore::new();
    let service = service_with(session.clone(), cache.clone()).await;

    let outcome = service.login("alice", "correct").await.unwrap();
    assert!(outcome.is_authenticated());
    assert!(service.is_logged_in().await.unwrap());
    assert!(cache.get("user_session_42").await.unwrap().is_some());

    assert!(service.logout().await.unwrap());
    assert!(!service.is_logged_in().await.unwrap());
    assert!(cache.get("user_session_42").await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_rejections_leave_both_stores_untouched() {
    let session = MemorySessionStore::fresh();
    let cache = MemoryCacheStore::new();
    let service = service_with(session.clone(), cache.clone()).await;

    for (username, password) in [
        ("mallory", "correct"),
        ("", ""),
        ("alice", "Correct"),
        ("alice", ""),
        ("bob", "correct"),
    ] {
        let outcome = service.login(username, password).await.unwrap();
        assert!(
            matches!(outcome, LoginOutcome::Rejected),
            "{username}/{password} should be rejected"
        );
    }

    assert_eq!(session.snapshot().await, serde_json::json!({}));
    assert!(cache.is_empty().await);
    assert!(!service.is_logged_in().await.unwrap());
}

#[tokio::test]
async fn test_logout_when_anonymous_returns_true_without_cache_calls() {
    let cache = FlakyCache::new();
    let service = service_with(MemorySessionStore::fresh(), cache.clone()).await;

    assert!(service.logout().await.unwrap());
    assert!(service.logout().await.unwrap());

    // Nobody was logged in, so there was no key to remove.
    assert_eq!(cache.calls(), 0);
}

// =========================================================================
// TTL
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_login_cache_entry_expires_after_ttl() {
    let cache = MemoryCacheStore::new();
    let service = service_with(MemorySessionStore::fresh(), cache.clone()).await;

    let _ = service.login("alice", "correct").await.unwrap();
    assert_eq!(cache.ttl("user_session_42").await.unwrap(), Some(DAY));

    tokio::time::advance(DAY - Duration::from_secs(1)).await;
    assert!(cache.get("user_session_42").await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(cache.get("user_session_42").await.unwrap().is_none());

    // The session is authoritative; an expired mirror doesn't log anyone out.
    assert!(service.is_logged_in().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_login_again_refreshes_ttl() {
    let cache = MemoryCacheStore::new();
    let service = service_with(MemorySessionStore::fresh(), cache.clone()).await;
    let _ = service.login("alice", "correct").await.unwrap();

    tokio::time::advance(Duration::from_secs(3_600)).await;
    let _ = service.login("alice", "correct").await.unwrap();

    assert_eq!(cache.ttl("user_session_42").await.unwrap(), Some(DAY));
}

#[tokio::test(start_paused = true)]
async fn test_login_custom_ttl_is_applied() {
    let hasher = fast_hasher();
    let directory = seeded_directory(&hasher).await;
    let cache = MemoryCacheStore::new();
    let config = AuthConfig {
        cache_ttl_secs: 900,
        ..AuthConfig::default()
    };
    let service = AuthenticationService::new(
        directory,
        MemorySessionStore::fresh(),
        cache.clone(),
        hasher,
        config,
    )
    .unwrap();

    let _ = service.login("bob", "hunter2").await.unwrap();

    assert_eq!(
        cache.ttl("user_session_7").await.unwrap(),
        Some(Duration::from_secs(900))
    );
}

// =========================================================================
// Store outages
// =========================================================================

#[tokio::test]
async fn test_login_cache_outage_still_authenticates() {
    let cache = FlakyCache::new();
    let service = service_with(MemorySessionStore::fresh(), cache.clone()).await;
    cache.set_down(true);

    let outcome = service.login("alice", "correct").await.unwrap();

    assert!(outcome.is_authenticated());
    assert!(outcome.cache_error().is_some());
    assert!(service.is_logged_in().await.unwrap());

    cache.set_down(false);
    assert!(cache.get("user_session_42").await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_session_outage_returns_error_and_skips_cache() {
    let session = FlakySession::new();
    let cache = FlakyCache::new();
    let service = service_with(session.clone(), cache.clone()).await;
    session.set_writes_down(true);

    let result = service.login("alice", "correct").await;

    assert!(matches!(result, Err(AuthError::StoreUnavailable(_))));
    assert!(!service.is_logged_in().await.unwrap());
    assert!(cache.inner.is_empty().await);
}

#[tokio::test]
async fn test_login_relogin_session_outage_keeps_previous_mirror() {
    let session = FlakySession::new();
    let cache = MemoryCacheStore::new();
    let service = service_with(session.clone(), cache.clone()).await;
    let _ = service.login("alice", "correct").await.unwrap();
    session.set_writes_down(true);

    let result = service.login("bob", "hunter2").await;

    assert!(matches!(result, Err(AuthError::StoreUnavailable(_))));
    // Still alice, and alice's mirror still matches her session.
    assert_eq!(
        service.current_user().await.unwrap().map(|u| u.id),
        Some(UserId(42))
    );
    assert!(cache.get("user_session_42").await.unwrap().is_some());
    assert!(cache.get("user_session_7").await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_session_read_outage_returns_error_without_writes() {
    let session = FlakySession::new();
    let cache = FlakyCache::new();
    let service = service_with(session.clone(), cache.clone()).await;
    let _ = service.login("alice", "correct").await.unwrap();
    let calls_before = cache.calls();
    session.set_reads_down(true);

    let result = service.login("bob", "hunter2").await;

    assert!(matches!(result, Err(AuthError::StoreUnavailable(_))));
    assert_eq!(cache.calls(), calls_before);

    session.set_reads_down(false);
    assert_eq!(
        service.current_user().await.unwrap().map(|u| u.id),
        Some(UserId(42))
    );
}

#[tokio::test]
async fn test_logout_cache_outage_clears_session_and_returns_error() {
    let cache = FlakyCache::new();
    let service = service_with(MemorySessionStore::fresh(), cache.clone()).await;
    let _ = service.login("alice", "correct").await.unwrap();
    cache.set_down(true);

    let result = service.logout().await;

    assert!(matches!(result, Err(AuthError::StoreUnavailable(_))));
    assert!(!service.is_logged_in().await.unwrap());

    // The stale mirror is still there; it will age out on its TTL.
    cache.set_down(false);
    assert!(cache.get("user_session_42").await.unwrap().is_some());
}

#[tokio::test]
async fn test_logout_session_outage_returns_error() {
    let session = FlakySession::new();
    let service = service_with(session.clone(), MemoryCacheStore::new()).await;
    let _ = service.login("alice", "correct").await.unwrap();
    session.set_writes_down(true);

    let result = service.logout().await;

    assert!(matches!(result, Err(AuthError::StoreUnavailable(_))));
}

#[tokio::test]
async fn test_login_directory_outage_returns_directory_error() {
    let hasher = fast_hasher();
    let session = MemorySessionStore::fresh();
    let service = AuthenticationService::new(
        UnreachableDirectory,
        session.clone(),
        MemoryCacheStore::new(),
        hasher,
        AuthConfig::default(),
    )
    .unwrap();

    let result = service.login("alice", "correct").await;

    assert!(matches!(result, Err(AuthError::Directory(_))));
    assert_eq!(session.snapshot().await, serde_json::json!({}));
}

// =========================================================================
// Many session contexts, one cache
// =========================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_login_many_sessions_share_one_cache() {
    let hasher = fast_hasher();
    let directory = seeded_directory(&hasher).await;
    let cache = MemoryCacheStore::new();

    let mut handles = Vec::new();
    for i in 0..8 {
        let (directory, cache, hasher) = (directory.clone(), cache.clone(), hasher.clone());
        handles.push(tokio::spawn(async move {
            let session = MemorySessionStore::fresh();
            let service = AuthenticationService::new(
                directory,
                session,
                cache,
                hasher,
                AuthConfig::default(),
            )
            .unwrap();
            let (user, password) = if i % 2 == 0 {
                ("alice", "correct")
            } else {
                ("bob", "hunter2")
            };
            let outcome = service.login(user, password).await.unwrap();
            assert!(outcome.is_authenticated());
            service.current_user().await.unwrap().map(|u| u.id)
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = if i % 2 == 0 { UserId(42) } else { UserId(7) };
        assert_eq!(handle.await.unwrap(), Some(expected));
    }
    assert_eq!(cache.len().await, 2);
}

#[tokio::test]
async fn test_logout_one_session_keeps_other_session_logged_in() {
    let hasher = fast_hasher();
    let directory = seeded_directory(&hasher).await;
    let cache = MemoryCacheStore::new();
    let make = |session: MemorySessionStore| {
        AuthenticationService::new(
            directory.clone(),
            session,
            cache.clone(),
            hasher.clone(),
            AuthConfig::default(),
        )
        .unwrap()
    };
    let alice = make(MemorySessionStore::fresh());
    let bob = make(MemorySessionStore::fresh());
    let _ = alice.login("alice", "correct").await.unwrap();
    let _ = bob.login("bob", "hunter2").await.unwrap();

    alice.logout().await.unwrap();

    assert!(!alice.is_logged_in().await.unwrap());
    assert!(bob.is_logged_in().await.unwrap());
    assert!(cache.get("user_session_7").await.unwrap().is_some());
}
