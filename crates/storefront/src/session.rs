//! Session provider: owns the current shopper's identity.
//!
//! The identity (phone number plus delivery address) is the sole key used
//! by the remote service. It is seeded from the cache on startup, persisted
//! on every change, and published on a watch channel so the order store can
//! re-synchronize deterministically when it changes. No ambient globals:
//! the provider is constructed once and passed where it is needed.

use tokio::sync::watch;

use tahadu_core::{Address, PhoneNumber, UserProfile};

use crate::api::StoreApi;
use crate::error::{AppError, Result};
use crate::storage::{KeyValueStore, keys};

/// Owns the current identity and talks to the login/profile endpoints.
pub struct Session<A, S> {
    api: A,
    storage: S,
    user: Option<UserProfile>,
    publisher: watch::Sender<Option<UserProfile>>,
}

impl<A: StoreApi, S: KeyValueStore> Session<A, S> {
    /// Create a session provider, seeding the identity from the cache.
    ///
    /// A malformed or unreadable cache entry degrades to "not logged in".
    pub fn new(api: A, storage: S) -> Self {
        let user = match storage.get::<UserProfile>(keys::USER) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Failed to read cached identity: {e}");
                None
            }
        };
        let (publisher, _) = watch::channel(user.clone());
        Self {
            api,
            storage,
            user,
            publisher,
        }
    }

    /// Subscribe to identity changes.
    ///
    /// The receiver always holds the latest identity snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.publisher.subscribe()
    }

    /// The current identity, if logged in.
    #[must_use]
    pub fn current(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// The current identity key, if logged in.
    #[must_use]
    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.user.as_ref().map(|user| &user.phone_number)
    }

    /// Login or register by phone number.
    ///
    /// The service returns the stored profile for returning shoppers, so a
    /// re-login restores any previously captured address.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote call fails; the local identity is
    /// left untouched in that case.
    pub async fn login(&mut self, phone: PhoneNumber) -> Result<&UserProfile> {
        let profile = self.api.login(&phone).await?;
        self.set_user(Some(profile));
        self.user.as_ref().ok_or(AppError::MissingPhone)
    }

    /// Attach a delivery address to the current identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingPhone`] when not logged in, or the remote
    /// failure otherwise; the local identity is untouched on failure.
    pub async fn update_profile(&mut self, address: Address) -> Result<&UserProfile> {
        let current = self.user.clone().ok_or(AppError::MissingPhone)?;
        let updated = self.api.update_profile(&current.with_address(address)).await?;
        self.set_user(Some(updated));
        self.user.as_ref().ok_or(AppError::MissingPhone)
    }

    /// Forget the current identity, locally and in the cache.
    pub fn logout(&mut self) {
        if let Err(e) = self.storage.remove(keys::AUTH_TOKEN) {
            tracing::warn!("Failed to remove cached auth token: {e}");
        }
        self.set_user(None);
    }

    fn set_user(&mut self, user: Option<UserProfile>) {
        match &user {
            Some(profile) => {
                if let Err(e) = self.storage.set(keys::USER, profile) {
                    tracing::warn!("Failed to persist identity: {e}");
                }
            }
            None => {
                if let Err(e) = self.storage.remove(keys::USER) {
                    tracing::warn!("Failed to remove cached identity: {e}");
                }
            }
        }
        self.user = user.clone();
        self.publisher.send_replace(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::api::fake::FakeApi;
    use crate::storage::MemoryStore;

    fn phone() -> PhoneNumber {
        PhoneNumber::parse("01098765432").unwrap()
    }

    fn address() -> Address {
        Address {
            governorate: "القاهرة".to_owned(),
            city: "مدينة نصر".to_owned(),
            street: "شارع عباس العقاد".to_owned(),
            details: None,
        }
    }

    #[tokio::test]
    async fn login_stores_and_persists_identity() {
        let storage = MemoryStore::new();
        let mut session = Session::new(FakeApi::new(), storage.clone());

        session.login(phone()).await.unwrap();

        assert_eq!(session.phone(), Some(&phone()));
        let cached: Option<UserProfile> = storage.get(keys::USER).unwrap();
        assert_eq!(cached.unwrap().phone_number, phone());
    }

    #[tokio::test]
    async fn failed_login_leaves_identity_untouched() {
        let api = FakeApi::new();
        api.fail_next(500, "خطأ في الخادم");
        let mut session = Session::new(api, MemoryStore::new());

        let err = session.login(phone()).await.unwrap_err();
        assert_eq!(err.to_string(), "خطأ في الخادم");
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn returning_shopper_gets_stored_profile_back() {
        let api = FakeApi::new();
        api.seed_profile(UserProfile::new(phone()).with_address(address()));
        let mut session = Session::new(api, MemoryStore::new());

        session.login(phone()).await.unwrap();

        assert!(session.current().unwrap().has_address());
    }

    #[tokio::test]
    async fn update_profile_requires_login() {
        let mut session = Session::new(FakeApi::new(), MemoryStore::new());
        let err = session.update_profile(address()).await.unwrap_err();
        assert!(matches!(err, AppError::MissingPhone));
    }

    #[tokio::test]
    async fn update_profile_completes_address() {
        let mut session = Session::new(FakeApi::new(), MemoryStore::new());
        session.login(phone()).await.unwrap();
        assert!(!session.current().unwrap().has_address());

        session.update_profile(address()).await.unwrap();
        assert!(session.current().unwrap().has_address());
    }

    #[tokio::test]
    async fn identity_survives_restart_via_cache() {
        let storage = MemoryStore::new();
        let api = FakeApi::new();
        {
            let mut session = Session::new(api.clone(), storage.clone());
            session.login(phone()).await.unwrap();
            session.update_profile(address()).await.unwrap();
        }

        // A fresh provider over the same cache sees the full identity.
        let session = Session::new(api, storage);
        let user = session.current().unwrap();
        assert_eq!(user.phone_number, phone());
        assert!(user.has_address());
    }

    #[tokio::test]
    async fn logout_clears_memory_and_cache() {
        let storage = MemoryStore::new();
        let mut session = Session::new(FakeApi::new(), storage.clone());
        session.login(phone()).await.unwrap();

        session.logout();

        assert!(session.current().is_none());
        assert!(!storage.contains(keys::USER));
    }

    #[tokio::test]
    async fn subscribers_see_identity_changes() {
        let mut session = Session::new(FakeApi::new(), MemoryStore::new());
        let rx = session.subscribe();
        assert!(rx.borrow().is_none());

        session.login(phone()).await.unwrap();
        assert_eq!(
            rx.borrow().as_ref().map(|u| u.phone_number.clone()),
            Some(phone())
        );

        session.logout();
        assert!(rx.borrow().is_none());
    }

    #[tokio::test]
    async fn corrupted_cache_degrades_to_logged_out() {
        let storage = MemoryStore::new();
        storage.set_raw(keys::USER, "{broken");
        let session = Session::new(FakeApi::new(), storage);
        assert!(session.current().is_none());
    }
}
