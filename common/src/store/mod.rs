//! Persisted client state.
//!
//! [`AppContext`] is built once at startup from a [`KeyValueStore`] and
//! handed to whatever needs the signed-in user, the cart or the delivery
//! location. Nothing is written implicitly: callers invoke [`AppContext::save`]
//! (or one of the narrower `save_*` methods) after mutating.
//!
//! Each entry is stored as a versioned JSON envelope `{"state": .., "version": n}`.

pub mod delivery_time;
pub mod memory;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::config::{
    CART_STORAGE_KEY, LEGACY_TOKEN_KEY, LEGACY_USER_KEY, LOCATION_STORAGE_KEY, USER_STORAGE_KEY,
};
use crate::error::StoreError;
use crate::model::order::Location;
use crate::model::user::User;

pub use memory::MemoryStore;

/// Version written into every envelope.
pub const STATE_VERSION: u32 = 1;

/// String key-value storage, e.g. the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CartState {
    #[serde(default)]
    cart: Cart,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionState {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LocationState {
    #[serde(default)]
    location: Location,
}

/// Reads an envelope, discarding (and removing) entries that no longer
/// parse so a bad value cannot wedge startup.
fn read_envelope<T, S>(store: &mut S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str::<Envelope<T>>(&raw) {
        Ok(envelope) => Ok(Some(envelope.state)),
        Err(err) => {
            warn!("dropping unreadable {key}: {err}");
            store.remove(key)?;
            Ok(None)
        }
    }
}

fn write_envelope<T, S>(store: &mut S, key: &str, state: T) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let envelope = Envelope {
        state,
        version: STATE_VERSION,
    };
    let raw = serde_json::to_string(&envelope).map_err(|source| StoreError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// Application-wide state with an explicit load/save lifecycle.
#[derive(Debug)]
pub struct AppContext<S> {
    store: S,
    pub user: Option<User>,
    pub token: Option<String>,
    pub cart: Cart,
    pub location: Location,
}

impl<S: KeyValueStore> AppContext<S> {
    /// A signed-out context with an empty cart, without reading `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            user: None,
            token: None,
            cart: Cart::default(),
            location: Location::default(),
        }
    }

    /// Restores every persisted entry and migrates the legacy top-level
    /// `token` / `user` keys.
    pub fn load(mut store: S) -> Result<Self, StoreError> {
        let cart = read_envelope::<CartState, _>(&mut store, CART_STORAGE_KEY)?
            .unwrap_or_default()
            .cart;
        let session = read_envelope::<SessionState, _>(&mut store, USER_STORAGE_KEY)?
            .unwrap_or_default();
        let location = read_envelope::<LocationState, _>(&mut store, LOCATION_STORAGE_KEY)?
            .unwrap_or_default()
            .location;

        let mut context = Self {
            store,
            user: session.user,
            token: session.token,
            cart,
            location,
        };
        if context.migrate_legacy()? {
            context.save_session()?;
        }
        debug!(
            "context loaded: user={} cart_lines={}",
            context.user.is_some(),
            context.cart.lines().len()
        );
        Ok(context)
    }

    fn migrate_legacy(&mut self) -> Result<bool, StoreError> {
        let mut migrated = false;

        if let Some(token) = self.store.get(LEGACY_TOKEN_KEY)? {
            if self.token.is_none() {
                self.token = Some(token);
                migrated = true;
            }
            self.store.remove(LEGACY_TOKEN_KEY)?;
        }

        if let Some(raw) = self.store.get(LEGACY_USER_KEY)? {
            if self.user.is_none() {
                match serde_json::from_str::<User>(&raw) {
                    Ok(user) => {
                        self.user = Some(user);
                        migrated = true;
                    }
                    Err(err) => warn!("discarding legacy user entry: {err}"),
                }
            }
            self.store.remove(LEGACY_USER_KEY)?;
        }

        Ok(migrated)
    }

    pub fn save(&mut self) -> Result<(), StoreError> {
        self.save_cart()?;
        self.save_session()?;
        self.save_location()
    }

    pub fn save_cart(&mut self) -> Result<(), StoreError> {
        let state = CartState {
            cart: self.cart.clone(),
        };
        write_envelope(&mut self.store, CART_STORAGE_KEY, state)
    }

    pub fn save_session(&mut self) -> Result<(), StoreError> {
        let state = SessionState {
            user: self.user.clone(),
            token: self.token.clone(),
        };
        write_envelope(&mut self.store, USER_STORAGE_KEY, state)
    }

    pub fn save_location(&mut self) -> Result<(), StoreError> {
        let state = LocationState {
            location: self.location.clone(),
        };
        write_envelope(&mut self.store, LOCATION_STORAGE_KEY, state)
    }

    /// Stores a fresh login.
    pub fn sign_in(&mut self, user: User, token: Option<String>) -> Result<(), StoreError> {
        self.user = Some(user);
        self.token = token;
        self.save_session()
    }

    /// Forgets user and token together.
    pub fn sign_out(&mut self) -> Result<(), StoreError> {
        self.user = None;
        self.token = None;
        self.save_session()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartAddition;
    use crate::model::user::Role;

    fn user() -> User {
        User {
            id: "u1".into(),
            name: "Akosua".into(),
            email: "a@example.com".into(),
            phone: Some("0200000000".into()),
            role: Role::User,
        }
    }

    #[test]
    fn empty_store_loads_defaults() {
        let context = AppContext::load(MemoryStore::default()).unwrap();
        assert!(context.user.is_none());
        assert!(context.cart.is_empty());
        assert_eq!(context.location, Location::default());
    }

    #[test]
    fn save_then_load_restores_everything() {
        let mut context = AppContext::load(MemoryStore::default()).unwrap();
        context.cart.add(CartAddition {
            menu_item_id: "m1".into(),
            name: "Red Red".into(),
            description: "Beans and plantain".into(),
            unit_price: 30.0,
            quantity: 2,
            accompaniments: Vec::new(),
            special_note: Some("extra gari".into()),
        });
        context.location = Location {
            name: "Osu, Oxford Street".into(),
            lat: 5.556,
            lon: -0.182,
        };
        context.sign_in(user(), Some("tok".into())).unwrap();
        context.save().unwrap();

        let restored = AppContext::load(context.store().clone()).unwrap();
        assert_eq!(restored.cart, context.cart);
        assert_eq!(restored.user, Some(user()));
        assert_eq!(restored.token.as_deref(), Some("tok"));
        assert_eq!(restored.location.name, "Osu, Oxford Street");
    }

    #[test]
    fn legacy_keys_are_migrated_and_removed() {
        let mut store = MemoryStore::default();
        store.set("token", "legacy-token").unwrap();
        store
            .set("user", r#"{"_id":"u9","name":"Kwame","email":"k@x.com","role":"admin"}"#)
            .unwrap();

        let context = AppContext::load(store).unwrap();
        assert_eq!(context.token.as_deref(), Some("legacy-token"));
        assert_eq!(context.user.as_ref().map(|u| u.id.as_str()), Some("u9"));
        assert!(context.store().get("token").unwrap().is_none());
        assert!(context.store().get("user").unwrap().is_none());
        assert!(context.store().get(USER_STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn corrupt_entry_is_dropped_not_fatal() {
        let mut store = MemoryStore::default();
        store.set(CART_STORAGE_KEY, "{not json").unwrap();
        let context = AppContext::load(store).unwrap();
        assert!(context.cart.is_empty());
        assert!(context.store().get(CART_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn sign_out_clears_user_and_token() {
        let mut context = AppContext::load(MemoryStore::default()).unwrap();
        context.sign_in(user(), Some("tok".into())).unwrap();
        context.sign_out().unwrap();
        let restored = AppContext::load(context.store().clone()).unwrap();
        assert!(restored.user.is_none());
        assert!(restored.token.is_none());
    }
}
