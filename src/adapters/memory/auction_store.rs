//! In-memory auction store.
//!
//! Implements the user, item and offer repositories over one lock so
//! reference checks and cascading deletes behave like the PostgreSQL
//! schema without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::domain::catalog::{Item, ItemDetails, NewItem, User, UserDetails, DEFAULT_ITEM_STATUS};
use crate::domain::foundation::{DomainError, ErrorCode, ItemId, OfferId, Timestamp, UserId};
use crate::domain::offer::{NewOffer, Offer};
use crate::ports::{ItemRepository, OfferRepository, UserRepository};

#[derive(Default)]
struct Store {
    users: BTreeMap<UserId, User>,
    items: BTreeMap<ItemId, Item>,
    offers: Vec<Offer>,
    next_user_id: i32,
    next_offer_id: i32,
}

/// Users, items and offers kept in memory.
///
/// ```ignore
/// let store = InMemoryAuctionStore::new();
/// store.add_user(UserId::new(1), "alice").await;
/// store.add_item(ItemId::new("ITEM1")?, "Lamp").await;
/// ```
#[derive(Default)]
pub struct InMemoryAuctionStore {
    store: RwLock<Store>,
}

impl InMemoryAuctionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user under a fixed ID.
    pub async fn add_user(&self, id: UserId, name: impl Into<String>) {
        let name = name.into();
        let mut store = self.store.write().await;
        store.next_user_id = store.next_user_id.max(id.as_i32());
        let email = format!("{}@{}.local", name.to_lowercase().replace(' ', "."), id);
        store.users.insert(
            id,
            User {
                id,
                name,
                email,
                created_at: Timestamp::now(),
            },
        );
    }

    /// Register an active item with no base price.
    pub async fn add_item(&self, id: ItemId, name: impl Into<String>) {
        let item = Item {
            id: id.clone(),
            name: name.into(),
            description: None,
            base_price: Decimal::ZERO,
            status: DEFAULT_ITEM_STATUS.to_string(),
            created_at: Timestamp::now(),
        };
        self.store.write().await.items.insert(id, item);
    }

    /// Number of stored offers.
    pub async fn offer_count(&self) -> usize {
        self.store.read().await.offers.len()
    }

    async fn select(&self, keep: impl Fn(&Offer) -> bool) -> Vec<Offer> {
        self.store
            .read()
            .await
            .offers
            .iter()
            .filter(|o| keep(o))
            .cloned()
            .collect()
    }
}

fn newest_first(offers: &mut [Offer]) {
    offers.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then(b.id.as_i32().cmp(&a.id.as_i32()))
    });
}

fn highest_first(offers: &mut [Offer]) {
    offers.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.as_i32().cmp(&b.id.as_i32()))
    });
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(email) && Some(u.id) != except)
    }
}

fn duplicate_email(email: &str) -> DomainError {
    DomainError::new(ErrorCode::Conflict, format!("user with email {}", email))
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl UserRepository for InMemoryAuctionStore {
    async fn insert(&self, details: UserDetails) -> Result<User, DomainError> {
        let mut store = self.store.write().await;
        if store.email_taken(details.email(), None) {
            return Err(duplicate_email(details.email()));
        }

        store.next_user_id += 1;
        let user = User {
            id: UserId::new(store.next_user_id),
            name: details.name().to_string(),
            email: details.email().to_string(),
            created_at: Timestamp::now(),
        };
        store.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.store.read().await.users.values().cloned().collect())
    }

    async fn update(&self, id: UserId, details: UserDetails) -> Result<Option<User>, DomainError> {
        let mut store = self.store.write().await;
        if !store.users.contains_key(&id) {
            return Ok(None);
        }
        if store.email_taken(details.email(), Some(id)) {
            return Err(duplicate_email(details.email()));
        }

        let Some(user) = store.users.get_mut(&id) else {
            return Ok(None);
        };
        user.name = details.name().to_string();
        user.email = details.email().to_string();
        let updated = user.clone();

        for offer in store.offers.iter_mut().filter(|o| o.user_id == id) {
            offer.user_name = Some(updated.name.clone());
        }
        Ok(Some(updated))
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        if store.users.remove(&id).is_none() {
            return Ok(false);
        }
        store.offers.retain(|o| o.user_id != id);
        Ok(true)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Items
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl ItemRepository for InMemoryAuctionStore {
    async fn insert(&self, item: NewItem) -> Result<Item, DomainError> {
        let mut store = self.store.write().await;
        if store.items.contains_key(&item.id) {
            return Err(DomainError::new(ErrorCode::Conflict, format!("item {}", item.id)));
        }

        let stored = Item {
            id: item.id.clone(),
            name: item.details.name().to_string(),
            description: item.details.description().map(str::to_string),
            base_price: item.details.base_price(),
            status: item.details.status().to_string(),
            created_at: Timestamp::now(),
        };
        store.items.insert(item.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, DomainError> {
        Ok(self.store.read().await.items.get(id).cloned())
    }

    async fn list(&self, status: Option<&str>) -> Result<Vec<Item>, DomainError> {
        let mut items: Vec<Item> = self
            .store
            .read()
            .await
            .items
            .values()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn update(&self, id: &ItemId, details: ItemDetails) -> Result<Option<Item>, DomainError> {
        let mut store = self.store.write().await;
        let Some(item) = store.items.get_mut(id) else {
            return Ok(None);
        };
        item.name = details.name().to_string();
        item.description = details.description().map(str::to_string);
        item.base_price = details.base_price();
        item.status = details.status().to_string();
        let updated = item.clone();

        for offer in store.offers.iter_mut().filter(|o| &o.item_id == id) {
            offer.item_name = Some(updated.name.clone());
        }
        Ok(Some(updated))
    }

    async fn delete(&self, id: &ItemId) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        if store.items.remove(id).is_none() {
            return Ok(false);
        }
        store.offers.retain(|o| &o.item_id != id);
        Ok(true)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Offers
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl OfferRepository for InMemoryAuctionStore {
    async fn insert(&self, offer: NewOffer) -> Result<Offer, DomainError> {
        let mut store = self.store.write().await;

        let (Some(user_name), Some(item_name)) = (
            store.users.get(&offer.user_id()).map(|u| u.name.clone()),
            store.items.get(offer.item_id()).map(|i| i.name.clone()),
        ) else {
            return Err(DomainError::new(
                ErrorCode::ForeignKeyViolation,
                "User or item doesn't exist",
            ));
        };

        store.next_offer_id += 1;
        let stored = Offer {
            id: OfferId::new(store.next_offer_id),
            user_id: offer.user_id(),
            item_id: offer.item_id().clone(),
            amount: offer.amount(),
            created_at: Timestamp::now(),
            user_name: Some(user_name),
            item_name: Some(item_name),
        };
        store.offers.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: OfferId) -> Result<Option<Offer>, DomainError> {
        Ok(self.select(|o| o.id == id).await.into_iter().next())
    }

    async fn list_all(&self) -> Result<Vec<Offer>, DomainError> {
        let mut offers = self.select(|_| true).await;
        newest_first(&mut offers);
        Ok(offers)
    }

    async fn list_by_item(&self, item_id: &ItemId) -> Result<Vec<Offer>, DomainError> {
        let mut offers = self.select(|o| &o.item_id == item_id).await;
        highest_first(&mut offers);
        Ok(offers)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Offer>, DomainError> {
        let mut offers = self.select(|o| o.user_id == user_id).await;
        newest_first(&mut offers);
        Ok(offers)
    }

    async fn highest_for_item(&self, item_id: &ItemId) -> Result<Option<Offer>, DomainError> {
        Ok(OfferRepository::list_by_item(self, item_id)
            .await?
            .into_iter()
            .next())
    }

    async fn delete(&self, id: OfferId) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        let before = store.offers.len();
        store.offers.retain(|o| o.id != id);
        Ok(store.offers.len() < before)
    }
}
