//! Merchant data access: source trait, per-category cache, subscriptions.
//!
//! [`MerchantStore`] sits between the engine and a [`MerchantSource`]
//! backend. It caches merchants per business type so toggling a filter chip
//! back on never refetches, maintains the visible list for the active
//! category selection, and notifies subscribers on every change.
//!
//! Search is modeled as a token handshake: the host calls [`MerchantStore::
//! begin_search`], runs the (possibly slow) source query however it likes,
//! and delivers the outcome with the token. Only the most recently issued
//! token is honored; responses racing in out of order are discarded.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::error::Result;
use crate::Merchant;

/// Business types loaded on startup.
pub const DEFAULT_CATEGORIES: &[&str] = &["음식점"];

/// Where the currently visible data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Cache,
    Network,
}

/// Loading status surfaced to the UI.
#[derive(Debug, Clone, Default)]
pub struct LoadStatus {
    pub loading: bool,
    pub source: Option<DataSource>,
    pub message: String,
}

/// Backend capable of producing merchant records.
pub trait MerchantSource {
    /// Fetch all merchants in the given business types.
    fn load_by_categories(&mut self, categories: &[String]) -> Result<Vec<Merchant>>;

    /// Full-text search across all merchants, ignoring category filters.
    fn search(&mut self, query: &str) -> Result<Vec<Merchant>>;

    /// Merchant count per business type, for filter chip labels.
    fn category_counts(&mut self) -> Result<HashMap<String, usize>>;

    /// Timestamp of the newest record, if the backend tracks one.
    fn last_updated(&mut self) -> Result<Option<String>>;
}

/// Token identifying one search request. Only the last-issued token is
/// accepted when results come back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Subscription identifier returned by the subscribe methods.
pub type SubscriptionId = u64;

type MerchantListener = Box<dyn FnMut(&[Merchant])>;
type StatusListener = Box<dyn FnMut(&LoadStatus)>;

/// Caching merchant store with change notification.
#[derive(Default)]
pub struct MerchantStore {
    /// Per business type cache. Entries survive filter changes.
    cached: HashMap<String, Vec<Merchant>>,
    /// Business types already fetched (kept even when the fetch was empty).
    loaded: HashSet<String>,
    /// Merchants matching the current category selection.
    visible: Vec<Merchant>,
    selected_categories: Vec<String>,
    search_active: bool,
    /// Bumped on every state transition that supersedes in-flight searches.
    generation: u64,
    status: LoadStatus,
    category_counts: HashMap<String, usize>,
    last_updated: Option<String>,
    next_subscription: SubscriptionId,
    visible_listeners: Vec<(SubscriptionId, MerchantListener)>,
    all_listeners: Vec<(SubscriptionId, MerchantListener)>,
    status_listeners: Vec<(SubscriptionId, StatusListener)>,
}

impl MerchantStore {
    pub fn new() -> Self {
        Self {
            selected_categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    // ----- reads -----

    /// Merchants matching the current category selection (or, during an
    /// active search, the delivered search results).
    pub fn visible_merchants(&self) -> &[Merchant] {
        &self.visible
    }

    /// Every cached merchant regardless of selection.
    pub fn all_cached_merchants(&self) -> Vec<Merchant> {
        self.cached.values().flatten().cloned().collect()
    }

    pub fn selected_categories(&self) -> &[String] {
        &self.selected_categories
    }

    pub fn category_counts(&self) -> &HashMap<String, usize> {
        &self.category_counts
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_search_active(&self) -> bool {
        self.search_active
    }

    // ----- subscriptions -----

    /// Subscribe to the visible merchant list. The callback fires
    /// immediately with the current list, then on every change.
    pub fn subscribe(&mut self, mut callback: MerchantListener) -> SubscriptionId {
        callback(&self.visible);
        let id = self.next_id();
        self.visible_listeners.push((id, callback));
        id
    }

    /// Subscribe to additions to the cache (any category).
    pub fn subscribe_all(&mut self, callback: MerchantListener) -> SubscriptionId {
        let id = self.next_id();
        self.all_listeners.push((id, callback));
        id
    }

    /// Subscribe to loading status changes.
    pub fn subscribe_status(&mut self, mut callback: StatusListener) -> SubscriptionId {
        callback(&self.status);
        let id = self.next_id();
        self.status_listeners.push((id, callback));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.visible_listeners.retain(|(sid, _)| *sid != id);
        self.all_listeners.retain(|(sid, _)| *sid != id);
        self.status_listeners.retain(|(sid, _)| *sid != id);
    }

    // ----- loading -----

    /// Load the default categories plus source metadata.
    ///
    /// On failure the error propagates and cached state is left untouched,
    /// so the map keeps showing whatever was last known good.
    pub fn initialize(&mut self, source: &mut dyn MerchantSource) -> Result<()> {
        self.set_status(true, None, "가맹점 불러오는 중".to_string());

        let categories = self.selected_categories.clone();
        if let Err(e) = self.ensure_loaded(source, &categories) {
            self.set_status(false, None, format!("불러오기 실패: {e}"));
            return Err(e);
        }

        self.category_counts = source.category_counts()?;
        self.last_updated = source.last_updated()?;

        self.update_visible();
        self.set_status(false, Some(DataSource::Network), String::new());
        Ok(())
    }

    /// Change the selected categories, fetching any not yet cached.
    ///
    /// An empty selection is rejected as a no-op: the map never shows
    /// nothing because of filters. During an active search the selection is
    /// updated and fetched but the visible list stays on the search results.
    pub fn set_categories(
        &mut self,
        source: &mut dyn MerchantSource,
        categories: &[String],
    ) -> Result<()> {
        if categories.is_empty() {
            debug!("ignoring empty category selection");
            return Ok(());
        }

        self.generation += 1;

        let missing: Vec<String> = categories
            .iter()
            .filter(|c| !self.loaded.contains(*c))
            .cloned()
            .collect();

        if !missing.is_empty() {
            self.set_status(true, None, "가맹점 불러오는 중".to_string());
            if let Err(e) = self.ensure_loaded(source, &missing) {
                self.set_status(false, None, format!("불러오기 실패: {e}"));
                return Err(e);
            }
            self.set_status(false, Some(DataSource::Network), String::new());
        } else {
            self.set_status(false, Some(DataSource::Cache), String::new());
        }

        self.selected_categories = categories.to_vec();

        if !self.search_active {
            self.update_visible();
        }
        Ok(())
    }

    /// Drop all caches and reload the current selection from the source.
    pub fn refresh(&mut self, source: &mut dyn MerchantSource) -> Result<()> {
        self.cached.clear();
        self.loaded.clear();
        self.generation += 1;

        let categories = self.selected_categories.clone();
        self.set_status(true, None, "새로고침 중".to_string());
        if let Err(e) = self.ensure_loaded(source, &categories) {
            self.set_status(false, None, format!("불러오기 실패: {e}"));
            return Err(e);
        }

        self.category_counts = source.category_counts()?;
        self.last_updated = source.last_updated()?;

        if !self.search_active {
            self.update_visible();
        }
        self.set_status(false, Some(DataSource::Network), String::new());
        Ok(())
    }

    // ----- search handshake -----

    /// Start a search. Invalidates every previously issued token.
    pub fn begin_search(&mut self) -> RequestToken {
        self.generation += 1;
        self.set_status(true, None, "검색 중".to_string());
        RequestToken(self.generation)
    }

    /// Deliver search results. Returns whether they were applied; results
    /// carrying a superseded token are discarded.
    pub fn apply_search_results(&mut self, token: RequestToken, results: Vec<Merchant>) -> bool {
        if token.0 != self.generation {
            debug!(
                "discarding stale search results (token {}, current {})",
                token.0, self.generation
            );
            return false;
        }

        self.search_active = true;
        self.visible = results;
        self.set_status(false, Some(DataSource::Network), String::new());
        self.notify_visible();
        true
    }

    /// Deliver a search failure. Visible data stays last known good.
    pub fn search_failed(&mut self, token: RequestToken, message: &str) {
        if token.0 != self.generation {
            debug!("discarding stale search failure (token {})", token.0);
            return;
        }
        warn!("search failed: {message}");
        self.set_status(false, self.status.source, format!("검색 실패: {message}"));
    }

    /// Leave search mode and restore the category-filtered visible list.
    pub fn clear_search(&mut self) {
        self.generation += 1;
        if !self.search_active {
            return;
        }
        self.search_active = false;
        self.update_visible();
    }

    // ----- internals -----

    fn next_id(&mut self) -> SubscriptionId {
        self.next_subscription += 1;
        self.next_subscription
    }

    fn ensure_loaded(
        &mut self,
        source: &mut dyn MerchantSource,
        categories: &[String],
    ) -> Result<()> {
        let missing: Vec<String> = categories
            .iter()
            .filter(|c| !self.loaded.contains(*c))
            .cloned()
            .collect();
        if missing.is_empty() {
            return Ok(());
        }

        let fetched = source.load_by_categories(&missing)?;
        debug!(
            "loaded {} merchants for categories {missing:?}",
            fetched.len()
        );

        for category in &missing {
            self.loaded.insert(category.clone());
            self.cached.entry(category.clone()).or_default();
        }
        for merchant in fetched {
            self.cached
                .entry(merchant.business_type.clone())
                .or_default()
                .push(merchant);
        }

        self.notify_all();
        Ok(())
    }

    fn update_visible(&mut self) {
        self.visible = self
            .selected_categories
            .iter()
            .filter_map(|c| self.cached.get(c))
            .flatten()
            .cloned()
            .collect();
        self.notify_visible();
    }

    fn notify_visible(&mut self) {
        let visible = &self.visible;
        for (_, listener) in &mut self.visible_listeners {
            listener(visible);
        }
    }

    fn notify_all(&mut self) {
        if self.all_listeners.is_empty() {
            return;
        }
        let all: Vec<Merchant> = self.cached.values().flatten().cloned().collect();
        for (_, listener) in &mut self.all_listeners {
            listener(&all);
        }
    }

    fn set_status(&mut self, loading: bool, source: Option<DataSource>, message: String) {
        self.status = LoadStatus {
            loading,
            source,
            message,
        };
        let status = &self.status;
        for (_, listener) in &mut self.status_listeners {
            listener(status);
        }
    }
}

/// In-memory [`MerchantSource`] over a fixed merchant list.
///
/// Search is a case-insensitive substring match over name, address,
/// category, and business type, mirroring what the production backend does
/// server-side.
pub struct InMemorySource {
    merchants: Vec<Merchant>,
    last_updated: Option<String>,
}

impl InMemorySource {
    pub fn new(merchants: Vec<Merchant>) -> Self {
        Self {
            merchants,
            last_updated: None,
        }
    }

    pub fn with_last_updated(mut self, timestamp: &str) -> Self {
        self.last_updated = Some(timestamp.to_string());
        self
    }
}

impl MerchantSource for InMemorySource {
    fn load_by_categories(&mut self, categories: &[String]) -> Result<Vec<Merchant>> {
        Ok(self
            .merchants
            .iter()
            .filter(|m| categories.contains(&m.business_type))
            .cloned()
            .collect())
    }

    fn search(&mut self, query: &str) -> Result<Vec<Merchant>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .merchants
            .iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&needle)
                    || m.address.to_lowercase().contains(&needle)
                    || m.category.to_lowercase().contains(&needle)
                    || m.business_type.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    fn category_counts(&mut self) -> Result<HashMap<String, usize>> {
        let mut counts = HashMap::new();
        for m in &self.merchants {
            *counts.entry(m.business_type.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn last_updated(&mut self) -> Result<Option<String>> {
        Ok(self.last_updated.clone())
    }
}
