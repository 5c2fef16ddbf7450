//! Reference data: courier/restaurant directories and restaurant menus.
//!
//! Three independently triggered, independently cancellable fetches. Each
//! owns its own [`Remote`] state and supersession tracker, so an empty
//! successful directory is distinguishable from a failed one, and a menu
//! loaded for one restaurant can never leak into a workflow scoped to
//! another: switching restaurants supersedes the in-flight fetch and resets
//! the slot.

use serde::de::DeserializeOwned;
use tracing::instrument;

use mealdrop_core::{CourierSummary, MenuItem, RestaurantId, RestaurantSummary};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::fetch::{Remote, RequestToken, RequestTracker};

const COURIERS_FALLBACK: &str = "Failed to load couriers";
const RESTAURANTS_FALLBACK: &str = "Failed to load restaurants";
const MENU_FALLBACK: &str = "Failed to load menu";

/// Which menu read variant to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRead {
    /// `GET /menu?restaurant_id=` - generic lookup (order workflows).
    Lookup,
    /// `GET /menu/show?restaurant_id=` - restaurant self-service listing.
    SelfService,
}

impl MenuRead {
    const fn path(self) -> &'static str {
        match self {
            Self::Lookup => "menu",
            Self::SelfService => "menu/show",
        }
    }
}

/// One dispatched reference fetch.
#[derive(Debug)]
pub struct ReferenceFetch {
    token: RequestToken,
    api: ApiClient,
    path: &'static str,
    params: Vec<(String, String)>,
    fallback: &'static str,
}

impl ReferenceFetch {
    #[must_use]
    pub const fn token(&self) -> &RequestToken {
        &self.token
    }

    /// Execute the fetch.
    ///
    /// # Errors
    ///
    /// Propagates the [`ApiError`] for the matching `commit_*` to classify.
    pub async fn dispatch<T: DeserializeOwned>(&self) -> Result<Vec<T>, ApiError> {
        self.api.get_json(self.path, &self.params, self.fallback).await
    }
}

/// Directory and menu reads shared by the workflows and dashboards.
#[derive(Debug)]
pub struct ReferenceDataService {
    api: ApiClient,
    couriers: Remote<Vec<CourierSummary>>,
    couriers_tracker: RequestTracker,
    restaurants: Remote<Vec<RestaurantSummary>>,
    restaurants_tracker: RequestTracker,
    menu: Remote<Vec<MenuItem>>,
    menu_tracker: RequestTracker,
    menu_restaurant: Option<RestaurantId>,
}

impl ReferenceDataService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            couriers: Remote::Idle,
            couriers_tracker: RequestTracker::new(),
            restaurants: Remote::Idle,
            restaurants_tracker: RequestTracker::new(),
            menu: Remote::Idle,
            menu_tracker: RequestTracker::new(),
            menu_restaurant: None,
        }
    }

    #[must_use]
    pub const fn couriers(&self) -> &Remote<Vec<CourierSummary>> {
        &self.couriers
    }

    #[must_use]
    pub const fn restaurants(&self) -> &Remote<Vec<RestaurantSummary>> {
        &self.restaurants
    }

    /// The loaded menu; meaningful only together with [`Self::menu_restaurant`].
    #[must_use]
    pub const fn menu(&self) -> &Remote<Vec<MenuItem>> {
        &self.menu
    }

    /// Which restaurant the menu slot is scoped to.
    #[must_use]
    pub const fn menu_restaurant(&self) -> Option<RestaurantId> {
        self.menu_restaurant
    }

    // =========================================================================
    // Couriers
    // =========================================================================

    /// Start a courier directory fetch; resets the slot to `Loading`.
    #[must_use]
    pub fn begin_couriers(&mut self) -> ReferenceFetch {
        self.couriers = Remote::Loading;
        ReferenceFetch {
            token: self.couriers_tracker.begin(),
            api: self.api.clone(),
            path: "couriers",
            params: Vec::new(),
            fallback: COURIERS_FALLBACK,
        }
    }

    pub fn commit_couriers(
        &mut self,
        token: &RequestToken,
        outcome: Result<Vec<CourierSummary>, ApiError>,
    ) {
        if let Some(state) = committed(token, outcome) {
            self.couriers = state;
        }
    }

    /// Fetch and commit the courier directory.
    #[instrument(skip(self))]
    pub async fn load_couriers(&mut self) {
        let fetch = self.begin_couriers();
        let outcome = fetch.dispatch().await;
        self.commit_couriers(fetch.token(), outcome);
    }

    // =========================================================================
    // Restaurants
    // =========================================================================

    /// Start a restaurant directory fetch; resets the slot to `Loading`.
    #[must_use]
    pub fn begin_restaurants(&mut self) -> ReferenceFetch {
        self.restaurants = Remote::Loading;
        ReferenceFetch {
            token: self.restaurants_tracker.begin(),
            api: self.api.clone(),
            path: "restaurants",
            params: Vec::new(),
            fallback: RESTAURANTS_FALLBACK,
        }
    }

    pub fn commit_restaurants(
        &mut self,
        token: &RequestToken,
        outcome: Result<Vec<RestaurantSummary>, ApiError>,
    ) {
        if let Some(state) = committed(token, outcome) {
            self.restaurants = state;
        }
    }

    /// Fetch and commit the restaurant directory.
    #[instrument(skip(self))]
    pub async fn load_restaurants(&mut self) {
        let fetch = self.begin_restaurants();
        let outcome = fetch.dispatch().await;
        self.commit_restaurants(fetch.token(), outcome);
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Start a menu fetch scoped to `restaurant_id`.
    ///
    /// Rescoping to a different restaurant supersedes any in-flight menu
    /// fetch, so its late result cannot land in the new scope.
    #[must_use]
    pub fn begin_menu(&mut self, restaurant_id: RestaurantId, read: MenuRead) -> ReferenceFetch {
        self.menu = Remote::Loading;
        self.menu_restaurant = Some(restaurant_id);
        ReferenceFetch {
            token: self.menu_tracker.begin(),
            api: self.api.clone(),
            path: read.path(),
            params: vec![("restaurant_id".to_string(), restaurant_id.to_string())],
            fallback: MENU_FALLBACK,
        }
    }

    pub fn commit_menu(&mut self, token: &RequestToken, outcome: Result<Vec<MenuItem>, ApiError>) {
        if let Some(state) = committed(token, outcome) {
            self.menu = state;
        }
    }

    /// Fetch and commit a restaurant's menu.
    #[instrument(skip(self), fields(restaurant = %restaurant_id))]
    pub async fn load_menu(&mut self, restaurant_id: RestaurantId, read: MenuRead) {
        let fetch = self.begin_menu(restaurant_id, read);
        let outcome = fetch.dispatch().await;
        self.commit_menu(fetch.token(), outcome);
    }

    /// Drop the loaded menu and its scope (restaurant changed or workflow
    /// closed).
    pub fn invalidate_menu(&mut self) {
        self.menu_tracker.supersede();
        self.menu = Remote::Idle;
        self.menu_restaurant = None;
    }
}

/// Classify an outcome into the slot state, or `None` when it must not
/// commit (stale token or explicit cancellation).
fn committed<T>(token: &RequestToken, outcome: Result<T, ApiError>) -> Option<Remote<T>> {
    if !token.is_current() {
        return None;
    }
    match outcome {
        Ok(value) => Some(Remote::Ready(value)),
        Err(e) if e.is_cancelled() => None,
        Err(e) => Some(Remote::Failed(e.user_message())),
    }
}
