//! Role-filtered order list.
//!
//! The query carries exactly one identity parameter - `customer_id`,
//! `courier_id`, or `restaurant_id`, matching the active role - plus an
//! optional `status`. Success replaces the cached list wholesale (the server
//! is authoritative for this read); failure keeps the previous list and
//! surfaces an error string; a superseded fetch commits nothing.

use tracing::instrument;

use mealdrop_core::{Order, OrderStatus, Role, UserId};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::fetch::{RequestToken, RequestTracker};

const ORDERS_FALLBACK: &str = "Failed to load orders";

/// Cached, role-scoped view of the order list.
#[derive(Debug)]
pub struct OrderQueryService {
    api: ApiClient,
    role: Role,
    identity: UserId,
    status_filter: Option<OrderStatus>,
    orders: Vec<Order>,
    error: Option<String>,
    loading: bool,
    tracker: RequestTracker,
}

/// One dispatched list request: the token that guards its commit plus
/// everything needed to run it without borrowing the service.
#[derive(Debug)]
pub struct OrderFetch {
    token: RequestToken,
    api: ApiClient,
    params: Vec<(String, String)>,
}

impl OrderFetch {
    /// The token to pass back into [`OrderQueryService::commit`].
    #[must_use]
    pub const fn token(&self) -> &RequestToken {
        &self.token
    }

    /// Execute `GET /orders` with this fetch's query.
    ///
    /// # Errors
    ///
    /// Propagates the [`ApiError`] for [`OrderQueryService::commit`] to
    /// classify; callers never surface it directly.
    pub async fn dispatch(&self) -> Result<Vec<Order>, ApiError> {
        self.api
            .get_json("orders", &self.params, ORDERS_FALLBACK)
            .await
    }
}

impl OrderQueryService {
    #[must_use]
    pub fn new(api: ApiClient, role: Role, identity: UserId) -> Self {
        Self {
            api,
            role,
            identity,
            status_filter: None,
            orders: Vec::new(),
            error: None,
            loading: false,
            tracker: RequestTracker::new(),
        }
    }

    /// The cached order list (last successful fetch).
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Error from the most recent completed fetch, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn status_filter(&self) -> Option<OrderStatus> {
        self.status_filter
    }

    /// Change the status filter, invalidating any in-flight fetch.
    pub fn set_status_filter(&mut self, filter: Option<OrderStatus>) {
        if self.status_filter != filter {
            self.status_filter = filter;
            self.tracker.supersede();
            self.loading = false;
        }
    }

    /// Drop the status filter (used after a successful order creation so the
    /// next refresh shows everything).
    pub fn clear_status_filter(&mut self) {
        self.set_status_filter(None);
    }

    /// The query parameters the next fetch will carry.
    #[must_use]
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![(
            self.role.capabilities().identity_param.to_string(),
            self.identity.to_string(),
        )];
        if let Some(status) = self.status_filter {
            params.push(("status".to_string(), status.as_str().to_string()));
        }
        params
    }

    /// Start a fetch for the current role/identity/filter key.
    ///
    /// Supersedes any outstanding fetch for this service.
    #[must_use]
    pub fn begin(&mut self) -> OrderFetch {
        self.loading = true;
        OrderFetch {
            token: self.tracker.begin(),
            api: self.api.clone(),
            params: self.query_params(),
        }
    }

    /// Commit a fetch outcome, unless the token went stale.
    ///
    /// A stale token's outcome - success or failure - is a silent no-op, so
    /// an earlier response can never overwrite state set by a later request.
    pub fn commit(&mut self, token: &RequestToken, outcome: Result<Vec<Order>, ApiError>) {
        if !token.is_current() {
            return;
        }
        self.loading = false;
        match outcome {
            Ok(orders) => {
                self.orders = orders;
                self.error = None;
            }
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                // Previous list stays at its last-good value.
                self.error = Some(e.user_message());
            }
        }
    }

    /// Fetch and commit in one step.
    #[instrument(skip(self), fields(role = %self.role))]
    pub async fn refresh(&mut self) {
        let fetch = self.begin();
        let outcome = fetch.dispatch().await;
        self.commit(fetch.token(), outcome);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mealdrop_core::{CustomerId, OrderId};
    use uuid::Uuid;

    fn service(role: Role) -> OrderQueryService {
        let api = ApiClient::new("http://localhost:8091".parse().unwrap());
        OrderQueryService::new(api, role, UserId::new(Uuid::new_v4()))
    }

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(Uuid::new_v4()),
            customer_id: CustomerId::new(Uuid::new_v4()),
            courier_id: None,
            restaurant_id: None,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            items: Vec::new(),
        }
    }

    #[test]
    fn test_query_carries_exactly_one_identity_param() {
        for (role, expected) in [
            (Role::Customer, "customer_id"),
            (Role::Courier, "courier_id"),
            (Role::Restaurant, "restaurant_id"),
        ] {
            let service = service(role);
            let params = service.query_params();
            assert_eq!(params.len(), 1);
            assert_eq!(params.first().unwrap().0, expected);
        }
    }

    #[test]
    fn test_query_includes_status_filter() {
        let mut service = service(Role::Customer);
        service.set_status_filter(Some(OrderStatus::Delivering));
        let params = service.query_params();
        assert!(
            params
                .iter()
                .any(|(k, v)| k == "status" && v == "delivering")
        );
    }

    #[test]
    fn test_success_replaces_list_wholesale() {
        let mut service = service(Role::Customer);
        let first = service.begin();
        service.commit(first.token(), Ok(vec![order(OrderStatus::Created)]));
        assert_eq!(service.orders().len(), 1);

        let second = service.begin();
        service.commit(
            second.token(),
            Ok(vec![order(OrderStatus::Pending), order(OrderStatus::Created)]),
        );
        assert_eq!(service.orders().len(), 2);
        assert!(service.error().is_none());
    }

    #[test]
    fn test_failure_preserves_last_good_list() {
        let mut service = service(Role::Customer);
        let first = service.begin();
        service.commit(first.token(), Ok(vec![order(OrderStatus::Created)]));

        let second = service.begin();
        service.commit(
            second.token(),
            Err(ApiError::Api {
                message: "backend down".to_string(),
            }),
        );
        assert_eq!(service.orders().len(), 1);
        assert_eq!(service.error(), Some("backend down"));
    }

    #[test]
    fn test_superseded_response_never_commits() {
        let mut service = service(Role::Customer);
        let stale = service.begin();
        let fresh = service.begin();

        // Later request resolves first.
        service.commit(fresh.token(), Ok(vec![order(OrderStatus::Pending)]));
        // Stale success must not overwrite, regardless of resolution order.
        service.commit(
            stale.token(),
            Ok(vec![order(OrderStatus::Created), order(OrderStatus::Created)]),
        );

        assert_eq!(service.orders().len(), 1);
        assert_eq!(
            service.orders().first().unwrap().status,
            OrderStatus::Pending
        );
    }

    #[test]
    fn test_changing_filter_supersedes_in_flight_fetch() {
        let mut service = service(Role::Customer);
        let in_flight = service.begin();
        service.set_status_filter(Some(OrderStatus::Delivered));

        service.commit(in_flight.token(), Ok(vec![order(OrderStatus::Created)]));
        assert!(service.orders().is_empty());
        // A superseded fetch is not an error.
        assert!(service.error().is_none());
    }

    #[test]
    fn test_cancelled_outcome_is_silent() {
        let mut service = service(Role::Customer);
        let fetch = service.begin();
        service.commit(fetch.token(), Err(ApiError::Cancelled));
        assert!(service.error().is_none());
        assert!(service.orders().is_empty());
    }
}
