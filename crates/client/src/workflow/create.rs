//! Order creation workflow (customer role).
//!
//! `Idle -> CourierChosen -> RestaurantChosen -> MenuLoaded -> ItemsSelected
//! -> Submitting -> {Success | Failed}`. The workflow owns only transient
//! selection state; the menu itself lives in the reference data service,
//! scoped to the chosen restaurant. Choosing a different restaurant
//! invalidates the loaded menu and any quantities already entered, so data
//! fetched for one restaurant never leaks into another's selection.

use std::collections::HashMap;

use serde::Serialize;
use tracing::instrument;

use mealdrop_core::{
    CourierId, CustomerId, MenuItemId, Order, OrderItemInput, OrderStatus, RestaurantId,
};

use crate::api::ApiClient;
use crate::error::ActionError;
use crate::services::orders::OrderQueryService;
use crate::services::reference::{MenuRead, ReferenceDataService};

const CREATE_FALLBACK: &str = "Failed to create order";

const NO_COURIER: &str = "Select a courier before submitting.";
const NO_RESTAURANT: &str = "Select a restaurant before submitting.";
const NO_ITEMS: &str = "Add at least one item with a positive quantity.";

/// Derived position in the creation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationStage {
    Idle,
    CourierChosen,
    RestaurantChosen,
    MenuLoaded,
    ItemsSelected,
    Submitting,
    Failed,
}

/// `POST /orders` body.
#[derive(Debug, Serialize)]
struct CreateOrderBody {
    customer_id: CustomerId,
    courier_id: CourierId,
    restaurant_id: RestaurantId,
    status: OrderStatus,
    items: Vec<OrderItemInput>,
}

/// Transient state of one order being composed.
#[derive(Debug)]
pub struct OrderCreationWorkflow {
    api: ApiClient,
    customer_id: CustomerId,
    courier: Option<CourierId>,
    restaurant: Option<RestaurantId>,
    quantities: HashMap<MenuItemId, u32>,
    submitting: bool,
    error: Option<String>,
}

impl OrderCreationWorkflow {
    #[must_use]
    pub fn new(api: ApiClient, customer_id: CustomerId) -> Self {
        Self {
            api,
            customer_id,
            courier: None,
            restaurant: None,
            quantities: HashMap::new(),
            submitting: false,
            error: None,
        }
    }

    #[must_use]
    pub const fn courier(&self) -> Option<CourierId> {
        self.courier
    }

    #[must_use]
    pub const fn restaurant(&self) -> Option<RestaurantId> {
        self.restaurant
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Requested quantity for a menu item (zero when unset).
    #[must_use]
    pub fn quantity(&self, item: MenuItemId) -> u32 {
        self.quantities.get(&item).copied().unwrap_or(0)
    }

    /// Where the workflow currently stands, given the shared menu state.
    #[must_use]
    pub fn stage(&self, reference: &ReferenceDataService) -> CreationStage {
        if self.submitting {
            return CreationStage::Submitting;
        }
        if self.error.is_some() {
            return CreationStage::Failed;
        }
        if self.courier.is_none() {
            return CreationStage::Idle;
        }
        let Some(restaurant) = self.restaurant else {
            return CreationStage::CourierChosen;
        };
        if !menu_in_scope(reference, restaurant) {
            return CreationStage::RestaurantChosen;
        }
        if self.selected_items(reference).is_empty() {
            return CreationStage::MenuLoaded;
        }
        CreationStage::ItemsSelected
    }

    /// Reset all transient selection state (open and close paths).
    pub fn reset(&mut self, reference: &mut ReferenceDataService) {
        self.courier = None;
        self.restaurant = None;
        self.quantities.clear();
        self.submitting = false;
        self.error = None;
        reference.invalidate_menu();
    }

    pub fn choose_courier(&mut self, courier: CourierId) {
        self.courier = Some(courier);
    }

    /// Choose a restaurant. Switching away from a previous choice drops the
    /// loaded menu and every quantity already entered.
    pub fn choose_restaurant(
        &mut self,
        restaurant: RestaurantId,
        reference: &mut ReferenceDataService,
    ) {
        if self.restaurant != Some(restaurant) {
            self.quantities.clear();
            reference.invalidate_menu();
        }
        self.restaurant = Some(restaurant);
    }

    /// Explicit "load menu" action for the chosen restaurant.
    ///
    /// # Errors
    ///
    /// `ActionError::Validation` when no restaurant is chosen yet.
    pub async fn load_menu(
        &self,
        reference: &mut ReferenceDataService,
    ) -> Result<(), ActionError> {
        let restaurant = self
            .restaurant
            .ok_or_else(|| ActionError::Validation(NO_RESTAURANT.to_string()))?;
        reference.load_menu(restaurant, MenuRead::Lookup).await;
        Ok(())
    }

    /// Set the requested quantity for a menu item; zero unsets it.
    pub fn set_quantity(&mut self, item: MenuItemId, quantity: u32) {
        if quantity == 0 {
            self.quantities.remove(&item);
        } else {
            self.quantities.insert(item, quantity);
        }
    }

    /// The submittable lines: loaded menu entries with a strictly positive
    /// requested quantity, in menu order.
    #[must_use]
    pub fn selected_items(&self, reference: &ReferenceDataService) -> Vec<OrderItemInput> {
        let Some(restaurant) = self.restaurant else {
            return Vec::new();
        };
        if !menu_in_scope(reference, restaurant) {
            return Vec::new();
        }
        reference
            .menu()
            .ready()
            .map(|menu| {
                menu.iter()
                    .filter_map(|item| {
                        let quantity = self.quantity(item.id);
                        (quantity > 0).then_some(OrderItemInput {
                            restaurant_item_id: item.id,
                            quantity,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Fail-fast submit validation: courier, then restaurant, then items.
    ///
    /// # Errors
    ///
    /// `ActionError::Validation` naming the first failing check; no network
    /// call has been made.
    fn validate(&self, reference: &ReferenceDataService) -> Result<CreateOrderBody, ActionError> {
        let courier_id = self
            .courier
            .ok_or_else(|| ActionError::Validation(NO_COURIER.to_string()))?;
        let restaurant_id = self
            .restaurant
            .ok_or_else(|| ActionError::Validation(NO_RESTAURANT.to_string()))?;
        let items = self.selected_items(reference);
        if items.is_empty() {
            return Err(ActionError::Validation(NO_ITEMS.to_string()));
        }
        Ok(CreateOrderBody {
            customer_id: self.customer_id,
            courier_id,
            restaurant_id,
            status: OrderStatus::Created,
            items,
        })
    }

    /// Submit the composed order.
    ///
    /// On success all transient selection state is cleared, the order status
    /// filter is dropped, and the order list re-fetched, returning the
    /// workflow to `Idle`. On failure the selections stay put so the user
    /// can retry without re-entering everything.
    ///
    /// # Errors
    ///
    /// `ActionError::Validation` pre-network, `ActionError::Request` with
    /// the server's message otherwise.
    #[instrument(skip_all, fields(customer = %self.customer_id))]
    pub async fn submit(
        &mut self,
        reference: &mut ReferenceDataService,
        orders: &mut OrderQueryService,
    ) -> Result<Order, ActionError> {
        let body = self.validate(reference)?;

        self.submitting = true;
        self.error = None;
        let outcome: Result<Order, _> = self.api.post_json("orders", &body, CREATE_FALLBACK).await;

        match outcome {
            Ok(order) => {
                self.reset(reference);
                // Reactive refresh: dropping the filter re-queries everything.
                orders.clear_status_filter();
                orders.refresh().await;
                Ok(order)
            }
            Err(e) => {
                self.submitting = false;
                let message = e.user_message();
                self.error = Some(message.clone());
                Err(ActionError::Request(message))
            }
        }
    }
}

/// Whether the shared menu slot holds a loaded menu for `restaurant`.
fn menu_in_scope(reference: &ReferenceDataService, restaurant: RestaurantId) -> bool {
    reference.menu_restaurant() == Some(restaurant) && reference.menu().ready().is_some()
}
