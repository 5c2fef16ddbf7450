//! Order augmentation workflow: add one item to an existing order.
//!
//! Unlike creation, the restaurant here is entered as free text (an order
//! may involve a restaurant the customer has not browsed to), and exactly
//! one item may be added per request. On success the workflow stays open so
//! further items can be added one at a time.

use std::collections::HashMap;

use serde::Serialize;
use tracing::instrument;

use mealdrop_core::{MenuItemId, OrderId, RestaurantId};

use crate::api::ApiClient;
use crate::error::ActionError;
use crate::services::reference::{MenuRead, ReferenceDataService};

const ADD_ITEM_FALLBACK: &str = "Failed to add item to order";

const BAD_RESTAURANT_ID: &str = "Restaurant id must be a valid UUID.";
const NO_RESTAURANT: &str = "Enter a restaurant id before submitting.";
const NO_ITEM: &str = "Choose one item to add.";
const TOO_MANY_ITEMS: &str = "Only one item can be added per request.";

/// Derived position in the augmentation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugmentationStage {
    Idle,
    RestaurantEntered,
    MenuLoaded,
    ItemChosen,
    Submitting,
    Failed,
}

/// `POST /orders/{id}/items` body.
#[derive(Debug, Serialize)]
struct AddItemBody {
    restaurant_id: RestaurantId,
    restaurant_item_id: MenuItemId,
    quantity: u32,
}

/// Transient state of one add-item interaction against a fixed order.
#[derive(Debug)]
pub struct OrderAugmentationWorkflow {
    api: ApiClient,
    order_id: OrderId,
    restaurant_input: String,
    restaurant: Option<RestaurantId>,
    quantities: HashMap<MenuItemId, u32>,
    submitting: bool,
    error: Option<String>,
    confirmation: Option<String>,
}

impl OrderAugmentationWorkflow {
    #[must_use]
    pub fn new(api: ApiClient, order_id: OrderId) -> Self {
        Self {
            api,
            order_id,
            restaurant_input: String::new(),
            restaurant: None,
            quantities: HashMap::new(),
            submitting: false,
            error: None,
            confirmation: None,
        }
    }

    #[must_use]
    pub const fn order_id(&self) -> OrderId {
        self.order_id
    }

    #[must_use]
    pub const fn restaurant(&self) -> Option<RestaurantId> {
        self.restaurant
    }

    /// The raw restaurant id text as typed, preserved across parse failures.
    #[must_use]
    pub fn restaurant_input(&self) -> &str {
        &self.restaurant_input
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Success message from the last add, until the next state change.
    #[must_use]
    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    #[must_use]
    pub fn quantity(&self, item: MenuItemId) -> u32 {
        self.quantities.get(&item).copied().unwrap_or(0)
    }

    /// Where the workflow currently stands, given the shared menu state.
    #[must_use]
    pub fn stage(&self, reference: &ReferenceDataService) -> AugmentationStage {
        if self.submitting {
            return AugmentationStage::Submitting;
        }
        if self.error.is_some() {
            return AugmentationStage::Failed;
        }
        let Some(restaurant) = self.restaurant else {
            return AugmentationStage::Idle;
        };
        if !menu_in_scope(reference, restaurant) {
            return AugmentationStage::RestaurantEntered;
        }
        if self.chosen_items().is_empty() {
            return AugmentationStage::MenuLoaded;
        }
        AugmentationStage::ItemChosen
    }

    /// Reset all transient state (close path).
    pub fn reset(&mut self, reference: &mut ReferenceDataService) {
        self.restaurant_input.clear();
        self.restaurant = None;
        self.quantities.clear();
        self.submitting = false;
        self.error = None;
        self.confirmation = None;
        reference.invalidate_menu();
    }

    /// Parse the typed restaurant id. Switching restaurants drops any
    /// quantities and the loaded menu.
    ///
    /// # Errors
    ///
    /// `ActionError::Validation` when the text is not a UUID; the input is
    /// kept as typed so it can be corrected in place.
    pub fn enter_restaurant(
        &mut self,
        raw: &str,
        reference: &mut ReferenceDataService,
    ) -> Result<(), ActionError> {
        self.restaurant_input = raw.to_string();
        let parsed: RestaurantId = raw
            .trim()
            .parse()
            .map_err(|_| ActionError::Validation(BAD_RESTAURANT_ID.to_string()))?;
        if self.restaurant != Some(parsed) {
            self.quantities.clear();
            reference.invalidate_menu();
        }
        self.restaurant = Some(parsed);
        self.confirmation = None;
        Ok(())
    }

    /// Load the entered restaurant's menu.
    ///
    /// # Errors
    ///
    /// `ActionError::Validation` when no restaurant id has been entered.
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
        self.confirmation = None;
    }

    fn chosen_items(&self) -> Vec<(MenuItemId, u32)> {
        self.quantities
            .iter()
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(item, quantity)| (*item, *quantity))
            .collect()
    }

    /// Fail-fast submit validation: restaurant, then exactly one chosen item.
    fn validate(&self) -> Result<AddItemBody, ActionError> {
        let restaurant_id = self
            .restaurant
            .ok_or_else(|| ActionError::Validation(NO_RESTAURANT.to_string()))?;
        let chosen = self.chosen_items();
        let (restaurant_item_id, quantity) = match chosen.as_slice() {
            [] => return Err(ActionError::Validation(NO_ITEM.to_string())),
            [single] => *single,
            _ => return Err(ActionError::Validation(TOO_MANY_ITEMS.to_string())),
        };
        Ok(AddItemBody {
            restaurant_id,
            restaurant_item_id,
            quantity,
        })
    }

    /// Submit the chosen item against the order.
    ///
    /// On success the quantity selection and menu scope are cleared but the
    /// entered restaurant is kept, so the next item can be added without
    /// re-typing the id. On failure everything stays put.
    ///
    /// # Errors
    ///
    /// `ActionError::Validation` pre-network, `ActionError::Request` with
    /// the server's message otherwise.
    #[instrument(skip_all, fields(order = %self.order_id))]
    pub async fn submit(
        &mut self,
        reference: &mut ReferenceDataService,
    ) -> Result<(), ActionError> {
        let body = self.validate()?;

        self.submitting = true;
        self.error = None;
        self.confirmation = None;
        let path = format!("orders/{}/items", self.order_id);
        let outcome = self.api.post_unit(&path, &body, ADD_ITEM_FALLBACK).await;

        self.submitting = false;
        match outcome {
            Ok(()) => {
                self.quantities.clear();
                reference.invalidate_menu();
                self.confirmation = Some(format!("Item added to order {}.", self.order_id));
                Ok(())
            }
            Err(e) => {
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mealdrop_core::MenuItem;
    use uuid::Uuid;

    fn api() -> ApiClient {
        ApiClient::new("http://localhost:8091".parse().unwrap())
    }

    fn workflow() -> OrderAugmentationWorkflow {
        OrderAugmentationWorkflow::new(api(), OrderId::new(Uuid::new_v4()))
    }

    fn menu_item(restaurant_id: RestaurantId) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(Uuid::new_v4()),
            restaurant_id,
            name: "Dish".to_string(),
            price: 7.0,
            quantity_available: 5,
            description: "Good".to_string(),
        }
    }

    fn install_menu(
        reference: &mut ReferenceDataService,
        restaurant: RestaurantId,
        items: Vec<MenuItem>,
    ) {
        let fetch = reference.begin_menu(restaurant, MenuRead::Lookup);
        reference.commit_menu(fetch.token(), Ok(items));
    }

    #[test]
    fn test_invalid_uuid_rejected_and_input_preserved() {
        let mut workflow = workflow();
        let mut reference = ReferenceDataService::new(api());

        let err = workflow
            .enter_restaurant("not-a-uuid", &mut reference)
            .unwrap_err();
        assert_eq!(err, ActionError::Validation(BAD_RESTAURANT_ID.to_string()));
        assert_eq!(workflow.restaurant_input(), "not-a-uuid");
        assert!(workflow.restaurant().is_none());
    }

    #[test]
    fn test_valid_uuid_accepted_with_surrounding_whitespace() {
        let mut workflow = workflow();
        let mut reference = ReferenceDataService::new(api());
        let id = Uuid::new_v4();

        workflow
            .enter_restaurant(&format!("  {id}  "), &mut reference)
            .unwrap();
        assert_eq!(workflow.restaurant(), Some(RestaurantId::new(id)));
    }

    #[test]
    fn test_submit_without_item_blocks() {
        let mut workflow = workflow();
        let mut reference = ReferenceDataService::new(api());
        workflow
            .enter_restaurant(&Uuid::new_v4().to_string(), &mut reference)
            .unwrap();

        let err = workflow.validate().unwrap_err();
        assert_eq!(err, ActionError::Validation(NO_ITEM.to_string()));
    }

    #[test]
    fn test_two_chosen_items_rejected_before_network() {
        let mut workflow = workflow();
        let mut reference = ReferenceDataService::new(api());
        let restaurant = RestaurantId::new(Uuid::new_v4());
        let first = menu_item(restaurant);
        let second = menu_item(restaurant);

        workflow
            .enter_restaurant(&restaurant.to_string(), &mut reference)
            .unwrap();
        install_menu(
            &mut reference,
            restaurant,
            vec![first.clone(), second.clone()],
        );
        workflow.set_quantity(first.id, 1);
        workflow.set_quantity(second.id, 2);

        let err = workflow.validate().unwrap_err();
        assert_eq!(err, ActionError::Validation(TOO_MANY_ITEMS.to_string()));
    }

    #[test]
    fn test_single_item_builds_wire_body() {
        let mut workflow = workflow();
        let mut reference = ReferenceDataService::new(api());
        let restaurant = RestaurantId::new(Uuid::new_v4());
        let item = menu_item(restaurant);

        workflow
            .enter_restaurant(&restaurant.to_string(), &mut reference)
            .unwrap();
        install_menu(&mut reference, restaurant, vec![item.clone()]);
        workflow.set_quantity(item.id, 2);

        let body = workflow.validate().unwrap();
        let json = serde_json::to_value(&body).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object.get("restaurant_id").unwrap(), &restaurant.to_string());
        assert_eq!(
            object.get("restaurant_item_id").unwrap(),
            &item.id.to_string()
        );
        assert_eq!(object.get("quantity").unwrap(), 2);
    }

    #[test]
    fn test_changing_restaurant_drops_selection() {
        let mut workflow = workflow();
        let mut reference = ReferenceDataService::new(api());
        let first = RestaurantId::new(Uuid::new_v4());
        let item = menu_item(first);

        workflow
            .enter_restaurant(&first.to_string(), &mut reference)
            .unwrap();
        install_menu(&mut reference, first, vec![item.clone()]);
        workflow.set_quantity(item.id, 1);

        workflow
            .enter_restaurant(&Uuid::new_v4().to_string(), &mut reference)
            .unwrap();
        assert_eq!(workflow.quantity(item.id), 0);
        assert_eq!(reference.menu_restaurant(), None);
        assert_eq!(
            workflow.stage(&reference),
            AugmentationStage::RestaurantEntered
        );
    }

    #[test]
    fn test_stage_progression() {
        let mut workflow = workflow();
        let mut reference = ReferenceDataService::new(api());
        let restaurant = RestaurantId::new(Uuid::new_v4());
        let item = menu_item(restaurant);

        assert_eq!(workflow.stage(&reference), AugmentationStage::Idle);

        workflow
            .enter_restaurant(&restaurant.to_string(), &mut reference)
            .unwrap();
        assert_eq!(
            workflow.stage(&reference),
            AugmentationStage::RestaurantEntered
        );

        install_menu(&mut reference, restaurant, vec![item.clone()]);
        assert_eq!(workflow.stage(&reference), AugmentationStage::MenuLoaded);

        workflow.set_quantity(item.id, 1);
        assert_eq!(workflow.stage(&reference), AugmentationStage::ItemChosen);
    }

    #[tokio::test]
    async fn test_validation_failure_issues_no_network_call() {
        let mut workflow = workflow();
        let mut reference = ReferenceDataService::new(api());

        let err = workflow.submit(&mut reference).await.unwrap_err();
        assert!(matches!(err, ActionError::Validation(_)));
        assert_eq!(err.message(), NO_RESTAURANT);
    }
}
