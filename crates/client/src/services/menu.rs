//! Restaurant self-service menu management.
//!
//! Listing reuses the reference data service's self-service menu read,
//! scoped to the caller's own restaurant id. Uploads validate the raw form
//! fields in a fixed order - name, description, price, quantity - each with
//! its own message; the first failing check blocks the request entirely.
//! Success clears the form and triggers a re-list; failure preserves the
//! entered values.

use serde::Serialize;
use tracing::instrument;

use mealdrop_core::RestaurantId;

use crate::api::ApiClient;
use crate::error::ActionError;
use crate::services::reference::{MenuRead, ReferenceDataService};

const UPLOAD_FALLBACK: &str = "Failed to upload menu item";

const EMPTY_NAME: &str = "Name must not be empty.";
const EMPTY_DESCRIPTION: &str = "Description must not be empty.";
const BAD_PRICE: &str = "Price must be a number greater than zero.";
const BAD_QUANTITY: &str = "Quantity must be a non-negative whole number.";

/// Raw upload form, kept as entered so a failed submit loses nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuUploadForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
}

impl MenuUploadForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// `POST /menu/upload` body.
#[derive(Debug, Serialize)]
struct MenuUploadBody {
    restaurant_id: RestaurantId,
    name: String,
    price: f64,
    quantity: i64,
    description: String,
}

/// Menu operations for the signed-in restaurant.
#[derive(Debug)]
pub struct MenuManagementService {
    api: ApiClient,
    restaurant_id: RestaurantId,
    form: MenuUploadForm,
}

impl MenuManagementService {
    #[must_use]
    pub fn new(api: ApiClient, restaurant_id: RestaurantId) -> Self {
        Self {
            api,
            restaurant_id,
            form: MenuUploadForm::default(),
        }
    }

    #[must_use]
    pub const fn form(&self) -> &MenuUploadForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut MenuUploadForm {
        &mut self.form
    }

    /// List this restaurant's own menu via the self-service read.
    pub async fn list_own_menu(&self, reference: &mut ReferenceDataService) {
        reference
            .load_menu(self.restaurant_id, MenuRead::SelfService)
            .await;
    }

    /// Validate and upload the current form.
    ///
    /// On success the form is cleared and the menu re-listed; on failure the
    /// entered values stay put and the validation or server message is
    /// returned.
    ///
    /// # Errors
    ///
    /// `ActionError::Validation` before any network call when a field fails
    /// its check; `ActionError::Request` with the server's message when the
    /// upload itself fails.
    #[instrument(skip(self, reference), fields(restaurant = %self.restaurant_id))]
    pub async fn upload_item(
        &mut self,
        reference: &mut ReferenceDataService,
    ) -> Result<(), ActionError> {
        let body = validate_upload(self.restaurant_id, &self.form)?;
        self.api
            .post_unit("menu/upload", &body, UPLOAD_FALLBACK)
            .await
            .map_err(|e| ActionError::Request(e.user_message()))?;

        self.form.clear();
        self.list_own_menu(reference).await;
        Ok(())
    }
}

/// Ordered field validation; fails fast with the first violated check.
fn validate_upload(
    restaurant_id: RestaurantId,
    form: &MenuUploadForm,
) -> Result<MenuUploadBody, ActionError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ActionError::Validation(EMPTY_NAME.to_string()));
    }
    let description = form.description.trim();
    if description.is_empty() {
        return Err(ActionError::Validation(EMPTY_DESCRIPTION.to_string()));
    }
    let price = form
        .price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| ActionError::Validation(BAD_PRICE.to_string()))?;
    let quantity = form
        .quantity
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|q| *q >= 0)
        .ok_or_else(|| ActionError::Validation(BAD_QUANTITY.to_string()))?;

    Ok(MenuUploadBody {
        restaurant_id,
        name: name.to_string(),
        price,
        quantity,
        description: description.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn form(name: &str, description: &str, price: &str, quantity: &str) -> MenuUploadForm {
        MenuUploadForm {
            name: name.to_string(),
            description: description.to_string(),
            price: price.to_string(),
            quantity: quantity.to_string(),
        }
    }

    fn restaurant() -> RestaurantId {
        RestaurantId::new(Uuid::new_v4())
    }

    #[test]
    fn test_validation_order_name_first() {
        let err = validate_upload(restaurant(), &form("", "", "x", "y")).unwrap_err();
        assert_eq!(err, ActionError::Validation(EMPTY_NAME.to_string()));

        let err = validate_upload(restaurant(), &form("Soup", "", "x", "y")).unwrap_err();
        assert_eq!(err, ActionError::Validation(EMPTY_DESCRIPTION.to_string()));
    }

    #[test]
    fn test_price_zero_rejected() {
        let err = validate_upload(restaurant(), &form("Soup", "Hot", "0", "1")).unwrap_err();
        assert_eq!(err, ActionError::Validation(BAD_PRICE.to_string()));
    }

    #[test]
    fn test_price_not_a_number_rejected() {
        for bad in ["", "abc", "NaN", "inf"] {
            let err = validate_upload(restaurant(), &form("Soup", "Hot", bad, "1")).unwrap_err();
            assert_eq!(err, ActionError::Validation(BAD_PRICE.to_string()), "{bad}");
        }
    }

    #[test]
    fn test_quantity_negative_rejected_zero_accepted() {
        let err = validate_upload(restaurant(), &form("Soup", "Hot", "4.5", "-1")).unwrap_err();
        assert_eq!(err, ActionError::Validation(BAD_QUANTITY.to_string()));

        let body = validate_upload(restaurant(), &form("Soup", "Hot", "4.5", "0")).unwrap();
        assert_eq!(body.quantity, 0);
    }

    #[test]
    fn test_quantity_fractional_rejected() {
        let err = validate_upload(restaurant(), &form("Soup", "Hot", "4.5", "1.5")).unwrap_err();
        assert_eq!(err, ActionError::Validation(BAD_QUANTITY.to_string()));
    }

    #[test]
    fn test_valid_form_builds_wire_body() {
        let id = restaurant();
        let body = validate_upload(id, &form(" Soup ", " Hot ", "4.50", "12")).unwrap();
        let json = serde_json::to_value(&body).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert_eq!(object.get("name").unwrap(), "Soup");
        assert_eq!(object.get("description").unwrap(), "Hot");
        assert_eq!(object.get("quantity").unwrap(), 12);
        assert_eq!(object.get("restaurant_id").unwrap(), &id.to_string());
        assert!((object.get("price").unwrap().as_f64().unwrap() - 4.5).abs() < f64::EPSILON);
    }
}
