use std::cmp::Ordering;

use chrono::Utc;
use rust_decimal::Decimal;

use super::ProductError;
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductDraft, ProductId, MIN_DESCRIPTION_LEN};

impl Entity for Product {
    type Id = ProductId;
    type CreatePayload = ProductDraft;
    type Patch = ProductDraft;
    type Action = ();
    type ActionResult = ();
    type Error = ProductError;

    const KIND: &'static str = "product";

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Creates a new Product. Stock starts at zero and is never tracked.
    fn from_create(id: ProductId, draft: ProductDraft) -> Result<Self, ProductError> {
        check_draft(&draft)?;
        let now = Utc::now();
        Ok(Self {
            id,
            description: draft.description,
            unit: draft.unit,
            unit_price: draft.unit_price,
            status: draft.status,
            stock_quantity: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates description, unit, price and status.
    ///
    /// Existing order lines keep the price they were written with.
    fn on_update(&mut self, draft: ProductDraft) -> Result<(), ProductError> {
        check_draft(&draft)?;
        self.description = draft.description;
        self.unit = draft.unit;
        self.unit_price = draft.unit_price;
        self.status = draft.status;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), ProductError> {
        Ok(())
    }

    fn list_order(&self, other: &Self) -> Ordering {
        self.description
            .to_lowercase()
            .cmp(&other.description.to_lowercase())
            .then(self.id.cmp(&other.id))
    }
}

fn check_draft(draft: &ProductDraft) -> Result<(), ProductError> {
    if draft.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ProductError::ValidationError(format!(
            "description must have at least {MIN_DESCRIPTION_LEN} characters"
        )));
    }
    if draft.unit_price <= Decimal::ZERO {
        return Err(ProductError::ValidationError(format!(
            "unit price must be positive, got {}",
            draft.unit_price
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProductStatus, Unit};
    use rust_decimal_macros::dec;

    fn draft(description: &str, unit_price: Decimal) -> ProductDraft {
        ProductDraft {
            description: description.to_string(),
            unit: Unit::Each,
            unit_price,
            status: ProductStatus::Active,
        }
    }

    #[test]
    fn drafts_follow_the_form_rules() {
        assert!(Product::from_create(ProductId(1), draft("Cabo", dec!(10))).is_ok());

        for (description, price) in [(" C ", dec!(10)), ("", dec!(10)), ("Cabo", dec!(0))] {
            assert!(matches!(
                Product::from_create(ProductId(1), draft(description, price)),
                Err(ProductError::ValidationError(_))
            ));
        }
    }
}
