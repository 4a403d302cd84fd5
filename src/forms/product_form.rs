use rust_decimal::Decimal;

use crate::domain::{Product, ProductDraft, ProductId, ProductStatus, Unit, MIN_DESCRIPTION_LEN};

use super::{FormErrors, FormMode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub mode: FormMode<ProductId>,
    pub description: String,
    pub unit: Unit,
    pub unit_price: Decimal,
    pub status: ProductStatus,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit(product.id),
            description: product.description.clone(),
            unit: product.unit,
            unit_price: product.unit_price,
            status: product.status,
        }
    }

    pub fn validate(&self) -> Result<ProductDraft, FormErrors> {
        let mut errors = FormErrors::default();
        let description = self.description.trim().to_string();
        if description.chars().count() < MIN_DESCRIPTION_LEN {
            errors.push("description", "Description must have at least 2 characters");
        }
        if self.unit_price <= Decimal::ZERO {
            errors.push("unit_price", "Price must be greater than zero");
        }
        errors.into_result(|| ProductDraft {
            description,
            unit: self.unit,
            unit_price: self.unit_price,
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_to_active_units() {
        let form = ProductForm::new();
        assert_eq!(form.unit, Unit::Each);
        assert_eq!(form.status, ProductStatus::Active);
        assert_eq!(form.mode, FormMode::Create);
    }

    #[test]
    fn validates_description_and_price() {
        let errors = ProductForm {
            description: " x ".to_string(),
            unit_price: dec!(0),
            ..ProductForm::new()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.0.len(), 2);
        assert!(errors.for_field("description").is_some());
        assert!(errors.for_field("unit_price").is_some());

        let draft = ProductForm {
            description: " Parafuso ".to_string(),
            unit: Unit::Box,
            unit_price: dec!(12.5),
            ..ProductForm::new()
        }
        .validate()
        .unwrap();
        assert_eq!(draft.description, "Parafuso");
        assert_eq!(draft.unit, Unit::Box);
        assert_eq!(draft.unit_price, dec!(12.5));
    }
}
