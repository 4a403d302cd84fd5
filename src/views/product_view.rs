use crate::domain::Product;
use crate::format::format_currency;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub description: String,
    pub unit: &'static str,
    pub unit_price: String,
    pub status: &'static str,
    pub available_for_orders: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            description: product.description.clone(),
            unit: product.unit.code(),
            unit_price: format_currency(product.unit_price),
            status: product.status.label(),
            available_for_orders: product.is_orderable(),
        }
    }
}
