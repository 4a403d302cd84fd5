//! Order composition: header fields plus a dynamic list of line items whose
//! totals are kept in step with every edit.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{
    checked_sum, line_total, ClientId, Order, OrderDraft, OrderId, OrderItemDraft, Product, ProductId,
};

use super::{FormErrors, FormMode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineItemError {
    #[error("An order needs at least one item")]
    LastItem,
    #[error("Item {index} does not exist (the order has {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("Product {0} is inactive")]
    InactiveProduct(ProductId),
    #[error("Item {index} amount is too large")]
    AmountTooLarge { index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total: Decimal,
}

impl Default for OrderLine {
    fn default() -> Self {
        Self {
            product_id: None,
            product_name: String::new(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    pub mode: FormMode<OrderId>,
    pub client_id: Option<ClientId>,
    pub date: NaiveDate,
    pub with_invoice: bool,
    items: Vec<OrderLine>,
    total: Decimal,
}

impl OrderForm {
    /// Blank form dated `today` with one empty line.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: FormMode::Create,
            client_id: None,
            date: today,
            with_invoice: false,
            items: vec![OrderLine::default()],
            total: Decimal::ZERO,
        }
    }

    /// Edit form for a stored order. Product names come from `catalog`, inactive entries included.
    pub fn from_detail(order: &Order, catalog: &[Product]) -> Self {
        let items = order
            .items
            .iter()
            .map(|item| OrderLine {
                product_id: Some(item.product_id),
                product_name: catalog
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .map(|p| p.description.clone())
                    .unwrap_or_default(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total: item.total,
            })
            .collect::<Vec<_>>();
        let mut form = Self {
            mode: FormMode::Edit(order.id),
            client_id: Some(order.client_id),
            date: order.date,
            with_invoice: order.with_invoice,
            items,
            total: order.total,
        };
        if form.items.is_empty() {
            form.items.push(OrderLine::default());
        }
        form
    }

    pub fn items(&self) -> &[OrderLine] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn add_item(&mut self) {
        self.items.push(OrderLine::default());
    }

    pub fn remove_item(&mut self, index: usize) -> Result<(), LineItemError> {
        self.check_index(index)?;
        if self.items.len() == 1 {
            return Err(LineItemError::LastItem);
        }
        let total = checked_sum(
            self.items
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, line)| line.total),
        )
        .ok_or(LineItemError::AmountTooLarge { index })?;
        self.items.remove(index);
        self.total = total;
        Ok(())
    }

    /// Copies the product's description and current price into the line.
    pub fn select_product(&mut self, index: usize, product: &Product) -> Result<(), LineItemError> {
        self.check_index(index)?;
        if !product.is_orderable() {
            return Err(LineItemError::InactiveProduct(product.id));
        }
        let mut line = self.items[index].clone();
        line.product_id = Some(product.id);
        line.product_name = product.description.clone();
        line.unit_price = product.unit_price;
        self.commit(index, line)
    }

    pub fn set_quantity(&mut self, index: usize, quantity: Decimal) -> Result<(), LineItemError> {
        self.check_index(index)?;
        let line = OrderLine {
            quantity,
            ..self.items[index].clone()
        };
        self.commit(index, line)
    }

    pub fn set_unit_price(&mut self, index: usize, unit_price: Decimal) -> Result<(), LineItemError> {
        self.check_index(index)?;
        let line = OrderLine {
            unit_price,
            ..self.items[index].clone()
        };
        self.commit(index, line)
    }

    pub fn validate(&self) -> Result<OrderDraft, FormErrors> {
        let mut errors = FormErrors::default();
        if self.client_id.is_none() {
            errors.push("client_id", "Select a client");
        }

        let mut items = Vec::with_capacity(self.items.len());
        for (index, line) in self.items.iter().enumerate() {
            if line.quantity <= Decimal::ZERO {
                errors.push(format!("items[{index}].quantity"), "Quantity must be greater than zero");
            }
            if line.unit_price <= Decimal::ZERO {
                errors.push(format!("items[{index}].unit_price"), "Price must be greater than zero");
            }
            match line.product_id {
                Some(product_id) => items.push(OrderItemDraft {
                    product_id,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                }),
                None => errors.push(format!("items[{index}].product_id"), "Select a product"),
            }
        }

        match self.client_id {
            Some(client_id) if errors.0.is_empty() => Ok(OrderDraft {
                client_id,
                date: self.date,
                with_invoice: self.with_invoice,
                items,
            }),
            _ => Err(errors),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), LineItemError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(LineItemError::OutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Stores the edited line and the new order total, or nothing if either overflows.
    fn commit(&mut self, index: usize, mut line: OrderLine) -> Result<(), LineItemError> {
        let too_large = LineItemError::AmountTooLarge { index };
        line.total = line_total(line.quantity, line.unit_price).ok_or(too_large.clone())?;
        let others = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, other)| other.total);
        let total = checked_sum(others.chain(std::iter::once(line.total))).ok_or(too_large)?;
        self.items[index] = line;
        self.total = total;
        Ok(())
    }
}

/// Products that may be put on a new line: active ones only.
pub fn available_products(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_orderable()).collect()
}
