use std::collections::HashSet;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::domain::{Order, OrderStatus};

use super::period::{midnight, Period};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Kpis {
    /// Closed orders dated inside the window.
    pub orders: usize,
    /// Sum of those orders' totals.
    pub revenue: Decimal,
    /// Sum of item quantities over those orders.
    pub products_sold: Decimal,
    /// Distinct clients over every order in the window, whatever its status.
    pub active_customers: usize,
    /// Catalog size; ignores the period.
    pub total_products: usize,
}

/// Pure reduction over the order set. Each order is placed at midnight of its date.
pub fn compute_kpis<'a>(
    orders: impl IntoIterator<Item = &'a Order>,
    product_count: usize,
    period: Period,
    now: NaiveDateTime,
) -> Kpis {
    let window = period.window(now);
    let in_window: Vec<&Order> = orders
        .into_iter()
        .filter(|o| window.contains(midnight(o.date)))
        .collect();

    let active_customers = in_window.iter().map(|o| o.client_id).collect::<HashSet<_>>().len();
    let closed = in_window.iter().filter(|o| o.status == OrderStatus::Closed);

    let mut kpis = Kpis {
        active_customers,
        total_products: product_count,
        ..Kpis::default()
    };
    for order in closed {
        kpis.orders += 1;
        kpis.revenue = kpis.revenue.saturating_add(order.total);
        kpis.products_sold = kpis.products_sold.saturating_add(order.items_quantity());
    }
    kpis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientId, OrderId, OrderItem, ProductId};
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn order(id: u64, client: u64, date: NaiveDate, status: OrderStatus, total: Decimal, qty: Decimal) -> Order {
        let now = Utc::now();
        Order {
            id: OrderId(id),
            client_id: ClientId(client),
            date,
            status,
            with_invoice: false,
            total,
            items: vec![OrderItem {
                line: 1,
                product_id: ProductId(1),
                quantity: qty,
                unit_price: total / qty,
                total,
            }],
            created_at: now,
            updated_at: now,
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    // Thursday 2024-01-25; this week began Sunday the 21st.
    fn now() -> NaiveDateTime {
        date(25).and_hms_opt(15, 0, 0).unwrap()
    }

    #[test]
    fn this_week_counts_closed_orders_only_from_this_week() {
        let orders = vec![
            order(1, 1, date(22), OrderStatus::Closed, dec!(100), dec!(2)),
            order(2, 1, date(16), OrderStatus::Closed, dec!(50), dec!(1)),
        ];
        let kpis = compute_kpis(&orders, 7, Period::ThisWeek, now());
        assert_eq!(kpis.revenue, dec!(100));
        assert_eq!(kpis.products_sold, dec!(2));
        assert_eq!(kpis.orders, 1);
        assert_eq!(kpis.total_products, 7);

        let last_week = compute_kpis(&orders, 7, Period::LastWeek, now());
        assert_eq!(last_week.revenue, dec!(50));
        assert_eq!(last_week.orders, 1);
    }

    #[test]
    fn active_customers_include_open_orders() {
        let orders = vec![
            order(1, 1, date(25), OrderStatus::Closed, dec!(10), dec!(1)),
            order(2, 2, date(25), OrderStatus::Open, dec!(20), dec!(1)),
            order(3, 2, date(24), OrderStatus::Open, dec!(20), dec!(1)),
        ];
        let kpis = compute_kpis(&orders, 0, Period::Today, now());
        assert_eq!(kpis.orders, 1);
        assert_eq!(kpis.revenue, dec!(10));
        assert_eq!(kpis.active_customers, 2);

        assert_eq!(compute_kpis(&orders, 0, Period::ThisWeek, now()).active_customers, 2);
    }

    #[test]
    fn today_includes_orders_dated_today() {
        let orders = vec![order(1, 1, date(25), OrderStatus::Closed, dec!(10), dec!(3))];
        assert_eq!(compute_kpis(&orders, 0, Period::Today, now()).products_sold, dec!(3));
        let early = date(25).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(compute_kpis(&orders, 0, Period::Today, early).orders, 1);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let orders = vec![
            order(1, 1, date(2), OrderStatus::Closed, dec!(100), dec!(2)),
            order(2, 3, date(20), OrderStatus::Open, dec!(5), dec!(1)),
        ];
        for period in Period::ALL {
            let first = compute_kpis(&orders, 4, period, now());
            let second = compute_kpis(&orders, 4, period, now());
            assert_eq!(first, second);
        }
        let month = compute_kpis(&orders, 4, Period::ThisMonth, now());
        assert_eq!(month.orders, 1);
        assert_eq!(month.active_customers, 2);
    }

    #[test]
    fn revenue_saturates_instead_of_overflowing() {
        let orders = vec![
            order(1, 1, date(25), OrderStatus::Closed, Decimal::MAX, dec!(1)),
            order(2, 2, date(25), OrderStatus::Closed, Decimal::MAX, dec!(1)),
        ];
        let kpis = compute_kpis(orders.iter().rev(), 0, Period::Today, now());
        assert_eq!(kpis.orders, 2);
        assert_eq!(kpis.revenue, Decimal::MAX);
        assert_eq!(kpis.products_sold, dec!(2));
    }

    #[test]
    fn empty_input_yields_zeroes() {
        assert_eq!(
            compute_kpis(std::iter::empty(), 0, Period::ThisMonth, now()),
            Kpis::default()
        );
    }
}
