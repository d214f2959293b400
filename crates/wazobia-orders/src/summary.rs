//! Admin sales dashboard aggregation.

use crate::collections;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use wazobia_commerce::checkout::Order;
use wazobia_commerce::{CommerceError, Currency, Money};
use wazobia_store::MemoryStore;

/// Inclusive Unix-timestamp range for the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DateRange {
    /// Start of range.
    pub from: i64,
    /// End of range.
    pub to: i64,
}

impl DateRange {
    fn contains(&self, at: i64) -> bool {
        self.from <= at && at <= self.to
    }
}

/// One point on a sales chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesPoint {
    /// Chart label, a formatted date.
    pub date: String,
    /// Sales for that label.
    pub total_sales: Money,
}

/// One bar on the top-products chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSales {
    /// Product name.
    pub label: String,
    /// Revenue attributed to the product.
    pub value: Money,
}

/// One slice of the top-categories chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySales {
    /// Category name.
    pub category: String,
    /// Units sold in the category.
    pub total_products: i64,
}

/// Everything the admin overview page renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesSummary {
    /// Orders placed in range.
    pub orders_count: usize,
    /// Products in the catalog.
    pub products_count: usize,
    /// Registered users.
    pub users_count: usize,
    /// Revenue across orders in range.
    pub total_sales: Money,
    /// Per-day sales in range.
    pub sales_chart: Vec<SalesPoint>,
    /// Per-month sales, all time.
    pub monthly_sales: Vec<SalesPoint>,
    /// Top six products by revenue in range.
    pub top_sales_products: Vec<ProductSales>,
    /// Top five categories by units sold in range.
    pub top_sales_categories: Vec<CategorySales>,
    /// Six most recent orders.
    pub latest_orders: Vec<Order>,
}

/// Build the dashboard figures for `range`.
pub fn order_summary(
    store: &Arc<MemoryStore>,
    range: DateRange,
) -> Result<SalesSummary, CommerceError> {
    let orders: Vec<Order> = store.all(collections::ORDERS)?;
    let in_range: Vec<&Order> = orders
        .iter()
        .filter(|o| range.contains(o.created_at))
        .collect();

    let currency = in_range
        .first()
        .map(|o| o.total_price.currency)
        .unwrap_or(Currency::USD);
    let total_sales = Money::try_sum(in_range.iter().map(|o| &o.total_price), currency)
        .ok_or(CommerceError::Overflow)?;

    // per-day buckets keyed by date so the chart comes out sorted
    let mut daily: BTreeMap<String, i64> = BTreeMap::new();
    for order in &in_range {
        let label = day_label(order.created_at);
        *daily.entry(label).or_insert(0) += order.total_price.amount_cents;
    }
    let sales_chart = daily
        .into_iter()
        .map(|(date, cents)| SalesPoint {
            date,
            total_sales: Money::new(cents, currency),
        })
        .collect();

    let mut monthly: BTreeMap<String, i64> = BTreeMap::new();
    for order in &orders {
        let label = month_label(order.created_at);
        *monthly.entry(label).or_insert(0) += order.total_price.amount_cents;
    }
    let monthly_sales = monthly
        .into_iter()
        .map(|(date, cents)| SalesPoint {
            date,
            total_sales: Money::new(cents, currency),
        })
        .collect();

    let mut per_product: BTreeMap<String, i64> = BTreeMap::new();
    let mut per_category: BTreeMap<String, i64> = BTreeMap::new();
    for order in &in_range {
        for item in &order.items {
            *per_product.entry(item.name.clone()).or_insert(0) +=
                item.unit_price.amount_cents * item.quantity;
            *per_category.entry(item.category.clone()).or_insert(0) += item.quantity;
        }
    }
    let mut top_sales_products: Vec<ProductSales> = per_product
        .into_iter()
        .map(|(label, cents)| ProductSales {
            label,
            value: Money::new(cents, currency),
        })
        .collect();
    top_sales_products.sort_by(|a, b| b.value.amount_cents.cmp(&a.value.amount_cents));
    top_sales_products.truncate(6);

    let mut top_sales_categories: Vec<CategorySales> = per_category
        .into_iter()
        .map(|(category, total_products)| CategorySales {
            category,
            total_products,
        })
        .collect();
    top_sales_categories.sort_by(|a, b| b.total_products.cmp(&a.total_products));
    top_sales_categories.truncate(5);

    let mut latest_orders = orders.clone();
    latest_orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    latest_orders.truncate(6);

    Ok(SalesSummary {
        orders_count: in_range.len(),
        products_count: store.count(collections::PRODUCTS)?,
        users_count: store.count(collections::USERS)?,
        total_sales,
        sales_chart,
        monthly_sales,
        top_sales_products,
        top_sales_categories,
        latest_orders,
    })
}

/// "2026/8/25" style label for the daily chart.
fn day_label(at: i64) -> String {
    let date: DateTime<Utc> = DateTime::from_timestamp(at, 0).unwrap_or_default();
    format!("{}/{}/{}", date.year(), date.month(), date.day())
}

/// "2026-08" style label for the monthly chart.
fn month_label(at: i64) -> String {
    let date: DateTime<Utc> = DateTime::from_timestamp(at, 0).unwrap_or_default();
    format!("{}-{:02}", date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wazobia_commerce::checkout::OrderItem;
    use wazobia_commerce::{OrderId, ProductId, UserId};

    fn order(id: &str, created_at: i64, total_cents: i64, items: Vec<OrderItem>) -> Order {
        Order {
            id: OrderId::new(id),
            user_id: UserId::new("u1"),
            items,
            shipping_address: None,
            payment_method: "Cash On Delivery".to_string(),
            items_price: Money::new(total_cents, Currency::USD),
            shipping_price: None,
            tax_price: None,
            total_price: Money::new(total_cents, Currency::USD),
            delivery_date_index: 0,
            expected_delivery_date: None,
            is_paid: true,
            paid_at: Some(created_at),
            payment_result: None,
            is_delivered: false,
            delivered_at: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn item(name: &str, category: &str, unit_cents: i64, quantity: i64) -> OrderItem {
        OrderItem {
            product_id: ProductId::new(name),
            name: name.to_string(),
            slug: name.to_lowercase(),
            image: String::new(),
            category: category.to_string(),
            unit_price: Money::new(unit_cents, Currency::USD),
            quantity,
            count_in_stock: 10,
        }
    }

    #[test]
    fn test_summary_counts_and_totals() {
        let store = Arc::new(MemoryStore::new());
        // two orders in range, one outside it
        let a = order("o1", 1_000, 2_000, vec![item("Sneakers", "Shoes", 1_000, 2)]);
        let b = order("o2", 2_000, 3_000, vec![item("Jacket", "Coats", 3_000, 1)]);
        let c = order("o3", 9_000, 5_000, vec![item("Boots", "Shoes", 5_000, 1)]);
        for o in [&a, &b, &c] {
            store.put(collections::ORDERS, o.id.as_str(), o).unwrap();
        }

        let summary = order_summary(&store, DateRange { from: 0, to: 5_000 }).unwrap();
        assert_eq!(summary.orders_count, 2);
        assert_eq!(summary.total_sales, Money::new(5_000, Currency::USD));
        // monthly chart spans all orders regardless of range
        assert_eq!(summary.monthly_sales.len(), 1);
        assert_eq!(
            summary.monthly_sales[0].total_sales,
            Money::new(10_000, Currency::USD)
        );
        assert_eq!(summary.latest_orders[0].id.as_str(), "o3");
    }

    #[test]
    fn test_top_products_and_categories() {
        let store = Arc::new(MemoryStore::new());
        let o = order(
            "o1",
            1_000,
            9_000,
            vec![
                item("Sneakers", "Shoes", 1_000, 3),
                item("Jacket", "Coats", 6_000, 1),
            ],
        );
        store.put(collections::ORDERS, "o1", &o).unwrap();

        let summary = order_summary(&store, DateRange { from: 0, to: 5_000 }).unwrap();
        // jacket revenue (6000) beats sneakers (3000)
        assert_eq!(summary.top_sales_products[0].label, "Jacket");
        // shoes win on units (3 vs 1)
        assert_eq!(summary.top_sales_categories[0].category, "Shoes");
        assert_eq!(summary.top_sales_categories[0].total_products, 3);
    }

    #[test]
    fn test_empty_store() {
        let store = Arc::new(MemoryStore::new());
        let summary = order_summary(&store, DateRange { from: 0, to: 100 }).unwrap();
        assert_eq!(summary.orders_count, 0);
        assert!(summary.total_sales.is_zero());
        assert!(summary.sales_chart.is_empty());
    }

    #[test]
    fn test_day_labels() {
        // 2026-08-25 00:00:00 UTC
        assert_eq!(day_label(1_787_616_000), "2026/8/25");
        assert_eq!(month_label(1_787_616_000), "2026-08");
    }
}
