//! End-to-end order lifecycle tests against in-memory doubles.

use std::sync::{Arc, Mutex};
use wazobia_cache::Cache;
use wazobia_commerce::catalog::Product;
use wazobia_commerce::checkout::OrderItem;
use wazobia_commerce::user::User;
use wazobia_commerce::{CommerceError, Currency, Money, OrderId, ProductId, UserId};
use wazobia_orders::collections;
use wazobia_orders::prelude::*;
use wazobia_store::MemoryStore;

/// Gateway double. Every intent is "intent-1"; captures answer with
/// whatever the test staged, or a settled capture echoing the intent id.
#[derive(Default)]
struct FakeGateway {
    capture: Mutex<Option<PaymentCapture>>,
}

impl FakeGateway {
    fn stage_capture(&self, capture: PaymentCapture) {
        *self.capture.lock().unwrap() = Some(capture);
    }
}

impl PaymentGateway for FakeGateway {
    fn create_order(&self, _amount: Money) -> Result<PaymentIntent, CommerceError> {
        Ok(PaymentIntent {
            id: "intent-1".to_string(),
        })
    }

    fn capture_payment(&self, intent_id: &str) -> Result<PaymentCapture, CommerceError> {
        Ok(self.capture.lock().unwrap().clone().unwrap_or(PaymentCapture {
            id: intent_id.to_string(),
            status: CAPTURE_COMPLETED.to_string(),
            payer_email: "ada@example.com".to_string(),
            amount: Money::new(2_000, Currency::USD),
        }))
    }
}

/// Mailer double recording every message.
#[derive(Default, Clone)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl Mailer for RecordingMailer {
    fn send(&self, message: EmailMessage) -> Result<(), CommerceError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

struct Fixture {
    store: Arc<MemoryStore>,
    gateway: Arc<FakeGateway>,
    mailer: RecordingMailer,
    service: OrderService<SharedGateway, RecordingMailer>,
}

/// Local wrapper so the test can keep a handle to the gateway it hands
/// to the service (a direct impl on `Arc<FakeGateway>` is an orphan).
#[derive(Clone)]
struct SharedGateway(Arc<FakeGateway>);

impl PaymentGateway for SharedGateway {
    fn create_order(&self, amount: Money) -> Result<PaymentIntent, CommerceError> {
        self.0.create_order(amount)
    }

    fn capture_payment(&self, intent_id: &str) -> Result<PaymentCapture, CommerceError> {
        self.0.capture_payment(intent_id)
    }
}

fn fixture(config: OrdersConfig) -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(Cache::new());
    let gateway = Arc::new(FakeGateway::default());
    let mailer = RecordingMailer::default();
    let service = OrderService::new(
        Arc::clone(&store),
        cache,
        SharedGateway(Arc::clone(&gateway)),
        mailer.clone(),
        config,
    );

    let mut user = User::new("Ada", "ada@example.com");
    user.id = UserId::new("u1");
    store.put(collections::USERS, "u1", &user).unwrap();

    seed_product(&store, "p1", 1_000, 10);
    seed_product(&store, "p2", 1_500, 10);

    Fixture {
        store,
        gateway,
        mailer,
        service,
    }
}

fn seed_product(store: &MemoryStore, id: &str, unit_cents: i64, stock: i64) {
    let mut product = Product::new(
        format!("Product {id}"),
        format!("product-{id}"),
        "Misc",
        Money::new(unit_cents, Currency::USD),
        stock,
    );
    product.id = ProductId::new(id);
    store.put(collections::PRODUCTS, id, &product).unwrap();
}

fn cart_item(product_id: &str, unit_cents: i64, quantity: i64) -> OrderItem {
    OrderItem {
        product_id: ProductId::new(product_id),
        name: format!("Product {product_id}"),
        slug: format!("product-{product_id}"),
        image: String::new(),
        category: "Misc".to_string(),
        unit_price: Money::new(unit_cents, Currency::USD),
        quantity,
        count_in_stock: 10,
    }
}

fn cart(items: Vec<OrderItem>) -> CartInput {
    CartInput {
        user_id: UserId::new("u1"),
        items,
        shipping_address: None,
        payment_method: "Cash On Delivery".to_string(),
        delivery_date_index: None,
    }
}

fn stock(store: &MemoryStore, id: &str) -> i64 {
    let product: Product = store.get(collections::PRODUCTS, id).unwrap().unwrap();
    product.count_in_stock
}

fn place_order(fx: &Fixture, items: Vec<OrderItem>) -> OrderId {
    let placed = fx.service.create_order(cart(items));
    assert!(placed.success, "{}", placed.message);
    assert_eq!(placed.message, "Order placed successfully");
    placed.data.unwrap()
}

#[test]
fn pay_then_deliver_runs_the_full_lifecycle() {
    let fx = fixture(OrdersConfig::default());
    let order_id = place_order(&fx, vec![cart_item("p1", 1_000, 2)]);

    let paid = fx.service.update_order_to_paid(&order_id);
    assert!(paid.success);
    assert_eq!(paid.message, "Order paid successfully");
    assert_eq!(stock(&fx.store, "p1"), 8);

    let order = fx.service.get_order(&order_id).unwrap();
    assert!(order.is_paid);
    assert!(order.paid_at.is_some());

    let delivered = fx.service.deliver_order(&order_id);
    assert!(delivered.success);
    assert_eq!(delivered.message, "Order delivered successfully");
    let order = fx.service.get_order(&order_id).unwrap();
    assert!(order.is_delivered);

    let sent = fx.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert!(matches!(sent[0].kind, EmailKind::PurchaseReceipt { .. }));
    assert!(sent[0].scheduled_at.is_none());
    assert!(matches!(sent[1].kind, EmailKind::ReviewRequest { .. }));
    assert!(sent[1].scheduled_at.is_some());
    assert_eq!(sent[1].to, "ada@example.com");
}

#[test]
fn paying_twice_fails_and_decrements_stock_once() {
    let fx = fixture(OrdersConfig::default());
    let order_id = place_order(&fx, vec![cart_item("p1", 1_000, 2)]);

    assert!(fx.service.update_order_to_paid(&order_id).success);
    let second = fx.service.update_order_to_paid(&order_id);
    assert!(!second.success);
    assert_eq!(second.message, "Order is already paid");
    assert_eq!(stock(&fx.store, "p1"), 8);
}

#[test]
fn stock_decrement_covers_every_item_atomically() {
    let fx = fixture(OrdersConfig::default());
    let order_id = place_order(
        &fx,
        vec![cart_item("p1", 1_000, 2), cart_item("p2", 1_500, 3)],
    );

    assert!(fx.service.update_order_to_paid(&order_id).success);
    assert_eq!(stock(&fx.store, "p1"), 8);
    assert_eq!(stock(&fx.store, "p2"), 7);
}

#[test]
fn missing_product_rolls_back_the_whole_decrement() {
    let fx = fixture(OrdersConfig::default());
    let order_id = place_order(
        &fx,
        vec![cart_item("p1", 1_000, 2), cart_item("ghost", 500, 1)],
    );

    let paid = fx.service.update_order_to_paid(&order_id);
    assert!(!paid.success);
    assert_eq!(paid.message, "Product not found");
    // the first item's decrement must not survive the abort
    assert_eq!(stock(&fx.store, "p1"), 10);
}

#[test]
fn oversell_aborts_the_decrement() {
    let fx = fixture(OrdersConfig::default());
    seed_product(&fx.store, "scarce", 1_000, 1);
    let order_id = place_order(&fx, vec![cart_item("scarce", 1_000, 2)]);

    let paid = fx.service.update_order_to_paid(&order_id);
    assert!(!paid.success);
    assert_eq!(stock(&fx.store, "scarce"), 1);
}

#[test]
fn delivery_requires_payment() {
    let fx = fixture(OrdersConfig::default());
    let order_id = place_order(&fx, vec![cart_item("p1", 1_000, 1)]);

    let delivered = fx.service.deliver_order(&order_id);
    assert!(!delivered.success);
    assert_eq!(delivered.message, "Order is not paid");

    let order = fx.service.get_order(&order_id).unwrap();
    assert!(!order.is_delivered);
    assert!(fx.mailer.sent.lock().unwrap().is_empty());
}

#[test]
fn gateway_approval_marks_the_order_paid() {
    let fx = fixture(OrdersConfig::default());
    let order_id = place_order(&fx, vec![cart_item("p1", 1_000, 2)]);

    let created = fx.service.create_gateway_order(&order_id);
    assert!(created.success);
    let intent_id = created.data.unwrap();
    assert_eq!(intent_id, "intent-1");

    let approved = fx.service.approve_gateway_order(&order_id, &intent_id);
    assert!(approved.success, "{}", approved.message);

    let order = fx.service.get_order(&order_id).unwrap();
    assert!(order.is_paid);
    let result = order.payment_result.unwrap();
    assert_eq!(result.id, "intent-1");
    assert_eq!(result.status, CAPTURE_COMPLETED);
    assert_eq!(result.email_address, "ada@example.com");
    assert_eq!(result.price_paid, "20.00");
    assert_eq!(stock(&fx.store, "p1"), 8);
}

#[test]
fn mismatched_capture_leaves_the_order_unpaid() {
    let fx = fixture(OrdersConfig::default());
    let order_id = place_order(&fx, vec![cart_item("p1", 1_000, 2)]);
    assert!(fx.service.create_gateway_order(&order_id).success);

    fx.gateway.stage_capture(PaymentCapture {
        id: "someone-elses-intent".to_string(),
        status: CAPTURE_COMPLETED.to_string(),
        payer_email: "ada@example.com".to_string(),
        amount: Money::new(2_000, Currency::USD),
    });
    let approved = fx.service.approve_gateway_order(&order_id, "someone-elses-intent");
    assert!(!approved.success);

    let order = fx.service.get_order(&order_id).unwrap();
    assert!(!order.is_paid);
    assert_eq!(stock(&fx.store, "p1"), 10);
}

#[test]
fn incomplete_capture_leaves_the_order_unpaid() {
    let fx = fixture(OrdersConfig::default());
    let order_id = place_order(&fx, vec![cart_item("p1", 1_000, 2)]);
    assert!(fx.service.create_gateway_order(&order_id).success);

    fx.gateway.stage_capture(PaymentCapture {
        id: "intent-1".to_string(),
        status: "PENDING".to_string(),
        payer_email: "ada@example.com".to_string(),
        amount: Money::new(2_000, Currency::USD),
    });
    let approved = fx.service.approve_gateway_order(&order_id, "intent-1");
    assert!(!approved.success);
    assert!(!fx.service.get_order(&order_id).unwrap().is_paid);
}

#[test]
fn webhook_event_pays_the_order_once() {
    let fx = fixture(OrdersConfig::default());
    let order_id = place_order(&fx, vec![cart_item("p1", 1_000, 2)]);

    let event = PaymentEvent::ChargeSucceeded {
        event_id: "evt-1".to_string(),
        order_id: order_id.clone(),
        payer_email: "ada@example.com".to_string(),
        amount: Money::new(2_000, Currency::USD),
    };
    let handled = fx.service.handle_payment_event(event.clone());
    assert!(handled.success);

    let order = fx.service.get_order(&order_id).unwrap();
    assert!(order.is_paid);
    let result = order.payment_result.unwrap();
    assert_eq!(result.id, "evt-1");
    assert_eq!(result.status, CAPTURE_COMPLETED);
    assert_eq!(stock(&fx.store, "p1"), 8);

    // provider retries deliver the same event again
    let replayed = fx.service.handle_payment_event(event);
    assert!(!replayed.success);
    assert_eq!(replayed.message, "Order is already paid");
    assert_eq!(stock(&fx.store, "p1"), 8);
}

#[test]
fn webhook_for_unknown_order_is_an_error() {
    let fx = fixture(OrdersConfig::default());
    let handled = fx.service.handle_payment_event(PaymentEvent::ChargeSucceeded {
        event_id: "evt-1".to_string(),
        order_id: OrderId::new("missing"),
        payer_email: "ada@example.com".to_string(),
        amount: Money::new(2_000, Currency::USD),
    });
    assert!(!handled.success);
    assert_eq!(handled.message, "Order not found");
}

#[test]
fn stock_decrement_can_be_disabled() {
    let config = OrdersConfig {
        decrement_stock_on_payment: false,
        ..OrdersConfig::default()
    };
    let fx = fixture(config);
    let order_id = place_order(&fx, vec![cart_item("p1", 1_000, 2)]);

    assert!(fx.service.update_order_to_paid(&order_id).success);
    assert!(fx.service.get_order(&order_id).unwrap().is_paid);
    assert_eq!(stock(&fx.store, "p1"), 10);
}

#[test]
fn deleting_an_order_removes_it() {
    let fx = fixture(OrdersConfig::default());
    let order_id = place_order(&fx, vec![cart_item("p1", 1_000, 1)]);

    let deleted = fx.service.delete_order(&order_id);
    assert!(deleted.success);
    assert_eq!(deleted.message, "Order deleted successfully");
    assert!(fx.service.get_order(&order_id).is_err());

    let again = fx.service.delete_order(&order_id);
    assert!(!again.success);
    assert_eq!(again.message, "Order not found");
}

#[test]
fn listings_are_newest_first_and_paged() {
    let fx = fixture(OrdersConfig::default());
    for _ in 0..3 {
        place_order(&fx, vec![cart_item("p1", 1_000, 1)]);
    }

    let page = fx
        .service
        .list_orders_for_user(&UserId::new("u1"), 1, Some(2))
        .unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total_pages, 2);
    assert!(page.data[0].created_at >= page.data[1].created_at);

    let all = fx.service.list_all_orders(1, None).unwrap();
    assert_eq!(all.data.len(), 3);
    assert_eq!(all.total_pages, 1);

    let empty = fx
        .service
        .list_orders_for_user(&UserId::new("stranger"), 1, None)
        .unwrap();
    assert!(empty.data.is_empty());
}

#[test]
fn order_totals_match_priced_cart_without_address() {
    let fx = fixture(OrdersConfig::default());
    let order_id = place_order(&fx, vec![cart_item("p1", 1_000, 2)]);

    let order = fx.service.get_order(&order_id).unwrap();
    // no address: no shipping, no tax, total equals the item sum
    assert_eq!(order.items_price, Money::new(2_000, Currency::USD));
    assert!(order.shipping_price.is_none());
    assert!(order.tax_price.is_none());
    assert_eq!(order.total_price, order.items_price);
    // defaults to the cheapest, slowest delivery tier
    assert_eq!(order.delivery_date_index, 2);
    assert!(order.expected_delivery_date.is_some());
}
