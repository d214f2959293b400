//! Order service: creation, payment capture, lifecycle transitions, stock
//! adjustment, and listings.

use crate::collections;
use crate::config::OrdersConfig;
use crate::gateway::{PaymentEvent, PaymentGateway, CAPTURE_COMPLETED};
use crate::mailer::{purchase_receipt, review_request, Mailer};
use crate::result::{ActionResult, Page};
use crate::settings::SettingsService;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use wazobia_cache::{cache_key, Cache};
use wazobia_commerce::catalog::Product;
use wazobia_commerce::checkout::{
    price_order, Order, OrderItem, PaymentResult, PricingInput, ShippingAddress,
};
use wazobia_commerce::user::User;
use wazobia_commerce::{CommerceError, OrderId, UserId};
use wazobia_store::MemoryStore;

/// A client-side cart submitted at checkout. Prices in it are never
/// trusted; the breakdown is recomputed server-side before persisting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartInput {
    /// Buying user.
    pub user_id: UserId,
    /// Items being bought.
    pub items: Vec<OrderItem>,
    /// Shipping address, if entered.
    pub shipping_address: Option<ShippingAddress>,
    /// Chosen payment method name.
    pub payment_method: String,
    /// Chosen delivery tier, if any.
    pub delivery_date_index: Option<usize>,
}

/// The order-lifecycle service.
///
/// Every public operation catches its own errors and returns an
/// [`ActionResult`]; only the internal helpers speak `CommerceError`.
pub struct OrderService<G, M> {
    store: Arc<MemoryStore>,
    cache: Arc<Cache>,
    settings: SettingsService,
    gateway: G,
    mailer: M,
    config: OrdersConfig,
}

impl<G: PaymentGateway, M: Mailer> OrderService<G, M> {
    /// Wire up the service.
    pub fn new(
        store: Arc<MemoryStore>,
        cache: Arc<Cache>,
        gateway: G,
        mailer: M,
        config: OrdersConfig,
    ) -> Self {
        let settings = SettingsService::new(Arc::clone(&store), Arc::clone(&cache));
        Self {
            store,
            cache,
            settings,
            gateway,
            mailer,
            config,
        }
    }

    /// The settings handle this service reads from.
    pub fn settings(&self) -> &SettingsService {
        &self.settings
    }

    // ---- creation ----

    /// Place an order from a client-side cart.
    pub fn create_order(&self, cart: CartInput) -> ActionResult<OrderId> {
        ActionResult::from_result(
            self.create_order_from_cart(cart),
            "Order placed successfully",
        )
    }

    fn create_order_from_cart(&self, cart: CartInput) -> Result<OrderId, CommerceError> {
        if let Some(address) = &cart.shipping_address {
            address.validate()?;
        }
        let settings = self.settings.get()?;
        let pricing = price_order(PricingInput {
            items: &cart.items,
            shipping_address: cart.shipping_address.as_ref(),
            delivery_date_index: cart.delivery_date_index,
            delivery_options: &settings.available_delivery_dates,
        })?;

        let now = current_timestamp();
        let order = Order {
            id: OrderId::generate(),
            user_id: cart.user_id,
            items: cart.items,
            shipping_address: cart.shipping_address,
            payment_method: cart.payment_method,
            items_price: pricing.items_price,
            shipping_price: pricing.shipping_price,
            tax_price: pricing.tax_price,
            total_price: pricing.total_price,
            delivery_date_index: pricing.delivery_date_index,
            expected_delivery_date: pricing.days_to_deliver.map(|d| now + d * 86_400),
            is_paid: false,
            paid_at: None,
            payment_result: None,
            is_delivered: false,
            delivered_at: None,
            created_at: now,
            updated_at: now,
        };
        order.validate()?;
        self.store
            .put(collections::ORDERS, order.id.as_str(), &order)?;
        info!(order_id = %order.id, "order created");
        Ok(order.id)
    }

    /// Fetch an order by id.
    pub fn get_order(&self, order_id: &OrderId) -> Result<Order, CommerceError> {
        self.store
            .get(collections::ORDERS, order_id.as_str())?
            .ok_or(CommerceError::OrderNotFound)
    }

    // ---- payment ----

    /// Open a provider-side payment intent for the order total and record
    /// its id on the order.
    pub fn create_gateway_order(&self, order_id: &OrderId) -> ActionResult<String> {
        let result = (|| {
            let mut order = self.get_order(order_id)?;
            let intent = self.gateway.create_order(order.total_price)?;
            order.payment_result = Some(PaymentResult {
                id: intent.id.clone(),
                status: String::new(),
                email_address: String::new(),
                price_paid: "0".to_string(),
            });
            order.updated_at = current_timestamp();
            self.store
                .put(collections::ORDERS, order.id.as_str(), &order)?;
            Ok(intent.id)
        })();
        ActionResult::from_result(result, "Payment order created successfully")
    }

    /// Capture a payment the buyer approved on the provider's site. The
    /// capture must settle and match the recorded intent, otherwise the
    /// order stays unpaid.
    pub fn approve_gateway_order(
        &self,
        order_id: &OrderId,
        gateway_order_id: &str,
    ) -> ActionResult<()> {
        let result = (|| {
            let mut order = self.get_order(order_id)?;
            let capture = self.gateway.capture_payment(gateway_order_id)?;

            let recorded_id = order
                .payment_result
                .as_ref()
                .map(|r| r.id.as_str())
                .unwrap_or_default();
            if capture.id != recorded_id || !capture.is_completed() {
                return Err(CommerceError::PaymentFailed(
                    "capture did not match the recorded payment".to_string(),
                ));
            }

            order.payment_result = Some(PaymentResult {
                id: capture.id,
                status: capture.status,
                email_address: capture.payer_email,
                price_paid: capture.amount.display_amount(),
            });
            self.transition_to_paid(order)
        })();
        ActionResult::from_result(result, "Your order has been paid successfully")
    }

    /// Mark an order paid outside a gateway capture (cash on delivery,
    /// admin console).
    pub fn update_order_to_paid(&self, order_id: &OrderId) -> ActionResult<()> {
        let result = self
            .get_order(order_id)
            .and_then(|order| self.transition_to_paid(order));
        ActionResult::from_result(result, "Order paid successfully")
    }

    /// Accept a provider webhook event.
    pub fn handle_payment_event(&self, event: PaymentEvent) -> ActionResult<()> {
        let PaymentEvent::ChargeSucceeded {
            event_id,
            order_id,
            payer_email,
            amount,
        } = event;
        let result = (|| {
            let mut order = self.get_order(&order_id)?;
            order.payment_result = Some(PaymentResult {
                id: event_id,
                status: CAPTURE_COMPLETED.to_string(),
                email_address: payer_email,
                price_paid: amount.display_amount(),
            });
            self.transition_to_paid(order)
        })();
        ActionResult::from_result(result, "Order paid successfully")
    }

    /// The Created -> Paid transition. Guard first, then effects in order:
    /// persist the paid flag, decrement stock, send the receipt, drop the
    /// cached order view. An email failure is logged, never rolled back.
    fn transition_to_paid(&self, mut order: Order) -> Result<(), CommerceError> {
        let now = current_timestamp();
        order.mark_paid(now)?;
        self.store
            .put(collections::ORDERS, order.id.as_str(), &order)?;

        if self.config.decrement_stock_on_payment {
            self.update_product_stock(&order.id)?;
        }

        self.send_or_log(|from, to| purchase_receipt(from, to, order.id.clone()), &order);
        self.cache.delete(&cache_key!("order", order.id))?;
        info!(order_id = %order.id, "order marked paid");
        Ok(())
    }

    /// The Paid -> Delivered transition. Requires a paid order; schedules
    /// the review-request email a day out.
    pub fn deliver_order(&self, order_id: &OrderId) -> ActionResult<()> {
        let result = (|| {
            let mut order = self.get_order(order_id)?;
            let now = current_timestamp();
            order.mark_delivered(now)?;
            self.store
                .put(collections::ORDERS, order.id.as_str(), &order)?;

            self.send_or_log(
                |from, to| review_request(from, to, order.id.clone(), now),
                &order,
            );
            self.cache.delete(&cache_key!("order", order.id))?;
            info!(order_id = %order.id, "order marked delivered");
            Ok(())
        })();
        ActionResult::from_result(result, "Order delivered successfully")
    }

    fn send_or_log(&self, build: impl FnOnce(String, String) -> crate::mailer::EmailMessage, order: &Order) {
        let user: Option<User> = match self.store.get(collections::USERS, order.user_id.as_str()) {
            Ok(user) => user,
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "could not load user for email");
                return;
            }
        };
        let Some(user) = user.filter(|u| !u.email.is_empty()) else {
            return;
        };
        let from = format!("{} <{}>", self.config.sender_name, self.config.sender_email);
        if let Err(e) = self.mailer.send(build(from, user.email)) {
            // the transition is already committed; a lost email does not
            // roll it back
            warn!(order_id = %order.id, error = %e, "email send failed");
        }
    }

    // ---- stock adjustment ----

    /// Decrement stock for every line item of a paid order, atomically.
    ///
    /// Runs in a single store transaction: the order's paid flag is
    /// re-affirmed and every product decremented together, or nothing
    /// changes. A missing order or product, or a decrement that would go
    /// negative, aborts the whole thing.
    pub fn update_product_stock(&self, order_id: &OrderId) -> Result<(), CommerceError> {
        let now = current_timestamp();
        self.store.transaction(|tx| {
            let mut order: Order = tx
                .get(collections::ORDERS, order_id.as_str())?
                .ok_or(CommerceError::OrderNotFound)?;
            order.is_paid = true;
            order.paid_at.get_or_insert(now);
            tx.put(collections::ORDERS, order_id.as_str(), &order)?;

            for item in &order.items {
                let mut product: Product = tx
                    .get(collections::PRODUCTS, item.product_id.as_str())?
                    .ok_or(CommerceError::ProductNotFound)?;
                if product.count_in_stock < item.quantity {
                    return Err(CommerceError::InsufficientInventory {
                        product_id: item.product_id.to_string(),
                        requested: item.quantity,
                        available: product.count_in_stock,
                    });
                }
                product.count_in_stock -= item.quantity;
                product.updated_at = now;
                tx.put(collections::PRODUCTS, item.product_id.as_str(), &product)?;
            }
            Ok(())
        })
    }

    // ---- admin ----

    /// Delete an order outright. The only way an order leaves the store.
    pub fn delete_order(&self, order_id: &OrderId) -> ActionResult<()> {
        let result = (|| {
            if !self.store.delete(collections::ORDERS, order_id.as_str())? {
                return Err(CommerceError::OrderNotFound);
            }
            self.cache.delete(&cache_key!("order", order_id))?;
            Ok(())
        })();
        ActionResult::from_result(result, "Order deleted successfully")
    }

    // ---- listings ----

    /// A user's orders, newest first.
    pub fn list_orders_for_user(
        &self,
        user_id: &UserId,
        page: usize,
        limit: Option<usize>,
    ) -> Result<Page<Order>, CommerceError> {
        let mut orders: Vec<Order> = self
            .store
            .find(collections::ORDERS, |o: &Order| &o.user_id == user_id)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Page::paginate(
            orders,
            page,
            limit.unwrap_or(self.config.page_size),
        ))
    }

    /// All orders, newest first.
    pub fn list_all_orders(
        &self,
        page: usize,
        limit: Option<usize>,
    ) -> Result<Page<Order>, CommerceError> {
        let mut orders: Vec<Order> = self.store.all(collections::ORDERS)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Page::paginate(
            orders,
            page,
            limit.unwrap_or(self.config.page_size),
        ))
    }
}

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
