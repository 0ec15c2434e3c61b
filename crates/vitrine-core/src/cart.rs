//! Cart store and the purchase actions of the product detail view.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CoreError;
use crate::selection::ProductView;
use crate::tracking::{EventName, Outbox, TrackingEvent};

/// One line of the cart, frozen at the moment it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: String,
    pub name: String,
    /// Discounted product-level price. Size overrides are not applied.
    pub unit_price: Decimal,
    pub image: Option<String>,
    pub selected_color: Option<String>,
    pub selected_size: Option<String>,
    /// Size-level price, carried for downstream use only.
    pub selected_size_price: Option<Decimal>,
    pub quantity: u32,
}

impl CartLineItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    fn same_variant(&self, other: &CartLineItem) -> bool {
        self.product_id == other.product_id
            && self.selected_color == other.selected_color
            && self.selected_size == other.selected_size
    }
}

/// Builds the cart line for the current selection of `view`.
#[must_use]
pub fn build_cart_line(view: &ProductView) -> CartLineItem {
    let product = view.product();
    let size = view.selected_size();

    CartLineItem {
        product_id: product.id.clone(),
        name: product.title.clone(),
        unit_price: view.price().discounted,
        image: view.selected_media().map(|m| m.src.clone()),
        selected_color: view.selected_color().map(|c| c.name.clone()),
        selected_size: size.map(|s| s.name.clone()),
        selected_size_price: size.and_then(|s| s.price_override),
        quantity: 1,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Adds a line, merging into an existing line for the same variant.
    AddLine(CartLineItem),
    RemoveLine { index: usize },
    /// Sets a line's quantity. Zero removes the line.
    SetQuantity { index: usize, quantity: u32 },
    Clear,
    Open,
    Close,
}

/// Cart state. Only [`CartStore::dispatch`] mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartStore {
    lines: Vec<CartLineItem>,
    open: bool,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, action: CartAction) {
        match action {
            CartAction::AddLine(line) => {
                if let Some(existing) = self.lines.iter_mut().find(|l| l.same_variant(&line)) {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                } else {
                    self.lines.push(line);
                }
            }
            CartAction::RemoveLine { index } => {
                if index < self.lines.len() {
                    self.lines.remove(index);
                }
            }
            CartAction::SetQuantity { index, quantity: 0 } => {
                self.dispatch(CartAction::RemoveLine { index });
            }
            CartAction::SetQuantity { index, quantity } => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.quantity = quantity;
                }
            }
            CartAction::Clear => self.lines.clear(),
            CartAction::Open => self.open = true,
            CartAction::Close => self.open = false,
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, l| acc.saturating_add(l.quantity))
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseIntent {
    AddToCart,
    BuyNow,
}

/// What the view should do after a successful purchase action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseEffect {
    /// The cart drawer was opened.
    CartOpened,
    /// Navigate to the checkout route.
    NavigateToCheckout,
}

/// Cart store plus the outbox that receives its tracking side effects.
#[derive(Debug)]
pub struct Storefront<O> {
    cart: CartStore,
    outbox: O,
}

impl<O: Outbox> Storefront<O> {
    pub fn new(outbox: O) -> Self {
        Self {
            cart: CartStore::new(),
            outbox,
        }
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn dispatch(&mut self, action: CartAction) {
        self.cart.dispatch(action);
    }

    #[must_use]
    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    /// Records that a product page was shown. The event carries the
    /// undiscounted base price.
    pub fn view_product(&self, view: &ProductView) {
        let product = view.product();
        self.outbox.emit_everywhere(TrackingEvent::for_product(
            EventName::ViewContent,
            product,
            product.base_price,
        ));
    }

    /// Runs the add-to-cart or buy-now action for the current selection.
    ///
    /// Add-to-cart opens the cart and queues `AddToCart` on both channels.
    /// Buy-now adds the line and sends the user to checkout with no tracking.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Unavailable`] when the selection is not
    /// purchasable. The cart is left unchanged.
    pub fn purchase(
        &mut self,
        view: &ProductView,
        intent: PurchaseIntent,
    ) -> Result<PurchaseEffect, CoreError> {
        if !view.is_available() {
            return Err(CoreError::Unavailable {
                title: view.product().title.clone(),
            });
        }

        let line = build_cart_line(view);
        let unit_price = line.unit_price;
        self.cart.dispatch(CartAction::AddLine(line));

        match intent {
            PurchaseIntent::AddToCart => {
                self.cart.dispatch(CartAction::Open);
                self.outbox.emit_everywhere(TrackingEvent::for_product(
                    EventName::AddToCart,
                    view.product(),
                    unit_price,
                ));
                Ok(PurchaseEffect::CartOpened)
            }
            PurchaseIntent::BuyNow => Ok(PurchaseEffect::NavigateToCheckout),
        }
    }
}
