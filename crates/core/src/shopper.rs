//! Per-session shopper state: cart, wishlist, language, and currency.
//!
//! The storefront loads one `ShopperState` from the session at the start of a
//! request, mutates it through the methods below, and writes it back. All
//! mutation goes through these entry points; nothing else edits the lists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::i18n::Language;
use crate::models::Product;
use crate::types::{CurrencyCode, Price, ProductId, StoreId};

/// Upper bound on the quantity of a single cart line.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// A product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub currency: CurrencyCode,
    pub image: Option<String>,
    pub store_id: StoreId,
    pub store_name: String,
    pub quantity: u32,
}

/// A product saved for later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub currency: CurrencyCode,
    pub image: Option<String>,
    pub store_id: StoreId,
    pub store_name: String,
}

impl From<&Product> for WishlistItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            currency: product.currency,
            image: product.primary_image().map(String::from),
            store_id: product.store_id.clone(),
            store_name: product.store_name.clone(),
        }
    }
}

impl WishlistItem {
    /// Turn a saved item into a cart line with the given quantity.
    #[must_use]
    pub fn into_cart_item(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            name: self.name,
            price: self.price,
            currency: self.currency,
            image: self.image,
            store_id: self.store_id,
            store_name: self.store_name,
            quantity,
        }
    }
}

impl CartItem {
    /// Build a cart line from a catalog product.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        WishlistItem::from(product).into_cart_item(quantity)
    }

    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(self.price * Decimal::from(self.quantity), self.currency)
    }
}

/// Shopping cart. Lines are unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` units of an item, merging with an existing line.
    ///
    /// Quantities saturate at [`MAX_LINE_QUANTITY`]. Adding zero units is a no-op.
    pub fn add(&mut self, item: CartItem, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(quantity).min(MAX_LINE_QUANTITY);
        } else {
            self.items.push(CartItem {
                quantity: quantity.min(MAX_LINE_QUANTITY),
                ..item
            });
        }
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// Returns `false` if the product is not in the cart.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id);
        }
        match self.items.iter_mut().find(|line| &line.id == id) {
            Some(line) => {
                line.quantity = quantity.min(MAX_LINE_QUANTITY);
                true
            }
            None => false,
        }
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| &line.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Sum of line totals, converted into `currency`.
    #[must_use]
    pub fn subtotal(&self, currency: CurrencyCode) -> Price {
        let amount = self
            .items
            .iter()
            .map(|line| line.line_total().convert_to(currency).amount)
            .sum();
        Price::new(amount, currency)
    }
}

/// Saved-for-later list. Entries are unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    /// Add the item if absent, remove it if present.
    ///
    /// Returns `true` when the item is saved after the call.
    pub fn toggle(&mut self, item: WishlistItem) -> bool {
        if self.remove(&item.id).is_some() {
            false
        } else {
            self.items.push(item);
            true
        }
    }

    /// Remove an entry, returning it.
    pub fn remove(&mut self, id: &ProductId) -> Option<WishlistItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }
}

/// Everything the storefront remembers about a shopper between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopperState {
    pub cart: Cart,
    pub wishlist: Wishlist,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub currency: CurrencyCode,
}

impl ShopperState {
    /// Fresh state with the configured defaults.
    #[must_use]
    pub fn new(language: Language, currency: CurrencyCode) -> Self {
        Self {
            language,
            currency,
            ..Self::default()
        }
    }

    /// Move a wishlist entry into the cart with quantity 1.
    ///
    /// Returns `false` if the product was not on the wishlist.
    pub fn move_to_cart(&mut self, id: &ProductId) -> bool {
        match self.wishlist.remove(id) {
            Some(item) => {
                self.cart.add(item.into_cart_item(1), 1);
                true
            }
            None => false,
        }
    }

    pub const fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub const fn set_currency(&mut self, currency: CurrencyCode) {
        self.currency = currency;
    }
}
