//! Seed products and catalog queries.

use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::listing;
use crate::models::Product;
use crate::types::{CurrencyCode, ProductId, StoreId};

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    cents: i64,
    old_cents: Option<i64>,
    store: &'static str,
    rating: f32,
    reviews: u32,
    stock: u32,
    category: &'static str,
    is_new: bool,
    is_featured: bool,
    listed: (i32, u32, u32),
    description: &'static str,
}

const PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "p1",
        name: "Hand-painted Tagine",
        cents: 4500,
        old_cents: Some(6000),
        store: "s1",
        rating: 4.9,
        reviews: 86,
        stock: 12,
        category: "ceramics",
        is_new: true,
        is_featured: true,
        listed: (2026, 4, 20),
        description: "Glazed clay tagine with a cobalt floral pattern. Oven safe.",
    },
    ProductSeed {
        id: "p2",
        name: "Zellige Tea Coaster Set",
        cents: 1850,
        old_cents: None,
        store: "s1",
        rating: 4.6,
        reviews: 41,
        stock: 40,
        category: "ceramics",
        is_new: true,
        is_featured: false,
        listed: (2026, 5, 2),
        description: "Six mosaic tile coasters with cork backing.",
    },
    ProductSeed {
        id: "p3",
        name: "Egyptian Cotton Bath Towel",
        cents: 2999,
        old_cents: Some(3999),
        store: "s2",
        rating: 4.7,
        reviews: 120,
        stock: 25,
        category: "textiles",
        is_new: false,
        is_featured: true,
        listed: (2026, 1, 15),
        description: "700 GSM long-staple cotton, 70 x 140 cm.",
    },
    ProductSeed {
        id: "p4",
        name: "Linen Table Runner",
        cents: 3400,
        old_cents: None,
        store: "s2",
        rating: 4.2,
        reviews: 18,
        stock: 0,
        category: "textiles",
        is_new: false,
        is_featured: false,
        listed: (2025, 12, 10),
        description: "Stonewashed linen runner with fringed ends.",
    },
    ProductSeed {
        id: "p5",
        name: "Premium Medjool Dates 1kg",
        cents: 2400,
        old_cents: None,
        store: "s3",
        rating: 4.8,
        reviews: 210,
        stock: 60,
        category: "food",
        is_new: false,
        is_featured: true,
        listed: (2026, 3, 3),
        description: "Large, soft Medjool dates from Al-Qassim farms.",
    },
    ProductSeed {
        id: "p6",
        name: "Saudi Coffee Blend",
        cents: 1675,
        old_cents: None,
        store: "s3",
        rating: 4.5,
        reviews: 37,
        stock: 4,
        category: "food",
        is_new: true,
        is_featured: false,
        listed: (2026, 5, 10),
        description: "Light roast with cardamom and saffron, 250 g.",
    },
    ProductSeed {
        id: "p7",
        name: "Brass Lantern",
        cents: 7900,
        old_cents: Some(9500),
        store: "s4",
        rating: 4.4,
        reviews: 29,
        stock: 7,
        category: "home",
        is_new: false,
        is_featured: true,
        listed: (2026, 2, 11),
        description: "Pierced brass lantern that casts star patterns.",
    },
    ProductSeed {
        id: "p8",
        name: "Engraved Brass Tea Tray",
        cents: 5200,
        old_cents: None,
        store: "s4",
        rating: 4.1,
        reviews: 12,
        stock: 3,
        category: "home",
        is_new: false,
        is_featured: false,
        listed: (2026, 4, 1),
        description: "Round serving tray, 40 cm, hand engraved.",
    },
    ProductSeed {
        id: "p9",
        name: "Lavender Soap Trio",
        cents: 1400,
        old_cents: None,
        store: "s5",
        rating: 4.6,
        reviews: 95,
        stock: 100,
        category: "beauty",
        is_new: true,
        is_featured: false,
        listed: (2026, 5, 12),
        description: "Three 100 g bars with lavender from the Luberon.",
    },
    ProductSeed {
        id: "p10",
        name: "Olive Oil Body Balm",
        cents: 2150,
        old_cents: None,
        store: "s5",
        rating: 4.3,
        reviews: 22,
        stock: 0,
        category: "beauty",
        is_new: false,
        is_featured: false,
        listed: (2025, 11, 20),
        description: "Rich balm with olive oil and shea butter.",
    },
    ProductSeed {
        id: "p11",
        name: "Leather Pouf",
        cents: 8900,
        old_cents: None,
        store: "s6",
        rating: 4.0,
        reviews: 15,
        stock: 9,
        category: "home",
        is_new: false,
        is_featured: false,
        listed: (2026, 2, 25),
        description: "Hand-stitched goat leather pouf, sold unstuffed.",
    },
    ProductSeed {
        id: "p12",
        name: "Babouche Slippers",
        cents: 3200,
        old_cents: Some(4000),
        store: "s6",
        rating: 4.2,
        reviews: 48,
        stock: 18,
        category: "fashion",
        is_new: true,
        is_featured: true,
        listed: (2026, 5, 8),
        description: "Soft leather slippers with a folded heel.",
    },
    ProductSeed {
        id: "p13",
        name: "Ceramic Serving Bowl",
        cents: 3800,
        old_cents: None,
        store: "s1",
        rating: 4.7,
        reviews: 33,
        stock: 6,
        category: "ceramics",
        is_new: false,
        is_featured: false,
        listed: (2026, 3, 18),
        description: "Wide bowl with a turquoise glaze, 30 cm.",
    },
    ProductSeed {
        id: "p14",
        name: "Cotton Kaftan",
        cents: 5500,
        old_cents: None,
        store: "s2",
        rating: 4.5,
        reviews: 27,
        stock: 11,
        category: "fashion",
        is_new: false,
        is_featured: true,
        listed: (2026, 4, 14),
        description: "Loose-fit kaftan with embroidered neckline.",
    },
    ProductSeed {
        id: "p15",
        name: "Date Syrup",
        cents: 950,
        old_cents: None,
        store: "s3",
        rating: 4.4,
        reviews: 58,
        stock: 80,
        category: "food",
        is_new: false,
        is_featured: false,
        listed: (2026, 1, 30),
        description: "Pure date molasses, 400 g bottle.",
    },
    ProductSeed {
        id: "p16",
        name: "Mint Tea Candle",
        cents: 1900,
        old_cents: None,
        store: "s5",
        rating: 4.3,
        reviews: 19,
        stock: 22,
        category: "home",
        is_new: true,
        is_featured: false,
        listed: (2026, 5, 15),
        description: "Soy wax candle scented with spearmint and green tea.",
    },
];

static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    PRODUCT_SEEDS
        .iter()
        .map(|seed| {
            let (y, m, d) = seed.listed;
            Product {
                id: ProductId::new(seed.id),
                name: seed.name.to_string(),
                price: Decimal::new(seed.cents, 2),
                currency: CurrencyCode::USD,
                store_id: StoreId::new(seed.store),
                store_name: super::stores::store_name(seed.store).to_string(),
                rating: seed.rating,
                review_count: seed.reviews,
                stock: seed.stock,
                category: seed.category.to_string(),
                is_new: seed.is_new,
                is_featured: seed.is_featured,
                old_price: seed.old_cents.map(|c| Decimal::new(c, 2)),
                images: Vec::new(),
                description: Some(seed.description.to_string()),
                created_at: NaiveDate::from_ymd_opt(y, m, d),
            }
        })
        .collect()
});

pub(super) fn count_for_store(store_id: &str) -> u32 {
    let count = PRODUCT_SEEDS.iter().filter(|p| p.store == store_id).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// The full seed catalog, in listing order.
#[must_use]
pub fn all_products() -> &'static [Product] {
    &PRODUCTS
}

#[must_use]
pub fn get_product_by_id(id: &str) -> Option<&'static Product> {
    all_products().iter().find(|p| p.id == id)
}

/// Every product of one store, in catalog order.
#[must_use]
pub fn get_products_by_store(store_id: &str) -> Vec<Product> {
    all_products()
        .iter()
        .filter(|p| p.store_id == store_id)
        .cloned()
        .collect()
}

/// Seed products flagged new, at most `limit`.
#[must_use]
pub fn get_new_arrivals(limit: usize) -> Vec<Product> {
    listing::new_arrivals(all_products(), limit)
}

/// Seed products flagged featured, at most `limit`.
#[must_use]
pub fn get_featured_products(limit: usize) -> Vec<Product> {
    listing::featured_products(all_products(), limit)
}

/// Seed products in the same category as `product`, at most `limit`.
#[must_use]
pub fn get_related_products(product: &Product, limit: usize) -> Vec<Product> {
    listing::related_products(all_products(), product, limit)
}
