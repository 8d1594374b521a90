//! Seed stores.

use std::sync::LazyLock;

use chrono::NaiveDate;

use crate::listing;
use crate::models::{Store, StoreContact};
use crate::types::{StoreId, UserId};

struct StoreSeed {
    id: &'static str,
    name: &'static str,
    country: &'static str,
    rating: f32,
    reviews: u32,
    verified: bool,
    featured: bool,
    owner: Option<&'static str>,
    opened: (i32, u32, u32),
    description: &'static str,
    email: &'static str,
    phone: &'static str,
    address: &'static str,
}

const STORE_SEEDS: &[StoreSeed] = &[
    StoreSeed {
        id: "s1",
        name: "Atlas Pottery",
        country: "MA",
        rating: 4.8,
        reviews: 312,
        verified: true,
        featured: true,
        owner: Some("u-seller"),
        opened: (2023, 3, 14),
        description: "Hand-thrown and hand-painted ceramics from Safi workshops.",
        email: "hello@atlaspottery.ma",
        phone: "+212 524 000 111",
        address: "Rue des Potiers 12, Safi",
    },
    StoreSeed {
        id: "s2",
        name: "Nile Cotton Co.",
        country: "EG",
        rating: 4.6,
        reviews: 198,
        verified: true,
        featured: true,
        owner: None,
        opened: (2022, 9, 1),
        description: "Long-staple Egyptian cotton towels, linens, and apparel.",
        email: "care@nilecotton.eg",
        phone: "+20 2 0000 2222",
        address: "26th of July St 40, Cairo",
    },
    StoreSeed {
        id: "s3",
        name: "Riyadh Date House",
        country: "SA",
        rating: 4.7,
        reviews: 254,
        verified: true,
        featured: false,
        owner: None,
        opened: (2023, 11, 20),
        description: "Premium dates, date syrup, and Saudi coffee.",
        email: "orders@riyadhdates.sa",
        phone: "+966 11 000 3333",
        address: "King Fahd Rd 88, Riyadh",
    },
    StoreSeed {
        id: "s4",
        name: "Dubai Brass Works",
        country: "AE",
        rating: 4.3,
        reviews: 87,
        verified: false,
        featured: true,
        owner: None,
        opened: (2024, 6, 5),
        description: "Engraved brass lanterns, trays, and home accents.",
        email: "studio@dubaibrass.ae",
        phone: "+971 4 000 4444",
        address: "Al Fahidi, Bur Dubai",
    },
    StoreSeed {
        id: "s5",
        name: "Provence Savonnerie",
        country: "FR",
        rating: 4.5,
        reviews: 143,
        verified: true,
        featured: false,
        owner: None,
        opened: (2021, 4, 18),
        description: "Cold-process soaps and balms made with Provençal oils.",
        email: "bonjour@savonnerie.fr",
        phone: "+33 4 00 00 55 55",
        address: "Place aux Herbes 3, Uzès",
    },
    StoreSeed {
        id: "s6",
        name: "Medina Leather",
        country: "MA",
        rating: 4.1,
        reviews: 64,
        verified: false,
        featured: false,
        owner: None,
        opened: (2024, 12, 2),
        description: "Tanned in Fes: poufs, babouches, and bags.",
        email: "contact@medinaleather.ma",
        phone: "+212 535 000 666",
        address: "Chouara Tannery Lane, Fes",
    },
];

static STORES: LazyLock<Vec<Store>> = LazyLock::new(|| {
    STORE_SEEDS
        .iter()
        .map(|seed| {
            let (y, m, d) = seed.opened;
            Store {
                id: StoreId::new(seed.id),
                name: seed.name.to_string(),
                logo: None,
                cover: None,
                country: seed.country.to_string(),
                rating: seed.rating,
                review_count: seed.reviews,
                product_count: super::products::count_for_store(seed.id),
                verified: seed.verified,
                featured: seed.featured,
                description: Some(seed.description.to_string()),
                contact: StoreContact {
                    email: Some(seed.email.to_string()),
                    phone: Some(seed.phone.to_string()),
                    address: Some(seed.address.to_string()),
                },
                owner_id: seed.owner.map(UserId::new),
                created_at: NaiveDate::from_ymd_opt(y, m, d),
            }
        })
        .collect()
});

/// Every seed store, in directory order.
#[must_use]
pub fn all_stores() -> &'static [Store] {
    &STORES
}

/// Name of a seed store, or an empty string for unknown ids.
pub(super) fn store_name(id: &str) -> &'static str {
    STORE_SEEDS
        .iter()
        .find(|s| s.id == id)
        .map_or("", |s| s.name)
}

#[must_use]
pub fn get_store_by_id(id: &str) -> Option<&'static Store> {
    all_stores().iter().find(|s| s.id == id)
}

/// Featured seed stores, at most `limit`.
#[must_use]
pub fn get_featured_stores(limit: usize) -> Vec<Store> {
    listing::featured_stores(all_stores(), limit)
}
