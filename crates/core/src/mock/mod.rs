//! Static seed data for demo mode and offline development.
//!
//! Every page of the storefront renders from these tables when no hosted
//! backend is configured, and falls back to them when a backend query comes
//! back empty. The tables are built once, on first use, from `const` seed
//! rows.
//!
//! Seed ids are short strings (`"p1"`, `"s1"`, `"o-1001"`) and are stable
//! across releases; tests and links rely on them.

mod messages;
mod orders;
mod products;
mod stores;
mod users;

pub use messages::{conversations, conversations_for};
pub use orders::{all_orders, buyer_orders, seller_orders};
pub use products::{
    all_products, get_featured_products, get_new_arrivals, get_product_by_id,
    get_products_by_store, get_related_products,
};
pub use stores::{all_stores, get_featured_stores, get_store_by_id};
pub use users::{DEMO_PASSWORD, accounts, find_seeded_user, seeded_users};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{OrderStatus, Role};

    #[test]
    fn test_products_by_store_preserves_order() {
        let ids: Vec<_> = get_products_by_store("s1")
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(ids, ["p1", "p2", "p13"]);

        let expected: Vec<_> = all_products()
            .iter()
            .filter(|p| p.store_id == "s1")
            .cloned()
            .collect();
        assert_eq!(get_products_by_store("s1"), expected);
        assert!(get_products_by_store("missing").is_empty());
    }

    #[test]
    fn test_new_arrivals_respects_limit() {
        let two = get_new_arrivals(2);
        assert!(two.len() <= 2);
        assert!(two.iter().all(|p| p.is_new));

        let all_new = get_new_arrivals(usize::MAX);
        assert_eq!(
            all_new.len(),
            all_products().iter().filter(|p| p.is_new).count()
        );
        assert!(get_new_arrivals(0).is_empty());
    }

    #[test]
    fn test_featured_products_and_stores() {
        assert!(get_featured_products(4).iter().all(|p| p.is_featured));
        assert!(get_featured_products(4).len() <= 4);
        assert!(get_featured_stores(10).iter().all(|s| s.featured));
    }

    #[test]
    fn test_related_products_exclude_self() {
        let tagine = get_product_by_id("p1").unwrap();
        let related = get_related_products(tagine, 10);
        assert!(!related.is_empty());
        assert!(related.iter().all(|p| p.id != tagine.id));
        assert!(related.iter().all(|p| p.category == tagine.category));
    }

    #[test]
    fn test_every_product_references_a_store() {
        for product in all_products() {
            let store = get_store_by_id(product.store_id.as_str()).unwrap();
            assert_eq!(store.name, product.store_name);
        }
    }

    #[test]
    fn test_store_product_counts_match_catalog() {
        for store in all_stores() {
            let count = get_products_by_store(store.id.as_str()).len();
            assert_eq!(store.product_count as usize, count, "{}", store.id);
        }
    }

    #[test]
    fn test_orders_split_by_party() {
        let mine = buyer_orders("u-buyer");
        assert_eq!(mine.len(), 5);
        assert!(mine.iter().any(|o| o.status == OrderStatus::Cancelled));

        let sales = seller_orders("s1");
        assert!(sales.iter().all(|o| o.store_id.as_ref().unwrap() == "s1"));
        // o-1003 was bought from s1 by the demo buyer
        assert!(sales.iter().any(|o| o.id == "o-1003"));

        let order = all_orders().iter().find(|o| o.id == "o-1002").unwrap();
        assert!(!order.items.is_empty());
        assert!(order.total() > order.subtotal());
    }

    #[test]
    fn test_conversations_visible_to_both_sides() {
        assert_eq!(conversations_for("u-buyer", None).len(), 3);
        let seller_view = conversations_for("u-seller", Some("s1"));
        assert_eq!(seller_view.len(), 1);
        assert_eq!(seller_view[0].id, "c1");
        let c2 = conversations().iter().find(|c| c.id == "c2").unwrap();
        assert_eq!(c2.messages.len(), 3);
    }

    #[test]
    fn test_seeded_users_cover_every_role() {
        let roles: Vec<_> = seeded_users().iter().map(|u| u.role).collect();
        assert_eq!(roles, [Role::Buyer, Role::Seller, Role::Admin]);

        let seller = find_seeded_user(" Seller@Souq.test ").unwrap();
        assert_eq!(seller.store_id.as_ref().unwrap(), "s1");
        assert!(find_seeded_user("nobody@souq.test").is_none());
        assert!(accounts().len() > seeded_users().len());
    }
}
