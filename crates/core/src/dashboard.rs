//! Seller and admin dashboard metrics.
//!
//! Stat cards and chart series are derived from plain order, product, and
//! store lists so the same code serves mock data and backend rows. Money is
//! summed in a single reporting currency; each order total is converted at
//! the reference rates first.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::{Account, Order, Product, Store};
use crate::types::{CurrencyCode, OrderStatus};

/// Number of months shown on the revenue chart.
pub const REVENUE_MONTHS: usize = 6;

/// Stat cards on the seller dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerStats {
    /// Sum of order totals in the reporting currency, cancelled orders excluded.
    pub revenue: Decimal,
    pub orders: usize,
    pub pending: usize,
    pub products: usize,
    /// Mean product rating, `0.0` for an empty catalog.
    pub average_rating: f32,
}

impl SellerStats {
    #[must_use]
    pub fn compute(orders: &[Order], products: &[Product], currency: CurrencyCode) -> Self {
        let revenue = billable_total(orders.iter(), currency);
        let pending = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count();

        #[allow(clippy::cast_precision_loss)]
        let average_rating = if products.is_empty() {
            0.0
        } else {
            products.iter().map(|p| p.rating).sum::<f32>() / products.len() as f32
        };

        Self {
            revenue,
            orders: orders.len(),
            pending,
            products: products.len(),
            average_rating,
        }
    }
}

/// Stat cards on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminStats {
    pub stores: usize,
    pub verified_stores: usize,
    pub users: usize,
    pub orders: usize,
    /// Gross merchandise value: billable order totals across every store, in
    /// the reporting currency.
    pub gmv: Decimal,
}

impl AdminStats {
    #[must_use]
    pub fn compute(
        stores: &[Store],
        accounts: &[Account],
        orders: &[Order],
        currency: CurrencyCode,
    ) -> Self {
        Self {
            stores: stores.len(),
            verified_stores: stores.iter().filter(|s| s.verified).count(),
            users: accounts.len(),
            orders: orders.len(),
            gmv: billable_total(orders.iter(), currency),
        }
    }
}

fn billable_total<'a>(orders: impl Iterator<Item = &'a Order>, currency: CurrencyCode) -> Decimal {
    orders
        .filter(|o| o.status.is_billable())
        .map(|o| o.total_in(currency))
        .sum()
}

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: String,
    pub value: Decimal,
}

/// A labelled series, rendered as CSS bars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
}

/// A point scaled for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: Decimal,
    /// Height as a percentage of the largest value, 0 to 100.
    pub percent: u8,
}

impl ChartSeries {
    #[must_use]
    pub fn max(&self) -> Decimal {
        self.points
            .iter()
            .map(|p| p.value)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Scale every point against the maximum. An all-zero series yields
    /// zero-height bars.
    #[must_use]
    pub fn bars(&self) -> Vec<Bar> {
        let max = self.max();
        self.points
            .iter()
            .map(|p| {
                let percent = if max > Decimal::ZERO {
                    (p.value * Decimal::ONE_HUNDRED / max)
                        .round()
                        .to_u8()
                        .unwrap_or(0)
                        .min(100)
                } else {
                    0
                };
                Bar {
                    label: p.label.clone(),
                    value: p.value,
                    percent,
                }
            })
            .collect()
    }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn previous_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Billable revenue per calendar month for the `months` months ending with
/// the month of `anchor`, oldest first. Months without orders are included
/// with a zero value. Labels are `"Jan 2026"` style. Values are in `currency`.
#[must_use]
pub fn monthly_revenue(
    orders: &[Order],
    anchor: NaiveDate,
    months: usize,
    currency: CurrencyCode,
) -> ChartSeries {
    let mut starts = Vec::with_capacity(months);
    let mut cursor = month_start(anchor);
    for _ in 0..months {
        starts.push(cursor);
        cursor = previous_month(cursor);
    }
    starts.reverse();

    let points = starts
        .into_iter()
        .map(|start| {
            let value = billable_total(
                orders.iter().filter(|o| month_start(o.date) == start),
                currency,
            );
            ChartPoint {
                label: start.format("%b %Y").to_string(),
                value,
            }
        })
        .collect();

    ChartSeries { points }
}

/// The most recent order date, used to anchor the revenue chart.
#[must_use]
pub fn latest_order_date(orders: &[Order]) -> Option<NaiveDate> {
    orders.iter().map(|o| o.date).max()
}

/// Order counts per status, in lifecycle order. Statuses with no orders are
/// included with a zero count.
#[must_use]
pub fn status_breakdown(orders: &[Order]) -> ChartSeries {
    let points = OrderStatus::ALL
        .into_iter()
        .map(|status| ChartPoint {
            label: status.as_str().to_string(),
            value: Decimal::from(orders.iter().filter(|o| o.status == status).count()),
        })
        .collect();
    ChartSeries { points }
}

/// The `n` most recent orders, newest first.
#[must_use]
pub fn recent_orders(orders: &[Order], n: usize) -> Vec<Order> {
    let mut sorted = orders.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(id: &str, cents: i64, currency: CurrencyCode, status: OrderStatus) -> Order {
        Order {
            id: crate::OrderId::new(id),
            date: date(2026, 4, 10),
            status,
            currency,
            items: vec![crate::models::OrderItem {
                id: crate::ProductId::new("p1"),
                name: "Tagine".to_string(),
                price: Decimal::new(cents, 2),
                quantity: 1,
                image: None,
            }],
            user_id: None,
            customer_name: None,
            customer_email: None,
            store_id: None,
            store_name: None,
            shipping: None,
            payment: None,
        }
    }

    fn mixed_orders() -> Vec<Order> {
        vec![
            order("o-1", 6450, CurrencyCode::USD, OrderStatus::Delivered),
            // 75 SAR is 20 USD at the reference rate
            order("o-2", 7500, CurrencyCode::SAR, OrderStatus::Shipped),
            order("o-3", 9900, CurrencyCode::EUR, OrderStatus::Cancelled),
        ]
    }

    #[test]
    fn test_seller_revenue_excludes_cancelled() {
        let orders = mock::seller_orders("s1");
        let products = mock::get_products_by_store("s1");
        let stats = SellerStats::compute(&orders, &products, CurrencyCode::USD);

        let expected: Decimal = orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .map(|o| o.total_in(CurrencyCode::USD))
            .sum();
        assert_eq!(stats.revenue, expected);
        assert_eq!(stats.orders, orders.len());
        assert_eq!(stats.products, 3);
        assert!(stats.pending >= 1);
        assert!(stats.average_rating > 4.0);
    }

    #[test]
    fn test_revenue_converts_mixed_currencies() {
        let orders = mixed_orders();

        let usd = SellerStats::compute(&orders, &[], CurrencyCode::USD);
        assert_eq!(usd.revenue, Decimal::new(8450, 2));

        // 64.50 USD is 241.88 SAR after rounding
        let sar = SellerStats::compute(&orders, &[], CurrencyCode::SAR);
        assert_eq!(sar.revenue, Decimal::new(31688, 2));

        let admin = AdminStats::compute(&[], &[], &orders, CurrencyCode::USD);
        assert_eq!(admin.gmv, Decimal::new(8450, 2));

        let series = monthly_revenue(&orders, date(2026, 4, 30), 2, CurrencyCode::USD);
        assert_eq!(series.total(), Decimal::new(8450, 2));
    }

    #[test]
    fn test_seller_stats_empty() {
        let stats = SellerStats::compute(&[], &[], CurrencyCode::USD);
        assert_eq!(stats.revenue, Decimal::ZERO);
        assert!(stats.average_rating.abs() < f32::EPSILON);
    }

    #[test]
    fn test_admin_stats_counts() {
        let stats = AdminStats::compute(
            mock::all_stores(),
            mock::accounts(),
            mock::all_orders(),
            CurrencyCode::USD,
        );
        assert_eq!(stats.stores, mock::all_stores().len());
        assert!(stats.verified_stores < stats.stores);
        assert_eq!(stats.users, mock::accounts().len());
        assert!(stats.gmv > Decimal::ZERO);
    }

    #[test]
    fn test_monthly_revenue_includes_empty_months() {
        let orders = mock::seller_orders("s1");
        let series = monthly_revenue(&orders, date(2026, 5, 20), REVENUE_MONTHS, CurrencyCode::USD);
        let labels: Vec<_> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Dec 2025", "Jan 2026", "Feb 2026", "Mar 2026", "Apr 2026", "May 2026"]
        );

        // A window with no sales at all still has every month
        let empty = monthly_revenue(&orders, date(2020, 3, 1), 3, CurrencyCode::USD);
        assert_eq!(empty.points.len(), 3);
        assert_eq!(empty.total(), Decimal::ZERO);
        assert_eq!(empty.points[0].label, "Jan 2020");
    }

    #[test]
    fn test_monthly_revenue_wraps_year() {
        let series = monthly_revenue(&[], date(2026, 2, 14), 3, CurrencyCode::USD);
        let labels: Vec<_> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Dec 2025", "Jan 2026", "Feb 2026"]);
    }

    #[test]
    fn test_status_breakdown_counts_every_status() {
        let orders = mock::buyer_orders("u-buyer");
        let series = status_breakdown(&orders);
        assert_eq!(series.points.len(), OrderStatus::ALL.len());
        assert_eq!(series.total(), Decimal::from(orders.len()));
        let delivered = series
            .points
            .iter()
            .find(|p| p.label == "delivered")
            .unwrap();
        assert_eq!(delivered.value, Decimal::from(2));
    }

    #[test]
    fn test_bars_are_percentages_of_max() {
        let series = ChartSeries {
            points: vec![
                ChartPoint {
                    label: "a".to_string(),
                    value: Decimal::from(50),
                },
                ChartPoint {
                    label: "b".to_string(),
                    value: Decimal::from(200),
                },
                ChartPoint {
                    label: "c".to_string(),
                    value: Decimal::ZERO,
                },
            ],
        };
        let percents: Vec<_> = series.bars().iter().map(|b| b.percent).collect();
        assert_eq!(percents, [25, 100, 0]);

        assert!(ChartSeries::default().bars().is_empty());
    }

    #[test]
    fn test_recent_orders_newest_first() {
        let recent = recent_orders(mock::all_orders(), 3);
        assert_eq!(recent.len(), 3);
        assert!(recent.windows(2).all(|w| w[0].date >= w[1].date));
        assert_eq!(
            latest_order_date(mock::all_orders()),
            Some(recent[0].date)
        );
    }
}
