//! Client-side list handling for tables fed by full server lists
//!
//! The backend returns whole lists for facilities and users; searching,
//! ranking and paging happen here.

mod page;

use std::cmp::Ordering;

use ecotrack_domain::{CategoryTotal, Facility, TenantUser};

pub use page::Page;

/// Facilities whose name contains `query`, ignoring case
///
/// A blank query keeps every facility.
pub fn filter_facilities(facilities: &[Facility], query: &str) -> Vec<Facility> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return facilities.to_vec();
    }
    facilities.iter().filter(|f| f.name.to_lowercase().contains(&needle)).cloned().collect()
}

/// Users whose email or role contains `query`, ignoring case
pub fn filter_users(users: &[TenantUser], query: &str) -> Vec<TenantUser> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return users.to_vec();
    }
    users
        .iter()
        .filter(|u| {
            u.email.to_lowercase().contains(&needle) || u.role.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Sort category totals by emissions, largest first
pub fn sort_by_co2e(totals: &mut [CategoryTotal]) {
    totals.sort_by(|a, b| b.co2e_kg.partial_cmp(&a.co2e_kg).unwrap_or(Ordering::Equal));
}

/// The `limit` largest category totals
pub fn top_categories(totals: &[CategoryTotal], limit: usize) -> Vec<CategoryTotal> {
    let mut sorted = totals.to_vec();
    sort_by_co2e(&mut sorted);
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(id: i64, name: &str) -> Facility {
        Facility { id, name: name.to_string(), country: None, grid_region: None }
    }

    fn user(id: i64, email: &str, role: &str) -> TenantUser {
        TenantUser { id, email: email.to_string(), role: role.to_string(), is_active: true }
    }

    fn total(category: &str, co2e_kg: f64) -> CategoryTotal {
        CategoryTotal { category: category.to_string(), co2e_kg }
    }

    #[test]
    fn facility_search_is_case_insensitive() {
        let facilities = vec![facility(1, "Berlin Plant"), facility(2, "Lyon Depot")];

        let hits = filter_facilities(&facilities, "PLANT");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        assert_eq!(filter_facilities(&facilities, "  ").len(), 2);
    }

    #[test]
    fn user_search_matches_email_or_role() {
        let users = vec![user(1, "ana@acme.io", "admin"), user(2, "bo@acme.io", "viewer")];

        assert_eq!(filter_users(&users, "ADMIN").len(), 1);
        assert_eq!(filter_users(&users, "bo@").len(), 1);
        assert_eq!(filter_users(&users, "acme").len(), 2);
        assert!(filter_users(&users, "owner").is_empty());
    }

    #[test]
    fn top_categories_are_ranked() {
        let totals = vec![total("travel", 5.0), total("electricity", 120.0), total("fuel", 40.0)];

        let top = top_categories(&totals, 2);
        assert_eq!(
            top.iter().map(|t| t.category.as_str()).collect::<Vec<_>>(),
            vec!["electricity", "fuel"]
        );
    }

    #[test]
    fn filtered_list_pages_by_ten() {
        let facilities: Vec<Facility> =
            (1..=23).map(|i| facility(i, &format!("Site {i}"))).collect();

        let page = Page::from_items(filter_facilities(&facilities, "site"), 2, 10);
        assert_eq!(page.total_items, 23);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.first().map(|f| f.id), Some(11));
    }
}
