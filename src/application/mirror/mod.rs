//! Client-side state mirror.
//!
//! Holds a local copy of the categories and links fetched from the API and
//! reconciles it from mutation responses (append/replace/remove by id) rather
//! than recomputing independently, so it cannot drift from the authoritative
//! store. Filtering and ordering of the visible list are recomputed on every
//! call from the mirrored collections, through the same `domain::links::view`
//! functions the server queries use.

use uuid::Uuid;

use crate::domain::categories::category::Category;
use crate::domain::links::link::Link;
use crate::domain::links::view;

#[derive(Debug, Default)]
pub struct Mirror {
    categories: Vec<Category>,
    links: Vec<Link>,
}

impl Mirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Full refresh from a list response.
    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn replace_links(&mut self, links: Vec<Link>) {
        self.links = links;
    }

    /// Reconcile one category from a create/update response.
    pub fn upsert_category(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }

    /// Reconcile one link from a create/update/toggle response.
    pub fn upsert_link(&mut self, link: Link) {
        match self.links.iter_mut().find(|l| l.id == link.id) {
            Some(existing) => *existing = link,
            None => self.links.push(link),
        }
    }

    pub fn remove_link(&mut self, id: Uuid) {
        self.links.retain(|l| l.id != id);
    }

    /// Removes the category and severs local references, mirroring the
    /// server-side cascade so the mirror stays consistent without a refetch.
    pub fn remove_category(&mut self, id: Uuid) {
        self.categories.retain(|c| c.id != id);
        for link in &mut self.links {
            if link.category_id == Some(id) {
                link.category_id = None;
                link.category_name = None;
            }
        }
    }

    /// The list the UI renders: restricted to the selected category, matched
    /// against the search term, pinned links first.
    pub fn visible_links(&self, selected_category: Option<Uuid>, search_term: &str) -> Vec<Link> {
        let mut out: Vec<Link> = self
            .links
            .iter()
            .filter(|l| view::in_category(l, selected_category))
            .filter(|l| view::title_matches(&l.title, search_term))
            .cloned()
            .collect();
        view::sort_pinned_first(&mut out);
        out
    }

    pub fn pinned_links(&self) -> Vec<Link> {
        let mut out: Vec<Link> = self.links.iter().filter(|l| l.pinned).cloned().collect();
        view::sort_pinned_first(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn link(title: &str, pinned: bool, category_id: Option<Uuid>, age_secs: i64) -> Link {
        let now = Utc::now();
        Link {
            id: Uuid::new_v4(),
            title: title.into(),
            url: format!("https://{}.example.com", title.to_lowercase()),
            description: None,
            category_id,
            category_name: None,
            pinned,
            created_at: now - Duration::seconds(age_secs),
            updated_at: now,
        }
    }

    fn category(name: &str) -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            created_at: now,
            updated_at: now,
            links_count: 0,
        }
    }

    #[test]
    fn upsert_replaces_by_id_instead_of_duplicating() {
        let mut mirror = Mirror::new();
        let mut l = link("Google", false, None, 0);
        mirror.upsert_link(l.clone());
        l.pinned = true;
        mirror.upsert_link(l.clone());

        assert_eq!(mirror.links().len(), 1);
        assert!(mirror.links()[0].pinned);
    }

    #[test]
    fn removing_a_category_detaches_mirrored_links() {
        let mut mirror = Mirror::new();
        let work = category("Work");
        let mut member = link("Docs", false, Some(work.id), 0);
        member.category_name = Some("Work".into());
        mirror.upsert_category(work.clone());
        mirror.upsert_link(member);
        mirror.upsert_link(link("Loose", false, None, 10));

        mirror.remove_category(work.id);

        assert!(mirror.categories().is_empty());
        assert_eq!(mirror.links().len(), 2);
        assert!(mirror.links().iter().all(|l| l.category_id.is_none()));
    }

    #[test]
    fn visible_links_filters_and_orders_like_the_server() {
        let mut mirror = Mirror::new();
        let work = category("Work");
        mirror.upsert_category(work.clone());
        mirror.upsert_link(link("Older pinned", true, Some(work.id), 100));
        mirror.upsert_link(link("Newer plain", false, Some(work.id), 10));
        mirror.upsert_link(link("Elsewhere", true, None, 5));

        let visible = mirror.visible_links(Some(work.id), "");
        let titles: Vec<&str> = visible.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Older pinned", "Newer plain"]);

        let searched = mirror.visible_links(Some(work.id), "NEWER");
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].title, "Newer plain");
    }

    #[test]
    fn pinned_view_ignores_unpinned_links() {
        let mut mirror = Mirror::new();
        mirror.upsert_link(link("a", true, None, 30));
        mirror.upsert_link(link("b", false, None, 20));
        mirror.upsert_link(link("c", true, None, 10));

        let pinned = mirror.pinned_links();
        let titles: Vec<&str> = pinned.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a"]);
    }
}
