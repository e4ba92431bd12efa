//! Derived-view logic shared by the HTTP query layer and the client mirror.
//!
//! The sort key is explicit: `(pinned DESC, created_at DESC)`, i.e. pinned
//! links first, newest first within each group. Both sides of the wire must
//! order identically, so this is the single place the rule lives.

use std::cmp::Reverse;

use uuid::Uuid;

use crate::domain::links::link::Link;

pub fn sort_pinned_first(links: &mut [Link]) {
    links.sort_by_key(|l| (Reverse(l.pinned), Reverse(l.created_at)));
}

/// Case-insensitive substring match against a link title. An empty or
/// whitespace-only term matches everything.
pub fn title_matches(title: &str, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    title.to_lowercase().contains(&term.to_lowercase())
}

pub fn in_category(link: &Link, category_id: Option<Uuid>) -> bool {
    match category_id {
        Some(id) => link.category_id == Some(id),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn link(title: &str, pinned: bool, age_secs: i64) -> Link {
        let now = Utc::now();
        Link {
            id: Uuid::new_v4(),
            title: title.into(),
            url: format!("https://{}.example.com", title.to_lowercase()),
            description: None,
            category_id: None,
            category_name: None,
            pinned,
            created_at: now - Duration::seconds(age_secs),
            updated_at: now,
        }
    }

    #[test]
    fn pinned_links_come_first_newest_within_group() {
        let mut links = vec![
            link("old-unpinned", false, 300),
            link("new-pinned", true, 10),
            link("new-unpinned", false, 20),
            link("old-pinned", true, 200),
        ];
        sort_pinned_first(&mut links);
        let titles: Vec<&str> = links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["new-pinned", "old-pinned", "new-unpinned", "old-unpinned"]
        );
    }

    #[test]
    fn sort_is_stable_under_repeated_application() {
        let mut links = vec![
            link("a", true, 50),
            link("b", false, 40),
            link("c", true, 30),
        ];
        sort_pinned_first(&mut links);
        let once: Vec<Uuid> = links.iter().map(|l| l.id).collect();
        sort_pinned_first(&mut links);
        let twice: Vec<Uuid> = links.iter().map(|l| l.id).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn title_match_is_case_insensitive_substring() {
        assert!(title_matches("Google", "google"));
        assert!(title_matches("Google", "OOG"));
        assert!(!title_matches("Bing", "google"));
    }

    #[test]
    fn empty_or_whitespace_term_matches_all() {
        assert!(title_matches("anything", ""));
        assert!(title_matches("anything", "   "));
    }

    #[test]
    fn like_metacharacters_in_the_term_are_literal() {
        assert!(title_matches("Deals: 50% off", "50%"));
        assert!(!title_matches("Deals: 500 off", "50%"));
        assert!(title_matches("snake_case naming", "e_c"));
        assert!(!title_matches("sneaky case naming", "e_c"));
    }

    #[test]
    fn category_filter_matches_only_members() {
        let id = Uuid::new_v4();
        let mut member = link("member", false, 0);
        member.category_id = Some(id);
        let stray = link("stray", false, 0);

        assert!(in_category(&member, Some(id)));
        assert!(!in_category(&stray, Some(id)));
        assert!(in_category(&stray, None));
    }
}
