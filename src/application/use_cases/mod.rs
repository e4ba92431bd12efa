pub mod categories;
pub mod errors;
pub mod links;

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use crate::application::error::AppError;
    use crate::application::ports::category_repository::CategoryRepository;
    use crate::application::ports::link_repository::{
        LinkCounts, LinkPatch, LinkRepository, NewLink,
    };
    use crate::application::use_cases::categories::create_category::CreateCategory;
    use crate::application::use_cases::categories::delete_category::DeleteCategory;
    use crate::application::use_cases::categories::update_category::UpdateCategory;
    use crate::application::use_cases::links::create_link::CreateLink;
    use crate::application::use_cases::links::delete_link::DeleteLink;
    use crate::application::use_cases::links::link_stats::LinkStats;
    use crate::application::use_cases::links::list_links::ListLinks;
    use crate::application::use_cases::links::search_links::SearchLinks;
    use crate::application::use_cases::links::toggle_pin::TogglePin;
    use crate::application::use_cases::links::update_link::UpdateLink;
    use crate::domain::categories::category::Category;
    use crate::domain::links::link::Link;
    use crate::domain::links::view;

    /// Both repository ports over one shared in-memory table pair, so the
    /// category cascade is observable through the link port.
    #[derive(Default)]
    struct InMemoryStore {
        categories: Mutex<Vec<Category>>,
        links: Mutex<Vec<Link>>,
        clock: AtomicI64,
    }

    impl InMemoryStore {
        fn now(&self) -> chrono::DateTime<chrono::Utc> {
            let tick = self.clock.fetch_add(1, Ordering::SeqCst);
            Utc::now() + Duration::milliseconds(tick)
        }

        fn category_name(&self, id: Option<Uuid>) -> Option<String> {
            let id = id?;
            self.categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
        }
    }

    #[async_trait]
    impl CategoryRepository for InMemoryStore {
        async fn list(&self) -> anyhow::Result<Vec<Category>> {
            let links = self.links.lock().unwrap();
            let mut out: Vec<Category> = self
                .categories
                .lock()
                .unwrap()
                .iter()
                .cloned()
                .map(|mut c| {
                    c.links_count = links
                        .iter()
                        .filter(|l| l.category_id == Some(c.id))
                        .count() as i64;
                    c
                })
                .collect();
            out.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(out)
        }

        async fn get(&self, id: Uuid) -> anyhow::Result<Option<Category>> {
            Ok(CategoryRepository::list(self)
                .await?
                .into_iter()
                .find(|c| c.id == id))
        }

        async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Category>> {
            Ok(CategoryRepository::list(self)
                .await?
                .into_iter()
                .find(|c| c.name == name))
        }

        async fn insert(
            &self,
            name: &str,
            description: Option<&str>,
        ) -> anyhow::Result<Category> {
            let now = self.now();
            let category = Category {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: description.map(str::to_string),
                created_at: now,
                updated_at: now,
                links_count: 0,
            };
            self.categories.lock().unwrap().push(category.clone());
            Ok(category)
        }

        async fn update(
            &self,
            id: Uuid,
            name: Option<String>,
            description: Option<String>,
        ) -> anyhow::Result<Option<Category>> {
            let now = self.now();
            let mut categories = self.categories.lock().unwrap();
            let Some(cat) = categories.iter_mut().find(|c| c.id == id) else {
                return Ok(None);
            };
            if let Some(n) = name {
                cat.name = n;
            }
            if let Some(d) = description {
                cat.description = Some(d);
            }
            cat.updated_at = now;
            Ok(Some(cat.clone()))
        }

        async fn delete_and_detach(&self, id: Uuid) -> anyhow::Result<bool> {
            let mut categories = self.categories.lock().unwrap();
            let before = categories.len();
            categories.retain(|c| c.id != id);
            if categories.len() == before {
                return Ok(false);
            }
            for link in self.links.lock().unwrap().iter_mut() {
                if link.category_id == Some(id) {
                    link.category_id = None;
                    link.category_name = None;
                }
            }
            Ok(true)
        }

        async fn exists(&self, id: Uuid) -> anyhow::Result<bool> {
            Ok(self.categories.lock().unwrap().iter().any(|c| c.id == id))
        }
    }

    #[async_trait]
    impl LinkRepository for InMemoryStore {
        async fn list(&self, category_id: Option<Uuid>) -> anyhow::Result<Vec<Link>> {
            let mut out: Vec<Link> = self
                .links
                .lock()
                .unwrap()
                .iter()
                .filter(|l| view::in_category(l, category_id))
                .cloned()
                .collect();
            view::sort_pinned_first(&mut out);
            Ok(out)
        }

        async fn get(&self, id: Uuid) -> anyhow::Result<Option<Link>> {
            Ok(self.links.lock().unwrap().iter().find(|l| l.id == id).cloned())
        }

        async fn find_by_url(&self, url: &str) -> anyhow::Result<Option<Link>> {
            Ok(self
                .links
                .lock()
                .unwrap()
                .iter()
                .find(|l| l.url == url)
                .cloned())
        }

        async fn insert(&self, link: NewLink) -> anyhow::Result<Link> {
            let now = self.now();
            let stored = Link {
                id: Uuid::new_v4(),
                title: link.title,
                url: link.url,
                description: link.description,
                category_name: self.category_name(link.category_id),
                category_id: link.category_id,
                pinned: link.pinned,
                created_at: now,
                updated_at: now,
            };
            self.links.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn update(&self, id: Uuid, patch: LinkPatch) -> anyhow::Result<Option<Link>> {
            let now = self.now();
            let category_name = match patch.category_id {
                Some(cid) => Some(self.category_name(cid)),
                None => None,
            };
            let mut links = self.links.lock().unwrap();
            let Some(link) = links.iter_mut().find(|l| l.id == id) else {
                return Ok(None);
            };
            if let Some(t) = patch.title {
                link.title = t;
            }
            if let Some(u) = patch.url {
                link.url = u;
            }
            if let Some(d) = patch.description {
                link.description = Some(d);
            }
            if let Some(cid) = patch.category_id {
                link.category_id = cid;
                link.category_name = category_name.flatten();
            }
            if let Some(p) = patch.pinned {
                link.pinned = p;
            }
            link.updated_at = now;
            Ok(Some(link.clone()))
        }

        async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
            let mut links = self.links.lock().unwrap();
            let before = links.len();
            links.retain(|l| l.id != id);
            Ok(links.len() != before)
        }

        async fn set_pinned(&self, id: Uuid, pinned: bool) -> anyhow::Result<Option<Link>> {
            let now = self.now();
            let mut links = self.links.lock().unwrap();
            let Some(link) = links.iter_mut().find(|l| l.id == id) else {
                return Ok(None);
            };
            link.pinned = pinned;
            link.updated_at = now;
            Ok(Some(link.clone()))
        }

        async fn search_by_title(&self, term: &str) -> anyhow::Result<Vec<Link>> {
            let mut out: Vec<Link> = self
                .links
                .lock()
                .unwrap()
                .iter()
                .filter(|l| view::title_matches(&l.title, term))
                .cloned()
                .collect();
            view::sort_pinned_first(&mut out);
            Ok(out)
        }

        async fn pinned(&self) -> anyhow::Result<Vec<Link>> {
            let mut out: Vec<Link> = self
                .links
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.pinned)
                .cloned()
                .collect();
            view::sort_pinned_first(&mut out);
            Ok(out)
        }

        async fn counts(&self) -> anyhow::Result<LinkCounts> {
            let links = self.links.lock().unwrap();
            let links_per_category = self
                .categories
                .lock()
                .unwrap()
                .iter()
                .map(|c| {
                    let n = links
                        .iter()
                        .filter(|l| l.category_id == Some(c.id))
                        .count() as i64;
                    (c.name.clone(), n)
                })
                .collect();
            Ok(LinkCounts {
                total_links: links.len() as i64,
                pinned_links: links.iter().filter(|l| l.pinned).count() as i64,
                uncategorized_links: links
                    .iter()
                    .filter(|l| l.category_id.is_none())
                    .count() as i64,
                links_per_category,
            })
        }
    }

    fn new_link(title: &str, url: &str, category_id: Option<Uuid>, pinned: bool) -> NewLink {
        NewLink {
            title: title.into(),
            url: url.into(),
            description: None,
            category_id,
            pinned,
        }
    }

    #[tokio::test]
    async fn toggle_pin_round_trip_preserves_other_fields() {
        let store = InMemoryStore::default();
        let created = CreateLink { links: &store, categories: &store }
            .execute(new_link("Google", "https://google.com", None, false))
            .await
            .unwrap();

        let toggle = TogglePin { repo: &store };
        toggle.execute(created.id, true).await.unwrap();
        let back = toggle.execute(created.id, false).await.unwrap();

        assert!(!back.pinned);
        assert_eq!(back.title, created.title);
        assert_eq!(back.url, created.url);
        assert_eq!(back.description, created.description);
        assert_eq!(back.category_id, created.category_id);
        assert_eq!(back.created_at, created.created_at);
    }

    #[tokio::test]
    async fn deleting_category_detaches_links_without_deleting_them() {
        let store = InMemoryStore::default();
        let work = CreateCategory { repo: &store }
            .execute("Work", None)
            .await
            .unwrap();
        let link = CreateLink { links: &store, categories: &store }
            .execute(new_link("Google", "https://google.com", Some(work.id), true))
            .await
            .unwrap();

        let listed = ListLinks { repo: &store }.execute(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].pinned);
        assert_eq!(listed[0].category_id, Some(work.id));

        DeleteCategory { repo: &store }.execute(work.id).await.unwrap();

        let after = ListLinks { repo: &store }.execute(None).await.unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, link.id);
        assert_eq!(after[0].category_id, None);
        assert_eq!(after[0].category_name, None);
    }

    #[tokio::test]
    async fn lists_are_pinned_first_and_stable() {
        let store = InMemoryStore::default();
        let create = CreateLink { links: &store, categories: &store };
        create
            .execute(new_link("first", "https://a.example.com", None, false))
            .await
            .unwrap();
        create
            .execute(new_link("second", "https://b.example.com", None, true))
            .await
            .unwrap();
        create
            .execute(new_link("third", "https://c.example.com", None, false))
            .await
            .unwrap();

        let list = ListLinks { repo: &store };
        let once = list.execute(None).await.unwrap();
        let titles: Vec<&str> = once.iter().map(|l| l.title.as_str()).collect();
        // pinned first, then newest-first within the unpinned group
        assert_eq!(titles, vec!["second", "third", "first"]);

        let again = list.execute(None).await.unwrap();
        let ids_once: Vec<Uuid> = once.iter().map(|l| l.id).collect();
        let ids_again: Vec<Uuid> = again.iter().map(|l| l.id).collect();
        assert_eq!(ids_once, ids_again);
    }

    #[tokio::test]
    async fn malformed_url_is_rejected_and_nothing_is_stored() {
        let store = InMemoryStore::default();
        let err = CreateLink { links: &store, categories: &store }
            .execute(new_link("Broken", "not-a-valid-url", None, false))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(ListLinks { repo: &store }.execute(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_empty_term_matches_all() {
        let store = InMemoryStore::default();
        let create = CreateLink { links: &store, categories: &store };
        create
            .execute(new_link("Google", "https://google.com", None, false))
            .await
            .unwrap();
        create
            .execute(new_link("Bing", "https://bing.com", None, false))
            .await
            .unwrap();

        let search = SearchLinks { repo: &store };
        let hits = search.execute("google").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Google");

        let all = search.execute("   ").await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn search_treats_like_metacharacters_as_literal_text() {
        let store = InMemoryStore::default();
        let create = CreateLink { links: &store, categories: &store };
        create
            .execute(new_link("Deals: 50% off", "https://deals.example.com", None, false))
            .await
            .unwrap();
        create
            .execute(new_link("Deals: 500 off", "https://more.example.com", None, false))
            .await
            .unwrap();

        let search = SearchLinks { repo: &store };
        let hits = search.execute("50%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Deals: 50% off");
    }

    #[tokio::test]
    async fn empty_category_name_is_rejected_and_store_unchanged() {
        let store = InMemoryStore::default();
        let err = CreateCategory { repo: &store }
            .execute("", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(CategoryRepository::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_unknown_link_is_not_found() {
        let store = InMemoryStore::default();
        let err = DeleteLink { repo: &store }
            .execute(Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn duplicate_category_name_conflicts() {
        let store = InMemoryStore::default();
        let create = CreateCategory { repo: &store };
        create.execute("Work", None).await.unwrap();
        let err = create.execute("Work", None).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn renaming_category_onto_existing_name_conflicts() {
        let store = InMemoryStore::default();
        let create = CreateCategory { repo: &store };
        create.execute("Work", None).await.unwrap();
        let personal = create.execute("Personal", None).await.unwrap();
        let err = UpdateCategory { repo: &store }
            .execute(personal.id, Some("Work".into()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_link_url_conflicts() {
        let store = InMemoryStore::default();
        let create = CreateLink { links: &store, categories: &store };
        create
            .execute(new_link("Google", "https://google.com", None, false))
            .await
            .unwrap();
        let err = create
            .execute(new_link("Also Google", "https://google.com", None, false))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_link_with_unknown_category_is_rejected() {
        let store = InMemoryStore::default();
        let err = CreateLink { links: &store, categories: &store }
            .execute(new_link("Orphan", "https://o.example.com", Some(Uuid::new_v4()), false))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_can_move_link_to_uncategorized() {
        let store = InMemoryStore::default();
        let work = CreateCategory { repo: &store }
            .execute("Work", None)
            .await
            .unwrap();
        let link = CreateLink { links: &store, categories: &store }
            .execute(new_link("Docs", "https://docs.example.com", Some(work.id), false))
            .await
            .unwrap();

        let updated = UpdateLink { links: &store, categories: &store }
            .execute(
                link.id,
                LinkPatch {
                    category_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.category_id, None);
        assert_eq!(updated.title, "Docs");
    }

    #[tokio::test]
    async fn link_stats_count_totals_and_groups() {
        let store = InMemoryStore::default();
        let work = CreateCategory { repo: &store }
            .execute("Work", None)
            .await
            .unwrap();
        CreateCategory { repo: &store }
            .execute("Empty", None)
            .await
            .unwrap();
        let create = CreateLink { links: &store, categories: &store };
        create
            .execute(new_link("a", "https://a.example.com", Some(work.id), true))
            .await
            .unwrap();
        create
            .execute(new_link("b", "https://b.example.com", None, false))
            .await
            .unwrap();

        let stats = LinkStats { repo: &store }.execute().await.unwrap();
        assert_eq!(stats.total_links, 2);
        assert_eq!(stats.pinned_links, 1);
        assert_eq!(stats.uncategorized_links, 1);
        let work_row = stats
            .links_per_category
            .iter()
            .find(|c| c.category_name == "Work")
            .unwrap();
        assert_eq!(work_row.links_count, 1);
        let empty_row = stats
            .links_per_category
            .iter()
            .find(|c| c.category_name == "Empty")
            .unwrap();
        assert_eq!(empty_row.links_count, 0);
    }
}
