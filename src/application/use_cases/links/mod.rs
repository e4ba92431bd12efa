pub mod create_link;
pub mod delete_link;
pub mod get_link;
pub mod link_stats;
pub mod list_links;
pub mod pinned_links;
pub mod search_links;
pub mod toggle_pin;
pub mod update_link;
