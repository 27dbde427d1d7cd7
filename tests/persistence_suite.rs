mod common;

use std::fs;

use common::temp_json_store;
use resale_core::{
    core::services::{ItemService, NewItem, SaleRequest, SaleService, TagService},
    domain::Theme,
    storage::{ItemFilter, ItemStore, JsonStore},
    utils::persistence::tmp_path,
};

#[test]
fn committed_changes_survive_reopen() {
    let mut store = temp_json_store();
    let tag = TagService::create(&mut store, "Electronics").unwrap();
    let mut input = NewItem::new("Headphones", 2, 30.0, 75.0);
    input.tag_id = Some(tag.id);
    let item = ItemService::create(&mut store, input).unwrap();
    SaleService::sell(&mut store, item.id, SaleRequest::new(1, 70.0)).unwrap();

    let reopened = JsonStore::open(store.path()).unwrap();
    assert_eq!(reopened.fetch_items(ItemFilter::Inventory).unwrap().len(), 1);
    let sold = reopened.fetch_items(ItemFilter::Sold).unwrap();
    assert_eq!(sold.len(), 1);
    assert_eq!(sold[0].tag_id, Some(tag.id));
    assert_eq!(reopened.fetch_tags().unwrap(), vec![tag]);
}

#[test]
fn rolled_back_changes_never_reach_disk() {
    let mut store = temp_json_store();
    ItemService::create(&mut store, NewItem::new("Kept", 1, 1.0, 2.0)).unwrap();
    store
        .insert_item(resale_core::domain::Item::new("Staged", 1, 1.0, 2.0))
        .unwrap();
    assert!(store.has_changes());
    store.rollback();

    let reopened = JsonStore::open(store.path()).unwrap();
    let titles: Vec<_> = reopened
        .fetch_items(ItemFilter::All)
        .unwrap()
        .into_iter()
        .map(|item| item.title)
        .collect();
    assert_eq!(titles, vec!["Kept".to_string()]);
}

#[test]
fn failed_write_keeps_previous_file_and_pending_changes() {
    let mut store = temp_json_store();
    ItemService::create(&mut store, NewItem::new("First", 1, 1.0, 2.0)).unwrap();
    let original = fs::read_to_string(store.path()).unwrap();

    // A directory squatting on the temp name forces the atomic write to fail.
    fs::create_dir_all(tmp_path(store.path())).unwrap();
    store
        .insert_item(resale_core::domain::Item::new("Second", 1, 1.0, 2.0))
        .unwrap();
    assert!(store.save().is_err());
    assert!(store.has_changes(), "unsaved changes stay staged after a failed write");
    assert_eq!(fs::read_to_string(store.path()).unwrap(), original);
}

#[test]
fn app_state_is_persisted_with_catalog() {
    let mut store = temp_json_store();
    let mut state = store.app_state().unwrap();
    state.theme = Theme::Dark;
    state.premium_unlocked = true;
    store.set_app_state(state.clone()).unwrap();
    store.save().unwrap();

    let reopened = JsonStore::open(store.path()).unwrap();
    assert_eq!(reopened.app_state().unwrap(), state);
}
