use tracing::info;
use uuid::Uuid;

use crate::{
    domain::Tag,
    errors::{ResaleError, Result},
    storage::{ItemFilter, ItemStore},
};

use super::{in_transaction, item_service::ensure_tag_exists};

pub struct TagService;

impl TagService {
    pub fn create<S>(store: &mut S, title: &str) -> Result<Tag>
    where
        S: ItemStore + ?Sized,
    {
        let title = title.trim();
        if title.is_empty() {
            return Err(ResaleError::InvalidTitle);
        }
        let tag = Tag::new(title);
        let created = tag.clone();
        in_transaction(store, "create tag", |store| store.insert_tag(tag))?;
        Ok(created)
    }

    /// Deletes the tag and clears it from every item that referenced it.
    pub fn remove<S>(store: &mut S, id: Uuid) -> Result<Tag>
    where
        S: ItemStore + ?Sized,
    {
        let tag = store.tag(id)?.ok_or(ResaleError::TagNotFound(id))?;
        let cleared = in_transaction(store, "remove tag", |store| {
            store.delete_tag(id)?;
            clear_tag_references(store, |tag_id| tag_id == id)
        })?;
        info!(tag = %id, cleared, "tag removed");
        Ok(tag)
    }

    /// Points an item at `tag_id`, or detaches it when `None`.
    pub fn assign<S>(store: &mut S, item_id: Uuid, tag_id: Option<Uuid>) -> Result<()>
    where
        S: ItemStore + ?Sized,
    {
        let mut item = store.item(item_id)?.ok_or(ResaleError::ItemNotFound(item_id))?;
        ensure_tag_exists(&*store, tag_id)?;
        item.tag_id = tag_id;
        in_transaction(store, "assign tag", |store| store.insert_item(item))
    }

    pub fn list<S>(store: &S) -> Result<Vec<Tag>>
    where
        S: ItemStore + ?Sized,
    {
        store.fetch_tags()
    }
}

/// Stages removal of matching tag references; returns how many items changed.
pub(crate) fn clear_tag_references<S, P>(store: &mut S, matches: P) -> Result<usize>
where
    S: ItemStore + ?Sized,
    P: Fn(Uuid) -> bool,
{
    let mut cleared = 0;
    for mut item in store.fetch_items(ItemFilter::All)? {
        if item.tag_id.is_some_and(&matches) {
            item.tag_id = None;
            store.insert_item(item)?;
            cleared += 1;
        }
    }
    Ok(cleared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::services::{ItemService, NewItem},
        storage::MemoryStore,
    };

    #[test]
    fn one_tag_backs_many_items() {
        let mut store = MemoryStore::new();
        let tag = TagService::create(&mut store, "Vintage").unwrap();
        let first = ItemService::create(&mut store, NewItem::new("Lamp", 1, 3.0, 9.0)).unwrap();
        let second = ItemService::create(&mut store, NewItem::new("Vase", 1, 2.0, 7.0)).unwrap();

        TagService::assign(&mut store, first.id, Some(tag.id)).unwrap();
        TagService::assign(&mut store, second.id, Some(tag.id)).unwrap();

        let tagged = store
            .fetch_items(ItemFilter::All)
            .unwrap()
            .into_iter()
            .filter(|item| item.tag_id == Some(tag.id))
            .count();
        assert_eq!(tagged, 2);
    }

    #[test]
    fn removing_tag_clears_references() {
        let mut store = MemoryStore::new();
        let tag = TagService::create(&mut store, "Books").unwrap();
        let mut input = NewItem::new("Novel", 1, 1.0, 4.0);
        input.tag_id = Some(tag.id);
        let item = ItemService::create(&mut store, input).unwrap();

        TagService::remove(&mut store, tag.id).unwrap();
        assert!(store.tag(tag.id).unwrap().is_none());
        assert_eq!(store.item(item.id).unwrap().unwrap().tag_id, None);
    }

    #[test]
    fn assign_unknown_tag_fails() {
        let mut store = MemoryStore::new();
        let item = ItemService::create(&mut store, NewItem::new("Pen", 1, 1.0, 2.0)).unwrap();
        let err = TagService::assign(&mut store, item.id, Some(Uuid::new_v4()))
            .expect_err("unknown tag must fail");
        assert!(matches!(err, ResaleError::TagNotFound(_)));
    }

    #[test]
    fn blank_tag_title_is_rejected() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            TagService::create(&mut store, " "),
            Err(ResaleError::InvalidTitle)
        ));
    }
}
