//! 连接表：连接标识 -> 槽位索引，槽位存放连接条目。
//! Connection table: connection id -> slot index, slots hold the entries.

use crate::{adapter::AdapterSet, entity::ProtocolEntity, types::ConnectionId};
use std::collections::HashMap;

/// One connection's protocol entity together with the adapters it was wired to.
/// The two are created and destroyed together.
///
/// 单个连接的协议实体及其所连接的适配器。二者同时创建、同时销毁。
pub(crate) struct ConnectionEntry {
    pub(crate) entity: Box<dyn ProtocolEntity>,
    pub(crate) adapters: AdapterSet,
}

impl ConnectionEntry {
    /// Stops the entity, closes its adapters, then destroys the entry. Adapter
    /// handles that outlive the entry refuse to forward from here on.
    ///
    /// 先停止实体并关闭其适配器，再销毁条目。此后仍存活的适配器句柄拒绝转发。
    pub(crate) fn teardown(mut self) {
        self.entity.stop();
        self.adapters.close();
    }
}

impl std::fmt::Debug for ConnectionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionEntry")
            .field("id", &self.adapters.id())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub(crate) struct ConnectionTable {
    index: HashMap<ConnectionId, usize>,
    slots: Vec<Option<ConnectionEntry>>,
    /// Vacated slot indices, reused before the slot vector grows.
    /// 空闲的槽位索引，在扩展槽位向量之前优先复用。
    free: Vec<usize>,
}

impl ConnectionTable {
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub(crate) fn contains(&self, id: ConnectionId) -> bool {
        self.index.contains_key(&id)
    }

    pub(crate) fn get(&self, id: ConnectionId) -> Option<&ConnectionEntry> {
        let slot = *self.index.get(&id)?;
        self.slots.get(slot)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: ConnectionId) -> Option<&mut ConnectionEntry> {
        let slot = *self.index.get(&id)?;
        self.slots.get_mut(slot)?.as_mut()
    }

    /// Inserts an entry for an id that must not be present yet. Returns `false`
    /// and leaves the table untouched if it is.
    ///
    /// 为尚不存在的标识插入条目。若已存在，返回 `false` 且不修改连接表。
    pub(crate) fn insert(&mut self, id: ConnectionId, entry: ConnectionEntry) -> bool {
        if self.contains(id) {
            return false;
        }
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };
        self.index.insert(id, slot);
        true
    }

    pub(crate) fn remove(&mut self, id: ConnectionId) -> Option<ConnectionEntry> {
        let slot = self.index.remove(&id)?;
        let entry = self.slots.get_mut(slot)?.take();
        self.free.push(slot);
        entry
    }

    /// Empties the table, yielding every entry.
    /// 清空连接表，返回所有条目。
    pub(crate) fn drain(&mut self) -> Vec<(ConnectionId, ConnectionEntry)> {
        let mut index = std::mem::take(&mut self.index);
        let mut slots = std::mem::take(&mut self.slots);
        self.free.clear();
        let mut entries: Vec<_> = index
            .drain()
            .filter_map(|(id, slot)| slots.get_mut(slot)?.take().map(|entry| (id, entry)))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }

    /// Connection ids in ascending order.
    pub(crate) fn ids(&self) -> Vec<ConnectionId> {
        let mut ids: Vec<_> = self.index.keys().copied().collect();
        ids.sort();
        ids
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
