//! 面向数据适配层的适配器。
//! The data-adaptation-facing adapter.

use super::Binding;
use crate::{
    collaborator::DataAdaptation,
    entity::DataSink,
    error::Result,
    types::{BearerId, ConnectionId},
};
use bytes::Bytes;
use std::sync::Weak;

#[derive(Debug)]
pub struct DataAdapter {
    binding: Binding,
    data: Weak<dyn DataAdaptation>,
}

impl DataAdapter {
    pub(crate) fn new(binding: Binding, data: Weak<dyn DataAdaptation>) -> Self {
        Self { binding, data }
    }

    pub fn id(&self) -> ConnectionId {
        self.binding.id()
    }
}

impl DataSink for DataAdapter {
    fn write_pdu(&self, bearer: BearerId, pdu: Bytes) -> Result<()> {
        let data = self.binding.resolve(&self.data, "write_pdu")?;
        data.write_pdu(self.id(), bearer, pdu);
        Ok(())
    }
}
