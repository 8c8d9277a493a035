use crate::container::{ArchiveContainer, OpenParams};
use crate::container_mem::MemContainer;

pub enum Backend {
    Memory,
}

pub fn open_container(backend: Backend, p: OpenParams) -> Box<dyn ArchiveContainer> {
    match backend {
        Backend::Memory => Box::new(MemContainer::new(p)),
    }
}
