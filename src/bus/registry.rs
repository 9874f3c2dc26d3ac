use heapless::Vec;

/// Most responders a coordinator tracks
pub const REGISTRY_CAPACITY: usize = 16;

/// Responder addresses found during discovery, in scan order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlaveRegistry {
    addresses: Vec<u8, REGISTRY_CAPACITY>,
}

impl SlaveRegistry {
    pub const fn new() -> Self {
        Self {
            addresses: Vec::new(),
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.addresses.is_full()
    }

    pub fn contains(&self, address: u8) -> bool {
        self.addresses.contains(&address)
    }

    /// Record an address; returns it back if the registry is full
    pub(crate) fn push(&mut self, address: u8) -> Result<(), u8> {
        self.addresses.push(address)
    }

    pub(crate) fn clear(&mut self) {
        self.addresses.clear();
    }
}
