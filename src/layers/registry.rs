use crate::{
    layers::marker::{ListenerId, Marker},
    prelude::HashMap,
};
use std::collections::BTreeMap;

/// Layer-local handle of a registered marker.
///
/// Ids are handed out from an increasing counter, so iterating the registry
/// visits markers in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

impl MarkerId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// Draw state kept for each registered marker
#[derive(Debug)]
pub struct MarkerEntry {
    pub marker: Marker,
    /// Draw order in the latest paint; `None` until the marker is painted
    pub z_index: Option<u32>,
    /// The layer's `Move` subscription on the marker
    pub(crate) move_listener: Option<ListenerId>,
}

/// Identity-keyed mapping from markers to their draw state
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    entries: BTreeMap<MarkerId, MarkerEntry>,
    identities: HashMap<usize, MarkerId>,
    next_id: u64,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `marker`, returning its id and whether it was newly added.
    /// Registering the same marker again returns the existing id.
    pub fn insert(&mut self, marker: &Marker) -> (MarkerId, bool) {
        if let Some(id) = self.identities.get(&marker.identity()) {
            return (*id, false);
        }

        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.identities.insert(marker.identity(), id);
        self.entries.insert(
            id,
            MarkerEntry {
                marker: marker.clone(),
                z_index: None,
                move_listener: None,
            },
        );
        (id, true)
    }

    /// Removes `marker`; `None` if it was never registered
    pub fn remove(&mut self, marker: &Marker) -> Option<(MarkerId, MarkerEntry)> {
        let id = self.identities.remove(&marker.identity())?;
        self.entries.remove(&id).map(|entry| (id, entry))
    }

    pub fn id_of(&self, marker: &Marker) -> Option<MarkerId> {
        self.identities.get(&marker.identity()).copied()
    }

    pub fn contains(&self, marker: &Marker) -> bool {
        self.identities.contains_key(&marker.identity())
    }

    pub fn get(&self, id: MarkerId) -> Option<&MarkerEntry> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: MarkerId) -> Option<&mut MarkerEntry> {
        self.entries.get_mut(&id)
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (MarkerId, &MarkerEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (MarkerId, &mut MarkerEntry)> {
        self.entries.iter_mut().map(|(id, entry)| (*id, entry))
    }

    pub fn ids(&self) -> Vec<MarkerId> {
        self.entries.keys().copied().collect()
    }

    /// Forget every draw order assigned by earlier paints
    pub fn clear_z_indices(&mut self) {
        for entry in self.entries.values_mut() {
            entry.z_index = None;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::layers::marker::MarkerOptions;

    fn marker() -> Marker {
        Marker::new(LatLng::new(0.0, 0.0), MarkerOptions::default())
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut registry = MarkerRegistry::new();
        let a = marker();

        let (id, added) = registry.insert(&a);
        assert!(added);
        let (again, added) = registry.insert(&a.clone());
        assert!(!added);
        assert_eq!(id, again);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iteration_follows_registration_order() {
        let mut registry = MarkerRegistry::new();
        let markers: Vec<_> = (0..4).map(|_| marker()).collect();
        for m in &markers {
            registry.insert(m);
        }
        registry.remove(&markers[1]);

        let order: Vec<_> = registry.iter().map(|(_, e)| e.marker.clone()).collect();
        assert_eq!(order.len(), 3);
        assert!(order[0].ptr_eq(&markers[0]));
        assert!(order[1].ptr_eq(&markers[2]));
        assert!(order[2].ptr_eq(&markers[3]));
    }

    #[test]
    fn test_remove_unknown_is_none() {
        let mut registry = MarkerRegistry::new();
        registry.insert(&marker());
        assert!(registry.remove(&marker()).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_readding_gets_fresh_id() {
        let mut registry = MarkerRegistry::new();
        let a = marker();
        let (first, _) = registry.insert(&a);
        registry.remove(&a);
        assert!(registry.is_empty());
        let (second, added) = registry.insert(&a);
        assert!(added);
        assert!(second > first);
    }

    #[test]
    fn test_clear_z_indices() {
        let mut registry = MarkerRegistry::new();
        let (id, _) = registry.insert(&marker());
        registry.get_mut(id).unwrap().z_index = Some(4);
        registry.clear_z_indices();
        assert_eq!(registry.get(id).unwrap().z_index, None);
    }
}
