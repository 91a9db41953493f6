//! Target groups
//!
//! A [`TargetGroup`] is the ordered set of views animated together by one
//! press effect. One member is primary: it anchors companion offsets and
//! carries the foreground overlay.

use pressfx_core::{Geometry, TargetId, ViewHandle};
use rustc_hash::FxHashSet;

/// Ordered, duplicate-free set of press targets with one primary
#[derive(Debug)]
pub struct TargetGroup<V: ViewHandle> {
    members: Vec<V>,
    ids: FxHashSet<TargetId>,
    primary: Option<TargetId>,
}

impl<V: ViewHandle> Default for TargetGroup<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ViewHandle> TargetGroup<V> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            ids: FxHashSet::default(),
            primary: None,
        }
    }

    /// Add a companion. Returns false if the target is already a member.
    pub fn add(&mut self, view: V) -> bool {
        let id = view.id();
        if !self.ids.insert(id) {
            tracing::debug!("Ignoring duplicate group member {}", id);
            return false;
        }
        self.members.push(view);
        true
    }

    /// Add a member and designate it primary.
    ///
    /// The primary cannot be replaced once established; a second call adds
    /// the view as a companion.
    pub fn add_primary(&mut self, view: V) -> bool {
        let id = view.id();
        if !self.add(view) {
            return false;
        }
        match self.primary {
            None => self.primary = Some(id),
            Some(existing) => {
                tracing::warn!(
                    "Group already has primary {}; adding {} as companion",
                    existing,
                    id
                );
            }
        }
        true
    }

    /// Add several views, optionally designating the first one primary
    pub fn extend(&mut self, views: impl IntoIterator<Item = V>, first_is_primary: bool) {
        let mut first = first_is_primary;
        for view in views {
            if std::mem::take(&mut first) {
                self.add_primary(view);
            } else {
                self.add(view);
            }
        }
    }

    /// Establish the primary if none was designated.
    ///
    /// Picks the largest member by width + height among members with a
    /// non-zero width; the earliest member wins ties. Returns `None` while
    /// nothing is measured yet, so resolution is retried later.
    pub fn resolve_primary(&mut self) -> Option<TargetId> {
        if self.primary.is_some() {
            return self.primary;
        }

        let mut best: Option<(TargetId, f32)> = None;
        for view in &self.members {
            let size = view.size();
            if size.width <= 0.0 {
                continue;
            }
            let extent = size.width + size.height;
            if best.map_or(true, |(_, largest)| extent > largest) {
                best = Some((view.id(), extent));
            }
        }

        self.primary = best.map(|(id, _)| id);
        if let Some(id) = self.primary {
            tracing::debug!("Resolved group primary {}", id);
        }
        self.primary
    }

    pub fn primary(&self) -> Option<&V> {
        self.primary.and_then(|id| self.get(id))
    }

    pub fn primary_mut(&mut self) -> Option<&mut V> {
        let id = self.primary?;
        self.get_mut(id)
    }

    pub fn primary_id(&self) -> Option<TargetId> {
        self.primary
    }

    pub fn get(&self, id: TargetId) -> Option<&V> {
        self.members.iter().find(|view| view.id() == id)
    }

    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut V> {
        self.members.iter_mut().find(|view| view.id() == id)
    }

    pub fn contains(&self, id: TargetId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.members.iter_mut()
    }

    /// Geometry of every member, in insertion order
    pub fn snapshot(&self) -> Vec<(TargetId, Geometry)> {
        self.members
            .iter()
            .map(|view| (view.id(), Geometry::snapshot(view)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Remove every member and forget the primary
    pub fn clear(&mut self) {
        self.members.clear();
        self.ids.clear();
        self.primary = None;
    }
}
