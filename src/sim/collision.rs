//! Overlap detection between the player and tracked entities
//!
//! Everything is an axis-aligned box centered on its position. Bosses carry a
//! reduced hitbox so grazing the sprite edge doesn't count.

use glam::Vec2;

use super::state::{Entity, EntityId, EntitySet, Player};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        delta.x < reach.x && delta.y < reach.y
    }
}

impl Player {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.hitbox)
    }
}

impl Entity {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.hitbox)
    }
}

/// Handles of every entity in `set` overlapping `bounds`, ascending by id
pub fn overlapping(bounds: &Aabb, set: &EntitySet) -> Vec<EntityId> {
    let mut hits: Vec<EntityId> = set
        .iter()
        .filter(|e| bounds.overlaps(&e.aabb()))
        .map(|e| e.id)
        .collect();
    hits.sort_unstable();
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EntityKind;

    fn boss_at(id: EntityId, pos: Vec2) -> Entity {
        Entity {
            id,
            kind: EntityKind::Boss,
            pos,
            vel_x: -250.0,
            scale: 0.2,
            size: Vec2::splat(100.0),
            hitbox: Vec2::splat(40.0),
        }
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_center_size(Vec2::new(9.0, 0.0), Vec2::splat(10.0));
        let c = Aabb::from_center_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Edges touching is not an overlap
        assert!(!a.overlaps(&c));
        assert_eq!(a.min(), Vec2::splat(-5.0));
        assert_eq!(a.max(), Vec2::splat(5.0));
    }

    #[test]
    fn test_boss_reduced_hitbox() {
        let player = Aabb::from_center_size(Vec2::ZERO, Vec2::splat(20.0));
        let mut set = EntitySet::new();
        // Sprite edge would overlap, hitbox does not: 10 + 20 = 30 < 45
        set.insert(boss_at(1, Vec2::new(45.0, 0.0)));
        assert!(overlapping(&player, &set).is_empty());
        set.insert(boss_at(2, Vec2::new(25.0, 0.0)));
        assert_eq!(overlapping(&player, &set), vec![2]);
    }

    #[test]
    fn test_overlapping_sorted_by_id() {
        let player = Aabb::from_center_size(Vec2::ZERO, Vec2::splat(100.0));
        let mut set = EntitySet::new();
        for id in [9, 3, 5] {
            set.insert(boss_at(id, Vec2::ZERO));
        }
        assert_eq!(overlapping(&player, &set), vec![3, 5, 9]);
    }
}
