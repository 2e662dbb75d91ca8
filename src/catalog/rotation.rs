use crate::catalog::query::featured;
use crate::catalog::types::Direction;
use crate::error::CatalogError;
use crate::models::Property;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Process-wide position in the featured carousel.
///
/// There is one cursor for the whole server, not one per visitor: concurrent
/// next/previous calls from different clients move the same position and
/// will see each other's steps. The mutex only rules out lost updates.
#[derive(Debug, Default)]
pub struct RotationCursor {
    position: Mutex<i64>,
}

#[derive(Debug, Serialize)]
pub struct Rotation<'a> {
    pub properties: Vec<&'a Property>,
    pub index: usize,
}

impl RotationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> i64 {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn next<'a>(
        &self,
        catalog: &'a [Property],
        override_index: Option<i64>,
    ) -> Result<Rotation<'a>, CatalogError> {
        self.advance(catalog, Direction::Next, override_index)
    }

    pub fn previous<'a>(
        &self,
        catalog: &'a [Property],
        override_index: Option<i64>,
    ) -> Result<Rotation<'a>, CatalogError> {
        self.advance(catalog, Direction::Previous, override_index)
    }

    /// Step the cursor over the featured set of `catalog`. An override
    /// replaces the stored position before stepping and is not range checked.
    pub fn advance<'a>(
        &self,
        catalog: &'a [Property],
        direction: Direction,
        override_index: Option<i64>,
    ) -> Result<Rotation<'a>, CatalogError> {
        let properties = featured(catalog);
        if properties.is_empty() {
            return Err(CatalogError::EmptySet);
        }
        let len = properties.len() as i64;

        let mut position = self.position.lock().unwrap_or_else(PoisonError::into_inner);
        let start = override_index.unwrap_or(*position);

        // Reduce first so huge overrides cannot overflow
        let base = start.rem_euclid(len);
        let stepped = match direction {
            Direction::Next => (base + 1).rem_euclid(len),
            Direction::Previous => (base - 1).rem_euclid(len),
        };
        *position = stepped;
        drop(position);

        debug!("Carousel {:?} from {} to {} of {}", direction, start, stepped, len);

        Ok(Rotation {
            properties,
            index: stepped as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SampleCatalog;
    use std::sync::Arc;

    #[test]
    fn next_wraps_around() {
        let catalog = SampleCatalog::properties();
        let cursor = RotationCursor::new();

        let indices: Vec<usize> = (0..4)
            .map(|_| cursor.next(&catalog, None).unwrap().index)
            .collect();
        assert_eq!(indices, vec![1, 2, 0, 1]);
    }

    #[test]
    fn previous_wraps_to_end() {
        let catalog = SampleCatalog::properties();
        let cursor = RotationCursor::new();

        let rotation = cursor.previous(&catalog, None).unwrap();
        assert_eq!(rotation.index, 2);
        assert_eq!(rotation.properties[2].slug, "garden-level-apartment");
    }

    #[test]
    fn next_then_previous_restores_position() {
        let base = SampleCatalog::properties();
        for n in 1..=6 {
            let mut catalog = base.clone();
            for (i, p) in catalog.iter_mut().enumerate() {
                p.available = true;
                p.featured = i < n;
            }

            let cursor = RotationCursor::new();
            for _ in 0..n + 1 {
                let before = cursor.position();
                cursor.next(&catalog, None).unwrap();
                cursor.previous(&catalog, None).unwrap();
                assert_eq!(cursor.position(), before, "n = {n}");
                cursor.next(&catalog, None).unwrap();
            }
        }
    }

    #[test]
    fn override_replaces_position_before_step() {
        let catalog = SampleCatalog::properties();
        let cursor = RotationCursor::new();

        assert_eq!(cursor.next(&catalog, Some(1)).unwrap().index, 2);
        assert_eq!(cursor.previous(&catalog, Some(0)).unwrap().index, 2);
        assert_eq!(cursor.next(&catalog, Some(7)).unwrap().index, 2);
        assert_eq!(cursor.previous(&catalog, Some(-4)).unwrap().index, 1);
        assert_eq!(cursor.next(&catalog, Some(i64::MAX)).unwrap().index, 2);
        assert_eq!(cursor.previous(&catalog, Some(i64::MIN)).unwrap().index, 0);
    }

    #[test]
    fn empty_set_leaves_cursor_alone() {
        let mut catalog = SampleCatalog::properties();
        let cursor = RotationCursor::new();
        cursor.next(&catalog, None).unwrap();

        for p in &mut catalog {
            p.available = false;
        }
        assert!(matches!(
            cursor.next(&catalog, Some(2)),
            Err(CatalogError::EmptySet)
        ));
        assert!(matches!(
            cursor.previous(&catalog, None),
            Err(CatalogError::EmptySet)
        ));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn concurrent_steps_are_not_lost() {
        let catalog = Arc::new(SampleCatalog::properties());
        let cursor = Arc::new(RotationCursor::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                let cursor = Arc::clone(&cursor);
                std::thread::spawn(move || {
                    for _ in 0..30 {
                        cursor.next(&catalog, None).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // 240 shared steps over a featured set of 3
        assert_eq!(cursor.position(), 0);
    }
}
