//! Session-scoped cache of the generated table.
//!
//! The first read generates a [`Dataset`]; every later read returns the same
//! `Arc` until [`SessionDataset::invalidate`] drops it. Snapshots are never
//! mutated, only replaced.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use stockwatch_core::{DomainResult, SessionId};

use crate::generator::{CATALOG, GenerationRanges, generate};
use crate::item::InventoryItem;

/// Where a session's randomness comes from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SeedSource {
    /// Fresh OS entropy on every generation.
    #[default]
    Entropy,
    /// Reproducible: generation `g` uses a seed derived from `(seed, g)`.
    Fixed(u64),
}

impl SeedSource {
    fn rng_for(&self, generation: u64) -> StdRng {
        match self {
            SeedSource::Entropy => StdRng::from_entropy(),
            SeedSource::Fixed(seed) => {
                StdRng::seed_from_u64(seed.wrapping_add(generation.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
            }
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, SeedSource::Fixed(_))
    }
}

/// Immutable snapshot of one generated table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    items: Arc<[InventoryItem]>,
    generation: u64,
    generated_at: DateTime<Utc>,
}

impl Dataset {
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// 0 for the first table of a session, +1 per invalidation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<Arc<Dataset>>,
    next_generation: u64,
}

/// Lazily generated, explicitly invalidated table for one session.
#[derive(Debug)]
pub struct SessionDataset {
    session_id: SessionId,
    catalog: &'static [&'static str],
    ranges: GenerationRanges,
    seed: SeedSource,
    slot: RwLock<Slot>,
}

impl SessionDataset {
    pub fn new(session_id: SessionId, seed: SeedSource) -> Self {
        Self::with_catalog(session_id, &CATALOG, GenerationRanges::default(), seed)
    }

    pub fn with_catalog(
        session_id: SessionId,
        catalog: &'static [&'static str],
        ranges: GenerationRanges,
        seed: SeedSource,
    ) -> Self {
        Self {
            session_id,
            catalog,
            ranges,
            seed,
            slot: RwLock::new(Slot::default()),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Whether a snapshot is currently cached.
    pub fn is_generated(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .is_some()
    }

    /// Current snapshot, generating it on first access.
    pub fn get(&self) -> DomainResult<Arc<Dataset>> {
        {
            let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ds) = &slot.current {
                return Ok(Arc::clone(ds));
            }
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        // Another reader may have generated while we waited for the write lock.
        if let Some(ds) = &slot.current {
            return Ok(Arc::clone(ds));
        }

        let generation = slot.next_generation;
        let mut rng = self.seed.rng_for(generation);
        let items = generate(self.catalog, &self.ranges, &mut rng)?;

        tracing::info!(
            session = %self.session_id,
            generation,
            items = items.len(),
            seeded = self.seed.is_fixed(),
            "generated inventory dataset"
        );

        let ds = Arc::new(Dataset {
            items: items.into(),
            generation,
            generated_at: Utc::now(),
        });
        slot.current = Some(Arc::clone(&ds));
        slot.next_generation = generation + 1;
        Ok(ds)
    }

    /// Drop the current snapshot; the next [`get`](Self::get) regenerates.
    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.current.take().is_some() {
            tracing::info!(
                session = %self.session_id,
                next_generation = slot.next_generation,
                "invalidated inventory dataset"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_reads_return_the_same_snapshot() {
        let session = SessionDataset::new(SessionId::new(), SeedSource::Entropy);

        let a = session.get().unwrap();
        let b = session.get().unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.items(), b.items());
        assert_eq!(a.generation(), 0);
    }

    #[test]
    fn invalidate_replaces_the_snapshot() {
        let session = SessionDataset::new(SessionId::new(), SeedSource::Fixed(11));

        let first = session.get().unwrap();
        session.invalidate();
        let second = session.get().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.generation(), 1);
        // The old snapshot is untouched.
        assert_eq!(first.generation(), 0);
        assert_eq!(first.items().len(), CATALOG.len());
    }

    #[test]
    fn fixed_seed_is_reproducible_across_sessions() {
        let a = SessionDataset::new(SessionId::new(), SeedSource::Fixed(99));
        let b = SessionDataset::new(SessionId::new(), SeedSource::Fixed(99));

        assert_eq!(a.get().unwrap().items(), b.get().unwrap().items());

        a.invalidate();
        b.invalidate();
        assert_eq!(a.get().unwrap().items(), b.get().unwrap().items());
    }

    #[test]
    fn fixed_seed_changes_between_generations() {
        let session = SessionDataset::new(SessionId::new(), SeedSource::Fixed(5));
        let first = session.get().unwrap();
        session.invalidate();
        let second = session.get().unwrap();

        assert_ne!(first.items(), second.items());
    }

    #[test]
    fn tracks_owner_and_generated_state() {
        let id = SessionId::new();
        let session = SessionDataset::new(id, SeedSource::Fixed(4));

        assert_eq!(session.session_id(), id);
        assert!(!session.is_generated());
        session.get().unwrap();
        assert!(session.is_generated());
        session.invalidate();
        assert!(!session.is_generated());
    }

    #[test]
    fn invalidate_before_first_read_is_a_no_op() {
        let session = SessionDataset::new(SessionId::new(), SeedSource::Fixed(3));
        session.invalidate();
        assert_eq!(session.get().unwrap().generation(), 0);
    }

    #[test]
    fn invalid_ranges_surface_as_errors() {
        use crate::generator::QtyRange;

        let ranges = GenerationRanges {
            band: QtyRange::new(9, 1),
            ..GenerationRanges::default()
        };
        let session = SessionDataset::with_catalog(SessionId::new(), &CATALOG, ranges, SeedSource::Fixed(1));
        assert!(session.get().is_err());
    }
}
