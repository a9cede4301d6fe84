//! Roster builder: assembles vampire trees from flat name/creator/year records.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::VampireArena;
use crate::domain::entities::VampireRecord;
use crate::domain::error::{DomainError, DomainResult};

/// Constructs an arena of vampire trees from roster records.
pub struct RosterBuilder {
    name_cache: HashMap<String, Index>,
}

impl Default for RosterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self {
            name_cache: HashMap::new(),
        }
    }

    /// Build every tree described by `records`.
    ///
    /// Offspring order follows record order. Names must be unique within a
    /// roster, since creators are referenced by name.
    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub fn build(&mut self, records: &[VampireRecord]) -> DomainResult<VampireArena> {
        // Reset state for a fresh build
        self.name_cache.clear();
        let mut arena = VampireArena::new();

        let mut inserted = Vec::with_capacity(records.len());
        for record in records {
            if self.name_cache.contains_key(&record.name) {
                return Err(DomainError::DuplicateName(record.name.clone()));
            }
            let idx = arena.insert(record.name.as_str(), record.year);
            self.name_cache.insert(record.name.clone(), idx);
            inserted.push(idx);
        }

        for (record, &child_idx) in records.iter().zip(&inserted) {
            let Some(creator) = &record.creator else {
                continue;
            };
            if *creator == record.name {
                return Err(DomainError::CycleDetected(record.name.clone()));
            }
            let creator_idx = self.lookup(creator).ok_or_else(|| DomainError::UnknownCreator {
                name: record.name.clone(),
                creator: creator.clone(),
            })?;
            arena.add_offspring(creator_idx, child_idx)?;
        }

        // Cycle detection: vampires but no original vampire means a cycle
        if arena.roots().is_empty() {
            if let Some(first) = records.first() {
                return Err(DomainError::CycleDetected(first.name.clone()));
            }
        }
        arena.validate()?;

        debug!("built {} vampires in {} trees", arena.len(), arena.roots().len());
        Ok(arena)
    }

    fn lookup(&self, name: &str) -> Option<Index> {
        self.name_cache.get(name).copied()
    }
}
