use super::TopologyError;
use crate::core::models::ids::ParticleId;
use crate::core::models::system::ParticleSystem;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Shortest bond-graph distances from one source particle to every particle within a
/// bounded number of bonds.
///
/// Values lie in `1..=max_depth`; the source itself is never present. A particle that is
/// farther away, or unreachable, is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BondDistanceMap {
    distances: HashMap<ParticleId, usize>,
}

impl BondDistanceMap {
    /// Bond distance to `other`, or `None` if it lies beyond the classification depth.
    #[inline]
    pub fn get(&self, other: ParticleId) -> Option<usize> {
        self.distances.get(&other).copied()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Iterates over `(particle, distance)` entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, usize)> + '_ {
        self.distances.iter().map(|(&id, &d)| (id, d))
    }
}

/// Classification maps for every particle of a system, indexed by particle identity.
///
/// Built once before any energy summation and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BondDistanceTable {
    max_depth: usize,
    maps: Vec<BondDistanceMap>,
}

impl BondDistanceTable {
    /// Wraps per-particle maps, which must be ordered by particle identity.
    pub fn new(max_depth: usize, maps: Vec<BondDistanceMap>) -> Self {
        Self { max_depth, maps }
    }

    /// The depth every map was classified to.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub fn get(&self, id: ParticleId) -> Option<&BondDistanceMap> {
        self.maps.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Total number of `(source, other)` entries across all maps.
    pub fn entry_count(&self) -> usize {
        self.maps.iter().map(BondDistanceMap::len).sum()
    }
}

/// Classifies every particle within `max_depth` bonds of `source` by its shortest bond
/// distance.
///
/// The traversal is level-synchronous: all particles at distance `L` form the frontier
/// that is expanded into level `L + 1`, and expansion stops once the next level would
/// exceed `max_depth`. A particle is recorded the first time it is discovered, which
/// is always at its shortest distance because levels are processed in increasing order.
///
/// # Errors
///
/// Returns [`TopologyError::ParticleNotFound`] if `source` is not in the system and
/// [`TopologyError::NeighborOutOfRange`] if an adjacency entry points outside the
/// particle range.
pub fn classify(
    system: &ParticleSystem,
    source: ParticleId,
    max_depth: usize,
) -> Result<BondDistanceMap, TopologyError> {
    let count = system.len();
    if source.index() >= count {
        return Err(TopologyError::ParticleNotFound(source));
    }

    let mut visited: HashMap<ParticleId, usize> = HashMap::new();
    visited.insert(source, 0);

    let mut frontier = vec![source];
    let mut next_frontier = Vec::new();

    for level in 1..=max_depth {
        for &current in &frontier {
            let neighbors = system
                .neighbors(current)
                .ok_or(TopologyError::ParticleNotFound(current))?;
            for &neighbor in neighbors {
                if neighbor.index() >= count {
                    return Err(TopologyError::NeighborOutOfRange {
                        particle: current,
                        neighbor,
                        count,
                    });
                }
                if let Entry::Vacant(slot) = visited.entry(neighbor) {
                    slot.insert(level);
                    next_frontier.push(neighbor);
                }
            }
        }
        if next_frontier.is_empty() {
            break;
        }
        std::mem::swap(&mut frontier, &mut next_frontier);
        next_frontier.clear();
    }

    visited.remove(&source);
    Ok(BondDistanceMap { distances: visited })
}
