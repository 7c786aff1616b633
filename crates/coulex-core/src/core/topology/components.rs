use super::TopologyError;
use crate::core::models::ids::ParticleId;
use crate::core::models::system::ParticleSystem;

/// A connected component of the bond graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// The lowest particle identity in the component.
    pub root: ParticleId,
    /// Every member, sorted by identity (including `root`).
    pub members: Vec<ParticleId>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partitions the particles into connected components of the bond graph.
///
/// Components are returned ordered by their root, and isolated particles form
/// single-member components.
///
/// # Errors
///
/// Returns [`TopologyError::NeighborOutOfRange`] if an adjacency entry points outside
/// the particle range.
pub fn connected_components(system: &ParticleSystem) -> Result<Vec<Component>, TopologyError> {
    let count = system.len();
    let mut seen = vec![false; count];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for root in system.ids() {
        if seen[root.index()] {
            continue;
        }
        seen[root.index()] = true;
        stack.push(root);
        let mut members = Vec::new();

        while let Some(current) = stack.pop() {
            members.push(current);
            let neighbors = system
                .neighbors(current)
                .ok_or(TopologyError::ParticleNotFound(current))?;
            for &neighbor in neighbors {
                let Some(flag) = seen.get_mut(neighbor.index()) else {
                    return Err(TopologyError::NeighborOutOfRange {
                        particle: current,
                        neighbor,
                        count,
                    });
                };
                if !*flag {
                    *flag = true;
                    stack.push(neighbor);
                }
            }
        }

        members.sort_unstable();
        components.push(Component { root, members });
    }

    Ok(components)
}
