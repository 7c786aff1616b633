/// Interaction strength of a pair, derived from its bond distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screening {
    /// Closer than the screening radius: the pair does not interact.
    Excluded,
    /// Exactly at the screening radius: the pair interacts at half strength.
    Halved,
    /// Beyond the screening radius, or not connected: full strength.
    Full,
}

impl Screening {
    /// Multiplier applied to the raw Coulomb term.
    #[inline]
    pub fn factor(self) -> f64 {
        match self {
            Screening::Excluded => 0.0,
            Screening::Halved => 0.5,
            Screening::Full => 1.0,
        }
    }
}

/// Bond-distance screening rule with a configurable radius.
///
/// With the default radius of 3 this is the usual force-field convention: 1-2 and 1-3
/// pairs are excluded and 1-4 pairs are halved. For any other radius the innermost
/// `max_link - 1` shells are excluded and only the outermost shell is halved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreeningRule {
    max_link: usize,
}

impl ScreeningRule {
    pub const DEFAULT_MAX_LINK: usize = 3;

    pub fn new(max_link: usize) -> Self {
        Self { max_link }
    }

    /// Screening radius in bonds; also the depth the bond-distance classifier must reach.
    #[inline]
    pub fn max_link(&self) -> usize {
        self.max_link
    }

    /// Classifies a pair by its bond distance (`None` when beyond the classified range).
    #[inline]
    pub fn classify(&self, bond_distance: Option<usize>) -> Screening {
        match bond_distance {
            None => Screening::Full,
            Some(d) if d < self.max_link => Screening::Excluded,
            Some(d) if d == self.max_link => Screening::Halved,
            Some(_) => Screening::Full,
        }
    }
}

impl Default for ScreeningRule {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_LINK)
    }
}
