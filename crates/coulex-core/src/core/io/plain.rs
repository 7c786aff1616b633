use crate::core::models::ids::ParticleId;
use crate::core::models::system::{ParticleSystem, ParticleSystemBuilder, SystemError};
use nalgebra::Point3;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_ATOMS_FILE: &str = "atoms.txt";
pub const DEFAULT_BONDS_FILE: &str = "bonds.txt";
pub const DEFAULT_CHARGES_FILE: &str = "charges.txt";

/// Which of the three input files a problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFile {
    Atoms,
    Bonds,
    Charges,
}

impl fmt::Display for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Atoms => "atoms file",
                Self::Bonds => "bonds file",
                Self::Charges => "charges file",
            }
        )
    }
}

#[derive(Debug, Error)]
pub enum PlainTextError {
    #[error("I/O error reading {file}: {source}")]
    Io {
        file: InputFile,
        #[source]
        source: io::Error,
    },
    #[error("Invalid {expected} '{token}' at token {position} of the {file}")]
    InvalidToken {
        file: InputFile,
        position: usize,
        token: String,
        expected: &'static str,
    },
    #[error("The {file} holds {count} values, which is not a multiple of {group}")]
    IncompleteRecord {
        file: InputFile,
        count: usize,
        group: usize,
    },
    #[error("The charges file holds {charges} values for {particles} particles")]
    ChargeCountMismatch { particles: usize, charges: usize },
    #[error("Invalid particle #{index}: {source}")]
    InvalidParticle {
        index: usize,
        #[source]
        source: SystemError,
    },
    #[error("Invalid bond #{index} in the bonds file: {source}")]
    InvalidBond {
        index: usize,
        #[source]
        source: SystemError,
    },
}

/// Locations of the three input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub atoms: PathBuf,
    pub bonds: PathBuf,
    pub charges: PathBuf,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            atoms: PathBuf::from(DEFAULT_ATOMS_FILE),
            bonds: PathBuf::from(DEFAULT_BONDS_FILE),
            charges: PathBuf::from(DEFAULT_CHARGES_FILE),
        }
    }
}

impl InputPaths {
    /// The default file names, resolved inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            atoms: dir.join(DEFAULT_ATOMS_FILE),
            bonds: dir.join(DEFAULT_BONDS_FILE),
            charges: dir.join(DEFAULT_CHARGES_FILE),
        }
    }
}

/// Reader for the whitespace-separated plain-text input format.
///
/// - atoms: `x y z` coordinate triples, one particle per triple;
/// - bonds: `a b` pairs of zero-based particle identities;
/// - charges: one charge per particle, in identity order.
///
/// Values may be spread over any number of lines.
pub struct PlainTextInput;

impl PlainTextInput {
    pub fn read_from(
        atoms: &mut impl Read,
        bonds: &mut impl Read,
        charges: &mut impl Read,
    ) -> Result<ParticleSystem, PlainTextError> {
        let coordinates: Vec<f64> =
            parse_tokens(&read_all(atoms, InputFile::Atoms)?, InputFile::Atoms, "coordinate")?;
        if coordinates.len() % 3 != 0 {
            return Err(PlainTextError::IncompleteRecord {
                file: InputFile::Atoms,
                count: coordinates.len(),
                group: 3,
            });
        }
        let particle_count = coordinates.len() / 3;

        let charge_values: Vec<f64> =
            parse_tokens(&read_all(charges, InputFile::Charges)?, InputFile::Charges, "charge")?;
        if charge_values.len() != particle_count {
            return Err(PlainTextError::ChargeCountMismatch {
                particles: particle_count,
                charges: charge_values.len(),
            });
        }

        let bond_ids: Vec<usize> = parse_tokens(
            &read_all(bonds, InputFile::Bonds)?,
            InputFile::Bonds,
            "particle index",
        )?;
        if bond_ids.len() % 2 != 0 {
            return Err(PlainTextError::IncompleteRecord {
                file: InputFile::Bonds,
                count: bond_ids.len(),
                group: 2,
            });
        }

        let mut builder = ParticleSystemBuilder::with_capacity(particle_count);
        for (index, (xyz, &charge)) in coordinates.chunks_exact(3).zip(&charge_values).enumerate() {
            builder
                .add_particle(Point3::new(xyz[0], xyz[1], xyz[2]), charge)
                .map_err(|source| PlainTextError::InvalidParticle { index, source })?;
        }

        let mut duplicates = 0usize;
        for (index, pair) in bond_ids.chunks_exact(2).enumerate() {
            let added = builder
                .add_bond(ParticleId::new(pair[0]), ParticleId::new(pair[1]))
                .map_err(|source| PlainTextError::InvalidBond { index, source })?;
            if !added {
                duplicates += 1;
            }
        }

        let system = builder.build();
        debug!(
            particles = system.len(),
            bonds = system.bond_count(),
            duplicate_bonds = duplicates,
            "Parsed plain-text input."
        );
        Ok(system)
    }

    #[instrument(skip_all, name = "plain_text_input")]
    pub fn read_from_paths(paths: &InputPaths) -> Result<ParticleSystem, PlainTextError> {
        debug!(atoms = ?paths.atoms, bonds = ?paths.bonds, charges = ?paths.charges, "Opening input files.");
        let mut atoms = open(&paths.atoms, InputFile::Atoms)?;
        let mut bonds = open(&paths.bonds, InputFile::Bonds)?;
        let mut charges = open(&paths.charges, InputFile::Charges)?;
        Self::read_from(&mut atoms, &mut bonds, &mut charges)
    }
}

fn open(path: &Path, file: InputFile) -> Result<BufReader<File>, PlainTextError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| PlainTextError::Io { file, source })
}

fn read_all(reader: &mut impl Read, file: InputFile) -> Result<String, PlainTextError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| PlainTextError::Io { file, source })?;
    Ok(content)
}

fn parse_tokens<T: FromStr>(
    content: &str,
    file: InputFile,
    expected: &'static str,
) -> Result<Vec<T>, PlainTextError> {
    content
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token.parse().map_err(|_| PlainTextError::InvalidToken {
                file,
                position: i + 1,
                token: token.to_string(),
                expected,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    fn read(atoms: &str, bonds: &str, charges: &str) -> Result<ParticleSystem, PlainTextError> {
        PlainTextInput::read_from(
            &mut Cursor::new(atoms),
            &mut Cursor::new(bonds),
            &mut Cursor::new(charges),
        )
    }

    fn id(n: usize) -> ParticleId {
        ParticleId::new(n)
    }

    #[test]
    fn reads_particles_bonds_and_charges() {
        let system = read(
            "0.0 0.0 0.0 1.0 0.0 0.0 1.0 1.0 0.0",
            "0 1 1 2",
            "0.5 -1.0 0.5",
        )
        .unwrap();

        assert_eq!(system.len(), 3);
        assert_eq!(system.bond_count(), 2);
        assert_eq!(system.particle(id(1)).unwrap().charge, -1.0);
        assert_eq!(
            system.particle(id(2)).unwrap().position,
            Point3::new(1.0, 1.0, 0.0)
        );
        assert_eq!(system.neighbors(id(1)).unwrap(), &[id(0), id(2)]);
    }

    #[test]
    fn tokens_may_span_several_lines() {
        let system = read("0 0 0\n1 0\n0\n", "0\n1\n", "1\n-1\n").unwrap();
        assert_eq!(system.len(), 2);
        assert_eq!(system.bond_count(), 1);
    }

    #[test]
    fn empty_inputs_give_empty_system() {
        let system = read("", "", "").unwrap();
        assert!(system.is_empty());
    }

    #[test]
    fn duplicate_bonds_are_ignored() {
        let system = read("0 0 0 1 0 0", "0 1 1 0 0 1", "1 1").unwrap();
        assert_eq!(system.bond_count(), 1);
    }

    #[test]
    fn rejects_incomplete_coordinate_triple() {
        let err = read("0 0 0 1 0", "", "1").unwrap_err();
        assert!(matches!(
            err,
            PlainTextError::IncompleteRecord {
                file: InputFile::Atoms,
                count: 5,
                group: 3
            }
        ));
    }

    #[test]
    fn rejects_odd_bond_token_count() {
        let err = read("0 0 0 1 0 0", "0 1 1", "1 1").unwrap_err();
        assert!(matches!(
            err,
            PlainTextError::IncompleteRecord {
                file: InputFile::Bonds,
                count: 3,
                group: 2
            }
        ));
    }

    #[test]
    fn rejects_charge_count_mismatch() {
        let err = read("0 0 0 1 0 0", "", "1").unwrap_err();
        assert!(matches!(
            err,
            PlainTextError::ChargeCountMismatch {
                particles: 2,
                charges: 1
            }
        ));
    }

    #[test]
    fn rejects_unparsable_tokens_with_position() {
        let err = read("0 0 zero", "", "1").unwrap_err();
        match err {
            PlainTextError::InvalidToken {
                file,
                position,
                token,
                ..
            } => {
                assert_eq!(file, InputFile::Atoms);
                assert_eq!(position, 3);
                assert_eq!(token, "zero");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = read("0 0 0 1 0 0", "0 -1", "1 1").unwrap_err();
        assert!(matches!(
            err,
            PlainTextError::InvalidToken {
                file: InputFile::Bonds,
                position: 2,
                ..
            }
        ));
    }

    #[test]
    fn rejects_out_of_range_bond() {
        let err = read("0 0 0 1 0 0", "0 1 1 2", "1 1").unwrap_err();
        assert!(matches!(
            err,
            PlainTextError::InvalidBond {
                index: 1,
                source: SystemError::ParticleOutOfRange { .. }
            }
        ));
    }

    #[test]
    fn rejects_self_bond() {
        let err = read("0 0 0 1 0 0", "1 1", "1 1").unwrap_err();
        assert!(matches!(
            err,
            PlainTextError::InvalidBond {
                index: 0,
                source: SystemError::SelfBond { .. }
            }
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = read("0 0 0 1 inf 0", "", "1 1").unwrap_err();
        assert!(matches!(
            err,
            PlainTextError::InvalidParticle { index: 1, .. }
        ));
    }

    #[test]
    fn read_from_paths_uses_default_file_names() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join(DEFAULT_ATOMS_FILE), "0 0 0\n2 0 0\n").unwrap();
        fs::write(dir.path().join(DEFAULT_BONDS_FILE), "\n").unwrap();
        fs::write(dir.path().join(DEFAULT_CHARGES_FILE), "2.0 3.0\n").unwrap();

        let system = PlainTextInput::read_from_paths(&InputPaths::in_dir(dir.path())).unwrap();
        assert_eq!(system.len(), 2);
        assert_eq!(system.bond_count(), 0);
    }

    #[test]
    fn read_from_paths_reports_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join(DEFAULT_ATOMS_FILE), "0 0 0").unwrap();

        let err = PlainTextInput::read_from_paths(&InputPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            PlainTextError::Io {
                file: InputFile::Bonds,
                ..
            }
        ));
    }
}
