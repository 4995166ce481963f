//! Abstract index labels and their classification.
//!
//! Every index used anywhere in the crate is a short string label whose first
//! non-sign character decides which symmetry space it ranges over: `"s0"` is a
//! spinor index, `"-c9"` a lowered colour-fundamental index, `"g"` a
//! generation index. The table of recognized kinds is closed: a label with an
//! unknown prefix is a hard error, never coerced.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("empty index label")]
    Empty,
    #[error("unrecognized index prefix '{0}' in label '{1}'")]
    Unrecognized(char, String),
}

/// The symmetry space an index ranges over.
///
/// The declaration order of the variants is the canonical order in which the
/// indices of a tensor are emitted, so `Ord` on this enum *is* the sort key
/// used before serialization.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum IndexKind {
    Lorentz,
    Spinor,
    IsospinAdjoint,
    IsospinFund,
    Generation,
    ColourAdjoint,
    ColourSextet,
    ColourFund,
    Isospin4,
}

impl IndexKind {
    pub const ALL: [IndexKind; 9] = [
        IndexKind::Lorentz,
        IndexKind::Spinor,
        IndexKind::IsospinAdjoint,
        IndexKind::IsospinFund,
        IndexKind::Generation,
        IndexKind::ColourAdjoint,
        IndexKind::ColourSextet,
        IndexKind::ColourFund,
        IndexKind::Isospin4,
    ];

    /// The single character a label of this kind starts with.
    pub fn prefix(self) -> char {
        match self {
            IndexKind::Lorentz => 'm',
            IndexKind::Spinor => 's',
            IndexKind::IsospinAdjoint => 'I',
            IndexKind::IsospinFund => 'i',
            IndexKind::Generation => 'g',
            IndexKind::ColourAdjoint => 'A',
            IndexKind::ColourSextet => 'x',
            IndexKind::ColourFund => 'c',
            IndexKind::Isospin4 => 'q',
        }
    }

    /// Name of the representation in the FeynRules `Index[...]` syntax.
    pub fn wolfram_rep(self) -> &'static str {
        match self {
            IndexKind::Lorentz => "Lorentz",
            IndexKind::Spinor => "Spin",
            IndexKind::IsospinAdjoint => "SU2W",
            IndexKind::IsospinFund => "SU2D",
            IndexKind::Generation => "Generation",
            IndexKind::ColourAdjoint => "Gluon",
            IndexKind::ColourSextet => "Sextet",
            IndexKind::ColourFund => "Colour",
            IndexKind::Isospin4 => "SU24",
        }
    }

    /// Whether hermitian conjugation flips the up/down placement of an index
    /// of this kind.
    ///
    /// Generation indices and the real (adjoint, sextet, quadruplet)
    /// representation slots are not flipped.
    pub fn flips_under_conjugation(self) -> bool {
        !matches!(
            self,
            IndexKind::Generation
                | IndexKind::IsospinAdjoint
                | IndexKind::Isospin4
                | IndexKind::ColourAdjoint
                | IndexKind::ColourSextet
        )
    }

    /// Classify a bare (sign-stripped) label by its leading character.
    pub fn classify(name: &str) -> Result<IndexKind, IndexError> {
        let first = name.chars().next().ok_or(IndexError::Empty)?;
        Self::ALL
            .into_iter()
            .find(|k| k.prefix() == first)
            .ok_or_else(|| IndexError::Unrecognized(first, name.to_owned()))
    }
}

impl Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wolfram_rep())
    }
}

/// A single signed index occurrence on a tensor.
///
/// `lowered` is the textual leading `-`. The stored `name` never carries the
/// sign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Index {
    kind: IndexKind,
    lowered: bool,
    name: String,
}

impl Index {
    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    pub fn is_lowered(&self) -> bool {
        self.lowered
    }

    /// The sign-stripped label, e.g. `"i0"` for both `i0` and `-i0`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flip upper to lower and back. An involution.
    pub fn raise_lower(&self) -> Index {
        Index {
            kind: self.kind,
            lowered: !self.lowered,
            name: self.name.clone(),
        }
    }

    /// Flip the sign only when the kind transforms under conjugation.
    pub(crate) fn conjugate(&self) -> Index {
        if self.kind.flips_under_conjugation() {
            self.raise_lower()
        } else {
            self.clone()
        }
    }

    /// Parse a whitespace-separated list of index labels.
    pub fn parse_list(indices: &str) -> Result<Vec<Index>, IndexError> {
        indices.split_whitespace().map(str::parse).collect()
    }
}

impl FromStr for Index {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lowered, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let kind = IndexKind::classify(name)?;
        Ok(Index {
            kind,
            lowered,
            name: name.to_owned(),
        })
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lowered {
            write!(f, "-{}", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Sort index names into the canonical kind order, stably.
///
/// The target format expects a tensor's indices grouped by kind in a fixed
/// order regardless of the order they were written in; within a kind the
/// first-seen order is preserved.
pub fn sort_index_names(indices: &[Index]) -> Vec<String> {
    let mut sorted: Vec<&Index> = indices.iter().collect();
    sorted.sort_by_key(|i| i.kind());
    sorted.into_iter().map(|i| i.name().to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    #[test]
    fn classification() {
        assert_eq!(
            "i0".parse::<Index>().unwrap().kind(),
            IndexKind::IsospinFund
        );
        assert_eq!(
            "-c9".parse::<Index>().unwrap().kind(),
            IndexKind::ColourFund
        );
        assert_eq!(
            "I11".parse::<Index>().unwrap().kind(),
            IndexKind::IsospinAdjoint
        );
        assert_eq!("g".parse::<Index>().unwrap().kind(), IndexKind::Generation);
        assert_eq!("mu".parse::<Index>().unwrap().kind(), IndexKind::Lorentz);

        assert_eq!(
            "z0".parse::<Index>(),
            Err(IndexError::Unrecognized('z', "z0".to_owned()))
        );
        assert_eq!("".parse::<Index>(), Err(IndexError::Empty));
    }

    #[test]
    fn no_prefix_collisions() {
        let mut seen = AHashSet::new();
        for kind in IndexKind::ALL {
            assert!(
                seen.insert(kind.prefix()),
                "prefix '{}' registered twice",
                kind.prefix()
            );
        }
    }

    #[test]
    fn raise_lower_round_trip() {
        for label in ["i0", "-i0", "s3", "-g1", "q2"] {
            let idx: Index = label.parse().unwrap();
            assert_eq!(idx.raise_lower().raise_lower(), idx);
            assert_eq!(idx.to_string(), label);
        }
    }

    #[test]
    fn sign_parsing() {
        let lowered: Index = "-i0".parse().unwrap();
        assert!(lowered.is_lowered());
        assert_eq!(lowered.name(), "i0");
        assert_eq!(lowered.raise_lower().to_string(), "i0");
    }

    #[test]
    fn conjugation_invariant_kinds() {
        assert!(!IndexKind::Generation.flips_under_conjugation());
        assert!(!IndexKind::IsospinAdjoint.flips_under_conjugation());
        assert!(!IndexKind::Isospin4.flips_under_conjugation());
        assert!(!IndexKind::ColourAdjoint.flips_under_conjugation());
        assert!(!IndexKind::ColourSextet.flips_under_conjugation());
        assert!(IndexKind::Spinor.flips_under_conjugation());
        assert!(IndexKind::ColourFund.flips_under_conjugation());

        let gen: Index = "g0".parse().unwrap();
        assert_eq!(gen.conjugate(), gen);
        let iso: Index = "i0".parse().unwrap();
        assert!(iso.conjugate().is_lowered());
    }

    #[test]
    fn canonical_sort_is_stable() {
        let indices = Index::parse_list("c1 g0 c0 i0 s0").unwrap();
        assert_eq!(sort_index_names(&indices), ["s0", "i0", "g0", "c1", "c0"]);
    }
}
