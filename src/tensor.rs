//! The atomic indexed object and its product-forming algebra.
//!
//! A [`Tensor`] is a label plus an ordered list of signed [`Index`] slots. It
//! is one of three things, tagged explicitly by [`TensorKind`]: an invariant
//! tensor (epsilon, delta, a generator), a [coupling](TensorKind::Coupling)
//! constant, or a physical [field](crate::field::FieldData). All operations
//! are pure: conjugation returns a fresh value and never mutates the
//! receiver.

use crate::field::{FermionData, FieldData, ParticleKind};
use crate::index::{sort_index_names, Index, IndexError};
use num::rational::Rational64;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Exact scalar coefficient carried by a coupling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prefactor {
    Rational(Rational64),
    Sqrt(u32),
    ImaginaryUnit,
}

impl Display for Prefactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefactor::Rational(r) => write!(f, "{r}"),
            Prefactor::Sqrt(n) => write!(f, "Sqrt[{n}]"),
            Prefactor::ImaginaryUnit => write!(f, "I"),
        }
    }
}

/// What a [`Tensor`] stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TensorKind {
    /// A fixed invariant tensor of the symmetry groups.
    Invariant,
    /// A coupling constant attached to a term.
    Coupling {
        complex: bool,
        prefactor: Option<Prefactor>,
    },
    /// A physical field.
    Field(FieldData),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tensor {
    label: String,
    display_name: String,
    indices: Vec<Index>,
    conjugated: bool,
    kind: TensorKind,
    /// Written once, by the first free-Lagrangian emission.
    #[serde(skip)]
    term_name: OnceCell<String>,
}

/// Equality ignores the emitted-name cache.
impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.display_name == other.display_name
            && self.indices == other.indices
            && self.conjugated == other.conjugated
            && self.kind == other.kind
    }
}

impl Tensor {
    /// A plain invariant tensor. `indices` is a whitespace-separated list of
    /// labels, empty for an index-free object.
    pub fn new(label: impl Into<String>, indices: &str) -> Result<Tensor, IndexError> {
        Ok(Tensor::from_parts(
            label,
            Index::parse_list(indices)?,
            TensorKind::Invariant,
        ))
    }

    pub(crate) fn from_parts(
        label: impl Into<String>,
        indices: Vec<Index>,
        kind: TensorKind,
    ) -> Tensor {
        let label = label.into();
        Tensor {
            display_name: label.clone(),
            label,
            indices,
            conjugated: false,
            kind,
            term_name: OnceCell::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Tensor {
        self.display_name = display_name.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn indices(&self) -> &[Index] {
        &self.indices
    }

    pub(crate) fn indices_mut(&mut self) -> &mut Vec<Index> {
        &mut self.indices
    }

    pub fn is_conjugated(&self) -> bool {
        self.conjugated
    }

    pub(crate) fn set_conjugated(&mut self, conjugated: bool) {
        self.conjugated = conjugated;
    }

    pub fn kind(&self) -> &TensorKind {
        &self.kind
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, TensorKind::Field(_))
    }

    pub fn is_coupling(&self) -> bool {
        matches!(self.kind, TensorKind::Coupling { .. })
    }

    pub fn field(&self) -> Option<&FieldData> {
        match &self.kind {
            TensorKind::Field(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn field_mut(&mut self) -> Option<&mut FieldData> {
        match &mut self.kind {
            TensorKind::Field(data) => Some(data),
            _ => None,
        }
    }

    pub fn fermion(&self) -> Option<&FermionData> {
        match self.field()?.particle() {
            ParticleKind::Fermion(data) => Some(data),
            _ => None,
        }
    }

    /// Sign-stripped index names in the canonical emission order.
    pub fn index_names(&self) -> Vec<String> {
        sort_index_names(&self.indices)
    }

    /// The hermitian conjugate.
    ///
    /// Flips the placement of every index whose kind transforms under
    /// conjugation and toggles the conjugation flag. A self-conjugate scalar
    /// is its own conjugate and comes back unchanged, flag still unset.
    pub fn conj(&self) -> Tensor {
        if let Some(field) = self.field() {
            if field.is_self_conjugate() && matches!(field.particle(), ParticleKind::Scalar) {
                return self.clone();
            }
        }
        let mut conj = self.clone();
        conj.indices = self.indices.iter().map(Index::conjugate).collect();
        conj.conjugated = !self.conjugated;
        conj
    }

    /// Retrieve the free-Lagrangian term name, if one has been emitted.
    pub fn term_name(&self) -> Option<&str> {
        self.term_name.get().map(String::as_str)
    }

    pub(crate) fn cache_term_name(&self, name: &str) -> String {
        self.term_name.get_or_init(|| name.to_owned()).clone()
    }

    /// Wolfram-language form of the single tensor.
    pub fn wolfram(&self) -> String {
        let names = self.index_names();
        match &self.kind {
            TensorKind::Invariant => bracketed(&self.label, &names),
            TensorKind::Coupling { prefactor, .. } => {
                let label = if self.conjugated {
                    format!("Conjugate[{}]", self.label)
                } else {
                    self.label.clone()
                };
                let body = bracketed(&label, &names);
                match prefactor {
                    Some(factor) => format!("{factor} {body}"),
                    None => body,
                }
            }
            TensorKind::Field(field) => field.wolfram_atom(self, &names),
        }
    }
}

fn bracketed(label: &str, names: &[String]) -> String {
    if names.is_empty() {
        label.to_owned()
    } else {
        format!("{}[{}]", label, names.join(","))
    }
}

impl Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices: Vec<String> = self.indices.iter().map(|i| i.to_string()).collect();
        write!(f, "{}({})", self.label, indices.join(","))
    }
}

/// A coupling constant. `complex` decides whether the model file pairs the
/// term with its hermitian conjugate.
pub fn coupling(label: &str, indices: &str, complex: bool) -> Result<Tensor, IndexError> {
    Ok(Tensor::from_parts(
        label,
        Index::parse_list(indices)?,
        TensorKind::Coupling {
            complex,
            prefactor: None,
        },
    ))
}

impl Tensor {
    /// Attach an exact prefactor to a coupling. No-op on anything else.
    pub fn with_prefactor(mut self, factor: Prefactor) -> Tensor {
        if let TensorKind::Coupling { prefactor, .. } = &mut self.kind {
            *prefactor = Some(factor);
        }
        self
    }

    pub fn is_complex_coupling(&self) -> bool {
        matches!(self.kind, TensorKind::Coupling { complex: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_defaults() {
        let t = Tensor::new("A", "i0 -j")
            .expect_err("j is not a registered prefix");
        assert!(matches!(t, IndexError::Unrecognized('j', _)));

        let t = Tensor::new("A", "i0 -i1").unwrap();
        assert_eq!(t.label(), "A");
        assert_eq!(t.display_name(), "A");
        assert!(!t.is_field());
        assert!(!t.is_conjugated());
        assert_eq!(t.to_string(), "A(i0,-i1)");

        let empty = Tensor::new("S", "").unwrap();
        assert!(empty.indices().is_empty());
        assert_eq!(empty.wolfram(), "S");
    }

    #[test]
    fn conjugation_involution() {
        let t = Tensor::new("A", "s0 i0 -c0 g0 I1 q0").unwrap();
        let cc = t.conj().conj();
        assert_eq!(cc.indices(), t.indices());
        assert_eq!(cc.is_conjugated(), t.is_conjugated());
        assert_eq!(cc, t);
    }

    #[test]
    fn conjugation_respects_kind_policy() {
        let t = Tensor::new("A", "s0 g0 I0 q1 A0 x0").unwrap();
        let conj = t.conj();
        let signs: Vec<bool> = conj.indices().iter().map(|i| i.is_lowered()).collect();
        // Only the spinor slot flips.
        assert_eq!(signs, [true, false, false, false, false, false]);
        assert!(conj.is_conjugated());
        // The receiver is untouched.
        assert!(!t.is_conjugated());
        assert!(t.indices().iter().all(|i| !i.is_lowered()));
    }

    #[test]
    fn canonical_index_order_in_output() {
        let t = Tensor::new("A", "g0 i0 s0").unwrap();
        assert_eq!(t.wolfram(), "A[s0,i0,g0]");
        let same = Tensor::new("A", "s0 g0 i0").unwrap();
        assert_eq!(same.wolfram(), "A[s0,i0,g0]");
    }

    #[test]
    fn coupling_wolfram() {
        let lam = coupling("lam", "-g0 -g1", true).unwrap();
        assert_eq!(lam.wolfram(), "lam[g0,g1]");
        assert!(lam.is_complex_coupling());
        assert!(!lam.is_field());

        let half = coupling("kap", "", false)
            .unwrap()
            .with_prefactor(Prefactor::Rational(Rational64::new(1, 2)));
        assert_eq!(half.wolfram(), "1/2 kap");

        let root = coupling("y", "", true)
            .unwrap()
            .with_prefactor(Prefactor::Sqrt(2));
        assert_eq!(root.wolfram(), "Sqrt[2] y");
    }
}
