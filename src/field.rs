//! Physical fields: scalars, fermions and vectors.
//!
//! A field is a [`Tensor`] whose kind payload is a [`FieldData`]: the
//! hypercharge as defined (never flipped by conjugation; the sign is applied
//! at summation time), the standard-model and self-conjugation flags, and an
//! explicit [`ParticleKind`] spin tag. Fermions additionally carry a small
//! chirality state machine: they are built `Dirac`-undetermined and must be
//! projected with [`Tensor::left`] or [`Tensor::right`] before they can enter
//! a term.

use crate::index::IndexError;
use crate::tensor::{Tensor, TensorKind};
use crate::wolfram::{wolfram_block, wolfram_index_entry};
use num::rational::Rational64;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChiralityError {
    #[error("'{0}' is not a fermion")]
    NotFermion(String),
    #[error("chirality of '{0}' is already projected to {1}")]
    AlreadyProjected(String, Chirality),
    #[error("chirality of '{0}' has not been projected to left or right")]
    Unprojected(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chirality {
    Left,
    Right,
    /// Not yet projected onto a Weyl component.
    Dirac,
}

impl Chirality {
    pub fn flipped(self) -> Chirality {
        match self {
            Chirality::Left => Chirality::Right,
            Chirality::Right => Chirality::Left,
            Chirality::Dirac => Chirality::Dirac,
        }
    }

    /// Suffix letter appended to exotic fermion labels on emission.
    fn letter(self) -> &'static str {
        match self {
            Chirality::Left => "L",
            Chirality::Right => "R",
            Chirality::Dirac => "",
        }
    }
}

impl Display for Chirality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chirality::Left => write!(f, "left"),
            Chirality::Right => write!(f, "right"),
            Chirality::Dirac => write!(f, "dirac"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FermionData {
    chirality: Chirality,
    charge_conjugated: bool,
    dirac_adjoint: bool,
}

impl FermionData {
    pub fn chirality(&self) -> Chirality {
        self.chirality
    }

    pub fn is_charge_conjugated(&self) -> bool {
        self.charge_conjugated
    }

    pub fn is_dirac_adjoint(&self) -> bool {
        self.dirac_adjoint
    }
}

/// Spin tag, stored at construction rather than derived from anything.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    Scalar,
    Fermion(FermionData),
    Vector,
}

impl ParticleKind {
    /// Letter heading the FeynRules class declaration.
    pub fn spin_letter(&self) -> &'static str {
        match self {
            ParticleKind::Scalar => "S",
            ParticleKind::Fermion(_) => "F",
            ParticleKind::Vector => "V",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    hypercharge: Rational64,
    standard_model: bool,
    self_conjugate: bool,
    particle: ParticleKind,
}

impl FieldData {
    pub fn hypercharge(&self) -> Rational64 {
        self.hypercharge
    }

    pub fn is_standard_model(&self) -> bool {
        self.standard_model
    }

    pub fn is_self_conjugate(&self) -> bool {
        self.self_conjugate
    }

    pub fn particle(&self) -> &ParticleKind {
        &self.particle
    }

    fn fermion(&self) -> Option<&FermionData> {
        match &self.particle {
            ParticleKind::Fermion(data) => Some(data),
            _ => None,
        }
    }

    fn fermion_mut(&mut self) -> Option<&mut FermionData> {
        match &mut self.particle {
            ParticleKind::Fermion(data) => Some(data),
            _ => None,
        }
    }

    /// Emission of the field as a single factor; `names` are the
    /// canonically sorted index names of the owning tensor.
    pub(crate) fn wolfram_atom(&self, tensor: &Tensor, names: &[String]) -> String {
        match &self.particle {
            ParticleKind::Fermion(data) => {
                let mut label = tensor.label().to_owned();
                if !self.standard_model {
                    label.push_str(data.chirality.letter());
                }
                if data.charge_conjugated {
                    label = format!("CC[{label}]");
                }
                if data.dirac_adjoint {
                    label = format!("anti[{label}]");
                }
                let mut output = bracket(&label, names);
                if data.dirac_adjoint {
                    // Matrix multiplication: the next factor chains with `.`
                    output.push('.');
                }
                output
            }
            ParticleKind::Scalar | ParticleKind::Vector => {
                let label = if tensor.is_conjugated() {
                    format!("anti[{}]", tensor.label())
                } else {
                    tensor.label().to_owned()
                };
                bracket(&label, names)
            }
        }
    }
}

fn bracket(label: &str, names: &[String]) -> String {
    if names.is_empty() {
        label.to_owned()
    } else {
        format!("{}[{}]", label, names.join(","))
    }
}

/// `True`/`False`, the Wolfram spelling.
fn wolfram_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

pub fn scalar(label: &str, indices: &str, hypercharge: Rational64) -> Result<Tensor, IndexError> {
    field_tensor(label, indices, hypercharge, ParticleKind::Scalar)
}

pub fn fermion(label: &str, indices: &str, hypercharge: Rational64) -> Result<Tensor, IndexError> {
    field_tensor(
        label,
        indices,
        hypercharge,
        ParticleKind::Fermion(FermionData {
            chirality: Chirality::Dirac,
            charge_conjugated: false,
            dirac_adjoint: false,
        }),
    )
}

pub fn vector(label: &str, indices: &str, hypercharge: Rational64) -> Result<Tensor, IndexError> {
    field_tensor(label, indices, hypercharge, ParticleKind::Vector)
}

fn field_tensor(
    label: &str,
    indices: &str,
    hypercharge: Rational64,
    particle: ParticleKind,
) -> Result<Tensor, IndexError> {
    Ok(Tensor::from_parts(
        label,
        crate::index::Index::parse_list(indices)?,
        TensorKind::Field(FieldData {
            hypercharge,
            standard_model: false,
            self_conjugate: false,
            particle,
        }),
    ))
}

impl Tensor {
    /// Mark a field as part of the standard model.
    pub fn standard_model(mut self) -> Tensor {
        if let Some(field) = self.field_mut() {
            field.standard_model = true;
        }
        self
    }

    /// Mark a field as equal to its own conjugate (real scalar / Majorana).
    pub fn self_conjugate(mut self) -> Tensor {
        if let Some(field) = self.field_mut() {
            field.self_conjugate = true;
        }
        self
    }

    /// Fix the chirality at construction time (standard-model fermions come
    /// with a definite handedness).
    pub fn chiral(mut self, chirality: Chirality) -> Tensor {
        if let Some(data) = self.field_mut().and_then(FieldData::fermion_mut) {
            data.chirality = chirality;
        }
        self
    }

    pub fn chirality(&self) -> Option<Chirality> {
        Some(self.fermion()?.chirality())
    }

    fn fermion_checked(&self) -> Result<&FermionData, ChiralityError> {
        self.fermion()
            .ok_or_else(|| ChiralityError::NotFermion(self.label().to_owned()))
    }

    fn project(&self, chirality: Chirality) -> Result<Tensor, ChiralityError> {
        let data = self.fermion_checked()?;
        if data.chirality != Chirality::Dirac {
            return Err(ChiralityError::AlreadyProjected(
                self.label().to_owned(),
                data.chirality,
            ));
        }
        let mut out = self.clone();
        out.field_mut()
            .and_then(FieldData::fermion_mut)
            .expect("checked above")
            .chirality = chirality;
        Ok(out)
    }

    /// Project an undetermined fermion onto its left-handed component.
    pub fn left(&self) -> Result<Tensor, ChiralityError> {
        self.project(Chirality::Left)
    }

    /// Project an undetermined fermion onto its right-handed component.
    pub fn right(&self) -> Result<Tensor, ChiralityError> {
        self.project(Chirality::Right)
    }

    /// Charge conjugation: hermitian conjugation, then the chirality flips
    /// and the first (spinor-adjacent) index is raised or lowered back.
    pub fn charge_conj(&self) -> Result<Tensor, ChiralityError> {
        let data = self.fermion_checked()?;
        if data.chirality == Chirality::Dirac {
            return Err(ChiralityError::Unprojected(self.label().to_owned()));
        }
        let mut out = self.conj();
        if let Some(first) = out.indices_mut().first_mut() {
            *first = first.raise_lower();
        }
        let data = out
            .field_mut()
            .and_then(FieldData::fermion_mut)
            .expect("checked above");
        data.chirality = data.chirality.flipped();
        data.charge_conjugated = !data.charge_conjugated;
        Ok(out)
    }

    /// Dirac adjoint: hermitian conjugation with the adjoint flag toggled.
    /// Chirality is untouched.
    pub fn bar(&self) -> Result<Tensor, ChiralityError> {
        self.fermion_checked()?;
        let mut out = self.conj();
        let data = out
            .field_mut()
            .and_then(FieldData::fermion_mut)
            .expect("checked above");
        data.dirac_adjoint = !data.dirac_adjoint;
        Ok(out)
    }

    /// The free (kinetic + mass) Lagrangian of an exotic field, wrapped in
    /// the standard term envelope. Records the term name `LFree<label>` for
    /// the model-level sum.
    ///
    /// Must never be called on a standard-model field.
    pub fn free_terms(&self) -> String {
        let field = self.field().expect("free_terms called on a non-field");
        assert!(
            !field.standard_model,
            "free terms are only generated for exotic fields"
        );

        let names = self.index_names();
        let label = self.label();
        let mass = format!("M{label}");
        let half = if field.self_conjugate { "1/2 " } else { "" };

        let (expr, mut locals) = match &field.particle {
            ParticleKind::Fermion(_) => {
                let body = bracket(label, &names);
                let adjoint = bracket(&format!("anti[{label}]"), &names);
                let kinetic = format!("{half}I {adjoint}.Ga[mu].DC[{body}, mu]");
                let mass_term = format!("{half}{mass} {adjoint}.{body}");
                (format!("{kinetic} - {mass_term}"), names)
            }
            ParticleKind::Scalar | ParticleKind::Vector => {
                // Always write the dagger on the left factor, whichever
                // orientation the field was handed to us in.
                let (dagger, plain) = if self.is_conjugated() {
                    (self.wolfram(), self.conj().wolfram())
                } else {
                    (self.conj().wolfram(), self.wolfram())
                };
                let kinetic = format!("{half}DC[{dagger}, mu] DC[{plain}, mu]");
                let mass_term = format!("{half}{mass}^2 {dagger} {plain}");
                (format!("{kinetic} - {mass_term}"), names)
            }
        };
        locals.push("mu".to_owned());

        let term_name = self.cache_term_name(&format!("LFree{label}"));
        format!(
            "{term_name} :=\n{}",
            wolfram_block(locals, &expr, "/.gotoBFM")
        )
    }

    /// One numbered entry of the `M$ClassesDescription` block.
    ///
    /// Spinor indices are dropped from the declaration; the hypercharge
    /// quantum number is omitted for self-conjugate fields.
    pub fn class_entry(&self, number: usize) -> String {
        let field = self.field().expect("class_entry called on a non-field");
        assert!(
            !field.standard_model,
            "class entries are only generated for exotic fields"
        );

        let indices: Vec<String> = self
            .indices()
            .iter()
            .filter(|i| i.kind() != crate::index::IndexKind::Spinor)
            .map(wolfram_index_entry)
            .collect();

        let mut lines = vec![
            format!("{}[{}] == ", field.particle.spin_letter(), number),
            format!("{{ ClassName -> {}", self.label()),
            format!("  , Mass -> M{}", self.label()),
            "  , Width -> 0".to_owned(),
            format!("  , SelfConjugate -> {}", wolfram_bool(field.self_conjugate)),
        ];
        if !field.self_conjugate {
            lines.push(format!("  , QuantumNumbers -> {{Y -> {}}}", field.hypercharge));
        }
        if !indices.is_empty() {
            lines.push(format!("  , Indices -> {{{}}}", indices.join(", ")));
        }
        lines.push("  , FullName -> \"heavy\"".to_owned());
        lines.push("}".to_owned());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64, d: i64) -> Rational64 {
        Rational64::new(n, d)
    }

    #[test]
    fn self_conjugate_scalar_is_a_fixed_point() {
        let s = scalar("S", "", rat(0, 1)).unwrap().self_conjugate();
        let conj = s.conj();
        assert_eq!(conj, s);
        assert!(!conj.is_conjugated());
        // A plain complex scalar does conjugate.
        let varphi = scalar("varphi", "i0", rat(1, 2)).unwrap();
        assert!(varphi.conj().is_conjugated());
        assert!(varphi.conj().indices()[0].is_lowered());
    }

    #[test]
    fn chirality_projection() {
        let n = fermion("N", "s0", rat(0, 1)).unwrap();
        assert_eq!(n.chirality(), Some(Chirality::Dirac));

        let left = n.left().unwrap();
        assert_eq!(left.chirality(), Some(Chirality::Left));
        assert_eq!(
            left.left(),
            Err(ChiralityError::AlreadyProjected(
                "N".to_owned(),
                Chirality::Left
            ))
        );
        assert_eq!(
            n.charge_conj(),
            Err(ChiralityError::Unprojected("N".to_owned()))
        );

        let h = scalar("H", "i0", rat(1, 2)).unwrap();
        assert_eq!(h.left(), Err(ChiralityError::NotFermion("H".to_owned())));
    }

    #[test]
    fn charge_conjugation_keeps_first_index_placement() {
        let delta = fermion("Delta1", "s0 i0", rat(-1, 2)).unwrap();
        let cc = delta.left().unwrap().charge_conj().unwrap();
        // Conjugation lowered both, then the spinor slot was raised back.
        assert!(!cc.indices()[0].is_lowered());
        assert!(cc.indices()[1].is_lowered());
        assert_eq!(cc.chirality(), Some(Chirality::Right));
        assert!(cc.fermion().unwrap().is_charge_conjugated());
        assert!(cc.is_conjugated());
    }

    #[test]
    fn dirac_adjoint_marks_matrix_chain() {
        let e = fermion("E", "s0", rat(-1, 1)).unwrap();
        let bar = e.left().unwrap().bar().unwrap();
        assert!(bar.fermion().unwrap().is_dirac_adjoint());
        assert_eq!(bar.chirality(), Some(Chirality::Left));
        assert_eq!(bar.wolfram(), "anti[EL][s0].");

        let cc_bar = e.left().unwrap().charge_conj().unwrap().bar().unwrap();
        assert_eq!(cc_bar.wolfram(), "anti[CC[ER]][s0].");
        // Two conjugations cancel in the bookkeeping flag.
        assert!(!cc_bar.is_conjugated());
    }

    #[test]
    fn standard_model_fermions_keep_their_bare_label() {
        let l = fermion("L", "s0 i0 g0", rat(-1, 2))
            .unwrap()
            .standard_model()
            .chiral(Chirality::Left);
        assert_eq!(l.wolfram(), "L[s0,i0,g0]");
        assert_eq!(l.bar().unwrap().wolfram(), "anti[L][s0,i0,g0].");
    }

    #[test]
    fn free_terms_scalar() {
        let omega = scalar("omega1", "c0", rat(-1, 3)).unwrap();
        let terms = omega.free_terms();
        assert!(terms.starts_with("LFreeomega1 :=\n"));
        assert!(terms.contains("DC[anti[omega1][c0], mu] DC[omega1[c0], mu]"));
        assert!(terms.contains("Momega1^2 anti[omega1][c0] omega1[c0]"));
        assert!(terms.ends_with("/.gotoBFM;"));
        assert_eq!(omega.term_name(), Some("LFreeomega1"));

        // The dagger stays on the left when the field arrives conjugated.
        let conj = scalar("omega1", "c0", rat(-1, 3)).unwrap().conj();
        assert!(conj
            .free_terms()
            .contains("DC[anti[omega1][c0], mu] DC[omega1[c0], mu]"));
    }

    #[test]
    fn free_terms_self_conjugate_halved() {
        let s = scalar("S", "", rat(0, 1)).unwrap().self_conjugate();
        let terms = s.free_terms();
        assert!(terms.contains("1/2 DC[S, mu] DC[S, mu]"));
        assert!(terms.contains("1/2 MS^2 S S"));
    }

    #[test]
    fn free_terms_fermion() {
        let e = fermion("E", "s0", rat(-1, 1)).unwrap();
        let terms = e.free_terms();
        assert!(terms.contains("I anti[E][s0].Ga[mu].DC[E[s0], mu]"));
        assert!(terms.contains("ME anti[E][s0].E[s0]"));
    }

    #[test]
    fn class_entries() {
        let delta = fermion("Delta1", "s0 i0", rat(-1, 2)).unwrap();
        assert_eq!(
            delta.class_entry(101),
            "F[101] == \n\
             { ClassName -> Delta1\n\
             \x20 , Mass -> MDelta1\n\
             \x20 , Width -> 0\n\
             \x20 , SelfConjugate -> False\n\
             \x20 , QuantumNumbers -> {Y -> -1/2}\n\
             \x20 , Indices -> {Index[SU2D]}\n\
             \x20 , FullName -> \"heavy\"\n\
             }"
        );

        // Self-conjugate: no hypercharge quantum number.
        let xi = scalar("Xi", "I0", rat(0, 1)).unwrap().self_conjugate();
        let entry = xi.class_entry(102);
        assert!(entry.starts_with("S[102] == "));
        assert!(!entry.contains("QuantumNumbers"));
        assert!(entry.contains("SelfConjugate -> True"));
        assert!(entry.contains("Indices -> {Index[SU2W]}"));
    }
}
