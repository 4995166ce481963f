//! Products of tensors and the contraction bookkeeping over them.
//!
//! A [`TensorProduct`] is one summand of the interaction Lagrangian: exactly
//! one coupling and any number of fields and invariant tensors, in the order
//! they were multiplied (the order matters for fermion-chain emission).
//! Multiplication never validates; intermediate products are legitimately
//! open. Validation happens once, at model-assembly time.

use crate::index::sort_index_names;
use crate::tensor::Tensor;
use crate::wolfram::{wolfram_block, wolfram_index_entry};
use ahash::AHashSet;
use indexmap::IndexSet;
use num::rational::Rational64;
use num::Zero;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::ops::Mul;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractionError {
    #[error("index '{0}' appears twice as an upper index; it can never be contracted")]
    RepeatedUpper(String),
    #[error("index '{0}' appears twice as a lower index; it can never be contracted")]
    RepeatedLower(String),
    #[error("term has uncontracted indices: {0:?}")]
    FreeIndices(Vec<String>),
    #[error("a term must carry exactly one coupling, found {0}")]
    CouplingCount(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TensorProduct {
    tensors: Vec<Tensor>,
    /// Written once, by the first term emission.
    #[serde(skip)]
    term_name: OnceCell<String>,
}

impl TensorProduct {
    pub fn new(tensors: Vec<Tensor>) -> TensorProduct {
        TensorProduct {
            tensors,
            term_name: OnceCell::new(),
        }
    }

    pub fn tensors(&self) -> &[Tensor] {
        &self.tensors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tensor> {
        self.tensors.iter()
    }

    pub fn couplings(&self) -> Vec<&Tensor> {
        self.tensors.iter().filter(|t| t.is_coupling()).collect()
    }

    /// The unique coupling of a finished term.
    pub fn coupling(&self) -> Result<&Tensor, ContractionError> {
        let couplings = self.couplings();
        match couplings.as_slice() {
            [single] => Ok(single),
            _ => Err(ContractionError::CouplingCount(couplings.len())),
        }
    }

    pub fn fields(&self) -> Vec<&Tensor> {
        self.tensors.iter().filter(|t| t.is_field()).collect()
    }

    pub fn exotics(&self) -> Vec<&Tensor> {
        self.fields()
            .into_iter()
            .filter(|t| !t.field().map(|f| f.is_standard_model()).unwrap_or(true))
            .collect()
    }

    /// Whether the unique coupling is complex, so the model file needs the
    /// hermitian-conjugate partner of this term.
    pub fn is_complex(&self) -> Result<bool, ContractionError> {
        Ok(self.coupling()?.is_complex_coupling())
    }

    /// The uncontracted indices of the product, sorted by name.
    ///
    /// Index occurrences are partitioned by placement; a name repeated on the
    /// same side anywhere in the product is always an authoring error. The
    /// symmetric difference of the two sides is the free set, which must be
    /// empty for a finished term but not for a partial product.
    pub fn free_indices(&self) -> Result<Vec<String>, ContractionError> {
        let mut upper = AHashSet::new();
        let mut lower = AHashSet::new();
        for tensor in &self.tensors {
            for index in tensor.indices() {
                let name = index.name().to_owned();
                if index.is_lowered() {
                    if !lower.insert(name) {
                        return Err(ContractionError::RepeatedLower(
                            index.name().to_owned(),
                        ));
                    }
                } else if !upper.insert(name) {
                    return Err(ContractionError::RepeatedUpper(index.name().to_owned()));
                }
            }
        }
        let mut free: Vec<String> = upper.symmetric_difference(&lower).cloned().collect();
        free.sort();
        Ok(free)
    }

    /// Check the invariants of a finished interaction term: fully contracted
    /// and carrying exactly one coupling.
    pub fn validate(&self) -> Result<(), ContractionError> {
        self.coupling()?;
        let free = self.free_indices()?;
        if !free.is_empty() {
            return Err(ContractionError::FreeIndices(free));
        }
        Ok(())
    }

    /// Sum of field hypercharges, with the sign flipped for conjugated
    /// factors. Zero for a gauge-invariant term.
    pub fn sum_hypercharges(&self) -> Rational64 {
        let mut tally = Rational64::zero();
        for tensor in &self.tensors {
            if let Some(field) = tensor.field() {
                if tensor.is_conjugated() {
                    tally -= field.hypercharge();
                } else {
                    tally += field.hypercharge();
                }
            }
        }
        tally
    }

    /// The name of the emitted Lagrangian term, if it has been emitted.
    pub fn term_name(&self) -> Option<&str> {
        self.term_name.get().map(String::as_str)
    }

    /// Emit the term as a named Wolfram-language block.
    ///
    /// Factors are concatenated left to right, separated by a space except
    /// after a Dirac adjoint's trailing `.`, so fermion bilinears chain as
    /// matrix products. The term name is `L` followed by the coupling label
    /// and is recorded on the product; repeated calls give byte-identical
    /// output.
    pub fn wolfram(&self) -> Result<String, ContractionError> {
        self.coupling()?;

        let mut output = String::new();
        let mut labels = String::new();
        let mut locals: IndexSet<String> = IndexSet::new();

        for tensor in &self.tensors {
            if tensor.is_coupling() {
                labels.push_str(tensor.label());
            }
            for name in sort_index_names(tensor.indices()) {
                locals.insert(name);
            }
            let factor = tensor.wolfram();
            output.push_str(&factor);
            if !factor.ends_with('.') {
                output.push(' ');
            }
        }

        let term_name = self
            .term_name
            .get_or_init(|| format!("L{labels}"))
            .clone();
        Ok(format!(
            "{term_name} :=\n{}",
            wolfram_block(locals, output.trim_end(), "")
        ))
    }

    /// The `M$Parameters` entries this term needs: one declaration for the
    /// coupling, one mass parameter per exotic field.
    pub fn param_entries(&self) -> Result<Vec<String>, ContractionError> {
        let coupling = self.coupling()?;

        // Couplings only ever carry generation indices.
        let indices: Vec<String> = coupling
            .indices()
            .iter()
            .map(wolfram_index_entry)
            .collect();

        let mut lines = vec![
            format!("{} == ", coupling.label()),
            "{ ParameterType -> Internal".to_owned(),
            format!(
                "  , ComplexParameter -> {}",
                if coupling.is_complex_coupling() {
                    "True"
                } else {
                    "False"
                }
            ),
        ];
        if !indices.is_empty() {
            lines.push(format!("  , Indices -> {{{}}}", indices.join(", ")));
        }
        lines.push("  , InteractionOrder -> {NP, 1}".to_owned());
        lines.push(format!(
            "  , Description -> \"Coupling {} of {} interaction\"",
            coupling.label(),
            self
        ));
        lines.push("}".to_owned());

        let mut entries = vec![lines.join("\n")];
        for field in self.exotics() {
            entries.push(format!(
                "M{} == \n{{ ParameterType -> Internal\n  , Description -> \"{} mass\"\n}}",
                field.label(),
                field.label()
            ));
        }
        Ok(entries)
    }
}

impl Display for TensorProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factors: Vec<String> = self.tensors.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", factors.join("*"))
    }
}

impl Mul for Tensor {
    type Output = TensorProduct;

    fn mul(self, rhs: Tensor) -> TensorProduct {
        TensorProduct::new(vec![self, rhs])
    }
}

impl Mul<TensorProduct> for Tensor {
    type Output = TensorProduct;

    fn mul(self, rhs: TensorProduct) -> TensorProduct {
        let mut tensors = vec![self];
        tensors.extend(rhs.tensors);
        TensorProduct::new(tensors)
    }
}

impl Mul<Tensor> for TensorProduct {
    type Output = TensorProduct;

    fn mul(mut self, rhs: Tensor) -> TensorProduct {
        self.tensors.push(rhs);
        TensorProduct::new(self.tensors)
    }
}

impl Mul for TensorProduct {
    type Output = TensorProduct;

    fn mul(mut self, rhs: TensorProduct) -> TensorProduct {
        self.tensors.extend(rhs.tensors);
        TensorProduct::new(self.tensors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{fermion, scalar};
    use crate::invariants::eps;
    use crate::tensor::coupling;

    fn rat(n: i64, d: i64) -> Rational64 {
        Rational64::new(n, d)
    }

    #[test]
    fn free_index_computation() {
        let prod = Tensor::new("A", "i0 i1").unwrap() * Tensor::new("A", "i2 -i1").unwrap();
        assert_eq!(prod.free_indices().unwrap(), ["i0", "i2"]);

        let closed = Tensor::new("A", "i0").unwrap() * Tensor::new("B", "-i0").unwrap();
        assert_eq!(closed.free_indices().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn repeated_same_side_index_is_an_error() {
        let bad = Tensor::new("A", "i0").unwrap() * Tensor::new("A", "i0").unwrap();
        assert_eq!(
            bad.free_indices(),
            Err(ContractionError::RepeatedUpper("i0".to_owned()))
        );

        let bad = Tensor::new("A", "-c0").unwrap() * Tensor::new("B", "-c0").unwrap();
        assert_eq!(
            bad.free_indices(),
            Err(ContractionError::RepeatedLower("c0".to_owned()))
        );
    }

    #[test]
    fn multiplication_preserves_order() {
        let a = Tensor::new("A", "i0").unwrap();
        let b = Tensor::new("B", "-i0").unwrap();
        let c = Tensor::new("C", "").unwrap();
        let prod = (a * b) * c;
        let labels: Vec<&str> = prod.iter().map(|t| t.label()).collect();
        assert_eq!(labels, ["A", "B", "C"]);
        assert_eq!(prod.to_string(), "A(i0)*B(-i0)*C()");
    }

    #[test]
    fn hypercharge_sum_flips_for_conjugates() {
        let term = coupling("kap", "", false).unwrap()
            * scalar("S1", "", rat(1, 1)).unwrap().conj()
            * scalar("H", "i0", rat(1, 2)).unwrap()
            * scalar("H2", "-i0", rat(1, 2)).unwrap();
        assert_eq!(term.sum_hypercharges(), rat(0, 1));
    }

    #[test]
    fn exactly_one_coupling() {
        let none = TensorProduct::new(vec![Tensor::new("A", "").unwrap()]);
        assert_eq!(none.coupling(), Err(ContractionError::CouplingCount(0)));
        assert!(none.wolfram().is_err());

        let two = coupling("a", "", true).unwrap() * coupling("b", "", true).unwrap();
        assert_eq!(two.coupling(), Err(ContractionError::CouplingCount(2)));
    }

    #[test]
    fn deterministic_serialization() {
        let term = coupling("kapS", "", false).unwrap()
            * scalar("S", "", rat(0, 1)).unwrap().self_conjugate()
            * scalar("H", "i0", rat(1, 2)).unwrap()
            * scalar("H", "i0", rat(1, 2)).unwrap().conj();
        let first = term.wolfram().unwrap();
        let second = term.wolfram().unwrap();
        assert_eq!(first, second);
        assert_eq!(term.term_name(), Some("LkapS"));
        assert!(first.starts_with("LkapS :=\nBlock[\n  {i0}\n"));
        assert!(first.contains("kapS S H[i0] anti[H][i0]"));
    }

    #[test]
    fn fermion_chains_join_without_space() {
        let term = coupling("lam", "", true).unwrap()
            * fermion("E", "s0", rat(-1, 1))
                .unwrap()
                .left()
                .unwrap()
                .bar()
                .unwrap()
            * fermion("Delta1", "s0 i0", rat(-1, 2))
                .unwrap()
                .right()
                .unwrap()
            * scalar("H", "i0", rat(1, 2))
                .unwrap()
                .standard_model()
                .conj();
        let out = term.wolfram().unwrap();
        assert!(out.contains("anti[EL][s0].Delta1R[s0,i0] anti[H][i0]"));
        assert_eq!(term.free_indices().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn validate_checks_closure_and_coupling() {
        let open = coupling("lam", "", true).unwrap() * Tensor::new("A", "i0").unwrap();
        assert_eq!(
            open.validate(),
            Err(ContractionError::FreeIndices(vec!["i0".to_owned()]))
        );

        let closed = coupling("lam", "", true).unwrap()
            * Tensor::new("A", "i0").unwrap()
            * Tensor::new("B", "-i0").unwrap();
        assert!(closed.validate().is_ok());
    }

    #[test]
    fn param_entries_shape() {
        let term = coupling("lamS1", "-g0 -g1", true).unwrap()
            * scalar("S1", "", rat(1, 1)).unwrap()
            * Tensor::new("A", "g0").unwrap()
            * Tensor::new("B", "g1").unwrap();
        let entries = term.param_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].starts_with("lamS1 == \n{ ParameterType -> Internal"));
        assert!(entries[0].contains("ComplexParameter -> True"));
        assert!(entries[0].contains("Indices -> {Index[Generation], Index[Generation]}"));
        assert!(entries[0].contains("InteractionOrder -> {NP, 1}"));
        assert!(entries[1].starts_with("MS1 == "));
    }

    #[test]
    fn eps_contraction_round_trip() {
        let term = coupling("lam", "", true).unwrap()
            * scalar("H", "i0", rat(1, 2)).unwrap()
            * scalar("phi", "i1", rat(-1, 2)).unwrap()
            * eps(&["-i0", "-i1"]).unwrap();
        assert!(term.validate().is_ok());
        assert_eq!(term.sum_hypercharges(), rat(0, 1));
    }
}
