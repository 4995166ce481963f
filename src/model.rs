//! Model assembly: a named collection of interaction terms and the exporters
//! that turn it into a FeynRules file, a MatchMakerParser configuration or a
//! LaTeX listing.

use crate::index::Index;
use crate::product::{ContractionError, TensorProduct};
use crate::tensor::Tensor;
use ahash::AHashSet;
use indexmap::IndexSet;
use num::rational::Rational64;
use num::Zero;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error(transparent)]
    Contraction(#[from] ContractionError),
    #[error("term '{term}' is not gauge invariant: hypercharges sum to {sum}")]
    Hypercharge { term: String, sum: Rational64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    name: String,
    terms: Vec<TensorProduct>,
}

impl Model {
    pub fn new(name: impl Into<String>, terms: Vec<TensorProduct>) -> Model {
        Model {
            name: name.into(),
            terms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[TensorProduct] {
        &self.terms
    }

    /// Every term must be fully contracted, carry exactly one coupling and
    /// sum its hypercharges to zero. Run before any export.
    pub fn validate(&self) -> Result<(), ModelError> {
        for term in &self.terms {
            term.validate()?;
            let sum = term.sum_hypercharges();
            if !sum.is_zero() {
                return Err(ModelError::Hypercharge {
                    term: term.to_string(),
                    sum,
                });
            }
        }
        Ok(())
    }

    /// The distinct fields of the model, one per label, in order of first
    /// appearance.
    pub fn fields(&self) -> Vec<&Tensor> {
        let mut seen = AHashSet::new();
        let mut fields = Vec::new();
        for term in &self.terms {
            for field in term.fields() {
                if seen.insert(field.label().to_owned()) {
                    fields.push(field);
                }
            }
        }
        fields
    }

    pub fn exotics(&self) -> Vec<&Tensor> {
        self.fields()
            .into_iter()
            .filter(|t| !t.field().map(|f| f.is_standard_model()).unwrap_or(true))
            .collect()
    }

    fn preamble(&self) -> String {
        let date = chrono::Local::now().format("%Y-%m-%d");
        let mut output = format!("M$ModelName = \"{}\";\n\n", self.name);
        output.push_str("M$Information =\n");
        output.push_str(&format!("{{ Date -> {date} }};\n\n"));
        output.push_str("M$InteractionOrderHierarchy =\n");
        output.push_str("{ {QCD, 1}\n");
        output.push_str(", {QED, 2}\n");
        output.push_str(", {NP, 1}\n");
        output.push_str("};\n\n");
        output
    }

    /// Render the model as a FeynRules file.
    ///
    /// Parameter and class entries are deduplicated in order of first
    /// appearance, so repeated export of the same model is byte-identical.
    pub fn export_feynrules(&self) -> Result<String, ModelError> {
        self.validate()?;
        log::debug!(
            "exporting model '{}': {} terms, {} exotics",
            self.name,
            self.terms.len(),
            self.exotics().len()
        );

        let mut params: IndexSet<String> = IndexSet::new();
        for term in &self.terms {
            for entry in term.param_entries()? {
                params.insert(entry);
            }
        }
        let mut param_block = "M$Parameters = {\n".to_owned();
        param_block.push_str(&params.iter().cloned().collect::<Vec<_>>().join("\n,  "));
        param_block.push_str("\n};\n\n");

        let exotics = self.exotics();
        let classes: Vec<String> = exotics
            .iter()
            .enumerate()
            .map(|(slot, field)| field.class_entry(101 + slot))
            .collect();
        let mut classes_block = "M$ClassesDescription = {\n".to_owned();
        classes_block.push_str(&classes.join("\n,  "));
        classes_block.push_str("\n};\n\n");

        let mut lagrangian =
            "(********************* The Lagrangian *********************)\n\n".to_owned();
        lagrangian.push_str(
            "gotoBFM={G[a__]->G[a]+GQuantum[a],Wi[a__]->Wi[a]+WiQuantum[a],B[a__]->B[a]+BQuantum[a]};\n\n",
        );

        let mut term_names: IndexSet<String> = IndexSet::new();
        for field in &exotics {
            lagrangian.push_str(&field.free_terms());
            lagrangian.push_str("\n\n");
            if let Some(name) = field.term_name() {
                term_names.insert(name.to_owned());
            }
        }
        for term in &self.terms {
            lagrangian.push_str(&term.wolfram()?);
            lagrangian.push_str("\n\n");
            if let Some(name) = term.term_name() {
                term_names.insert(name.to_owned());
                if term.is_complex()? {
                    term_names.insert(format!("HC[{name}]"));
                }
            }
        }

        let names: Vec<String> = term_names.into_iter().collect();
        let l_tot = format!("Ltot := LSM + {};", names.join(" + "));

        Ok(self.preamble() + &param_block + &classes_block + &lagrangian + &l_tot)
    }

    /// Render the matching configuration consumed by MatchMakerParser: the
    /// heavy-particle content and the couplings to match onto.
    pub fn export_mmp_config(&self) -> Result<String, ModelError> {
        self.validate()?;

        let mut lines = vec![format!("ModelName -> \"{}\"", self.name)];
        lines.push("HeavyFields -> {".to_owned());
        let exotics = self.exotics();
        for (slot, field) in exotics.iter().enumerate() {
            let data = field.field().expect("exotics are fields");
            let sep = if slot == 0 { "  " } else { ", " };
            lines.push(format!(
                "{sep}{{{}, Spin -> {}, Mass -> M{}, SelfConjugate -> {}}}",
                field.label(),
                mmp_spin(field),
                field.label(),
                if data.is_self_conjugate() {
                    "True"
                } else {
                    "False"
                },
            ));
        }
        lines.push("}".to_owned());

        let mut couplings: IndexSet<String> = IndexSet::new();
        for term in &self.terms {
            couplings.insert(term.coupling()?.label().to_owned());
        }
        lines.push(format!(
            "MatchingCouplings -> {{{}}}",
            couplings.into_iter().collect::<Vec<_>>().join(", ")
        ));
        Ok(lines.join("\n"))
    }

    /// Render the interaction Lagrangian as a LaTeX `align` listing, one
    /// summand per line.
    pub fn export_latex(&self) -> Result<String, ModelError> {
        self.validate()?;

        let mut lines = vec!["\\begin{align}".to_owned()];
        for (slot, term) in self.terms.iter().enumerate() {
            let lead = if slot == 0 {
                "\\mathcal{L} \\supset&\\ "
            } else {
                "&+ "
            };
            let factors: Vec<String> = term.iter().map(latex_factor).collect();
            let trailer = if slot + 1 == self.terms.len() {
                ""
            } else {
                " \\\\"
            };
            lines.push(format!("{lead}{}{trailer}", factors.join(" ")));
        }
        lines.push("\\end{align}".to_owned());
        Ok(lines.join("\n"))
    }
}

fn mmp_spin(field: &Tensor) -> &'static str {
    use crate::field::ParticleKind;
    match field.field().expect("exotics are fields").particle() {
        ParticleKind::Scalar => "0",
        ParticleKind::Fermion(_) => "1/2",
        ParticleKind::Vector => "1",
    }
}

/// One tensor as a LaTeX factor: display name, a dagger for conjugated
/// fields, upper indices as superscripts and lower ones as subscripts.
fn latex_factor(tensor: &Tensor) -> String {
    let mut output = tensor.display_name().to_owned();
    if tensor.is_conjugated() && tensor.is_field() {
        output = format!("{output}^\\dagger");
    }
    let (upper, lower): (Vec<&Index>, Vec<&Index>) =
        tensor.indices().iter().partition(|i| !i.is_lowered());
    if !upper.is_empty() {
        let names: Vec<&str> = upper.iter().map(|i| i.name()).collect();
        output.push_str(&format!("^{{{}}}", names.join(" ")));
    }
    if !lower.is_empty() {
        let names: Vec<&str> = lower.iter().map(|i| i.name()).collect();
        output.push_str(&format!("_{{{}}}", names.join(" ")));
    }
    output
}

impl Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Model({})", self.name)
    }
}
