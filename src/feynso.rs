/*!

Symbolic tensor-index algebra for building gauge-invariant Lagrangian
interaction terms and writing them out as FeynRules model files.

The atoms are [`Tensor`]s: labelled objects carrying an ordered list of signed
[`Index`] slots, tagged as invariant tensors, coupling constants or physical
fields. Multiplying tensors gives a [`TensorProduct`], one summand of the
interaction Lagrangian; contraction is positional pairing of an upper and a
lower occurrence of the same index name, and a finished term must be fully
contracted, carry exactly one coupling and sum its hypercharges to zero.

The [`sm`] module provides the standard-model matter fields, [`granada`] the
dictionary of exotic multiplets together with the built-in catalogue of their
renormalizable couplings, and [`model::Model`] assembles terms into a file a
FeynRules session can load.

[`Tensor`]: tensor::Tensor
[`Index`]: index::Index
[`TensorProduct`]: product::TensorProduct

*/
extern crate self as feynso;

/// Index kinds, parsing and the canonical ordering
pub mod index;

/// The atomic indexed object and its kinds
pub mod tensor;

/// Physical fields, chirality and the free Lagrangian
pub mod field;

/// Builders for epsilon, delta, the group generators and the Clebsch-Gordan
/// coefficients
pub mod invariants;

/// Products of tensors and contraction bookkeeping
pub mod product;

/// Wolfram-language emission helpers
pub mod wolfram;

/// Standard-model matter content
pub mod sm;

/// The Granada dictionary of exotic multiplets and its term catalogue
pub mod granada;

/// Model assembly and the FeynRules, MatchMakerParser and LaTeX exporters
pub mod model;
