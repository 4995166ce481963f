//! Standard-model matter fields.
//!
//! These are the fixed building blocks the exotic multiplets couple to. Each
//! constructor takes the index labels the caller wants the field to carry in
//! a given term; hypercharges and chiralities are those of the standard
//! model and are not configurable.

use crate::field::{fermion, scalar, Chirality};
use crate::index::IndexError;
use crate::tensor::Tensor;
use num::rational::Rational64;

fn join(labels: &[&str]) -> String {
    labels.join(" ")
}

/// The Higgs doublet `H^i`, Y = 1/2.
pub fn h(i: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("H", i, Rational64::new(1, 2))?.standard_model())
}

/// The lepton doublet `L^i`, Y = -1/2.
pub fn l(s: &str, i: &str, g: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("L", &join(&[s, i, g]), Rational64::new(-1, 2))?
        .standard_model()
        .chiral(Chirality::Left))
}

/// The quark doublet `Q^{c i}`, Y = 1/6.
pub fn q(s: &str, c: &str, i: &str, g: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("Q", &join(&[s, c, i, g]), Rational64::new(1, 6))?
        .standard_model()
        .chiral(Chirality::Left))
}

/// The right-handed electron singlet, Y = -1.
pub fn e_r(s: &str, g: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("eR", &join(&[s, g]), Rational64::new(-1, 1))?
        .standard_model()
        .chiral(Chirality::Right)
        .with_display_name("e_{R}"))
}

/// The right-handed up-quark singlet, Y = 2/3.
pub fn u_r(s: &str, c: &str, g: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("uR", &join(&[s, c, g]), Rational64::new(2, 3))?
        .standard_model()
        .chiral(Chirality::Right)
        .with_display_name("u_{R}"))
}

/// The right-handed down-quark singlet, Y = -1/3.
pub fn d_r(s: &str, c: &str, g: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("dR", &join(&[s, c, g]), Rational64::new(-1, 3))?
        .standard_model()
        .chiral(Chirality::Right)
        .with_display_name("d_{R}"))
}
