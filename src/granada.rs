//! The Granada dictionary of exotic multiplets and the built-in catalogue of
//! their renormalizable couplings to standard-model matter.
//!
//! Multiplet names and quantum numbers follow arXiv:1711.10391 (without
//! backslashes). The catalogue is built in one pass and returned as a plain
//! vector; there is no global accumulator.

use crate::field::{fermion, scalar, ChiralityError};
use crate::index::IndexError;
use crate::invariants::{c2224, eps, sigma as pauli, SignatureError};
use crate::product::TensorProduct;
use crate::tensor::{coupling, Prefactor, Tensor};
use num::rational::Rational64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogueError {
    #[error("'{0}' is not a multiplet of the Granada dictionary")]
    UnknownMultiplet(String),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error(transparent)]
    Chirality(#[from] ChiralityError),
}

fn rat(n: i64, d: i64) -> Rational64 {
    Rational64::new(n, d)
}

// --- colour-singlet scalars ---

/// `S`, real singlet, Y = 0.
pub fn s() -> Result<Tensor, IndexError> {
    Ok(scalar("S", "", rat(0, 1))?
        .self_conjugate()
        .with_display_name("\\mathcal{S}"))
}

/// `S1`, complex singlet, Y = 1.
pub fn s1() -> Result<Tensor, IndexError> {
    Ok(scalar("S1", "", rat(1, 1))?.with_display_name("\\mathcal{S}_{1}"))
}

/// `S2`, complex singlet, Y = 2.
pub fn s2() -> Result<Tensor, IndexError> {
    Ok(scalar("S2", "", rat(2, 1))?.with_display_name("\\mathcal{S}_{2}"))
}

/// `varphi`, second doublet, Y = 1/2.
pub fn varphi(i: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("varphi", i, rat(1, 2))?.with_display_name("\\varphi"))
}

/// `Xi`, real isospin triplet, Y = 0.
pub fn xi(adj: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("Xi", adj, rat(0, 1))?
        .self_conjugate()
        .with_display_name("\\Xi"))
}

/// `Xi1`, complex isospin triplet, Y = 1.
pub fn xi1(adj: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("Xi1", adj, rat(1, 1))?.with_display_name("\\Xi_{1}"))
}

/// `Theta1`, isospin quadruplet, Y = 1/2.
pub fn theta1(quad: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("Theta1", quad, rat(1, 2))?.with_display_name("\\Theta_{1}"))
}

/// `Theta3`, isospin quadruplet, Y = 3/2.
pub fn theta3(quad: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("Theta3", quad, rat(3, 2))?.with_display_name("\\Theta_{3}"))
}

// --- coloured scalars ---

pub fn omega1(c: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("omega1", c, rat(-1, 3))?.with_display_name("\\omega_{1}"))
}

pub fn omega2(c: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("omega2", c, rat(2, 3))?.with_display_name("\\omega_{2}"))
}

pub fn omega4(c: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("omega4", c, rat(-4, 3))?.with_display_name("\\omega_{4}"))
}

pub fn pi1(c: &str, i: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("Pi1", &format!("{c} {i}"), rat(1, 6))?.with_display_name("\\Pi_{1}"))
}

pub fn pi7(c: &str, i: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("Pi7", &format!("{c} {i}"), rat(7, 6))?.with_display_name("\\Pi_{7}"))
}

pub fn zeta(c: &str, adj: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("zeta", &format!("{c} {adj}"), rat(-1, 3))?.with_display_name("\\zeta"))
}

/// `Omega1`, colour sextet, Y = 1/3.
pub fn omega1_sextet(x: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("Omega1", x, rat(1, 3))?.with_display_name("\\Omega_{1}"))
}

/// `Omega2`, colour sextet, Y = -2/3.
pub fn omega2_sextet(x: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("Omega2", x, rat(-2, 3))?.with_display_name("\\Omega_{2}"))
}

/// `Omega4`, colour sextet, Y = 4/3.
pub fn omega4_sextet(x: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("Omega4", x, rat(4, 3))?.with_display_name("\\Omega_{4}"))
}

/// `Upsilon`, colour sextet and isospin triplet, Y = 1/3.
pub fn upsilon(x: &str, adj: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("Upsilon", &format!("{x} {adj}"), rat(1, 3))?.with_display_name("\\Upsilon"))
}

/// `Phi`, colour octet doublet, Y = 1/2.
pub fn phi(colour_adj: &str, i: &str) -> Result<Tensor, IndexError> {
    Ok(scalar("Phi", &format!("{colour_adj} {i}"), rat(1, 2))?.with_display_name("\\Phi"))
}

// --- vector-like fermions ---

/// `N`, Majorana singlet, Y = 0.
pub fn n(spin: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("N", spin, rat(0, 1))?.self_conjugate())
}

/// `E`, charged lepton partner, Y = -1.
pub fn e(spin: &str) -> Result<Tensor, IndexError> {
    fermion("E", spin, rat(-1, 1))
}

/// `Delta1`, lepton doublet partner, Y = -1/2.
pub fn delta1(spin: &str, i: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("Delta1", &format!("{spin} {i}"), rat(-1, 2))?.with_display_name("\\Delta_{1}"))
}

/// `Delta3`, doublet, Y = -3/2.
pub fn delta3(spin: &str, i: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("Delta3", &format!("{spin} {i}"), rat(-3, 2))?.with_display_name("\\Delta_{3}"))
}

/// `Sigma`, Majorana isospin triplet, Y = 0.
pub fn sigma(spin: &str, adj: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("Sigma", &format!("{spin} {adj}"), rat(0, 1))?
        .self_conjugate()
        .with_display_name("\\Sigma"))
}

/// `Sigma1`, isospin triplet, Y = -1.
pub fn sigma1(spin: &str, adj: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("Sigma1", &format!("{spin} {adj}"), rat(-1, 1))?.with_display_name("\\Sigma_{1}"))
}

/// `U`, up-quark partner, Y = 2/3.
pub fn u(spin: &str, c: &str) -> Result<Tensor, IndexError> {
    fermion("U", &format!("{spin} {c}"), rat(2, 3))
}

/// `D`, down-quark partner, Y = -1/3.
pub fn d(spin: &str, c: &str) -> Result<Tensor, IndexError> {
    fermion("D", &format!("{spin} {c}"), rat(-1, 3))
}

/// `Q1`, quark doublet partner, Y = 1/6.
pub fn q1(spin: &str, c: &str, i: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("Q1", &format!("{spin} {c} {i}"), rat(1, 6))?.with_display_name("Q_{1}"))
}

/// `Q5`, quark doublet, Y = -5/6.
pub fn q5(spin: &str, c: &str, i: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("Q5", &format!("{spin} {c} {i}"), rat(-5, 6))?.with_display_name("Q_{5}"))
}

/// `Q7`, quark doublet, Y = 7/6.
pub fn q7(spin: &str, c: &str, i: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("Q7", &format!("{spin} {c} {i}"), rat(7, 6))?.with_display_name("Q_{7}"))
}

/// `T1`, quark isospin triplet, Y = -1/3.
pub fn t1(spin: &str, c: &str, adj: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("T1", &format!("{spin} {c} {adj}"), rat(-1, 3))?.with_display_name("T_{1}"))
}

/// `T2`, quark isospin triplet, Y = 2/3.
pub fn t2(spin: &str, c: &str, adj: &str) -> Result<Tensor, IndexError> {
    Ok(fermion("T2", &format!("{spin} {c} {adj}"), rat(2, 3))?.with_display_name("T_{2}"))
}

/// Labels of the scalar multiplets.
pub const SCALAR_MULTIPLETS: [&str; 19] = [
    "S", "S1", "S2", "varphi", "Xi", "Xi1", "Theta1", "Theta3", "omega1", "omega2", "omega4",
    "Pi1", "Pi7", "zeta", "Omega1", "Omega2", "Omega4", "Upsilon", "Phi",
];

/// Labels of the fermion multiplets.
pub const FERMION_MULTIPLETS: [&str; 13] = [
    "N", "E", "Delta1", "Delta3", "Sigma", "Sigma1", "U", "D", "Q1", "Q5", "Q7", "T1", "T2",
];

pub fn is_known_multiplet(label: &str) -> bool {
    SCALAR_MULTIPLETS.contains(&label) || FERMION_MULTIPLETS.contains(&label)
}

/// Which argument order the antisymmetric symbol takes in the `N`-`Delta1`
/// coupling.
///
/// The reference paper and its implementation disagree by an index swap (a
/// possible typo in arXiv:1711.10391); neither convention is silently
/// preferred here.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EpsOrdering {
    /// `eps(-i1, -i0)`, as written in the implementation this library
    /// follows.
    #[default]
    Reference,
    /// `eps(-i0, -i1)`, as a literal reading of the paper suggests.
    Flipped,
}

/// Build the full two-field catalogue of interaction terms.
///
/// Every returned term is fully contracted, carries exactly one coupling and
/// sums its hypercharges to zero.
pub fn terms(convention: EpsOrdering) -> Result<Vec<TensorProduct>, CatalogueError> {
    let half = Prefactor::Rational(rat(1, 2));
    let mut terms = Vec::new();

    // --- scalar couplings ---

    // kappaS: S |H|^2
    terms.push(
        coupling("kappaS", "", false)?
            * s()?
            * crate::sm::h("i0")?
            * crate::sm::h("i0")?.conj(),
    );

    // lambdaVarphi: varphi^dag H |H|^2
    terms.push(
        coupling("lambdaVarphi", "", true)?
            * varphi("i0")?.conj()
            * crate::sm::h("i0")?
            * crate::sm::h("i1")?.conj()
            * crate::sm::h("i1")?,
    );

    // yS1: S1^dag (Lbar.L^c), antisymmetric in the doublet indices
    terms.push(
        coupling("yS1", "-g0 -g1", true)?
            * s1()?.conj()
            * crate::sm::l("s0", "i0", "g0")?.bar()?
            * crate::sm::l("s0", "i1", "g1")?.charge_conj()?
            * eps(&["i0", "i1"])?,
    );

    // kappaXi: Xi^I (H^dag sigma^I H)
    terms.push(
        coupling("kappaXi", "", false)?.with_prefactor(half)
            * xi("-I0")?
            * crate::sm::h("i0")?.conj()
            * pauli("I0", "i0", "-i1")?
            * crate::sm::h("i1")?,
    );

    // lambdaTheta1: Theta1^dag C(2,2,2,4) H H (eps H^dag-partners)
    terms.push(
        coupling("lambdaTheta1", "", true)?
            * theta1("q0")?.conj()
            * c2224("i0", "i1", "i2", "-q0")?
            * eps(&["-i0", "-i3"])?
            * crate::sm::h("i3")?
            * eps(&["-i1", "-i4"])?
            * crate::sm::h("i4")?
            * crate::sm::h("i2")?.conj(),
    );

    // --- two-field fermion couplings ---

    // lambdaNDelta1: typo in 1711.10391? The epsilon ordering is an explicit
    // choice, see EpsOrdering.
    let n_delta1_eps = match convention {
        EpsOrdering::Reference => eps(&["-i1", "-i0"])?,
        EpsOrdering::Flipped => eps(&["-i0", "-i1"])?,
    };
    terms.push(
        coupling("lambdaNDelta1", "", true)?.with_display_name("\\lambda_{N \\Delta_1}")
            * n("s0")?.left()?.charge_conj()?.bar()?
            * delta1("s0", "i0")?.right()?
            * crate::sm::h("i1")?
            * n_delta1_eps,
    );

    // lambdaEDelta1
    terms.push(
        coupling("lambdaEDelta1", "", true)?.with_display_name("\\lambda_{E \\Delta_1}")
            * e("s0")?.left()?.bar()?
            * delta1("s0", "i0")?.right()?
            * crate::sm::h("i0")?.conj(),
    );

    // lambdaEDelta3
    terms.push(
        coupling("lambdaEDelta3", "", true)?.with_display_name("\\lambda_{E \\Delta_3}")
            * e("s0")?.left()?.bar()?
            * delta3("s0", "i0")?.right()?
            * crate::sm::h("i1")?
            * eps(&["-i1", "-i0"])?,
    );

    // lambdaSigmaDelta1
    terms.push(
        coupling("lambdaSigmaDelta1", "", true)?
            .with_prefactor(half)
            .with_display_name("\\lambda_{\\Sigma \\Delta_1}")
            * sigma("s0", "-I0")?.left()?.charge_conj()?.bar()?
            * delta1("s0", "i0")?.right()?
            * pauli("I0", "i1", "-i0")?
            * crate::sm::h("i2")?
            * eps(&["-i2", "-i1"])?,
    );

    // lambdaSigma1Delta1
    terms.push(
        coupling("lambdaSigma1Delta1", "", true)?
            .with_prefactor(half)
            .with_display_name("\\lambda_{\\Sigma_1 \\Delta_1}")
            * sigma1("s0", "-I0")?.left()?.bar()?
            * delta1("s0", "i0")?.right()?
            * pauli("I0", "i1", "-i0")?
            * crate::sm::h("i1")?.conj(),
    );

    // lambdaSigma1Delta3
    terms.push(
        coupling("lambdaSigma1Delta3", "", true)?
            .with_prefactor(half)
            .with_display_name("\\lambda_{\\Sigma_1 \\Delta_3}")
            * sigma1("s0", "-I0")?.left()?.bar()?
            * delta3("s0", "i0")?.right()?
            * pauli("I0", "i1", "-i0")?
            * crate::sm::h("i2")?
            * eps(&["-i2", "-i1"])?,
    );

    // lambdaUQ1
    terms.push(
        coupling("lambdaUQ1", "", true)?.with_display_name("\\lambda_{U Q_1}")
            * u("s0", "c0")?.left()?.bar()?
            * q1("s0", "c0", "i0")?.right()?
            * crate::sm::h("i1")?
            * eps(&["-i1", "-i0"])?,
    );

    // Hatted couplings: the opposite-chirality contractions.

    terms.push(
        coupling("lambdaHatNDelta1", "", true)?.with_display_name("\\hat{\\lambda}_{N \\Delta_1}")
            * n("s0")?.right()?.bar()?
            * delta1("s0", "i0")?.left()?
            * crate::sm::h("i1")?
            * eps(&["-i0", "-i1"])?,
    );

    terms.push(
        coupling("lambdaHatEDelta1", "", true)?.with_display_name("\\hat{\\lambda}_{E \\Delta_1}")
            * e("s0")?.right()?.bar()?
            * delta1("s0", "i0")?.left()?
            * crate::sm::h("i0")?.conj(),
    );

    terms.push(
        coupling("lambdaHatEDelta3", "", true)?.with_display_name("\\hat{\\lambda}_{E \\Delta_3}")
            * e("s0")?.right()?.bar()?
            * delta3("s0", "i1")?.left()?
            * crate::sm::h("i0")?
            * eps(&["-i0", "-i1"])?,
    );

    terms.push(
        coupling("lambdaHatSigmaDelta1", "", true)?
            .with_prefactor(half)
            .with_display_name("\\hat{\\lambda}_{\\Sigma \\Delta_1}")
            * sigma("s0", "-I0")?.right()?.bar()?
            * delta1("s0", "i4")?.left()?
            * pauli("I0", "i2", "-i4")?
            * crate::sm::h("i3")?
            * eps(&["-i3", "-i2"])?,
    );

    terms.push(
        coupling("lambdaHatSigma1Delta1", "", true)?
            .with_prefactor(half)
            .with_display_name("\\hat{\\lambda}_{\\Sigma_1 \\Delta_1}")
            * sigma1("s0", "-I0")?.right()?.bar()?
            * delta1("s0", "i0")?.left()?
            * pauli("I0", "i3", "-i0")?
            * crate::sm::h("i3")?.conj(),
    );

    terms.push(
        coupling("lambdaHatSigma1Delta3", "", true)?
            .with_prefactor(half)
            .with_display_name("\\hat{\\lambda}_{\\Sigma_1 \\Delta_3}")
            * sigma1("s0", "-I0")?.right()?.bar()?
            * delta3("s0", "i4")?.left()?
            * pauli("I0", "i2", "-i4")?
            * crate::sm::h("i3")?
            * eps(&["-i3", "-i2"])?,
    );

    terms.push(
        coupling("lambdaHatUQ1", "", true)?.with_display_name("\\hat{\\lambda}_{U Q_1}")
            * u("s0", "c0")?.right()?.bar()?
            * q1("s0", "c0", "i1")?.left()?
            * crate::sm::h("i0")?
            * eps(&["-i0", "-i1"])?,
    );

    terms.push(
        coupling("lambdaHatUQ7", "", true)?.with_display_name("\\hat{\\lambda}_{U Q_7}")
            * u("s0", "c0")?.right()?.bar()?
            * q7("s0", "c0", "i0")?.left()?
            * crate::sm::h("i0")?.conj(),
    );

    terms.push(
        coupling("lambdaHatDQ1", "", true)?.with_display_name("\\hat{\\lambda}_{D Q_1}")
            * d("s0", "c0")?.right()?.bar()?
            * q1("s0", "c0", "i0")?.left()?
            * crate::sm::h("i0")?.conj(),
    );

    terms.push(
        coupling("lambdaHatDQ5", "", true)?.with_display_name("\\hat{\\lambda}_{D Q_5}")
            * d("s0", "c0")?.right()?.bar()?
            * q5("s0", "c0", "i1")?.left()?
            * crate::sm::h("i0")?
            * eps(&["-i0", "-i1"])?,
    );

    terms.push(
        coupling("lambdaHatT1Q1", "", true)?
            .with_prefactor(half)
            .with_display_name("\\hat{\\lambda}_{T_1 Q_1}")
            * t1("s0", "c0", "-I0")?.right()?.bar()?
            * q1("s0", "c0", "i0")?.left()?
            * pauli("I0", "i3", "-i0")?
            * crate::sm::h("i3")?.conj(),
    );

    terms.push(
        coupling("lambdaHatT1Q5", "", true)?
            .with_prefactor(half)
            .with_display_name("\\hat{\\lambda}_{T_1 Q_5}")
            * t1("s0", "c0", "-I0")?.right()?.bar()?
            * q5("s0", "c0", "i4")?.left()?
            * pauli("I0", "i2", "-i4")?
            * crate::sm::h("i3")?
            * eps(&["-i3", "-i2"])?,
    );

    terms.push(
        coupling("lambdaHatT2Q1", "", true)?
            .with_prefactor(half)
            .with_display_name("\\hat{\\lambda}_{T_2 Q_1}")
            * t2("s0", "c0", "-I0")?.right()?.bar()?
            * q1("s0", "c0", "i4")?.left()?
            * pauli("I0", "i2", "-i4")?
            * crate::sm::h("i3")?
            * eps(&["-i3", "-i2"])?,
    );

    terms.push(
        coupling("lambdaHatT2Q7", "", true)?
            .with_prefactor(half)
            .with_display_name("\\hat{\\lambda}_{T_2 Q_7}")
            * t2("s0", "c0", "-I0")?.right()?.bar()?
            * q7("s0", "c0", "i0")?.left()?
            * pauli("I0", "i3", "-i0")?
            * crate::sm::h("i3")?.conj(),
    );

    Ok(terms)
}

/// The catalogue terms whose exotic content lies entirely within the given
/// multiplet selection. Unknown labels are an error surfaced to the caller.
pub fn select_terms(
    multiplets: &[String],
    convention: EpsOrdering,
) -> Result<Vec<TensorProduct>, CatalogueError> {
    for label in multiplets {
        if !is_known_multiplet(label) {
            return Err(CatalogueError::UnknownMultiplet(label.clone()));
        }
    }
    let selection: Vec<&str> = multiplets.iter().map(String::as_str).collect();
    let selected = terms(convention)?
        .into_iter()
        .filter(|term| {
            term.exotics()
                .iter()
                .all(|f| selection.contains(&f.label()))
        })
        .collect();
    Ok(selected)
}
