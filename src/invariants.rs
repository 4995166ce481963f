//! Builders for the fixed invariant tensors.
//!
//! Each builder checks the sign pattern and index kinds its object requires
//! and refuses anything else: a violated signature is an authoring error in a
//! term definition and must abort construction of that term, never be
//! coerced.

use crate::index::{Index, IndexError, IndexKind};
use crate::tensor::Tensor;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("expected an upper index, got '-{0}'")]
    ExpectedUpper(String),
    #[error("expected a lower index, got '{0}'")]
    ExpectedLower(String),
    #[error("indices of an antisymmetric symbol must share a sign")]
    MixedSigns,
    #[error("indices of an antisymmetric symbol must share a kind, got {0} and {1}")]
    MixedKinds(IndexKind, IndexKind),
    #[error("expected a {expected} index, got '{got}' ({found})")]
    WrongKind {
        expected: IndexKind,
        found: IndexKind,
        got: String,
    },
    #[error("an antisymmetric symbol needs at least two indices, got {0}")]
    TooFewIndices(usize),
    #[error(transparent)]
    Index(#[from] IndexError),
}

fn parse(label: &str) -> Result<Index, SignatureError> {
    Ok(label.parse::<Index>()?)
}

fn expect_upper(index: &Index) -> Result<(), SignatureError> {
    if index.is_lowered() {
        return Err(SignatureError::ExpectedUpper(index.name().to_owned()));
    }
    Ok(())
}

fn expect_lower(index: &Index) -> Result<(), SignatureError> {
    if !index.is_lowered() {
        return Err(SignatureError::ExpectedLower(index.name().to_owned()));
    }
    Ok(())
}

fn expect_kind(index: &Index, expected: IndexKind) -> Result<(), SignatureError> {
    if index.kind() != expected {
        return Err(SignatureError::WrongKind {
            expected,
            found: index.kind(),
            got: index.to_string(),
        });
    }
    Ok(())
}

/// The totally antisymmetric symbol.
///
/// All indices must carry the same sign and the same kind. The emitted label
/// depends on the kind: the SU(2)-adjoint structure constants are a distinct
/// operator in the target format, everything else is plain `Eps`.
pub fn eps(labels: &[&str]) -> Result<Tensor, SignatureError> {
    if labels.len() < 2 {
        return Err(SignatureError::TooFewIndices(labels.len()));
    }
    let indices = labels
        .iter()
        .map(|l| parse(l))
        .collect::<Result<Vec<_>, _>>()?;

    let first = &indices[0];
    for index in &indices[1..] {
        if index.is_lowered() != first.is_lowered() {
            return Err(SignatureError::MixedSigns);
        }
        if index.kind() != first.kind() {
            return Err(SignatureError::MixedKinds(first.kind(), index.kind()));
        }
    }

    let label = match (first.kind(), indices.len()) {
        (IndexKind::IsospinAdjoint, 3) => "EpsSU2W",
        _ => "Eps",
    };
    Ok(Tensor::from_parts(label, indices, crate::tensor::TensorKind::Invariant)
        .with_display_name("\\epsilon"))
}

/// Kronecker delta: one upper, one lower index of the same kind.
pub fn delta(i: &str, j: &str) -> Result<Tensor, SignatureError> {
    let i = parse(i)?;
    let j = parse(j)?;
    expect_upper(&i)?;
    expect_lower(&j)?;
    expect_kind(&j, i.kind())?;
    Ok(Tensor::from_parts("Delta", vec![i, j], crate::tensor::TensorKind::Invariant)
        .with_display_name("\\delta"))
}

/// Pauli matrices `(sigma^I)^i_j`, emitted as `2*Ta`.
pub fn sigma(adj: &str, i: &str, j: &str) -> Result<Tensor, SignatureError> {
    let adj = parse(adj)?;
    let i = parse(i)?;
    let j = parse(j)?;
    expect_kind(&adj, IndexKind::IsospinAdjoint)?;
    expect_kind(&i, IndexKind::IsospinFund)?;
    expect_kind(&j, IndexKind::IsospinFund)?;
    expect_upper(&i)?;
    expect_lower(&j)?;
    Ok(Tensor::from_parts(
        "2*Ta",
        vec![adj, i, j],
        crate::tensor::TensorKind::Invariant,
    )
    .with_display_name("\\sigma"))
}

/// Gell-Mann matrices `(lambda^A)^a_b`, emitted as `2*T`.
pub fn lambda_gm(adj: &str, a: &str, b: &str) -> Result<Tensor, SignatureError> {
    let adj = parse(adj)?;
    let a = parse(a)?;
    let b = parse(b)?;
    expect_kind(&adj, IndexKind::ColourAdjoint)?;
    expect_kind(&a, IndexKind::ColourFund)?;
    expect_kind(&b, IndexKind::ColourFund)?;
    expect_upper(&a)?;
    expect_lower(&b)?;
    Ok(Tensor::from_parts(
        "2*T",
        vec![adj, a, b],
        crate::tensor::TensorKind::Invariant,
    )
    .with_display_name("\\lambda"))
}

/// Invariant pairing of two isospin quadruplets.
pub fn k4(q1: &str, q2: &str) -> Result<Tensor, SignatureError> {
    let q1 = parse(q1)?;
    let q2 = parse(q2)?;
    expect_kind(&q1, IndexKind::Isospin4)?;
    expect_kind(&q2, IndexKind::Isospin4)?;
    if q1.is_lowered() != q2.is_lowered() {
        return Err(SignatureError::MixedSigns);
    }
    Ok(Tensor::from_parts("K4", vec![q1, q2], crate::tensor::TensorKind::Invariant)
        .with_display_name("K"))
}

/// Clebsch-Gordan coefficient coupling an isospin adjoint to a pair of
/// quadruplets: all but the last index upper, last lower.
pub fn c344(adj: &str, q1: &str, q2: &str) -> Result<Tensor, SignatureError> {
    let adj = parse(adj)?;
    let q1 = parse(q1)?;
    let q2 = parse(q2)?;
    expect_kind(&adj, IndexKind::IsospinAdjoint)?;
    expect_kind(&q1, IndexKind::Isospin4)?;
    expect_kind(&q2, IndexKind::Isospin4)?;
    expect_upper(&adj)?;
    expect_upper(&q1)?;
    expect_lower(&q2)?;
    Ok(Tensor::from_parts(
        "C344",
        vec![adj, q1, q2],
        crate::tensor::TensorKind::Invariant,
    )
    .with_display_name("C^{(344)}"))
}

/// Clebsch-Gordan coefficient projecting three isospin doublets onto a
/// quadruplet: doublet indices upper, the quadruplet index lower.
pub fn c2224(i: &str, j: &str, k: &str, q: &str) -> Result<Tensor, SignatureError> {
    let i = parse(i)?;
    let j = parse(j)?;
    let k = parse(k)?;
    let q = parse(q)?;
    for idx in [&i, &j, &k] {
        expect_kind(idx, IndexKind::IsospinFund)?;
        expect_upper(idx)?;
    }
    expect_kind(&q, IndexKind::Isospin4)?;
    expect_lower(&q)?;
    Ok(Tensor::from_parts(
        "C2224",
        vec![i, j, k, q],
        crate::tensor::TensorKind::Invariant,
    )
    .with_display_name("C^{(2224)}"))
}

/// Clebsch-Gordan coefficient pairing a doublet bilinear with a quadruplet
/// bilinear.
pub fn t2244(i: &str, j: &str, q1: &str, q2: &str) -> Result<Tensor, SignatureError> {
    let i = parse(i)?;
    let j = parse(j)?;
    let q1 = parse(q1)?;
    let q2 = parse(q2)?;
    expect_kind(&i, IndexKind::IsospinFund)?;
    expect_kind(&j, IndexKind::IsospinFund)?;
    expect_kind(&q1, IndexKind::Isospin4)?;
    expect_kind(&q2, IndexKind::Isospin4)?;
    expect_upper(&i)?;
    expect_lower(&j)?;
    expect_upper(&q1)?;
    expect_lower(&q2)?;
    Ok(Tensor::from_parts(
        "T2244",
        vec![i, j, q1, q2],
        crate::tensor::TensorKind::Invariant,
    )
    .with_display_name("T^{(2244)}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eps_label_dispatch() {
        let colour = eps(&["c0", "c1", "c2"]).unwrap();
        assert_eq!(colour.label(), "Eps");
        assert!(!colour.is_field());

        let isospin = eps(&["-i0", "-i1"]).unwrap();
        assert_eq!(isospin.label(), "Eps");

        let adjoint = eps(&["I0", "I1", "I2"]).unwrap();
        assert_eq!(adjoint.label(), "EpsSU2W");
    }

    #[test]
    fn eps_signature() {
        assert_eq!(eps(&["i0", "-i1"]), Err(SignatureError::MixedSigns));
        assert_eq!(
            eps(&["i0", "c0"]),
            Err(SignatureError::MixedKinds(
                IndexKind::IsospinFund,
                IndexKind::ColourFund
            ))
        );
        assert_eq!(eps(&["i0"]), Err(SignatureError::TooFewIndices(1)));
    }

    #[test]
    fn delta_signature() {
        assert!(delta("i0", "-i1").is_ok());
        assert_eq!(
            delta("i0", "i1"),
            Err(SignatureError::ExpectedLower("i1".to_owned()))
        );
        assert_eq!(
            delta("-i0", "-i1"),
            Err(SignatureError::ExpectedUpper("i0".to_owned()))
        );
        assert!(matches!(
            delta("i0", "-c0"),
            Err(SignatureError::WrongKind { .. })
        ));
    }

    #[test]
    fn generator_signatures() {
        assert!(sigma("I0", "i0", "-i1").is_ok());
        assert_eq!(sigma("I0", "i0", "-i1").unwrap().label(), "2*Ta");
        assert!(matches!(
            sigma("i0", "i1", "-i2"),
            Err(SignatureError::WrongKind { .. })
        ));
        assert!(matches!(
            sigma("I0", "-i0", "-i1"),
            Err(SignatureError::ExpectedUpper(_))
        ));

        assert_eq!(lambda_gm("A0", "c0", "-c1").unwrap().label(), "2*T");
        assert!(matches!(
            lambda_gm("I0", "c0", "-c1"),
            Err(SignatureError::WrongKind { .. })
        ));
    }

    #[test]
    fn quadruplet_builders() {
        assert_eq!(k4("q0", "q1").unwrap().label(), "K4");
        assert_eq!(k4("-q0", "-q1").unwrap().label(), "K4");
        assert_eq!(k4("q0", "-q1"), Err(SignatureError::MixedSigns));
        assert!(matches!(
            k4("i0", "q1"),
            Err(SignatureError::WrongKind { .. })
        ));

        assert!(c344("I0", "q0", "-q1").is_ok());
        assert!(matches!(
            c344("I0", "q0", "q1"),
            Err(SignatureError::ExpectedLower(_))
        ));

        assert!(c2224("i0", "i1", "i2", "-q0").is_ok());
        assert!(matches!(
            c2224("i0", "i1", "i2", "q0"),
            Err(SignatureError::ExpectedLower(_))
        ));

        assert!(t2244("i0", "-i1", "q0", "-q1").is_ok());
    }

    #[test]
    fn unknown_prefix_is_fatal() {
        assert!(matches!(
            eps(&["z0", "z1"]),
            Err(SignatureError::Index(IndexError::Unrecognized('z', _)))
        ));
    }
}
