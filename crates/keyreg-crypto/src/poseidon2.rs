//! # Width-4 Sponge Permutation over BN254
//!
//! The hash that turns an ordered sequence of field elements into one
//! field element, in the Poseidon2 style: a fixed-width permutation with
//! an x^5 s-box, full (external) rounds at the edges and partial
//! (internal) rounds in the middle, absorbed through a rate-3 sponge.
//!
//! ## Construction
//!
//! - State width t = 4, rate 3, capacity 1.
//! - 8 external rounds (4 before, 4 after) — constants added to the whole
//!   state, s-box on every lane, fixed 4x4 external matrix.
//! - 56 internal rounds — constant and s-box on lane 0 only, then the
//!   internal linear layer (row sums plus a fixed diagonal).
//! - The capacity lane is initialized with `input_len << 64`, so inputs of
//!   different lengths can never share a sponge trajectory.
//!
//! ## Wire Contract
//!
//! The absorption order, the chunking, the initial-state tag, and every
//! constant in `constants.rs` are part of the identifier preimage. None of
//! them may change without a migration path for every stored identifier.

use num_bigint::BigUint;
use once_cell::sync::Lazy;

use crate::constants::{
    EXTERNAL_ROUND_CONSTANTS, INTERNAL_MATRIX_DIAGONAL, INTERNAL_ROUND_CONSTANTS,
};
use crate::field::FieldElement;

/// Sponge state width.
pub const STATE_WIDTH: usize = 4;

/// Elements absorbed per permutation call.
pub const RATE: usize = 3;

/// Coefficients of the fixed external linear layer.
const EXTERNAL_MATRIX: [[u64; STATE_WIDTH]; STATE_WIDTH] = [
    [5, 7, 1, 3],
    [4, 6, 1, 1],
    [1, 3, 5, 7],
    [1, 1, 4, 6],
];

struct Params {
    external_rc: Vec<[FieldElement; STATE_WIDTH]>,
    internal_rc: Vec<FieldElement>,
    diagonal: [FieldElement; STATE_WIDTH],
}

static PARAMS: Lazy<Params> = Lazy::new(|| {
    let parse = |hex: &str| -> FieldElement {
        // The embedded tables are canonical by construction.
        FieldElement::from_hex(hex).expect("embedded round constant is canonical")
    };
    let external_rc = EXTERNAL_ROUND_CONSTANTS
        .iter()
        .map(|row| [parse(row[0]), parse(row[1]), parse(row[2]), parse(row[3])])
        .collect();
    let internal_rc = INTERNAL_ROUND_CONSTANTS.iter().map(|c| parse(c)).collect();
    let d = &INTERNAL_MATRIX_DIAGONAL;
    let diagonal = [parse(d[0]), parse(d[1]), parse(d[2]), parse(d[3])];
    Params {
        external_rc,
        internal_rc,
        diagonal,
    }
});

/// The sponge hash over the BN254 scalar field.
///
/// Stateless — both entry points are pure functions of their inputs.
pub struct Poseidon2;

impl Poseidon2 {
    /// Absorb `inputs` in order and squeeze one field element.
    ///
    /// Inputs are added into the rate lanes three at a time, with a
    /// permutation after every chunk (a trailing partial chunk still gets
    /// its own permutation). The capacity lane starts at
    /// `inputs.len() << 64`.
    pub fn hash(inputs: &[FieldElement]) -> FieldElement {
        let iv = FieldElement::from_biguint(BigUint::from(inputs.len() as u64) << 64u32);
        let mut state = [
            FieldElement::zero(),
            FieldElement::zero(),
            FieldElement::zero(),
            iv,
        ];

        if inputs.is_empty() {
            state = Self::permute(state);
            return state[0].clone();
        }

        for chunk in inputs.chunks(RATE) {
            for (i, x) in chunk.iter().enumerate() {
                state[i] = state[i].add(x);
            }
            state = Self::permute(state);
        }
        state[0].clone()
    }

    /// Run the full permutation on one state.
    pub fn permute(mut state: [FieldElement; STATE_WIDTH]) -> [FieldElement; STATE_WIDTH] {
        let params = &*PARAMS;

        // Initial linear layer before the first external round.
        state = external_linear(state);

        for rc in &params.external_rc[..4] {
            state = external_round(state, rc);
        }
        for rc in &params.internal_rc {
            state = internal_round(state, rc, &params.diagonal);
        }
        for rc in &params.external_rc[4..] {
            state = external_round(state, rc);
        }
        state
    }
}

fn external_round(
    mut state: [FieldElement; STATE_WIDTH],
    rc: &[FieldElement; STATE_WIDTH],
) -> [FieldElement; STATE_WIDTH] {
    for i in 0..STATE_WIDTH {
        state[i] = state[i].add(&rc[i]).pow5();
    }
    external_linear(state)
}

fn internal_round(
    mut state: [FieldElement; STATE_WIDTH],
    rc: &FieldElement,
    diagonal: &[FieldElement; STATE_WIDTH],
) -> [FieldElement; STATE_WIDTH] {
    state[0] = state[0].add(rc).pow5();

    let mut sum = state[0].clone();
    for lane in &state[1..] {
        sum = sum.add(lane);
    }
    let mut out = [
        FieldElement::zero(),
        FieldElement::zero(),
        FieldElement::zero(),
        FieldElement::zero(),
    ];
    for i in 0..STATE_WIDTH {
        out[i] = sum.add(&diagonal[i].mul(&state[i]));
    }
    out
}

fn external_linear(state: [FieldElement; STATE_WIDTH]) -> [FieldElement; STATE_WIDTH] {
    let mut out = [
        FieldElement::zero(),
        FieldElement::zero(),
        FieldElement::zero(),
        FieldElement::zero(),
    ];
    for i in 0..STATE_WIDTH {
        let mut acc = FieldElement::zero();
        for j in 0..STATE_WIDTH {
            acc = acc.add(&state[j].mul_u64(EXTERNAL_MATRIX[i][j]));
        }
        out[i] = acc;
    }
    out
}
