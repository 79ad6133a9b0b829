// satec_logic
// Copyright (C) 2021  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use crate::{Assignment, Circuit, CircuitBuilder, GateKind};

const KINDS: [GateKind; 8] = [
    GateKind::And,
    GateKind::Nand,
    GateKind::Or,
    GateKind::Nor,
    GateKind::Xor,
    GateKind::Xnor,
    GateKind::Not,
    GateKind::Buffer,
];

struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

/// Builds a pseudo-random circuit.
///
/// Inputs are named `i0`, `i1`, ...; gates are named `g0`, `g1`, ... and read previously defined signals.
/// The outputs are the last `n_outputs` gates, so two circuits built with the same sizes share their interface.
pub(crate) fn random_circuit(seed: u64, n_inputs: usize, n_gates: usize, n_outputs: usize) -> Circuit {
    assert!(n_inputs > 0 && n_outputs <= n_gates);
    let mut rng = XorShift(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1);
    let mut builder = CircuitBuilder::new();
    let mut signals = (0..n_inputs).map(|i| format!("i{}", i)).collect::<Vec<String>>();
    for s in signals.iter() {
        builder.add_input(s).unwrap();
    }
    for g in 0..n_gates {
        let kind = KINDS[rng.below(KINDS.len())];
        let arity = match kind {
            GateKind::Not | GateKind::Buffer => 1,
            _ => 2 + rng.below(2),
        };
        let inputs = (0..arity)
            .map(|_| signals[rng.below(signals.len())].clone())
            .collect::<Vec<String>>();
        let name = format!("g{}", g);
        builder.add_gate(kind, &name, &inputs).unwrap();
        signals.push(name);
    }
    for g in n_gates - n_outputs..n_gates {
        builder.add_output(&format!("g{}", g)).unwrap();
    }
    builder.build().unwrap()
}

/// Builds an input assignment where the i-th input takes the value of the i-th bit of `bits`.
pub(crate) fn input_assignment(circuit: &Circuit, bits: u64) -> Assignment {
    circuit
        .inputs()
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), (bits >> i) & 1 == 1))
        .collect()
}
