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

mod bench_reader;
pub use bench_reader::BenchReader;

mod circuit_builder;
pub use circuit_builder::CircuitBuilder;

mod circuit_model;
pub use circuit_model::Assignment;
pub use circuit_model::Circuit;

mod gate;
pub use gate::Gate;
pub use gate::GateKind;
pub use gate::SignalId;
