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

mod clause;
pub use clause::Clause;
pub use clause::CnfFormula;

mod dimacs_writer;
pub use dimacs_writer::DimacsWriter;

mod tseitin_encoder;
pub use tseitin_encoder::CircuitEncoding;
pub use tseitin_encoder::Projection;
pub use tseitin_encoder::TseitinEncoder;
pub use tseitin_encoder::VarMap;
