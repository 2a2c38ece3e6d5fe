//! Finite automata with subset construction, simulation and equivalence checking.
//!
//! NFAs with epsilon transitions are converted into DFAs by the subset construction. Both kinds
//! of automata can be run stepwise, and two DFAs can be compared for language equivalence, which
//! yields a shortest distinguishing word when they differ.

mod alphabet;
mod automaton;
mod config;
mod dfa;
pub mod document;
mod epsilon;
mod equivalence;
mod nfa;
mod simulate;
mod subset;

#[cfg(test)]
mod fixtures;

pub use alphabet::{is_epsilon_marker, Alphabet, Symbol, TransitionLabel, Word, EPSILON};
pub use automaton::{Automaton, AutomatonError, Result, StateId};
pub use config::{AlphabetPolicy, EquivalenceConfig, SubsetConfig};
pub use dfa::DFA;
pub use epsilon::EpsilonClosure;
pub use equivalence::{check_equivalence, check_equivalence_with, Equivalence};
pub use nfa::NFA;
pub use simulate::{run_dfa, run_nfa, DfaRun, DfaStep, NfaRun, NfaStep, Trace};
pub use subset::{build_dfa, state_name, SubsetConstruction, SubsetRow, SubsetTable};
