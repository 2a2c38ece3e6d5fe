//! Plain documents for importing and exporting automata.
//!
//! A document lists the alphabet, every state with its start and final flags, and every
//! transition. Epsilon transitions carry an explicit flag instead of a reserved symbol, so any
//! alphabet symbol survives a round trip. Converting a document back into an automaton goes
//! through the regular editing operations and therefore rejects references to unknown states.

use super::{
	Alphabet, Automaton, AutomatonError, Result, StateId, Symbol, TransitionLabel, DFA, NFA,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry<S> {
	pub id: S,
	#[serde(default)]
	pub start: bool,
	#[serde(default, rename = "final")]
	pub accepting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfaTransitionEntry<S> {
	pub from: S,
	pub to: S,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub symbols: Vec<Symbol>,
	#[serde(default, skip_serializing_if = "is_false")]
	pub epsilon: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, bound(deserialize = "S: Deserialize<'de>"))]
pub struct NfaDocument<S> {
	#[serde(default)]
	pub alphabet: Vec<Symbol>,
	#[serde(default)]
	pub states: Vec<StateEntry<S>>,
	#[serde(default)]
	pub transitions: Vec<NfaTransitionEntry<S>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaTransitionEntry<S> {
	pub from: S,
	pub to: S,
	pub symbol: Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
	deny_unknown_fields,
	bound(deserialize = "S: StateId + Deserialize<'de>")
)]
pub struct DfaDocument<S>
where
	S: StateId,
{
	#[serde(default)]
	pub alphabet: Vec<Symbol>,
	#[serde(default)]
	pub states: Vec<StateEntry<S>>,
	#[serde(default)]
	pub transitions: Vec<DfaTransitionEntry<S>>,
	/// NFA states each DFA state was built from.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub subsets: BTreeMap<S, Vec<String>>,
}

fn is_false(value: &bool) -> bool {
	!*value
}

fn state_entries<S, A>(automaton: &A) -> Vec<StateEntry<S>>
where
	S: StateId,
	A: Automaton<S>,
{
	automaton
		.states()
		.map(|id| StateEntry {
			id: id.clone(),
			start: automaton.start() == Some(id),
			accepting: automaton.is_final(id),
		})
		.collect()
}

/// Adds the listed states to an empty automaton, enforcing a single start state.
fn load_states<S, A>(automaton: &mut A, states: Vec<StateEntry<S>>) -> Result<()>
where
	S: StateId,
	A: Automaton<S>,
{
	let mut start: Option<S> = None;
	for entry in &states {
		automaton.add_state(entry.id.clone());
	}
	for entry in states {
		if entry.accepting {
			automaton.add_final(&entry.id)?;
		}
		if entry.start {
			if let Some(previous) = &start {
				return Err(AutomatonError::MultipleStarts(
					previous.to_string(),
					entry.id.to_string(),
				));
			}
			automaton.set_start(entry.id.clone())?;
			start = Some(entry.id);
		}
	}
	Ok(())
}

impl<S> From<&NFA<S>> for NfaDocument<S>
where
	S: StateId,
{
	fn from(nfa: &NFA<S>) -> Self {
		let transitions = nfa
			.transitions()
			.map(|(from, symbol, to)| NfaTransitionEntry {
				from: from.clone(),
				to: to.clone(),
				symbols: symbol.map(String::from).into_iter().collect(),
				epsilon: symbol.is_none(),
			})
			.collect();
		Self {
			alphabet: nfa.alphabet().to_vec(),
			states: state_entries(nfa),
			transitions,
		}
	}
}

impl<S> From<NFA<S>> for NfaDocument<S>
where
	S: StateId,
{
	fn from(nfa: NFA<S>) -> Self {
		Self::from(&nfa)
	}
}

impl<S> TryFrom<NfaDocument<S>> for NFA<S>
where
	S: StateId,
{
	type Error = AutomatonError;

	fn try_from(document: NfaDocument<S>) -> Result<Self> {
		let mut nfa = NFA::with_alphabet(Alphabet::from_symbols(document.alphabet)?);
		load_states(&mut nfa, document.states)?;
		for entry in document.transitions {
			let label = if entry.epsilon {
				TransitionLabel::Epsilon
			} else {
				TransitionLabel::Symbols(entry.symbols)
			};
			nfa.add_transition(entry.from, label, entry.to)?;
		}
		Ok(nfa)
	}
}

impl<S> From<&DFA<S>> for DfaDocument<S>
where
	S: StateId,
{
	fn from(dfa: &DFA<S>) -> Self {
		let transitions = dfa
			.transitions()
			.map(|(from, symbol, to)| DfaTransitionEntry {
				from: from.clone(),
				to: to.clone(),
				symbol: symbol.into(),
			})
			.collect();
		let subsets = dfa
			.states()
			.filter_map(|id| {
				dfa.subset_of(id)
					.map(|subset| (id.clone(), subset.iter().cloned().collect()))
			})
			.collect();
		Self {
			alphabet: dfa.alphabet().to_vec(),
			states: state_entries(dfa),
			transitions,
			subsets,
		}
	}
}

impl<S> From<DFA<S>> for DfaDocument<S>
where
	S: StateId,
{
	fn from(dfa: DFA<S>) -> Self {
		Self::from(&dfa)
	}
}

impl<S> TryFrom<DfaDocument<S>> for DFA<S>
where
	S: StateId,
{
	type Error = AutomatonError;

	fn try_from(document: DfaDocument<S>) -> Result<Self> {
		let mut dfa = DFA::with_alphabet(Alphabet::from_symbols(document.alphabet)?);
		load_states(&mut dfa, document.states)?;
		for entry in document.transitions {
			dfa.add_transition(entry.from, entry.symbol, entry.to)?;
		}
		for (id, subset) in document.subsets {
			dfa.set_subset(&id, subset)?;
		}
		Ok(dfa)
	}
}
