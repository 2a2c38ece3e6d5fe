use super::{
	document::NfaDocument, simulate, Alphabet, Automaton, AutomatonError, Result, StateId, Symbol,
	TransitionLabel, Word,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
struct State<S>
where
	S: StateId,
{
	accepts: bool,
	transitions: BTreeMap<Symbol, BTreeSet<S>>,
	epsilon: BTreeSet<S>,
}

impl<S> State<S>
where
	S: StateId,
{
	pub fn new() -> Self {
		Self {
			accepts: false,
			transitions: BTreeMap::new(),
			epsilon: BTreeSet::new(),
		}
	}
}

/// A nondeterministic finite state automaton with epsilon transitions.
///
/// Epsilon transitions are kept apart from symbol transitions, so no alphabet symbol can ever
/// collide with the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
	bound(
		serialize = "S: StateId + Serialize",
		deserialize = "S: StateId + Deserialize<'de>"
	),
	into = "NfaDocument<S>",
	try_from = "NfaDocument<S>"
)]
pub struct NFA<S>
where
	S: StateId,
{
	alphabet: Alphabet,
	start: Option<S>,
	states: BTreeMap<S, State<S>>,
}

impl<S> Default for NFA<S>
where
	S: StateId,
{
	fn default() -> Self {
		Self {
			alphabet: Alphabet::new(),
			start: None,
			states: BTreeMap::new(),
		}
	}
}

impl<S> NFA<S>
where
	S: StateId,
{
	/// Returns a reference to the requested state or an `AutomatonError::UnknownState` error otherwise.
	fn get_state(&self, id: &S) -> Result<&State<S>> {
		self.states.get(id).ok_or_else(|| AutomatonError::unknown(id))
	}

	/// Returns a mutable reference to the requested state or an `AutomatonError::UnknownState` error otherwise.
	fn get_state_mut(&mut self, id: &S) -> Result<&mut State<S>> {
		self.states
			.get_mut(id)
			.ok_or_else(|| AutomatonError::unknown(id))
	}

	/// Adds `to` to the targets of `from` for every symbol of the label, or for the empty string.
	/// Returns an `AutomatonError::UnknownState` error if one of the states is inexistent.
	pub fn add_transition(&mut self, from: S, label: TransitionLabel, to: S) -> Result<()> {
		if !self.has_state(&to) {
			return Err(AutomatonError::unknown(&to));
		}
		let State {
			transitions,
			epsilon,
			..
		} = self.get_state_mut(&from)?;
		match label {
			TransitionLabel::Symbols(symbols) => {
				for symbol in symbols {
					transitions.entry(symbol).or_default().insert(to.clone());
				}
			}
			TransitionLabel::Epsilon => {
				epsilon.insert(to);
			}
		}
		Ok(())
	}

	/// Removes transitions leaving `from`.
	///
	/// A symbol label only touches those symbols, an epsilon label only the epsilon transitions,
	/// and no label or an empty symbol list touches every transition. Passing `to` restricts the
	/// removal to that target. Both states must exist, but removing a transition that does not
	/// exist does nothing.
	pub fn remove_transition(
		&mut self,
		from: &S,
		label: Option<&TransitionLabel>,
		to: Option<&S>,
	) -> Result<()> {
		if let Some(to) = to {
			if !self.has_state(to) {
				return Err(AutomatonError::unknown(to));
			}
		}
		let State {
			transitions,
			epsilon,
			..
		} = self.get_state_mut(from)?;
		match label {
			Some(TransitionLabel::Symbols(symbols)) if !symbols.is_empty() => {
				for symbol in symbols {
					if let Some(targets) = transitions.get_mut(symbol) {
						if strip(targets, to) {
							transitions.remove(symbol);
						}
					}
				}
			}
			Some(TransitionLabel::Epsilon) => {
				strip(epsilon, to);
			}
			_ => {
				transitions.retain(|_, targets| !strip(targets, to));
				strip(epsilon, to);
			}
		}
		Ok(())
	}

	/// Targets of `from` on `symbol`.
	pub fn next(&self, from: &S, symbol: &str) -> impl Iterator<Item = &S> {
		self.states
			.get(from)
			.and_then(|state| state.transitions.get(symbol))
			.into_iter()
			.flatten()
	}

	/// Targets of `from` on the empty string.
	pub fn next_epsilon(&self, from: &S) -> impl Iterator<Item = &S> {
		self.states
			.get(from)
			.map(|state| &state.epsilon)
			.into_iter()
			.flatten()
	}

	/// Union of the targets of every state in `from` on `symbol`, without epsilon closure.
	pub fn move_set<'a, V>(&self, from: V, symbol: &str) -> BTreeSet<S>
	where
		V: IntoIterator<Item = &'a S>,
		S: 'a,
	{
		from.into_iter()
			.flat_map(|state| self.next(state, symbol))
			.cloned()
			.collect()
	}

	/// Checks whether any state of the set is accepting.
	pub fn any_final<'a, V>(&self, states: V) -> bool
	where
		V: IntoIterator<Item = &'a S>,
		S: 'a,
	{
		states.into_iter().any(|state| self.is_final(state))
	}

	/// Iterates over all transitions as `(from, symbol, to)`, where a `None` symbol is epsilon.
	pub fn transitions(&self) -> impl Iterator<Item = (&S, Option<&str>, &S)> {
		self.states.iter().flat_map(|(from, state)| {
			let symbols = state.transitions.iter().flat_map(move |(symbol, targets)| {
				targets
					.iter()
					.map(move |to| (from, Some(symbol.as_str()), to))
			});
			let epsilon = state.epsilon.iter().map(move |to| (from, None, to));
			symbols.chain(epsilon)
		})
	}

	/// Builds a document listing every state and transition of this automaton.
	pub fn to_document(&self) -> NfaDocument<S> {
		NfaDocument::from(self)
	}
}

/// Removes `to` from the targets, or all targets if `None`. Returns whether the set is now empty.
fn strip<S>(targets: &mut BTreeSet<S>, to: Option<&S>) -> bool
where
	S: Ord,
{
	match to {
		Some(to) => {
			targets.remove(to);
		}
		None => targets.clear(),
	}
	targets.is_empty()
}

impl<S> Automaton<S> for NFA<S>
where
	S: StateId,
{
	fn alphabet(&self) -> &Alphabet {
		&self.alphabet
	}

	fn alphabet_mut(&mut self) -> &mut Alphabet {
		&mut self.alphabet
	}

	fn has_state(&self, id: &S) -> bool {
		self.states.contains_key(id)
	}

	fn states<'a>(&'a self) -> impl Iterator<Item = &'a S>
	where
		S: 'a,
	{
		self.states.keys()
	}

	fn add_state(&mut self, id: S) {
		self.states.entry(id).or_insert_with(State::new);
	}

	fn remove_state(&mut self, id: &S) {
		if self.states.remove(id).is_none() {
			return;
		}
		if self.start.as_ref() == Some(id) {
			self.start = None;
		}
		for state in self.states.values_mut() {
			state.transitions.retain(|_, targets| {
				targets.remove(id);
				!targets.is_empty()
			});
			state.epsilon.remove(id);
		}
	}

	fn start(&self) -> Option<&S> {
		self.start.as_ref()
	}

	fn set_start(&mut self, id: S) -> Result<()> {
		self.get_state(&id)?;
		self.start = Some(id);
		Ok(())
	}

	fn clear_start(&mut self) {
		self.start = None;
	}

	fn is_final(&self, id: &S) -> bool {
		self.states.get(id).map_or(false, |state| state.accepts)
	}

	fn add_final(&mut self, id: &S) -> Result<()> {
		self.get_state_mut(id)?.accepts = true;
		Ok(())
	}

	fn remove_final(&mut self, id: &S) {
		if let Some(state) = self.states.get_mut(id) {
			state.accepts = false;
		}
	}

	fn finals<'a>(&'a self) -> impl Iterator<Item = &'a S>
	where
		S: 'a,
	{
		self.states
			.iter()
			.filter(|(_, state)| state.accepts)
			.map(|(id, _)| id)
	}

	fn accepts(&self, word: &Word) -> bool {
		simulate::run_nfa(self, word).accepted
	}
}
