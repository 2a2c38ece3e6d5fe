use super::{
	alphabet::is_epsilon_marker, document::DfaDocument, simulate, Alphabet, Automaton,
	AutomatonError, Result, StateId, Symbol, Word,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
struct State<S> {
	accepts: bool,
	transitions: BTreeMap<Symbol, S>,
	subset: Option<BTreeSet<String>>,
}

impl<S> State<S> {
	pub fn new() -> Self {
		Self {
			accepts: false,
			transitions: BTreeMap::new(),
			subset: None,
		}
	}
}

/// A deterministic finite state automaton.
///
/// The transition function is partial: a missing `(state, symbol)` entry means there is no move,
/// which rejects the rest of the input without a dead state ever being stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
	bound(
		serialize = "S: StateId + Serialize",
		deserialize = "S: StateId + Deserialize<'de>"
	),
	into = "DfaDocument<S>",
	try_from = "DfaDocument<S>"
)]
pub struct DFA<S>
where
	S: StateId,
{
	alphabet: Alphabet,
	start: Option<S>,
	states: BTreeMap<S, State<S>>,
}

impl<S> Default for DFA<S>
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

impl<S> DFA<S>
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

	/// Adds a new state remembering the set of NFA states it stands for.
	pub fn add_state_with_subset<V, T>(&mut self, id: S, subset: V)
	where
		V: IntoIterator<Item = T>,
		T: ToString,
	{
		let state = self.states.entry(id).or_insert_with(State::new);
		state.subset = Some(subset.into_iter().map(|q| q.to_string()).collect());
	}

	/// Replaces the recorded NFA subset of a state.
	pub fn set_subset<V, T>(&mut self, id: &S, subset: V) -> Result<()>
	where
		V: IntoIterator<Item = T>,
		T: ToString,
	{
		self.get_state_mut(id)?.subset = Some(subset.into_iter().map(|q| q.to_string()).collect());
		Ok(())
	}

	/// The NFA states a state was built from, if it came out of subset construction.
	pub fn subset_of(&self, id: &S) -> Option<&BTreeSet<String>> {
		self.states.get(id).and_then(|state| state.subset.as_ref())
	}

	/// Sets the target of `from` on `symbol`, replacing any previous target.
	///
	/// Returns an `AutomatonError::EpsilonInDfa` error for epsilon markers and an
	/// `AutomatonError::UnknownState` error if one of the states is inexistent.
	pub fn add_transition<T>(&mut self, from: S, symbol: T, to: S) -> Result<()>
	where
		T: Into<Symbol>,
	{
		let symbol = symbol.into();
		if is_epsilon_marker(&symbol) {
			return Err(AutomatonError::EpsilonInDfa(symbol));
		}
		if !self.has_state(&to) {
			return Err(AutomatonError::unknown(&to));
		}
		let State { transitions, .. } = self.get_state_mut(&from)?;
		transitions.insert(symbol, to);
		Ok(())
	}

	/// Removes the transition of `from` on `symbol`, or every transition of `from` if `None`.
	/// Removing a transition that does not exist does nothing.
	pub fn remove_transition(&mut self, from: &S, symbol: Option<&str>) -> Result<()> {
		let State { transitions, .. } = self.get_state_mut(from)?;
		match symbol {
			Some(symbol) => {
				transitions.remove(symbol);
			}
			None => transitions.clear(),
		}
		Ok(())
	}

	/// Target of `from` on `symbol`.
	pub fn next(&self, from: &S, symbol: &str) -> Option<&S> {
		self.states
			.get(from)
			.and_then(|state| state.transitions.get(symbol))
	}

	/// Iterates over all transitions as `(from, symbol, to)`.
	pub fn transitions(&self) -> impl Iterator<Item = (&S, &str, &S)> {
		self.states.iter().flat_map(|(from, state)| {
			state
				.transitions
				.iter()
				.map(move |(symbol, to)| (from, symbol.as_str(), to))
		})
	}

	/// Builds a document listing every state, transition and subset of this automaton.
	pub fn to_document(&self) -> DfaDocument<S> {
		DfaDocument::from(self)
	}
}

impl<S> Automaton<S> for DFA<S>
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
			state.transitions.retain(|_, to| *to != *id);
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
		simulate::run_dfa(self, word).accepted
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use maplit::btreeset;

	fn ab_star() -> DFA<u32> {
		let alphabet = Alphabet::from_csv("a,b").unwrap();
		let mut dfa = DFA::from_states(alphabet, Some(0), vec![(0, false), (1, true)]).unwrap();
		dfa.add_transition(0, "a", 1).unwrap();
		dfa.add_transition(1, "a", 1).unwrap();
		dfa.add_transition(1, "b", 1).unwrap();
		dfa
	}

	#[test]
	fn construct() {
		let dfa = ab_star();

		assert!(dfa.has_state(&0), "Initially added state missing");
		assert!(dfa.has_state(&1), "Later added state missing");
		assert!(!dfa.is_final(&0), "Initial state incorrectly accepting");
		assert_eq!(Some(&0), dfa.start(), "Initial state not set correctly");
		assert_eq!(Some(&1), dfa.next(&0, "a"));
		assert_eq!(None, dfa.next(&0, "b"), "Missing transition should be no move");
	}

	#[test]
	fn rejects_epsilon() {
		let mut dfa = ab_star();
		for marker in ["ε", "e", "EPS"] {
			assert_eq!(
				Err(AutomatonError::EpsilonInDfa(marker.into())),
				dfa.add_transition(0, marker, 1),
				"Epsilon marker {} accepted",
				marker
			);
		}
		assert_eq!(
			Err(AutomatonError::EpsilonInDfa("e".into())),
			dfa.add_transition(0, "e", 42),
			"Epsilon check must come before the state check"
		);
		assert_eq!(
			Err(AutomatonError::UnknownState("42".into())),
			dfa.add_transition(0, "b", 42)
		);
	}

	#[test]
	fn overwrite_transition() {
		let mut dfa = ab_star();
		dfa.add_transition(1, "b", 0).unwrap();
		assert_eq!(Some(&0), dfa.next(&1, "b"), "Last write should win");
		assert_eq!(3, dfa.transitions().count());
	}

	#[test]
	fn remove_state() {
		let mut dfa = ab_star();
		dfa.add_state_with_subset(2, vec!["q0", "q1"]);
		dfa.add_transition(2, "a", 1).unwrap();
		dfa.remove_state(&1);

		assert!(!dfa.has_state(&1), "State not removed");
		assert_eq!(None, dfa.next(&0, "a"), "Incoming transition kept");
		assert_eq!(None, dfa.next(&2, "a"), "Incoming transition kept");
		assert_eq!(0, dfa.finals().count());

		dfa.remove_state(&0);
		assert_eq!(None, dfa.start(), "Start state not cleared");
		assert_eq!(Some(&btreeset!["q0".to_string(), "q1".to_string()]), dfa.subset_of(&2));

		dfa.remove_state(&2);
		assert_eq!(None, dfa.subset_of(&2), "Subset kept after removal");
		dfa.remove_state(&7);
	}

	#[test]
	fn remove_transition() {
		let mut dfa = ab_star();
		dfa.remove_transition(&1, Some("a")).unwrap();
		dfa.remove_transition(&1, Some("z")).unwrap();
		assert_eq!(None, dfa.next(&1, "a"));
		assert_eq!(Some(&1), dfa.next(&1, "b"));

		dfa.remove_transition(&1, None).unwrap();
		assert_eq!(1, dfa.transitions().count());
		assert_eq!(
			Err(AutomatonError::UnknownState("9".into())),
			dfa.remove_transition(&9, None)
		);
	}

	#[test]
	fn run() {
		let dfa = ab_star();
		assert!(dfa.accepts(&Word::from_chars("aab")), "Incorrect result on accepting run");
		assert!(!dfa.accepts(&Word::from_chars("ba")), "Incorrect result on not-accepting run");
		assert!(!dfa.accepts(&Word::new()), "Empty word accepted");
	}
}
