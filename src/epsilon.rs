use super::{StateId, NFA};
use log::trace;
use std::collections::{BTreeSet, HashMap};

/// Epsilon closure calculator bound to one NFA.
///
/// Closures are memoized per state. The calculator borrows the NFA, so the automaton cannot be
/// edited while cached closures are alive; build a new calculator after editing.
#[derive(Debug)]
pub struct EpsilonClosure<'a, S>
where
	S: StateId,
{
	nfa: &'a NFA<S>,
	cache: HashMap<S, BTreeSet<S>>,
}

impl<'a, S> EpsilonClosure<'a, S>
where
	S: StateId,
{
	pub fn new(nfa: &'a NFA<S>) -> Self {
		Self {
			nfa,
			cache: HashMap::new(),
		}
	}

	/// The automaton the closures are computed over.
	pub fn nfa(&self) -> &'a NFA<S> {
		self.nfa
	}

	/// Smallest set containing `state` that is closed under epsilon transitions.
	pub fn closure_of_state(&mut self, state: &S) -> &BTreeSet<S> {
		let nfa = self.nfa;
		self.cache
			.entry(state.clone())
			.or_insert_with(|| Self::compute(nfa, state))
	}

	/// Union of the closures of every state in the set.
	pub fn closure_of_set<'s, V>(&mut self, states: V) -> BTreeSet<S>
	where
		V: IntoIterator<Item = &'s S>,
		S: 's,
	{
		let mut closure = BTreeSet::new();
		for state in states {
			closure.extend(self.closure_of_state(state).iter().cloned());
		}
		closure
	}

	/// Checks whether the closure of a state has been computed already.
	pub fn is_cached(&self, state: &S) -> bool {
		self.cache.contains_key(state)
	}

	fn compute(nfa: &NFA<S>, state: &S) -> BTreeSet<S> {
		let mut visited = BTreeSet::new();
		visited.insert(state.clone());
		let mut stack = vec![state.clone()];

		while let Some(current) = stack.pop() {
			for next in nfa.next_epsilon(&current) {
				if visited.insert(next.clone()) {
					stack.push(next.clone());
				}
			}
		}

		trace!("epsilon closure of {}: {:?}", state, visited);
		visited
	}
}
