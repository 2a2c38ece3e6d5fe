use crate::{Alphabet, Word};
use std::{fmt, hash::Hash};
use thiserror::Error;

/// Requirements for a state label.
///
/// Labels are opaque: a state has no identity beyond its label. The ordering is used to build
/// canonical keys for sets of states.
pub trait StateId: Clone + Ord + Hash + fmt::Debug + fmt::Display {}

impl<T> StateId for T where T: Clone + Ord + Hash + fmt::Debug + fmt::Display {}

/// Result type used throughout the crate.
pub type Result<T, E = AutomatonError> = std::result::Result<T, E>;

/// Trait representing an abstract automaton and its editing operations.
pub trait Automaton<S>
where
	Self: Default,
	S: StateId,
{
	/// Creates a new empty automaton.
	fn new() -> Self {
		Self::default()
	}

	/// Creates a new empty automaton over a given alphabet.
	fn with_alphabet(alphabet: Alphabet) -> Self {
		let mut automaton = Self::new();
		*automaton.alphabet_mut() = alphabet;
		automaton
	}

	/// Creates a new automaton with a given set of states.
	/// Each state is paired with its accepting flag.
	fn from_states<V>(alphabet: Alphabet, start: Option<S>, states: V) -> Result<Self>
	where
		V: IntoIterator<Item = (S, bool)>,
	{
		let mut automaton = Self::with_alphabet(alphabet);
		for (id, accept) in states {
			automaton.add_state(id.clone());
			if accept {
				automaton.add_final(&id)?;
			}
		}
		if let Some(start) = start {
			automaton.set_start(start)?;
		}
		Ok(automaton)
	}

	/// Returns the input alphabet.
	fn alphabet(&self) -> &Alphabet;

	/// Returns a mutable reference to the input alphabet.
	fn alphabet_mut(&mut self) -> &mut Alphabet;

	/// Checks whether the states of the automaton includes a state.
	fn has_state(&self, id: &S) -> bool;

	/// Iterates over all states in label order.
	fn states<'a>(&'a self) -> impl Iterator<Item = &'a S>
	where
		S: 'a;

	/// Adds a new state to the automaton.
	/// Adding a state that already exists leaves it untouched.
	fn add_state(&mut self, id: S);

	/// Removes a state along with every transition leading to or from it.
	/// Removing an inexistent state does nothing.
	fn remove_state(&mut self, id: &S);

	/// Returns the start state, if one is set.
	fn start(&self) -> Option<&S>;

	/// Updates the start state.
	/// Returns an `AutomatonError::UnknownState` error if the state is inexistent.
	fn set_start(&mut self, id: S) -> Result<()>;

	/// Unsets the start state.
	fn clear_start(&mut self);

	/// Checks whether a state is accepting. Inexistent states are not.
	fn is_final(&self, id: &S) -> bool;

	/// Marks a state as accepting.
	/// Returns an `AutomatonError::UnknownState` error if the state is inexistent.
	fn add_final(&mut self, id: &S) -> Result<()>;

	/// Marks a state as not accepting.
	/// Does nothing if the state is inexistent.
	fn remove_final(&mut self, id: &S);

	/// Iterates over all accepting states in label order.
	fn finals<'a>(&'a self) -> impl Iterator<Item = &'a S>
	where
		S: 'a;

	/// Runs the automaton on a whole word and returns the verdict.
	fn accepts(&self, word: &Word) -> bool;
}

/// Enum representing an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
	#[error("inexistent state \"{0}\"")]
	UnknownState(String),
	#[error("epsilon transitions are not allowed in a DFA (symbol \"{0}\")")]
	EpsilonInDfa(String),
	#[error("\"{0}\" is an epsilon marker and cannot be an alphabet symbol")]
	EpsilonSymbol(String),
	#[error("alphabet symbols cannot be empty")]
	EmptySymbol,
	#[error("no start state is set")]
	MissingStart,
	#[error("more than one start state: \"{0}\" and \"{1}\"")]
	MultipleStarts(String, String),
	#[error("alphabets differ: {{{}}} and {{{}}}", .left.join(","), .right.join(","))]
	AlphabetMismatch { left: Vec<String>, right: Vec<String> },
	#[error("subset construction exceeded the limit of {0} states")]
	StateLimitExceeded(usize),
}

impl AutomatonError {
	pub(crate) fn unknown<S>(id: &S) -> Self
	where
		S: fmt::Display,
	{
		Self::UnknownState(id.to_string())
	}
}
