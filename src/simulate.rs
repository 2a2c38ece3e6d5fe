use super::{Automaton, EpsilonClosure, StateId, Symbol, DFA, EPSILON, NFA};
use std::{collections::BTreeSet, fmt};

/// Position of an NFA run after consuming a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaStep<S> {
	pub position: usize,
	/// Consumed symbol, `None` for the initial closure of the start state.
	pub symbol: Option<Symbol>,
	pub active: BTreeSet<S>,
}

/// Position of a DFA run after consuming a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaStep<S> {
	pub position: usize,
	pub symbol: Option<Symbol>,
	/// Current state, `None` once the run fell off the transition function.
	pub state: Option<S>,
}

impl<S> fmt::Display for NfaStep<S>
where
	S: StateId,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let symbol = match &self.symbol {
			Some(symbol) => symbol.clone(),
			None => format!("{}*", EPSILON),
		};
		let active: Vec<_> = self.active.iter().map(ToString::to_string).collect();
		write!(f, "{}: {} -> {{{}}}", self.position, symbol, active.join(","))
	}
}

impl<S> fmt::Display for DfaStep<S>
where
	S: StateId,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let symbol = self.symbol.as_deref().unwrap_or("");
		match &self.state {
			Some(state) => write!(f, "{}: {} -> {}", self.position, symbol, state),
			None => write!(f, "{}: {} -> none", self.position, symbol),
		}
	}
}

/// Complete record of a run together with its verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace<T> {
	pub steps: Vec<T>,
	pub accepted: bool,
}

/// Stepwise execution of an NFA.
///
/// Each call to `step` consumes one symbol, so a driver can pause between symbols.
#[derive(Debug)]
pub struct NfaRun<'a, S>
where
	S: StateId,
{
	closure: EpsilonClosure<'a, S>,
	active: BTreeSet<S>,
	steps: Vec<NfaStep<S>>,
}

impl<'a, S> NfaRun<'a, S>
where
	S: StateId,
{
	/// Starts a run in the epsilon closure of the start state.
	/// Without a start state, no state is ever active.
	pub fn new(nfa: &'a NFA<S>) -> Self {
		let mut closure = EpsilonClosure::new(nfa);
		let active = match nfa.start() {
			Some(start) => closure.closure_of_state(start).clone(),
			None => BTreeSet::new(),
		};
		let steps = vec![NfaStep {
			position: 0,
			symbol: None,
			active: active.clone(),
		}];
		Self {
			closure,
			active,
			steps,
		}
	}

	/// Consumes a symbol and returns the new set of active states.
	pub fn step(&mut self, symbol: &str) -> &BTreeSet<S> {
		let moved = self.closure.nfa().move_set(&self.active, symbol);
		self.active = self.closure.closure_of_set(&moved);
		self.steps.push(NfaStep {
			position: self.steps.len(),
			symbol: Some(symbol.into()),
			active: self.active.clone(),
		});
		&self.active
	}

	pub fn active(&self) -> &BTreeSet<S> {
		&self.active
	}

	/// Number of symbols consumed so far.
	pub fn position(&self) -> usize {
		self.steps.len() - 1
	}

	pub fn accepts(&self) -> bool {
		self.closure.nfa().any_final(&self.active)
	}

	pub fn steps(&self) -> &[NfaStep<S>] {
		&self.steps
	}

	pub fn into_trace(self) -> Trace<NfaStep<S>> {
		let accepted = self.accepts();
		Trace {
			steps: self.steps,
			accepted,
		}
	}
}

/// Stepwise execution of a DFA.
///
/// A run that takes a missing transition is dead: it rejects and ignores further symbols.
#[derive(Debug)]
pub struct DfaRun<'a, S>
where
	S: StateId,
{
	dfa: &'a DFA<S>,
	current: Option<S>,
	steps: Vec<DfaStep<S>>,
	dead: bool,
}

impl<'a, S> DfaRun<'a, S>
where
	S: StateId,
{
	/// Starts a run in the start state. Without a start state the run is dead from the outset.
	pub fn new(dfa: &'a DFA<S>) -> Self {
		let current = dfa.start().cloned();
		let steps = vec![DfaStep {
			position: 0,
			symbol: None,
			state: current.clone(),
		}];
		Self {
			dfa,
			dead: current.is_none(),
			current,
			steps,
		}
	}

	/// Consumes a symbol. Returns whether the run is still alive afterwards.
	/// A dead run records no further steps, except that a run without a start state records
	/// the first symbol it rejects.
	pub fn step(&mut self, symbol: &str) -> bool {
		if self.dead && self.position() > 0 {
			return false;
		}
		self.current = self
			.current
			.as_ref()
			.and_then(|state| self.dfa.next(state, symbol))
			.cloned();
		self.steps.push(DfaStep {
			position: self.steps.len(),
			symbol: Some(symbol.into()),
			state: self.current.clone(),
		});
		self.dead = self.current.is_none();
		!self.dead
	}

	pub fn current(&self) -> Option<&S> {
		self.current.as_ref()
	}

	pub fn is_dead(&self) -> bool {
		self.dead
	}

	/// Number of symbols consumed so far.
	pub fn position(&self) -> usize {
		self.steps.len() - 1
	}

	pub fn accepts(&self) -> bool {
		self.current
			.as_ref()
			.map_or(false, |state| self.dfa.is_final(state))
	}

	pub fn steps(&self) -> &[DfaStep<S>] {
		&self.steps
	}

	pub fn into_trace(self) -> Trace<DfaStep<S>> {
		let accepted = self.accepts();
		Trace {
			steps: self.steps,
			accepted,
		}
	}
}

/// Runs an NFA over the whole input.
pub fn run_nfa<S, V, T>(nfa: &NFA<S>, input: V) -> Trace<NfaStep<S>>
where
	S: StateId,
	V: IntoIterator<Item = T>,
	T: AsRef<str>,
{
	let mut run = NfaRun::new(nfa);
	for symbol in input {
		run.step(symbol.as_ref());
	}
	run.into_trace()
}

/// Runs a DFA until the input is exhausted or no transition applies.
pub fn run_dfa<S, V, T>(dfa: &DFA<S>, input: V) -> Trace<DfaStep<S>>
where
	S: StateId,
	V: IntoIterator<Item = T>,
	T: AsRef<str>,
{
	let mut run = DfaRun::new(dfa);
	for symbol in input {
		if !run.step(symbol.as_ref()) {
			break;
		}
	}
	run.into_trace()
}
