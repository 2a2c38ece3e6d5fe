use super::{
	Automaton, AutomatonError, EpsilonClosure, Result, StateId, SubsetConfig, Symbol, DFA, NFA,
};
use log::{debug, trace};
use std::{
	collections::{BTreeSet, HashMap, VecDeque},
	fmt,
};

/// Converts an NFA into an equivalent DFA by the subset construction.
///
/// Every DFA state stands for the epsilon closed set of NFA states reachable on some input. States
/// are named `A`, `B`, ..., `Z`, `AA`, `AB`, ... in discovery order, and each remembers its subset.
#[derive(Debug)]
pub struct SubsetConstruction<'a, S>
where
	S: StateId,
{
	nfa: &'a NFA<S>,
	config: SubsetConfig,
}

impl<'a, S> SubsetConstruction<'a, S>
where
	S: StateId,
{
	pub fn new(nfa: &'a NFA<S>) -> Self {
		Self::with_config(nfa, SubsetConfig::default())
	}

	pub fn with_config(nfa: &'a NFA<S>, config: SubsetConfig) -> Self {
		Self { nfa, config }
	}

	pub fn build(&self) -> Result<DFA<String>> {
		self.build_traced(|_, _, _| {})
	}

	/// Builds the DFA, reporting every `(I, a, J)` step to `trace`, empty `J` included.
	pub fn build_traced<F>(&self, mut trace: F) -> Result<DFA<String>>
	where
		F: FnMut(&BTreeSet<S>, &str, &BTreeSet<S>),
	{
		let start = self.nfa.start().ok_or(AutomatonError::MissingStart)?;
		let mut closure = EpsilonClosure::new(self.nfa);
		let mut dfa = DFA::with_alphabet(self.nfa.alphabet().clone());
		let mut subsets = Subsets::default();
		let mut queue = VecDeque::new();

		let (initial, _) = subsets.intern(closure.closure_of_state(start).clone());
		self.admit(&mut dfa, &subsets, initial)?;
		dfa.set_start(state_name(initial))?;
		queue.push_back(initial);

		while let Some(index) = queue.pop_front() {
			let source = subsets.get(index).clone();
			for symbol in self.nfa.alphabet().iter() {
				let moved = self.nfa.move_set(&source, symbol);
				let target = closure.closure_of_set(&moved);
				trace(&source, symbol, &target);
				if moved.is_empty() {
					continue;
				}

				let (target_index, fresh) = subsets.intern(target);
				if fresh {
					self.admit(&mut dfa, &subsets, target_index)?;
					queue.push_back(target_index);
				}
				dfa.add_transition(state_name(index), symbol, state_name(target_index))?;
			}
		}

		debug!(
			"subset construction: {} NFA states, {} DFA states",
			self.nfa.states().count(),
			subsets.len()
		);
		Ok(dfa)
	}

	/// Adds the DFA state for a newly discovered subset.
	fn admit(&self, dfa: &mut DFA<String>, subsets: &Subsets<S>, index: usize) -> Result<()> {
		if let Some(limit) = self.config.state_limit {
			if subsets.len() > limit {
				return Err(AutomatonError::StateLimitExceeded(limit));
			}
		}

		let name = state_name(index);
		let subset = subsets.get(index);
		trace!("discovered {} = {:?}", name, subset);
		dfa.add_state_with_subset(name.clone(), subset);
		if self.nfa.any_final(subset) {
			dfa.add_final(&name)?;
		}
		Ok(())
	}
}

/// Builds the DFA equivalent to an NFA with the default configuration.
pub fn build_dfa<S>(nfa: &NFA<S>) -> Result<DFA<String>>
where
	S: StateId,
{
	SubsetConstruction::new(nfa).build()
}

/// Interning table giving each distinct subset a dense index.
///
/// Sets are compared by content, so the same subset always maps to the same DFA state.
#[derive(Debug)]
struct Subsets<S> {
	ids: HashMap<BTreeSet<S>, usize>,
	sets: Vec<BTreeSet<S>>,
}

impl<S> Default for Subsets<S> {
	fn default() -> Self {
		Self {
			ids: HashMap::new(),
			sets: Vec::new(),
		}
	}
}

impl<S> Subsets<S>
where
	S: StateId,
{
	/// Returns the index of the subset and whether it was seen for the first time.
	fn intern(&mut self, subset: BTreeSet<S>) -> (usize, bool) {
		if let Some(&index) = self.ids.get(&subset) {
			return (index, false);
		}
		let index = self.sets.len();
		self.ids.insert(subset.clone(), index);
		self.sets.push(subset);
		(index, true)
	}

	fn get(&self, index: usize) -> &BTreeSet<S> {
		&self.sets[index]
	}

	fn len(&self) -> usize {
		self.sets.len()
	}
}

/// Spreadsheet style name of the `index`-th state: `A`..`Z`, then `AA`, `AB`, ...
pub fn state_name(mut index: usize) -> String {
	let mut name = String::new();
	loop {
		name.insert(0, char::from(b'A' + (index % 26) as u8));
		if index < 26 {
			return name;
		}
		index = index / 26 - 1;
	}
}

/// One row of a subset construction table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetRow {
	pub index: usize,
	pub from: Vec<String>,
	pub symbol: Symbol,
	pub to: Vec<String>,
}

/// Collects the steps of a subset construction as numbered rows.
///
/// ```
/// # use automata_lab::*;
/// let mut nfa = NFA::with_alphabet(Alphabet::from_csv("a").unwrap());
/// nfa.add_state("q0");
/// nfa.set_start("q0").unwrap();
/// let mut table = SubsetTable::new();
/// SubsetConstruction::new(&nfa)
/// 	.build_traced(|from, symbol, to| table.record(from, symbol, to))
/// 	.unwrap();
/// assert_eq!("1 | {q0} | a | {}\n", table.to_string());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubsetTable {
	rows: Vec<SubsetRow>,
}

impl SubsetTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record<S>(&mut self, from: &BTreeSet<S>, symbol: &str, to: &BTreeSet<S>)
	where
		S: StateId,
	{
		self.rows.push(SubsetRow {
			index: self.rows.len() + 1,
			from: from.iter().map(ToString::to_string).collect(),
			symbol: symbol.into(),
			to: to.iter().map(ToString::to_string).collect(),
		});
	}

	pub fn rows(&self) -> &[SubsetRow] {
		&self.rows
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn clear(&mut self) {
		self.rows.clear();
	}
}

impl fmt::Display for SubsetTable {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for row in &self.rows {
			writeln!(
				f,
				"{} | {{{}}} | {} | {{{}}}",
				row.index,
				row.from.join(","),
				row.symbol,
				row.to.join(",")
			)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{fixtures, run_dfa, run_nfa, Alphabet, TransitionLabel, Word};
	use maplit::btreeset;

	#[test]
	fn names() {
		assert_eq!("A", state_name(0));
		assert_eq!("Z", state_name(25));
		assert_eq!("AA", state_name(26));
		assert_eq!("AB", state_name(27));
		assert_eq!("ZZ", state_name(701));
		assert_eq!("AAA", state_name(702));
	}

	#[test]
	fn scenario() {
		let dfa = build_dfa(&fixtures::scenario_nfa()).unwrap();

		for accepted in &["ab", "aab", "bab"] {
			assert!(
				dfa.accepts(&Word::from_chars(accepted)),
				"{} should be accepted",
				accepted
			);
		}
		for rejected in &["a", "", "ba"] {
			assert!(
				!dfa.accepts(&Word::from_chars(rejected)),
				"{} should be rejected",
				rejected
			);
		}
	}

	#[test]
	fn subsets_recorded() {
		let dfa = build_dfa(&fixtures::scenario_nfa()).unwrap();
		let strings = |set: Vec<&str>| set.into_iter().map(String::from).collect::<BTreeSet<_>>();

		assert_eq!(Some(&"A".to_string()), dfa.start());
		assert_eq!(Some(&strings(vec!["q0", "q1"])), dfa.subset_of(&"A".into()));
		for state in dfa.states() {
			let subset = dfa.subset_of(state).unwrap();
			assert_eq!(
				subset.contains("q3"),
				dfa.is_final(state),
				"Final flag of {} disagrees with its subset",
				state
			);
		}
	}

	#[test]
	fn same_subset_same_state() {
		// s and r both lead to {r} on every symbol
		let mut nfa = NFA::with_alphabet(Alphabet::from_csv("a,b").unwrap());
		for id in ["s", "r"] {
			nfa.add_state(id);
		}
		nfa.set_start("s").unwrap();
		nfa.add_final(&"r").unwrap();
		nfa.add_transition("s", TransitionLabel::parse("a,b"), "r")
			.unwrap();
		nfa.add_transition("r", TransitionLabel::parse("a,b"), "r")
			.unwrap();

		let dfa = build_dfa(&nfa).unwrap();
		assert_eq!(2, dfa.states().count(), "Equal subsets were not merged");
		assert_eq!(dfa.next(&"A".into(), "a"), dfa.next(&"A".into(), "b"));
	}

	#[test]
	fn missing_start() {
		let mut nfa = fixtures::scenario_nfa();
		nfa.clear_start();
		assert_eq!(Err(AutomatonError::MissingStart), build_dfa(&nfa).map(|_| ()));
	}

	#[test]
	fn partial_transitions() {
		let dfa = build_dfa(&fixtures::scenario_nfa()).unwrap();
		let count = dfa.states().count();
		assert!(
			dfa.transitions().count() < count * 2,
			"Empty moves should not produce transitions"
		);
		assert!(
			dfa.states().all(|state| !dfa.subset_of(state).unwrap().is_empty()),
			"Dead state materialized"
		);
	}

	#[test]
	fn trace_table() {
		let nfa = fixtures::scenario_nfa();
		let mut table = SubsetTable::new();
		let dfa = SubsetConstruction::new(&nfa)
			.build_traced(|from, symbol, to| table.record(from, symbol, to))
			.unwrap();

		assert_eq!(
			dfa.states().count() * nfa.alphabet().len(),
			table.len(),
			"One row per subset and symbol expected"
		);
		let first = &table.rows()[0];
		assert_eq!(1, first.index);
		assert_eq!(vec!["q0", "q1"], first.from);
		assert_eq!("a", first.symbol);
		assert_eq!(vec!["q2"], first.to);
		assert!(
			table.rows().iter().any(|row| row.to.is_empty()),
			"Empty targets must be traced too"
		);
		assert!(table.to_string().starts_with("1 | {q0,q1} | a | {q2}\n"));
	}

	#[test]
	fn state_limit() {
		let nfa = fixtures::nth_from_last(4);
		let config = SubsetConfig {
			state_limit: Some(8),
		};
		assert_eq!(
			Err(AutomatonError::StateLimitExceeded(8)),
			SubsetConstruction::with_config(&nfa, config).build().map(|_| ())
		);
		assert_eq!(16, build_dfa(&nfa).unwrap().states().count());
	}

	#[test]
	fn deterministic() {
		let nfa = fixtures::epsilon_web();
		assert_eq!(build_dfa(&nfa).unwrap(), build_dfa(&nfa).unwrap());
	}

	fn assert_agrees<S>(nfa: &NFA<S>)
	where
		S: StateId,
	{
		let dfa = build_dfa(nfa).unwrap();
		for word in fixtures::words(nfa.alphabet(), 6) {
			assert_eq!(
				run_nfa(nfa, &word).accepted,
				run_dfa(&dfa, &word).accepted,
				"NFA and DFA disagree on \"{}\"",
				word
			);
		}
	}

	#[test]
	fn agrees_with_nfa() {
		assert_agrees(&fixtures::scenario_nfa());
		assert_agrees(&fixtures::epsilon_web());
		assert_agrees(&fixtures::nth_from_last(3));
	}

	#[test]
	fn epsilon_only_start() {
		let mut nfa = NFA::with_alphabet(Alphabet::from_csv("a").unwrap());
		nfa.add_state(0u8);
		nfa.add_state(1);
		nfa.set_start(0).unwrap();
		nfa.add_final(&1).unwrap();
		nfa.add_transition(0, TransitionLabel::Epsilon, 1).unwrap();

		let dfa = build_dfa(&nfa).unwrap();
		assert_eq!(1, dfa.states().count());
		assert!(dfa.is_final(&"A".into()), "Closure of the start state not final");
		assert_eq!(
			Some(&btreeset!["0".to_string(), "1".to_string()]),
			dfa.subset_of(&"A".into())
		);
		assert!(dfa.accepts(&Word::new()));
		assert!(!dfa.accepts(&Word::from_chars("a")));
	}
}
