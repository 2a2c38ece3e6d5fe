use super::{
	AlphabetPolicy, Automaton, AutomatonError, EquivalenceConfig, Result, StateId, Symbol, Word,
	DFA,
};
use log::{debug, trace};
use std::collections::{HashSet, VecDeque};

/// Verdict of an equivalence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Equivalence {
	Equivalent,
	/// A shortest word accepted by exactly one of the automata.
	Counterexample(Word),
}

impl Equivalence {
	pub fn is_equivalent(&self) -> bool {
		matches!(self, Self::Equivalent)
	}

	pub fn counterexample(&self) -> Option<&Word> {
		match self {
			Self::Equivalent => None,
			Self::Counterexample(word) => Some(word),
		}
	}
}

/// Decides whether two DFAs accept the same language, requiring equal alphabets.
pub fn check_equivalence<A, B>(a: &DFA<A>, b: &DFA<B>) -> Result<Equivalence>
where
	A: StateId,
	B: StateId,
{
	check_equivalence_with(a, b, &EquivalenceConfig::default())
}

/// Decides whether two DFAs accept the same language.
///
/// Explores pairs of states breadth first from the pair of start states, so the first pair with
/// differing verdicts is reached by a shortest distinguishing word. A missing transition moves to a
/// rejecting nowhere state, represented as `None`.
pub fn check_equivalence_with<A, B>(
	a: &DFA<A>,
	b: &DFA<B>,
	config: &EquivalenceConfig,
) -> Result<Equivalence>
where
	A: StateId,
	B: StateId,
{
	let sigma = symbols(a, b, config.alphabet)?;
	let mut visited = HashSet::new();
	let mut queue = VecDeque::new();
	queue.push_back((a.start(), b.start(), Word::new()));

	while let Some((p, q, word)) = queue.pop_front() {
		if !visited.insert((p, q)) {
			continue;
		}
		trace!("visiting ({:?}, {:?}) on \"{}\"", p, q, word);

		let accept_a = p.map_or(false, |p| a.is_final(p));
		let accept_b = q.map_or(false, |q| b.is_final(q));
		if accept_a != accept_b {
			debug!("not equivalent, counterexample \"{}\"", word);
			return Ok(Equivalence::Counterexample(word));
		}

		for symbol in &sigma {
			let next_a = p.and_then(|p| a.next(p, symbol));
			let next_b = q.and_then(|q| b.next(q, symbol));
			queue.push_back((next_a, next_b, word.pushed(symbol)));
		}
	}

	debug!("equivalent after {} state pairs", visited.len());
	Ok(Equivalence::Equivalent)
}

fn symbols<A, B>(a: &DFA<A>, b: &DFA<B>, policy: AlphabetPolicy) -> Result<Vec<Symbol>>
where
	A: StateId,
	B: StateId,
{
	match policy {
		AlphabetPolicy::RequireEqual => {
			if a.alphabet().same_symbols(b.alphabet()) {
				Ok(a.alphabet().to_vec())
			} else {
				Err(AutomatonError::AlphabetMismatch {
					left: a.alphabet().to_vec(),
					right: b.alphabet().to_vec(),
				})
			}
		}
		AlphabetPolicy::Union => Ok(a.alphabet().union(b.alphabet()).to_vec()),
	}
}
