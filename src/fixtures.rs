//! Automata shared by the unit tests.

use crate::{Alphabet, Automaton, TransitionLabel, Word, NFA};

/// Accepts `b*a+b`: `ab`, `aab`, `bab`, ...
pub fn scenario_nfa() -> NFA<&'static str> {
	let alphabet = Alphabet::from_csv("a,b").unwrap();
	let states = vec![("q0", false), ("q1", false), ("q2", false), ("q3", true)];
	let mut nfa = NFA::from_states(alphabet, Some("q0"), states).unwrap();
	nfa.add_transition("q0", TransitionLabel::Epsilon, "q1").unwrap();
	nfa.add_transition("q1", TransitionLabel::symbol("a"), "q2").unwrap();
	nfa.add_transition("q2", TransitionLabel::symbol("b"), "q3").unwrap();
	nfa.add_transition("q1", TransitionLabel::symbol("b"), "q1").unwrap();
	nfa.add_transition("q2", TransitionLabel::symbol("a"), "q2").unwrap();
	nfa
}

/// Epsilon cycles, nondeterminism and an accepting state reached through epsilon moves.
pub fn epsilon_web() -> NFA<&'static str> {
	let alphabet = Alphabet::from_csv("a,b").unwrap();
	let states = (0..6).map(|i| (["s0", "s1", "s2", "s3", "s4", "s5"][i], i == 5));
	let mut nfa = NFA::from_states(alphabet, Some("s0"), states).unwrap();
	let transitions = [
		("s0", "ε", "s1"),
		("s1", "ε", "s2"),
		("s2", "ε", "s0"),
		("s1", "a", "s3"),
		("s2", "a", "s4"),
		("s3", "b", "s5"),
		("s4", "ε", "s5"),
		("s5", "a", "s0"),
		("s4", "b", "s4"),
		("s5", "b", "s3"),
	];
	for (from, label, to) in transitions {
		nfa.add_transition(from, TransitionLabel::parse(label), to)
			.unwrap();
	}
	nfa
}

/// Accepts words over `{a, b}` whose `n`-th symbol from the end is `a`.
/// The equivalent DFA needs `2^n` states.
pub fn nth_from_last(n: u32) -> NFA<u32> {
	let alphabet = Alphabet::from_csv("a,b").unwrap();
	let states = (0..=n).map(|id| (id, id == n));
	let mut nfa = NFA::from_states(alphabet, Some(0), states).unwrap();
	nfa.add_transition(0, TransitionLabel::parse("a,b"), 0).unwrap();
	nfa.add_transition(0, TransitionLabel::symbol("a"), 1).unwrap();
	for id in 1..n {
		nfa.add_transition(id, TransitionLabel::parse("a,b"), id + 1)
			.unwrap();
	}
	nfa
}

/// Every word over the alphabet of length at most `max_len`, shortest first.
pub fn words(alphabet: &Alphabet, max_len: usize) -> Vec<Word> {
	let mut words = vec![Word::new()];
	let mut layer = vec![Word::new()];
	for _ in 0..max_len {
		layer = layer
			.iter()
			.flat_map(|word| alphabet.iter().map(move |symbol| word.pushed(symbol)))
			.collect();
		words.extend(layer.iter().cloned());
	}
	words
}
