/// Settings for subset construction.
#[derive(Debug, Clone, Default)]
pub struct SubsetConfig {
	/// Upper bound on the number of DFA states to discover. `None` means unbounded.
	pub state_limit: Option<usize>,
}

/// Which symbols an equivalence check explores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlphabetPolicy {
	/// Both automata must have the same alphabet, otherwise the check fails.
	#[default]
	RequireEqual,
	/// Explore the union of both alphabets. A symbol one automaton lacks is a move to nowhere.
	Union,
}

/// Settings for equivalence checks.
#[derive(Debug, Clone, Default)]
pub struct EquivalenceConfig {
	pub alphabet: AlphabetPolicy,
}
