use crate::{AutomatonError, Result};
use std::{fmt, slice};

/// A terminal symbol.
pub type Symbol = String;

/// Canonical spelling of the empty-string marker.
pub const EPSILON: &str = "ε";

/// Checks whether a label denotes the empty string rather than a symbol.
///
/// Besides the canonical `ε`, the ASCII aliases `e` and `eps` are recognized in any case.
pub fn is_epsilon_marker(label: &str) -> bool {
	label == EPSILON || label.eq_ignore_ascii_case("e") || label.eq_ignore_ascii_case("eps")
}

/// Finite, insertion-ordered set of terminal symbols.
///
/// An alphabet never contains the epsilon marker or an empty symbol.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
	symbols: Vec<Symbol>,
}

impl Alphabet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a new alphabet from a sequence of symbols, skipping duplicates.
	pub fn from_symbols<V, T>(symbols: V) -> Result<Self>
	where
		V: IntoIterator<Item = T>,
		T: Into<Symbol>,
	{
		let mut alphabet = Self::new();
		for symbol in symbols {
			alphabet.insert(symbol)?;
		}
		Ok(alphabet)
	}

	/// Parses a comma separated list of symbols such as `"a, b,c"`.
	/// Surrounding whitespace is trimmed and empty entries are dropped.
	pub fn from_csv(csv: &str) -> Result<Self> {
		Self::from_symbols(csv.split(',').map(str::trim).filter(|part| !part.is_empty()))
	}

	/// Adds a symbol. Returns whether the symbol was new.
	pub fn insert<T>(&mut self, symbol: T) -> Result<bool>
	where
		T: Into<Symbol>,
	{
		let symbol = symbol.into();
		if symbol.is_empty() {
			return Err(AutomatonError::EmptySymbol);
		}
		if is_epsilon_marker(&symbol) {
			return Err(AutomatonError::EpsilonSymbol(symbol));
		}
		if self.contains(&symbol) {
			Ok(false)
		} else {
			self.symbols.push(symbol);
			Ok(true)
		}
	}

	pub fn remove(&mut self, symbol: &str) -> bool {
		let len = self.symbols.len();
		self.symbols.retain(|other| other != symbol);
		self.symbols.len() != len
	}

	pub fn contains(&self, symbol: &str) -> bool {
		self.symbols.iter().any(|other| other == symbol)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.symbols.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// Checks set equality, ignoring the order in which symbols were added.
	pub fn same_symbols(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().all(|symbol| other.contains(symbol))
	}

	/// Returns the symbols of `self` followed by the symbols only `other` has.
	pub fn union(&self, other: &Self) -> Self {
		let mut symbols = self.symbols.clone();
		symbols.extend(
			other
				.iter()
				.filter(|symbol| !self.contains(symbol))
				.map(String::from),
		);
		Self { symbols }
	}

	pub(crate) fn to_vec(&self) -> Vec<Symbol> {
		self.symbols.clone()
	}
}

impl fmt::Display for Alphabet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.symbols.join(","))
	}
}

/// A sequence of symbols fed to an automaton.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(Vec<Symbol>);

impl Word {
	pub fn new() -> Self {
		Self::default()
	}

	/// Splits a string into single character symbols.
	pub fn from_chars(input: &str) -> Self {
		input.chars().map(String::from).collect()
	}

	pub fn push<T>(&mut self, symbol: T)
	where
		T: Into<Symbol>,
	{
		self.0.push(symbol.into());
	}

	/// Returns a copy of this word extended by one symbol.
	pub fn pushed(&self, symbol: &str) -> Self {
		let mut word = self.clone();
		word.push(symbol);
		word
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn symbols(&self) -> &[Symbol] {
		&self.0
	}

	pub fn iter(&self) -> slice::Iter<Symbol> {
		self.0.iter()
	}
}

impl<T> FromIterator<T> for Word
where
	T: Into<Symbol>,
{
	fn from_iter<V>(iter: V) -> Self
	where
		V: IntoIterator<Item = T>,
	{
		Self(iter.into_iter().map(Into::into).collect())
	}
}

impl<'a> IntoIterator for &'a Word {
	type Item = &'a Symbol;
	type IntoIter = slice::Iter<'a, Symbol>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl fmt::Display for Word {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for symbol in &self.0 {
			f.write_str(symbol)?;
		}
		Ok(())
	}
}

/// What a transition is taken on: one or more symbols, or the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionLabel {
	Symbols(Vec<Symbol>),
	Epsilon,
}

impl TransitionLabel {
	pub fn symbol<T>(symbol: T) -> Self
	where
		T: Into<Symbol>,
	{
		Self::Symbols(vec![symbol.into()])
	}

	pub fn symbols<V, T>(symbols: V) -> Self
	where
		V: IntoIterator<Item = T>,
		T: Into<Symbol>,
	{
		Self::Symbols(symbols.into_iter().map(Into::into).collect())
	}

	/// Parses an edge label as typed into an editor.
	///
	/// An epsilon marker yields `Epsilon`, anything else is read as a comma separated symbol list.
	pub fn parse(text: &str) -> Self {
		let text = text.trim();
		if is_epsilon_marker(text) {
			Self::Epsilon
		} else {
			Self::symbols(text.split(',').map(str::trim).filter(|part| !part.is_empty()))
		}
	}
}
