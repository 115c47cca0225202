//! Utilities for generating passwords.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::charset::ClassSelection;
use crate::strength::StrengthScore;
use crate::{Secret, ValidationError};

/// A source of uniformly distributed floats in `[0, 1)`.
///
/// The sampler only ever asks for one float per password position, so a test can script the
/// exact sequence it wants.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<T: UniformSource + ?Sized> UniformSource for &mut T {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Adapts any `rand` generator into a [`UniformSource`].
#[derive(Debug)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> RngSource<R> {
        RngSource(rng)
    }
}

impl RngSource<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        RngSource(rand::thread_rng())
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn next_uniform(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// How a uniform draw is turned into an alphabet index.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexRounding {
    /// `floor(u * len)`: every position yields a character, all equally likely.
    #[default]
    Floor,
    /// `round(u * len)`: compatible with older generated output. A draw that rounds up to `len`
    /// falls off the end of the alphabet and contributes nothing, so roughly `1 / (2 * len)` of
    /// positions are dropped and the password comes out short.
    Round,
}

/// The characters a password is sampled from. Never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alphabet(Vec<char>);

#[allow(clippy::len_without_is_empty)]
impl Alphabet {
    /// Returns `None` if `chars` is empty.
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Option<Alphabet> {
        let chars = chars.into_iter().collect::<Vec<_>>();
        if chars.is_empty() {
            None
        } else {
            Some(Alphabet(chars))
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }
}

/// Concatenate the members of every selected class, in canonical class order, and score the
/// selection.
pub fn build_alphabet_and_score(
    selection: &ClassSelection,
) -> Result<(Alphabet, StrengthScore), ValidationError> {
    let alphabet = Alphabet::from_chars(selection.classes().flat_map(|c| c.members().chars()))
        .ok_or(ValidationError::NoClassSelected)?;
    Ok((alphabet, StrengthScore::from_selection(selection)))
}

/// Generate a password by independently sampling `len` positions of the given alphabet.
///
/// With [`IndexRounding::Floor`] the result has exactly `len` characters. With
/// [`IndexRounding::Round`] it may have fewer.
pub fn sample_password<S>(
    source: &mut S,
    alphabet: &Alphabet,
    len: usize,
    rounding: IndexRounding,
) -> Secret
where
    S: UniformSource + ?Sized,
{
    let chars = alphabet.chars();
    let mut secret = Secret(String::with_capacity(len));
    for _ in 0..len {
        let scaled = source.next_uniform() * chars.len() as f64;
        let index = match rounding {
            // Float error can push `u * len` up to `len` for `u` just below 1.
            IndexRounding::Floor => (scaled.floor() as usize).min(chars.len() - 1),
            IndexRounding::Round => scaled.round() as usize,
        };
        if let Some(ch) = chars.get(index) {
            secret.0.push(*ch);
        }
    }
    secret
}
