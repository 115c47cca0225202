//! The generator's UI state, as immutable records, and the controller that folds user events into
//! new records.

use crate::charset::{CharacterClass, ClassSelection};
use crate::config::LengthLimits;
use crate::password_generation::{self, IndexRounding, UniformSource};
use crate::strength::StrengthScore;
use crate::{Secret, ValidationError};

/// Something the generated password can be copied to.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), anyhow::Error>;
}

/// Shows short, transient messages to the user.
pub trait Notifier {
    fn notify(&mut self, message: &str, is_error: bool);
}

impl<T: Clipboard + ?Sized> Clipboard for &mut T {
    fn copy(&mut self, text: &str) -> Result<(), anyhow::Error> {
        (**self).copy(text)
    }
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn notify(&mut self, message: &str, is_error: bool) {
        (**self).notify(message, is_error)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("Generate a password first.")]
    NothingGenerated,
    #[error("Failed to copy to the clipboard: {0}")]
    Clipboard(#[source] anyhow::Error),
}

/// What is currently shown: the chosen options, plus the last generated password and its score.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratorState {
    length: usize,
    selection: ClassSelection,
    password: Option<Secret>,
    strength: StrengthScore,
}

impl GeneratorState {
    pub fn new(limits: &LengthLimits) -> GeneratorState {
        GeneratorState {
            length: limits.default_length(),
            selection: ClassSelection::default(),
            password: None,
            strength: StrengthScore::default(),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn selection(&self) -> ClassSelection {
        self.selection
    }

    pub fn password(&self) -> Option<&Secret> {
        self.password.as_ref()
    }

    pub fn strength(&self) -> StrengthScore {
        self.strength
    }

    pub fn with_length(&self, length: usize, limits: &LengthLimits) -> GeneratorState {
        GeneratorState {
            length: limits.clamp(length),
            ..self.clone()
        }
    }

    pub fn with_class(&self, class: CharacterClass, enabled: bool) -> GeneratorState {
        self.with_selection(self.selection.with(class, enabled))
    }

    pub fn with_selection(&self, selection: ClassSelection) -> GeneratorState {
        GeneratorState {
            selection,
            ..self.clone()
        }
    }

    /// Generate a new password from the current options.
    ///
    /// On failure nothing changes, including the displayed strength.
    pub fn generate<S>(
        &self,
        source: &mut S,
        rounding: IndexRounding,
    ) -> Result<GeneratorState, ValidationError>
    where
        S: UniformSource + ?Sized,
    {
        let (alphabet, strength) = password_generation::build_alphabet_and_score(&self.selection)?;
        let password =
            password_generation::sample_password(source, &alphabet, self.length, rounding);
        tracing::debug!(
            requested = self.length,
            produced = password.char_count(),
            alphabet = alphabet.len(),
            %strength,
            "generated password"
        );
        Ok(GeneratorState {
            password: Some(password),
            strength,
            ..self.clone()
        })
    }

    pub fn copy<C>(&self, clipboard: &mut C) -> Result<(), CopyError>
    where
        C: Clipboard + ?Sized,
    {
        let password = self.password.as_ref().ok_or(CopyError::NothingGenerated)?;
        clipboard
            .copy(password.as_str())
            .map_err(CopyError::Clipboard)
    }
}

/// A user action.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    SetLength(usize),
    SetClass(CharacterClass, bool),
    Generate,
    Copy,
}

/// Applies events to a [`GeneratorState`], reporting failures through a [`Notifier`].
pub struct Controller<S, C, N> {
    limits: LengthLimits,
    rounding: IndexRounding,
    source: S,
    clipboard: C,
    notifier: N,
}

impl<S, C, N> Controller<S, C, N>
where
    S: UniformSource,
    C: Clipboard,
    N: Notifier,
{
    pub fn new(
        limits: LengthLimits,
        rounding: IndexRounding,
        source: S,
        clipboard: C,
        notifier: N,
    ) -> Self {
        Controller {
            limits,
            rounding,
            source,
            clipboard,
            notifier,
        }
    }

    pub fn limits(&self) -> &LengthLimits {
        &self.limits
    }

    pub fn initial_state(&self) -> GeneratorState {
        GeneratorState::new(&self.limits)
    }

    /// Apply `event` to `state`. Errors leave the state as it was.
    pub fn dispatch(&mut self, state: &GeneratorState, event: Event) -> GeneratorState {
        match event {
            Event::SetLength(len) => state.with_length(len, &self.limits),
            Event::SetClass(class, enabled) => state.with_class(class, enabled),
            Event::Generate => match state.generate(&mut self.source, self.rounding) {
                Ok(next) => next,
                Err(err) => {
                    tracing::debug!(%err, "generation rejected");
                    self.notifier.notify(&err.to_string(), true);
                    state.clone()
                }
            },
            Event::Copy => {
                match state.copy(&mut self.clipboard) {
                    Ok(()) => self.notifier.notify("Password copied to clipboard.", false),
                    Err(err) => {
                        tracing::warn!(%err, "copy failed");
                        self.notifier.notify(&err.to_string(), true);
                    }
                }
                state.clone()
            }
        }
    }

    /// Apply several events in order.
    pub fn dispatch_all<I>(&mut self, state: &GeneratorState, events: I) -> GeneratorState
    where
        I: IntoIterator<Item = Event>,
    {
        events
            .into_iter()
            .fold(state.clone(), |state, event| self.dispatch(&state, event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password_generation::RngSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_state_is_blank() {
        let state = GeneratorState::new(&LengthLimits::default());
        assert_eq!(state.length(), 12);
        assert!(state.selection().is_empty());
        assert!(state.password().is_none());
        assert_eq!(state.strength().value(), 0);
    }

    #[test]
    fn failed_generation_keeps_previous_password() {
        let limits = LengthLimits::default();
        let mut source = RngSource::new(StdRng::seed_from_u64(3));
        let state = GeneratorState::new(&limits)
            .with_class(CharacterClass::Digit, true)
            .generate(&mut source, IndexRounding::Floor)
            .unwrap();
        let cleared = state.with_class(CharacterClass::Digit, false);
        assert_eq!(
            cleared.generate(&mut source, IndexRounding::Floor),
            Err(ValidationError::NoClassSelected)
        );
        assert_eq!(cleared.password(), state.password());
        assert_eq!(cleared.strength().value(), 25);
    }
}
