use anyhow::Context;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};

use passgen::{CharacterClass, Config, Controller, Event, GeneratorState, RngSource};

use crate::clipboard::CommandClipboard;
use crate::notify::{render_state, ConsoleNotifier};
use crate::ProgError;

#[derive(Clone, Copy)]
enum Action {
    Generate,
    Copy,
    SetLength,
    ChooseClasses,
    Quit,
}

impl Action {
    const ALL: [Action; 5] = [
        Action::Generate,
        Action::Copy,
        Action::SetLength,
        Action::ChooseClasses,
        Action::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            Action::Generate => "Generate",
            Action::Copy => "Copy to clipboard",
            Action::SetLength => "Set password length",
            Action::ChooseClasses => "Choose character classes",
            Action::Quit => "Quit",
        }
    }
}

pub(crate) fn run(config: &Config) -> Result<(), ProgError> {
    let term = Term::stderr();
    let theme = ColorfulTheme::default();
    let mut controller = Controller::new(
        config.length_limits()?,
        config.index_rounding,
        RngSource::thread(),
        CommandClipboard,
        ConsoleNotifier::new(),
    );
    let mut state = controller.initial_state();
    let labels = Action::ALL.iter().map(Action::label).collect::<Vec<_>>();

    loop {
        render_state(&term, &state).context("failed to draw the current state")?;
        let selection = Select::with_theme(&theme)
            .items(&labels)
            .default(0)
            .interact_on_opt(&term)
            .context("failed to query your selection")?
            .ok_or(ProgError::MenuCancelled)?;

        state = match Action::ALL[selection] {
            Action::Generate => controller.dispatch(&state, Event::Generate),
            Action::Copy => controller.dispatch(&state, Event::Copy),
            Action::SetLength => {
                let len = prompt_length(&theme, &term, &controller, &state)?;
                controller.dispatch(&state, Event::SetLength(len))
            }
            Action::ChooseClasses => {
                let events = prompt_classes(&theme, &term, &state)?;
                controller.dispatch_all(&state, events)
            }
            Action::Quit => return Ok(()),
        };
    }
}

fn prompt_length<S, C, N>(
    theme: &ColorfulTheme,
    term: &Term,
    controller: &Controller<S, C, N>,
    state: &GeneratorState,
) -> anyhow::Result<usize>
where
    S: passgen::UniformSource,
    C: passgen::Clipboard,
    N: passgen::Notifier,
{
    let limits = *controller.limits();
    Input::<usize>::with_theme(theme)
        .with_prompt(format!("Password length ({}-{})", limits.min(), limits.max()))
        .default(state.length())
        .validate_with(move |len: &usize| -> Result<(), String> {
            if (limits.min()..=limits.max()).contains(len) {
                Ok(())
            } else {
                Err(format!(
                    "must be between {} and {}",
                    limits.min(),
                    limits.max()
                ))
            }
        })
        .interact_text_on(term)
        .context("failed to read the password length")
}

/// Ask which classes to enable, returning one event per class.
fn prompt_classes(
    theme: &ColorfulTheme,
    term: &Term,
    state: &GeneratorState,
) -> anyhow::Result<Vec<Event>> {
    let selection = state.selection();
    let items = CharacterClass::ALL
        .iter()
        .map(|class| (class.label(), selection.contains(*class)))
        .collect::<Vec<_>>();
    let chosen = MultiSelect::with_theme(theme)
        .with_prompt("Character classes (space to toggle)")
        .items_checked(&items)
        .interact_on(term)
        .context("failed to query your selection")?;
    Ok(CharacterClass::ALL
        .iter()
        .enumerate()
        .map(|(i, class)| Event::SetClass(*class, chosen.contains(&i)))
        .collect())
}
