use passgen::{
    CharacterClass, Clipboard, Controller, Event, GeneratorState, IndexRounding, LengthLimits,
    Notifier, UniformSource,
};

/// Replays a fixed list of draws, cycling when it runs out.
struct Cycle {
    draws: Vec<f64>,
    next: usize,
}

impl Cycle {
    fn new(draws: &[f64]) -> Self {
        Cycle {
            draws: draws.to_vec(),
            next: 0,
        }
    }
}

impl UniformSource for Cycle {
    fn next_uniform(&mut self) -> f64 {
        let u = self.draws[self.next % self.draws.len()];
        self.next += 1;
        u
    }
}

#[derive(Default)]
struct RecordingClipboard {
    copied: Vec<String>,
    fail: bool,
}

impl Clipboard for RecordingClipboard {
    fn copy(&mut self, text: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("no display");
        }
        self.copied.push(text.to_owned());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    messages: Vec<(String, bool)>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str, is_error: bool) {
        self.messages.push((message.to_owned(), is_error));
    }
}

fn controller<'a>(
    clipboard: &'a mut RecordingClipboard,
    notifier: &'a mut RecordingNotifier,
) -> Controller<Cycle, &'a mut RecordingClipboard, &'a mut RecordingNotifier> {
    Controller::new(
        LengthLimits::default(),
        IndexRounding::Floor,
        Cycle::new(&[0.0, 0.5, 0.99]),
        clipboard,
        notifier,
    )
}

#[test]
fn generate_uppercase_and_lowercase() {
    let mut clipboard = RecordingClipboard::default();
    let mut notifier = RecordingNotifier::default();
    let mut ctl = controller(&mut clipboard, &mut notifier);

    let state = ctl.dispatch_all(
        &ctl.initial_state(),
        [
            Event::SetLength(12),
            Event::SetClass(CharacterClass::Uppercase, true),
            Event::SetClass(CharacterClass::Lowercase, true),
            Event::Generate,
        ],
    );
    let pw = state.password().unwrap();
    assert_eq!(pw.char_count(), 12);
    assert!(pw.as_str().chars().all(|c| c.is_ascii_alphabetic()));
    // Alphabet is A-Za-z (52): 0.0 -> 'A', 0.5 -> 'a', 0.99 -> 'z'.
    assert_eq!(pw.as_str(), "AazAazAazAaz");
    assert_eq!(state.strength().value(), 50);
    assert!(notifier.messages.is_empty());
}

#[test]
fn faithful_rounding_can_shorten_the_password() {
    let limits = LengthLimits::default();
    let state = GeneratorState::new(&limits)
        .with_class(CharacterClass::Uppercase, true)
        .with_class(CharacterClass::Lowercase, true);
    // 0.995 * 52 = 51.74, which rounds to 52: off the end.
    let mut source = Cycle::new(&[0.0, 0.995]);
    let state = state.generate(&mut source, IndexRounding::Round).unwrap();
    let pw = state.password().unwrap();
    assert_eq!(pw.as_str(), "AAAAAA");
    assert!(pw.char_count() <= 12);
    assert_eq!(state.strength().value(), 50);
}

#[test]
fn generate_without_classes_notifies_and_keeps_state() {
    let mut clipboard = RecordingClipboard::default();
    let mut notifier = RecordingNotifier::default();
    let mut ctl = controller(&mut clipboard, &mut notifier);

    let before = ctl.initial_state().with_length(20, ctl.limits());
    let after = ctl.dispatch(&before, Event::Generate);

    assert_eq!(after, before);
    assert!(after.password().is_none());
    assert_eq!(after.strength().value(), 0);
    assert_eq!(
        notifier.messages,
        vec![("Please select at least one option.".to_owned(), true)]
    );
}

#[test]
fn copy_before_generate_is_an_error() {
    let mut clipboard = RecordingClipboard::default();
    let mut notifier = RecordingNotifier::default();
    let mut ctl = controller(&mut clipboard, &mut notifier);

    let before = ctl
        .initial_state()
        .with_class(CharacterClass::Symbol, true);
    let after = ctl.dispatch(&before, Event::Copy);

    assert_eq!(after, before);
    assert!(clipboard.copied.is_empty());
    assert_eq!(
        notifier.messages,
        vec![("Generate a password first.".to_owned(), true)]
    );
}

#[test]
fn copy_after_generate_sends_the_password() {
    let mut clipboard = RecordingClipboard::default();
    let mut notifier = RecordingNotifier::default();
    let mut ctl = controller(&mut clipboard, &mut notifier);

    let state = ctl.dispatch_all(
        &ctl.initial_state(),
        [
            Event::SetClass(CharacterClass::Digit, true),
            Event::Generate,
            Event::Copy,
        ],
    );

    let pw = state.password().unwrap().as_str().to_owned();
    assert_eq!(clipboard.copied, vec![pw]);
    assert_eq!(
        notifier.messages,
        vec![("Password copied to clipboard.".to_owned(), false)]
    );
}

#[test]
fn clipboard_failure_is_reported() {
    let mut clipboard = RecordingClipboard {
        fail: true,
        ..Default::default()
    };
    let mut notifier = RecordingNotifier::default();
    let mut ctl = controller(&mut clipboard, &mut notifier);

    let generated = ctl.dispatch_all(
        &ctl.initial_state(),
        [Event::SetClass(CharacterClass::Digit, true), Event::Generate],
    );
    let after = ctl.dispatch(&generated, Event::Copy);

    assert_eq!(after, generated);
    assert_eq!(notifier.messages.len(), 1);
    let (message, is_error) = &notifier.messages[0];
    assert!(is_error);
    assert!(message.contains("no display"), "{message}");
}

#[test]
fn length_is_clamped_into_range() {
    let mut clipboard = RecordingClipboard::default();
    let mut notifier = RecordingNotifier::default();
    let mut ctl = controller(&mut clipboard, &mut notifier);

    let state = ctl.initial_state();
    assert_eq!(ctl.dispatch(&state, Event::SetLength(3)).length(), 12);
    assert_eq!(ctl.dispatch(&state, Event::SetLength(25)).length(), 25);
    assert_eq!(ctl.dispatch(&state, Event::SetLength(64)).length(), 30);
}

#[test]
fn new_password_replaces_the_old_one() {
    let limits = LengthLimits::default();
    let digits = GeneratorState::new(&limits).with_class(CharacterClass::Digit, true);
    let first = digits
        .generate(&mut Cycle::new(&[0.0]), IndexRounding::Floor)
        .unwrap();
    let second = first
        .with_class(CharacterClass::Symbol, true)
        .generate(&mut Cycle::new(&[0.99]), IndexRounding::Floor)
        .unwrap();

    assert_eq!(first.password().unwrap().as_str(), "000000000000");
    assert_eq!(second.password().unwrap().as_str(), "~~~~~~~~~~~~");
    assert_eq!(second.strength().value(), 50);
}

#[test]
fn controller_clamps_to_custom_limits() {
    let limits = LengthLimits::new(8, 10, 16).unwrap();
    let mut ctl = Controller::new(
        limits,
        IndexRounding::Floor,
        Cycle::new(&[0.5]),
        RecordingClipboard::default(),
        RecordingNotifier::default(),
    );

    let state = ctl.initial_state();
    assert_eq!(state.length(), 10);
    assert_eq!(ctl.dispatch(&state, Event::SetLength(5)).length(), 8);
    assert_eq!(ctl.dispatch(&state, Event::SetLength(40)).length(), 16);
    assert!(LengthLimits::new(20, 15, 10).is_err());
}
