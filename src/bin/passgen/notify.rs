//! Terminal rendering: notifications, the password line and the strength meter.

use std::fmt::{self, Display};

use console::{style, Term};

use passgen::{GeneratorState, StrengthScore};

/// Shown before anything has been generated.
static PLACEHOLDER: &str = "O&?yv&z\"%RXMA/O";

/// Writes notifications to stderr, one styled line each.
pub(crate) struct ConsoleNotifier {
    term: Term,
}

impl ConsoleNotifier {
    pub(crate) fn new() -> Self {
        ConsoleNotifier {
            term: Term::stderr(),
        }
    }
}

impl passgen::Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str, is_error: bool) {
        let line = if is_error {
            format!("{} {}", style("✗").red().bold(), style(message).red())
        } else {
            format!("{} {}", style("✓").green().bold(), message)
        };
        // Nowhere left to report a failure to write to stderr.
        let _ = self.term.write_line(&line);
    }
}

/// The four-segment meter, lit segments in green.
pub(crate) struct Meter(pub StrengthScore);

impl Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, lit) in self.0.segments().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if *lit {
                write!(f, "{}", style("━━━━").green())?;
            } else {
                write!(f, "{}", style("━━━━").dim())?;
            }
        }
        Ok(())
    }
}

pub(crate) fn render_state(term: &Term, state: &GeneratorState) -> std::io::Result<()> {
    let password = match state.password() {
        Some(p) => style(p.as_str().to_owned()).bold(),
        None => style(PLACEHOLDER.to_owned()).dim(),
    };
    let classes = state
        .selection()
        .classes()
        .map(|c| c.name())
        .collect::<Vec<_>>();
    term.write_line("")?;
    term.write_line(&format!("  {password}"))?;
    term.write_line(&format!(
        "  length {}  classes [{}]",
        style(state.length()).green().bold(),
        classes.join(", ")
    ))?;
    term.write_line(&format!("  strength {}", Meter(state.strength())))?;
    term.write_line("")?;
    Ok(())
}
