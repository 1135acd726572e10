use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Turn Ctrl-C into a flag the prompter reads, so an interrupted question
/// is answered "no" instead of ending the process.
///
/// Only one handler can be installed per process; later calls just log.
pub fn install_interrupt_handler() {
    let handler = || {
        INTERRUPTED.store(true, Ordering::SeqCst);
        // The pending read only returns once a line is entered
        eprint!("\n(interrupted, press Enter) ");
    };
    if let Err(err) = ctrlc::set_handler(handler) {
        tracing::debug!(error = %err, "interrupt handler not installed");
    }
}

/// Asks the user a yes/no question before a destructive action.
pub trait Prompter {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Interpret a confirmation answer.
///
/// `y`/`yes` accept, `n`/`no`/empty decline (case-insensitive); anything else
/// is unrecognized and should be asked again.
pub fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Line-based prompter over any reader/writer pair.
///
/// End of input, a read error or an interrupt while waiting counts as "no".
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
    interrupted: &'static AtomicBool,
}

impl LinePrompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl LinePrompter<StdinLock<'static>, Stderr> {
    /// Questions go to stderr, leaving stdout to machine-readable output.
    pub fn stdin_to_stderr() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            interrupted: &INTERRUPTED,
        }
    }

    /// Watch `flag` instead of the process-wide Ctrl-C flag.
    pub fn with_interrupt_flag(mut self, flag: &'static AtomicBool) -> Self {
        self.interrupted = flag;
        self
    }

    /// Clear and report a pending interrupt.
    pub fn take_interrupt(&self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }

    /// Print `prompt` and read one line, without its line ending.
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{}", prompt);
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
        }
    }

    /// Like `read_line`, but an interrupt during the read yields `None`.
    pub fn ask(&mut self, prompt: &str) -> Option<String> {
        let line = self.read_line(prompt);
        if self.take_interrupt() {
            self.say("\n");
            return None;
        }
        line
    }

    /// Write text that is not a question.
    pub fn say(&mut self, text: &str) {
        let _ = write!(self.output, "{}", text);
        let _ = self.output.flush();
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        self.take_interrupt();
        loop {
            let Some(answer) = self.ask(&format!("\n{} (y/n): ", question)) else {
                return false;
            };

            match parse_answer(&answer) {
                Some(decision) => return decision,
                None => {
                    let _ = writeln!(self.output, "Please enter 'y' for yes or 'n' for no.");
                }
            }
        }
    }
}

/// Prompter for `--yes`: every question is answered affirmatively.
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&mut self, _question: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("y"), Some(true));
        assert_eq!(parse_answer("YES"), Some(true));
        assert_eq!(parse_answer(" Yes "), Some(true));
        assert_eq!(parse_answer("n"), Some(false));
        assert_eq!(parse_answer("No"), Some(false));
        assert_eq!(parse_answer(""), Some(false));
        assert_eq!(parse_answer("maybe"), None);
        assert_eq!(parse_answer("yep"), None);
    }

    #[test]
    fn test_confirm_reprompts_until_recognized() {
        let mut p = prompter("sure\nmaybe\nY\n");
        assert!(p.confirm("Delete?"));

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches("Delete? (y/n): ").count(), 3);
        assert_eq!(output.matches("Please enter 'y' for yes or 'n' for no.").count(), 2);
    }

    #[test]
    fn test_empty_line_declines() {
        let mut p = prompter("\n");
        assert!(!p.confirm("Delete?"));
    }

    #[test]
    fn test_end_of_input_declines() {
        let mut p = prompter("");
        assert!(!p.confirm("Delete?"));

        let mut p = prompter("what\n");
        assert!(!p.confirm("Delete?"));
    }

    /// Reader that raises `flag` the moment it is read, as Ctrl-C would
    /// while the user is typing.
    struct InterruptedWhileReading {
        inner: Cursor<Vec<u8>>,
        flag: &'static AtomicBool,
    }

    impl io::Read for InterruptedWhileReading {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.flag.store(true, Ordering::SeqCst);
            self.inner.read(buf)
        }
    }

    fn leaked_flag() -> &'static AtomicBool {
        Box::leak(Box::new(AtomicBool::new(false)))
    }

    #[test]
    fn test_interrupt_during_confirm_declines() {
        let flag = leaked_flag();
        let reader = InterruptedWhileReading {
            inner: Cursor::new(b"y\n".to_vec()),
            flag,
        };
        let mut p = LinePrompter::new(io::BufReader::new(reader), Vec::new())
            .with_interrupt_flag(flag);

        assert!(!p.confirm("Delete?"));
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_stale_interrupt_is_cleared_before_asking() {
        let flag = leaked_flag();
        flag.store(true, Ordering::SeqCst);
        let mut p = prompter("yes\n").with_interrupt_flag(flag);

        assert!(p.confirm("Delete?"));
    }

    #[test]
    fn test_ask_reports_interrupt_as_no_answer() {
        let flag = leaked_flag();
        let reader = InterruptedWhileReading {
            inner: Cursor::new(b"What is qubit?\n".to_vec()),
            flag,
        };
        let mut p = LinePrompter::new(io::BufReader::new(reader), Vec::new())
            .with_interrupt_flag(flag);

        assert_eq!(p.ask("Query: "), None);
        assert!(!p.take_interrupt());
    }

    #[test]
    fn test_read_line_strips_line_ending() {
        let mut p = prompter("first\r\nsecond\n");
        assert_eq!(p.read_line("> ").as_deref(), Some("first"));
        assert_eq!(p.read_line("> ").as_deref(), Some("second"));
        assert_eq!(p.read_line("> "), None);
    }
}
