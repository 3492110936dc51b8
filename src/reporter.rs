/// Where parse diagnostics end up.
///
/// The hard channel receives at most one message per parse, right before the
/// parse aborts. The soft channel receives "forced" warnings that are only
/// emitted while tolerant mode lets parsing continue past a bad argument.
pub trait Reporter {
    fn fatal(&mut self, message: &str);
    fn forced_warning(&mut self, message: &str);
}

/// The reporter used by the compiler binary.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn fatal(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn forced_warning(&mut self, message: &str) {
        eprintln!("warning: {message}");
    }
}

/// Captures diagnostics for assertions instead of printing them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub fatals: Vec<String>,
    pub warnings: Vec<String>,
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn fatal(&mut self, message: &str) {
        self.fatals.push(message.to_owned());
    }

    fn forced_warning(&mut self, message: &str) {
        self.warnings.push(message.to_owned());
    }
}
