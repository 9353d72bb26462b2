use crate::flag::Flag;

/// Positional placeholders listed on the usage line before collapsing to `...`.
const MAX_LISTED_POSITIONALS: usize = 3;

/// Help lines accumulated from argument declarations, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct HelpComposer {
    entries: Vec<String>,
    flag_summary: Vec<String>,
}

impl HelpComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `-s/--long[ val] : description (default value: D)`.
    pub fn record_flagged(
        &mut self,
        flag: &Flag<'_>,
        default_text: &str,
        description: &str,
        flag_only: bool,
    ) {
        let mut left = flag.display();
        if !flag_only {
            left.push_str(" val");
        }
        self.flag_summary.push(format!("[{left}]"));
        self.entries
            .push(with_default(format!("{left} : {}", description.trim()), default_text));
    }

    /// Record `argument<N>: description (default value: D)`.
    pub fn record_positional(&mut self, index: usize, default_text: &str, description: &str) {
        self.entries.push(with_default(
            format!("argument{index}: {}", description.trim()),
            default_text,
        ));
    }

    /// Recorded entry lines, without indentation.
    pub fn entries(&self) -> &[String] {
        self.entries.as_slice()
    }

    /// Render the full help text as lines.
    ///
    /// `max_positional` is the highest positional index ever requested.
    pub fn render(&self, program: &str, max_positional: usize) -> Vec<String> {
        let mut usage: Vec<String> = vec![program.to_string()];
        for index in 1..=max_positional.min(MAX_LISTED_POSITIONALS) {
            usage.push(format!("[argument{index}]"));
        }
        if max_positional > MAX_LISTED_POSITIONALS {
            usage.push("...".to_string());
        }
        usage.extend(self.flag_summary.iter().cloned());

        let mut out = Vec::with_capacity(self.entries.len() + 2);
        out.push(format!("Usage of {program}:"));
        out.push(usage.join(" "));
        out.extend(self.entries.iter().map(|entry| format!("\t{entry}")));
        out
    }
}

fn with_default(mut line: String, default_text: &str) -> String {
    if !default_text.is_empty() {
        line.push_str(&format!(" (default value: {default_text})"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flagged_entry_layout() {
        let mut help = HelpComposer::new();
        help.record_flagged(&Flag::both("i", "index"), "0", "specifies the index", false);
        help.record_flagged(&Flag::both("s", "show"), "false", "display the image", true);
        help.record_flagged(&Flag::long("filter"), "", "image filter", false);

        assert_eq!(
            help.entries(),
            [
                "-i/--index val : specifies the index (default value: 0)",
                "-s/--show : display the image (default value: false)",
                "--filter val : image filter",
            ]
        );
    }

    #[test]
    fn render_lists_positionals_then_flags() {
        let mut help = HelpComposer::new();
        help.record_flagged(&Flag::both("w", "wait"), "10", "wait time", false);
        help.record_positional(1, "", "source image");

        let lines = help.render("prog", 2);
        assert_eq!(
            lines,
            [
                "Usage of prog:",
                "prog [argument1] [argument2] [-w/--wait val]",
                "\t-w/--wait val : wait time (default value: 10)",
                "\targument1: source image",
            ]
        );
    }

    #[test]
    fn render_collapses_extra_positionals() {
        let help = HelpComposer::new();
        let lines = help.render("prog", 5);
        assert_eq!(lines[1], "prog [argument1] [argument2] [argument3] ...");
    }

    #[test]
    fn render_is_idempotent() {
        let mut help = HelpComposer::new();
        help.record_positional(1, "a.jpg", "input");
        assert_eq!(help.render("prog", 1), help.render("prog", 1));
    }
}
