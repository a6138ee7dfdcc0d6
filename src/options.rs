use anyhow::{Result, anyhow};
use argh::{EarlyExit, FromArgs};
use std::ffi::OsString;

/// Options recognized in front of the Invoke-Build arguments.
///
/// Flags are only taken from the start of the argument list. The first token
/// that is not one of `-?`, `/?`, `-h`, `--help` or `--pwsh` stops the scan and
/// everything from there on is passed through untouched. A help flag stops the
/// scan as well, after optionally taking the next token as the help topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IbOptions {
    arguments: Vec<String>,
    show_main_help: bool,
    show_help: bool,
    help_topic: Option<String>,
    use_pwsh: bool,
}

impl IbOptions {
    /// Build options from the raw arguments, without the program name.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rest = args.into_iter().map(Into::<String>::into).peekable();
        let mut options = Self::default();

        while let Some(arg) = rest.peek() {
            match arg.as_str() {
                "-?" | "/?" => {
                    options.show_main_help = true;
                    rest.next();
                }
                "-h" | "--help" => {
                    options.show_help = true;
                    rest.next();
                    // whatever follows the topic is dropped
                    options.help_topic = rest.next();
                    return options;
                }
                "--pwsh" => {
                    options.use_pwsh = true;
                    rest.next();
                }
                _ => break,
            }
        }

        options.arguments = rest.collect();
        options
    }

    /// Arguments to forward to Invoke-Build.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// `-?` or `/?` was given.
    pub fn show_main_help(&self) -> bool {
        self.show_main_help
    }

    /// `-h` or `--help` was given.
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Token following `-h` or `--help`, if there was one.
    pub fn help_topic(&self) -> Option<&str> {
        self.help_topic.as_deref()
    }

    /// `--pwsh` was given.
    pub fn use_pwsh(&self) -> bool {
        self.use_pwsh
    }
}

/// Hand-written because the grammar cannot be expressed with the derive:
/// `/?` is a flag, unknown tokens end the scan instead of failing and a help
/// flag swallows at most one value. Parsing never exits early.
impl FromArgs for IbOptions {
    fn from_args(_command_name: &[&str], args: &[&str]) -> Result<Self, EarlyExit> {
        Ok(Self::parse(args.iter().copied()))
    }
}

impl IbOptions {
    /// Parse raw process arguments, without the program name.
    ///
    /// Arguments that are not valid unicode are decoded lossily instead of
    /// rejected, so they still reach Invoke-Build.
    pub fn from_os_args<I>(command_name: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<String> = args
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        Self::from_args(&[command_name], &args).map_err(|EarlyExit { output, .. }| anyhow!(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> IbOptions {
        IbOptions::parse(args.iter().copied())
    }

    #[test]
    fn empty_input() {
        let opts = parse(&[]);
        assert_eq!(opts, IbOptions::default());
        assert!(opts.arguments().is_empty());
    }

    #[test]
    fn plain_arguments_pass_through() {
        let opts = parse(&["Build", "-Configuration", "Release"]);
        assert_eq!(opts.arguments(), ["Build", "-Configuration", "Release"]);
        assert!(!opts.show_help());
        assert!(!opts.show_main_help());
        assert!(!opts.use_pwsh());
    }

    #[test]
    fn leading_flags_in_any_order_are_consumed() {
        for args in [
            vec!["--pwsh", "-?", "/?", "Test", "--pwsh"],
            vec!["/?", "--pwsh", "Test", "--pwsh"],
            vec!["-?", "-?", "--pwsh", "--pwsh", "Test", "--pwsh"],
        ] {
            let opts = parse(&args);
            assert!(opts.show_main_help(), "{:?}", args);
            assert!(opts.use_pwsh(), "{:?}", args);
            assert_eq!(opts.arguments(), ["Test", "--pwsh"], "{:?}", args);
        }
    }

    #[test]
    fn flags_after_first_unknown_token_are_kept() {
        let opts = parse(&["Build", "-?", "-h", "--pwsh"]);
        assert_eq!(opts.arguments(), ["Build", "-?", "-h", "--pwsh"]);
        assert!(!opts.show_main_help());
        assert!(!opts.show_help());
        assert!(!opts.use_pwsh());
    }

    #[test]
    fn help_without_topic() {
        for flag in ["-h", "--help"] {
            let opts = parse(&[flag]);
            assert!(opts.show_help());
            assert_eq!(opts.help_topic(), None);
            assert!(opts.arguments().is_empty());
        }
    }

    #[test]
    fn help_with_topic_drops_the_rest() {
        let opts = parse(&["--help", "task", "extra", "more"]);
        assert!(opts.show_help());
        assert_eq!(opts.help_topic(), Some("task"));
        assert!(opts.arguments().is_empty());
    }

    #[test]
    fn help_topic_may_look_like_a_flag() {
        let opts = parse(&["-h", "--pwsh"]);
        assert_eq!(opts.help_topic(), Some("--pwsh"));
        assert!(!opts.use_pwsh());
    }

    #[test]
    fn flags_before_help_are_kept() {
        let opts = parse(&["--pwsh", "-?", "-h", "exec"]);
        assert!(opts.use_pwsh());
        assert!(opts.show_main_help());
        assert!(opts.show_help());
        assert_eq!(opts.help_topic(), Some("exec"));
    }

    #[test]
    fn from_args_never_exits_early() {
        let opts = IbOptions::from_args(&["ib"], &["--pwsh", "Build"])
            .ok()
            .expect("parse");
        assert!(opts.use_pwsh());
        assert_eq!(opts.arguments(), ["Build"]);
    }

    #[test]
    fn os_args_are_parsed() {
        let args = ["--pwsh", "-Task", "O'Brien file.txt"].map(OsString::from);
        let opts = IbOptions::from_os_args("ib", args).unwrap();
        assert!(opts.use_pwsh());
        assert_eq!(opts.arguments(), ["-Task", "O'Brien file.txt"]);
    }

    #[test]
    #[cfg(unix)]
    fn invalid_unicode_is_decoded_lossily() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("--pwsh"),
            OsString::from_vec(vec![b'a', 0xff, b'b']),
        ];
        let opts = IbOptions::from_os_args("ib", args).unwrap();
        assert!(opts.use_pwsh());
        assert_eq!(opts.arguments(), ["a\u{FFFD}b"]);
    }
}
