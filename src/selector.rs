//! Interactive selection through an external menu program
//!
//! The selector reads one item per line on stdin and prints the chosen
//! item's index. Selectors that can only echo the chosen line are driven in
//! [`SelectionMode::IndexPrefixed`], where every line carries its index.

use crate::error::{Error, Result};
use crate::process::CommandRunner;

/// Separator between the index prefix and the item text
pub const INDEX_SEPARATOR: char = '\t';

/// How the selector's output maps back to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// The selector prints the zero-based index itself
    #[default]
    Direct,
    /// Items are written as `<index>\t<item>` and the index is read back
    /// from the front of the printed line
    IndexPrefixed,
}

/// A selector command line plus its parsing mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub argv: Vec<String>,
    pub mode: SelectionMode,
}

impl Selector {
    pub fn new(argv: Vec<String>, mode: SelectionMode) -> Self {
        Self { argv, mode }
    }

    /// Same selector with `extra` arguments appended.
    pub fn with_args(&self, extra: &[String]) -> Self {
        let mut argv = self.argv.clone();
        argv.extend_from_slice(extra);
        Self::new(argv, self.mode)
    }

    /// Let the user pick one of `items`.
    ///
    /// Returns `Ok(None)` when the user cancelled: the selector exited
    /// unsuccessfully or printed nothing.
    pub fn select<R: CommandRunner + ?Sized>(
        &self,
        runner: &R,
        items: &[String],
    ) -> Result<Option<usize>> {
        let input = render_items(items, self.mode);
        let output = runner.run(&self.argv, Some(&input))?;

        if !output.success {
            tracing::info!(status = %output.status_text(), "selection aborted");
            return Ok(None);
        }

        let selection = parse_selection(&output.stdout, self.mode, items.len())?;
        tracing::debug!(?selection, "selector returned");
        Ok(selection)
    }
}

/// Build the selector's stdin.
pub fn render_items(items: &[String], mode: SelectionMode) -> String {
    let mut input = String::new();
    for (index, item) in items.iter().enumerate() {
        if mode == SelectionMode::IndexPrefixed {
            input.push_str(&index.to_string());
            input.push(INDEX_SEPARATOR);
        }
        input.push_str(item);
        input.push('\n');
    }
    input
}

/// Parse selector output into an index into a list of `count` items.
pub fn parse_selection(output: &str, mode: SelectionMode, count: usize) -> Result<Option<usize>> {
    let line = output.lines().next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }

    let token = match mode {
        SelectionMode::Direct => line,
        SelectionMode::IndexPrefixed => {
            let end = line
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(line.len());
            &line[..end]
        }
    };

    // `usize::from_str` also takes a leading '+'
    let malformed = || Error::MalformedSelection {
        output: line.to_string(),
    };
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let index: usize = token.parse().map_err(|_| malformed())?;

    if index >= count {
        return Err(Error::SelectionOutOfRange { index, count });
    }
    Ok(Some(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{failed, ok, words, FakeRunner};
    use rstest::rstest;

    fn items() -> Vec<String> {
        words(&["alpha.pdf", "beta 2.pdf", "12 monkeys.pdf", "gamma.pdf"])
    }

    #[test]
    fn test_index_prefixed_round_trip_recovers_every_index() {
        let items = items();
        let input = render_items(&items, SelectionMode::IndexPrefixed);
        for (i, line) in input.lines().enumerate() {
            assert_eq!(
                parse_selection(line, SelectionMode::IndexPrefixed, items.len()).unwrap(),
                Some(i)
            );
        }
    }

    #[test]
    fn test_render_items() {
        let items = words(&["a.pdf", "b.pdf"]);
        assert_eq!(render_items(&items, SelectionMode::Direct), "a.pdf\nb.pdf\n");
        assert_eq!(
            render_items(&items, SelectionMode::IndexPrefixed),
            "0\ta.pdf\n1\tb.pdf\n"
        );
        assert_eq!(render_items(&[], SelectionMode::IndexPrefixed), "");
    }

    #[rstest]
    #[case("0\n", Some(0))]
    #[case("3\n", Some(3))]
    #[case("  2 \r\n", Some(2))]
    #[case("1\n3\n", Some(1))]
    #[case("", None)]
    #[case("\n", None)]
    #[case("   \n", None)]
    fn test_direct_mode(#[case] output: &str, #[case] expected: Option<usize>) {
        assert_eq!(
            parse_selection(output, SelectionMode::Direct, 4).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case("alpha.pdf")]
    #[case("1.5")]
    #[case("-1")]
    #[case("+2")]
    #[case("2\tbeta 2.pdf")]
    fn test_direct_mode_malformed(#[case] output: &str) {
        let err = parse_selection(output, SelectionMode::Direct, 4).unwrap_err();
        assert!(matches!(err, Error::MalformedSelection { .. }));
        assert!(err.is_malformed_selection());
    }

    #[rstest]
    #[case(SelectionMode::Direct, "4")]
    #[case(SelectionMode::IndexPrefixed, "17\tsomething.pdf")]
    fn test_out_of_range(#[case] mode: SelectionMode, #[case] output: &str) {
        let err = parse_selection(output, mode, 4).unwrap_err();
        assert!(matches!(err, Error::SelectionOutOfRange { count: 4, .. }));
    }

    #[test]
    fn test_index_prefixed_without_index_is_malformed() {
        let err = parse_selection("gamma.pdf\n", SelectionMode::IndexPrefixed, 4).unwrap_err();
        assert!(matches!(err, Error::MalformedSelection { .. }));
    }

    #[test]
    fn test_select_writes_items_and_parses_result() {
        let runner = FakeRunner::new().respond("fzf", ok("2\t12 monkeys.pdf\n"));
        let selector = Selector::new(words(&["fzf", "--with-nth", "2.."]), SelectionMode::IndexPrefixed);

        let choice = selector.select(&runner, &items()).unwrap();
        assert_eq!(choice, Some(2));

        let call = &runner.calls()[0];
        assert_eq!(call.argv, words(&["fzf", "--with-nth", "2.."]));
        assert_eq!(
            call.input.as_deref(),
            Some("0\talpha.pdf\n1\tbeta 2.pdf\n2\t12 monkeys.pdf\n3\tgamma.pdf\n")
        );
    }

    #[test]
    fn test_select_nonzero_exit_is_cancellation() {
        let runner = FakeRunner::new().respond("fzf", failed(130));
        let selector = Selector::new(words(&["fzf"]), SelectionMode::IndexPrefixed);
        assert_eq!(selector.select(&runner, &items()).unwrap(), None);
    }

    #[test]
    fn test_select_missing_selector_is_fatal() {
        let selector = Selector::new(words(&["rofi", "-dmenu"]), SelectionMode::Direct);
        let result = selector.select(&FakeRunner::new(), &items());
        assert!(matches!(result, Err(Error::CommandNotFound { program }) if program == "rofi"));
    }

    #[test]
    fn test_with_args_appends() {
        let selector = Selector::new(words(&["rofi", "-dmenu", "-format", "i"]), SelectionMode::Direct);
        let pdf = selector.with_args(&words(&["-p", "PDF"]));
        assert_eq!(pdf.argv, words(&["rofi", "-dmenu", "-format", "i", "-p", "PDF"]));
        assert_eq!(pdf.mode, SelectionMode::Direct);
    }
}
