/*!
Wildcard-aware matching.

The simulation explores `(state, position, captures)` threads breadth-first
through a worklist. Every thread is pushed at most once (a seen-set keyed by
value), which bounds the search and makes cycles from `*`/`+` harmless.

The departure from a textbook NFA run is that the *text* may contain
wildcards, and the rule is applied uniformly: a labelled transition fires
when the label and the text symbol match with a wildcard on either side, and
a back-reference transition replays its capture under the same symbol-wise
rule.

Captures are deliberately coarse: every consumed text symbol is appended to
every group that is currently open. That keeps a capture a plain string that
a back-reference can compare against partially unknown text. For deeply
nested groups this over-captures, which is acceptable for the crossword
domain this engine serves.
*/

use std::collections::{HashSet, VecDeque};

use crate::nfa::{Regex, StateId};
use crate::symbol::{self, Symbol};

/// One capture slot of a running match.
#[derive(Clone, PartialEq, Eq, Hash)]
enum Capture {
    /// The group has not been entered yet.
    Empty,
    /// Symbols seen since the group was entered.
    Open(Vec<Symbol>),
    /// The group finished; back-references may replay it.
    Closed(Vec<Symbol>),
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct Thread {
    state: StateId,
    at: usize,
    captures: Box<[Capture]>,
}

impl Regex {
    /// Does this pattern match the whole text?
    ///
    /// Wildcards in `text` stand for "any letter", so a match here means the
    /// text can still be completed into a concrete match.
    ///
    /// ```
    /// use rx_wild::{symbol::text, Regex};
    ///
    /// let re = Regex::compile(r"(.)\1")?;
    /// assert!(re.is_match(&text("AA").unwrap()));
    /// assert!(re.is_match(&text("A.").unwrap()));
    /// assert!(!re.is_match(&text("AB").unwrap()));
    /// # Ok::<(), rx_wild::CompileError>(())
    /// ```
    pub fn is_match(&self, text: &[Symbol]) -> bool {
        Simulation {
            re: self,
            text,
            queue: VecDeque::new(),
            seen: HashSet::new(),
        }
        .run()
    }

    /// Convenience over [`Regex::is_match`] for string texts.
    ///
    /// # Panics
    ///
    /// If `text` contains anything but `A`..=`Z` and `.`.
    pub fn is_match_str(&self, text: &str) -> bool {
        let text = symbol::text(text)
            .unwrap_or_else(|| panic!("text must be `A`-`Z` or `.`: {text:?}"));
        self.is_match(&text)
    }
}

struct Simulation<'a> {
    re: &'a Regex,
    text: &'a [Symbol],
    queue: VecDeque<Thread>,
    seen: HashSet<Thread>,
}

impl Simulation<'_> {
    fn run(mut self) -> bool {
        self.visit(Thread {
            state: self.re.start,
            at: 0,
            captures: vec![Capture::Empty; self.re.group_count].into(),
        });

        while let Some(mut thread) = self.queue.pop_front() {
            let state = &self.re.states[thread.state];

            // Group markers fire on arrival. Re-entering an open group (via
            // a repetition loop) must not reset what it captured so far.
            if let Some(group) = state.begins_group {
                let slot = &mut thread.captures[group - 1];
                if matches!(slot, Capture::Empty) {
                    *slot = Capture::Open(Vec::new());
                }
            }
            if let Some(group) = state.ends_group {
                let slot = &mut thread.captures[group - 1];
                if let Capture::Open(symbols) = slot {
                    *slot = Capture::Closed(std::mem::take(symbols));
                }
            }

            if thread.state == self.re.accept && thread.at == self.text.len() {
                return true;
            }

            for &next in &state.epsilons {
                self.visit(Thread {
                    state: next,
                    at: thread.at,
                    captures: thread.captures.clone(),
                });
            }

            let Some(&symbol) = self.text.get(thread.at) else {
                continue;
            };

            for &(label, next) in &state.edges {
                if label.matches(symbol) {
                    self.visit(Thread {
                        state: next,
                        at: thread.at + 1,
                        captures: extended(&thread.captures, &[symbol]),
                    });
                }
            }

            for &(group, next) in &state.backrefs {
                // Only a finished capture can be replayed; an open or
                // never-entered group disables the transition.
                let Capture::Closed(wanted) = &thread.captures[group - 1]
                else {
                    continue;
                };
                let end = thread.at + wanted.len();
                if end > self.text.len() {
                    continue;
                }
                let consumed = &self.text[thread.at..end];
                if wanted.iter().zip(consumed).all(|(a, b)| a.matches(*b)) {
                    self.visit(Thread {
                        state: next,
                        at: end,
                        captures: extended(&thread.captures, consumed),
                    });
                }
            }
        }

        false
    }

    fn visit(&mut self, thread: Thread) {
        if self.seen.insert(thread.clone()) {
            self.queue.push_back(thread);
        }
    }
}

/// The consumed symbols, appended to every open capture.
fn extended(captures: &[Capture], consumed: &[Symbol]) -> Box<[Capture]> {
    captures
        .iter()
        .map(|capture| match capture {
            Capture::Open(symbols) => {
                let mut symbols = symbols.clone();
                symbols.extend_from_slice(consumed);
                Capture::Open(symbols)
            }
            other => other.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::symbol::text;

    use super::*;

    fn matches(pattern: &str, line: &str) -> bool {
        Regex::compile(pattern).unwrap().is_match(&text(line).unwrap())
    }

    #[test]
    fn literal_full_match() {
        assert!(!matches("AA", "A"));
        assert!(matches("AA", "AA"));
        assert!(!matches("AA", "AAAA"));
    }

    #[test]
    fn empty_pattern() {
        assert!(matches("", ""));
        assert!(!matches("", "A"));
    }

    #[test]
    fn repeated_alternatives() {
        let re = Regex::compile("(O|RHH|MM)*").unwrap();
        assert!(re.is_match_str(""));
        assert!(re.is_match_str("OOOO"));
        assert!(re.is_match_str("MMORHHO"));
        assert!(!re.is_match_str("MMORHHH"));
        assert!(re.is_match_str("ORHH"));
    }

    #[test]
    fn quantifiers() {
        assert!(matches("A?", ""));
        assert!(matches("A?", "A"));
        assert!(!matches("A?", "AA"));
        assert!(!matches("A+", ""));
        assert!(matches("A+", "AAA"));
        assert!(matches("A*", ""));
        assert!(matches("A*", "AAAA"));
        assert!(matches("(AB)+", "ABAB"));
        assert!(!matches("(AB)+", "ABA"));
    }

    #[test]
    fn classes() {
        assert!(matches("[ABC]", "B"));
        assert!(!matches("[ABC]", "D"));
        assert!(matches("[^C]*", "ABD"));
        assert!(!matches("[^C]*", "ABC"));
        // An empty class admits nothing, not even a wildcard.
        assert!(!matches("[]", "A"));
        assert!(!matches("[]", "."));
    }

    #[test]
    fn wildcard_in_pattern() {
        assert!(matches(".*", ""));
        assert!(matches(".*", "XYZ"));
        assert!(matches("N.X", "NOX"));
        assert!(!matches("N.X", "NOY"));
    }

    #[test]
    fn wildcard_in_text() {
        assert!(matches(".*", "..Z."));
        assert!(matches("AB", ".."));
        assert!(matches("A|BB", "."));
        assert!(!matches("AB", "..."));
        // A text wildcard still has to be a letter some pattern letter
        // agrees with, so a length mismatch rules the match out.
        assert!(!matches("AA", "."));
    }

    #[test]
    fn backref_self_match() {
        let re = Regex::compile(r"(.)\1").unwrap();
        assert!(re.is_match_str("AA"));
        assert!(re.is_match_str("BB"));
        assert!(re.is_match_str(".."));
        assert!(re.is_match_str("A."));
        assert!(!re.is_match_str("AB"));
        assert!(!re.is_match_str("A"));
        assert!(!re.is_match_str("AAA"));
    }

    #[test]
    fn backref_replays_repeated_capture() {
        let re = Regex::compile(r"(...?)\1*").unwrap();
        // The group captures `AB` and the star replays it twice.
        assert!(re.is_match_str("ABABAB"));
        assert!(re.is_match_str("ABC"));
        assert!(re.is_match_str("ABCABC"));
        assert!(!re.is_match_str("ABABA"));
    }

    #[test]
    fn backref_with_wildcard_text() {
        let re = Regex::compile(r"(..)\1").unwrap();
        assert!(re.is_match_str("AB.B"));
        assert!(re.is_match_str("...."));
        assert!(!re.is_match_str("ABBA"));
    }

    #[test]
    fn backref_to_empty_capture() {
        let re = Regex::compile(r"(A?)\1").unwrap();
        // Capturing the empty string is a valid close; replaying it
        // consumes nothing.
        assert!(re.is_match_str(""));
        assert!(re.is_match_str("AA"));
        assert!(!re.is_match_str("A"));
    }

    #[test]
    fn backref_to_absent_group_never_fires() {
        let re = Regex::compile(r"(A)\5").unwrap();
        assert_eq!(re.group_count(), 5);
        assert!(!re.is_match_str("A"));
        assert!(!re.is_match_str("AA"));
    }

    #[test]
    fn nested_groups_number_inside_out() {
        assert!(matches(r"((A)B)\1", "ABA"));
        assert!(matches(r"((A)B)\2", "ABAB"));
        assert!(!matches(r"((A)B)\2", "ABA"));
    }

    #[test]
    fn group_reentry_keeps_first_capture() {
        // The loop re-enters the group's begin marker; the capture must
        // stay `AB` instead of resetting.
        assert!(matches(r"(AB|CD)+\1", "ABCDAB"));
    }

    #[test]
    fn wildcard_dominance() {
        // An all-wildcard text matches exactly when some concrete text of
        // the same length would.
        for (pattern, lengths) in [
            ("AB|CDE", vec![2, 3]),
            ("A(BC)*", vec![1, 3, 5]),
            (r"(.)\1", vec![2]),
            ("[^A]", vec![1]),
        ] {
            let re = Regex::compile(pattern).unwrap();
            for len in 0..7 {
                let line = vec![symbol::WILDCARD; len];
                assert_eq!(
                    re.is_match(&line),
                    lengths.contains(&len),
                    "{pattern} over {len} wildcards"
                );
            }
        }
    }

    #[test]
    fn puzzle_patterns() {
        assert!(matches("C*MC(CCC|MM)*", "CMCCCCMM"));
        assert!(!matches("C*MC(CCC|MM)*", "CMCCC"));
        assert!(matches(".*(.)(.)(.)(.)\\4\\3\\2\\1.*", "RHHXXHHR"));
        assert!(matches(".*(.)(.)(.)(.)\\4\\3\\2\\1.*", "MABCDDCBAM"));
        assert!(!matches(".*(.)(.)(.)(.)\\4\\3\\2\\1.*", "ABCDABCD"));
        assert!(matches(r".*(.)C\1X\1.*", "HCHXH"));
        assert!(matches("(RR|HHH)*.?", "RRHHHRRZ"));
        assert!(!matches("(RR|HHH)*.?", "RRHH"));
    }

    #[test]
    fn match_is_pure() {
        let re = Regex::compile(r"(AB)\1").unwrap();
        let line = text("ABAB").unwrap();
        assert!(re.is_match(&line));
        // A second run over the same regex sees fresh state.
        assert!(re.is_match(&line));
        assert!(!re.is_match_str("ABBA"));
    }
}
