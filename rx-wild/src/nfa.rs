/*!
The compiled pattern: a state graph with epsilon transitions, labelled
transitions, back-reference transitions and group markers.

States live in an arena indexed by [`StateId`]; edges are index lists, so
cycles from `*`/`+` are free. The graph is immutable once compiled.
*/

use std::collections::HashSet;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::symbol::Symbol;
use crate::syntax::{self, Ast, CompileError, Repeat};

/// A handle to a state in the pattern graph.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub(crate) struct StateId(u32);

impl StateId {
    fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Index<StateId> for Vec<State> {
    type Output = State;

    fn index(&self, id: StateId) -> &State {
        &self[id.as_usize()]
    }
}

impl IndexMut<StateId> for Vec<State> {
    fn index_mut(&mut self, id: StateId) -> &mut State {
        &mut self[id.as_usize()]
    }
}

#[derive(Default, Clone)]
pub(crate) struct State {
    /// Transitions that consume no input.
    pub(crate) epsilons: Vec<StateId>,
    /// Transitions labelled with a letter or the pattern wildcard.
    pub(crate) edges: Vec<(Symbol, StateId)>,
    /// Transitions that replay a captured group, keyed by group index.
    pub(crate) backrefs: Vec<(usize, StateId)>,
    pub(crate) begins_group: Option<usize>,
    pub(crate) ends_group: Option<usize>,
}

/// A compiled pattern.
///
/// Matching is always a full match: the pattern has to consume the whole
/// text. See [`Regex::is_match`](crate::Regex::is_match).
#[derive(Clone)]
pub struct Regex {
    pub(crate) states: Vec<State>,
    pub(crate) start: StateId,
    pub(crate) accept: StateId,
    pub(crate) group_count: usize,
    pattern: Box<str>,
}

impl Regex {
    /// Compile a pattern string.
    ///
    /// ```
    /// use rx_wild::Regex;
    ///
    /// let re = Regex::compile("(DI|NS|TH|OM)*")?;
    /// assert!(re.is_match_str("THOM"));
    /// # Ok::<(), rx_wild::CompileError>(())
    /// ```
    pub fn compile(pattern: &str) -> Result<Regex, CompileError> {
        let ast = syntax::parse(pattern)?;
        Ok(Compiler::default().finish(&ast, pattern))
    }

    /// The pattern string this regex was compiled from.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The number of capture slots carried through a match: the highest
    /// group index any back-reference names.
    ///
    /// Groups are numbered in the order they are completed, so sibling
    /// groups count left to right and nested groups inside out.
    pub fn group_count(&self) -> usize {
        self.group_count
    }
}

#[derive(Default)]
struct Compiler {
    states: Vec<State>,
    groups: usize,
    referenced: HashSet<usize>,
}

impl Compiler {
    fn state(&mut self) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(State::default());
        id
    }

    fn epsilon(&mut self, from: StateId, to: StateId) {
        if from != to && !self.states[from].epsilons.contains(&to) {
            self.states[from].epsilons.push(to);
        }
    }

    /// Thompson construction; returns the fragment's (start, accept) pair.
    fn emit(&mut self, ast: &Ast) -> (StateId, StateId) {
        match ast {
            Ast::Empty => {
                let id = self.state();
                (id, id)
            }
            Ast::Literal(symbol) => {
                let (start, accept) = (self.state(), self.state());
                self.states[start].edges.push((*symbol, accept));
                (start, accept)
            }
            Ast::Class(letters) => {
                let (start, accept) = (self.state(), self.state());
                for &letter in letters {
                    self.states[start].edges.push((letter, accept));
                }
                (start, accept)
            }
            Ast::Backref(group) => {
                let (start, accept) = (self.state(), self.state());
                self.states[start].backrefs.push((*group, accept));
                self.referenced.insert(*group);
                (start, accept)
            }
            Ast::Group(sub) => {
                let (start, accept) = self.emit(sub);
                self.groups += 1;
                let index = self.groups;
                // Markers go on fresh states so that nested groups sharing
                // a start state cannot clobber each other's marker.
                let (begin, end) = (self.state(), self.state());
                self.epsilon(begin, start);
                self.epsilon(accept, end);
                self.states[begin].begins_group = Some(index);
                self.states[end].ends_group = Some(index);
                (begin, end)
            }
            Ast::Concat(seq) => {
                let fragments: Vec<_> =
                    seq.iter().map(|sub| self.emit(sub)).collect();
                for pair in fragments.windows(2) {
                    self.epsilon(pair[0].1, pair[1].0);
                }
                (fragments[0].0, fragments[fragments.len() - 1].1)
            }
            Ast::Alternate(terms) => {
                let (start, accept) = (self.state(), self.state());
                for sub in terms {
                    let (s, a) = self.emit(sub);
                    self.epsilon(start, s);
                    self.epsilon(a, accept);
                }
                (start, accept)
            }
            Ast::Repeat { kind, sub } => {
                let (start, accept) = self.emit(sub);
                if matches!(kind, Repeat::ZeroOrOne | Repeat::ZeroOrMore) {
                    self.epsilon(start, accept);
                }
                if matches!(kind, Repeat::OneOrMore | Repeat::ZeroOrMore) {
                    self.epsilon(accept, start);
                }
                (start, accept)
            }
        }
    }

    fn finish(mut self, ast: &Ast, pattern: &str) -> Regex {
        let (start, accept) = self.emit(ast);
        let Compiler {
            mut states,
            referenced,
            ..
        } = self;
        // A marker on a group no back-reference names only bloats the
        // capture bookkeeping; clearing it cannot change acceptance.
        for state in &mut states {
            if state.begins_group.is_some_and(|g| !referenced.contains(&g)) {
                state.begins_group = None;
            }
            if state.ends_group.is_some_and(|g| !referenced.contains(&g)) {
                state.ends_group = None;
            }
        }
        let group_count = referenced.iter().copied().max().unwrap_or(0);
        Regex {
            states,
            start,
            accept,
            group_count,
            pattern: pattern.into(),
        }
    }
}

// Renders every state with its transitions, one row each:
//
//     pattern: (A)\1
//        0: A->1
//        1: e->3
//        2: (1 start e->0
//        3: 1) e->4
//        4: \1->5
//        5: accept
impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pattern: {}", self.pattern)?;
        for (i, state) in self.states.iter().enumerate() {
            write!(f, "{:>4}:", i)?;
            if let Some(group) = state.begins_group {
                write!(f, " ({group}")?;
            }
            if let Some(group) = state.ends_group {
                write!(f, " {group})")?;
            }
            if StateId(i as u32) == self.start {
                write!(f, " start")?;
            }
            if StateId(i as u32) == self.accept {
                write!(f, " accept")?;
            }
            for target in &state.epsilons {
                write!(f, " e->{}", target.0)?;
            }
            for (label, target) in &state.edges {
                write!(f, " {label}->{}", target.0)?;
            }
            for (group, target) in &state.backrefs {
                write!(f, " \\{group}->{}", target.0)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pattern_is_one_state() {
        let re = Regex::compile("").unwrap();
        assert_eq!(re.states.len(), 1);
        assert_eq!(re.start, re.accept);
    }

    #[test]
    fn group_count_follows_backrefs() {
        // Unreferenced groups carry no slots at all.
        assert_eq!(Regex::compile("(A)(B)").unwrap().group_count(), 0);
        assert_eq!(Regex::compile(r"(A)\1").unwrap().group_count(), 1);
        // The widest slot vector any back-reference needs.
        assert_eq!(Regex::compile(r"(A)(B)\2").unwrap().group_count(), 2);
    }

    #[test]
    fn unreferenced_group_markers_are_cleared() {
        let re = Regex::compile(r"(A)(B)\2").unwrap();
        let marked: Vec<usize> = re
            .states
            .iter()
            .filter_map(|s| s.begins_group.or(s.ends_group))
            .collect();
        assert_eq!(marked, vec![2, 2]);
    }

    #[test]
    fn debug_dump_names_the_pattern() {
        let re = Regex::compile(r"(A)\1").unwrap();
        let dump = format!("{re:?}");
        assert!(dump.starts_with("pattern: (A)\\1\n"));
        assert!(dump.contains("accept"));
        assert!(dump.contains("\\1->"));
    }
}
