/*!
The constraint solver.

Every cell keeps a [`LetterSet`] of candidates. Propagation probes each
unknown cell: a candidate stays only if, written into the grid with every
other unknown cell left as a wildcard, all three crossing patterns still
match. A cell whose set collapses to one letter is written into the grid,
which is what lets the next sweep see it; sweeps repeat to a fixpoint.

When propagation stalls, the search branches on the unknown cell with the
fewest candidates, snapshotting the grid and candidate sets so that a failed
branch can be unwound without aliasing. An empty candidate set is a
contradiction and fails the current branch.

Sweeps are row-major and candidates are tried in `A` to `Z` order, so a
puzzle always solves to the same grid.
*/

use bon::bon;
use log::{debug, trace};
use rx_wild::{Regex, WILDCARD};
use thiserror::Error;

use crate::candidates::LetterSet;
use crate::hex::{Axis, Hexagon};

/// Why [`Solver::solve`] failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("the {axis} axis needs {expected} patterns, got {got}")]
    PatternCount {
        axis: Axis,
        expected: usize,
        got: usize,
    },
    #[error("no letter assignment satisfies every pattern")]
    NoSolution,
}

/// A hexagonal regex crossword: one pattern per line along each axis.
pub struct Solver {
    x: Vec<Regex>,
    y: Vec<Regex>,
    z: Vec<Regex>,
    grid: Hexagon,
    candidates: Vec<Vec<LetterSet>>,
}

#[bon]
impl Solver {
    /// A solver for a side-`side` hexagon. Each axis takes its
    /// `2 * side - 1` patterns in line order.
    ///
    /// # Panics
    ///
    /// If `side` is zero.
    #[builder]
    pub fn new(
        #[builder(start_fn)] side: usize,
        x_patterns: Vec<Regex>,
        y_patterns: Vec<Regex>,
        z_patterns: Vec<Regex>,
    ) -> Self {
        let grid = Hexagon::unknown(side);
        let candidates = (0..grid.row_count())
            .map(|y| vec![LetterSet::all(); grid.row(y).len()])
            .collect();
        Solver {
            x: x_patterns,
            y: y_patterns,
            z: z_patterns,
            grid,
            candidates,
        }
    }
}

impl Solver {
    /// Run the search and return the solved hexagon.
    pub fn solve(mut self) -> Result<Hexagon, SolveError> {
        let expected = self.grid.row_count();
        for (axis, patterns) in
            [(Axis::X, &self.x), (Axis::Y, &self.y), (Axis::Z, &self.z)]
        {
            if patterns.len() != expected {
                return Err(SolveError::PatternCount {
                    axis,
                    expected,
                    got: patterns.len(),
                });
            }
        }
        if self.search() {
            Ok(self.grid)
        } else {
            Err(SolveError::NoSolution)
        }
    }

    /// Can the three patterns crossing `(x, y)` still match, with unknown
    /// cells read as wildcards?
    fn fits(&self, x: usize, y: usize) -> bool {
        if !self.x[y].is_match(self.grid.row(y)) {
            return false;
        }
        let yi = self.grid.y_line_of(x, y);
        if !self.y[yi].is_match(&self.grid.line_symbols(Axis::Y, yi)) {
            return false;
        }
        let zi = self.grid.z_line_of(x, y);
        self.z[zi].is_match(&self.grid.line_symbols(Axis::Z, zi))
    }

    /// Narrow candidate sets to a fixpoint. True if the grid came out
    /// fully solved.
    fn propagate(&mut self) -> bool {
        let mut sweep = 0;
        loop {
            sweep += 1;
            let mut fixed = 0;
            for y in 0..self.grid.row_count() {
                for x in 0..self.grid.row(y).len() {
                    if !self.grid.get(x, y).is_wildcard() {
                        continue;
                    }
                    let set = self.candidates[y][x];
                    let mut retained = LetterSet::EMPTY;
                    for letter in set.iter() {
                        self.grid.set(x, y, letter);
                        if self.fits(x, y) {
                            retained.insert(letter);
                        }
                        self.grid.set(x, y, WILDCARD);
                    }
                    if retained != set {
                        trace!(
                            "({x}, {y}): {set:?} narrowed to {retained:?}"
                        );
                    }
                    self.candidates[y][x] = retained;
                    if let Some(letter) = retained.single() {
                        self.grid.set(x, y, letter);
                        fixed += 1;
                    }
                }
            }
            debug!("sweep {sweep}: fixed {fixed} cells");
            if fixed == 0 {
                break;
            }
        }
        self.grid.is_complete()
    }

    fn search(&mut self) -> bool {
        if self.propagate() {
            return true;
        }

        let mut branch: Option<(usize, usize, LetterSet)> = None;
        for (x, y) in self.grid.cells() {
            let set = self.candidates[y][x];
            if set.is_empty() {
                debug!("contradiction at ({x}, {y})");
                return false;
            }
            if set.len() > 1
                && branch.map_or(true, |(_, _, best)| set.len() < best.len())
            {
                branch = Some((x, y, set));
            }
        }
        // After a fixpoint an unsolved grid always has a multi-candidate
        // cell: singletons were just written into the grid.
        let Some((x, y, options)) = branch else {
            return false;
        };

        let snapshot = (self.grid.clone(), self.candidates.clone());
        for letter in options.iter() {
            debug!("branch: ({x}, {y}) = {letter} out of {options:?}");
            self.grid = snapshot.0.clone();
            self.candidates = snapshot.1.clone();
            self.grid.set(x, y, letter);
            self.candidates[y][x] = LetterSet::only(letter);
            if self.search() {
                return true;
            }
        }
        debug!("({x}, {y}) exhausted, unwinding");
        false
    }
}
