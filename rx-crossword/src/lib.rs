/*!
A solver for hexagonal regular-expression crosswords: a side-`n` hexagon
where every line, along each of the three axes, has to match its own
pattern.

Patterns are compiled by [`rx-wild`](rx_wild), whose texts may contain
wildcards. That is what makes the solver cheap to run: a partially filled
line, unknown cells read as `.`, can be probed against its pattern to ask
"can this still match?". The solver narrows per-cell candidate letters that
way until nothing changes, then branches on the most constrained cell and
backtracks on contradiction.

## Usage
```
use rx_crossword::{Regex, Solver};

let compile = |patterns: [&str; 3]| {
    patterns
        .iter()
        .map(|p| Regex::compile(p).unwrap())
        .collect::<Vec<_>>()
};

let solved = Solver::builder(2)
    .x_patterns(compile(["H.", "(X|Y)A(G|H)", "O[MN]"]))
    .y_patterns(compile(["H[WX]", "EAO|EBO", ".N"]))
    .z_patterns(compile(["O(X|Y)", ".A.", "GE|GF"]))
    .build()
    .solve()
    .unwrap();
assert_eq!(solved.to_string(), " H E\nX A G\n O N\n");
```

Axis conventions, with `x` patterns reading rows left to right, `y`
patterns reading the south-east diagonals top to bottom and `z` patterns
reading the south-west diagonals bottom to top:

```text
    * * * >  x
   * *
  *   *
 <     >
y      z
```
*/

mod candidates;
mod hex;
mod solver;

pub use candidates::LetterSet;
pub use hex::{Axis, Hexagon};
pub use solver::{SolveError, Solver};

pub use rx_wild as wild;
pub use rx_wild::{CompileError, Regex, Symbol, WILDCARD};
