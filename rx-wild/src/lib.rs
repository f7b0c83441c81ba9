/*!
A small regular expression engine with one feature mainstream engines do not
have: the *text* being matched may contain wildcards, not just the pattern.
A text wildcard stands for "any letter", which makes the engine suitable for
probing patterns against partially known strings. That is the workhorse
behind constraint solvers such as
[`rx-crossword`](https://crates.io/crates/rx-crossword).

The alphabet is the 26 uppercase letters plus the wildcard `.`. Matching is
always a full match and the engine is a plain worklist NFA simulation, with
back-reference support bolted on top of the capture bookkeeping.

Supported syntax:
- wildcards, in both the pattern and the text
- repetitions `?`, `*`, `+`
- groups `(...)` and alternatives `|`
- character classes `[...]` and `[^...]` (no `-` ranges)
- back-references `\1`, `\2`, ...

## Usage
```
use rx_wild::Regex;

let re = Regex::compile("(O|RHH|MM)*")?;
assert!(re.is_match_str(""));
assert!(re.is_match_str("MMORHHO"));
assert!(!re.is_match_str("MMORHHH"));

// The text may contain wildcards too: `.` stands for "any letter".
let re = Regex::compile("N.X")?;
assert!(re.is_match_str("N.X"));
assert!(re.is_match_str("..."));
assert!(!re.is_match_str(".."));
# Ok::<(), rx_wild::CompileError>(())
```
*/

mod nfa;
mod simulate;
pub mod symbol;
mod syntax;

pub use nfa::Regex;
pub use symbol::{Symbol, WILDCARD};
pub use syntax::CompileError;
