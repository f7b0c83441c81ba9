/*!
Hexagon grid and line geometry.

A hexagon of side `n` is stored as `2n-1` rows; row `y` holds
`min(n + y, 3n - 2 - y)` cells. Lines run along three axes:

```text
    * * * >  x
   * *
  *   *
 <     >
y      z
```

- `x` lines are rows, read left to right;
- `y` lines run along the north/south-east diagonal, read top to bottom;
- `z` lines mirror them, read bottom to top.

Each axis has `2n-1` lines, and every cell lies on exactly one line per
axis.
*/

use std::fmt;

use itertools::Itertools;
use rx_wild::{Symbol, WILDCARD};

/// One of the three line directions through the hexagon.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// The grid coordinates of line `index`, in the order the line's
    /// pattern reads them.
    pub fn line(self, side: usize, index: usize) -> Vec<(usize, usize)> {
        let n = side as isize;
        let rows = 2 * n - 1;
        let row_len = |y: isize| (n + y).min(3 * n - 2 - y);
        let mut cells = Vec::new();
        match self {
            Axis::X => {
                let y = index as isize;
                for x in 0..row_len(y) {
                    cells.push((x as usize, index));
                }
            }
            Axis::Y => {
                let (mut x, mut y) = (index as isize, 0);
                while x >= 0 && y < rows {
                    if x < row_len(y) {
                        cells.push((x as usize, y as usize));
                    }
                    if y >= n - 1 {
                        x -= 1;
                    }
                    y += 1;
                }
            }
            Axis::Z => {
                let (mut x, mut y) = (index as isize, rows - 1);
                while x >= 0 && y >= 0 {
                    if x < row_len(y) {
                        cells.push((x as usize, y as usize));
                    }
                    if y <= n - 1 {
                        x -= 1;
                    }
                    y -= 1;
                }
            }
        }
        cells
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

/// A hexagonal grid of symbols. Unknown cells hold the wildcard.
#[derive(Clone, PartialEq, Eq)]
pub struct Hexagon {
    side: usize,
    rows: Vec<Vec<Symbol>>,
}

impl Hexagon {
    /// An all-unknown hexagon.
    ///
    /// # Panics
    ///
    /// If `side` is zero.
    pub fn unknown(side: usize) -> Hexagon {
        assert!(side >= 1, "a hexagon needs a positive side");
        let rows = (0..2 * side - 1)
            .map(|y| vec![WILDCARD; (side + y).min(3 * side - 2 - y)])
            .collect();
        Hexagon { side, rows }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn row_count(&self) -> usize {
        2 * self.side - 1
    }

    pub fn row(&self, y: usize) -> &[Symbol] {
        &self.rows[y]
    }

    pub fn get(&self, x: usize, y: usize) -> Symbol {
        self.rows[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, symbol: Symbol) {
        self.rows[y][x] = symbol;
    }

    /// All coordinates, row-major: the canonical sweep order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| (0..row.len()).map(move |x| (x, y)))
    }

    pub fn is_complete(&self) -> bool {
        self.cells().all(|(x, y)| !self.get(x, y).is_wildcard())
    }

    /// The symbols of a line, in pattern reading order.
    pub fn line_symbols(&self, axis: Axis, index: usize) -> Vec<Symbol> {
        axis.line(self.side, index)
            .into_iter()
            .map(|(x, y)| self.get(x, y))
            .collect()
    }

    /// Which y line passes through `(x, y)`.
    pub fn y_line_of(&self, x: usize, y: usize) -> usize {
        x + (y + 1).saturating_sub(self.side)
    }

    /// Which z line passes through `(x, y)`.
    pub fn z_line_of(&self, x: usize, y: usize) -> usize {
        x + (self.side - 1).saturating_sub(y)
    }
}

// Rows are centered by indenting row `y` with `max(n-1-y, y-n+1)` spaces:
//
//      A B
//     C D E
//      F G
impl fmt::Display for Hexagon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            let indent = y.abs_diff(self.side - 1);
            writeln!(f, "{}{}", " ".repeat(indent), row.iter().join(" "))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hexagon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hexagon(side {})\n{}", self.side, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_lengths() {
        assert_eq!(Hexagon::unknown(1).rows, vec![vec![WILDCARD]]);

        let hex = Hexagon::unknown(2);
        assert_eq!(hex.row_count(), 3);
        let lengths: Vec<usize> =
            (0..3).map(|y| hex.row(y).len()).collect();
        assert_eq!(lengths, vec![2, 3, 2]);

        let hex = Hexagon::unknown(7);
        let lengths: Vec<usize> =
            (0..13).map(|y| hex.row(y).len()).collect();
        assert_eq!(
            lengths,
            vec![7, 8, 9, 10, 11, 12, 13, 12, 11, 10, 9, 8, 7]
        );
    }

    #[test]
    fn lines_side_two() {
        assert_eq!(Axis::X.line(2, 0), vec![(0, 0), (1, 0)]);
        assert_eq!(Axis::X.line(2, 1), vec![(0, 1), (1, 1), (2, 1)]);

        assert_eq!(Axis::Y.line(2, 0), vec![(0, 0), (0, 1)]);
        assert_eq!(Axis::Y.line(2, 1), vec![(1, 0), (1, 1), (0, 2)]);
        assert_eq!(Axis::Y.line(2, 2), vec![(2, 1), (1, 2)]);

        assert_eq!(Axis::Z.line(2, 0), vec![(0, 2), (0, 1)]);
        assert_eq!(Axis::Z.line(2, 1), vec![(1, 2), (1, 1), (0, 0)]);
        assert_eq!(Axis::Z.line(2, 2), vec![(2, 1), (1, 0)]);
    }

    #[test]
    fn every_axis_covers_every_cell_once() {
        let hex = Hexagon::unknown(3);
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let mut seen: Vec<(usize, usize)> = (0..hex.row_count())
                .flat_map(|i| axis.line(3, i))
                .collect();
            seen.sort();
            let mut all: Vec<(usize, usize)> = hex.cells().collect();
            all.sort();
            assert_eq!(seen, all, "axis {axis}");
        }
    }

    #[test]
    fn line_indices_agree_with_line_cells() {
        let hex = Hexagon::unknown(4);
        for index in 0..hex.row_count() {
            for (x, y) in Axis::Y.line(4, index) {
                assert_eq!(hex.y_line_of(x, y), index);
            }
            for (x, y) in Axis::Z.line(4, index) {
                assert_eq!(hex.z_line_of(x, y), index);
            }
        }
    }

    #[test]
    fn display_indents_rows() {
        let mut hex = Hexagon::unknown(2);
        let coords: Vec<_> = hex.cells().collect();
        for (symbol, (x, y)) in "ABCDEFG".chars().zip(coords) {
            hex.set(x, y, Symbol::letter(symbol).unwrap());
        }
        assert_eq!(hex.to_string(), " A B\nC D E\n F G\n");
    }
}
