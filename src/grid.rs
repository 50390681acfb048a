//! The day 21 garden grid and its reachability queries.

use std::collections::HashSet;
use std::num::NonZero;

use nalgebra::{DMatrix, DVector, SymmetricEigen};
use ndarray::Array2;
use strum::VariantArray;
use thiserror::Error;

type Coord = usize;
type Dimension = NonZero<Coord>;

/// Walk counts are whole numbers, so anything past the midpoint is a reached plot.
/// The float threshold absorbs round-off from the eigendecomposition round trip.
const REACHED_THRESHOLD: f64 = 0.5;

/// A plot location `(x, y)`; the top left plot of a grid is `Location(0, 0)`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// `(row, column)` index into the cell array.
    fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    /// Step by a signed offset; out-of-grid results wrap to indices no grid holds,
    /// so a bounds-checked lookup on the result simply misses.
    fn offset_by(self, (dx, dy): (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(dx), self.1.wrapping_add_signed(dy))
    }
}

/// A single plot of the garden.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Plot {
    /// A passable garden plot (`.`, or the `S` start).
    #[default]
    Open,
    /// An impassable rock (`#`).
    Rock,
}

/// The four orthogonal steps between plots.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Step {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

impl Step {
    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }
}

/// Ways a grid input can be malformed.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// The input contains no non-blank lines.
    #[error("grid input is empty")]
    Empty,
    /// A row is narrower or wider than the first row.
    #[error("line {0}: row is {1} plots wide, expected {2}")]
    Ragged(usize, usize, usize),
    /// A character other than `#`, `.`, or `S`.
    #[error("line {line}: unknown glyph `{glyph}`")]
    UnknownGlyph {
        /// 1-based input line.
        line: usize,
        /// The offending character.
        glyph: char,
    },
    /// No `S` plot anywhere in the grid.
    #[error("grid has no start plot `S`")]
    NoStart,
    /// More than one `S` plot.
    #[error("grid has more than one start plot `S`")]
    DuplicateStart,
}

/// A parsed garden grid: a dense array of plots and the start location.
#[derive(Debug)]
pub struct Grid {
    cells: Array2<Plot>,
    // width, height
    dims: (Dimension, Dimension),
    start: Location,
}

impl Grid {
    /// Parse a `#`/`.`/`S` grid. Blank lines are skipped; the remaining rows must all
    /// be the same width and contain exactly one `S`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut rows = Vec::new();
        let mut start = None;
        let mut width = None;

        for (idx, raw) in input.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let lineno = idx + 1;

            let expected = *width.get_or_insert(line.chars().count());
            let mut row = Vec::with_capacity(expected);
            for (x, glyph) in line.chars().enumerate() {
                row.push(match glyph {
                    '#' => Plot::Rock,
                    '.' => Plot::Open,
                    'S' => {
                        if start.replace(Location(x, rows.len())).is_some() {
                            return Err(ParseError::DuplicateStart);
                        }
                        Plot::Open
                    }
                    other => return Err(ParseError::UnknownGlyph { line: lineno, glyph: other }),
                });
            }
            if row.len() != expected {
                return Err(ParseError::Ragged(lineno, row.len(), expected));
            }
            rows.push(row);
        }

        let height = NonZero::new(rows.len()).ok_or(ParseError::Empty)?;
        let width = width.and_then(NonZero::new).ok_or(ParseError::Empty)?;
        let start = start.ok_or(ParseError::NoStart)?;

        let cells = Array2::from_shape_vec(
            (height.get(), width.get()),
            rows.into_iter().flatten().collect(),
        )
        .expect("row widths already checked");

        Ok(Self { cells, dims: (width, height), start })
    }

    /// Grid dimensions as `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.dims.0.get(), self.dims.1.get())
    }

    /// The location of the `S` plot.
    pub fn start(&self) -> Location {
        self.start
    }

    /// The plot at `location`, or [`None`] outside the grid.
    pub fn plot(&self, location: Location) -> Option<Plot> {
        self.cells.get(location.as_index()).copied()
    }

    /// Row-major flat index of `location`, matching the transition matrix layout.
    fn flat(&self, location: Location) -> usize {
        location.1 * self.dims.0.get() + location.0
    }

    fn passable(&self, location: Location) -> bool {
        matches!(self.cells.get(location.as_index()), Some(Plot::Open))
    }

    /// The single-step transition matrix: entry `(i, j)` is 1 exactly when plots `i`
    /// and `j` are orthogonally adjacent and both open. Symmetric by construction.
    pub fn transition_matrix(&self) -> DMatrix<f64> {
        let n = self.dims.0.get() * self.dims.1.get();
        let mut transition = DMatrix::zeros(n, n);

        for ((y, x), plot) in self.cells.indexed_iter() {
            if *plot == Plot::Rock {
                continue;
            }
            let here = Location(x, y);
            for step in Step::VARIANTS {
                let there = step.attempt_from(here);
                if self.passable(there) {
                    transition[(self.flat(here), self.flat(there))] = 1.0;
                }
            }
        }

        transition
    }

    /// Plots reachable in exactly `steps` steps, by matrix power.
    ///
    /// The transition matrix is eigendecomposed, the eigenvalue diagonal is raised to
    /// the `steps`th power, the matrix is reconstituted by similarity transform, and
    /// the result is applied to a one-hot vector for the start plot. Entries then hold
    /// the number of distinct walks of that length into each plot; any entry past the
    /// 0.5 threshold is reached.
    ///
    /// The matrix is symmetric, so the eigendecomposition always exists and the
    /// inverse of the eigenvector matrix is its transpose.
    pub fn reachable_spectral(&self, steps: u32) -> HashSet<Location> {
        let transition = self.transition_matrix();
        let n = transition.nrows();
        let width = self.dims.0.get();

        let eigen = SymmetricEigen::new(transition);
        let powered = DVector::from_iterator(
            n,
            eigen.eigenvalues.iter().map(|eigenvalue| eigenvalue.powi(steps as i32)),
        );
        let matrix_power =
            &eigen.eigenvectors * DMatrix::from_diagonal(&powered) * eigen.eigenvectors.transpose();

        let mut start_vector = DVector::zeros(n);
        start_vector[self.flat(self.start)] = 1.0;
        let walk_counts = matrix_power * start_vector;

        (0..n)
            .filter(|&index| walk_counts[index] > REACHED_THRESHOLD)
            .map(|index| Location(index % width, index / width))
            .collect()
    }

    /// Plots reachable in exactly `steps` steps, by repeated frontier expansion.
    ///
    /// Agrees with [`reachable_spectral`](Self::reachable_spectral) and serves as its
    /// oracle in tests.
    pub fn reachable_walk(&self, steps: u32) -> HashSet<Location> {
        let mut frontier = HashSet::from([self.start]);
        for _ in 0..steps {
            frontier = frontier
                .iter()
                .flat_map(|&location| Step::VARIANTS.iter().map(move |step| step.attempt_from(location)))
                .filter(|&location| self.passable(location))
                .collect();
        }
        frontier
    }

    /// Lay the grid out as text with `O` on every occupied plot, `#` on rocks, and
    /// `.` elsewhere, one row per line.
    pub fn render(&self, occupied: &HashSet<Location>) -> String {
        let (width, height) = self.dims();
        let mut out = String::with_capacity(height * (width + 1));

        for y in 0..height {
            for x in 0..width {
                let location = Location(x, y);
                out.push(match self.plot(location) {
                    Some(Plot::Rock) => '#',
                    _ if occupied.contains(&location) => 'O',
                    _ => '.',
                });
            }
            out.push('\n');
        }

        out
    }
}
