//! Game-state interface consumed by the tree.
//!
//! The tree never applies game rules itself; it asks the position for
//! legality, geometry, and the running score. Board size is a runtime
//! property so the same tree code drives any square board.

use gz_core::{Color, Vertex, BOARD_SIZE};

/// The game-state collaborator.
///
/// Implementations are owned by the search driver; the tree only reads.
pub trait Position {
    /// Side length of the board.
    fn board_size(&self) -> usize;

    /// The color whose turn it is at this position.
    fn side_to_move(&self) -> Color;

    /// Whether `color` may play at `vertex`.
    fn is_move_legal(&self, color: Color, vertex: Vertex) -> bool;

    /// Vertex identifier for board coordinates `(x, y)`,
    /// `0 <= x, y < board_size()`.
    fn vertex(&self, x: usize, y: usize) -> Vertex;

    /// Number of consecutive passes leading to this position.
    fn passes(&self) -> u32;

    /// Signed score of the position as it stands; positive favors Black.
    fn final_score(&self) -> i32;
}

/// A position with fixed legality and score.
///
/// Not a rules engine: it answers the queries the tree makes with
/// whatever was configured, which is exactly what tests and benches
/// need. Vertices are numbered row-major.
#[derive(Debug, Clone)]
pub struct StaticPosition {
    board_size: usize,
    to_move: Color,
    passes: u32,
    score: i32,
    legal: Vec<bool>,
}

impl StaticPosition {
    /// All intersections legal, Black to move, score 0.
    pub fn all_legal(board_size: usize) -> Self {
        StaticPosition {
            board_size,
            to_move: Color::Black,
            passes: 0,
            score: 0,
            legal: vec![true; board_size * board_size],
        }
    }

    /// Standard 19x19 position with every intersection legal.
    pub fn standard() -> Self {
        Self::all_legal(BOARD_SIZE)
    }

    pub fn with_to_move(mut self, color: Color) -> Self {
        self.to_move = color;
        self
    }

    pub fn with_passes(mut self, passes: u32) -> Self {
        self.passes = passes;
        self
    }

    pub fn with_final_score(mut self, score: i32) -> Self {
        self.score = score;
        self
    }

    /// Mark `(x, y)` as illegal for both colors.
    pub fn block(mut self, x: usize, y: usize) -> Self {
        let index = y * self.board_size + x;
        self.legal[index] = false;
        self
    }

    /// Restrict legality to exactly the listed coordinates.
    pub fn with_only_legal(mut self, coords: &[(usize, usize)]) -> Self {
        for entry in self.legal.iter_mut() {
            *entry = false;
        }
        for &(x, y) in coords {
            self.legal[y * self.board_size + x] = true;
        }
        self
    }
}

impl Position for StaticPosition {
    fn board_size(&self) -> usize {
        self.board_size
    }

    fn side_to_move(&self) -> Color {
        self.to_move
    }

    fn is_move_legal(&self, _color: Color, vertex: Vertex) -> bool {
        self.legal.get(vertex as usize).copied().unwrap_or(false)
    }

    fn vertex(&self, x: usize, y: usize) -> Vertex {
        debug_assert!(x < self.board_size && y < self.board_size);
        (y * self.board_size + x) as Vertex
    }

    fn passes(&self) -> u32 {
        self.passes
    }

    fn final_score(&self) -> i32 {
        self.score
    }
}
