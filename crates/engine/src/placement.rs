//! Placement search - BFS over piece poses under the four atomic moves.
//!
//! Every pose is expanded at most once; the first path that discovers it
//! is the one recorded. Each soft drop that collides yields one lock
//! outcome. Outcomes are not deduplicated by resulting board here.

use hatetris_core::{Board, Move, Piece, PieceState, PlaceOutcome, Rotation, GAME_OVER_HEIGHT};

use crate::movement::{handle_move, lock, MoveResult};

/// One reachable terminal placement, detached from any history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub board: Board,
    pub lines: u32,
    /// Moves from spawn up to and including the locking drop.
    pub segment: Vec<Move>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// Only the minimum resulting height is needed.
    HeightOnly,
    /// Collect every non-game-over placement with its move segment.
    Full,
}

#[derive(Clone, Debug, Default)]
pub struct Exploration {
    /// Lowest height over all lock outcomes; `GAME_OVER_HEIGHT` counts for
    /// game-over locks and when nothing locks at all.
    pub min_height: u32,
    pub placements: Vec<Placement>,
}

#[derive(Clone, Copy)]
struct PoseNode {
    state: PieceState,
    parent: usize,
    via: Move,
}

const ROOT: usize = usize::MAX;

/// Poses seen during one search. Fresh per call.
struct Visited {
    seen: Vec<bool>,
    span_x: usize,
    span_y: usize,
}

impl Visited {
    /// Box offsets can sit up to 3 cells left of / above the well.
    const PAD: i16 = 4;

    fn new(board: &Board) -> Self {
        let span_x = board.width() + 2 * Self::PAD as usize;
        let span_y = board.depth() + 2 * Self::PAD as usize;
        Self {
            seen: vec![false; Rotation::ALL.len() * span_x * span_y],
            span_x,
            span_y,
        }
    }

    /// Marks the pose, returns false if it was already marked.
    fn insert(&mut self, state: &PieceState) -> bool {
        let x = (state.x as i16 + Self::PAD) as usize;
        let y = (state.y as i16 + Self::PAD) as usize;
        debug_assert!(x < self.span_x && y < self.span_y, "pose outside visited grid");
        let idx = (state.rotation.index() * self.span_y + y) * self.span_x + x;
        !std::mem::replace(&mut self.seen[idx], true)
    }
}

/// Spawn pose, dropped past leading rows that cannot touch the piece box.
fn spawn_dropped(board: &Board, piece: Piece) -> (PieceState, usize) {
    let mut state = PieceState::spawn(piece, &board.config());
    let mut skipped = 0;
    while (state.y as usize) + 4 < board.depth() && board.is_row_empty(state.y as usize + 4) {
        state.y += 1;
        skipped += 1;
    }
    (state, skipped)
}

fn path_to(nodes: &[PoseNode], mut idx: usize, prefix: usize, last: Move) -> Vec<Move> {
    let mut rev = vec![last];
    while idx != ROOT {
        let node = &nodes[idx];
        if node.parent == ROOT {
            break;
        }
        rev.push(node.via);
        idx = node.parent;
    }
    let mut segment = vec![Move::Down; prefix];
    segment.extend(rev.into_iter().rev());
    segment
}

pub fn explore(board: &Board, piece: Piece, mode: SearchMode) -> Exploration {
    let (start, prefix) = spawn_dropped(board, piece);
    let mut visited = Visited::new(board);
    visited.insert(&start);

    // the node list doubles as the BFS queue
    let mut nodes = vec![PoseNode {
        state: start,
        parent: ROOT,
        via: Move::Down,
    }];
    let mut head = 0;
    let mut out = Exploration {
        min_height: GAME_OVER_HEIGHT,
        placements: Vec::new(),
    };

    while head < nodes.len() {
        let current = nodes[head].state;
        for mv in Move::ALL {
            match handle_move(board, &current, mv) {
                MoveResult::Rejected => {}
                MoveResult::Moved(next) => {
                    if visited.insert(&next) {
                        nodes.push(PoseNode {
                            state: next,
                            parent: head,
                            via: mv,
                        });
                    }
                }
                MoveResult::Locked => match lock(board, &current) {
                    PlaceOutcome::GameOver => {}
                    PlaceOutcome::Placed { board: child, lines } => {
                        out.min_height = out.min_height.min(child.height());
                        if mode == SearchMode::Full {
                            out.placements.push(Placement {
                                board: child,
                                lines,
                                segment: path_to(&nodes, head, prefix, mv),
                            });
                        }
                    }
                },
            }
        }
        head += 1;
    }

    out
}

/// Best height the player can reach with `piece`.
pub fn min_height(board: &Board, piece: Piece) -> u32 {
    explore(board, piece, SearchMode::HeightOnly).min_height
}

/// Every non-game-over placement of `piece`, in discovery order.
pub fn placements(board: &Board, piece: Piece) -> Vec<Placement> {
    explore(board, piece, SearchMode::Full).placements
}
