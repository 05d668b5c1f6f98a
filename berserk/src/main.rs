mod uci;

use chess::board::Board;
use std::env;
use uci::SearchController;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const DEFAULT_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn main() -> anyhow::Result<()> {
    let fen = env::args().nth(1).unwrap_or(DEFAULT_FEN.to_string());
    let board: Board = fen.parse()?;

    SearchController::new(board).run()
}
