use axum::{routing::get, Router};

use crate::handlers::call_board_ws;
use crate::CallBoard;

pub fn create_call_board_router(board: CallBoard) -> Router {
    Router::new().route("/ws", get(call_board_ws)).with_state(board)
}
