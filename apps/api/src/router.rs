use axum::{routing::get, Router};

use call_board_cell::{create_call_board_router, CallBoard};

pub fn create_router(board: CallBoard) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic call board is running!" }))
        .merge(create_call_board_router(board))
}
