//! Fixed instruction templates rendered per request.
//!
//! The wording of these templates is part of the output contract: the move
//! prompt instructs the model to tag its answer with `<move>` and `<reason>`
//! spans, which is what the response parser looks for. Adapters fold the
//! rendered text into their family's request schema.

use crate::domain::models::Position;

/// Prompt requesting the next move for the side to move.
pub fn move_prompt(position: &Position) -> String {
    format!(
        "You are chess player playing a game of chess. The current Forsyth-Edwards Notation (FEN) \
         of the chess board is {}. Generate the next valid move in Standard Algebraic Notation (SAN) \
         to win the game of chess. Provide the move in <move></move> XML tags and provide a short \
         justification, 50 words or less, as to why you believe this is the best move in \
         <reason></reason> XML tags.",
        position.fen()
    )
}

/// Prompt for the Q&A variant: a question about the current game.
pub fn question_prompt(position: &Position, question: &str) -> String {
    format!(
        "I'm going to give you a Forsyth-Edwards Notation (FEN) of a chess game contained in \
         <fen></fen> XML tags. Then I'm going to ask you a question about the chess game. I'd like \
         you to answer the question. Here is the Forsyth-Edwards Notation (FEN):\n<fen>{}</fen>\n\n\
         Here is the question: {}\n\nAnswer the question immediately without preamble.",
        position.fen(),
        question
    )
}

/// System prompt for the justification synthesizer.
pub fn justification_system_prompt(position: &Position) -> String {
    format!(
        "You are a commentator on the game of chess. You provide short justification as to why \
         certain moves are logical to win the game. The current Forsyth-Edwards Notation (FEN) of \
         the chess board is {}.",
        position.fen()
    )
}

/// User prompt for the justification synthesizer, for an already-decided
/// move.
pub fn justification_prompt(position: &Position, san: &str) -> String {
    format!(
        "Generate a short justification, 50 words or less, as to why the following Standard \
         Algebraic Notation (SAN) move, {}, in the game of chess is a smart move when the current \
         state of the board describe by the following Forsyth-Edwards Notation (FEN), {}",
        san,
        position.fen()
    )
}
