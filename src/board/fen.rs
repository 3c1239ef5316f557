//! FEN parsing and generation. Populates every `Board` field, including the
//! Zobrist key (computed fresh once parsing is done).

use crate::error::EngineError;
use crate::square::{square_of, Cell, Color, Piece};

use super::castle_bits::{CASTLE_BK, CASTLE_BQ, CASTLE_NONE, CASTLE_WK, CASTLE_WQ};
use super::Board;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    pub fn from_fen(fen: &str) -> Result<Board, EngineError> {
        let mut fields = fen.split_ascii_whitespace();

        let placement = fields
            .next()
            .ok_or_else(|| EngineError::InvalidFen("missing piece placement".into()))?;
        let stm = fields
            .next()
            .ok_or_else(|| EngineError::InvalidFen("missing side to move".into()))?;
        let castling = fields
            .next()
            .ok_or_else(|| EngineError::InvalidFen("missing castling field".into()))?;
        let ep = fields
            .next()
            .ok_or_else(|| EngineError::InvalidFen("missing en-passant field".into()))?;
        let halfmove = fields.next().unwrap_or("0");
        let fullmove = fields.next().unwrap_or("1");

        let mut board = Board::new_empty();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(EngineError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 8 - i as u8;
            let mut file = 1u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                } else {
                    let piece = Piece::from_glyph(c)
                        .ok_or_else(|| EngineError::InvalidFen(format!("bad piece glyph '{c}'")))?;
                    if file > 8 {
                        return Err(EngineError::InvalidFen("rank overflows 8 files".into()));
                    }
                    let sq = square_of(file, rank);
                    board.raw_set(sq, Cell::Occupied(piece));
                    file += 1;
                }
            }
        }

        board.side_to_move = match stm {
            "w" => Some(Color::White),
            "b" => Some(Color::Black),
            _ => return Err(EngineError::InvalidFen(format!("bad side to move '{stm}'"))),
        };

        let mut rights = CASTLE_NONE;
        if castling != "-" {
            for c in castling.chars() {
                rights |= match c {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    _ => return Err(EngineError::InvalidFen(format!("bad castling glyph '{c}'"))),
                };
            }
        }
        board.castling = rights;

        board.en_passant = if ep == "-" {
            0
        } else {
            parse_algebraic(ep).ok_or_else(|| EngineError::InvalidFen(format!("bad en-passant square '{ep}'")))?
        };

        board.halfmove_clock = halfmove
            .parse()
            .map_err(|_| EngineError::InvalidFen(format!("bad halfmove clock '{halfmove}'")))?;
        board.fullmove_number = fullmove
            .parse()
            .map_err(|_| EngineError::InvalidFen(format!("bad fullmove number '{fullmove}'")))?;

        board.zobrist = board.compute_zobrist_full();
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut ranks = Vec::with_capacity(8);
        for rank in (1..=8u8).rev() {
            let mut s = String::new();
            let mut empty_run = 0u32;
            for file in 1..=8u8 {
                let sq = square_of(file, rank);
                match self.piece_at(sq) {
                    Some(p) => {
                        if empty_run > 0 {
                            s.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        s.push(p.glyph());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                s.push_str(&empty_run.to_string());
            }
            ranks.push(s);
        }
        let placement = ranks.join("/");

        let stm = match self.side_to_move {
            Some(Color::White) | None => "w",
            Some(Color::Black) => "b",
        };

        let mut castling = String::new();
        if self.castling & CASTLE_WK != 0 {
            castling.push('K');
        }
        if self.castling & CASTLE_WQ != 0 {
            castling.push('Q');
        }
        if self.castling & CASTLE_BK != 0 {
            castling.push('k');
        }
        if self.castling & CASTLE_BQ != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = if self.en_passant == 0 {
            "-".to_string()
        } else {
            crate::moves::types::square_to_algebraic(self.en_passant)
        };

        format!(
            "{placement} {stm} {castling} {ep} {} {}",
            self.halfmove_clock, self.fullmove_number
        )
    }
}

pub(crate) fn parse_algebraic(text: &str) -> Option<crate::square::Square> {
    let mut chars = text.chars();
    let file_ch = chars.next()?;
    let rank_ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if !('a'..='h').contains(&file_ch) || !('1'..='8').contains(&rank_ch) {
        return None;
    }
    let file = file_ch as u8 - b'a' + 1;
    let rank = rank_ch as u8 - b'0';
    Some(square_of(file, rank))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_round_trips() {
        let board = Board::from_fen(STARTPOS_FEN).unwrap();
        assert_eq!(board.to_fen(), STARTPOS_FEN);
    }

    #[test]
    fn en_passant_field_round_trips() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn rejects_malformed_fen() {
        assert!(Board::from_fen("not a fen").is_err());
    }
}
