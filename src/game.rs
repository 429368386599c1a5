use tracing::{debug, info, instrument, warn};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::types::{Coord, GameEvent, GameState, MoveReport, Outcome, PlayerColor, TurnResult};

/// Decides who moves after `current_player` has moved on `board`.
///
/// The opponent is checked first. The mover is only consulted to tell a
/// skipped turn apart from a finished game.
pub fn advance_turn(board: &Board, current_player: PlayerColor) -> TurnResult {
    let opponent = current_player.opponent();
    if board.player_has_legal_move(opponent) {
        TurnResult::NextPlayer(opponent)
    } else if board.player_has_legal_move(current_player) {
        TurnResult::Skipped(opponent)
    } else {
        let (dark, light) = board.counts();
        TurnResult::GameOver(Outcome::from_counts(dark, light))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress(PlayerColor),
    Ended(Outcome),
}

/// One running game: the current snapshot plus whose turn it is.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    status: GameStatus,
    flipped: Vec<Coord>,
    last_event: Option<GameEvent>,
}

impl Game {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let board = Board::new(config.board_size)?;
        Ok(Self::from_board(board, config.first_player))
    }

    /// Resumes play on an arbitrary position.
    ///
    /// If `active` cannot move but its opponent can, the opponent starts.
    /// If neither can, the game is already over.
    pub fn from_board(board: Board, active: PlayerColor) -> Self {
        let (status, last_event) = if board.player_has_legal_move(active) {
            (GameStatus::InProgress(active), None)
        } else {
            match advance_turn(&board, active.opponent()) {
                TurnResult::GameOver(outcome) => {
                    (GameStatus::Ended(outcome), Some(GameEvent::GameEnded(outcome)))
                }
                _ => (
                    GameStatus::InProgress(active.opponent()),
                    Some(GameEvent::TurnSkipped(active)),
                ),
            }
        };

        Self {
            board,
            status,
            flipped: Vec::new(),
            last_event,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The player to move, or `None` once the game has ended.
    pub fn active_player(&self) -> Option<PlayerColor> {
        match self.status {
            GameStatus::InProgress(player) => Some(player),
            GameStatus::Ended(_) => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::InProgress(_) => None,
            GameStatus::Ended(outcome) => Some(outcome),
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Ended(_))
    }

    /// Returns `(dark_count, light_count)`.
    pub fn counts(&self) -> (usize, usize) {
        self.board.counts()
    }

    pub fn last_flipped(&self) -> &[Coord] {
        &self.flipped
    }

    pub fn last_event(&self) -> Option<GameEvent> {
        self.last_event
    }

    pub fn legal_moves(&self) -> Vec<Coord> {
        self.active_player()
            .map(|player| self.board.legal_moves(player))
            .unwrap_or_default()
    }

    pub fn is_move_legal(&self, coord: Coord) -> Result<bool, EngineError> {
        self.board.get(coord)?;
        match self.active_player() {
            Some(player) => self.board.is_move_legal(coord, player),
            None => Ok(false),
        }
    }

    /// Plays the active player's stone at `coord` and advances the turn.
    ///
    /// On error the game is left exactly as it was.
    #[instrument(skip(self), fields(size = self.board.size()))]
    pub fn play(&mut self, coord: Coord) -> Result<MoveReport, EngineError> {
        let player = match self.status {
            GameStatus::InProgress(player) => player,
            GameStatus::Ended(_) => {
                warn!("move rejected, game is over");
                return Err(EngineError::GameAlreadyOver);
            }
        };

        let (next, flipped) = self
            .board
            .place(coord, player)
            .inspect_err(|err| warn!(%player, %err, "move rejected"))?;
        debug!(%player, flipped = flipped.len(), "move applied");

        let turn = advance_turn(&next, player);
        let mut events = vec![GameEvent::MoveMade(player)];
        self.status = match turn {
            TurnResult::NextPlayer(next_player) => GameStatus::InProgress(next_player),
            TurnResult::Skipped(skipped) => {
                info!(%skipped, "no moves available, turn stays with {player}");
                events.push(GameEvent::TurnSkipped(skipped));
                GameStatus::InProgress(player)
            }
            TurnResult::GameOver(outcome) => {
                info!(?outcome, "game over");
                events.push(GameEvent::GameEnded(outcome));
                GameStatus::Ended(outcome)
            }
        };

        self.board = next;
        self.flipped = flipped.clone();
        self.last_event = events.last().copied();

        Ok(MoveReport {
            player,
            placed: coord,
            flipped,
            turn,
            events,
        })
    }

    pub fn to_game_state(&self) -> GameState {
        let (dark_count, light_count) = self.board.counts();
        GameState {
            board: self.board.rows(),
            size: self.board.size(),
            active_player: self.active_player(),
            dark_count,
            light_count,
            is_game_over: self.is_over(),
            outcome: self.outcome(),
            flipped: self.flipped.clone(),
            legal_moves: self.legal_moves(),
            message: self.last_event.and_then(|event| event.banner()),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::from_board(Board::standard(), PlayerColor::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DARK: PlayerColor = PlayerColor::Dark;
    const LIGHT: PlayerColor = PlayerColor::Light;

    fn at(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).expect("test board must parse")
    }

    #[test]
    fn turn_passes_to_opponent_with_moves() {
        let after = Board::standard().apply_move(at(2, 3), DARK).unwrap();

        assert_eq!(advance_turn(&after, DARK), TurnResult::NextPlayer(LIGHT));
    }

    #[test]
    fn opponent_without_moves_is_skipped() {
        // Light's only stone is boxed in; dark can still capture it from (3, 3).
        let position = board(&["DDDD", "DDDD", "DDDL", "DDD."]);

        assert!(!position.player_has_legal_move(LIGHT));
        assert!(position.player_has_legal_move(DARK));
        assert_eq!(advance_turn(&position, DARK), TurnResult::Skipped(LIGHT));
    }

    #[test]
    fn light_moves_again_after_dark_is_skipped() {
        let position = board(&["LLLL", "LLLL", "LLLD", "LLL."]);

        assert_eq!(advance_turn(&position, LIGHT), TurnResult::Skipped(DARK));
        assert_eq!(advance_turn(&position, DARK), TurnResult::NextPlayer(LIGHT));
    }

    #[test]
    fn full_board_ends_with_majority_winner() {
        let position = board(&["DDDD", "DDDD", "DDLL", "LLLL"]);

        assert_eq!(
            advance_turn(&position, DARK),
            TurnResult::GameOver(Outcome::Winner(DARK))
        );
        assert_eq!(
            advance_turn(&position, LIGHT),
            TurnResult::GameOver(Outcome::Winner(DARK))
        );
    }

    #[test]
    fn mutually_stuck_board_with_equal_counts_is_a_draw() {
        let position = board(&["DD..", "DD..", "..LL", "..LL"]);

        assert!(!position.player_has_legal_move(DARK));
        assert!(!position.player_has_legal_move(LIGHT));
        assert_eq!(advance_turn(&position, DARK), TurnResult::GameOver(Outcome::Draw));
    }

    #[test]
    fn initial_state_is_correct() {
        let game = Game::new(&EngineConfig::default()).unwrap();
        let state = game.to_game_state();

        assert_eq!(state.active_player, Some(DARK));
        assert_eq!(state.dark_count, 2);
        assert_eq!(state.light_count, 2);
        assert!(!state.is_game_over);
        assert!(state.flipped.is_empty());
        assert_eq!(state.message, None);
        assert_eq!(state.legal_moves.len(), 4);
    }

    #[test]
    fn first_move_flips_and_hands_turn_to_light() {
        let mut game = Game::default();

        let report = game.play(at(2, 3)).unwrap();

        assert_eq!(report.player, DARK);
        assert_eq!(report.flipped, vec![at(3, 3)]);
        assert_eq!(report.turn, TurnResult::NextPlayer(LIGHT));
        assert_eq!(report.events, vec![GameEvent::MoveMade(DARK)]);
        assert_eq!(game.active_player(), Some(LIGHT));
        assert_eq!(game.counts(), (4, 1));
        assert_eq!(game.last_flipped(), &[at(3, 3)]);
    }

    #[test]
    fn illegal_move_leaves_game_untouched() {
        let mut game = Game::default();

        let err = game.play(at(0, 0)).unwrap_err();

        assert!(err.is_recoverable());
        assert!(err.to_string().contains("illegal move"));
        assert_eq!(game.board(), &Board::standard());
        assert_eq!(game.active_player(), Some(DARK));
    }

    #[test]
    fn out_of_bounds_move_is_not_recoverable() {
        let mut game = Game::default();

        let err = game.play(at(8, 8)).unwrap_err();

        assert!(matches!(err, EngineError::OutOfBounds { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn from_board_hands_turn_to_player_who_can_move() {
        let game = Game::from_board(board(&["DDDD", "DDDD", "DDDL", "DDD."]), LIGHT);

        assert_eq!(game.active_player(), Some(DARK));
        assert_eq!(game.legal_moves(), vec![at(3, 3)]);
        assert_eq!(game.last_event(), Some(GameEvent::TurnSkipped(LIGHT)));
    }

    #[test]
    fn skipped_opponent_leaves_turn_with_mover() {
        let mut game = Game::from_board(board(&["DL..", "....", "....", "..LD"]), DARK);

        let report = game.play(at(0, 2)).unwrap();

        assert_eq!(report.turn, TurnResult::Skipped(LIGHT));
        assert_eq!(
            report.events,
            vec![GameEvent::MoveMade(DARK), GameEvent::TurnSkipped(LIGHT)]
        );
        assert_eq!(game.active_player(), Some(DARK));
        assert_eq!(
            game.to_game_state().message.as_deref(),
            Some("No moves available for light! Turn reverts to dark")
        );

        let report = game.play(at(3, 1)).unwrap();

        assert_eq!(report.turn, TurnResult::GameOver(Outcome::Winner(DARK)));
        assert_eq!(game.outcome(), Some(Outcome::Winner(DARK)));
    }

    #[test]
    fn move_that_fills_board_ends_game() {
        let mut game = Game::from_board(board(&["DDDD", "DDDD", "DDDL", "DDD."]), DARK);

        let report = game.play(at(3, 3)).unwrap();

        assert_eq!(report.flipped, vec![at(2, 3)]);
        assert_eq!(
            report.events,
            vec![
                GameEvent::MoveMade(DARK),
                GameEvent::GameEnded(Outcome::Winner(DARK))
            ]
        );
        assert!(game.is_over());
        assert_eq!(game.active_player(), None);
        assert_eq!(game.counts(), (16, 0));
        assert_eq!(
            game.to_game_state().message.as_deref(),
            Some("Game over. dark has won!")
        );
        assert_eq!(game.play(at(0, 0)), Err(EngineError::GameAlreadyOver));
    }

    #[test]
    fn position_with_no_moves_starts_ended() {
        let game = Game::from_board(board(&["DD..", "DD..", "..LL", "..LL"]), DARK);

        assert_eq!(game.status(), GameStatus::Ended(Outcome::Draw));
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.is_move_legal(at(0, 3)), Ok(false));
    }

    #[test]
    fn ended_game_still_reports_out_of_bounds() {
        let game = Game::from_board(board(&["DD..", "DD..", "..LL", "..LL"]), DARK);

        assert!(game.is_over());
        assert_eq!(
            game.is_move_legal(at(99, 99)),
            Err(EngineError::OutOfBounds {
                coord: at(99, 99),
                size: 4
            })
        );
    }

    #[test]
    fn invalid_config_aborts_construction() {
        let err = Game::new(&EngineConfig::with_board_size(5)).unwrap_err();

        assert!(matches!(err, EngineError::InvalidBoardConfiguration(_)));
    }
}
