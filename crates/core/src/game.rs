//! Game module - the engine state machine
//!
//! A [`Game`] owns the playfield and two piece slots (active and preview) and
//! borrows a [`Host`] for its whole lifetime. Every operation runs to
//! completion synchronously; the driver decides when to call [`Game::tick`]
//! using the returned level (see [`gravity_interval_ms`](crate::level::gravity_interval_ms)).
//!
//! States: `NotStarted → Running ⇄ Paused`, `Running → GameOver`, and
//! [`Game::start`] from any state begins a fresh game. Intents that arrive in
//! the wrong state are silent no-ops.

use crate::config::{GameConfig, SpawnColumn};
use crate::host::Host;
use crate::level::level_for_lines;
use crate::piece::Piece;
use crate::playfield::Playfield;
use crate::shapes::{shape_at, Bitmap};
use crate::types::{GameEvent, Intent, Placement, MIN_LEVEL, SHAPE_COUNT, TOUCHDOWN_POINTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

pub struct Game<'h, H: Host + ?Sized> {
    host: &'h mut H,
    config: GameConfig,
    playfield: Playfield,
    active: Option<Piece>,
    next: Option<Piece>,
    level: u8,
    score: u32,
    lines: u32,
    started: bool,
    paused: bool,
    game_over: bool,
}

impl<'h, H: Host + ?Sized> Game<'h, H> {
    /// Create an idle game; call [`Game::start`] to begin
    pub fn new(host: &'h mut H, config: GameConfig) -> Self {
        Self {
            host,
            playfield: Playfield::new(config.rows, config.columns),
            config,
            active: None,
            next: None,
            level: MIN_LEVEL,
            score: 0,
            lines: 0,
            started: false,
            paused: false,
            game_over: false,
        }
    }

    pub fn status(&self) -> GameStatus {
        if !self.started {
            GameStatus::NotStarted
        } else if self.game_over {
            GameStatus::GameOver
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Running
        }
    }

    pub fn is_running(&self) -> bool {
        self.status() == GameStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of steps in which at least one row was completed
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &*self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut *self.host
    }

    /// Start a new game, returning the starting level
    pub fn start(&mut self) -> u8 {
        self.host.clear_background();
        self.playfield.clear();

        self.level = MIN_LEVEL;
        self.score = 0;
        self.lines = 0;
        self.paused = false;
        self.game_over = false;
        self.started = true;

        let active = self.spawn_piece();
        let next = self.spawn_piece();
        self.host.draw_block(&active);
        self.host.draw_preview(&next);
        self.active = Some(active);
        self.next = Some(next);

        let msg = format!(
            "new game {}x{}",
            self.playfield.rows(),
            self.playfield.columns()
        );
        self.host.log(&msg);

        self.level
    }

    /// Toggle between Running and Paused; returns false in any other state
    pub fn pause(&mut self) -> bool {
        match self.status() {
            GameStatus::Running | GameStatus::Paused => {
                self.paused = !self.paused;
                true
            }
            GameStatus::NotStarted | GameStatus::GameOver => false,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dc: i32) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if !self.probe(active.bitmap(), active.col + dc, active.row).is_success() {
            return false;
        }

        self.replace_active(active, active.shifted(dc, 0));
        true
    }

    /// Advance to the next rotation with wall-kick correction
    ///
    /// If the rotated piece sticks out on the left it may shift right by one
    /// column (two for the elongated piece); sticking out on the right it may
    /// shift left by one. Collisions are never corrected. Returns whether
    /// the rotation was applied.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        if active.shape().rotation_count() <= 1 {
            return false;
        }

        let rotated = active.rotated();
        let kicks: &[i32] = match self.probe(rotated.bitmap(), rotated.col, rotated.row) {
            Placement::Succeeded => &[0],
            Placement::StickoutLeft if rotated.shape().is_elongated() => &[1, 2],
            Placement::StickoutLeft => &[1],
            Placement::StickoutRight => &[-1],
            Placement::Failed | Placement::InvalidInput => &[],
        };

        let offset = kicks.iter().copied().find(|&dc| {
            dc == 0
                || self
                    .probe(rotated.bitmap(), rotated.col + dc, rotated.row)
                    .is_success()
        });

        match offset {
            Some(dc) => {
                self.replace_active(active, rotated.shifted(dc, 0));
                true
            }
            None => false,
        }
    }

    /// One gravity step; returns the current level, `None` if no step ran
    pub fn tick(&mut self) -> Option<u8> {
        self.step().map(|(_, level)| level)
    }

    /// Hard drop: step gravity until the active piece lands
    ///
    /// Returns the level after the landing step, `None` if not running.
    pub fn drop(&mut self) -> Option<u8> {
        let mut level = None;
        while let Some((below, lvl)) = self.step() {
            level = Some(lvl);
            if !below.is_success() {
                break;
            }
        }
        level
    }

    /// Dispatch an intent; returns whether it had an effect
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.move_left(),
            Intent::MoveRight => self.move_right(),
            Intent::Rotate => self.rotate(),
            Intent::Drop => self.drop().is_some(),
            Intent::Tick => self.tick().is_some(),
            Intent::Pause => self.pause(),
            Intent::Start => {
                self.start();
                true
            }
        }
    }

    /// Send a text picture of the playfield to the host log, top row first
    pub fn dump(&mut self) {
        let text = self.playfield.to_string();
        for line in text.lines() {
            self.host.log(line);
        }
    }

    /// Gravity step shared by tick and drop
    ///
    /// Returns the downward probe result and the level afterwards.
    fn step(&mut self) -> Option<(Placement, u8)> {
        if !self.is_running() {
            return None;
        }
        let active = self.active?;

        let below = self.probe(active.bitmap(), active.col, active.row - 1);
        if below.is_success() {
            self.replace_active(active, active.shifted(0, -1));
        } else {
            self.touchdown(active);
        }

        self.collapse_completed_rows();
        Some((below, self.level))
    }

    /// Commit the landed piece and promote the preview
    fn touchdown(&mut self, landed: Piece) {
        self.playfield.occupy(&landed);

        let preview = self.spawn_piece();
        self.active = self.next.replace(preview);
        self.host.draw_preview(&preview);

        self.score = self.score.saturating_add(TOUCHDOWN_POINTS);
        self.host.notify(GameEvent::Touchdown);

        let Some(active) = self.active else {
            return;
        };
        if self.probe(active.bitmap(), active.col, active.row).is_success() {
            self.host.draw_block(&active);
        } else {
            self.game_over = true;
            let msg = format!(
                "game over: score {} lines {} level {}",
                self.score, self.lines, self.level
            );
            self.host.log(&msg);
            self.host.notify(GameEvent::GameOver);
        }
    }

    fn collapse_completed_rows(&mut self) {
        let completed = self.playfield.completed_rows();
        if completed.is_empty() {
            return;
        }

        for &row in &completed {
            self.playfield.clear_row(row);
        }

        // Counted once per step regardless of how many rows cleared.
        self.lines = self.lines.saturating_add(1);
        let previous = self.level;
        self.level = level_for_lines(self.lines);

        let msg = format!("cleared {} row(s), lines {}", completed.len(), self.lines);
        self.host.log(&msg);
        self.host.notify(GameEvent::RowCompleted);
        if self.level != previous {
            self.host.notify(GameEvent::LevelChanged);
        }

        self.host.paint_field(&self.playfield);
        if !self.game_over {
            if let Some(active) = self.active {
                self.host.draw_block(&active);
            }
        }
    }

    fn replace_active(&mut self, old: Piece, new: Piece) {
        self.host.clear_block(&old);
        self.active = Some(new);
        self.host.draw_block(&new);
    }

    fn probe(&self, bitmap: &Bitmap, col: i32, row: i32) -> Placement {
        let res = self.playfield.placement_test(Some(bitmap), col, row);
        debug_assert_ne!(res, Placement::InvalidInput);
        res
    }

    fn spawn_piece(&mut self) -> Piece {
        let shape = shape_at(self.host.random(SHAPE_COUNT as u32));
        let columns = self.playfield.columns() as i32;
        let col = match self.config.spawn {
            SpawnColumn::Center => columns / 2,
            SpawnColumn::Random => self.host.random((columns - 4) as u32) as i32 + 2,
        };
        Piece::from_shape(shape, col, self.playfield.rows() as i32 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ShapeKind, EMPTY};

    /// Host that replays a fixed list of random values and records calls
    #[derive(Default)]
    struct ScriptedHost {
        picks: Vec<u32>,
        cursor: usize,
        events: Vec<GameEvent>,
        draws: usize,
        clears: usize,
        previews: usize,
        repaints: usize,
        backgrounds: usize,
    }

    impl ScriptedHost {
        fn new(picks: &[u32]) -> Self {
            Self {
                picks: picks.to_vec(),
                ..Self::default()
            }
        }
    }

    impl Host for ScriptedHost {
        fn clear_background(&mut self) {
            self.backgrounds += 1;
        }
        fn draw_block(&mut self, _piece: &Piece) {
            self.draws += 1;
        }
        fn clear_block(&mut self, _piece: &Piece) {
            self.clears += 1;
        }
        fn draw_preview(&mut self, _piece: &Piece) {
            self.previews += 1;
        }
        fn paint_field(&mut self, _playfield: &Playfield) {
            self.repaints += 1;
        }
        fn random(&mut self, max: u32) -> u32 {
            let v = self.picks[self.cursor % self.picks.len()];
            self.cursor += 1;
            v % max
        }
        fn notify(&mut self, event: GameEvent) {
            self.events.push(event);
        }
    }

    fn small() -> GameConfig {
        GameConfig::new(10, 10)
    }

    #[test]
    fn test_new_game_is_idle() {
        let mut host = ScriptedHost::new(&[0]);
        let mut game = Game::new(&mut host, small());

        assert_eq!(game.status(), GameStatus::NotStarted);
        assert!(game.active().is_none());
        assert_eq!(game.tick(), None);
        assert_eq!(game.drop(), None);
        assert!(!game.move_left());
        assert!(!game.rotate());
        assert!(!game.pause());
    }

    #[test]
    fn test_start_draws_both_pieces() {
        let mut host = ScriptedHost::new(&[6, 1]);
        let mut game = Game::new(&mut host, small());

        assert_eq!(game.start(), 1);
        assert_eq!(game.status(), GameStatus::Running);

        let active = *game.active().unwrap();
        assert_eq!(active.kind(), ShapeKind::T);
        assert_eq!((active.col, active.row), (5, 9));
        assert_eq!(game.next().unwrap().kind(), ShapeKind::I);

        assert_eq!(game.host().backgrounds, 1);
        assert_eq!(game.host().draws, 1);
        assert_eq!(game.host().previews, 1);
    }

    #[test]
    fn test_tick_moves_down() {
        let mut host = ScriptedHost::new(&[6]);
        let mut game = Game::new(&mut host, small());
        game.start();

        assert_eq!(game.tick(), Some(1));
        assert_eq!(game.active().unwrap().row, 8);
        assert_eq!(game.host().clears, 1);
        assert_eq!(game.host().draws, 2);
    }

    #[test]
    fn test_move_stops_at_wall() {
        let mut host = ScriptedHost::new(&[1]);
        let mut game = Game::new(&mut host, small());
        game.start();

        // Horizontal I spans col-2..=col+1.
        let mut moves = 0;
        while game.move_left() {
            moves += 1;
        }
        assert_eq!(moves, 3);
        assert_eq!(game.active().unwrap().col, 2);

        let mut moves = 0;
        while game.move_right() {
            moves += 1;
        }
        assert_eq!(moves, 6);
        assert_eq!(game.active().unwrap().col, 8);
    }

    #[test]
    fn test_rotate_o_is_noop() {
        let mut host = ScriptedHost::new(&[0]);
        let mut game = Game::new(&mut host, small());
        game.start();

        let before = *game.active().unwrap();
        assert!(!game.rotate());
        assert_eq!(*game.active().unwrap(), before);
        assert_eq!(game.host().clears, 0);
    }

    #[test]
    fn test_rotate_elongated_kicks_two_columns() {
        let mut host = ScriptedHost::new(&[1]);
        let mut game = Game::new(&mut host, small());
        game.start();

        assert!(game.rotate());
        while game.move_left() {}
        assert_eq!(game.active().unwrap().col, 0);

        // Horizontal at col 0 sticks out by two; +1 still sticks out, +2 fits.
        assert!(game.rotate());
        let active = game.active().unwrap();
        assert_eq!(active.rotation(), 0);
        assert_eq!(active.col, 2);
    }

    #[test]
    fn test_rotate_elongated_rejected_when_kick_blocked() {
        let mut host = ScriptedHost::new(&[1]);
        let mut game = Game::new(&mut host, small());
        game.start();

        assert!(game.rotate());
        while game.move_left() {}
        let row = game.active().unwrap().row;
        game.playfield.set(3, row, 1);

        assert!(!game.rotate());
        let active = game.active().unwrap();
        assert_eq!(active.rotation(), 1);
        assert_eq!(active.col, 0);
    }

    #[test]
    fn test_rotate_left_kick_single_column() {
        let mut host = ScriptedHost::new(&[6]);
        let mut game = Game::new(&mut host, small());
        game.start();

        assert!(game.rotate());
        while game.move_left() {}
        assert_eq!(game.active().unwrap().col, 0);

        assert!(game.rotate());
        let active = game.active().unwrap();
        assert_eq!(active.rotation(), 2);
        assert_eq!(active.col, 1);
    }

    #[test]
    fn test_rotate_left_kick_rejected_for_short_piece() {
        let mut host = ScriptedHost::new(&[6]);
        let mut game = Game::new(&mut host, small());
        game.start();

        assert!(game.rotate());
        while game.move_left() {}
        let row = game.active().unwrap().row;
        game.playfield.set(2, row, 1);

        assert!(!game.rotate());
        let active = game.active().unwrap();
        assert_eq!(active.rotation(), 1);
        assert_eq!(active.col, 0);
    }

    #[test]
    fn test_rotate_right_kick() {
        let mut host = ScriptedHost::new(&[1]);
        let mut game = Game::new(&mut host, small());
        game.start();

        assert!(game.rotate());
        while game.move_right() {}
        assert_eq!(game.active().unwrap().col, 9);

        assert!(game.rotate());
        let active = game.active().unwrap();
        assert_eq!(active.rotation(), 0);
        assert_eq!(active.col, 8);
    }

    #[test]
    fn test_rotate_blocked_by_stack_is_refused() {
        let mut host = ScriptedHost::new(&[1]);
        let mut game = Game::new(&mut host, small());
        game.start();

        // Vertical I would cover rows 10..=7 of column 5.
        game.playfield.set(5, 8, 1);
        assert!(!game.rotate());
        assert_eq!(game.active().unwrap().rotation(), 0);
    }

    #[test]
    fn test_drop_lands_once_and_promotes_preview() {
        let mut host = ScriptedHost::new(&[0, 6, 1]);
        let mut game = Game::new(&mut host, small());
        game.start();

        assert_eq!(game.drop(), Some(1));
        assert_eq!(game.score(), 1);

        // O landed on the floor at columns 4 and 5.
        let color = ShapeKind::O.color();
        assert_eq!(game.playfield().get(4, 0), Some(color));
        assert_eq!(game.playfield().get(5, 1), Some(color));

        let active = *game.active().unwrap();
        assert_eq!(active.kind(), ShapeKind::T);
        assert_eq!(active.row, 9);
        assert_eq!(game.next().unwrap().kind(), ShapeKind::I);
        assert_eq!(game.host().events, vec![GameEvent::Touchdown]);
    }

    #[test]
    fn test_row_completion_ignores_last_column() {
        let mut host = ScriptedHost::new(&[0]);
        let mut game = Game::new(&mut host, small());
        game.start();

        for col in [0, 1, 2, 3, 6, 7, 8] {
            game.playfield.set(col, 0, 3);
        }
        game.drop();

        assert_eq!(game.lines(), 1);
        assert_eq!(game.level(), 1);
        // Old row 1 (the top half of the O) moved down to row 0.
        let color = ShapeKind::O.color();
        assert_eq!(game.playfield().row(0).unwrap()[4], color);
        assert_eq!(game.playfield().row(0).unwrap()[0], EMPTY);
        assert_eq!(game.playfield().row(1).unwrap()[4], EMPTY);
        assert_eq!(
            game.host().events,
            vec![GameEvent::Touchdown, GameEvent::RowCompleted]
        );
        assert_eq!(game.host().repaints, 1);
    }

    #[test]
    fn test_multi_row_clear_counts_once() {
        let mut host = ScriptedHost::new(&[0]);
        let mut game = Game::new(&mut host, small());
        game.start();

        for row in 0..2 {
            for col in [0, 1, 2, 3, 6, 7, 8, 9] {
                game.playfield.set(col, row, 3);
            }
        }
        game.drop();

        assert_eq!(game.lines(), 1);
        assert!(game.playfield().cells().iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn test_level_changed_event() {
        let mut host = ScriptedHost::new(&[0]);
        let mut game = Game::new(&mut host, small());
        game.start();
        game.lines = 10;

        for col in [0, 1, 2, 3, 6, 7, 8] {
            game.playfield.set(col, 0, 3);
        }
        game.drop();

        assert_eq!(game.lines(), 11);
        assert_eq!(game.level(), 2);
        assert!(game.host().events.contains(&GameEvent::LevelChanged));
    }

    #[test]
    fn test_pause_blocks_intents() {
        let mut host = ScriptedHost::new(&[6]);
        let mut game = Game::new(&mut host, small());
        game.start();

        assert!(game.pause());
        assert_eq!(game.status(), GameStatus::Paused);

        let before = *game.active().unwrap();
        assert!(!game.move_left());
        assert!(!game.move_right());
        assert!(!game.rotate());
        assert_eq!(game.tick(), None);
        assert_eq!(game.drop(), None);
        assert_eq!(*game.active().unwrap(), before);

        assert!(game.pause());
        assert_eq!(game.status(), GameStatus::Running);
        assert!(game.move_left());
    }

    #[test]
    fn test_stacking_same_piece_ends_game() {
        let mut host = ScriptedHost::new(&[0]);
        let mut game = Game::new(&mut host, small());
        game.start();

        let mut ticks = 0;
        while game.tick().is_some() {
            ticks += 1;
            assert!(ticks < 1000, "game should end");
        }

        assert_eq!(game.status(), GameStatus::GameOver);
        // Five 2-row squares fill the 10-row center columns.
        assert_eq!(game.score(), 5);
        assert_eq!(game.host().events.last(), Some(&GameEvent::GameOver));
        assert_eq!(
            game.host()
                .events
                .iter()
                .filter(|&&e| e == GameEvent::Touchdown)
                .count(),
            5
        );

        // Terminal: nothing moves, pause is refused, restart works.
        assert!(!game.pause());
        assert!(!game.move_left());
        game.start();
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_game_over_skips_final_draw() {
        let mut host = ScriptedHost::new(&[0]);
        let mut game = Game::new(&mut host, small());
        game.start();

        while game.drop().is_some() {}
        let draws = game.host().draws;
        assert!(game.is_game_over());
        assert_eq!(game.tick(), None);
        assert_eq!(game.host().draws, draws);
    }

    #[test]
    fn test_random_spawn_column_in_range() {
        let mut host = ScriptedHost::new(&[1, 0, 1, 9, 6, 3]);
        let config = small().with_spawn(SpawnColumn::Random);
        let mut game = Game::new(&mut host, config);
        game.start();

        for piece in [game.active().unwrap(), game.next().unwrap()] {
            assert!((2..=7).contains(&piece.col));
            assert_eq!(game.probe(piece.bitmap(), piece.col, piece.row), Placement::Succeeded);
        }
    }

    #[test]
    fn test_apply_dispatches() {
        let mut host = ScriptedHost::new(&[6]);
        let mut game = Game::new(&mut host, small());

        assert!(!game.apply(Intent::Tick));
        assert!(game.apply(Intent::Start));
        assert!(game.apply(Intent::MoveLeft));
        assert!(game.apply(Intent::MoveRight));
        assert!(game.apply(Intent::Rotate));
        assert!(game.apply(Intent::Tick));
        assert!(game.apply(Intent::Drop));
        assert!(game.apply(Intent::Pause));
        assert!(!game.apply(Intent::Drop));
    }
}
