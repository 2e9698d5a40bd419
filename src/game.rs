use anyhow::Result;
use log::{debug, info};
use rand::Rng;

use crate::apple::Apple;
use crate::clock::Clock;
use crate::collision::{self, DeathCause};
use crate::input::{InputEvent, InputSource};
use crate::sink::{Cue, Sink};
use crate::snake::Snake;

/// Everything that lives for exactly one life of play.
pub struct GameState {
    pub snake: Snake,
    pub apple: Apple,
}

impl GameState {
    pub fn new() -> Self {
        GameState { snake: Snake::new(), apple: Apple::new() }
    }

    pub fn score(&self) -> usize {
        self.snake.len()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Over,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Ate,
    /// `ate` is set when the fatal move also took the apple.
    Died { cause: DeathCause, ate: bool },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One simulation step: move, then react to what the head touched.
///
/// Eating is handled before the fatal checks, so a snake that bites an apple
/// lying on its own body still grows before it dies.
pub fn update<R: Rng>(state: &mut GameState, rng: &mut R) -> TickOutcome {
    state.snake.advance();

    let found = collision::detect(&state.snake, state.apple.position());

    if found.ate {
        state.snake.grow();
        state.apple.relocate(rng);
    }

    match found.death {
        Some(cause) => TickOutcome::Died { cause, ate: found.ate },
        None if found.ate => TickOutcome::Ate,
        None => TickOutcome::Continue,
    }
}

pub struct Controller<S: Sink, R: Rng> {
    state: GameState,
    phase: Phase,
    sink: S,
    rng: R,
}

impl<S: Sink, R: Rng> Controller<S, R> {
    pub fn new(sink: S, rng: R) -> Self {
        Controller { state: GameState::new(), phase: Phase::Playing, sink, rng }
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn run<I: InputSource>(&mut self, input: &mut I, clock: &mut Clock) -> Result<()> {
        info!("Game started, {:?} per tick", clock.period());
        self.sink.play_background_music_loop();

        loop {
            for ev in input.poll_events()? {
                if self.handle_event(ev) == Flow::Quit {
                    info!("Quit requested, score {}", self.state.score());
                    return Ok(());
                }
            }

            self.step()?;
            clock.tick();
        }
    }

    /// Applies one input event. Moves are only honored while playing.
    pub fn handle_event(&mut self, ev: InputEvent) -> Flow {
        match (ev, self.phase) {
            (InputEvent::Quit, _) => return Flow::Quit,
            (InputEvent::ConfirmRestart, Phase::Over) => self.restart(),
            (InputEvent::ConfirmRestart, Phase::Playing) => {}
            (_, Phase::Over) => {}
            (ev, Phase::Playing) => {
                if let Some(dir) = ev.direction() {
                    if !self.state.snake.set_direction(dir) {
                        debug!("Ignored reversal from {:?} to {:?}", self.state.snake.direction(), dir);
                    }
                }
            }
        }

        Flow::Continue
    }

    /// One frame. The board is frozen while the game is over.
    pub fn step(&mut self) -> Result<()> {
        if self.phase == Phase::Over {
            return Ok(());
        }

        match update(&mut self.state, &mut self.rng) {
            TickOutcome::Continue => {}
            TickOutcome::Ate => {
                debug!("Apple eaten, length {}", self.state.score());
                self.sink.play_sound(Cue::Ding);
            }
            TickOutcome::Died { cause, ate } => {
                if ate {
                    self.sink.play_sound(Cue::Ding);
                }
                info!("Game over ({:?}), score {}", cause, self.state.score());
                self.sink.play_sound(Cue::Crash);
                self.phase = Phase::Over;
                return self.sink.show_game_over(self.state.score());
            }
        }

        self.sink.draw_frame(
            self.state.snake.segments(),
            self.state.apple.position(),
            self.state.score(),
        )
    }

    fn restart(&mut self) {
        info!("Restarting");
        self.state = GameState::new();
        self.phase = Phase::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{self, cell, to_grid, Cell, SIZE, WINDOW_H};
    use crate::snake::Direction;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::VecDeque;

    #[derive(Debug, PartialEq)]
    enum Call {
        Frame(Vec<Cell>, Cell, usize),
        GameOver(usize),
        Sound(Cue),
        Music,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn sounds(&self) -> Vec<Cue> {
            self.calls.iter().filter_map(|c| match c {
                Call::Sound(cue) => Some(*cue),
                _ => None,
            }).collect()
        }

        fn game_overs(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, Call::GameOver(_))).count()
        }
    }

    impl Sink for Recorder {
        fn draw_frame(&mut self, segments: &[Cell], apple: Cell, score: usize) -> Result<()> {
            self.calls.push(Call::Frame(segments.to_vec(), apple, score));
            Ok(())
        }

        fn show_game_over(&mut self, score: usize) -> Result<()> {
            self.calls.push(Call::GameOver(score));
            Ok(())
        }

        fn play_sound(&mut self, cue: Cue) {
            self.calls.push(Call::Sound(cue));
        }

        fn play_background_music_loop(&mut self) {
            self.calls.push(Call::Music);
        }
    }

    /// Hands out one batch of events per frame.
    struct Script(VecDeque<Vec<InputEvent>>);

    impl InputSource for Script {
        fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
            Ok(self.0.pop_front().unwrap_or_else(|| vec![InputEvent::Quit]))
        }
    }

    fn controller() -> Controller<Recorder, StdRng> {
        Controller::new(Recorder::default(), StdRng::seed_from_u64(1))
    }

    fn head_in_cells<S: Sink, R: Rng>(game: &Controller<S, R>) -> (i32, i32) {
        to_grid(game.state().snake.head())
    }

    #[test]
    fn three_quiet_ticks_move_down_three_cells() {
        let mut game = controller();

        for _ in 0..3 {
            game.step().unwrap();
        }

        assert_eq!(head_in_cells(&game), (5, 8));
        assert_eq!(game.state().score(), 1);
        assert_eq!(game.state().apple.position(), cell(3, 3));
        assert!(game.sink().sounds().is_empty());
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn eating_grows_and_moves_the_apple() {
        let mut game = controller();
        game.state_mut().apple.place(cell(5, 6));

        game.step().unwrap();

        assert_eq!(game.state().score(), 2);
        assert_eq!(game.sink().sounds(), vec![Cue::Ding]);
        // The new apple is uniform over the board and may even land on the snake.
        assert!(geometry::on_board(game.state().apple.position()));

        // The grown tail still sits on the old tail in the frame drawn this tick.
        match game.sink().calls.last() {
            Some(Call::Frame(segments, _, 2)) => assert_eq!(segments, &vec![cell(5, 6), cell(5, 6)]),
            other => panic!("unexpected call {:?}", other),
        }

        game.state_mut().apple.place(cell(0, 0));
        game.step().unwrap();
        assert_eq!(game.state().snake.segments(), &[cell(5, 7), cell(5, 6)]);
    }

    #[test]
    fn update_reports_each_outcome() {
        let mut rng = StdRng::seed_from_u64(3);

        let mut state = GameState::new();
        assert_eq!(update(&mut state, &mut rng), TickOutcome::Continue);

        let mut state = GameState::new();
        state.apple.place(cell(5, 6));
        assert_eq!(update(&mut state, &mut rng), TickOutcome::Ate);

        let mut state = GameState::new();
        state.snake = Snake::with_body(vec![cell(0, 0)], Direction::Left);
        assert_eq!(
            update(&mut state, &mut rng),
            TickOutcome::Died { cause: DeathCause::Wall, ate: false }
        );
    }

    /// Loop of body with the head at (5,5) heading left into (4,5).
    fn coiled_snake() -> Snake {
        Snake::with_body(
            vec![cell(5, 5), cell(5, 6), cell(4, 6), cell(4, 5), cell(3, 5)],
            Direction::Left,
        )
    }

    #[test]
    fn biting_an_apple_on_the_body_grows_then_dies() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = GameState::new();
        state.snake = coiled_snake();
        state.apple.place(cell(4, 5));

        assert_eq!(
            update(&mut state, &mut rng),
            TickOutcome::Died { cause: DeathCause::SelfCollision, ate: true }
        );
        assert_eq!(state.score(), 6);
    }

    #[test]
    fn apple_on_the_body_rings_before_the_crash() {
        let mut game = controller();
        game.state_mut().snake = coiled_snake();
        game.state_mut().apple.place(cell(4, 5));

        game.step().unwrap();

        assert_eq!(game.phase(), Phase::Over);
        assert_eq!(game.sink().sounds(), vec![Cue::Ding, Cue::Crash]);
        assert_eq!(game.sink().calls.last(), Some(&Call::GameOver(6)));
    }

    #[test]
    fn self_collision_ends_the_game() {
        let mut game = controller();
        game.state_mut().snake = coiled_snake();

        game.step().unwrap();

        assert_eq!(game.phase(), Phase::Over);
        assert_eq!(game.sink().sounds(), vec![Cue::Crash]);
        assert_eq!(game.sink().calls.last(), Some(&Call::GameOver(5)));
    }

    #[test]
    fn reversal_is_ignored_while_playing() {
        let mut game = controller();

        game.handle_event(InputEvent::Up);
        assert_eq!(game.state().snake.direction(), Direction::Down);

        game.handle_event(InputEvent::Left);
        game.handle_event(InputEvent::Right);
        assert_eq!(game.state().snake.direction(), Direction::Left);
    }

    #[test]
    fn wall_death_freezes_until_enter() {
        let mut game = controller();
        let rows = WINDOW_H / SIZE;

        // Straight down from row 5: row `rows` is off the board.
        let mut ticks = 0;
        while game.phase() == Phase::Playing {
            game.step().unwrap();
            ticks += 1;
        }

        assert_eq!(ticks, rows - 5);
        assert_eq!(head_in_cells(&game), (5, rows));
        assert_eq!(game.sink().sounds(), vec![Cue::Crash]);

        let frozen = game.state().snake.segments().to_vec();
        let calls = game.sink().calls.len();
        for ev in [InputEvent::Left, InputEvent::Up, InputEvent::Right].iter() {
            assert_eq!(game.handle_event(*ev), Flow::Continue);
            game.step().unwrap();
        }
        assert_eq!(game.state().snake.segments(), frozen.as_slice());
        assert_eq!(game.state().snake.direction(), Direction::Down);
        assert_eq!(game.sink().calls.len(), calls);
        assert_eq!(game.sink().game_overs(), 1);

        game.handle_event(InputEvent::ConfirmRestart);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.state().score(), 1);
        assert_eq!(head_in_cells(&game), (5, 5));
        assert_eq!(game.state().snake.direction(), Direction::Down);
    }

    #[test]
    fn enter_while_playing_does_nothing() {
        let mut game = controller();
        game.step().unwrap();

        game.handle_event(InputEvent::ConfirmRestart);

        assert_eq!(head_in_cells(&game), (5, 6));
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn run_plays_music_ticks_and_quits() {
        let mut game = controller();
        let mut input = Script(VecDeque::from(vec![
            vec![],
            vec![InputEvent::Right],
            vec![],
            vec![InputEvent::Quit, InputEvent::Down],
        ]));
        let mut clock = Clock::new(1000);

        game.run(&mut input, &mut clock).unwrap();

        assert_eq!(game.sink().calls.first(), Some(&Call::Music));
        assert_eq!(head_in_cells(&game), (7, 6));
        assert_eq!(game.state().snake.direction(), Direction::Right);
    }

    #[test]
    fn quit_works_from_game_over() {
        let mut game = controller();
        game.state_mut().snake = Snake::with_body(vec![cell(0, 0)], Direction::Up);
        game.step().unwrap();
        assert_eq!(game.phase(), Phase::Over);

        assert_eq!(game.handle_event(InputEvent::Quit), Flow::Quit);
    }
}
