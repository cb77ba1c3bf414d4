//! Per-player round state and the guess-application rules.

/// How one player's round ended (or hasn't yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Solved,
    Exhausted,
    Disconnected,
}

/// One player's working state for a single round.
///
/// Created at round start, dropped at round end. The target word itself is
/// shared by all players; progress is scoped to this player only.
#[derive(Debug)]
pub struct RoundState {
    progress: Vec<bool>,
    guesses_left: u8,
    outcome: Outcome,
}

impl RoundState {
    pub fn new(word_len: usize, budget: u8) -> Self {
        Self {
            progress: vec![false; word_len],
            guesses_left: budget,
            outcome: Outcome::InProgress,
        }
    }

    pub fn progress(&self) -> &[bool] {
        &self.progress
    }

    pub fn guesses_left(&self) -> u8 {
        self.guesses_left
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Terminal states absorb all further guesses.
    pub fn is_terminal(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    /// Applies one guess against the round word and returns the score gained,
    /// nonzero only on the guess that solves the word.
    ///
    /// Every not-yet-revealed position matching the guess is revealed. A
    /// guess that reveals nothing new costs one remaining guess, even if the
    /// same letter was already wrong before. Solving awards
    /// `word length + guesses remaining` and ends participation; running out
    /// of guesses ends it with no score.
    pub fn apply_guess(&mut self, word: &str, guess: u8) -> u32 {
        if self.is_terminal() {
            return 0;
        }

        let mut revealed_any = false;
        for (j, letter) in word.bytes().enumerate() {
            if letter == guess && !self.progress[j] {
                self.progress[j] = true;
                revealed_any = true;
            }
        }

        if self.progress.iter().all(|revealed| *revealed) {
            self.outcome = Outcome::Solved;
            let score = word.len() as u32 + u32::from(self.guesses_left);
            self.guesses_left = 0;
            return score;
        }

        if !revealed_any {
            self.guesses_left -= 1;
            if self.guesses_left == 0 {
                self.outcome = Outcome::Exhausted;
            }
        }

        0
    }

    /// Records that the connection died mid-round. Equivalent to `Exhausted`
    /// for the round-termination check, so a dropped player never blocks the
    /// round.
    pub fn mark_disconnected(&mut self) {
        if !self.is_terminal() {
            self.outcome = Outcome::Disconnected;
            self.guesses_left = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::render_progress;

    #[test]
    fn fresh_round_state_is_unrevealed_and_in_progress() {
        let state = RoundState::new(3, 8);
        assert_eq!(state.progress(), &[false, false, false]);
        assert_eq!(state.guesses_left(), 8);
        assert_eq!(state.outcome(), Outcome::InProgress);
        assert!(!state.is_terminal());
    }

    #[test]
    fn cat_example_two_wrong_guesses_scores_nine() {
        let mut state = RoundState::new(3, 8);
        let mut score = 0;
        let mut lines = Vec::new();

        for guess in [b'a', b'x', b'z', b'c', b't'] {
            score += state.apply_guess("cat", guess);
            lines.push(render_progress(state.progress()));
        }

        assert_eq!(lines, vec![b"010", b"010", b"010", b"110", b"111"]);
        assert_eq!(state.outcome(), Outcome::Solved);
        assert_eq!(score, 3 + 6);
    }

    #[test]
    fn guessing_every_distinct_letter_solves_within_budget() {
        let mut state = RoundState::new(5, 8);
        let mut score = 0;
        for guess in [b'o', b'c', b'e', b'a', b'n'] {
            score += state.apply_guess("ocean", guess);
        }
        assert_eq!(state.outcome(), Outcome::Solved);
        // No wrong guesses, so the full budget is still standing at solve.
        assert_eq!(score, 5 + 8);
        assert_eq!(state.guesses_left(), 0);
    }

    #[test]
    fn repeating_the_same_wrong_letter_exhausts_the_budget() {
        let mut state = RoundState::new(3, 8);
        for _ in 0..8 {
            assert_eq!(state.apply_guess("cat", b'z'), 0);
        }
        assert_eq!(state.outcome(), Outcome::Exhausted);
        assert_eq!(state.guesses_left(), 0);
    }

    #[test]
    fn repeating_an_already_revealed_letter_costs_a_guess() {
        let mut state = RoundState::new(3, 8);
        state.apply_guess("cat", b'a');
        assert_eq!(state.guesses_left(), 8);
        state.apply_guess("cat", b'a');
        assert_eq!(state.guesses_left(), 7);
    }

    #[test]
    fn budget_of_one_and_a_wrong_first_guess_exhausts() {
        let mut state = RoundState::new(6, 1);
        assert_eq!(state.apply_guess("valley", b'z'), 0);
        assert_eq!(state.outcome(), Outcome::Exhausted);
        assert_eq!(state.guesses_left(), 0);
    }

    #[test]
    fn one_guess_reveals_every_matching_position() {
        let mut state = RoundState::new(6, 8);
        state.apply_guess("banana", b'a');
        assert_eq!(render_progress(state.progress()), b"010101");
        assert_eq!(state.guesses_left(), 8);
    }

    #[test]
    fn terminal_states_absorb_further_guesses() {
        let mut state = RoundState::new(3, 8);
        for guess in [b'c', b'a', b't'] {
            state.apply_guess("cat", guess);
        }
        assert_eq!(state.outcome(), Outcome::Solved);
        assert_eq!(state.apply_guess("cat", b'z'), 0);
        assert_eq!(state.outcome(), Outcome::Solved);

        let mut state = RoundState::new(3, 1);
        state.apply_guess("cat", b'z');
        assert_eq!(state.outcome(), Outcome::Exhausted);
        assert_eq!(state.apply_guess("cat", b'c'), 0);
        assert_eq!(render_progress(state.progress()), b"000");
    }

    #[test]
    fn disconnect_is_terminal_but_never_overrides_a_result() {
        let mut state = RoundState::new(3, 8);
        state.mark_disconnected();
        assert_eq!(state.outcome(), Outcome::Disconnected);
        assert!(state.is_terminal());

        let mut solved = RoundState::new(3, 8);
        for guess in [b'c', b'a', b't'] {
            solved.apply_guess("cat", guess);
        }
        solved.mark_disconnected();
        assert_eq!(solved.outcome(), Outcome::Solved);
    }

    #[test]
    fn solve_score_reflects_remaining_guesses() {
        // Two wrong guesses before solving an 8-letter word: 8 + (8 - 2).
        let mut state = RoundState::new(8, 8);
        let word = "mountain";
        let mut score = 0;
        for guess in [b'q', b'z', b'm', b'o', b'u', b'n', b't', b'a', b'i'] {
            score += state.apply_guess(word, guess);
        }
        assert_eq!(state.outcome(), Outcome::Solved);
        assert_eq!(score, 8 + 6);
    }
}
