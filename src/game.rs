//! Top-level trainer state: the clue list, the current position, and the
//! live [`Session`]. Owned explicitly by the caller rather than living in
//! process-wide statics.

use crate::clue::ClueEntry;
use crate::clue_set::ClueSet;
use crate::errors::ClueSetError;
use crate::session::{Session, SubmitSignal};

/// Outcome of a game-level action, after session signals are mapped onto
/// clue navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSignal {
    /// Submit matched the answer.
    Correct,
    /// Submit did not match.
    Incorrect,
    /// The answer was revealed (give-up); no success effect.
    Revealed,
    /// Moved on to the next clue with a fresh session.
    Next,
    /// Already on the last clue; nothing further to advance to.
    Finished,
}

/// The clue list plus the cursor into it and the session for the current
/// clue. The list is built once at load and read-only afterwards; the
/// session is replaced wholesale on every (re)selection.
#[derive(Debug)]
pub struct GameContext {
    clues: Vec<ClueEntry>,
    current: usize,
    session: Session,
}

impl GameContext {
    /// Start a game on the first clue of the set.
    ///
    /// # Errors
    /// Returns [`ClueSetError::NoClues`] for an empty set; everything else
    /// about a clue degrades during normalization instead of failing here.
    pub fn new(set: ClueSet) -> Result<Self, ClueSetError> {
        let clues = set.clues;
        if clues.is_empty() {
            return Err(ClueSetError::NoClues);
        }
        let session = Session::new(&clues[0].answer);
        Ok(Self {
            clues,
            current: 0,
            session,
        })
    }

    #[must_use]
    pub fn clues(&self) -> &[ClueEntry] {
        &self.clues
    }

    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.clues.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_clue(&self) -> &ClueEntry {
        &self.clues[self.current]
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Letter entry, cursor moves, and reveals go straight to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Jump to a clue by index with a fresh session. Selecting the current
    /// index restarts it. Returns false (and changes nothing) out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.clues.len() {
            return false;
        }
        self.current = index;
        self.session = Session::new(&self.clues[index].answer);
        true
    }

    /// Move to the next clue, or report [`GameSignal::Finished`] on the
    /// last one (position and session stay put in that case).
    pub fn advance(&mut self) -> GameSignal {
        if self.current + 1 >= self.clues.len() {
            return GameSignal::Finished;
        }
        self.current += 1;
        self.session = Session::new(&self.clues[self.current].answer);
        GameSignal::Next
    }

    /// Submit the current letters; once solved, a further submit advances.
    pub fn submit(&mut self) -> GameSignal {
        let signal = self.session.submit();
        self.map_signal(signal)
    }

    /// Reveal the current answer; once solved, a further give-up advances.
    pub fn give_up(&mut self) -> GameSignal {
        let signal = self.session.give_up();
        self.map_signal(signal)
    }

    fn map_signal(&mut self, signal: SubmitSignal) -> GameSignal {
        match signal {
            SubmitSignal::Correct => GameSignal::Correct,
            SubmitSignal::Incorrect => GameSignal::Incorrect,
            SubmitSignal::Revealed => GameSignal::Revealed,
            SubmitSignal::Advance => self.advance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(answer: &str) -> ClueEntry {
        ClueEntry {
            answer: answer.to_string(),
            clue_text: format!("clue for {answer}"),
            clue_kind: "unknown".to_string(),
            definition_spans: Vec::new(),
            indicator_words: Vec::new(),
            fodder_words: Vec::new(),
            parts: Vec::new(),
        }
    }

    fn game(answers: &[&str]) -> GameContext {
        let set = ClueSet {
            clues: answers.iter().copied().map(entry).collect(),
        };
        GameContext::new(set).unwrap()
    }

    fn solve_current(ctx: &mut GameContext) {
        let answer: String = ctx.current_clue().answer.replace(' ', "");
        for ch in answer.chars() {
            ctx.session_mut().type_letter(ch);
        }
        assert_eq!(ctx.submit(), GameSignal::Correct);
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let result = GameContext::new(ClueSet { clues: Vec::new() });
        assert!(matches!(result, Err(ClueSetError::NoClues)));
    }

    #[test]
    fn test_new_starts_on_first_clue() {
        let ctx = game(&["CAT", "SEA DOG"]);
        assert_eq!(ctx.current_index(), 0);
        assert_eq!(ctx.clue_count(), 2);
        assert_eq!(ctx.session().len(), 3);
    }

    #[test]
    fn test_select_resets_session() {
        let mut ctx = game(&["CAT", "SEA DOG"]);
        ctx.session_mut().type_letter('c');
        assert!(ctx.select(0));
        assert!(ctx.session().letters().iter().all(Option::is_none));
        assert!(ctx.select(1));
        assert_eq!(ctx.current_index(), 1);
        assert_eq!(ctx.session().len(), 6);
    }

    #[test]
    fn test_select_out_of_range_changes_nothing() {
        let mut ctx = game(&["CAT"]);
        ctx.session_mut().type_letter('c');
        assert!(!ctx.select(1));
        assert_eq!(ctx.current_index(), 0);
        assert_eq!(ctx.session().letters()[0], Some('C'));
    }

    #[test]
    fn test_advance_moves_then_finishes() {
        let mut ctx = game(&["CAT", "DOG"]);
        assert_eq!(ctx.advance(), GameSignal::Next);
        assert_eq!(ctx.current_index(), 1);
        assert_eq!(ctx.advance(), GameSignal::Finished);
        assert_eq!(ctx.current_index(), 1);
    }

    #[test]
    fn test_submit_after_solve_advances() {
        let mut ctx = game(&["CAT", "DOG"]);
        solve_current(&mut ctx);
        assert_eq!(ctx.submit(), GameSignal::Next);
        assert_eq!(ctx.current_index(), 1);
        assert!(!ctx.session().solved());
    }

    #[test]
    fn test_submit_after_solve_on_last_clue_finishes() {
        let mut ctx = game(&["CAT"]);
        solve_current(&mut ctx);
        assert_eq!(ctx.submit(), GameSignal::Finished);
    }

    #[test]
    fn test_give_up_then_advance() {
        let mut ctx = game(&["CAT", "DOG"]);
        assert_eq!(ctx.give_up(), GameSignal::Revealed);
        assert!(ctx.session().solved());
        assert_eq!(ctx.give_up(), GameSignal::Next);
        assert_eq!(ctx.current_index(), 1);
    }

    #[test]
    fn test_incorrect_submit_does_not_navigate() {
        let mut ctx = game(&["CAT", "DOG"]);
        ctx.session_mut().type_letter('x');
        assert_eq!(ctx.submit(), GameSignal::Incorrect);
        assert_eq!(ctx.current_index(), 0);
    }

    #[test]
    fn test_full_play_through() {
        let mut ctx = game(&["SEA DOG", "CAT"]);
        solve_current(&mut ctx);
        assert_eq!(ctx.submit(), GameSignal::Next);
        solve_current(&mut ctx);
        assert_eq!(ctx.submit(), GameSignal::Finished);
        assert_eq!(ctx.current_index(), 1);
    }
}
