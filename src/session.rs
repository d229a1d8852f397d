//! Per-clue answer-entry state machine.
//!
//! A [`Session`] owns the letter buffer, cursor, solved flag, and the
//! one-shot reveal flags for a single clue. Every operation is synchronous
//! and total: invalid input is ignored rather than raised. The external
//! renderer re-reads the state after each event and reacts to the returned
//! [`SubmitSignal`].

/// Navigation/effect signal returned by [`Session::submit`] and
/// [`Session::give_up`]. The renderer owns any transient visual effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitSignal {
    /// Submitted letters match the answer; show the success effect.
    Correct,
    /// Submitted letters do not match; show the error effect.
    Incorrect,
    /// Solved via reveal rather than a matching submit; no success effect.
    Revealed,
    /// Already solved; the caller should advance to the next clue.
    Advance,
}

/// Mutable state for one clue attempt. Created fresh whenever a clue is
/// (re)selected and replaced wholesale on advance.
#[derive(Debug, Clone)]
pub struct Session {
    /// Uppercased answer with spaces removed; fixed for the session.
    target: Vec<char>,
    /// One slot per target character, `None` while unfilled.
    letters: Vec<Option<char>>,
    cursor: usize,
    solved: bool,
    revealed_definition: bool,
    revealed_structure: bool,
}

impl Session {
    #[must_use]
    pub fn new(answer: &str) -> Self {
        let target: Vec<char> = answer
            .chars()
            .filter(|c| *c != ' ')
            .flat_map(char::to_uppercase)
            .collect();
        let letters = vec![None; target.len()];
        Self {
            target,
            letters,
            cursor: 0,
            solved: false,
            revealed_definition: false,
            revealed_structure: false,
        }
    }

    /// Write an uppercased letter at the cursor and advance. The cursor
    /// saturates at the last position instead of wrapping. Ignored once
    /// solved or for anything but a single ASCII letter.
    pub fn type_letter(&mut self, ch: char) {
        if self.solved || !ch.is_ascii_alphabetic() || self.letters.is_empty() {
            return;
        }
        self.letters[self.cursor] = Some(ch.to_ascii_uppercase());
        if self.cursor + 1 < self.letters.len() {
            self.cursor += 1;
        }
    }

    /// Clear the slot at the cursor, then step left. The cursor saturates
    /// at position 0. Ignored once solved.
    pub fn backspace(&mut self) {
        if self.solved || self.letters.is_empty() {
            return;
        }
        self.letters[self.cursor] = None;
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Jump the cursor to a clicked box. Out-of-range requests and requests
    /// after solving are ignored.
    pub fn set_cursor(&mut self, i: usize) {
        if self.solved || i >= self.letters.len() {
            return;
        }
        self.cursor = i;
    }

    /// Check the letters against the answer.
    pub fn submit(&mut self) -> SubmitSignal {
        if self.solved {
            return SubmitSignal::Advance;
        }
        if self.is_filled_correctly() {
            self.solved = true;
            SubmitSignal::Correct
        } else {
            SubmitSignal::Incorrect
        }
    }

    /// One-shot: mark the definition as revealed. Never reset for the
    /// lifetime of the session.
    pub fn reveal_definition(&mut self) {
        self.revealed_definition = true;
    }

    /// One-shot: mark the structural analysis as revealed.
    pub fn reveal_structure(&mut self) {
        self.revealed_structure = true;
    }

    /// Fill the lowest empty slot with the correct letter. Returns whether a
    /// letter was placed. When the fill completes the answer the session
    /// becomes solved without the success effect.
    pub fn reveal_one_letter(&mut self) -> bool {
        if self.solved {
            return false;
        }
        let Some(i) = self.letters.iter().position(Option::is_none) else {
            return false;
        };
        self.letters[i] = Some(self.target[i]);
        if self.is_filled_correctly() {
            self.solved = true;
        }
        true
    }

    /// Reveal the whole answer. Every slot ends up holding the correct
    /// letter, wrong guesses included, so the displayed grid matches the
    /// answer exactly. Once solved this behaves like [`Session::submit`]'s
    /// advance branch.
    pub fn give_up(&mut self) -> SubmitSignal {
        if self.solved {
            return SubmitSignal::Advance;
        }
        for (slot, t) in self.letters.iter_mut().zip(&self.target) {
            *slot = Some(*t);
        }
        self.solved = true;
        SubmitSignal::Revealed
    }

    #[must_use]
    pub fn letters(&self) -> &[Option<char>] {
        &self.letters
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn solved(&self) -> bool {
        self.solved
    }

    #[must_use]
    pub fn revealed_definition(&self) -> bool {
        self.revealed_definition
    }

    #[must_use]
    pub fn revealed_structure(&self) -> bool {
        self.revealed_structure
    }

    /// Number of letter slots (answer length without spaces).
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Label for the main control button: checking while unsolved, moving
    /// on once solved.
    #[must_use]
    pub fn control_label(&self) -> &'static str {
        if self.solved { "advance" } else { "submit" }
    }

    fn is_filled_correctly(&self) -> bool {
        self.letters
            .iter()
            .zip(&self.target)
            .all(|(slot, t)| *slot == Some(*t))
    }
}
