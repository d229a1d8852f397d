use crate::annotate::{annotate, Segment};
use crate::clue_kind::primary_token;
use crate::clue_set::ClueSet;
use crate::errors::ClueSetError;
use crate::game::{GameContext, GameSignal};
use crate::log::init_logger;
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "C001", "WASM001")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl WasmError {
    fn serialization(message: String) -> Self {
        WasmError {
            code: "WASM001".to_string(),
            message,
            description: "Failed to serialize trainer state".to_string(),
            details: "The trainer state could not be converted to JavaScript format.".to_string(),
            help: Some("This is an internal error. Please report this issue.".to_string()),
        }
    }
}

impl From<ClueSetError> for WasmError {
    fn from(e: ClueSetError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(str::to_string),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        // Format a comprehensive error message
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {}", help));
        }

        // Create a JavaScript Error object with the formatted message
        js_sys::Error::new(&msg).into()
    }
}

/// Validate all internal regex patterns compile successfully.
///
/// Forces LazyLock initialization of the static regexes so any compilation
/// errors occur at startup rather than on the first clue.
///
/// ## IMPORTANT: Adding a new regex?
/// If you add a new `LazyLock<Regex>` anywhere in the codebase, you MUST add
/// it here. Otherwise it won't be validated at startup and could crash on
/// first use. See: `tests::test_all_regexes_validated` for a reminder.
fn validate_internal_regexes() {
    // Access each LazyLock regex to force compilation
    let _ = &*crate::clue::DEF_SPLIT_RE;
    log::debug!("Internal regex patterns validated successfully");
}

/// Initialize cluedrill logging and validation with the specified debug
/// setting.
///
/// # Arguments
/// * `debug_enabled` - If true, use Debug log level; if false, use Info log level
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    // 1. Set up panic hook
    console_error_panic_hook::set_once();

    // 2. Validate internal regexes early
    validate_internal_regexes();

    // 3. Initialize logging with the provided debug setting
    init_logger(debug_enabled);

    log::info!("WASM module initialized");
    if !debug_enabled {
        log::info!("Debug logging disabled");
    }
}

/// Everything the renderer needs after an event: grid contents, cursor,
/// solved/reveal flags, position in the set, and (for submit-like actions)
/// the resulting signal.
#[derive(serde::Serialize)]
struct TrainerState {
    clue_index: usize,
    clue_count: usize,
    /// Primary kind token, for the category-level visual theme.
    kind: String,
    enumeration: String,
    word_lengths: Vec<usize>,
    /// One string per letter box; empty string for an unfilled box.
    letters: Vec<String>,
    cursor: usize,
    solved: bool,
    control_label: String,
    revealed_definition: bool,
    revealed_structure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal: Option<String>,
}

/// Annotated clue plus a ready-made HTML rendering.
#[derive(serde::Serialize)]
struct WasmAnnotatedClue<'a> {
    kind: &'a str,
    segments: &'a [Segment],
    html: String,
}

fn signal_name(signal: GameSignal) -> &'static str {
    match signal {
        GameSignal::Correct => "correct",
        GameSignal::Incorrect => "incorrect",
        GameSignal::Revealed => "revealed",
        GameSignal::Next => "next",
        GameSignal::Finished => "finished",
    }
}

/// The trainer as a JS-owned handle: one clue set, one live session.
///
/// Every mutating method returns a fresh [`TrainerState`] snapshot so the
/// JavaScript side can re-render without reaching back for individual
/// fields.
#[wasm_bindgen]
pub struct Trainer {
    ctx: GameContext,
}

#[wasm_bindgen]
impl Trainer {
    /// Build a trainer from the clue-set JSON text (as fetched by the page).
    ///
    /// # Errors
    /// Throws a structured error when the JSON is malformed, the top level
    /// is not an array, or no record survives normalization.
    #[wasm_bindgen(constructor)]
    pub fn new(clue_set_json: &str) -> Result<Trainer, JsValue> {
        let set = ClueSet::parse_from_str(clue_set_json).map_err(WasmError::from)?;
        let ctx = GameContext::new(set).map_err(WasmError::from)?;
        log::info!("trainer ready with {} clues", ctx.clue_count());
        Ok(Trainer { ctx })
    }

    /// Current snapshot without changing anything.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        self.snapshot(None)
    }

    /// Annotated rendering of the current clue: `{ kind, segments, html }`.
    pub fn annotated_clue(&self) -> Result<JsValue, JsValue> {
        let annotated = annotate(self.ctx.current_clue());
        let wasm_clue = WasmAnnotatedClue {
            kind: &annotated.kind,
            segments: &annotated.segments,
            html: annotated.to_html(),
        };
        serde_wasm_bindgen::to_value(&wasm_clue)
            .map_err(|e| WasmError::serialization(format!("annotation failed: {e}")).into())
    }

    /// Key press. Anything but a single letter is ignored, matching the
    /// state machine's contract.
    pub fn type_letter(&mut self, input: &str) -> Result<JsValue, JsValue> {
        let mut chars = input.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            self.ctx.session_mut().type_letter(c);
        }
        self.snapshot(None)
    }

    pub fn backspace(&mut self) -> Result<JsValue, JsValue> {
        self.ctx.session_mut().backspace();
        self.snapshot(None)
    }

    /// Box click.
    pub fn set_cursor(&mut self, index: usize) -> Result<JsValue, JsValue> {
        self.ctx.session_mut().set_cursor(index);
        self.snapshot(None)
    }

    pub fn submit(&mut self) -> Result<JsValue, JsValue> {
        let signal = self.ctx.submit();
        self.snapshot(Some(signal))
    }

    pub fn reveal_definition(&mut self) -> Result<JsValue, JsValue> {
        self.ctx.session_mut().reveal_definition();
        self.snapshot(None)
    }

    pub fn reveal_one_letter(&mut self) -> Result<JsValue, JsValue> {
        self.ctx.session_mut().reveal_one_letter();
        self.snapshot(None)
    }

    pub fn reveal_structure(&mut self) -> Result<JsValue, JsValue> {
        self.ctx.session_mut().reveal_structure();
        self.snapshot(None)
    }

    pub fn give_up(&mut self) -> Result<JsValue, JsValue> {
        let signal = self.ctx.give_up();
        self.snapshot(Some(signal))
    }

    /// Move to the next clue; on the last clue this reports "finished" and
    /// stays put.
    pub fn advance(&mut self) -> Result<JsValue, JsValue> {
        let signal = self.ctx.advance();
        self.snapshot(Some(signal))
    }

    /// Jump to a clue by index with a fresh session.
    ///
    /// # Errors
    /// Throws a structured `C004` error for an out-of-range index.
    pub fn select(&mut self, index: usize) -> Result<JsValue, JsValue> {
        if !self.ctx.select(index) {
            return Err(WasmError::from(ClueSetError::ClueIndexOutOfRange {
                requested: index,
                len: self.ctx.clue_count(),
            })
            .into());
        }
        self.snapshot(None)
    }

    fn snapshot(&self, signal: Option<GameSignal>) -> Result<JsValue, JsValue> {
        let entry = self.ctx.current_clue();
        let session = self.ctx.session();
        let state = TrainerState {
            clue_index: self.ctx.current_index(),
            clue_count: self.ctx.clue_count(),
            kind: primary_token(&entry.clue_kind).to_string(),
            enumeration: entry.enumeration(),
            word_lengths: entry.word_lengths(),
            letters: session
                .letters()
                .iter()
                .map(|slot| slot.map_or_else(String::new, String::from))
                .collect(),
            cursor: session.cursor(),
            solved: session.solved(),
            control_label: session.control_label().to_string(),
            revealed_definition: session.revealed_definition(),
            revealed_structure: session.revealed_structure(),
            signal: signal.map(|s| signal_name(s).to_string()),
        };
        serde_wasm_bindgen::to_value(&state)
            .map_err(|e| WasmError::serialization(format!("snapshot failed: {e}")).into())
    }
}

/// Generate a debug report for troubleshooting.
///
/// This function creates a formatted debug report that users can copy/paste
/// when reporting issues. It includes the error message, clue-set details,
/// and environment information.
///
/// # Arguments
/// * `error_message` - The error message that was displayed
/// * `clue_set_size` - Number of records in the loaded clue set
/// * `clue_index` - Which clue was active when the problem occurred
///
/// # Returns
/// A formatted string containing all debug information
#[wasm_bindgen]
pub fn get_debug_info(error_message: &str, clue_set_size: usize, clue_index: usize) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // NB: writing to a String never fails (infallible operation)
    // we use `let _ =` to explicitly ignore the Result without panicking
    let _ = writeln!(&mut report, "=== CLUEDRILL DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(&mut report, "Build: {}", env!("GIT_HASH"));
    let _ = writeln!(
        &mut report,
        "Generated: {}",
        js_sys::Date::new_0()
            .to_iso_string()
            .as_string()
            .unwrap_or_else(|| "unknown".to_string())
    );
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{}", error_message);
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Clue Set");
    let _ = writeln!(&mut report, "Clues: {}", clue_set_size);
    let _ = writeln!(&mut report, "Active Clue: {}", clue_index);
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Environment");
    if let Some(window) = web_sys::window() {
        if let Ok(user_agent) = window.navigator().user_agent() {
            let _ = writeln!(&mut report, "User Agent: {}", user_agent);
        }
        let _ = writeln!(
            &mut report,
            "Location: {}",
            window.location().href().unwrap_or_else(|_| "unknown".to_string())
        );
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Instructions");
    let _ = writeln!(&mut report, "Please copy this entire report and paste it when reporting the issue.");
    let repo = env!("CARGO_PKG_REPOSITORY");
    if !repo.is_empty() {
        let _ = writeln!(&mut report, "Issues: {repo}/issues");
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}
