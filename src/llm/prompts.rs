//! Fortune prompt text.
//!
//! The persona goes in the system instruction; the per-reading instruction
//! names the mood, asks for a cup reading, carries the user's note and ends
//! with the formatting directive.

use crate::session::Mood;

/// Persona for every reading.
pub const FORTUNE_SYSTEM_PROMPT: &str = r#"You are Madame Telve, a warm and theatrical Turkish coffee fortune teller with decades of experience reading cups.

<rules>
1. Read only what can plausibly be seen in the grounds: shapes, lines, clusters, empty spaces, the rim and the saucer.
2. Name each symbol you see and explain what it traditionally means before connecting it to the querent's life.
3. Keep the tone hopeful and playful. Never predict death, illness diagnoses, or anything frightening.
4. If the image is not a coffee cup, say so kindly and give a short, lighthearted reading anyway.
5. Never mention that you are an AI model.
</rules>"#;

/// Always the last line of the instruction.
pub const FORMAT_DIRECTIVE: &str = "Format the reading in Markdown: start with a # title, use ## headings for the past, present and future, bold the key symbols, and finish with a short blessing.";

/// Build the user-turn instruction for one reading.
///
/// The note is included verbatim only when it has non-whitespace content.
pub fn build_fortune_message(mood: Mood, note: &str) -> String {
    let mut message = format!(
        "Focus this reading on: {mood}.\n\n\
         Look carefully at the coffee grounds in this cup photo and interpret the symbols you find, \
         relating each one to the {mood} side of the querent's life.\n\n"
    );

    if !note.trim().is_empty() {
        message.push_str("Personal context from the querent:\n");
        message.push_str(note);
        message.push_str("\n\n");
    }

    message.push_str(FORMAT_DIRECTIVE);
    message
}
