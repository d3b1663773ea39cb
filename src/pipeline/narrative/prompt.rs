//! Constrained-format prompt construction.
//!
//! The backend is asked for exactly one line with three answers joined
//! by a triple-character delimiter that does not occur in clinical
//! prose, anchored by one worked example. Small instruction-tuned
//! models follow the delimiter far more reliably than free-form or JSON
//! requests.

/// Separator the model must place between its three answers.
pub const ANSWER_DELIMITER: &str = "|||";

/// Notes are clipped to this many characters before entering the prompt.
pub const NOTES_CHAR_LIMIT: usize = 500;

/// Flatten line breaks and clip overlong notes, marking the cut with an
/// ellipsis.
pub fn condense_notes(notes: &str) -> String {
    let flat = notes.replace('\n', " ");
    if flat.chars().count() > NOTES_CHAR_LIMIT {
        let clipped: String = flat.chars().take(NOTES_CHAR_LIMIT).collect();
        format!("{clipped}...")
    } else {
        flat
    }
}

/// Build the narrative-synthesis instruction for one triage decision.
pub fn build_narrative_prompt(level: u8, drivers: &str, notes: &str) -> String {
    let safe_notes = condense_notes(notes);

    format!(
        "[INST] You are an AI Chief Medical Officer. Analyze the patient data and return exactly ONE line of text.\n\
         You MUST separate your 3 answers using the '{ANSWER_DELIMITER}' symbol.\n\
         \n\
         Format:\n\
         Clinical Synthesis (1 sentence) {ANSWER_DELIMITER} Recommended Action (3-5 words) {ANSWER_DELIMITER} Department Routing (1-3 words)\n\
         \n\
         Example:\n\
         Patient is a 55-year-old male presenting with severe chest pain and tachycardia. {ANSWER_DELIMITER} Stat EKG and Troponin {ANSWER_DELIMITER} Cardiac ICU\n\
         \n\
         Patient Data:\n\
         - Risk Level: {level}\n\
         - AI Drivers: {drivers}\n\
         - Notes: {safe_notes}\n\
         [/INST]\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_notes_pass_through_flattened() {
        let notes = "Dyspnea on exertion.\nNo chest pain.";
        assert_eq!(condense_notes(notes), "Dyspnea on exertion. No chest pain.");
    }

    #[test]
    fn long_notes_are_clipped_with_ellipsis() {
        let notes = "x".repeat(800);
        let condensed = condense_notes(&notes);
        assert_eq!(condensed.chars().count(), NOTES_CHAR_LIMIT + 3);
        assert!(condensed.ends_with("..."));
    }

    #[test]
    fn notes_at_limit_are_not_marked() {
        let notes = "x".repeat(NOTES_CHAR_LIMIT);
        let condensed = condense_notes(&notes);
        assert_eq!(condensed.chars().count(), NOTES_CHAR_LIMIT);
        assert!(!condensed.ends_with("..."));
    }

    #[test]
    fn clipping_is_character_based() {
        // Multibyte content near the limit must not split a code point.
        let notes = "é".repeat(NOTES_CHAR_LIMIT + 10);
        let condensed = condense_notes(&notes);
        assert_eq!(condensed.chars().count(), NOTES_CHAR_LIMIT + 3);
    }

    #[test]
    fn prompt_embeds_decision_context() {
        let prompt = build_narrative_prompt(
            2,
            "oxygen_saturation (pushed toward Level 2)",
            "SpO2 91 on room air.",
        );
        assert!(prompt.contains("Risk Level: 2"));
        assert!(prompt.contains("oxygen_saturation (pushed toward Level 2)"));
        assert!(prompt.contains("SpO2 91 on room air."));
        assert!(prompt.starts_with("[INST]"));
        assert!(prompt.contains("[/INST]"));
    }

    #[test]
    fn prompt_contains_the_worked_example() {
        let prompt = build_narrative_prompt(0, "", "");
        // Instruction line, format line, and the example all carry the
        // delimiter — the model sees it three times before answering.
        assert!(prompt.matches(ANSWER_DELIMITER).count() >= 5);
        assert!(prompt.contains("Cardiac ICU"));
    }
}
