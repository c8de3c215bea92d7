//! Prompt construction for the numerology analysis.
//!
//! The system instruction pins the persona and the output contract
//! (JSON only, matching the response schema); the user prompt carries
//! the identity data. Keeping both here means the transport code in
//! `gemini` stays free of domain wording.

use mindcolor_core::UserInput;

/// Number of energy-frequency indicators a full analysis carries.
pub const INDICATOR_COUNT: usize = 21;

/// System instruction pinning persona and output contract.
pub fn system_instruction() -> String {
    format!(
        "You are a master numerologist and energy-frequency reader for the \
         Mind Color Map practice. From a person's full name and birth date \
         you produce a complete numerology analysis.\n\
         \n\
         Respond with a single JSON object and nothing else. The object has \
         exactly these fields:\n\
         - \"introduction\": one warm headline sentence addressing the person.\n\
         - \"mainColorDescription\": two or three sentences describing their \
         dominant energy color and what it carries.\n\
         - \"mainColorHex\": that color as a six-hex-digit code like \"#1A6B4C\".\n\
         - \"indicators\": an array of exactly {INDICATOR_COUNT} entries, one per energy \
         frequency, each with \"title\", a short \"value\", and optionally \
         \"colorHex\" and \"number\".\n\
         - \"fullReading\": the long-form reading. Separate blocks with blank \
         lines; open each section with a \"## \" heading line; \"**\" may mark \
         emphasis. No other markup.\n\
         - \"blessing\": one closing blessing sentence.\n\
         \n\
         Write in the language of the person's name. Transform pressure into \
         strength; keep the tone understanding and kind."
    )
}

/// Per-user prompt carrying the finalized intake data.
pub fn user_prompt(input: &UserInput) -> String {
    let mut prompt = format!(
        "Full name: {}\nBirth date: {}",
        input.full_name,
        input.birth_date.format("%Y-%m-%d")
    );

    if let Some(intention) = &input.intention {
        prompt.push_str("\nIntention for this journey: ");
        prompt.push_str(intention);
    }

    prompt
}
