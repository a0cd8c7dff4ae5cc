// src/prompt/builder.rs
// PromptBuilder for consistent prompt construction across analysis modes

use crate::llm::Message;
use crate::mood::Quadrant;

/// Static shared prefix for all analysis prompts.
/// This section remains identical across all calls to maximize prompt cache reuse.
const STATIC_PREFIX: &str = r#"You are an authority on neuroscience and clinical psychology. From the
user's description you estimate their current neurotransmitter balance and
propose concrete, scientifically grounded steps.

Response principles:
1. No abstractions: answers like "try to relax" are forbidden.
2. Concrete actions: propose physical steps the user can take right now.
3. Explain the biomechanism: why each action acts on a specific
   brain chemical.
4. Add the psychological perspective alongside the neuroscience.
5. Answer in the tone of a trusted specialist.
"#;

/// Line-format contract for the prose debrief. The response interpreter
/// scans for exactly this shape.
const DEBRIEF_FORMAT: &str = r#"Structure your reply as follows:
- Open with a short assessment of the likely chemical balance.
- For every substance you discuss, add one line formatted exactly as
  `Name: current, target` where both numbers are percentages of a healthy
  baseline (for example `Dopamine: 30, 70`).
- Then a line containing only `---detail---`.
- After the delimiter, explain the mechanisms and the recommended actions."#;

/// PromptBuilder constructs standardized prompts with a "funnel" structure:
/// 1. Static shared prefix (same across all calls)
/// 2. Semi-static role/task definition (mode-specific instructions)
/// 3. Dynamic user context (description, quadrant, optional note)
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    role_instructions: String,
}

impl PromptBuilder {
    /// Create a new PromptBuilder with mode-specific instructions
    pub fn new(role_instructions: impl Into<String>) -> Self {
        Self {
            role_instructions: role_instructions.into(),
        }
    }

    /// Factory method for the prose debrief mode
    pub fn for_debrief() -> Self {
        Self::new(DEBRIEF_FORMAT)
    }

    /// Factory method for the structured report mode.
    ///
    /// The field list here is the contract `analysis::parse_report`
    /// validates against; keep the two in sync.
    pub fn for_structured_report() -> Self {
        let mut instructions = String::new();
        instructions.push_str(
            "Your entire reply MUST be a single valid JSON object with these fields:\n",
        );
        instructions.push_str(
            "- levels: array of objects, each {\"name\": string, \"current\": integer, \
             \"target\": integer} where current and target are percentages 0-100\n",
        );
        instructions.push_str("- mood: one short label for the user's state (string)\n");
        instructions.push_str("- tags: short context tags (array of strings)\n");
        instructions.push_str("- summary: brief assessment of the chemical balance (string)\n");
        instructions
            .push_str("- guidance: mechanisms and concrete recommended actions (string)\n\n");
        instructions.push_str(
            "Never add anything before or after the JSON. No markdown, no commentary - \
             just the JSON object.",
        );
        Self::new(instructions)
    }

    /// Build the complete system prompt
    pub fn build_system_prompt(&self) -> String {
        let mut prompt = STATIC_PREFIX.to_string();
        prompt.push_str("\n\n");
        prompt.push_str(&self.role_instructions);
        prompt
    }

    /// Build a vector of messages with system prompt and user content
    pub fn build_messages(&self, user_content: impl Into<String>) -> Vec<Message> {
        vec![
            Message::system(self.build_system_prompt()),
            Message::user(user_content),
        ]
    }
}

/// Compose the dynamic user section from the collected inputs.
///
/// The description is embedded verbatim: no escaping or sanitization is
/// applied, an accepted limitation for this non-adversarial audience.
pub fn compose_user_context(
    description: &str,
    quadrant: Quadrant,
    context_note: Option<&str>,
) -> String {
    let mut context = String::new();

    context.push_str("Self-assessment sliders place the user in the ");
    context.push_str(quadrant.as_str());
    context.push_str(" quadrant (");
    context.push_str(quadrant.axis_summary());
    context.push_str("), typically described as: ");
    context.push_str(&quadrant.descriptors().join(", "));
    context.push_str(".\n\n");

    if let Some(note) = context_note {
        if !note.trim().is_empty() {
            context.push_str("Additional context: ");
            context.push_str(note);
            context.push_str("\n\n");
        }
    }

    context.push_str("The user's situation:\n");
    context.push_str(description);

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_contains_prefix_and_role() {
        let builder = PromptBuilder::for_debrief();
        let prompt = builder.build_system_prompt();
        assert!(prompt.contains("neuroscience"));
        assert!(prompt.contains("---detail---"));
    }

    #[test]
    fn test_structured_prompt_lists_contract_fields() {
        let prompt = PromptBuilder::for_structured_report().build_system_prompt();
        for field in ["levels", "mood", "tags", "summary", "guidance"] {
            assert!(prompt.contains(field), "missing field {}", field);
        }
    }

    #[test]
    fn test_build_messages_roles() {
        let messages = PromptBuilder::for_debrief().build_messages("I feel wired");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "I feel wired");
    }

    #[test]
    fn test_user_context_embeds_description_verbatim() {
        let description = "I keep replaying an argument: 100% stuck";
        let context = compose_user_context(description, Quadrant::Agitated, None);
        assert!(context.contains(description));
        assert!(context.contains("agitated"));
        assert!(context.contains("high arousal, negative valence"));
    }

    #[test]
    fn test_user_context_includes_note_when_present() {
        let context =
            compose_user_context("tired", Quadrant::Depleted, Some("slept four hours"));
        assert!(context.contains("slept four hours"));

        let without = compose_user_context("tired", Quadrant::Depleted, Some("   "));
        assert!(!without.contains("Additional context"));
    }
}
