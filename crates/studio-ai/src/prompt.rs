//! Prompt assembly for draft generation and refinement.
//!
//! The prompts carry the full "Franco AI Automations" branded HTML email
//! skeleton so the model fills content into a fixed structure instead of
//! inventing its own markup. Links the model cannot know go through the
//! `https://INSERT_LINK_HERE` placeholder convention, which the operator
//! replaces before sending.

/// Tone applied when the operator leaves the instruction box blank.
pub const DEFAULT_TONE_INSTRUCTION: &str =
    "Maintain a professional, authoritative, and helpful tone. Project confidence in the resolution.";

const CONTENT_MARKER: &str = "__CONTENT_GUIDANCE__";

const HTML_TEMPLATE: &str = r##"The "body" value in the JSON MUST be a single HTML string.

**DESIGN DIRECTIVE (PREMIUM BRANDING):**
You are using the "Franco AI Automations" Corporate Identity.
The brand colors are Gold/Bronze (#D4AF37) and Black/Dark Grey.
The design must feel expensive, authoritative, and clean.

**INSTRUCTIONS FOR HTML BODY:**
1.  **Language:** Same as customer's email.
2.  **Structure:** Use the provided HTML structure.
3.  **Tone:** Professional, authoritative yet empathetic.
4.  **Links:** Use `https://INSERT_LINK_HERE` for placeholders.
5.  **Refinement:** If this is a refinement, strictly follow the user's new instruction.

**HTML TEMPLATE:**
---html
<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="margin: 0; padding: 0; background-color: #f8f8f8; font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif;">
  <table width="100%" border="0" cellspacing="0" cellpadding="0" style="background-color: #f8f8f8; padding: 40px 0;">
    <tr>
      <td align="center">
        <table width="600" border="0" cellspacing="0" cellpadding="0" style="max-width: 600px; width: 100%; background-color: #ffffff; box-shadow: 0 10px 25px -5px rgba(0, 0, 0, 0.05);">
          <tr>
            <td style="background-color: #000000; padding: 45px 40px 15px 40px; text-align: center;">
              <img src="https://res.cloudinary.com/dytb3hwko/image/upload/v1763935327/5845775451836582972_thjnvm.jpg" alt="Franco AI Automations" style="height: 65px; width: auto; display: block; margin: 0 auto;">
            </td>
          </tr>
          <tr>
            <td style="background-color: #000000; padding: 0px 40px 25px 40px; border-bottom: 4px solid #D4AF37;">
              <p style="margin: 0; font-size: 10px; color: #D4AF37; text-transform: uppercase; letter-spacing: 3px; font-weight: 600; text-align: center;">Official Communication</p>
            </td>
          </tr>
          <tr>
            <td style="padding: 50px 40px; color: #333333; font-size: 16px; line-height: 1.6;">
              <h1 style="margin: 0 0 24px 0; font-size: 24px; font-weight: 400; color: #111111;">Hello [Customer Name],</h1>
              <p style="margin: 0 0 16px 0;">[__CONTENT_GUIDANCE__]</p>
              <table width="100%" border="0" cellspacing="0" cellpadding="0" style="background-color: #FFFCF5; border-left: 4px solid #D4AF37; margin: 35px 0;">
                <tr>
                  <td style="padding: 25px;">
                    <p style="margin: 0; font-size: 15px; color: #4a4a4a;">
                      <strong style="color: #D4AF37; text-transform: uppercase; font-size: 11px; letter-spacing: 1px;">Resolution Summary</strong><br><br>
                      [Provide concise solution or approved action here]
                    </p>
                  </td>
                </tr>
              </table>
              <p style="margin: 0 0 30px 0;">[Closing statement reassuring the customer]</p>
              <table border="0" cellspacing="0" cellpadding="0" style="margin: 10px 0 30px 0; width: 100%;">
                <tr>
                  <td align="center">
                    <a href="https://INSERT_LINK_HERE" target="_blank" style="font-size: 14px; color: #000000; text-decoration: none; padding: 16px 40px; background-color: #D4AF37; display: inline-block; font-weight: 700; letter-spacing: 1px; text-transform: uppercase;">[Action Button Text]</a>
                  </td>
                </tr>
              </table>
              <p style="margin: 0; font-size: 15px; color: #666;">Sincerely,<br><strong style="color: #111;">Franco AI Team</strong></p>
            </td>
          </tr>
          <tr>
            <td style="background-color: #111111; padding: 40px 40px; text-align: center; border-top: 1px solid #222;">
              <p style="margin: 0 0 15px 0; font-size: 12px; color: #666666;">&copy; 2024 Franco AI Automations. All rights reserved.</p>
              <p style="margin: 0; font-size: 11px; color: #444444;">
                <a href="#" style="color: #888888; text-decoration: none;">Privacy Policy</a> &nbsp;|&nbsp; <a href="#" style="color: #888888; text-decoration: none;">Support Center</a>
              </p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>
---
"##;

fn html_template(content_guidance: &str) -> String {
    HTML_TEMPLATE.replace(CONTENT_MARKER, content_guidance)
}

/// Prompt for a fresh draft. `structured_json` toggles the wording of the
/// output directive: structured-output requests return bare JSON, while
/// the search-augmented call must fence the JSON in a markdown block.
pub fn generation_prompt(source_text: &str, structured_json: bool, instructions: &str) -> String {
    let json_directive = if structured_json {
        "The generated response must be a valid JSON object with two keys: \"subject\" and \"body\"."
    } else {
        "The generated response must be a JSON object with two keys: \"subject\" and \"body\", inside a JSON markdown block (```json ... ```)."
    };

    let style = if instructions.trim().is_empty() {
        DEFAULT_TONE_INSTRUCTION
    } else {
        instructions
    };
    let template = html_template(
        "Address the issue clearly. Use the Resolution Summary block to highlight the key takeaway.",
    );

    format!(
        r#"You are a Senior Customer Support Specialist for "Franco AI Automations", an e-commerce brand.

**STYLE INSTRUCTIONS:**
{style}

**GOAL:**
Generate a response that feels "Official", "Premium" and "Authoritative". Use the "Resolution Summary" style to give the customer confidence that the issue is being handled by a pro.

**Primary Goal:** Detect the language of the customer's email and generate the entire response (subject and body) in that same language.

Task: Analyze the customer email and generate a response formatted as a professional, branded HTML email.

{json_directive}

{template}

Customer Email:
---
{source_text}
---
"#
    )
}

/// Prompt for rewriting an existing draft. The current subject and body go
/// in verbatim, with a directive to keep the template, styling and
/// branding and apply only the requested change.
pub fn refinement_prompt(
    source_text: &str,
    current_subject: &str,
    current_body: &str,
    instruction: &str,
) -> String {
    let template = html_template("Updated content based on refinement instructions.");

    format!(
        r#"You are an expert customer support agent.

**TASK: REFORMULATE/REFINE RESPONSE**

Original Customer Email:
---
{source_text}
---

Current Draft Response (Subject: {current_subject}):
---
{current_body}
---

**USER REFINEMENT INSTRUCTION (IMPORTANT):**
"{instruction}"

Action: Rewrite the Draft Response (Subject and Body) to incorporate the user's instruction.
Maintain the same HTML structure (the authoritative template), styling, and branding as the original draft.

Output must be a valid JSON object with "subject" and "body" keys.

{template}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_instructions_fall_back_to_default_tone() {
        let prompt = generation_prompt("hola", true, "   ");
        assert!(prompt.contains(DEFAULT_TONE_INSTRUCTION));

        let prompt = generation_prompt("hola", true, "be brief");
        assert!(prompt.contains("be brief"));
        assert!(!prompt.contains(DEFAULT_TONE_INSTRUCTION));
    }

    #[test]
    fn generation_prompt_embeds_template_and_source() {
        let prompt = generation_prompt("Where is my order #123?", true, "");
        assert!(prompt.contains("https://INSERT_LINK_HERE"));
        assert!(prompt.contains("Resolution Summary"));
        assert!(prompt.contains("Franco AI Automations"));
        assert!(prompt.contains("Where is my order #123?"));
        assert!(!prompt.contains(CONTENT_MARKER));
    }

    #[test]
    fn json_directive_tracks_output_mode() {
        let structured = generation_prompt("x", true, "");
        assert!(structured.contains("must be a valid JSON object"));
        assert!(!structured.contains("markdown block"));

        let fenced = generation_prompt("x", false, "");
        assert!(fenced.contains("markdown block"));
    }

    #[test]
    fn refinement_prompt_carries_current_draft_verbatim() {
        let prompt = refinement_prompt(
            "original email",
            "Re: Order #123",
            "<html>draft</html>",
            "make it shorter",
        );
        assert!(prompt.contains("Subject: Re: Order #123"));
        assert!(prompt.contains("<html>draft</html>"));
        assert!(prompt.contains("\"make it shorter\""));
        assert!(prompt.contains("Maintain the same HTML structure"));
    }
}
