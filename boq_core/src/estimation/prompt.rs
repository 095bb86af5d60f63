//! Material estimation prompt.
//!
//! A fixed instructional template with two substitution points,
//! `{boqItems}` and `{siteParameters}`. Values are inserted verbatim; the
//! target is natural-language text, so nothing is escaped.

use super::request::EstimationRequest;

pub const BOQ_ITEMS_PLACEHOLDER: &str = "boqItems";
pub const SITE_PARAMETERS_PLACEHOLDER: &str = "siteParameters";

/// Instructional template sent to the text-generation service.
pub const PROMPT_TEMPLATE: &str = r#"You are an expert construction material estimator. Your goal is to provide clear, actionable material estimations based on the provided Bill of Quantities (BOQ) items and site parameters.

For each BOQ item, please provide:
1.  **Estimated Quantity**: The calculated quantity of material needed for the work item itself.
2.  **Suggested Purchase Quantity**: A practical quantity to purchase. This should consider factors like:
    *   Standard wastage percentages for the material type (e.g., bricks, tiles, cement).
    *   Potential buffer stock for contingencies.
    *   Typical supplier units or minimum order quantities if this can be inferred or is common knowledge (e.g., cement bags, full lengths of steel).
    *   Any specific site parameters provided by the user that might affect purchase quantities (e.g., user-specified wastage, storage limitations).
3.  **Rationale**: A clear explanation for both the estimated quantity and the suggested purchase quantity, detailing any assumptions made (e.g., wastage percentage used).

Structure your response clearly using Markdown. For each BOQ item, use the following format:

**Item: [Name/Description of BOQ Item from input]**
  - Estimated Quantity: [Calculated Quantity] [Unit] (e.g., 105 cubic meters)
  - Suggested Purchase Quantity: [Purchase Quantity] [Unit] (e.g., 110 cubic meters, or 220 bags of cement if applicable)
  - Rationale: [Your detailed explanation for the estimation and purchase suggestion, including any wastage factors or buffer considerations.]

Separate consecutive items with a line containing only:

---

Here are the project details:

Bill of Quantities (BOQ) Items:
{boqItems}

Site Parameters:
{siteParameters}

Begin your detailed material estimations below:
"#;

/// Render the estimation prompt for a request.
///
/// ```rust
/// use boq_core::estimation::{render_prompt, EstimationRequest};
///
/// let request = EstimationRequest::new("Plastering 12mm: 1000 sq m", "Consider 5% extra").unwrap();
/// let prompt = render_prompt(&request);
/// assert!(prompt.contains("Plastering 12mm: 1000 sq m"));
/// assert!(prompt.contains("\n---\n"));
/// ```
pub fn render_prompt(request: &EstimationRequest) -> String {
    render_template(
        PROMPT_TEMPLATE,
        &[
            (BOQ_ITEMS_PLACEHOLDER, request.boq_items()),
            (SITE_PARAMETERS_PLACEHOLDER, request.site_parameters()),
        ],
    )
}

/// Substitute `{name}` placeholders in a single left-to-right pass.
///
/// Inserted values are never scanned again, so user text that happens to
/// contain `{siteParameters}` comes through literally. Braces that do not
/// name a known placeholder are copied as-is.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = values.iter().find_map(|(name, value)| {
            after
                .strip_prefix(name)
                .and_then(|tail| tail.strip_prefix('}'))
                .map(|tail| (*value, tail))
        });

        match substituted {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
