// Prompt constants for the structuring-hint call.
// The role vocabulary here must stay in sync with `LineRole`.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

pub const STRUCTURE_SYSTEM: &str = "You label the lines of a plain-text résumé so it can be \
    typeset. You never rewrite, summarise, translate or correct the text.";

/// `{resume_text}` is replaced with the sanitized résumé.
pub const STRUCTURE_PROMPT_TEMPLATE: &str = "\
Label every line of the résumé below with exactly one role.

Allowed roles (use these strings exactly):
- name: the candidate's name. At most one, and only as the first record.
- contact: email, phone, location, profile links.
- section_header: a section heading such as EXPERIENCE or EDUCATION.
- job_title: a position, degree or project line. Put a trailing date range in \"secondary\".
- job_detail: a company/organisation line that belongs to the job title next to it.
- bullet: an achievement or responsibility item.
- skill_group: a comma-separated list of skills.
- plain_text: anything else.
- blank: an empty line (content \"\").

Rules:
- Return a JSON array of objects: {\"role\": ..., \"content\": ..., \"secondary\": ...}.
- \"secondary\" is optional; omit it when there is nothing to put there.
- Copy content verbatim from the résumé. Do not invent, drop or reorder words.
- Keep the original line order.

Résumé:
<<<
{resume_text}
>>>";

pub fn structure_prompt(resume_text: &str) -> String {
    STRUCTURE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}
