// Prompt fragments for résumé questions.

pub const RESUME_PREFIX: &str = "Вот текст резюме:\n";
pub const QUESTION_LABEL: &str = "\n\nВопрос: ";

/// Prefix, full résumé text, question label, question. Nothing is trimmed.
pub fn build_resume_prompt(resume_text: &str, question: &str) -> String {
    let mut prompt = String::with_capacity(
        RESUME_PREFIX.len() + resume_text.len() + QUESTION_LABEL.len() + question.len(),
    );
    prompt.push_str(RESUME_PREFIX);
    prompt.push_str(resume_text);
    prompt.push_str(QUESTION_LABEL);
    prompt.push_str(question);
    prompt
}
