/// Stand-in for the translation when the first call produced no text.
pub const MISSING_TRANSLATION: &str = "[нет перевода]";

pub fn translation_prompt(language: &str, source_text: &str) -> String {
    format!("Переведи на {}: {}", language, source_text)
}

pub fn judge_prompt(source_text: &str, translation: Option<&str>) -> String {
    let translation = translation
        .filter(|t| !t.is_empty())
        .unwrap_or(MISSING_TRANSLATION);
    format!(
        "Оцени качество перевода от 1 до 10 и коротко аргументируй.\nОригинал: {}\nПеревод: {}",
        source_text, translation
    )
}
