use std::fmt::Write;

use crate::llm::InvocationResult;
use crate::translate::interface::DEFAULT_LANGUAGE;
use crate::translate::TranslationOutcome;

const LANGUAGES: &[&str] = &[
    "English", "French", "German", "Spanish", "Italian", "Russian", "Chinese", "Japanese",
];

/// Everything the index page can show. All fields are optional so the same
/// page serves the empty form, a validation notice and full results.
#[derive(Debug, Clone, Default)]
pub struct IndexView {
    pub notice: Option<String>,
    pub source_text: Option<String>,
    pub language: Option<String>,
    pub translation: Option<InvocationResult>,
    pub judge: Option<InvocationResult>,
}

impl IndexView {
    pub fn with_notice(notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
            ..Self::default()
        }
    }
}

impl From<TranslationOutcome> for IndexView {
    fn from(outcome: TranslationOutcome) -> Self {
        Self {
            notice: None,
            source_text: Some(outcome.source_text),
            language: Some(outcome.language),
            translation: Some(outcome.translation),
            judge: outcome.judge,
        }
    }
}

pub fn render_index(view: &IndexView) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>AI Translator &amp; Critic</title>\n</head>\n<body>\n\
         <h1>AI Translator &amp; Critic</h1>\n",
    );

    if let Some(notice) = &view.notice {
        let _ = writeln!(html, "<div class=\"flash\">{}</div>", escape_html(notice));
    }

    render_form(&mut html, view);

    if let Some(translation) = &view.translation {
        render_result(&mut html, "translation", "Перевод", translation);
    }
    if let Some(judge) = &view.judge {
        render_result(&mut html, "judge", "Оценка", judge);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, view: &IndexView) {
    let selected = view.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);

    html.push_str("<form method=\"post\" action=\"/\">\n");
    let _ = writeln!(
        html,
        "<textarea name=\"source_text\" rows=\"6\" cols=\"60\">{}</textarea>",
        escape_html(view.source_text.as_deref().unwrap_or_default())
    );

    html.push_str("<select name=\"language\">\n");
    for language in LANGUAGES {
        let _ = writeln!(
            html,
            "<option value=\"{0}\"{1}>{0}</option>",
            language,
            if *language == selected { " selected" } else { "" }
        );
    }
    if !LANGUAGES.contains(&selected) {
        let _ = writeln!(
            html,
            "<option value=\"{0}\" selected>{0}</option>",
            escape_html(selected)
        );
    }
    html.push_str("</select>\n");

    html.push_str(
        "<button type=\"submit\" name=\"action\" value=\"translate\">Перевести</button>\n\
         <button type=\"submit\" name=\"action\" value=\"judge\">Перевести и оценить</button>\n\
         </form>\n",
    );
}

fn render_result(html: &mut String, id: &str, title: &str, result: &InvocationResult) {
    let status = match result.status_code {
        Some(code) => code.to_string(),
        None => "network error".to_string(),
    };
    let _ = writeln!(
        html,
        "<section id=\"{}\" class=\"{}\">\n<h2>{}</h2>\n<p class=\"status\">ok: {} ({})</p>",
        id,
        if result.ok { "ok" } else { "failed" },
        title,
        result.ok,
        status
    );
    let _ = writeln!(
        html,
        "<pre class=\"text\">{}</pre>",
        escape_html(result.text.as_deref().unwrap_or_default())
    );
    let _ = writeln!(
        html,
        "<details><summary>raw</summary><pre class=\"raw\">{}</pre></details>\n</section>",
        escape_html(&result.raw)
    );
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::Action;

    fn result(ok: bool, text: &str, status_code: Option<u16>) -> InvocationResult {
        InvocationResult {
            ok,
            text: Some(text.to_string()),
            raw: format!("raw:{}", text),
            status_code,
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b a="1">&'</b>"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn empty_form_has_both_actions() {
        let html = render_index(&IndexView::default());
        assert!(html.contains("value=\"translate\""));
        assert!(html.contains("value=\"judge\""));
        assert!(html.contains("<option value=\"English\" selected>"));
        assert!(!html.contains("class=\"flash\""));
        assert!(!html.contains("<section"));
    }

    #[test]
    fn notice_is_rendered() {
        let html = render_index(&IndexView::with_notice("введите текст"));
        assert!(html.contains("<div class=\"flash\">введите текст</div>"));
    }

    #[test]
    fn outcome_renders_both_sections() {
        let view = IndexView::from(TranslationOutcome {
            source_text: "<Hello>".to_string(),
            language: "French".to_string(),
            action: Action::Judge,
            translation: result(true, "Bonjour", Some(200)),
            judge: Some(result(false, "timed out", None)),
        });
        let html = render_index(&view);

        assert!(html.contains("&lt;Hello&gt;</textarea>"));
        assert!(html.contains("<option value=\"French\" selected>"));
        assert!(html.contains("<pre class=\"text\">Bonjour</pre>"));
        assert!(html.contains("raw:Bonjour"));
        assert!(html.contains("ok: false (network error)"));
    }

    #[test]
    fn unknown_language_is_kept_selected() {
        let view = IndexView {
            language: Some("Klingon".to_string()),
            ..IndexView::default()
        };
        let html = render_index(&view);
        assert!(html.contains("<option value=\"Klingon\" selected>"));
        assert!(html.contains("<option value=\"English\">"));
    }
}
