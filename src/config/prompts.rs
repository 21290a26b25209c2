//! Localized prompt templates for Briefly.
//!
//! Templates can be overridden or extended by placing a `summary.toml` in the
//! custom prompts directory. Each key is a language code, each value a template
//! containing `{{text}}`.

use std::collections::HashMap;
use std::path::PathBuf;

/// Language used when a requested language has no template.
pub const FALLBACK_LANGUAGE: &str = "en";

const EN: &str = r#"You are given the transcript of a YouTube video. Retell it briefly in English.

Guidelines:
- Start with one sentence describing what the video is about
- Follow with the key points as a short bulleted list
- Keep names, numbers and conclusions exactly as stated
- Do not add information that is not in the transcript
- Skip greetings, sponsor segments and requests to subscribe

Transcript:
{{text}}"#;

const RU: &str = r#"Перед тобой расшифровка видео с YouTube. Кратко перескажи её на русском языке.

Правила:
- Начни с одного предложения о том, чему посвящено видео
- Затем перечисли ключевые мысли коротким маркированным списком
- Сохраняй имена, числа и выводы точно так, как они прозвучали
- Не добавляй сведений, которых нет в расшифровке
- Пропускай приветствия, рекламные вставки и призывы подписаться

Расшифровка:
{{text}}"#;

const UK: &str = r#"Перед тобою розшифровка відео з YouTube. Стисло перекажи її українською мовою.

Правила:
- Почни з одного речення про те, чому присвячене відео
- Далі перелічи ключові думки коротким маркованим списком
- Зберігай імена, числа та висновки точно так, як вони прозвучали
- Не додавай відомостей, яких немає в розшифровці
- Пропускай привітання, рекламні вставки та заклики підписатися

Розшифровка:
{{text}}"#;

const DE: &str = r#"Dir liegt das Transkript eines YouTube-Videos vor. Gib es kurz auf Deutsch wieder.

Richtlinien:
- Beginne mit einem Satz darüber, worum es im Video geht
- Fasse danach die Kernaussagen als kurze Stichpunktliste zusammen
- Übernimm Namen, Zahlen und Schlussfolgerungen genau so, wie sie genannt werden
- Füge keine Informationen hinzu, die nicht im Transkript stehen
- Lass Begrüßungen, Werbeblöcke und Abo-Aufrufe weg

Transkript:
{{text}}"#;

const ES: &str = r#"Tienes la transcripción de un vídeo de YouTube. Resúmela brevemente en español.

Pautas:
- Empieza con una frase que describa de qué trata el vídeo
- Continúa con las ideas clave en una lista breve de viñetas
- Conserva los nombres, cifras y conclusiones tal como se mencionan
- No añadas información que no esté en la transcripción
- Omite saludos, patrocinios y peticiones de suscripción

Transcripción:
{{text}}"#;

/// Summary prompt templates keyed by language code.
#[derive(Debug, Clone)]
pub struct Prompts {
    pub summary: HashMap<String, String>,
    /// Language whose template is used when the requested one is missing.
    pub default_language: String,
    /// Custom variables from config, available in all prompts.
    pub variables: HashMap<String, String>,
}

impl Default for Prompts {
    fn default() -> Self {
        let summary = [("en", EN), ("ru", RU), ("uk", UK), ("de", DE), ("es", ES)]
            .into_iter()
            .map(|(lang, template)| (lang.to_string(), template.to_string()))
            .collect();

        Self {
            summary,
            default_language: FALLBACK_LANGUAGE.to_string(),
            variables: HashMap::new(),
        }
    }
}

impl Prompts {
    /// Load built-in prompts, then apply an optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
        default_language: &str,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();
        let default_language = default_language.trim().to_lowercase();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if prompts.summary.contains_key(&default_language) {
            prompts.default_language = default_language.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                let custom: HashMap<String, String> = toml::from_str(&content)?;
                for (lang, template) in custom {
                    prompts.summary.insert(lang.to_lowercase(), template);
                }
                if prompts.summary.contains_key(&default_language) {
                    prompts.default_language = default_language.clone();
                }
            }
        }

        Ok(prompts)
    }

    /// Template for a language, falling back to the default language.
    pub fn template(&self, language: &str) -> &str {
        let language = language.to_lowercase();
        // "pt-BR" -> "pt" when there is no regional template
        let primary = language.split('-').next().unwrap_or_default();

        self.summary
            .get(&language)
            .or_else(|| self.summary.get(primary))
            .or_else(|| self.summary.get(&self.default_language))
            .or_else(|| self.summary.get(FALLBACK_LANGUAGE))
            .map(String::as_str)
            .unwrap_or(EN)
    }

    /// Build the user prompt asking for a summary of `text` in `language`.
    ///
    /// Custom variables are substituted first, so placeholders that happen to
    /// appear inside the transcript are left alone.
    pub fn summary_prompt(&self, language: &str, text: &str) -> String {
        let template = Self::render(self.template(language), &self.variables);
        template.replace("{{text}}", text)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}
